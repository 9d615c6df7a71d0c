use std::process::ExitCode as StdExitCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidInput = 10,
    IoError = 12,
    UnknownTransform = 13,
    ConfigError = 14,
}

impl From<ExitCode> for StdExitCode {
    fn from(code: ExitCode) -> Self {
        StdExitCode::from(code as u8)
    }
}

#[derive(Debug, Error)]
pub enum MtransError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("invalid character '{char}' at position {position}")]
    InvalidCharacter { char: char, position: usize },

    #[error("unknown transform: {name}")]
    UnknownTransform { name: String },

    #[error("transform '{name}' cannot decode")]
    DecodeUnsupported { name: String },

    #[error("transform '{transform}' has no setting '{setting}'")]
    UnknownSetting { transform: String, setting: String },

    #[error("invalid value for {transform}.{setting}: {message}")]
    InvalidSetting {
        transform: String,
        setting: String,
        message: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MtransError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MtransError::InvalidInput { .. } | MtransError::InvalidCharacter { .. } => ExitCode::InvalidInput,
            MtransError::UnknownTransform { .. } => ExitCode::UnknownTransform,
            MtransError::DecodeUnsupported { .. } => ExitCode::GeneralError,
            MtransError::UnknownSetting { .. }
            | MtransError::InvalidSetting { .. }
            | MtransError::Config { .. } => ExitCode::ConfigError,
            MtransError::Io(_) => ExitCode::IoError,
        }
    }

    // Helper constructors for common error patterns
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_char(ch: char, pos: usize) -> Self {
        Self::InvalidCharacter {
            char: ch,
            position: pos,
        }
    }

    pub fn unknown_transform(name: impl Into<String>) -> Self {
        Self::UnknownTransform { name: name.into() }
    }

    pub fn decode_unsupported(name: impl Into<String>) -> Self {
        Self::DecodeUnsupported { name: name.into() }
    }

    pub fn unknown_setting(transform: impl Into<String>, setting: impl Into<String>) -> Self {
        Self::UnknownSetting {
            transform: transform.into(),
            setting: setting.into(),
        }
    }

    pub fn invalid_setting(transform: impl Into<String>, setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            transform: transform.into(),
            setting: setting.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for MtransError {
    fn from(e: toml::de::Error) -> Self {
        Self::config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MtransError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(MtransError::invalid_input("x").exit_code(), ExitCode::InvalidInput);
        assert_eq!(MtransError::unknown_transform("nope").exit_code(), ExitCode::UnknownTransform);
        assert_eq!(MtransError::unknown_setting("caesar", "key").exit_code(), ExitCode::ConfigError);
        assert_eq!(MtransError::config("bad").exit_code(), ExitCode::ConfigError);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            MtransError::invalid_setting("caesar", "shift", "expected a number").to_string(),
            "invalid value for caesar.shift: expected a number"
        );
        assert_eq!(MtransError::invalid_char('!', 3).to_string(), "invalid character '!' at position 3");
    }
}

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::settings::Settings;
use crate::transform::Registry;

pub struct Context {
    pub registry: &'static Registry,
    pub settings: Settings,
}

impl Context {
    pub fn new(registry: &'static Registry, settings: Settings) -> Self {
        Self { registry, settings }
    }
}

impl Default for Context {
    fn default() -> Self {
        let registry = Registry::global();
        Self {
            registry,
            settings: Settings::defaults(registry),
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Literal(Vec<u8>),
}

impl InputSource {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => InputSource::Stdin,
            s if s.starts_with('@') => InputSource::File(PathBuf::from(&s[1..])),
            s => InputSource::Literal(s.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum OutputDest {
    Stdout,
    File(PathBuf),
}

impl OutputDest {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => OutputDest::Stdout,
            s if s.starts_with('@') => OutputDest::File(PathBuf::from(&s[1..])),
            s => OutputDest::File(PathBuf::from(s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Encoding,
    Cipher,
    Spelling,
    Steganography,
    UnicodeStyle,
    Format,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Encoding,
        Category::Cipher,
        Category::Spelling,
        Category::Steganography,
        Category::UnicodeStyle,
        Category::Format,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Encoding => "encoding",
            Category::Cipher => "cipher",
            Category::Spelling => "spelling",
            Category::Steganography => "steganography",
            Category::UnicodeStyle => "unicode_style",
            Category::Format => "format",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s.to_ascii_lowercase())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transform can do, fixed when the registry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    EncodeOnly,
    EncodeDecode,
    EncodeDecodeDetect,
}

impl CapabilityKind {
    pub fn can_decode(&self) -> bool {
        !matches!(self, CapabilityKind::EncodeOnly)
    }

    pub fn can_detect(&self) -> bool {
        matches!(self, CapabilityKind::EncodeDecodeDetect)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformMeta {
    pub key: &'static str,
    pub name: &'static str,
    pub category: Category,
    /// Confidence weight when this transform's detector fires. `None` means
    /// the transform never chose one.
    pub priority: Option<u32>,
    pub description: &'static str,
}

/// Caller hint naming the transform the user is currently working with.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    pub active_transform_mode: bool,
    pub active_transform: Option<String>,
    /// Label used for the boosted candidate. Falls back to the registry name.
    pub active_transform_name: Option<String>,
}

impl DecodeContext {
    pub fn active(key: impl Into<String>) -> Self {
        Self {
            active_transform_mode: true,
            active_transform: Some(key.into()),
            active_transform_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternative {
    pub text: String,
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    pub text: String,
    pub method: String,
    pub alternatives: Vec<Alternative>,
}

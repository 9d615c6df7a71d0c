use std::fs::File;
use std::io::{self, Read};

use crate::error::{MtransError, Result};
use crate::types::InputSource;

fn read_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::File(path) => {
            let mut file = File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::Literal(data) => Ok(data.clone()),
    }
}

/// Reads the source as UTF-8, dropping one trailing line ending.
pub fn read_text(source: &InputSource) -> Result<String> {
    let data = read_input(source)?;
    let mut text = String::from_utf8(data).map_err(|e| {
        MtransError::invalid_input(format!("input is not UTF-8 (byte {})", e.utf8_error().valid_up_to()))
    })?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_literal_strips_one_newline() {
        let source = InputSource::Literal(b"hello\r\n".to_vec());
        assert_eq!(read_text(&source).unwrap(), "hello");
        let source = InputSource::Literal(b"two\n\n".to_vec());
        assert_eq!(read_text(&source).unwrap(), "two\n");
    }

    #[test]
    fn test_read_rejects_binary() {
        let source = InputSource::Literal(vec![b'a', 0xff]);
        assert!(matches!(read_text(&source), Err(MtransError::InvalidInput { .. })));
    }
}

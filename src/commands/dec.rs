use serde::Serialize;

use crate::io::read_text;
use mtrans::error::{MtransError, Result};
use mtrans::types::{Context, InputSource};

use super::options_for;

#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub transform: &'static str,
    pub output: String,
}

pub fn run_decode(ctx: &Context, transform: &str, overrides: &[String], input: &InputSource) -> Result<DecodeOutput> {
    let (entry, opts) = options_for(ctx, transform, overrides)?;
    let decoder = entry
        .capability()
        .decoder()
        .ok_or_else(|| MtransError::decode_unsupported(entry.key()))?;
    let text = read_text(input)?;
    Ok(DecodeOutput {
        transform: entry.key(),
        output: decoder.decode(&text, &opts)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> InputSource {
        InputSource::Literal(s.as_bytes().to_vec())
    }

    #[test]
    fn test_decode() {
        let ctx = Context::default();
        let result = run_decode(&ctx, "base64", &[], &literal("aGVsbG8=\n")).unwrap();
        assert_eq!(result.output, "hello");
    }

    #[test]
    fn test_decode_encode_only_transform() {
        let ctx = Context::default();
        let err = run_decode(&ctx, "uppercase", &[], &literal("HI")).unwrap_err();
        assert!(matches!(err, MtransError::DecodeUnsupported { .. }));
    }

    #[test]
    fn test_decode_invalid_input() {
        let ctx = Context::default();
        let err = run_decode(&ctx, "hex", &[], &literal("zz")).unwrap_err();
        assert_eq!(err.exit_code(), mtrans::error::ExitCode::InvalidInput);
    }
}

use serde::Serialize;

use crate::io::read_text;
use mtrans::error::Result;
use mtrans::pipeline::Pipeline;
use mtrans::types::{Alternative, Context, DecodeContext, InputSource};

#[derive(Debug, Serialize)]
pub struct DetectReport {
    pub schema_version: u32,
    pub input_preview: String,
    pub found: bool,
    pub text: Option<String>,
    pub method: Option<String>,
    pub alternatives: Vec<Alternative>,
}

pub fn run_detect(ctx: &Context, input: &InputSource, active: Option<&str>, top_n: usize) -> Result<DetectReport> {
    let text = read_text(input)?;
    let decode_ctx = match active {
        Some(key) => {
            let entry = ctx.registry.entry(key)?;
            Some(DecodeContext {
                active_transform_mode: true,
                active_transform: Some(entry.key().to_string()),
                active_transform_name: Some(entry.meta().name.to_string()),
            })
        }
        None => None,
    };

    let result = Pipeline::new(ctx.registry, &ctx.settings).decode(&text, decode_ctx.as_ref());
    let input_preview = super::truncate_display(&text, 60);

    Ok(match result {
        Some(mut result) => {
            result.alternatives.truncate(top_n);
            DetectReport {
                schema_version: 1,
                input_preview,
                found: true,
                text: Some(result.text),
                method: Some(result.method),
                alternatives: result.alternatives,
            }
        }
        None => DetectReport {
            schema_version: 1,
            input_preview,
            found: false,
            text: None,
            method: None,
            alternatives: Vec::new(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> InputSource {
        InputSource::Literal(s.as_bytes().to_vec())
    }

    #[test]
    fn test_detect_hex() {
        let ctx = Context::default();
        let report = run_detect(&ctx, &literal("68656c6c6f\n"), None, 5).unwrap();
        assert!(report.found);
        assert_eq!(report.text.as_deref(), Some("hello"));
        assert_eq!(report.method.as_deref(), Some("Hexadecimal"));
        assert!(report.alternatives.len() <= 5);
    }

    #[test]
    fn test_detect_active_transform() {
        let ctx = Context::default();
        let report = run_detect(&ctx, &literal("Khoor"), Some("caesar"), 0).unwrap();
        assert_eq!(report.text.as_deref(), Some("Hello"));
        assert_eq!(report.method.as_deref(), Some("Caesar Cipher"));
        assert!(report.alternatives.is_empty());
    }

    #[test]
    fn test_detect_nothing() {
        let ctx = Context::default();
        let report = run_detect(&ctx, &literal("   "), None, 5).unwrap();
        assert!(!report.found);
    }

    #[test]
    fn test_detect_unknown_active() {
        let ctx = Context::default();
        assert!(run_detect(&ctx, &literal("abc"), Some("nope"), 5).is_err());
    }
}

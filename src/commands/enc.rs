use serde::Serialize;

use crate::io::read_text;
use mtrans::error::Result;
use mtrans::types::{Context, InputSource};

use super::{options_for, truncate_display};

#[derive(Debug, Serialize)]
pub struct EncodeResult {
    pub transform: &'static str,
    pub output: String,
}

pub fn run_encode(ctx: &Context, transform: &str, overrides: &[String], input: &InputSource) -> Result<EncodeResult> {
    let (entry, opts) = options_for(ctx, transform, overrides)?;
    let text = read_text(input)?;
    Ok(EncodeResult {
        transform: entry.key(),
        output: entry.transform().encode(&text, &opts),
    })
}

/// Every registered transform, each with its configured settings.
pub fn run_encode_all(ctx: &Context, input: &InputSource) -> Result<Vec<EncodeResult>> {
    let text = read_text(input)?;
    Ok(ctx
        .registry
        .entries()
        .map(|entry| EncodeResult {
            transform: entry.key(),
            output: entry.transform().encode(&text, ctx.settings.options(entry.key())),
        })
        .collect())
}

pub fn format_encode_all(results: &[EncodeResult]) -> String {
    let mut out = format!("{:<18} ENCODED\n{}\n", "TRANSFORM", "-".repeat(70));
    for r in results {
        let display = if r.output.is_empty() {
            "(empty)".to_string()
        } else {
            truncate_display(&r.output, 50)
        };
        out.push_str(&format!("{:<18} {}\n", r.transform, display));
    }
    out.pop();
    out
}

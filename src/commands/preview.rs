use mtrans::error::Result;
use mtrans::types::Context;

/// Renders `sample` with the transform's declared defaults, ignoring any
/// configured overrides.
pub fn run_preview(ctx: &Context, transform: &str, sample: &str) -> Result<String> {
    Ok(ctx.registry.get(transform)?.preview(sample))
}

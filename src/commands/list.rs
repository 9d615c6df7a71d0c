use mtrans::error::{MtransError, Result};
use mtrans::types::{Category, Context, TransformMeta};

pub fn run_list(ctx: &Context, category: Option<&str>) -> Result<Vec<TransformMeta>> {
    let filter = category
        .map(|c| Category::parse(c).ok_or_else(|| MtransError::invalid_input(format!("unknown category: {}", c))))
        .transpose()?;
    Ok(ctx
        .registry
        .list()
        .into_iter()
        .filter(|m| filter.map_or(true, |c| m.category == c))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_by_category() {
        let ctx = Context::default();
        let ciphers = run_list(&ctx, Some("cipher")).unwrap();
        assert!(ciphers.iter().all(|m| m.category == Category::Cipher));
        assert!(ciphers.iter().any(|m| m.key == "caesar"));
        assert_eq!(run_list(&ctx, None).unwrap().len(), ctx.registry.len());
        assert!(run_list(&ctx, Some("nonsense")).is_err());
    }
}

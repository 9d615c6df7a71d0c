use serde::Serialize;

use mtrans::error::Result;
use mtrans::settings::SettingSpec;
use mtrans::types::{CapabilityKind, Context, TransformMeta};

#[derive(Debug, Serialize)]
pub struct TransformInfo {
    #[serde(flatten)]
    pub meta: TransformMeta,
    pub capability: CapabilityKind,
    pub settings: Vec<SettingSpec>,
}

pub fn run_info(ctx: &Context, transform: &str) -> Result<TransformInfo> {
    let entry = ctx.registry.entry(transform)?;
    Ok(TransformInfo {
        meta: entry.meta().clone(),
        capability: entry.kind(),
        settings: entry.settings().to_vec(),
    })
}

pub mod config;
pub mod error;
pub mod pipeline;
pub mod settings;
pub mod stego;
pub mod transform;
pub mod types;

pub use config::AppConfig;
pub use error::{MtransError, Result};
pub use pipeline::{auto_decode, Pipeline};
pub use settings::{Options, SettingSpec, SettingValue, Settings};
pub use transform::{Capability, Decode, Detect, Registry, Transform};
pub use types::{
    Alternative, CapabilityKind, Category, Context, DecodeContext, DecodeResult, InputSource, OutputDest,
    TransformMeta,
};

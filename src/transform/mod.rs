mod base;
mod cipher;
mod marks;
mod numeric;
pub mod registry;
mod spelling;
mod stego;
mod styles;
mod text;
pub mod util;
mod web;

pub use registry::{Entry, Registry};

use crate::error::Result;
use crate::settings::{Options, SettingSpec};
use crate::types::{CapabilityKind, TransformMeta};

/// Priority a transform reports when it has no stronger claim.
pub const ORDINARY_PRIORITY: u32 = 20;

pub trait Transform: Send + Sync {
    fn meta(&self) -> TransformMeta;

    /// Must never fail, including on empty input.
    fn encode(&self, input: &str, opts: &Options) -> String;

    fn settings(&self) -> Vec<SettingSpec> {
        Vec::new()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeOnly
    }

    fn preview(&self, sample: &str) -> String {
        self.encode(sample, &Options::from_specs(&self.settings()))
    }

    fn key(&self) -> &'static str {
        self.meta().key
    }
}

pub trait Decode: Send + Sync {
    fn decode(&self, input: &str, opts: &Options) -> Result<String>;
}

/// Cheap heuristic: does `input` plausibly come out of this transform's encoder?
pub trait Detect: Send + Sync {
    fn detect(&self, input: &str, opts: &Options) -> bool;
}

#[derive(Clone, Copy)]
pub enum Capability<'a> {
    EncodeOnly,
    EncodeDecode(&'a dyn Decode),
    EncodeDecodeDetect(&'a dyn Decode, &'a dyn Detect),
}

impl<'a> Capability<'a> {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::EncodeOnly => CapabilityKind::EncodeOnly,
            Capability::EncodeDecode(_) => CapabilityKind::EncodeDecode,
            Capability::EncodeDecodeDetect(..) => CapabilityKind::EncodeDecodeDetect,
        }
    }

    pub fn decoder(&self) -> Option<&'a dyn Decode> {
        match *self {
            Capability::EncodeOnly => None,
            Capability::EncodeDecode(d) | Capability::EncodeDecodeDetect(d, _) => Some(d),
        }
    }
}

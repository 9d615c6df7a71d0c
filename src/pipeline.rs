//! Universal auto-detection: runs every applicable decoder over an input and
//! ranks the readable results.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace};

use crate::settings::Settings;
use crate::stego::{EmojiSteganography, StegoDecoder};
use crate::transform::util::{has_visible, looks_readable};
use crate::transform::{Capability, Entry, Registry};
use crate::types::{Alternative, DecodeContext, DecodeResult};

/// Decode-only transforms whose output merely looks like text.
pub const FALLBACK_PRIORITY: u32 = 10;
pub const STEGO_PRIORITY: u32 = 100;
/// Decoding with the transform the caller says is active.
pub const ACTIVE_PRIORITY: u32 = 150;
/// Detector hits at or above this are unambiguous and suppress everything else.
pub const EXCLUSIVE_THRESHOLD: u32 = 280;
/// Used for a firing detector whose transform declares no priority.
pub const DETECTOR_DEFAULT_PRIORITY: u32 = 285;

static EMOJI_STEGO: EmojiSteganography = EmojiSteganography;

#[derive(Debug)]
struct Candidate {
    text: String,
    method: String,
    priority: u32,
}

/// Candidates in discovery order, unique by text.
#[derive(Default)]
struct Candidates {
    list: Vec<Candidate>,
}

impl Candidates {
    fn push(&mut self, text: String, method: &str, priority: u32) -> bool {
        if self.list.iter().any(|c| c.text == text) {
            trace!(method, "duplicate decoding dropped");
            return false;
        }
        trace!(method, priority, "candidate");
        self.list.push(Candidate {
            text,
            method: method.to_string(),
            priority,
        });
        true
    }

    fn into_result(mut self) -> Option<DecodeResult> {
        // Stable: equal priorities keep discovery order.
        self.list.sort_by(|a, b| b.priority.cmp(&a.priority));
        let mut ranked = self.list.into_iter();
        let primary = ranked.next()?;
        Some(DecodeResult {
            text: primary.text,
            method: primary.method,
            alternatives: ranked
                .map(|c| Alternative {
                    text: c.text,
                    method: c.method,
                })
                .collect(),
        })
    }
}

thread_local! {
    static GUARD_DEPTH: Cell<u32> = Cell::new(0);
}

/// True while the current thread is inside a transform call whose panics
/// the pipeline catches. A panic hook can use this to stay quiet about them.
pub fn in_guarded_call() -> bool {
    GUARD_DEPTH.with(|depth| depth.get() > 0)
}

/// Runs `f`, treating a panic like a failed attempt.
fn guarded<T>(key: &str, f: impl FnOnce() -> Option<T>) -> Option<T> {
    GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));
    match outcome {
        Ok(value) => value,
        Err(_) => {
            debug!(transform = key, "transform panicked, skipping");
            None
        }
    }
}

pub struct Pipeline<'a> {
    registry: &'a Registry,
    settings: &'a Settings,
    stego: &'a dyn StegoDecoder,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a Registry, settings: &'a Settings) -> Self {
        Self {
            registry,
            settings,
            stego: &EMOJI_STEGO,
        }
    }

    /// Swaps the hidden-payload extractor used for pictographic input.
    pub fn with_stego(mut self, stego: &'a dyn StegoDecoder) -> Self {
        self.stego = stego;
        self
    }

    /// Best decoding of `input` plus ranked alternatives, or `None` when
    /// nothing produced a usable result.
    pub fn decode(&self, input: &str, ctx: Option<&DecodeContext>) -> Option<DecodeResult> {
        if input.trim().is_empty() {
            return None;
        }

        let mut candidates = Candidates::default();

        if self.sweep_detectors(input, &mut candidates) {
            debug!("exclusive detector match");
            candidates.list.retain(|c| c.priority >= EXCLUSIVE_THRESHOLD);
            return candidates.into_result();
        }

        self.try_stego(input, &mut candidates);
        if let Some(ctx) = ctx {
            self.try_active(input, ctx, &mut candidates);
        }
        self.try_fallbacks(input, &mut candidates);

        let result = candidates.into_result();
        if result.is_none() {
            debug!("no decoding found");
        }
        result
    }

    fn decode_with(&self, entry: &Entry, input: &str) -> Option<String> {
        let opts = self.settings.options(entry.key());
        let decoder = entry.capability().decoder()?;
        guarded(entry.key(), || match decoder.decode(input, opts) {
            Ok(text) => Some(text),
            Err(e) => {
                trace!(transform = entry.key(), error = %e, "decode failed");
                None
            }
        })
    }

    /// Returns true when an accepted candidate landed in the exclusive band.
    fn sweep_detectors(&self, input: &str, candidates: &mut Candidates) -> bool {
        let mut exclusive = false;
        for entry in self.registry.entries().filter(|e| e.kind().can_detect()) {
            let Capability::EncodeDecodeDetect(decoder, detector) = entry.capability() else {
                continue;
            };
            let opts = self.settings.options(entry.key());

            let decoded = guarded(entry.key(), || {
                if !detector.detect(input, opts) {
                    return None;
                }
                decoder.decode(input, opts).ok()
            });
            let Some(text) = decoded else { continue };
            if text == input || text.is_empty() || !has_visible(&text) {
                continue;
            }

            let priority = entry.meta().priority.unwrap_or(DETECTOR_DEFAULT_PRIORITY);
            if candidates.push(text, entry.meta().name, priority) && priority >= EXCLUSIVE_THRESHOLD {
                exclusive = true;
            }
        }
        exclusive
    }

    fn try_stego(&self, input: &str, candidates: &mut Candidates) {
        let stego = self.stego;
        if !stego.applies(input) {
            return;
        }
        let Some(bytes) = guarded(stego.label(), || stego.extract(input)) else {
            return;
        };
        match String::from_utf8(bytes) {
            Ok(text) if text != input && has_visible(&text) => {
                candidates.push(text, stego.label(), STEGO_PRIORITY);
            }
            Ok(_) => {}
            Err(_) => trace!("hidden payload is not UTF-8"),
        }
    }

    fn try_active(&self, input: &str, ctx: &DecodeContext, candidates: &mut Candidates) {
        if !ctx.active_transform_mode {
            return;
        }
        let Some(key) = ctx.active_transform.as_deref() else {
            return;
        };
        let entry = match self.registry.entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "active transform not registered");
                return;
            }
        };
        if let Some(text) = self.decode_with(entry, input) {
            if text != input && !text.is_empty() {
                let label = ctx.active_transform_name.as_deref().unwrap_or(entry.meta().name);
                candidates.push(text, label, ACTIVE_PRIORITY);
            }
        }
    }

    fn try_fallbacks(&self, input: &str, candidates: &mut Candidates) {
        for entry in self
            .registry
            .entries()
            .filter(|e| e.kind().can_decode() && !e.kind().can_detect())
        {
            if let Some(text) = self.decode_with(entry, input) {
                if text != input && looks_readable(&text) {
                    candidates.push(text, entry.meta().name, FALLBACK_PRIORITY);
                }
            }
        }
    }
}

/// Runs the pipeline with the built-in transforms and their default settings.
pub fn auto_decode(input: &str) -> Option<DecodeResult> {
    let registry = Registry::global();
    let settings = Settings::defaults(registry);
    Pipeline::new(registry, &settings).decode(input, None)
}

use std::collections::HashSet;

use super::{Capability, Decode, Detect, Transform};
use crate::error::Result;
use crate::settings::{Options, SettingSpec};
use crate::types::{Category, TransformMeta};

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F)
}

/// One combining mark after every visible character.
pub struct Overlay {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    mark: char,
}

impl Overlay {
    pub fn strikethrough() -> Self {
        Self {
            key: "strikethrough",
            name: "Strikethrough",
            description: "Combining long stroke overlay (U+0336) after each character",
            mark: '\u{0336}',
        }
    }

    pub fn underline() -> Self {
        Self {
            key: "underline",
            name: "Underline",
            description: "Combining low line (U+0332) after each character",
            mark: '\u{0332}',
        }
    }
}

impl Transform for Overlay {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: self.key,
            name: self.name,
            category: Category::UnicodeStyle,
            priority: Some(230),
            description: self.description,
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        let mut out = String::with_capacity(input.len() * 3);
        for c in input.chars() {
            out.push(c);
            if !c.is_whitespace() {
                out.push(self.mark);
            }
        }
        out
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Overlay {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(input.chars().filter(|&c| c != self.mark).collect())
    }
}

impl Detect for Overlay {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut bases = 0;
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            if c.is_whitespace() || c == self.mark {
                continue;
            }
            if chars.peek() != Some(&self.mark) {
                return false;
            }
            bases += 1;
        }
        bases > 0
    }
}

const MAX_INTENSITY: i64 = 16;
const MARK_COUNT: u32 = 0x70;

/// Stacks combining marks on every visible character. Mark choice is
/// deterministic so the same input always renders the same way.
pub struct Zalgo;

impl Transform for Zalgo {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "zalgo",
            name: "Zalgo",
            category: Category::UnicodeStyle,
            priority: Some(200),
            description: "Characters buried under stacked combining diacritics",
        }
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::number("intensity", "Combining marks added per character", 3)]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        let intensity = opts.number("intensity").unwrap_or(3).clamp(0, MAX_INTENSITY) as u32;
        let mut out = String::with_capacity(input.len() * (1 + intensity as usize * 2));
        for (i, c) in input.chars().enumerate() {
            out.push(c);
            if c.is_whitespace() {
                continue;
            }
            for j in 0..intensity {
                let offset = (i as u32 * 7 + j * 13 + c as u32) % MARK_COUNT;
                if let Some(mark) = char::from_u32(0x0300 + offset) {
                    out.push(mark);
                }
            }
        }
        out
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Zalgo {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(input.chars().filter(|&c| !is_combining_mark(c)).collect())
    }
}

impl Detect for Zalgo {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut distinct = HashSet::new();
        let mut marks = 0;
        let mut bases = 0;
        for c in input.chars() {
            if is_combining_mark(c) {
                distinct.insert(c);
                marks += 1;
            } else if !c.is_whitespace() {
                bases += 1;
            }
        }
        bases > 0 && distinct.len() >= 2 && marks >= bases
    }
}

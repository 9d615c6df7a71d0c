use super::{util, Capability, Decode, Detect, Transform};
use crate::error::{MtransError, Result};
use crate::settings::{Options, SettingSpec};
use crate::stego;
use crate::types::{Category, TransformMeta};

const TAG_BASE: u32 = 0xE0000;

fn tag_to_ascii(c: char) -> Option<char> {
    match c as u32 {
        cp @ 0xE0020..=0xE007E => char::from_u32(cp - TAG_BASE),
        _ => None,
    }
}

/// Printable ASCII shifted into the invisible Unicode tag block.
pub struct InvisibleInk;

impl Transform for InvisibleInk {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "invisible",
            name: "Invisible Text",
            category: Category::Steganography,
            priority: Some(290),
            description: "Printable ASCII as invisible Unicode tag characters",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .chars()
            .filter(|c| matches!(c, ' '..='~'))
            .filter_map(|c| char::from_u32(TAG_BASE + c as u32))
            .collect()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for InvisibleInk {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let hidden: String = input.chars().filter_map(tag_to_ascii).collect();
        if hidden.is_empty() {
            return Err(MtransError::invalid_input("no tag characters found"));
        }
        Ok(hidden)
    }
}

impl Detect for InvisibleInk {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        input.chars().any(|c| tag_to_ascii(c).is_some())
    }
}

const ZERO: char = '\u{200B}';
const ONE: char = '\u{200C}';
const BYTE_SEPARATOR: char = '\u{200D}';

/// Bits of the UTF-8 bytes as zero-width space / non-joiner.
pub struct ZeroWidth;

impl Transform for ZeroWidth {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "zerowidth",
            name: "Zero-Width Binary",
            category: Category::Steganography,
            priority: Some(290),
            description: "UTF-8 bits as zero-width space (0) and zero-width non-joiner (1)",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        let mut out = String::new();
        for (i, &byte) in input.as_bytes().iter().enumerate() {
            if i > 0 {
                out.push(BYTE_SEPARATOR);
            }
            for bit in (0..8).rev() {
                out.push(if (byte >> bit) & 1 == 1 { ONE } else { ZERO });
            }
        }
        out
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for ZeroWidth {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let bits: Vec<bool> = input
            .chars()
            .filter_map(|c| match c {
                ZERO => Some(false),
                ONE => Some(true),
                _ => None,
            })
            .collect();
        if bits.is_empty() || bits.len() % 8 != 0 {
            return Err(MtransError::invalid_input(format!(
                "{} hidden bits is not a whole number of bytes",
                bits.len()
            )));
        }
        let bytes = bits
            .chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
            .collect();
        util::bytes_to_text(bytes)
    }
}

impl Detect for ZeroWidth {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        input.chars().filter(|&c| c == ZERO || c == ONE).count() >= 8
    }
}

/// Payload smuggled in variation selectors after a carrier emoji.
///
/// No detector of its own: the pipeline runs the emoji sub-decoder for any
/// input containing pictographs.
pub struct EmojiSmuggle;

impl Transform for EmojiSmuggle {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "emoji",
            name: "Emoji Smuggling",
            category: Category::Steganography,
            priority: None,
            description: "Text hidden in variation selectors after a carrier emoji",
        }
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::text("carrier", "Visible emoji that carries the payload", "😀")]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        let carrier = opts.text("carrier").filter(|c| !c.is_empty()).unwrap_or("😀");
        stego::hide(carrier, input.as_bytes())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for EmojiSmuggle {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let bytes = stego::reveal(input).ok_or_else(|| MtransError::invalid_input("no hidden payload"))?;
        util::bytes_to_text(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn opts() -> &'static Options {
        Options::empty()
    }

    #[test]
    fn test_invisible_roundtrip() {
        let encoded = InvisibleInk.encode("Hi there!", opts());
        assert_eq!(encoded.chars().count(), 9);
        assert!(!util::has_visible(&encoded));
        assert_eq!(InvisibleInk.decode(&encoded, opts()).unwrap(), "Hi there!");
    }

    #[test]
    fn test_invisible_inside_cover_text() {
        let cover = format!("nothing here{}", InvisibleInk.encode("pssst", opts()));
        assert!(InvisibleInk.detect(&cover, opts()));
        assert_eq!(InvisibleInk.decode(&cover, opts()).unwrap(), "pssst");
        assert!(!InvisibleInk.detect("nothing here", opts()));
        assert!(InvisibleInk.decode("nothing here", opts()).is_err());
    }

    #[test]
    fn test_zero_width_roundtrip() {
        let encoded = ZeroWidth.encode("ok", opts());
        assert_eq!(encoded.chars().count(), 17);
        assert!(ZeroWidth.detect(&encoded, opts()));
        assert_eq!(ZeroWidth.decode(&encoded, opts()).unwrap(), "ok");
        assert_eq!(ZeroWidth.decode(&format!("cover{}text", encoded), opts()).unwrap(), "ok");
    }

    #[test]
    fn test_zero_width_partial_byte() {
        assert!(ZeroWidth.decode("\u{200B}\u{200C}", opts()).is_err());
        assert!(!ZeroWidth.detect("\u{200B}\u{200C}", opts()));
    }

    #[test]
    fn test_emoji_smuggle() {
        let encoded = EmojiSmuggle.encode("hello", opts());
        assert!(encoded.starts_with('😀'));
        assert_eq!(EmojiSmuggle.decode(&encoded, opts()).unwrap(), "hello");
        assert!(EmojiSmuggle.decode("😀", opts()).is_err());
    }

    #[test]
    fn test_emoji_custom_carrier() {
        let custom = Options::empty().clone().with("carrier", SettingValue::Text("🐍".into()));
        let encoded = EmojiSmuggle.encode("hi", &custom);
        assert!(encoded.starts_with('🐍'));
        assert_eq!(EmojiSmuggle.decode(&encoded, &custom).unwrap(), "hi");
    }
}

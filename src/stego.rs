//! Hidden-payload extraction used by the detection pipeline.
//!
//! The emoji scheme hides one byte per Unicode variation selector, appended
//! after a visible carrier emoji: bytes 0-15 map to U+FE00..U+FE0F and bytes
//! 16-255 map to U+E0100..U+E01EF. Renderers swallow the selectors, so the
//! text shows only the carrier.

const VS_BASE: u32 = 0xFE00;
const VS_SUPPLEMENT_BASE: u32 = 0xE0100;

/// Symbolic and pictographic blocks that mark input as emoji-bearing.
const PICTOGRAPHIC_RANGES: &[(u32, u32)] = &[
    (0x2300, 0x23FF),
    (0x2600, 0x27BF),
    (0x2B00, 0x2BFF),
    (0x1F000, 0x1F2FF),
    (0x1F300, 0x1F5FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6FF),
    (0x1F900, 0x1F9FF),
    (0x1FA70, 0x1FAFF),
];

/// A pluggable hidden-payload extractor.
pub trait StegoDecoder: Send + Sync {
    /// Method label reported for candidates it produces.
    fn label(&self) -> &'static str;

    /// Cheap gate checked before [`StegoDecoder::extract`].
    fn applies(&self, input: &str) -> bool;

    fn extract(&self, input: &str) -> Option<Vec<u8>>;
}

pub fn is_pictographic(c: char) -> bool {
    let cp = c as u32;
    PICTOGRAPHIC_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

pub fn contains_pictographic(input: &str) -> bool {
    input.chars().any(is_pictographic)
}

fn selector_for(byte: u8) -> char {
    let cp = if byte < 16 {
        VS_BASE + byte as u32
    } else {
        VS_SUPPLEMENT_BASE + (byte as u32 - 16)
    };
    // Both ranges are assigned scalar values.
    char::from_u32(cp).unwrap_or('\u{FE00}')
}

fn byte_for(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0xFE00..=0xFE0F => Some((cp - VS_BASE) as u8),
        0xE0100..=0xE01EF => Some((cp - VS_SUPPLEMENT_BASE + 16) as u8),
        _ => None,
    }
}

/// Appends `payload` to `carrier` as variation selectors.
pub fn hide(carrier: &str, payload: &[u8]) -> String {
    let mut out = String::from(carrier);
    out.extend(payload.iter().map(|&b| selector_for(b)));
    out
}

/// Collects every variation selector in `input`, in order.
pub fn reveal(input: &str) -> Option<Vec<u8>> {
    let bytes: Vec<u8> = input.chars().filter_map(byte_for).collect();
    if bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}

pub struct EmojiSteganography;

impl StegoDecoder for EmojiSteganography {
    fn label(&self) -> &'static str {
        "Emoji Steganography"
    }

    fn applies(&self, input: &str) -> bool {
        contains_pictographic(input)
    }

    fn extract(&self, input: &str) -> Option<Vec<u8>> {
        reveal(input)
    }
}

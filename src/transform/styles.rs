//! Unicode look-alike alphabets.
//!
//! Each style is a fixed character substitution built once into a
//! [`CharMap`]; characters without a styled form pass through unchanged.

use super::util::CharMap;
use super::{Capability, Decode, Detect, Transform};
use crate::error::Result;
use crate::settings::Options;
use crate::types::{Category, TransformMeta};

const STYLE_PRIORITY: u32 = 240;

fn offset_char(base: u32, offset: u8) -> char {
    char::from_u32(base + offset as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Pairs for a contiguous Mathematical Alphanumeric block. `holes` lists the
/// letters Unicode encodes elsewhere (Letterlike Symbols).
fn math_pairs(upper: u32, lower: u32, digits: Option<u32>, holes: &[(char, char)]) -> Vec<(char, char)> {
    let mut pairs = Vec::new();
    for i in 0..26u8 {
        pairs.push(((b'A' + i) as char, offset_char(upper, i)));
        pairs.push(((b'a' + i) as char, offset_char(lower, i)));
    }
    if let Some(base) = digits {
        for i in 0..10u8 {
            pairs.push(((b'0' + i) as char, offset_char(base, i)));
        }
    }
    for pair in pairs.iter_mut() {
        if let Some(&(_, styled)) = holes.iter().find(|(plain, _)| *plain == pair.0) {
            pair.1 = styled;
        }
    }
    pairs
}

pub struct Style {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    priority: u32,
    lowercase_input: bool,
    map: CharMap,
}

impl Style {
    fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        pairs: impl IntoIterator<Item = (char, char)>,
    ) -> Self {
        Self {
            key,
            name,
            description,
            priority: STYLE_PRIORITY,
            lowercase_input: false,
            map: CharMap::new(pairs),
        }
    }

    pub fn bold() -> Self {
        Self::new(
            "bold",
            "Bold",
            "Mathematical bold letters and digits",
            math_pairs(0x1D400, 0x1D41A, Some(0x1D7CE), &[]),
        )
    }

    pub fn italic() -> Self {
        Self::new(
            "italic",
            "Italic",
            "Mathematical italic letters",
            math_pairs(0x1D434, 0x1D44E, None, &[('h', '\u{210E}')]),
        )
    }

    pub fn bold_italic() -> Self {
        Self::new(
            "bold_italic",
            "Bold Italic",
            "Mathematical bold italic letters",
            math_pairs(0x1D468, 0x1D482, None, &[]),
        )
    }

    pub fn sans_bold() -> Self {
        Self::new(
            "sans_bold",
            "Sans-Serif Bold",
            "Mathematical sans-serif bold letters and digits",
            math_pairs(0x1D5D4, 0x1D5EE, Some(0x1D7EC), &[]),
        )
    }

    pub fn monospace() -> Self {
        Self::new(
            "monospace",
            "Monospace",
            "Mathematical monospace letters and digits",
            math_pairs(0x1D670, 0x1D68A, Some(0x1D7F6), &[]),
        )
    }

    pub fn double_struck() -> Self {
        Self::new(
            "double_struck",
            "Double-Struck",
            "Blackboard bold letters and digits",
            math_pairs(
                0x1D538,
                0x1D552,
                Some(0x1D7D8),
                &[
                    ('C', '\u{2102}'),
                    ('H', '\u{210D}'),
                    ('N', '\u{2115}'),
                    ('P', '\u{2119}'),
                    ('Q', '\u{211A}'),
                    ('R', '\u{211D}'),
                    ('Z', '\u{2124}'),
                ],
            ),
        )
    }

    pub fn fullwidth() -> Self {
        let pairs = ('!'..='~')
            .map(|c| (c, char::from_u32(c as u32 - 0x21 + 0xFF01).unwrap_or(c)))
            .chain(std::iter::once((' ', '\u{3000}')));
        Self::new("fullwidth", "Fullwidth", "East Asian fullwidth forms of printable ASCII", pairs)
    }

    pub fn circled() -> Self {
        let mut pairs = Vec::new();
        for i in 0..26u8 {
            pairs.push(((b'A' + i) as char, offset_char(0x24B6, i)));
            pairs.push(((b'a' + i) as char, offset_char(0x24D0, i)));
        }
        for i in 1..10u8 {
            pairs.push(((b'0' + i) as char, offset_char(0x2460, i - 1)));
        }
        pairs.push(('0', '\u{24EA}'));
        Self::new("circled", "Circled", "Enclosed alphanumerics", pairs)
    }

    /// Lossy on case: both cases map to the same small capital. `x` has no
    /// small capital form and passes through.
    pub fn small_caps() -> Self {
        const SMALL: &str = "ᴀʙᴄᴅᴇꜰɢʜɪᴊᴋʟᴍɴᴏᴘǫʀꜱᴛᴜᴠᴡxʏᴢ";
        let lower = ('a'..='z').zip(SMALL.chars());
        let upper = ('A'..='Z').zip(SMALL.chars());
        let pairs = lower.chain(upper).filter(|(_, styled)| !styled.is_ascii());
        Self::new("small_caps", "Small Caps", "Latin letter small capitals", pairs)
    }

    pub fn braille() -> Self {
        let pairs = BRAILLE_MAP
            .iter()
            .map(|&(c, dots)| (c, offset_char(BRAILLE_BASE, dots)));
        let mut style = Self::new("braille", "Braille", "Grade 1 Braille cells (U+2800 block)", pairs);
        style.priority = 290;
        style.lowercase_input = true;
        style
    }
}

impl Transform for Style {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: self.key,
            name: self.name,
            category: Category::UnicodeStyle,
            priority: Some(self.priority),
            description: self.description,
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        if self.lowercase_input {
            return self.map.encode(&input.to_lowercase());
        }
        self.map.encode(input)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Style {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(self.map.decode(input))
    }
}

impl Detect for Style {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        // Styled glyphs must outnumber leftover ASCII alphanumerics.
        let mut styled = 0;
        let mut plain = 0;
        for c in input.chars() {
            match self.map.plain(c) {
                Some(p) if !p.is_whitespace() => styled += 1,
                Some(_) => {}
                None if c.is_ascii_alphanumeric() => plain += 1,
                None => {}
            }
        }
        styled > 0 && styled >= plain
    }
}

const BRAILLE_BASE: u32 = 0x2800;

const BRAILLE_MAP: &[(char, u8)] = &[
    ('a', 0b00000001),
    ('b', 0b00000011),
    ('c', 0b00001001),
    ('d', 0b00011001),
    ('e', 0b00010001),
    ('f', 0b00001011),
    ('g', 0b00011011),
    ('h', 0b00010011),
    ('i', 0b00001010),
    ('j', 0b00011010),
    ('k', 0b00000101),
    ('l', 0b00000111),
    ('m', 0b00001101),
    ('n', 0b00011101),
    ('o', 0b00010101),
    ('p', 0b00001111),
    ('q', 0b00011111),
    ('r', 0b00010111),
    ('s', 0b00001110),
    ('t', 0b00011110),
    ('u', 0b00100101),
    ('v', 0b00100111),
    ('w', 0b00111010),
    ('x', 0b00101101),
    ('y', 0b00111101),
    ('z', 0b00110101),
    (' ', 0b00000000),
    (',', 0b00000010),
    (';', 0b00000110),
    (':', 0b00010010),
    ('.', 0b00101100),
    ('!', 0b00010110),
    ('?', 0b00100110),
    ('\'', 0b00000100),
    ('-', 0b00100100),
];

const FLIP_PAIRS: &[(char, char)] = &[
    ('a', 'ɐ'),
    ('b', 'q'),
    ('c', 'ɔ'),
    ('d', 'p'),
    ('e', 'ǝ'),
    ('f', 'ɟ'),
    ('g', 'ƃ'),
    ('h', 'ɥ'),
    ('i', 'ᴉ'),
    ('j', 'ɾ'),
    ('k', 'ʞ'),
    ('m', 'ɯ'),
    ('n', 'u'),
    ('p', 'd'),
    ('q', 'b'),
    ('r', 'ɹ'),
    ('t', 'ʇ'),
    ('u', 'n'),
    ('v', 'ʌ'),
    ('w', 'ʍ'),
    ('y', 'ʎ'),
    ('.', '˙'),
    (',', '\''),
    ('\'', ','),
    ('?', '¿'),
    ('!', '¡'),
    ('(', ')'),
    (')', '('),
    ('[', ']'),
    (']', '['),
    ('_', '‾'),
];

/// Rotated 180 degrees: flipped glyphs in reverse order. Lowercases input.
pub struct UpsideDown {
    map: CharMap,
}

impl UpsideDown {
    pub fn new() -> Self {
        Self {
            map: CharMap::new(FLIP_PAIRS.iter().copied()),
        }
    }
}

impl Transform for UpsideDown {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "upside_down",
            name: "Upside Down",
            category: Category::UnicodeStyle,
            priority: Some(200),
            description: "Text flipped upside down with rotated look-alike glyphs",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        self.map.encode(&input.to_lowercase()).chars().rev().collect()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for UpsideDown {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let unrotated: String = input.chars().rev().collect();
        Ok(self.map.decode(&unrotated))
    }
}

impl Detect for UpsideDown {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        input.chars().any(|c| !c.is_ascii() && self.map.is_styled(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> &'static Options {
        Options::empty()
    }

    #[test]
    fn test_bold() {
        let bold = Style::bold();
        assert_eq!(bold.encode("Hi 1", opts()), "\u{1D407}\u{1D422} \u{1D7CF}");
        assert_eq!(bold.decode("\u{1D407}\u{1D422} \u{1D7CF}", opts()).unwrap(), "Hi 1");
        assert!(bold.detect("\u{1D407}i", opts()));
        assert!(!bold.detect("Hi", opts()));
        assert!(!bold.detect("hello world \u{1D407}", opts()));
    }

    #[test]
    fn test_italic_hole() {
        let italic = Style::italic();
        assert_eq!(italic.encode("h", opts()), "\u{210E}");
        assert_eq!(italic.decode("\u{210E}", opts()).unwrap(), "h");
        assert_eq!(italic.encode("7", opts()), "7");
    }

    #[test]
    fn test_double_struck_holes() {
        let ds = Style::double_struck();
        assert_eq!(ds.encode("CR", opts()), "\u{2102}\u{211D}");
        let text = "Quick Brown Zebra 2024";
        assert_eq!(ds.decode(&ds.encode(text, opts()), opts()).unwrap(), text);
    }

    #[test]
    fn test_math_styles_roundtrip() {
        let text = "The Quick Brown Fox jumps over 13 lazy dogs!";
        for style in [Style::bold(), Style::italic(), Style::bold_italic(), Style::sans_bold(), Style::monospace()] {
            let encoded = style.encode(text, opts());
            assert_ne!(encoded, text, "{}", style.key);
            assert!(style.detect(&encoded, opts()), "{}", style.key);
            assert_eq!(style.decode(&encoded, opts()).unwrap(), text, "{}", style.key);
        }
    }

    #[test]
    fn test_styles_do_not_claim_each_other() {
        let bold = Style::bold().encode("abc", opts());
        assert!(!Style::monospace().detect(&bold, opts()));
        assert!(!Style::sans_bold().detect(&bold, opts()));
        assert!(!Style::fullwidth().detect(&bold, opts()));
    }

    #[test]
    fn test_fullwidth() {
        let fw = Style::fullwidth();
        assert_eq!(fw.encode("Hi!", opts()), "Ｈｉ！");
        assert_eq!(fw.decode("Ｈｉ！　ok", opts()).unwrap(), "Hi! ok");
    }

    #[test]
    fn test_circled() {
        let circled = Style::circled();
        assert_eq!(circled.encode("Ab10", opts()), "Ⓐⓑ①⓪");
        assert_eq!(circled.decode("Ⓐⓑ①⓪", opts()).unwrap(), "Ab10");
    }

    #[test]
    fn test_small_caps_lossy_case() {
        let sc = Style::small_caps();
        assert_eq!(sc.encode("Hello", opts()), "ʜᴇʟʟᴏ");
        assert_eq!(sc.decode("ʜᴇʟʟᴏ", opts()).unwrap(), "hello");
        assert_eq!(sc.encode("x", opts()), "x");
        assert_eq!(sc.encode("MAX", opts()), "ᴍᴀx");
        assert_eq!(sc.decode("ᴍᴀx", opts()).unwrap(), "max");
    }

    #[test]
    fn test_small_caps_ignores_plain_x() {
        let sc = Style::small_caps();
        assert!(!sc.detect("xx", opts()));
        assert!(!sc.detect("0x", opts()));
        assert!(sc.detect("ᴍᴀx", opts()));
        assert_eq!(sc.decode("xX", opts()).unwrap(), "xX");
    }

    #[test]
    fn test_braille() {
        let braille = Style::braille();
        assert_eq!(braille.encode("Hi", opts()), "⠓⠊");
        assert_eq!(braille.decode("⠓⠊⠀⠽⠕⠥", opts()).unwrap(), "hi you");
        assert!(braille.detect("⠓⠊", opts()));
        assert!(!braille.detect("\u{2800}", opts()));
        assert_eq!(braille.meta().priority, Some(290));
    }

    #[test]
    fn test_upside_down() {
        let flip = UpsideDown::new();
        assert_eq!(flip.encode("hello", opts()), "ollǝɥ");
        assert_eq!(flip.decode("ollǝɥ", opts()).unwrap(), "hello");
        let text = "why not? (maybe)";
        assert_eq!(flip.decode(&flip.encode(text, opts()), opts()).unwrap(), text);
        assert!(flip.detect("ɥǝllo", opts()));
        assert!(!flip.detect("hello", opts()));
    }
}

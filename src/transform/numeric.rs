use super::{Capability, Decode, Detect, Transform};
use crate::error::{MtransError, Result};
use crate::settings::{Options, SettingSpec};
use crate::types::{Category, TransformMeta};

/// Token used between words by the letter-to-symbol ciphers below.
const WORD_BREAK: &str = "/";

pub struct A1Z26;

impl Transform for A1Z26 {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "a1z26",
            name: "A1Z26",
            category: Category::Cipher,
            priority: Some(40),
            description: "Letter positions (A=1 ... Z=26), dash-joined per word",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .map(|c| (c.to_ascii_lowercase() as u8 - b'a' + 1).to_string())
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for A1Z26 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let mut words = Vec::new();
        for word in input.split_whitespace() {
            let mut decoded = String::new();
            for part in word.split('-').filter(|p| !p.is_empty()) {
                let num: u8 = part
                    .parse()
                    .map_err(|_| MtransError::invalid_input(format!("invalid number: {}", part)))?;
                if !(1..=26).contains(&num) {
                    return Err(MtransError::invalid_input(format!("number out of range (1-26): {}", num)));
                }
                decoded.push((b'a' + num - 1) as char);
            }
            words.push(decoded);
        }
        Ok(words.join(" "))
    }
}

impl Detect for A1Z26 {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        if !input.contains('-') {
            return false;
        }
        let parts: Vec<&str> = input
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        parts.len() >= 2
            && parts
                .iter()
                .all(|p| p.len() <= 2 && p.parse::<u8>().map_or(false, |n| (1..=26).contains(&n)))
    }
}

/// Keyed 5x5 Polybius square. I and J share a cell.
pub struct Polybius;

impl Polybius {
    fn square(key: &str) -> Vec<char> {
        let mut grid = Vec::with_capacity(25);
        let letters = key
            .chars()
            .chain('A'..='Z')
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| match c.to_ascii_uppercase() {
                'J' => 'I',
                c => c,
            });
        for c in letters {
            if !grid.contains(&c) {
                grid.push(c);
            }
        }
        grid
    }

    fn tokens(input: &str) -> impl Iterator<Item = &str> {
        input
            .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .filter(|t| !t.is_empty())
    }

    fn is_cell(token: &str) -> bool {
        let b = token.as_bytes();
        b.len() == 2 && (b'1'..=b'5').contains(&b[0]) && (b'1'..=b'5').contains(&b[1])
    }
}

impl Transform for Polybius {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "polybius",
            name: "Polybius Square",
            category: Category::Cipher,
            priority: Some(60),
            description: "Row/column coordinates in a 5x5 letter square",
        }
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::text("key", "Keyword placed at the start of the square", "")]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        let grid = Polybius::square(opts.text("key").unwrap_or(""));
        input
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .filter_map(|c| {
                        let c = match c.to_ascii_uppercase() {
                            'J' => 'I',
                            c => c,
                        };
                        grid.iter().position(|&g| g == c).map(|i| format!("{}{}", i / 5 + 1, i % 5 + 1))
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", WORD_BREAK))
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Polybius {
    fn decode(&self, input: &str, opts: &Options) -> Result<String> {
        let grid = Polybius::square(opts.text("key").unwrap_or(""));
        let mut result = String::new();
        for token in Polybius::tokens(input) {
            if token == WORD_BREAK {
                result.push(' ');
                continue;
            }
            if !Polybius::is_cell(token) {
                return Err(MtransError::invalid_input(format!("not a square coordinate: {}", token)));
            }
            let b = token.as_bytes();
            let idx = (b[0] - b'1') as usize * 5 + (b[1] - b'1') as usize;
            result.push(grid[idx].to_ascii_lowercase());
        }
        Ok(result)
    }
}

impl Detect for Polybius {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut cells = 0;
        for token in Polybius::tokens(input) {
            if token == WORD_BREAK {
                continue;
            }
            if !Polybius::is_cell(token) {
                return false;
            }
            cells += 1;
        }
        cells >= 2
    }
}

/// Bacon's cipher, 26-letter variant.
pub struct Bacon;

impl Bacon {
    fn group(c: char) -> Option<String> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let idx = c.to_ascii_lowercase() as u8 - b'a';
        Some((0..5).rev().map(|bit| if (idx >> bit) & 1 == 1 { 'B' } else { 'A' }).collect())
    }
}

impl Transform for Bacon {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "bacon",
            name: "Bacon Cipher",
            category: Category::Cipher,
            priority: Some(250),
            description: "Each letter as a five-symbol group of A and B",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .split_whitespace()
            .map(|word| word.chars().filter_map(Bacon::group).collect::<Vec<_>>().join(" "))
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", WORD_BREAK))
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Bacon {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let mut result = String::new();
        for token in input.split_whitespace() {
            if token == WORD_BREAK {
                result.push(' ');
                continue;
            }
            let symbols: Vec<char> = token.chars().map(|c| c.to_ascii_uppercase()).collect();
            if symbols.len() % 5 != 0 {
                return Err(MtransError::invalid_input(format!("group length {} is not a multiple of 5", symbols.len())));
            }
            for chunk in symbols.chunks(5) {
                let mut idx = 0u8;
                for (pos, &c) in chunk.iter().enumerate() {
                    idx <<= 1;
                    match c {
                        'A' => {}
                        'B' => idx |= 1,
                        other => return Err(MtransError::invalid_char(other, pos)),
                    }
                }
                if idx >= 26 {
                    return Err(MtransError::invalid_input(format!("group {} is past Z", idx)));
                }
                result.push((b'a' + idx) as char);
            }
        }
        Ok(result)
    }
}

impl Detect for Bacon {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut symbols = 0;
        for c in input.chars() {
            match c {
                'A' | 'B' | 'a' | 'b' => symbols += 1,
                '/' => {}
                c if c.is_whitespace() => {}
                _ => return false,
            }
        }
        symbols >= 5 && symbols % 5 == 0
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
    fn test_a1z26() {
        assert_eq!(A1Z26.encode("Hello World", opts()), "8-5-12-12-15 23-15-18-12-4");
        assert_eq!(A1Z26.decode("8-5-12-12-15 23-15-18-12-4", opts()).unwrap(), "hello world");
        assert!(A1Z26.decode("1-27-3", opts()).is_err());
        assert!(A1Z26.detect("8-5-12-12-15", opts()));
        assert!(!A1Z26.detect("8 5 12", opts()));
        assert!(!A1Z26.detect("8-5-40", opts()));
    }

    #[test]
    fn test_polybius_plain_square() {
        assert_eq!(Polybius.encode("Hello", opts()), "23 15 31 31 34");
        assert_eq!(Polybius.decode("23 15 31 31 34", opts()).unwrap(), "hello");
        assert_eq!(Polybius.decode("23-15-31-31-34", opts()).unwrap(), "hello");
        assert_eq!(Polybius.encode("hi you", opts()), "23 24 / 54 34 45");
        assert_eq!(Polybius.decode("23 24 / 54 34 45", opts()).unwrap(), "hi you");
    }

    #[test]
    fn test_polybius_merges_j() {
        assert_eq!(Polybius.encode("j", opts()), Polybius.encode("i", opts()));
    }

    #[test]
    fn test_polybius_keyed() {
        let keyed = Options::empty().clone().with("key", SettingValue::Text("zebra".into()));
        assert_eq!(Polybius.encode("z", &keyed), "11");
        let text = "attack at dawn";
        assert_eq!(Polybius.decode(&Polybius.encode(text, &keyed), &keyed).unwrap(), text);
    }

    #[test]
    fn test_polybius_detect() {
        assert!(Polybius.detect("23 15 31 31 34", opts()));
        assert!(Polybius.detect("13-11-15", opts()));
        assert!(!Polybius.detect("23 16", opts()));
        assert!(!Polybius.detect("23", opts()));
        assert!(!Polybius.detect("hello", opts()));
    }

    #[test]
    fn test_bacon() {
        assert_eq!(Bacon.encode("ab", opts()), "AAAAA AAAAB");
        assert_eq!(Bacon.encode("z", opts()), "BBAAB");
        let text = "hide the ham";
        assert_eq!(Bacon.decode(&Bacon.encode(text, opts()), opts()).unwrap(), text);
        assert_eq!(Bacon.decode("aaaaaaaaab", opts()).unwrap(), "ab");
        assert!(Bacon.detect("AABBB AABAA", opts()));
        assert!(!Bacon.detect("ABBA", opts()));
        assert!(!Bacon.detect("ABBAC", opts()));
        assert!(Bacon.decode("BBBBB", opts()).is_err());
    }
}

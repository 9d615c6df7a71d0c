use super::util::CharMap;
use super::{Capability, Decode, Transform, ORDINARY_PRIORITY};
use crate::error::Result;
use crate::settings::Options;
use crate::types::{Category, TransformMeta};

fn format_meta(key: &'static str, name: &'static str, description: &'static str) -> TransformMeta {
    TransformMeta {
        key,
        name,
        category: Category::Format,
        priority: Some(ORDINARY_PRIORITY),
        description,
    }
}

pub struct Reverse;

impl Transform for Reverse {
    fn meta(&self) -> TransformMeta {
        format_meta("reverse", "Reverse", "Characters in reverse order")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input.chars().rev().collect()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Reverse {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(input.chars().rev().collect())
    }
}

const LEET_PAIRS: &[(char, char)] = &[
    ('a', '4'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '5'),
    ('t', '7'),
    ('A', '4'),
    ('E', '3'),
    ('I', '1'),
    ('O', '0'),
    ('S', '5'),
    ('T', '7'),
];

/// Digits for look-alike letters. Decoding lowercases substituted letters and
/// also accepts the common `@` and `$` forms.
pub struct Leetspeak {
    map: CharMap,
}

impl Leetspeak {
    pub fn new() -> Self {
        Self {
            map: CharMap::new(LEET_PAIRS.iter().copied()),
        }
    }
}

impl Transform for Leetspeak {
    fn meta(&self) -> TransformMeta {
        format_meta("leetspeak", "Leetspeak", "Letters replaced by look-alike digits")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        self.map.encode(input)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Leetspeak {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(input
            .chars()
            .map(|c| match c {
                '@' => 'a',
                '$' => 's',
                c => self.map.plain(c).unwrap_or(c),
            })
            .collect())
    }
}

pub struct Uppercase;

impl Transform for Uppercase {
    fn meta(&self) -> TransformMeta {
        format_meta("uppercase", "Uppercase", "All letters upper case")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input.to_uppercase()
    }
}

pub struct AlternatingCase;

impl Transform for AlternatingCase {
    fn meta(&self) -> TransformMeta {
        format_meta("alternating_case", "Alternating Case", "lOwEr and UpPeR case letters in turn")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        let mut upper = false;
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            if c.is_alphabetic() {
                if upper {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                upper = !upper;
            } else {
                out.push(c);
            }
        }
        out
    }
}

pub struct RemoveVowels;

impl Transform for RemoveVowels {
    fn meta(&self) -> TransformMeta {
        format_meta("remove_vowels", "Remove Vowels", "Text with the vowels a, e, i, o, u dropped")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input.chars().filter(|c| !"aeiouAEIOU".contains(*c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CapabilityKind;

    fn opts() -> &'static Options {
        Options::empty()
    }

    #[test]
    fn test_reverse() {
        assert_eq!(Reverse.encode("abc 😀", opts()), "😀 cba");
        assert_eq!(Reverse.decode("😀 cba", opts()).unwrap(), "abc 😀");
    }

    #[test]
    fn test_leetspeak() {
        let leet = Leetspeak::new();
        assert_eq!(leet.encode("Leet Speak", opts()), "L337 5p34k");
        assert_eq!(leet.decode("L337 5p34k", opts()).unwrap(), "Leet speak");
        assert_eq!(leet.decode("h@$h", opts()).unwrap(), "hash");
    }

    #[test]
    fn test_encode_only_formats() {
        assert_eq!(Uppercase.encode("straße", opts()), "STRASSE");
        assert_eq!(AlternatingCase.encode("hello world", opts()), "hElLo WoRlD");
        assert_eq!(RemoveVowels.encode("Programming Rust", opts()), "Prgrmmng Rst");
        assert_eq!(RemoveVowels.capability().kind(), CapabilityKind::EncodeOnly);
    }
}

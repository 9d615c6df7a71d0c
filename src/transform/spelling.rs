use std::collections::HashMap;

use super::{Capability, Decode, Detect, Transform};
use crate::error::{MtransError, Result};
use crate::settings::Options;
use crate::types::{Category, TransformMeta};

const NATO_WORDS: &[(char, &str)] = &[
    ('a', "Alfa"),
    ('b', "Bravo"),
    ('c', "Charlie"),
    ('d', "Delta"),
    ('e', "Echo"),
    ('f', "Foxtrot"),
    ('g', "Golf"),
    ('h', "Hotel"),
    ('i', "India"),
    ('j', "Juliett"),
    ('k', "Kilo"),
    ('l', "Lima"),
    ('m', "Mike"),
    ('n', "November"),
    ('o', "Oscar"),
    ('p', "Papa"),
    ('q', "Quebec"),
    ('r', "Romeo"),
    ('s', "Sierra"),
    ('t', "Tango"),
    ('u', "Uniform"),
    ('v', "Victor"),
    ('w', "Whiskey"),
    ('x', "Xray"),
    ('y', "Yankee"),
    ('z', "Zulu"),
    ('0', "Zero"),
    ('1', "One"),
    ('2', "Two"),
    ('3', "Three"),
    ('4', "Four"),
    ('5', "Five"),
    ('6', "Six"),
    ('7', "Seven"),
    ('8', "Eight"),
    ('9', "Nine"),
];

// Spellings seen in the wild besides the ICAO ones above.
const NATO_VARIANTS: &[(char, &str)] = &[('a', "alpha"), ('j', "juliet"), ('x', "x-ray"), ('9', "niner")];

const WORD_BREAK: &str = "/";

/// NATO phonetic alphabet. Its closed vocabulary makes a match near-certain.
pub struct Nato {
    words: HashMap<char, &'static str>,
    letters: HashMap<String, char>,
}

impl Nato {
    pub fn new() -> Self {
        let words = NATO_WORDS.iter().copied().collect();
        let letters = NATO_WORDS
            .iter()
            .chain(NATO_VARIANTS)
            .map(|&(c, w)| (w.to_lowercase(), c))
            .collect();
        Self { words, letters }
    }

    fn lookup(&self, token: &str) -> Option<char> {
        self.letters.get(&token.to_lowercase()).copied()
    }
}

impl Transform for Nato {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "nato",
            name: "NATO Phonetic",
            category: Category::Spelling,
            priority: Some(300),
            description: "Letters and digits spelled with the NATO phonetic alphabet",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter_map(|c| self.words.get(&c.to_ascii_lowercase()).copied())
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

impl Decode for Nato {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        input
            .split_whitespace()
            .map(|token| {
                if token == WORD_BREAK {
                    Ok(' ')
                } else {
                    self.lookup(token)
                        .ok_or_else(|| MtransError::invalid_input(format!("not a phonetic word: {}", token)))
                }
            })
            .collect()
    }
}

impl Detect for Nato {
    /// Digit words alone are ordinary English ("one two three"), so at least
    /// one letter word is required.
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut words = 0;
        let mut letters = 0;
        for token in input.split_whitespace().filter(|t| *t != WORD_BREAK) {
            match self.lookup(token) {
                Some(c) if c.is_ascii_alphabetic() => letters += 1,
                Some(_) => {}
                None => return false,
            }
            words += 1;
        }
        words >= 2 && letters > 0
    }
}

const MORSE_TABLE: &[(char, &str)] = &[
    ('a', ".-"),
    ('b', "-..."),
    ('c', "-.-."),
    ('d', "-.."),
    ('e', "."),
    ('f', "..-."),
    ('g', "--."),
    ('h', "...."),
    ('i', ".."),
    ('j', ".---"),
    ('k', "-.-"),
    ('l', ".-.."),
    ('m', "--"),
    ('n', "-."),
    ('o', "---"),
    ('p', ".--."),
    ('q', "--.-"),
    ('r', ".-."),
    ('s', "..."),
    ('t', "-"),
    ('u', "..-"),
    ('v', "...-"),
    ('w', ".--"),
    ('x', "-..-"),
    ('y', "-.--"),
    ('z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('@', ".--.-."),
    ('=', "-...-"),
];

pub struct Morse {
    codes: HashMap<char, &'static str>,
    chars: HashMap<&'static str, char>,
}

impl Morse {
    pub fn new() -> Self {
        Self {
            codes: MORSE_TABLE.iter().copied().collect(),
            chars: MORSE_TABLE.iter().map(|&(c, code)| (code, c)).collect(),
        }
    }
}

impl Transform for Morse {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "morse",
            name: "Morse Code",
            category: Category::Spelling,
            priority: Some(270),
            description: "International Morse code, letters space-separated, words split by '/'",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter_map(|c| self.codes.get(&c.to_ascii_lowercase()).copied())
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

impl Decode for Morse {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let mut words = Vec::new();
        for word in input.trim().split(WORD_BREAK) {
            let mut decoded = String::new();
            for code in word.split_whitespace() {
                let ch = self
                    .chars
                    .get(code)
                    .ok_or_else(|| MtransError::invalid_input(format!("unknown morse sequence: {}", code)))?;
                decoded.push(*ch);
            }
            words.push(decoded);
        }
        Ok(words.join(" "))
    }
}

impl Detect for Morse {
    /// Needs two or more code groups; a lone "-" or "..." is punctuation.
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        if !input.chars().all(|c| matches!(c, '.' | '-' | '/') || c.is_whitespace()) {
            return false;
        }
        let groups = input
            .split(|c: char| c.is_whitespace() || c == '/')
            .filter(|g| !g.is_empty())
            .count();
        groups >= 2
    }
}

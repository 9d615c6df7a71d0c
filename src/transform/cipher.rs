//! Classical ciphers. None of them leaves a recognizable fingerprint, so they
//! decode but never detect.

use super::util::{caesar, shift_letter};
use super::{Capability, Decode, Transform, ORDINARY_PRIORITY};
use crate::error::Result;
use crate::settings::{Options, SettingSpec};
use crate::types::{Category, TransformMeta};

fn cipher_meta(key: &'static str, name: &'static str, description: &'static str) -> TransformMeta {
    TransformMeta {
        key,
        name,
        category: Category::Cipher,
        priority: Some(ORDINARY_PRIORITY),
        description,
    }
}

pub struct Caesar;

impl Caesar {
    /// Reduced to 0..26 so decoding can negate it without overflow.
    fn shift(opts: &Options) -> i64 {
        opts.number("shift").unwrap_or(3).rem_euclid(26)
    }
}

impl Transform for Caesar {
    fn meta(&self) -> TransformMeta {
        cipher_meta("caesar", "Caesar Cipher", "Letters shifted a fixed distance along the alphabet")
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::number("shift", "Alphabet positions to shift by", 3)]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        caesar(input, Caesar::shift(opts))
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Caesar {
    fn decode(&self, input: &str, opts: &Options) -> Result<String> {
        Ok(caesar(input, -Caesar::shift(opts)))
    }
}

pub struct Rot13;

impl Transform for Rot13 {
    fn meta(&self) -> TransformMeta {
        cipher_meta("rot13", "ROT13", "ROT13 letter substitution (A-Z rotated by 13)")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        caesar(input, 13)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Rot13 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(caesar(input, 13))
    }
}

pub struct Rot47;

impl Rot47 {
    fn rotate(input: &str) -> String {
        input
            .chars()
            .map(|c| match c {
                '!'..='~' => ((c as u8 - b'!' + 47) % 94 + b'!') as char,
                _ => c,
            })
            .collect()
    }
}

impl Transform for Rot47 {
    fn meta(&self) -> TransformMeta {
        cipher_meta("rot47", "ROT47", "ROT47 printable ASCII substitution (!-~ rotated by 47)")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        Rot47::rotate(input)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Rot47 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(Rot47::rotate(input))
    }
}

pub struct Atbash;

impl Atbash {
    fn mirror(input: &str) -> String {
        input
            .chars()
            .map(|c| match c {
                'A'..='Z' => (b'Z' - (c as u8 - b'A')) as char,
                'a'..='z' => (b'z' - (c as u8 - b'a')) as char,
                _ => c,
            })
            .collect()
    }
}

impl Transform for Atbash {
    fn meta(&self) -> TransformMeta {
        cipher_meta("atbash", "Atbash", "Alphabet mirrored, A<->Z, B<->Y")
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        Atbash::mirror(input)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Atbash {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Ok(Atbash::mirror(input))
    }
}

/// Polyalphabetic shift keyed by a word. Only letters consume key positions;
/// a key without letters leaves the text unchanged.
pub struct Vigenere;

impl Vigenere {
    fn apply(input: &str, opts: &Options, direction: i64) -> String {
        let shifts: Vec<i64> = opts
            .text("key")
            .unwrap_or("KEY")
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| (c.to_ascii_lowercase() as u8 - b'a') as i64)
            .collect();
        if shifts.is_empty() {
            return input.to_string();
        }

        let mut pos = 0;
        input
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() {
                    let shifted = shift_letter(c, direction * shifts[pos % shifts.len()]);
                    pos += 1;
                    shifted
                } else {
                    c
                }
            })
            .collect()
    }
}

impl Transform for Vigenere {
    fn meta(&self) -> TransformMeta {
        cipher_meta("vigenere", "Vigenere Cipher", "Letters shifted by a repeating keyword")
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::text("key", "Keyword; non-letters are ignored", "KEY")]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        Vigenere::apply(input, opts, 1)
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Vigenere {
    fn decode(&self, input: &str, opts: &Options) -> Result<String> {
        Ok(Vigenere::apply(input, opts, -1))
    }
}

/// `E(x) = (a*x + b) mod 26`. A multiplier sharing a factor with 26 has no
/// inverse; such keys leave the text unchanged.
pub struct Affine;

impl Affine {
    fn keys(opts: &Options) -> Option<(i64, i64, i64)> {
        let a = opts.number("a").unwrap_or(5).rem_euclid(26);
        let b = opts.number("b").unwrap_or(8).rem_euclid(26);
        let inverse = (1..26).find(|x| (a * x) % 26 == 1)?;
        Some((a, b, inverse))
    }

    fn map_letters(input: &str, f: impl Fn(i64) -> i64) -> String {
        input
            .chars()
            .map(|c| {
                let base = match c {
                    'A'..='Z' => b'A',
                    'a'..='z' => b'a',
                    _ => return c,
                };
                let x = (c as u8 - base) as i64;
                (base + f(x).rem_euclid(26) as u8) as char
            })
            .collect()
    }
}

impl Transform for Affine {
    fn meta(&self) -> TransformMeta {
        cipher_meta("affine", "Affine Cipher", "Letters mapped through (a*x + b) mod 26")
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![
            SettingSpec::number("a", "Multiplier, must be coprime with 26", 5),
            SettingSpec::number("b", "Offset", 8),
        ]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        match Affine::keys(opts) {
            Some((a, b, _)) => Affine::map_letters(input, |x| a * x + b),
            None => input.to_string(),
        }
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for Affine {
    fn decode(&self, input: &str, opts: &Options) -> Result<String> {
        Ok(match Affine::keys(opts) {
            Some((_, b, inverse)) => Affine::map_letters(input, |y| inverse * (y - b)),
            None => input.to_string(),
        })
    }
}

/// Zig-zag transposition across `rails` rows.
pub struct RailFence;

impl RailFence {
    fn rails(opts: &Options, len: usize) -> Option<usize> {
        let rails = opts.number("rails").unwrap_or(3);
        if rails < 2 || rails as usize >= len {
            return None;
        }
        Some(rails as usize)
    }

    /// Rail index of every position in the zig-zag.
    fn pattern(len: usize, rails: usize) -> Vec<usize> {
        let cycle = 2 * (rails - 1);
        (0..len)
            .map(|i| {
                let step = i % cycle;
                if step < rails {
                    step
                } else {
                    cycle - step
                }
            })
            .collect()
    }
}

impl Transform for RailFence {
    fn meta(&self) -> TransformMeta {
        cipher_meta("rail_fence", "Rail Fence", "Characters written in a zig-zag and read off row by row")
    }

    fn settings(&self) -> Vec<SettingSpec> {
        vec![SettingSpec::number("rails", "Number of rows, at least 2", 3)]
    }

    fn encode(&self, input: &str, opts: &Options) -> String {
        let chars: Vec<char> = input.chars().collect();
        let Some(rails) = RailFence::rails(opts, chars.len()) else {
            return input.to_string();
        };
        let pattern = RailFence::pattern(chars.len(), rails);
        (0..rails)
            .flat_map(|rail| {
                chars
                    .iter()
                    .zip(&pattern)
                    .filter(move |(_, &r)| r == rail)
                    .map(|(&c, _)| c)
            })
            .collect()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecode(self)
    }
}

impl Decode for RailFence {
    fn decode(&self, input: &str, opts: &Options) -> Result<String> {
        let chars: Vec<char> = input.chars().collect();
        let Some(rails) = RailFence::rails(opts, chars.len()) else {
            return Ok(input.to_string());
        };
        let pattern = RailFence::pattern(chars.len(), rails);

        // Positions sorted by rail give the order the ciphertext was read off.
        let mut order: Vec<usize> = (0..chars.len()).collect();
        order.sort_by_key(|&i| pattern[i]);

        let mut plain = vec!['\0'; chars.len()];
        for (&pos, &c) in order.iter().zip(&chars) {
            plain[pos] = c;
        }
        Ok(plain.into_iter().collect())
    }
}

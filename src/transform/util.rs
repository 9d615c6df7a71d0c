use std::collections::HashMap;

use crate::error::{MtransError, Result};

/// Zero-width and other format characters that render as nothing.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c as u32,
        0x200B..=0x200F | 0x2060..=0x2064 | 0xFEFF | 0xFE00..=0xFE0F | 0xE0000..=0xE007F | 0xE0100..=0xE01EF
    )
}

/// True if something is left after dropping control, whitespace and invisible
/// characters.
pub fn has_visible(s: &str) -> bool {
    s.chars().any(|c| !(c.is_control() || c.is_whitespace() || is_invisible(c)))
}

/// A run of at least three ASCII alphanumerics or whitespace.
pub fn looks_readable(s: &str) -> bool {
    let mut run = 0;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Decoded bytes must be UTF-8 text without stray control characters.
pub fn bytes_to_text(bytes: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| MtransError::invalid_input("decoded bytes are not UTF-8"))?;
    if let Some((pos, c)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return Err(MtransError::invalid_char(c, pos));
    }
    Ok(text)
}

/// Any `shift` is accepted; it is reduced mod 26 before use.
pub fn shift_letter(c: char, shift: i64) -> char {
    let base = match c {
        'A'..='Z' => b'A',
        'a'..='z' => b'a',
        _ => return c,
    };
    let offset = c as u8 - base;
    (base + (offset + shift.rem_euclid(26) as u8) % 26) as char
}

pub fn caesar(input: &str, shift: i64) -> String {
    input.chars().map(|c| shift_letter(c, shift)).collect()
}

/// Bidirectional character substitution table, built once.
#[derive(Debug, Clone, Default)]
pub struct CharMap {
    forward: HashMap<char, char>,
    reverse: HashMap<char, char>,
}

impl CharMap {
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();
        for (plain, styled) in pairs {
            if plain == styled {
                continue;
            }
            forward.insert(plain, styled);
            reverse.entry(styled).or_insert(plain);
        }
        Self { forward, reverse }
    }

    pub fn encode(&self, input: &str) -> String {
        input.chars().map(|c| *self.forward.get(&c).unwrap_or(&c)).collect()
    }

    pub fn decode(&self, input: &str) -> String {
        input.chars().map(|c| *self.reverse.get(&c).unwrap_or(&c)).collect()
    }

    /// The plain character a styled one stands for.
    pub fn plain(&self, c: char) -> Option<char> {
        self.reverse.get(&c).copied()
    }

    pub fn is_styled(&self, c: char) -> bool {
        self.reverse.contains_key(&c)
    }
}

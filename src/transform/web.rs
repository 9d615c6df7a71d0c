use super::{util, Capability, Decode, Detect, Transform};
use crate::error::{MtransError, Result};
use crate::settings::Options;
use crate::types::{Category, TransformMeta};

pub struct UrlEncoding;

impl Transform for UrlEncoding {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "url",
            name: "URL Encoding",
            category: Category::Encoding,
            priority: Some(50),
            description: "Percent-encoding of everything outside the RFC 3986 unreserved set",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        let mut result = String::new();
        for &byte in input.as_bytes() {
            let c = byte as char;
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') {
                result.push(c);
            } else {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
        result
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for UrlEncoding {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let bytes = input.as_bytes();
        let mut result = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'%' => {
                    let hex = bytes
                        .get(i + 1..i + 3)
                        .ok_or_else(|| MtransError::invalid_input("incomplete percent sequence"))?;
                    let hex_str = std::str::from_utf8(hex).map_err(|_| MtransError::invalid_input("invalid percent sequence"))?;
                    let byte = u8::from_str_radix(hex_str, 16)
                        .map_err(|_| MtransError::invalid_input(format!("invalid hex in percent sequence: {}", hex_str)))?;
                    result.push(byte);
                    i += 3;
                }
                b'+' => {
                    result.push(b' ');
                    i += 1;
                }
                b => {
                    result.push(b);
                    i += 1;
                }
            }
        }

        util::bytes_to_text(result)
    }
}

impl Detect for UrlEncoding {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let bytes = input.as_bytes();
        bytes
            .windows(3)
            .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
    }
}

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{A0}'),
    ("copy", '©'),
    ("reg", '®'),
    ("hellip", '…'),
    ("mdash", '—'),
];

/// Parses the entity body between '&' and ';'.
fn parse_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    NAMED_ENTITIES.iter().find(|(name, _)| *name == body).map(|&(_, c)| c)
}

pub struct HtmlEntities;

impl Transform for HtmlEntities {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "html",
            name: "HTML Entities",
            category: Category::Encoding,
            priority: Some(55),
            description: "Markup characters and non-ASCII as HTML character references",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        let mut result = String::new();
        for c in input.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&#39;"),
                c if !c.is_ascii() => result.push_str(&format!("&#{};", c as u32)),
                c => result.push(c),
            }
        }
        result
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for HtmlEntities {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let mut result = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(amp) = rest.find('&') {
            result.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            match after.find(';').filter(|&end| end <= 10) {
                Some(end) => match parse_entity(&after[..end]) {
                    Some(c) => {
                        result.push(c);
                        rest = &after[end + 1..];
                    }
                    None => {
                        result.push('&');
                        rest = after;
                    }
                },
                None => {
                    result.push('&');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        Ok(result)
    }
}

impl Detect for HtmlEntities {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        input.match_indices('&').any(|(i, _)| {
            let after = &input[i + 1..];
            after
                .find(';')
                .filter(|&end| end <= 10)
                .and_then(|end| parse_entity(&after[..end]))
                .is_some()
        })
    }
}

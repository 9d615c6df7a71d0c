use base64::prelude::*;
use data_encoding::{BASE32, BASE32_NOPAD, HEXLOWER, HEXLOWER_PERMISSIVE};

use super::{util, Capability, Decode, Detect, Transform};
use crate::error::{MtransError, Result};
use crate::settings::Options;
use crate::types::{Category, TransformMeta};

const BASE64_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64URL_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const BASE32_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Alphabet check with up to `max_pad` trailing '=' characters.
fn in_padded_alphabet(input: &str, alphabet: &str, max_pad: usize) -> bool {
    let body = input.trim_end_matches('=');
    input.len() - body.len() <= max_pad && !body.is_empty() && body.chars().all(|c| alphabet.contains(c))
}

pub struct Hex;

impl Transform for Hex {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "hex",
            name: "Hexadecimal",
            category: Category::Encoding,
            priority: Some(45),
            description: "UTF-8 bytes as lowercase base16",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        HEXLOWER.encode(input.as_bytes())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Hex {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let cleaned = strip_whitespace(input);
        let digits = cleaned
            .strip_prefix("0x")
            .or_else(|| cleaned.strip_prefix("0X"))
            .unwrap_or(&cleaned);
        let bytes = HEXLOWER_PERMISSIVE
            .decode(digits.as_bytes())
            .map_err(|e| MtransError::invalid_input(e.to_string()))?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Hex {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let cleaned = strip_whitespace(input);
        cleaned.len() >= 2 && cleaned.len() % 2 == 0 && cleaned.chars().all(|c| c.is_ascii_hexdigit())
    }
}

pub struct Binary;

impl Transform for Binary {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "binary",
            name: "Binary",
            category: Category::Encoding,
            priority: Some(260),
            description: "UTF-8 bytes as space-separated 8-bit groups",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .as_bytes()
            .iter()
            .map(|b| format!("{:08b}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Binary {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let bits = strip_whitespace(input);
        if bits.len() % 8 != 0 {
            return Err(MtransError::invalid_input(format!(
                "bit count {} is not a multiple of 8",
                bits.len()
            )));
        }
        let bytes = bits
            .as_bytes()
            .chunks(8)
            .map(|chunk| {
                let s = std::str::from_utf8(chunk).map_err(|_| MtransError::invalid_input("invalid UTF-8"))?;
                u8::from_str_radix(s, 2).map_err(|e| MtransError::invalid_input(format!("invalid binary digit: {}", e)))
            })
            .collect::<Result<Vec<u8>>>()?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Binary {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let bits = strip_whitespace(input);
        bits.len() >= 8 && bits.len() % 8 == 0 && bits.chars().all(|c| c == '0' || c == '1')
    }
}

pub struct Decimal;

impl Decimal {
    fn tokens(input: &str) -> impl Iterator<Item = &str> {
        input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
    }

    fn parse_token(token: &str) -> Option<char> {
        if token.len() > 7 || (token.len() > 1 && token.starts_with('0')) {
            return None;
        }
        if !token.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        token.parse::<u32>().ok().and_then(char::from_u32)
    }
}

impl Transform for Decimal {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "decimal",
            name: "Decimal Code Points",
            category: Category::Encoding,
            priority: Some(45),
            description: "Each character as its decimal code point",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        input
            .chars()
            .map(|c| (c as u32).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Decimal {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        Decimal::tokens(input)
            .map(|t| Decimal::parse_token(t).ok_or_else(|| MtransError::invalid_input(format!("invalid code point: {}", t))))
            .collect()
    }
}

impl Detect for Decimal {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let mut count = 0;
        for token in Decimal::tokens(input) {
            match Decimal::parse_token(token) {
                Some(c) if c as u32 >= 32 => count += 1,
                _ => return false,
            }
        }
        count >= 2
    }
}

fn detect_base64(input: &str, alphabet: &str) -> bool {
    let cleaned = strip_whitespace(input);
    if cleaned.len() < 4 || !in_padded_alphabet(&cleaned, alphabet, 2) {
        return false;
    }
    if cleaned.ends_with('=') {
        cleaned.len() % 4 == 0
    } else {
        cleaned.len() % 4 != 1
    }
}

pub struct Base64;

impl Transform for Base64 {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "base64",
            name: "Base64",
            category: Category::Encoding,
            priority: Some(30),
            description: "RFC4648 Base64 with padding",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        BASE64_STANDARD.encode(input.as_bytes())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Base64 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let cleaned = strip_whitespace(input);
        let bytes = BASE64_STANDARD_NO_PAD
            .decode(cleaned.trim_end_matches('='))
            .map_err(|e| MtransError::invalid_input(e.to_string()))?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Base64 {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        detect_base64(input, BASE64_ALPHABET)
    }
}

pub struct Base64Url;

impl Transform for Base64Url {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "base64url",
            name: "Base64 URL",
            category: Category::Encoding,
            priority: Some(32),
            description: "RFC4648 Base64url without padding",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(input.as_bytes())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Base64Url {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let cleaned = strip_whitespace(input);
        let bytes = BASE64_URL_SAFE_NO_PAD
            .decode(cleaned.trim_end_matches('='))
            .map_err(|e| MtransError::invalid_input(e.to_string()))?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Base64Url {
    // Only claims input the standard alphabet could not have produced.
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        (input.contains('-') || input.contains('_')) && detect_base64(input, BASE64URL_ALPHABET)
    }
}

pub struct Base32;

impl Transform for Base32 {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "base32",
            name: "Base32",
            category: Category::Encoding,
            priority: Some(35),
            description: "RFC4648 Base32 with padding",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        BASE32.encode(input.as_bytes())
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Base32 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let cleaned = strip_whitespace(input).to_ascii_uppercase();
        let bytes = BASE32_NOPAD
            .decode(cleaned.trim_end_matches('=').as_bytes())
            .map_err(|e| MtransError::invalid_input(e.to_string()))?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Base32 {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let cleaned = strip_whitespace(input);
        if cleaned.len() < 8 || !in_padded_alphabet(&cleaned, BASE32_ALPHABET, 6) {
            return false;
        }
        if cleaned.ends_with('=') {
            cleaned.len() % 8 == 0
        } else {
            matches!(cleaned.len() % 8, 0 | 2 | 4 | 5 | 7)
        }
    }
}

pub struct Base58;

impl Transform for Base58 {
    fn meta(&self) -> TransformMeta {
        TransformMeta {
            key: "base58",
            name: "Base58",
            category: Category::Encoding,
            priority: Some(25),
            description: "Bitcoin alphabet Base58",
        }
    }

    fn encode(&self, input: &str, _opts: &Options) -> String {
        bs58::encode(input.as_bytes())
            .with_alphabet(bs58::Alphabet::BITCOIN)
            .into_string()
    }

    fn capability(&self) -> Capability<'_> {
        Capability::EncodeDecodeDetect(self, self)
    }
}

impl Decode for Base58 {
    fn decode(&self, input: &str, _opts: &Options) -> Result<String> {
        let bytes = bs58::decode(input.trim())
            .with_alphabet(bs58::Alphabet::BITCOIN)
            .into_vec()
            .map_err(|e| match e {
                bs58::decode::Error::InvalidCharacter { character, index } => MtransError::invalid_char(character, index),
                other => MtransError::invalid_input(other.to_string()),
            })?;
        util::bytes_to_text(bytes)
    }
}

impl Detect for Base58 {
    fn detect(&self, input: &str, _opts: &Options) -> bool {
        let trimmed = input.trim();
        trimmed.len() >= 6
            && trimmed.chars().all(|c| BASE58_ALPHABET.contains(c))
            && trimmed.chars().any(|c| c.is_ascii_digit())
            && trimmed.chars().any(|c| c.is_ascii_alphabetic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> &'static Options {
        Options::empty()
    }

    #[test]
    fn test_hex() {
        assert_eq!(Hex.encode("hello", opts()), "68656c6c6f");
        assert_eq!(Hex.decode("68656c6c6f", opts()).unwrap(), "hello");
        assert_eq!(Hex.decode("0x68 65 6C 6C 6F", opts()).unwrap(), "hello");
        assert!(Hex.detect("68656c6c6f", opts()));
        assert!(!Hex.detect("68656c6c6", opts()));
        assert!(!Hex.detect("hello", opts()));
        assert!(Hex.decode("fffe", opts()).is_err());
    }

    #[test]
    fn test_hex_rejects_control_bytes() {
        assert!(Hex.decode("1234", opts()).is_err());
    }

    #[test]
    fn test_binary() {
        assert_eq!(Binary.encode("Hi", opts()), "01001000 01101001");
        assert_eq!(Binary.decode("01001000 01101001", opts()).unwrap(), "Hi");
        assert_eq!(Binary.decode("0100100001101001", opts()).unwrap(), "Hi");
        assert!(Binary.detect("01001000 01101001", opts()));
        assert!(!Binary.detect("0100100", opts()));
        assert!(Binary.decode("0100100", opts()).is_err());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(Decimal.encode("Hi!", opts()), "72 105 33");
        assert_eq!(Decimal.decode("72 105 33", opts()).unwrap(), "Hi!");
        assert_eq!(Decimal.decode("72,105,33", opts()).unwrap(), "Hi!");
        assert!(Decimal.detect("72 105 33", opts()));
        assert!(!Decimal.detect("72", opts()));
        assert!(!Decimal.detect("23 15 31", opts()));
        assert!(!Decimal.detect("01001000 01101001", opts()));
    }

    #[test]
    fn test_base64() {
        assert_eq!(Base64.encode("Hello World", opts()), "SGVsbG8gV29ybGQ=");
        assert_eq!(Base64.decode("SGVsbG8gV29ybGQ=", opts()).unwrap(), "Hello World");
        assert_eq!(Base64.decode("SGVsbG8gV29ybGQ", opts()).unwrap(), "Hello World");
        assert!(Base64.detect("SGVsbG8gV29ybGQ=", opts()));
        assert!(!Base64.detect("Hello", opts()));
        assert!(!Base64.detect("SGVsbG8=gV29", opts()));
    }

    #[test]
    fn test_base64url() {
        assert_eq!(Base64.encode("<<???>>", opts()), "PDw/Pz8+Pg==");
        assert_eq!(Base64Url.encode("<<???>>", opts()), "PDw_Pz8-Pg");
        assert_eq!(Base64Url.decode("PDw_Pz8-Pg", opts()).unwrap(), "<<???>>");
        assert!(Base64Url.detect("PDw_Pz8-Pg", opts()));
        assert!(!Base64Url.detect("SGVsbG8gV29ybGQ", opts()));
    }

    #[test]
    fn test_base32() {
        assert_eq!(Base32.encode("Hello", opts()), "JBSWY3DP");
        assert_eq!(Base32.decode("JBSWY3DP", opts()).unwrap(), "Hello");
        assert_eq!(Base32.encode("Hello World", opts()), "JBSWY3DPEBLW64TMMQ======");
        assert_eq!(Base32.decode("JBSWY3DPEBLW64TMMQ======", opts()).unwrap(), "Hello World");
        assert!(Base32.detect("JBSWY3DPEBLW64TMMQ======", opts()));
        assert!(!Base32.detect("jbswy3dp", opts()));
    }

    #[test]
    fn test_base58() {
        assert_eq!(Base58.encode("Hello World", opts()), "JxF12TrwUP45BMd");
        assert_eq!(Base58.decode("JxF12TrwUP45BMd", opts()).unwrap(), "Hello World");
        assert!(Base58.detect("JxF12TrwUP45BMd", opts()));
        assert!(!Base58.detect("Hello0", opts()));
        assert!(matches!(
            Base58.decode("Jx0", opts()),
            Err(MtransError::InvalidCharacter { char: '0', .. })
        ));
    }

    #[test]
    fn test_empty_encodes() {
        assert_eq!(Hex.encode("", opts()), "");
        assert_eq!(Binary.encode("", opts()), "");
        assert_eq!(Base64.encode("", opts()), "");
        assert_eq!(Base58.encode("", opts()), "");
    }
}

//! Hexadecimal String Tokens
//!
//! A hex string `<48656C6C6F>` is a run of hex digit pairs, each pair one
//! byte. The decoded bytes are kept verbatim and a best-effort text is derived
//! from them once, at construction:
//!
//! - bytes starting with `FE FF` are UTF-16BE text (the marker is dropped)
//! - anything else maps one byte to one character, skipping `0x00`
//!
//! Equality and hashing use the text only. Two tokens whose bytes differ but
//! decode to the same text are the same string to every consumer.

use super::encoding::{decode_utf16_be, UTF16_BE_BOM};
use crate::error::{TokenError, TokenResult};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, trace};

lazy_static::lazy_static! {
    static ref HEX_MAP: HashMap<char, u8> = {
        let mut map = HashMap::with_capacity(22);
        for (value, digit) in ('0'..='9').enumerate() {
            map.insert(digit, value as u8);
        }
        for (offset, (upper, lower)) in ('A'..='F').zip('a'..='f').enumerate() {
            map.insert(upper, 0x0A + offset as u8);
            map.insert(lower, 0x0A + offset as u8);
        }
        map
    };
}

/// Value of a single hex digit, or `None` outside `0-9A-Fa-f`
pub fn hex_digit_value(character: char) -> Option<u8> {
    HEX_MAP.get(&character).copied()
}

fn nibble_at(character: char, index: usize) -> TokenResult<u8> {
    hex_digit_value(character).ok_or(TokenError::InvalidDigit { character, index })
}

/// Combine a high and a low hex digit into one byte
pub fn convert(high: char, low: char) -> TokenResult<u8> {
    Ok(nibble_at(high, 0)? << 4 | nibble_at(low, 1)?)
}

/// A string token written in hexadecimal form
#[derive(Debug, Clone)]
pub struct HexToken {
    text: String,
    bytes: Vec<u8>,
}

impl HexToken {
    /// Decode a run of hex digits (delimiters already stripped).
    ///
    /// An odd trailing digit is treated as if followed by `0`. Any character
    /// outside the hex alphabet fails the whole decode.
    pub fn decode(digits: &str) -> TokenResult<Self> {
        let chars: Vec<char> = digits.chars().collect();
        let mut bytes = Vec::with_capacity(chars.len().div_ceil(2));

        for (pair_index, pair) in chars.chunks(2).enumerate() {
            let index = pair_index * 2;
            let high = nibble_at(pair[0], index)?;
            let low = match pair.get(1) {
                Some(&low) => nibble_at(low, index + 1)?,
                None => {
                    trace!("Odd hex digit count {}, padding last nibble", chars.len());
                    0
                }
            };
            bytes.push(high << 4 | low);
        }

        Ok(Self::from_decoded(bytes))
    }

    /// Build a token from already known bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_decoded(data.to_vec())
    }

    fn from_decoded(bytes: Vec<u8>) -> Self {
        let text = decode_text(&bytes);
        Self { text, bytes }
    }

    /// Best-effort text interpretation of the bytes
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw decoded bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the bytes carry the UTF-16BE byte order mark
    pub fn is_utf16(&self) -> bool {
        self.bytes.starts_with(&UTF16_BE_BOM)
    }

    /// Interpret the bytes as a one- or two-byte big-endian unsigned integer.
    ///
    /// Exactly two bytes combine as `(b0 << 8) + b1`. Any other non-empty
    /// length yields the first byte alone. An empty token is an error.
    pub fn to_integer(&self) -> TokenResult<u16> {
        match self.bytes.as_slice() {
            [] => Err(TokenError::InvalidArgument(
                "hex token has no bytes to interpret as an integer".to_string(),
            )),
            [high, low] => Ok(u16::from(*high) << 8 | u16::from(*low)),
            [first, rest @ ..] => {
                if !rest.is_empty() {
                    debug!(
                        "Ignoring {} trailing bytes of hex token <{}> in integer conversion",
                        rest.len(),
                        self.to_hex_string()
                    );
                }
                Ok(u16::from(*first))
            }
        }
    }

    /// Uppercase hex digits, two per byte, no separators
    pub fn to_hex_string(&self) -> String {
        ::hex::encode_upper(&self.bytes)
    }
}

/// Integer value of an optional hex token.
///
/// Dictionary lookups hand back `Option<&HexToken>`; a missing token is an
/// `InvalidArgument` error rather than a panic.
pub fn convert_hex_bytes_to_int(token: Option<&HexToken>) -> TokenResult<u16> {
    token
        .ok_or_else(|| TokenError::InvalidArgument("hex token is missing".to_string()))?
        .to_integer()
}

fn decode_text(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&UTF16_BE_BOM) {
        Some(rest) => decode_utf16_be(rest),
        None => bytes
            .iter()
            .filter(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect(),
    }
}

impl PartialEq for HexToken {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.text == other.text
    }
}

impl Eq for HexToken {}

impl Hash for HexToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl FromStr for HexToken {
    type Err = TokenError;

    fn from_str(s: &str) -> TokenResult<Self> {
        Self::decode(s)
    }
}

impl From<&[u8]> for HexToken {
    fn from(data: &[u8]) -> Self {
        Self::from_bytes(data)
    }
}

impl From<Vec<u8>> for HexToken {
    fn from(data: Vec<u8>) -> Self {
        Self::from_decoded(data)
    }
}

impl fmt::Display for HexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(token: &HexToken) -> u64 {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_hex_digit_value_full_alphabet() {
        for (i, c) in "0123456789".chars().enumerate() {
            assert_eq!(hex_digit_value(c), Some(i as u8));
        }
        for (i, c) in "ABCDEF".chars().enumerate() {
            assert_eq!(hex_digit_value(c), Some(10 + i as u8));
        }
        for (i, c) in "abcdef".chars().enumerate() {
            assert_eq!(hex_digit_value(c), Some(10 + i as u8));
        }
    }

    #[test]
    fn test_hex_digit_value_rejects_others() {
        for c in ['g', 'G', 'z', ' ', '<', '>', '-', 'é', '\0'] {
            assert_eq!(hex_digit_value(c), None, "{c:?} should not be a digit");
        }
    }

    #[test]
    fn test_convert_pair() {
        assert_eq!(convert('4', '1').unwrap(), 0x41);
        assert_eq!(convert('f', 'F').unwrap(), 0xFF);
        assert!(matches!(
            convert('4', 'x'),
            Err(TokenError::InvalidDigit {
                character: 'x',
                index: 1
            })
        ));
    }

    #[test]
    fn test_decode_hello() {
        let token = HexToken::decode("48656C6C6F").unwrap();
        assert_eq!(token.bytes(), &[0x48, 0x65, 0x6C, 0x6C, 0x6F]);
        assert_eq!(token.text(), "Hello");
    }

    #[test]
    fn test_decode_lowercase_digits() {
        let token = HexToken::decode("48656c6c6f").unwrap();
        assert_eq!(token.text(), "Hello");
    }

    #[test]
    fn test_decode_empty() {
        let token = HexToken::decode("").unwrap();
        assert!(token.is_empty());
        assert_eq!(token.text(), "");
        assert_eq!(token.to_hex_string(), "");
    }

    #[test]
    fn test_decode_odd_length_pads_low_nibble() {
        let token = HexToken::decode("ABC").unwrap();
        assert_eq!(token.bytes(), &[0xAB, 0xC0]);

        let token = HexToken::decode("1").unwrap();
        assert_eq!(token.bytes(), &[0x10]);

        let token = HexToken::decode("48656C6C6F2").unwrap();
        assert_eq!(token.len(), 6);
        assert_eq!(token.text(), "Hello ");
    }

    #[test]
    fn test_decode_invalid_digit() {
        match HexToken::decode("4Z") {
            Err(TokenError::InvalidDigit { character, index }) => {
                assert_eq!(character, 'Z');
                assert_eq!(index, 1);
            }
            other => panic!("Expected InvalidDigit, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_invalid_digit_in_odd_tail() {
        assert!(matches!(
            HexToken::decode("41G"),
            Err(TokenError::InvalidDigit {
                character: 'G',
                index: 2
            })
        ));
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let token = HexToken::decode("FEFF0041").unwrap();
        assert_eq!(token.bytes(), &[0xFE, 0xFF, 0x00, 0x41]);
        assert_eq!(token.text(), "A");
        assert!(token.is_utf16());
    }

    #[test]
    fn test_decode_bom_only() {
        let token = HexToken::decode("FEFF").unwrap();
        assert_eq!(token.text(), "");
        assert_eq!(token.len(), 2);
    }

    #[test]
    fn test_decode_bom_with_odd_remainder() {
        let token = HexToken::decode("FEFF00").unwrap();
        assert_eq!(token.text(), "\u{FFFD}");
    }

    #[test]
    fn test_reversed_bom_is_single_byte_text() {
        let token = HexToken::decode("FFFE41").unwrap();
        assert!(!token.is_utf16());
        assert_eq!(token.text(), "\u{FF}\u{FE}A");
    }

    #[test]
    fn test_null_bytes_skipped_in_single_byte_text() {
        let token = HexToken::decode("00410042").unwrap();
        assert_eq!(token.text(), "AB");
        assert_eq!(token.len(), 4);
    }

    #[test]
    fn test_high_bytes_map_to_latin1_code_points() {
        let token = HexToken::decode("E9").unwrap();
        assert_eq!(token.text(), "é");
    }

    #[test]
    fn test_from_bytes_matches_decode() {
        let from_bytes = HexToken::from_bytes(&[0x41]);
        let from_digits = HexToken::decode("41").unwrap();
        assert_eq!(from_bytes, from_digits);
        assert_eq!(from_bytes.text(), "A");
    }

    #[test]
    fn test_from_bytes_zero_padded_uppercase() {
        let token = HexToken::from_bytes(&[0x0A, 0xFF, 0x00]);
        assert_eq!(token.to_hex_string(), "0AFF00");
    }

    #[test]
    fn test_round_trip_bytes() {
        let data: Vec<u8> = (0..=255).collect();
        let token = HexToken::from_bytes(&data);
        let decoded = HexToken::decode(&token.to_hex_string()).unwrap();
        assert_eq!(decoded.bytes(), data.as_slice());
    }

    #[test]
    fn test_equality_ignores_bytes() {
        let padded = HexToken::decode("4100").unwrap();
        let plain = HexToken::decode("41").unwrap();
        assert_ne!(padded.bytes(), plain.bytes());
        assert_eq!(padded, plain);
        assert_eq!(hash_of(&padded), hash_of(&plain));
    }

    #[test]
    fn test_equality_different_text() {
        let a = HexToken::decode("41").unwrap();
        let b = HexToken::decode("42").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_utf16_and_single_byte_same_text() {
        let utf16 = HexToken::decode("FEFF00480069").unwrap();
        let single = HexToken::decode("4869").unwrap();
        assert_eq!(utf16, single);
    }

    #[test]
    fn test_to_integer_one_byte() {
        assert_eq!(HexToken::decode("0A").unwrap().to_integer().unwrap(), 10);
    }

    #[test]
    fn test_to_integer_two_bytes() {
        assert_eq!(HexToken::decode("0A0B").unwrap().to_integer().unwrap(), 2571);
        assert_eq!(HexToken::decode("FFFF").unwrap().to_integer().unwrap(), 0xFFFF);
    }

    #[test]
    fn test_to_integer_long_token_uses_first_byte() {
        assert_eq!(HexToken::decode("0A0B0C").unwrap().to_integer().unwrap(), 10);
    }

    #[test]
    fn test_to_integer_empty_token() {
        let token = HexToken::decode("").unwrap();
        assert!(matches!(
            token.to_integer(),
            Err(TokenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_convert_hex_bytes_to_int_missing_token() {
        assert!(matches!(
            convert_hex_bytes_to_int(None),
            Err(TokenError::InvalidArgument(_))
        ));
        let token = HexToken::decode("01").unwrap();
        assert_eq!(convert_hex_bytes_to_int(Some(&token)).unwrap(), 1);
    }

    #[test]
    fn test_display_and_from_str() {
        let token: HexToken = "48 69".replace(' ', "").parse().unwrap();
        assert_eq!(token.to_string(), "<4869>");
        assert!("xy".parse::<HexToken>().is_err());
    }

    #[test]
    fn test_lowercase_input_reencodes_uppercase() {
        let token = HexToken::decode("abcdef").unwrap();
        assert_eq!(token.to_hex_string(), "ABCDEF");
    }

    #[test]
    fn test_into_bytes() {
        let token = HexToken::from(vec![1u8, 2, 3]);
        assert_eq!(token.into_bytes(), vec![1, 2, 3]);
    }
}

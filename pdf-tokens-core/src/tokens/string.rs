//! Literal String Tokens
//!
//! A literal string `(…)` arrives here with its escapes already resolved.
//! Text decoding follows the byte order mark, if any.

use super::encoding::{
    decode_single_byte, decode_utf16_be, decode_utf16_le, encode_utf16_be, UTF16_BE_BOM,
    UTF16_LE_BOM,
};
use std::fmt;
use std::hash::{Hash, Hasher};

/// How the bytes of a string token were turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// One character per byte
    SingleByte,
    /// `FE FF` byte order mark
    Utf16BigEndian,
    /// `FF FE` byte order mark
    Utf16LittleEndian,
}

/// A literal string token
#[derive(Debug, Clone)]
pub struct StringToken {
    text: String,
    bytes: Vec<u8>,
    encoding: StringEncoding,
}

impl StringToken {
    /// Build a token from unescaped string bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let (text, encoding) = if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
            (decode_utf16_be(rest), StringEncoding::Utf16BigEndian)
        } else if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
            (decode_utf16_le(rest), StringEncoding::Utf16LittleEndian)
        } else {
            (decode_single_byte(&bytes), StringEncoding::SingleByte)
        };

        Self {
            text,
            bytes,
            encoding,
        }
    }

    /// Build a token from text, switching to UTF-16BE when a character
    /// does not fit in one byte or the bytes would read as a byte order mark
    pub fn new(text: &str) -> Self {
        let single_byte: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(c).ok()).collect();

        match single_byte {
            Some(bytes)
                if !bytes.starts_with(&UTF16_BE_BOM) && !bytes.starts_with(&UTF16_LE_BOM) =>
            {
                Self {
                    text: text.to_string(),
                    bytes,
                    encoding: StringEncoding::SingleByte,
                }
            }
            _ => Self {
                text: text.to_string(),
                bytes: encode_utf16_be(text),
                encoding: StringEncoding::Utf16BigEndian,
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> StringEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for StringToken {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.text == other.text
    }
}

impl Eq for StringToken {}

impl Hash for StringToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl From<&str> for StringToken {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for StringToken {
    /// Literal string syntax with `(`, `)` and `\` escaped and
    /// non-printable bytes written as octal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for &b in &self.bytes {
            match b {
                b'(' | b')' | b'\\' => write!(f, "\\{}", char::from(b))?,
                b'\n' => write!(f, "\\n")?,
                b'\r' => write!(f, "\\r")?,
                b'\t' => write!(f, "\\t")?,
                0x20..=0x7E => write!(f, "{}", char::from(b))?,
                _ => write!(f, "\\{b:03o}")?,
            }
        }
        write!(f, ")")
    }
}

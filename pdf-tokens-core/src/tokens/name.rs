use super::hex::hex_digit_value;
use crate::error::{TokenError, TokenResult};
use std::borrow::Borrow;
use std::fmt;

/// PDF name object (e.g., /Type), stored without the leading slash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameToken(String);

impl NameToken {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode the raw bytes that followed `/`, resolving `#xx` escapes.
    ///
    /// A `#` not followed by two hex digits is a syntax error.
    pub fn decode_escapes(raw: &[u8]) -> TokenResult<Self> {
        decode_name_bytes(raw, true).map(|bytes| Self(bytes_to_name(bytes)))
    }

    /// Like [`NameToken::decode_escapes`] but keeps a malformed `#` literally
    pub fn decode_escapes_lenient(raw: &[u8]) -> Self {
        match decode_name_bytes(raw, false) {
            Ok(bytes) => Self(bytes_to_name(bytes)),
            Err(_) => Self(bytes_to_name(raw.to_vec())),
        }
    }
}

fn decode_name_bytes(raw: &[u8], strict: bool) -> TokenResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] == b'#' {
            let escaped = raw.get(i + 1..i + 3).and_then(|pair| {
                let high = hex_digit_value(char::from(pair[0]))?;
                let low = hex_digit_value(char::from(pair[1]))?;
                Some(high << 4 | low)
            });

            match escaped {
                Some(value) => {
                    bytes.push(value);
                    i += 3;
                    continue;
                }
                None if strict => {
                    return Err(TokenError::SyntaxError {
                        position: i,
                        message: "Invalid '#' escape in name".to_string(),
                    });
                }
                None => {}
            }
        }
        bytes.push(raw[i]);
        i += 1;
    }

    Ok(bytes)
}

fn bytes_to_name(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(name) => name,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

fn is_regular_name_byte(b: u8) -> bool {
    (b'!'..=b'~').contains(&b)
        && !matches!(
            b,
            b'#' | b'/' | b'%' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}'
        )
}

impl Borrow<str> for NameToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NameToken {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for NameToken {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for NameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for &b in self.0.as_bytes() {
            if is_regular_name_byte(b) {
                write!(f, "{}", char::from(b))?;
            } else {
                write!(f, "#{b:02X}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_name() {
        let name = NameToken::decode_escapes(b"Type").unwrap();
        assert_eq!(name.as_str(), "Type");
    }

    #[test]
    fn test_decode_hex_escape() {
        let name = NameToken::decode_escapes(b"A#20B").unwrap();
        assert_eq!(name.as_str(), "A B");

        let name = NameToken::decode_escapes(b"Lime#20Green").unwrap();
        assert_eq!(name.as_str(), "Lime Green");

        let name = NameToken::decode_escapes(b"The_Key_of_F#23_Minor").unwrap();
        assert_eq!(name.as_str(), "The_Key_of_F#_Minor");
    }

    #[test]
    fn test_decode_utf8_escapes() {
        let name = NameToken::decode_escapes(b"Caf#C3#A9").unwrap();
        assert_eq!(name.as_str(), "Café");
    }

    #[test]
    fn test_decode_non_utf8_falls_back_to_single_byte() {
        let name = NameToken::decode_escapes(b"Caf#E9").unwrap();
        assert_eq!(name.as_str(), "Café");
    }

    #[test]
    fn test_strict_rejects_bad_escape() {
        assert!(matches!(
            NameToken::decode_escapes(b"AB#Z1"),
            Err(TokenError::SyntaxError { position: 2, .. })
        ));
        assert!(NameToken::decode_escapes(b"AB#").is_err());
    }

    #[test]
    fn test_lenient_keeps_bad_escape() {
        assert_eq!(NameToken::decode_escapes_lenient(b"AB#Z1").as_str(), "AB#Z1");
        assert_eq!(NameToken::decode_escapes_lenient(b"A#20#").as_str(), "A #");
    }

    #[test]
    fn test_display_escapes_irregular_bytes() {
        assert_eq!(NameToken::new("Type").to_string(), "/Type");
        assert_eq!(NameToken::new("A B").to_string(), "/A#20B");
        assert_eq!(NameToken::new("F#").to_string(), "/F#23");
        assert_eq!(NameToken::new("é").to_string(), "/#C3#A9");
    }

    #[test]
    fn test_display_decode_agree() {
        let name = NameToken::new("Paired (Name) #1");
        let rendered = name.to_string();
        let decoded = NameToken::decode_escapes(&rendered.as_bytes()[1..]).unwrap();
        assert_eq!(decoded, name);
    }

    #[test]
    fn test_borrow_as_str_for_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(NameToken::new("Length"), 42);
        assert_eq!(map.get("Length"), Some(&42));
    }
}

use super::Token;
use std::fmt;

/// PDF array token
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayToken(Vec<Token>);

impl ArrayToken {
    pub fn new(elements: Vec<Token>) -> Self {
        Self(elements)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }
}

impl From<Vec<Token>> for ArrayToken {
    fn from(elements: Vec<Token>) -> Self {
        Self(elements)
    }
}

impl IntoIterator for ArrayToken {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArrayToken {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ArrayToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{HexToken, NumericToken};

    #[test]
    fn test_array_accessors() {
        let array = ArrayToken::new(vec![
            Token::Numeric(NumericToken::Integer(1)),
            Token::Hex(HexToken::from_bytes(b"A")),
        ]);

        assert_eq!(array.len(), 2);
        assert!(!array.is_empty());
        assert!(matches!(array.get(1), Some(Token::Hex(_))));
        assert!(array.get(2).is_none());
        assert_eq!(array.iter().count(), 2);
    }

    #[test]
    fn test_array_display() {
        let array = ArrayToken::new(vec![
            Token::Numeric(NumericToken::Integer(0)),
            Token::Hex(HexToken::from_bytes(&[0x0A])),
            Token::Null,
        ]);
        assert_eq!(array.to_string(), "[0 <0A> null]");
        assert_eq!(ArrayToken::default().to_string(), "[]");
    }
}

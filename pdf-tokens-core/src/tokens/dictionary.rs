use super::{ArrayToken, HexToken, NameToken, NumericToken, Token};
use std::collections::HashMap;
use std::fmt;

/// PDF dictionary token
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DictionaryToken(HashMap<NameToken, Token>);

impl DictionaryToken {
    pub fn new(entries: HashMap<NameToken, Token>) -> Self {
        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_name(&self, key: &str) -> Option<&NameToken> {
        self.get(key).and_then(Token::as_name)
    }

    pub fn get_hex(&self, key: &str) -> Option<&HexToken> {
        self.get(key).and_then(Token::as_hex)
    }

    pub fn get_numeric(&self, key: &str) -> Option<NumericToken> {
        self.get(key).and_then(Token::as_numeric)
    }

    pub fn get_array(&self, key: &str) -> Option<&ArrayToken> {
        self.get(key).and_then(Token::as_array)
    }

    pub fn get_dictionary(&self, key: &str) -> Option<&DictionaryToken> {
        self.get(key).and_then(Token::as_dictionary)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, NameToken, Token> {
        self.0.iter()
    }
}

impl From<HashMap<NameToken, Token>> for DictionaryToken {
    fn from(entries: HashMap<NameToken, Token>) -> Self {
        Self(entries)
    }
}

impl FromIterator<(NameToken, Token)> for DictionaryToken {
    fn from_iter<I: IntoIterator<Item = (NameToken, Token)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DictionaryToken {
    /// Entries are written in key order so output is stable
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        write!(f, "<<")?;
        for (key, value) in entries {
            write!(f, " {key} {value}")?;
        }
        write!(f, " >>")
    }
}

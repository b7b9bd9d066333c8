//! Primitive Token Model
//!
//! Every piece of PDF syntax the lexer produces is one variant of [`Token`].
//! Tokens are immutable once built and compare structurally: variants first,
//! then payloads. String-like tokens compare on their decoded text.

mod array;
mod dictionary;
pub mod encoding;
mod hex;
mod name;
mod numeric;
mod operator;
mod string;

pub use self::array::ArrayToken;
pub use self::dictionary::DictionaryToken;
pub use self::hex::{convert, convert_hex_bytes_to_int, hex_digit_value, HexToken};
pub use self::name::NameToken;
pub use self::numeric::NumericToken;
pub use self::operator::{CommentToken, IndirectReference, OperatorToken};
pub use self::string::{StringEncoding, StringToken};

use std::fmt;

/// PDF token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Boolean: true or false
    Boolean(bool),

    /// Integer or real number
    Numeric(NumericToken),

    /// Name object (e.g., /Type)
    Name(NameToken),

    /// Literal string `( … )`
    String(StringToken),

    /// Hexadecimal string `< … >`
    Hex(HexToken),

    /// Array `[ … ]`
    Array(ArrayToken),

    /// Dictionary `<< … >>`
    Dictionary(DictionaryToken),

    /// Null object
    Null,

    /// Bare keyword or content operator
    Operator(OperatorToken),

    /// Reference (e.g., 1 0 R)
    IndirectReference(IndirectReference),

    /// Comment
    Comment(CommentToken),
}

impl Token {
    /// Variant name, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Boolean(_) => "boolean",
            Token::Numeric(_) => "numeric",
            Token::Name(_) => "name",
            Token::String(_) => "string",
            Token::Hex(_) => "hex",
            Token::Array(_) => "array",
            Token::Dictionary(_) => "dictionary",
            Token::Null => "null",
            Token::Operator(_) => "operator",
            Token::IndirectReference(_) => "reference",
            Token::Comment(_) => "comment",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Token::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<NumericToken> {
        match self {
            Token::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&NameToken> {
        match self {
            Token::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_hex(&self) -> Option<&HexToken> {
        match self {
            Token::Hex(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringToken> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayToken> {
        match self {
            Token::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&DictionaryToken> {
        match self {
            Token::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&OperatorToken> {
        match self {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<IndirectReference> {
        match self {
            Token::IndirectReference(r) => Some(*r),
            _ => None,
        }
    }

    /// Decoded text of either string form
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::String(s) => Some(s.text()),
            Token::Hex(h) => Some(h.text()),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Boolean(b) => write!(f, "{b}"),
            Token::Numeric(n) => write!(f, "{n}"),
            Token::Name(n) => write!(f, "{n}"),
            Token::String(s) => write!(f, "{s}"),
            Token::Hex(h) => write!(f, "{h}"),
            Token::Array(a) => write!(f, "{a}"),
            Token::Dictionary(d) => write!(f, "{d}"),
            Token::Null => write!(f, "null"),
            Token::Operator(op) => write!(f, "{op}"),
            Token::IndirectReference(r) => write!(f, "{r}"),
            Token::Comment(c) => write!(f, "{c}"),
        }
    }
}

impl From<HexToken> for Token {
    fn from(token: HexToken) -> Self {
        Token::Hex(token)
    }
}

impl From<StringToken> for Token {
    fn from(token: StringToken) -> Self {
        Token::String(token)
    }
}

impl From<NameToken> for Token {
    fn from(token: NameToken) -> Self {
        Token::Name(token)
    }
}

impl From<NumericToken> for Token {
    fn from(token: NumericToken) -> Self {
        Token::Numeric(token)
    }
}

impl From<bool> for Token {
    fn from(b: bool) -> Self {
        Token::Boolean(b)
    }
}

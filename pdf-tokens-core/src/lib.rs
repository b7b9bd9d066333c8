//! # pdf-tokens
//!
//! Lexer and immutable primitive token model for PDF syntax.
//!
//! ## Features
//!
//! - **Hex strings**: lenient decoding of `<…>` digit runs, UTF-16BE detection
//!   via the `FE FF` byte order mark, exact byte round-tripping
//! - **Token model**: booleans, numbers, names, literal and hex strings,
//!   arrays, dictionaries, null, operators, indirect references, comments
//! - **Lexer**: streaming tokenizer over any [`std::io::Read`] with strict and
//!   lenient modes
//!
//! ## Quick Start
//!
//! ```rust
//! use pdf_tokens::{HexToken, Result};
//!
//! # fn main() -> Result<()> {
//! let token = HexToken::decode("48656C6C6F")?;
//! assert_eq!(token.text(), "Hello");
//! assert_eq!(token.bytes(), b"Hello");
//!
//! // UTF-16BE with byte order mark
//! let token = HexToken::decode("FEFF0041")?;
//! assert_eq!(token.text(), "A");
//!
//! // Uppercase re-encoding
//! assert_eq!(HexToken::from_bytes(&[0x0A, 0x0B]).to_hex_string(), "0A0B");
//! # Ok(())
//! # }
//! ```
//!
//! ### Lexing
//!
//! ```rust
//! use pdf_tokens::{Lexer, LexerOptions, Token};
//!
//! # fn main() -> pdf_tokens::Result<()> {
//! let input = b"<< /Title <FEFF004100420043> /Parent 3 0 R >>";
//! let mut lexer = Lexer::with_options(&input[..], LexerOptions::lenient());
//!
//! if let Some(Token::Dictionary(dict)) = lexer.next_token()? {
//!     assert_eq!(dict.get_hex("Title").map(|t| t.text()), Some("ABC"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`tokens`] - Primitive token types
//! - [`lexer`] - Tokenizer and its options
//! - [`error`] - Error type shared by both

pub mod error;
pub mod lexer;
pub mod tokens;

pub use error::{TokenError, TokenResult};
pub use lexer::{tokenize, LexWarning, Lexer, LexerOptions};
pub use tokens::{
    convert_hex_bytes_to_int, ArrayToken, CommentToken, DictionaryToken, HexToken,
    IndirectReference, NameToken, NumericToken, OperatorToken, StringEncoding, StringToken, Token,
};

/// Result type used throughout the crate
pub type Result<T> = TokenResult<T>;

/// Current version of pdf-tokens
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

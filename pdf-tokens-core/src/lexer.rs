//! PDF Lexer
//!
//! Tokenizes PDF syntax according to ISO 32000-1 Section 7.2. Arrays and
//! dictionaries come back as single composite tokens, and `n g R` sequences
//! are folded into indirect references.
//!
//! Malformed input is handled according to [`LexerOptions`]: strict mode
//! propagates every error, lenient mode records a [`LexWarning`] and
//! substitutes a placeholder where one makes sense (an empty hex string for
//! an invalid one, for example).

use crate::error::{TokenError, TokenResult};
use crate::tokens::{
    ArrayToken, CommentToken, DictionaryToken, HexToken, IndirectReference, NameToken,
    NumericToken, OperatorToken, StringToken, Token,
};
use std::collections::HashMap;
use std::io::{BufReader, Read};
use tracing::{debug, warn};

/// Lexer configuration
#[derive(Debug, Clone)]
pub struct LexerOptions {
    /// Recover from malformed syntax instead of failing
    pub lenient_syntax: bool,
    /// Keep a record of every recovery in [`Lexer::warnings`]
    pub collect_warnings: bool,
    /// Recoveries allowed before lenient mode gives up
    pub max_errors: usize,
    /// Maximum array/dictionary nesting
    pub max_depth: usize,
}

impl LexerOptions {
    /// Fail on the first malformed construct
    pub fn strict() -> Self {
        Self {
            lenient_syntax: false,
            collect_warnings: false,
            max_errors: 0,
            max_depth: 256,
        }
    }

    /// Recover from malformed constructs, keeping warnings
    pub fn lenient() -> Self {
        Self {
            lenient_syntax: true,
            collect_warnings: true,
            max_errors: 100,
            max_depth: 256,
        }
    }
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// A problem the lexer recovered from in lenient mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexWarning {
    pub position: usize,
    pub message: String,
}

/// Raw lexer output: a token or a closing delimiter
enum Lexeme {
    Token(Token),
    ArrayEnd,
    DictEnd,
}

fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b'\0' | b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn is_delimiter(ch: u8) -> bool {
    matches!(
        ch,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(ch: u8) -> bool {
    !is_whitespace(ch) && !is_delimiter(ch)
}

fn integer_value(token: &Token) -> Option<i64> {
    match token {
        Token::Numeric(NumericToken::Integer(n)) => Some(*n),
        _ => None,
    }
}

fn is_reference_marker(token: &Token) -> bool {
    matches!(token, Token::Operator(op) if op.is_reference_marker())
}

/// Collapse every `int int R` run into an indirect reference.
/// Each token carries the byte offset where it started; a folded
/// reference keeps the offset of its object number.
fn fold_references(tokens: Vec<(usize, Token)>) -> Vec<(usize, Token)> {
    let mut folded: Vec<(usize, Token)> = Vec::with_capacity(tokens.len());

    for (position, token) in tokens {
        if is_reference_marker(&token) && folded.len() >= 2 {
            let len = folded.len();
            let object_number =
                integer_value(&folded[len - 2].1).and_then(|n| u32::try_from(n).ok());
            let generation = integer_value(&folded[len - 1].1).and_then(|g| u16::try_from(g).ok());

            if let (Some(object_number), Some(generation)) = (object_number, generation) {
                let start = folded[len - 2].0;
                folded.truncate(len - 2);
                folded.push((
                    start,
                    Token::IndirectReference(IndirectReference::new(object_number, generation)),
                ));
                continue;
            }
        }
        folded.push((position, token));
    }

    folded
}

/// PDF Lexer for tokenizing PDF content
pub struct Lexer<R> {
    reader: BufReader<R>,
    position: usize,
    peek_buffer: Option<u8>,
    token_buffer: Vec<Token>,
    options: LexerOptions,
    warnings: Vec<LexWarning>,
    error_count: usize,
}

impl<R: Read> Lexer<R> {
    /// Create a new strict lexer from a reader
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, LexerOptions::default())
    }

    pub fn with_options(reader: R, options: LexerOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            position: 0,
            peek_buffer: None,
            token_buffer: Vec::new(),
            options,
            warnings: Vec::new(),
            error_count: 0,
        }
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> TokenResult<Option<Token>> {
        let first = match self.next_top_level()? {
            Some(token) => token,
            None => return Ok(None),
        };

        let Some(object_number) = integer_value(&first).and_then(|n| u32::try_from(n).ok()) else {
            return Ok(Some(first));
        };

        let second = match self.next_top_level()? {
            Some(token) => token,
            None => return Ok(Some(first)),
        };
        let Some(generation) = integer_value(&second).and_then(|g| u16::try_from(g).ok()) else {
            self.token_buffer.push(second);
            return Ok(Some(first));
        };

        match self.next_top_level()? {
            Some(third) if is_reference_marker(&third) => Ok(Some(Token::IndirectReference(
                IndirectReference::new(object_number, generation),
            ))),
            Some(third) => {
                self.token_buffer.push(third);
                self.token_buffer.push(second);
                Ok(Some(first))
            }
            None => {
                self.token_buffer.push(second);
                Ok(Some(first))
            }
        }
    }

    /// Read every remaining token
    pub fn tokens(&mut self) -> TokenResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Push back a token to be returned by the next call to next_token
    pub fn push_token(&mut self, token: Token) {
        self.token_buffer.push(token);
    }

    /// Get current byte position
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn options(&self) -> &LexerOptions {
        &self.options
    }

    /// Problems recovered from so far (lenient mode with `collect_warnings`)
    pub fn warnings(&self) -> &[LexWarning] {
        &self.warnings
    }

    fn next_top_level(&mut self) -> TokenResult<Option<Token>> {
        if let Some(token) = self.token_buffer.pop() {
            return Ok(Some(token));
        }

        loop {
            let start = self.position;
            match self.read_lexeme(0)? {
                None => return Ok(None),
                Some(Lexeme::Token(token)) => return Ok(Some(token)),
                Some(Lexeme::ArrayEnd) => self.recover(
                    start,
                    TokenError::SyntaxError {
                        position: start,
                        message: "Unbalanced ']'".to_string(),
                    },
                )?,
                Some(Lexeme::DictEnd) => self.recover(
                    start,
                    TokenError::SyntaxError {
                        position: start,
                        message: "Unbalanced '>>'".to_string(),
                    },
                )?,
            }
        }
    }

    /// Record a recoverable error in lenient mode, otherwise return it
    fn recover(&mut self, position: usize, error: TokenError) -> TokenResult<()> {
        if !self.options.lenient_syntax || !error.is_recoverable() {
            return Err(error);
        }

        self.error_count += 1;
        if self.error_count > self.options.max_errors {
            return Err(TokenError::TooManyErrors(self.error_count));
        }

        warn!("Recovered at position {position}: {error}");
        if self.options.collect_warnings {
            self.warnings.push(LexWarning {
                position,
                message: error.to_string(),
            });
        }
        Ok(())
    }

    /// Peek at the next character without consuming it
    fn peek_char(&mut self) -> TokenResult<Option<u8>> {
        if let Some(ch) = self.peek_buffer {
            return Ok(Some(ch));
        }

        let mut buf = [0u8; 1];
        match self.reader.read_exact(&mut buf) {
            Ok(_) => {
                self.peek_buffer = Some(buf[0]);
                Ok(Some(buf[0]))
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Consume the next character
    fn consume_char(&mut self) -> TokenResult<Option<u8>> {
        let ch = self.peek_char()?;
        if ch.is_some() {
            self.peek_buffer = None;
            self.position += 1;
        }
        Ok(ch)
    }

    fn consume_required(&mut self, context: &'static str) -> TokenResult<u8> {
        self.consume_char()?.ok_or(TokenError::UnexpectedEof {
            position: self.position,
            context,
        })
    }

    fn skip_whitespace(&mut self) -> TokenResult<()> {
        while let Some(ch) = self.peek_char()? {
            if !is_whitespace(ch) {
                break;
            }
            self.consume_char()?;
        }
        Ok(())
    }

    fn read_lexeme(&mut self, depth: usize) -> TokenResult<Option<Lexeme>> {
        loop {
            self.skip_whitespace()?;
            let start = self.position;

            let ch = match self.peek_char()? {
                Some(ch) => ch,
                None => return Ok(None),
            };

            let token = match ch {
                b'%' => self.read_comment()?,
                b'/' => self.read_name()?,
                b'(' => self.read_literal_string()?,
                b'<' => {
                    self.consume_char()?;
                    if self.peek_char()? == Some(b'<') {
                        self.consume_char()?;
                        self.read_dictionary(depth + 1, start)?
                    } else {
                        self.read_hex_string(start)?
                    }
                }
                b'>' => {
                    self.consume_char()?;
                    if self.peek_char()? == Some(b'>') {
                        self.consume_char()?;
                        return Ok(Some(Lexeme::DictEnd));
                    }
                    self.recover(
                        start,
                        TokenError::SyntaxError {
                            position: start,
                            message: "Expected '>' after '>'".to_string(),
                        },
                    )?;
                    continue;
                }
                b'[' => {
                    self.consume_char()?;
                    self.read_array(depth + 1, start)?
                }
                b']' => {
                    self.consume_char()?;
                    return Ok(Some(Lexeme::ArrayEnd));
                }
                b')' => {
                    self.consume_char()?;
                    self.recover(
                        start,
                        TokenError::SyntaxError {
                            position: start,
                            message: "Unbalanced ')'".to_string(),
                        },
                    )?;
                    continue;
                }
                b'{' | b'}' => {
                    // PostScript calculator function braces
                    self.consume_char()?;
                    Token::Operator(OperatorToken::new(char::from(ch).to_string()))
                }
                b'+' | b'-' | b'.' | b'0'..=b'9' => self.read_number()?,
                _ => self.read_keyword()?,
            };

            return Ok(Some(Lexeme::Token(token)));
        }
    }

    /// Read a comment (from % to end of line)
    fn read_comment(&mut self) -> TokenResult<Token> {
        self.consume_char()?; // consume '%'
        let mut comment = String::new();

        while let Some(ch) = self.peek_char()? {
            if ch == b'\n' || ch == b'\r' {
                break;
            }
            self.consume_char()?;
            comment.push(char::from(ch));
        }

        Ok(Token::Comment(CommentToken::new(comment)))
    }

    /// Read a name object (e.g., /Type)
    fn read_name(&mut self) -> TokenResult<Token> {
        self.consume_char()?; // consume '/'
        let start = self.position;
        let raw = self.read_regular_bytes()?;

        let name = match NameToken::decode_escapes(&raw) {
            Ok(name) => name,
            Err(err) => {
                let err = match err {
                    TokenError::SyntaxError { position, message } => TokenError::SyntaxError {
                        position: start + position,
                        message,
                    },
                    other => other,
                };
                self.recover(start, err)?;
                NameToken::decode_escapes_lenient(&raw)
            }
        };

        Ok(Token::Name(name))
    }

    /// Read a literal string (parentheses)
    fn read_literal_string(&mut self) -> TokenResult<Token> {
        self.consume_char()?; // consume '('
        let mut bytes = Vec::new();
        let mut paren_depth = 1;

        loop {
            let ch = self.consume_required("literal string")?;
            match ch {
                b'\\' => self.read_escape(&mut bytes)?,
                b'(' => {
                    paren_depth += 1;
                    bytes.push(ch);
                }
                b')' => {
                    paren_depth -= 1;
                    if paren_depth == 0 {
                        break;
                    }
                    bytes.push(ch);
                }
                b'\r' => {
                    if self.peek_char()? == Some(b'\n') {
                        self.consume_char()?;
                    }
                    bytes.push(b'\n');
                }
                _ => bytes.push(ch),
            }
        }

        Ok(Token::String(StringToken::from_bytes(bytes)))
    }

    fn read_escape(&mut self, bytes: &mut Vec<u8>) -> TokenResult<()> {
        let ch = self.consume_required("literal string")?;
        match ch {
            b'n' => bytes.push(b'\n'),
            b'r' => bytes.push(b'\r'),
            b't' => bytes.push(b'\t'),
            b'b' => bytes.push(b'\x08'),
            b'f' => bytes.push(b'\x0C'),
            b'(' | b')' | b'\\' => bytes.push(ch),
            b'0'..=b'7' => {
                // Octal escape sequence, high-order overflow ignored
                let mut value = u32::from(ch - b'0');
                for _ in 0..2 {
                    match self.peek_char()? {
                        Some(next @ b'0'..=b'7') => {
                            self.consume_char()?;
                            value = value * 8 + u32::from(next - b'0');
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xFF) as u8);
            }
            b'\r' => {
                // Line continuation
                if self.peek_char()? == Some(b'\n') {
                    self.consume_char()?;
                }
            }
            b'\n' => {}
            _ => bytes.push(ch), // Unknown escape, backslash dropped
        }
        Ok(())
    }

    /// Read a hex string; the opening '<' is already consumed
    fn read_hex_string(&mut self, start: usize) -> TokenResult<Token> {
        let mut digits = String::new();

        loop {
            let ch = self.consume_required("hex string")?;
            match ch {
                b'>' => break,
                _ if is_whitespace(ch) => continue,
                _ => digits.push(char::from(ch)),
            }
        }

        match HexToken::decode(&digits) {
            Ok(token) => Ok(Token::Hex(token)),
            Err(err) => {
                self.recover(start, err)?;
                Ok(Token::Hex(HexToken::from_bytes(&[])))
            }
        }
    }

    /// Read a number (integer or real)
    fn read_number(&mut self) -> TokenResult<Token> {
        let start = self.position;
        let mut number = String::new();
        let mut sign_count = 0;

        while let Some(sign @ (b'+' | b'-')) = self.peek_char()? {
            self.consume_char()?;
            sign_count += 1;
            if sign_count == 1 {
                number.push(char::from(sign));
            }
        }
        if sign_count > 1 {
            self.recover(
                start,
                TokenError::SyntaxError {
                    position: start,
                    message: "Repeated sign in number".to_string(),
                },
            )?;
        }

        let mut has_dot = false;
        let mut has_digit = false;
        while let Some(ch) = self.peek_char()? {
            match ch {
                b'0'..=b'9' => has_digit = true,
                b'.' if !has_dot => has_dot = true,
                _ => break,
            }
            self.consume_char()?;
            number.push(char::from(ch));
        }

        if let Some(ch) = self.peek_char()? {
            if is_regular(ch) {
                let trailing = self.read_regular_bytes()?;
                self.recover(
                    start,
                    TokenError::SyntaxError {
                        position: start,
                        message: format!(
                            "Invalid number: '{number}{}'",
                            String::from_utf8_lossy(&trailing)
                        ),
                    },
                )?;
            }
        }

        if !has_digit {
            self.recover(
                start,
                TokenError::SyntaxError {
                    position: start,
                    message: format!("Expected digits in number, found '{number}'"),
                },
            )?;
            return Ok(Token::Numeric(NumericToken::Integer(0)));
        }

        let value = if has_dot {
            number.parse::<f64>().map(NumericToken::Real).ok()
        } else {
            match number.parse::<i64>() {
                Ok(value) => Some(NumericToken::Integer(value)),
                Err(_) => {
                    debug!("Integer '{number}' out of range, reading as real");
                    number.parse::<f64>().map(NumericToken::Real).ok()
                }
            }
        };

        value.map(Token::Numeric).ok_or(TokenError::SyntaxError {
            position: start,
            message: format!("Invalid number: '{number}'"),
        })
    }

    /// Read a keyword, boolean or null
    fn read_keyword(&mut self) -> TokenResult<Token> {
        let word = self.read_regular_bytes()?;
        let word: String = word.into_iter().map(char::from).collect();

        Ok(match word.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" => Token::Null,
            _ => Token::Operator(OperatorToken::new(word)),
        })
    }

    /// Read bytes up to the next whitespace or delimiter
    fn read_regular_bytes(&mut self) -> TokenResult<Vec<u8>> {
        let mut bytes = Vec::new();
        while let Some(ch) = self.peek_char()? {
            if !is_regular(ch) {
                break;
            }
            self.consume_char()?;
            bytes.push(ch);
        }
        Ok(bytes)
    }

    fn check_depth(&self, depth: usize, start: usize) -> TokenResult<()> {
        if depth > self.options.max_depth {
            return Err(TokenError::NestingTooDeep {
                position: start,
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    /// Read array elements; the opening '[' is already consumed
    fn read_array(&mut self, depth: usize, start: usize) -> TokenResult<Token> {
        self.check_depth(depth, start)?;
        let mut elements = Vec::new();

        loop {
            self.skip_whitespace()?;
            let position = self.position;
            match self.read_lexeme(depth)? {
                None => {
                    return Err(TokenError::UnexpectedEof {
                        position: self.position,
                        context: "array",
                    })
                }
                Some(Lexeme::ArrayEnd) => break,
                Some(Lexeme::DictEnd) => self.recover(
                    position,
                    TokenError::SyntaxError {
                        position,
                        message: "Unexpected '>>' inside array".to_string(),
                    },
                )?,
                Some(Lexeme::Token(Token::Comment(_))) => continue,
                Some(Lexeme::Token(token)) => elements.push((position, token)),
            }
        }

        let elements = fold_references(elements)
            .into_iter()
            .map(|(_, token)| token)
            .collect();
        Ok(Token::Array(ArrayToken::new(elements)))
    }

    /// Read dictionary entries; the opening '<<' is already consumed
    fn read_dictionary(&mut self, depth: usize, start: usize) -> TokenResult<Token> {
        self.check_depth(depth, start)?;
        let mut elements = Vec::new();

        loop {
            self.skip_whitespace()?;
            let position = self.position;
            match self.read_lexeme(depth)? {
                None => {
                    return Err(TokenError::UnexpectedEof {
                        position: self.position,
                        context: "dictionary",
                    })
                }
                Some(Lexeme::DictEnd) => break,
                Some(Lexeme::ArrayEnd) => self.recover(
                    position,
                    TokenError::SyntaxError {
                        position,
                        message: "Unexpected ']' inside dictionary".to_string(),
                    },
                )?,
                Some(Lexeme::Token(Token::Comment(_))) => continue,
                Some(Lexeme::Token(token)) => elements.push((position, token)),
            }
        }

        let mut entries = HashMap::new();
        let mut members = fold_references(elements).into_iter();

        while let Some((key_position, key)) = members.next() {
            let key = match key {
                Token::Name(name) => name,
                other => {
                    self.recover(
                        key_position,
                        TokenError::SyntaxError {
                            position: key_position,
                            message: format!(
                                "Dictionary key must be a name, found {}",
                                other.kind()
                            ),
                        },
                    )?;
                    continue;
                }
            };

            match members.next() {
                Some((_, value)) => {
                    entries.insert(key, value);
                }
                None => self.recover(
                    key_position,
                    TokenError::SyntaxError {
                        position: key_position,
                        message: format!("Dictionary key {key} has no value"),
                    },
                )?,
            }
        }

        Ok(Token::Dictionary(DictionaryToken::new(entries)))
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = TokenResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize an in-memory buffer with the given options
pub fn tokenize(input: &[u8], options: LexerOptions) -> TokenResult<Vec<Token>> {
    Lexer::with_options(input, options).tokens()
}

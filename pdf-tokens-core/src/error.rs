use thiserror::Error;

/// Errors raised while building tokens or lexing PDF syntax
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hex digit {character:?} at index {index}")]
    InvalidDigit { character: char, index: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Syntax error at position {position}: {message}")]
    SyntaxError { position: usize, message: String },

    #[error("Unexpected end of input at position {position} while reading {context}")]
    UnexpectedEof {
        position: usize,
        context: &'static str,
    },

    #[error("Nesting deeper than {limit} levels at position {position}")]
    NestingTooDeep { position: usize, limit: usize },

    #[error("Too many recoverable errors ({0})")]
    TooManyErrors(usize),
}

/// Result type for token and lexer operations
pub type TokenResult<T> = std::result::Result<T, TokenError>;

impl TokenError {
    /// Whether a lenient caller may substitute a placeholder and continue.
    ///
    /// I/O failures, truncated input and resource limits are never recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidDigit { .. }
                | TokenError::InvalidArgument(_)
                | TokenError::SyntaxError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_invalid_digit_display() {
        let error = TokenError::InvalidDigit {
            character: 'Z',
            index: 1,
        };
        assert_eq!(error.to_string(), "Invalid hex digit 'Z' at index 1");
    }

    #[test]
    fn test_syntax_error_display() {
        let error = TokenError::SyntaxError {
            position: 42,
            message: "Unbalanced '>'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Syntax error at position 42: Unbalanced '>'"
        );
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::PermissionDenied, "denied");
        let error = TokenError::from(io_error);

        match error {
            TokenError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::PermissionDenied),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(TokenError::InvalidDigit {
            character: 'g',
            index: 0
        }
        .is_recoverable());
        assert!(TokenError::SyntaxError {
            position: 0,
            message: String::new()
        }
        .is_recoverable());
        assert!(!TokenError::UnexpectedEof {
            position: 3,
            context: "hex string"
        }
        .is_recoverable());
        assert!(!TokenError::NestingTooDeep {
            position: 0,
            limit: 4
        }
        .is_recoverable());
        assert!(!TokenError::TooManyErrors(10).is_recoverable());
    }

    #[test]
    fn test_error_debug_contains_variant() {
        let error = TokenError::InvalidArgument("token is missing".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidArgument"));
        assert!(debug_str.contains("token is missing"));
    }
}

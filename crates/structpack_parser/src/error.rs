use structpack_lexer::LexError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("{message} at line {line}")]
    Unexpected { message: String, line: u32 },
}

impl ParseError {
    pub fn unexpected(message: impl Into<String>, line: u32) -> Self {
        Self::Unexpected {
            message: message.into(),
            line,
        }
    }
}

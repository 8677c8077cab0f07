//! Tokenizer for the Go source subset the linter inspects.
//!
//! The scanner is deliberately shallow: it produces just enough structure to
//! find `type` declarations, match brackets, and attach comments and tags to
//! struct fields. It does not validate Go beyond literal termination.

pub mod token;

pub use token::{Token, TokenKind};

use structpack_span::Span;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at byte {}", .span.start)]
    UnterminatedString { span: Span },
    #[error("unterminated raw string literal starting at byte {}", .span.start)]
    UnterminatedRawString { span: Span },
    #[error("unterminated rune literal starting at byte {}", .span.start)]
    UnterminatedRune { span: Span },
    #[error("unterminated block comment starting at byte {}", .span.start)]
    UnterminatedBlockComment { span: Span },
}

impl LexError {
    #[inline]
    pub fn span(&self) -> Span {
        match *self {
            Self::UnterminatedString { span }
            | Self::UnterminatedRawString { span }
            | Self::UnterminatedRune { span }
            | Self::UnterminatedBlockComment { span } => span,
        }
    }
}

/// Tokenize an entire source file.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(i, _)| i)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
                continue;
            }
            let start = self.offset();
            let line = self.line;
            let kind = self.scan_token(c, start)?;
            tokens.push(Token {
                kind,
                span: Span::new(start, self.offset()),
                line,
            });
        }
        Ok(tokens)
    }

    fn scan_token(&mut self, c: char, start: usize) -> Result<TokenKind, LexError> {
        match c {
            '/' if self.peek_at(1) == Some('/') => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
                Ok(TokenKind::LineComment)
            }
            '/' if self.peek_at(1) == Some('*') => {
                self.bump();
                self.bump();
                loop {
                    match self.peek() {
                        Some('*') if self.peek_at(1) == Some('/') => {
                            self.bump();
                            self.bump();
                            return Ok(TokenKind::BlockComment);
                        }
                        Some(_) => {
                            self.bump();
                        }
                        None => {
                            return Err(LexError::UnterminatedBlockComment {
                                span: Span::new(start, self.offset()),
                            });
                        }
                    }
                }
            }
            '"' => {
                self.bump();
                loop {
                    match self.peek() {
                        Some('\\') => {
                            self.bump();
                            self.bump();
                        }
                        Some('"') => {
                            self.bump();
                            return Ok(TokenKind::Str);
                        }
                        Some('\n') | None => {
                            return Err(LexError::UnterminatedString {
                                span: Span::new(start, self.offset()),
                            });
                        }
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
            }
            '`' => {
                self.bump();
                loop {
                    match self.peek() {
                        Some('`') => {
                            self.bump();
                            return Ok(TokenKind::RawStr);
                        }
                        Some(_) => {
                            self.bump();
                        }
                        None => {
                            return Err(LexError::UnterminatedRawString {
                                span: Span::new(start, self.offset()),
                            });
                        }
                    }
                }
            }
            '\'' => {
                self.bump();
                loop {
                    match self.peek() {
                        Some('\\') => {
                            self.bump();
                            self.bump();
                        }
                        Some('\'') => {
                            self.bump();
                            return Ok(TokenKind::Rune);
                        }
                        Some('\n') | None => {
                            return Err(LexError::UnterminatedRune {
                                span: Span::new(start, self.offset()),
                            });
                        }
                        Some(_) => {
                            self.bump();
                        }
                    }
                }
            }
            _ if c == '_' || c.is_alphabetic() => {
                while let Some(c) = self.peek() {
                    if c == '_' || c.is_alphanumeric() {
                        self.bump();
                    } else {
                        break;
                    }
                }
                Ok(TokenKind::Ident)
            }
            _ if c.is_ascii_digit() => {
                while let Some(c) = self.peek() {
                    // covers decimal, hex, octal, binary and digit separators
                    if c.is_ascii_alphanumeric() || c == '_' {
                        self.bump();
                    } else {
                        break;
                    }
                }
                Ok(TokenKind::Int)
            }
            '<' if self.peek_at(1) == Some('-') => {
                self.bump();
                self.bump();
                Ok(TokenKind::Arrow)
            }
            _ => {
                self.bump();
                Ok(match c {
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    '*' => TokenKind::Star,
                    '.' => TokenKind::Dot,
                    _ => TokenKind::Punct,
                })
            }
        }
    }
}

use structpack_span::Span;

/// Token shapes the struct scanner distinguishes.
///
/// Comments are real tokens rather than discarded trivia; the parser turns
/// them into field doc blocks and trailing comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Int,
    /// Interpreted string literal, `"..."`.
    Str,
    /// Raw string literal, `` `...` ``.
    RawStr,
    /// Rune literal, `'...'`.
    Rune,
    LineComment,
    BlockComment,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Star,
    Dot,
    /// `<-`
    Arrow,
    /// Any other punctuation, kept so depth tracking sees every byte.
    Punct,
}

impl TokenKind {
    /// Whether this token is a comment of either form.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the token's first byte.
    pub line: u32,
}

impl Token {
    /// The source text this token covers.
    #[inline]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.slice(source)
    }
}

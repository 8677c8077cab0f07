//! Scanner for struct type declarations in Go source.
//!
//! This is not a full Go parser. It tokenizes the file, tracks bracket depth
//! to skip over everything that is not a top-level `type` declaration, and
//! parses struct bodies (field names, type expressions, doc comments, tags,
//! trailing comments) into the [`structpack_ast`] tree. A failure anywhere
//! makes the whole file unanalyzable; the caller reports it and moves on.

pub mod error;

pub use error::ParseError;

use structpack_ast::{FieldDecl, StructDecl, TypeExpr};
use structpack_lexer::{Token, TokenKind, tokenize};
use structpack_span::{Span, line_col};

/// Parse every top-level struct type declaration in `source`.
///
/// Declarations are returned in source order. Non-struct type specs,
/// function bodies, and anything else in the file are skipped.
pub fn parse_structs(source: &str) -> Result<Vec<StructDecl>, ParseError> {
    let tokens = tokenize(source)?;
    Parser {
        source,
        tokens,
        pos: 0,
    }
    .run()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

/// Tokens that can begin a type expression.
fn is_type_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Star
            | TokenKind::LBracket
            | TokenKind::LParen
            | TokenKind::Arrow
    )
}

/// 1-based line on which a token ends (block comments and raw strings may
/// span several lines).
fn end_line(token: &Token, source: &str) -> u32 {
    let newlines = token.text(source).bytes().filter(|&b| b == b'\n').count();
    token.line + newlines as u32
}

impl<'a> Parser<'a> {
    fn run(mut self) -> Result<Vec<StructDecl>, ParseError> {
        let mut structs = Vec::new();
        let mut depth: i64 = 0;
        while let Some(&token) = self.peek_raw() {
            match token.kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    depth += 1;
                    self.pos += 1;
                }
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth -= 1;
                    self.pos += 1;
                }
                TokenKind::Ident if depth == 0 && token.text(self.source) == "type" => {
                    self.parse_type_decl(&mut structs)?;
                }
                _ => self.pos += 1,
            }
        }
        Ok(structs)
    }

    // --- token access -----------------------------------------------------

    fn peek_raw(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Next non-comment token.
    fn peek(&self) -> Option<&Token> {
        self.tokens[self.pos..]
            .iter()
            .find(|t| !t.kind.is_comment())
    }

    /// Non-comment token `ahead` positions past the next one.
    fn peek_nth(&self, ahead: usize) -> Option<&Token> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_comment())
            .nth(ahead)
    }

    fn skip_comments(&mut self) {
        while self
            .peek_raw()
            .is_some_and(|t| t.kind.is_comment())
        {
            self.pos += 1;
        }
    }

    fn prev(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    fn current_line(&self) -> u32 {
        self.peek_raw()
            .map_or_else(|| self.tokens.last().map_or(1, |t| t.line), |t| t.line)
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::unexpected(message, self.current_line())
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        self.skip_comments();
        match self.peek_raw() {
            Some(&token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.err(format!("expected {kind:?} {context}"))),
        }
    }

    fn expect_ident(&mut self, context: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Ident, context)
    }

    // --- type declarations ------------------------------------------------

    /// Parse a `type` declaration, single or parenthesized group form.
    /// Positioned on the `type` keyword.
    fn parse_type_decl(&mut self, out: &mut Vec<StructDecl>) -> Result<(), ParseError> {
        self.pos += 1; // 'type'
        self.skip_comments();
        if self.peek_raw().is_some_and(|t| t.kind == TokenKind::LParen) {
            self.pos += 1;
            loop {
                self.skip_comments();
                match self.peek_raw() {
                    Some(t) if t.kind == TokenKind::RParen => {
                        self.pos += 1;
                        return Ok(());
                    }
                    Some(t) if t.kind == TokenKind::Semicolon => {
                        self.pos += 1;
                    }
                    Some(_) => self.parse_type_spec(out)?,
                    None => return Err(self.err("unexpected end of file in type group")),
                }
            }
        } else {
            self.parse_type_spec(out)
        }
    }

    /// Parse one `Name [type params] [=] Type` spec, recording it when the
    /// type is a struct literal.
    fn parse_type_spec(&mut self, out: &mut Vec<StructDecl>) -> Result<(), ParseError> {
        let name_token = self.expect_ident("for type name after 'type' keyword")?;
        self.skip_comments();

        // generic type parameter list
        if self.peek_raw().is_some_and(|t| t.kind == TokenKind::LBracket) {
            self.pos += 1;
            self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket, "type parameters")?;
        }
        self.skip_comments();

        // alias form: `type X = Y`
        if self
            .peek_raw()
            .is_some_and(|t| t.kind == TokenKind::Punct && t.text(self.source) == "=")
        {
            self.pos += 1;
            self.skip_comments();
        }

        let is_struct = self.peek().is_some_and(|t| {
            t.kind == TokenKind::Ident && t.text(self.source) == "struct"
        }) && self
            .peek_nth(1)
            .is_some_and(|t| t.kind == TokenKind::LBrace);

        if is_struct {
            self.skip_comments();
            let struct_start = self.peek_raw().map_or(0, |t| t.span.start);
            self.pos += 1; // 'struct'
            self.expect(TokenKind::LBrace, "to begin struct fields")?;
            let (fields, end) = self.parse_field_list()?;
            out.push(StructDecl {
                name: name_token.text(self.source).to_owned(),
                fields,
                span: Span::new(struct_start, end),
                pos: line_col(self.source, name_token.span.start),
            });
            Ok(())
        } else {
            self.parse_type_expr().map(|_| ())
        }
    }

    // --- struct fields ----------------------------------------------------

    /// Parse fields until the closing brace; returns them with the byte
    /// offset just past that brace.
    fn parse_field_list(&mut self) -> Result<(Vec<FieldDecl>, usize), ParseError> {
        let mut fields = Vec::new();
        let mut pending: Vec<Token> = Vec::new();
        loop {
            match self.peek_raw().copied() {
                Some(t) if t.kind == TokenKind::RBrace => {
                    self.pos += 1;
                    return Ok((fields, t.span.end));
                }
                Some(t) if t.kind == TokenKind::Semicolon => {
                    self.pos += 1;
                }
                Some(t) if t.kind.is_comment() => {
                    pending.push(t);
                    self.pos += 1;
                }
                Some(_) => fields.push(self.parse_field(&mut pending)?),
                None => return Err(self.err("unexpected end of file in struct body")),
            }
        }
    }

    /// Take the contiguous run of comments ending directly above (or on)
    /// `field_line` as the field's doc block; older comments are dropped.
    fn take_doc(&self, pending: &mut Vec<Token>, field_line: u32) -> Vec<String> {
        let mut cut = pending.len();
        let mut want = field_line;
        for i in (0..pending.len()).rev() {
            let end = end_line(&pending[i], self.source);
            if end + 1 == want || end == want {
                cut = i;
                want = pending[i].line;
            } else {
                break;
            }
        }
        let doc = pending[cut..]
            .iter()
            .map(|t| t.text(self.source).to_owned())
            .collect();
        pending.clear();
        doc
    }

    fn parse_field(&mut self, pending: &mut Vec<Token>) -> Result<FieldDecl, ParseError> {
        let first = *self
            .peek_raw()
            .ok_or_else(|| self.err("expected field declaration"))?;
        let doc = self.take_doc(pending, first.line);

        let mut names = Vec::new();
        match first.kind {
            TokenKind::Ident => {
                let second = self.peek_nth(1);
                match second.map(|t| (t.kind, t.line)) {
                    // `a, b T`
                    Some((TokenKind::Comma, _)) => {
                        names.push(first.text(self.source).to_owned());
                        self.pos += 1;
                        self.skip_comments();
                        while self.peek_raw().is_some_and(|t| t.kind == TokenKind::Comma) {
                            self.pos += 1;
                            let name = self.expect_ident("for field name after ','")?;
                            names.push(name.text(self.source).to_owned());
                            self.skip_comments();
                        }
                    }
                    // `pkg.T` embedded; the type parse consumes both idents
                    Some((TokenKind::Dot, _)) => {}
                    // `a T` when a type begins on the same line
                    Some((kind, line)) if is_type_start(kind) && line == first.line => {
                        names.push(first.text(self.source).to_owned());
                        self.pos += 1;
                    }
                    // plain embedded ident
                    _ => {}
                }
            }
            TokenKind::Star | TokenKind::LBracket | TokenKind::LParen | TokenKind::Arrow => {}
            _ => return Err(self.err("expected field name or embedded type")),
        }

        let (ty, ty_span) = self.parse_type_expr()?;
        let ty_src = ty_span.slice(self.source).to_owned();

        let mut tag = None;
        if let Some(t) = self.peek_raw()
            && matches!(t.kind, TokenKind::Str | TokenKind::RawStr)
        {
            tag = Some(t.text(self.source).to_owned());
            self.pos += 1;
        }

        let field_end_line = end_line(self.prev(), self.source);
        let mut comment = None;
        if let Some(t) = self.peek_raw()
            && t.kind.is_comment()
            && t.line == field_end_line
        {
            comment = Some(t.text(self.source).to_owned());
            self.pos += 1;
        }

        Ok(FieldDecl {
            names,
            ty,
            ty_src,
            doc,
            tag,
            comment,
        })
    }

    // --- type expressions ---------------------------------------------------

    /// Parse a type expression, returning its shape and exact source span.
    fn parse_type_expr(&mut self) -> Result<(TypeExpr, Span), ParseError> {
        self.skip_comments();
        let first = *self
            .peek_raw()
            .ok_or_else(|| self.err("expected type expression"))?;
        let start = first.span.start;

        match first.kind {
            TokenKind::Star => {
                self.pos += 1;
                let (elem, elem_span) = self.parse_type_expr()?;
                Ok((
                    TypeExpr::Pointer {
                        elem: Box::new(elem),
                    },
                    Span::new(start, elem_span.end),
                ))
            }
            TokenKind::Arrow => {
                // `<-chan T`
                self.pos += 1;
                let keyword = self.expect_ident("for 'chan' after '<-'")?;
                if keyword.text(self.source) != "chan" {
                    return Err(self.err("expected 'chan' after '<-'"));
                }
                let (elem, elem_span) = self.parse_type_expr()?;
                Ok((
                    TypeExpr::Chan {
                        elem: Box::new(elem),
                    },
                    Span::new(start, elem_span.end),
                ))
            }
            TokenKind::LBracket => {
                self.pos += 1;
                self.skip_comments();
                let len = if self.peek_raw().is_some_and(|t| t.kind == TokenKind::RBracket) {
                    self.pos += 1;
                    None
                } else {
                    let len_start = self.peek_raw().map_or(start, |t| t.span.start);
                    let close =
                        self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket, "array length")?;
                    Some(self.source[len_start..close.span.start].trim().to_owned())
                };
                let close_line = self.prev().line;
                // the element type must continue on the same line; anything
                // else is a construct this scanner does not understand
                match self.peek_raw() {
                    Some(t) if is_type_start(t.kind) && t.line == close_line => {}
                    _ => return Err(self.err("expected element type after ']'")),
                }
                let (elem, elem_span) = self.parse_type_expr()?;
                Ok((
                    TypeExpr::Array {
                        len,
                        elem: Box::new(elem),
                    },
                    Span::new(start, elem_span.end),
                ))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let (inner, _) = self.parse_type_expr()?;
                let close = self.expect(TokenKind::RParen, "to close parenthesized type")?;
                Ok((inner, Span::new(start, close.span.end)))
            }
            TokenKind::Ident => match first.text(self.source) {
                "map" => {
                    self.pos += 1;
                    self.expect(TokenKind::LBracket, "after 'map'")?;
                    let (key, _) = self.parse_type_expr()?;
                    self.expect(TokenKind::RBracket, "to close map key type")?;
                    let (value, value_span) = self.parse_type_expr()?;
                    Ok((
                        TypeExpr::Map {
                            key: Box::new(key),
                            value: Box::new(value),
                        },
                        Span::new(start, value_span.end),
                    ))
                }
                "chan" => {
                    self.pos += 1;
                    self.skip_comments();
                    if self.peek_raw().is_some_and(|t| t.kind == TokenKind::Arrow) {
                        self.pos += 1;
                    }
                    let (elem, elem_span) = self.parse_type_expr()?;
                    Ok((
                        TypeExpr::Chan {
                            elem: Box::new(elem),
                        },
                        Span::new(start, elem_span.end),
                    ))
                }
                "interface" => {
                    self.pos += 1;
                    self.expect(TokenKind::LBrace, "after 'interface'")?;
                    let close =
                        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace, "interface body")?;
                    Ok((TypeExpr::Interface, Span::new(start, close.span.end)))
                }
                "struct" => {
                    self.pos += 1;
                    self.expect(TokenKind::LBrace, "after 'struct'")?;
                    let close =
                        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace, "struct body")?;
                    Ok((TypeExpr::Struct, Span::new(start, close.span.end)))
                }
                "func" => {
                    self.pos += 1;
                    self.expect(TokenKind::LParen, "after 'func'")?;
                    let mut close =
                        self.skip_balanced(TokenKind::LParen, TokenKind::RParen, "func parameters")?;
                    // a result type counts only when it starts on the line
                    // the parameter list closes on
                    if let Some(t) = self.peek_raw().copied()
                        && is_type_start(t.kind)
                        && t.line == close.line
                    {
                        if t.kind == TokenKind::LParen {
                            self.pos += 1;
                            close = self.skip_balanced(
                                TokenKind::LParen,
                                TokenKind::RParen,
                                "func results",
                            )?;
                        } else {
                            let (_, result_span) = self.parse_type_expr()?;
                            return Ok((TypeExpr::Func, Span::new(start, result_span.end)));
                        }
                    }
                    Ok((TypeExpr::Func, Span::new(start, close.span.end)))
                }
                name => {
                    self.pos += 1;
                    let mut full = name.to_owned();
                    let mut end = first.span.end;
                    if self.peek_raw().is_some_and(|t| t.kind == TokenKind::Dot) {
                        self.pos += 1;
                        let selector = self.expect_ident("for type name after '.'")?;
                        full.push('.');
                        full.push_str(selector.text(self.source));
                        end = selector.span.end;
                    }
                    // generic instantiation, e.g. `List[int]`
                    if let Some(t) = self.peek_raw()
                        && t.kind == TokenKind::LBracket
                        && t.line == self.prev().line
                    {
                        self.pos += 1;
                        let close = self.skip_balanced(
                            TokenKind::LBracket,
                            TokenKind::RBracket,
                            "type arguments",
                        )?;
                        end = close.span.end;
                    }
                    Ok((TypeExpr::Named { name: full }, Span::new(start, end)))
                }
            },
            _ => Err(self.err("expected type expression")),
        }
    }

    /// Consume tokens until the `close` matching the already-consumed `open`,
    /// returning the closing token.
    fn skip_balanced(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        context: &str,
    ) -> Result<Token, ParseError> {
        let mut depth = 1usize;
        while let Some(token) = self.peek_raw().copied() {
            self.pos += 1;
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(token);
                }
            }
        }
        Err(self.err(format!("unexpected end of file in {context}")))
    }
}

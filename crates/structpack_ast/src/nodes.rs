//! Syntax tree for the Go struct subset the linter analyzes.
//!
//! The tree is read-only once parsed: analysis constructs fresh nodes
//! instead of mutating these.

use structpack_span::{LineCol, Span};

/// A type expression, reduced to the shapes the size oracle distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare or package-qualified identifier (`int64`, `pkg.Conn`).
    Named { name: String },
    /// `*T`
    Pointer { elem: Box<TypeExpr> },
    /// `[N]T` when `len` is present, `[]T` otherwise.
    ///
    /// The length is kept as raw source text; it is never evaluated.
    Array {
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T`, `<-chan T`, `chan<- T` (direction is irrelevant to layout).
    Chan { elem: Box<TypeExpr> },
    /// `interface { ... }`
    Interface,
    /// `func(...) ...`
    Func,
    /// An anonymous `struct { ... }` literal.
    Struct,
}

impl TypeExpr {
    #[inline]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }
}

/// One syntactic field entry in a struct declaration.
///
/// Binds zero names (an embedded field), one name, or several names to a
/// single type. Doc block, tag literal, and trailing comment are carried as
/// raw source text so a rewrite reproduces them byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Bound names; empty for an embedded field.
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Exact source text of the type expression, used when re-rendering.
    pub ty_src: String,
    /// Raw comment lines immediately above the field, including markers.
    pub doc: Vec<String>,
    /// Raw tag literal including its quotes or backticks.
    pub tag: Option<String>,
    /// Raw trailing comment on the field's last line, including markers.
    pub comment: Option<String>,
}

impl FieldDecl {
    /// Whether this declaration is an embedded (unnamed) field.
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// A named struct type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    /// Field declarations in source order. The order is semantically
    /// meaningful; it is what fix mode rewrites.
    pub fields: Vec<FieldDecl>,
    /// Byte range from the `struct` keyword through the closing brace.
    /// Fix mode replaces exactly this range.
    pub span: Span,
    /// Position of the type name, for reports.
    pub pos: LineCol,
}

//! Rendering: type strings for reports and struct declarations for
//! rewriting.

use structpack_ast::{FieldDecl, TypeExpr};

/// Human-readable rendering of a type shape for reports.
///
/// Compact rather than faithful: fixed-length arrays print as `[...]T`, any
/// function as `func(...)`, and shapes outside the table as `unknown`.
/// Rewrites never use this; they splice the exact source text back in.
pub fn format_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Named { name } => name.clone(),
        TypeExpr::Pointer { elem } => format!("*{}", format_type(elem)),
        TypeExpr::Array { len: None, elem } => format!("[]{}", format_type(elem)),
        TypeExpr::Array { len: Some(_), elem } => format!("[...]{}", format_type(elem)),
        TypeExpr::Map { key, value } => {
            format!("map[{}]{}", format_type(key), format_type(value))
        }
        TypeExpr::Chan { elem } => format!("chan {}", format_type(elem)),
        TypeExpr::Interface => "interface{}".to_owned(),
        TypeExpr::Func => "func(...)".to_owned(),
        TypeExpr::Struct => "unknown".to_owned(),
    }
}

/// Render a `struct { ... }` literal from a field list.
///
/// `indent` is the indentation of the line the declaration starts on; field
/// lines get one more tab. Names are padded so the type column lines up,
/// tags and trailing comments follow with a single space. Each field's
/// exact original type text is used, so a rewrite never reshapes a type
/// expression.
pub fn render_struct_body(fields: &[FieldDecl], indent: &str) -> String {
    let name_width = fields
        .iter()
        .filter(|f| !f.is_embedded())
        .map(|f| f.names.join(", ").len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("struct {\n");
    for field in fields {
        for line in &field.doc {
            out.push_str(indent);
            out.push('\t');
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(indent);
        out.push('\t');
        if field.is_embedded() {
            out.push_str(&field.ty_src);
        } else {
            let names = field.names.join(", ");
            out.push_str(&names);
            // pad the name column only when something follows it
            out.push_str(&" ".repeat(name_width - names.len() + 1));
            out.push_str(&field.ty_src);
        }
        if let Some(tag) = &field.tag {
            out.push(' ');
            out.push_str(tag);
        }
        if let Some(comment) = &field.comment {
            out.push(' ');
            out.push_str(comment);
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push('}');
    out
}

/// Render a full `type Name struct { ... }` declaration at column zero.
pub fn render_type_decl(name: &str, fields: &[FieldDecl]) -> String {
    format!("type {name} {}", render_struct_body(fields, ""))
}

//! Expansion of field declarations into per-name entries.

use structpack_ast::StructDecl;

use crate::size::size_of;

/// One analyzable field: a single bound name (empty for an embedded field),
/// its estimated size, and the index of the declaration that owns it.
///
/// Entries are transient views; they are rebuilt on every analysis pass and
/// key back into `StructDecl::fields` by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Index of the owning declaration in `StructDecl::fields`.
    pub decl: usize,
    /// Bound name; empty for an embedded field.
    pub name: String,
    pub size: u64,
}

/// Expand a struct's declarations into per-name entries in source order.
///
/// A declaration binding `k` names yields `k` entries sharing one size and
/// owner; an embedded declaration yields one entry with an empty name.
/// Structs with at most one declaration return no entries: nothing could be
/// reordered, so analysis is skipped outright.
pub fn flatten(decl: &StructDecl) -> Vec<FieldEntry> {
    if decl.fields.len() <= 1 {
        return Vec::new();
    }
    let mut entries = Vec::new();
    for (index, field) in decl.fields.iter().enumerate() {
        let size = size_of(&field.ty);
        if field.names.is_empty() {
            entries.push(FieldEntry {
                decl: index,
                name: String::new(),
                size,
            });
        } else {
            for name in &field.names {
                entries.push(FieldEntry {
                    decl: index,
                    name: name.clone(),
                    size,
                });
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::tests::{field, strukt};
    use structpack_ast::TypeExpr;

    #[test]
    fn single_declaration_yields_nothing() {
        let st = strukt(vec![field(&["x"], TypeExpr::named("int32"))]);
        assert!(flatten(&st).is_empty());
    }

    #[test]
    fn single_multi_name_declaration_yields_nothing() {
        let st = strukt(vec![field(&["a", "b", "c"], TypeExpr::named("int32"))]);
        assert!(flatten(&st).is_empty());
    }

    #[test]
    fn expands_names_in_source_order() {
        let st = strukt(vec![
            field(&["x", "y"], TypeExpr::named("int32")),
            field(&["z"], TypeExpr::named("int64")),
        ]);
        let entries = flatten(&st);
        assert_eq!(
            entries,
            vec![
                FieldEntry {
                    decl: 0,
                    name: "x".to_owned(),
                    size: 4
                },
                FieldEntry {
                    decl: 0,
                    name: "y".to_owned(),
                    size: 4
                },
                FieldEntry {
                    decl: 1,
                    name: "z".to_owned(),
                    size: 8
                },
            ]
        );
    }

    #[test]
    fn embedded_field_gets_an_empty_name() {
        let st = strukt(vec![
            field(&[], TypeExpr::named("Base")),
            field(&["id"], TypeExpr::named("int64")),
        ]);
        let entries = flatten(&st);
        assert_eq!(entries[0].name, "");
        assert_eq!(entries[0].size, 8);
    }
}

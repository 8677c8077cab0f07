//! The reorder verdict: is a struct's field order suboptimal?

use structpack_ast::StructDecl;

use crate::flatten::{FieldEntry, flatten};

/// Result of analyzing one struct declaration.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Entries in source order.
    pub current: Vec<FieldEntry>,
    /// Entries sorted size-descending, name-ascending on ties.
    pub suggested: Vec<FieldEntry>,
    pub needs_reordering: bool,
}

/// Analyze a struct's field order. Returns `None` for structs with at most
/// one field declaration, which can never benefit from reordering.
///
/// The suggested order is a heuristic, not a padding-exact optimum: a stable
/// sort by descending size approximates "larger, more aligned fields first"
/// without simulating compiler padding. Ties sort by name ascending, an
/// empty (embedded) name before any other, and entries with identical size
/// and name keep their relative order.
pub fn analyze(decl: &StructDecl) -> Option<Analysis> {
    let current = flatten(decl);
    if current.is_empty() {
        return None;
    }

    let mut suggested = current.clone();
    suggested.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));

    let needs_reordering = current
        .iter()
        .zip(&suggested)
        .any(|(cur, sug)| cur.size != sug.size || cur.name != sug.name);

    Some(Analysis {
        current,
        suggested,
        needs_reordering,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use structpack_ast::{FieldDecl, TypeExpr};
    use structpack_span::{LineCol, Span};

    pub(crate) fn field(names: &[&str], ty: TypeExpr) -> FieldDecl {
        FieldDecl {
            names: names.iter().map(|n| (*n).to_owned()).collect(),
            ty_src: String::new(),
            ty,
            doc: Vec::new(),
            tag: None,
            comment: None,
        }
    }

    pub(crate) fn strukt(fields: Vec<FieldDecl>) -> StructDecl {
        StructDecl {
            name: "T".to_owned(),
            fields,
            span: Span::new(0, 0),
            pos: LineCol { line: 1, column: 1 },
        }
    }

    fn names(entries: &[FieldEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn small_before_large_needs_reordering() {
        // flag bool, id int64, name string
        let st = strukt(vec![
            field(&["flag"], TypeExpr::named("bool")),
            field(&["id"], TypeExpr::named("int64")),
            field(&["name"], TypeExpr::named("string")),
        ]);
        let analysis = analyze(&st).unwrap();
        assert!(analysis.needs_reordering);
        assert_eq!(names(&analysis.suggested), vec!["name", "id", "flag"]);
        assert_eq!(
            analysis.suggested.iter().map(|e| e.size).collect::<Vec<_>>(),
            vec![16, 8, 1]
        );
    }

    #[test]
    fn equal_sizes_in_name_order_are_optimal() {
        let st = strukt(vec![
            field(&["a"], TypeExpr::named("int64")),
            field(&["b"], TypeExpr::named("int64")),
        ]);
        let analysis = analyze(&st).unwrap();
        assert!(!analysis.needs_reordering);
    }

    #[test]
    fn equal_sizes_out_of_name_order_need_reordering() {
        let st = strukt(vec![
            field(&["b"], TypeExpr::named("int64")),
            field(&["a"], TypeExpr::named("int64")),
        ]);
        assert!(analyze(&st).unwrap().needs_reordering);
    }

    #[test]
    fn single_field_struct_is_skipped() {
        let st = strukt(vec![field(&["x"], TypeExpr::named("int32"))]);
        assert!(analyze(&st).is_none());
    }

    #[test]
    fn shared_declaration_sorts_after_larger_field() {
        // x, y int32; z int64
        let st = strukt(vec![
            field(&["x", "y"], TypeExpr::named("int32")),
            field(&["z"], TypeExpr::named("int64")),
        ]);
        let analysis = analyze(&st).unwrap();
        assert!(analysis.needs_reordering);
        assert_eq!(names(&analysis.suggested), vec!["z", "x", "y"]);
    }

    #[test]
    fn embedded_name_sorts_before_named_on_ties() {
        // *Conn (embedded, 8), id int64 (8): already optimal
        let st = strukt(vec![
            field(
                &[],
                TypeExpr::Pointer {
                    elem: Box::new(TypeExpr::named("Conn")),
                },
            ),
            field(&["id"], TypeExpr::named("int64")),
        ]);
        let analysis = analyze(&st).unwrap();
        assert!(!analysis.needs_reordering);
        assert_eq!(names(&analysis.suggested), vec!["", "id"]);
    }

    #[test]
    fn identical_entries_keep_relative_order() {
        // two embedded pointers: identical (size, name) pairs
        let st = strukt(vec![
            field(
                &[],
                TypeExpr::Pointer {
                    elem: Box::new(TypeExpr::named("A")),
                },
            ),
            field(
                &[],
                TypeExpr::Pointer {
                    elem: Box::new(TypeExpr::named("B")),
                },
            ),
        ]);
        let analysis = analyze(&st).unwrap();
        assert!(!analysis.needs_reordering);
        assert_eq!(
            analysis.suggested.iter().map(|e| e.decl).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn verdict_is_structural_only() {
        // metadata differences never affect the verdict
        let mut tagged = field(&["a"], TypeExpr::named("int64"));
        tagged.tag = Some("`json:\"a\"`".to_owned());
        tagged.doc = vec!["// first".to_owned()];
        let st = strukt(vec![tagged, field(&["b"], TypeExpr::named("int64"))]);
        assert!(!analyze(&st).unwrap().needs_reordering);
    }
}

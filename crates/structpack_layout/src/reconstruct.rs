//! Rebuilding the declaration list in a suggested order.

use structpack_ast::{FieldDecl, StructDecl};

use crate::flatten::FieldEntry;

/// Rebuild the field declarations of `decl` in the order given by
/// `suggested`, preserving each declaration's documentation, tag, and
/// trailing comment.
///
/// A declaration that bound exactly one name (or was embedded) is emitted as
/// an unchanged copy. A declaration that bound several names is split into
/// one single-name declaration per entry, each carrying the shared type and
/// the original metadata. The whole group is emitted contiguously at
/// the position of its first entry in the suggested order. Because of that
/// anchoring, a second analysis pass over the split result may occasionally
/// still find a tighter interleaving with equal-sized neighbours.
pub fn reconstruct(decl: &StructDecl, suggested: &[FieldEntry]) -> Vec<FieldDecl> {
    let mut groups: Vec<Vec<&FieldEntry>> = vec![Vec::new(); decl.fields.len()];
    for entry in suggested {
        groups[entry.decl].push(entry);
    }

    let mut emitted = vec![false; decl.fields.len()];
    let mut fields = Vec::with_capacity(decl.fields.len());

    for entry in suggested {
        if emitted[entry.decl] {
            continue;
        }
        emitted[entry.decl] = true;

        let original = &decl.fields[entry.decl];
        let group = &groups[entry.decl];
        if group.len() == 1 {
            fields.push(original.clone());
        } else {
            for part in group {
                fields.push(FieldDecl {
                    names: if part.name.is_empty() {
                        Vec::new()
                    } else {
                        vec![part.name.clone()]
                    },
                    ty: original.ty.clone(),
                    ty_src: original.ty_src.clone(),
                    doc: original.doc.clone(),
                    tag: original.tag.clone(),
                    comment: original.comment.clone(),
                });
            }
        }
    }

    fields
}

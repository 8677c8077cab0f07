//! Lint-mode report rendering.

use std::fmt::Write as _;
use std::path::Path;

use colored::Colorize;
use structpack_ast::StructDecl;
use structpack_fmt::{format_type, render_type_decl};
use structpack_layout::{Analysis, FieldEntry, reconstruct};

/// Append the report for one suboptimal struct: location, current and
/// suggested field lists with sizes, and the fully reordered declaration.
pub fn render_lint(out: &mut String, path: &Path, decl: &StructDecl, analysis: &Analysis) {
    let _ = writeln!(
        out,
        "\n{}: struct '{}' fields can be reordered for better memory efficiency",
        format!("{}:{}", path.display(), decl.pos).bold(),
        decl.name.as_str().yellow(),
    );

    let _ = writeln!(out, "Current order:");
    render_entries(out, decl, &analysis.current);
    let _ = writeln!(out, "Suggested order:");
    render_entries(out, decl, &analysis.suggested);

    let fields = reconstruct(decl, &analysis.suggested);
    let _ = writeln!(out, "\nReordered struct:");
    let _ = writeln!(out, "{}", render_type_decl(&decl.name, &fields));
}

fn render_entries(out: &mut String, decl: &StructDecl, entries: &[FieldEntry]) {
    for entry in entries {
        let ty = format_type(&decl.fields[entry.decl].ty);
        if entry.name.is_empty() {
            let _ = writeln!(out, "  {ty} (embedded, size: {} bytes)", entry.size);
        } else {
            let _ = writeln!(out, "  {} {ty} (size: {} bytes)", entry.name, entry.size);
        }
    }
}

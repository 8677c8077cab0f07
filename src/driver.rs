//! Per-file orchestration: collect files, analyze structs, report or fix.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::debug;

use structpack_fmt::render_struct_body;
use structpack_layout::{analyze, reconstruct};
use structpack_parser::parse_structs;
use structpack_span::Span;

use crate::cli::Cli;
use crate::report;

pub struct Summary {
    pub had_issues: bool,
}

/// Run lint or fix mode over the target path.
///
/// Files are processed in parallel; a failure in one file never aborts the
/// others. The summary flag is the OR over all per-file outcomes, and output
/// is printed in collection order regardless of completion order.
pub fn run(cli: &Cli) -> Result<Summary> {
    let target = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let files = collect_go_files(&target)?;
    debug!(files = files.len(), fix = cli.fix, "collected Go files");

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| process_file(path, cli.fix))
        .collect();

    let mut had_issues = false;
    for outcome in &outcomes {
        print!("{}", outcome.output);
        had_issues |= outcome.had_issues;
    }
    Ok(Summary { had_issues })
}

struct FileOutcome {
    output: String,
    had_issues: bool,
}

fn process_file(path: &Path, fix: bool) -> FileOutcome {
    let result = if fix { fix_file(path) } else { lint_file(path) };
    result.unwrap_or_else(|err| FileOutcome {
        output: format!("{} {err:#}\n", "error:".red().bold()),
        had_issues: true,
    })
}

fn lint_file(path: &Path) -> Result<FileOutcome> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let structs = parse_structs(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut output = String::new();
    let mut had_issues = false;
    for decl in &structs {
        let Some(analysis) = analyze(decl) else {
            continue;
        };
        if !analysis.needs_reordering {
            continue;
        }
        had_issues = true;
        report::render_lint(&mut output, path, decl, &analysis);
    }

    if !had_issues {
        output = format!("{} {}\n", "✔".green(), path.display());
    }
    Ok(FileOutcome { output, had_issues })
}

fn fix_file(path: &Path) -> Result<FileOutcome> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let structs = parse_structs(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut output = String::new();
    let mut edits: Vec<(Span, String)> = Vec::new();
    for decl in &structs {
        let Some(analysis) = analyze(decl) else {
            continue;
        };
        if !analysis.needs_reordering {
            continue;
        }
        let fields = reconstruct(decl, &analysis.suggested);
        let indent = line_indent(&source, decl.span.start);
        edits.push((decl.span, render_struct_body(&fields, indent)));
        output.push_str(&format!(
            "Fixed struct '{}' at {}:{}\n",
            decl.name.as_str().yellow(),
            path.display(),
            decl.pos,
        ));
    }

    if edits.is_empty() {
        return Ok(FileOutcome {
            output: format!("{} {}\n", "✔".green(), path.display()),
            had_issues: false,
        });
    }

    // splice back-to-front so earlier spans stay valid; the file is
    // rewritten in one shot or not at all
    let mut fixed = source;
    for (span, text) in edits.iter().rev() {
        fixed.replace_range(span.start..span.end, text);
    }
    fs::write(path, fixed).with_context(|| format!("failed to write {}", path.display()))?;

    output.push_str(&format!(
        "{} {}\n",
        "Successfully fixed".green(),
        path.display()
    ));
    Ok(FileOutcome {
        output,
        had_issues: false,
    })
}

/// Leading whitespace of the line containing `offset`.
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..];
    let indent_len = line
        .bytes()
        .take_while(|&b| b == b' ' || b == b'\t')
        .count();
    &line[..indent_len]
}

/// Collect the Go files to analyze: the file itself, or every `*.go` under
/// the directory except tests, hidden entries, `vendor/` and `testdata/`.
fn collect_go_files(target: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(target)
        .with_context(|| format!("invalid path {}", target.display()))?;
    if metadata.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    let walk = WalkBuilder::new(target)
        .standard_filters(false)
        .hidden(true)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && matches!(entry.file_name().to_str(), Some("vendor" | "testdata")))
        })
        .build();

    for entry in walk {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(".go") && !name.ends_with("_test.go") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli(fix: bool, path: &Path) -> Cli {
        Cli {
            fix,
            path: Some(path.to_path_buf()),
        }
    }

    #[test]
    fn lint_flags_suboptimal_struct_and_fix_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.go");
        fs::write(
            &file,
            "package main\n\n// User holds a user.\ntype User struct {\n\t// set at startup\n\tflag bool `json:\"flag\"` // rarely used\n\tid   int64\n\tname string\n}\n",
        )
        .unwrap();

        let summary = run(&cli(false, &file)).unwrap();
        assert!(summary.had_issues);

        let summary = run(&cli(true, &file)).unwrap();
        assert!(!summary.had_issues);

        let fixed = fs::read_to_string(&file).unwrap();
        assert_eq!(
            fixed,
            "package main\n\n// User holds a user.\ntype User struct {\n\tname string\n\tid   int64\n\t// set at startup\n\tflag bool `json:\"flag\"` // rarely used\n}\n"
        );

        let summary = run(&cli(false, &file)).unwrap();
        assert!(!summary.had_issues);
    }

    #[test]
    fn clean_file_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ok.go");
        let content =
            "package p\n\ntype Ordered struct {\n\tname string\n\tid   int64\n\tok   bool\n}\n";
        fs::write(&file, content).unwrap();

        let summary = run(&cli(true, &file)).unwrap();
        assert!(!summary.had_issues);
        assert_eq!(fs::read_to_string(&file).unwrap(), content);
    }

    #[test]
    fn grouped_declaration_keeps_its_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("group.go");
        fs::write(
            &file,
            "package p\n\ntype (\n\tA struct {\n\t\tb int64\n\t\ta int64\n\t}\n)\n",
        )
        .unwrap();

        run(&cli(true, &file)).unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "package p\n\ntype (\n\tA struct {\n\t\ta int64\n\t\tb int64\n\t}\n)\n"
        );
    }

    #[test]
    fn parse_failure_counts_as_issue_and_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.go");
        let content = "package p\n\nvar s = \"unterminated\n";
        fs::write(&file, content).unwrap();

        let summary = run(&cli(true, &file)).unwrap();
        assert!(summary.had_issues);
        assert_eq!(fs::read_to_string(&file).unwrap(), content);
    }

    #[test]
    fn walk_skips_vendor_testdata_and_test_files() {
        let dir = tempfile::tempdir().unwrap();
        let bad = "package p\n\ntype T struct {\n\ta bool\n\tb int64\n}\n";
        fs::create_dir_all(dir.path().join("vendor/dep")).unwrap();
        fs::create_dir_all(dir.path().join("testdata")).unwrap();
        fs::write(dir.path().join("vendor/dep/x.go"), bad).unwrap();
        fs::write(dir.path().join("testdata/y.go"), bad).unwrap();
        fs::write(dir.path().join("z_test.go"), bad).unwrap();
        fs::write(
            dir.path().join("fine.go"),
            "package p\n\ntype OK struct {\n\tb int64\n\tc int64\n}\n",
        )
        .unwrap();

        let summary = run(&cli(false, dir.path())).unwrap();
        assert!(!summary.had_issues);
    }

    #[test]
    fn multi_name_declaration_is_split_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("split.go");
        fs::write(
            &file,
            "package p\n\ntype Point struct {\n\tx, y int32\n\tz    int64\n}\n",
        )
        .unwrap();

        run(&cli(true, &file)).unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "package p\n\ntype Point struct {\n\tz int64\n\tx int32\n\ty int32\n}\n"
        );
    }
}

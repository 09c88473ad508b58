//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code
//! - No blocking I/O inside async functions
//! - The controller stays free of terminal dependencies
//!
//! The library half holds the source scanner the tests share: it walks the
//! production source trees and tells, line by line, what kind of function
//! the line sits in.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source trees, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["controller/core/src", "tui/src"];

/// Workspace root, independent of the directory tests run from
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A scanned source file
#[derive(Debug)]
pub struct SourceFile {
    /// Path relative to the workspace root
    pub path: PathBuf,
    /// Raw lines
    pub lines: Vec<String>,
    /// Context of each line
    pub contexts: Vec<FnContext>,
}

impl SourceFile {
    /// Scan source text
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        let contexts = function_contexts(&lines);
        Self {
            path: path.into(),
            lines,
            contexts,
        }
    }

    /// Code lines with their 1-based number and context, comments stripped
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str, FnContext)> {
        self.lines
            .iter()
            .zip(self.contexts.iter().copied())
            .enumerate()
            .map(|(idx, (line, ctx))| (idx + 1, strip_comment(line), ctx))
    }

    /// Format a violation at `line_number`
    pub fn violation(&self, line_number: usize, what: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            line_number,
            what,
            self.lines[line_number - 1].trim()
        )
    }
}

/// Every `.rs` file under the production source trees
pub fn production_sources() -> Vec<SourceFile> {
    let root = workspace_root();
    let mut files = Vec::new();

    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        assert!(path.exists(), "missing source tree: {}", path.display());

        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
                continue;
            }
            let Ok(content) = fs::read_to_string(entry.path()) else {
                continue;
            };
            let relative = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(SourceFile::parse(relative, &content));
        }
    }

    files
}

/// What kind of code a line belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnContext {
    /// Outside any function body
    Module,
    /// Inside a plain `fn`
    Sync,
    /// Inside an `async fn`
    Async,
    /// Inside a test function or a `#[cfg(test)]` module
    Test,
}

/// Remove a trailing `//` comment
pub fn strip_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Blank out string and brace char literals so their braces do not count
fn strip_literals(code: &str) -> String {
    let code = code.replace("'{'", "   ").replace("'}'", "   ");
    let mut out = String::with_capacity(code.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in code.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
                out.push('"');
                continue;
            }
            out.push(' ');
        } else {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
        }
    }
    out
}

/// Function kind declared on this line, if any
fn declared_fn(code: &str) -> Option<FnContext> {
    let trimmed = code.trim_start();
    if !(trimmed.starts_with("fn ") || code.contains(" fn ")) {
        return None;
    }
    if code.contains("async fn ") {
        Some(FnContext::Async)
    } else {
        Some(FnContext::Sync)
    }
}

fn is_test_marker(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.starts_with("#[test]")
        || trimmed.starts_with("#[tokio::test")
        || trimmed.starts_with("#[cfg(test)]")
}

/// Context of every line, tracking function bodies by brace depth
pub fn function_contexts<S: AsRef<str>>(lines: &[S]) -> Vec<FnContext> {
    // (context, depth the body opened at)
    let mut stack: Vec<(FnContext, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut test_marker = false;
    let mut pending: Option<FnContext> = None;
    let mut contexts = Vec::with_capacity(lines.len());

    for line in lines {
        let code = strip_literals(strip_comment(line.as_ref()));
        let enclosing = stack.last().map(|(ctx, _)| *ctx);

        if is_test_marker(&code) {
            test_marker = true;
        } else if let Some(kind) = declared_fn(&code) {
            pending = Some(if test_marker || enclosing == Some(FnContext::Test) {
                FnContext::Test
            } else {
                kind
            });
            test_marker = false;
        } else if code.trim_start().starts_with("mod ") && test_marker {
            pending = Some(FnContext::Test);
            test_marker = false;
        }

        contexts.push(pending.or(enclosing).unwrap_or(FnContext::Module));

        let mut opened = false;
        for ch in code.chars() {
            match ch {
                '{' => {
                    if let Some(kind) = pending.take() {
                        stack.push((kind, depth));
                    }
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    if stack.last().is_some_and(|(_, d)| *d == depth) {
                        stack.pop();
                    }
                }
                _ => {}
            }
        }

        // Bodiless declarations (trait methods, `mod foo;`)
        if !opened && code.trim_end().ends_with(';') {
            pending = None;
        }
    }

    contexts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_function_detection() {
        let code = [
            "async fn bad_function() {",
            "    let contents = std::fs::read_to_string(\"file.txt\")?;",
            "}",
        ];
        assert_eq!(function_contexts(&code)[1], FnContext::Async);
    }

    #[test]
    fn test_sync_function_after_async_one() {
        let code = [
            "async fn first() {",
            "    work().await;",
            "}",
            "",
            "fn init() {",
            "    let f = std::fs::OpenOptions::new();",
            "}",
            "const X: u8 = 1;",
        ];
        let contexts = function_contexts(&code);
        assert_eq!(contexts[1], FnContext::Async);
        assert_eq!(contexts[5], FnContext::Sync);
        assert_eq!(contexts[7], FnContext::Module);
    }

    #[test]
    fn test_test_module_detection() {
        let code = [
            "#[cfg(test)]",
            "mod tests {",
            "    use super::*;",
            "    async fn helper() {",
            "        tokio::time::sleep(d).await;",
            "    }",
            "}",
            "fn after() {}",
        ];
        let contexts = function_contexts(&code);
        assert_eq!(contexts[2], FnContext::Test);
        assert_eq!(contexts[4], FnContext::Test);
        assert_eq!(contexts[7], FnContext::Sync);
    }

    #[test]
    fn test_braces_in_strings_are_ignored() {
        let code = [
            "fn filter(level: &str) -> String {",
            "    format!(\"a={level}}}\")",
            "}",
            "async fn next() {",
            "    x();",
            "}",
        ];
        let contexts = function_contexts(&code);
        assert_eq!(contexts[1], FnContext::Sync);
        assert_eq!(contexts[4], FnContext::Async);
    }

    #[test]
    fn test_trait_declarations_have_no_body() {
        let code = [
            "pub trait Service {",
            "    async fn check(&self) -> bool;",
            "    fn name(&self) -> &str;",
            "}",
            "static S: &str = \"x\";",
        ];
        let contexts = function_contexts(&code);
        assert_eq!(contexts[3], FnContext::Module);
        assert_eq!(contexts[4], FnContext::Module);
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}

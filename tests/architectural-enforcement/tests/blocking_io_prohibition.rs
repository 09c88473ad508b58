//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async production code in the TUI and the controller MUST NOT use blocking I/O.
//! **Required**: Use `tokio::fs`, `tokio::net`, `tokio::process`, not `std::fs`, `std::net`, `std::process`
//!
//! A keypad that freezes while a preference file is written is a broken keypad.

use architectural_enforcement::{production_sources, FnContext, SourceFile};

/// Test that production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_production_code() {
    let violations: Vec<String> = production_sources()
        .iter()
        .flat_map(blocking_io_violations)
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O calls found in production code!\n");

        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n❌ FORBIDDEN blocking I/O:");
        eprintln!("  - std::fs::read(), std::fs::write(), std::fs::File");
        eprintln!("  - std::net::TcpStream, std::net::TcpListener");
        eprintln!("  - std::process::Command::output()");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("\n✅ REQUIRED async I/O:");
        eprintln!("  - tokio::fs::read().await, tokio::fs::write().await");
        eprintln!("  - reqwest::Client::get().send().await");
        eprintln!("\n✅ ACCEPTABLE blocking I/O:");
        eprintln!("  - Non-async functions (log file setup before the UI starts)");
        eprintln!("  - Test code");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find blocking I/O calls in one file
fn blocking_io_violations(file: &SourceFile) -> Vec<String> {
    let mut violations = Vec::new();

    for (line_number, code, ctx) in file.code_lines() {
        match ctx {
            // Tests and plain functions may block
            FnContext::Test | FnContext::Sync => continue,
            FnContext::Module | FnContext::Async => {}
        }

        if code.contains("std::fs::") || code.contains("use std::fs") {
            violations.push(file.violation(line_number, "Blocking file I/O"));
        }

        if code.contains("std::net::") || code.contains("use std::net") {
            violations.push(file.violation(line_number, "Blocking network I/O"));
        }

        if code.contains("std::process::Command") {
            violations.push(file.violation(line_number, "Blocking process I/O"));
        }

        if code.contains("reqwest::blocking") {
            violations.push(file.violation(line_number, "Blocking HTTP client"));
        }

        if ctx == FnContext::Async
            && (code.contains("std::io::stdin()") || code.contains("std::io::stdout()"))
        {
            violations.push(file.violation(line_number, "Blocking stdin/stdout in async"));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_io_detection() {
        let file = SourceFile::parse(
            "bad.rs",
            "async fn bad_function() {\n    let contents = std::fs::read_to_string(\"file.txt\")?;\n}\n",
        );
        assert_eq!(blocking_io_violations(&file).len(), 1);
    }

    #[test]
    fn test_non_async_function_is_acceptable() {
        let file = SourceFile::parse(
            "main.rs",
            "fn init_logging() {\n    let file = std::fs::OpenOptions::new();\n}\n",
        );
        assert!(blocking_io_violations(&file).is_empty());
    }

    #[test]
    fn test_test_function_is_acceptable() {
        let file = SourceFile::parse(
            "lib.rs",
            "#[tokio::test]\nasync fn test_something() {\n    let c = std::fs::read_to_string(\"t\");\n}\n",
        );
        assert!(blocking_io_violations(&file).is_empty());
    }
}

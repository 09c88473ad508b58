//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code in the TUI and the controller MUST NOT call sleep methods.
//! **Exceptions**: Frame rate limiting (TUI app loop only), test code
//!
//! Service responses arrive on channels; nothing needs to be polled on a timer
//! except the frame tick, which uses `tokio::time::interval`.

use architectural_enforcement::{production_sources, FnContext, SourceFile};

struct SleepPolicy {
    allow_frame_limiting: bool,
    allow_tests: bool,
}

impl SleepPolicy {
    fn for_file(file: &SourceFile) -> Self {
        Self {
            allow_frame_limiting: file.path.starts_with("tui"),
            allow_tests: true,
        }
    }
}

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations: Vec<String> = production_sources()
        .iter()
        .flat_map(|file| sleep_violations(file, &SleepPolicy::for_file(file)))
        .collect();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame rate limiting in the TUI app loop");
        eprintln!("  - Test code (#[test] or #[tokio::test] functions)");
        eprintln!("  - Periodic tasks using tokio::time::interval()");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - Sleep in polling loops");
        eprintln!("  - Sleep to 'wait' for a service response (await the channel!)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find sleep calls in one file
fn sleep_violations(file: &SourceFile, policy: &SleepPolicy) -> Vec<String> {
    let lines: Vec<&str> = file.lines.iter().map(String::as_str).collect();
    let mut violations = Vec::new();

    for (line_number, code, ctx) in file.code_lines() {
        if !(code.contains("::sleep(") || code.contains(".sleep(")) {
            continue;
        }
        let idx = line_number - 1;

        if policy.allow_tests && ctx == FnContext::Test {
            continue;
        }

        if policy.allow_frame_limiting
            && file.path.ends_with("app.rs")
            && is_frame_limiting_context(&lines, idx)
        {
            continue;
        }

        if is_interval_pattern(&lines, idx) {
            continue;
        }

        violations.push(file.violation(line_number, "Sleep call"));
    }

    violations
}

/// Check if sleep is used for frame rate limiting (acceptable in the TUI loop)
fn is_frame_limiting_context(lines: &[&str], current_idx: usize) -> bool {
    let context_range = current_idx.saturating_sub(10)..std::cmp::min(current_idx + 5, lines.len());

    lines[context_range].iter().any(|line| {
        let line = line.to_lowercase();
        line.contains("frame") || line.contains("fps") || line.contains("tick_rate")
    })
}

/// Check if this sits next to a tokio::time::interval (acceptable for periodic tasks)
fn is_interval_pattern(lines: &[&str], current_idx: usize) -> bool {
    let before = current_idx.saturating_sub(20)..current_idx;
    let after = current_idx..std::cmp::min(current_idx + 5, lines.len());

    lines[before]
        .iter()
        .any(|line| line.contains(".tick()") || line.contains("tokio::time::interval"))
        || lines[after].iter().any(|line| line.contains(".tick()"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRICT: SleepPolicy = SleepPolicy {
        allow_frame_limiting: false,
        allow_tests: false,
    };

    #[test]
    fn test_sleep_violation_detection() {
        let file = SourceFile::parse(
            "controller/core/src/calculator.rs",
            "async fn wait() {\n    tokio::time::sleep(Duration::from_millis(10)).await;\n}\n",
        );
        assert_eq!(sleep_violations(&file, &STRICT).len(), 1);
    }

    #[test]
    fn test_sleep_in_test_code_is_acceptable() {
        let file = SourceFile::parse(
            "controller/core/src/calculator.rs",
            "#[tokio::test]\nasync fn test_wait() {\n    tokio::time::sleep(d).await;\n}\n",
        );
        let policy = SleepPolicy {
            allow_frame_limiting: false,
            allow_tests: true,
        };
        assert!(sleep_violations(&file, &policy).is_empty());
        assert_eq!(sleep_violations(&file, &STRICT).len(), 1);
    }

    #[test]
    fn test_frame_limiting_detection() {
        let code = [
            "fn render_loop() {",
            "    let frame_duration = Duration::from_millis(33);",
            "    loop {",
            "        render();",
            "        tokio::time::sleep(frame_duration).await;",
            "    }",
            "}",
        ];
        assert!(is_frame_limiting_context(&code, 4));
        assert!(!is_interval_pattern(&code, 4));
    }
}

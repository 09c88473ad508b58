//! Integration Test: Controller Layering
//!
//! **Policy**: `calc-controller` is headless. It MUST NOT depend on terminal
//! crates, so another surface can embed it without pulling in a TUI.

use std::fs;

use architectural_enforcement::{production_sources, workspace_root};

const TERMINAL_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_controller_manifest_has_no_terminal_crates() {
    let manifest = fs::read_to_string(workspace_root().join("controller/core/Cargo.toml"))
        .expect("controller manifest");

    for line in manifest.lines() {
        let name = line.split('=').next().unwrap_or("").trim();
        assert!(
            !TERMINAL_CRATES.contains(&name),
            "calc-controller depends on terminal crate `{name}`"
        );
    }
}

#[test]
fn test_controller_sources_do_not_use_terminal_crates() {
    let violations: Vec<String> = production_sources()
        .iter()
        .filter(|file| file.path.starts_with("controller"))
        .flat_map(|file| {
            file.code_lines()
                .filter(|(_, code, _)| {
                    TERMINAL_CRATES
                        .iter()
                        .any(|krate| code.contains(&format!("{krate}::")))
                })
                .map(|(line_number, _, _)| file.violation(line_number, "Terminal crate"))
                .collect::<Vec<_>>()
        })
        .collect();

    assert!(violations.is_empty(), "{violations:#?}");
}

#[test]
fn test_tui_reaches_controller_through_public_api() {
    // The TUI may only name items the controller re-exports or its public modules
    let violations: Vec<String> = production_sources()
        .iter()
        .filter(|file| file.path.starts_with("tui"))
        .flat_map(|file| {
            file.code_lines()
                .filter(|(_, code, _)| code.contains("calc_controller::calculator::"))
                .map(|(line_number, _, _)| {
                    file.violation(line_number, "Reach into calculator internals")
                })
                .collect::<Vec<_>>()
        })
        .collect();

    assert!(violations.is_empty(), "{violations:#?}");
}

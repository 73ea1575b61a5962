//! Structural rules for the client core

use std::fs;
use std::io::Write;

use architectural_enforcement::{find_violations, rust_sources, workspace_root};

#[test]
fn test_core_sources_are_found() {
    let core = workspace_root().join("client/core/src");
    let sources = rust_sources(&core);
    assert!(
        sources.iter().any(|p| p.ends_with("coordinator.rs")),
        "expected to find the coordinator under {core:?}"
    );
}

#[test]
fn test_core_never_prints() {
    let core = workspace_root().join("client/core/src");
    let violations = find_violations(&core, &["println!", "eprintln!", "print!(", "dbg!("]);
    assert!(
        violations.is_empty(),
        "core must render through ClientMessage only: {violations:#?}"
    );
}

#[test]
fn test_no_blocking_sleep() {
    let client = workspace_root().join("client");
    let violations = find_violations(&client, &["thread::sleep"]);
    assert!(violations.is_empty(), "blocking sleep found: {violations:#?}");
}

#[test]
fn test_comment_lines_are_ignored() {
    let dir = std::env::temp_dir().join(format!("arch-enforcement-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let mut file = fs::File::create(dir.join("sample.rs")).unwrap();
    writeln!(file, "// println!(\"fine\");").unwrap();
    writeln!(file, "fn main() {{ println!(\"not fine\"); }}").unwrap();
    drop(file);

    let violations = find_violations(&dir, &["println!"]);
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 2);
}

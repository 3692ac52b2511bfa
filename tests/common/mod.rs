//! Shared test helpers for pirepe integration tests.
//!
//! All tests use temp directories — no side effects on the real working
//! directory. Each test gets its own sandbox via `sandbox()`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Create a fresh sandbox directory for one test.
pub fn sandbox() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Run pirepe with the given args in the given directory.
pub fn pirepe_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pirepe"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to execute pirepe")
}

/// Run pirepe and assert it succeeds. Returns stdout as string.
pub fn pirepe_ok(dir: &Path, args: &[&str]) -> String {
    let out = pirepe_in(dir, args);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "pirepe {} failed:\nstdout: {stdout}\nstderr: {stderr}",
        args.join(" "),
    );
    stdout.to_string()
}

/// Run pirepe and assert it fails. Returns stderr as string.
pub fn pirepe_fails(dir: &Path, args: &[&str]) -> String {
    let out = pirepe_in(dir, args);
    assert!(
        !out.status.success(),
        "Expected pirepe {} to fail, but it succeeded.\nstdout: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
    );
    String::from_utf8_lossy(&out.stderr).to_string()
}

/// Write a bundle file into the sandbox and return its name.
pub fn write_bundle(dir: &Path, name: &str, json: &str) -> String {
    std::fs::write(dir.join(name), json).expect("failed to write bundle file");
    name.to_owned()
}

/// A small two-collection bundle used across tests.
pub fn sample_bundle() -> &'static str {
    r#"{
        "patterns": [
            {"slug": "hero", "title": "Hero", "content": "<!-- wp:group -->old<!-- /wp:group -->"},
            {"slug": "cta", "title": "Call to action", "categories": ["call-to-action"], "content": "<!-- wp:buttons /-->"}
        ],
        "templateParts": [
            {"slug": "footer", "title": "Footer", "area": "footer", "content": "<!-- wp:group /-->"}
        ]
    }"#
}

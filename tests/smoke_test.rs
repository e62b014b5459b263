/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

#[test]
fn binary_shows_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("tiletrail"),
        "Help output should mention tiletrail"
    );
}

#[test]
fn binary_shows_version() {
    let output = Command::new("cargo")
        .args(["run", "--", "--version"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn config_prints_trail_section() {
    let path = std::env::temp_dir().join(format!("tiletrail-smoke-{}.toml", std::process::id()));
    std::fs::write(&path, "[trail]\ncell_height = 20\n").expect("Failed to write config");

    let output = Command::new("cargo")
        .args(["run", "--", "--config"])
        .arg(&path)
        .args(["config", "--gap", "3"])
        .output()
        .expect("Failed to execute cargo run");
    std::fs::remove_file(&path).ok();

    assert!(
        output.status.success(),
        "config subcommand failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[trail]"));
    assert!(stdout.contains("gap = 3"));
    assert!(stdout.contains("cell_width = 50"));
    assert!(stdout.contains("cell_height = 20"));
}

#[test]
fn missing_config_file_is_reported() {
    let output = Command::new("cargo")
        .args(["run", "--", "--config", "/nonexistent/tiletrail.toml", "config"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        !output.status.success(),
        "A config path that does not exist should be an error"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/tiletrail.toml"));
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn invalid_config_value_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "config", "--tick", "0"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        !output.status.success(),
        "Zero tick interval should be rejected"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid config should not cause panic"
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "nonexistent-command"])
        .output()
        .expect("Failed to execute cargo run");

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Should show helpful error, not a panic backtrace
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

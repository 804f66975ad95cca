use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "pacmaze"])
        .status()
        .expect("failed to invoke cargo check for pacmaze CLI binary");

    assert!(status.success(), "cargo check --bin pacmaze should succeed");
}

#[test]
fn headless_run_prints_a_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_pacmaze"))
        .args(["--headless", "--ticks", "120", "--seed", "7", "--mode", "versus"])
        .output()
        .expect("failed to run pacmaze");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("round in progress after 120 ticks"),
        "unexpected summary: {stdout}"
    );
}

#[test]
fn invalid_adversary_count_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_pacmaze"))
        .args(["--headless", "--adversaries", "9"])
        .output()
        .expect("failed to run pacmaze");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("adversary count 9"), "unexpected error: {stderr}");
}

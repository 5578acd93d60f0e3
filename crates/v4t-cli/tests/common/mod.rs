use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Session file inside an isolated test directory.
pub fn session_file(dir: &Path) -> PathBuf {
    dir.join("v4t").join("v4tsession")
}

/// Run the CLI binary against an isolated session file.
pub fn run_cli(args: &[&str], session: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_v4t"));
    cmd.args(args);
    cmd.env("V4T_SESSION_FILE", session);
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
    cmd.env_remove("V4T_SERVER");
    cmd.env_remove("V4T_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], session: &Path) -> String {
    let output = run_cli(args, session);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure.
pub fn run_cli_failure(args: &[&str], session: &Path) -> String {
    let output = run_cli(args, session);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write a remembered session pointing at `server`.
pub fn write_session(session: &Path, server: &str) {
    std::fs::create_dir_all(session.parent().unwrap()).unwrap();
    std::fs::write(session, format!("jwt-1\nxsrf-1\n{}\ntrue", server)).unwrap();
}

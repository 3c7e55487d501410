//! Process execution module
//!
//! Every external tool (cmake, doxygen, the compiled test binary) is
//! launched through here. Configuration reaches the child through an
//! explicit per-invocation environment list, never by mutating the
//! driver's own environment.

use crate::utils::log::{log, LogLevel};
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(target_os = "windows")]
static SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(target_os = "windows"))]
static SHELL: (&str, &str) = ("sh", "-c");

/// Runs a shell command line synchronously with inherited stdio.
/// # Arguments
/// * `cmd` - The command line to run
/// * `cwd` - Working directory for the child, current directory if None
/// * `envs` - Extra environment entries for the child process
///
/// Returns the child's exit code.
pub fn run_command(cmd: &str, cwd: Option<&Path>, envs: &[(String, String)]) -> i32 {
    log(LogLevel::Log, &format!("Running command: {}", cmd));
    let mut command = Command::new(SHELL.0);
    command.arg(SHELL.1).arg(cmd);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    command.envs(envs.iter().map(|(key, value)| (key, value)));
    command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    let status = match command.status() {
        Ok(status) => status,
        Err(why) => {
            log(LogLevel::Error, &format!("Could not launch '{}': {}", cmd, why));
            std::process::exit(1);
        }
    };
    // A child killed by a signal carries no code
    let code = status.code().unwrap_or(1);
    log(
        LogLevel::Info,
        &format!("Return code: {} (from launching '{}')", code, cmd),
    );
    code
}

/// Same as [`run_command`], but a non-zero child exit aborts the whole
/// driver with that exact code. Remaining actions are skipped.
pub fn run_checked(cmd: &str, cwd: Option<&Path>, envs: &[(String, String)]) {
    let code = run_command(cmd, cwd, envs);
    if code != 0 {
        log(
            LogLevel::Error,
            &format!("Command failed with code {}: {}", code, cmd),
        );
        std::process::exit(code);
    }
}

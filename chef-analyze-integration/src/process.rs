// Blocking subprocess execution with separately captured output streams.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, error};

/// Exit code reported when the process could not be launched at all.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = 999;

/// Exit code reported when the process ended without one (killed by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Per-call changes to the inherited environment and working directory.
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    pub env: Vec<(String, String)>,
    pub env_remove: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

/// Captured result of one process run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn launch_failed(&self) -> bool {
        self.exit_code == LAUNCH_FAILURE_EXIT_CODE
    }
}

/// Run `binary` to completion. Never fails: a launch error is folded into
/// [`LAUNCH_FAILURE_EXIT_CODE`] with the error text as stderr.
pub fn run<B, I, S>(binary: B, args: I, config: &ProcessConfig) -> Invocation
where
    B: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let binary = binary.as_ref();
    let mut command = Command::new(binary);
    command.args(args);
    for key in &config.env_remove {
        command.env_remove(key);
    }
    command.envs(config.env.iter().map(|(key, value)| (key, value)));
    if let Some(dir) = &config.working_directory {
        command.current_dir(dir);
    }

    debug!(binary = ?binary, "Running process");

    match command.output() {
        Ok(output) => {
            let exit_code = output.status.code().unwrap_or(NO_EXIT_CODE);
            debug!(binary = ?binary, exit_code, "Process exited");
            Invocation {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_code,
            }
        }
        Err(e) => {
            error!(binary = ?binary, error = %e, "Process failed to launch");
            Invocation {
                stdout: String::new(),
                stderr: format!("failed to execute {}: {}", binary.to_string_lossy(), e),
                exit_code: LAUNCH_FAILURE_EXIT_CODE,
            }
        }
    }
}

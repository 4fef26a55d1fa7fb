//! Blocking invocation of the external stage processors.
//!
//! Each processor is a script run through a shell with inherited standard
//! streams. The call waits for exit and hands back the exit code.

pub mod processors;

use serde::Serialize;
use shell_escape::escape;
use std::borrow::Cow;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::info;

use crate::error::{PipelineError, Result};

pub use processors::{bridge, gateway, tea};

/// A single external call: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Shell-escaped command line, for logs and dry runs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| escape(Cow::Borrowed(part)).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs an [`Invocation`] to completion and returns its exit code.
pub trait ProcessorRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Spawns the invocation as a child process with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ProcessorRunner for ShellRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        if which::which(&invocation.program).is_err() {
            return Err(PipelineError::ShellNotFound {
                shell: invocation.program.clone(),
            });
        }

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        info!(command = %invocation.command_line(), "Starting processor");
        let status = command.status().map_err(|source| PipelineError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let code = exit_code(status);
        info!(code, "Processor exited");
        Ok(code)
    }
}

/// Exit code of `status`; a signal-terminated child maps to 128 + signal.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

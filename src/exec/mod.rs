use std::time::Duration;

use thiserror::Error;

use crate::config::panel_config::CommandSpec;

pub mod runner;

fn human(duration: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*duration)
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecFailure {
    #[error("command not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("failed to start command")]
    Spawn,
    #[error("command timed out after {}", human(.0))]
    TimedOut(Duration),
    #[error("command exited with status {0}")]
    Exited(i32),
    #[error("command terminated by signal")]
    Killed,
}

/// What a command left behind. A failed spawn is reported here with code 1
/// rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub code: i32,
    pub stdout: String,
    pub message: String,
    pub failure: Option<ExecFailure>,
}

impl ExecOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        ExecOutput {
            code: 0,
            stdout: stdout.into(),
            message: String::new(),
            failure: None,
        }
    }

    pub fn failed(failure: ExecFailure, message: impl Into<String>) -> Self {
        let code = match failure {
            ExecFailure::Exited(code) => code,
            _ => 1,
        };
        ExecOutput {
            code,
            stdout: String::new(),
            message: message.into(),
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0 && self.failure.is_none()
    }

    /// True when the command succeeded but printed nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.stdout.trim().is_empty()
    }
}

pub trait CommandRunner {
    fn exec(&self, command: &CommandSpec) -> ExecOutput;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn exec(&self, command: &CommandSpec) -> ExecOutput {
        (**self).exec(command)
    }
}

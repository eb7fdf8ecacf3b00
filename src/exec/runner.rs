use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::panel_config::CommandSpec;
use crate::exec::{CommandRunner, ExecFailure, ExecOutput};

const WAIT_STEP: Duration = Duration::from_millis(20);

/// Runs commands on the host, killing any that outlive the timeout.
#[derive(Debug)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        SystemRunner { timeout }
    }

    fn wait_with_timeout(&self, child: &mut Child) -> io::Result<Option<ExitStatus>> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                child.kill()?;
                child.wait()?;
                return Ok(None);
            }
            std::thread::sleep(WAIT_STEP);
        }
    }
}

fn drain<R>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

fn spawn_failure(program: &str, err: io::Error) -> ExecOutput {
    let failure = match err.kind() {
        io::ErrorKind::NotFound => ExecFailure::NotFound,
        io::ErrorKind::PermissionDenied => ExecFailure::PermissionDenied,
        _ => ExecFailure::Spawn,
    };
    ExecOutput::failed(failure, format!("{program}: {err}"))
}

impl CommandRunner for SystemRunner {
    fn exec(&self, command: &CommandSpec) -> ExecOutput {
        debug!(command = %command.display(), "Running command");
        let started = Instant::now();

        let mut child = match Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => {
                warn!(command = %command.display(), ?err, "Failed to start command");
                return spawn_failure(&command.program, err);
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.wait_with_timeout(&mut child) {
            Ok(Some(status)) => status,
            // A descendant may still hold the pipes open; the drain threads
            // are left to finish on their own.
            Ok(None) => {
                let failure = ExecFailure::TimedOut(self.timeout);
                warn!(command = %command.display(), "Command timed out");
                return ExecOutput::failed(failure.clone(), failure.to_string());
            }
            Err(err) => {
                warn!(command = %command.display(), ?err, "Failed to wait for command");
                return ExecOutput::failed(ExecFailure::Spawn, format!("{}: {err}", command.program));
            }
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);
        debug!(command = %command.display(), elapsed = ?started.elapsed(), "Command finished");

        if status.success() {
            return ExecOutput::success(stdout);
        }

        let failure = status.code().map_or(ExecFailure::Killed, ExecFailure::Exited);
        let message = [stderr.trim(), stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| failure.to_string());
        ExecOutput {
            stdout,
            ..ExecOutput::failed(failure, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> SystemRunner {
        SystemRunner::new(Duration::from_secs(5))
    }

    #[test]
    fn test_captures_stdout() {
        let output = runner().exec(&CommandSpec::new("sh", &["-c", "echo '[]'"]));
        assert!(output.is_success());
        assert_eq!(output.stdout.trim(), "[]");
    }

    #[test]
    fn test_missing_program() {
        let output = runner().exec(&CommandSpec::new("/nonexistent/tailscale", &[]));
        assert_eq!(output.code, 1);
        assert_eq!(output.failure, Some(ExecFailure::NotFound));
        assert!(output.message.starts_with("/nonexistent/tailscale"));
    }

    #[test]
    fn test_non_zero_exit_keeps_stderr() {
        let output = runner().exec(&CommandSpec::new(
            "sh",
            &["-c", "echo 'Tailscale is stopped.' >&2; exit 1"],
        ));
        assert_eq!(output.code, 1);
        assert_eq!(output.failure, Some(ExecFailure::Exited(1)));
        assert_eq!(output.message, "Tailscale is stopped.");
    }

    #[test]
    fn test_non_zero_exit_without_output() {
        let output = runner().exec(&CommandSpec::new("sh", &["-c", "exit 4"]));
        assert_eq!(output.code, 4);
        assert_eq!(output.message, "command exited with status 4");
    }

    #[test]
    fn test_timeout_kills_command() {
        let runner = SystemRunner::new(Duration::from_millis(100));
        let started = Instant::now();
        let output = runner.exec(&CommandSpec::new("sleep", &["5"]));
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(
            output.failure,
            Some(ExecFailure::TimedOut(Duration::from_millis(100)))
        );
        assert_eq!(output.code, 1);
    }

    #[test]
    fn test_timeout_with_descendant_holding_pipes() {
        let runner = SystemRunner::new(Duration::from_millis(200));
        let started = Instant::now();
        let output = runner.exec(&CommandSpec::new("sh", &["-c", "sleep 4; echo late"]));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(
            output.failure,
            Some(ExecFailure::TimedOut(Duration::from_millis(200)))
        );
        assert!(output.stdout.is_empty());
    }
}

use std::io;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::services::tools::{Producer, Selector, ToolError};

/// Selector that runs a line filter such as `fzf` through `<shell> -c <command>`.
///
/// Candidates are written to the filter's stdin from a scoped background
/// thread while the calling thread collects stdout, so large candidate lists
/// cannot deadlock on a full pipe.
pub struct ShellSelector {
    shell: String,
    command: String,
}

impl ShellSelector {
    pub fn new(shell: impl Into<String>, command: impl Into<String>) -> Self {
        Self { shell: shell.into(), command: command.into() }
    }
}

impl Selector for ShellSelector {
    fn select(&self, candidates: Producer<'_>) -> Result<String, ToolError> {
        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ToolError::Spawn { program: self.shell.clone(), source })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ToolError::Io {
            program: self.command.clone(),
            source: io::Error::other("selector stdin was not captured"),
        })?;

        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let result = candidates(&mut stdin);
                // Dropping stdin closes the pipe and ends the selector's input.
                drop(stdin);
                result
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });

        match written {
            Ok(Ok(())) => {}
            // The selector may exit before reading everything.
            Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => debug!(error = %err, "writing candidates to selector failed"),
            Err(panic) => std::panic::resume_unwind(panic),
        }

        let output =
            output.map_err(|source| ToolError::Io { program: self.command.clone(), source })?;
        if !output.status.success() {
            return Err(ToolError::Failed {
                program: self.command.clone(),
                status: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

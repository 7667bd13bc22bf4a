use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::model::StorePath;
use crate::services::tools::{Realizer, ToolError};

/// Realiser that runs `nix-store --realise` with the caller's stdio.
pub struct NixStore {
    program: PathBuf,
    stdout_to_stderr: bool,
}

impl NixStore {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), stdout_to_stderr: false }
    }

    /// Send the tool's stdout to our stderr, keeping stdout free for a report.
    pub fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Realizer for NixStore {
    fn realize(&self, path: &StorePath) -> Result<(), ToolError> {
        let mut command = Command::new(&self.program);
        command.arg("--realise").arg(path.as_str());
        if self.stdout_to_stderr {
            command.stdout(Stdio::from(io::stderr()));
        }
        let status = command
            .status()
            .map_err(|source| ToolError::Spawn { program: self.program_name(), source })?;
        if !status.success() {
            return Err(ToolError::Failed {
                program: self.program_name(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::services::tools::{PackageIndex, ToolError};

/// Package index backed by `nix-locate` from nix-index.
pub struct NixLocate {
    program: PathBuf,
}

impl NixLocate {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl PackageIndex for NixLocate {
    fn query(&self, pattern: &str, exact: bool) -> Result<Vec<u8>, ToolError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--at-root");
        if exact {
            cmd.arg("--whole-name");
        }
        cmd.arg(pattern);
        debug!(program = %self.program.display(), pattern, exact, "querying package index");

        let output = cmd
            .output()
            .map_err(|source| ToolError::Spawn { program: self.program_name(), source })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(stderr = %stderr.trim(), "package index query failed");
            return Err(ToolError::Failed {
                program: self.program_name(),
                status: output.status.to_string(),
            });
        }
        Ok(output.stdout)
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NIX_LOCATE: &str = "nix-locate";
pub const DEFAULT_NIX_STORE: &str = "nix-store";
pub const DEFAULT_SELECTOR: &str = "fzf --height=33%";
pub const DEFAULT_SHELL: &str = "sh";

pub const ENV_NIX_LOCATE: &str = "AUTOPATCHELF_NIX_LOCATE";
pub const ENV_NIX_STORE: &str = "AUTOPATCHELF_NIX_STORE";
pub const ENV_SELECTOR: &str = "AUTOPATCHELF_SELECTOR";
pub const ENV_SHELL: &str = "SHELL";

/// Which external tools to run and how.
///
/// Can be loaded from a JSON file; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Package index lookup program.
    pub nix_locate: String,
    /// Store realisation program.
    pub nix_store: String,
    /// Interactive selector command line, run through the shell.
    pub selector: String,
    /// Shell used to run the selector. Falls back to `$SHELL`, then `sh`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            nix_locate: DEFAULT_NIX_LOCATE.to_string(),
            nix_store: DEFAULT_NIX_STORE.to_string(),
            selector: DEFAULT_SELECTOR.to_string(),
            shell: None,
        }
    }
}

impl ToolConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse config JSON at {}", path.display()))
    }

    /// Overlay tool overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay tool overrides using `lookup` in place of the process environment.
    ///
    /// Empty values are ignored. `SHELL` only fills in a shell that is not
    /// configured yet.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(value) = get(ENV_NIX_LOCATE) {
            self.nix_locate = value;
        }
        if let Some(value) = get(ENV_NIX_STORE) {
            self.nix_store = value;
        }
        if let Some(value) = get(ENV_SELECTOR) {
            self.selector = value;
        }
        if self.shell.is_none() {
            self.shell = get(ENV_SHELL);
        }
    }

    /// The shell that will run the selector command.
    pub fn effective_shell(&self) -> &str {
        self.shell.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SHELL)
    }
}

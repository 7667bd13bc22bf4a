use std::path::Path;

use anyhow::Result;
use autopatchelf_core::config::ToolConfig;

/// Tool settings given on the command line; each one beats config file and environment.
#[derive(Debug, Clone, Default)]
pub struct ToolOverrides {
    pub nix_locate: Option<String>,
    pub nix_store: Option<String>,
    pub selector: Option<String>,
    pub shell: Option<String>,
}

/// Build the effective tool config: defaults, then `config_path`, then environment, then flags.
pub fn load_tool_config(
    config_path: Option<&Path>,
    overrides: &ToolOverrides,
) -> Result<ToolConfig> {
    let mut config = match config_path {
        Some(path) => ToolConfig::from_json_file(path)?,
        None => ToolConfig::default(),
    };
    config.apply_env();
    apply_overrides(&mut config, overrides);
    Ok(config)
}

/// Overlay command-line flags onto `config`.
pub fn apply_overrides(config: &mut ToolConfig, overrides: &ToolOverrides) {
    if let Some(nix_locate) = &overrides.nix_locate {
        config.nix_locate = nix_locate.clone();
    }
    if let Some(nix_store) = &overrides.nix_store {
        config.nix_store = nix_store.clone();
    }
    if let Some(selector) = &overrides.selector {
        config.selector = selector.clone();
    }
    if let Some(shell) = &overrides.shell {
        config.shell = Some(shell.clone());
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use autopatchelf_core::config::ToolConfig;
use autopatchelf_core::imports::ElfImportReader;
use autopatchelf_core::services::backends::{NixLocate, NixStore, ShellSelector};
use autopatchelf_core::services::resolver::{ResolveOptions, Resolver, RunReport};
use tracing::{debug, warn};

/// Resolve and realise the imports of each binary in order.
///
/// Per-binary and per-library failures are logged and counted in the returned
/// report rather than returned as errors.
pub fn resolve_command(
    binaries: &[PathBuf],
    config: &ToolConfig,
    options: ResolveOptions,
    json: bool,
) -> Result<RunReport> {
    if binaries.is_empty() {
        warn!("You must provide at least one binary.");
    }

    let index = NixLocate::new(&config.nix_locate);
    let selector = ShellSelector::new(config.effective_shell(), &config.selector);
    let realizer = NixStore::new(&config.nix_store).with_stdout_to_stderr(json);
    debug!(?config, ?options, "starting run");

    let resolver = Resolver {
        imports: &ElfImportReader,
        index: &index,
        selector: &selector,
        realizer: &realizer,
        options,
    };
    let report = resolver.run(binaries);

    if json {
        let serialized =
            serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        println!("{serialized}");
    }

    if !report.is_success() {
        warn!(
            "{} failure(s) while resolving {} binary(ies)",
            report.failures,
            report.binaries.len()
        );
    }

    Ok(report)
}

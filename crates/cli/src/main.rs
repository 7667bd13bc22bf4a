use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use autopatchelf::commands::{load_tool_config, resolve_command, ToolOverrides};
use autopatchelf_core::services::resolver::{ResolveOptions, RunReport};
use clap::Parser;
use tracing::error;

/// Resolve the shared-library dependencies of ELF binaries to Nix store paths.
///
/// For every `DT_NEEDED` entry the package index is searched for
/// `/lib/<name>`; when nothing matches exactly, a relaxed search on the
/// normalized name is offered instead. The chosen candidate is confirmed in an
/// interactive selector and its store path is realised.
#[derive(Parser, Debug)]
#[command(name = "autopatchelf", version, about = "Map ELF library imports to Nix store paths")]
struct Cli {
    /// ELF binaries to inspect, processed in order.
    binaries: Vec<PathBuf>,

    /// JSON file with tool settings (nix_locate, nix_store, selector, shell).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Package index program.
    #[arg(long)]
    nix_locate: Option<String>,

    /// Store realisation program.
    #[arg(long)]
    nix_store: Option<String>,

    /// Interactive selector command, run through the shell.
    #[arg(long)]
    selector: Option<String>,

    /// Shell that runs the selector (defaults to $SHELL, then sh).
    #[arg(long)]
    shell: Option<String>,

    /// Resolve store paths but do not realise them.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Handle each distinct library name only once per binary.
    #[arg(long, default_value_t = false)]
    dedupe: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// More log output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    autopatchelf::init_logging(autopatchelf::log_level(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<RunReport> {
    let overrides = ToolOverrides {
        nix_locate: cli.nix_locate,
        nix_store: cli.nix_store,
        selector: cli.selector,
        shell: cli.shell,
    };
    let config = load_tool_config(cli.config.as_deref(), &overrides)?;
    let options = ResolveOptions { dry_run: cli.dry_run, dedupe: cli.dedupe };
    resolve_command(&cli.binaries, &config, options, cli.json)
}

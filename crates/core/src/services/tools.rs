use std::io::{self, Write};

use thiserror::Error;

use crate::model::StorePath;

/// Writes candidate lines into the selector's input.
///
/// Runs concurrently with the selector; returning (or failing) ends the input.
pub type Producer<'a> = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'a>;

/// Producer that writes a fixed buffer.
pub fn bytes_producer<'a>(bytes: Vec<u8>) -> Producer<'a> {
    Box::new(move |out: &mut dyn Write| out.write_all(&bytes))
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
    #[error("I/O error talking to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Package index lookup (e.g. `nix-locate`).
pub trait PackageIndex: Send + Sync {
    /// Query the index for files matching `pattern` under the store roots.
    ///
    /// With `exact` the whole name must match. An empty buffer means no match.
    fn query(&self, pattern: &str, exact: bool) -> Result<Vec<u8>, ToolError>;
}

/// Interactive choice of one candidate line (e.g. `fzf`).
pub trait Selector: Send + Sync {
    /// Feed the candidates produced by `candidates` to the user and return the chosen line.
    fn select(&self, candidates: Producer<'_>) -> Result<String, ToolError>;
}

/// Materialisation of a store path on disk (e.g. `nix-store --realise`).
pub trait Realizer: Send + Sync {
    fn realize(&self, path: &StorePath) -> Result<(), ToolError>;
}

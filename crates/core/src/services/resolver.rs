use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::imports::{normalize_library_name, ImportReader};
use crate::model::{CandidateError, CandidateLine, StorePath};
use crate::services::tools::{bytes_producer, PackageIndex, Realizer, Selector, ToolError};

/// Why a single library could not be resolved to a store path.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("index query for {pattern} failed: {source}")]
    IndexQuery {
        pattern: String,
        #[source]
        source: ToolError,
    },
    #[error("selection failed: {0}")]
    Selection(#[source] ToolError),
    #[error(transparent)]
    Candidate(#[from] CandidateError),
}

/// Switches that change how a run treats each binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    /// Resolve store paths but never invoke the realiser.
    pub dry_run: bool,
    /// Handle each distinct library name once per binary.
    pub dedupe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LibraryOutcome {
    Realized { store_path: StorePath },
    /// Resolved during a dry run; nothing was realised.
    Resolved { store_path: StorePath },
    Skipped { reason: String },
    RealizeFailed { store_path: StorePath, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryReport {
    pub name: String,
    pub outcome: LibraryOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BinaryOutcome {
    Completed,
    /// Not an ELF binary, or its imports could not be read.
    Skipped { reason: String },
    /// Realisation failed for `library`; later libraries were not attempted.
    Aborted { library: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryReport {
    pub path: PathBuf,
    pub libraries: Vec<LibraryReport>,
    pub outcome: BinaryOutcome,
}

impl BinaryReport {
    /// Skipped binaries, skipped libraries, and failed realisations each count once.
    pub fn failures(&self) -> usize {
        let binary = usize::from(matches!(self.outcome, BinaryOutcome::Skipped { .. }));
        let libraries = self
            .libraries
            .iter()
            .filter(|lib| {
                matches!(
                    lib.outcome,
                    LibraryOutcome::Skipped { .. } | LibraryOutcome::RealizeFailed { .. }
                )
            })
            .count();
        binary + libraries
    }
}

/// Aggregate result of a run over several binaries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunReport {
    pub binaries: Vec<BinaryReport>,
    pub failures: usize,
}

impl RunReport {
    pub fn push(&mut self, binary: BinaryReport) {
        self.failures += binary.failures();
        self.binaries.push(binary);
    }

    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// Index pattern for a library name, rooted at `/lib`.
pub fn library_pattern(name: &str) -> String {
    format!("/lib/{name}")
}

/// Drives import reading, index lookup, selection, and realisation for each binary.
///
/// Binaries are handled one after another and libraries in the order the
/// binary lists them. Nothing is cached between binaries.
pub struct Resolver<'a> {
    pub imports: &'a dyn ImportReader,
    pub index: &'a dyn PackageIndex,
    pub selector: &'a dyn Selector,
    pub realizer: &'a dyn Realizer,
    pub options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    pub fn run<P: AsRef<Path>>(&self, binaries: &[P]) -> RunReport {
        let mut report = RunReport::default();
        for binary in binaries {
            report.push(self.process_binary(binary.as_ref()));
        }
        report
    }

    /// Resolve and realise every library imported by `path`.
    ///
    /// A library that cannot be resolved is skipped; a failed realisation
    /// abandons the remaining libraries of this binary.
    pub fn process_binary(&self, path: &Path) -> BinaryReport {
        let mut report = BinaryReport {
            path: path.to_path_buf(),
            libraries: Vec::new(),
            outcome: BinaryOutcome::Completed,
        };

        info!("Parsing {}", path.display());
        let libraries = match self.imports.imported_libraries(path) {
            Ok(libraries) => libraries,
            Err(err) => {
                error!("{err}");
                report.outcome = BinaryOutcome::Skipped { reason: err.to_string() };
                return report;
            }
        };
        info!("Found the following libraries: {libraries:?}");

        let mut seen = HashSet::new();
        for library in &libraries {
            if self.options.dedupe && !seen.insert(library.as_str()) {
                debug!("Skipping repeated import {library}");
                continue;
            }

            info!("Determining /nix/store entry for {library}");
            let store_path = match self.resolve_library(library) {
                Ok(store_path) => store_path,
                Err(err) => {
                    warn!("Could not resolve {library}: {err}");
                    report.libraries.push(LibraryReport {
                        name: library.clone(),
                        outcome: LibraryOutcome::Skipped { reason: err.to_string() },
                    });
                    continue;
                }
            };

            if self.options.dry_run {
                info!("Dry run: not realising {store_path}");
                report.libraries.push(LibraryReport {
                    name: library.clone(),
                    outcome: LibraryOutcome::Resolved { store_path },
                });
                continue;
            }

            info!("Realising {store_path}");
            if let Err(err) = self.realizer.realize(&store_path) {
                error!("Failure realising {store_path}: {err}");
                report.libraries.push(LibraryReport {
                    name: library.clone(),
                    outcome: LibraryOutcome::RealizeFailed { store_path, reason: err.to_string() },
                });
                report.outcome = BinaryOutcome::Aborted { library: library.clone() };
                return report;
            }
            report.libraries.push(LibraryReport {
                name: library.clone(),
                outcome: LibraryOutcome::Realized { store_path },
            });
        }

        report
    }

    /// Pick the store path for one imported library.
    ///
    /// The exact `/lib/<name>` query is tried first. When it finds nothing the
    /// normalized name is queried without `--whole-name` and the user chooses
    /// from whatever that returns. Either way the user confirms the final line.
    pub fn resolve_library(&self, library: &str) -> Result<StorePath, ResolveError> {
        let pattern = library_pattern(library);
        let exact = self
            .index
            .query(&pattern, true)
            .map_err(|source| ResolveError::IndexQuery { pattern, source })?;

        let selected = if exact.is_empty() {
            info!("Could not find an exact match for {library}. Please select which to use.");
            let normalized = normalize_library_name(library);
            info!("Using normalized library name: {normalized}");
            let fallback = library_pattern(normalized);
            let index = self.index;
            self.selector.select(Box::new(move |out: &mut dyn Write| {
                match index.query(&fallback, false) {
                    Ok(bytes) => out.write_all(&bytes),
                    Err(err) => {
                        warn!("Failure doing relaxed index query for {fallback}: {err}");
                        Ok(())
                    }
                }
            }))
        } else {
            self.selector.select(bytes_producer(exact))
        };
        let selection = selected.map_err(ResolveError::Selection)?;

        let candidate = CandidateLine::parse(&selection)?;
        info!("{library} has been resolved to: {}", candidate.line());
        if let Some(package) = candidate.package() {
            debug!("Selected package {package} for {library}");
        }
        Ok(candidate.into_store_path())
    }
}

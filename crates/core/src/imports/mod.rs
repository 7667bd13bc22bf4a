//! Reading the dynamic imports (`DT_NEEDED`) of ELF binaries.

mod normalize;

use std::fs;
use std::path::{Path, PathBuf};

use goblin::elf::Elf;
use thiserror::Error;

pub use normalize::normalize_library_name;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not an ELF binary: {source}", path.display())]
    NotElf {
        path: PathBuf,
        #[source]
        source: goblin::error::Error,
    },
    #[error("could not determine dynamic libraries for {}: {source}", path.display())]
    ImportsUnreadable {
        path: PathBuf,
        #[source]
        source: goblin::error::Error,
    },
}

/// Capability that lists the shared objects a binary asks the dynamic loader for.
pub trait ImportReader: Send + Sync {
    /// Imported library names in the order the binary records them. Duplicates are kept.
    fn imported_libraries(&self, path: &Path) -> Result<Vec<String>, ImportError>;
}

/// goblin-backed reader for ELF files on disk.
pub struct ElfImportReader;

impl ImportReader for ElfImportReader {
    fn imported_libraries(&self, path: &Path) -> Result<Vec<String>, ImportError> {
        let bytes = fs::read(path)
            .map_err(|source| ImportError::Io { path: path.to_path_buf(), source })?;
        imported_libraries_from_bytes(&bytes).map_err(|err| err.with_path(path))
    }
}

/// Path-less failure from [`imported_libraries_from_bytes`].
#[derive(Debug)]
pub enum ParseFailure {
    NotElf(goblin::error::Error),
    ImportsUnreadable(goblin::error::Error),
}

impl ParseFailure {
    fn with_path(self, path: &Path) -> ImportError {
        let path = path.to_path_buf();
        match self {
            ParseFailure::NotElf(source) => ImportError::NotElf { path, source },
            ParseFailure::ImportsUnreadable(source) => {
                ImportError::ImportsUnreadable { path, source }
            }
        }
    }
}

/// Parse an in-memory ELF image and return its `DT_NEEDED` entries.
///
/// A bad ELF header means the bytes are not an ELF binary at all; a valid
/// header followed by a broken program header table or dynamic section means
/// the imports cannot be read.
pub fn imported_libraries_from_bytes(bytes: &[u8]) -> Result<Vec<String>, ParseFailure> {
    Elf::parse_header(bytes).map_err(ParseFailure::NotElf)?;
    let elf = Elf::parse(bytes).map_err(ParseFailure::ImportsUnreadable)?;
    Ok(elf.libraries.iter().map(|lib| lib.to_string()).collect())
}

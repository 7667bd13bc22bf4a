//! Core data model for index candidates and resolved store paths.
//!
//! Candidate lines come from the package index in the form
//! `<package-name> <score> <flag> <absolute-path>`. Only the trailing field is
//! interpreted; everything before it is carried along for display.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Opaque identifier of an installation inside the package store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StorePath(String);

impl StorePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("malformed candidate line {line:?}: no whitespace-separated fields")]
    MalformedCandidate { line: String },
}

/// A single line chosen from the index output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    line: String,
    store_path: StorePath,
}

impl CandidateLine {
    /// Parse a selected line, taking its last whitespace-delimited token as the store path.
    ///
    /// Blank input (an aborted or failed selection) is rejected rather than
    /// producing an empty path.
    pub fn parse(line: &str) -> Result<Self, CandidateError> {
        let trimmed = line.trim();
        let last = trimmed
            .split_whitespace()
            .next_back()
            .ok_or_else(|| CandidateError::MalformedCandidate { line: line.to_string() })?;
        Ok(Self { line: trimmed.to_string(), store_path: StorePath::new(last) })
    }

    /// The trimmed line as the user selected it.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Leading package attribute, when the line carries more than the path alone.
    pub fn package(&self) -> Option<&str> {
        let mut fields = self.line.split_whitespace();
        let first = fields.next()?;
        fields.next().map(|_| first)
    }

    pub fn store_path(&self) -> &StorePath {
        &self.store_path
    }

    pub fn into_store_path(self) -> StorePath {
        self.store_path
    }
}

//! Target word list loading
//!
//! The target list is a JSON-LD document whose `answer` field holds the
//! ordered list of words the game may pick as solutions.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the target document
#[derive(Error, Debug)]
pub enum TargetsError {
    /// The file could not be read
    #[error("cannot read target list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not JSON or has no `answer` array of strings
    #[error("malformed target list {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The part of the target document we care about
///
/// Linked-data fields such as `@context` and `@type` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetDocument {
    pub answer: Vec<String>,
}

/// Load the target words from a file, preserving document order
pub fn load_targets(path: &Path) -> Result<Vec<String>, TargetsError> {
    let content = fs::read_to_string(path).map_err(|source| TargetsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: TargetDocument =
        serde_json::from_str(&content).map_err(|source| TargetsError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!("Loaded {} target words from {:?}", document.answer.len(), path);
    Ok(document.answer)
}

/// Parse target words from an in-memory document
pub fn parse_targets(content: &str) -> Result<Vec<String>, serde_json::Error> {
    let document: TargetDocument = serde_json::from_str(content)?;
    Ok(document.answer)
}

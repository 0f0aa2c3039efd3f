//! # Error Types
//!
//! This module defines the error type shared by every stage of the template
//! pipeline.
//!
//! Structural errors are raised before anything is written: a run either
//! produces a complete document or leaves every destination untouched.
//!
//! ## Error Types
//! - `NoRecords` / `UnterminatedRecord` - the seed document has no usable `TRACK` chunks
//! - `InsufficientScaffolds` - fewer seed records than the catalog consumes
//! - `DuplicateTrackName` / `EmptyFolder` - the catalog cannot produce a valid tree
//! - `UnresolvedRoute` - a routing source is missing (strict mode only)
//! - `PreservedDestination` - a route targets a scaffold chunk (strict mode only)
//! - `Catalog` - a YAML catalog or song table could not be parsed
//! - `Io` - reading or writing a project file failed
//!
//! Post-generation QC failures are not errors of the pipeline; see
//! [`crate::qc::QcFailure`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RppError {
    /// The seed document contains no top-level `TRACK` chunk.
    ///
    /// # Example
    /// ```
    /// # use rppgen::RppError;
    /// assert_eq!(RppError::NoRecords.to_string(), "No TRACK chunks found in source RPP");
    /// ```
    #[error("No TRACK chunks found in source RPP")]
    NoRecords,

    /// A `TRACK` chunk opened at `line` (1-based) is never closed.
    #[error("TRACK chunk opened at line {line} is never closed")]
    UnterminatedRecord { line: usize },

    /// The seed has fewer `TRACK` chunks than the catalog needs as scaffolds.
    ///
    /// # Example
    /// ```
    /// # use rppgen::RppError;
    /// let err = RppError::InsufficientScaffolds { found: 1, required: 2 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Expected at least 2 scaffold tracks in source RPP, found 1"
    /// );
    /// ```
    #[error("Expected at least {required} scaffold tracks in source RPP, found {found}")]
    InsufficientScaffolds { found: usize, required: usize },

    /// Two records in the synthesized tree share a name.
    #[error("Duplicate track name in catalog: {0}")]
    DuplicateTrackName(String),

    /// A folder descriptor has no children, so its folder could never close.
    #[error("Folder has no children: {0}")]
    EmptyFolder(String),

    /// A routing source (or destination) does not name any record.
    #[error("Routing source '{source_name}' for '{destination}' does not match any track")]
    UnresolvedRoute {
        destination: String,
        source_name: String,
    },

    /// A route targets a preserved seed chunk, which is emitted without
    /// `AUXRECV` lines.
    #[error("Route destination '{0}' is a preserved scaffold and cannot receive sends")]
    PreservedDestination(String),

    /// Invalid catalog or song table.
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RppError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RppError::Io {
            path: path.into(),
            source,
        }
    }
}

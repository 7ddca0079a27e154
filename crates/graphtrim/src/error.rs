//! Error types for graphtrim operations.
//!
//! All errors are terminal for the batch pipeline: the CLI reports them and
//! exits non-zero. There is no partial-success or retry path.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for graphtrim operations.
#[derive(Debug, Error)]
pub enum GraphtrimError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file was unreadable or did not parse as DOT.
    #[error("unable to load dot file \"{path}\": {reason}")]
    Load { path: PathBuf, reason: String },

    /// The reachability filter matched no node label.
    #[error("unable to find nodes matching \"{filter}\"")]
    NoMatch { filter: String },
}

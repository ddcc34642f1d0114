//! Process-ending failures.
//!
//! Anything recoverable is written to the activity log instead and never
//! reaches this type.

use std::io;
use std::path::PathBuf;

/// An error that terminates the session.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    #[error("Unable to find mount point {0}")]
    MountNotFound(String),

    #[error("Failed to prepare temporary file for the editor: {0}")]
    EditorTempFile(#[source] io::Error),

    #[error("Invalid editor command line `{0}`")]
    EditorCommand(String),

    #[error("Failed to launch editor `{command}`: {source}")]
    EditorSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Editor `{command}` exited with {status}")]
    EditorFailed { command: String, status: String },

    #[error("Editor did not modify {}", path.display())]
    EditorUnmodified { path: PathBuf },

    #[error("Terminal error: {0}")]
    Terminal(#[source] io::Error),
}

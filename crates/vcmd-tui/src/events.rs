//! UI event types.
//!
//! Terminal input and the results of runtime-side work are converted to
//! `UiEvent` before reaching the reducer.

use std::path::PathBuf;

use crossterm::event::KeyEvent;

use crate::error::FatalError;

/// What came back from the external editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    /// The file was saved; holds its full contents.
    Modified(String),
    /// The editor exited cleanly without touching the file.
    Unmodified { path: PathBuf },
}

#[derive(Debug)]
pub enum UiEvent {
    Key(KeyEvent),
    Paste(String),
    Resize { width: u16, height: u16 },
    EditorFinished(Result<EditorOutcome, FatalError>),
}

//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover whatever needs the terminal or a child process; everything
//! else is applied to state directly through intents.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Hand `contents` to the external editor and report back with
    /// `UiEvent::EditorFinished`.
    LaunchEditor { contents: String },
}

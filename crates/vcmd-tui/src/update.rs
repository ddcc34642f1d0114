//! TUI reducer (update function).
//!
//! The runtime calls `update(app, store, event)` for every event and executes
//! the returned effects. Key events are resolved through the keymap to a
//! handler; handlers produce intents which are applied here in one place.

use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use vcmd_core::SecretStore;

use crate::effects::UiEffect;
use crate::error::FatalError;
use crate::events::UiEvent;
use crate::features::{navigation, workflow};
use crate::intents::{self, Intent};
use crate::keymap::Action;
use crate::state::AppState;

/// The main reducer function.
///
/// # Errors
/// Returns a [`FatalError`] when the session cannot continue.
pub fn update(
    app: &mut AppState,
    store: &mut dyn SecretStore,
    event: UiEvent,
) -> Result<Vec<UiEffect>, FatalError> {
    let intents = match event {
        UiEvent::Key(key) => handle_key(app, store, key),
        UiEvent::Paste(text) => handle_paste(app, text),
        UiEvent::Resize { width, height } => {
            vec![Intent::Resize(Rect::new(0, 0, width, height))]
        }
        UiEvent::EditorFinished(result) => workflow::apply_editor_result(app, result)?,
    };
    Ok(intents::apply_all(app, intents))
}

/// Applies the startup mount selection, if any.
///
/// # Errors
/// Returns [`FatalError::MountNotFound`] for a mount the side pane lacks.
pub fn start(
    app: &mut AppState,
    store: &dyn SecretStore,
    mount: Option<&str>,
) -> Result<(), FatalError> {
    if let Some(mount) = mount {
        let intents = navigation::enter_mount(app, store, mount)?;
        intents::apply_all(app, intents);
    }
    Ok(())
}

fn handle_key(app: &AppState, store: &mut dyn SecretStore, key: KeyEvent) -> Vec<Intent> {
    if matches!(key.kind, KeyEventKind::Release) {
        return Vec::new();
    }

    if let Some(action) = app.keymap.resolve(app.focused(), key) {
        return dispatch(app, store, action);
    }

    // Unbound keys edit the focused pane when it accepts input.
    match app.views.focused_view() {
        Some(view) if view.props.editable => vec![Intent::Input {
            view: view.name,
            key,
        }],
        _ => Vec::new(),
    }
}

fn handle_paste(app: &AppState, text: String) -> Vec<Intent> {
    match app.views.focused_view() {
        Some(view) if view.props.editable => vec![Intent::Paste {
            view: view.name,
            text,
        }],
        _ => Vec::new(),
    }
}

fn dispatch(app: &AppState, store: &mut dyn SecretStore, action: Action) -> Vec<Intent> {
    match action {
        Action::Quit => vec![Intent::Effect(UiEffect::Quit)],
        Action::ToggleAnchor => navigation::toggle_anchor(app),
        Action::SelectMount => navigation::select_mount(app, &*store),
        Action::CursorUp => navigation::cursor_up(app),
        Action::CursorDown => navigation::cursor_down(app),
        Action::PageDown => navigation::page_down(app),
        Action::ViewSecret => workflow::view_secret(app, &*store),
        Action::OpenAddPrompt => workflow::open_add_prompt(app),
        Action::OpenDeletePrompt => workflow::open_delete_prompt(app),
        Action::CloseSecret => workflow::close_secret(),
        Action::BeginEdit => workflow::begin_edit(app),
        Action::OpenSavePrompt => workflow::open_save_prompt(app),
        Action::CancelEdit => workflow::cancel_edit(app, &*store),
        Action::ExternalEditor => workflow::request_external_editor(app),
        Action::ConfirmAddPath => workflow::confirm_add_path(app),
        Action::CancelAddPath => workflow::cancel_add_path(app, &*store),
        Action::ConfirmDelete => workflow::confirm_delete(app, store),
        Action::DeclineDelete => workflow::decline_delete(app, &*store),
        Action::ConfirmSave => workflow::confirm_save(app, store),
        Action::DeclineSave => workflow::decline_save(app, &*store),
    }
}

//! Focus, cursor movement and mount browsing.
//!
//! Handlers read the state and return intents; none of them mutates
//! anything directly.

use vcmd_core::{SecretStore, expand};

use crate::error::FatalError;
use crate::intents::Intent;
use crate::state::AppState;
use crate::views::ViewName;

pub const SIDE_LEGEND: &str =
    "↑ - cursor up\n↓ - cursor down\nTab - switch windows\nRet - select mount";
pub const MAIN_LEGEND: &str =
    "Tab - switch windows\nRet - view secret\na - add secret\nd - delete secret\nSpace - page down";
pub const SECRET_LEGEND: &str = "e - edit secret\nq - quit view";
pub const EDIT_LEGEND: &str = "C-l - Open in $EDITOR\nC-x - quit don't save\nC-s - save";
pub const ADD_LEGEND: &str = "Ret - continue\nC-x - cancel";
pub const CONFIRM_LEGEND: &str = "y - confirm\nn - cancel";

/// Help text shown while `view` is focused. `None` keeps the current text.
pub fn legend_for(view: ViewName) -> Option<&'static str> {
    match view {
        ViewName::Side => Some(SIDE_LEGEND),
        ViewName::Main => Some(MAIN_LEGEND),
        ViewName::Secret => Some(SECRET_LEGEND),
        ViewName::EditSecret => Some(EDIT_LEGEND),
        ViewName::AddKeyPrompt => Some(ADD_LEGEND),
        ViewName::DeleteKeyPrompt | ViewName::SavePrompt => Some(CONFIRM_LEGEND),
        ViewName::Legend | ViewName::Log => None,
    }
}

/// Switches between the two anchor panes.
pub fn toggle_anchor(app: &AppState) -> Vec<Intent> {
    let target = match app.focused() {
        None | Some(ViewName::Side) => ViewName::Main,
        Some(_) => ViewName::Side,
    };
    vec![Intent::Focus(target)]
}

pub fn cursor_up(app: &AppState) -> Vec<Intent> {
    let Some(view) = app.views.focused_view() else {
        return Vec::new();
    };
    let (row, _) = view.buffer.cursor();
    if row == 0 {
        return Vec::new();
    }
    vec![Intent::SetCursor {
        view: view.name,
        row: row - 1,
    }]
}

pub fn cursor_down(app: &AppState) -> Vec<Intent> {
    move_down_by(app, 1)
}

/// Moves down by the focused pane's visible height.
pub fn page_down(app: &AppState) -> Vec<Intent> {
    let step = app.views.focused_view().map_or(1, |v| v.height().max(1));
    move_down_by(app, step)
}

/// Moving onto an empty or missing line is a no-op.
fn move_down_by(app: &AppState, step: usize) -> Vec<Intent> {
    let Some(view) = app.views.focused_view() else {
        return Vec::new();
    };
    let target = view.buffer.cursor().0 + step;
    match view.buffer.line(target) {
        Some(line) if !line.is_empty() => vec![Intent::SetCursor {
            view: view.name,
            row: target,
        }],
        _ => Vec::new(),
    }
}

/// Lists the keys of the mount under the side cursor and focuses `main`.
pub fn select_mount(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    match app.selection(ViewName::Side) {
        Some(mount) => show_mount(store, mount),
        None => vec![Intent::Focus(ViewName::Main)],
    }
}

/// Jumps straight into `mount` at startup.
///
/// # Errors
/// Returns [`FatalError::MountNotFound`] if the side pane does not list it.
pub fn enter_mount(
    app: &AppState,
    store: &dyn SecretStore,
    mount: &str,
) -> Result<Vec<Intent>, FatalError> {
    let wanted = if mount.ends_with('/') {
        mount.to_string()
    } else {
        format!("{mount}/")
    };

    let row = app
        .views
        .get(ViewName::Side)
        .and_then(|side| side.buffer.lines().iter().position(|line| *line == wanted))
        .ok_or_else(|| FatalError::MountNotFound(mount.to_string()))?;

    let mut intents = vec![Intent::SetCursor {
        view: ViewName::Side,
        row,
    }];
    intents.extend(show_mount(store, &wanted));
    Ok(intents)
}

/// Discards every ephemeral pane and any session, then relists the mount
/// under the side cursor with `main` focused.
pub fn home(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    let mut intents = vec![
        Intent::CloseEphemeral,
        Intent::EndSession,
        Intent::Inspect(None),
        Intent::Focus(ViewName::Main),
    ];
    if let Some(mount) = app.selection(ViewName::Side) {
        intents.extend(show_mount(store, mount));
    }
    intents
}

/// Like [`home`] but keeps the current listing.
pub fn main_view() -> Vec<Intent> {
    vec![
        Intent::CloseEphemeral,
        Intent::EndSession,
        Intent::Inspect(None),
        Intent::Focus(ViewName::Main),
    ]
}

fn show_mount(store: &dyn SecretStore, mount: &str) -> Vec<Intent> {
    let keys: Vec<String> = expand(store, mount).collect();
    vec![
        Intent::ShowKeys { keys },
        Intent::Focus(ViewName::Main),
        Intent::Log(format!("Viewing secrets on {mount} mount")),
    ]
}

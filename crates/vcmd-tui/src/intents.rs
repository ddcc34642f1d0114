//! State changes requested by handlers.
//!
//! Handlers return intents instead of touching state; [`apply_all`] applies
//! them in order and is the only code that mutates the view table, the log
//! and the edit session. Effects are passed through to the runtime.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::features::navigation::legend_for;
use crate::features::workflow::{EditSession, EditTarget, InspectedSecret};
use crate::state::AppState;
use crate::views::{InputFilter, ViewName, layout};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Create `view` if it does not exist yet, filled with `content`.
    /// An existing pane is left untouched.
    Open {
        view: ViewName,
        content: String,
        cursor: Option<(usize, usize)>,
        hint: usize,
    },
    Close(ViewName),
    CloseEphemeral,
    Focus(ViewName),
    SetCursor {
        view: ViewName,
        row: usize,
    },
    /// Replace the key listing and move its cursor to the top.
    ShowKeys {
        keys: Vec<String>,
    },
    SetBuffer {
        view: ViewName,
        text: String,
    },
    Input {
        view: ViewName,
        key: KeyEvent,
    },
    Paste {
        view: ViewName,
        text: String,
    },
    Resize(Rect),
    Log(String),
    BeginSession(EditTarget),
    EndSession,
    Inspect(Option<InspectedSecret>),
    Effect(UiEffect),
}

/// Applies `intents` in order and returns the effects they carried.
pub fn apply_all(app: &mut AppState, intents: Vec<Intent>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for intent in intents {
        apply(app, intent, &mut effects);
    }
    effects
}

fn apply(app: &mut AppState, intent: Intent, effects: &mut Vec<UiEffect>) {
    match intent {
        Intent::Open {
            view,
            content,
            cursor,
            hint,
        } => {
            let rect = layout::rect_for(view, app.screen, hint);
            let (pane, created) = app.views.create_or_focus(view, rect);
            if created {
                tracing::debug!(view = view.as_str(), "pane opened");
                pane.hint = hint;
                pane.buffer.set_text(&content);
                if let Some((row, col)) = cursor {
                    pane.buffer.set_cursor(row, col);
                }
                pane.scroll_to_cursor();
            }
            refresh_legend(app);
        }
        Intent::Close(view) => {
            tracing::debug!(view = view.as_str(), "pane closed");
            app.views.destroy(view);
            refresh_legend(app);
        }
        Intent::CloseEphemeral => {
            app.views.destroy_ephemeral();
            refresh_legend(app);
        }
        Intent::Focus(view) => {
            app.views.focus(view);
            refresh_legend(app);
        }
        Intent::SetCursor { view, row } => {
            if let Some(pane) = app.views.get_mut(view) {
                pane.buffer.set_cursor(row, 0);
                pane.scroll_to_cursor();
            }
        }
        Intent::ShowKeys { keys } => {
            if let Some(pane) = app.views.get_mut(ViewName::Main) {
                pane.buffer.set_lines(keys);
                pane.origin = (0, 0);
            }
        }
        Intent::SetBuffer { view, text } => {
            if let Some(pane) = app.views.get_mut(view) {
                pane.buffer.set_text(&text);
                pane.origin = (0, 0);
            }
        }
        Intent::Input { view, key } => {
            if let Some(pane) = app.views.get_mut(view) {
                pane.props.input_filter.apply(&mut pane.buffer, key);
                pane.scroll_to_cursor();
            }
        }
        Intent::Paste { view, text } => {
            if let Some(pane) = app.views.get_mut(view) {
                let text = match pane.props.input_filter {
                    InputFilter::Identity => text.replace("\r\n", "\n"),
                    InputFilter::SingleLine => text.replace(['\r', '\n'], ""),
                };
                pane.buffer.insert_str(&text);
                pane.scroll_to_cursor();
            }
        }
        Intent::Resize(screen) => {
            app.screen = screen;
            app.views
                .reposition(|view| layout::rect_for(view.name, screen, view.hint));
        }
        Intent::Log(message) => app.log.push(message),
        Intent::BeginSession(target) => app.session = Some(EditSession { target }),
        Intent::EndSession => app.session = None,
        Intent::Inspect(inspected) => app.inspected = inspected,
        Intent::Effect(effect) => effects.push(effect),
    }
}

/// The legend follows the focused pane; with nothing focused it stays put.
fn refresh_legend(app: &mut AppState) {
    if let Some(legend) = app.views.focused().and_then(legend_for) {
        app.legend = legend;
    }
}

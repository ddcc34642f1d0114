//! Application state.
//!
//! ```text
//! AppState
//! ├── views: ViewRegistry        (panes + focus)
//! ├── legend                     (help text for the focused pane)
//! ├── log: ActivityLog           (user-visible events)
//! ├── inspected: Option<...>     (secret open in the `secret` pane)
//! ├── session: Option<EditSession>
//! └── keymap, settings, screen
//! ```
//!
//! Handlers only read this struct; every change goes through
//! [`crate::intents::apply_all`].

use ratatui::layout::Rect;

use crate::features::activity_log::ActivityLog;
use crate::features::navigation::SIDE_LEGEND;
use crate::features::workflow::{EditSession, InspectedSecret};
use crate::keymap::Keymap;
use crate::views::{ViewName, ViewRegistry, layout};

/// Session-wide options taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Command line of the external editor.
    pub editor_command: String,
    /// Treat an editor exit without changes as fatal.
    pub fail_on_unmodified: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor_command: "vim".to_string(),
            fail_on_unmodified: true,
        }
    }
}

pub struct AppState {
    pub views: ViewRegistry,
    pub legend: &'static str,
    pub log: ActivityLog,
    pub inspected: Option<InspectedSecret>,
    pub session: Option<EditSession>,
    pub keymap: Keymap,
    pub settings: Settings,
    pub screen: Rect,
    pub should_quit: bool,
}

impl AppState {
    /// Builds the permanent panes with `mounts` listed in the side pane,
    /// which starts focused.
    pub fn new(mounts: &[String], screen: Rect, settings: Settings) -> Self {
        let mut views = ViewRegistry::new();
        for name in ViewName::PERMANENT {
            views.create_or_focus(name, layout::rect_for(name, screen, 0));
        }
        if let Some(side) = views.get_mut(ViewName::Side) {
            side.buffer.set_lines(mounts.iter().cloned());
        }
        views.focus(ViewName::Side);

        Self {
            views,
            legend: SIDE_LEGEND,
            log: ActivityLog::new(),
            inspected: None,
            session: None,
            keymap: Keymap::default_bindings(),
            settings,
            screen,
            should_quit: false,
        }
    }

    pub fn focused(&self) -> Option<ViewName> {
        self.views.focused()
    }

    /// Non-empty line under the cursor of `view`.
    pub fn selection(&self, view: ViewName) -> Option<&str> {
        self.views.get(view).and_then(|v| v.selected_line())
    }

    /// Full text of `view`'s buffer.
    pub fn buffer_text(&self, view: ViewName) -> Option<String> {
        self.views.get(view).map(|v| v.buffer.text())
    }
}

//! Named panes and the registry that owns them.
//!
//! The set of pane names is fixed. `side`, `main`, `legend` and `log` are
//! created at startup and live for the whole session; the others come and go
//! with the workflow step that needs them. At most one pane of each name
//! exists at a time.

pub mod layout;
pub mod text_buffer;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
pub use text_buffer::{CursorMove, TextBuffer};

/// Pane identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    Side,
    Main,
    Legend,
    Log,
    Secret,
    EditSecret,
    AddKeyPrompt,
    DeleteKeyPrompt,
    SavePrompt,
}

impl ViewName {
    pub const ALL: [ViewName; 9] = [
        ViewName::Side,
        ViewName::Main,
        ViewName::Legend,
        ViewName::Log,
        ViewName::Secret,
        ViewName::EditSecret,
        ViewName::AddKeyPrompt,
        ViewName::DeleteKeyPrompt,
        ViewName::SavePrompt,
    ];

    pub const PERMANENT: [ViewName; 4] = [
        ViewName::Side,
        ViewName::Main,
        ViewName::Legend,
        ViewName::Log,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Side => "side",
            ViewName::Main => "main",
            ViewName::Legend => "legend",
            ViewName::Log => "log",
            ViewName::Secret => "secret",
            ViewName::EditSecret => "editsecret",
            ViewName::AddKeyPrompt => "addkeyprompt",
            ViewName::DeleteKeyPrompt => "deletekeyprompt",
            ViewName::SavePrompt => "saveprompt",
        }
    }

    pub fn is_permanent(self) -> bool {
        Self::PERMANENT.contains(&self)
    }

    /// Presentation properties applied when the pane is first created.
    pub fn properties(self) -> ViewProps {
        let base = ViewProps::default();
        match self {
            ViewName::Side => ViewProps {
                framed: true,
                title: "Mounts",
                highlight: true,
                ..base
            },
            ViewName::Main => ViewProps {
                framed: true,
                title: "Keys",
                wrap: true,
                highlight: true,
                ..base
            },
            ViewName::Legend => ViewProps {
                framed: true,
                title: "Legend",
                ..base
            },
            ViewName::Log => ViewProps {
                framed: true,
                title: "Log",
                autoscroll: true,
                ..base
            },
            ViewName::Secret => ViewProps { wrap: true, ..base },
            ViewName::EditSecret => ViewProps {
                editable: true,
                wrap: true,
                ..base
            },
            ViewName::AddKeyPrompt => ViewProps {
                editable: true,
                input_filter: InputFilter::SingleLine,
                framed: true,
                title: "Insert Key Name",
                ..base
            },
            ViewName::DeleteKeyPrompt => ViewProps {
                framed: true,
                title: "WARNING",
                ..base
            },
            ViewName::SavePrompt => ViewProps {
                framed: true,
                title: "Save Changes",
                ..base
            },
        }
    }
}

/// How keystrokes reach an editable pane's buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputFilter {
    /// Every key edits the buffer.
    #[default]
    Identity,
    /// One-line field: vertical movement and line breaks are swallowed,
    /// `→` stops at the end of the text, `Home`/`End` jump to either end.
    SingleLine,
}

impl InputFilter {
    pub fn apply(self, buffer: &mut TextBuffer, key: KeyEvent) {
        match self {
            InputFilter::Identity => buffer.input(key),
            InputFilter::SingleLine => match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::Tab => {}
                KeyCode::Right => {
                    if buffer.cursor().1 < buffer.current_line_len() {
                        buffer.move_cursor(CursorMove::Forward);
                    }
                }
                KeyCode::Left => {
                    if buffer.cursor().1 > 0 {
                        buffer.move_cursor(CursorMove::Back);
                    }
                }
                KeyCode::Home => buffer.move_cursor(CursorMove::Head),
                KeyCode::End => buffer.move_cursor(CursorMove::End),
                _ => buffer.input(key),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewProps {
    pub autoscroll: bool,
    pub editable: bool,
    pub input_filter: InputFilter,
    pub framed: bool,
    pub title: &'static str,
    pub wrap: bool,
    /// Draw the cursor row highlighted (selection lists).
    pub highlight: bool,
}

impl Default for ViewProps {
    fn default() -> Self {
        Self {
            autoscroll: false,
            editable: false,
            input_filter: InputFilter::Identity,
            framed: false,
            title: "",
            wrap: false,
            highlight: false,
        }
    }
}

/// A live pane.
#[derive(Debug, Clone)]
pub struct View {
    pub name: ViewName,
    pub props: ViewProps,
    pub rect: Rect,
    /// Sizing hint kept for repositioning (prompt path length).
    pub hint: usize,
    pub buffer: TextBuffer,
    /// First visible (column, row) of the buffer.
    pub origin: (usize, usize),
}

impl View {
    fn new(name: ViewName, rect: Rect) -> Self {
        Self {
            name,
            props: name.properties(),
            rect,
            hint: 0,
            buffer: TextBuffer::default(),
            origin: (0, 0),
        }
    }

    /// Area inside the frame, if any.
    pub fn inner(&self) -> Rect {
        if self.props.framed {
            Rect::new(
                self.rect.x.saturating_add(1),
                self.rect.y.saturating_add(1),
                self.rect.width.saturating_sub(2),
                self.rect.height.saturating_sub(2),
            )
        } else {
            self.rect
        }
    }

    /// Visible text rows.
    pub fn height(&self) -> usize {
        usize::from(self.inner().height)
    }

    /// The non-empty line under the cursor.
    pub fn selected_line(&self) -> Option<&str> {
        let (row, _) = self.buffer.cursor();
        self.buffer.line(row).filter(|line| !line.is_empty())
    }

    /// Adjusts the origin so the cursor is inside the visible area.
    ///
    /// The origin counts buffer lines. For wrapped panes the renderer scrolls
    /// further so every screen row of the cursor line is shown.
    pub fn scroll_to_cursor(&mut self) {
        let (row, col) = self.buffer.cursor();
        let height = self.height().max(1);
        let (mut ox, mut oy) = self.origin;

        if row < oy {
            oy = row;
        } else if row >= oy + height {
            oy = row + 1 - height;
        }

        if !self.props.wrap {
            let width = usize::from(self.inner().width).max(1);
            if col < ox {
                ox = col;
            } else if col >= ox + width {
                ox = col + 1 - width;
            }
        } else {
            ox = 0;
        }

        self.origin = (ox, oy);
    }
}

/// Owns every live pane and the single focus pointer.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: Vec<View>,
    focused: Option<ViewName>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pane named `name`, creating it on first use.
    ///
    /// Only a fresh pane gets its properties and the focus; an existing one
    /// is returned untouched. The flag is `true` when the pane was created.
    pub fn create_or_focus(&mut self, name: ViewName, rect: Rect) -> (&mut View, bool) {
        if let Some(idx) = self.position(name) {
            return (&mut self.views[idx], false);
        }
        self.views.push(View::new(name, rect));
        self.focused = Some(name);
        let idx = self.views.len() - 1;
        (&mut self.views[idx], true)
    }

    /// Removes `name`. Destroying the focused pane leaves focus unset.
    pub fn destroy(&mut self, name: ViewName) {
        let Some(idx) = self.position(name) else {
            return;
        };
        self.views.remove(idx);
        if self.focused == Some(name) {
            self.focused = None;
        }
    }

    /// Removes every ephemeral pane.
    pub fn destroy_ephemeral(&mut self) {
        let ephemeral: Vec<ViewName> = self
            .views
            .iter()
            .map(|v| v.name)
            .filter(|name| !name.is_permanent())
            .collect();
        for name in ephemeral {
            self.destroy(name);
        }
    }

    pub fn exists(&self, name: ViewName) -> bool {
        self.position(name).is_some()
    }

    /// Focuses `name` if it exists. Returns whether focus moved.
    pub fn focus(&mut self, name: ViewName) -> bool {
        if self.exists(name) {
            self.focused = Some(name);
            true
        } else {
            false
        }
    }

    pub fn focused(&self) -> Option<ViewName> {
        self.focused
    }

    pub fn focused_view(&self) -> Option<&View> {
        self.focused.and_then(|name| self.get(name))
    }

    pub fn get(&self, name: ViewName) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn get_mut(&mut self, name: ViewName) -> Option<&mut View> {
        self.views.iter_mut().find(|v| v.name == name)
    }

    /// Live panes in creation order (drawing order).
    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn names(&self) -> Vec<ViewName> {
        self.views.iter().map(|v| v.name).collect()
    }

    /// Recomputes every pane's rectangle.
    pub fn reposition(&mut self, rect_for: impl Fn(&View) -> Rect) {
        for view in &mut self.views {
            view.rect = rect_for(view);
            view.scroll_to_cursor();
        }
    }

    fn position(&self, name: ViewName) -> Option<usize> {
        self.views.iter().position(|v| v.name == name)
    }
}

//! Keybinding dispatch table.
//!
//! Bindings are keyed by scope and chord. A view-scoped binding fires only
//! while that view is focused; global bindings fire regardless of focus.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::views::ViewName;

/// Handler identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleAnchor,
    SelectMount,
    CursorUp,
    CursorDown,
    PageDown,
    ViewSecret,
    OpenAddPrompt,
    OpenDeletePrompt,
    CloseSecret,
    BeginEdit,
    OpenSavePrompt,
    CancelEdit,
    ExternalEditor,
    ConfirmAddPath,
    CancelAddPath,
    ConfirmDelete,
    DeclineDelete,
    ConfirmSave,
    DeclineSave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    View(ViewName),
}

/// A key plus the modifiers that matter for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }.normalized()
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    /// Shift is already folded into the character for printable keys.
    fn normalized(mut self) -> Self {
        if let KeyCode::Char(ch) = self.code {
            self.modifiers.remove(KeyModifiers::SHIFT);
            if self.modifiers.contains(KeyModifiers::CONTROL) {
                self.code = KeyCode::Char(ch.to_ascii_lowercase());
            }
        }
        self
    }
}

impl From<KeyEvent> for KeyChord {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<(Scope, KeyChord), Action>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, scope: Scope, chord: KeyChord, action: Action) {
        self.bindings.insert((scope, chord), action);
    }

    /// The browser's standard bindings.
    pub fn default_bindings() -> Self {
        use Action as A;
        use KeyChord as K;
        use ViewName as V;

        let mut map = Self::new();
        map.bind(Scope::Global, K::ctrl('c'), A::Quit);

        let side = Scope::View(V::Side);
        map.bind(side, K::plain(KeyCode::Tab), A::ToggleAnchor);
        map.bind(side, K::plain(KeyCode::Enter), A::SelectMount);
        map.bind(side, K::plain(KeyCode::Up), A::CursorUp);
        map.bind(side, K::plain(KeyCode::Down), A::CursorDown);

        let main = Scope::View(V::Main);
        map.bind(main, K::plain(KeyCode::Tab), A::ToggleAnchor);
        map.bind(main, K::plain(KeyCode::Enter), A::ViewSecret);
        map.bind(main, K::plain(KeyCode::Char('a')), A::OpenAddPrompt);
        map.bind(main, K::plain(KeyCode::Char('d')), A::OpenDeletePrompt);
        map.bind(main, K::plain(KeyCode::Up), A::CursorUp);
        map.bind(main, K::plain(KeyCode::Down), A::CursorDown);
        map.bind(main, K::plain(KeyCode::Char(' ')), A::PageDown);

        let secret = Scope::View(V::Secret);
        map.bind(secret, K::plain(KeyCode::Char('q')), A::CloseSecret);
        map.bind(secret, K::plain(KeyCode::Char('e')), A::BeginEdit);

        let edit = Scope::View(V::EditSecret);
        map.bind(edit, K::ctrl('x'), A::CancelEdit);
        map.bind(edit, K::ctrl('l'), A::ExternalEditor);
        map.bind(edit, K::ctrl('s'), A::OpenSavePrompt);

        let add = Scope::View(V::AddKeyPrompt);
        map.bind(add, K::plain(KeyCode::Enter), A::ConfirmAddPath);
        map.bind(add, K::ctrl('x'), A::CancelAddPath);

        let delete = Scope::View(V::DeleteKeyPrompt);
        map.bind(delete, K::plain(KeyCode::Char('y')), A::ConfirmDelete);
        map.bind(delete, K::plain(KeyCode::Char('n')), A::DeclineDelete);

        let save = Scope::View(V::SavePrompt);
        map.bind(save, K::plain(KeyCode::Char('y')), A::ConfirmSave);
        map.bind(save, K::plain(KeyCode::Char('n')), A::DeclineSave);

        map
    }

    /// Finds the handler for `key`: the focused view's binding first, then
    /// the global one.
    pub fn resolve(&self, focused: Option<ViewName>, key: KeyEvent) -> Option<Action> {
        let chord = KeyChord::from(key);
        focused
            .and_then(|view| self.bindings.get(&(Scope::View(view), chord)))
            .or_else(|| self.bindings.get(&(Scope::Global, chord)))
            .copied()
    }
}

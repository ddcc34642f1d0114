//! Create, edit, delete and save of secrets.
//!
//! ```text
//! main ──Ret──▶ secret ──e──▶ editsecret ──C-s──▶ saveprompt ──y──▶ main
//!   │                            ▲   │                 │
//!   a                            │   C-x               n
//!   ▼                            │   ▼                 ▼
//! addkeyprompt ──Ret─────────────┘  main              main
//!
//! main ──d──▶ deletekeyprompt ──y/n──▶ main
//! ```
//!
//! Saving an existing secret re-reads it first and refuses to write if it
//! no longer equals the value the edit started from.

use serde::Serialize;
use vcmd_core::{SecretMap, SecretStore};

use super::navigation;
use crate::effects::UiEffect;
use crate::error::FatalError;
use crate::events::EditorOutcome;
use crate::intents::Intent;
use crate::state::AppState;
use crate::views::ViewName;

const STALE_MESSAGE: &str = "ERROR: Value of secret changed while editing. Write cancelled.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Editing,
    Writing,
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditMode::Editing => "Editing",
            EditMode::Writing => "Writing",
        }
    }
}

/// What an edit session will write to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// An existing secret, with the value seen when editing began.
    Existing { path: String, snapshot: SecretMap },
    /// A path that did not exist when the session began.
    New { path: String },
}

impl EditTarget {
    pub fn path(&self) -> &str {
        match self {
            EditTarget::Existing { path, .. } | EditTarget::New { path } => path,
        }
    }

    pub fn mode(&self) -> EditMode {
        match self {
            EditTarget::Existing { .. } => EditMode::Editing,
            EditTarget::New { .. } => EditMode::Writing,
        }
    }
}

/// The in-flight edit. Its text lives in the `editsecret` pane's buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub target: EditTarget,
}

/// The secret currently shown in the `secret` pane.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectedSecret {
    pub path: String,
    pub value: SecretMap,
}

/// Pretty-prints a secret with tab indentation.
pub fn render_secret(value: &SecretMap) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if value.serialize(&mut serializer).is_err() {
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

/// Opens the secret under the `main` cursor.
pub fn view_secret(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    let Some(path) = app.selection(ViewName::Main) else {
        return Vec::new();
    };

    match store.read_value(path) {
        Ok(value) => vec![
            Intent::Open {
                view: ViewName::Secret,
                content: render_secret(&value),
                cursor: None,
                hint: 0,
            },
            Intent::Inspect(Some(InspectedSecret {
                path: path.to_string(),
                value,
            })),
            Intent::Log(format!("Viewing secret contents of {path}")),
        ],
        Err(e) => vec![Intent::Log(format!("ERROR: Failed to read {path}: {e}"))],
    }
}

pub fn close_secret() -> Vec<Intent> {
    navigation::main_view()
}

/// Starts editing the secret open in the `secret` pane.
pub fn begin_edit(app: &AppState) -> Vec<Intent> {
    let Some(inspected) = &app.inspected else {
        return Vec::new();
    };
    let target = EditTarget::Existing {
        path: inspected.path.clone(),
        snapshot: inspected.value.clone(),
    };
    open_editor_pane(target, render_secret(&inspected.value))
}

/// Opens the new-key prompt seeded with the collection of the current row.
pub fn open_add_prompt(app: &AppState) -> Vec<Intent> {
    let Some(source) = app
        .selection(ViewName::Main)
        .or_else(|| app.selection(ViewName::Side))
    else {
        return Vec::new();
    };

    let seed = parent_collection(source);
    let len = seed.chars().count();
    vec![Intent::Open {
        view: ViewName::AddKeyPrompt,
        content: seed,
        cursor: Some((0, len)),
        hint: len,
    }]
}

/// `kv/app/db/pass` -> `kv/app/db/`, `kv/` -> `kv/`.
pub fn parent_collection(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => format!("{path}/"),
    }
}

/// Accepts the typed path and opens an empty buffer for the new secret.
pub fn confirm_add_path(app: &AppState) -> Vec<Intent> {
    let path = app
        .buffer_text(ViewName::AddKeyPrompt)
        .unwrap_or_default()
        .trim()
        .to_string();

    if path.is_empty() || path.ends_with('/') {
        return vec![Intent::Log(format!(
            "ERROR: Key name missing after {path:?}"
        ))];
    }

    let mut intents = vec![Intent::Close(ViewName::AddKeyPrompt)];
    intents.extend(open_editor_pane(EditTarget::New { path }, String::new()));
    intents
}

pub fn cancel_add_path(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    let path = app
        .buffer_text(ViewName::AddKeyPrompt)
        .unwrap_or_default()
        .trim()
        .to_string();
    let mut intents = vec![Intent::Log(format!("Canceled edit of {path}."))];
    intents.extend(navigation::home(app, store));
    intents
}

fn open_editor_pane(target: EditTarget, content: String) -> Vec<Intent> {
    let message = format!("{} secret contents of {}", target.mode().as_str(), target.path());
    vec![
        Intent::BeginSession(target),
        Intent::Open {
            view: ViewName::EditSecret,
            content,
            cursor: Some((0, 0)),
            hint: 0,
        },
        Intent::Log(message),
    ]
}

/// Asks before deleting the row under the `main` cursor.
pub fn open_delete_prompt(app: &AppState) -> Vec<Intent> {
    let Some(path) = app.selection(ViewName::Main) else {
        return Vec::new();
    };
    vec![Intent::Open {
        view: ViewName::DeleteKeyPrompt,
        content: format!("Delete {path}? (y/n)"),
        cursor: None,
        hint: path.chars().count(),
    }]
}

pub fn confirm_delete(app: &AppState, store: &mut dyn SecretStore) -> Vec<Intent> {
    let Some(path) = app.selection(ViewName::Main).map(ToString::to_string) else {
        return navigation::home(app, &*store);
    };

    let message = match store.delete_value(&path) {
        Ok(()) => format!("Deleted secret {path}"),
        Err(e) => format!("ERROR: Failed to delete {path}: {e}"),
    };
    let mut intents = vec![Intent::Log(message)];
    intents.extend(navigation::home(app, &*store));
    intents
}

pub fn decline_delete(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    let path = app.selection(ViewName::Main).unwrap_or_default();
    let mut intents = vec![Intent::Log(format!("Canceled delete of {path}."))];
    intents.extend(navigation::home(app, store));
    intents
}

/// Abandons the session without writing.
pub fn cancel_edit(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    let path = app
        .session
        .as_ref()
        .map(|s| s.target.path().to_string())
        .unwrap_or_default();
    let mut intents = vec![Intent::Log(format!("Canceled edit of {path}."))];
    intents.extend(navigation::home(app, store));
    intents
}

pub fn open_save_prompt(app: &AppState) -> Vec<Intent> {
    let Some(session) = &app.session else {
        return Vec::new();
    };
    let path = session.target.path();
    vec![Intent::Open {
        view: ViewName::SavePrompt,
        content: format!("Overwrite {path}? (y/n)"),
        cursor: None,
        hint: path.chars().count(),
    }]
}

pub fn decline_save(app: &AppState, store: &dyn SecretStore) -> Vec<Intent> {
    cancel_edit(app, store)
}

/// Parses the buffer and writes it, guarding existing secrets against
/// concurrent changes.
pub fn confirm_save(app: &AppState, store: &mut dyn SecretStore) -> Vec<Intent> {
    let Some(session) = &app.session else {
        return back_to_buffer(Vec::new());
    };
    let path = session.target.path();
    let text = app.buffer_text(ViewName::EditSecret).unwrap_or_default();

    let value: SecretMap = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            return back_to_buffer(vec![
                Intent::Log(format!("ERROR: {e}")),
                Intent::Log("ERROR: Write cancelled".to_string()),
            ]);
        }
    };

    if let EditTarget::Existing { snapshot, .. } = &session.target {
        match store.read_value(path) {
            Ok(current) if current == *snapshot => {}
            Err(e) if !e.is_not_found() => {
                return back_to_buffer(vec![Intent::Log(format!(
                    "ERROR: Failed to re-read {path}: {e}"
                ))]);
            }
            // Changed, or deleted by someone else.
            _ => {
                let mut intents = vec![Intent::Log(STALE_MESSAGE.to_string())];
                intents.extend(navigation::home(app, &*store));
                return intents;
            }
        }
    }

    match store.write_value(path, &value) {
        Ok(()) => {
            let mut intents = vec![Intent::Log(format!("Wrote secret contents to {path}"))];
            intents.extend(navigation::home(app, &*store));
            intents
        }
        Err(e) => back_to_buffer(vec![Intent::Log(format!(
            "ERROR: Failed to write {path}: {e}"
        ))]),
    }
}

/// Dismisses the save prompt and returns to the edit buffer.
fn back_to_buffer(mut intents: Vec<Intent>) -> Vec<Intent> {
    intents.push(Intent::Close(ViewName::SavePrompt));
    intents.push(Intent::Focus(ViewName::EditSecret));
    intents
}

pub fn request_external_editor(app: &AppState) -> Vec<Intent> {
    let contents = app.buffer_text(ViewName::EditSecret).unwrap_or_default();
    vec![Intent::Effect(UiEffect::LaunchEditor { contents })]
}

/// Loads what the external editor produced into the edit buffer.
///
/// # Errors
/// Editor failures are always fatal; an unmodified file is fatal unless the
/// settings allow it.
pub fn apply_editor_result(
    app: &AppState,
    result: Result<EditorOutcome, FatalError>,
) -> Result<Vec<Intent>, FatalError> {
    match result? {
        EditorOutcome::Modified(text) => Ok(vec![
            Intent::SetBuffer {
                view: ViewName::EditSecret,
                text: text.trim().to_string(),
            },
            Intent::Focus(ViewName::EditSecret),
        ]),
        EditorOutcome::Unmodified { path } => {
            if app.settings.fail_on_unmodified {
                Err(FatalError::EditorUnmodified { path })
            } else {
                Ok(vec![Intent::Log(
                    "Editor closed without changes".to_string(),
                )])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::layout::Rect;
    use serde_json::json;
    use vcmd_core::store::MemoryStore;

    use super::*;
    use crate::intents::apply_all;
    use crate::state::Settings;

    fn map(value: serde_json::Value) -> SecretMap {
        value.as_object().cloned().unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_mount("kv/", "kv")
            .with_secret("kv/app/db", map(json!({"user": "admin", "port": 5432})))
            .with_secret("kv/app/token", map(json!({"value": "abc"})))
    }

    /// App with `kv/` listed and the cursor on `kv/app/db`.
    fn browsing(store: &MemoryStore) -> AppState {
        let mut app = AppState::new(
            &["kv/".to_string()],
            Rect::new(0, 0, 100, 30),
            Settings::default(),
        );
        let intents = navigation::select_mount(&app, store);
        apply_all(&mut app, intents);
        app
    }

    fn editing(store: &mut MemoryStore) -> AppState {
        let mut app = browsing(store);
        let intents = view_secret(&app, &*store);
        apply_all(&mut app, intents);
        let intents = begin_edit(&app);
        apply_all(&mut app, intents);
        let intents = open_save_prompt(&app);
        apply_all(&mut app, intents);
        app
    }

    fn set_edit_buffer(app: &mut AppState, text: &str) {
        apply_all(
            app,
            vec![Intent::SetBuffer {
                view: ViewName::EditSecret,
                text: text.to_string(),
            }],
        );
    }

    fn assert_home(app: &AppState) {
        assert_eq!(app.views.names(), ViewName::PERMANENT);
        assert_eq!(app.focused(), Some(ViewName::Main));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_render_secret_uses_tabs_and_sorted_keys() {
        let rendered = render_secret(&map(json!({"b": 1, "a": "x"})));
        assert_eq!(rendered, "{\n\t\"a\": \"x\",\n\t\"b\": 1\n}");
    }

    #[test]
    fn test_view_secret_shows_contents() {
        let store = store();
        let mut app = browsing(&store);
        let intents = view_secret(&app, &store);
        apply_all(&mut app, intents);

        assert_eq!(app.focused(), Some(ViewName::Secret));
        let text = app.buffer_text(ViewName::Secret).unwrap();
        assert!(text.contains("\"user\": \"admin\""));
        assert_eq!(
            app.log.last_message(),
            Some("Viewing secret contents of kv/app/db")
        );
    }

    #[test]
    fn test_view_secret_read_error_is_logged() {
        let mut store = store();
        store.deny("kv/app/db");
        let mut app = browsing(&store);
        let intents = view_secret(&app, &store);
        apply_all(&mut app, intents);

        assert!(!app.views.exists(ViewName::Secret));
        assert!(app.log.last_message().unwrap().starts_with("ERROR:"));
    }

    #[test]
    fn test_begin_edit_seeds_buffer_and_snapshot() {
        let store = store();
        let mut app = browsing(&store);
        let intents = view_secret(&app, &store);
        apply_all(&mut app, intents);
        let intents = begin_edit(&app);
        apply_all(&mut app, intents);

        assert_eq!(app.focused(), Some(ViewName::EditSecret));
        assert_eq!(
            app.buffer_text(ViewName::EditSecret),
            app.buffer_text(ViewName::Secret)
        );
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.target.mode(), EditMode::Editing);
        assert_eq!(
            session.target,
            EditTarget::Existing {
                path: "kv/app/db".into(),
                snapshot: map(json!({"user": "admin", "port": 5432})),
            }
        );
        assert_eq!(
            app.log.last_message(),
            Some("Editing secret contents of kv/app/db")
        );
    }

    #[test]
    fn test_save_unchanged_store_writes() {
        let mut store = store();
        let mut app = editing(&mut store);
        set_edit_buffer(&mut app, r#"{"user": "root", "port": 5432}"#);

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().writes, 1);
        assert_eq!(
            store.get("kv/app/db"),
            Some(&map(json!({"user": "root", "port": 5432})))
        );
        assert!(
            app.log
                .messages()
                .any(|m| m == "Wrote secret contents to kv/app/db")
        );
        assert_home(&app);
    }

    #[test]
    fn test_save_key_order_change_is_not_stale() {
        let mut store = store();
        let mut app = editing(&mut store);
        // Same value re-inserted with keys in the opposite order.
        let mut reordered = SecretMap::new();
        reordered.insert("port".into(), json!(5432));
        reordered.insert("user".into(), json!("admin"));
        store.insert("kv/app/db", reordered);
        set_edit_buffer(&mut app, r#"{"user": "root"}"#);

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);
        assert_eq!(store.counts().writes, 1);
    }

    #[test]
    fn test_save_after_concurrent_change_is_cancelled() {
        let mut store = store();
        let mut app = editing(&mut store);
        store.insert("kv/app/db", map(json!({"user": "admin", "port": "5432"})));
        set_edit_buffer(&mut app, r#"{"user": "root"}"#);

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().writes, 0);
        assert!(app.log.messages().any(|m| m == STALE_MESSAGE));
        assert_home(&app);
    }

    #[test]
    fn test_save_after_concurrent_delete_is_cancelled() {
        let mut store = store();
        let mut app = editing(&mut store);
        store.delete_value("kv/app/db").unwrap();

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().writes, 0);
        assert!(app.log.messages().any(|m| m == STALE_MESSAGE));
    }

    #[test]
    fn test_parse_failure_keeps_buffer_and_never_writes() {
        let mut store = store();
        let mut app = editing(&mut store);
        set_edit_buffer(&mut app, "{not json");
        let reads_before = store.counts().reads;

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().writes, 0);
        assert_eq!(store.counts().reads, reads_before);
        assert_eq!(app.focused(), Some(ViewName::EditSecret));
        assert!(!app.views.exists(ViewName::SavePrompt));
        assert_eq!(
            app.buffer_text(ViewName::EditSecret).as_deref(),
            Some("{not json")
        );
        assert!(app.session.is_some());
        assert_eq!(app.log.last_message(), Some("ERROR: Write cancelled"));
    }

    #[test]
    fn test_write_failure_keeps_session() {
        let mut store = store();
        let mut app = editing(&mut store);
        store.fail_writes(true);

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(app.focused(), Some(ViewName::EditSecret));
        assert!(app.session.is_some());
        assert!(!app.views.exists(ViewName::SavePrompt));
        assert!(app.log.last_message().unwrap().starts_with("ERROR:"));
    }

    #[test]
    fn test_reread_failure_keeps_session() {
        let mut store = store();
        let mut app = editing(&mut store);
        store.deny("kv/app/db");

        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().writes, 0);
        assert!(app.session.is_some());
        assert_eq!(app.focused(), Some(ViewName::EditSecret));
        assert!(!app.views.exists(ViewName::SavePrompt));
        assert!(
            app.log
                .last_message()
                .unwrap()
                .starts_with("ERROR: Failed to re-read kv/app/db")
        );
    }

    #[test]
    fn test_add_flow_writes_without_reread() {
        let mut store = store();
        let mut app = browsing(&store);

        let intents = open_add_prompt(&app);
        apply_all(&mut app, intents);
        assert_eq!(app.focused(), Some(ViewName::AddKeyPrompt));
        assert_eq!(
            app.buffer_text(ViewName::AddKeyPrompt).as_deref(),
            Some("kv/app/")
        );
        let prompt = app.views.get(ViewName::AddKeyPrompt).unwrap();
        assert_eq!(prompt.buffer.cursor(), (0, 7));

        apply_all(
            &mut app,
            vec![Intent::SetBuffer {
                view: ViewName::AddKeyPrompt,
                text: "kv/app/new ".into(),
            }],
        );
        let intents = confirm_add_path(&app);
        apply_all(&mut app, intents);
        assert!(!app.views.exists(ViewName::AddKeyPrompt));
        assert_eq!(app.focused(), Some(ViewName::EditSecret));
        assert_eq!(
            app.session.as_ref().unwrap().target,
            EditTarget::New {
                path: "kv/app/new".into()
            }
        );
        assert_eq!(
            app.log.last_message(),
            Some("Writing secret contents of kv/app/new")
        );

        set_edit_buffer(&mut app, r#"{"a": 1}"#);
        let intents = open_save_prompt(&app);
        apply_all(&mut app, intents);
        let reads_before = store.counts().reads;
        let intents = confirm_save(&app, &mut store);
        apply_all(&mut app, intents);

        assert_eq!(store.counts().reads, reads_before);
        assert_eq!(store.get("kv/app/new"), Some(&map(json!({"a": 1}))));
        assert_home(&app);
    }

    #[test]
    fn test_add_prompt_rejects_empty_leaf() {
        let store = store();
        let mut app = browsing(&store);
        let intents = open_add_prompt(&app);
        apply_all(&mut app, intents);

        let intents = confirm_add_path(&app);
        apply_all(&mut app, intents);
        assert_eq!(app.focused(), Some(ViewName::AddKeyPrompt));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_add_prompt_cancel_returns_home() {
        let store = store();
        let mut app = browsing(&store);
        let intents = open_add_prompt(&app);
        apply_all(&mut app, intents);
        apply_all(
            &mut app,
            vec![Intent::SetBuffer {
                view: ViewName::AddKeyPrompt,
                text: "kv/app/draft".into(),
            }],
        );

        let intents = cancel_add_path(&app, &store);
        apply_all(&mut app, intents);

        assert!(app.log.messages().any(|m| m == "Canceled edit of kv/app/draft."));
        assert_home(&app);
        assert_eq!(store.counts().writes, 0);
    }

    #[test]
    fn test_add_prompt_falls_back_to_mount() {
        let store = MemoryStore::new().with_mount("empty/", "kv");
        let mut app = AppState::new(
            &["empty/".to_string()],
            Rect::new(0, 0, 100, 30),
            Settings::default(),
        );
        let intents = navigation::select_mount(&app, &store);
        apply_all(&mut app, intents);

        let intents = open_add_prompt(&app);
        apply_all(&mut app, intents);
        assert_eq!(
            app.buffer_text(ViewName::AddKeyPrompt).as_deref(),
            Some("empty/")
        );
    }

    #[test]
    fn test_parent_collection() {
        assert_eq!(parent_collection("kv/app/db/pass"), "kv/app/db/");
        assert_eq!(parent_collection("kv/"), "kv/");
        assert_eq!(parent_collection("kv/app-1/x.y"), "kv/app-1/");
        assert_eq!(parent_collection("bare"), "bare/");
    }

    #[test]
    fn test_delete_confirm_removes_and_returns_home() {
        let mut store = store();
        let mut app = browsing(&store);
        let intents = open_delete_prompt(&app);
        apply_all(&mut app, intents);
        assert_eq!(app.focused(), Some(ViewName::DeleteKeyPrompt));
        assert_eq!(
            app.buffer_text(ViewName::DeleteKeyPrompt).as_deref(),
            Some("Delete kv/app/db? (y/n)")
        );

        let intents = confirm_delete(&app, &mut store);
        apply_all(&mut app, intents);
        assert!(store.get("kv/app/db").is_none());
        assert!(app.log.messages().any(|m| m == "Deleted secret kv/app/db"));
        assert_home(&app);
        assert_eq!(app.selection(ViewName::Main), Some("kv/app/token"));
    }

    #[test]
    fn test_delete_failure_is_logged_and_returns_home() {
        let mut store = store();
        store.fail_deletes(true);
        let mut app = browsing(&store);
        let intents = open_delete_prompt(&app);
        apply_all(&mut app, intents);

        let intents = confirm_delete(&app, &mut store);
        apply_all(&mut app, intents);

        assert!(store.get("kv/app/db").is_some());
        assert!(
            app.log
                .messages()
                .any(|m| m.starts_with("ERROR: Failed to delete kv/app/db"))
        );
        assert_home(&app);
        assert_eq!(app.selection(ViewName::Main), Some("kv/app/db"));
    }

    #[test]
    fn test_delete_decline_keeps_secret() {
        let store = store();
        let mut app = browsing(&store);
        let intents = open_delete_prompt(&app);
        apply_all(&mut app, intents);

        let intents = decline_delete(&app, &store);
        apply_all(&mut app, intents);
        assert_eq!(store.counts().deletes, 0);
        assert!(
            app.log
                .messages()
                .any(|m| m == "Canceled delete of kv/app/db.")
        );
        assert_home(&app);
    }

    #[test]
    fn test_delete_without_selection_shows_nothing() {
        let store = MemoryStore::new().with_mount("empty/", "kv");
        let mut app = AppState::new(
            &["empty/".to_string()],
            Rect::new(0, 0, 100, 30),
            Settings::default(),
        );
        let intents = navigation::select_mount(&app, &store);
        apply_all(&mut app, intents);
        assert!(open_delete_prompt(&app).is_empty());
    }

    #[test]
    fn test_cancel_edit_logs_path() {
        let mut store = store();
        let mut app = editing(&mut store);
        let intents = decline_save(&app, &store);
        apply_all(&mut app, intents);

        assert!(app.log.messages().any(|m| m == "Canceled edit of kv/app/db."));
        assert_home(&app);
        assert_eq!(store.counts().writes, 0);
    }

    #[test]
    fn test_editor_result_reloads_trimmed_text() {
        let mut store = store();
        let mut app = editing(&mut store);
        apply_all(&mut app, vec![Intent::Close(ViewName::SavePrompt)]);

        let intents =
            apply_editor_result(&app, Ok(EditorOutcome::Modified("\n{\"a\": 1}\n\n".into())))
                .unwrap();
        apply_all(&mut app, intents);
        assert_eq!(
            app.buffer_text(ViewName::EditSecret).as_deref(),
            Some("{\"a\": 1}")
        );
        assert_eq!(app.focused(), Some(ViewName::EditSecret));
    }

    #[test]
    fn test_editor_unmodified_policy() {
        let store = store();
        let mut app = browsing(&store);
        let outcome = || {
            Ok(EditorOutcome::Unmodified {
                path: PathBuf::from("/tmp/vault-commander-x"),
            })
        };

        let err = apply_editor_result(&app, outcome()).unwrap_err();
        assert!(matches!(err, FatalError::EditorUnmodified { .. }));

        app.settings.fail_on_unmodified = false;
        let intents = apply_editor_result(&app, outcome()).unwrap();
        assert_eq!(intents.len(), 1);
    }

    #[test]
    fn test_editor_failure_is_fatal() {
        let store = store();
        let app = browsing(&store);
        let result = Err(FatalError::EditorFailed {
            command: "vim".into(),
            status: "exit status: 1".into(),
        });
        assert!(apply_editor_result(&app, result).is_err());
    }
}

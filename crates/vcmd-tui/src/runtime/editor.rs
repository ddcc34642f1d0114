//! External editor hand-off.
//!
//! The buffer is written to a private temporary file, the editor runs against
//! it in the foreground, and the file is read back only when its modification
//! time moved forward. The runtime suspends the terminal around this call.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use tempfile::NamedTempFile;

use crate::error::FatalError;
use crate::events::EditorOutcome;

const TEMP_PREFIX: &str = "vault-commander-";

/// Runs `command` on a temporary file holding `contents`.
///
/// `command` is split with shell quoting rules; the file path is appended as
/// the last argument.
///
/// # Errors
/// Every failure is fatal: a bad command line, a spawn failure, a non-zero
/// exit or an I/O error on the temporary file.
pub fn edit_in_external(command: &str, contents: &str) -> Result<EditorOutcome, FatalError> {
    let parts = shlex::split(command).ok_or_else(|| FatalError::EditorCommand(command.into()))?;
    let (program, args) = parts
        .split_first()
        .ok_or_else(|| FatalError::EditorCommand(command.into()))?;

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile()
        .map_err(FatalError::EditorTempFile)?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(FatalError::EditorTempFile)?;
    let before = modified_at(file.path())?;

    tracing::debug!(editor = %command, path = %file.path().display(), "launching editor");
    let status = Command::new(program)
        .args(args)
        .arg(file.path())
        .status()
        .map_err(|source| FatalError::EditorSpawn {
            command: command.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(FatalError::EditorFailed {
            command: command.to_string(),
            status: status.to_string(),
        });
    }

    read_back(&file, before)
}

fn read_back(file: &NamedTempFile, before: SystemTime) -> Result<EditorOutcome, FatalError> {
    let after = modified_at(file.path())?;
    if after <= before {
        return Ok(EditorOutcome::Unmodified {
            path: file.path().to_path_buf(),
        });
    }
    let text = fs::read_to_string(file.path()).map_err(FatalError::EditorTempFile)?;
    Ok(EditorOutcome::Modified(text))
}

fn modified_at(path: &Path) -> Result<SystemTime, FatalError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(FatalError::EditorTempFile)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_exit_without_saving_is_unmodified() {
        let outcome = edit_in_external("true", "{}").unwrap();
        let EditorOutcome::Unmodified { path } = &outcome else {
            panic!("expected unmodified, got {outcome:?}");
        };
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(TEMP_PREFIX));
    }

    #[test]
    fn test_saved_file_is_read_back() {
        let command = r#"sh -c 'sleep 1; printf "{\"a\": 1}\n" > "$0"'"#;
        let outcome = edit_in_external(command, "{}").unwrap();
        assert_eq!(outcome, EditorOutcome::Modified("{\"a\": 1}\n".into()));
    }

    #[test]
    fn test_editor_sees_buffer_contents() {
        let command = r#"sh -c 'sleep 1; grep -q hello "$0" && echo ok > "$0"'"#;
        let outcome = edit_in_external(command, "hello\n").unwrap();
        assert_eq!(outcome, EditorOutcome::Modified("ok\n".into()));
    }

    #[test]
    fn test_non_zero_exit_is_fatal() {
        let err = edit_in_external("false", "{}").unwrap_err();
        assert!(matches!(err, FatalError::EditorFailed { .. }));
    }

    #[test]
    fn test_missing_program_is_fatal() {
        let err = edit_in_external("vcmd-no-such-editor-binary", "{}").unwrap_err();
        assert!(matches!(err, FatalError::EditorSpawn { .. }));
    }

    #[test]
    fn test_bad_command_lines() {
        assert!(matches!(
            edit_in_external("", "{}"),
            Err(FatalError::EditorCommand(_))
        ));
        assert!(matches!(
            edit_in_external("vim 'unterminated", "{}"),
            Err(FatalError::EditorCommand(_))
        ));
    }
}

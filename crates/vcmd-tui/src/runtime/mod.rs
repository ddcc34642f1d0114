//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `editor.rs`: External editor hand-off

pub mod editor;

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::layout::Rect;
use vcmd_core::SecretStore;

use crate::effects::UiEffect;
use crate::error::FatalError;
use crate::events::{EditorOutcome, UiEvent};
use crate::state::{AppState, Settings};
use crate::terminal::{self, TuiTerminal};
use crate::{render, update};

/// How long to block waiting for terminal input before redrawing.
pub const POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the state and the store. Terminal state is restored on
/// drop or panic.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    pub state: AppState,
    store: Box<dyn SecretStore>,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the initial layout listing
    /// `mounts`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(store: Box<dyn SecretStore>, mounts: &[String], settings: Settings) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let size = terminal.size().context("Failed to read terminal size")?;
        let state = AppState::new(mounts, Rect::new(0, 0, size.width, size.height), settings);

        Ok(Self {
            terminal,
            state,
            store,
        })
    }

    /// Jumps into `mount` before the first frame, when given.
    ///
    /// # Errors
    /// Fails when the mount is not in the side pane.
    pub fn start(&mut self, mount: Option<&str>) -> Result<()> {
        update::start(&mut self.state, self.store.as_ref(), mount)?;
        Ok(())
    }

    /// Runs the main event loop until the user quits or a fatal error occurs.
    ///
    /// # Errors
    /// Returns terminal I/O errors and every [`FatalError`].
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.terminal.draw(|frame| render::render(&self.state, frame))?;

            for event in Self::collect_events()? {
                self.dispatch_event(event)?;
                if self.state.should_quit {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Blocks for the next terminal event, then drains whatever else is
    /// already buffered.
    fn collect_events() -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        if event::poll(POLL_DURATION)? {
            events.extend(Self::translate(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.extend(Self::translate(event::read()?));
            }
        }
        Ok(events)
    }

    fn translate(event: Event) -> Option<UiEvent> {
        match event {
            Event::Key(key) => Some(UiEvent::Key(key)),
            Event::Paste(text) => Some(UiEvent::Paste(text)),
            Event::Resize(width, height) => Some(UiEvent::Resize { width, height }),
            _ => None,
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) -> Result<(), FatalError> {
        let effects = update::update(&mut self.state, self.store.as_mut(), event)?;
        for effect in effects {
            self.execute_effect(effect)?;
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: UiEffect) -> Result<(), FatalError> {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
                Ok(())
            }
            UiEffect::LaunchEditor { contents } => {
                let outcome = self.run_editor(&contents)?;
                self.dispatch_event(UiEvent::EditorFinished(outcome))
            }
        }
    }

    /// Hands the terminal to the editor and takes it back on every path.
    fn run_editor(
        &mut self,
        contents: &str,
    ) -> Result<Result<EditorOutcome, FatalError>, FatalError> {
        terminal::suspend().map_err(FatalError::Terminal)?;
        let outcome = editor::edit_in_external(&self.state.settings.editor_command, contents);
        terminal::resume(&mut self.terminal).map_err(FatalError::Terminal)?;
        if let Err(err) = &outcome {
            tracing::error!(error = %err, "external editor failed");
        }
        Ok(outcome)
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

//! Shared helpers used across rendering and editing.

pub mod text;

pub use text::{TAB_WIDTH, display_width_until, expand_tabs, wrap_to_width};

//! Feature handlers.
//!
//! - `navigation`: focus switching, cursor movement, mount listing
//! - `workflow`: view/edit/add/delete/save of secrets
//! - `activity_log`: the user-visible event log

pub mod activity_log;
pub mod navigation;
pub mod workflow;

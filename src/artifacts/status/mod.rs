//! Working-directory classification
//!
//! - `inspector`: decides which files on disk are untracked
//! - `status_info`: gathers the four sections printed by `status`

pub mod inspector;
pub mod status_info;

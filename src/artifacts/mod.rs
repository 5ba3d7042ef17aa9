//! Version-control data structures and algorithms
//!
//! - `branch`: branch names
//! - `core`: output routing (pager)
//! - `log`: history traversal
//! - `merge`: three-way resolution and conflict content
//! - `objects`: blob and commit objects
//! - `status`: working-directory classification

pub mod branch;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;

//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk from a commit down to the root
//! - `graph`: scans over every stored commit (global log, find by message)

pub mod graph;
pub mod rev_list;

//! Three-way merge
//!
//! - `resolution`: per-path decision from the current, other and split
//!   snapshots
//! - `conflict`: content written for conflicting paths
//!
//! The merge base is the split point recorded when the merged branch was
//! created; it is not recomputed from the commit graph.

pub mod conflict;
pub mod resolution;

/// What a merge did, as reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other branch's head is the split point
    AlreadyAncestor,
    /// The current branch's head is the split point and was moved forward
    FastForward,
    /// A two-parent commit was created
    Merged { conflicted: bool },
}

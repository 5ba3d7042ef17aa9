//! Repository object types
//!
//! Everything the repository remembers permanently is an immutable object
//! identified by a SHA-1 digest:
//!
//! - **Blob**: one file's bytes at the moment it was staged, together with its path
//! - **Commit**: a full snapshot (path to blob mapping) plus parent link(s)
//!
//! Objects are stored as `<type> <size>\0<payload>`; the identity is computed
//! from a separate, smaller preimage (see [`object::Object::identity`]).

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated identifier shown for merge parents
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

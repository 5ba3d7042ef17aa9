//! Repository areas
//!
//! - `database`: content-addressed object stores
//! - `index`: staging area
//! - `refs`: branch table and split points
//! - `repository`: context owning every area, with state load and save
//! - `workspace`: working directory file operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;

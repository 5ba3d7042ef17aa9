//! Commit object
//!
//! Commits are immutable snapshot nodes. Each one carries the complete
//! path-to-blob mapping of the tracked files at that point (not a diff), a
//! first parent (absent only for the root sentinel) and, for merge commits, a
//! second parent.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! merge <second-parent-sha>
//! branch <branch-name>
//! date <timestamp>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Paths in `blob` lines escape `\\`, `\n` and `\r` so every entry stays on
//! one line. The message is everything after the blank line, byte for byte.
//!
//! ## Identity
//!
//! The identity covers only the message, branch, timestamp and second parent.
//! Two commits created with identical fields in the same second collide.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Message of the root sentinel commit
pub const ROOT_MESSAGE: &str = "initial commit";

/// Display and hashing format of commit timestamps
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Environment variable overriding the commit timestamp
pub const COMMIT_DATE_ENV: &str = "GITLET_COMMIT_DATE";

/// Offset the root sentinel is displayed in (-08:00)
const ROOT_OFFSET_SECONDS: i32 = 8 * 3600;

/// Snapshot of every tracked path
pub type BlobMap = BTreeMap<PathBuf, ObjectId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    branch: BranchName,
    parent: Option<ObjectId>,
    merge_parent: Option<ObjectId>,
    blobs: BlobMap,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        branch: BranchName,
        parent: Option<ObjectId>,
        merge_parent: Option<ObjectId>,
        blobs: BlobMap,
    ) -> Self {
        Commit {
            message,
            timestamp,
            branch,
            parent,
            merge_parent,
            blobs,
        }
    }

    /// The fixed sentinel every history starts from
    pub fn root() -> anyhow::Result<Self> {
        let offset = FixedOffset::west_opt(ROOT_OFFSET_SECONDS)
            .context("invalid root commit offset")?;
        let timestamp = DateTime::from_timestamp(0, 0)
            .context("invalid root commit timestamp")?
            .with_timezone(&offset);

        Ok(Commit::new(
            ROOT_MESSAGE.to_string(),
            timestamp,
            BranchName::default_branch(),
            None,
            None,
            BlobMap::new(),
        ))
    }

    /// Commit timestamp from `GITLET_COMMIT_DATE`, or the local time
    ///
    /// Accepts RFC 2822 or `%Y-%m-%d %H:%M:%S %z`.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp as shown in logs, e.g. `Wed Dec 31 16:00:00 1969 -0800`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn merge_parent(&self) -> Option<&ObjectId> {
        self.merge_parent.as_ref()
    }

    pub fn blobs(&self) -> &BlobMap {
        &self.blobs
    }

    pub fn blob(&self, path: &Path) -> Option<&ObjectId> {
        self.blobs.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.blobs.contains_key(path)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_merge(&self) -> bool {
        self.merge_parent.is_some()
    }

    fn parse_header_line(&mut self, line: &str) -> anyhow::Result<()> {
        let (key, value) = line
            .split_once(' ')
            .with_context(|| format!("malformed commit header line: {line}"))?;

        match key {
            "parent" => self.parent = Some(ObjectId::try_parse(value.to_string())?),
            "merge" => self.merge_parent = Some(ObjectId::try_parse(value.to_string())?),
            "branch" => self.branch = BranchName::try_parse(value.to_string())?,
            "date" => {
                self.timestamp = DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                    .with_context(|| format!("malformed commit date: {value}"))?
            }
            "blob" => {
                let (oid, path) = value
                    .split_once(' ')
                    .with_context(|| format!("malformed blob entry: {value}"))?;
                self.blobs.insert(
                    PathBuf::from(unescape_path(path)?),
                    ObjectId::try_parse(oid.to_string())?,
                );
            }
            _ => anyhow::bail!("unknown commit header: {key}"),
        }

        Ok(())
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = Vec::new();

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        if let Some(merge_parent) = &self.merge_parent {
            lines.push(format!("merge {}", merge_parent));
        }
        lines.push(format!("branch {}", self.branch));
        lines.push(format!("date {}", self.readable_timestamp()));
        for (path, oid) in &self.blobs {
            let path = path
                .to_str()
                .with_context(|| format!("path is not valid UTF-8: {:?}", path))?;
            lines.push(format!("blob {} {}", oid, escape_path(path)));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(frame(self.object_type(), lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut commit = Commit::root()?;
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                anyhow::bail!("truncated commit object: missing message separator");
            }

            let line = line.strip_suffix('\n').unwrap_or(&line);
            if line.is_empty() {
                break;
            }
            commit.parse_header_line(line)?;
        }

        commit.message.clear();
        reader.read_to_string(&mut commit.message)?;

        Ok(commit)
    }
}

fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn unescape_path(escaped: &str) -> anyhow::Result<String> {
    let mut path = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            path.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => path.push('\\'),
            Some('n') => path.push('\n'),
            Some('r') => path.push('\r'),
            other => anyhow::bail!("bad escape in blob path {escaped:?}: {other:?}"),
        }
    }

    Ok(path)
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn identity(&self) -> anyhow::Result<Bytes> {
        let mut fields = vec![
            self.object_type().name().to_string(),
            self.message.clone(),
            self.branch.to_string(),
            self.readable_timestamp(),
        ];
        if let Some(merge_parent) = &self.merge_parent {
            fields.push(merge_parent.to_string());
        }

        Ok(Bytes::from(fields.join("\0")))
    }
}

//! Blob object
//!
//! A blob is the snapshot of one file's bytes at the moment it was staged.
//! Unlike git, the path is part of the blob: two files with the same content
//! at different paths are different blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<path>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::borrow::Cow;
use std::io::BufRead;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Path relative to the repository root
    path: PathBuf,
    /// Raw file content
    data: Bytes,
}

impl Blob {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Textual view of the content, for display and conflict markers
    pub fn content(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    fn path_bytes(&self) -> anyhow::Result<&[u8]> {
        self.path
            .to_str()
            .map(str::as_bytes)
            .with_context(|| format!("path is not valid UTF-8: {:?}", self.path))
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut payload = Vec::with_capacity(self.data.len() + 64);
        payload.extend_from_slice(self.path_bytes()?);
        payload.push(b'\0');
        payload.extend_from_slice(&self.data);

        Ok(frame(self.object_type(), &payload))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut path = Vec::new();
        reader.read_until(b'\0', &mut path)?;
        if path.pop() != Some(b'\0') {
            anyhow::bail!("truncated blob object: missing path terminator");
        }
        let path = String::from_utf8(path).context("blob path is not valid UTF-8")?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        Ok(Self::new(PathBuf::from(path), Bytes::from(data)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn identity(&self) -> anyhow::Result<Bytes> {
        let mut preimage = Vec::with_capacity(self.data.len() + 64);
        preimage.extend_from_slice(b"blob\0");
        preimage.extend_from_slice(self.path_bytes()?);
        preimage.push(b'\0');
        preimage.extend_from_slice(&self.data);

        Ok(Bytes::from(preimage))
    }
}

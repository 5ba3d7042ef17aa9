//! Content-addressed object store
//!
//! A `Database` is one directory of immutable, zlib-compressed objects keyed
//! by their identity (`<2 hex>/<38 hex>`). The repository keeps three of them:
//! committed objects, staged blob copies and copies of blobs pending removal.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::{ObjectHeader, ObjectType};
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(GitletError::ObjectNotFound(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    /// Persist an object unless one with the same identity already exists.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
            debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    /// Copy an already stored object into another store.
    pub fn copy_to(&self, object_id: &ObjectId, target: &Database) -> anyhow::Result<()> {
        if target.contains(object_id) {
            return Ok(());
        }

        let object_path = target.path.join(object_id.to_path());
        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )?;

        let object_content = self.load(object_id)?;
        target.write_object(object_path, object_content)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            ObjectBox::Commit(_) => anyhow::bail!("object {} is not a blob", object_id),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            ObjectBox::Blob(_) => anyhow::bail!("object {} is not a commit", object_id),
        }
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    /// Every stored identity, sorted.
    pub fn object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut object_ids = WalkDir::new(&self.path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.path).ok()?;
                let id = relative
                    .iter()
                    .map(|component| component.to_string_lossy())
                    .collect::<String>();
                ObjectId::try_parse(id).ok()
            })
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    /// Every stored commit identity, sorted.
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commit_ids = Vec::new();

        for object_id in self.object_ids()? {
            if self.object_type(&object_id)? == ObjectType::Commit {
                commit_ids.push(object_id);
            }
        }

        Ok(commit_ids)
    }

    /// Resolve a full or abbreviated commit identity.
    ///
    /// An exact stored identity wins. Otherwise commit identities containing
    /// `partial` are scanned in sorted order and the first one is returned.
    pub fn resolve_prefix(&self, partial: &str) -> anyhow::Result<ObjectId> {
        let partial = partial.to_ascii_lowercase();
        if partial.is_empty() {
            return Err(GitletError::NoSuchCommit.into());
        }

        if let Ok(object_id) = ObjectId::try_parse(partial.clone())
            && self.contains(&object_id)
            && self.object_type(&object_id)? == ObjectType::Commit
        {
            return Ok(object_id);
        }

        let matches = self
            .commit_ids()?
            .into_iter()
            .filter(|object_id| object_id.as_ref().contains(&partial))
            .collect::<Vec<_>>();

        if matches.len() > 1 {
            warn!(
                prefix = %partial,
                candidates = matches.len(),
                "ambiguous commit id, using the first match"
            );
        }

        matches
            .into_iter()
            .next()
            .ok_or_else(|| GitletError::NoSuchCommit.into())
    }

    /// Delete a stored object if present.
    pub fn discard(&self, object_id: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.is_file() {
            std::fs::remove_file(&object_path).context(format!(
                "Unable to delete object file {}",
                object_path.display()
            ))?;
        }

        Ok(())
    }

    /// Delete every stored object, keeping the store directory.
    pub fn purge(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_dir_all(&self.path)
                .context(format!("Unable to purge {}", self.path.display()))?;
        }

        std::fs::create_dir_all(&self.path)
            .context(format!("Unable to create {}", self.path.display()))
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let content_length = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let header = ObjectHeader::read(&mut object_reader)?;
        let payload_length = content_length - object_reader.position() as usize;
        if header.size != payload_length {
            anyhow::bail!(
                "object {} is corrupt: header says {} bytes, found {}",
                object_id,
                header.size,
                payload_length
            );
        }

        Ok((header.object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // readers never observe a partially written object
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    pub(crate) fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

use anyhow::Context;
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> anyhow::Result<Self> {
        [ObjectType::Blob, ObjectType::Commit]
            .into_iter()
            .find(|object_type| object_type.name() == name)
            .with_context(|| format!("unknown object kind {name:?}"))
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The `<type> <size>\0` prefix of every stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub object_type: ObjectType,
    pub size: usize,
}

impl ObjectHeader {
    /// Consume the header, leaving the reader at the start of the payload.
    pub fn read(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let object_type = read_field(reader, b' ')?.parse()?;
        let size = read_field(reader, b'\0')?;
        let size = size
            .parse()
            .with_context(|| format!("bad object size {size:?}"))?;

        Ok(ObjectHeader { object_type, size })
    }
}

fn read_field(reader: &mut impl BufRead, delimiter: u8) -> anyhow::Result<String> {
    let mut field = Vec::new();
    reader.read_until(delimiter, &mut field)?;

    if field.pop() != Some(delimiter) {
        anyhow::bail!("truncated object header");
    }

    String::from_utf8(field).context("object header is not UTF-8")
}

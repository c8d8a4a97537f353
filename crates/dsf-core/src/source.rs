//! Named text blobs fed to the batch aggregator

use std::io::{Cursor, Read, Seek};

use crate::error::Result;

/// Listing information for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Position in enumeration order
    pub index: usize,
    /// Full entry name, including any directory prefix
    pub name: String,
    /// Directory entries carry no content
    pub is_dir: bool,
}

/// A source of named entries, enumerated in a stable order
pub trait EntrySource {
    /// List all entries in enumeration order
    fn list(&mut self) -> Result<Vec<EntryInfo>>;

    /// Read the raw bytes of the entry at `index`
    fn read(&mut self, index: usize) -> Result<Vec<u8>>;
}

/// Entries of a ZIP archive, in central-directory order
pub struct ZipEntrySource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> ZipEntrySource<R> {
    /// Open an archive from a seekable reader
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: zip::ZipArchive::new(reader)?,
        })
    }

    /// Number of entries, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the archive has no entries
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<'a> ZipEntrySource<Cursor<&'a [u8]>> {
    /// Open an archive held in memory
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> EntrySource for ZipEntrySource<R> {
    fn list(&mut self) -> Result<Vec<EntryInfo>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self.archive.by_index_raw(index)?;
            entries.push(EntryInfo {
                index,
                name: file.name().to_string(),
                is_dir: file.is_dir(),
            });
        }
        Ok(entries)
    }

    fn read(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut file = self.archive.by_index(index)?;
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Entries held in memory, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryEntrySource {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryEntrySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn push(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.push((name.into(), content.into()));
    }

    /// Builder-style [`push`](Self::push)
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.push(name, content);
        self
    }
}

impl EntrySource for MemoryEntrySource {
    fn list(&mut self) -> Result<Vec<EntryInfo>> {
        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(index, (name, _))| EntryInfo {
                index,
                name: name.clone(),
                is_dir: name.ends_with('/'),
            })
            .collect())
    }

    fn read(&mut self, index: usize) -> Result<Vec<u8>> {
        self.entries
            .get(index)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no entry at index {index}"),
                )
                .into()
            })
    }
}

/// Decode entry bytes as UTF-8, dropping a leading byte-order mark
pub fn decode_text(bytes: Vec<u8>) -> Option<String> {
    let mut text = String::from_utf8(bytes).ok()?;
    if text.starts_with('\u{feff}') {
        text.remove(0);
    }
    Some(text)
}

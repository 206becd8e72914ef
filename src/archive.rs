//! Type archives: caller-supplied tarballs holding type descriptors.
//!
//! An [`ArchiveBlob`] is read in full by [`ArchiveBlob::expand`]; every file
//! entry becomes a `(path, bytes)` resource. Gzip compression is detected from
//! the magic bytes. The [`ArchiveExpander`] makes sure a loader expands its
//! archives into the type provider at most once.

use std::io::Read;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, info};

use crate::error::{Result, SuggestionError};
use crate::registry::TypeProvider;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone)]
pub struct ArchiveBlob {
    label: String,
    bytes: Vec<u8>,
}

impl ArchiveBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self::named("archive", bytes)
    }
    pub fn named(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
    pub fn is_compressed(&self) -> bool {
        self.bytes.starts_with(&GZIP_MAGIC)
    }
    /// Reads every entry. Directories are skipped. Any read failure means the
    /// archive cannot be trusted and fails the whole expansion.
    pub fn expand(&self) -> Result<ExpandedArchive> {
        let reader: Box<dyn Read + '_> = if self.is_compressed() {
            Box::new(GzDecoder::new(self.bytes.as_slice()))
        } else {
            Box::new(self.bytes.as_slice())
        };
        let mut archive = Archive::new(reader);
        let mut entries = Vec::new();
        for entry in archive.entries().map_err(|e| self.read_error(e))? {
            let mut entry = entry.map_err(|e| self.read_error(e))?;
            if entry.header().entry_type().is_dir() {
                continue;
            }
            let path = entry
                .path()
                .map_err(|e| self.read_error(e))?
                .to_string_lossy()
                .replace('\\', "/");
            let mut bytes = Vec::new();
            entry
                .read_to_end(&mut bytes)
                .map_err(|e| self.read_error(e))?;
            debug!(archive = %self.label, %path, size = bytes.len(), "read archive entry");
            entries.push(ArchiveEntry { path, bytes });
        }
        Ok(ExpandedArchive {
            label: self.label.clone(),
            entries,
        })
    }
    fn read_error(&self, e: std::io::Error) -> SuggestionError {
        SuggestionError::ArchiveRead(format!("{}: {}", self.label, e))
    }
}

impl From<Vec<u8>> for ArchiveBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    path: String,
    bytes: Vec<u8>,
}
impl ArchiveEntry {
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.path, self.bytes)
    }
}

#[derive(Debug, Clone)]
pub struct ExpandedArchive {
    label: String,
    entries: Vec<ArchiveEntry>,
}
impl ExpandedArchive {
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }
    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries
    }
}

// ------------- ArchiveExpander -------------
#[derive(Debug, Default)]
pub struct ArchiveExpander {
    expanded: bool,
    expansions: usize,
}

impl ArchiveExpander {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }
    /// How many times archives were actually expanded; at most one between resets.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
    /// Expands `archives` into `provider` unless that already happened. Returns
    /// whether an expansion ran. Every archive is read before anything is
    /// registered, so a corrupt archive leaves the provider untouched.
    pub fn expand_into<P: TypeProvider + ?Sized>(
        &mut self,
        archives: &[ArchiveBlob],
        provider: &mut P,
    ) -> Result<bool> {
        if self.expanded || archives.is_empty() {
            return Ok(false);
        }
        let expanded = archives
            .iter()
            .map(ArchiveBlob::expand)
            .collect::<Result<Vec<_>>>()?;
        let mut registered = 0;
        for archive in expanded {
            registered += provider.load_from_archive(archive);
        }
        self.expanded = true;
        self.expansions += 1;
        info!(archives = archives.len(), resources = registered, "expanded type archives");
        Ok(true)
    }
    pub fn reset(&mut self) {
        self.expanded = false;
    }
}

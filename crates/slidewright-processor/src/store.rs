//! Document namespaces.
//!
//! A namespace maps identifiers to raw document text. Keys are the identifier
//! plus a fixed extension, used verbatim and case-sensitively. Guarding against
//! identifiers such as `../secret` is the caller's job.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use slidewright_core::{Config, CoreError, Result};
use tracing::{debug, warn};

/// Read-only access to a flat namespace of documents.
pub trait DocumentStore: Send + Sync {
    /// Extension documents are stored under, without the dot.
    fn extension(&self) -> &str;

    /// Raw text of `identifier`, or [`CoreError::NotFound`].
    fn read(&self, identifier: &str) -> Result<String>;

    /// Every identifier in the namespace, sorted. Never fails; an unreadable
    /// namespace is empty.
    fn list(&self) -> Vec<String>;

    /// Whether `identifier` resolves to a document.
    fn exists(&self, identifier: &str) -> bool {
        self.read(identifier).is_ok()
    }

    /// Storage name of `identifier`.
    fn filename_for(&self, identifier: &str) -> String {
        format!("{identifier}.{}", self.extension())
    }
}

/// Documents stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
    extension: String,
}

impl FsDocumentStore {
    /// Create a store over `dir` for files ending in `.{extension}`.
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Create a store from the `[content]` configuration section.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.content.dir, &config.content.extension)
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path `identifier` is read from.
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.dir.join(self.filename_for(identifier))
    }

    fn try_list(&self) -> std::io::Result<Vec<String>> {
        let suffix = format!(".{}", self.extension);
        let mut identifiers = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name();
            if let Some(identifier) = name
                .to_str()
                .and_then(|n| n.strip_suffix(&suffix))
                .filter(|stem| !stem.is_empty())
            {
                identifiers.push(identifier.to_string());
            }
        }

        identifiers.sort();
        Ok(identifiers)
    }
}

impl DocumentStore for FsDocumentStore {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn read(&self, identifier: &str) -> Result<String> {
        let path = self.path_for(identifier);
        debug!(id = identifier, path = %path.display(), "reading document");

        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::not_found(identifier, self.filename_for(identifier))
            } else {
                CoreError::Io(e)
            }
        })
    }

    fn list(&self) -> Vec<String> {
        if !self.dir.exists() {
            debug!(dir = %self.dir.display(), "document directory does not exist");
            return Vec::new();
        }

        match self.try_list() {
            Ok(identifiers) => identifiers,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "failed to read document directory");
                Vec::new()
            }
        }
    }

    fn exists(&self, identifier: &str) -> bool {
        self.path_for(identifier).is_file()
    }
}

/// Documents held in memory, keyed by identifier.
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<String, String>,
    extension: String,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new("mdx")
    }
}

impl MemoryDocumentStore {
    /// Create an empty store reporting `.{extension}` file names.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            documents: BTreeMap::new(),
            extension: extension.into(),
        }
    }

    /// Add or replace a document.
    pub fn insert(&mut self, identifier: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(identifier.into(), text.into());
    }

    /// Builder form of [`MemoryDocumentStore::insert`].
    #[must_use]
    pub fn with_document(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(identifier, text);
        self
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn read(&self, identifier: &str) -> Result<String> {
        self.documents
            .get(identifier)
            .cloned()
            .ok_or_else(|| CoreError::not_found(identifier, self.filename_for(identifier)))
    }

    fn list(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    fn exists(&self, identifier: &str) -> bool {
        self.documents.contains_key(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_reads_and_lists() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("beta.mdx"), "# Beta").expect("write");
        fs::write(dir.path().join("alpha.mdx"), "# Alpha").expect("write");
        fs::write(dir.path().join("notes.md"), "ignored").expect("write");
        fs::write(dir.path().join(".mdx"), "no stem").expect("write");
        fs::create_dir(dir.path().join("folder.mdx")).expect("mkdir");

        let store = FsDocumentStore::new(dir.path(), "mdx");

        assert_eq!(store.list(), vec!["alpha", "beta"]);
        assert_eq!(store.read("alpha").expect("read"), "# Alpha");
        assert!(store.exists("beta"));
        assert!(!store.exists("notes"));
        assert!(!store.exists("folder"));
    }

    #[test]
    fn test_fs_store_identifiers_are_case_sensitive() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("Deck.mdx"), "# Deck").expect("write");

        let store = FsDocumentStore::new(dir.path(), "mdx");
        assert!(store.read("Deck").is_ok());
        assert_eq!(store.list(), vec!["Deck"]);
    }

    #[test]
    fn test_fs_store_missing_document() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FsDocumentStore::new(dir.path(), "mdx");

        let err = store.read("missing-id").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing-id.mdx"));
    }

    #[test]
    fn test_fs_store_absent_directory_lists_nothing() {
        let store = FsDocumentStore::new("/nonexistent/presentations", "mdx");
        assert!(store.list().is_empty());
        assert!(!store.exists("anything"));
    }

    #[test]
    fn test_fs_store_from_config() {
        let store = FsDocumentStore::from_config(&Config::default());
        assert_eq!(store.dir(), Path::new("presentations"));
        assert_eq!(store.path_for("q4"), Path::new("presentations/q4.mdx"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryDocumentStore::default()
            .with_document("b", "second")
            .with_document("a", "first");

        assert_eq!(store.list(), vec!["a", "b"]);
        assert_eq!(store.read("a").expect("read"), "first");
        assert!(store.exists("b"));

        let err = store.read("c").unwrap_err();
        assert_eq!(err.to_string(), "Document not found: c (expected c.mdx)");
    }
}

//! Document sources
//!
//! A source hands the engine the raw text of an ontology document and,
//! once the engine has built a snapshot from it, may persist it. Sources:
//! - [`GithubSource`] and [`HttpSource`] download over HTTP
//! - [`FileSource`] reads a local file
//! - [`MemorySource`] serves an in-memory document
//! - [`CachedSource`] keeps a copy of another source's document on disk

mod cache;
mod http;

pub use cache::CachedSource;
pub use http::{GithubSource, HttpSource};

use crate::rdf::RdfFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::info;

/// Source errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// The remote location could not deliver the document
    #[error("Source unavailable at {location}: {reason}")]
    Unavailable { location: String, reason: String },

    /// Local file or cache access failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be set up
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Raw ontology document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Serialized text
    pub text: String,
    /// Serialization format
    pub format: RdfFormat,
    /// Base IRI for resolving relative references
    pub base_iri: Option<String>,
}

impl Document {
    pub fn new(text: impl Into<String>, format: RdfFormat) -> Self {
        Self {
            text: text.into(),
            format,
            base_iri: None,
        }
    }

    /// Set the base IRI used for relative references
    pub fn with_base_iri(mut self, iri: impl Into<String>) -> Self {
        self.base_iri = Some(iri.into());
        self
    }
}

/// Supplier of ontology documents
pub trait DocumentSource: Send + Sync {
    /// Fetch the document, possibly from a local copy
    fn fetch(&self) -> SourceResult<Document>;

    /// Fetch the document from its origin, skipping any local copy
    fn fetch_fresh(&self) -> SourceResult<Document> {
        self.fetch()
    }

    /// Keep a document that was loaded successfully
    fn persist(&self, _document: &Document) -> SourceResult<()> {
        Ok(())
    }

    /// Format the document is expected in
    fn format(&self) -> RdfFormat;

    /// Short kind name (`github`, `http`, `file`, `memory`)
    fn kind(&self) -> &'static str;

    /// Location as `kind/...`, used for display and cache keys
    fn describe(&self) -> String;
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn fetch(&self) -> SourceResult<Document> {
        (**self).fetch()
    }

    fn fetch_fresh(&self) -> SourceResult<Document> {
        (**self).fetch_fresh()
    }

    fn persist(&self, document: &Document) -> SourceResult<()> {
        (**self).persist(document)
    }

    fn format(&self) -> RdfFormat {
        (**self).format()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Local ontology file; the format follows the extension
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> SourceResult<Document> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), bytes = text.len(), "read ontology file");
        Ok(Document::new(text, self.format()))
    }

    fn format(&self) -> RdfFormat {
        RdfFormat::from_path(&self.path)
    }

    fn kind(&self) -> &'static str {
        "file"
    }

    fn describe(&self) -> String {
        format!("file/{}", self.path.display())
    }
}

/// In-memory document
///
/// Clones share the same document, so a handle kept by the caller can
/// swap the content a later refresh will see.
#[derive(Debug, Clone)]
pub struct MemorySource {
    document: Arc<RwLock<Document>>,
}

impl MemorySource {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(RwLock::new(document)),
        }
    }

    /// Replace the served document
    pub fn replace(&self, document: Document) {
        let mut slot = self.document.write().unwrap_or_else(|e| e.into_inner());
        *slot = document;
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self) -> SourceResult<Document> {
        let document = self.document.read().unwrap_or_else(|e| e.into_inner());
        Ok(document.clone())
    }

    fn format(&self) -> RdfFormat {
        self.document.read().unwrap_or_else(|e| e.into_inner()).format
    }

    fn kind(&self) -> &'static str {
        "memory"
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_file_source() {
        let mut file = Builder::new().suffix(".ttl").tempfile().unwrap();
        write!(file, "<http://example.org/a> <http://example.org/p> \"v\" .").unwrap();

        let source = FileSource::new(file.path());
        let document = source.fetch().unwrap();
        assert_eq!(document.format, RdfFormat::Turtle);
        assert!(document.text.contains("example.org"));
        assert_eq!(source.kind(), "file");
        assert!(source.describe().starts_with("file/"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FileSource::new("/definitely/not/here.owl");
        assert!(matches!(source.fetch(), Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_memory_source_shares_document() {
        let source = MemorySource::new(Document::new("first", RdfFormat::NTriples));
        let handle = source.clone();
        handle.replace(Document::new("second", RdfFormat::Turtle));

        let document = source.fetch().unwrap();
        assert_eq!(document.text, "second");
        assert_eq!(source.format(), RdfFormat::Turtle);
        assert_eq!(source.describe(), "memory");
    }

    #[test]
    fn test_boxed_source_delegates() {
        let boxed: Box<dyn DocumentSource> =
            Box::new(MemorySource::new(Document::new("x", RdfFormat::RdfXml)));
        assert_eq!(boxed.kind(), "memory");
        assert_eq!(boxed.fetch_fresh().unwrap().text, "x");
        assert!(boxed.persist(&Document::new("y", RdfFormat::RdfXml)).is_ok());
    }
}

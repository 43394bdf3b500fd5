//! On-disk document cache
//!
//! The copy of a source's document lives at
//! `<cache_dir>/<kind>/<sha256(description)>.<ext>`.

use super::{Document, DocumentSource, SourceError, SourceResult};
use crate::rdf::RdfFormat;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Wraps a source with a cache file
///
/// `fetch` serves the cached copy when one exists. `fetch_fresh` always
/// goes to the wrapped source. `persist` writes the cache file.
#[derive(Debug, Clone)]
pub struct CachedSource<S> {
    inner: S,
    cache_dir: PathBuf,
}

impl<S: DocumentSource> CachedSource<S> {
    pub fn new(inner: S, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Location of the cache file for the wrapped source
    pub fn cache_path(&self) -> PathBuf {
        let digest = Sha256::digest(self.inner.describe().as_bytes());
        self.cache_dir
            .join(self.inner.kind())
            .join(format!("{:x}.{}", digest, self.inner.format().extension()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SourceError + '_ {
    move |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl<S: DocumentSource> DocumentSource for CachedSource<S> {
    fn fetch(&self) -> SourceResult<Document> {
        let path = self.cache_path();
        if path.is_file() {
            let text = fs::read_to_string(&path).map_err(io_error(&path))?;
            debug!(path = %path.display(), "ontology cache hit");
            return Ok(Document::new(text, self.inner.format()));
        }

        debug!(path = %path.display(), "ontology cache miss");
        self.inner.fetch()
    }

    fn fetch_fresh(&self) -> SourceResult<Document> {
        self.inner.fetch_fresh()
    }

    fn persist(&self, document: &Document) -> SourceResult<()> {
        self.inner.persist(document)?;

        let path = self.cache_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        fs::write(&path, &document.text).map_err(io_error(&path))?;
        info!(path = %path.display(), bytes = document.text.len(), "cached ontology");
        Ok(())
    }

    fn format(&self) -> RdfFormat {
        self.inner.format()
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use tempfile::TempDir;

    fn source(text: &str) -> MemorySource {
        MemorySource::new(Document::new(text, RdfFormat::RdfXml))
    }

    #[test]
    fn test_cache_path_layout() {
        let dir = TempDir::new().unwrap();
        let cached = CachedSource::new(source("x"), dir.path());
        let path = cached.cache_path();

        assert!(path.starts_with(dir.path().join("memory")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with(".owl"));
        assert_eq!(name.len(), 64 + ".owl".len());
    }

    #[test]
    fn test_github_paths_get_separate_files() {
        use crate::source::GithubSource;

        let dir = TempDir::new().unwrap();
        let github = |path: &str| {
            let inner = GithubSource::new("alea-institute", "soli", "main", path).unwrap();
            CachedSource::new(inner, dir.path()).cache_path()
        };

        assert_ne!(github("SOLI.owl"), github("draft/SOLI.owl"));
        assert_eq!(github("SOLI.owl"), github("/SOLI.owl"));
    }

    #[test]
    fn test_miss_then_hit() {
        let dir = TempDir::new().unwrap();
        let inner = source("cached copy");
        let cached = CachedSource::new(inner.clone(), dir.path());

        let first = cached.fetch().unwrap();
        assert_eq!(first.text, "cached copy");
        assert!(!cached.cache_path().exists());

        cached.persist(&first).unwrap();
        inner.replace(Document::new("changed", RdfFormat::RdfXml));

        // Cached copy wins for fetch, origin wins for fetch_fresh
        assert_eq!(cached.fetch().unwrap().text, "cached copy");
        assert_eq!(cached.fetch_fresh().unwrap().text, "changed");
    }

    #[test]
    fn test_persist_creates_directories() {
        let dir = TempDir::new().unwrap();
        let cached = CachedSource::new(source("doc"), dir.path().join("nested").join("cache"));
        cached.persist(&Document::new("doc", RdfFormat::RdfXml)).unwrap();
        assert_eq!(fs::read_to_string(cached.cache_path()).unwrap(), "doc");
    }
}

//! Configuration
//!
//! The configuration file is JSON with a single `soli` section:
//!
//! ```json
//! {
//!   "soli": {
//!     "source": "github",
//!     "repo_owner": "alea-institute",
//!     "repo_name": "soli",
//!     "branch": "1.0.0",
//!     "path": "SOLI.owl",
//!     "use_cache": true
//!   }
//! }
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected.

use crate::source::{CachedSource, DocumentSource, FileSource, GithubSource, HttpSource, SourceError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_REPO_OWNER: &str = "alea-institute";
pub const DEFAULT_REPO_NAME: &str = "soli";
pub const DEFAULT_BRANCH: &str = "1.0.0";
pub const DEFAULT_PATH: &str = "SOLI.owl";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected shape
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Field values are inconsistent
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// The configured source could not be set up
    #[error(transparent)]
    Source(#[from] SourceError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the ontology document comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A file in a GitHub repository
    #[default]
    Github,
    /// Any URL
    Http,
    /// A local file
    File,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoliConfig {
    pub source: SourceKind,
    pub url: Option<String>,
    pub repo_owner: String,
    pub repo_name: String,
    pub branch: String,
    /// Path inside the repository (github) or on disk (file)
    pub path: Option<String>,
    pub use_cache: bool,
    pub cache_dir: Option<PathBuf>,
}

impl Default for SoliConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Github,
            url: None,
            repo_owner: DEFAULT_REPO_OWNER.to_string(),
            repo_name: DEFAULT_REPO_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            path: None,
            use_cache: true,
            cache_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    soli: SoliConfig,
}

impl SoliConfig {
    /// Configuration reading a local file, without caching
    pub fn for_file(path: impl Into<String>) -> Self {
        Self {
            source: SourceKind::File,
            path: Some(path.into()),
            use_cache: false,
            ..Self::default()
        }
    }

    /// Configuration downloading from a URL
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Http,
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Parse a configuration document
    pub fn from_json(input: &str) -> ConfigResult<Self> {
        let file: ConfigFile = serde_json::from_str(input)?;
        Ok(file.soli)
    }

    /// Serialize as a configuration document
    pub fn to_json(&self) -> ConfigResult<String> {
        let file = ConfigFile { soli: self.clone() };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        config.validate()?;
        debug!(path = %path.display(), source = ?config.source, "loaded configuration");
        Ok(config)
    }

    /// Load `~/.soli/config.json` when it exists, otherwise the defaults
    pub fn load_default() -> ConfigResult<Self> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check the fields required by the selected source
    pub fn validate(&self) -> ConfigResult<()> {
        let blank = |value: &str| value.trim().is_empty();
        match self.source {
            SourceKind::Github => {
                if blank(&self.repo_owner) || blank(&self.repo_name) || blank(&self.branch) {
                    return Err(ConfigError::Invalid(
                        "github source needs repo_owner, repo_name and branch".to_string(),
                    ));
                }
            }
            SourceKind::Http => {
                if self.url.as_deref().map_or(true, blank) {
                    return Err(ConfigError::Invalid("http source needs a url".to_string()));
                }
            }
            SourceKind::File => {
                if self.path.as_deref().map_or(true, blank) {
                    return Err(ConfigError::Invalid("file source needs a path".to_string()));
                }
            }
        }
        Ok(())
    }

    /// Cache directory, defaulting to `~/.soli/cache`
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(default_cache_dir)
    }

    /// Build the document source this configuration describes
    pub fn build_source(&self) -> ConfigResult<Box<dyn DocumentSource>> {
        self.validate()?;

        let source: Box<dyn DocumentSource> = match self.source {
            SourceKind::Github => Box::new(GithubSource::new(
                self.repo_owner.as_str(),
                self.repo_name.as_str(),
                self.branch.as_str(),
                self.path.as_deref().unwrap_or(DEFAULT_PATH),
            )?),
            SourceKind::Http => Box::new(HttpSource::new(self.url.clone().unwrap_or_default())?),
            SourceKind::File => Box::new(FileSource::new(self.path.clone().unwrap_or_default())),
        };

        if !self.use_cache {
            return Ok(source);
        }
        match self.cache_dir() {
            Some(dir) => Ok(Box::new(CachedSource::new(source, dir))),
            None => Err(ConfigError::Invalid(
                "use_cache is set but no cache directory could be determined".to_string(),
            )),
        }
    }
}

/// `~/.soli/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".soli").join("config.json"))
}

/// `~/.soli/cache`
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".soli").join("cache"))
}

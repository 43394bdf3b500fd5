//! HTTP and GitHub document sources (blocking reqwest)

use super::{Document, DocumentSource, SourceError, SourceResult};
use crate::rdf::RdfFormat;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Request timeout for document downloads
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// GitHub REST API root
pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("soli/", env!("CARGO_PKG_VERSION"));

/// Document at an arbitrary URL; redirects are followed
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> SourceResult<Self> {
        Ok(Self {
            url: url.into(),
            client: client()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn unavailable(&self, reason: impl Into<String>) -> SourceError {
        SourceError::Unavailable {
            location: self.url.clone(),
            reason: reason.into(),
        }
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self) -> SourceResult<Document> {
        debug!(url = %self.url, "downloading ontology");
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| self.unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {status}")));
        }

        let text = response.text().map_err(|e| self.unavailable(e.to_string()))?;
        info!(url = %self.url, bytes = text.len(), "downloaded ontology");
        Ok(Document::new(text, self.format()))
    }

    fn format(&self) -> RdfFormat {
        let path = self.url.split(['?', '#']).next().unwrap_or(&self.url);
        RdfFormat::from_path(path)
    }

    fn kind(&self) -> &'static str {
        "http"
    }

    fn describe(&self) -> String {
        format!("http/{}", self.url)
    }
}

fn client() -> SourceResult<Client> {
    Ok(Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?)
}

/// Document stored in a GitHub repository, fetched from raw.githubusercontent.com
#[derive(Debug, Clone)]
pub struct GithubSource {
    owner: String,
    repo: String,
    branch: String,
    path: String,
    http: HttpSource,
}

#[derive(Deserialize)]
struct Branch {
    name: String,
}

impl GithubSource {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: &str,
    ) -> SourceResult<Self> {
        let owner = owner.into();
        let repo = repo.into();
        let branch = branch.into();
        let path = path.trim_start_matches('/').to_string();
        let url = raw_url(&owner, &repo, &branch, &path);

        Ok(Self {
            owner,
            repo,
            branch,
            path,
            http: HttpSource::new(url)?,
        })
    }

    pub fn url(&self) -> &str {
        self.http.url()
    }

    /// Branch names of `owner/repo`; each branch is one ontology version
    pub fn list_branches(owner: &str, repo: &str) -> SourceResult<Vec<String>> {
        let url = branches_url(owner, repo);
        let unavailable = |reason: String| SourceError::Unavailable {
            location: url.clone(),
            reason,
        };

        info!(owner, repo, "listing branches");
        let response = client()?
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status}")));
        }

        let body = response.text().map_err(|e| unavailable(e.to_string()))?;
        parse_branches(&body).map_err(|e| unavailable(format!("unexpected response: {e}")))
    }
}

impl DocumentSource for GithubSource {
    fn fetch(&self) -> SourceResult<Document> {
        self.http.fetch()
    }

    fn format(&self) -> RdfFormat {
        self.http.format()
    }

    fn kind(&self) -> &'static str {
        "github"
    }

    fn describe(&self) -> String {
        format!("github/{}/{}/{}/{}", self.owner, self.repo, self.branch, self.path)
    }
}

fn raw_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
    format!("https://raw.githubusercontent.com/{owner}/{repo}/{branch}/{path}")
}

fn branches_url(owner: &str, repo: &str) -> String {
    format!("{GITHUB_API_URL}/repos/{owner}/{repo}/branches")
}

fn parse_branches(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let branches: Vec<Branch> = serde_json::from_str(body)?;
    Ok(branches.into_iter().map(|b| b.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_url_and_description() {
        let source = GithubSource::new("alea-institute", "soli", "1.0.0", "/SOLI.owl").unwrap();
        assert_eq!(
            source.url(),
            "https://raw.githubusercontent.com/alea-institute/soli/1.0.0/SOLI.owl"
        );
        assert_eq!(source.describe(), "github/alea-institute/soli/1.0.0/SOLI.owl");
        assert_eq!(source.format(), RdfFormat::RdfXml);
    }

    #[test]
    fn test_github_description_includes_path() {
        let main = GithubSource::new("alea-institute", "soli", "main", "SOLI.owl").unwrap();
        let draft = GithubSource::new("alea-institute", "soli", "main", "draft/SOLI.owl").unwrap();
        assert_ne!(main.describe(), draft.describe());
    }

    #[test]
    fn test_branches_url() {
        assert_eq!(
            branches_url("alea-institute", "soli"),
            "https://api.github.com/repos/alea-institute/soli/branches"
        );
    }

    #[test]
    fn test_parse_branches() {
        let body = r#"[
            {"name": "1.0.0", "commit": {"sha": "abc", "url": "https://example.org"}, "protected": false},
            {"name": "main", "commit": {"sha": "def", "url": "https://example.org"}, "protected": true}
        ]"#;
        assert_eq!(parse_branches(body).unwrap(), vec!["1.0.0", "main"]);
        assert!(parse_branches("[]").unwrap().is_empty());
        assert!(parse_branches(r#"{"message": "Not Found"}"#).is_err());
    }

    #[test]
    fn test_http_format_ignores_query() {
        let source = HttpSource::new("https://example.org/ontology.ttl?version=2").unwrap();
        assert_eq!(source.format(), RdfFormat::Turtle);
        assert_eq!(source.describe(), "http/https://example.org/ontology.ttl?version=2");
    }

    #[test]
    fn test_unreachable_host_is_unavailable() {
        let source = HttpSource::new("http://127.0.0.1:9/SOLI.owl").unwrap();
        match source.fetch() {
            Err(SourceError::Unavailable { location, .. }) => {
                assert_eq!(location, "http://127.0.0.1:9/SOLI.owl");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}

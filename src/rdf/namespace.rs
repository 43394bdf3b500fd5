//! Prefixes for the compact `prefix:local` notation
//!
//! Triple lookups accept `rdfs:label` or `soli:R8CdMpOM0RmyrgCCvbpiLS0`
//! wherever a full IRI is expected; rendering goes the other way.

use super::vocab;
use indexmap::IndexMap;

/// Prefixes declared by the ontology document, plus the legacy `lmss`
pub const ONTOLOGY_PREFIXES: &[(&str, &str)] = &[
    ("rdf", vocab::RDF_NS),
    ("rdfs", vocab::RDFS_NS),
    ("owl", vocab::OWL_NS),
    ("xsd", vocab::XSD_NS),
    ("skos", vocab::SKOS_NS),
    ("dc", vocab::DC_NS),
    ("v1", vocab::MADS_NS),
    ("xml", vocab::XML_NS),
    ("soli", vocab::SOLI_NS),
    ("lmss", vocab::LMSS_NS),
];

/// Prefix table, kept in registration order
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    pub fn new() -> Self {
        let prefixes = ONTOLOGY_PREFIXES
            .iter()
            .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
            .collect();
        Self { prefixes }
    }

    /// Register or rebind a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Namespace IRI bound to `prefix`
    pub fn iri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// `prefix:local` to a full IRI; `None` without a colon or for an
    /// unbound prefix
    pub fn expand(&self, compact: &str) -> Option<String> {
        let (prefix, local) = compact.split_once(':')?;
        self.iri(prefix).map(|ns| format!("{ns}{local}"))
    }

    /// Expand `term` when it is a compact IRI, otherwise return it unchanged
    pub fn resolve(&self, term: &str) -> String {
        self.expand(term).unwrap_or_else(|| term.to_string())
    }

    /// Shorten `iri` with the longest matching namespace
    ///
    /// A bare namespace IRI has no local part and stays uncompacted.
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.len() > ns.len() && iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| format!("{prefix}:{}", &iri[ns.len()..]))
    }

    /// `(prefix, namespace)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ontology_prefixes() {
        let mgr = NamespaceManager::new();
        assert_eq!(mgr.iri("skos"), Some("http://www.w3.org/2004/02/skos/core#"));
        assert_eq!(mgr.iri("soli"), Some("https://soli.openlegalstandard.org/"));
        assert_eq!(mgr.iri("foaf"), None);
        assert_eq!(mgr.iter().count(), ONTOLOGY_PREFIXES.len());
    }

    #[test]
    fn test_expand() {
        let mgr = NamespaceManager::new();
        assert_eq!(
            mgr.expand("lmss:RSYBzf149Mi5KE0YtmpUmr").as_deref(),
            Some("http://lmss.sali.org/RSYBzf149Mi5KE0YtmpUmr")
        );
        assert_eq!(mgr.expand("nocolon"), None);
        assert_eq!(mgr.expand("foaf:name"), None);
    }

    #[test]
    fn test_resolve_leaves_full_iris_alone() {
        let mgr = NamespaceManager::new();
        let iri = "https://soli.openlegalstandard.org/RSYBzf149Mi5KE0YtmpUmr";
        assert_eq!(mgr.resolve(iri), iri);
        assert_eq!(mgr.resolve("dc:title"), vocab::DC_TITLE);
        assert_eq!(mgr.resolve("plain text"), "plain text");
    }

    #[test]
    fn test_compact() {
        let mgr = NamespaceManager::new();
        assert_eq!(
            mgr.compact("http://www.w3.org/2004/02/skos/core#altLabel").as_deref(),
            Some("skos:altLabel")
        );
        assert_eq!(mgr.compact("http://example.org/x"), None);
        assert_eq!(mgr.compact(vocab::SOLI_NS), None);
    }

    #[test]
    fn test_rebind_prefix() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("ex", "http://example.org/");
        assert_eq!(mgr.resolve("ex:alice"), "http://example.org/alice");
        assert_eq!(mgr.compact("http://example.org/alice").as_deref(), Some("ex:alice"));
    }
}

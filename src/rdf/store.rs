//! In-memory triple store
//!
//! Triples are kept in insertion order; three positional indices map a
//! subject, predicate, or object key to the positions of matching triples.

use super::namespace::NamespaceManager;
use super::types::Triple;
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// Triple store with subject, predicate and object indices
///
/// Index keys are plain strings:
/// - subject: IRI, or `_:id` for blank nodes
/// - predicate: IRI
/// - object: IRI, `_:id`, or the literal's lexical value
///
/// Lookups also accept compact `prefix:local` keys for known prefixes.
#[derive(Debug, Clone)]
pub struct TripleStore {
    /// All triples, unique, in first-insertion order
    triples: IndexSet<Triple>,

    /// Subject -> positions
    subject_index: FxHashMap<String, Vec<usize>>,

    /// Predicate -> positions
    predicate_index: FxHashMap<String, Vec<usize>>,

    /// Object -> positions
    object_index: FxHashMap<String, Vec<usize>>,

    namespaces: NamespaceManager,
}

impl TripleStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::with_namespaces(NamespaceManager::new())
    }

    /// Create an empty store resolving compact keys with `namespaces`
    pub fn with_namespaces(namespaces: NamespaceManager) -> Self {
        Self {
            triples: IndexSet::new(),
            subject_index: FxHashMap::default(),
            predicate_index: FxHashMap::default(),
            object_index: FxHashMap::default(),
            namespaces,
        }
    }

    /// Build a store from parsed triples
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        for triple in triples {
            store.insert(triple);
        }
        store
    }

    /// Insert a triple; returns false when the statement was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        let s_key = triple.subject.index_key();
        let p_key = triple.predicate.as_str().to_string();
        let o_key = triple.object.index_key();

        let (position, inserted) = self.triples.insert_full(triple);
        if !inserted {
            return false;
        }

        self.subject_index.entry(s_key).or_default().push(position);
        self.predicate_index.entry(p_key).or_default().push(position);
        self.object_index.entry(o_key).or_default().push(position);

        true
    }

    /// Check if a triple exists in the store
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Namespaces used to resolve compact keys
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Triples with the given subject
    pub fn by_subject(&self, subject: &str) -> Vec<&Triple> {
        self.lookup(&self.subject_index, subject)
    }

    /// Triples with the given predicate
    pub fn by_predicate(&self, predicate: &str) -> Vec<&Triple> {
        self.lookup(&self.predicate_index, predicate)
    }

    /// Triples with the given object (IRI or literal text)
    pub fn by_object(&self, object: &str) -> Vec<&Triple> {
        self.lookup(&self.object_index, object)
    }

    /// Distinct subject keys in first-seen order
    pub fn subjects(&self) -> Vec<String> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            seen.insert(triple.subject.index_key());
        }
        seen.into_iter().collect()
    }

    /// Distinct predicate IRIs in first-seen order
    pub fn predicates(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        for triple in &self.triples {
            seen.insert(triple.predicate.as_str());
        }
        seen.into_iter().collect()
    }

    /// Render a triple as `(subject, predicate, object)` with compact IRIs
    /// where a known prefix applies
    pub fn compact(&self, triple: &Triple) -> (String, String, String) {
        let compact_iri = |iri: &str| self.namespaces.compact(iri).unwrap_or_else(|| iri.to_string());
        let subject = match triple.subject.as_iri() {
            Some(iri) => iri.to_string(),
            None => triple.subject.index_key(),
        };
        let object = match triple.object.as_iri() {
            Some(iri) => iri.to_string(),
            None => triple.object.index_key(),
        };
        (subject, compact_iri(triple.predicate.as_str()), object)
    }

    fn lookup<'a>(&'a self, index: &FxHashMap<String, Vec<usize>>, key: &str) -> Vec<&'a Triple> {
        let positions = index
            .get(key)
            .or_else(|| index.get(&self.namespaces.resolve(key)));

        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&i| self.triples.get_index(i))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::types::{Literal, NamedNode, RdfPredicate};
    use crate::rdf::vocab;

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(
            NamedNode::new(s).unwrap().into(),
            RdfPredicate::new(p).unwrap(),
            Literal::new_simple_literal(o).into(),
        )
    }

    fn link(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(
            NamedNode::new(s).unwrap().into(),
            RdfPredicate::new(p).unwrap(),
            NamedNode::new(o).unwrap().into(),
        )
    }

    #[test]
    fn test_insert_and_contains() {
        let mut store = TripleStore::new();
        let t = triple("http://example.org/a", vocab::RDFS_LABEL, "A");

        assert!(store.insert(t.clone()));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&t));
    }

    #[test]
    fn test_duplicate_insert_is_collapsed() {
        let mut store = TripleStore::new();
        let t = triple("http://example.org/a", vocab::RDFS_LABEL, "A");

        assert!(store.insert(t.clone()));
        assert!(!store.insert(t));
        assert_eq!(store.len(), 1);
        assert_eq!(store.by_subject("http://example.org/a").len(), 1);
    }

    #[test]
    fn test_lookups_preserve_insertion_order() {
        let store = TripleStore::from_triples(vec![
            triple("http://example.org/b", vocab::RDFS_LABEL, "B"),
            triple("http://example.org/a", vocab::RDFS_LABEL, "A"),
            triple("http://example.org/a", vocab::SKOS_DEFINITION, "first letter"),
            triple("http://example.org/c", vocab::RDFS_LABEL, "C"),
        ]);

        let labels: Vec<String> = store
            .by_predicate(vocab::RDFS_LABEL)
            .iter()
            .map(|t| t.object.index_key())
            .collect();
        assert_eq!(labels, vec!["B", "A", "C"]);

        let about_a = store.by_subject("http://example.org/a");
        assert_eq!(about_a.len(), 2);
        assert_eq!(about_a[0].predicate.as_str(), vocab::RDFS_LABEL);
        assert_eq!(about_a[1].predicate.as_str(), vocab::SKOS_DEFINITION);
    }

    #[test]
    fn test_compact_keys() {
        let store = TripleStore::from_triples(vec![
            triple("https://soli.openlegalstandard.org/RA", vocab::RDFS_LABEL, "A"),
            link(
                "https://soli.openlegalstandard.org/RA",
                vocab::RDFS_SUB_CLASS_OF,
                "https://soli.openlegalstandard.org/RB",
            ),
        ]);

        assert_eq!(store.by_predicate("rdfs:label").len(), 1);
        assert_eq!(store.by_subject("soli:RA").len(), 2);
        assert_eq!(store.by_object("soli:RB").len(), 1);
        assert_eq!(store.by_object("A").len(), 1);
        assert!(store.by_predicate("rdfs:unknown").is_empty());
    }

    #[test]
    fn test_unknown_predicates_are_kept() {
        let store = TripleStore::from_triples(vec![triple(
            "http://example.org/a",
            "http://example.org/vocab#custom",
            "v",
        )]);
        assert_eq!(store.predicates(), vec!["http://example.org/vocab#custom"]);
        assert_eq!(store.subjects(), vec!["http://example.org/a".to_string()]);
    }

    #[test]
    fn test_compact_rendering() {
        let store = TripleStore::new();
        let t = link(
            "https://soli.openlegalstandard.org/RA",
            vocab::RDFS_SUB_CLASS_OF,
            "https://soli.openlegalstandard.org/RB",
        );
        let (s, p, o) = store.compact(&t);
        assert_eq!(s, "https://soli.openlegalstandard.org/RA");
        assert_eq!(p, "rdfs:subClassOf");
        assert_eq!(o, "https://soli.openlegalstandard.org/RB");
    }
}

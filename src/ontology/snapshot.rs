//! One immutable build of the ontology: triples, classes, taxonomy, search

use super::category::SoliType;
use super::class::OwlClass;
use super::registry::ClassRegistry;
use super::search::SearchIndex;
use super::taxonomy::Taxonomy;
use crate::error::{SoliError, SoliResult};
use crate::rdf::{vocab, RdfParser, Triple, TripleStore};
use crate::source::Document;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Key accepted by class lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKey<'a> {
    /// Canonical IRI, legacy alias or short identifier
    Iri(&'a str),
    /// Registry position
    Index(usize),
}

impl<'a> From<&'a str> for ClassKey<'a> {
    fn from(iri: &'a str) -> Self {
        ClassKey::Iri(iri)
    }
}

impl<'a> From<&'a String> for ClassKey<'a> {
    fn from(iri: &'a String) -> Self {
        ClassKey::Iri(iri.as_str())
    }
}

impl From<usize> for ClassKey<'_> {
    fn from(index: usize) -> Self {
        ClassKey::Index(index)
    }
}

/// Everything derived from one ontology document
///
/// Built once and never mutated; the facade swaps whole snapshots.
#[derive(Debug, Clone)]
pub struct Snapshot {
    store: TripleStore,
    registry: ClassRegistry,
    taxonomy: Taxonomy,
    search: SearchIndex,
    title: Option<String>,
    description: Option<String>,
}

impl Snapshot {
    /// Parse a document and build every index over it
    pub fn build(document: &Document) -> SoliResult<Self> {
        let start = Instant::now();
        let triples = RdfParser::parse(&document.text, document.format, document.base_iri.as_deref())?;
        let snapshot = Self::from_store(TripleStore::from_triples(triples));

        info!(
            format = %document.format,
            triples = snapshot.store.len(),
            classes = snapshot.registry.len(),
            aliases = snapshot.registry.alias_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built ontology snapshot"
        );
        Ok(snapshot)
    }

    /// Build the indices over an already loaded store
    pub fn from_store(store: TripleStore) -> Self {
        let registry = ClassRegistry::build(&store);
        let taxonomy = Taxonomy::build(&registry);
        let search = SearchIndex::build(&registry);
        let title = ontology_property(&store, vocab::DC_TITLE);
        let description = ontology_property(&store, vocab::DC_DESCRIPTION);

        Self {
            store,
            registry,
            taxonomy,
            search,
            title,
            description,
        }
    }

    /// dc:title of the owl:Ontology header
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// dc:description of the owl:Ontology header
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn triples(&self) -> &TripleStore {
        &self.store
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Classes in registry order
    pub fn classes(&self) -> impl Iterator<Item = &Arc<OwlClass>> {
        self.registry.iter()
    }

    /// Look a class up by IRI, alias, short identifier or position
    pub fn get<'a>(&self, key: impl Into<ClassKey<'a>>) -> SoliResult<Arc<OwlClass>> {
        match key.into() {
            ClassKey::Iri(iri) => self
                .registry
                .get(iri)
                .cloned()
                .ok_or_else(|| SoliError::NotFound(iri.to_string())),
            ClassKey::Index(index) => self
                .registry
                .get_index(index)
                .cloned()
                .ok_or_else(|| SoliError::NotFound(format!("class #{index}"))),
        }
    }

    pub fn contains<'a>(&self, key: impl Into<ClassKey<'a>>) -> bool {
        match key.into() {
            ClassKey::Iri(iri) => self.registry.contains(iri),
            ClassKey::Index(index) => index < self.registry.len(),
        }
    }

    /// Direct parents
    pub fn parents(&self, iri: &str) -> SoliResult<Vec<Arc<OwlClass>>> {
        let node = self.position(iri)?;
        Ok(self.records(self.taxonomy.parents(node).iter().copied()))
    }

    /// Descendants within `max_depth` hops, breadth-first
    pub fn children(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        let node = self.position(iri)?;
        Ok(self.records(self.taxonomy.descendants(node, max_depth)))
    }

    /// The class itself followed by its descendants
    pub fn subgraph(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        let node = self.position(iri)?;
        let positions = std::iter::once(node).chain(self.taxonomy.descendants(node, max_depth));
        Ok(self.records(positions))
    }

    /// Transitive parents within `max_depth` hops, nearest first
    pub fn ancestors(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        let node = self.position(iri)?;
        Ok(self.records(self.taxonomy.ancestors(node, max_depth)))
    }

    /// Classes without a registered parent
    pub fn roots(&self) -> Vec<Arc<OwlClass>> {
        self.records(self.taxonomy.roots())
    }

    /// Every class below a top-level branch
    pub fn category(&self, kind: SoliType, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.children(&kind.iri(), max_depth)
    }

    pub fn search_by_prefix(&self, prefix: &str) -> SoliResult<Vec<Arc<OwlClass>>> {
        Ok(self.records(self.search.prefix(prefix)?))
    }

    /// Fuzzy label search; scores in `[0, 1]`, best first
    pub fn search_by_label(
        &self,
        query: &str,
        limit: usize,
        include_alt_labels: bool,
    ) -> SoliResult<Vec<(Arc<OwlClass>, f64)>> {
        let hits = self.search.label_matches(query, limit, include_alt_labels)?;
        Ok(self.scored(hits))
    }

    /// Fuzzy definition search; scores in `[0, 1]`, best first
    pub fn search_by_definition(&self, query: &str, limit: usize) -> SoliResult<Vec<(Arc<OwlClass>, f64)>> {
        let hits = self.search.definition_matches(query, limit)?;
        Ok(self.scored(hits))
    }

    /// Classes whose label is exactly `label`, optionally also matching
    /// alternative labels
    pub fn get_by_label(&self, label: &str, include_alt_labels: bool) -> Vec<Arc<OwlClass>> {
        let mut positions = self.search.by_label(label).to_vec();
        if include_alt_labels {
            extend_unique(&mut positions, self.search.by_alt_label(label));
        }
        self.records(positions)
    }

    /// Classes carrying `alt_label` as an alternative label, optionally
    /// also matching primary labels
    pub fn get_by_alt_label(&self, alt_label: &str, include_labels: bool) -> Vec<Arc<OwlClass>> {
        let mut positions = self.search.by_alt_label(alt_label).to_vec();
        if include_labels {
            extend_unique(&mut positions, self.search.by_label(alt_label));
        }
        self.records(positions)
    }

    fn position(&self, iri: &str) -> SoliResult<usize> {
        self.registry
            .position(iri)
            .ok_or_else(|| SoliError::NotFound(iri.to_string()))
    }

    fn records(&self, positions: impl IntoIterator<Item = usize>) -> Vec<Arc<OwlClass>> {
        positions
            .into_iter()
            .filter_map(|i| self.registry.get_index(i).cloned())
            .collect()
    }

    fn scored(&self, hits: Vec<(usize, f64)>) -> Vec<(Arc<OwlClass>, f64)> {
        hits.into_iter()
            .filter_map(|(i, score)| self.registry.get_index(i).map(|c| (Arc::clone(c), score)))
            .collect()
    }
}

fn extend_unique(positions: &mut Vec<usize>, more: &[usize]) {
    for &p in more {
        if !positions.contains(&p) {
            positions.push(p);
        }
    }
}

/// First literal of `predicate` on any owl:Ontology subject
fn ontology_property(store: &TripleStore, predicate: &str) -> Option<String> {
    store
        .by_object(vocab::OWL_ONTOLOGY)
        .into_iter()
        .filter(|t| t.predicate.as_str() == vocab::RDF_TYPE)
        .filter_map(|t| t.subject.as_iri())
        .flat_map(|subject| store.by_subject(subject))
        .find(|t: &&Triple| t.predicate.as_str() == predicate && t.object.is_literal())
        .map(|t| t.object.index_key())
}

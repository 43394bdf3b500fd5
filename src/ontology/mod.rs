//! Ontology graph engine
//!
//! An [`Ontology`] owns the current [`Snapshot`] (triples, class registry,
//! taxonomy and search index built from one document) and the
//! [`DocumentSource`] it came from. Readers take an `Arc<Snapshot>` and
//! query it without holding any lock; [`Ontology::refresh`] builds a new
//! snapshot off to the side and swaps it in only when the build succeeded.
//!
//! # Example
//!
//! ```rust
//! use soli::ontology::Ontology;
//! use soli::rdf::RdfFormat;
//! use soli::source::Document;
//!
//! let doc = r#"
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     @prefix soli: <https://soli.openlegalstandard.org/> .
//!     soli:RB a owl:Class ; rdfs:label "Area of Law" .
//!     soli:RA a owl:Class ; rdfs:label "Bankruptcy Law" ; rdfs:subClassOf soli:RB .
//! "#;
//! let ontology = Ontology::from_document(Document::new(doc, RdfFormat::Turtle)).unwrap();
//!
//! let children = ontology.children("soli:RB", Some(1)).unwrap();
//! assert_eq!(children[0].label.as_deref(), Some("Bankruptcy Law"));
//! ```

mod category;
mod class;
mod registry;
mod render;
mod search;
mod snapshot;
mod taxonomy;
pub mod text;

pub use category::SoliType;
pub use class::OwlClass;
pub use registry::ClassRegistry;
pub use search::SearchIndex;
pub use snapshot::{ClassKey, Snapshot};
pub use taxonomy::{Taxonomy, DEFAULT_MAX_DEPTH};

use crate::config::SoliConfig;
use crate::error::{SoliError, SoliResult};
use crate::rdf::{vocab, Triple};
use crate::source::{Document, DocumentSource, MemorySource};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Attempts made by [`Ontology::generate_iri`] before giving up
pub const MAX_IRI_ATTEMPTS: usize = 16;

/// Queryable ontology with refreshable contents
pub struct Ontology {
    source: Box<dyn DocumentSource>,
    current: RwLock<Arc<Snapshot>>,
}

impl Ontology {
    /// Build from an in-memory document
    pub fn from_document(document: Document) -> SoliResult<Self> {
        Self::from_source(MemorySource::new(document))
    }

    /// Fetch from `source` and build
    pub fn from_source(source: impl DocumentSource + 'static) -> SoliResult<Self> {
        Self::with_source(Box::new(source))
    }

    /// Build from the source a configuration describes
    pub fn from_config(config: &SoliConfig) -> SoliResult<Self> {
        Self::with_source(config.build_source()?)
    }

    fn with_source(source: Box<dyn DocumentSource>) -> SoliResult<Self> {
        let document = source.fetch()?;
        let snapshot = Snapshot::build(&document)?;
        source.persist(&document)?;

        Ok(Self {
            source,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// The current snapshot; stays valid across later refreshes
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Re-fetch the document from its origin and replace the snapshot
    ///
    /// On any error the previous snapshot stays in place.
    pub fn refresh(&self) -> SoliResult<()> {
        let start = Instant::now();
        let result = self
            .source
            .fetch_fresh()
            .map_err(SoliError::from)
            .and_then(|document| {
                let snapshot = Snapshot::build(&document)?;
                self.source.persist(&document)?;
                Ok(snapshot)
            });

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "refresh failed, keeping current snapshot");
                return Err(e);
            }
        };

        let classes = snapshot.len();
        {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = Arc::new(snapshot);
        }
        info!(
            source = %self.source.describe(),
            classes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "refreshed ontology"
        );
        Ok(())
    }

    /// A fresh class IRI in the ontology namespace that no class uses yet
    pub fn generate_iri(&self) -> SoliResult<String> {
        self.generate_iri_with(|| base62(Uuid::new_v4().as_u128()))
    }

    fn generate_iri_with(&self, mut next_id: impl FnMut() -> String) -> SoliResult<String> {
        let snapshot = self.snapshot();
        for _ in 0..MAX_IRI_ATTEMPTS {
            let id = next_id();
            let iri = format!("{}{}", vocab::SOLI_NS, id);
            if !snapshot.contains(iri.as_str()) && !snapshot.contains(id.as_str()) {
                return Ok(iri);
            }
        }
        Err(SoliError::IriExhausted(MAX_IRI_ATTEMPTS))
    }

    /// Source location, e.g. `github/alea-institute/soli/1.0.0/SOLI.owl`
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn title(&self) -> Option<String> {
        self.snapshot().title().map(str::to_string)
    }

    pub fn description(&self) -> Option<String> {
        self.snapshot().description().map(str::to_string)
    }

    /// Look a class up by IRI, alias, short identifier or position
    pub fn get<'a>(&self, key: impl Into<ClassKey<'a>>) -> SoliResult<Arc<OwlClass>> {
        self.snapshot().get(key)
    }

    pub fn contains<'a>(&self, key: impl Into<ClassKey<'a>>) -> bool {
        self.snapshot().contains(key)
    }

    /// All classes in registry order
    pub fn classes(&self) -> Vec<Arc<OwlClass>> {
        self.snapshot().classes().cloned().collect()
    }

    pub fn parents(&self, iri: &str) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().parents(iri)
    }

    pub fn children(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().children(iri, max_depth)
    }

    pub fn subgraph(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().subgraph(iri, max_depth)
    }

    pub fn ancestors(&self, iri: &str, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().ancestors(iri, max_depth)
    }

    pub fn roots(&self) -> Vec<Arc<OwlClass>> {
        self.snapshot().roots()
    }

    /// Every class below a top-level branch
    pub fn category(&self, kind: SoliType, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().category(kind, max_depth)
    }

    pub fn search_by_prefix(&self, prefix: &str) -> SoliResult<Vec<Arc<OwlClass>>> {
        self.snapshot().search_by_prefix(prefix)
    }

    pub fn search_by_label(
        &self,
        query: &str,
        limit: usize,
        include_alt_labels: bool,
    ) -> SoliResult<Vec<(Arc<OwlClass>, f64)>> {
        self.snapshot().search_by_label(query, limit, include_alt_labels)
    }

    pub fn search_by_definition(&self, query: &str, limit: usize) -> SoliResult<Vec<(Arc<OwlClass>, f64)>> {
        self.snapshot().search_by_definition(query, limit)
    }

    pub fn get_by_label(&self, label: &str, include_alt_labels: bool) -> Vec<Arc<OwlClass>> {
        self.snapshot().get_by_label(label, include_alt_labels)
    }

    pub fn get_by_alt_label(&self, alt_label: &str, include_labels: bool) -> Vec<Arc<OwlClass>> {
        self.snapshot().get_by_alt_label(alt_label, include_labels)
    }

    pub fn triples_by_subject(&self, subject: &str) -> Vec<Triple> {
        self.snapshot().triples().by_subject(subject).into_iter().cloned().collect()
    }

    pub fn triples_by_predicate(&self, predicate: &str) -> Vec<Triple> {
        self.snapshot().triples().by_predicate(predicate).into_iter().cloned().collect()
    }

    pub fn triples_by_object(&self, object: &str) -> Vec<Triple> {
        self.snapshot().triples().by_object(object).into_iter().cloned().collect()
    }
}

macro_rules! category_helpers {
    ($($name:ident => $kind:ident),+ $(,)?) => {
        impl Ontology {
            $(
                #[doc = concat!("Classes below the `", stringify!($kind), "` branch")]
                pub fn $name(&self, max_depth: Option<usize>) -> SoliResult<Vec<Arc<OwlClass>>> {
                    self.category(SoliType::$kind, max_depth)
                }
            )+
        }
    };
}

category_helpers! {
    player_actors => ActorPlayer,
    areas_of_law => AreaOfLaw,
    asset_types => AssetType,
    communication_modalities => CommunicationModality,
    currencies => Currency,
    data_formats => DataFormat,
    document_artifacts => DocumentArtifact,
    engagement_terms => EngagementTerms,
    events => Event,
    forum_venues => ForumsVenues,
    governmental_bodies => GovernmentalBody,
    industries => Industry,
    languages => Language,
    soli_types => OntologyType,
    legal_authorities => LegalAuthorities,
    legal_entities => LegalEntity,
    locations => Location,
    matter_narratives => MatterNarrative,
    matter_narrative_formats => MatterNarrativeFormat,
    objectives => Objectives,
    services => Service,
    standards_compatibilities => StandardsCompatibility,
    statuses => Status,
    system_identifiers => SystemIdentifiers,
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOLI <{}>", self.source.describe())
    }
}

impl fmt::Debug for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ontology")
            .field("source", &self.source.describe())
            .field("classes", &self.len())
            .finish()
    }
}

const BASE62: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Base62 digits of `value`, most significant first
fn base62(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(22);
    while value > 0 {
        digits.push(BASE62[(value % 62) as usize]);
        value /= 62;
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

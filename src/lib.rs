//! SOLI ontology graph engine
//!
//! Loads the SOLI legal ontology (an OWL document with tens of thousands of
//! classes) into memory and answers identity lookups, taxonomy traversals
//! and label search over it.
//!
//! # Layout
//!
//! - [`rdf`]: RDF terms, document parsing, the indexed triple store
//! - [`ontology`]: class records, registry, taxonomy, search and the
//!   refreshable [`Ontology`] facade
//! - [`source`]: where documents come from (GitHub, HTTP, file, memory,
//!   on-disk cache)
//! - [`config`]: JSON configuration selecting a source
//!
//! ## Example Usage
//!
//! ```rust
//! use soli::{Document, Ontology, RdfFormat};
//!
//! let doc = r#"<?xml version="1.0"?>
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
//!          xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
//!          xmlns:owl="http://www.w3.org/2002/07/owl#">
//!   <owl:Class rdf:about="https://soli.openlegalstandard.org/RB">
//!     <rdfs:label>Area of Law</rdfs:label>
//!   </owl:Class>
//!   <owl:Class rdf:about="https://soli.openlegalstandard.org/RA">
//!     <rdfs:subClassOf rdf:resource="https://soli.openlegalstandard.org/RB"/>
//!     <rdfs:label>Bankruptcy Law</rdfs:label>
//!   </owl:Class>
//! </rdf:RDF>"#;
//!
//! let ontology = Ontology::from_document(Document::new(doc, RdfFormat::RdfXml)).unwrap();
//! assert_eq!(ontology.len(), 2);
//!
//! // Legacy and short forms resolve to the same class
//! let class = ontology.get("lmss:RA").unwrap();
//! assert_eq!(class.label.as_deref(), Some("Bankruptcy Law"));
//!
//! let hits = ontology.search_by_label("Bankrupt", 1, true).unwrap();
//! assert_eq!(hits[0].0.iri, "https://soli.openlegalstandard.org/RA");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod ontology;
pub mod rdf;
pub mod source;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, SoliConfig, SourceKind};

pub use error::{SoliError, SoliResult};

pub use ontology::{ClassKey, ClassRegistry, Ontology, OwlClass, Snapshot, SoliType, Taxonomy};

pub use rdf::{
    NamespaceManager, ParseError, RdfFormat, RdfObject, RdfParser, RdfPredicate, RdfSubject,
    Triple, TripleStore,
};

pub use source::{
    CachedSource, Document, DocumentSource, FileSource, GithubSource, HttpSource, MemorySource,
    SourceError, SourceResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}

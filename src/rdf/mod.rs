//! RDF layer of the SOLI engine
//!
//! This module implements the raw statement level of an ontology snapshot:
//! - RDF terms and triples (wrapping oxrdf)
//! - Document parsing (RDF/XML, Turtle, N-Triples via rio)
//! - An insertion-ordered triple store indexed by subject, predicate, object
//! - Namespace prefixes for compact IRIs
//!
//! # Example
//!
//! ```rust
//! use soli::rdf::{RdfFormat, RdfParser, TripleStore};
//!
//! let doc = "<http://example.org/a> <http://www.w3.org/2000/01/rdf-schema#label> \"A\" .";
//! let triples = RdfParser::parse(doc, RdfFormat::NTriples, None).unwrap();
//! let store = TripleStore::from_triples(triples);
//!
//! assert_eq!(store.by_predicate("rdfs:label").len(), 1);
//! ```

mod namespace;
mod parser;
mod store;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple,
};

pub use store::TripleStore;

pub use namespace::{NamespaceManager, ONTOLOGY_PREFIXES};

pub use parser::{ParseError, ParseResult, RdfFormat, RdfParser};

//! Vocabulary constants used by the ontology document

// Namespaces
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const MADS_NS: &str = "http://www.loc.gov/mads/rdf/v1#";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Canonical namespace of SOLI class IRIs
pub const SOLI_NS: &str = "https://soli.openlegalstandard.org/";
/// Legacy LMSS namespace, still used by older documents and clients
pub const LMSS_NS: &str = "http://lmss.sali.org/";

// RDF / RDFS
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
pub const RDFS_IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

// OWL
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
pub const OWL_DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";

// SKOS
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";
pub const SKOS_HIDDEN_LABEL: &str = "http://www.w3.org/2004/02/skos/core#hiddenLabel";
pub const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
pub const SKOS_EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";
pub const SKOS_NOTE: &str = "http://www.w3.org/2004/02/skos/core#note";
pub const SKOS_HISTORY_NOTE: &str = "http://www.w3.org/2004/02/skos/core#historyNote";
pub const SKOS_EDITORIAL_NOTE: &str = "http://www.w3.org/2004/02/skos/core#editorialNote";
pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";

// Dublin Core
pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";
pub const DC_DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
pub const DC_IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
pub const DC_SOURCE: &str = "http://purl.org/dc/elements/1.1/source";

// MADS
pub const MADS_COUNTRY: &str = "http://www.loc.gov/mads/rdf/v1#country";

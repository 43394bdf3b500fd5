//! RDF document parsing
//!
//! Supports:
//! - RDF/XML (`.owl`, `.rdf`, `.xml`), the native ontology format
//! - Turtle (`.ttl`)
//! - N-Triples (`.nt`)

use super::types::{BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::model;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesParser, TurtleError, TurtleParser};
use rio_xml::{RdfXmlError, RdfXmlParser};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// RDF/XML format (.owl, .rdf)
    RdfXml,
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    /// Guess the format from a path or URL, defaulting to RDF/XML
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(RdfFormat::RdfXml)
    }

    /// File extension used when the document is written to disk
    pub fn extension(&self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "owl",
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "RDF/XML",
            RdfFormat::Turtle => "Turtle",
            RdfFormat::NTriples => "N-Triples",
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RdfFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rdfxml" | "rdf/xml" | "xml" | "owl" => Ok(RdfFormat::RdfXml),
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            other => Err(ParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document violates its serialization grammar
    #[error("{format} syntax error: {message}")]
    Syntax { format: RdfFormat, message: String },

    /// A parsed term is not a valid RDF term
    #[error("Invalid term: {0}")]
    Term(#[from] RdfError),

    /// Base IRI given for resolution is malformed
    #[error("Invalid base IRI {iri}: {reason}")]
    InvalidBase { iri: String, reason: String },

    /// RDF-star and other term kinds the engine does not model
    #[error("Unsupported term: {0}")]
    Unsupported(String),

    /// Unknown format name
    #[error("Unknown RDF format: {0}")]
    UnknownFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

impl From<RdfXmlError> for ParseError {
    fn from(e: RdfXmlError) -> Self {
        ParseError::Syntax {
            format: RdfFormat::RdfXml,
            message: e.to_string(),
        }
    }
}

impl From<TurtleError> for ParseError {
    fn from(e: TurtleError) -> Self {
        ParseError::Syntax {
            format: RdfFormat::Turtle,
            message: e.to_string(),
        }
    }
}

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse a document into triples, in document order
    pub fn parse(input: &str, format: RdfFormat, base_iri: Option<&str>) -> ParseResult<Vec<Triple>> {
        let base = base_iri
            .map(|iri| {
                Iri::parse(iri.to_string()).map_err(|e| ParseError::InvalidBase {
                    iri: iri.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let mut triples = Vec::new();
        let mut on_triple = |t: model::Triple<'_>| -> ParseResult<()> {
            triples.push(convert_triple(t)?);
            Ok(())
        };

        match format {
            RdfFormat::RdfXml => {
                RdfXmlParser::new(input.as_bytes(), base).parse_all(&mut on_triple)?;
            }
            RdfFormat::Turtle => {
                TurtleParser::new(input.as_bytes(), base).parse_all(&mut on_triple)?;
            }
            RdfFormat::NTriples => {
                NTriplesParser::new(input.as_bytes())
                    .parse_all(&mut on_triple)
                    .map_err(|e| match e {
                        ParseError::Syntax { message, .. } => ParseError::Syntax {
                            format: RdfFormat::NTriples,
                            message,
                        },
                        other => other,
                    })?;
            }
        }

        Ok(triples)
    }
}

fn convert_triple(t: model::Triple<'_>) -> ParseResult<Triple> {
    Ok(Triple::new(
        convert_subject(t.subject)?,
        convert_predicate(t.predicate)?,
        convert_object(t.object)?,
    ))
}

fn convert_subject(s: model::Subject<'_>) -> ParseResult<RdfSubject> {
    match s {
        model::Subject::NamedNode(n) => Ok(RdfSubject::NamedNode(NamedNode::new(n.iri)?)),
        model::Subject::BlankNode(b) => Ok(RdfSubject::BlankNode(BlankNode::new(b.id)?)),
        other => Err(ParseError::Unsupported(other.to_string())),
    }
}

fn convert_predicate(p: model::NamedNode<'_>) -> ParseResult<RdfPredicate> {
    Ok(RdfPredicate::new(p.iri)?)
}

fn convert_object(o: model::Term<'_>) -> ParseResult<RdfObject> {
    match o {
        model::Term::NamedNode(n) => Ok(RdfObject::NamedNode(NamedNode::new(n.iri)?)),
        model::Term::BlankNode(b) => Ok(RdfObject::BlankNode(BlankNode::new(b.id)?)),
        model::Term::Literal(l) => match l {
            model::Literal::Simple { value } => {
                Ok(RdfObject::Literal(Literal::new_simple_literal(value)))
            }
            model::Literal::LanguageTaggedString { value, language } => Ok(RdfObject::Literal(
                Literal::new_language_tagged_literal(value, language)?,
            )),
            model::Literal::Typed { value, datatype } => Ok(RdfObject::Literal(
                Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?),
            )),
        },
        other => Err(ParseError::Unsupported(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab;

    const RDF_XML: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns="https://soli.openlegalstandard.org/"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
     xmlns:owl="http://www.w3.org/2002/07/owl#"
     xmlns:skos="http://www.w3.org/2004/02/skos/core#">
    <owl:Class rdf:about="https://soli.openlegalstandard.org/RA">
        <rdfs:subClassOf rdf:resource="https://soli.openlegalstandard.org/RB"/>
        <rdfs:label>Bankruptcy Law</rdfs:label>
        <skos:altLabel xml:lang="de">Insolvenzrecht</skos:altLabel>
    </owl:Class>
</rdf:RDF>"#;

    #[test]
    fn test_parse_rdf_xml() {
        let triples = RdfParser::parse(RDF_XML, RdfFormat::RdfXml, None).unwrap();
        assert_eq!(triples.len(), 4);

        assert_eq!(triples[0].predicate.as_str(), vocab::RDF_TYPE);
        assert_eq!(triples[0].object.as_iri(), Some(vocab::OWL_CLASS));

        let alt = triples
            .iter()
            .find(|t| t.predicate.as_str() == vocab::SKOS_ALT_LABEL)
            .unwrap();
        let literal = alt.object.as_literal().unwrap();
        assert_eq!(literal.value(), "Insolvenzrecht");
        assert_eq!(literal.language(), Some("de"));
    }

    #[test]
    fn test_parse_turtle() {
        let input = r#"
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            <http://example.org/a> rdfs:label "A" ;
                rdfs:subClassOf <http://example.org/b> .
        "#;
        let triples = RdfParser::parse(input, RdfFormat::Turtle, None).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].object.as_iri(), Some("http://example.org/b"));
    }

    #[test]
    fn test_parse_ntriples() {
        let input = "<http://example.org/a> <http://example.org/p> \"c\" .\n";
        let triples = RdfParser::parse(input, RdfFormat::NTriples, None).unwrap();
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn test_relative_iris_use_base() {
        let input = "<a> <http://example.org/p> <b> .";
        let triples =
            RdfParser::parse(input, RdfFormat::Turtle, Some("http://example.org/")).unwrap();
        assert_eq!(triples[0].subject.as_iri(), Some("http://example.org/a"));
    }

    #[test]
    fn test_malformed_xml_is_a_syntax_error() {
        let err = RdfParser::parse("<rdf:RDF><owl:Class>", RdfFormat::RdfXml, None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                format: RdfFormat::RdfXml,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_ntriples_reports_format() {
        let err = RdfParser::parse("<a> <b>", RdfFormat::NTriples, None).unwrap_err();
        assert!(err.to_string().starts_with("N-Triples syntax error"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(RdfFormat::from_path("SOLI.owl"), RdfFormat::RdfXml);
        assert_eq!(RdfFormat::from_path("/tmp/x.ttl"), RdfFormat::Turtle);
        assert_eq!(RdfFormat::from_path("x.NT"), RdfFormat::NTriples);
        assert_eq!(RdfFormat::from_path("noext"), RdfFormat::RdfXml);
        assert_eq!("turtle".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert!("json".parse::<RdfFormat>().is_err());
    }
}

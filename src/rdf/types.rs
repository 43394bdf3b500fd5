//! RDF terms and triples
//!
//! oxrdf does the validation; these wrappers add the string keys the triple
//! store indexes on and the few accessors the class registry needs.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode};
use std::fmt;
use thiserror::Error;

/// A term the parser produced that oxrdf rejects
#[derive(Error, Debug)]
#[error("Invalid {kind} {value:?}: {reason}")]
pub struct RdfError {
    pub kind: &'static str,
    pub value: String,
    pub reason: String,
}

impl RdfError {
    fn new(kind: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Self {
            kind,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type RdfResult<T> = Result<T, RdfError>;

const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Absolute IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::new("IRI", iri, e))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Parser-scoped anonymous node, e.g. an `owl:Restriction`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    pub fn new(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::new("blank node", id, e))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Literal: plain, language-tagged (`"Insolvenzrecht"@de-de`) or typed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        let language = language.into();
        OxLiteral::new_language_tagged_literal(value, language.as_str())
            .map(Self)
            .map_err(|e| RdfError::new("language tag", &language, e))
    }

    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    pub fn datatype(&self) -> &str {
        self.0.datatype().as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value())?;
        match self.language() {
            Some(lang) => write!(f, "@{lang}"),
            None if self.datatype() == XSD_STRING => Ok(()),
            None => write!(f, "^^<{}>", self.datatype()),
        }
    }
}

/// Subject position: an IRI or a blank node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
}

impl RdfSubject {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            RdfSubject::NamedNode(n) => Some(n.as_str()),
            RdfSubject::BlankNode(_) => None,
        }
    }

    /// Subject index key: the bare IRI, or `_:id`
    pub fn index_key(&self) -> String {
        match self {
            RdfSubject::NamedNode(n) => n.as_str().to_string(),
            RdfSubject::BlankNode(b) => b.to_string(),
        }
    }
}

/// Predicate position; always an IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    pub fn new(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Object position: an IRI, a blank node or a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
}

impl RdfObject {
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfObject::Literal(_))
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            RdfObject::NamedNode(n) => Some(n.as_str()),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            RdfObject::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Object index key: the IRI, `_:id`, or a literal's lexical form
    ///
    /// Language tags and datatypes are dropped, so `"Tax Law"@en` and
    /// `"Tax Law"` share a key.
    pub fn index_key(&self) -> String {
        match self {
            RdfObject::NamedNode(n) => n.as_str().to_string(),
            RdfObject::BlankNode(b) => b.to_string(),
            RdfObject::Literal(l) => l.value().to_string(),
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfSubject::BlankNode(b) => fmt::Display::fmt(b, f),
        }
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => fmt::Display::fmt(n, f),
            RdfObject::BlankNode(b) => fmt::Display::fmt(b, f),
            RdfObject::Literal(l) => fmt::Display::fmt(l, f),
        }
    }
}

macro_rules! term_conversions {
    ($($term:ident => $target:ident::$variant:ident),+ $(,)?) => {
        $(
            impl From<$term> for $target {
                fn from(term: $term) -> Self {
                    $target::$variant(term)
                }
            }
        )+
    };
}

term_conversions! {
    NamedNode => RdfSubject::NamedNode,
    BlankNode => RdfSubject::BlankNode,
    NamedNode => RdfObject::NamedNode,
    BlankNode => RdfObject::BlankNode,
    Literal => RdfObject::Literal,
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

/// One statement of the ontology document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
}

impl Triple {
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

/// N-Triples line
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

//! OWL class record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One ontology class with its descriptive metadata
///
/// `sub_class_of` is asserted by the document. `parent_class_of` is its
/// inverse and is derived when the registry is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwlClass {
    /// Canonical IRI
    pub iri: String,
    /// rdfs:label
    pub label: Option<String>,
    /// rdfs:subClassOf (parent IRIs)
    pub sub_class_of: Vec<String>,
    /// Inverse of sub_class_of (child IRIs)
    pub parent_class_of: Vec<String>,
    /// rdfs:isDefinedBy
    pub is_defined_by: Option<String>,
    /// rdfs:seeAlso
    pub see_also: Vec<String>,
    /// rdfs:comment
    pub comment: Option<String>,
    /// owl:deprecated
    pub deprecated: bool,
    /// skos:prefLabel
    pub preferred_label: Option<String>,
    /// skos:altLabel without a language tag, plus skos:hiddenLabel
    pub alternative_labels: Vec<String>,
    /// skos:altLabel with a language tag (language -> text)
    pub translations: BTreeMap<String, String>,
    /// skos:hiddenLabel
    pub hidden_label: Option<String>,
    /// skos:definition
    pub definition: Option<String>,
    /// skos:example
    pub examples: Vec<String>,
    /// skos:note
    pub notes: Vec<String>,
    /// skos:historyNote
    pub history_note: Option<String>,
    /// skos:editorialNote
    pub editorial_note: Option<String>,
    /// skos:inScheme
    pub in_scheme: Option<String>,
    /// dc:identifier
    pub identifier: Option<String>,
    /// dc:description
    pub description: Option<String>,
    /// dc:source
    pub source: Option<String>,
    /// v1:country
    pub country: Option<String>,
}

impl OwlClass {
    /// Create an empty class record
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            ..Default::default()
        }
    }

    /// A class is usable for display when it carries a label
    pub fn is_valid(&self) -> bool {
        self.label.is_some()
    }

    /// Label, falling back to the preferred label and then the IRI
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.preferred_label.as_deref())
            .unwrap_or(&self.iri)
    }

    /// Last path segment of the IRI
    pub fn local_name(&self) -> &str {
        self.iri
            .rsplit(['/', '#'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.iri)
    }
}

impl fmt::Display for OwlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OWLClass(label={}, iri={})",
            self.label.as_deref().unwrap_or("None"),
            self.iri
        )
    }
}

/// Push `value` unless it is already present
pub(crate) fn push_unique(values: &mut Vec<String>, value: impl Into<String>) {
    let value = value.into();
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Set `slot` if it is still empty
pub(crate) fn set_first(slot: &mut Option<String>, value: impl Into<String>) {
    if slot.is_none() {
        *slot = Some(value.into());
    }
}

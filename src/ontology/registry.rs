//! Class registry: canonical IRI, alias and position lookup of class records

use super::class::{push_unique, set_first, OwlClass};
use crate::rdf::{vocab, RdfObject, Triple, TripleStore};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{debug, warn};

/// All classes of one snapshot
///
/// Records are stored once behind an `Arc`; every key form (canonical
/// IRI, legacy alias, short identifier, position) yields the same record.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    /// Canonical IRI -> record, in first-registration order
    classes: IndexMap<String, Arc<OwlClass>>,

    /// Alias or short identifier -> position
    aliases: FxHashMap<String, usize>,
}

impl ClassRegistry {
    /// Build the registry from a loaded triple store
    pub fn build(store: &TripleStore) -> Self {
        let mut records: IndexMap<String, OwlClass> = IndexMap::new();
        for triple in store.by_predicate(vocab::RDF_TYPE) {
            if triple.object.as_iri() != Some(vocab::OWL_CLASS) {
                continue;
            }
            if let Some(iri) = triple.subject.as_iri() {
                records
                    .entry(iri.to_string())
                    .or_insert_with(|| OwlClass::new(iri));
            }
        }

        for class in records.values_mut() {
            for triple in store.by_subject(&class.iri) {
                apply_property(class, triple);
            }
        }

        canonicalize_parents(&mut records);
        link_children(&mut records);

        let classes: IndexMap<String, Arc<OwlClass>> = records
            .into_iter()
            .map(|(iri, class)| (iri, Arc::new(class)))
            .collect();
        let aliases = index_aliases(&classes);

        Self { classes, aliases }
    }

    /// Number of canonical classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Position of the class answering to `key` (canonical IRI or alias)
    pub fn position(&self, key: &str) -> Option<usize> {
        self.classes
            .get_index_of(key)
            .or_else(|| self.aliases.get(key).copied())
    }

    /// Record for a canonical IRI, legacy alias or short identifier
    pub fn get(&self, key: &str) -> Option<&Arc<OwlClass>> {
        self.position(key).and_then(|i| self.get_index(i))
    }

    /// Record at a registry position
    pub fn get_index(&self, index: usize) -> Option<&Arc<OwlClass>> {
        self.classes.get_index(index).map(|(_, class)| class)
    }

    /// Canonical IRI for any accepted key form
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.position(key)
            .and_then(|i| self.classes.get_index(i))
            .map(|(iri, _)| iri.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Records in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<OwlClass>> {
        self.classes.values()
    }

    /// Number of non-canonical keys
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

fn apply_property(class: &mut OwlClass, triple: &Triple) {
    let object = &triple.object;
    if let RdfObject::BlankNode(node) = object {
        debug!(class = %class.iri, predicate = %triple.predicate, node = %node, "skipping blank node value");
        return;
    }
    let text = object.index_key();

    match triple.predicate.as_str() {
        vocab::RDFS_LABEL => set_first(&mut class.label, text),
        vocab::RDFS_SUB_CLASS_OF => {
            if object.as_iri().is_some() {
                push_unique(&mut class.sub_class_of, text);
            }
        }
        vocab::RDFS_IS_DEFINED_BY => set_first(&mut class.is_defined_by, text),
        vocab::RDFS_SEE_ALSO => push_unique(&mut class.see_also, text),
        vocab::RDFS_COMMENT => set_first(&mut class.comment, text),
        vocab::OWL_DEPRECATED => {
            class.deprecated = !(text.eq_ignore_ascii_case("false") || text == "0");
        }
        vocab::SKOS_PREF_LABEL => set_first(&mut class.preferred_label, text),
        vocab::SKOS_ALT_LABEL => match object.as_literal().and_then(|l| l.language()) {
            Some(lang) => {
                class.translations.entry(lang.to_string()).or_insert(text);
            }
            None => push_unique(&mut class.alternative_labels, text),
        },
        vocab::SKOS_HIDDEN_LABEL => {
            set_first(&mut class.hidden_label, text.clone());
            push_unique(&mut class.alternative_labels, text);
        }
        vocab::SKOS_DEFINITION => set_first(&mut class.definition, text),
        vocab::SKOS_EXAMPLE => push_unique(&mut class.examples, text),
        vocab::SKOS_NOTE => push_unique(&mut class.notes, text),
        vocab::SKOS_HISTORY_NOTE => set_first(&mut class.history_note, text),
        vocab::SKOS_EDITORIAL_NOTE => set_first(&mut class.editorial_note, text),
        vocab::SKOS_IN_SCHEME => set_first(&mut class.in_scheme, text),
        vocab::DC_IDENTIFIER => set_first(&mut class.identifier, text),
        vocab::DC_DESCRIPTION => set_first(&mut class.description, text),
        vocab::DC_SOURCE => set_first(&mut class.source, text),
        vocab::MADS_COUNTRY => set_first(&mut class.country, text),
        _ => {}
    }
}

/// Rewrite parents named by a legacy form to the canonical IRI they alias
///
/// A canonical IRI always outranks an alias, and among colliding aliases
/// the first registered class keeps the key.
fn canonicalize_parents(records: &mut IndexMap<String, OwlClass>) {
    let mut canonical: FxHashMap<String, String> = FxHashMap::default();
    for iri in records.keys() {
        for alias in legacy_aliases(iri) {
            if !records.contains_key(&alias) {
                canonical.entry(alias).or_insert_with(|| iri.clone());
            }
        }
    }

    for class in records.values_mut() {
        let parents = std::mem::take(&mut class.sub_class_of);
        for parent in parents {
            let parent = canonical.get(&parent).cloned().unwrap_or(parent);
            push_unique(&mut class.sub_class_of, parent);
        }
    }
}

/// Derive `parent_class_of` from every registered `sub_class_of` edge
fn link_children(records: &mut IndexMap<String, OwlClass>) {
    let mut edges = Vec::new();
    let mut dangling = 0usize;

    for (child, class) in records.iter() {
        for parent in &class.sub_class_of {
            if records.contains_key(parent) {
                edges.push((parent.clone(), child.clone()));
            } else if parent != vocab::OWL_THING {
                dangling += 1;
            }
        }
    }

    for (parent, child) in edges {
        if let Some(record) = records.get_mut(&parent) {
            push_unique(&mut record.parent_class_of, child);
        }
    }

    if dangling > 0 {
        warn!(dangling, "subClassOf edges point at unregistered classes");
    }
}

fn index_aliases(classes: &IndexMap<String, Arc<OwlClass>>) -> FxHashMap<String, usize> {
    let mut aliases = FxHashMap::default();

    for (position, class) in classes.values().enumerate() {
        let keys = legacy_aliases(&class.iri)
            .into_iter()
            .chain(class.identifier.iter().cloned());

        for key in keys {
            if classes.contains_key(&key) {
                continue;
            }
            match aliases.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(slot) if *slot.get() != position => {
                    debug!(alias = %slot.key(), iri = %class.iri, "alias already taken, keeping first");
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    aliases
}

/// Key forms of an IRI in the ontology namespace or its legacy namespace
///
/// `https://soli.openlegalstandard.org/ID` answers to `ID`, `soli:ID`,
/// `lmss:ID` and `http://lmss.sali.org/ID` (and vice versa).
pub(crate) fn legacy_aliases(iri: &str) -> Vec<String> {
    let local = iri
        .strip_prefix(vocab::SOLI_NS)
        .or_else(|| iri.strip_prefix(vocab::LMSS_NS));

    match local {
        Some(id) if !id.is_empty() && !id.contains(['/', '#']) => vec![
            id.to_string(),
            format!("soli:{id}"),
            format!("lmss:{id}"),
            format!("{}{id}", vocab::SOLI_NS),
            format!("{}{id}", vocab::LMSS_NS),
        ],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{RdfFormat, RdfParser};

    const DOC: &str = r#"
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
        @prefix dc: <http://purl.org/dc/elements/1.1/> .
        @prefix soli: <https://soli.openlegalstandard.org/> .

        soli:RB a owl:Class ;
            rdfs:label "Area of Law" ;
            rdfs:subClassOf owl:Thing .

        soli:RA a owl:Class ;
            rdfs:label "Bankruptcy Law" , "Second Label" ;
            rdfs:subClassOf soli:RB , soli:Missing ;
            rdfs:subClassOf [ a owl:Restriction ] ;
            skos:altLabel "Insolvency" , "Insolvenzrecht"@de ;
            skos:hiddenLabel "BK" ;
            skos:definition "Law of debtors." ;
            dc:identifier "BANKRUPTCY" ;
            owl:deprecated "false" .

        <http://example.org/external> a owl:Class ;
            rdfs:subClassOf soli:RB .
    "#;

    fn registry() -> ClassRegistry {
        let triples = RdfParser::parse(DOC, RdfFormat::Turtle, None).unwrap();
        ClassRegistry::build(&TripleStore::from_triples(triples))
    }

    #[test]
    fn test_build_fields() {
        let registry = registry();
        assert_eq!(registry.len(), 3);

        let a = registry.get("https://soli.openlegalstandard.org/RA").unwrap();
        assert_eq!(a.label.as_deref(), Some("Bankruptcy Law"));
        assert_eq!(
            a.sub_class_of,
            vec![
                "https://soli.openlegalstandard.org/RB",
                "https://soli.openlegalstandard.org/Missing"
            ]
        );
        assert_eq!(a.alternative_labels, vec!["Insolvency", "BK"]);
        assert_eq!(a.hidden_label.as_deref(), Some("BK"));
        assert_eq!(a.translations.get("de").map(String::as_str), Some("Insolvenzrecht"));
        assert_eq!(a.definition.as_deref(), Some("Law of debtors."));
        assert!(!a.deprecated);
    }

    #[test]
    fn test_inverse_links() {
        let registry = registry();
        let b = registry.get("https://soli.openlegalstandard.org/RB").unwrap();
        assert_eq!(
            b.parent_class_of,
            vec!["https://soli.openlegalstandard.org/RA", "http://example.org/external"]
        );

        for class in registry.iter() {
            for child in &class.parent_class_of {
                let child = registry.get(child).unwrap();
                assert!(child.sub_class_of.contains(&class.iri));
            }
            for parent in &class.sub_class_of {
                if let Some(parent) = registry.get(parent) {
                    assert!(parent.parent_class_of.contains(&class.iri));
                }
            }
        }
    }

    #[test]
    fn test_alias_forms_share_one_record() {
        let registry = registry();
        let canonical = registry.get("https://soli.openlegalstandard.org/RA").unwrap();

        for key in ["RA", "soli:RA", "lmss:RA", "http://lmss.sali.org/RA", "BANKRUPTCY"] {
            let found = registry.get(key).unwrap();
            assert!(Arc::ptr_eq(canonical, found), "{key}");
        }
        assert_eq!(
            registry.canonical("lmss:RA"),
            Some("https://soli.openlegalstandard.org/RA")
        );
        assert_eq!(registry.position("RA"), Some(1));
        assert!(Arc::ptr_eq(canonical, registry.get_index(1).unwrap()));
    }

    #[test]
    fn test_external_iris_get_no_aliases() {
        assert!(legacy_aliases("http://example.org/external").is_empty());
        assert!(legacy_aliases(vocab::SOLI_NS).is_empty());
        assert_eq!(legacy_aliases("http://lmss.sali.org/RX")[0], "RX");
    }

    #[test]
    fn test_unknown_key() {
        let registry = registry();
        assert!(registry.get("nonexistent-iri").is_none());
        assert!(!registry.contains("soli:Missing"));
        assert!(registry.get_index(99).is_none());
    }

    #[test]
    fn test_first_alias_wins() {
        let doc = r#"
            @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix dc: <http://purl.org/dc/elements/1.1/> .
            <https://soli.openlegalstandard.org/R1> a owl:Class ; dc:identifier "X" .
            <https://soli.openlegalstandard.org/R2> a owl:Class ; dc:identifier "X" .
            <https://soli.openlegalstandard.org/R3> a owl:Class ; dc:identifier "R1" .
        "#;
        let triples = RdfParser::parse(doc, RdfFormat::Turtle, None).unwrap();
        let registry = ClassRegistry::build(&TripleStore::from_triples(triples));

        assert_eq!(registry.canonical("X"), Some("https://soli.openlegalstandard.org/R1"));
        assert_eq!(registry.canonical("R1"), Some("https://soli.openlegalstandard.org/R1"));
    }

    #[test]
    fn test_legacy_parent_iri_links_to_canonical() {
        let doc = r#"
            @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
            @prefix owl: <http://www.w3.org/2002/07/owl#> .
            @prefix soli: <https://soli.openlegalstandard.org/> .
            soli:RB a owl:Class ; rdfs:label "Area of Law" .
            soli:RA a owl:Class ; rdfs:label "Bankruptcy Law" ;
                rdfs:subClassOf <http://lmss.sali.org/RB> , soli:RB .
        "#;
        let triples = RdfParser::parse(doc, RdfFormat::Turtle, None).unwrap();
        let registry = ClassRegistry::build(&TripleStore::from_triples(triples));

        let a = registry.get("soli:RA").unwrap();
        assert_eq!(a.sub_class_of, vec!["https://soli.openlegalstandard.org/RB"]);

        let b = registry.get("http://lmss.sali.org/RB").unwrap();
        assert_eq!(b.parent_class_of, vec!["https://soli.openlegalstandard.org/RA"]);
    }
}

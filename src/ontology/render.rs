//! Per-class projections: JSON, JSON-LD, OWL/XML and Markdown

use super::class::OwlClass;
use crate::rdf::vocab;
use serde_json::{json, Map, Value};

impl OwlClass {
    /// Serialize the record as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize a record produced by [`OwlClass::to_json`]
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// JSON-LD node object with a compact `@context`
    pub fn to_jsonld(&self) -> Value {
        let mut node = Map::new();
        node.insert(
            "@context".to_string(),
            json!({
                "@vocab": vocab::SOLI_NS,
                "soli": vocab::SOLI_NS,
                "dc": vocab::DC_NS,
                "v1": vocab::MADS_NS,
                "owl": vocab::OWL_NS,
                "rdf": vocab::RDF_NS,
                "rdfs": vocab::RDFS_NS,
                "skos": vocab::SKOS_NS,
                "xsd": vocab::XSD_NS,
                "xml": vocab::XML_NS,
            }),
        );
        node.insert("@id".to_string(), json!(self.iri));
        node.insert("@type".to_string(), json!("owl:Class"));
        node.insert("rdfs:label".to_string(), json!(self.label));

        let mut put = |key: &str, value: Value| {
            node.insert(key.to_string(), value);
        };

        if !self.sub_class_of.is_empty() {
            let parents: Vec<Value> = self.sub_class_of.iter().map(|p| json!({ "@id": p })).collect();
            put("rdfs:subClassOf", Value::Array(parents));
        }
        if let Some(defined_by) = &self.is_defined_by {
            put("rdfs:isDefinedBy", json!(defined_by));
        }
        if !self.see_also.is_empty() {
            put("rdfs:seeAlso", json!(self.see_also));
        }
        if let Some(comment) = &self.comment {
            put("rdfs:comment", json!(comment));
        }
        if self.deprecated {
            put("owl:deprecated", json!(true));
        }
        if let Some(pref) = &self.preferred_label {
            put("skos:prefLabel", json!(pref));
        }

        // Plain alternative labels first, then one language-tagged value per translation
        let mut alt_labels: Vec<Value> = self.alternative_labels.iter().map(|l| json!(l)).collect();
        alt_labels.extend(
            self.translations
                .iter()
                .map(|(lang, text)| json!({ "@value": text, "@language": lang })),
        );
        if !alt_labels.is_empty() {
            put("skos:altLabel", Value::Array(alt_labels));
        }

        if let Some(hidden) = &self.hidden_label {
            put("skos:hiddenLabel", json!(hidden));
        }
        if let Some(definition) = &self.definition {
            put("skos:definition", json!(definition));
        }
        if !self.examples.is_empty() {
            put("skos:example", json!(self.examples));
        }
        if !self.notes.is_empty() {
            put("skos:note", json!(self.notes));
        }
        if let Some(note) = &self.history_note {
            put("skos:historyNote", json!(note));
        }
        if let Some(note) = &self.editorial_note {
            put("skos:editorialNote", json!(note));
        }
        if let Some(scheme) = &self.in_scheme {
            put("skos:inScheme", json!(scheme));
        }
        if let Some(identifier) = &self.identifier {
            put("dc:identifier", json!(identifier));
        }
        if let Some(description) = &self.description {
            put("dc:description", json!(description));
        }
        if let Some(source) = &self.source {
            put("dc:source", json!(source));
        }
        if let Some(country) = &self.country {
            put("v1:country", json!(country));
        }

        Value::Object(node)
    }

    /// A standalone `owl:Class` element with its namespace declarations
    pub fn to_owl_xml(&self) -> String {
        let mut out = format!(
            "<owl:Class xmlns:owl=\"{}\" xmlns:rdf=\"{}\" xmlns:rdfs=\"{}\" xmlns:skos=\"{}\" xmlns:dc=\"{}\" xmlns:v1=\"{}\" rdf:about=\"{}\">\n",
            vocab::OWL_NS,
            vocab::RDF_NS,
            vocab::RDFS_NS,
            vocab::SKOS_NS,
            vocab::DC_NS,
            vocab::MADS_NS,
            escape_xml(&self.iri)
        );

        let resource = |out: &mut String, tag: &str, iri: &str| {
            out.push_str(&format!("  <{tag} rdf:resource=\"{}\"/>\n", escape_xml(iri)));
        };
        for parent in &self.sub_class_of {
            resource(&mut out, "rdfs:subClassOf", parent);
        }
        if let Some(defined_by) = &self.is_defined_by {
            resource(&mut out, "rdfs:isDefinedBy", defined_by);
        }
        for see_also in &self.see_also {
            resource(&mut out, "rdfs:seeAlso", see_also);
        }

        let text = |out: &mut String, tag: &str, value: &str| {
            out.push_str(&format!("  <{tag}>{}</{tag}>\n", escape_xml(value)));
        };
        if let Some(label) = &self.label {
            text(&mut out, "rdfs:label", label);
        }
        if let Some(comment) = &self.comment {
            text(&mut out, "rdfs:comment", comment);
        }
        if self.deprecated {
            text(&mut out, "owl:deprecated", "true");
        }
        if let Some(pref) = &self.preferred_label {
            text(&mut out, "skos:prefLabel", pref);
        }
        for alt in &self.alternative_labels {
            text(&mut out, "skos:altLabel", alt);
        }
        for (lang, translation) in &self.translations {
            out.push_str(&format!(
                "  <skos:altLabel xml:lang=\"{}\">{}</skos:altLabel>\n",
                escape_xml(lang),
                escape_xml(translation)
            ));
        }
        if let Some(hidden) = &self.hidden_label {
            text(&mut out, "skos:hiddenLabel", hidden);
        }
        if let Some(definition) = &self.definition {
            text(&mut out, "skos:definition", definition);
        }
        for example in &self.examples {
            text(&mut out, "skos:example", example);
        }
        for note in &self.notes {
            text(&mut out, "skos:note", note);
        }
        if let Some(note) = &self.history_note {
            text(&mut out, "skos:historyNote", note);
        }
        if let Some(note) = &self.editorial_note {
            text(&mut out, "skos:editorialNote", note);
        }
        if let Some(scheme) = &self.in_scheme {
            resource(&mut out, "skos:inScheme", scheme);
        }
        if let Some(identifier) = &self.identifier {
            text(&mut out, "dc:identifier", identifier);
        }
        if let Some(description) = &self.description {
            text(&mut out, "dc:description", description);
        }
        if let Some(source) = &self.source {
            text(&mut out, "dc:source", source);
        }
        if let Some(country) = &self.country {
            text(&mut out, "v1:country", country);
        }

        out.push_str("</owl:Class>\n");
        out
    }

    /// Human-readable Markdown page
    pub fn to_markdown(&self) -> String {
        let mut md = format!("# {}\n\n**IRI:** {}\n\n## Labels\n\n", self.display_label(), self.iri);

        if let Some(pref) = &self.preferred_label {
            md.push_str(&format!("**Preferred Label:** {pref}\n\n"));
        }
        if !self.alternative_labels.is_empty() {
            md.push_str("**Alternative Labels:**\n");
            for alt in &self.alternative_labels {
                md.push_str(&format!("\n- {alt}"));
            }
            md.push_str("\n\n");
        }
        if !self.translations.is_empty() {
            md.push_str("**Translations:**\n");
            for (lang, translation) in &self.translations {
                md.push_str(&format!("\n- {lang}: {translation}"));
            }
            md.push_str("\n\n");
        }
        if let Some(hidden) = &self.hidden_label {
            md.push_str(&format!("**Hidden Label:** {hidden}\n\n"));
        }
        if let Some(definition) = &self.definition {
            md.push_str(&format!("## Definition\n\n{definition}\n\n"));
        }

        list_section(&mut md, "Examples", &self.examples);
        list_section(&mut md, "Sub Class Of", &self.sub_class_of);
        list_section(&mut md, "Parent Class Of", &self.parent_class_of);

        if let Some(defined_by) = &self.is_defined_by {
            md.push_str(&format!("**Is Defined By:** {defined_by}\n\n"));
        }
        list_section(&mut md, "See Also", &self.see_also);
        if let Some(comment) = &self.comment {
            md.push_str(&format!("**Comment:** {comment}\n\n"));
        }
        md.push_str(&format!("**Deprecated:** {}\n\n", self.deprecated));
        list_section(&mut md, "Notes", &self.notes);

        let fields = [
            ("History Note", &self.history_note),
            ("Editorial Note", &self.editorial_note),
            ("In Scheme", &self.in_scheme),
            ("Identifier", &self.identifier),
            ("Description", &self.description),
            ("Source", &self.source),
            ("Country", &self.country),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                md.push_str(&format!("**{name}:** {value}\n\n"));
            }
        }

        md
    }
}

fn list_section(md: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

/// Escape text for XML content and attribute values
pub(crate) fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

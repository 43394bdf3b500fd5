use soli::ontology::text::normalize;
use soli::{FileSource, Ontology, SoliError};
use std::path::PathBuf;

fn fixture() -> Ontology {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mini.owl");
    Ontology::from_source(FileSource::new(path)).unwrap()
}

fn iris(hits: &[(std::sync::Arc<soli::OwlClass>, f64)]) -> Vec<String> {
    hits.iter().map(|(c, _)| c.iri.clone()).collect()
}

#[test]
fn test_label_search_is_deterministic() {
    let ontology = fixture();
    let first = ontology.search_by_label("law", 10, true).unwrap();
    for _ in 0..5 {
        let again = ontology.search_by_label("law", 10, true).unwrap();
        assert_eq!(iris(&first), iris(&again));
        let scores: Vec<f64> = again.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, first.iter().map(|(_, s)| *s).collect::<Vec<_>>());
    }
}

#[test]
fn test_label_search_bounds_and_order() {
    let ontology = fixture();
    for limit in [1, 2, 3, 50] {
        let hits = ontology.search_by_label("tax", limit, true).unwrap();
        assert!(hits.len() <= limit);
        for (_, score) in &hits {
            assert!(*score > 0.0 && *score <= 1.0);
        }
        for pair in hits.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}

#[test]
fn test_exact_label_scores_one() {
    let ontology = fixture();
    let hits = ontology.search_by_label("tax law", 3, false).unwrap();
    assert_eq!(hits[0].0.label.as_deref(), Some("Tax Law"));
    assert_eq!(hits[0].1, 1.0);
}

#[test]
fn test_alt_label_search() {
    let ontology = fixture();

    let with_alt = ontology.search_by_label("Insolvency", 1, true).unwrap();
    assert_eq!(with_alt[0].0.label.as_deref(), Some("Bankruptcy Law"));
    assert!(with_alt[0].1 > 0.8);

    // Primary labels only match by edit distance
    let without_alt = ontology.search_by_label("Insolvency", 1, false).unwrap();
    assert!(without_alt.iter().all(|(_, score)| *score < 0.5));
}

#[test]
fn test_query_normalization() {
    let ontology = fixture();
    let plain = ontology.search_by_label("bankruptcy law", 3, true).unwrap();
    let noisy = ontology.search_by_label("  BANKRUPTCY -- law!! ", 3, true).unwrap();
    assert_eq!(iris(&plain), iris(&noisy));
    assert_eq!(normalize("  BANKRUPTCY -- law!! "), "bankruptcy law");
}

#[test]
fn test_invalid_queries() {
    let ontology = fixture();
    assert!(matches!(
        ontology.search_by_label("law", 0, true),
        Err(SoliError::InvalidArgument(_))
    ));
    assert!(matches!(
        ontology.search_by_label("  ?! ", 5, true),
        Err(SoliError::InvalidArgument(_))
    ));
    assert!(matches!(
        ontology.search_by_definition("", 5),
        Err(SoliError::InvalidArgument(_))
    ));
    assert!(matches!(ontology.search_by_prefix("--"), Err(SoliError::InvalidArgument(_))));
}

#[test]
fn test_no_match_is_empty() {
    let ontology = fixture();
    let hits = ontology.search_by_definition("zzzz", 5).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn test_definition_search() {
    let ontology = fixture();
    let hits = ontology.search_by_definition("debtors", 5).unwrap();
    let labels: Vec<_> = hits.iter().map(|(c, _)| c.display_label()).collect();
    assert_eq!(labels.len(), 2);
    assert!(labels.contains(&"Bankruptcy Law"));
    assert!(labels.contains(&"Consumer Bankruptcy"));
    assert!(hits.iter().all(|(_, s)| *s == 1.0));
}

#[test]
fn test_prefix_search() {
    let ontology = fixture();
    let hits = ontology.search_by_prefix("Corp").unwrap();
    let labels: Vec<_> = hits.iter().map(|c| c.display_label()).collect();
    assert_eq!(labels, vec!["Corporate Tax", "Corporation"]);

    let by_alt = ontology.search_by_prefix("usa").unwrap();
    assert_eq!(by_alt.len(), 1);
    assert_eq!(by_alt[0].display_label(), "United States");
}

#[test]
fn test_exact_label_lookups() {
    let ontology = fixture();
    assert_eq!(ontology.get_by_label("Tax Law", false).len(), 1);
    assert!(ontology.get_by_label("Taxation", false).is_empty());
    assert_eq!(ontology.get_by_label("Taxation", true).len(), 1);

    assert_eq!(ontology.get_by_alt_label("USA", false).len(), 1);
    assert!(ontology.get_by_alt_label("United States", false).is_empty());
    assert_eq!(ontology.get_by_alt_label("United States", true).len(), 1);
}

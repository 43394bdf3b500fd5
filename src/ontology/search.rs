//! Label and definition search
//!
//! Text is normalized once at build time with [`normalize`]; queries go
//! through the same function before matching.

use super::registry::ClassRegistry;
use super::text::{label_score, normalize, token_set};
use crate::error::{SoliError, SoliResult};
use rustc_hash::FxHashMap;

/// Search structures for one snapshot, keyed by registry position
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// Normalized label per class
    labels: Vec<Option<String>>,

    /// Normalized alternative labels per class
    alt_labels: Vec<Vec<String>>,

    /// Normalized definition per class
    definitions: Vec<Option<String>>,

    /// Exact label text -> positions
    label_lookup: FxHashMap<String, Vec<usize>>,

    /// Exact alternative label text -> positions
    alt_label_lookup: FxHashMap<String, Vec<usize>>,
}

impl SearchIndex {
    pub fn build(registry: &ClassRegistry) -> Self {
        let mut index = Self::default();

        for (position, class) in registry.iter().enumerate() {
            if let Some(label) = &class.label {
                index.label_lookup.entry(label.clone()).or_default().push(position);
            }
            for alt in &class.alternative_labels {
                index.alt_label_lookup.entry(alt.clone()).or_default().push(position);
            }

            index.labels.push(class.label.as_deref().map(normalize));
            index
                .alt_labels
                .push(class.alternative_labels.iter().map(|l| normalize(l)).collect());
            index.definitions.push(class.definition.as_deref().map(normalize));
        }

        index
    }

    /// Positions whose label is exactly `label`
    pub fn by_label(&self, label: &str) -> &[usize] {
        self.label_lookup.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Positions with `alt_label` among their alternative labels
    pub fn by_alt_label(&self, alt_label: &str) -> &[usize] {
        self.alt_label_lookup
            .get(alt_label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Positions whose label or alternative label starts with `prefix`
    pub fn prefix(&self, prefix: &str) -> SoliResult<Vec<usize>> {
        let prefix = normalized_query(prefix)?;

        let hits = (0..self.labels.len())
            .filter(|&i| {
                self.labels[i].as_deref().is_some_and(|l| l.starts_with(&prefix))
                    || self.alt_labels[i].iter().any(|l| l.starts_with(&prefix))
            })
            .collect();

        Ok(hits)
    }

    /// Top `limit` positions by label similarity, best first
    pub fn label_matches(
        &self,
        query: &str,
        limit: usize,
        include_alt_labels: bool,
    ) -> SoliResult<Vec<(usize, f64)>> {
        check_limit(limit)?;
        let query = normalized_query(query)?;

        let scores = (0..self.labels.len()).map(|i| {
            let mut best = self.labels[i]
                .as_deref()
                .map(|label| label_score(&query, label))
                .unwrap_or(0.0);
            if include_alt_labels {
                for alt in &self.alt_labels[i] {
                    best = best.max(label_score(&query, alt));
                }
            }
            (i, best)
        });

        Ok(rank(scores, limit))
    }

    /// Top `limit` positions by query-token coverage of the definition
    pub fn definition_matches(&self, query: &str, limit: usize) -> SoliResult<Vec<(usize, f64)>> {
        check_limit(limit)?;
        let query = normalized_query(query)?;

        let scores = self.definitions.iter().enumerate().map(|(i, definition)| {
            let score = definition
                .as_deref()
                .map(|d| token_set(&query, d))
                .unwrap_or(0.0);
            (i, score)
        });

        Ok(rank(scores, limit))
    }
}

fn check_limit(limit: usize) -> SoliResult<()> {
    if limit == 0 {
        return Err(SoliError::InvalidArgument("limit must be at least 1".to_string()));
    }
    Ok(())
}

fn normalized_query(query: &str) -> SoliResult<String> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Err(SoliError::InvalidArgument(format!(
            "query has no searchable characters: {query:?}"
        )));
    }
    Ok(normalized)
}

/// Drop zero scores, sort descending (stable, so ties keep registry order)
fn rank(scores: impl Iterator<Item = (usize, f64)>, limit: usize) -> Vec<(usize, f64)> {
    let mut hits: Vec<(usize, f64)> = scores.filter(|(_, score)| *score > 0.0).collect();
    hits.sort_by(|a, b| b.1.total_cmp(&a.1));
    hits.truncate(limit);
    hits
}

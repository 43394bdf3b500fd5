//! Taxonomy index over registry positions
//!
//! Adjacency lists are derived from the registry so traversals work on
//! `usize` positions. Walks are breadth-first with a visited set, so cyclic
//! input terminates and each class is reported at most once, at its
//! shortest distance from the root.

use super::registry::ClassRegistry;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Depth used by category helpers when the caller does not choose one
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Parent and child adjacency by registry position
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
}

impl Taxonomy {
    /// Derive adjacency from the registry's subclass links
    ///
    /// Parents and children resolve through any key form the registry
    /// accepts; unknown parents contribute no edge.
    pub fn build(registry: &ClassRegistry) -> Self {
        let resolve = |key: &String| registry.position(key);

        let mut parents = Vec::with_capacity(registry.len());
        let mut children = Vec::with_capacity(registry.len());
        for class in registry.iter() {
            parents.push(dedup(class.sub_class_of.iter().filter_map(resolve)));
            children.push(dedup(class.parent_class_of.iter().filter_map(resolve)));
        }

        Self { parents, children }
    }

    /// Direct parents, in `sub_class_of` order
    pub fn parents(&self, node: usize) -> &[usize] {
        self.parents.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Direct children, in `parent_class_of` order
    pub fn children(&self, node: usize) -> &[usize] {
        self.children.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Descendants within `max_depth` hops (`None` for unbounded)
    pub fn descendants(&self, root: usize, max_depth: Option<usize>) -> Vec<usize> {
        walk(&self.children, root, max_depth)
    }

    /// Ancestors within `max_depth` hops (`None` for unbounded)
    pub fn ancestors(&self, root: usize, max_depth: Option<usize>) -> Vec<usize> {
        walk(&self.parents, root, max_depth)
    }

    /// Classes without a registered parent
    pub fn roots(&self) -> Vec<usize> {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_empty())
            .map(|(i, _)| i)
            .collect()
    }
}

fn dedup(positions: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    for position in positions {
        if !out.contains(&position) {
            out.push(position);
        }
    }
    out
}

fn walk(edges: &[Vec<usize>], root: usize, max_depth: Option<usize>) -> Vec<usize> {
    let mut visited = FxHashSet::default();
    visited.insert(root);

    let mut out = Vec::new();
    let mut queue = VecDeque::from([(root, 0usize)]);

    while let Some((node, depth)) = queue.pop_front() {
        if max_depth.is_some_and(|limit| depth >= limit) {
            continue;
        }
        let Some(next) = edges.get(node) else {
            continue;
        };
        for &neighbor in next {
            if visited.insert(neighbor) {
                out.push(neighbor);
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    out
}

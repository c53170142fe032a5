// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Namespace tree for hierarchical provided names.
//!
//! Names such as `Core/Class` are split on `/` and stored one segment per
//! node, so `Core/Class` and `Core/Array` share the `Core` node. Lookups may
//! use `*` in place of a whole segment to match any single child there.

use std::collections::BTreeMap;

/// Segment separator in hierarchical names.
pub const SEPARATOR: char = '/';

/// Segment that matches any single segment in a lookup pattern.
pub const WILDCARD: &str = "*";

/// One node per path segment.
#[derive(Debug)]
struct Node<V> {
    children: BTreeMap<String, Node<V>>,
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

impl<V> Node<V> {
    fn collect<'a>(&'a self, pattern: &[&str], out: &mut Vec<&'a V>) {
        let Some((segment, rest)) = pattern.split_first() else {
            out.extend(self.value.as_ref());
            return;
        };

        if *segment == WILDCARD {
            for child in self.children.values() {
                child.collect(rest, out);
            }
        } else if let Some(child) = self.children.get(*segment) {
            child.collect(rest, out);
        }
    }
}

/// Segment-keyed tree mapping provided names to values.
#[derive(Debug)]
pub struct NamespaceTree<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for NamespaceTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> NamespaceTree<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Store `value` at `path`, creating intermediate nodes as needed.
    ///
    /// Returns the value previously stored at exactly this path, if any.
    /// The new value always replaces it.
    pub fn insert(&mut self, path: &str, value: V) -> Option<V> {
        let mut node = &mut self.root;
        for segment in segments(path) {
            node = node.children.entry(segment.to_string()).or_default();
        }

        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Exact lookup. `*` is treated as an ordinary segment here.
    pub fn get(&self, path: &str) -> Option<&V> {
        let mut node = &self.root;
        for segment in segments(path) {
            node = node.children.get(segment)?;
        }
        node.value.as_ref()
    }

    /// All values whose path matches `pattern`.
    ///
    /// A `*` segment matches any one segment at that position; every other
    /// segment must match exactly. Results come back in lexicographic path
    /// order. A pattern matching nothing yields an empty vector.
    pub fn lookup(&self, pattern: &str) -> Vec<&V> {
        let pattern: Vec<&str> = segments(pattern).collect();
        let mut out = Vec::new();
        self.root.collect(&pattern, &mut out);
        out
    }

    /// Number of paths holding a value.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no path holds a value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every path.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }
}

/// Split a name into its non-empty segments.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

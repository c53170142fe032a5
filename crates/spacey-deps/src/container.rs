// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Ordered collection of source units that keeps itself topologically sorted.
//!
//! Units are stored in insertion order until someone looks at them. Every
//! read accessor sorts first, so callers only ever observe an order in which
//! each provider precedes the units depending on it. The order is cached
//! until the next mutation.

use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{DepsError, Result};
use crate::namespace::NamespaceTree;
use crate::options::{DuplicateProvides, ResolverOptions};
use crate::unit::{IntoUnits, Unit};

/// Duplicate-free, dependency-ordered collection of units.
pub struct Container<U> {
    /// Units, in topological order once sorted
    sources: Vec<Arc<U>>,
    /// Whether `sources` is known to be topologically sorted
    sorted: bool,
    /// Dependency pattern -> indices of matching providers, for the current pass
    cache: FxHashMap<String, Vec<usize>>,
    options: ResolverOptions,
}

impl<U> Default for Container<U> {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            sorted: false,
            cache: FxHashMap::default(),
            options: ResolverOptions::default(),
        }
    }
}

impl<U: Unit + PartialEq> Container<U> {
    /// Create an empty container with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with the given options.
    pub fn with_options(options: ResolverOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a container holding `units`.
    pub fn from_units<T: IntoUnits<U>>(units: T) -> Self {
        let mut container = Self::new();
        container.push(units);
        container
    }

    /// Current resolution options.
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Replace the resolution options. The next read re-sorts.
    pub fn set_options(&mut self, options: ResolverOptions) -> &mut Self {
        if self.options != options {
            self.options = options;
            self.clear_cache();
        }
        self
    }

    /// Add a unit, nothing, or any nesting of units.
    ///
    /// Units already present (by equality) are skipped. Adding anything
    /// new invalidates the cached order. Presence is checked by a linear
    /// scan, so pushing N units one at a time is quadratic in N.
    pub fn push<T: IntoUnits<U>>(&mut self, item: T) -> &mut Self {
        let mut incoming = Vec::new();
        item.flatten_into(&mut incoming);

        let mut added = false;
        for unit in incoming {
            if !self.holds(&unit) {
                self.sources.push(unit);
                added = true;
            }
        }

        if added {
            self.clear_cache();
        }
        self
    }

    /// Whether the stored order is still a valid topological order.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sort the units in place unless the cached order is still valid.
    ///
    /// Ties are broken by the current stored order. After a successful sort
    /// that is the previous load order with later pushes appended, so sorting
    /// incrementally can pick a different (equally valid) order than sorting
    /// the same units from scratch. On failure the stored order is left as
    /// it was.
    pub fn sort(&mut self) -> Result<&mut Self> {
        if !self.sorted {
            self.sources = self.topsort()?;
            self.sorted = true;
        }
        Ok(self)
    }

    /// Files required by every unit, in load order.
    ///
    /// With a `root`, each file is rewritten relative to it after both are
    /// made absolute against the current directory.
    pub fn required_files(&mut self, root: Option<&Path>) -> Result<Vec<PathBuf>> {
        self.sort()?;
        let files = self
            .sources
            .iter()
            .flat_map(|unit| unit.required_files().iter().cloned());

        let Some(root) = root else {
            return Ok(files.collect());
        };

        let root = expand_path(root)?;
        let mut relative = Vec::new();
        for file in files {
            let file = expand_path(&file)?;
            relative.push(pathdiff::diff_paths(&file, &root).unwrap_or(file));
        }
        Ok(relative)
    }

    /// Iterate in load order. Sorts first.
    pub fn iter(&mut self) -> Result<std::slice::Iter<'_, Arc<U>>> {
        self.sort()?;
        Ok(self.sources.iter())
    }

    /// Snapshot of the units in load order. Sorts first.
    pub fn to_vec(&mut self) -> Result<Vec<Arc<U>>> {
        self.sort()?;
        Ok(self.sources.clone())
    }

    /// Map every unit in load order. Sorts first.
    pub fn map<T, F>(&mut self, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Arc<U>) -> T,
    {
        Ok(self.iter()?.map(f).collect())
    }

    /// Units for which `predicate` holds, in load order. Sorts first.
    pub fn filter<F>(&mut self, mut predicate: F) -> Result<Vec<Arc<U>>>
    where
        F: FnMut(&U) -> bool,
    {
        Ok(self
            .iter()?
            .filter(|unit| predicate(unit))
            .cloned()
            .collect())
    }

    /// First unit in load order for which `predicate` holds. Sorts first.
    pub fn find<F>(&mut self, mut predicate: F) -> Result<Option<Arc<U>>>
    where
        F: FnMut(&U) -> bool,
    {
        Ok(self.iter()?.find(|unit| predicate(unit)).cloned())
    }

    /// Whether `unit` is present. Sorts first.
    pub fn contains(&mut self, unit: &U) -> Result<bool> {
        Ok(self.position(unit)?.is_some())
    }

    /// Load-order index of `unit`. Sorts first.
    pub fn position(&mut self, unit: &U) -> Result<Option<usize>> {
        Ok(self.iter()?.position(|candidate| **candidate == *unit))
    }

    /// Unit at `index` in load order. Sorts first.
    pub fn get(&mut self, index: usize) -> Result<Option<&Arc<U>>> {
        self.sort()?;
        Ok(self.sources.get(index))
    }

    /// Number of units. Sorts first, so a cycle is reported here too.
    pub fn len(&mut self) -> Result<usize> {
        self.sort()?;
        Ok(self.sources.len())
    }

    /// Whether the container holds no units. Sorts first.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Units in either `self` or `other`, without repeats: `self` in load
    /// order, then the new units of `other` in their given order. Sorts first.
    pub fn union<T: IntoUnits<U>>(&mut self, other: T) -> Result<Vec<Arc<U>>> {
        let mut result = self.to_vec()?;
        let mut others = Vec::new();
        other.flatten_into(&mut others);
        for unit in others {
            if !result.iter().any(|kept| same_unit(kept, &unit)) {
                result.push(unit);
            }
        }
        Ok(result)
    }

    /// Units of `self` not in `other`, in load order. Sorts first.
    pub fn difference<T: IntoUnits<U>>(&mut self, other: T) -> Result<Vec<Arc<U>>> {
        let mut others = Vec::new();
        other.flatten_into(&mut others);
        Ok(self
            .iter()?
            .filter(|unit| !others.iter().any(|other| same_unit(*unit, other)))
            .cloned()
            .collect())
    }

    /// Units of `self` also in `other`, in load order. Sorts first.
    pub fn intersection<T: IntoUnits<U>>(&mut self, other: T) -> Result<Vec<Arc<U>>> {
        let mut others = Vec::new();
        other.flatten_into(&mut others);
        Ok(self
            .iter()?
            .filter(|unit| others.iter().any(|other| same_unit(*unit, other)))
            .cloned()
            .collect())
    }

    /// Keep only units for which `predicate` holds.
    ///
    /// Sorts first, then filters in place and invalidates the cached order,
    /// since dropping a provider can change which unit owns a name.
    pub fn retain<F>(&mut self, mut predicate: F) -> Result<&mut Self>
    where
        F: FnMut(&U) -> bool,
    {
        self.sort()?;
        let before = self.sources.len();
        self.sources.retain(|unit| predicate(unit));
        if self.sources.len() != before {
            self.clear_cache();
        }
        Ok(self)
    }

    /// Consume the container, returning its units in load order.
    pub fn into_sorted(mut self) -> Result<Vec<Arc<U>>> {
        self.sort()?;
        Ok(self.sources)
    }

    fn holds(&self, unit: &Arc<U>) -> bool {
        self.sources.iter().any(|existing| same_unit(existing, unit))
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
        self.sorted = false;
    }

    /// Compute a load order for the current units.
    ///
    /// Edges run from provider to dependent. Among units whose providers are
    /// all placed, the one earliest in the current order goes next.
    fn topsort(&mut self) -> Result<Vec<Arc<U>>> {
        self.cache.clear();
        let count = self.sources.len();

        let mut tree = NamespaceTree::new();
        for (index, unit) in self.sources.iter().enumerate() {
            for name in unit.provides() {
                let Some(previous) = tree.insert(name, index) else {
                    continue;
                };
                if previous == index {
                    continue;
                }
                let first = self.sources[previous].name();
                match self.options.duplicate_provides {
                    DuplicateProvides::Reject => {
                        return Err(DepsError::DuplicateProvision {
                            name: name.clone(),
                            first: first.to_string(),
                            second: unit.name().to_string(),
                        });
                    }
                    DuplicateProvides::LastWins => {
                        warn!(
                            "'{}' is provided by both {} and {}; using {}",
                            name,
                            first,
                            unit.name(),
                            unit.name()
                        );
                    }
                }
            }
        }

        let mut successors: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); count];
        let mut in_degree = vec![0usize; count];
        let mut edges = 0usize;

        for (index, unit) in self.sources.iter().enumerate() {
            for dependency in unit.dependencies() {
                let providers = self
                    .cache
                    .entry(dependency.clone())
                    .or_insert_with(|| tree.lookup(dependency).into_iter().copied().collect());

                if providers.is_empty() {
                    if self.options.strict_dependencies {
                        return Err(DepsError::UnresolvedDependency {
                            unit: unit.name().to_string(),
                            dependency: dependency.clone(),
                        });
                    }
                    debug!(
                        "{} depends on '{}', which nothing provides; ignoring",
                        unit.name(),
                        dependency
                    );
                    continue;
                }

                debug!(
                    "{} depends on '{}': {} provider(s)",
                    unit.name(),
                    dependency,
                    providers.len()
                );
                for &provider in providers.iter() {
                    // A unit providing what it depends on needs no edge
                    if provider != index && successors[provider].insert(index) {
                        in_degree[index] += 1;
                        edges += 1;
                    }
                }
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
            .filter(|&index| in_degree[index] == 0)
            .map(Reverse)
            .collect();
        let mut order = Vec::with_capacity(count);

        while let Some(Reverse(index)) = ready.pop() {
            order.push(index);
            for &next in &successors[index] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() < count {
            let cycle = find_cycle(&successors, &in_degree)
                .into_iter()
                .map(|index| self.sources[index].name().to_string())
                .collect();
            return Err(DepsError::CyclicDependency { cycle });
        }

        info!("Sorted {} units with {} dependency edges", count, edges);
        Ok(order
            .into_iter()
            .map(|index| Arc::clone(&self.sources[index]))
            .collect())
    }
}

impl<U: Unit> fmt::Debug for Container<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("sorted", &self.sorted)
            .field(
                "units",
                &self.sources.iter().map(|u| u.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<U> IntoUnits<U> for &Container<U> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        out.extend(self.sources.iter().cloned());
    }
}

impl<U> IntoUnits<U> for Container<U> {
    fn flatten_into(self, out: &mut Vec<Arc<U>>) {
        out.extend(self.sources);
    }
}

fn same_unit<U: PartialEq>(a: &Arc<U>, b: &Arc<U>) -> bool {
    Arc::ptr_eq(a, b) || **a == **b
}

/// Find one cycle among the units Kahn's algorithm could not place.
///
/// Every unplaced unit still has an unplaced provider, so walking providers
/// backwards from any of them must revisit a unit.
fn find_cycle(successors: &[BTreeSet<usize>], in_degree: &[usize]) -> Vec<usize> {
    let unplaced = |index: usize| in_degree[index] > 0;
    let Some(start) = (0..in_degree.len()).find(|&index| unplaced(index)) else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let provider = (0..successors.len())
            .find(|&candidate| unplaced(candidate) && successors[candidate].contains(&current));
        let Some(provider) = provider else {
            return path;
        };

        if let Some(pos) = path.iter().position(|&seen| seen == provider) {
            let mut cycle = path.split_off(pos);
            cycle.reverse();
            return cycle;
        }
        path.push(provider);
        current = provider;
    }
}

/// Absolute, lexically normalized form of `path`.
fn expand_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::SourceUnit;

    fn unit(name: &str, provides: &[&str], requires: &[&str]) -> Arc<SourceUnit> {
        Arc::new(
            SourceUnit::new(name)
                .with_provides(provides.iter().copied())
                .with_requires(requires.iter().copied())
                .with_files([name]),
        )
    }

    fn names(container: &mut Container<SourceUnit>) -> Vec<String> {
        container.map(|u| u.name.clone()).unwrap()
    }

    #[test]
    fn test_push_is_idempotent() {
        let a = unit("a.js", &["a"], &[]);
        let mut container = Container::new();
        container.push(&a).push(&a);
        container.push(Arc::new(SourceUnit::clone(&a)));

        assert_eq!(container.len().unwrap(), 1);
        assert!(container.contains(&a).unwrap());
    }

    #[test]
    fn test_push_none_keeps_sorted() {
        let mut container = Container::from_units(unit("a.js", &["a"], &[]));
        container.sort().unwrap();
        container.push(None::<Arc<SourceUnit>>);
        assert!(container.is_sorted());
    }

    #[test]
    fn test_providers_come_first() {
        let mut container = Container::from_units(vec![
            unit("fx.js", &["Fx"], &["Core/*"]),
            unit("array.js", &["Core/Array"], &["Core/Core"]),
            unit("core.js", &["Core/Core"], &[]),
        ]);

        assert_eq!(names(&mut container), ["core.js", "array.js", "fx.js"]);
        assert!(container.is_sorted());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut container = Container::from_units(vec![
            unit("c.js", &["c"], &[]),
            unit("b.js", &["b"], &["a"]),
            unit("d.js", &["d"], &[]),
            unit("a.js", &["a"], &[]),
        ]);

        assert_eq!(names(&mut container), ["c.js", "d.js", "a.js", "b.js"]);
    }

    #[test]
    fn test_self_dependency_is_not_a_cycle() {
        let mut container = Container::from_units(vec![
            unit("class.js", &["Core/Class"], &["Core/*"]),
            unit("core.js", &["Core/Core"], &[]),
        ]);

        assert_eq!(names(&mut container), ["core.js", "class.js"]);
    }

    #[test]
    fn test_mutation_invalidates_order() {
        let mut container = Container::from_units(unit("b.js", &["b"], &["a"]));
        container.sort().unwrap();
        assert!(container.is_sorted());

        container.push(unit("a.js", &["a"], &[]));
        assert!(!container.is_sorted());
        assert_eq!(names(&mut container), ["a.js", "b.js"]);
    }

    #[test]
    fn test_cycle_leaves_order_untouched() {
        let mut container = Container::from_units(vec![
            unit("x.js", &["x"], &[]),
            unit("a.js", &["p1"], &["p2"]),
            unit("b.js", &["p2"], &["p1"]),
        ]);

        let err = container.sort().unwrap_err();
        let cycle = err.cycle().unwrap();
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&"a.js".to_string()));
        assert!(cycle.contains(&"b.js".to_string()));
        assert!(!container.is_sorted());
        assert_eq!(container.sources[0].name, "x.js");
    }

    #[test]
    fn test_cycle_reported_in_edge_order() {
        let mut container = Container::from_units(vec![
            unit("a.js", &["a"], &["c"]),
            unit("b.js", &["b"], &["a"]),
            unit("c.js", &["c"], &["b"]),
            unit("d.js", &["d"], &["c"]),
        ]);

        let cycle = container.sort().unwrap_err().cycle().unwrap().to_vec();
        assert_eq!(cycle.len(), 3);
        let pos = |name: &str| cycle.iter().position(|n| n == name).unwrap();
        assert_eq!((pos("a.js") + 1) % 3, pos("b.js"));
        assert_eq!((pos("b.js") + 1) % 3, pos("c.js"));
    }

    #[test]
    fn test_duplicate_provides_last_wins() {
        let mut container = Container::from_units(vec![
            unit("user.js", &["user"], &["shared"]),
            unit("old.js", &["shared"], &[]),
            unit("new.js", &["shared"], &[]),
        ]);

        let order = names(&mut container);
        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(pos("new.js") < pos("user.js"));
    }

    #[test]
    fn test_duplicate_provides_reject() {
        let mut container = Container::with_options(ResolverOptions {
            duplicate_provides: DuplicateProvides::Reject,
            ..Default::default()
        });
        container.push(vec![
            unit("old.js", &["shared"], &[]),
            unit("new.js", &["shared"], &[]),
        ]);

        match container.sort() {
            Err(DepsError::DuplicateProvision {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "shared");
                assert_eq!(first, "old.js");
                assert_eq!(second, "new.js");
            }
            other => panic!("expected duplicate provision, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_strict_dependencies() {
        let lonely = unit("lonely.js", &["lonely"], &["nonexistent/name"]);
        let mut container = Container::from_units(&lonely);
        assert_eq!(names(&mut container), ["lonely.js"]);

        container.set_options(ResolverOptions {
            strict_dependencies: true,
            ..Default::default()
        });
        assert!(!container.is_sorted());
        assert!(matches!(
            container.sort(),
            Err(DepsError::UnresolvedDependency { .. })
        ));
    }

    #[test]
    fn test_retain_invalidates_order() {
        let mut container = Container::from_units(vec![
            unit("a.js", &["a"], &[]),
            unit("b.js", &["b"], &["a"]),
        ]);
        container.retain(|u| u.name != "a.js").unwrap();
        assert!(!container.is_sorted());
        assert_eq!(names(&mut container), ["b.js"]);
    }

    #[test]
    fn test_set_operations() {
        let a = unit("a.js", &["a"], &[]);
        let b = unit("b.js", &["b"], &["a"]);
        let c = unit("c.js", &["c"], &[]);
        let mut container = Container::from_units(vec![b.clone(), a.clone()]);

        let union = container.union(vec![c.clone(), a.clone()]).unwrap();
        assert_eq!(union, vec![a.clone(), b.clone(), c.clone()]);

        let difference = container.difference(vec![a.clone()]).unwrap();
        assert_eq!(difference, vec![b.clone()]);

        let intersection = container.intersection(vec![b.clone(), c]).unwrap();
        assert_eq!(intersection, vec![b]);
    }

    #[test]
    fn test_required_files_relative_to_root() {
        let mut container = Container::from_units(vec![
            Arc::new(
                SourceUnit::new("fx")
                    .with_provides(["Fx"])
                    .with_requires(["Core"])
                    .with_files(["/project/Source/Fx.js"]),
            ),
            Arc::new(
                SourceUnit::new("core")
                    .with_provides(["Core"])
                    .with_files(["/project/Source/Core.js", "/project/Source/./Lang.js"]),
            ),
        ]);

        let files = container.required_files(None).unwrap();
        assert_eq!(files[0], PathBuf::from("/project/Source/Core.js"));

        let relative = container
            .required_files(Some(Path::new("/project/Build/..")))
            .unwrap();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("Source/Core.js"),
                PathBuf::from("Source/Lang.js"),
                PathBuf::from("Source/Fx.js"),
            ]
        );
    }

    #[test]
    fn test_lookup_cache_per_pass() {
        let mut container = Container::from_units(vec![
            unit("a.js", &["a"], &["lib/*"]),
            unit("b.js", &["b"], &["lib/*"]),
            unit("one.js", &["lib/one"], &[]),
        ]);
        container.sort().unwrap();
        assert_eq!(container.cache.len(), 1);
        assert_eq!(container.cache["lib/*"], vec![2]);

        container.push(unit("two.js", &["lib/two"], &[]));
        assert!(container.cache.is_empty());
        assert!(!container.is_sorted());

        // Indices refer to the order the pass started from: one, a, b, two
        container.sort().unwrap();
        assert_eq!(container.cache.len(), 1);
        assert_eq!(container.cache["lib/*"], vec![0, 3]);
        assert_eq!(names(&mut container), ["one.js", "two.js", "a.js", "b.js"]);
    }

    #[test]
    fn test_resort_ties_follow_stored_order() {
        let x = unit("x.js", &["x"], &[]);
        let y = unit("y.js", &["y"], &["q"]);
        let q = unit("q.js", &["q"], &[]);

        let mut container = Container::from_units(vec![y.clone(), x.clone(), q.clone()]);
        assert_eq!(names(&mut container), ["x.js", "q.js", "y.js"]);

        // Once q.js is gone x.js and y.js are unconstrained; the previous
        // load order decides, unlike a fresh container
        container.retain(|u| u.name != "q.js").unwrap();
        assert_eq!(names(&mut container), ["x.js", "y.js"]);

        let mut fresh = Container::from_units(vec![y, x]);
        assert_eq!(names(&mut fresh), ["y.js", "x.js"]);
    }
}

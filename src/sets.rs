//! In-memory sets of strings and the n-ary algebra over them.
//!
//! A [`Set`] is an unordered collection of strings with membership by
//! equality. The four algebraic operations accept any number of inputs,
//! always allocate a fresh result and never mutate their inputs:
//!
//! * [`union`] – elements present in at least one input.
//! * [`intersection`] – elements present in every input, determined by
//!   counting occurrences across the inputs rather than by pairwise folding.
//! * [`difference`] – elements of the first input present in no later one.
//! * [`symmetric_difference`] – elements whose total occurrence count across
//!   the inputs is exactly one. For more than two inputs this deliberately
//!   differs from the iterated pairwise symmetric difference.
//!
//! With zero inputs every operation yields the empty set.

use std::collections::{HashMap, HashSet};

/// An unordered, duplicate-free set of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    items: HashSet<String>,
}

impl Set {
    pub fn new() -> Self {
        Self { items: HashSet::new() }
    }

    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Inserts `item`, reporting whether the set changed.
    pub fn add(&mut self, item: impl Into<String>) -> bool {
        self.items.insert(item.into())
    }

    /// Removes `item`, reporting whether the set changed.
    pub fn remove(&mut self, item: &str) -> bool {
        self.items.remove(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// The elements in lexicographic order, for stable output.
    pub fn items(&self) -> Vec<String> {
        let mut items: Vec<String> = self.items.iter().cloned().collect();
        items.sort();
        items
    }

    pub fn same_as(&self, other: &Set) -> bool {
        self.items == other.items
    }

    /// Strict superset: `self` must be strictly larger than `other` and
    /// contain every element of it, so `a.superset_of(&a)` is false.
    pub fn superset_of(&self, other: &Set) -> bool {
        if self.items.len() <= other.items.len() {
            return false;
        }
        other.items.iter().all(|item| self.items.contains(item))
    }

    /// Strict subset, the mirror of [`Set::superset_of`].
    pub fn subset_of(&self, other: &Set) -> bool {
        other.superset_of(self)
    }

    pub fn disjoint_of(&self, other: &Set) -> bool {
        // probe the smaller side
        let (small, large) = if self.items.len() < other.items.len() {
            (&self.items, &other.items)
        } else {
            (&other.items, &self.items)
        };
        small.iter().all(|item| !large.contains(item))
    }
}

impl<S: Into<String>> FromIterator<S> for Set {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Set::from_items(iter)
    }
}

pub fn union(sets: &[&Set]) -> Set {
    let mut items = HashSet::new();
    for set in sets {
        items.extend(set.items.iter().cloned());
    }
    Set { items }
}

pub fn intersection(sets: &[&Set]) -> Set {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for set in sets {
        for item in &set.items {
            *counts.entry(item.as_str()).or_insert(0) += 1;
        }
    }
    let items = counts
        .into_iter()
        .filter(|&(_, count)| count == sets.len())
        .map(|(item, _)| item.to_owned())
        .collect();
    Set { items }
}

pub fn difference(sets: &[&Set]) -> Set {
    let Some((first, rest)) = sets.split_first() else {
        return Set::new();
    };
    let mut items = first.items.clone();
    for set in rest {
        for item in &set.items {
            items.remove(item);
        }
    }
    Set { items }
}

pub fn symmetric_difference(sets: &[&Set]) -> Set {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for set in sets {
        for item in &set.items {
            *counts.entry(item.as_str()).or_insert(0) += 1;
        }
    }
    let items = counts
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(item, _)| item.to_owned())
        .collect();
    Set { items }
}

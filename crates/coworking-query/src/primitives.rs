//! Query primitives.
//!
//! A small algebra over sequences that every report is built from: filter,
//! sort, distinct, group, and the usual reductions. None of them mutate
//! their input; each consumes an iterator and hands back a new `Vec` or a
//! scalar.
//!
//! Ordering guarantees matter for reproducible reports:
//!
//! - [`filter`], [`distinct_by`] and [`group_reduce`] keep input order.
//! - [`sort_by`] is stable, so ties keep their input order.
//! - [`min_by`] and [`max_by`] return the *first* extremal element. This
//!   differs from [`Iterator::max_by_key`], which returns the last one.

use coworking_core::InvalidDataError;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::collate;

/// Sort direction for a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

/// One component of a composite sort order.
pub struct SortKey<'k, T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering + 'k>,
    direction: Direction,
}

impl<'k, T> SortKey<'k, T> {
    /// Ascending order on a key extracted from each element.
    pub fn by<K: Ord + 'k>(key: impl Fn(&T) -> K + 'k) -> Self {
        Self {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
            direction: Direction::Asc,
        }
    }

    /// Ascending order on a text key, using [`collate::compare`].
    pub fn text<F>(key: F) -> Self
    where
        F: Fn(&T) -> &str + 'k,
    {
        Self {
            compare: Box::new(move |a, b| collate::compare(key(a), key(b))),
            direction: Direction::Asc,
        }
    }

    /// Reverse this key.
    #[must_use]
    pub fn desc(mut self) -> Self {
        self.direction = Direction::Desc;
        self
    }

    /// Set the direction explicitly.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    fn apply(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    }
}

/// Keep the elements matching `predicate`, in input order.
pub fn filter<T>(items: impl IntoIterator<Item = T>, predicate: impl FnMut(&T) -> bool) -> Vec<T> {
    items.into_iter().filter(predicate).collect()
}

/// Stable lexicographic sort on a list of keys.
///
/// The first key decides; later keys only break ties of the earlier ones.
/// Elements equal on every key keep their input order.
///
/// ```
/// use coworking_query::primitives::{sort_by, SortKey};
///
/// let people = vec![(2023, "Beltrán"), (2024, "Zamora"), (2024, "Álvarez")];
/// let sorted = sort_by(people, &[
///     SortKey::by(|p: &(i32, &str)| p.0).desc(),
///     SortKey::text(|p: &(i32, &str)| p.1),
/// ]);
/// assert_eq!(sorted, vec![(2024, "Álvarez"), (2024, "Zamora"), (2023, "Beltrán")]);
/// ```
pub fn sort_by<T>(items: impl IntoIterator<Item = T>, keys: &[SortKey<'_, T>]) -> Vec<T> {
    let mut items: Vec<T> = items.into_iter().collect();
    items.sort_by(|a, b| {
        keys.iter()
            .map(|key| key.apply(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    items
}

/// Drop elements whose key was already seen. The first occurrence wins.
pub fn distinct_by<T, K: Eq + Hash>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut(&T) -> K,
) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Fold the elements of each group into one value per key.
///
/// Groups come back in the order their key was first seen.
///
/// ```
/// use coworking_query::primitives::group_reduce;
///
/// let words = ["sala", "sol", "aula", "atrio", "sur"];
/// let counts = group_reduce(words, |w| w.chars().next(), || 0, |n, _| n + 1);
/// assert_eq!(counts, vec![(Some('s'), 3), (Some('a'), 2)]);
/// ```
pub fn group_reduce<T, K, A>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut(&T) -> K,
    mut init: impl FnMut() -> A,
    mut fold: impl FnMut(A, &T) -> A,
) -> Vec<(K, A)>
where
    K: Eq + Hash + Clone,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Option<A>)> = Vec::new();

    for item in items {
        let slot = match slots.entry(key(&item)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                groups.push((e.key().clone(), None));
                *e.insert(groups.len() - 1)
            }
        };
        let acc = groups[slot].1.take().unwrap_or_else(&mut init);
        groups[slot].1 = Some(fold(acc, &item));
    }

    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.map(|acc| (k, acc)))
        .collect()
}

/// The first element with the smallest key, or `None` if there are none.
pub fn min_by<T, K: Ord>(items: impl IntoIterator<Item = T>, mut key: impl FnMut(&T) -> K) -> Option<T> {
    first_extremum(items, |item| Ok::<_, std::convert::Infallible>(key(item)), Ordering::Less)
        .unwrap_or_else(|never| match never {})
}

/// The first element with the largest key, or `None` if there are none.
///
/// On ties the earliest element in iteration order is returned.
///
/// ```
/// use coworking_query::primitives::max_by;
///
/// let best = max_by(vec![("a", 3), ("b", 5), ("c", 5)], |p| p.1);
/// assert_eq!(best, Some(("b", 5)));
/// ```
pub fn max_by<T, K: Ord>(items: impl IntoIterator<Item = T>, mut key: impl FnMut(&T) -> K) -> Option<T> {
    first_extremum(items, |item| Ok::<_, std::convert::Infallible>(key(item)), Ordering::Greater)
        .unwrap_or_else(|never| match never {})
}

/// Like [`min_by`] with a fallible key; the first error aborts.
///
/// # Errors
///
/// Returns the first error produced by `key`.
pub fn try_min_by<T, K: Ord, E>(
    items: impl IntoIterator<Item = T>,
    key: impl FnMut(&T) -> Result<K, E>,
) -> Result<Option<T>, E> {
    first_extremum(items, key, Ordering::Less)
}

/// Like [`max_by`] with a fallible key; the first error aborts.
///
/// # Errors
///
/// Returns the first error produced by `key`.
pub fn try_max_by<T, K: Ord, E>(
    items: impl IntoIterator<Item = T>,
    key: impl FnMut(&T) -> Result<K, E>,
) -> Result<Option<T>, E> {
    first_extremum(items, key, Ordering::Greater)
}

/// Replace the current best only on a strict improvement, so the first
/// extremal element survives ties.
fn first_extremum<T, K: Ord, E>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut(&T) -> Result<K, E>,
    better: Ordering,
) -> Result<Option<T>, E> {
    let mut best: Option<(K, T)> = None;
    for item in items {
        let k = key(&item)?;
        let replace = match &best {
            Some((best_key, _)) => k.cmp(best_key) == better,
            None => true,
        };
        if replace {
            best = Some((k, item));
        }
    }
    Ok(best.map(|(_, item)| item))
}

/// Sum of decimal values. Zero for an empty sequence.
///
/// # Errors
///
/// [`InvalidDataError::Overflow`] if the total does not fit in a
/// [`Decimal`].
pub fn sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, InvalidDataError> {
    try_sum(values.into_iter().map(Ok))
}

/// Sum of fallible decimal values; the first error aborts.
///
/// # Errors
///
/// Returns the first error in `values`, or an overflow error converted
/// into `E`.
pub fn try_sum<E>(values: impl IntoIterator<Item = Result<Decimal, E>>) -> Result<Decimal, E>
where
    E: From<InvalidDataError>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v?)
            .ok_or_else(|| InvalidDataError::Overflow { operation: "sum" }.into())
    })
}

/// Number of elements.
pub fn count<T>(items: impl IntoIterator<Item = T>) -> usize {
    items.into_iter().count()
}

/// The first `k` elements (fewer if the sequence is shorter).
pub fn take<T>(items: impl IntoIterator<Item = T>, k: usize) -> Vec<T> {
    items.into_iter().take(k).collect()
}

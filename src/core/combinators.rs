//! Purpose: Higher-level combinators derived from `reduce` and `walk`.
//! Exports: `map`, `filter`, `reject`, `compact`, `pluck`, `flatten`, `unique`, `sum`,
//!          `sum_numbers`, `times`, `contains`, `every`, `none`, `any`, `Nest`, `Nested`.
//! Role: Thin compositions; ordering and early exit are inherited from the traversal layer.
//! Invariants: Every result is a freshly built `Vec`; inputs are only read.
//! Invariants: Quantifiers stop at the first element that decides the answer.
use std::ops::{Add, ControlFlow};

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::core::helpers::{Truthy, identity, property};
use crate::core::path::Lookup;
use crate::core::reduce::{reduce, try_reduce};
use crate::core::traverse::Traverse;

pub fn map<'a, C, U, F>(collection: &'a C, mut callback: F) -> Vec<U>
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> U,
{
    reduce(
        collection,
        |mut mapped, item, key, all| {
            mapped.push(callback(item, key, all));
            mapped
        },
        Vec::new(),
    )
}

pub fn filter<'a, C, F>(collection: &'a C, mut predicate: F) -> Vec<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: Clone,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> bool,
{
    reduce(
        collection,
        |mut passed, item, key, all| {
            if predicate(item, key, all) {
                passed.push(item.clone());
            }
            passed
        },
        Vec::new(),
    )
}

pub fn reject<'a, C, F>(collection: &'a C, mut predicate: F) -> Vec<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: Clone,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> bool,
{
    filter(collection, |item, key, all| !predicate(item, key, all))
}

/// Drops every falsy element (see [`Truthy`]).
pub fn compact<C>(collection: &C) -> Vec<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: Clone + Truthy,
{
    filter(collection, |item, _, _| identity(item).is_truthy())
}

/// `item[key]` for every item; `None` marks items without that property.
pub fn pluck<'a, C>(collection: &'a C, key: &str) -> Vec<Option<<C::Item as Lookup>::Output>>
where
    C: Traverse + ?Sized,
    C::Item: Lookup + 'a,
    <C::Item as Lookup>::Output: Clone,
{
    let get = property::<C::Item>(key);
    map(collection, |item, _, _| get(item).cloned())
}

/// Items that may hold a nested sequence.
pub trait Nest: Sized {
    fn nested(&self) -> Option<&[Self]>;
}

impl Nest for Value {
    fn nested(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Typed tree of values for arbitrarily deep nesting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Nested<T> {
    Leaf(T),
    List(Vec<Nested<T>>),
}

impl<T> Nest for Nested<T> {
    fn nested(&self) -> Option<&[Nested<T>]> {
        match self {
            Nested::Leaf(_) => None,
            Nested::List(items) => Some(items),
        }
    }
}

/// Concatenates nested sequences to any depth; non-sequence items pass through.
pub fn flatten<C>(collection: &C) -> Vec<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: Nest + Clone,
{
    reduce(
        collection,
        |mut flattened, item, _, _| {
            match item.nested() {
                Some(inner) => flattened.extend(flatten(inner)),
                None => flattened.push(item.clone()),
            }
            flattened
        },
        Vec::new(),
    )
}

/// Keeps the first occurrence of each item, in order.
///
/// Membership is checked with [`contains`] against the output built so far,
/// which is O(n²). Hashing would need `Hash + Eq` and would not see `NaN`
/// as distinct from itself the way `PartialEq` does, so the scan stays.
pub fn unique<C>(collection: &C) -> Vec<C::Item>
where
    C: Traverse + ?Sized,
    C::Item: PartialEq + Clone,
{
    reduce(
        collection,
        |mut seen: Vec<C::Item>, item, _, _| {
            if !contains(seen.as_slice(), item) {
                seen.push(item.clone());
            }
            seen
        },
        Vec::new(),
    )
}

pub fn sum<'a, C, S>(collection: &'a C) -> S
where
    C: Traverse + ?Sized,
    S: Default + Add<&'a C::Item, Output = S>,
{
    reduce(collection, |total, item, _, _| total + item, S::default())
}

/// Sums JSON numbers, failing on the first element that is not one.
pub fn sum_numbers<C>(collection: &C) -> Result<f64, Error>
where
    C: Traverse<Item = Value> + ?Sized,
{
    try_reduce(
        collection,
        |total, item, key, _| match item.as_f64() {
            Some(number) => Ok(total + number),
            None => Err(Error::new(ErrorKind::Type)
                .with_message(format!("cannot sum non-numeric value {item}"))
                .with_key(key.to_string())),
        },
        0.0,
    )
}

/// `callback(i)` for `i` in `0..n`; `None` when `n` is negative, without calling `callback`.
pub fn times<T, F>(n: i64, mut callback: F) -> Option<Vec<T>>
where
    F: FnMut(usize) -> T,
{
    let count = usize::try_from(n).ok()?;
    let slots = vec![(); count];
    Some(map(&slots, |_, index, _| callback(index)))
}

pub fn contains<C>(collection: &C, target: &C::Item) -> bool
where
    C: Traverse + ?Sized,
    C::Item: PartialEq,
{
    any(collection, |item, _, _| item == target)
}

pub fn every<'a, C, F>(collection: &'a C, mut predicate: F) -> bool
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> bool,
{
    collection
        .walk((), |(), item, key| {
            if predicate(item, key, collection) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .is_continue()
}

pub fn none<'a, C, F>(collection: &'a C, predicate: F) -> bool
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> bool,
{
    !any(collection, predicate)
}

pub fn any<'a, C, F>(collection: &'a C, mut predicate: F) -> bool
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> bool,
{
    collection
        .walk((), |(), item, key| {
            if predicate(item, key, collection) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
}

#[cfg(test)]
mod tests {
    use super::{
        Nested, any, compact, contains, every, filter, flatten, map, none, pluck, reject,
        sum, sum_numbers, times, unique,
    };
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn map_passes_item_index_and_collection() {
        let items = [10, 20, 30];
        let out = map(&items, |item, index, all| item + index as i32 + all.len() as i32);
        assert_eq!(out, vec![13, 24, 35]);
    }

    #[test]
    fn filter_and_reject_split_the_input() {
        let items = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(filter(&items, |n, _, _| n % 2 == 0), vec![2, 4, 6]);
        assert_eq!(reject(&items, |n, _, _| n % 2 == 0), vec![1, 3, 5]);
    }

    #[test]
    fn compact_removes_falsy_json() {
        let items = json!([0, 1, false, 2, "", 3, null, "a", [], {}]);
        assert_eq!(
            compact(&items),
            vec![json!(1), json!(2), json!(3), json!("a"), json!([]), json!({})]
        );
    }

    #[test]
    fn pluck_keeps_missing_as_none() {
        let people = json!([
            {"name": "moe", "age": 40},
            {"name": "larry", "age": 50},
            {"age": 60}
        ]);
        assert_eq!(
            pluck(&people, "name"),
            vec![Some(json!("moe")), Some(json!("larry")), None]
        );
    }

    #[test]
    fn flatten_json_to_any_depth() {
        let nested = json!([1, [2, [3, 4], 5]]);
        assert_eq!(
            flatten(&nested),
            vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
        );
    }

    #[test]
    fn flatten_typed_tree() {
        let tree = vec![
            Nested::Leaf('a'),
            Nested::List(vec![Nested::Leaf('b'), Nested::List(vec![Nested::Leaf('c')])]),
            Nested::List(vec![]),
        ];
        assert_eq!(
            flatten(&tree),
            vec![Nested::Leaf('a'), Nested::Leaf('b'), Nested::Leaf('c')]
        );
    }

    #[test]
    fn unique_keeps_first_occurrence() {
        assert_eq!(unique(&[1, 2, 1, 3, 2, 4]), vec![1, 2, 3, 4]);
        let once = unique(&["b", "a", "b"]);
        assert_eq!(unique(&once), once);
    }

    #[test]
    fn unique_never_merges_nan() {
        let values = [f64::NAN, f64::NAN];
        assert_eq!(unique(&values).len(), 2);
    }

    #[test]
    fn sum_starts_at_zero() {
        assert_eq!(sum::<_, i64>(&[1i64, 2, 3]), 6);
        assert_eq!(sum::<_, i64>(&Vec::<i64>::new()), 0);
        assert_eq!(sum::<_, f64>(&[0.5, 0.25]), 0.75);
    }

    #[test]
    fn sum_numbers_fails_fast_on_non_number() {
        assert_eq!(sum_numbers(&json!([1, 2.5, 3])).unwrap(), 6.5);
        let err = sum_numbers(&json!([1, "two", 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.key(), Some("1"));
    }

    #[test]
    fn times_builds_from_index() {
        assert_eq!(times(3, |i| i * 10), Some(vec![0, 10, 20]));
        assert_eq!(times(0, |i| i), Some(vec![]));
    }

    #[test]
    fn negative_times_never_calls_back() {
        let mut calls = 0;
        let out = times(-1, |i| {
            calls += 1;
            i
        });
        assert_eq!(out, None);
        assert_eq!(calls, 0);
    }

    #[test]
    fn contains_uses_equality() {
        assert!(contains(&[1, 2, 3], &2));
        assert!(!contains(&[1, 2, 3], &4));
        assert!(contains(&json!([{"a": 1}]), &json!({"a": 1})));
        assert!(!contains(&[f64::NAN], &f64::NAN));
    }

    #[test]
    fn quantifiers_short_circuit() {
        let items = [2, 4, 5, 6];
        let mut visited = 0;
        assert!(!every(&items, |n, _, _| {
            visited += 1;
            n % 2 == 0
        }));
        assert_eq!(visited, 3);

        let mut visited = 0;
        assert!(any(&items, |n, _, _| {
            visited += 1;
            *n == 4
        }));
        assert_eq!(visited, 2);

        let mut visited = 0;
        assert!(!none(&items, |n, _, _| {
            visited += 1;
            *n > 1
        }));
        assert_eq!(visited, 1);
    }

    #[test]
    fn quantifier_identities_on_empty() {
        let empty: [i32; 0] = [];
        assert!(every(&empty, |_, _, _| false));
        assert!(none(&empty, |_, _, _| true));
        assert!(!any(&empty, |_, _, _| true));
    }
}

//! Purpose: The single iteration primitive every combinator is built on.
//! Exports: `Traverse`, `Key`, `Collection`, `each`, `try_each`, `keys`.
//! Role: Explicit capability over indexed sequences and keyed collections; no shape sniffing.
//! Invariants: Indexed shapes visit positions 0..len in ascending order, skipping nothing.
//! Invariants: Keyed shapes visit entries in the map's own enumeration order.
//! Invariants: `each` never stops early; only `walk` callers that break can short-circuit.
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::fmt;
use std::hash::BuildHasher;
use std::ops::ControlFlow;

use serde_json::{Map, Value};

/// Position of an element inside a dynamic collection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl Key<'_> {
    pub fn as_index(self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(index),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(*name),
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Tagged view of a JSON value at the traversal boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collection<'a> {
    Indexed(&'a [Value]),
    Keyed(&'a Map<String, Value>),
    Scalar(&'a Value),
}

impl<'a> Collection<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Collection::Indexed(items),
            Value::Object(map) => Collection::Keyed(map),
            other => Collection::Scalar(other),
        }
    }

    pub fn is_collection(&self) -> bool {
        !matches!(self, Collection::Scalar(_))
    }
}

/// A collection that can be walked element by element.
///
/// `walk` is a fold that may stop early: the visitor returns
/// `ControlFlow::Break` to end the pass. Everything else in the crate
/// (`each`, `reduce`, the quantifiers) is expressed through it.
pub trait Traverse {
    type Item;
    type Key<'a>: Copy + fmt::Display
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a Self::Item, Self::Key<'a>) -> ControlFlow<B, M>;
}

impl<T> Traverse for [T] {
    type Item = T;
    type Key<'a>
        = usize
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, mut visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a T, usize) -> ControlFlow<B, M>,
    {
        self.iter()
            .enumerate()
            .try_fold(init, |memo, (index, item)| visit(memo, item, index))
    }
}

impl<T> Traverse for Vec<T> {
    type Item = T;
    type Key<'a>
        = usize
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a T, usize) -> ControlFlow<B, M>,
    {
        self.as_slice().walk(init, visit)
    }
}

impl<T, const N: usize> Traverse for [T; N] {
    type Item = T;
    type Key<'a>
        = usize
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a T, usize) -> ControlFlow<B, M>,
    {
        self.as_slice().walk(init, visit)
    }
}

impl<V> Traverse for BTreeMap<String, V> {
    type Item = V;
    type Key<'a>
        = &'a str
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, mut visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a V, &'a str) -> ControlFlow<B, M>,
    {
        self.iter()
            .try_fold(init, |memo, (key, value)| visit(memo, value, key.as_str()))
    }
}

impl<V, S: BuildHasher> Traverse for HashMap<String, V, S> {
    type Item = V;
    type Key<'a>
        = &'a str
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, mut visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a V, &'a str) -> ControlFlow<B, M>,
    {
        self.iter()
            .try_fold(init, |memo, (key, value)| visit(memo, value, key.as_str()))
    }
}

impl Traverse for Map<String, Value> {
    type Item = Value;
    type Key<'a>
        = &'a str
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, mut visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a Value, &'a str) -> ControlFlow<B, M>,
    {
        self.iter()
            .try_fold(init, |memo, (key, value)| visit(memo, value, key.as_str()))
    }
}

/// Arrays walk by index, objects by key. Scalars have no elements.
impl Traverse for Value {
    type Item = Value;
    type Key<'a>
        = Key<'a>
    where
        Self: 'a;

    fn walk<'a, M, B, F>(&'a self, init: M, mut visit: F) -> ControlFlow<B, M>
    where
        F: FnMut(M, &'a Value, Key<'a>) -> ControlFlow<B, M>,
    {
        match Collection::of(self) {
            Collection::Indexed(items) => items.walk(init, |memo, item, index| {
                visit(memo, item, Key::Index(index))
            }),
            Collection::Keyed(map) => {
                map.walk(init, |memo, value, name| visit(memo, value, Key::Name(name)))
            }
            Collection::Scalar(_) => ControlFlow::Continue(init),
        }
    }
}

pub(crate) fn finish<M>(flow: ControlFlow<Infallible, M>) -> M {
    match flow {
        ControlFlow::Continue(memo) => memo,
        ControlFlow::Break(never) => match never {},
    }
}

/// Calls `callback(item, key, collection)` for every element and hands the
/// collection back for chaining.
pub fn each<'a, C, F>(collection: &'a C, mut callback: F) -> &'a C
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C),
{
    finish(collection.walk((), |(), item, key| {
        callback(item, key, collection);
        ControlFlow::<Infallible, ()>::Continue(())
    }));
    collection
}

/// Like [`each`], but the first callback error ends the pass and is returned as-is.
pub fn try_each<'a, C, E, F>(collection: &'a C, mut callback: F) -> Result<&'a C, E>
where
    C: Traverse + ?Sized,
    F: FnMut(&'a C::Item, C::Key<'a>, &'a C) -> Result<(), E>,
{
    let flow = collection.walk((), |(), item, key| match callback(item, key, collection) {
        Ok(()) => ControlFlow::Continue(()),
        Err(err) => ControlFlow::Break(err),
    });
    match flow {
        ControlFlow::Continue(()) => Ok(collection),
        ControlFlow::Break(err) => Err(err),
    }
}

pub fn keys<'a, C>(collection: &'a C) -> Vec<C::Key<'a>>
where
    C: Traverse + ?Sized,
{
    let mut out = Vec::new();
    each(collection, |_, key, _| out.push(key));
    out
}

#[cfg(test)]
mod tests {
    use super::{Collection, Key, each, keys, try_each};
    use crate::core::reduce::reduce;
    use serde_json::{Map, Value, json};
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn each_visits_indices_in_order_and_returns_input() {
        let items = vec!["a", "b", "c"];
        let mut seen = Vec::new();
        let returned = each(&items, |item, index, all| {
            assert_eq!(all.len(), 3);
            seen.push((index, *item));
        });
        assert!(std::ptr::eq(returned, &items));
        assert_eq!(seen, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn each_visits_json_null_slots() {
        let value = json!([1, null, 3]);
        let mut count = 0;
        each(&value, |_, _, _| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn each_over_object_uses_insertion_order() {
        let value = json!({"b": 1, "a": 2, "c": 3});
        let mut seen = Vec::new();
        each(&value, |item, key, _| {
            seen.push((key.as_name().map(str::to_string), item.clone()))
        });
        assert_eq!(
            seen,
            vec![
                (Some("b".to_string()), json!(1)),
                (Some("a".to_string()), json!(2)),
                (Some("c".to_string()), json!(3)),
            ]
        );
    }

    #[test]
    fn each_over_scalar_visits_nothing() {
        let value = json!(42);
        let mut count = 0;
        each(&value, |_, _, _| count += 1);
        assert_eq!(count, 0);
        assert!(!Collection::of(&value).is_collection());
    }

    #[test]
    fn keys_follow_traversal_order() {
        let mut map = BTreeMap::new();
        map.insert("y".to_string(), 2);
        map.insert("x".to_string(), 1);
        assert_eq!(keys(&map), vec!["x", "y"]);
        assert_eq!(keys(&[10, 20]), vec![0, 1]);
        assert_eq!(
            keys(&json!({"k": true})),
            vec![Key::Name("k")]
        );
    }

    #[test]
    fn hash_map_visits_every_entry_once() {
        let scores: HashMap<String, i32> = [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect();
        let mut seen = Vec::new();
        let returned = each(&scores, |score, name, all| {
            assert_eq!(all.len(), 3);
            seen.push((name.to_string(), *score));
        });
        assert!(std::ptr::eq(returned, &scores));
        seen.sort();
        assert_eq!(
            seen,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
        assert_eq!(reduce(&scores, |memo, score, _, _| memo + score, 0i32), 6);

        let mut names = keys(&scores);
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn json_map_keys_keep_insertion_order() {
        let mut map = Map::new();
        map.insert("z".to_string(), json!(1));
        map.insert("a".to_string(), json!(2));
        map.insert("m".to_string(), json!(3));
        assert_eq!(keys(&map), vec!["z", "a", "m"]);
        let total = reduce(&map, |memo, value, _, _| memo + value.as_i64().unwrap_or(0), 0);
        assert_eq!(total, 6);
    }

    #[test]
    fn key_accessors_split_index_and_name() {
        assert_eq!(Key::Index(2).as_index(), Some(2));
        assert_eq!(Key::Name("x").as_index(), None);
        assert_eq!(Key::Name("x").as_name(), Some("x"));
        assert_eq!(Key::Index(2).as_name(), None);
    }

    #[test]
    fn try_each_stops_at_first_error() {
        let items = [1, 2, 3, 4];
        let mut visited = Vec::new();
        let result = try_each(&items, |item, _, _| {
            visited.push(*item);
            if *item == 2 { Err("boom") } else { Ok(()) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(visited, vec![1, 2]);
    }

    #[test]
    fn key_display_matches_position() {
        assert_eq!(Key::Index(3).to_string(), "3");
        assert_eq!(Key::Name("name").to_string(), "name");
        let value: Value = json!([]);
        assert!(Collection::of(&value).is_collection());
    }
}

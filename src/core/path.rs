//! Purpose: Null-safe deep property access over nested documents.
//! Exports: `Lookup`, `Path`, `get`.
//! Role: Independent of traversal; walks one property per path segment.
//! Invariants: A missing or null intermediate yields `None`, never an error or panic.
//! Invariants: A present JSON `null` at the end of the path is `Some(Value::Null)`.
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// Single-step property access by string key.
pub trait Lookup {
    type Output;

    fn lookup(&self, key: &str) -> Option<&Self::Output>;
}

impl Lookup for Value {
    type Output = Value;

    fn lookup(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Array(items) => array_index(key).and_then(|index| items.get(index)),
            _ => None,
        }
    }
}

impl Lookup for Map<String, Value> {
    type Output = Value;

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<V> Lookup for BTreeMap<String, V> {
    type Output = V;

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

impl<V, S: BuildHasher> Lookup for HashMap<String, V, S> {
    type Output = V;

    fn lookup(&self, key: &str) -> Option<&V> {
        self.get(key)
    }
}

// Only canonical decimal indices address array slots: "1" does, "01" and "+1" do not.
fn array_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

/// A period-delimited property chain, e.g. `response.data.users`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path<'p> {
    segments: Vec<&'p str>,
}

impl<'p> Path<'p> {
    pub fn parse(path: &'p str) -> Self {
        Self {
            segments: path.split('.').collect(),
        }
    }

    pub fn segments(&self) -> &[&'p str] {
        &self.segments
    }

    pub fn resolve<'a, T>(&self, object: &'a T) -> Option<&'a T>
    where
        T: Lookup<Output = T>,
    {
        let mut depth = 0usize;
        let found = self.segments.iter().try_fold(object, |node, segment| {
            depth += 1;
            node.lookup(segment)
        });
        if found.is_none() {
            tracing::trace!(
                depth,
                segments = self.segments.len(),
                "path lookup short-circuited"
            );
        }
        found
    }
}

/// Follows `path` from `object`, returning `None` as soon as a step has nothing to descend into.
pub fn get<'a, T>(object: &'a T, path: &str) -> Option<&'a T>
where
    T: Lookup<Output = T>,
{
    Path::parse(path).resolve(object)
}

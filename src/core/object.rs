// Small object and function utilities that do not go through traversal.
use serde_json::{Map, Value};

/// Copies every property of each source into `object`, later sources winning.
pub fn extend<'o>(
    object: &'o mut Map<String, Value>,
    sources: &[&Map<String, Value>],
) -> &'o mut Map<String, Value> {
    for source in sources {
        for (key, value) in source.iter() {
            object.insert(key.clone(), value.clone());
        }
    }
    object
}

pub fn values(object: &Map<String, Value>) -> Vec<Value> {
    object.values().cloned().collect()
}

/// Copy of `collection` without any element equal to one of `excluded`.
pub fn without<T>(collection: &[T], excluded: &[T]) -> Vec<T>
where
    T: PartialEq + Clone,
{
    collection
        .iter()
        .filter(|item| !excluded.contains(item))
        .cloned()
        .collect()
}

/// Partial application with an explicit receiver: the returned closure calls
/// `f(&context, bound ++ called)`.
pub fn bind<Ctx, A, R, F>(f: F, context: Ctx, bound: Vec<A>) -> impl Fn(&[A]) -> R
where
    F: Fn(&Ctx, &[A]) -> R,
    A: Clone,
{
    move |called: &[A]| {
        let mut args = Vec::with_capacity(bound.len() + called.len());
        args.extend_from_slice(&bound);
        args.extend_from_slice(called);
        f(&context, &args)
    }
}

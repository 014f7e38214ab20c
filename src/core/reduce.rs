//! Purpose: Fold a collection into one accumulated value.
//! Exports: `reduce`, `try_reduce`.
//! Role: Single source of evaluation order for every derived combinator.
//! Invariants: The memo is moved into each callback and replaced by its return value.
//! Invariants: An empty collection returns the initial memo untouched.
use std::convert::Infallible;
use std::ops::ControlFlow;

use crate::core::traverse::{Traverse, finish};

pub fn reduce<'a, C, M, F>(collection: &'a C, mut callback: F, memo: M) -> M
where
    C: Traverse + ?Sized,
    F: FnMut(M, &'a C::Item, C::Key<'a>, &'a C) -> M,
{
    finish(collection.walk(memo, |memo, item, key| {
        ControlFlow::<Infallible, M>::Continue(callback(memo, item, key, collection))
    }))
}

/// Fallible [`reduce`]: the first `Err` from `callback` stops the fold and is returned unchanged.
pub fn try_reduce<'a, C, M, E, F>(collection: &'a C, mut callback: F, memo: M) -> Result<M, E>
where
    C: Traverse + ?Sized,
    F: FnMut(M, &'a C::Item, C::Key<'a>, &'a C) -> Result<M, E>,
{
    let flow = collection.walk(memo, |memo, item, key| {
        match callback(memo, item, key, collection) {
            Ok(next) => ControlFlow::Continue(next),
            Err(err) => ControlFlow::Break(err),
        }
    });
    match flow {
        ControlFlow::Continue(memo) => Ok(memo),
        ControlFlow::Break(err) => Err(err),
    }
}

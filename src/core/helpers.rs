//! Purpose: Zero-dependency value and shape utilities used by the combinators.
//! Exports: `identity`, `is_object`, `property`, `Truthy`.
//! Role: Leaf helpers; nothing here iterates.
//! Invariants: Falsy set is exactly: false, zero, NaN, empty string, None, JSON null.
use serde_json::Value;

use crate::core::path::Lookup;

pub fn identity<T>(value: T) -> T {
    value
}

/// True only for JSON objects; arrays, strings and other scalars are not plain objects.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Returns a getter for `key`, e.g. `property("name")(&user)`.
pub fn property<'k, T>(key: &'k str) -> impl Fn(&T) -> Option<&T::Output> + 'k
where
    T: Lookup + ?Sized,
{
    move |object: &T| object.lookup(key)
}

/// Host-style truthiness.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($ty:ty),*) => {
        $(impl Truthy for $ty {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n.is_truthy()),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

//! Purpose: Generate end-exclusive integer sequences from a (start, end, step) descriptor.
//! Exports: `RangeSpec`, `range`.
//! Role: Boundary arithmetic on top of `times` + `reduce`.
//! Invariants: Spans whose direction disagrees with the step are empty, never reversed.
//! Invariants: Arity outside 1..=3 is the only failure; a zero step yields an empty range.
//! Notes: Counting happens in i128 so spans near the i64 limits cannot overflow.
use serde::{Deserialize, Serialize};

use crate::core::combinators::times;
use crate::core::error::{Error, ErrorKind};
use crate::core::helpers::identity;
use crate::core::reduce::reduce;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

impl RangeSpec {
    pub fn to(end: i64) -> Self {
        Self {
            start: None,
            end,
            step: None,
        }
    }

    pub fn between(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end,
            step: None,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Positional form: `[end]`, `[start, end]`, or `[start, end, step]`.
    pub fn from_args(args: &[i64]) -> Result<Self, Error> {
        match *args {
            [end] => Ok(Self::to(end)),
            [start, end] => Ok(Self::between(start, end)),
            [start, end, step] => Ok(Self::between(start, end).with_step(step)),
            _ => {
                tracing::debug!(count = args.len(), "range arity rejected");
                Err(Error::new(ErrorKind::Arity)
                    .with_message(format!(
                        "range called with {} arguments, expecting between 1 and 3",
                        args.len()
                    ))
                    .with_hint("Pass END, START END, or START END STEP."))
            }
        }
    }

    pub fn start(&self) -> i64 {
        self.start.unwrap_or(0)
    }

    pub fn step(&self) -> i64 {
        self.step.unwrap_or(1)
    }

    /// Number of elements the range produces.
    pub fn len(&self) -> u64 {
        let start = i128::from(self.start());
        let step = i128::from(self.step());
        let span = i128::from(self.end) - start;
        if step == 0 || span == 0 || span.signum() != step.signum() {
            return 0;
        }
        let stride = step.abs();
        // ceil(|span| / |step|); |span| < 2^64 so this always fits in u64.
        ((span.abs() + stride - 1) / stride) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materializes the sequence described by `spec`.
///
/// # Panics
///
/// Panics with "capacity overflow" when the element count does not fit in
/// `usize`, the same limit `Vec::with_capacity` enforces.
pub fn range(spec: RangeSpec) -> Vec<i64> {
    let count = spec.len();
    if count == 0 {
        tracing::debug!(
            start = spec.start(),
            end = spec.end,
            step = spec.step(),
            "range is empty"
        );
        return Vec::new();
    }
    let start = i128::from(spec.start());
    let step = i128::from(spec.step());
    // `times` only answers `None` for counts it cannot index, which no Vec could hold either.
    let offsets = match i64::try_from(count).ok().and_then(|n| times(n, identity)) {
        Some(offsets) => offsets,
        None => panic!("capacity overflow: range of {count} elements"),
    };
    reduce(
        &offsets,
        |mut seq: Vec<i64>, offset, _, _| {
            // start + offset * step stays within [start, end), which is inside i64.
            seq.push((start + *offset as i128 * step) as i64);
            seq
        },
        Vec::with_capacity(offsets.len()),
    )
}

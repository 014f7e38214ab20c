//! Purpose: Lock the observable contract of the combinators through the public api.
//! Exports: Integration tests only (no runtime exports).
//! Role: Property-style checks over a small corpus of sequences and documents.
//! Invariants: Only `underline::api` is used; internal modules stay private.

use serde_json::{Value, json};
use underline::api::{
    RangeSpec, any, each, every, filter, flatten, get, map, none, range, reduce, reject, times,
    unique,
};

fn corpus() -> Vec<Vec<i64>> {
    vec![
        vec![],
        vec![7],
        vec![1, 2, 3, 4, 5],
        vec![3, 3, 1, 3, 2, 1],
        vec![-4, 0, 9, -4, 12, 0, 5],
    ]
}

#[test]
fn map_preserves_length_and_pointwise_values() {
    for seq in corpus() {
        let f = |item: &i64, index: usize, all: &Vec<i64>| item * 3 + index as i64 - all.len() as i64;
        let mapped = map(&seq, f);
        assert_eq!(mapped.len(), seq.len());
        for (index, item) in seq.iter().enumerate() {
            assert_eq!(mapped[index], f(item, index, &seq));
        }
    }
}

#[test]
fn filter_and_reject_partition_the_input() {
    for seq in corpus() {
        let even = |item: &i64, _: usize, _: &Vec<i64>| item % 2 == 0;
        let kept = filter(&seq, even);
        let dropped = reject(&seq, even);
        assert_eq!(kept.len() + dropped.len(), seq.len());
        assert!(kept.iter().all(|item| item % 2 == 0));
        assert!(dropped.iter().all(|item| item % 2 != 0));

        let mut rejoined = [kept, dropped].concat();
        let mut original = seq.clone();
        rejoined.sort_unstable();
        original.sort_unstable();
        assert_eq!(rejoined, original);
    }
}

#[test]
fn unique_is_idempotent() {
    for seq in corpus() {
        let once = unique(&seq);
        assert_eq!(unique(&once), once);
    }
}

#[test]
fn reduce_with_append_is_identity() {
    for seq in corpus() {
        let copy = reduce(
            &seq,
            |memo: Vec<i64>, item, _, _| [memo, vec![*item]].concat(),
            Vec::new(),
        );
        assert_eq!(copy, seq);
    }
}

#[test]
fn quantifiers_on_empty_sequences() {
    let empty: Vec<Value> = Vec::new();
    assert!(every(&empty, |_, _, _| false));
    assert!(!any(&empty, |_, _, _| true));
    assert!(none(&empty, |_, _, _| true));
}

#[test]
fn range_examples() {
    assert_eq!(range(RangeSpec::to(5)), vec![0, 1, 2, 3, 4]);
    assert_eq!(range(RangeSpec::between(2, 5)), vec![2, 3, 4]);
    assert_eq!(range(RangeSpec::between(5, 2).with_step(-1)), vec![5, 4, 3]);
    assert_eq!(range(RangeSpec::between(5, 2)), Vec::<i64>::new());
}

// Steps from `start` until `end` is reached or passed; a zero step never moves.
fn stepped(start: i64, end: i64, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let mut current = start;
    while (step > 0 && current < end) || (step < 0 && current > end) {
        out.push(current);
        current += step;
    }
    out
}

#[test]
fn range_agrees_with_stepping_loop() {
    for start in -20i64..=20 {
        for end in -20i64..=20 {
            for step in -45i64..=45 {
                let spec = RangeSpec::between(start, end).with_step(step);
                let expected = stepped(start, end, step);
                assert_eq!(range(spec), expected, "{spec:?}");
                assert_eq!(spec.len(), expected.len() as u64, "{spec:?}");
            }
        }
    }
}

#[test]
fn get_examples() {
    let doc = json!({"a": {"b": {"c": 7}}});
    assert_eq!(get(&doc, "a.b.c"), Some(&json!(7)));
    assert_eq!(get(&doc, "a.x.c"), None);
}

#[test]
fn flatten_example() {
    let nested = json!([1, [2, [3, 4], 5]]);
    assert_eq!(Value::Array(flatten(&nested)), json!([1, 2, 3, 4, 5]));
}

#[test]
fn negative_times_is_absent() {
    let mut called = false;
    assert_eq!(
        times(-1, |index| {
            called = true;
            index
        }),
        None
    );
    assert!(!called);
}

#[test]
fn each_returns_its_input_for_chaining() {
    let doc = json!({"x": 1, "y": 2});
    let mut total = 0;
    let same = each(&doc, |value, _, _| total += value.as_i64().unwrap_or(0));
    assert_eq!(same, &doc);
    assert_eq!(total, 3);
}

//! Negative feedback sampling for implicit interaction logs.
//!
//! An implicit log only records positives: each row is one observed
//! user-item event. Training a binary model needs negatives too, so this
//! module labels the observed pairs 1 and samples unobserved pairs from the
//! dense user×item grid as 0, a bounded number per user.
//!
//! The grid is materialized eagerly, O(|U|·|I|). That is an accepted
//! constraint for moderate catalog sizes, not a streaming design.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::PrepError;
use crate::table::{Column, ColumnData, Table, Value};

/// Name of the label column in the sampler's output.
///
/// Kept as the fixed name `rating` regardless of the input column names;
/// callers that need a different label name rename it afterwards.
pub const FEEDBACK_COL: &str = "rating";

/// Expand a positive-only interaction table into a labeled dataset.
///
/// Every distinct observed (user, item) pair is emitted with label 1. For
/// each user, up to `number_neg_per_pos` unobserved items are sampled
/// without replacement and emitted with label 0; users with fewer unobserved
/// items available get all of them. The output is sorted by (user, item)
/// ascending and has three columns: `user_col`, `item_col` and
/// [`FEEDBACK_COL`].
///
/// Sampling is driven entirely by `seed`: the same seed and the same
/// observed users, items and pairs produce the identical output, independent
/// of process or prior calls.
///
/// Fails with [`PrepError::MissingColumn`] if `user_col` or `item_col` is
/// absent, before any sampling occurs.
pub fn negative_feedback_sampler(
    interactions: &Table,
    user_col: &str,
    item_col: &str,
    number_neg_per_pos: usize,
    seed: u64,
) -> Result<Table, PrepError> {
    let user_idx = interactions.require_column(user_col)?;
    let item_idx = interactions.require_column(item_col)?;

    let users = distinct(interactions, user_idx);
    let items = distinct(interactions, item_idx);

    let mut observed: HashMap<Value, HashSet<Value>> = HashMap::with_capacity(users.len());
    for row in 0..interactions.n_rows() {
        observed
            .entry(interactions.value(row, user_idx))
            .or_default()
            .insert(interactions.value(row, item_idx));
    }

    // Walk the dense user×item grid: positives pass through, negatives are
    // sampled per user without replacement via a partial Fisher-Yates pass.
    // Each user gets a fresh generator from the same seed, so one user's
    // sample never depends on another's.
    let mut labeled: Vec<(Value, Value, i64)> =
        Vec::with_capacity(users.len() * (number_neg_per_pos + 1));
    for user in &users {
        let seen = &observed[user];

        let mut negatives: Vec<&Value> = Vec::with_capacity(items.len());
        for item in &items {
            if seen.contains(item) {
                labeled.push((user.clone(), item.clone(), 1));
            } else {
                negatives.push(item);
            }
        }

        let n_sample = number_neg_per_pos.min(negatives.len());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        for i in 0..n_sample {
            let j = rng.gen_range(i..negatives.len());
            negatives.swap(i, j);
        }
        for item in &negatives[..n_sample] {
            labeled.push((user.clone(), (*item).clone(), 0));
        }
    }

    labeled.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut user_out = ColumnData::with_dtype(interactions.columns()[user_idx].dtype());
    let mut item_out = ColumnData::with_dtype(interactions.columns()[item_idx].dtype());
    let mut feedback = Vec::with_capacity(labeled.len());
    for (user, item, label) in labeled {
        user_out.push(user);
        item_out.push(item);
        feedback.push(label);
    }

    Table::new(vec![
        Column::new(user_col, user_out),
        Column::new(item_col, item_out),
        Column::int(FEEDBACK_COL, feedback),
    ])
}

/// Distinct values of a column, in first-occurrence order.
fn distinct(table: &Table, col: usize) -> Vec<Value> {
    let mut seen = HashSet::with_capacity(table.n_rows());
    let mut out = Vec::new();
    for row in 0..table.n_rows() {
        let value = table.value(row, col);
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> Table {
        // user 1 saw two items, users 2 and 3 one each; four distinct items.
        Table::new(vec![
            Column::int("userID", vec![1, 1, 2, 3]),
            Column::int("itemID", vec![10, 20, 20, 30]),
            Column::int("clicks", vec![3, 1, 7, 2]),
        ])
        .unwrap()
    }

    fn rows(t: &Table) -> Vec<(Value, Value, Value)> {
        (0..t.n_rows())
            .map(|r| (t.value(r, 0), t.value(r, 1), t.value(r, 2)))
            .collect()
    }

    #[test]
    fn keeps_every_positive_pair() {
        let out = negative_feedback_sampler(&log(), "userID", "itemID", 1, 42).unwrap();
        let got = rows(&out);
        for (u, i) in [(1, 10), (1, 20), (2, 20), (3, 30)] {
            let pair = (Value::Int(u), Value::Int(i), Value::Int(1));
            assert!(got.contains(&pair), "missing positive {pair:?}");
        }
    }

    #[test]
    fn negative_count_is_bounded_per_user() {
        // 3 distinct items in this log; user 1 saw all of them, so it has
        // no negatives available while users 2 and 3 have 2 each.
        let log = Table::new(vec![
            Column::int("userID", vec![1, 1, 1, 2, 3]),
            Column::int("itemID", vec![10, 20, 30, 10, 20]),
        ])
        .unwrap();
        let out = negative_feedback_sampler(&log, "userID", "itemID", 5, 42).unwrap();

        let mut neg_per_user: HashMap<Value, usize> = HashMap::new();
        for (user, _, label) in rows(&out) {
            if label == Value::Int(0) {
                *neg_per_user.entry(user).or_default() += 1;
            }
        }
        assert_eq!(neg_per_user.get(&Value::Int(1)), None);
        assert_eq!(neg_per_user.get(&Value::Int(2)), Some(&2));
        assert_eq!(neg_per_user.get(&Value::Int(3)), Some(&2));
    }

    #[test]
    fn output_is_sorted_by_user_then_item() {
        let out = negative_feedback_sampler(&log(), "userID", "itemID", 2, 42).unwrap();
        let keys: Vec<(Value, Value)> = (0..out.n_rows())
            .map(|r| (out.value(r, 0), out.value(r, 1)))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn never_emits_pairs_outside_the_observed_grid() {
        let out = negative_feedback_sampler(&log(), "userID", "itemID", 10, 42).unwrap();
        let users: HashSet<Value> = [1, 2, 3].map(Value::Int).into();
        let items: HashSet<Value> = [10, 20, 30].map(Value::Int).into();
        for (user, item, _) in rows(&out) {
            assert!(users.contains(&user));
            assert!(items.contains(&item));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let a = negative_feedback_sampler(&log(), "userID", "itemID", 2, 11).unwrap();
        let b = negative_feedback_sampler(&log(), "userID", "itemID", 2, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn label_column_is_named_rating() {
        let out = negative_feedback_sampler(&log(), "userID", "itemID", 1, 42).unwrap();
        let names: Vec<&str> = out.column_names().collect();
        assert_eq!(names, vec!["userID", "itemID", "rating"]);
    }

    #[test]
    fn missing_column_aborts_before_sampling() {
        let err = negative_feedback_sampler(&log(), "nope", "itemID", 1, 42).unwrap_err();
        assert!(matches!(err, PrepError::MissingColumn(name) if name == "nope"));

        let err = negative_feedback_sampler(&log(), "userID", "nope", 1, 42).unwrap_err();
        assert!(matches!(err, PrepError::MissingColumn(name) if name == "nope"));
    }

    #[test]
    fn text_identifiers_are_supported() {
        let log = Table::new(vec![
            Column::text("userID", vec!["u1", "u2"]),
            Column::text("itemID", vec!["a", "b"]),
        ])
        .unwrap();
        let out = negative_feedback_sampler(&log, "userID", "itemID", 1, 42).unwrap();
        // Two positives plus one negative each: (u1, b) and (u2, a).
        assert_eq!(out.n_rows(), 4);
        assert_eq!(out.columns()[0].dtype(), crate::table::DType::Text);
    }
}

//! Set-difference filtering of one table against another on a composite key.

use std::collections::HashSet;

use crate::error::PrepError;
use crate::table::{Table, Value};

/// Remove from `source` every row whose composite key over `key_cols` occurs
/// anywhere in `filter`.
///
/// Membership has set semantics: duplicate keys in the filter table have no
/// additional effect. Surviving rows keep their order and all of their
/// columns, key or not.
///
/// Fails with [`PrepError::MissingColumn`] if any key column is absent from
/// either table, before any row is examined.
pub fn filter_by(source: &Table, filter: &Table, key_cols: &[&str]) -> Result<Table, PrepError> {
    let source_idx: Vec<usize> = key_cols
        .iter()
        .map(|name| source.require_column(name))
        .collect::<Result<_, _>>()?;
    let filter_idx: Vec<usize> = key_cols
        .iter()
        .map(|name| filter.require_column(name))
        .collect::<Result<_, _>>()?;

    let mut excluded: HashSet<Vec<Value>> = HashSet::with_capacity(filter.n_rows());
    for row in 0..filter.n_rows() {
        excluded.insert(filter.key(row, &filter_idx));
    }

    let kept: Vec<usize> = (0..source.n_rows())
        .filter(|&row| !excluded.contains(&source.key(row, &source_idx)))
        .collect();

    Ok(source.take_rows(&kept))
}

//! In-memory column-oriented tables.
//!
//! [`Table`] is the input and output of every transform in this crate: an
//! ordered collection of uniquely named, equally long, typed columns. Rows
//! have no identity beyond their position.
//!
//! # Key Types
//!
//! - [`Table`]: the container, validated at construction
//! - [`Column`] / [`ColumnData`]: a named, typed column
//! - [`Value`]: one cell, usable as a composite-key component
//! - [`DType`]: the semantic type of a column

mod column;
mod value;

pub use column::{Column, ColumnData, DType};
pub use value::Value;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PrepError;

/// An ordered collection of named columns.
///
/// Invariants, enforced by [`Table::new`]:
/// - column names are unique,
/// - all columns have the same number of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create a table from columns.
    ///
    /// Fails with [`PrepError::DuplicateColumn`] on a repeated name and
    /// [`PrepError::ColumnLenMismatch`] when column lengths differ. A table
    /// with no columns has zero rows.
    pub fn new(columns: Vec<Column>) -> Result<Self, PrepError> {
        let n_rows = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(PrepError::DuplicateColumn(col.name().to_owned()));
            }
            if col.len() != n_rows {
                return Err(PrepError::ColumnLenMismatch {
                    column: col.name().to_owned(),
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Columns, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Positional index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Positional index of a column that must exist.
    ///
    /// Fails with [`PrepError::MissingColumn`] naming the column otherwise.
    /// Transforms call this for every required column before touching any
    /// row, so schema errors abort with no work done.
    pub fn require_column(&self, name: &str) -> Result<usize, PrepError> {
        self.column_index(name)
            .ok_or_else(|| PrepError::MissingColumn(name.to_owned()))
    }

    /// Cell at (`row`, `col`) as a [`Value`].
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn value(&self, row: usize, col: usize) -> Value {
        self.columns[col].value(row)
    }

    /// Composite key of `row` over the columns at `cols`, in that order.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn key(&self, row: usize, cols: &[usize]) -> Vec<Value> {
        cols.iter().map(|&c| self.value(row, c)).collect()
    }

    /// New table holding the rows at `rows`, in that order.
    ///
    /// Indices may repeat. Column names, order and types are unchanged.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn take_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.gather(rows)).collect(),
            n_rows: rows.len(),
        }
    }

    /// Cartesian product of `self` and `other`.
    ///
    /// Every row of `self` is paired with every row of `other`; the output
    /// has `self.n_rows() * other.n_rows()` rows and the columns of `self`
    /// followed by the columns of `other`. Rows of `self` vary slowest.
    ///
    /// Fails with [`PrepError::DuplicateColumn`] if the two tables share a
    /// column name. Neither input is mutated; no join key is ever added.
    pub fn cross_join(&self, other: &Table) -> Result<Table, PrepError> {
        for col in &other.columns {
            if self.column(col.name()).is_some() {
                return Err(PrepError::DuplicateColumn(col.name().to_owned()));
            }
        }

        let n = self.n_rows;
        let m = other.n_rows;

        let left: Vec<usize> = (0..n).flat_map(|i| std::iter::repeat(i).take(m)).collect();
        let right: Vec<usize> = (0..n).flat_map(|_| 0..m).collect();

        let mut columns = Vec::with_capacity(self.n_cols() + other.n_cols());
        columns.extend(self.columns.iter().map(|c| c.gather(&left)));
        columns.extend(other.columns.iter().map(|c| c.gather(&right)));

        Ok(Table {
            columns,
            n_rows: n * m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Table {
        Table::new(vec![Column::int("user_id", vec![1, 2])]).unwrap()
    }

    fn items() -> Table {
        Table::new(vec![
            Column::int("item_id", vec![10, 20, 30]),
            Column::text("genre", vec!["a", "b", "c"]),
        ])
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::int("x", vec![1]),
            Column::float("x", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, PrepError::DuplicateColumn(name) if name == "x"));
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::int("a", vec![1, 2]),
            Column::int("b", vec![1]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            PrepError::ColumnLenMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn empty_table_has_zero_rows() {
        let t = Table::new(Vec::new()).unwrap();
        assert_eq!(t.n_rows(), 0);
        assert_eq!(t.n_cols(), 0);
    }

    #[test]
    fn require_column_reports_missing_name() {
        let t = users();
        assert_eq!(t.require_column("user_id").unwrap(), 0);
        let err = t.require_column("ghost").unwrap_err();
        assert!(matches!(err, PrepError::MissingColumn(name) if name == "ghost"));
    }

    #[test]
    fn take_rows_preserves_schema_and_reorders() {
        let t = items();
        let picked = t.take_rows(&[2, 0]);
        assert_eq!(picked.n_rows(), 2);
        assert_eq!(picked.value(0, 0), Value::Int(30));
        assert_eq!(picked.value(1, 1), Value::Text("a".into()));
    }

    #[test]
    fn cross_join_row_count_and_order() {
        let joined = users().cross_join(&items()).unwrap();
        assert_eq!(joined.n_rows(), 6);
        assert_eq!(joined.n_cols(), 3);

        // Left rows vary slowest.
        assert_eq!(joined.value(0, 0), Value::Int(1));
        assert_eq!(joined.value(2, 0), Value::Int(1));
        assert_eq!(joined.value(3, 0), Value::Int(2));
        assert_eq!(joined.value(3, 1), Value::Int(10));
        assert_eq!(joined.value(5, 1), Value::Int(30));
    }

    #[test]
    fn cross_join_rejects_shared_column_names() {
        let a = Table::new(vec![Column::int("id", vec![1])]).unwrap();
        let b = Table::new(vec![Column::int("id", vec![2])]).unwrap();
        let err = a.cross_join(&b).unwrap_err();
        assert!(matches!(err, PrepError::DuplicateColumn(name) if name == "id"));
    }

    #[test]
    fn serde_round_trip() {
        let t = items();
        let json = serde_json::to_string(&t).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}

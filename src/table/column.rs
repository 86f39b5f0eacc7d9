//! Typed column storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    /// Integer values, also used for identifiers and binary labels.
    Int,
    /// Floating-point values.
    Float,
    /// Categorical/text values.
    Text,
    /// Boolean flags. Not encodable by the libFFM converter.
    Bool,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int => "int",
            DType::Float => "float",
            DType::Text => "text",
            DType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Column storage, one variant per semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
    Bool(Vec<bool>),
}

impl ColumnData {
    /// An empty column of the given type.
    pub fn with_dtype(dtype: DType) -> Self {
        match dtype {
            DType::Int => ColumnData::Int(Vec::new()),
            DType::Float => ColumnData::Float(Vec::new()),
            DType::Text => ColumnData::Text(Vec::new()),
            DType::Bool => ColumnData::Bool(Vec::new()),
        }
    }

    /// Semantic type of this column.
    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Int(_) => DType::Int,
            ColumnData::Float(_) => DType::Float,
            ColumnData::Text(_) => DType::Text,
            ColumnData::Bool(_) => DType::Bool,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `row` as a [`Value`].
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Int(v) => Value::Int(v[row]),
            ColumnData::Float(v) => Value::Float(v[row]),
            ColumnData::Text(v) => Value::Text(v[row].clone()),
            ColumnData::Bool(v) => Value::Bool(v[row]),
        }
    }

    /// Append a cell.
    ///
    /// # Panics
    /// Panics if the value's variant does not match the column type. Callers
    /// only push values pulled from a column of the same type.
    pub fn push(&mut self, value: Value) {
        match (self, value) {
            (ColumnData::Int(v), Value::Int(x)) => v.push(x),
            (ColumnData::Float(v), Value::Float(x)) => v.push(x),
            (ColumnData::Text(v), Value::Text(x)) => v.push(x),
            (ColumnData::Bool(v), Value::Bool(x)) => v.push(x),
            (data, value) => panic!(
                "cannot push {value:?} into a {} column",
                data.dtype()
            ),
        }
    }

    /// New storage holding the cells at `rows`, in that order.
    ///
    /// Indices may repeat; this is the primitive behind row selection,
    /// shuffling and the cross join.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn gather(&self, rows: &[usize]) -> Self {
        match self {
            ColumnData::Int(v) => ColumnData::Int(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Float(v) => ColumnData::Float(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Text(v) => {
                ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect())
            }
            ColumnData::Bool(v) => ColumnData::Bool(rows.iter().map(|&r| v[r]).collect()),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Integer column.
    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int(values))
    }

    /// Floating-point column.
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    /// Categorical/text column.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Boolean column.
    pub fn bools(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(name, ColumnData::Bool(values))
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying storage.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Semantic type.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell at `row` as a [`Value`].
    ///
    /// # Panics
    /// Panics if `row` is out of bounds.
    pub fn value(&self, row: usize) -> Value {
        self.data.value(row)
    }

    /// Same-named column holding the cells at `rows`, in that order.
    pub fn gather(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            data: self.data.gather(rows),
        }
    }
}

//! libFFM encoding of labeled feature tables.
//!
//! Field-aware factorization machine trainers consume a sparse text format
//! where every cell is a `field:feature:value` token. Fields are the feature
//! columns, numbered `1..=F` by original position; features are integer codes
//! for categorical values, assigned from a dictionary built per call.
//!
//! For a table
//!
//! ```text
//! rating field1 field2 field3 field4
//!      1   xxx1      3    1.0      1
//!      0   xxx2      4    2.0      2
//! ```
//!
//! the encoding yields
//!
//! ```text
//! 1 1:1:1 2:2:3 3:3:1.0 4:4:1
//! 0 1:2:1 2:2:4 3:3:2.0 4:5:1
//! ```
//!
//! Categorical cells become `field:code:1`; numeric cells keep their literal
//! value with the feature index equal to the field index.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::PrepError;
use crate::table::{Column, ColumnData, DType, Table};

/// Codes for categorical (field, value) pairs within one encoding call.
///
/// Codes are assigned in strict first-occurrence order, scanning one field's
/// column top to bottom before moving to the next, from a single counter
/// starting at 1 shared across all categorical fields. Numeric fields are
/// never entered. The dictionary lives only for the duration of the call
/// that built it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureDictionary {
    codes: HashMap<usize, HashMap<String, u32>>,
    n_codes: u32,
}

impl FeatureDictionary {
    /// Record one categorical cell, assigning the next code if the
    /// (field, value) pair is new.
    ///
    /// Consumes and returns `self` so a column scan folds into a dictionary.
    fn observe(mut self, field: usize, value: &str) -> Self {
        let per_field = self.codes.entry(field).or_default();
        if !per_field.contains_key(value) {
            self.n_codes += 1;
            per_field.insert(value.to_owned(), self.n_codes);
        }
        self
    }

    /// Code assigned to a (field, value) pair, if it was observed.
    pub fn code_of(&self, field: usize, value: &str) -> Option<u32> {
        self.codes.get(&field).and_then(|m| m.get(value)).copied()
    }

    /// Number of distinct (field, value) pairs observed.
    pub fn len(&self) -> usize {
        self.n_codes as usize
    }

    /// Returns true if no categorical cell was observed.
    pub fn is_empty(&self) -> bool {
        self.n_codes == 0
    }
}

/// Encode a labeled feature table into libFFM tokens.
///
/// The label column `rating_col` is moved first, unchanged; every other
/// column is replaced by a text column of `field:feature:value` tokens in
/// its original position among the features:
///
/// - text cell → `field:code:1`, with `code` from the per-call
///   [`FeatureDictionary`];
/// - int/float cell → `field:field:value`, keeping the literal value
///   (floats retain their decimal point, e.g. `1.0`).
///
/// When `output_path` is given, the encoded table is also written as text,
/// one row per line with space-separated tokens and the label leading.
///
/// Fails with [`PrepError::MissingColumn`] if `rating_col` is absent and
/// with [`PrepError::UnsupportedType`] if any column is neither categorical
/// nor numeric, in both cases before any cell is encoded.
pub fn libffm_converter(
    table: &Table,
    rating_col: &str,
    output_path: Option<&Path>,
) -> Result<Table, PrepError> {
    let label_idx = table.require_column(rating_col)?;

    for col in table.columns() {
        match col.dtype() {
            DType::Int | DType::Float | DType::Text => {}
            other => {
                return Err(PrepError::UnsupportedType {
                    column: col.name().to_owned(),
                    expected: "text, int, or float".to_owned(),
                    got: other.to_string(),
                })
            }
        }
    }

    let fields: Vec<&Column> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != label_idx)
        .map(|(_, col)| col)
        .collect();

    let mut dict = FeatureDictionary::default();
    for (position, col) in fields.iter().enumerate() {
        if let ColumnData::Text(values) = col.data() {
            dict = values
                .iter()
                .fold(dict, |dict, value| dict.observe(position + 1, value));
        }
    }

    let mut columns = Vec::with_capacity(table.n_cols());
    columns.push(table.columns()[label_idx].clone());
    for (position, col) in fields.iter().enumerate() {
        let field = position + 1;
        let tokens: Vec<String> = match col.data() {
            ColumnData::Text(values) => values
                .iter()
                .map(|value| {
                    let code = dict
                        .code_of(field, value)
                        .expect("dictionary was built from these same cells");
                    format!("{field}:{code}:1")
                })
                .collect(),
            ColumnData::Int(values) => values
                .iter()
                .map(|value| format!("{field}:{field}:{value}"))
                .collect(),
            ColumnData::Float(values) => values
                .iter()
                .map(|value| format!("{field}:{field}:{}", crate::table::Value::Float(*value)))
                .collect(),
            ColumnData::Bool(_) => unreachable!("rejected by the dtype check above"),
        };
        columns.push(Column::new(col.name(), ColumnData::Text(tokens)));
    }

    let encoded = Table::new(columns)?;

    if let Some(path) = output_path {
        write_text(&encoded, path)?;
    }

    Ok(encoded)
}

/// Write a table as whitespace-separated text, one row per line, cells in
/// their default textual form.
fn write_text(table: &Table, path: &Path) -> Result<(), PrepError> {
    let mut out = BufWriter::new(File::create(path)?);
    for row in 0..table.n_rows() {
        let cells: Vec<String> = (0..table.n_cols())
            .map(|col| table.value(row, col).to_string())
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    out.flush()?;
    Ok(())
}

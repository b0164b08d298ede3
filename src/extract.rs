//! Record extraction.
//!
//! Reads every bound column of every record into a dense row-major table
//! before any output happens. A value that fails to parse aborts the run;
//! no partial table escapes.

use crate::error::ConvertError;
use crate::fields::ColumnBinding;

/// A raw attribute value as reported by the attribute table.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    /// Field present in the schema but empty for this record.
    Missing,
}

impl AttributeValue {
    /// Interpret the value as a float. Text parses with `str::parse` after
    /// trimming; a missing value never parses.
    fn parse_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(v) => Some(*v),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            AttributeValue::Missing => None,
        }
    }

    /// Rendition for error messages.
    fn describe(&self) -> String {
        match self {
            AttributeValue::Number(v) => v.to_string(),
            AttributeValue::Text(s) => s.clone(),
            AttributeValue::Missing => "<empty>".to_string(),
        }
    }
}

/// Source of attribute records, indexable by record and data column.
pub trait RecordSource {
    /// Number of records in the table.
    fn record_count(&self) -> usize;

    /// Attribute values for record `index`, in data column order (deletion
    /// flag already stripped).
    fn record(&self, index: usize) -> &[AttributeValue];
}

/// Dense row-major table of extracted numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl RecordTable {
    /// Build a table from per-record rows.
    ///
    /// # Panics
    /// Panics if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> RecordTable {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            assert_eq!(row.len(), cols, "ragged rows");
            values.extend_from_slice(row);
        }
        RecordTable {
            rows: rows.len(),
            cols,
            values,
        }
    }

    pub fn record_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// All values of record `index`, in bound column order.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.cols..(index + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Multiply every value in column `col` by `factor`, in place.
    pub fn scale_column(&mut self, col: usize, factor: f64) {
        for row in 0..self.rows {
            self.values[row * self.cols + col] *= factor;
        }
    }
}

/// Materialize the numeric table for all records and bound columns.
///
/// Cells are visited record-major; the first cell that is missing or fails
/// to parse fails the whole extraction.
pub fn extract_table(
    source: &dyn RecordSource,
    bindings: &[ColumnBinding],
) -> Result<RecordTable, ConvertError> {
    let rows = source.record_count();
    let cols = bindings.len();
    let mut values = Vec::with_capacity(rows * cols);

    for index in 0..rows {
        let record = source.record(index);
        for binding in bindings {
            let value =
                record
                    .get(binding.column)
                    .ok_or(ConvertError::MissingColumn {
                        record: index,
                        column: binding.column,
                    })?;
            let number = value.parse_number().ok_or_else(|| ConvertError::BadValue {
                record: index,
                field: binding.name.clone(),
                value: value.describe(),
            })?;
            values.push(number);
        }
    }

    Ok(RecordTable {
        rows,
        cols,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::match_fields;

    /// In-memory record source for tests.
    struct VecSource(Vec<Vec<AttributeValue>>);

    impl RecordSource for VecSource {
        fn record_count(&self) -> usize {
            self.0.len()
        }

        fn record(&self, index: usize) -> &[AttributeValue] {
            &self.0[index]
        }
    }

    fn bindings_for(names: &[&str]) -> Vec<crate::fields::ColumnBinding> {
        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        match_fields(&names).unwrap()
    }

    #[test]
    fn test_extract_numbers() {
        let bindings = bindings_for(&["DeletionFlag", "Diam", "Lat"]);
        let source = VecSource(vec![
            vec![AttributeValue::Number(2000.0), AttributeValue::Number(10.5)],
            vec![AttributeValue::Number(4000.0), AttributeValue::Number(-3.25)],
        ]);

        let table = extract_table(&source, &bindings).unwrap();
        assert_eq!(table.record_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row(0), &[2000.0, 10.5]);
        assert_eq!(table.get(1, 1), -3.25);
    }

    #[test]
    fn test_extract_parses_text() {
        let bindings = bindings_for(&["DeletionFlag", "Lat"]);
        let source = VecSource(vec![vec![AttributeValue::Text(" 12.25 ".to_string())]]);

        let table = extract_table(&source, &bindings).unwrap();
        assert_eq!(table.get(0, 0), 12.25);
    }

    #[test]
    fn test_extract_skips_unbound_columns() {
        // Only latitude is bound; the unmatched name column is never touched.
        let bindings = bindings_for(&["DeletionFlag", "Lat", "Name"]);
        assert_eq!(bindings.len(), 1);
        let source = VecSource(vec![vec![
            AttributeValue::Number(7.0),
            AttributeValue::Text("Tycho".to_string()),
        ]]);

        let table = extract_table(&source, &bindings).unwrap();
        assert_eq!(table.row(0), &[7.0]);
    }

    #[test]
    fn test_bad_text_value_is_fatal() {
        let bindings = bindings_for(&["DeletionFlag", "Lat"]);
        let source = VecSource(vec![
            vec![AttributeValue::Number(1.0)],
            vec![AttributeValue::Text("not-a-number".to_string())],
        ]);

        let err = extract_table(&source, &bindings).unwrap_err();
        match err {
            ConvertError::BadValue {
                record,
                field,
                value,
            } => {
                assert_eq!(record, 1);
                assert_eq!(field, "Lat");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_value_is_fatal() {
        let bindings = bindings_for(&["DeletionFlag", "Lat"]);
        let source = VecSource(vec![vec![AttributeValue::Missing]]);
        let err = extract_table(&source, &bindings).unwrap_err();
        assert!(matches!(err, ConvertError::BadValue { .. }));
    }

    #[test]
    fn test_short_record_is_fatal() {
        let bindings = bindings_for(&["DeletionFlag", "Diam", "Lat"]);
        let source = VecSource(vec![vec![AttributeValue::Number(1.0)]]);
        let err = extract_table(&source, &bindings).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingColumn {
                record: 0,
                column: 1
            }
        ));
    }

    #[test]
    fn test_scale_column_in_place() {
        let mut table = RecordTable::from_rows(vec![vec![2000.0, 10.5], vec![4000.0, -3.25]]);
        table.scale_column(0, 0.001);
        assert_eq!(table.row(0), &[2.0, 10.5]);
        assert_eq!(table.row(1), &[4.0, -3.25]);
    }

    #[test]
    fn test_empty_source() {
        let bindings = bindings_for(&["DeletionFlag", "Lat"]);
        let source = VecSource(vec![]);
        let table = extract_table(&source, &bindings).unwrap();
        assert_eq!(table.record_count(), 0);
    }
}

//! # shp2diam
//!
//! Convert crater measurements stored as polygon features in a shapefile
//! into the plain-text "diam" table format read by crater statistics tools.
//!
//! ## Overview
//!
//! The conversion is a single forward pipeline with three stages:
//! - **Field matching**: the attribute table's column names are matched
//!   case-insensitively against the recognized aliases for latitude,
//!   longitude, radius and diameter ([`match_fields`]).
//! - **Extraction**: every record's value in each matched column is read
//!   into a dense numeric table ([`extract_table`]).
//! - **Formatting**: radius and diameter are scaled from metres to
//!   kilometres and the table is rendered as a diam document
//!   ([`render_diam`]).
//!
//! ## Example
//!
//! ```
//! use shp2diam::{match_fields, render_diam, RecordTable};
//!
//! let names: Vec<String> = ["DeletionFlag", "Diam", "Lat"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let bindings = match_fields(&names).unwrap();
//! let table = RecordTable::from_rows(vec![vec![2000.0, 10.5]]);
//!
//! let text = render_diam(&bindings, table);
//! assert!(text.contains("crater = {diameter, latitude"));
//! assert!(text.contains("    2.000000,   10.500000"));
//! ```

use std::path::Path;

pub mod diam;
pub mod error;
pub mod extract;
pub mod fields;
pub mod shp;

pub use diam::{DIAM_HEADER, render_diam};
pub use error::ConvertError;
pub use extract::{AttributeValue, RecordSource, RecordTable, extract_table};
pub use fields::{ColumnBinding, DELETION_FLAG_OFFSET, FieldCategory, match_fields};
pub use shp::ShapefileSource;

/// Convert the shapefile at `path` to diam text.
///
/// Returns `(diam_text, record_count, column_count)` on success. The file
/// handles are released as soon as the attribute table is in memory; the
/// whole table is extracted and validated before any text is produced.
pub fn shapefile_to_diam(path: &Path) -> Result<(String, usize, usize), ConvertError> {
    let source = ShapefileSource::open(path)?;
    let bindings = match_fields(source.field_names())?;
    let table = extract_table(&source, &bindings)?;

    let record_count = table.record_count();
    let column_count = bindings.len();
    Ok((render_diam(&bindings, table), record_count, column_count))
}

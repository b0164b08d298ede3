//! Diam text rendering.
//!
//! Output layout:
//! ```text
//! <header comment block ending in "area = 1">
//! crater = {diameter, latitude
//!     2.000000,   10.500000
//! }
//! ```
//!
//! Each value is right-justified in a 12 character field with 6 decimal
//! digits; fields within a row are separated by a bare comma.

use crate::extract::RecordTable;
use crate::fields::ColumnBinding;

/// Static comment block that precedes the crater table. `area = 1` is a
/// placeholder the user edits to the surveyed area in km^2.
pub const DIAM_HEADER: &str = "#  diam file written by shp2diam
#
# Area (km^2). Edit this value according to the area covered by this crater
# distribution.
area = 1
#
# Table below may include any of the following field combinations:
#
#              km        -      deg  deg
# crater = {diameter
# crater = {diameter, fraction
# crater = {diameter, fraction, lon, lat
#";

/// The `crater = {...` schema line. The brace stays open; the closing brace
/// is the document's final line.
fn field_line(bindings: &[ColumnBinding]) -> String {
    let names: Vec<&str> = bindings
        .iter()
        .map(|b| b.category.display_name())
        .collect();
    format!("crater = {{{}", names.join(", "))
}

/// Render the full diam document.
///
/// Scale factors are applied to the table here, column by column and in
/// place, before any row is formatted. Output is deterministic given the
/// bindings and table.
pub fn render_diam(bindings: &[ColumnBinding], mut table: RecordTable) -> String {
    for (col, binding) in bindings.iter().enumerate() {
        table.scale_column(col, binding.scale);
    }

    let mut out = String::new();
    out.push_str(DIAM_HEADER);
    out.push('\n');
    out.push_str(&field_line(bindings));
    out.push('\n');

    for index in 0..table.record_count() {
        let row: Vec<String> = table
            .row(index)
            .iter()
            .map(|v| format!("{v:12.6}"))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out.push_str("}\n");
    out
}

//! Field alias matching.
//!
//! A shapefile attribute table reports its columns as an ordered list of
//! descriptors whose first entry is the deletion flag, a bookkeeping column
//! with no per-record data. A matched descriptor index is therefore shifted
//! down by [`DELETION_FLAG_OFFSET`] to get the data column index.
//!
//! Recognized aliases (case-insensitive, exact match):
//!
//! | category  | accepted spellings      |
//! |-----------|-------------------------|
//! | latitude  | `latitude`, `lat`       |
//! | longitude | `longitude`, `lon`      |
//! | radius    | `radius`, `rad`, `r`    |
//! | diameter  | `diameter`, `diam`, `d` |
//!
//! Each category claims at most one column and each column satisfies at most
//! one category; the first column to name an unclaimed category wins it.
//! Bindings come back in file column order.

use crate::error::ConvertError;

/// Descriptor-to-data column shift for the leading deletion flag.
pub const DELETION_FLAG_OFFSET: usize = 1;

/// Scale applied to columns stored in metres and reported in kilometres.
const M_TO_KM: f64 = 1.0 / 1000.0;

/// The four semantic attribute categories a crater table can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Latitude,
    Longitude,
    Radius,
    Diameter,
}

impl FieldCategory {
    /// All categories, in canonical order.
    pub const ALL: [FieldCategory; 4] = [
        FieldCategory::Latitude,
        FieldCategory::Longitude,
        FieldCategory::Radius,
        FieldCategory::Diameter,
    ];

    /// Accepted column spellings for this category, all lowercase.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            FieldCategory::Latitude => &["latitude", "lat"],
            FieldCategory::Longitude => &["longitude", "lon"],
            FieldCategory::Radius => &["radius", "rad", "r"],
            FieldCategory::Diameter => &["diameter", "diam", "d"],
        }
    }

    /// Canonical name used on the `crater = {...}` schema line.
    pub fn display_name(self) -> &'static str {
        match self {
            FieldCategory::Latitude => "latitude",
            FieldCategory::Longitude => "longitude",
            FieldCategory::Radius => "radius",
            FieldCategory::Diameter => "diameter",
        }
    }

    /// Unit scale for values in this category's column. Radius and diameter
    /// are stored in metres and reported in kilometres.
    pub fn scale(self) -> f64 {
        match self {
            FieldCategory::Radius | FieldCategory::Diameter => M_TO_KM,
            FieldCategory::Latitude | FieldCategory::Longitude => 1.0,
        }
    }

    fn matches(self, name: &str) -> bool {
        self.aliases().iter().any(|a| name.eq_ignore_ascii_case(a))
    }
}

/// A matched column: which category claimed it, where its data lives, and
/// the unit scale to apply on output.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBinding {
    pub category: FieldCategory,
    /// Column name as spelled in the file.
    pub name: String,
    /// Data column index (descriptor index minus the deletion flag offset).
    pub column: usize,
    pub scale: f64,
}

/// Match column descriptors against the recognized alias groups.
///
/// `names` is the full descriptor list, deletion flag first. Categories are
/// iterated from an immutable list with claimed ones tracked separately, so
/// no category matches twice. Zero matches across all columns is an error.
pub fn match_fields(names: &[String]) -> Result<Vec<ColumnBinding>, ConvertError> {
    let mut claimed = [false; FieldCategory::ALL.len()];
    let mut bindings = Vec::new();

    for (index, name) in names.iter().enumerate().skip(DELETION_FLAG_OFFSET) {
        for (slot, category) in FieldCategory::ALL.iter().copied().enumerate() {
            if claimed[slot] || !category.matches(name) {
                continue;
            }
            claimed[slot] = true;
            bindings.push(ColumnBinding {
                category,
                name: name.clone(),
                column: index - DELETION_FLAG_OFFSET,
                scale: category.scale(),
            });
            break;
        }
    }

    if bindings.is_empty() {
        return Err(ConvertError::NoUsefulFields);
    }
    Ok(bindings)
}

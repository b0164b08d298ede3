//! Shapefile attribute access.
//!
//! The geometry never matters to the conversion; only the dBASE attribute
//! table does. Opening still goes through the `.shp` header so a bad or
//! missing shapefile is reported against the path the user gave, then the
//! sibling `.dbf` supplies the column descriptors and records.
//!
//! The whole attribute table is materialized up front; file handles are
//! released when [`ShapefileSource::open`] returns.

use std::path::Path;

use shapefile::dbase;

use crate::error::ConvertError;
use crate::extract::{AttributeValue, RecordSource};

/// dBASE name of the leading deletion flag descriptor.
const DELETION_FLAG_NAME: &str = "DeletionFlag";

/// A shapefile's attribute table, loaded into memory.
#[derive(Debug)]
pub struct ShapefileSource {
    field_names: Vec<String>,
    records: Vec<Vec<AttributeValue>>,
}

impl ShapefileSource {
    /// Open the shapefile at `path` and load its attribute table.
    pub fn open(path: &Path) -> Result<Self, ConvertError> {
        // Validates the .shp header; the reader itself is not kept.
        shapefile::ShapeReader::from_path(path).map_err(|source| ConvertError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let dbf_path = path.with_extension("dbf");
        let mut reader =
            dbase::Reader::from_path(&dbf_path).map_err(|source| ConvertError::OpenTable {
                path: dbf_path.clone(),
                source,
            })?;

        // Descriptor list with the deletion flag guaranteed at index 0,
        // whether or not the reader reports it as a pseudo-field.
        let mut field_names = vec![DELETION_FLAG_NAME.to_string()];
        field_names.extend(
            reader
                .fields()
                .iter()
                .map(|f| f.name().to_string())
                .filter(|n| !n.eq_ignore_ascii_case(DELETION_FLAG_NAME)),
        );

        let data_names = field_names[1..].to_vec();
        let mut records = Vec::new();
        for record in reader.iter_records() {
            let record = record?;
            let row = data_names
                .iter()
                .map(|name| match record.get(name) {
                    Some(value) => convert_value(value),
                    None => AttributeValue::Missing,
                })
                .collect();
            records.push(row);
        }

        Ok(ShapefileSource {
            field_names,
            records,
        })
    }

    /// Column descriptors in file order, deletion flag included at index 0.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }
}

impl RecordSource for ShapefileSource {
    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn record(&self, index: usize) -> &[AttributeValue] {
        &self.records[index]
    }
}

/// Map a dBASE field value onto the extractor's value model.
fn convert_value(value: &dbase::FieldValue) -> AttributeValue {
    use dbase::FieldValue;

    match value {
        FieldValue::Numeric(Some(v)) => AttributeValue::Number(*v),
        FieldValue::Numeric(None) => AttributeValue::Missing,
        FieldValue::Float(Some(v)) => AttributeValue::Number(f64::from(*v)),
        FieldValue::Float(None) => AttributeValue::Missing,
        FieldValue::Double(v) => AttributeValue::Number(*v),
        FieldValue::Currency(v) => AttributeValue::Number(*v),
        FieldValue::Integer(v) => AttributeValue::Number(f64::from(*v)),
        FieldValue::Character(Some(s)) => AttributeValue::Text(s.clone()),
        FieldValue::Character(None) => AttributeValue::Missing,
        FieldValue::Memo(s) => AttributeValue::Text(s.clone()),
        // Logical, Date, DateTime: never numeric, surface as text so the
        // extractor reports them in its parse error.
        other => AttributeValue::Text(format!("{other:?}")),
    }
}

/// Write a one-polygon-per-record shapefile with the given numeric columns
/// into `dir`, returning the .shp path. Test fixture helper.
#[cfg(test)]
pub(crate) fn write_fixture(
    dir: &Path,
    columns: &[&str],
    rows: &[&[f64]],
) -> std::path::PathBuf {
    use shapefile::{Point, Polygon, PolygonRing};

    let mut builder = dbase::TableWriterBuilder::new();
    for column in columns {
        builder = builder.add_numeric_field((*column).try_into().unwrap(), 18, 6);
    }

    let shp_path = dir.join("craters.shp");
    let mut writer = shapefile::Writer::from_path(&shp_path, builder).unwrap();

    for row in rows {
        let ring = PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.0),
        ]);
        let polygon = Polygon::with_rings(vec![ring]);

        let mut record = dbase::Record::default();
        for (column, value) in columns.iter().zip(row.iter()) {
            record.insert(column.to_string(), dbase::FieldValue::Numeric(Some(*value)));
        }
        writer.write_shape_and_record(&polygon, &record).unwrap();
    }

    shp_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reads_fields_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            &["Diam", "Lat"],
            &[&[2000.0, 10.5], &[4000.0, -3.25]],
        );

        let source = ShapefileSource::open(&path).unwrap();
        assert_eq!(source.field_names(), &["DeletionFlag", "Diam", "Lat"]);
        assert_eq!(source.record_count(), 2);
        assert_eq!(
            source.record(0),
            &[
                AttributeValue::Number(2000.0),
                AttributeValue::Number(10.5)
            ]
        );
        assert_eq!(
            source.record(1),
            &[
                AttributeValue::Number(4000.0),
                AttributeValue::Number(-3.25)
            ]
        );
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShapefileSource::open(&dir.path().join("nope.shp")).unwrap_err();
        assert!(matches!(err, ConvertError::Open { .. }));
    }

    #[test]
    fn test_convert_value_numeric_kinds() {
        assert_eq!(
            convert_value(&dbase::FieldValue::Numeric(Some(2.5))),
            AttributeValue::Number(2.5)
        );
        assert_eq!(
            convert_value(&dbase::FieldValue::Integer(7)),
            AttributeValue::Number(7.0)
        );
        assert_eq!(
            convert_value(&dbase::FieldValue::Double(1.25)),
            AttributeValue::Number(1.25)
        );
        assert_eq!(
            convert_value(&dbase::FieldValue::Numeric(None)),
            AttributeValue::Missing
        );
    }

    #[test]
    fn test_convert_value_text() {
        assert_eq!(
            convert_value(&dbase::FieldValue::Character(Some("12.5".to_string()))),
            AttributeValue::Text("12.5".to_string())
        );
        assert_eq!(
            convert_value(&dbase::FieldValue::Character(None)),
            AttributeValue::Missing
        );
    }
}

//! Error type for the shapefile to diam conversion.
//!
//! Every error is terminal for the run: there is no retry and no partial
//! output. The binary maps these to a message on stderr and a non-zero exit.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while converting a shapefile to diam text.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The shapefile itself could not be opened or its header is invalid.
    #[error("error opening file {path}: {source}")]
    Open {
        path: PathBuf,
        source: shapefile::Error,
    },

    /// The attribute table (`.dbf`) could not be opened.
    #[error("error opening attribute table {path}: {source}")]
    OpenTable {
        path: PathBuf,
        source: shapefile::dbase::Error,
    },

    /// Reading a record from the attribute table failed mid-file.
    #[error("error reading attribute record: {0}")]
    Read(#[from] shapefile::dbase::Error),

    /// None of the recognized field aliases matched any column.
    #[error("no useful fields found")]
    NoUsefulFields,

    /// A record is missing a column the matcher bound.
    #[error("record {record} has no column {column}")]
    MissingColumn { record: usize, column: usize },

    /// A record attribute could not be read as a number.
    #[error("record {record}, field '{field}': cannot parse '{value}' as a number")]
    BadValue {
        record: usize,
        field: String,
        value: String,
    },
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Poster board CSV parsing.
//!
//! Board locations arrive as prefecture-supplied CSV files with the
//! columns `prefecture,city,number,name,address,lat,long`. Parsing is
//! all-or-nothing: the first bad row aborts the import with its line
//! number.

use action_board_domain::{BoardStatus, is_prefecture};
use action_board_persistence::NewPosterBoard;
use serde::Deserialize;
use thiserror::Error;

/// CSV import errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvImportError {
    /// A row failed to parse.
    #[error("CSV line {line}: {message}")]
    BadRow {
        /// 1-based line number (header is line 1).
        line: usize,
        /// Parser message.
        message: String,
    },
    /// A row named an unknown prefecture.
    #[error("CSV line {line}: unknown prefecture '{prefecture}'")]
    UnknownPrefecture {
        /// 1-based line number.
        line: usize,
        /// The offending value.
        prefecture: String,
    },
    /// A row is missing coordinates.
    #[error("CSV line {line}: missing coordinates")]
    MissingCoordinates {
        /// 1-based line number.
        line: usize,
    },
}

#[derive(Debug, Deserialize)]
struct BoardRecord {
    prefecture: String,
    city: Option<String>,
    number: Option<String>,
    name: Option<String>,
    address: Option<String>,
    lat: Option<f64>,
    long: Option<f64>,
}

/// Parses poster board CSV content into insertable rows.
///
/// All imported boards start in the `not_yet` status.
///
/// # Arguments
///
/// * `content` - The CSV file content, header row included
///
/// # Errors
///
/// Returns the first offending line when a row cannot be parsed,
/// names an unknown prefecture, or lacks coordinates.
pub fn parse_boards_csv(content: &str) -> Result<Vec<NewPosterBoard>, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut boards: Vec<NewPosterBoard> = Vec::new();
    for (index, record) in reader.deserialize::<BoardRecord>().enumerate() {
        let line: usize = index + 2; // header occupies line 1
        let record: BoardRecord = record.map_err(|e| CsvImportError::BadRow {
            line,
            message: e.to_string(),
        })?;

        if !is_prefecture(&record.prefecture) {
            return Err(CsvImportError::UnknownPrefecture {
                line,
                prefecture: record.prefecture,
            });
        }
        let (Some(latitude), Some(longitude)) = (record.lat, record.long) else {
            return Err(CsvImportError::MissingCoordinates { line });
        };

        boards.push(NewPosterBoard {
            prefecture: record.prefecture,
            city: record.city.filter(|s| !s.is_empty()),
            name: record.name.filter(|s| !s.is_empty()),
            address: record.address.filter(|s| !s.is_empty()),
            number: record.number.filter(|s| !s.is_empty()),
            latitude,
            longitude,
            status: BoardStatus::NotYet.code(),
        });
    }

    Ok(boards)
}

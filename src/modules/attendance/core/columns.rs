// Named column addressing for the raw log and the cleaned table.
//
// Purpose
// - Replace letter literals with named fields mapped to zero-based offsets.
//
// Responsibilities
// - Describe both schemas (column, offset, expected header).
// - Validate the mapping at startup and report header drift of the live sheet.
// - Build the A1 ranges every use case reads or writes.

use crate::shared::infrastructure::sheets::{A1Range, column_letter};
use std::fmt::Debug;
use thiserror::Error;

/// Row 1 holds the headers.
pub const FIRST_DATA_ROW: u32 = 2;

/// Columns I to K hold formulas maintained by the spreadsheet (year and month in J and K).
pub const RAW_LOG_LAST_COLUMN: usize = 10;

pub const CLEAN_LAST_COLUMN: usize = 6;

pub trait SheetColumn: Copy + Debug + PartialEq + 'static {
    fn offset(self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawColumn {
    Timestamp,
    Kind,
    User,
    Date,
    Time,
    WorkedHours,
    Latitude,
    Longitude,
}

impl SheetColumn for RawColumn {
    fn offset(self) -> usize {
        match self {
            RawColumn::Timestamp => 0,
            RawColumn::Kind => 1,
            RawColumn::User => 2,
            RawColumn::Date => 3,
            RawColumn::Time => 4,
            RawColumn::WorkedHours => 5,
            RawColumn::Latitude => 6,
            RawColumn::Longitude => 7,
        }
    }
}

pub const RAW_LOG_SCHEMA: [(RawColumn, &str); 8] = [
    (RawColumn::Timestamp, "Horodatage"),
    (RawColumn::Kind, "Type"),
    (RawColumn::User, "Utilisateur"),
    (RawColumn::Date, "Jour"),
    (RawColumn::Time, "Heure"),
    (RawColumn::WorkedHours, "Heures_travaillé"),
    (RawColumn::Latitude, "Latitude"),
    (RawColumn::Longitude, "Longitude"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanColumn {
    User,
    Date,
    Year,
    Month,
    TimeIn,
    TimeOut,
    WorkedHours,
}

impl SheetColumn for CleanColumn {
    fn offset(self) -> usize {
        match self {
            CleanColumn::User => 0,
            CleanColumn::Date => 1,
            CleanColumn::Year => 2,
            CleanColumn::Month => 3,
            CleanColumn::TimeIn => 4,
            CleanColumn::TimeOut => 5,
            CleanColumn::WorkedHours => 6,
        }
    }
}

pub const CLEAN_SCHEMA: [(CleanColumn, &str); 7] = [
    (CleanColumn::User, "Utilisateur"),
    (CleanColumn::Date, "Jour"),
    (CleanColumn::Year, "Année"),
    (CleanColumn::Month, "Mois"),
    (CleanColumn::TimeIn, "Entrée"),
    (CleanColumn::TimeOut, "Sortie"),
    (CleanColumn::WorkedHours, "Heures_travaillé"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column {column} is listed at position {position} but mapped to offset {offset}")]
    OutOfOrder {
        column: String,
        position: usize,
        offset: usize,
    },

    #[error("column {column} appears more than once")]
    Duplicate { column: String },

    #[error("column {column} at {letter} is outside the A:{last} span")]
    OutOfSpan {
        column: String,
        letter: String,
        last: String,
    },
}

/// Positions in `schema` must equal offsets, so the schema stays contiguous from column A.
pub fn validate_schema<C: SheetColumn>(
    schema: &[(C, &str)],
    last_column: usize,
) -> Result<(), SchemaError> {
    for (position, (column, _)) in schema.iter().enumerate() {
        if schema[..position].iter().any(|(seen, _)| seen == column) {
            return Err(SchemaError::Duplicate {
                column: format!("{column:?}"),
            });
        }
        let offset = column.offset();
        if offset != position {
            return Err(SchemaError::OutOfOrder {
                column: format!("{column:?}"),
                position,
                offset,
            });
        }
        if offset > last_column {
            return Err(SchemaError::OutOfSpan {
                column: format!("{column:?}"),
                letter: column_letter(offset),
                last: column_letter(last_column),
            });
        }
    }
    Ok(())
}

/// Differences between the live header row and the expected headers, one message per column.
pub fn header_drift<C: SheetColumn>(schema: &[(C, &str)], header_row: &[String]) -> Vec<String> {
    schema
        .iter()
        .filter_map(|(column, expected)| {
            let actual = header_row
                .get(column.offset())
                .map(|h| h.trim())
                .unwrap_or("");
            if actual.to_lowercase() == expected.to_lowercase() {
                None
            } else {
                Some(format!(
                    "column {} ({column:?}): expected \"{expected}\", found \"{actual}\"",
                    column_letter(column.offset())
                ))
            }
        })
        .collect()
}

/// Cell of `row` at `column`, empty when the store trimmed it away.
pub fn cell<C: SheetColumn>(row: &[String], column: C) -> &str {
    row.get(column.offset()).map(String::as_str).unwrap_or("")
}

/// Sheet names plus the ranges built on top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub raw_sheet: String,
    pub clean_sheet: String,
}

impl SheetLayout {
    pub fn new(raw_sheet: impl Into<String>, clean_sheet: impl Into<String>) -> Self {
        Self {
            raw_sheet: raw_sheet.into(),
            clean_sheet: clean_sheet.into(),
        }
    }

    /// Whole A:H columns, the target of appends.
    pub fn raw_append_range(&self) -> A1Range {
        A1Range::columns(
            &self.raw_sheet,
            RawColumn::Timestamp.offset(),
            RawColumn::Longitude.offset(),
        )
    }

    pub fn raw_header_range(&self) -> A1Range {
        A1Range::row(
            &self.raw_sheet,
            RawColumn::Timestamp.offset(),
            RawColumn::Longitude.offset(),
            1,
        )
    }

    pub fn raw_data_range(&self) -> A1Range {
        A1Range::from_row(&self.raw_sheet, 0, RAW_LOG_LAST_COLUMN, FIRST_DATA_ROW)
    }

    pub fn raw_cells(&self, row: u32, first: RawColumn, last: RawColumn) -> A1Range {
        A1Range::row(&self.raw_sheet, first.offset(), last.offset(), row)
    }

    /// A:K of one row, formula columns included.
    pub fn raw_full_row(&self, row: u32) -> A1Range {
        A1Range::row(&self.raw_sheet, 0, RAW_LOG_LAST_COLUMN, row)
    }

    pub fn clean_data_range(&self) -> A1Range {
        A1Range::from_row(&self.clean_sheet, 0, CLEAN_LAST_COLUMN, FIRST_DATA_ROW)
    }
}

// In memory implementation of the SheetStore port.
//
// Purpose
// - Exercise the use cases and the HTTP layer without a spreadsheet account.
//
// Responsibilities
// - Keep one grid of formatted cells per sheet and answer A1 ranges against it.
// - Record every call so tests can assert on the exact ranges and rows written.

use crate::shared::infrastructure::sheets::{
    A1Range, Row, SheetError, SheetStore, ValueInputOption, cell_text,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub enum SheetCall {
    Append {
        range: A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    },
    Read {
        range: A1Range,
    },
    Update {
        range: A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    },
    Clear {
        range: A1Range,
    },
}

#[derive(Default)]
pub struct InMemorySheetStore {
    sheets: RwLock<HashMap<String, Vec<Vec<String>>>>,
    calls: Mutex<Vec<SheetCall>>,
    is_offline: bool,
    writes_before_failure: Option<usize>,
    writes: AtomicUsize,
}

impl InMemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a sheet starting at row 1 (usually the header row).
    pub fn with_sheet(mut self, sheet: &str, rows: Vec<Vec<&str>>) -> Self {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.sheets.get_mut().insert(sheet.to_string(), grid);
        self
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Let `count` writes succeed, then fail every following write.
    pub fn fail_writes_after(&mut self, count: usize) {
        self.writes_before_failure = Some(count);
    }

    pub async fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().await.clone()
    }

    /// Current content of one row (1-based), without trimming.
    pub async fn row(&self, sheet: &str, row: u32) -> Vec<String> {
        let guard = self.sheets.read().await;
        guard
            .get(sheet)
            .and_then(|grid| grid.get(row as usize - 1))
            .cloned()
            .unwrap_or_default()
    }

    fn check_online(&self) -> Result<(), SheetError> {
        if self.is_offline {
            return Err(SheetError::Backend("Sheet store offline".into()));
        }
        Ok(())
    }

    fn check_write_allowed(&self) -> Result<(), SheetError> {
        self.check_online()?;
        let done = self.writes.fetch_add(1, Ordering::SeqCst);
        match self.writes_before_failure {
            Some(limit) if done >= limit => {
                Err(SheetError::Backend("Sheet store rejected the write".into()))
            }
            _ => Ok(()),
        }
    }

    async fn record(&self, call: SheetCall) {
        self.calls.lock().await.push(call);
    }
}

fn write_cells(grid: &mut Vec<Vec<String>>, first_row: usize, first_column: usize, rows: &[Row]) {
    for (i, row) in rows.iter().enumerate() {
        let target = first_row - 1 + i;
        if grid.len() <= target {
            grid.resize_with(target + 1, Vec::new);
        }
        let cells = &mut grid[target];
        for (j, value) in row.iter().enumerate() {
            let column = first_column + j;
            if cells.len() <= column {
                cells.resize(column + 1, String::new());
            }
            cells[column] = cell_text(value);
        }
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

#[async_trait::async_trait]
impl SheetStore for InMemorySheetStore {
    async fn append(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError> {
        self.record(SheetCall::Append {
            range: range.clone(),
            rows: rows.clone(),
            option,
        })
        .await;
        self.check_write_allowed()?;

        let mut guard = self.sheets.write().await;
        let grid = guard.entry(range.sheet.clone()).or_default();
        let next_row = grid
            .iter()
            .rposition(|row| !is_blank(row))
            .map(|last| last + 2)
            .unwrap_or(1);
        write_cells(grid, next_row, range.first_column, &rows);
        Ok(())
    }

    async fn read(&self, range: &A1Range) -> Result<Vec<Vec<String>>, SheetError> {
        self.record(SheetCall::Read {
            range: range.clone(),
        })
        .await;
        self.check_online()?;

        let guard = self.sheets.read().await;
        let Some(grid) = guard.get(&range.sheet) else {
            return Ok(Vec::new());
        };
        let first = range.first_row.unwrap_or(1) as usize;
        let last = range
            .last_row
            .map(|r| r as usize)
            .unwrap_or(grid.len())
            .min(grid.len());

        let mut values: Vec<Vec<String>> = (first..=last)
            .map(|row| {
                let cells = &grid[row - 1];
                let mut slice: Vec<String> = (range.first_column..=range.last_column)
                    .map(|column| cells.get(column).cloned().unwrap_or_default())
                    .collect();
                while slice.last().is_some_and(|cell| cell.is_empty()) {
                    slice.pop();
                }
                slice
            })
            .collect();
        while values.last().is_some_and(|row| row.is_empty()) {
            values.pop();
        }
        Ok(values)
    }

    async fn update(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError> {
        self.record(SheetCall::Update {
            range: range.clone(),
            rows: rows.clone(),
            option,
        })
        .await;
        self.check_write_allowed()?;

        let mut guard = self.sheets.write().await;
        let grid = guard.entry(range.sheet.clone()).or_default();
        let first_row = range.first_row.unwrap_or(1) as usize;
        write_cells(grid, first_row, range.first_column, &rows);
        Ok(())
    }

    async fn clear(&self, range: &A1Range) -> Result<(), SheetError> {
        self.record(SheetCall::Clear {
            range: range.clone(),
        })
        .await;
        self.check_write_allowed()?;

        let mut guard = self.sheets.write().await;
        let Some(grid) = guard.get_mut(&range.sheet) else {
            return Ok(());
        };
        let first = range.first_row.unwrap_or(1) as usize;
        let last = range
            .last_row
            .map(|r| r as usize)
            .unwrap_or(grid.len())
            .min(grid.len());
        for row in first..=last {
            let cells = &mut grid[row - 1];
            for column in range.first_column..=range.last_column {
                if let Some(cell) = cells.get_mut(column) {
                    cell.clear();
                }
            }
        }
        Ok(())
    }
}

//! frame — a minimal named, typed, columnar table.
//!
//! Purpose
//! -------
//! Provide the tabular type that training data, predictions and exported
//! model state travel in. The FTRL stack only needs a small surface: row and
//! column counts, ordered column names, per-column storage types, and access
//! to the column data.
//!
//! Key behaviors
//! -------------
//! - [`Frame::new`] assembles a frame from `(name, column)` pairs and checks
//!   that every column has the same length and every name is unique.
//! - [`Frame::names`] / [`Frame::stypes`] expose the column metadata that the
//!   model-state codec validates.
//!
//! Invariants & assumptions
//! ------------------------
//! - All columns of a frame have exactly `nrows` cells.
//! - Column names are unique; their order is significant.
//! - A frame with no columns has zero rows.
//!
//! Downstream usage
//! ----------------
//! - Build frames with [`Frame::new`] or [`Frame::from_columns`] and pass
//!   them by reference to `FtrlModel::fit`, `predict` and `set_model`.
//! - Frames returned by the model are owned snapshots; mutating them never
//!   affects the model.

pub mod column;
pub mod errors;

pub use self::column::{Column, SType};
pub use self::errors::{FrameError, FrameResult};

/// Ordered collection of uniquely named, equally long columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
    nrows: usize,
}

impl Frame {
    /// Build a frame from `(name, column)` pairs.
    ///
    /// Errors
    /// ------
    /// - `FrameError::LengthMismatch` when a column's length differs from the
    ///   first column's length.
    /// - `FrameError::DuplicateName` when a name repeats.
    pub fn new<S: Into<String>>(columns: Vec<(S, Column)>) -> FrameResult<Frame> {
        let mut names: Vec<String> = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        let mut nrows = None;

        for (name, column) in columns {
            let name = name.into();
            if names.contains(&name) {
                return Err(FrameError::DuplicateName { name });
            }
            let expected = *nrows.get_or_insert(column.len());
            if column.len() != expected {
                return Err(FrameError::LengthMismatch {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
            names.push(name);
            data.push(column);
        }

        Ok(Frame { names, columns: data, nrows: nrows.unwrap_or(0) })
    }

    /// Same as [`Frame::new`] for callers holding names and columns separately.
    pub fn from_columns<S: Into<String>>(
        names: Vec<S>, columns: Vec<Column>,
    ) -> FrameResult<Frame> {
        Frame::new(names.into_iter().zip(columns).collect())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// `(nrows, ncols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn stypes(&self) -> Vec<SType> {
        self.columns.iter().map(Column::stype).collect()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.names.iter().position(|n| n == name).and_then(|i| self.columns.get(i))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Iterate over `(name, column)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }
}

//! Typed column storage and element-type tags.
//!
//! Purpose
//! -------
//! Represent a single column of a [`Frame`](crate::frame::Frame) together with
//! its element type. Numeric and boolean data live in `ndarray::Array1`
//! buffers; strings live in a plain `Vec<String>`.
//!
//! Key behaviors
//! -------------
//! - [`SType`] names the storage type of a column and renders it the way
//!   users see it in error messages (`float64`, `str32`, ...).
//! - [`Column`] owns the data and exposes its length, type tag, a typed
//!   `float64` view, and a canonical byte key per cell used by feature hashing.
//!
//! Conventions
//! -----------
//! - Integer cells are widened to `i64` and `float32` cells to `f64` before
//!   producing byte keys, so the same logical value hashes identically
//!   regardless of its storage width.
use ndarray::{Array1, ArrayView1};

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SType {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Str,
}

impl SType {
    /// Short type name used in user-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            SType::Bool => "bool8",
            SType::Int32 => "int32",
            SType::Int64 => "int64",
            SType::Float32 => "float32",
            SType::Float64 => "float64",
            SType::Str => "str32",
        }
    }

    /// Whether the type holds integer or floating-point numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SType::Int32 | SType::Int64 | SType::Float32 | SType::Float64)
    }
}

impl std::fmt::Display for SType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column data with its element type encoded in the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Bool(Array1<bool>),
    Int32(Array1<i32>),
    Int64(Array1<i64>),
    Float32(Array1<f32>),
    Float64(Array1<f64>),
    Str(Vec<String>),
}

impl Column {
    /// Number of cells in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Bool(v) => v.len(),
            Column::Int32(v) => v.len(),
            Column::Int64(v) => v.len(),
            Column::Float32(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage type tag of the column.
    pub fn stype(&self) -> SType {
        match self {
            Column::Bool(_) => SType::Bool,
            Column::Int32(_) => SType::Int32,
            Column::Int64(_) => SType::Int64,
            Column::Float32(_) => SType::Float32,
            Column::Float64(_) => SType::Float64,
            Column::Str(_) => SType::Str,
        }
    }

    /// Borrow the data as `float64` when the column is stored as `float64`.
    pub fn as_f64(&self) -> Option<ArrayView1<'_, f64>> {
        match self {
            Column::Float64(v) => Some(v.view()),
            _ => None,
        }
    }

    /// Numeric value of cell `row` widened to `f64`; `None` for strings.
    ///
    /// Booleans map to `0.0` / `1.0`.
    pub fn value_f64(&self, row: usize) -> Option<f64> {
        match self {
            Column::Bool(v) => Some(if v[row] { 1.0 } else { 0.0 }),
            Column::Int32(v) => Some(f64::from(v[row])),
            Column::Int64(v) => Some(v[row] as f64),
            Column::Float32(v) => Some(f64::from(v[row])),
            Column::Float64(v) => Some(v[row]),
            Column::Str(_) => None,
        }
    }

    /// Write the canonical byte key of cell `row` into `buf` (cleared first).
    pub fn write_key(&self, row: usize, buf: &mut Vec<u8>) {
        buf.clear();
        match self {
            Column::Bool(v) => buf.push(u8::from(v[row])),
            Column::Int32(v) => buf.extend_from_slice(&i64::from(v[row]).to_le_bytes()),
            Column::Int64(v) => buf.extend_from_slice(&v[row].to_le_bytes()),
            Column::Float32(v) => buf.extend_from_slice(&f64::from(v[row]).to_bits().to_le_bytes()),
            Column::Float64(v) => buf.extend_from_slice(&v[row].to_bits().to_le_bytes()),
            Column::Str(v) => buf.extend_from_slice(v[row].as_bytes()),
        }
    }
}

impl From<Array1<f64>> for Column {
    fn from(v: Array1<f64>) -> Self {
        Column::Float64(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Float64(Array1::from(v))
    }
}

impl From<Vec<f32>> for Column {
    fn from(v: Vec<f32>) -> Self {
        Column::Float32(Array1::from(v))
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Column::Int64(Array1::from(v))
    }
}

impl From<Vec<i32>> for Column {
    fn from(v: Vec<i32>) -> Self {
        Column::Int32(Array1::from(v))
    }
}

impl From<Vec<bool>> for Column {
    fn from(v: Vec<bool>) -> Self {
        Column::Bool(Array1::from(v))
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Column::Str(v)
    }
}

impl From<Vec<&str>> for Column {
    fn from(v: Vec<&str>) -> Self {
        Column::Str(v.into_iter().map(str::to_owned).collect())
    }
}

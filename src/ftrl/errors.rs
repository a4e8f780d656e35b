//! Errors for the FTRL boundary (configuration, field validation, lifecycle,
//! model-state import, and training failures).
//!
//! This module defines the model error type, [`FtrlError`], and the per-field
//! error type, [`ParamError`]. Both implement `Display`/`Error`; with the
//! `python-bindings` feature they also convert to `PyErr`.
//!
//! ## Taxonomy
//! - **Configuration**: the aggregate `params` bundle and individual keywords
//!   were both supplied ([`FtrlError::ConflictingConfig`]).
//! - **Field validation**: wrong type, out-of-range, unknown or missing field
//!   ([`ParamError`], wrapped as [`FtrlError::Param`]).
//! - **Lifecycle**: an operation that needs a trained model was called on an
//!   untrained one ([`FtrlError::NotTrained`]).
//! - **Model-state import**: wrong shape, wrong column names or wrong column
//!   types ([`FtrlError::ModelShape`], [`FtrlError::ModelNames`],
//!   [`FtrlError::ModelTypes`]).
//! - **Training**: anything the learner rejects ([`FtrlError::Training`]).
//!
//! Messages always carry the offending field/property together with the
//! received and expected values.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
};

use crate::{
    frame::{FrameError, SType},
    ftrl::core::value::ValueKind,
};

/// Result alias for model-level operations that may produce [`FtrlError`].
pub type FtrlResult<T> = Result<T, FtrlError>;

/// Result alias for field validation that may produce [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the FTRL model boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum FtrlError {
    // ---- Configuration ----
    /// Both the `params` bundle and these individual keywords were supplied.
    ConflictingConfig { fields: Vec<&'static str> },

    // ---- Field validation ----
    /// A parameter failed its field-level validation.
    Param(ParamError),

    // ---- Lifecycle ----
    /// The operation requires a trained model.
    NotTrained { operation: &'static str },

    // ---- Model-state import ----
    /// Model frame does not have `d` rows and 2 columns.
    ModelShape { expected_rows: u64, expected_cols: usize, rows: usize, cols: usize },

    /// Model frame columns are not named `z`, `n` in that order.
    ModelNames { received: Vec<String> },

    /// Model frame columns are not both `float64`.
    ModelTypes { received: Vec<SType> },

    // ---- Training ----
    /// The learner rejected the input.
    Training { reason: String },

    // ---- Tabular data ----
    /// A frame could not be assembled.
    Frame(FrameError),
}

impl FtrlError {
    /// Shorthand for a [`FtrlError::Training`] with the given reason.
    pub fn training(reason: impl Into<String>) -> FtrlError {
        FtrlError::Training { reason: reason.into() }
    }
}

impl std::error::Error for FtrlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtrlError::Param(err) => Some(err),
            FtrlError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for FtrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FtrlError::ConflictingConfig { fields } => {
                let fields = fields.iter().map(|n| format!("`{n}`")).collect::<Vec<_>>();
                write!(
                    f,
                    "You can either pass all the parameters with `params` or any of the \
                     individual parameters with `a`, `b`, `l1`, `l2`, `d`, `n_epochs`, `inter`, \
                     `hash_type` or `seed`, but not both at the same time; got `params` \
                     together with {}",
                    fields.join(", ")
                )
            }
            FtrlError::Param(err) => write!(f, "{err}"),
            FtrlError::NotTrained { operation } => {
                write!(f, "Cannot {operation}, because the model was not trained")
            }
            FtrlError::ModelShape { expected_rows, expected_cols, rows, cols } => {
                write!(
                    f,
                    "FTRL model frame must have {expected_rows} rows and {expected_cols} \
                     columns, whereas your frame has {rows} rows and {cols} columns"
                )
            }
            FtrlError::ModelNames { received } => {
                let names = received.iter().map(|n| format!("`{n}`")).collect::<Vec<_>>();
                write!(
                    f,
                    "FTRL model frame must have columns named `z` and `n`, whereas your \
                     frame has the following column names: {}",
                    names.join(" and ")
                )
            }
            FtrlError::ModelTypes { received } => {
                let types = received.iter().map(|t| format!("`{t}`")).collect::<Vec<_>>();
                write!(
                    f,
                    "FTRL model frame must have both column types as `float64`, whereas \
                     your frame has the following column types: {}",
                    types.join(" and ")
                )
            }
            FtrlError::Training { reason } => write!(f, "Training failed: {reason}"),
            FtrlError::Frame(err) => write!(f, "{err}"),
        }
    }
}

impl From<ParamError> for FtrlError {
    fn from(err: ParamError) -> FtrlError {
        FtrlError::Param(err)
    }
}

impl From<FrameError> for FtrlError {
    fn from(err: FrameError) -> FtrlError {
        FtrlError::Frame(err)
    }
}

/// Convert an [`FtrlError`] into a Python exception.
///
/// Type mismatches and conflicting constructor modes surface as `TypeError`;
/// everything else surfaces as `ValueError`.
#[cfg(feature = "python-bindings")]
impl From<FtrlError> for PyErr {
    fn from(err: FtrlError) -> PyErr {
        match err {
            FtrlError::Param(inner) => inner.into(),
            FtrlError::ConflictingConfig { .. } => PyTypeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Errors specific to validating a single parameter or a parameter bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The value has the wrong type for the field.
    TypeMismatch { field: &'static str, expected: &'static str, received: ValueKind },

    /// The value has the right type but is outside the admissible range.
    OutOfRange { field: &'static str, value: i128, reason: &'static str },

    /// A bundle carried a field name that is not a parameter.
    UnknownField { field: String },

    /// A bundle did not carry a required field.
    MissingField { field: &'static str },

    /// A bundle could not be decoded at all (e.g., invalid JSON).
    Malformed { reason: String },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::TypeMismatch { field, expected, received } => {
                write!(f, "`{field}` must be {expected}, not {received}")
            }
            ParamError::OutOfRange { field, value, reason } => {
                write!(f, "`{field}` {reason}; got: {value}")
            }
            ParamError::UnknownField { field } => {
                write!(f, "Unknown FTRL parameter `{field}`")
            }
            ParamError::MissingField { field } => {
                write!(f, "FTRL parameter bundle is missing `{field}`")
            }
            ParamError::Malformed { reason } => {
                write!(f, "FTRL parameter bundle is malformed: {reason}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python exception (`TypeError` for type
/// mismatches, `ValueError` otherwise).
#[cfg(feature = "python-bindings")]
impl From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        match err {
            ParamError::TypeMismatch { .. } => PyTypeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

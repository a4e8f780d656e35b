//! ftrl — FTRL-Proximal model: parameters, learner, controller and errors.
//!
//! Purpose
//! -------
//! Provide the online logistic-regression model as a single namespace. The
//! public entry point is [`FtrlModel`], which owns a [`Learner`] (by default
//! [`FtrlEngine`]) and guards every parameter or model-state change.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds host values, typed parameters and field validators,
//!   constructor resolution, hashing, and the `z`/`n` model codec.
//! - [`engine`] defines the [`Learner`] seam and the FTRL-Proximal engine.
//! - [`models`] implements the lifecycle-aware controller [`FtrlModel`].
//! - [`errors`] centralizes [`FtrlError`] / [`ParamError`] and their result
//!   aliases, plus the `PyErr` conversions used by the bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - The engine's weights always have length `d` of the current parameters.
//! - Every failed setter, `set_params` or `set_model` leaves the model
//!   exactly as it was.
//!
//! Conventions
//! -----------
//! - State transitions (fit, reset, import, dropping the weights on a new `d`)
//!   are logged through the `log` facade; the host picks the logger.
//! - A model is single-owner and not thread-safe.
//!
//! Downstream usage
//! ----------------
//! - Build an [`FtrlConfig`] (either a full bundle via `params` or individual
//!   keyword fields), create the model with `FtrlModel::new(config)`, then
//!   `fit` on a [`Frame`](crate::frame::Frame) whose last column is the
//!   target and `predict` on frames of feature columns.
//! - Python bindings import from [`prelude`].

pub mod core;
pub mod engine;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    FtrlConfig, FtrlParams, HashType, HostValue, ParamBundle, RawBundle, ValueKind,
};
pub use self::engine::{FtrlEngine, Learner};
pub use self::errors::{FtrlError, FtrlResult, ParamError, ParamResult};
pub use self::models::{FtrlModel, LifecycleState};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_ftrl::ftrl::prelude::*;

pub mod prelude {
    pub use super::{
        FtrlConfig, FtrlEngine, FtrlError, FtrlModel, FtrlParams, FtrlResult, HashType, HostValue,
        LifecycleState, ParamBundle, ParamError, ParamResult, RawBundle,
    };
}

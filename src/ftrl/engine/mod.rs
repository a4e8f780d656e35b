//! engine — the learner behind the model boundary.
//!
//! Purpose
//! -------
//! Define the seam between the model controller and the numeric learner.
//! The controller only ever talks to a [`Learner`]; [`FtrlEngine`] is the
//! concrete FTRL-Proximal implementation.
//!
//! Key behaviors
//! -------------
//! - [`Learner`] exposes configuration, (re)initialisation, training,
//!   prediction and raw access to the `z`/`n` weight vectors.
//! - Implementations trust their inputs for weights: the controller hands
//!   them only vectors that passed the model-state codec.
//!
//! Conventions
//! -----------
//! - Training errors are reported as `FtrlError::Training`.
//! - Every call runs to completion on the caller's thread; a learner is
//!   owned by exactly one controller and does no internal locking.

pub mod ftrl;

pub use self::ftrl::FtrlEngine;

use ndarray::{Array1, ArrayView1};

use crate::{
    frame::Frame,
    ftrl::{core::params::FtrlParams, errors::FtrlResult},
};

/// Operations the model controller needs from a learner.
pub trait Learner {
    /// Apply a parameter set. Changing `d` drops the weights; the learner
    /// allocates `d` bins no earlier than the next `fit`.
    fn configure(&mut self, params: &FtrlParams);

    /// Drop the weights and return to the untrained state.
    fn init_model(&mut self);

    /// Train on `frame`; the last column is the target.
    fn fit(&mut self, frame: &Frame) -> FtrlResult<()>;

    /// Predict one value per row of `frame` (features only).
    fn predict(&self, frame: &Frame) -> FtrlResult<Frame>;

    fn is_trained(&self) -> bool;

    /// Borrow the `(z, n)` weight vectors.
    fn weights(&self) -> (ArrayView1<'_, f64>, ArrayView1<'_, f64>);

    /// Replace the weights with already validated vectors of length `d`.
    fn adopt_weights(&mut self, z: Array1<f64>, n: Array1<f64>);
}

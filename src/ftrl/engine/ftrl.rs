//! FTRL-Proximal logistic learner with the hashing trick.
//!
//! Purpose
//! -------
//! Implement the [`Learner`] seam with the per-coordinate FTRL-Proximal
//! algorithm (McMahan et al., "Ad Click Prediction: a View from the
//! Trenches") over a fixed number of hash bins `d`.
//!
//! Key behaviors
//! -------------
//! - Each row is encoded as a set of bin indices: bin `0` is the bias, every
//!   feature cell contributes `hash(cell) + hash(column name) mod d`, and with
//!   `inter = true` every unordered pair of feature hashes is hashed again
//!   into one more bin.
//! - The weight of bin `i` is derived lazily from the accumulators:
//!   `w_i = 0` if `|z_i| ≤ l1`, otherwise
//!   `w_i = -(z_i - sign(z_i)·l1) / ((b + √n_i) / a + l2)`.
//! - Predictions are `σ(Σ w_i)` with the logit clamped to `±35`.
//! - For gradient `g = p - y`: `σ_i = (√(n_i + g²) - √n_i) / a`,
//!   `z_i += g - σ_i·w_i`, `n_i += g²`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `z` and `n` stay empty until the first `fit` (or an imported model)
//!   and hold exactly `d` entries afterwards. Configuring or resetting never
//!   allocates, so any `d` is accepted up front; a `d` the host cannot
//!   allocate surfaces as a training error from `fit`.
//! - The target (last training column) is `bool8` or numeric with finite
//!   values in `[0, 1]`.
//! - Once fitted, prediction frames must have exactly as many columns as the
//!   training frame had features.
//!
//! Performance
//! -----------
//! - Row encoding reuses a byte buffer and two index buffers across rows; a
//!   training pass is O(rows × bins per row).
use log::{debug, info};
use ndarray::{Array1, ArrayView1};

use crate::{
    frame::{Column, Frame, SType},
    ftrl::{
        core::{hashing::hash_bytes, params::FtrlParams},
        engine::Learner,
        errors::{FtrlError, FtrlResult},
    },
};

const LOGIT_CLAMP: f64 = 35.0;
const PROB_EPS: f64 = 1e-15;
const DEFAULT_TARGET_NAME: &str = "target";

/// Concrete FTRL-Proximal learner.
#[derive(Debug, Clone, PartialEq)]
pub struct FtrlEngine {
    params: FtrlParams,
    z: Array1<f64>,
    n: Array1<f64>,
    trained: bool,
    /// Feature count of the last training frame.
    n_features: Option<usize>,
    /// Target column name of the last training frame.
    target_name: Option<String>,
}

/// Scratch buffers reused while encoding rows.
#[derive(Default)]
struct RowEncoder {
    key: Vec<u8>,
    hashes: Vec<u64>,
    bins: Vec<usize>,
}

impl FtrlEngine {
    /// Create an untrained engine. Weights are allocated by the first `fit`.
    pub fn new(params: FtrlParams) -> FtrlEngine {
        FtrlEngine {
            params,
            z: Array1::zeros(0),
            n: Array1::zeros(0),
            trained: false,
            n_features: None,
            target_name: None,
        }
    }

    pub fn params(&self) -> &FtrlParams {
        &self.params
    }

    /// Feature count remembered from the last `fit`, if any.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn weight(&self, i: usize) -> f64 {
        let FtrlParams { a, b, l1, l2, .. } = self.params;
        let z = self.z[i];
        if z.abs() <= l1 {
            0.0
        } else {
            -(z - z.signum() * l1) / ((b + self.n[i].sqrt()) / a + l2)
        }
    }

    fn probability(&self, bins: &[usize]) -> f64 {
        let logit: f64 = bins.iter().map(|&i| self.weight(i)).sum();
        1.0 / (1.0 + (-logit.clamp(-LOGIT_CLAMP, LOGIT_CLAMP)).exp())
    }

    fn update(&mut self, bins: &[usize], p: f64, y: f64) {
        let g = p - y;
        let g2 = g * g;
        for &i in bins {
            let w = self.weight(i);
            let n_i = self.n[i];
            let sigma = ((n_i + g2).sqrt() - n_i.sqrt()) / self.params.a;
            self.z[i] += g - sigma * w;
            self.n[i] += g2;
        }
    }

    /// Fill `enc.bins` with the bin indices of `row`.
    fn encode_row(
        &self, features: &[Column], name_hashes: &[u64], row: usize, enc: &mut RowEncoder,
    ) {
        let FtrlParams { d, inter, hash_type, seed, .. } = self.params;
        enc.bins.clear();
        enc.hashes.clear();
        enc.bins.push(0);

        for (column, &name_hash) in features.iter().zip(name_hashes) {
            column.write_key(row, &mut enc.key);
            let h = hash_bytes(hash_type, &enc.key, seed).wrapping_add(name_hash);
            enc.hashes.push(h);
            enc.bins.push((h % d) as usize);
        }

        if inter {
            let mut pair = [0u8; 16];
            for i in 0..enc.hashes.len() {
                for j in (i + 1)..enc.hashes.len() {
                    pair[..8].copy_from_slice(&enc.hashes[i].to_le_bytes());
                    pair[8..].copy_from_slice(&enc.hashes[j].to_le_bytes());
                    enc.bins.push((hash_bytes(hash_type, &pair, seed) % d) as usize);
                }
            }
        }
    }

    /// Allocate zeroed `z`/`n` of length `d` unless they already have it.
    fn ensure_weights(&mut self) -> FtrlResult<()> {
        let d = self.params.d;
        if self.z.len() as u64 == d && self.n.len() as u64 == d {
            return Ok(());
        }
        let z = zeroed_bins(d)?;
        let n = zeroed_bins(d)?;
        debug!("FTRL weights allocated for d = {d}");
        self.z = z;
        self.n = n;
        Ok(())
    }

    fn name_hashes(&self, names: &[String]) -> Vec<u64> {
        names
            .iter()
            .map(|name| hash_bytes(self.params.hash_type, name.as_bytes(), self.params.seed))
            .collect()
    }
}

impl Default for FtrlEngine {
    fn default() -> Self {
        FtrlEngine::new(FtrlParams::default())
    }
}

/// Zero-filled accumulator of `d` bins; allocation failure is a training error.
fn zeroed_bins(d: u64) -> FtrlResult<Array1<f64>> {
    let len = usize::try_from(d).map_err(|_| {
        FtrlError::training(format!("cannot allocate {d} hash bins on this platform"))
    })?;
    let mut buf: Vec<f64> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| FtrlError::training(format!("cannot allocate {d} hash bins: {e}")))?;
    buf.resize(len, 0.0);
    Ok(Array1::from(buf))
}

/// Read the target column as values in `[0, 1]`.
fn target_values(name: &str, column: &Column) -> FtrlResult<Vec<f64>> {
    if column.stype() == SType::Str {
        return Err(FtrlError::training(format!(
            "target column `{name}` must be boolean or numeric, got {}",
            column.stype()
        )));
    }
    (0..column.len())
        .map(|row| match column.value_f64(row) {
            Some(y) if y.is_finite() && (0.0..=1.0).contains(&y) => Ok(y),
            other => Err(FtrlError::training(format!(
                "target column `{name}` must hold values in [0, 1]; row {row} has {}",
                other.map_or_else(|| "a non-numeric value".to_string(), |v| v.to_string())
            ))),
        })
        .collect()
}

fn log_loss(p: f64, y: f64) -> f64 {
    let p = p.clamp(PROB_EPS, 1.0 - PROB_EPS);
    -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
}

impl Learner for FtrlEngine {
    fn configure(&mut self, params: &FtrlParams) {
        let resized = params.d != self.params.d;
        self.params = *params;
        if resized {
            debug!("FTRL engine reconfigured to d = {}; weights dropped", params.d);
            self.z = Array1::zeros(0);
            self.n = Array1::zeros(0);
            self.trained = false;
        }
    }

    fn init_model(&mut self) {
        self.z = Array1::zeros(0);
        self.n = Array1::zeros(0);
        self.trained = false;
        self.n_features = None;
        self.target_name = None;
    }

    fn fit(&mut self, frame: &Frame) -> FtrlResult<()> {
        let (nrows, ncols) = frame.shape();
        if self.params.d == 0 {
            return Err(FtrlError::training("the number of bins `d` must be positive"));
        }
        if ncols < 2 {
            return Err(FtrlError::training(format!(
                "training frame must have at least one feature column and a target column, \
                 got {ncols} columns"
            )));
        }
        if nrows == 0 {
            return Err(FtrlError::training("training frame has no rows"));
        }

        let n_features = ncols - 1;
        let target_name = &frame.names()[n_features];
        let y = target_values(target_name, &frame.columns()[n_features])?;
        let features = &frame.columns()[..n_features];
        let name_hashes = self.name_hashes(&frame.names()[..n_features]);
        self.ensure_weights()?;

        let mut enc = RowEncoder::default();
        for epoch in 0..self.params.n_epochs {
            let mut loss = 0.0;
            for (row, &target) in y.iter().enumerate() {
                self.encode_row(features, &name_hashes, row, &mut enc);
                let p = self.probability(&enc.bins);
                loss += log_loss(p, target);
                self.update(&enc.bins, p, target);
            }
            debug!(
                "FTRL epoch {}/{}: mean logloss = {:.6}",
                epoch + 1,
                self.params.n_epochs,
                loss / nrows as f64
            );
        }

        self.trained = true;
        self.n_features = Some(n_features);
        self.target_name = Some(target_name.clone());
        info!(
            "FTRL fitted on {nrows} rows × {n_features} features for {} epochs (d = {})",
            self.params.n_epochs, self.params.d
        );
        Ok(())
    }

    fn predict(&self, frame: &Frame) -> FtrlResult<Frame> {
        if !self.trained {
            return Err(FtrlError::training("the model has not been trained"));
        }
        if self.params.d == 0 {
            return Err(FtrlError::training("the number of bins `d` must be positive"));
        }
        if let Some(expected) = self.n_features {
            if frame.ncols() != expected {
                return Err(FtrlError::training(format!(
                    "prediction frame must have {expected} columns (one fewer than the \
                     training frame), got {}",
                    frame.ncols()
                )));
            }
        }

        let name_hashes = self.name_hashes(frame.names());
        let mut enc = RowEncoder::default();
        let predictions: Array1<f64> = (0..frame.nrows())
            .map(|row| {
                self.encode_row(frame.columns(), &name_hashes, row, &mut enc);
                self.probability(&enc.bins)
            })
            .collect();

        let name = self.target_name.as_deref().unwrap_or(DEFAULT_TARGET_NAME);
        Ok(Frame::new(vec![(name, Column::Float64(predictions))])?)
    }

    fn is_trained(&self) -> bool {
        self.trained
    }

    fn weights(&self) -> (ArrayView1<'_, f64>, ArrayView1<'_, f64>) {
        (self.z.view(), self.n.view())
    }

    fn adopt_weights(&mut self, z: Array1<f64>, n: Array1<f64>) {
        debug_assert_eq!(z.len() as u64, self.params.d);
        debug_assert_eq!(n.len(), z.len());
        self.z = z;
        self.n = n;
        self.trained = true;
    }
}

//! FTRL parameters: the typed parameter set, the seven-field aggregate bundle,
//! the hash selector, and the compiled-in defaults.
//!
//! Purpose
//! -------
//! Hold the tunable values of the FTRL learner in typed form once they have
//! passed field validation. Nothing in this module validates dynamic input;
//! see [`fields`](crate::ftrl::core::fields) for that.
//!
//! Key behaviors
//! -------------
//! - [`FtrlParams`] carries all nine values (`a`, `b`, `l1`, `l2`, `d`,
//!   `n_epochs`, `inter`, `hash_type`, `seed`) and is what the engine reads.
//! - [`ParamBundle`] is the seven-field aggregate returned by `params()` /
//!   `default_params()`; it serialises with `serde` and converts back into a
//!   [`RawBundle`] so it can be fed to `set_params` or a constructor.
//! - [`DEFAULT_PARAMS`] is a process-wide constant independent of any model.
//!
//! Invariants & assumptions
//! ------------------------
//! - `hash_type` is always one of the three [`HashType`] variants; the
//!   numeric codes 0, 1, 2 are the only ones accepted at the boundary.
//! - `a`, `b`, `l1`, `l2` are not range-restricted here.
use serde::{Deserialize, Serialize};

use crate::ftrl::core::value::RawBundle;

/// Hash function used to map feature values into bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    /// Standard library hasher (`0`). Ignores the seed. Its output is only
    /// guaranteed within one Rust toolchain, so models exported with it may
    /// not reproduce after an upgrade.
    Std,
    /// MurmurHash2, 64-bit variant (`1`).
    Murmur2,
    /// MurmurHash3, x64 128-bit variant truncated to 64 bits (`2`).
    Murmur3,
}

impl HashType {
    /// Numeric code as seen by the host (`0`, `1` or `2`).
    pub fn code(&self) -> u32 {
        match self {
            HashType::Std => 0,
            HashType::Murmur2 => 1,
            HashType::Murmur3 => 2,
        }
    }

    /// Inverse of [`HashType::code`]; `None` for any other number.
    pub fn from_code(code: i64) -> Option<HashType> {
        match code {
            0 => Some(HashType::Std),
            1 => Some(HashType::Murmur2),
            2 => Some(HashType::Murmur3),
            _ => None,
        }
    }
}

/// Full, validated parameter set of the FTRL learner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FtrlParams {
    /// `alpha` in the per-coordinate learning rate formula.
    pub a: f64,
    /// `beta` in the per-coordinate learning rate formula.
    pub b: f64,
    /// L1 regularization strength.
    pub l1: f64,
    /// L2 regularization strength.
    pub l2: f64,
    /// Number of hash bins.
    pub d: u64,
    /// Number of passes over the training rows.
    pub n_epochs: u64,
    /// Whether pairwise feature interactions are generated.
    pub inter: bool,
    /// Hash function for feature values.
    pub hash_type: HashType,
    /// Seed for the Murmur hash functions.
    pub seed: u32,
}

impl FtrlParams {
    pub const DEFAULT: FtrlParams = FtrlParams {
        a: 0.005,
        b: 1.0,
        l1: 0.0,
        l2: 1.0,
        d: 1_000_000,
        n_epochs: 1,
        inter: false,
        hash_type: HashType::Murmur2,
        seed: 0,
    };

    /// The seven fields shared with the aggregate bundle.
    pub fn bundle(&self) -> ParamBundle {
        ParamBundle {
            a: self.a,
            b: self.b,
            l1: self.l1,
            l2: self.l2,
            d: self.d,
            n_epochs: self.n_epochs,
            inter: self.inter,
        }
    }

    /// Overwrite the seven bundle fields, keeping `hash_type` and `seed`.
    pub fn apply_bundle(&mut self, bundle: &ParamBundle) {
        self.a = bundle.a;
        self.b = bundle.b;
        self.l1 = bundle.l1;
        self.l2 = bundle.l2;
        self.d = bundle.d;
        self.n_epochs = bundle.n_epochs;
        self.inter = bundle.inter;
    }
}

impl Default for FtrlParams {
    fn default() -> Self {
        FtrlParams::DEFAULT
    }
}

/// Compiled-in defaults, identical for every model instance.
pub const DEFAULT_PARAMS: FtrlParams = FtrlParams::DEFAULT;

/// The aggregate parameter bundle: every field except `hash_type` and `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamBundle {
    pub a: f64,
    pub b: f64,
    pub l1: f64,
    pub l2: f64,
    pub d: u64,
    pub n_epochs: u64,
    pub inter: bool,
}

impl ParamBundle {
    /// Field names in canonical order.
    pub const FIELDS: [&'static str; 7] = ["a", "b", "l1", "l2", "d", "n_epochs", "inter"];
}

impl Default for ParamBundle {
    fn default() -> Self {
        DEFAULT_PARAMS.bundle()
    }
}

impl From<ParamBundle> for RawBundle {
    fn from(bundle: ParamBundle) -> RawBundle {
        RawBundle::new()
            .with("a", bundle.a)
            .with("b", bundle.b)
            .with("l1", bundle.l1)
            .with("l2", bundle.l2)
            .with("d", bundle.d)
            .with("n_epochs", bundle.n_epochs)
            .with("inter", bundle.inter)
    }
}

//! FTRL model controller: lifecycle, parameters and model state.
//!
//! Purpose
//! -------
//! Wrap a [`Learner`] in the boundary contract seen by callers: construction
//! from an [`FtrlConfig`], training and prediction gated by an explicit
//! [`LifecycleState`], atomic and per-field parameter access, and import or
//! export of the `z`/`n` model frame through the codec.
//!
//! Key behaviors
//! -------------
//! - `Untrained → Trained` on a successful [`FtrlModel::fit`] or
//!   [`FtrlModel::set_model`]; [`FtrlModel::reset`] goes back to
//!   `Untrained` with the parameters unchanged.
//! - [`FtrlModel::predict`] and [`FtrlModel::model`] match on the state;
//!   prediction before training fails with [`FtrlError::NotTrained`].
//! - Setters validate through the shared field descriptors and forward the
//!   new parameters to the learner. A new `d` drops the weights and moves
//!   the model to `Untrained`; nothing is allocated until the next fit.
//! - [`FtrlModel::set_params`] validates all seven bundle fields before
//!   applying any of them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `state == Trained` iff the learner reports `is_trained()`.
//! - A failed operation leaves parameters, weights and state untouched.
//! - The model owns its learner exclusively; there is no internal locking.
use log::{debug, info, warn};

use crate::{
    frame::Frame,
    ftrl::{
        core::{
            codec::{export_model, import_model},
            config::{FtrlConfig, validate_bundle},
            fields,
            params::{DEFAULT_PARAMS, FtrlParams, HashType, ParamBundle},
            value::{HostValue, RawBundle},
        },
        engine::{FtrlEngine, Learner},
        errors::{FtrlError, FtrlResult, ParamResult},
    },
};

/// Whether the learner holds usable weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Untrained,
    Trained,
}

/// FTRL model controller owning one learner.
///
/// Examples
/// --------
/// ```rust
/// # use rust_ftrl::frame::{Column, Frame};
/// # use rust_ftrl::ftrl::{FtrlConfig, FtrlModel, LifecycleState};
/// let mut model = FtrlModel::new(FtrlConfig::new().d(50).n_epochs(3)).unwrap();
/// let train = Frame::new(vec![
///     ("x", Column::from(vec!["a", "b", "a", "b"])),
///     ("y", Column::from(vec![true, false, true, false])),
/// ])
/// .unwrap();
///
/// model.fit(&train).unwrap();
/// assert_eq!(model.state(), LifecycleState::Trained);
///
/// let test = Frame::new(vec![("x", Column::from(vec!["a", "b"]))]).unwrap();
/// assert_eq!(model.predict(&test).unwrap().shape(), (2, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FtrlModel<L: Learner = FtrlEngine> {
    params: FtrlParams,
    engine: L,
    state: LifecycleState,
}

impl FtrlModel<FtrlEngine> {
    /// Build a model with the FTRL-Proximal engine.
    ///
    /// Errors
    /// ------
    /// - `FtrlError::ConflictingConfig` when both a bundle and keywords are
    ///   supplied.
    /// - `FtrlError::Param(..)` when a field fails validation.
    pub fn new(config: FtrlConfig) -> FtrlResult<FtrlModel<FtrlEngine>> {
        let params = config.build_params()?;
        Ok(FtrlModel::from_params(params, FtrlEngine::new(params)))
    }
}

impl Default for FtrlModel<FtrlEngine> {
    fn default() -> Self {
        FtrlModel::from_params(DEFAULT_PARAMS, FtrlEngine::new(DEFAULT_PARAMS))
    }
}

macro_rules! field_accessors {
    ($(($field:ident, $setter:ident, $spec:ident, $ty:ty)),* $(,)?) => {
        $(
            pub fn $field(&self) -> $ty {
                self.params.$field
            }

            #[doc = concat!("Validate and set `", stringify!($field), "`.")]
            pub fn $setter(&mut self, value: impl Into<HostValue>) -> ParamResult<()> {
                let $field = fields::$spec.validate(&value.into())?;
                debug!("FTRL parameter `{}` set to {:?}", stringify!($field), $field);
                self.apply(FtrlParams { $field, ..self.params });
                Ok(())
            }
        )*
    };
}

impl<L: Learner> FtrlModel<L> {
    /// Build a model around a caller-supplied learner.
    pub fn with_engine(config: FtrlConfig, engine: L) -> FtrlResult<FtrlModel<L>> {
        Ok(FtrlModel::from_params(config.build_params()?, engine))
    }

    fn from_params(params: FtrlParams, mut engine: L) -> FtrlModel<L> {
        engine.configure(&params);
        engine.init_model();
        FtrlModel { params, engine, state: LifecycleState::Untrained }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn engine(&self) -> &L {
        &self.engine
    }

    /// All nine typed parameters.
    pub fn parameters(&self) -> &FtrlParams {
        &self.params
    }

    /// Train on `frame`; the last column is the target.
    ///
    /// Errors
    /// ------
    /// - `FtrlError::Training` for input the learner cannot train on. The
    ///   state does not change on error.
    pub fn fit(&mut self, frame: &Frame) -> FtrlResult<()> {
        self.engine.fit(frame)?;
        self.state = LifecycleState::Trained;
        info!("FTRL model trained on a {} × {} frame", frame.nrows(), frame.ncols());
        Ok(())
    }

    /// Predict one probability per row of `frame`.
    ///
    /// Errors
    /// ------
    /// - `FtrlError::NotTrained` before any `fit` or `set_model`.
    /// - `FtrlError::Training` when the frame does not match the training
    ///   features.
    pub fn predict(&self, frame: &Frame) -> FtrlResult<Frame> {
        match self.state {
            LifecycleState::Untrained => Err(FtrlError::NotTrained { operation: "predict" }),
            LifecycleState::Trained => self.engine.predict(frame),
        }
    }

    /// Zero the weights and return to `Untrained`, keeping the parameters.
    pub fn reset(&mut self) {
        self.engine.init_model();
        self.state = LifecycleState::Untrained;
        info!("FTRL model reset (d = {})", self.params.d);
    }

    /// Snapshot of the `z`/`n` weights, or `None` when untrained.
    pub fn model(&self) -> FtrlResult<Option<Frame>> {
        match self.state {
            LifecycleState::Untrained => Ok(None),
            LifecycleState::Trained => {
                let (z, n) = self.engine.weights();
                Ok(Some(export_model(z, n)?))
            }
        }
    }

    /// Replace the weights with a validated `d × 2` model frame.
    ///
    /// Errors
    /// ------
    /// - `FtrlError::ModelShape`, `FtrlError::ModelNames` or
    ///   `FtrlError::ModelTypes`, checked in that order. Nothing changes on
    ///   error.
    pub fn set_model(&mut self, frame: &Frame) -> FtrlResult<()> {
        let (z, n) = import_model(frame, self.params.d)?;
        self.engine.adopt_weights(z, n);
        self.state = LifecycleState::Trained;
        info!("FTRL model imported ({} bins)", self.params.d);
        Ok(())
    }

    /// The seven bundle fields.
    pub fn params(&self) -> ParamBundle {
        self.params.bundle()
    }

    /// Replace the seven bundle fields at once.
    ///
    /// Errors
    /// ------
    /// - `ParamError::UnknownField`, `ParamError::MissingField`, or the
    ///   first failing field's `TypeMismatch` / `OutOfRange`. No field is
    ///   applied unless all of them pass.
    pub fn set_params(&mut self, bundle: &RawBundle) -> ParamResult<()> {
        let bundle = validate_bundle(bundle)?;
        let mut next = self.params;
        next.apply_bundle(&bundle);
        debug!("FTRL parameters set to {bundle:?}");
        self.apply(next);
        Ok(())
    }

    /// Compiled-in defaults, independent of any instance.
    pub fn default_params() -> ParamBundle {
        DEFAULT_PARAMS.bundle()
    }

    pub fn hash_type(&self) -> HashType {
        self.params.hash_type
    }

    /// Validate and set `hash_type` from its integer code.
    pub fn set_hash_type(&mut self, value: impl Into<HostValue>) -> ParamResult<()> {
        let hash_type = fields::HASH_TYPE.validate(&value.into())?;
        debug!("FTRL parameter `hash_type` set to {hash_type:?}");
        self.apply(FtrlParams { hash_type, ..self.params });
        Ok(())
    }

    field_accessors!(
        (a, set_a, A, f64),
        (b, set_b, B, f64),
        (l1, set_l1, L1, f64),
        (l2, set_l2, L2, f64),
        (d, set_d, D, u64),
        (n_epochs, set_n_epochs, N_EPOCHS, u64),
        (inter, set_inter, INTER, bool),
        (seed, set_seed, SEED, u32),
    );

    fn apply(&mut self, next: FtrlParams) {
        let resized = next.d != self.params.d;
        self.params = next;
        self.engine.configure(&next);
        if resized {
            if self.state == LifecycleState::Trained {
                warn!("FTRL `d` changed to {}; the trained model was discarded", next.d);
            }
            self.engine.init_model();
            self.state = LifecycleState::Untrained;
        }
    }
}

//! rust_ftrl — FTRL-Proximal online learner with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the FTRL model to Python via the `rust_ftrl` extension module when
//! the `python-bindings` feature is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: [`frame`] (the tabular type) and
//!   [`ftrl`] (parameters, learner, model controller, errors).
//! - Define the `#[pyclass]` wrapper [`Ftrl`] and the `#[pymodule]`
//!   initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All validation lives in the inner modules; this file performs only FFI
//!   glue and error mapping. Python objects are converted to
//!   [`ftrl::HostValue`]s without judging them, so the Rust validators decide
//!   every type and range question.
//!
//! Conventions
//! -----------
//! - Frames cross the boundary as `dict[str, sequence]`; the last column of a
//!   training frame is the target.
//! - Errors from the core are converted to `PyErr` at the boundary:
//!   `TypeError` for type mismatches and conflicting configuration,
//!   `ValueError` for everything else.
//! - The library installs no logger; Rust hosts pick a `log` backend.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code uses [`ftrl::FtrlModel`] directly and can ignore the
//!   PyO3 items.

pub mod frame;
pub mod ftrl;
pub mod utils;

pub use crate::frame::{Column, Frame, SType};
pub use crate::ftrl::{FtrlConfig, FtrlError, FtrlModel, FtrlParams, LifecycleState, ParamError};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::{
    ftrl::{FtrlEngine, HostValue, core::config::PartialParams},
    utils::{bundle_to_pydict, extract_frame, extract_host_value, extract_raw_bundle, frame_to_pydict},
};

/// Ftrl — Python-facing wrapper for [`FtrlModel`].
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Ftrl(params=None, a=None, b=None, l1=None, l2=None, d=None,
/// n_epochs=None, inter=None, hash_type=None, seed=None)`:
/// - `params`: a dict or named tuple carrying `a, b, l1, l2, d, n_epochs,
///   inter`. Cannot be combined with any individual keyword.
/// - individual keywords: override the defaults one by one; `None` means
///   "use the default".
///
/// Notes
/// -----
/// - Native Rust callers should use [`FtrlModel`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_ftrl", name = "Ftrl")]
pub struct Ftrl {
    inner: FtrlModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Ftrl {
    #[new]
    #[pyo3(
        signature = (
            params = None,
            a = None,
            b = None,
            l1 = None,
            l2 = None,
            d = None,
            n_epochs = None,
            inter = None,
            hash_type = None,
            seed = None,
        ),
        text_signature = "(params=None, a=None, b=None, l1=None, l2=None, d=None, \
                          n_epochs=None, inter=None, hash_type=None, seed=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        params: Option<&Bound<'_, PyAny>>, a: Option<&Bound<'_, PyAny>>,
        b: Option<&Bound<'_, PyAny>>, l1: Option<&Bound<'_, PyAny>>,
        l2: Option<&Bound<'_, PyAny>>, d: Option<&Bound<'_, PyAny>>,
        n_epochs: Option<&Bound<'_, PyAny>>, inter: Option<&Bound<'_, PyAny>>,
        hash_type: Option<&Bound<'_, PyAny>>, seed: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Ftrl> {
        fn keyword(value: Option<&Bound<'_, PyAny>>) -> PyResult<Option<HostValue>> {
            value.map(extract_host_value).transpose()
        }

        let mut config = FtrlConfig::new();
        config.fields = PartialParams {
            a: keyword(a)?,
            b: keyword(b)?,
            l1: keyword(l1)?,
            l2: keyword(l2)?,
            d: keyword(d)?,
            n_epochs: keyword(n_epochs)?,
            inter: keyword(inter)?,
            hash_type: keyword(hash_type)?,
            seed: keyword(seed)?,
        };
        if let Some(params) = params {
            config = config.params(extract_raw_bundle(params)?);
        }
        Ok(Ftrl { inner: FtrlModel::new(config)? })
    }

    /// Train on `frame`; its last column is the target.
    pub fn fit(&mut self, frame: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.fit(&extract_frame(frame)?)?)
    }

    /// Predict one probability per row; returns a one-column dict.
    pub fn predict<'py>(
        &self, py: Python<'py>, frame: &Bound<'py, PyAny>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let predictions = self.inner.predict(&extract_frame(frame)?)?;
        frame_to_pydict(py, &predictions)
    }

    /// Zero the model weights; parameters are kept.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// `None` before training, else `{"z": ndarray, "n": ndarray}`.
    #[getter]
    pub fn model<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        self.inner.model()?.map(|frame| frame_to_pydict(py, &frame)).transpose()
    }

    #[setter]
    pub fn set_model(&mut self, frame: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_model(&extract_frame(frame)?)?)
    }

    #[getter]
    pub fn params<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        bundle_to_pydict(py, &self.inner.params())
    }

    #[setter]
    pub fn set_params(&mut self, params: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_params(&extract_raw_bundle(params)?)?)
    }

    #[getter]
    pub fn default_params<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        bundle_to_pydict(py, &FtrlModel::<FtrlEngine>::default_params())
    }

    #[getter]
    pub fn a(&self) -> f64 {
        self.inner.a()
    }

    #[setter]
    pub fn set_a(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_a(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn b(&self) -> f64 {
        self.inner.b()
    }

    #[setter]
    pub fn set_b(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_b(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn l1(&self) -> f64 {
        self.inner.l1()
    }

    #[setter]
    pub fn set_l1(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_l1(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn l2(&self) -> f64 {
        self.inner.l2()
    }

    #[setter]
    pub fn set_l2(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_l2(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn d(&self) -> u64 {
        self.inner.d()
    }

    #[setter]
    pub fn set_d(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_d(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn n_epochs(&self) -> u64 {
        self.inner.n_epochs()
    }

    #[setter]
    pub fn set_n_epochs(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_n_epochs(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn inter(&self) -> bool {
        self.inner.inter()
    }

    #[setter]
    pub fn set_inter(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_inter(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn hash_type(&self) -> u32 {
        self.inner.hash_type().code()
    }

    #[setter]
    pub fn set_hash_type(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_hash_type(extract_host_value(value)?)?)
    }

    #[getter]
    pub fn seed(&self) -> u32 {
        self.inner.seed()
    }

    #[setter]
    pub fn set_seed(&mut self, value: &Bound<'_, PyAny>) -> PyResult<()> {
        Ok(self.inner.set_seed(extract_host_value(value)?)?)
    }

    pub fn __repr__(&self) -> String {
        let p = self.inner.parameters();
        format!(
            "Ftrl(a={}, b={}, l1={}, l2={}, d={}, n_epochs={}, inter={}, hash_type={}, seed={})",
            p.a,
            p.b,
            p.l1,
            p.l2,
            p.d,
            p.n_epochs,
            if p.inter { "True" } else { "False" },
            p.hash_type.code(),
            p.seed
        )
    }
}

/// rust_ftrl — PyO3 module initializer registering [`Ftrl`].
#[cfg(feature = "python-bindings")]
#[pymodule]
fn rust_ftrl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Ftrl>()?;
    Ok(())
}

//! utils — conversions between Python objects and crate types.
//!
//! Only compiled with the `python-bindings` feature. Python values become
//! [`HostValue`]s so that every type and range rule stays in the Rust
//! validators; these helpers never reject a value on semantic grounds.
//!
//! Frames cross the boundary as `dict[str, sequence]`: each value is a 1-D
//! NumPy array (`bool`, `int32`, `int64`, `float32`, `float64`) or a Python
//! sequence of bools, ints, floats or strings.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyBool, PyDict, PyFloat, PyInt, PyList, PyString},
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyReadonlyArray1};

#[cfg(feature = "python-bindings")]
use crate::{
    frame::{Column, Frame},
    ftrl::{
        core::{params::ParamBundle, value::HostValue, value::RawBundle},
        errors::FtrlError,
    },
};

/// Convert a Python scalar into a [`HostValue`].
///
/// `bool` is checked before `int` since Python booleans are integers.
/// Integers are read as `i128`, which holds every `i64` and `u64`; values
/// outside `u64` then fail the field's range check with the exact value.
/// Only integers wider than 128 bits are rejected here, as a `ValueError`.
#[cfg(feature = "python-bindings")]
pub fn extract_host_value(value: &Bound<'_, PyAny>) -> PyResult<HostValue> {
    if value.is_none() {
        Ok(HostValue::None)
    } else if value.is_instance_of::<PyBool>() {
        Ok(HostValue::Bool(value.extract()?))
    } else if value.is_instance_of::<PyInt>() {
        value.extract::<i128>().map(HostValue::Int).map_err(|_| {
            PyValueError::new_err(format!("integer {value} does not fit in 128 bits"))
        })
    } else if value.is_instance_of::<PyFloat>() {
        Ok(HostValue::Float(value.extract()?))
    } else if value.is_instance_of::<PyString>() {
        Ok(HostValue::Str(value.extract()?))
    } else if let Ok(v) = value.extract::<i128>() {
        // NumPy integer scalars, including `uint64`.
        Ok(HostValue::Int(v))
    } else if let Ok(v) = value.extract::<f64>() {
        Ok(HostValue::Float(v))
    } else {
        Err(PyTypeError::new_err(format!(
            "unsupported parameter value of type `{}`",
            value.get_type().name()?
        )))
    }
}

/// Convert a params object into a [`RawBundle`].
///
/// Accepts a `dict`, a named tuple (via `_asdict`), or any object exposing
/// the bundle fields as attributes.
#[cfg(feature = "python-bindings")]
pub fn extract_raw_bundle(params: &Bound<'_, PyAny>) -> PyResult<RawBundle> {
    if let Ok(dict) = params.downcast::<PyDict>() {
        let mut bundle = RawBundle::new();
        for (key, value) in dict.iter() {
            bundle.insert(key.extract::<String>()?, extract_host_value(&value)?);
        }
        return Ok(bundle);
    }

    if params.hasattr("_asdict")? {
        return extract_raw_bundle(&params.call_method0("_asdict")?);
    }

    let mut bundle = RawBundle::new();
    for field in ParamBundle::FIELDS {
        if params.hasattr(field)? {
            bundle.insert(field, extract_host_value(&params.getattr(field)?)?);
        }
    }
    Ok(bundle)
}

#[cfg(feature = "python-bindings")]
fn extract_column(name: &str, values: &Bound<'_, PyAny>) -> PyResult<Column> {
    fn array<'py, T: numpy::Element>(values: &Bound<'py, PyAny>) -> Option<Array1<T>> {
        values.extract::<PyReadonlyArray1<'py, T>>().ok().map(|a| a.as_array().to_owned())
    }

    if let Some(a) = array::<f64>(values) {
        return Ok(Column::Float64(a));
    }
    if let Some(a) = array::<f32>(values) {
        return Ok(Column::Float32(a));
    }
    if let Some(a) = array::<i64>(values) {
        return Ok(Column::Int64(a));
    }
    if let Some(a) = array::<i32>(values) {
        return Ok(Column::Int32(a));
    }
    if let Some(a) = array::<bool>(values) {
        return Ok(Column::Bool(a));
    }

    if values.is_instance_of::<PyString>() {
        return Err(PyTypeError::new_err(format!(
            "column `{name}` must be a sequence, not a string"
        )));
    }
    if let Ok(v) = values.extract::<Vec<bool>>() {
        return Ok(Column::from(v));
    }
    if let Ok(v) = values.extract::<Vec<i64>>() {
        return Ok(Column::from(v));
    }
    if let Ok(v) = values.extract::<Vec<f64>>() {
        return Ok(Column::from(v));
    }
    if let Ok(v) = values.extract::<Vec<String>>() {
        return Ok(Column::from(v));
    }
    Err(PyTypeError::new_err(format!(
        "column `{name}` must be a 1-D array or a sequence of bool, int, float or str"
    )))
}

/// Convert a `dict[str, sequence]` into a [`Frame`], keeping key order.
#[cfg(feature = "python-bindings")]
pub fn extract_frame(frame: &Bound<'_, PyAny>) -> PyResult<Frame> {
    let dict = frame.downcast::<PyDict>().map_err(|_| {
        PyTypeError::new_err("frame must be a dict mapping column names to sequences")
    })?;
    let mut columns = Vec::with_capacity(dict.len());
    for (key, values) in dict.iter() {
        let name: String = key.extract()?;
        let column = extract_column(&name, &values)?;
        columns.push((name, column));
    }
    Ok(Frame::new(columns).map_err(FtrlError::from)?)
}

/// Convert a [`Frame`] into a `dict` of NumPy arrays (lists for strings).
#[cfg(feature = "python-bindings")]
pub fn frame_to_pydict<'py>(py: Python<'py>, frame: &Frame) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (name, column) in frame.iter() {
        match column {
            Column::Bool(a) => dict.set_item(name, a.clone().into_pyarray(py))?,
            Column::Int32(a) => dict.set_item(name, a.clone().into_pyarray(py))?,
            Column::Int64(a) => dict.set_item(name, a.clone().into_pyarray(py))?,
            Column::Float32(a) => dict.set_item(name, a.clone().into_pyarray(py))?,
            Column::Float64(a) => dict.set_item(name, a.clone().into_pyarray(py))?,
            Column::Str(v) => dict.set_item(name, PyList::new(py, v)?)?,
        }
    }
    Ok(dict)
}

/// Convert a [`ParamBundle`] into a `dict`.
#[cfg(feature = "python-bindings")]
pub fn bundle_to_pydict<'py>(py: Python<'py>, bundle: &ParamBundle) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("a", bundle.a)?;
    dict.set_item("b", bundle.b)?;
    dict.set_item("l1", bundle.l1)?;
    dict.set_item("l2", bundle.l2)?;
    dict.set_item("d", bundle.d)?;
    dict.set_item("n_epochs", bundle.n_epochs)?;
    dict.set_item("inter", bundle.inter)?;
    Ok(dict)
}

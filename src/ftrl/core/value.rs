//! Dynamically typed values crossing the host boundary.
//!
//! Purpose
//! -------
//! Model what a host application (a Python caller, a JSON config file, ...)
//! actually hands us: values whose type is only known at runtime. Field
//! validation in [`fields`](crate::ftrl::core::fields) turns these into typed
//! parameters or reports exactly what was received.
//!
//! Key behaviors
//! -------------
//! - [`HostValue`] is the dynamic value; [`ValueKind`] is its runtime type
//!   tag as shown in error messages.
//! - [`RawBundle`] is an ordered name → value map used for the aggregate
//!   `params` bundle and for `set_params`. It can be decoded from JSON text.
//!
//! Conventions
//! -----------
//! - [`HostValue::Int`] is 128 bits wide so every `i64` and `u64` a host
//!   can send is held exactly; range checks happen in the field validators.
//! - JSON integers become [`HostValue::Int`]; JSON numbers with a fractional
//!   part or exponent become [`HostValue::Float`]. Arrays and objects are not
//!   parameter values and are rejected as malformed.
use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::ftrl::errors::{ParamError, ParamResult};

/// Runtime type of a [`HostValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    None,
    Bool,
    Int,
    Float,
    Str,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value supplied by the host whose type is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    None,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
}

impl HostValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            HostValue::None => ValueKind::None,
            HostValue::Bool(_) => ValueKind::Bool,
            HostValue::Int(_) => ValueKind::Int,
            HostValue::Float(_) => ValueKind::Float,
            HostValue::Str(_) => ValueKind::Str,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, HostValue::None)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        HostValue::Float(v)
    }
}

impl From<f32> for HostValue {
    fn from(v: f32) -> Self {
        HostValue::Float(f64::from(v))
    }
}

impl From<i128> for HostValue {
    fn from(v: i128) -> Self {
        HostValue::Int(v)
    }
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        HostValue::Int(i128::from(v))
    }
}

impl From<i32> for HostValue {
    fn from(v: i32) -> Self {
        HostValue::Int(i128::from(v))
    }
}

impl From<u32> for HostValue {
    fn from(v: u32) -> Self {
        HostValue::Int(i128::from(v))
    }
}

impl From<u64> for HostValue {
    fn from(v: u64) -> Self {
        HostValue::Int(i128::from(v))
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        HostValue::Bool(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        HostValue::Str(v.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        HostValue::Str(v)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(HostValue::None, Into::into)
    }
}

impl TryFrom<&JsonValue> for HostValue {
    type Error = ParamError;

    fn try_from(value: &JsonValue) -> ParamResult<HostValue> {
        match value {
            JsonValue::Null => Ok(HostValue::None),
            JsonValue::Bool(b) => Ok(HostValue::Bool(*b)),
            JsonValue::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Ok(HostValue::Int(i128::from(i))),
                (None, Some(u)) => Ok(HostValue::Int(i128::from(u))),
                (None, None) => n.as_f64().map(HostValue::Float).ok_or_else(|| ParamError::Malformed {
                    reason: format!("number {n} is not representable"),
                }),
            },
            JsonValue::String(s) => Ok(HostValue::Str(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => Err(ParamError::Malformed {
                reason: format!("parameter values must be scalars, got {value}"),
            }),
        }
    }
}

/// Ordered name → value map: the untyped form of a parameter bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBundle {
    entries: BTreeMap<String, HostValue>,
}

impl RawBundle {
    pub fn new() -> RawBundle {
        RawBundle::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> RawBundle {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&HostValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Decode a bundle from a JSON object such as
    /// `{"a": 0.1, "b": 1, "l1": 0, "l2": 1, "d": 100, "n_epochs": 2, "inter": false}`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::Malformed` if the text is not valid JSON, is not an
    ///   object, or holds non-scalar values.
    pub fn from_json(text: &str) -> ParamResult<RawBundle> {
        let parsed: JsonValue = serde_json::from_str(text)
            .map_err(|e| ParamError::Malformed { reason: e.to_string() })?;
        let object = parsed.as_object().ok_or_else(|| ParamError::Malformed {
            reason: "expected a JSON object of parameter values".to_string(),
        })?;
        let mut bundle = RawBundle::new();
        for (name, value) in object {
            bundle.insert(name.as_str(), HostValue::try_from(value)?);
        }
        Ok(bundle)
    }
}

impl<K: Into<String>, V: Into<HostValue>> FromIterator<(K, V)> for RawBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = RawBundle::new();
        for (k, v) in iter {
            bundle.insert(k, v);
        }
        bundle
    }
}

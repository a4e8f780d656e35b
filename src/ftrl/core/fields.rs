//! Validated parameter fields, one descriptor per FTRL parameter.
//!
//! Purpose
//! -------
//! Centralize the type and range rules for every parameter in a single
//! generic abstraction, [`FieldSpec<T>`], so construction, `set_params` and
//! the per-field setters all share one definition per field instead of
//! repeating near-identical checks.
//!
//! Key behaviors
//! -------------
//! - A [`FieldSpec<T>`] pairs a field name with a conversion from
//!   [`HostValue`] to `T` that performs both the type check and the range
//!   check.
//! - The nine descriptors ([`A`], [`B`], [`L1`], [`L2`], [`D`], [`N_EPOCHS`],
//!   [`INTER`], [`HASH_TYPE`], [`SEED`]) are process-wide constants.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numeric fields accept `Int` and `Float`; `Bool` is not numeric.
//! - Integer fields accept only `Int`; a `Float` such as `2.0` is a type
//!   error. Integers that do not fit the field's width are range errors,
//!   never truncated.
//! - Range checks run only after the type check has passed.
//! - `HostValue::None` is a type error here; treating `None` as "not
//!   supplied" is the caller's decision (see `config`).
//!
//! Testing notes
//! -------------
//! - Unit tests cover every accept/reject branch of the shared converters and
//!   the field names carried into errors.
use crate::ftrl::{
    core::{params::HashType, value::HostValue},
    errors::{ParamError, ParamResult},
};

/// Conversion from a host value to a typed field value.
type Convert<T> = fn(&'static str, &HostValue) -> ParamResult<T>;

/// Descriptor of one validated parameter field.
#[derive(Clone, Copy)]
pub struct FieldSpec<T> {
    name: &'static str,
    convert: Convert<T>,
}

impl<T> FieldSpec<T> {
    pub const fn new(name: &'static str, convert: Convert<T>) -> FieldSpec<T> {
        FieldSpec { name, convert }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check `value` against this field's type and range rules.
    ///
    /// Errors
    /// ------
    /// - `ParamError::TypeMismatch` naming the field and the received kind.
    /// - `ParamError::OutOfRange` naming the field and the received value.
    pub fn validate(&self, value: &HostValue) -> ParamResult<T> {
        (self.convert)(self.name, value)
    }
}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish()
    }
}

pub const A: FieldSpec<f64> = FieldSpec::new("a", numeric);
pub const B: FieldSpec<f64> = FieldSpec::new("b", numeric);
pub const L1: FieldSpec<f64> = FieldSpec::new("l1", numeric);
pub const L2: FieldSpec<f64> = FieldSpec::new("l2", numeric);
pub const D: FieldSpec<u64> = FieldSpec::new("d", non_negative_u64);
pub const N_EPOCHS: FieldSpec<u64> = FieldSpec::new("n_epochs", non_negative_u64);
pub const INTER: FieldSpec<bool> = FieldSpec::new("inter", boolean);
pub const HASH_TYPE: FieldSpec<HashType> = FieldSpec::new("hash_type", hash_type);
pub const SEED: FieldSpec<u32> = FieldSpec::new("seed", non_negative_u32);

fn numeric(field: &'static str, value: &HostValue) -> ParamResult<f64> {
    match value {
        HostValue::Float(v) => Ok(*v),
        HostValue::Int(v) => Ok(*v as f64),
        other => Err(ParamError::TypeMismatch { field, expected: "numeric", received: other.kind() }),
    }
}

fn integer(field: &'static str, value: &HostValue) -> ParamResult<i128> {
    match value {
        HostValue::Int(v) => Ok(*v),
        other => Err(ParamError::TypeMismatch { field, expected: "integer", received: other.kind() }),
    }
}

fn non_negative(field: &'static str, value: &HostValue) -> ParamResult<i128> {
    let v = integer(field, value)?;
    if v < 0 {
        return Err(ParamError::OutOfRange { field, value: v, reason: "cannot be negative" });
    }
    Ok(v)
}

fn non_negative_u64(field: &'static str, value: &HostValue) -> ParamResult<u64> {
    let v = non_negative(field, value)?;
    u64::try_from(v).map_err(|_| ParamError::OutOfRange {
        field,
        value: v,
        reason: "must fit in 64 bits",
    })
}

fn non_negative_u32(field: &'static str, value: &HostValue) -> ParamResult<u32> {
    let v = non_negative(field, value)?;
    u32::try_from(v).map_err(|_| ParamError::OutOfRange {
        field,
        value: v,
        reason: "must fit in 32 bits",
    })
}

fn boolean(field: &'static str, value: &HostValue) -> ParamResult<bool> {
    match value {
        HostValue::Bool(v) => Ok(*v),
        other => Err(ParamError::TypeMismatch { field, expected: "boolean", received: other.kind() }),
    }
}

fn hash_type(field: &'static str, value: &HostValue) -> ParamResult<HashType> {
    let v = integer(field, value)?;
    i64::try_from(v).ok().and_then(HashType::from_code).ok_or(ParamError::OutOfRange {
        field,
        value: v,
        reason: "must be either `0` or `1` or `2`",
    })
}

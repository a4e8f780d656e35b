//! Construction-time configuration: aggregate bundle XOR individual keywords.
//!
//! Purpose
//! -------
//! Accept the two mutually exclusive ways of configuring a model and turn
//! them into a validated [`FtrlParams`]:
//! - an aggregate `params` bundle carrying all seven bundle fields, or
//! - zero or more individual keywords overlaying the defaults.
//!
//! Key behaviors
//! -------------
//! - [`FtrlConfig`] mirrors what a host passes to a constructor: an optional
//!   bundle plus nine optional keywords. It never validates anything itself.
//! - [`FtrlConfig::resolve`] decides the mode once, up front, producing a
//!   [`ConstructionMode`]; supplying both the bundle and any keyword fails
//!   with [`FtrlError::ConflictingConfig`].
//! - [`ConstructionMode::into_params`] runs field validation and defaulting.
//!
//! Invariants & assumptions
//! ------------------------
//! - A keyword holding `HostValue::None` counts as not supplied.
//! - The aggregate bundle must carry exactly the seven bundle fields; it
//!   cannot carry `hash_type` or `seed`, which keep their defaults in that
//!   mode.
//! - Validation is all-or-nothing: on error no partially built parameter set
//!   escapes.
use crate::ftrl::{
    core::{
        fields,
        params::{FtrlParams, ParamBundle, DEFAULT_PARAMS},
        value::{HostValue, RawBundle},
    },
    errors::{FtrlError, FtrlResult, ParamError, ParamResult},
};

/// Individually supplied keywords; `None` means "use the default".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialParams {
    pub a: Option<HostValue>,
    pub b: Option<HostValue>,
    pub l1: Option<HostValue>,
    pub l2: Option<HostValue>,
    pub d: Option<HostValue>,
    pub n_epochs: Option<HostValue>,
    pub inter: Option<HostValue>,
    pub hash_type: Option<HostValue>,
    pub seed: Option<HostValue>,
}

impl PartialParams {
    /// Names of the keywords that were actually supplied, in canonical order.
    pub fn supplied(&self) -> Vec<&'static str> {
        [
            ("a", &self.a),
            ("b", &self.b),
            ("l1", &self.l1),
            ("l2", &self.l2),
            ("d", &self.d),
            ("n_epochs", &self.n_epochs),
            ("inter", &self.inter),
            ("hash_type", &self.hash_type),
            ("seed", &self.seed),
        ]
        .into_iter()
        .filter(|(_, v)| matches!(v, Some(v) if !v.is_none()))
        .map(|(name, _)| name)
        .collect()
    }

    /// Overlay the supplied keywords onto the defaults.
    pub fn into_params(self) -> ParamResult<FtrlParams> {
        fn overlay<T>(
            spec: fields::FieldSpec<T>, value: Option<HostValue>, default: T,
        ) -> ParamResult<T> {
            match value {
                Some(v) if !v.is_none() => spec.validate(&v),
                _ => Ok(default),
            }
        }

        let d = DEFAULT_PARAMS;
        Ok(FtrlParams {
            a: overlay(fields::A, self.a, d.a)?,
            b: overlay(fields::B, self.b, d.b)?,
            l1: overlay(fields::L1, self.l1, d.l1)?,
            l2: overlay(fields::L2, self.l2, d.l2)?,
            d: overlay(fields::D, self.d, d.d)?,
            n_epochs: overlay(fields::N_EPOCHS, self.n_epochs, d.n_epochs)?,
            inter: overlay(fields::INTER, self.inter, d.inter)?,
            hash_type: overlay(fields::HASH_TYPE, self.hash_type, d.hash_type)?,
            seed: overlay(fields::SEED, self.seed, d.seed)?,
        })
    }
}

/// Validate a raw aggregate bundle into a typed [`ParamBundle`].
///
/// Errors
/// ------
/// - `ParamError::UnknownField` for any name outside the seven bundle fields
///   (checked first, in sorted name order).
/// - `ParamError::MissingField` for the first absent field in canonical order.
/// - Field-level `TypeMismatch` / `OutOfRange` errors.
pub fn validate_bundle(raw: &RawBundle) -> ParamResult<ParamBundle> {
    if let Some(unknown) = raw.names().find(|n| !ParamBundle::FIELDS.iter().any(|f| f == n)) {
        return Err(ParamError::UnknownField { field: unknown.to_string() });
    }

    fn field<T>(raw: &RawBundle, spec: fields::FieldSpec<T>) -> ParamResult<T> {
        let value = raw.get(spec.name()).ok_or(ParamError::MissingField { field: spec.name() })?;
        spec.validate(value)
    }

    Ok(ParamBundle {
        a: field(raw, fields::A)?,
        b: field(raw, fields::B)?,
        l1: field(raw, fields::L1)?,
        l2: field(raw, fields::L2)?,
        d: field(raw, fields::D)?,
        n_epochs: field(raw, fields::N_EPOCHS)?,
        inter: field(raw, fields::INTER)?,
    })
}

/// The resolved construction mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionMode {
    Aggregate(RawBundle),
    Individual(PartialParams),
}

impl ConstructionMode {
    /// Validate and default into a full parameter set.
    pub fn into_params(self) -> ParamResult<FtrlParams> {
        match self {
            ConstructionMode::Aggregate(raw) => {
                let bundle = validate_bundle(&raw)?;
                let mut params = DEFAULT_PARAMS;
                params.apply_bundle(&bundle);
                Ok(params)
            }
            ConstructionMode::Individual(partial) => partial.into_params(),
        }
    }
}

/// Constructor input as supplied by the host.
///
/// Examples
/// --------
/// ```rust
/// # use rust_ftrl::ftrl::core::config::FtrlConfig;
/// let params = FtrlConfig::new().d(50).n_epochs(3).build_params().unwrap();
/// assert_eq!(params.d, 50);
/// assert_eq!(params.n_epochs, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtrlConfig {
    pub params: Option<RawBundle>,
    pub fields: PartialParams,
}

macro_rules! keyword_setters {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Supply the `", stringify!($name), "` keyword.")]
            pub fn $name(mut self, value: impl Into<HostValue>) -> FtrlConfig {
                self.fields.$name = Some(value.into());
                self
            }
        )*
    };
}

impl FtrlConfig {
    pub fn new() -> FtrlConfig {
        FtrlConfig::default()
    }

    /// Supply the aggregate `params` bundle.
    pub fn params(mut self, bundle: impl Into<RawBundle>) -> FtrlConfig {
        self.params = Some(bundle.into());
        self
    }

    keyword_setters!(a, b, l1, l2, d, n_epochs, inter, hash_type, seed);

    /// Decide which construction mode applies.
    ///
    /// Errors
    /// ------
    /// - `FtrlError::ConflictingConfig` naming every supplied keyword when the
    ///   aggregate bundle was supplied as well.
    pub fn resolve(self) -> FtrlResult<ConstructionMode> {
        match self.params {
            Some(bundle) => {
                let conflicts = self.fields.supplied();
                if !conflicts.is_empty() {
                    return Err(FtrlError::ConflictingConfig { fields: conflicts });
                }
                Ok(ConstructionMode::Aggregate(bundle))
            }
            None => Ok(ConstructionMode::Individual(self.fields)),
        }
    }

    /// Resolve and validate in one step.
    pub fn build_params(self) -> FtrlResult<FtrlParams> {
        Ok(self.resolve()?.into_params()?)
    }
}

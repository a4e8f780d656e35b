//! core — parameter, value and model-state building blocks.
//!
//! Purpose
//! -------
//! Hold everything the FTRL model needs besides the learner itself: dynamic
//! host values, typed parameters and their per-field validators, constructor
//! resolution, the feature hash functions, and the `z`/`n` model codec.
//!
//! Key behaviors
//! -------------
//! - [`value`] defines [`HostValue`] / [`RawBundle`], the untyped inputs that
//!   arrive from a host language or from JSON.
//! - [`fields`] validates one [`HostValue`] into one typed field.
//! - [`params`] carries the typed [`FtrlParams`] and the seven-field
//!   [`ParamBundle`] plus the default values.
//! - [`config`] resolves constructor input into exactly one
//!   [`ConstructionMode`] and then into [`FtrlParams`].
//! - [`hashing`] implements the three feature hash functions.
//! - [`codec`] exports and validates the model frame.
//!
//! Conventions
//! -----------
//! - Validation never mutates anything; callers apply a value only after it
//!   was returned as `Ok`.
//! - No logging happens here. The model controller logs state changes.

pub mod codec;
pub mod config;
pub mod fields;
pub mod hashing;
pub mod params;
pub mod value;

pub use self::codec::{MODEL_COLUMNS, export_model, import_model, validate_model_frame};
pub use self::config::{ConstructionMode, FtrlConfig, PartialParams, validate_bundle};
pub use self::fields::FieldSpec;
pub use self::params::{DEFAULT_PARAMS, FtrlParams, HashType, ParamBundle};
pub use self::value::{HostValue, RawBundle, ValueKind};

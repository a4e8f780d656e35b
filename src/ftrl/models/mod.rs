//! models — the user-facing FTRL model controller.
//!
//! [`FtrlModel`] owns the parameters, the learner and the
//! [`LifecycleState`], and is the only type that mutates them.

pub mod ftrl_model;

pub use self::ftrl_model::{FtrlModel, LifecycleState};

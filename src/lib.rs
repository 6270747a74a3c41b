//! Runtime type-checking wrappers.
//!
//! Decorate a dynamic callable so every call validates its arguments and
//! return value against declared hints, short-circuiting on the first
//! violation. A [`hint::RawHint`] classifies into a [`hint::Sign`], compiles
//! into a [`hint::CompiledNode`], and an ordered sequence of those forms a
//! [`plan::CheckPlan`] that a [`wrapper::CheckedFn`] walks on every call.
//! [`decor::decorate`] is the entry point.

pub mod config;
pub mod decor;
pub mod error;
pub mod hint;
pub mod plan;
pub mod registry;
pub mod repr;
pub mod signature;
pub mod validator;
pub mod value;
pub mod wrapper;

pub use config::CheckerConfig;
pub use decor::decorate;
pub use error::{CallError, DecorError};
pub use hint::{RawHint, Sign};
pub use plan::NONE_RETURN_TYPE_NAME;
pub use registry::TypeDescriptor;
pub use signature::{Param, ParamKind, Signature};
pub use value::{AttrSource, Value};
pub use wrapper::{CallArgs, CheckedFn};

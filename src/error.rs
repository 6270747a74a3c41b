//! Error taxonomy.
//!
//! Plain structs plus a manual `Display`/`Error` impl, split into two enums
//! along the decoration-time/call-time line: [`DecorError`] and
//! [`CallError`]. The `ForwardRef` variant straddles both: named as a
//! `DecorError` variant structurally, but nothing stops a caller from
//! deferring its construction to first call (see `plan.rs`).

use std::fmt::{self, Display};

use crate::hint::Sign;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorError {
    /// A hint is structurally malformed.
    InvalidHint { label: String, detail: String },
    /// A parameter name collides with the wrapper's reserved prefix.
    InvalidParamName { name: String },
    /// An assembled check plan violated an invariant the builder could not
    /// itself repair; the plan's debug dump is embedded for diagnosis.
    Parse { label: String, plan_debug: String },
    /// A forward reference resolved at decoration validation time but to
    /// something that is not a usable type.
    ForwardRef { label: String, name: String },
    /// `NewType` wraps a hint that itself fails validation.
    NewType { label: String, detail: String },
    /// `Generic` shape is malformed (e.g. an origin with no erasable base).
    Generic { label: String, detail: String },
    /// A compositional validator (`IsAttr`, conjunction, ...) was built from
    /// malformed parts.
    Sub { label: String, detail: String },
}

impl Display for DecorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecorError::InvalidHint { label, detail } => {
                write!(f, "{label}: invalid hint ({detail})")
            }
            DecorError::InvalidParamName { name } => {
                write!(f, "parameter \"{name}\" reserved for use by runtype")
            }
            DecorError::Parse { label, plan_debug } => {
                write!(f, "{label}: wrapper plan rejected:\n{plan_debug}")
            }
            DecorError::ForwardRef { label, name } => {
                write!(f, "{label}: forward reference \"{name}\" did not resolve to a type")
            }
            DecorError::NewType { label, detail } => {
                write!(f, "{label}: invalid new-type alias ({detail})")
            }
            DecorError::Generic { label, detail } => {
                write!(f, "{label}: invalid generic hint ({detail})")
            }
            DecorError::Sub { label, detail } => {
                write!(f, "{label}: invalid compositional validator ({detail})")
            }
        }
    }
}

impl std::error::Error for DecorError {}

impl DecorError {
    pub fn invalid_hint(label: impl Into<String>, sign: Option<Sign>, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if let Some(sign) = sign {
            detail = format!("{detail} (sign: {sign:?})");
        }
        DecorError::InvalidHint { label: label.into(), detail }
    }
}

/// Errors raised by a [`crate::wrapper::CheckedFn`] on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// An argument violated its parameter's hint.
    ParamType {
        func_name: String,
        param_name: String,
        expected: String,
        value_repr: String,
    },
    /// The return value violated the return hint.
    ReturnType {
        func_name: String,
        expected: String,
        value_repr: String,
    },
    /// A forward reference failed to resolve the first time it was needed.
    ForwardRef { func_name: String, name: String },
}

impl Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::ParamType { func_name, param_name, expected, value_repr } => write!(
                f,
                "{func_name}() parameter \"{param_name}\" violates type hint {expected}, received {value_repr}"
            ),
            CallError::ReturnType { func_name, expected, value_repr } => write!(
                f,
                "{func_name}() return violates type hint {expected}, received {value_repr}"
            ),
            CallError::ForwardRef { func_name, name } => write!(
                f,
                "{func_name}() forward reference \"{name}\" did not resolve to a type"
            ),
        }
    }
}

impl std::error::Error for CallError {}

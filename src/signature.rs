//! The `Signature` view.
//!
//! Real signature introspection — pulling parameter names, kinds, defaults,
//! and annotations off a live function object — is out of scope. This
//! module only defines the structured shape an external collaborator is
//! expected to hand the core; nothing here derives a `Signature` from a
//! function pointer.

use std::sync::Arc;

use crate::hint::RawHint;

/// Prefix reserved for the wrapper's own captured state: parameters of the
/// wrapped callable must not begin with it.
pub const RESERVED_PREFIX: &str = "__runtype_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    PositionalOrKeyword,
    KeywordOnly,
    VarPositional,
    VarKeyword,
    PositionalOnly,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub hint: Option<Arc<RawHint>>,
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Param { name: name.into(), kind, hint: None, has_default: false }
    }

    pub fn with_hint(mut self, hint: RawHint) -> Self {
        self.hint = Some(Arc::new(hint));
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub return_hint: Option<Arc<RawHint>>,
}

impl Signature {
    pub fn new(params: Vec<Param>) -> Self {
        Signature { params, return_hint: None }
    }

    pub fn with_return_hint(mut self, hint: RawHint) -> Self {
        self.return_hint = Some(Arc::new(hint));
        self
    }
}

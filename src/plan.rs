//! Building a [`CheckPlan`] from a [`Signature`].
//!
//! This is the ordering half of the retargeted code synthesizer: hints
//! compile into [`crate::hint::CompiledNode`]s (see `hint::compile`), and
//! this module arranges them into a fixed sequence — declaration order
//! across parameters, resolution before check within a parameter, checks
//! before the call, the return check after the call — without ever
//! emitting a string to evaluate.

use crate::config::CheckerConfig;
use crate::error::DecorError;
use crate::hint::{classify_cached, compile_hint, CompiledNode, RawHint, Sign};
use crate::signature::{ParamKind, Signature, RESERVED_PREFIX};

/// The "returns nothing" marker. Rather than a dedicated `Sign`, a `-> None`
/// contract is just `Class(TypeDescriptor::of::<()>(..))` under the
/// conventional name below — recognized here so it can default to "no
/// check", while still being a perfectly ordinary, checkable `Class` hint
/// when [`CheckerConfig::strict_none_return`] is set.
pub const NONE_RETURN_TYPE_NAME: &str = "NoneType";

fn is_none_return_marker(hint: &RawHint) -> bool {
    matches!(hint, RawHint::Class(td) if td.name() == NONE_RETURN_TYPE_NAME)
}

/// A single parameter's compiled check plus everything needed to find its
/// value at call time and label a failure.
pub struct ParamCheck {
    pub name: String,
    pub kind: ParamKind,
    /// Declaration index; used for positional lookup and for the
    /// `*args` variadic tail.
    pub index: usize,
    pub node: Box<dyn CompiledNode>,
}

pub struct ReturnCheck {
    pub node: Box<dyn CompiledNode>,
}

/// The compiled, ordered replacement for a generated source string.
pub struct CheckPlan {
    pub func_name: String,
    pub param_checks: Vec<ParamCheck>,
    pub return_check: Option<ReturnCheck>,
}

impl std::fmt::Debug for CheckPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.debug_dump())
    }
}

pub fn build_plan(
    func_name: &str,
    signature: &Signature,
    config: &CheckerConfig,
) -> Result<CheckPlan, DecorError> {
    let mut param_checks = Vec::new();

    for (index, param) in signature.params.iter().enumerate() {
        if param.name.starts_with(RESERVED_PREFIX) {
            return Err(DecorError::InvalidParamName { name: param.name.clone() });
        }

        if matches!(param.kind, ParamKind::PositionalOnly) && !config.check_positional_only {
            continue;
        }
        if matches!(param.kind, ParamKind::VarKeyword) && !config.check_var_keyword {
            continue;
        }

        let Some(hint) = &param.hint else { continue };
        if classify_cached(hint) == Sign::Ignorable {
            continue;
        }

        let label = format!("{func_name}() parameter \"{}\" type annotation", param.name);
        if let Some(node) = compile_hint(hint, &label, config)? {
            param_checks.push(ParamCheck { name: param.name.clone(), kind: param.kind, index, node });
        }
    }

    let return_check = match &signature.return_hint {
        Some(hint) if is_none_return_marker(hint) && !config.strict_none_return => None,
        Some(hint) if classify_cached(hint) == Sign::Ignorable => None,
        Some(hint) => {
            let label = format!("{func_name}() return type annotation");
            compile_hint(hint, &label, config)?.map(|node| ReturnCheck { node })
        }
        None => None,
    };

    Ok(CheckPlan { func_name: func_name.to_string(), param_checks, return_check })
}

impl CheckPlan {
    pub fn debug_dump(&self) -> String {
        let params: Vec<String> = self
            .param_checks
            .iter()
            .map(|p| format!("{}: {}", p.name, p.node.describe()))
            .collect();
        let ret = self.return_check.as_ref().map(|r| r.node.describe()).unwrap_or_else(|| "<unchecked>".to_string());
        format!("{}({}) -> {}", self.func_name, params.join(", "), ret)
    }
}

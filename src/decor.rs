//! The public entry point: `decorate`.
//!
//! Validate the signature, build a check plan, wrap the callable. The one
//! behavior this module adds beyond what `plan::build_plan` and
//! `wrapper::CheckedFn` already provide is the runtime-disable switch.

use once_cell::sync::OnceCell;

use crate::config::CheckerConfig;
use crate::error::DecorError;
use crate::plan::{build_plan, CheckPlan};
use crate::signature::Signature;
use crate::wrapper::{CheckedFn, Decoratee};

static DISABLED: OnceCell<bool> = OnceCell::new();

/// Read once per process, not once per call.
fn runtime_disabled() -> bool {
    *DISABLED.get_or_init(|| {
        let disabled = std::env::var("RUNTYPE_DISABLE").is_ok();
        if disabled {
            log::info!("runtype disabled for this process (RUNTYPE_DISABLE set)");
        }
        disabled
    })
}

fn empty_plan(func_name: &str) -> CheckPlan {
    CheckPlan { func_name: func_name.to_string(), param_checks: Vec::new(), return_check: None }
}

/// Decorate a callable: build a check plan from `signature` and wrap `func`
/// so every call is validated against it. Decorating an already-`CheckedFn`
/// value is a no-op; the distinction is made at compile time via
/// [`Decoratee`], not a runtime marker.
pub fn decorate(
    name: impl Into<String>,
    doc: Option<String>,
    module: Option<String>,
    signature: &Signature,
    config: &CheckerConfig,
    func: impl Into<Decoratee>,
) -> Result<CheckedFn, DecorError> {
    let name = name.into();

    let raw = match func.into() {
        Decoratee::Checked(already) => return Ok(already),
        Decoratee::Raw(raw) => raw,
    };

    log::trace!("decorating \"{name}\"");

    if runtime_disabled() {
        let plan = empty_plan(&name);
        return Ok(CheckedFn::from_arc(name, doc, module, plan, raw));
    }

    let plan = build_plan(&name, signature, config)?;
    log::debug!("built check plan for \"{name}\": {}", plan.debug_dump());
    Ok(CheckedFn::from_arc(name, doc, module, plan, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::RawHint;
    use crate::registry::TypeDescriptor;
    use crate::signature::{Param, ParamKind};
    use crate::value::Value;
    use crate::wrapper::CallArgs;

    #[test]
    fn decorating_an_unhinted_signature_yields_a_pass_through_checked_fn() {
        let signature = Signature::new(vec![]);
        let checked = decorate("f", None, None, &signature, &CheckerConfig::default(), |args: CallArgs| {
            Ok(args.positional.into_iter().next().unwrap())
        })
        .unwrap();
        let result = checked.call(CallArgs::positional_only(vec![Value::new(7i64)])).unwrap();
        assert!(result.downcast_ref::<i64>().is_some());
    }

    #[test]
    fn decorating_twice_is_idempotent() {
        let signature = Signature::new(vec![Param::new("x", ParamKind::PositionalOrKeyword)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")))]);
        let config = CheckerConfig::default();
        let checked = decorate("f", None, None, &signature, &config, |args: CallArgs| {
            Ok(args.positional[0].clone())
        })
        .unwrap();

        let redecorated = decorate("f", None, None, &signature, &config, checked.clone())
            .unwrap_or_else(|_| panic!("re-decorating a CheckedFn must not fail"));
        assert_eq!(redecorated.name(), "f");
    }

    #[test]
    fn rejects_reserved_param_name_at_decoration_time() {
        let signature = Signature::new(vec![Param::new(
            format!("{}oops", crate::signature::RESERVED_PREFIX),
            ParamKind::PositionalOrKeyword,
        )]);
        let err = decorate("f", None, None, &signature, &CheckerConfig::default(), |args: CallArgs| {
            Ok(args.positional[0].clone())
        })
        .unwrap_err();
        assert!(matches!(err, DecorError::InvalidParamName { .. }));
    }
}

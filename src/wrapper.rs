//! The wrapper instantiator: `CheckedFn`.
//!
//! `CheckedFn` is the crate's public callable type — the decorated function
//! object. It owns the wrapped callable behind an `Arc<dyn Fn(..) -> ..>`
//! rather than generating a wrapper function body to evaluate; calling it
//! walks the `CheckPlan` built once at decoration time (see `plan.rs`),
//! short-circuiting on the first failing check.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CallError;
use crate::hint::CheckOutcome;
use crate::plan::{CheckPlan, ParamCheck};
use crate::repr::trim_repr;
use crate::signature::ParamKind;
use crate::value::Value;

/// The arguments bound to one call, already split into positional and
/// keyword groups. Building this split from a live call site is a
/// collaborator's job, out of scope here.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keyword: HashMap<String, Value>,
}

impl CallArgs {
    pub fn new(positional: Vec<Value>, keyword: HashMap<String, Value>) -> Self {
        CallArgs { positional, keyword }
    }

    pub fn positional_only(values: Vec<Value>) -> Self {
        CallArgs { positional: values, keyword: HashMap::new() }
    }
}

type WrappedFn = Arc<dyn Fn(CallArgs) -> Result<Value, CallError> + Send + Sync>;

/// A decorated callable: the wrapped function plus the compiled check plan
/// that runs around every call.
#[derive(Clone)]
pub struct CheckedFn {
    name: String,
    doc: Option<String>,
    module: Option<String>,
    plan: Arc<CheckPlan>,
    func: WrappedFn,
}

impl std::fmt::Debug for CheckedFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckedFn").field("name", &self.name).field("plan", &*self.plan).finish()
    }
}

impl CheckedFn {
    pub fn new(
        name: impl Into<String>,
        doc: Option<String>,
        module: Option<String>,
        plan: CheckPlan,
        func: impl Fn(CallArgs) -> Result<Value, CallError> + Send + Sync + 'static,
    ) -> Self {
        Self::from_arc(name, doc, module, plan, Arc::new(func))
    }

    pub(crate) fn from_arc(
        name: impl Into<String>,
        doc: Option<String>,
        module: Option<String>,
        plan: CheckPlan,
        func: WrappedFn,
    ) -> Self {
        CheckedFn { name: name.into(), doc, module, plan: Arc::new(plan), func }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn plan(&self) -> &CheckPlan {
        &self.plan
    }

    /// Run every parameter check in declaration order, call the wrapped
    /// function, then run the return check.
    pub fn call(&self, args: CallArgs) -> Result<Value, CallError> {
        for check in &self.plan.param_checks {
            for (value, index) in bound_values(check, &args) {
                self.run_check(check.node.check(&value), &check.name, index, &value)?;
            }
        }

        let result = (self.func)(args)?;

        if let Some(return_check) = &self.plan.return_check {
            match return_check.node.check(&result) {
                CheckOutcome::Ok => {}
                CheckOutcome::Mismatch => {
                    return Err(CallError::ReturnType {
                        func_name: self.name.clone(),
                        expected: return_check.node.describe(),
                        value_repr: trim_repr(&result),
                    });
                }
                CheckOutcome::UnresolvedForwardRef(name) => {
                    return Err(CallError::ForwardRef { func_name: self.name.clone(), name });
                }
            }
        }

        Ok(result)
    }

    fn run_check(
        &self,
        outcome: CheckOutcome,
        param_name: &str,
        index: Option<usize>,
        value: &Value,
    ) -> Result<(), CallError> {
        match outcome {
            CheckOutcome::Ok => Ok(()),
            CheckOutcome::Mismatch => Err(CallError::ParamType {
                func_name: self.name.clone(),
                param_name: variadic_label(param_name, index),
                expected: self.node_describe_for(param_name),
                value_repr: trim_repr(value),
            }),
            CheckOutcome::UnresolvedForwardRef(name) => {
                Err(CallError::ForwardRef { func_name: self.name.clone(), name })
            }
        }
    }

    fn node_describe_for(&self, param_name: &str) -> String {
        self.plan
            .param_checks
            .iter()
            .find(|c| c.name == param_name)
            .map(|c| c.node.describe())
            .unwrap_or_default()
    }
}

fn variadic_label(param_name: &str, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("{param_name}[{i}]"),
        None => param_name.to_string(),
    }
}

/// Resolve the value(s) bound to one parameter check, paired with a
/// variadic index for `VarPositional` so a failure names the offending
/// element.
fn bound_values(check: &ParamCheck, args: &CallArgs) -> Vec<(Value, Option<usize>)> {
    match check.kind {
        ParamKind::PositionalOrKeyword | ParamKind::PositionalOnly => args
            .positional
            .get(check.index)
            .cloned()
            .or_else(|| args.keyword.get(&check.name).cloned())
            .into_iter()
            .map(|v| (v, None))
            .collect(),
        ParamKind::KeywordOnly => {
            args.keyword.get(&check.name).cloned().into_iter().map(|v| (v, None)).collect()
        }
        ParamKind::VarPositional => args
            .positional
            .iter()
            .skip(check.index)
            .enumerate()
            .map(|(i, v)| (v.clone(), Some(i)))
            .collect(),
        ParamKind::VarKeyword => {
            args.keyword.values().cloned().map(|v| (v, None)).collect()
        }
    }
}

/// What [`crate::decor::decorate`] was handed: a raw callable still needing
/// a plan built around it, or an already-`CheckedFn` value. Distinguishing
/// these at the type level (via the `From` impls below) is what lets
/// `decorate` return an already-decorated function unchanged without a
/// runtime marker attribute.
pub enum Decoratee {
    Raw(WrappedFn),
    Checked(CheckedFn),
}

impl<F> From<F> for Decoratee
where
    F: Fn(CallArgs) -> Result<Value, CallError> + Send + Sync + 'static,
{
    fn from(func: F) -> Self {
        Decoratee::Raw(Arc::new(func))
    }
}

impl From<CheckedFn> for Decoratee {
    fn from(checked: CheckedFn) -> Self {
        Decoratee::Checked(checked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;
    use crate::hint::RawHint;
    use crate::plan::build_plan;
    use crate::registry::TypeDescriptor;
    use crate::signature::{Param, Signature};

    fn make_plan(sig: &Signature) -> CheckPlan {
        build_plan("f", sig, &CheckerConfig::default()).unwrap()
    }

    #[test]
    fn matching_args_pass_through_to_the_wrapped_fn() {
        let sig = Signature::new(vec![Param::new("x", ParamKind::PositionalOrKeyword)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")))]);
        let plan = make_plan(&sig);
        let checked = CheckedFn::new("f", None, None, plan, |args: CallArgs| {
            Ok(args.positional[0].clone())
        });
        let result = checked.call(CallArgs::positional_only(vec![Value::new(3i64)]));
        assert!(result.is_ok());
    }

    #[test]
    fn mismatched_param_short_circuits_before_the_call() {
        let sig = Signature::new(vec![Param::new("x", ParamKind::PositionalOrKeyword)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")))]);
        let plan = make_plan(&sig);
        let checked = CheckedFn::new("f", None, None, plan, |_: CallArgs| {
            panic!("wrapped fn must not run when a param check fails")
        });
        let err = checked.call(CallArgs::positional_only(vec![Value::new("nope")])).unwrap_err();
        assert!(matches!(err, CallError::ParamType { ref param_name, .. } if param_name == "x"));
    }

    #[test]
    fn mismatched_return_is_reported_after_the_call() {
        let sig = Signature::new(vec![]).with_return_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")));
        let plan = make_plan(&sig);
        let checked = CheckedFn::new("f", None, None, plan, |_: CallArgs| Ok(Value::new("not an int")));
        let err = checked.call(CallArgs::default()).unwrap_err();
        assert!(matches!(err, CallError::ReturnType { .. }));
    }

    #[test]
    fn variadic_positional_failure_identifies_its_index() {
        let sig = Signature::new(vec![Param::new("args", ParamKind::VarPositional)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")))]);
        let plan = make_plan(&sig);
        let checked = CheckedFn::new("f", None, None, plan, |_: CallArgs| Ok(Value::new(())));
        let args = CallArgs::positional_only(vec![Value::new(1i64), Value::new("bad"), Value::new(3i64)]);
        let err = checked.call(args).unwrap_err();
        match err {
            CallError::ParamType { param_name, .. } => assert_eq!(param_name, "args[1]"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn checked_fn_converts_to_a_decoratee_as_already_checked() {
        let plan = make_plan(&Signature::new(vec![]));
        let checked = CheckedFn::new("f", None, None, plan, |_: CallArgs| Ok(Value::new(())));
        match Decoratee::from(checked.clone()) {
            Decoratee::Checked(c) => assert_eq!(c.name(), "f"),
            Decoratee::Raw(_) => panic!("a CheckedFn must convert to Decoratee::Checked"),
        }
    }
}

//! Compiling a validated [`RawHint`] into a [`CompiledNode`].
//!
//! Each hint compiles once, at decoration time, into a small tree of
//! pre-built check closures that the wrapper walks at call time, rather than
//! emitting a source fragment to evaluate on every call. `NameRef`/
//! `ForwardRef` nodes own a `OnceCell<TypeDescriptor>`: the first call
//! resolves and caches the referenced type; every subsequent call reuses it.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::{CheckerConfig, DottedAttrMode};
use crate::error::DecorError;
use crate::registry::{self, TypeDescriptor};
use crate::validator::{IsAttr, Validator};
use crate::value::Value;

use super::{classify, is_ignorable, validate_hint, GenericOrigin, RawHint};

/// Outcome of running a compiled node against a value at call time.
pub enum CheckOutcome {
    Ok,
    Mismatch,
    /// The name resolved to nothing usable; surfaced as `CallError::ForwardRef`
    /// rather than a type mismatch.
    UnresolvedForwardRef(String),
}

/// A compiled check: a validator baked into a standalone node.
pub trait CompiledNode: Send + Sync {
    fn check(&self, value: &Value) -> CheckOutcome;
    /// Description of the expected shape, for error messages. May only be
    /// fully known after a `NameRef`/`ForwardRef` first resolves.
    fn describe(&self) -> String;
}

struct ClassNode(TypeDescriptor);

impl CompiledNode for ClassNode {
    fn check(&self, value: &Value) -> CheckOutcome {
        if self.0.is_instance(value) { CheckOutcome::Ok } else { CheckOutcome::Mismatch }
    }

    fn describe(&self) -> String {
        self.0.name().to_string()
    }
}

struct NameRefNode {
    name: String,
    cache: OnceCell<TypeDescriptor>,
}

impl NameRefNode {
    fn resolve(&self) -> Option<&TypeDescriptor> {
        self.cache.get_or_try_init(|| registry::resolve(&self.name).ok_or(())).ok()
    }
}

impl CompiledNode for NameRefNode {
    fn check(&self, value: &Value) -> CheckOutcome {
        match self.resolve() {
            Some(descriptor) if descriptor.is_instance(value) => CheckOutcome::Ok,
            Some(_) => CheckOutcome::Mismatch,
            None => {
                log::warn!("forward reference \"{}\" did not resolve", self.name);
                CheckOutcome::UnresolvedForwardRef(self.name.clone())
            }
        }
    }

    fn describe(&self) -> String {
        match self.resolve() {
            Some(descriptor) => descriptor.name().to_string(),
            None => self.name.clone(),
        }
    }
}

enum TupleItem {
    Class(TypeDescriptor),
    Name(NameRefNode),
}

impl TupleItem {
    fn resolve(&self) -> Option<&TypeDescriptor> {
        match self {
            TupleItem::Class(td) => Some(td),
            TupleItem::Name(node) => node.resolve(),
        }
    }

    fn describe(&self) -> String {
        match self {
            TupleItem::Class(td) => td.name().to_string(),
            TupleItem::Name(node) => node.describe(),
        }
    }
}

/// `Tuple`/`Union` both reduce to "instance of any listed type" for
/// instance-check purposes; they share this node, keeping their `Sign`-level
/// distinction only in the classifier above this layer.
struct AnyOfNode {
    items: Vec<TupleItem>,
}

impl CompiledNode for AnyOfNode {
    fn check(&self, value: &Value) -> CheckOutcome {
        let mut saw_unresolved = None;
        for item in &self.items {
            match item.resolve() {
                Some(descriptor) => {
                    if descriptor.is_instance(value) {
                        return CheckOutcome::Ok;
                    }
                }
                None => {
                    if saw_unresolved.is_none() {
                        if let TupleItem::Name(node) = item {
                            saw_unresolved = Some(node.name.clone());
                        }
                    }
                }
            }
        }
        match saw_unresolved {
            Some(name) => CheckOutcome::UnresolvedForwardRef(name),
            None => CheckOutcome::Mismatch,
        }
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.items.iter().map(TupleItem::describe).collect();
        format!("({})", parts.join(" | "))
    }
}

struct ValidatorNode {
    validator: Arc<dyn Validator>,
    label: String,
}

impl CompiledNode for ValidatorNode {
    fn check(&self, value: &Value) -> CheckOutcome {
        if self.validator.is_valid(value) { CheckOutcome::Ok } else { CheckOutcome::Mismatch }
    }

    fn describe(&self) -> String {
        self.validator.describe(&self.label)
    }
}

struct NewTypeNode {
    name: String,
    inner: Box<dyn CompiledNode>,
}

impl CompiledNode for NewTypeNode {
    fn check(&self, value: &Value) -> CheckOutcome {
        self.inner.check(value)
    }

    fn describe(&self) -> String {
        format!("{} (= {})", self.name, self.inner.describe())
    }
}

/// Compile a validated hint into a check node. Returns `Ok(None)` when the
/// hint is ignorable and generates no check at all.
pub fn compile_hint(
    hint: &RawHint,
    label: &str,
    config: &CheckerConfig,
) -> Result<Option<Box<dyn CompiledNode>>, DecorError> {
    if is_ignorable(hint) {
        return Ok(None);
    }

    validate_hint(hint, label, true)?;

    let node: Box<dyn CompiledNode> = match hint {
        RawHint::Class(td) => Box::new(ClassNode(td.clone())),
        RawHint::Name(name) => Box::new(NameRefNode { name: name.clone(), cache: OnceCell::new() }),
        RawHint::ForwardRef(name) => Box::new(NameRefNode { name: name.clone(), cache: OnceCell::new() }),
        RawHint::Tuple(items) => Box::new(AnyOfNode { items: compile_tuple_items(items, label)? }),
        RawHint::Union(children) => Box::new(AnyOfNode { items: compile_tuple_items(children, label)? }),
        RawHint::Generic { origin, .. } => match origin {
            GenericOrigin::Erased(td) => Box::new(ClassNode(td.clone())),
            GenericOrigin::UniversalMarker => {
                return Err(DecorError::Generic {
                    label: label.to_string(),
                    detail: "universal Generic marker with non-type-variable arguments has no erasable base".to_string(),
                });
            }
        },
        RawHint::NewType { name, alias_of } => match compile_hint(alias_of, label, config)? {
            Some(inner) => Box::new(NewTypeNode { name: name.clone(), inner }),
            None => return Ok(None),
        },
        RawHint::AttrValidator { name, inner } => {
            if name.contains('.') && config.dotted_attr_mode == DottedAttrMode::Reject {
                return Err(DecorError::Sub {
                    label: label.to_string(),
                    detail: format!("dotted attribute path \"{name}\" rejected by configuration"),
                });
            }
            let is_attr = IsAttr::new(name.clone(), inner.clone())
                .map_err(|detail| DecorError::Sub { label: label.to_string(), detail })?;
            Box::new(ValidatorNode { validator: Arc::new(is_attr), label: label.to_string() })
        }
        RawHint::Equality(validator) | RawHint::UserPredicate(validator) => {
            Box::new(ValidatorNode { validator: validator.clone(), label: label.to_string() })
        }
        RawHint::Any | RawHint::TypeVar(_) => unreachable!("ignorable hints are filtered above"),
    };

    Ok(Some(node))
}

fn compile_tuple_items(items: &[RawHint], label: &str) -> Result<Vec<TupleItem>, DecorError> {
    items
        .iter()
        .map(|item| match item {
            RawHint::Class(td) => Ok(TupleItem::Class(td.clone())),
            RawHint::Name(name) | RawHint::ForwardRef(name) => {
                Ok(TupleItem::Name(NameRefNode { name: name.clone(), cache: OnceCell::new() }))
            }
            other => Err(DecorError::invalid_hint(
                label,
                Some(classify(other)),
                "neither a class nor a name reference",
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{self as reg, TypeDescriptor};

    #[test]
    fn ignorable_hint_compiles_to_none() {
        let config = CheckerConfig::default();
        assert!(compile_hint(&RawHint::Any, "x", &config).unwrap().is_none());
    }

    #[test]
    fn class_hint_checks_instance() {
        let config = CheckerConfig::default();
        let hint = RawHint::Class(TypeDescriptor::of::<i64>("int"));
        let node = compile_hint(&hint, "x", &config).unwrap().unwrap();
        assert!(matches!(node.check(&Value::new(3i64)), CheckOutcome::Ok));
        assert!(matches!(node.check(&Value::new("nope")), CheckOutcome::Mismatch));
    }

    #[test]
    fn name_ref_resolves_lazily_and_caches() {
        #[derive(Debug)]
        struct Widget;
        reg::register("compile_tests.Widget", TypeDescriptor::of::<Widget>("Widget"));
        let config = CheckerConfig::default();
        let hint = RawHint::Name("compile_tests.Widget".into());
        let node = compile_hint(&hint, "x", &config).unwrap().unwrap();
        assert!(matches!(node.check(&Value::new(Widget)), CheckOutcome::Ok));
        assert!(matches!(node.check(&Value::new(1i64)), CheckOutcome::Mismatch));
    }

    #[test]
    fn unresolved_name_ref_reports_forward_ref() {
        let config = CheckerConfig::default();
        let hint = RawHint::Name("compile_tests.DoesNotExist".into());
        let node = compile_hint(&hint, "x", &config).unwrap().unwrap();
        assert!(matches!(node.check(&Value::new(1i64)), CheckOutcome::UnresolvedForwardRef(_)));
    }

    #[test]
    fn tuple_passes_if_any_member_matches() {
        let config = CheckerConfig::default();
        let hint = RawHint::Tuple(vec![
            RawHint::Class(TypeDescriptor::of::<i64>("int")),
            RawHint::Class(TypeDescriptor::of::<String>("str")),
        ]);
        let node = compile_hint(&hint, "x", &config).unwrap().unwrap();
        assert!(matches!(node.check(&Value::new(3i64)), CheckOutcome::Ok));
        assert!(matches!(node.check(&Value::new("s".to_string())), CheckOutcome::Ok));
        assert!(matches!(node.check(&Value::new(3.0f64)), CheckOutcome::Mismatch));
    }

    #[test]
    fn empty_tuple_is_rejected_at_compile_time() {
        let config = CheckerConfig::default();
        let hint = RawHint::Tuple(vec![]);
        assert!(compile_hint(&hint, "x", &config).is_err());
    }
}

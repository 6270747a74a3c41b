//! The validator algebra.
//!
//! Each validator exposes an eager predicate and a `describe()` fragment;
//! conjunction/disjunction/negation compose both, merging captured scopes
//! with duplicate-key detection. Nothing downstream evaluates `describe()`
//! as code — it remains the structure a composite validator's error
//! messages and `Debug` output are built from.

mod attr;
mod leaf;

pub use attr::IsAttr;
pub use leaf::{Equality, Predicate};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Named values a composite validator's `describe()` output refers to.
/// Grounded in `_valeisobj.py`'s `is_valid_code_locals` dict: merging two
/// validators' scopes allows duplicate keys only when the values are
/// identical, and rejects a genuine clash.
#[derive(Clone, Default)]
pub struct CapturedScope(HashMap<String, Arc<dyn Any + Send + Sync>>);

impl fmt::Debug for CapturedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.keys()).finish()
    }
}

impl CapturedScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Arc<dyn Any + Send + Sync>) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `other` into `self`. Duplicate keys are allowed only when both
    /// sides hold pointer-equal values; otherwise this is a decoration-time
    /// bug (two validators independently claimed the same obfuscated name),
    /// surfaced as `Err` so callers can turn it into a `DecorError::Sub`.
    pub fn merge(&mut self, other: &CapturedScope) -> Result<(), String> {
        for (key, value) in other.0.iter() {
            match self.0.get(key) {
                Some(existing) if Arc::ptr_eq(existing, value) => {}
                Some(_) => return Err(format!("captured-scope key \"{key}\" bound to two different values")),
                None => {
                    self.0.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

/// A composable value validator.
pub trait Validator: Send + Sync {
    /// The eager predicate.
    fn is_valid(&self, value: &Value) -> bool;

    /// A human-readable expression describing the check, with `obj`
    /// substituted for the subject placeholder.
    fn describe(&self, obj: &str) -> String;

    /// Named values this validator's `describe()` output depends on.
    fn captured_scope(&self) -> CapturedScope {
        CapturedScope::new()
    }
}

/// `(A and B)` — conjunction.
pub struct And(pub Arc<dyn Validator>, pub Arc<dyn Validator>);

impl Validator for And {
    fn is_valid(&self, value: &Value) -> bool {
        self.0.is_valid(value) && self.1.is_valid(value)
    }

    fn describe(&self, obj: &str) -> String {
        format!("({} and {})", self.0.describe(obj), self.1.describe(obj))
    }

    fn captured_scope(&self) -> CapturedScope {
        merge_scopes(&self.0, &self.1)
    }
}

/// `(A or B)` — disjunction.
pub struct Or(pub Arc<dyn Validator>, pub Arc<dyn Validator>);

impl Validator for Or {
    fn is_valid(&self, value: &Value) -> bool {
        self.0.is_valid(value) || self.1.is_valid(value)
    }

    fn describe(&self, obj: &str) -> String {
        format!("({} or {})", self.0.describe(obj), self.1.describe(obj))
    }

    fn captured_scope(&self) -> CapturedScope {
        merge_scopes(&self.0, &self.1)
    }
}

/// `(not A)` — negation.
pub struct Not(pub Arc<dyn Validator>);

impl Validator for Not {
    fn is_valid(&self, value: &Value) -> bool {
        !self.0.is_valid(value)
    }

    fn describe(&self, obj: &str) -> String {
        format!("(not {})", self.0.describe(obj))
    }

    fn captured_scope(&self) -> CapturedScope {
        self.0.captured_scope()
    }
}

fn merge_scopes(a: &Arc<dyn Validator>, b: &Arc<dyn Validator>) -> CapturedScope {
    let mut merged = a.captured_scope();
    // A decoration-time key clash here indicates a validator-construction
    // bug upstream (two leaves independently picked the same obfuscated
    // name); `describe()` is only used for diagnostics, so we degrade to a
    // visible marker rather than panicking mid-composition.
    if merged.merge(&b.captured_scope()).is_err() {
        merged.insert("__runtype_scope_conflict", Arc::new(true));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaf::Equality;

    #[test]
    fn and_short_circuits_on_predicate_not_on_text() {
        let a: Arc<dyn Validator> = Arc::new(Equality::new(1i64));
        let b: Arc<dyn Validator> = Arc::new(Equality::new(1i64));
        let both = And(a, b);
        assert!(both.is_valid(&Value::new(1i64)));
        assert!(!both.is_valid(&Value::new(2i64)));
        assert_eq!(both.describe("obj"), "(obj == 1 and obj == 1)");
    }

    #[test]
    fn not_negates() {
        let a: Arc<dyn Validator> = Arc::new(Equality::new(1i64));
        let negated = Not(a);
        assert!(!negated.is_valid(&Value::new(1i64)));
        assert!(negated.is_valid(&Value::new(2i64)));
    }
}

//! Leaf validators: `Equality` and `UserPredicate`.

use std::fmt::Debug;
use std::sync::Arc;

use crate::value::Value;

use super::Validator;

/// Exact equality against a captured value, compared by downcasting both
/// sides to `T` and delegating to `PartialEq`.
pub struct Equality<T> {
    expected: T,
    rendered: String,
}

impl<T: Debug + PartialEq + Send + Sync + 'static> Equality<T> {
    pub fn new(expected: T) -> Self {
        let rendered = format!("{expected:?}");
        Equality { expected, rendered }
    }
}

impl<T: Debug + PartialEq + Send + Sync + 'static> Validator for Equality<T> {
    fn is_valid(&self, value: &Value) -> bool {
        value.downcast_ref::<T>() == Some(&self.expected)
    }

    fn describe(&self, obj: &str) -> String {
        format!("{obj} == {}", self.rendered)
    }
}

/// An arbitrary user predicate. Unlike every other validator, its
/// `describe()` output is opaque — there is no decomposable fragment for an
/// arbitrary closure.
pub struct Predicate {
    f: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    label: String,
}

impl Predicate {
    pub fn new(label: impl Into<String>, f: Arc<dyn Fn(&Value) -> bool + Send + Sync>) -> Self {
        Predicate { f, label: label.into() }
    }
}

impl Validator for Predicate {
    fn is_valid(&self, value: &Value) -> bool {
        (self.f)(value)
    }

    fn describe(&self, obj: &str) -> String {
        format!("{}({obj})", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_compares_by_downcast_and_eq() {
        let v = Equality::new(42i64);
        assert!(v.is_valid(&Value::new(42i64)));
        assert!(!v.is_valid(&Value::new(7i64)));
        assert!(!v.is_valid(&Value::new("42")));
    }

    #[test]
    fn predicate_delegates_to_closure() {
        let positive = Predicate::new("is_positive", Arc::new(|v: &Value| {
            v.downcast_ref::<i64>().is_some_and(|n| *n > 0)
        }));
        assert!(positive.is_valid(&Value::new(5i64)));
        assert!(!positive.is_valid(&Value::new(-5i64)));
        assert_eq!(positive.describe("x"), "is_positive(x)");
    }
}

//! `IsAttr` — attribute probe validator.
//!
//! Grounded in `beartype/vale/_valeisobj.py::IsAttr.__class_getitem__`: test
//! that an object defines an attribute with a given name whose value
//! satisfies an inner validator, short-circuiting via a sentinel so a
//! missing attribute fails cleanly rather than panicking on a bad downcast.

use std::sync::Arc;

use crate::value::{AttrSource, Value};

use super::{CapturedScope, Validator};

/// Sentinel returned by [`AttrSource::get_attr`] lookups that miss; unique
/// per process so it can never collide with a real attribute value. Named
/// and registered into `captured_scope()` the same way
/// `beartype._util.utilobject.SENTINEL` is registered into
/// `is_valid_code_locals` under a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sentinel;

pub struct IsAttr {
    name: String,
    inner: Arc<dyn Validator>,
}

impl IsAttr {
    /// `name` must be a non-empty identifier-shaped segment, or a
    /// dot-delimited path of such segments; each segment is walked in turn
    /// at probe time (see DESIGN.md Open Question 3).
    pub fn new(name: impl Into<String>, inner: Arc<dyn Validator>) -> Result<Self, String> {
        let name = name.into();
        if name.is_empty() {
            return Err("IsAttr name must be non-empty".to_string());
        }
        for segment in name.split('.') {
            if segment.is_empty() || !is_identifier(segment) {
                return Err(format!("IsAttr name \"{name}\" is not a dotted identifier path"));
            }
        }
        Ok(IsAttr { name, inner })
    }
}

impl Validator for IsAttr {
    fn is_valid(&self, value: &Value) -> bool {
        let Some(source) = value.as_any().downcast_ref::<Box<dyn AttrSource>>() else {
            return false;
        };
        let mut current: Value = match source.get_attr(self.name.split('.').next().unwrap()) {
            Some(v) => v,
            None => return false,
        };
        for segment in self.name.split('.').skip(1) {
            let Some(nested) = current.as_any().downcast_ref::<Box<dyn AttrSource>>() else {
                return false;
            };
            current = match nested.get_attr(segment) {
                Some(v) => v,
                None => return false,
            };
        }
        self.inner.is_valid(&current)
    }

    fn describe(&self, obj: &str) -> String {
        format!(
            "({obj} defines attribute \"{}\" satisfying {})",
            self.name,
            self.inner.describe(&format!("{obj}.{}", self.name))
        )
    }

    fn captured_scope(&self) -> CapturedScope {
        let mut scope = self.inner.captured_scope();
        scope.insert(format!("__runtype_isattr_sentinel_{}", self.name), Arc::new(Sentinel));
        scope
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Equality;

    #[derive(Debug)]
    struct Point {
        x: i64,
    }

    impl AttrSource for Point {
        fn get_attr(&self, name: &str) -> Option<Value> {
            match name {
                "x" => Some(Value::new(self.x)),
                _ => None,
            }
        }
    }

    fn boxed(p: Point) -> Value {
        let source: Box<dyn AttrSource> = Box::new(p);
        Value::new(source)
    }

    #[test]
    fn matching_attribute_passes() {
        let is_attr = IsAttr::new("x", Arc::new(Equality::new(5i64))).unwrap();
        assert!(is_attr.is_valid(&boxed(Point { x: 5 })));
        assert!(!is_attr.is_valid(&boxed(Point { x: 6 })));
    }

    #[test]
    fn missing_attribute_fails_closed() {
        let is_attr = IsAttr::new("y", Arc::new(Equality::new(5i64))).unwrap();
        assert!(!is_attr.is_valid(&boxed(Point { x: 5 })));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(IsAttr::new("", Arc::new(Equality::new(1i64))).is_err());
    }

    #[test]
    fn non_identifier_segment_rejected() {
        assert!(IsAttr::new("1bad", Arc::new(Equality::new(1i64))).is_err());
    }
}

//! Process-wide type registry.
//!
//! Stands in for Python's module globals: a [`NameRef`](crate::hint::RawHint)
//! or `ForwardRef` names a type by string, and that string is resolved to a
//! concrete, instance-checkable type lazily, at first call. Call sites
//! populate this registry once (typically at process startup) via
//! [`register`]; `NameRef`/`ForwardRef` resolution then looks the name up
//! here instead of performing a Python-style `import`.
//!
//! Backed by `dashmap` rather than a `Mutex`/`RwLock`-guarded `HashMap`:
//! duplicate concurrent registrations or lookups of the same key must be
//! tolerated without serializing every reader, which is exactly `DashMap`'s
//! shape.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::value::Value;

/// A runtime-checkable type, named and instance-testable.
#[derive(Clone)]
pub struct TypeDescriptor {
    pub name: Arc<str>,
    type_id: TypeId,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeDescriptor({})", self.name)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}
impl Eq for TypeDescriptor {}

impl TypeDescriptor {
    /// Build a descriptor for a concrete, statically known Rust type.
    pub fn of<T: Any + Send + Sync>(name: impl Into<Arc<str>>) -> Self {
        TypeDescriptor {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            check: Arc::new(|v: &Value| v.is::<T>()),
        }
    }

    pub fn is_instance(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

static REGISTRY: Lazy<DashMap<String, TypeDescriptor>> = Lazy::new(DashMap::new);

/// Register a type under a (possibly dotted) name for later `NameRef`/
/// `ForwardRef` resolution. Re-registering the same name overwrites the
/// previous descriptor, matching Python re-`import`/reload semantics.
pub fn register(name: impl Into<String>, descriptor: TypeDescriptor) {
    let name = name.into();
    log::trace!("registering type {name}");
    REGISTRY.insert(name, descriptor);
}

/// Resolve a name previously passed to [`register`].
pub fn resolve(name: &str) -> Option<TypeDescriptor> {
    REGISTRY.get(name).map(|entry| entry.value().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget;

    #[test]
    fn register_then_resolve() {
        register("pkg.sub.Widget", TypeDescriptor::of::<Widget>("Widget"));
        let descriptor = resolve("pkg.sub.Widget").expect("registered");
        assert!(descriptor.is_instance(&Value::new(Widget)));
        assert!(!descriptor.is_instance(&Value::new(42i64)));
    }

    #[test]
    fn unresolved_name_is_none() {
        assert!(resolve("nope.does.not.Exist").is_none());
    }
}

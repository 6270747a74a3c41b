//! Dynamic values flowing through a checked call.
//!
//! The core never knows the concrete types of the callable it wraps: a
//! parameter's declared hint and the argument bound to it are both erased
//! behind [`Value`]. This is the Rust analog of Python handing arbitrary
//! objects to `isinstance()` at call time.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single argument, return value, or attribute probed off one of either.
///
/// `repr` is captured once, at construction, while the concrete `T` is still
/// known — the same trick `validator::Equality` uses for its own `rendered`
/// field. Once erased behind `Arc<dyn Any>` there is no way to recover a
/// `Debug` impl for the value, so the rendering has to happen up front.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    repr: Arc<str>,
}

impl Value {
    pub fn new<T: Any + Send + Sync + fmt::Debug>(value: T) -> Self {
        let repr: Arc<str> = format!("{value:?}").into();
        Value { inner: Arc::new(value), repr }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn as_any(&self) -> &(dyn Any + Send + Sync) {
        &*self.inner
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// Values that can answer `getattr(self, name, SENTINEL)`-style probes.
///
/// Grounded in `beartype/vale/_valeisobj.py::IsAttr`, whose `is_valid`
/// closure performs exactly this lookup with a sentinel default; `Value`
/// itself carries no attributes, so any type wanting to participate in an
/// `IsAttr` validator implements this trait and is wrapped as a `Value`
/// via [`Value::new`].
pub trait AttrSource: Any + Send + Sync + fmt::Debug {
    fn get_attr(&self, name: &str) -> Option<Value>;
}

//! The Hint Intermediate Representation (HIR).
//!
//! `RawHint` is what a caller writes where Python would write a bare
//! annotation object; [`Sign`] is its closed classification. `classify` is
//! total, falling through to `Ignorable` only for a small enumerated
//! widest-possible set.

mod cache;
mod compile;
mod ignorable;
mod validate;

pub use cache::classify_cached;
pub use compile::{compile_hint, CheckOutcome, CompiledNode};
pub use ignorable::is_ignorable;
pub use validate::validate_hint;

use std::fmt;
use std::sync::Arc;

use crate::registry::TypeDescriptor;
use crate::validator::Validator;

/// The closed set of hint classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Class,
    NameRef,
    Tuple,
    Union,
    Generic,
    NewType,
    ForwardRef,
    AttrValidator,
    Equality,
    UserPredicate,
    Ignorable,
}

/// A generic's type argument: either a free type variable (ignorable on its
/// own) or a further, concrete hint.
#[derive(Debug, Clone)]
pub enum GenericArg {
    TypeVar(String),
    Hint(Box<RawHint>),
}

/// The raw, heterogeneous hint object a caller supplies. This is the Rust
/// stand-in for whatever arbitrary object Python finds behind a parameter's
/// `:` annotation.
///
/// `Debug` is implemented by hand rather than derived: the `Equality`/
/// `UserPredicate`/`AttrValidator` leaves hold `Arc<dyn Validator>`, and
/// `Validator` itself carries no `Debug` bound — its `describe()` fragment
/// is not expected to double as a `Debug` impl.
#[derive(Clone)]
pub enum RawHint {
    /// A concrete, already-resolved type.
    Class(TypeDescriptor),
    /// A bare or dotted name resolved lazily against [`crate::registry`].
    Name(String),
    /// Non-empty, heterogeneous collection of `Class`/`Name` items.
    /// Validated non-empty by [`validate_hint`].
    Tuple(Vec<RawHint>),
    /// Semantic union; instance-check equivalent to `Tuple` but keeps its
    /// own sign for dispatch.
    Union(Vec<RawHint>),
    /// A user-defined parametric class hint.
    Generic {
        origin: GenericOrigin,
        args: Vec<GenericArg>,
    },
    /// Identity-closure alias.
    NewType {
        name: String,
        alias_of: Box<RawHint>,
    },
    /// Deferred name resolution captured from a string subscription distinct
    /// from a plain `Name` — kept distinct because a `ForwardRef`'s failure
    /// to resolve is reported as `ForwardRefError` rather than
    /// `InvalidHintError`.
    ForwardRef(String),
    /// "target has attribute `name` satisfying `inner`".
    AttrValidator {
        name: String,
        inner: Arc<dyn Validator>,
    },
    /// Leaf validator: exact equality against a captured value (built via
    /// [`crate::validator::Equality`], which knows the concrete compared
    /// type; `RawHint` only ever sees it type-erased behind `Validator`).
    Equality(Arc<dyn Validator>),
    /// Leaf validator: an arbitrary user predicate
    /// ([`crate::validator::Predicate`]).
    UserPredicate(Arc<dyn Validator>),
    /// The universal top type / "any object" hint: conveys no constraint.
    Any,
    /// A bare, unparametrized type variable used as a top-level annotation.
    TypeVar(String),
}

impl fmt::Debug for RawHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawHint::Class(td) => f.debug_tuple("Class").field(td).finish(),
            RawHint::Name(name) => f.debug_tuple("Name").field(name).finish(),
            RawHint::Tuple(items) => f.debug_tuple("Tuple").field(items).finish(),
            RawHint::Union(items) => f.debug_tuple("Union").field(items).finish(),
            RawHint::Generic { origin, args } => {
                f.debug_struct("Generic").field("origin", origin).field("args", args).finish()
            }
            RawHint::NewType { name, alias_of } => {
                f.debug_struct("NewType").field("name", name).field("alias_of", alias_of).finish()
            }
            RawHint::ForwardRef(name) => f.debug_tuple("ForwardRef").field(name).finish(),
            RawHint::AttrValidator { name, .. } => {
                f.debug_struct("AttrValidator").field("name", name).finish()
            }
            RawHint::Equality(_) => write!(f, "Equality(..)"),
            RawHint::UserPredicate(_) => write!(f, "UserPredicate(..)"),
            RawHint::Any => write!(f, "Any"),
            RawHint::TypeVar(name) => f.debug_tuple("TypeVar").field(name).finish(),
        }
    }
}

/// The origin of a `Generic` hint: either the universal `typing.Generic`
/// marker (ignorable when all args are type variables) or a real,
/// instance-checkable erased base.
#[derive(Debug, Clone)]
pub enum GenericOrigin {
    UniversalMarker,
    Erased(TypeDescriptor),
}

/// Total classification of a raw hint into its [`Sign`].
pub fn classify(hint: &RawHint) -> Sign {
    match hint {
        RawHint::Class(_) => Sign::Class,
        RawHint::Name(_) => Sign::NameRef,
        RawHint::Tuple(_) => Sign::Tuple,
        RawHint::Union(_) => Sign::Union,
        RawHint::Generic { .. } => Sign::Generic,
        RawHint::NewType { .. } => Sign::NewType,
        RawHint::ForwardRef(_) => Sign::ForwardRef,
        RawHint::AttrValidator { .. } => Sign::AttrValidator,
        RawHint::Equality(_) => Sign::Equality,
        RawHint::UserPredicate(_) => Sign::UserPredicate,
        RawHint::Any | RawHint::TypeVar(_) => Sign::Ignorable,
    }
}

pub fn is_forward_ref(hint: &RawHint) -> bool {
    matches!(hint, RawHint::ForwardRef(_))
}

pub fn is_type_variable(hint: &RawHint) -> bool {
    matches!(hint, RawHint::TypeVar(_))
}

pub fn is_generic(hint: &RawHint) -> bool {
    matches!(hint, RawHint::Generic { .. })
}

pub fn is_new_type(hint: &RawHint) -> bool {
    matches!(hint, RawHint::NewType { .. })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_total_and_correct_per_variant() {
        assert_eq!(classify(&RawHint::Any), Sign::Ignorable);
        assert_eq!(classify(&RawHint::TypeVar("T".into())), Sign::Ignorable);
        assert_eq!(classify(&RawHint::Name("int".into())), Sign::NameRef);
        assert_eq!(classify(&RawHint::ForwardRef("pkg.Foo".into())), Sign::ForwardRef);
        assert_eq!(classify(&RawHint::Tuple(vec![])), Sign::Tuple);
    }
}

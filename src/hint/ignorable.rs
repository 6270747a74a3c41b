//! Ignorability analyzer.
//!
//! Grounded in `utilpep484.py::is_hint_pep484_ignorable_or_none`. Pure
//! structural recursion; hints are never self-referential, so this always
//! terminates. Not memoized here — callers that classify repeatedly go
//! through [`super::classify_cached`], which memoizes the sign, and
//! separately consult this when the sign is non-ignorable-but-compound
//! (`Union`, `NewType`, `Generic`).

use super::{GenericArg, GenericOrigin, RawHint};

pub fn is_ignorable(hint: &RawHint) -> bool {
    match hint {
        RawHint::Any | RawHint::TypeVar(_) => true,
        RawHint::Generic { origin, args } => {
            matches!(origin, GenericOrigin::UniversalMarker)
                && args.iter().all(|arg| matches!(arg, GenericArg::TypeVar(_)))
        }
        RawHint::NewType { alias_of, .. } => is_ignorable(alias_of),
        // A union is as wide as its widest arm: if any child conveys no
        // constraint, the whole union conveys no constraint.
        RawHint::Union(children) => children.iter().any(is_ignorable),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeDescriptor;

    #[test]
    fn any_and_typevar_are_ignorable() {
        assert!(is_ignorable(&RawHint::Any));
        assert!(is_ignorable(&RawHint::TypeVar("T".into())));
    }

    #[test]
    fn generic_over_only_typevars_is_ignorable() {
        let hint = RawHint::Generic {
            origin: GenericOrigin::UniversalMarker,
            args: vec![GenericArg::TypeVar("T".into())],
        };
        assert!(is_ignorable(&hint));
    }

    #[test]
    fn generic_over_erased_origin_is_not_ignorable() {
        let hint = RawHint::Generic {
            origin: GenericOrigin::Erased(TypeDescriptor::of::<Vec<i64>>("list")),
            args: vec![GenericArg::TypeVar("T".into())],
        };
        assert!(!is_ignorable(&hint));
    }

    #[test]
    fn newtype_recurses() {
        let ignorable = RawHint::NewType { name: "UserId".into(), alias_of: Box::new(RawHint::Any) };
        assert!(is_ignorable(&ignorable));

        let not_ignorable = RawHint::NewType {
            name: "UserId".into(),
            alias_of: Box::new(RawHint::Class(TypeDescriptor::of::<i64>("int"))),
        };
        assert!(!is_ignorable(&not_ignorable));
    }

    #[test]
    fn union_ignorable_iff_any_child_ignorable() {
        let wide = RawHint::Union(vec![
            RawHint::Class(TypeDescriptor::of::<i64>("int")),
            RawHint::Any,
        ]);
        assert!(is_ignorable(&wide));

        let narrow = RawHint::Union(vec![
            RawHint::Class(TypeDescriptor::of::<i64>("int")),
            RawHint::Class(TypeDescriptor::of::<String>("str")),
        ]);
        assert!(!is_ignorable(&narrow));
    }
}

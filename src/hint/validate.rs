//! Hint validator.
//!
//! Grounded in `beartype/_decor/decor.py::_check_type_annotation`: succeeds
//! silently for a `Class`, a `Name` (when `allow_names`), or a non-empty
//! `Tuple` whose every item is a `Class` or (if allowed) a `Name`/
//! `ForwardRef`. Everything else fails with `InvalidHintError`, whose
//! message interpolates the caller-supplied label the same way the
//! original's f-strings do.

use crate::error::DecorError;

use super::{classify, RawHint, Sign};

pub fn validate_hint(hint: &RawHint, label: &str, allow_names: bool) -> Result<(), DecorError> {
    match hint {
        RawHint::Class(_) => Ok(()),
        RawHint::Name(_) | RawHint::ForwardRef(_) => {
            if allow_names {
                Ok(())
            } else {
                Err(DecorError::invalid_hint(
                    label,
                    Some(classify(hint)),
                    "name references are not permitted in this context",
                ))
            }
        }
        RawHint::Tuple(items) => {
            if items.is_empty() {
                return Err(DecorError::invalid_hint(
                    label,
                    Some(Sign::Tuple),
                    "tuple annotation is empty",
                ));
            }
            for item in items {
                match item {
                    RawHint::Class(_) => {}
                    RawHint::Name(_) | RawHint::ForwardRef(_) if allow_names => {}
                    other => {
                        return Err(DecorError::invalid_hint(
                            label,
                            Some(classify(other)),
                            "tuple item is neither a class nor a permitted name reference",
                        ));
                    }
                }
            }
            Ok(())
        }
        // Generic/NewType/AttrValidator build through fallible constructors
        // elsewhere and are accepted as-is here. Union has no such
        // constructor of its own — its children are shape-checked by
        // `compile_tuple_items`, which runs right after this validator.
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeDescriptor;

    #[test]
    fn class_always_valid() {
        let class = RawHint::Class(TypeDescriptor::of::<i64>("int"));
        assert!(validate_hint(&class, "x", true).is_ok());
        assert!(validate_hint(&class, "x", false).is_ok());
    }

    #[test]
    fn name_valid_only_when_allowed() {
        let name = RawHint::Name("int".into());
        assert!(validate_hint(&name, "x", true).is_ok());
        assert!(validate_hint(&name, "x", false).is_err());
    }

    #[test]
    fn empty_tuple_rejected() {
        let tuple = RawHint::Tuple(vec![]);
        assert!(validate_hint(&tuple, "x", true).is_err());
    }

    #[test]
    fn tuple_with_bad_item_rejected() {
        let tuple = RawHint::Tuple(vec![RawHint::Any]);
        let err = validate_hint(&tuple, "x", true).unwrap_err();
        assert!(matches!(err, DecorError::InvalidHint { .. }));
    }

    #[test]
    fn tuple_of_class_and_name_ok() {
        let tuple = RawHint::Tuple(vec![
            RawHint::Class(TypeDescriptor::of::<i64>("int")),
            RawHint::Name("str".into()),
        ]);
        assert!(validate_hint(&tuple, "x", true).is_ok());
    }
}

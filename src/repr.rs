//! Truncating representation helper.
//!
//! Grounded in `beartype._decor.util.trim_object_repr`: error messages embed
//! a representation of the offending value, but an unbounded `repr()`/
//! `Debug` dump of e.g. a multi-megabyte buffer would make exceptions
//! themselves the performance and log-volume problem. `trim_repr` caps the
//! rendered length and marks truncation explicitly rather than silently
//! cutting a string mid-content.

const DEFAULT_MAX_LEN: usize = 256;

pub fn trim_repr<T: std::fmt::Debug>(value: &T) -> String {
    trim_repr_to(value, DEFAULT_MAX_LEN)
}

pub fn trim_repr_to<T: std::fmt::Debug>(value: &T, max_len: usize) -> String {
    let full = format!("{value:?}");
    if full.len() <= max_len {
        full
    } else {
        let mut cut = max_len;
        while !full.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...<truncated {} chars>", &full[..cut], full.len() - cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_value_is_untouched() {
        assert_eq!(trim_repr(&42i64), "42");
    }

    #[test]
    fn long_value_is_truncated() {
        let long = "x".repeat(1000);
        let rendered = trim_repr(&long);
        assert!(rendered.len() < long.len());
        assert!(rendered.ends_with("chars>"));
    }
}

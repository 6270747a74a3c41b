//! Checker configuration.
//!
//! Makes a handful of behaviors that would otherwise be silent,
//! uncontrollable choices into explicit flags, serialized with `serde`.

use serde::{Deserialize, Serialize};

/// How a dotted `IsAttr` name (e.g. `"dtype.type"`) is handled.
///
/// `Walk` resolves each segment in turn at probe time; `Reject` fails fast
/// at decoration time instead, for callers who'd rather not pay for the
/// walk at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DottedAttrMode {
    Walk,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Check `PositionalOnly` parameters instead of silently skipping them.
    #[serde(default)]
    pub check_positional_only: bool,
    /// Check the elements of `**kwargs`-style variadic-keyword parameters
    /// instead of silently skipping them.
    #[serde(default)]
    pub check_var_keyword: bool,
    /// Treat a `None`-annotated return as a real contract (reject
    /// non-`None` returns) rather than "no check".
    #[serde(default)]
    pub strict_none_return: bool,
    #[serde(default = "default_dotted_attr_mode")]
    pub dotted_attr_mode: DottedAttrMode,
}

fn default_dotted_attr_mode() -> DottedAttrMode {
    DottedAttrMode::Walk
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            check_positional_only: false,
            check_var_keyword: false,
            strict_none_return: false,
            dotted_attr_mode: DottedAttrMode::Walk,
        }
    }
}

impl CheckerConfig {
    /// Apply `RUNTYPE_*` environment overrides on top of [`Default`], read
    /// once rather than per call.
    pub fn from_env() -> Self {
        let mut config = CheckerConfig::default();
        if env_flag("RUNTYPE_CHECK_POSITIONAL_ONLY") {
            config.check_positional_only = true;
        }
        if env_flag("RUNTYPE_CHECK_VAR_KEYWORD") {
            config.check_var_keyword = true;
        }
        if env_flag("RUNTYPE_STRICT_NONE_RETURN") {
            config.strict_none_return = true;
        }
        if std::env::var("RUNTYPE_REJECT_DOTTED_ATTR").is_ok() {
            config.dotted_attr_mode = DottedAttrMode::Reject;
        }
        config
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(std::env::var(name).as_deref(), Ok("1") | Ok("true"))
}

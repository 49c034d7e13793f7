//! Flag and environment resolution.
//!
//! Raw flag values arrive as strings; this module turns them into a checked
//! [`GenerateConfig`], applying environment fallbacks, deriving names that
//! were left to convention, and rejecting invalid overrides before any file
//! is read.

use std::env;
use std::path::PathBuf;

use convert_case::{Case, Casing};
use regex::Regex;

use options_gen_core::ConstructorKind;

use crate::error::ConfigError;

/// Environment fallback for `--filename`, set by generation directives.
pub const ENV_FILE: &str = "OPTIONS_GEN_FILE";

/// Environment fallback for `--pkg`.
pub const ENV_PKG: &str = "OPTIONS_GEN_PKG";

/// Where constructor defaults come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSource {
    /// No default initialization beyond `Default::default()`.
    None,
    /// Per-field directive values, keyed by the given directive name.
    Tag(String),
    /// A const/static holding a template value, cloned per construction.
    Var(String),
    /// A function returning the template value.
    Func(String),
}

/// Fully resolved configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub filename: PathBuf,
    pub out_filename: PathBuf,
    pub pkg: String,
    pub from_struct: String,
    pub defaults: DefaultSource,
    pub mute_warnings: bool,
    pub out_prefix: String,
    pub with_isset: bool,
    pub all_variadic: bool,
    pub constructor: ConstructorKind,
    pub setter_name: String,
    pub excludes: Vec<Regex>,
}

/// Resolve a required string value, falling back to an environment variable.
pub fn required_with_env(flag: &str, value: &str, env_name: &str) -> Result<String, ConfigError> {
    if !value.is_empty() {
        return Ok(value.to_string());
    }
    match env::var(env_name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::missing_with_env(flag, env_name)),
    }
}

/// Parse a `--defaults-from` value.
///
/// Accepted forms are `none`, `tag[=name]`, `var[=name]`, and `func[=name]`.
/// Omitted names are derived from the struct name by convention:
/// `DEFAULT_MY_STRUCT` for vars, `default_my_struct` for funcs, `default`
/// for the tag key.
pub fn parse_defaults_from(value: &str, struct_name: &str) -> Result<DefaultSource, ConfigError> {
    let (kind, name) = match value.split_once('=') {
        Some((kind, name)) => (kind, Some(name)),
        None => (value, None),
    };

    match kind {
        "none" if name.is_none() => Ok(DefaultSource::None),
        "tag" => Ok(DefaultSource::Tag(
            name.unwrap_or("default").to_string(),
        )),
        "var" => Ok(DefaultSource::Var(match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!(
                "DEFAULT_{}",
                struct_name.to_case(Case::Snake).to_uppercase()
            ),
        })),
        "func" => Ok(DefaultSource::Func(match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("default_{}", struct_name.to_case(Case::Snake)),
        })),
        _ => Err(ConfigError::BadDefaultsFrom {
            value: value.to_string(),
        }),
    }
}

/// Resolve the generated setter type name.
///
/// An empty override yields the conventional `Opt<Struct>Setter`; a
/// non-empty one must be letters-only.
pub fn resolve_setter_name(override_name: &str, struct_name: &str) -> Result<String, ConfigError> {
    if override_name.is_empty() {
        return Ok(format!("Opt{struct_name}Setter"));
    }
    let letters_only = override_name.chars().all(|c| c.is_ascii_alphabetic());
    if !letters_only {
        return Err(ConfigError::BadSetterName {
            name: override_name.to_string(),
        });
    }
    Ok(override_name.to_string())
}

/// Compile a semicolon-separated exclusion pattern list.
///
/// Empty segments (from a trailing or doubled separator) are skipped.
pub fn compile_excludes(raw: &str) -> Result<Vec<Regex>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| ConfigError::bad_exclude(pattern, e.to_string()))
        })
        .collect()
}

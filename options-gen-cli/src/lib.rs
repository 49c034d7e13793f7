//! # options-gen-cli
//!
//! CLI library for the `options-gen` binary: flag and environment
//! resolution, pipeline orchestration, and output writing. The heavy
//! lifting (locating the struct, extracting the spec, rendering the
//! source) lives in `options-gen-core`.
//!
//! ## Architecture
//!
//! - [`config`] - flag parsing helpers, environment fallbacks, derived names
//! - [`error`] - top-level error type aggregating the pipeline stages
//! - [`writer`] - output file writing with fixed permissions

pub mod config;
pub mod error;
pub mod writer;

pub use config::{DefaultSource, GenerateConfig};
pub use error::{CliError, CliResult};

use options_gen_core::{apply_excludes, get_option_spec, render, RenderConfig};

/// Run one generation request end to end, without touching the output file.
///
/// Returns the rendered source and the collected advisory warnings; the
/// caller decides how to surface the warnings and where to write the text.
pub fn generate(cfg: &GenerateConfig) -> CliResult<(String, Vec<String>)> {
    let default_tag = match &cfg.defaults {
        DefaultSource::Tag(name) => name.as_str(),
        _ => "",
    };

    let mut result = get_option_spec(
        &cfg.filename,
        &cfg.from_struct,
        default_tag,
        cfg.all_variadic,
    )?;

    result.spec.options = apply_excludes(result.spec.options, &cfg.excludes);

    let (tag_name, var_name, func_name) = match &cfg.defaults {
        DefaultSource::None => (String::new(), String::new(), String::new()),
        DefaultSource::Tag(name) => (name.clone(), String::new(), String::new()),
        DefaultSource::Var(name) => (String::new(), name.clone(), String::new()),
        DefaultSource::Func(name) => (String::new(), String::new(), name.clone()),
    };

    let render_config = RenderConfig {
        version: env!("CARGO_PKG_VERSION").to_string(),
        package_name: cfg.pkg.clone(),
        struct_name: cfg.from_struct.clone(),
        file_imports: result.imports,
        spec: result.spec,
        tag_name,
        var_name,
        func_name,
        prefix: cfg.out_prefix.clone(),
        with_isset: cfg.with_isset,
        constructor: cfg.constructor,
        option_type_name: cfg.setter_name.clone(),
    };

    let content = render(&render_config)?;
    Ok((content, result.warnings))
}

//! # options-gen
//!
//! Generates functional-options construction code for a Rust struct.
//!
//! ## Usage
//!
//! ```bash
//! # Generate options for a struct in the current module
//! options-gen --filename src/options.rs --out-filename src/options_generated.rs \
//!     --pkg client --from-struct Options
//!
//! # Track which fields were explicitly set
//! options-gen ... --with-isset
//!
//! # Defaults from a template const instead of field directives
//! options-gen ... --defaults-from var=DEFAULT_OPTIONS
//!
//! # Skip fields by pattern
//! options-gen ... --exclude '^Internal;Debug'
//! ```

use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use options_gen_core::ConstructorKind;

use options_gen_cli::{
    config::{
        compile_excludes, parse_defaults_from, required_with_env, resolve_setter_name, ENV_FILE,
        ENV_PKG,
    },
    error::CliError,
    generate,
    writer::write_output,
    GenerateConfig,
};

#[derive(Parser)]
#[command(name = "options-gen")]
#[command(author, version, about = "Generate functional-options construction code for Rust structs", long_about = None)]
struct Cli {
    /// Source file containing the target struct (env: OPTIONS_GEN_FILE)
    #[arg(long, default_value = "")]
    filename: String,

    /// Output file for the generated source
    #[arg(long)]
    out_filename: PathBuf,

    /// Module name the generated file belongs to (env: OPTIONS_GEN_PKG)
    #[arg(long, default_value = "")]
    pkg: String,

    /// Name of the target struct
    #[arg(long)]
    from_struct: String,

    /// Default source: none, tag[=name], var[=name], or func[=name]
    #[arg(long, default_value = "tag=default")]
    defaults_from: String,

    /// Suppress advisory warnings
    #[arg(long)]
    mute_warnings: bool,

    /// Namespace prefix for generated constructor and setter names
    #[arg(long, default_value = "")]
    out_prefix: String,

    /// Generate a companion struct tracking which fields were set
    #[arg(long)]
    with_isset: bool,

    /// Treat every Vec-shaped field without an explicit directive as variadic
    #[arg(long)]
    all_variadic: bool,

    /// Constructor visibility
    #[arg(long, value_enum, default_value = "public")]
    constructor: ConstructorMode,

    /// Override for the generated setter type name (letters only)
    #[arg(long, default_value = "")]
    out_setter_name: String,

    /// Semicolon-separated patterns; matching fields are omitted entirely
    #[arg(long, default_value = "")]
    exclude: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConstructorMode {
    Public,
    Private,
    No,
}

impl From<ConstructorMode> for ConstructorKind {
    fn from(mode: ConstructorMode) -> Self {
        match mode {
            ConstructorMode::Public => ConstructorKind::Public,
            ConstructorMode::Private => ConstructorKind::Private,
            ConstructorMode::No => ConstructorKind::None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;

    let (content, warnings) = generate(&config)?;

    if !config.mute_warnings {
        for warning in &warnings {
            eprintln!("{}", warning.yellow());
        }
    }

    let bytes = write_output(&config.out_filename, &content)?;
    println!(
        "{} Written {} bytes to {}",
        "✓".green(),
        bytes,
        config.out_filename.display()
    );

    Ok(())
}

/// Turn raw flags into a checked configuration.
fn resolve_config(cli: &Cli) -> Result<GenerateConfig, CliError> {
    let filename = required_with_env("--filename", &cli.filename, ENV_FILE)?;
    let pkg = required_with_env("--pkg", &cli.pkg, ENV_PKG)?;

    if cli.from_struct.is_empty() {
        return Err(options_gen_cli::error::ConfigError::missing("--from-struct").into());
    }

    Ok(GenerateConfig {
        filename: PathBuf::from(filename),
        out_filename: cli.out_filename.clone(),
        pkg,
        from_struct: cli.from_struct.clone(),
        defaults: parse_defaults_from(&cli.defaults_from, &cli.from_struct)?,
        mute_warnings: cli.mute_warnings,
        out_prefix: cli.out_prefix.clone(),
        with_isset: cli.with_isset,
        all_variadic: cli.all_variadic,
        constructor: cli.constructor.into(),
        setter_name: resolve_setter_name(&cli.out_setter_name, &cli.from_struct)?,
        excludes: compile_excludes(&cli.exclude)?,
    })
}

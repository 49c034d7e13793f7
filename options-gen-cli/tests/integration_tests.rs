//! Integration tests for options-gen-cli.
//!
//! These exercise the full generation path the binary takes: resolved
//! configuration in, generated source and output file out.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use options_gen_cli::{
    config::{compile_excludes, parse_defaults_from, resolve_setter_name},
    generate,
    writer::write_output,
    DefaultSource, GenerateConfig,
};
use options_gen_core::ConstructorKind;

/// Create a temporary directory with test files.
fn create_temp_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn config_for(dir: &TempDir, file: &str, struct_name: &str) -> GenerateConfig {
    GenerateConfig {
        filename: dir.path().join(file),
        out_filename: dir.path().join("options_generated.rs"),
        pkg: "client".to_string(),
        from_struct: struct_name.to_string(),
        defaults: DefaultSource::Tag("default".to_string()),
        mute_warnings: false,
        out_prefix: String::new(),
        with_isset: false,
        all_variadic: false,
        constructor: ConstructorKind::Public,
        setter_name: resolve_setter_name("", struct_name).unwrap(),
        excludes: Vec::new(),
    }
}

// =============================================================================
// Generation Tests
// =============================================================================

#[test]
fn test_generate_full_struct() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        use std::time::Duration;

        struct Options {
            #[option(mandatory)]
            token: String,
            /// Connection timeout.
            #[option(default = "30s", validate = "min=100ms")]
            timeout: Duration,
            #[option(variadic = true)]
            hosts: Vec<String>,
        }
        "#,
    )]);

    let cfg = config_for(&dir, "options.rs", "Options");
    let (content, warnings) = generate(&cfg).unwrap();

    assert!(warnings.is_empty());
    assert!(content.starts_with("// Code generated by options-gen v"));
    assert!(content.contains("pub fn new_options("));
    assert!(content.contains("    token: String,"));
    assert!(content.contains(r#"o.timeout = ::options_gen::duration::parse("30s")"#));
    assert!(content.contains("/// Connection timeout."));
    assert!(content.contains("pub fn with_hosts(opt: impl IntoIterator<Item = String>)"));
    assert!(content.contains("pub fn validate(&self)"));
}

#[test]
fn test_generate_with_isset_and_prefix() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        struct Options {
            name: String,
        }
        "#,
    )]);

    let mut cfg = config_for(&dir, "options.rs", "Options");
    cfg.with_isset = true;
    cfg.out_prefix = "Grpc".to_string();
    let (content, _) = generate(&cfg).unwrap();

    assert!(content.contains("pub struct OptionsIsset {"));
    assert!(content.contains("fn new_grpc_options"));
    assert!(content.contains("pub fn with_grpc_name"));
}

#[test]
fn test_generate_defaults_from_var() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        struct ServerOptions {
            port: u16,
        }
        "#,
    )]);

    let mut cfg = config_for(&dir, "options.rs", "ServerOptions");
    cfg.defaults = parse_defaults_from("var", "ServerOptions").unwrap();
    cfg.setter_name = resolve_setter_name("", "ServerOptions").unwrap();
    let (content, _) = generate(&cfg).unwrap();

    assert!(content.contains("let mut o: ServerOptions = DEFAULT_SERVER_OPTIONS.clone();"));
}

#[test]
fn test_generate_with_excludes() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        struct Options {
            name: String,
            debug_level: u8,
        }
        "#,
    )]);

    let mut cfg = config_for(&dir, "options.rs", "Options");
    cfg.excludes = compile_excludes("^Debug").unwrap();
    let (content, _) = generate(&cfg).unwrap();

    assert!(content.contains("with_name"));
    assert!(!content.contains("with_debug_level"));
}

#[test]
fn test_generate_collects_warnings() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        struct Options {
            #[option(required)]
            pub token: String,
        }
        "#,
    )]);

    let cfg = config_for(&dir, "options.rs", "Options");
    let (_, warnings) = generate(&cfg).unwrap();

    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.contains("Deprecated")));
    assert!(warnings.iter().any(|w| w.contains("private")));
}

#[test]
fn test_generate_missing_struct_fails() {
    let dir = create_temp_project(&[("options.rs", "struct Other {}")]);

    let cfg = config_for(&dir, "options.rs", "Options");
    let err = generate(&cfg).unwrap_err();
    assert!(err.to_string().contains("Options"));
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_failure_leaves_previous_output_untouched() {
    let dir = create_temp_project(&[
        ("options.rs", "struct Other {}"),
        ("options_generated.rs", "// previous output\n"),
    ]);

    let cfg = config_for(&dir, "options.rs", "Options");
    assert!(generate(&cfg).is_err());

    let previous = fs::read_to_string(dir.path().join("options_generated.rs")).unwrap();
    assert_eq!(previous, "// previous output\n");
}

#[test]
fn test_generate_and_write() {
    let dir = create_temp_project(&[(
        "options.rs",
        r#"
        struct Options {
            name: String,
        }
        "#,
    )]);

    let cfg = config_for(&dir, "options.rs", "Options");
    let (content, _) = generate(&cfg).unwrap();
    let bytes = write_output(&cfg.out_filename, &content).unwrap();

    assert_eq!(bytes, content.len());
    let written: PathBuf = cfg.out_filename;
    assert_eq!(fs::read_to_string(written).unwrap(), content);
}

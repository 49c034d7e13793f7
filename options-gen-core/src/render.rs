//! Rendering of the generated options source file.
//!
//! Takes the extracted [`OptionSpec`] plus a [`RenderConfig`] and emits the
//! final Rust source text: the setter type, the constructor, one fluent
//! setter per non-mandatory field, the optional isset companion, and the
//! validation method. Configuration is checked up front; rendering itself
//! cannot fail.
//!
//! The emitted file repeats the source file's `use` lines verbatim; pruning
//! unused ones is the job of the downstream formatting pass, so the file
//! carries `#![allow(unused_imports)]` to stay warning-clean until then.

use convert_case::{Case, Casing};

use crate::defaults::{is_duration_type, is_string_type};
use crate::error::RenderError;
use crate::spec::{FieldSpec, OptionSpec};

/// Whether and how the constructor function is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructorKind {
    #[default]
    Public,
    Private,
    None,
}

/// Full configuration for one render.
///
/// `tag_name`, `var_name`, and `func_name` select the default source and are
/// mutually exclusive; all empty means no default initialization beyond
/// `Default::default()`.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Generator version stamped into the marker comment.
    pub version: String,

    /// Module name the generated file belongs to.
    pub package_name: String,

    /// Target struct name.
    pub struct_name: String,

    /// Verbatim `use` lines copied from the source file.
    pub file_imports: Vec<String>,

    pub spec: OptionSpec,

    /// Default-directive key, when defaults come from field directives.
    pub tag_name: String,

    /// Default-supplying const/static name, when defaults come from a value.
    pub var_name: String,

    /// Default-supplying function name, when defaults come from a call.
    pub func_name: String,

    /// Namespace prefix for generated setter and constructor names.
    pub prefix: String,

    /// Emit the isset companion struct and thread it through setters.
    pub with_isset: bool,

    pub constructor: ConstructorKind,

    /// Name of the generated setter type.
    pub option_type_name: String,
}

impl RenderConfig {
    /// Check the configuration before rendering anything.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.version.is_empty() {
            return Err(RenderError::MissingVersion);
        }
        if self.package_name.is_empty() {
            return Err(RenderError::MissingPackageName);
        }
        if self.struct_name.is_empty() {
            return Err(RenderError::MissingStructName);
        }
        if self.option_type_name.is_empty() {
            return Err(RenderError::MissingSetterTypeName);
        }

        let sources = [&self.tag_name, &self.var_name, &self.func_name];
        if sources.iter().filter(|s| !s.is_empty()).count() > 1 {
            return Err(RenderError::ConflictingDefaults);
        }

        Ok(())
    }
}

/// Render the generated source file.
pub fn render(cfg: &RenderConfig) -> Result<String, RenderError> {
    cfg.validate()?;

    let r = Renderer::new(cfg);
    Ok(r.render())
}

struct Renderer<'a> {
    cfg: &'a RenderConfig,
    /// Reference-site struct type, e.g. `Options<T, U>`.
    struct_ref: String,
    /// Declaration-site generic list with bounds, e.g. `<T: Clone, U>`.
    generics_decl: String,
    /// Reference-site generic list, e.g. `<T, U>`.
    generics_ref: String,
    /// Setter type referenced with generics, e.g. `OptOptionsSetter<T, U>`.
    setter_ref: String,
    /// `snake_case` prefix fragment for function names, with trailing `_`.
    fn_prefix: String,
    isset_name: String,
    has_validation: bool,
}

impl<'a> Renderer<'a> {
    fn new(cfg: &'a RenderConfig) -> Self {
        let generics_decl = cfg.spec.type_params_spec.clone();
        let generics_ref = cfg.spec.type_params.clone();

        let fn_prefix = if cfg.prefix.is_empty() {
            String::new()
        } else {
            format!("{}_", cfg.prefix.to_case(Case::Snake))
        };

        Self {
            struct_ref: format!("{}{}", cfg.struct_name, generics_ref),
            setter_ref: format!("{}{}", cfg.option_type_name, generics_ref),
            isset_name: format!("{}Isset", cfg.struct_name),
            fn_prefix,
            has_validation: cfg.spec.has_validation(),
            generics_decl,
            generics_ref,
            cfg,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();

        self.header(&mut out);
        self.imports(&mut out);
        self.setter_type(&mut out);
        if self.cfg.with_isset {
            self.isset_struct(&mut out);
        }
        self.constructor(&mut out);
        self.setters(&mut out);
        if self.has_validation {
            self.validate_impl(&mut out);
        }

        out
    }

    fn header(&self, out: &mut String) {
        out.push_str(&format!(
            "// Code generated by options-gen v{}. DO NOT EDIT.\n\n",
            self.cfg.version
        ));
        out.push_str(&format!(
            "//! Functional options for `{}::{}`.\n\n",
            self.cfg.package_name, self.cfg.struct_name
        ));
        out.push_str("#![allow(unused_imports)]\n\n");
    }

    fn imports(&self, out: &mut String) {
        if self.cfg.file_imports.is_empty() {
            return;
        }
        for line in &self.cfg.file_imports {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }

    fn setter_type(&self, out: &mut String) {
        out.push_str(&format!(
            "/// A single configuration step for [`{}`].\n",
            self.cfg.struct_name
        ));
        if self.cfg.with_isset {
            out.push_str(&format!(
                "pub struct {}{}(Box<dyn FnOnce(&mut {}, &mut {})>);\n\n",
                self.cfg.option_type_name, self.generics_decl, self.struct_ref, self.isset_name
            ));
        } else {
            out.push_str(&format!(
                "pub struct {}{}(Box<dyn FnOnce(&mut {})>);\n\n",
                self.cfg.option_type_name, self.generics_decl, self.struct_ref
            ));
        }
    }

    fn isset_struct(&self, out: &mut String) {
        out.push_str("/// Records which fields were explicitly assigned during construction.\n");
        out.push_str("#[derive(Debug, Clone, Default, PartialEq, Eq)]\n");
        out.push_str(&format!("pub struct {} {{\n", self.isset_name));
        for opt in &self.cfg.spec.options {
            out.push_str(&format!("    pub {}: bool,\n", opt.field));
        }
        out.push_str("}\n\n");
    }

    fn constructor(&self, out: &mut String) {
        let vis = match self.cfg.constructor {
            ConstructorKind::Public => "pub ",
            ConstructorKind::Private => "",
            ConstructorKind::None => return,
        };

        let name = format!(
            "new_{}{}",
            self.fn_prefix,
            self.cfg.struct_name.to_case(Case::Snake)
        );

        let ret = if self.cfg.with_isset {
            format!("({}, {})", self.struct_ref, self.isset_name)
        } else {
            self.struct_ref.clone()
        };

        out.push_str(&format!(
            "/// Builds [`{}`] from its mandatory fields and a list of option setters.\n",
            self.cfg.struct_name
        ));
        out.push_str(&format!("{vis}fn {name}{}(\n", self.generics_decl));
        for opt in &self.cfg.spec.options {
            if opt.tag.is_required {
                out.push_str(&format!("    {}: {},\n", opt.field, opt.ty));
            }
        }
        out.push_str(&format!(
            "    options: impl IntoIterator<Item = {}>,\n",
            self.setter_ref
        ));
        out.push_str(&format!(") -> {ret}\n"));

        // Default initialization source.
        if !self.cfg.var_name.is_empty() {
            out.push_str("{\n");
            out.push_str(&format!(
                "    let mut o: {} = {}.clone();\n",
                self.struct_ref, self.cfg.var_name
            ));
        } else if !self.cfg.func_name.is_empty() {
            out.push_str("{\n");
            out.push_str(&format!(
                "    let mut o: {} = {}();\n",
                self.struct_ref, self.cfg.func_name
            ));
        } else {
            out.push_str(&format!("where\n    {}: Default,\n{{\n", self.struct_ref));
            out.push_str(&format!(
                "    let mut o: {} = Default::default();\n",
                self.struct_ref
            ));
        }

        if self.cfg.with_isset {
            out.push_str(&format!(
                "    let mut isset = {}::default();\n",
                self.isset_name
            ));
        }

        for opt in &self.cfg.spec.options {
            if !opt.tag.default.is_empty() {
                out.push_str(&format!(
                    "    o.{} = {};\n",
                    opt.field,
                    default_expr(opt)
                ));
            }
        }

        for opt in &self.cfg.spec.options {
            if opt.tag.is_required {
                out.push_str(&format!("    o.{0} = {0};\n", opt.field));
                if self.cfg.with_isset {
                    out.push_str(&format!("    isset.{} = true;\n", opt.field));
                }
            }
        }

        out.push_str("    for opt in options {\n");
        if self.cfg.with_isset {
            out.push_str("        (opt.0)(&mut o, &mut isset);\n");
        } else {
            out.push_str("        (opt.0)(&mut o);\n");
        }
        out.push_str("    }\n");
        if self.cfg.with_isset {
            out.push_str("    (o, isset)\n");
        } else {
            out.push_str("    o\n");
        }
        out.push_str("}\n\n");
    }

    fn setters(&self, out: &mut String) {
        for opt in &self.cfg.spec.options {
            if opt.tag.is_required {
                continue;
            }
            self.setter(out, opt);
        }
    }

    fn setter(&self, out: &mut String, opt: &FieldSpec) {
        for line in &opt.docstring {
            out.push_str(&format!("/// {line}\n"));
        }

        let name = format!("with_{}{}", self.fn_prefix, opt.field);

        if opt.tag.variadic {
            out.push_str(&format!(
                "pub fn {name}{}(opt: impl IntoIterator<Item = {}>) -> {} {{\n",
                self.generics_decl, opt.ty, self.setter_ref
            ));
            out.push_str(&format!(
                "    let opt: Vec<{}> = opt.into_iter().collect();\n",
                opt.ty
            ));
        } else {
            out.push_str(&format!(
                "pub fn {name}{}(opt: {}) -> {} {{\n",
                self.generics_decl, opt.ty, self.setter_ref
            ));
        }

        if self.cfg.with_isset {
            out.push_str(&format!(
                "    {}(Box::new(move |o, isset| {{\n",
                self.cfg.option_type_name
            ));
            out.push_str(&format!("        o.{} = opt;\n", opt.field));
            out.push_str(&format!("        isset.{} = true;\n", opt.field));
        } else {
            out.push_str(&format!(
                "    {}(Box::new(move |o| {{\n",
                self.cfg.option_type_name
            ));
            out.push_str(&format!("        o.{} = opt;\n", opt.field));
        }
        out.push_str("    }))\n");
        out.push_str("}\n\n");
    }

    fn validate_impl(&self, out: &mut String) {
        out.push_str(&format!(
            "impl{} {} {{\n",
            self.generics_decl, self.struct_ref
        ));
        out.push_str("    /// Checks every field against its declared validation rules.\n");
        out.push_str(
            "    pub fn validate(&self) -> Result<(), ::options_gen::ValidationErrors> {\n",
        );
        out.push_str("        let evaluator = ::options_gen::evaluator();\n");
        out.push_str("        let mut errs = ::options_gen::ValidationErrors::new();\n");
        for opt in &self.cfg.spec.options {
            if opt.tag.validator.is_empty() {
                continue;
            }
            out.push_str(&format!(
                "        errs.add({0:?}, evaluator.eval({0:?}, &self.{1}, {2:?}));\n",
                opt.name, opt.field, opt.tag.validator
            ));
        }
        out.push_str("        errs.into_result()\n");
        out.push_str("    }\n");
        out.push_str("}\n");
    }
}

/// The initializer expression for a tag default.
fn default_expr(opt: &FieldSpec) -> String {
    if is_duration_type(&opt.ty) {
        format!(
            "::options_gen::duration::parse({:?}).expect(\"validated duration literal\")",
            opt.tag.default
        )
    } else if is_string_type(&opt.ty) {
        format!("{:?}.into()", opt.tag.default)
    } else {
        opt.tag.default.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::TagOption;

    fn field(name: &str, field: &str, ty: &str, tag: TagOption) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            docstring: Vec::new(),
            field: field.to_string(),
            ty: ty.to_string(),
            tag,
        }
    }

    fn base_config(spec: OptionSpec) -> RenderConfig {
        RenderConfig {
            version: "0.1.0".to_string(),
            package_name: "client".to_string(),
            struct_name: "Options".to_string(),
            file_imports: Vec::new(),
            spec,
            tag_name: "default".to_string(),
            option_type_name: "OptOptionsSetter".to_string(),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_config_validation() {
        let mut cfg = base_config(OptionSpec::default());
        cfg.version = String::new();
        assert!(matches!(render(&cfg), Err(RenderError::MissingVersion)));

        let mut cfg = base_config(OptionSpec::default());
        cfg.struct_name = String::new();
        assert!(matches!(render(&cfg), Err(RenderError::MissingStructName)));

        let mut cfg = base_config(OptionSpec::default());
        cfg.var_name = "DEFAULT_OPTIONS".to_string();
        assert!(matches!(
            render(&cfg),
            Err(RenderError::ConflictingDefaults)
        ));
    }

    #[test]
    fn test_marker_comment_with_version() {
        let cfg = base_config(OptionSpec::default());
        let out = render(&cfg).unwrap();
        assert!(out.starts_with("// Code generated by options-gen v0.1.0. DO NOT EDIT.\n"));
    }

    #[test]
    fn test_mandatory_field_has_no_setter() {
        let spec = OptionSpec {
            options: vec![
                field(
                    "Token",
                    "token",
                    "String",
                    TagOption {
                        is_required: true,
                        ..TagOption::default()
                    },
                ),
                field("Name", "name", "String", TagOption::default()),
            ],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();

        assert!(out.contains("    token: String,\n"));
        assert!(out.contains("pub fn with_name(opt: String)"));
        assert!(!out.contains("pub fn with_token"));
        assert!(out.contains("o.token = token;"));
    }

    #[test]
    fn test_duration_default_initializes_via_parser() {
        let spec = OptionSpec {
            options: vec![field(
                "Timeout",
                "timeout",
                "Duration",
                TagOption {
                    default: "3s".to_string(),
                    ..TagOption::default()
                },
            )],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();

        assert!(out.contains(r#"o.timeout = ::options_gen::duration::parse("3s")"#));
    }

    #[test]
    fn test_string_and_numeric_defaults() {
        let spec = OptionSpec {
            options: vec![
                field(
                    "Name",
                    "name",
                    "String",
                    TagOption {
                        default: "golang".to_string(),
                        ..TagOption::default()
                    },
                ),
                field(
                    "Retries",
                    "retries",
                    "u32",
                    TagOption {
                        default: "5".to_string(),
                        ..TagOption::default()
                    },
                ),
            ],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();

        assert!(out.contains(r#"o.name = "golang".into();"#));
        assert!(out.contains("o.retries = 5;"));
    }

    #[test]
    fn test_generic_constructor() {
        let spec = OptionSpec {
            type_params_spec: "<T: Clone>".to_string(),
            type_params: "<T>".to_string(),
            options: vec![field(
                "Key",
                "key",
                "T",
                TagOption {
                    is_required: true,
                    ..TagOption::default()
                },
            )],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();

        assert!(out.contains("pub fn new_options<T: Clone>("));
        assert!(out.contains("key: T,"));
        assert!(out.contains("-> Options<T>"));
        assert!(out.contains("pub struct OptOptionsSetter<T: Clone>(Box<dyn FnOnce(&mut Options<T>)>);"));
    }

    #[test]
    fn test_variadic_setter_collects() {
        let spec = OptionSpec {
            options: vec![field(
                "Hosts",
                "hosts",
                "String",
                TagOption {
                    variadic: true,
                    variadic_is_set: true,
                    ..TagOption::default()
                },
            )],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();

        assert!(out.contains("pub fn with_hosts(opt: impl IntoIterator<Item = String>)"));
        assert!(out.contains("let opt: Vec<String> = opt.into_iter().collect();"));
    }

    #[test]
    fn test_isset_companion() {
        let spec = OptionSpec {
            options: vec![
                field(
                    "Token",
                    "token",
                    "String",
                    TagOption {
                        is_required: true,
                        ..TagOption::default()
                    },
                ),
                field("Name", "name", "String", TagOption::default()),
            ],
            ..OptionSpec::default()
        };
        let mut cfg = base_config(spec);
        cfg.with_isset = true;
        let out = render(&cfg).unwrap();

        assert!(out.contains("pub struct OptionsIsset {"));
        assert!(out.contains("-> (Options, OptionsIsset)"));
        assert!(out.contains("isset.token = true;"));
        assert!(out.contains("(opt.0)(&mut o, &mut isset);"));
        assert!(out.contains("Box<dyn FnOnce(&mut Options, &mut OptionsIsset)>"));
    }

    #[test]
    fn test_validation_block_only_when_rules_exist() {
        let spec = OptionSpec {
            options: vec![field("Name", "name", "String", TagOption::default())],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();
        assert!(!out.contains("fn validate"));

        let spec = OptionSpec {
            options: vec![field(
                "Name",
                "name",
                "String",
                TagOption {
                    validator: "required".to_string(),
                    ..TagOption::default()
                },
            )],
            ..OptionSpec::default()
        };
        let out = render(&base_config(spec)).unwrap();
        assert!(out.contains("pub fn validate(&self) -> Result<(), ::options_gen::ValidationErrors>"));
        assert!(out.contains(r#"evaluator.eval("Name", &self.name, "required")"#));
    }

    #[test]
    fn test_defaults_from_var_and_func() {
        let spec = OptionSpec {
            options: vec![field("Name", "name", "String", TagOption::default())],
            ..OptionSpec::default()
        };

        let mut cfg = base_config(spec.clone());
        cfg.tag_name = String::new();
        cfg.var_name = "DEFAULT_OPTIONS".to_string();
        let out = render(&cfg).unwrap();
        assert!(out.contains("let mut o: Options = DEFAULT_OPTIONS.clone();"));

        let mut cfg = base_config(spec);
        cfg.tag_name = String::new();
        cfg.func_name = "default_options".to_string();
        let out = render(&cfg).unwrap();
        assert!(out.contains("let mut o: Options = default_options();"));
    }

    #[test]
    fn test_prefix_namespaces_generated_names() {
        let spec = OptionSpec {
            options: vec![field("Name", "name", "String", TagOption::default())],
            ..OptionSpec::default()
        };
        let mut cfg = base_config(spec);
        cfg.prefix = "Grpc".to_string();
        let out = render(&cfg).unwrap();

        assert!(out.contains("fn new_grpc_options"));
        assert!(out.contains("pub fn with_grpc_name"));
    }

    #[test]
    fn test_no_constructor_mode() {
        let spec = OptionSpec {
            options: vec![field("Name", "name", "String", TagOption::default())],
            ..OptionSpec::default()
        };
        let mut cfg = base_config(spec);
        cfg.constructor = ConstructorKind::None;
        let out = render(&cfg).unwrap();
        assert!(!out.contains("fn new_options"));
        assert!(out.contains("pub fn with_name"));

        cfg.constructor = ConstructorKind::Private;
        let out = render(&cfg).unwrap();
        assert!(out.contains("\nfn new_options(\n"));
        assert!(!out.contains("pub fn new_options"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let spec = OptionSpec {
            options: vec![field("Name", "name", "String", TagOption::default())],
            ..OptionSpec::default()
        };
        let cfg = base_config(spec);
        assert_eq!(render(&cfg).unwrap(), render(&cfg).unwrap());
    }
}

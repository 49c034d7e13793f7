//! Structured field metadata extracted from the target struct.

/// Per-field directives parsed from the `#[option(...)]` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOption {
    /// Field must be passed positionally to the constructor.
    pub is_required: bool,

    /// Verbatim rule expression from `validate = "..."`. Empty when absent.
    /// The grammar is owned by the installed rule evaluator, not by us.
    pub validator: String,

    /// Default literal from the configured default directive. Empty when absent.
    pub default: String,

    /// Field takes its values through a variadic setter.
    pub variadic: bool,

    /// Whether `variadic` was written explicitly (as opposed to being
    /// implied by all-variadic mode).
    pub variadic_is_set: bool,

    /// Field is excluded from generation entirely.
    pub skip: bool,
}

/// One option field of the target struct, in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// PascalCase display name, used in setter naming and diagnostics.
    pub name: String,

    /// Doc comment lines attached to the field, without the `///` markers.
    pub docstring: Vec<String>,

    /// Original field identifier.
    pub field: String,

    /// Canonical type string. For variadic fields this is the element type.
    pub ty: String,

    /// Parsed directives.
    pub tag: TagOption,
}

/// The full extracted option spec for one struct.
///
/// `options` keeps declaration order; that order becomes the constructor's
/// positional argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec {
    /// Declaration-form generic parameter list, e.g. `<T: Clone, U>`.
    /// Empty for non-generic structs.
    pub type_params_spec: String,

    /// Reference-form generic parameter list, e.g. `<T, U>`.
    pub type_params: String,

    /// Option fields in declaration order.
    pub options: Vec<FieldSpec>,
}

impl OptionSpec {
    /// Whether any field carries a validation rule.
    pub fn has_validation(&self) -> bool {
        self.options.iter().any(|o| !o.tag.validator.is_empty())
    }
}

/// Extraction result: the spec plus advisory warnings and the owning file's
/// verbatim `use` lines.
#[derive(Debug, Clone, Default)]
pub struct OptionSpecResult {
    pub spec: OptionSpec,
    pub warnings: Vec<String>,
    pub imports: Vec<String>,
}

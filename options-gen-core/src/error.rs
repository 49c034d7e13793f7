//! Error types for the generation pipeline.
//!
//! Every stage has its own error enum; the CLI aggregates them. All of these
//! are fatal and single-pass: a failed stage aborts the request before the
//! output file is written. Advisory conditions travel as warning strings
//! instead, collected by the extractor.

use std::path::PathBuf;

use thiserror::Error;

/// Error while locating the target struct in the source tree.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Target struct not declared in any parsed file.
    #[error("cannot find target struct `{name}`")]
    StructNotFound { name: String },

    /// Target declaration exists but is a tuple or unit struct.
    #[error("`{name}` is not a named-field struct")]
    NotNamedFields { name: String },

    /// A source file failed to parse.
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A module path resolved to no file on disk.
    #[error("cannot load module `{module}`: no file at {path}")]
    ModuleNotFound { module: String, path: PathBuf },

    /// IO error while reading source files.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error validating a default literal against the field's type.
#[derive(Debug, Error)]
pub enum DefaultValueError {
    /// The field's type has no supported literal form.
    #[error("unsupported type `{ty}` for default values")]
    Unsupported { ty: String },

    /// `bool` defaults accept exactly `true` or `false`.
    #[error("bool type only supports true/false")]
    BadBool,

    /// The literal failed to parse for the field's type.
    #[error("bad default value `{literal}`: {message}")]
    BadValue { literal: String, message: String },
}

/// Error resolving a field type to a `Vec` element type.
#[derive(Debug, Error)]
pub enum VariadicError {
    /// The type is not Vec-shaped. Not always fatal: the extractor keeps
    /// the field plain when variadism was only implied by all-variadic mode.
    #[error("it is not a Vec-shaped type")]
    NotVec,

    /// The named alias does not exist in the resolved module.
    #[error("type `{name}` not found in the resolved module")]
    TypeNotFound { name: String },

    /// Failure loading the external module.
    #[error(transparent)]
    Locate(#[from] LocateError),
}

/// Error extracting the option spec from the target struct.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input file does not exist.
    #[error("source file not exist: {path}")]
    SourceNotFound { path: PathBuf },

    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A field carries both `mandatory` and a default directive.
    #[error("field `{field}`: mandatory option cannot have a default value")]
    MandatoryWithDefault { field: String },

    /// The default literal does not fit the field's type.
    #[error("field `{field}`: invalid `{tag_name}` value: {source}")]
    BadDefault {
        field: String,
        tag_name: String,
        #[source]
        source: DefaultValueError,
    },

    /// Explicit `variadic = true` on a mandatory field.
    #[error("field `{field}`: a mandatory field cannot be variadic")]
    MandatoryVariadic { field: String },

    /// Explicitly variadic field whose type cannot supply an element type.
    #[error("field `{field}`: this type cannot be variadic: {source}")]
    NotVariadicType {
        field: String,
        #[source]
        source: VariadicError,
    },
}

/// Error in the render configuration, checked before any output is built.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("bad configuration: version must not be empty")]
    MissingVersion,

    #[error("bad configuration: package name must not be empty")]
    MissingPackageName,

    #[error("bad configuration: struct name must not be empty")]
    MissingStructName,

    #[error("bad configuration: setter type name must not be empty")]
    MissingSetterTypeName,

    /// At most one of tag/var/func default sources may be configured.
    #[error("bad configuration: defaults can come from only one source")]
    ConflictingDefaults,
}

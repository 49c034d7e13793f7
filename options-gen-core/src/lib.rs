//! # options-gen-core
//!
//! The extraction and rendering pipeline behind the `options-gen` CLI.
//!
//! A generation request flows through:
//!
//! 1. [`locate`] — parse every `.rs` file next to the input into a forest
//!    and find the target struct, following `type X = module::Y;` aliases
//!    into sibling modules,
//! 2. [`extract`] — walk the fields in declaration order, parsing
//!    `#[option(...)]` directives, validating default literals, and
//!    resolving variadic fields to their `Vec` element type,
//! 3. [`extract::apply_excludes`] — drop fields matching exclusion patterns,
//! 4. [`render`] — emit the generated source: constructor, fluent setters,
//!    optional isset companion, and the validation method.
//!
//! Formatting and import pruning of the emitted file are left to downstream
//! tooling; the pipeline itself is synchronous and single-pass.

pub mod defaults;
pub mod error;
pub mod extract;
pub mod generics;
pub mod locate;
pub mod render;
pub mod spec;
pub mod tag;
pub mod types;
pub mod variadic;

pub use error::{DefaultValueError, ExtractError, LocateError, RenderError, VariadicError};
pub use extract::{apply_excludes, get_option_spec};
pub use render::{render, ConstructorKind, RenderConfig};
pub use spec::{FieldSpec, OptionSpec, OptionSpecResult, TagOption};

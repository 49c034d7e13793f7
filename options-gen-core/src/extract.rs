//! Extraction of the option spec from a source file.
//!
//! This is the front half of the pipeline: locate the struct, walk its
//! fields in declaration order, apply directive policy, and produce the
//! [`OptionSpecResult`] the renderer consumes.

use std::path::Path;

use convert_case::{Case, Casing};
use regex::Regex;

use crate::defaults::check_default_value;
use crate::error::{ExtractError, VariadicError};
use crate::generics::type_params_strings;
use crate::locate::SourceTree;
use crate::spec::{FieldSpec, OptionSpec, OptionSpecResult};
use crate::tag::{doc_lines, parse_tag};
use crate::types::type_string;
use crate::variadic::vec_elem_type;

/// Read `file_path`, find `struct_name`, and extract its option spec.
///
/// `default_tag` names the directive key for defaults (empty when defaults
/// do not come from directives). `all_variadic` turns every Vec-shaped
/// non-mandatory field into a variadic one.
pub fn get_option_spec(
    file_path: &Path,
    struct_name: &str,
    default_tag: &str,
    all_variadic: bool,
) -> Result<OptionSpecResult, ExtractError> {
    if !file_path.exists() {
        return Err(ExtractError::SourceNotFound {
            path: file_path.to_path_buf(),
        });
    }

    let root = file_path.parent().unwrap_or(Path::new("."));
    let tree = SourceTree::new(root);
    let located = tree.find_struct(struct_name)?;

    let mut options = Vec::with_capacity(located.fields.len());
    let mut warnings = Vec::new();

    for field in &located.fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.to_string();

        let (tag, tag_warnings) = parse_tag(&field.attrs, &field_name, default_tag);
        if tag.skip {
            continue;
        }

        if matches!(field.vis, syn::Visibility::Public(_)) {
            warnings.push(format!(
                "Warning: consider making `{field_name}` private. A public field \
                 lets callers bypass the constructor."
            ));
        }
        warnings.extend(tag_warnings);

        let mut meta = FieldSpec {
            name: field_name.to_case(Case::Pascal),
            docstring: doc_lines(&field.attrs),
            field: field_name.clone(),
            ty: type_string(&field.ty),
            tag,
        };

        if !meta.tag.default.is_empty() {
            if meta.tag.is_required {
                return Err(ExtractError::MandatoryWithDefault { field: field_name });
            }

            check_default_value(&meta.ty, &meta.tag.default).map_err(|source| {
                ExtractError::BadDefault {
                    field: field_name.clone(),
                    tag_name: default_tag.to_string(),
                    source,
                }
            })?;
        }

        if meta.tag.variadic || all_variadic {
            if meta.tag.is_required {
                if meta.tag.variadic {
                    return Err(ExtractError::MandatoryVariadic { field: field_name });
                }

                // All-variadic mode leaves mandatory fields plain.
                options.push(meta);
                continue;
            }

            match vec_elem_type(&tree, &located.file, &field.ty) {
                Ok(elem) => {
                    if !meta.tag.variadic_is_set {
                        meta.tag.variadic = all_variadic;
                    }
                    if meta.tag.variadic {
                        meta.ty = elem;
                    }
                }
                Err(VariadicError::NotVec) if !meta.tag.variadic => {
                    // Implicit variadism on a non-Vec field: keep it plain.
                    options.push(meta);
                    continue;
                }
                Err(source) => {
                    return Err(ExtractError::NotVariadicType {
                        field: field_name,
                        source,
                    });
                }
            }
        }

        options.push(meta);
    }

    let (type_params_spec, type_params) = type_params_strings(&located.generics);

    Ok(OptionSpecResult {
        spec: OptionSpec {
            type_params_spec,
            type_params,
            options,
        },
        warnings,
        imports: located.imports,
    })
}

/// Drop fields whose display name matches any exclusion pattern.
///
/// Builds a fresh vector, preserving relative order of the kept fields.
pub fn apply_excludes(options: Vec<FieldSpec>, excludes: &[Regex]) -> Vec<FieldSpec> {
    if excludes.is_empty() {
        return options;
    }

    options
        .into_iter()
        .filter(|opt| !excludes.iter().any(|re| re.is_match(&opt.name)))
        .collect()
}

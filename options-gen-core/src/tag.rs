//! Parsing of per-field `#[option(...)]` directives.
//!
//! This is a pure function over the field's attributes: it never fails, it
//! only produces a [`TagOption`] plus advisory warnings. Policy decisions
//! (what a directive combination means) belong to the extractor.

use syn::{Attribute, Expr, Lit, Meta};

use crate::spec::TagOption;

/// Parse the `#[option(...)]` directives of one field.
///
/// Recognized directives: `mandatory`, `required` (deprecated alias),
/// `not_empty` (deprecated), `variadic = <bool>`, `skip`,
/// `validate = "<rules>"`, and `<default_tag> = "<literal>"` where the key
/// name comes from the caller's configuration. Unknown keys are ignored;
/// duplicates are last-write-wins.
pub fn parse_tag(
    attrs: &[Attribute],
    field_name: &str,
    default_tag: &str,
) -> (TagOption, Vec<String>) {
    let mut tag = TagOption::default();
    let mut warnings = Vec::new();

    // Collect the directives first: `not_empty` must append against the
    // final validator expression, regardless of directive order.
    let mut metas: Vec<(String, Option<Lit>)> = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("option") {
            continue;
        }

        let parsed = attr.parse_nested_meta(|meta| {
            let key = match meta.path.get_ident() {
                Some(ident) => ident.to_string(),
                None => return Ok(()),
            };
            let value = if meta.input.peek(syn::Token![=]) {
                Some(meta.value()?.parse::<Lit>()?)
            } else {
                None
            };
            metas.push((key, value));
            Ok(())
        });

        if let Err(err) = parsed {
            warnings.push(format!(
                "Warning: malformed `#[option]` attribute on field `{field_name}`: {err}"
            ));
        }
    }

    for (key, value) in &metas {
        match key.as_str() {
            "validate" => {
                if let Some(Lit::Str(s)) = value {
                    tag.validator = s.value();
                }
            }
            key if !default_tag.is_empty() && key == default_tag => {
                if let Some(Lit::Str(s)) = value {
                    tag.default = s.value();
                }
            }
            _ => {}
        }
    }

    for (key, value) in &metas {
        match key.as_str() {
            "mandatory" => tag.is_required = true,
            "required" => {
                warnings.push(format!(
                    "Deprecated: use `#[option(mandatory)]` instead for field `{field_name}` \
                     to force passing the option as a constructor argument"
                ));
                tag.is_required = true;
            }
            "not_empty" => {
                warnings.push(format!(
                    "Deprecated: use `#[option(validate = \"required\")]` to check \
                     the content of field `{field_name}`"
                ));
                if !tag.validator.contains("required") {
                    if tag.validator.is_empty() {
                        tag.validator = "required".to_string();
                    } else {
                        tag.validator.push_str(",required");
                    }
                }
            }
            "variadic" => {
                match value {
                    Some(Lit::Bool(b)) => tag.variadic = b.value,
                    _ => warnings.push(format!(
                        "Error: cannot parse `variadic` for the field `{field_name}`: \
                         expected true or false"
                    )),
                }
                tag.variadic_is_set = true;
            }
            "skip" => tag.skip = true,
            _ => {}
        }
    }

    (tag, warnings)
}

/// Collect the `///` doc comment lines of a field, without markers.
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let mut lines = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta {
            if let Expr::Lit(expr) = &nv.value {
                if let Lit::Str(s) = &expr.lit {
                    let text = s.value();
                    lines.push(text.strip_prefix(' ').unwrap_or(&text).to_string());
                }
            }
        }
    }

    lines
}

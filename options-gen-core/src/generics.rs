//! Generic parameter list rendering.
//!
//! The generated file needs two views of the struct's generics: the
//! declaration form with bounds (for the setter type and free functions) and
//! the bare reference form (for type positions). Both are produced together;
//! they are empty together or non-empty together.

use quote::ToTokens;

use crate::types::{tokens_string, type_string};

/// Render `(declaration_form, reference_form)` for a generic parameter list.
///
/// `<T1: Clone + Default, T2, T3>` yields
/// `("<T1: Clone + Default, T2, T3>", "<T1, T2, T3>")`. A struct without
/// generics yields `("", "")`.
pub fn type_params_strings(generics: &syn::Generics) -> (String, String) {
    if generics.params.is_empty() {
        return (String::new(), String::new());
    }

    let mut decls = Vec::with_capacity(generics.params.len());
    let mut names = Vec::with_capacity(generics.params.len());

    for param in &generics.params {
        match param {
            syn::GenericParam::Type(ty) => {
                names.push(ty.ident.to_string());
                if ty.bounds.is_empty() {
                    decls.push(ty.ident.to_string());
                } else {
                    let bounds: Vec<String> = ty
                        .bounds
                        .iter()
                        .map(|b| tokens_string(b.to_token_stream()))
                        .collect();
                    decls.push(format!("{}: {}", ty.ident, bounds.join(" + ")));
                }
            }
            syn::GenericParam::Lifetime(lt) => {
                names.push(lt.lifetime.to_string());
                if lt.bounds.is_empty() {
                    decls.push(lt.lifetime.to_string());
                } else {
                    let bounds: Vec<String> =
                        lt.bounds.iter().map(|b| b.to_string()).collect();
                    decls.push(format!("{}: {}", lt.lifetime, bounds.join(" + ")));
                }
            }
            syn::GenericParam::Const(konst) => {
                names.push(konst.ident.to_string());
                decls.push(format!(
                    "const {}: {}",
                    konst.ident,
                    type_string(&konst.ty)
                ));
            }
        }
    }

    (
        format!("<{}>", decls.join(", ")),
        format!("<{}>", names.join(", ")),
    )
}

//! Canonical type-string rendering.
//!
//! The extracted spec stores types as strings because the renderer works in
//! text. Common shapes get explicit handling so the output stays predictable;
//! anything else goes through a token printer with normalized spacing.

use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use quote::ToTokens;

/// Render a type in canonical display form.
pub fn type_string(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => path_string(&type_path.path),
        syn::Type::Reference(reference) => {
            let mut out = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                out.push_str(&format!("{} ", lifetime));
            }
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            out.push_str(&type_string(&reference.elem));
            out
        }
        syn::Type::Slice(slice) => format!("[{}]", type_string(&slice.elem)),
        syn::Type::Array(array) => format!(
            "[{}; {}]",
            type_string(&array.elem),
            tokens_string(array.len.to_token_stream())
        ),
        syn::Type::Tuple(tuple) => {
            let elems: Vec<String> = tuple.elems.iter().map(type_string).collect();
            if elems.len() == 1 {
                format!("({},)", elems[0])
            } else {
                format!("({})", elems.join(", "))
            }
        }
        other => tokens_string(other.to_token_stream()),
    }
}

/// Render a (possibly generic, possibly qualified) path like
/// `collections::HashMap<String, u32>`.
pub fn path_string(path: &syn::Path) -> String {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }

    for (i, segment) in path.segments.iter().enumerate() {
        if i != 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.to_string());

        match &segment.arguments {
            syn::PathArguments::None => {}
            syn::PathArguments::AngleBracketed(args) => {
                let rendered: Vec<String> = args
                    .args
                    .iter()
                    .map(|arg| match arg {
                        syn::GenericArgument::Type(ty) => type_string(ty),
                        other => tokens_string(other.to_token_stream()),
                    })
                    .collect();
                out.push('<');
                out.push_str(&rendered.join(", "));
                out.push('>');
            }
            syn::PathArguments::Parenthesized(args) => {
                out.push_str(&tokens_string(args.to_token_stream()));
            }
        }
    }

    out
}

/// Print a token stream with normalized spacing.
///
/// Rules: no spaces inside punctuation runs (`::`, `->`), a space after `,`
/// and around `->` and `+`, a space between adjacent word-like tokens
/// (`dyn Fn`, `mut T`).
pub fn tokens_string(tokens: TokenStream) -> String {
    let mut out = String::new();
    render_tokens(tokens, &mut out);
    out
}

fn render_tokens(tokens: TokenStream, out: &mut String) {
    let mut pending_joint = false;

    for tree in tokens {
        match tree {
            TokenTree::Ident(ident) => {
                if ends_wordlike(out) {
                    out.push(' ');
                }
                out.push_str(&ident.to_string());
                pending_joint = false;
            }
            TokenTree::Literal(lit) => {
                if ends_wordlike(out) {
                    out.push(' ');
                }
                out.push_str(&lit.to_string());
                pending_joint = false;
            }
            TokenTree::Punct(punct) => {
                let ch = punct.as_char();
                if !pending_joint && (ch == '+' || ch == '-' || ch == '|') && !out.is_empty() {
                    out.push(' ');
                }
                out.push(ch);
                if punct.spacing() == Spacing::Joint {
                    pending_joint = true;
                } else {
                    pending_joint = false;
                    match ch {
                        ',' => out.push(' '),
                        '>' if out.ends_with("->") => out.push(' '),
                        '+' | '|' => out.push(' '),
                        _ => {}
                    }
                }
            }
            TokenTree::Group(group) => {
                let (open, close) = match group.delimiter() {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::None => ("", ""),
                };
                out.push_str(open);
                render_tokens(group.stream(), out);
                out.push_str(close);
                pending_joint = false;
            }
        }
    }
}

fn ends_wordlike(out: &str) -> bool {
    out.chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '"')
}

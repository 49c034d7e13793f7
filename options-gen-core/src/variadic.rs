//! Resolution of Vec-shaped field types to their element type.
//!
//! A variadic field needs an element type for its setter signature. The type
//! may be a literal `Vec<T>`, a local alias chain ending in one, or an alias
//! declared in a sibling module. "Not Vec-shaped" is a distinguishable
//! condition, not always an error: the extractor keeps the field plain when
//! variadism was only implied by all-variadic mode.

use crate::error::VariadicError;
use crate::locate::{declared_type_names, use_table, SourceFile, SourceTree};
use crate::types::type_string;

/// Resolve the element type of a Vec-shaped field type, as a canonical
/// string. `owner` is the file declaring the target struct.
pub fn vec_elem_type(
    tree: &SourceTree,
    owner: &SourceFile,
    ty: &syn::Type,
) -> Result<String, VariadicError> {
    match ty {
        syn::Type::Slice(slice) => Ok(type_string(&slice.elem)),
        syn::Type::Array(array) => Ok(type_string(&array.elem)),
        syn::Type::Path(type_path) if type_path.qself.is_none() => {
            let path = &type_path.path;

            if path.segments.len() == 1 {
                let seg = &path.segments[0];
                if seg.ident == "Vec" {
                    return vec_argument(seg).ok_or(VariadicError::NotVec);
                }
                if seg.arguments.is_none() {
                    // A bare identifier may be a local alias of a Vec.
                    return resolve_local_alias(tree, owner, &seg.ident.to_string());
                }
                return Err(VariadicError::NotVec);
            }

            resolve_module_alias(tree, owner, path)
        }
        _ => Err(VariadicError::NotVec),
    }
}

/// The `T` of a `Vec<T>` path segment.
fn vec_argument(segment: &syn::PathSegment) -> Option<String> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(type_string(inner)),
        _ => None,
    })
}

/// Follow `type X = ...;` declared in the owning file.
fn resolve_local_alias(
    tree: &SourceTree,
    owner: &SourceFile,
    name: &str,
) -> Result<String, VariadicError> {
    for item in &owner.ast.items {
        if let syn::Item::Type(item_type) = item {
            if item_type.ident == name {
                return vec_elem_type(tree, owner, &item_type.ty);
            }
        }
    }

    Err(VariadicError::NotVec)
}

/// Follow `alias::Name` into the module that declares `Name`.
///
/// The element type of the resolved `Vec` is re-qualified from the owning
/// file's perspective: a type declared in that module gets the local alias
/// prefix, anything already qualified or primitive passes through.
fn resolve_module_alias(
    tree: &SourceTree,
    owner: &SourceFile,
    path: &syn::Path,
) -> Result<String, VariadicError> {
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let type_name = segments.last().expect("non-empty path").clone();

    let module_segments = module_path_for(owner, &segments[..segments.len() - 1]);
    let module = tree.load_module(&owner.dir, &module_segments)?;

    let target = module
        .ast
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Type(item_type) if item_type.ident == type_name => {
                Some(Some(item_type.ty.as_ref().clone()))
            }
            syn::Item::Struct(s) if s.ident == type_name => Some(None),
            syn::Item::Enum(e) if e.ident == type_name => Some(None),
            _ => None,
        })
        .ok_or(VariadicError::TypeNotFound { name: type_name })?;

    // A struct or enum of that name is resolvable but not Vec-shaped.
    let Some(alias_target) = target else {
        return Err(VariadicError::NotVec);
    };

    let syn::Type::Path(target_path) = &alias_target else {
        return Err(VariadicError::NotVec);
    };
    if target_path.qself.is_some() || target_path.path.segments.len() != 1 {
        return Err(VariadicError::NotVec);
    }
    let seg = &target_path.path.segments[0];
    if seg.ident != "Vec" {
        return Err(VariadicError::NotVec);
    }
    let elem = vec_argument(seg).ok_or(VariadicError::NotVec)?;

    // Re-qualify a bare element name declared in the module.
    if is_bare_ident(&elem) && declared_type_names(&module.ast).contains(&elem) {
        let local_prefix = segments[..segments.len() - 1].join("::");
        return Ok(format!("{local_prefix}::{elem}"));
    }

    Ok(elem)
}

/// Resolve the module prefix of a qualified alias path, mirroring the
/// locator's rules: sibling `mod` first, then the use-table, then
/// file-relative fallback.
fn module_path_for(owner: &SourceFile, prefix: &[String]) -> Vec<String> {
    let leading = &prefix[0];

    let declares_mod = owner.ast.items.iter().any(|item| {
        matches!(item, syn::Item::Mod(m) if m.content.is_none() && m.ident == leading.as_str())
    });
    if declares_mod {
        let mut out = vec!["self".to_string()];
        out.extend_from_slice(prefix);
        return out;
    }

    if leading == "crate" || leading == "self" || leading == "super" {
        return prefix.to_vec();
    }

    let table = use_table(&owner.ast);
    if let Some(mapped) = table.get(leading) {
        let mut out = mapped.clone();
        out.extend_from_slice(&prefix[1..]);
        return out;
    }

    let mut out = vec!["self".to_string()];
    out.extend_from_slice(prefix);
    out
}

fn is_bare_ident(s: &str) -> bool {
    !s.is_empty()
        && !s.contains("::")
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, SourceTree) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let tree = SourceTree::new(dir.path());
        (dir, tree)
    }

    fn owner_of(tree: &SourceTree, dir: &Path, name: &str) -> SourceFile {
        let path = dir.join(name);
        SourceFile {
            ast: tree.load_file(&path).unwrap(),
            dir: dir.to_path_buf(),
            path,
        }
    }

    fn ty(src: &str) -> syn::Type {
        syn::parse_str(src).unwrap()
    }

    #[test]
    fn test_plain_vec() {
        let (dir, tree) = setup(&[("options.rs", "struct Options { hosts: Vec<String> }")]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("Vec<String>")).unwrap(),
            "String"
        );
        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("Vec<Vec<u8>>")).unwrap(),
            "Vec<u8>"
        );
    }

    #[test]
    fn test_slice_shapes() {
        let (dir, tree) = setup(&[("options.rs", "struct Options {}")]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert_eq!(vec_elem_type(&tree, &owner, &ty("[u8]")).unwrap(), "u8");
        assert_eq!(vec_elem_type(&tree, &owner, &ty("[u8; 4]")).unwrap(), "u8");
    }

    #[test]
    fn test_not_vec_shaped() {
        let (dir, tree) = setup(&[("options.rs", "struct Options {}")]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert!(matches!(
            vec_elem_type(&tree, &owner, &ty("String")),
            Err(VariadicError::NotVec)
        ));
        assert!(matches!(
            vec_elem_type(&tree, &owner, &ty("HashMap<String, u32>")),
            Err(VariadicError::NotVec)
        ));
    }

    #[test]
    fn test_local_alias_chain() {
        let (dir, tree) = setup(&[(
            "options.rs",
            r#"
            type Hosts = Vec<String>;
            type HostList = Hosts;

            struct Options { hosts: HostList }
            "#,
        )]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("Hosts")).unwrap(),
            "String"
        );
        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("HostList")).unwrap(),
            "String"
        );
    }

    #[test]
    fn test_cross_module_alias() {
        let (dir, tree) = setup(&[
            (
                "options.rs",
                "mod storage;\nstruct Options { peers: storage::Peers }",
            ),
            (
                "storage.rs",
                r#"
                pub struct Peer { pub addr: String }
                pub type Peers = Vec<Peer>;
                pub type Ports = Vec<u16>;
                "#,
            ),
        ]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        // Element declared in the module gets the local qualifier.
        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("storage::Peers")).unwrap(),
            "storage::Peer"
        );
        // Primitive elements pass through.
        assert_eq!(
            vec_elem_type(&tree, &owner, &ty("storage::Ports")).unwrap(),
            "u16"
        );
    }

    #[test]
    fn test_cross_module_struct_is_not_vec() {
        let (dir, tree) = setup(&[
            ("options.rs", "mod storage;\nstruct Options {}"),
            ("storage.rs", "pub struct Peer { pub addr: String }"),
        ]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert!(matches!(
            vec_elem_type(&tree, &owner, &ty("storage::Peer")),
            Err(VariadicError::NotVec)
        ));
    }

    #[test]
    fn test_cross_module_unknown_name_is_hard_error() {
        let (dir, tree) = setup(&[
            ("options.rs", "mod storage;\nstruct Options {}"),
            ("storage.rs", "pub type Ports = Vec<u16>;"),
        ]);
        let owner = owner_of(&tree, dir.path(), "options.rs");

        assert!(matches!(
            vec_elem_type(&tree, &owner, &ty("storage::Nope")),
            Err(VariadicError::TypeNotFound { .. })
        ));
    }
}

//! Locating the target struct in a source directory.
//!
//! The input file's parent directory is the parse root: every `.rs` file
//! directly in it is parsed into a forest. The target may be declared there
//! as a plain struct, or as `pub type X = path::To::Other;` pointing into a
//! sibling module of the same tree. Module resolution is file-based
//! (`<dir>/<seg>.rs` or `<dir>/<seg>/mod.rs`, `crate` meaning the parse
//! root) and deliberately does not chase inline `mod` blocks or external
//! crates; the locator answers declaration questions, it is not a type
//! checker.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use quote::ToTokens;

use crate::error::LocateError;
use crate::types::{path_string, tokens_string};

/// One parsed source file with its location.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path on disk.
    pub path: PathBuf,

    /// Directory containing the file; module resolution starts here.
    pub dir: PathBuf,

    /// Parsed syntax tree, shared with the loader cache.
    pub ast: Rc<syn::File>,
}

/// The located target struct.
#[derive(Debug, Clone)]
pub struct LocatedStruct {
    /// The file that actually declares the struct. For aliases this is the
    /// external module file, and its imports are the ones that matter.
    pub file: SourceFile,

    pub generics: syn::Generics,

    /// Named fields in declaration order. For aliased structs, non-`pub`
    /// fields are already dropped and bare local type names re-qualified.
    pub fields: Vec<syn::Field>,

    /// Verbatim `use` lines of the owning file.
    pub imports: Vec<String>,
}

/// A parse forest rooted at one directory, with a per-request module cache.
pub struct SourceTree {
    root: PathBuf,
    cache: RefCell<HashMap<PathBuf, Rc<syn::File>>>,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse every `.rs` file directly under the root, in name order.
    pub fn parse_root_files(&self) -> Result<Vec<SourceFile>, LocateError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| LocateError::Io {
            path: self.root.clone(),
            source: e,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "rs"))
            .collect();
        paths.sort();

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let ast = self.load_file(&path)?;
            files.push(SourceFile {
                dir: path.parent().unwrap_or(&self.root).to_path_buf(),
                path,
                ast,
            });
        }

        Ok(files)
    }

    /// Parse one file, through the cache.
    pub fn load_file(&self, path: &Path) -> Result<Rc<syn::File>, LocateError> {
        if let Some(ast) = self.cache.borrow().get(path) {
            return Ok(Rc::clone(ast));
        }

        let content = std::fs::read_to_string(path).map_err(|e| LocateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let ast = Rc::new(syn::parse_file(&content).map_err(|e| LocateError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?);

        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&ast));
        Ok(ast)
    }

    /// Load the module named by `segments`, starting from `from_dir`.
    ///
    /// A leading `crate` rebases onto the parse root, `self` stays in
    /// `from_dir`, `super` steps up one directory. Each segment then maps to
    /// `<dir>/<seg>.rs` or `<dir>/<seg>/mod.rs`.
    pub fn load_module(
        &self,
        from_dir: &Path,
        segments: &[String],
    ) -> Result<SourceFile, LocateError> {
        let (mut dir, rest) = match segments.first().map(String::as_str) {
            Some("crate") => (self.root.clone(), &segments[1..]),
            Some("self") => (from_dir.to_path_buf(), &segments[1..]),
            Some("super") => (
                from_dir
                    .parent()
                    .unwrap_or(from_dir)
                    .to_path_buf(),
                &segments[1..],
            ),
            _ => (from_dir.to_path_buf(), segments),
        };

        if rest.is_empty() {
            return Err(LocateError::ModuleNotFound {
                module: segments.join("::"),
                path: dir,
            });
        }

        for seg in &rest[..rest.len() - 1] {
            dir = dir.join(seg);
        }

        let last = &rest[rest.len() - 1];
        let file_candidate = dir.join(format!("{last}.rs"));
        let mod_candidate = dir.join(last).join("mod.rs");

        let path = if file_candidate.is_file() {
            file_candidate
        } else if mod_candidate.is_file() {
            mod_candidate
        } else {
            return Err(LocateError::ModuleNotFound {
                module: segments.join("::"),
                path: file_candidate,
            });
        };

        let ast = self.load_file(&path)?;
        Ok(SourceFile {
            dir: path.parent().unwrap_or(&dir).to_path_buf(),
            path,
            ast,
        })
    }

    /// Find the target struct in the parse forest.
    pub fn find_struct(&self, name: &str) -> Result<LocatedStruct, LocateError> {
        for file in self.parse_root_files()? {
            for item in &file.ast.items {
                match item {
                    syn::Item::Struct(item_struct) if item_struct.ident == name => {
                        let syn::Fields::Named(named) = &item_struct.fields else {
                            return Err(LocateError::NotNamedFields {
                                name: name.to_string(),
                            });
                        };
                        return Ok(LocatedStruct {
                            generics: item_struct.generics.clone(),
                            fields: named.named.iter().cloned().collect(),
                            imports: use_lines(&file.ast),
                            file,
                        });
                    }
                    syn::Item::Type(item_type) if item_type.ident == name => {
                        if let Some(located) = self.follow_alias(&file, item_type)? {
                            return Ok(located);
                        }
                    }
                    _ => {}
                }
            }
        }

        Err(LocateError::StructNotFound {
            name: name.to_string(),
        })
    }

    /// Follow `type X = path::To::Struct;` into its declaring module.
    fn follow_alias(
        &self,
        file: &SourceFile,
        item_type: &syn::ItemType,
    ) -> Result<Option<LocatedStruct>, LocateError> {
        let syn::Type::Path(type_path) = item_type.ty.as_ref() else {
            return Ok(None);
        };
        if type_path.qself.is_some() || type_path.path.segments.len() < 2 {
            return Ok(None);
        }

        let segments: Vec<String> = type_path
            .path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect();
        let struct_name = segments.last().expect("len checked above").clone();

        let module_segments = resolve_module_path(&file.ast, &segments[..segments.len() - 1]);
        let module = self.load_module(&file.dir, &module_segments)?;

        // The qualifier used locally for this module, e.g. `storage` in
        // `type Options = storage::Opts;`.
        let qualifier: Vec<String> = segments[..segments.len() - 1].to_vec();

        for item in &module.ast.items {
            let syn::Item::Struct(item_struct) = item else {
                continue;
            };
            if item_struct.ident != struct_name {
                continue;
            }
            let syn::Fields::Named(named) = &item_struct.fields else {
                return Err(LocateError::NotNamedFields { name: struct_name });
            };

            let module_types = declared_type_names(&module.ast);
            let fields: Vec<syn::Field> = named
                .named
                .iter()
                .filter(|f| matches!(f.vis, syn::Visibility::Public(_)))
                .cloned()
                .map(|mut f| {
                    qualify_type(&mut f.ty, &qualifier, &module_types);
                    f
                })
                .collect();

            return Ok(Some(LocatedStruct {
                generics: item_struct.generics.clone(),
                fields,
                imports: use_lines(&module.ast),
                file: module,
            }));
        }

        Err(LocateError::StructNotFound { name: struct_name })
    }
}

/// Resolve the module portion of an alias path against the file's imports
/// and sibling `mod` declarations.
///
/// `storage` with a sibling `mod storage;` stays file-relative; a matching
/// `use crate::storage;` (or rename `use crate::storage as st;`) substitutes
/// the imported path. An unresolved leading segment falls back to
/// file-relative, which is right for the flat layouts this tool targets.
fn resolve_module_path(file: &syn::File, segments: &[String]) -> Vec<String> {
    let leading = &segments[0];

    let declares_mod = file.items.iter().any(|item| {
        matches!(item, syn::Item::Mod(m) if m.content.is_none() && m.ident == leading.as_str())
    });
    if declares_mod {
        let mut out = vec!["self".to_string()];
        out.extend_from_slice(segments);
        return out;
    }

    if leading == "crate" || leading == "self" || leading == "super" {
        return segments.to_vec();
    }

    let table = use_table(file);
    if let Some(mapped) = table.get(leading) {
        let mut out = mapped.clone();
        out.extend_from_slice(&segments[1..]);
        return out;
    }

    let mut out = vec!["self".to_string()];
    out.extend_from_slice(segments);
    out
}

/// Map of locally visible names to their imported path segments.
pub fn use_table(file: &syn::File) -> HashMap<String, Vec<String>> {
    let mut table = HashMap::new();

    for item in &file.items {
        if let syn::Item::Use(item_use) = item {
            collect_use_tree(&item_use.tree, &mut Vec::new(), &mut table);
        }
    }

    table
}

fn collect_use_tree(
    tree: &syn::UseTree,
    prefix: &mut Vec<String>,
    table: &mut HashMap<String, Vec<String>>,
) {
    match tree {
        syn::UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            collect_use_tree(&path.tree, prefix, table);
            prefix.pop();
        }
        syn::UseTree::Name(name) => {
            let mut full = prefix.clone();
            full.push(name.ident.to_string());
            table.insert(name.ident.to_string(), full);
        }
        syn::UseTree::Rename(rename) => {
            let mut full = prefix.clone();
            full.push(rename.ident.to_string());
            table.insert(rename.rename.to_string(), full);
        }
        syn::UseTree::Group(group) => {
            for item in &group.items {
                collect_use_tree(item, prefix, table);
            }
        }
        syn::UseTree::Glob(_) => {}
    }
}

/// Names of types declared at the top level of a file.
pub fn declared_type_names(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Struct(s) => Some(s.ident.to_string()),
            syn::Item::Enum(e) => Some(e.ident.to_string()),
            syn::Item::Type(t) => Some(t.ident.to_string()),
            syn::Item::Union(u) => Some(u.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Re-qualify bare identifiers that name types declared in the external
/// module, so field types stay resolvable from the aliasing file.
pub fn qualify_type(ty: &mut syn::Type, qualifier: &[String], module_types: &[String]) {
    match ty {
        syn::Type::Path(type_path) if type_path.qself.is_none() => {
            if type_path.path.segments.len() == 1 {
                let seg = &type_path.path.segments[0];
                let ident = seg.ident.to_string();
                if module_types.contains(&ident) {
                    let qualified = format!("{}::{}", qualifier.join("::"), path_string(&type_path.path));
                    if let Ok(new_path) = syn::parse_str::<syn::Path>(&qualified) {
                        type_path.path = new_path;
                        return;
                    }
                }
            }
            for seg in &mut type_path.path.segments {
                if let syn::PathArguments::AngleBracketed(args) = &mut seg.arguments {
                    for arg in &mut args.args {
                        if let syn::GenericArgument::Type(inner) = arg {
                            qualify_type(inner, qualifier, module_types);
                        }
                    }
                }
            }
        }
        syn::Type::Reference(r) => qualify_type(&mut r.elem, qualifier, module_types),
        syn::Type::Slice(s) => qualify_type(&mut s.elem, qualifier, module_types),
        syn::Type::Array(a) => qualify_type(&mut a.elem, qualifier, module_types),
        syn::Type::Tuple(t) => {
            for elem in &mut t.elems {
                qualify_type(elem, qualifier, module_types);
            }
        }
        syn::Type::Paren(p) => qualify_type(&mut p.elem, qualifier, module_types),
        syn::Type::Group(g) => qualify_type(&mut g.elem, qualifier, module_types),
        _ => {}
    }
}

/// The verbatim `use` lines of a file, in declaration order.
pub fn use_lines(file: &syn::File) -> Vec<String> {
    file.items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Use(item_use) => Some(tokens_string(item_use.to_token_stream())),
            _ => None,
        })
        .collect()
}

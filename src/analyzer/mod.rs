//! Analyzer contract: the declaration surface the extractor consumes.
//!
//! Source parsing happens elsewhere; an [`Analyzer`] hands out already
//! analyzed modules keyed by package-relative path.

pub mod manifest;

use crate::model::Visibility;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Lookup failures while resolving entrypoints and superclasses.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("module not found: {}", .0.display())]
    ModuleNotFound(PathBuf),

    #[error("{} exports no custom element", .0.display())]
    NoCustomElement(PathBuf),

    #[error("declaration `{name}` not found in {}", .module.display())]
    DeclarationNotFound { module: PathBuf, name: String },

    #[error("entrypoint pattern `{0}` matched no analyzed module")]
    NoMatch(String),

    #[error("invalid entrypoint pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("inheritance chain of {} is deeper than {limit} levels", .entrypoint.display())]
    InheritanceTooDeep { entrypoint: PathBuf, limit: usize },
}

/// Source of analyzed modules.
pub trait Analyzer {
    /// Look up the module defined at a package-relative path.
    fn module(&self, path: &Path) -> Result<&ModuleDeclaration, ResolutionError>;

    /// Every module path the analyzer knows, for entrypoint pattern matching.
    fn module_paths(&self) -> Vec<&Path>;
}

/// One analyzed source module.
#[derive(Debug, Default)]
pub struct ModuleDeclaration {
    pub path: PathBuf,
    pub declarations: Vec<ComponentDeclaration>,
    /// Names of declarations registered as custom elements, in export order
    pub custom_element_names: Vec<String>,
}

impl ModuleDeclaration {
    /// Declarations this module registers as custom elements.
    pub fn custom_element_exports(&self) -> impl Iterator<Item = &ComponentDeclaration> {
        self.custom_element_names
            .iter()
            .filter_map(|name| self.declaration(name))
    }

    /// Find a class declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&ComponentDeclaration> {
        self.declarations.iter().find(|decl| decl.name == name)
    }
}

/// A class declaration: fields, methods, events and its superclass link.
#[derive(Debug, Default)]
pub struct ComponentDeclaration {
    pub name: String,
    pub tag_name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldDeclaration>,
    /// Names of fields that trigger a re-render
    pub reactive: HashSet<String>,
    pub methods: Vec<MethodDeclaration>,
    pub events: Vec<EventDeclaration>,
    pub superclass: Option<SuperclassReference>,
}

impl ComponentDeclaration {
    pub fn is_reactive(&self, field: &str) -> bool {
        self.reactive.contains(field)
    }
}

#[derive(Debug, Default, Clone)]
pub struct FieldDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub type_text: Option<String>,
    pub visibility: Option<Visibility>,
    pub default_value: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct MethodDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub parameters: Vec<ParameterDeclaration>,
    pub return_type_text: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ParameterDeclaration {
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub type_text: Option<String>,
    pub default_value: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct EventDeclaration {
    pub name: String,
    pub description: Option<String>,
    pub type_text: Option<String>,
}

/// Where a superclass comes from. `module` is `None` for classes imported
/// from another package.
#[derive(Debug, Clone)]
pub struct SuperclassReference {
    pub name: String,
    pub module: Option<String>,
}

/// Lexically normalize a package-relative path.
///
/// Strips leading `/` and `./`, folds `.` and `..` segments. Never touches
/// the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.iter().collect()
}

/// Swap a compiled `.js` extension for the authored `.ts` one, or back.
pub fn alternate_extension(path: &Path) -> Option<PathBuf> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => Some(path.with_extension("ts")),
        Some("ts") => Some(path.with_extension("js")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_root_and_dots() {
        assert_eq!(
            normalize_path(Path::new("/src/./button/../base.ts")),
            PathBuf::from("src/base.ts")
        );
        assert_eq!(
            normalize_path(Path::new("./src/button.ts")),
            PathBuf::from("src/button.ts")
        );
    }

    #[test]
    fn alternate_extension_swaps_js_and_ts() {
        assert_eq!(
            alternate_extension(Path::new("src/a.js")),
            Some(PathBuf::from("src/a.ts"))
        );
        assert_eq!(
            alternate_extension(Path::new("src/a.ts")),
            Some(PathBuf::from("src/a.js"))
        );
        assert_eq!(alternate_extension(Path::new("src/a.css")), None);
    }

    #[test]
    fn custom_element_exports_follow_export_order() {
        let module = ModuleDeclaration {
            path: PathBuf::from("src/a.ts"),
            declarations: vec![
                ComponentDeclaration {
                    name: "First".to_string(),
                    ..Default::default()
                },
                ComponentDeclaration {
                    name: "Second".to_string(),
                    ..Default::default()
                },
            ],
            custom_element_names: vec!["Second".to_string(), "Missing".to_string()],
        };
        let names: Vec<&str> = module
            .custom_element_exports()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, ["Second"]);
        assert!(module.declaration("First").is_some());
        assert!(module.declaration("Third").is_none());
    }
}

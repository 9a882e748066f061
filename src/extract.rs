//! API extraction. Turns analyzer declarations into sanitized metadata,
//! following the superclass chain up to the framework root.

use crate::analyzer::{
    normalize_path, Analyzer, ComponentDeclaration, EventDeclaration, FieldDeclaration,
    MethodDeclaration, ResolutionError,
};
use crate::model::*;
use crate::sanitize::sanitize;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Lifecycle hooks and framework-reserved methods never documented.
pub const IGNORED_METHODS: &[&str] = &[
    "connectedCallback",
    "disconnectedCallback",
    "update",
    "render",
    "firstUpdated",
    "updated",
    "focus",
    "blur",
];

/// Description marker: the event bubbles.
pub const BUBBLES_MARKER: &str = "--bubbles";
/// Description marker: the event crosses shadow boundaries.
pub const COMPOSED_MARKER: &str = "--composed";

static RE_BUBBLES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*--bubbles\s*").unwrap());

static RE_COMPOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*--composed\s*").unwrap());

/// Chain-walk settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Framework base class; the walk stops before it.
    pub root_class: String,
    /// Maximum number of classes in one chain.
    pub max_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            root_class: "LitElement".to_string(),
            max_depth: 32,
        }
    }
}

/// Extract metadata for the custom element exported by `entrypoint`.
pub fn extract(
    analyzer: &dyn Analyzer,
    entrypoint: &Path,
    options: &ExtractOptions,
) -> Result<ComponentMetadata, ResolutionError> {
    extract_level(analyzer, &normalize_path(entrypoint), None, options, 1)
}

fn extract_level(
    analyzer: &dyn Analyzer,
    entrypoint: &Path,
    class_name: Option<&str>,
    options: &ExtractOptions,
    depth: usize,
) -> Result<ComponentMetadata, ResolutionError> {
    if depth > options.max_depth {
        return Err(ResolutionError::InheritanceTooDeep {
            entrypoint: entrypoint.to_path_buf(),
            limit: options.max_depth,
        });
    }

    let module = analyzer.module(entrypoint)?;
    let decl = match class_name {
        Some(name) => module
            .declaration(name)
            .ok_or_else(|| ResolutionError::DeclarationNotFound {
                module: entrypoint.to_path_buf(),
                name: name.to_string(),
            })?,
        None => module
            .custom_element_exports()
            .next()
            .ok_or_else(|| ResolutionError::NoCustomElement(entrypoint.to_path_buf()))?,
    };

    let (properties, reactive_properties) = extract_fields(decl);
    let mut meta = ComponentMetadata {
        tag_name: decl.tag_name.clone(),
        class_name: decl.name.clone(),
        source_path: entrypoint.to_path_buf(),
        summary: sanitize(decl.summary.as_deref()),
        description: sanitize(decl.description.as_deref()),
        properties,
        reactive_properties,
        methods: extract_methods(&decl.methods),
        events: decl.events.iter().map(extract_event).collect(),
        super_class: None,
    };
    tracing::debug!(
        class = %meta.class_name,
        path = %entrypoint.display(),
        depth,
        "Extracted component"
    );

    if let Some(superclass) = &decl.superclass {
        if superclass.name != options.root_class {
            match &superclass.module {
                Some(module_path) => {
                    let path = superclass_path(entrypoint, module_path);
                    let parent = extract_level(
                        analyzer,
                        &path,
                        Some(superclass.name.as_str()),
                        options,
                        depth + 1,
                    )?;
                    meta.super_class = Some(Box::new(parent));
                }
                None => tracing::warn!(
                    class = %meta.class_name,
                    superclass = %superclass.name,
                    "Superclass comes from another package; chain ends here"
                ),
            }
        }
    }

    Ok(meta)
}

/// Split fields into `(properties, reactive_properties)`.
fn extract_fields(decl: &ComponentDeclaration) -> (Vec<PropertyInfo>, Vec<PropertyInfo>) {
    let mut properties = Vec::new();
    let mut reactive_properties = Vec::new();
    for field in &decl.fields {
        let info = property_info(field);
        if decl.is_reactive(&field.name) {
            reactive_properties.push(info);
        } else {
            properties.push(info);
        }
    }
    (properties, reactive_properties)
}

fn property_info(field: &FieldDeclaration) -> PropertyInfo {
    PropertyInfo {
        name: field.name.clone(),
        description: sanitize(field.description.as_deref()),
        type_text: sanitize(field.type_text.as_deref()),
        visibility: field.visibility,
        default_value_text: sanitize(field.default_value.as_deref()),
    }
}

fn extract_methods(methods: &[MethodDeclaration]) -> Vec<MethodInfo> {
    methods
        .iter()
        .filter(|method| !IGNORED_METHODS.contains(&method.name.as_str()))
        .map(|method| MethodInfo {
            name: method.name.clone(),
            description: sanitize(method.description.as_deref()),
            visibility: method.visibility,
            parameters: method
                .parameters
                .iter()
                .map(|p| ParameterInfo {
                    name: p.name.clone(),
                    summary: sanitize(p.summary.as_deref()),
                    description: sanitize(p.description.as_deref()),
                    type_text: sanitize(p.type_text.as_deref()),
                    default_value_text: sanitize(p.default_value.as_deref()),
                })
                .collect(),
            return_type_text: sanitize(method.return_type_text.as_deref()),
        })
        .collect()
}

fn extract_event(event: &EventDeclaration) -> EventInfo {
    let (flags, description) = event_flags(event.description.as_deref());
    EventInfo {
        name: event.name.clone(),
        description,
        type_text: sanitize(event.type_text.as_deref()),
        bubbles: flags.bubbles,
        composed: flags.composed,
    }
}

/// Event semantics carried by description markers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventFlags {
    pub bubbles: bool,
    pub composed: bool,
}

/// Read the `--bubbles` / `--composed` markers from a raw event description
/// and return the flags with the sanitized, marker-free description.
pub fn event_flags(raw: Option<&str>) -> (EventFlags, Option<String>) {
    let Some(raw) = raw else {
        return (EventFlags::default(), None);
    };
    let flags = EventFlags {
        bubbles: raw.contains(BUBBLES_MARKER),
        composed: raw.contains(COMPOSED_MARKER),
    };
    let stripped = RE_BUBBLES.replace_all(raw, " ");
    let stripped = RE_COMPOSED.replace_all(&stripped, " ");
    (flags, sanitize(Some(&stripped)))
}

/// Package-relative path of a superclass module.
///
/// Compiled `.js` paths map back to the authored `.ts` source. `./` and `../`
/// paths are relative to the entrypoint's directory, others to the package.
fn superclass_path(entrypoint: &Path, module: &str) -> PathBuf {
    let authored = match module.strip_suffix(".js") {
        Some(stem) => format!("{stem}.ts"),
        None => module.to_string(),
    };
    if authored.starts_with("./") || authored.starts_with("../") {
        let dir = entrypoint.parent().unwrap_or_else(|| Path::new(""));
        normalize_path(&dir.join(authored))
    } else {
        normalize_path(Path::new(&authored))
    }
}

//! Custom Elements Manifest loader.
//!
//! Reads the `custom-elements.json` emitted by the component analyzer and
//! exposes its class declarations through the [`Analyzer`] contract.

use super::{
    alternate_extension, normalize_path, Analyzer, ComponentDeclaration, EventDeclaration,
    FieldDeclaration, MethodDeclaration, ModuleDeclaration, ParameterDeclaration,
    ResolutionError, SuperclassReference,
};
use crate::model::Visibility;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Analyzed package backed by a custom elements manifest.
#[derive(Debug, Default)]
pub struct Manifest {
    modules: BTreeMap<PathBuf, ModuleDeclaration>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(content)?;
        let modules = raw
            .modules
            .into_iter()
            .map(|module| {
                let module = convert_module(module);
                (module.path.clone(), module)
            })
            .collect();
        Ok(Self { modules })
    }
}

impl Analyzer for Manifest {
    fn module(&self, path: &Path) -> Result<&ModuleDeclaration, ResolutionError> {
        let path = normalize_path(path);
        self.modules
            .get(&path)
            .or_else(|| alternate_extension(&path).and_then(|alt| self.modules.get(&alt)))
            .ok_or(ResolutionError::ModuleNotFound(path))
    }

    fn module_paths(&self) -> Vec<&Path> {
        self.modules.keys().map(PathBuf::as_path).collect()
    }
}

// -- Raw manifest schema ------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    modules: Vec<RawModule>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    path: String,
    #[serde(default)]
    declarations: Vec<RawDeclaration>,
    #[serde(default)]
    exports: Vec<RawExport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeclaration {
    kind: String,
    name: String,
    summary: Option<String>,
    description: Option<String>,
    tag_name: Option<String>,
    #[serde(default)]
    custom_element: bool,
    superclass: Option<RawReference>,
    #[serde(default)]
    members: Vec<RawMember>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    name: String,
    module: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMember {
    kind: String,
    name: String,
    summary: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    type_info: Option<RawType>,
    default: Option<String>,
    privacy: Option<String>,
    #[serde(default, rename = "static")]
    is_static: bool,
    attribute: Option<String>,
    #[serde(default)]
    reflects: bool,
    #[serde(default)]
    reactive: bool,
    inherited_from: Option<RawReference>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(rename = "return")]
    returns: Option<RawReturn>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: String,
    summary: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    type_info: Option<RawType>,
    default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReturn {
    #[serde(rename = "type")]
    type_info: Option<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    type_info: Option<RawType>,
    inherited_from: Option<RawReference>,
}

#[derive(Debug, Deserialize)]
struct RawType {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawExport {
    kind: String,
    name: String,
    declaration: RawReference,
}

// -- Conversion ---------------------------------------------------------------

fn convert_module(raw: RawModule) -> ModuleDeclaration {
    let path = normalize_path(Path::new(&raw.path));

    let definitions: Vec<&RawExport> = raw
        .exports
        .iter()
        .filter(|export| export.kind == "custom-element-definition")
        .collect();

    let mut declarations = Vec::new();
    let mut custom_element_names = Vec::new();

    for decl in raw.declarations {
        if decl.kind != "class" && decl.kind != "mixin" {
            continue;
        }
        let definition = definitions
            .iter()
            .find(|export| export.declaration.name == decl.name);
        if decl.custom_element || decl.tag_name.is_some() || definition.is_some() {
            custom_element_names.push(decl.name.clone());
        }
        let mut component = convert_declaration(decl);
        if component.tag_name.is_none() {
            component.tag_name = definition.map(|export| export.name.clone());
        }
        declarations.push(component);
    }

    ModuleDeclaration {
        path,
        declarations,
        custom_element_names,
    }
}

fn convert_declaration(raw: RawDeclaration) -> ComponentDeclaration {
    let mut component = ComponentDeclaration {
        name: raw.name,
        tag_name: raw.tag_name,
        summary: raw.summary,
        description: raw.description,
        superclass: raw.superclass.map(|sc| SuperclassReference {
            name: sc.name,
            module: sc.module,
        }),
        ..Default::default()
    };

    // Inherited copies are documented where they are defined.
    for member in raw.members {
        if member.is_static || member.inherited_from.is_some() {
            continue;
        }
        let visibility = member
            .privacy
            .as_deref()
            .map_or(Some(Visibility::Public), Visibility::parse);
        match member.kind.as_str() {
            "field" => {
                if member.attribute.is_some() || member.reflects || member.reactive {
                    component.reactive.insert(member.name.clone());
                }
                component.fields.push(FieldDeclaration {
                    name: member.name,
                    description: member.description.or(member.summary),
                    type_text: member.type_info.map(|t| t.text),
                    visibility,
                    default_value: member.default,
                });
            }
            "method" => component.methods.push(MethodDeclaration {
                name: member.name,
                description: member.description.or(member.summary),
                visibility,
                parameters: member
                    .parameters
                    .into_iter()
                    .map(|p| ParameterDeclaration {
                        name: p.name,
                        summary: p.summary,
                        description: p.description,
                        type_text: p.type_info.map(|t| t.text),
                        default_value: p.default,
                    })
                    .collect(),
                return_type_text: member
                    .returns
                    .and_then(|r| r.type_info)
                    .map(|t| t.text),
            }),
            _ => {}
        }
    }

    for event in raw.events {
        if event.inherited_from.is_some() {
            continue;
        }
        let Some(name) = event.name else { continue };
        component.events.push(EventDeclaration {
            name,
            description: event.description,
            type_text: event.type_info.map(|t| t.text),
        });
    }

    component
}

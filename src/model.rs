//! Data model for extracted component API metadata, format-agnostic.
//!
//! Every text field is already sanitized for single-cell table embedding.

use std::path::PathBuf;

/// Member visibility as reported by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Parse the manifest spelling (`public`, `protected`, `private`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Extracted metadata for one component class and, through `super_class`,
/// every documented ancestor.
#[derive(Debug, Default)]
pub struct ComponentMetadata {
    /// Custom element tag, if the class registers one.
    pub tag_name: Option<String>,
    pub class_name: String,
    pub source_path: PathBuf,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Non-reactive fields, in declaration order
    pub properties: Vec<PropertyInfo>,
    /// Fields whose mutation triggers a re-render, in declaration order
    pub reactive_properties: Vec<PropertyInfo>,
    /// Methods minus lifecycle hooks
    pub methods: Vec<MethodInfo>,
    pub events: Vec<EventInfo>,
    /// Next class up the inheritance chain; never the framework root.
    pub super_class: Option<Box<ComponentMetadata>>,
}

impl ComponentMetadata {
    /// Iterate this class and its ancestors, most-derived first.
    pub fn chain(&self) -> impl Iterator<Item = &ComponentMetadata> {
        std::iter::successors(Some(self), |meta| meta.super_class.as_deref())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub description: Option<String>,
    pub type_text: Option<String>,
    pub visibility: Option<Visibility>,
    pub default_value_text: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub parameters: Vec<ParameterInfo>,
    pub return_type_text: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub type_text: Option<String>,
    pub default_value_text: Option<String>,
}

/// A dispatched event. `bubbles` and `composed` come from description markers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventInfo {
    pub name: String,
    pub description: Option<String>,
    pub type_text: Option<String>,
    pub bubbles: bool,
    pub composed: bool,
}

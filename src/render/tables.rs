//! Assemble the Properties / Methods / Events tables for one component chain.

use super::table::{MarkdownTable, RowShapeError};
use crate::model::*;

/// Shown instead of inline closures used as default values.
pub const FUNCTION_PLACEHOLDER: &str = "function { ... }";

/// Shown in the Parameters column of methods without parameters.
pub const NO_PARAMETERS: &str = "_None_";

/// Which API table a [`NamedTable`] holds. Order is render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Properties,
    Methods,
    Events,
}

impl TableKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::Methods => "Methods",
            Self::Events => "Events",
        }
    }

    fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Properties => &["Property", "Type", "Default", "Description"],
            Self::Methods => &["Method", "Parameters", "Returns", "Description"],
            Self::Events => &["Event", "Type", "Bubbles", "Composed", "Description"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct NamedTable {
    pub kind: TableKind,
    pub table: MarkdownTable,
}

impl NamedTable {
    fn new(kind: TableKind) -> Self {
        Self {
            kind,
            table: MarkdownTable::new(kind.columns().iter().copied()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Build the non-empty API tables for `meta` and its ancestors.
///
/// Own members come first, then each ancestor's. Only public properties and
/// methods are listed; events are always listed.
pub fn build_tables(meta: &ComponentMetadata) -> Result<Vec<NamedTable>, RowShapeError> {
    let mut properties = NamedTable::new(TableKind::Properties);
    let mut methods = NamedTable::new(TableKind::Methods);
    let mut events = NamedTable::new(TableKind::Events);

    for class in meta.chain() {
        for property in class.reactive_properties.iter().chain(&class.properties) {
            if property.visibility != Some(Visibility::Public) {
                continue;
            }
            properties.table.add_row(property_row(property))?;
        }

        for method in &class.methods {
            if method.visibility != Some(Visibility::Public) {
                continue;
            }
            methods.table.add_row(method_row(method))?;
        }

        for event in &class.events {
            events.table.add_row(event_row(event))?;
        }
    }

    tracing::debug!(
        class = %meta.class_name,
        properties = properties.table.rows().len(),
        methods = methods.table.rows().len(),
        events = events.table.rows().len(),
        "Assembled API tables"
    );

    Ok([properties, methods, events]
        .into_iter()
        .filter(|named| !named.table.is_empty())
        .collect())
}

fn property_row(property: &PropertyInfo) -> Vec<String> {
    let default = match property.default_value_text.as_deref() {
        Some(text) if text.contains("=>") => Some(FUNCTION_PLACEHOLDER),
        other => other,
    };
    vec![
        code(Some(&property.name)),
        code(property.type_text.as_deref()),
        code(default),
        text(property.description.as_deref()),
    ]
}

fn method_row(method: &MethodInfo) -> Vec<String> {
    let parameters = if method.parameters.is_empty() {
        NO_PARAMETERS.to_string()
    } else {
        method
            .parameters
            .iter()
            .map(|p| code(Some(&p.name)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        code(Some(&method.name)),
        parameters,
        code(method.return_type_text.as_deref()),
        text(method.description.as_deref()),
    ]
}

fn event_row(event: &EventInfo) -> Vec<String> {
    vec![
        code(Some(&event.name)),
        code(event.type_text.as_deref()),
        yes_no(event.bubbles),
        yes_no(event.composed),
        text(event.description.as_deref()),
    ]
}

/// Inline code span; absent values show as `undefined`.
fn code(value: Option<&str>) -> String {
    format!("`{}`", value.unwrap_or("undefined"))
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn yes_no(flag: bool) -> String {
    String::from(if flag { "Yes" } else { "No" })
}

//! Replace the generated API region of a documentation page.
//!
//! The region runs from the first start marker to the last end marker after
//! it, markers included, and is regenerated wholesale every run.

use super::tables::NamedTable;

pub const START_MARKER: &str = "<!-- auto-generated API docs start -->";
pub const END_MARKER: &str = "<!-- auto-generated API docs end -->";

/// Rendered tables for one component, in document order.
#[derive(Debug, Clone)]
pub struct ComponentTables {
    pub class_name: String,
    pub tables: Vec<NamedTable>,
}

/// Render the full marked block, markers included.
pub fn render_block(components: &[ComponentTables]) -> String {
    let mut body = String::new();
    for component in components {
        body.push_str(&format!("\n### {}\n", component.class_name));
        for named in &component.tables {
            body.push_str(&format!(
                "\n#### {}\n\n{}\n",
                named.name(),
                named.table.render()
            ));
        }
    }
    format!("{START_MARKER}\n\n## API\n\n{body}\n{END_MARKER}")
}

/// Splice freshly rendered tables into `document`.
///
/// Returns `None` when the document has no start marker followed by an end
/// marker.
pub fn try_splice(document: &str, components: &[ComponentTables]) -> Option<String> {
    let start = document.find(START_MARKER)?;
    let after_start = start + START_MARKER.len();
    let end = after_start + document[after_start..].rfind(END_MARKER)? + END_MARKER.len();

    let mut out = String::with_capacity(document.len());
    out.push_str(&document[..start]);
    out.push_str(&render_block(components));
    out.push_str(&document[end..]);
    Some(out)
}

/// Like [`try_splice`], but a document without markers comes back unchanged.
pub fn splice(document: &str, components: &[ComponentTables]) -> String {
    try_splice(document, components).unwrap_or_else(|| document.to_string())
}

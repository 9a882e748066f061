//! Pipe-delimited markdown table with a fixed column set.

/// A row did not have one cell per column. Always a caller defect.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("row length ({actual}) must match column length ({expected})")]
pub struct RowShapeError {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone)]
pub struct MarkdownTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. The table is left untouched when the row has the wrong
    /// number of cells.
    pub fn add_row(&mut self, row: Vec<String>) -> Result<(), RowShapeError> {
        if row.len() != self.columns.len() {
            return Err(RowShapeError {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Header line, `---` separator line, then one line per row.
    pub fn render(&self) -> String {
        let header = self.columns.join(" | ");
        let divider = vec!["---"; self.columns.len()].join(" | ");
        let rows = self
            .rows
            .iter()
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{header}\n{divider}\n{rows}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_divider_and_rows() {
        let mut table = MarkdownTable::new(["Event", "Bubbles"]);
        table.add_row(vec!["`open`".into(), "Yes".into()]).unwrap();
        table.add_row(vec!["`close`".into(), "No".into()]).unwrap();
        assert_eq!(
            table.render(),
            "Event | Bubbles\n--- | ---\n`open` | Yes\n`close` | No"
        );
    }

    #[test]
    fn empty_table_renders_two_lines() {
        let table = MarkdownTable::new(["Property", "Type", "Default", "Description"]);
        let rendered = table.render();
        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(
            rendered,
            "Property | Type | Default | Description\n--- | --- | --- | ---\n"
        );
    }

    #[test]
    fn short_row_is_rejected_without_mutation() {
        let mut table = MarkdownTable::new(["A", "B", "C"]);
        let err = table.add_row(vec!["1".into(), "2".into()]).unwrap_err();
        assert_eq!(err, RowShapeError { expected: 3, actual: 2 });
        assert!(table.is_empty());
    }

    #[test]
    fn long_row_is_rejected_without_mutation() {
        let mut table = MarkdownTable::new(["A", "B"]);
        table.add_row(vec!["1".into(), "2".into()]).unwrap();
        let err = table
            .add_row(vec!["1".into(), "2".into(), "3".into()])
            .unwrap_err();
        assert_eq!(err.to_string(), "row length (3) must match column length (2)");
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.columns(), ["A", "B"]);
    }
}

/// SmartTable Column Definitions
///
/// A Schema is the ordered list of columns shared by every row in a store.
/// Columns are addressed by zero-based index; names are stable and are what
/// the display layer shows as headers.
///
/// # Examples
///
/// ```
/// use smarttable::Schema;
///
/// let mut schema = Schema::new(vec!["First Name", "Last Name", "Email", "Age"]);
/// schema.set_editable(3, true);
///
/// assert_eq!(schema.len(), 4);
/// assert_eq!(schema.column_index("Email"), Some(2));
/// assert!(schema.is_editable(3));
/// assert!(!schema.is_editable(0));
/// ```

use serde::{Deserialize, Serialize};

/// A single column: its header name and whether its cells may be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    editable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            editable: false,
        }
    }

    pub fn editable(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            editable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

/// Ordered column definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema of read-only columns with the given names.
    pub fn new<S: Into<String>>(names: Vec<S>) -> Self {
        Schema {
            columns: names.into_iter().map(Column::new).collect(),
        }
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    /// Returns the number of columns in the schema.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Header name of the column at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.name())
    }

    /// Returns the index of a column by name, or None if not found.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn is_editable(&self, index: usize) -> bool {
        self.columns.get(index).map(|c| c.editable).unwrap_or(false)
    }

    /// Marks one column editable or read-only. Out-of-range indices are ignored.
    pub fn set_editable(&mut self, index: usize, editable: bool) {
        if let Some(column) = self.columns.get_mut(index) {
            column.editable = editable;
        }
    }

    pub fn set_all_editable(&mut self, editable: bool) {
        for column in &mut self.columns {
            column.editable = editable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lookup() {
        let schema = Schema::new(vec!["Num1", "Num2", "Num3"]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.name(1), Some("Num2"));
        assert_eq!(schema.name(3), None);
        assert_eq!(schema.column_index("Num3"), Some(2));
        assert_eq!(schema.column_index("missing"), None);
    }

    #[test]
    fn test_editable_flags() {
        let mut schema = Schema::from_columns(vec![Column::new("a"), Column::editable("b")]);
        assert!(!schema.is_editable(0));
        assert!(schema.is_editable(1));

        schema.set_all_editable(true);
        assert!(schema.is_editable(0));

        schema.set_editable(0, false);
        schema.set_editable(9, true);
        assert!(!schema.is_editable(0));
        assert!(!schema.is_editable(9));
    }
}

// sluice-core/src/domain/table.rs

/// In-memory CSV contents. `None` cells are nulls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Case-insensitive, whitespace-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_uppercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_uppercase() == wanted)
    }

    /// Cells of one column, in row order.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).and_then(|cell| cell.as_deref()))
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: Option<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    pub fn uppercase_headers(&mut self) {
        for h in &mut self.headers {
            *h = h.trim().to_uppercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["id".into(), " Name ".into()],
            vec![
                vec![Some("1".into()), Some("ada".into())],
                vec![Some("2".into()), None],
            ],
        )
    }

    #[test]
    fn test_column_lookup_ignores_case_and_padding() {
        let table = sample();
        assert_eq!(table.column_index("ID"), Some(0));
        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("email"), None);
    }

    #[test]
    fn test_column_values_and_set_cell() {
        let mut table = sample();
        let names: Vec<_> = table.column_values(1).collect();
        assert_eq!(names, vec![Some("ada"), None]);

        table.set_cell(1, 1, Some("grace".into()));
        table.set_cell(9, 9, Some("ignored".into()));
        assert_eq!(table.rows[1][1].as_deref(), Some("grace"));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_uppercase_headers() {
        let mut table = sample();
        table.uppercase_headers();
        assert_eq!(table.headers, vec!["ID", "NAME"]);
    }
}

use ustr::Ustr;

use crate::schema::Column;

/// Which columns of a table are shown. Every column starts visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    flags: Vec<(Ustr, bool)>,
}

impl ColumnVisibility {
    pub fn new(columns: &[Column]) -> Self {
        Self {
            flags: columns.iter().map(|column| (column.key, true)).collect(),
        }
    }

    /// Unknown keys count as visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.flags
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .is_none_or(|(_, visible)| *visible)
    }

    /// Flips one column. Unknown keys are ignored.
    pub fn toggle(&mut self, key: &str) {
        if let Some((_, visible)) = self.flags.iter_mut().find(|(k, _)| k.as_str() == key) {
            *visible = !*visible;
        }
    }

    pub fn set(&mut self, key: &str, visible: bool) {
        if let Some((_, flag)) = self.flags.iter_mut().find(|(k, _)| k.as_str() == key) {
            *flag = visible;
        }
    }

    pub fn show_all(&mut self) {
        for (_, visible) in &mut self.flags {
            *visible = true;
        }
    }

    /// Shows exactly `keys`; other known columns are hidden.
    pub fn show_only<S: AsRef<str>>(&mut self, keys: &[S]) {
        for (key, visible) in &mut self.flags {
            *visible = keys.iter().any(|wanted| wanted.as_ref() == key.as_str());
        }
    }

    /// `columns` in order, without the hidden ones.
    pub fn visible_columns<'a>(&self, columns: &'a [Column]) -> Vec<&'a Column> {
        columns
            .iter()
            .filter(|column| self.is_visible(&column.key))
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Ustr, bool)> + '_ {
        self.flags.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("status", "Status"),
        ]
    }

    #[test]
    fn everything_starts_visible() {
        let visibility = ColumnVisibility::new(&columns());
        assert!(visibility.entries().all(|(_, visible)| visible));
        assert_eq!(visibility.visible_columns(&columns()).len(), 3);
    }

    #[test]
    fn toggle_twice_restores() {
        let original = ColumnVisibility::new(&columns());
        let mut visibility = original.clone();

        visibility.toggle("email");
        assert!(!visibility.is_visible("email"));
        assert_ne!(visibility, original);

        visibility.toggle("email");
        assert_eq!(visibility, original);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut visibility = ColumnVisibility::new(&columns());
        let before = visibility.clone();
        visibility.toggle("nope");
        assert_eq!(visibility, before);
    }

    #[test]
    fn visible_columns_keeps_order() {
        let cols = columns();
        let mut visibility = ColumnVisibility::new(&cols);
        visibility.toggle("name");

        let keys: Vec<&str> = visibility
            .visible_columns(&cols)
            .into_iter()
            .map(|column| column.key.as_str())
            .collect();
        assert_eq!(keys, ["email", "status"]);
    }

    #[test]
    fn show_only_and_show_all() {
        let cols = columns();
        let mut visibility = ColumnVisibility::new(&cols);
        visibility.show_only(&["status"]);
        assert_eq!(visibility.visible_columns(&cols).len(), 1);

        visibility.show_all();
        assert_eq!(visibility.visible_columns(&cols).len(), 3);
    }
}

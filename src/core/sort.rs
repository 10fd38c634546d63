//! Sort controller - current sort key and direction

use serde::{Deserialize, Serialize};

use crate::entities::part::PartField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }

    /// Arrow shown next to the sorted column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Sort key plus direction; starts at (part_number, ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub key: PartField,
    pub direction: SortDirection,
}

impl SortState {
    /// Selecting the current key flips direction, any other key sorts ascending
    pub fn select(&mut self, key: PartField) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// `ORDER BY` clause; ties fall back to insertion order in either direction
    pub fn order_by(&self) -> String {
        format!(
            "ORDER BY {} COLLATE NOCASE {}, rowid ASC",
            self.key.column(),
            self.direction.as_sql()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_part_number_ascending() {
        let state = SortState::default();
        assert_eq!(state.key, PartField::PartNumber);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_same_key_toggles() {
        let mut state = SortState::default();
        state.select(PartField::PartNumber);
        assert_eq!(state.direction, SortDirection::Descending);
        state.select(PartField::PartNumber);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_other_key_resets_to_ascending() {
        let mut state = SortState::default();
        state.select(PartField::PartNumber);
        state.select(PartField::Status);
        assert_eq!(state.key, PartField::Status);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_order_by_clause() {
        let state = SortState {
            key: PartField::LastUpdated,
            direction: SortDirection::Descending,
        };
        assert_eq!(
            state.order_by(),
            "ORDER BY last_updated COLLATE NOCASE DESC, rowid ASC"
        );
    }
}

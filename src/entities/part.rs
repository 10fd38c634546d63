//! Part entity - a versioned catalog record keyed by part number + revision

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PartStatus {
    New,
    #[default]
    Active,
    Obsolete,
}

impl PartStatus {
    pub const ALL: [PartStatus; 3] = [PartStatus::New, PartStatus::Active, PartStatus::Obsolete];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartStatus::New => "New",
            PartStatus::Active => "Active",
            PartStatus::Obsolete => "Obsolete",
        }
    }

    /// Exact, case-sensitive match against the stored spelling.
    ///
    /// Anything else (including the empty string) coerces to `Active`. Only the
    /// import path uses this; manual entry goes through a constrained choice.
    pub fn coerce(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for PartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(PartStatus::New),
            "active" => Ok(PartStatus::Active),
            "obsolete" => Ok(PartStatus::Obsolete),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl ToSql for PartStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Stored values outside the three spellings (including `''` and NULL) read
/// back as `Active`, the same coercion import applies.
impl FromSql for PartStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = match value {
            ValueRef::Null => "",
            ValueRef::Text(_) => value.as_str()?,
            _ => return Err(FromSqlError::InvalidType),
        };
        let status = Self::coerce(raw);
        if status.as_str() != raw {
            tracing::warn!(stored = raw, "non-canonical status read as {}", status);
        }
        Ok(status)
    }
}

/// Identity pair of a part record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartKey {
    pub part_number: String,
    pub revision: String,
}

impl PartKey {
    pub fn new(part_number: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            revision: revision.into(),
        }
    }
}

impl std::fmt::Display for PartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.part_number, self.revision)
    }
}

impl std::str::FromStr for PartKey {
    type Err = String;

    /// Parses `PART:REV`, splitting on the last colon
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (part_number, revision) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Expected PART:REV, got '{}'", s))?;
        let (part_number, revision) = (part_number.trim(), revision.trim());
        if part_number.is_empty() || revision.is_empty() {
            return Err(format!("Expected PART:REV, got '{}'", s));
        }
        Ok(PartKey::new(part_number, revision))
    }
}

/// The columns of a part record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PartField {
    #[default]
    PartNumber,
    Revision,
    Description,
    WhereUsed,
    Status,
    FolderPath,
    FileNames,
    LastUpdated,
}

impl PartField {
    /// Every column in storage and export order
    pub const ALL: [PartField; 8] = [
        PartField::PartNumber,
        PartField::Revision,
        PartField::Description,
        PartField::WhereUsed,
        PartField::Status,
        PartField::FolderPath,
        PartField::FileNames,
        PartField::LastUpdated,
    ];

    /// Columns accepted by the filter builder
    pub const FILTERABLE: [PartField; 7] = [
        PartField::PartNumber,
        PartField::Revision,
        PartField::Description,
        PartField::WhereUsed,
        PartField::Status,
        PartField::FolderPath,
        PartField::FileNames,
    ];

    /// SQL column name
    pub fn column(&self) -> &'static str {
        match self {
            PartField::PartNumber => "part_number",
            PartField::Revision => "revision",
            PartField::Description => "description",
            PartField::WhereUsed => "where_used",
            PartField::Status => "status",
            PartField::FolderPath => "folder_path",
            PartField::FileNames => "file_names",
            PartField::LastUpdated => "last_updated",
        }
    }

    /// Human-readable label, also used as the CSV export header
    pub fn label(&self) -> &'static str {
        match self {
            PartField::PartNumber => "Part Number",
            PartField::Revision => "Revision",
            PartField::Description => "Description",
            PartField::WhereUsed => "Where Used",
            PartField::Status => "Status",
            PartField::FolderPath => "Folder Path",
            PartField::FileNames => "File Names",
            PartField::LastUpdated => "Last Updated",
        }
    }
}

impl std::fmt::Display for PartField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// The mutable (non-identity) fields of a part
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartFields {
    pub description: Option<String>,
    pub where_used: Option<String>,
    pub status: PartStatus,
    pub folder_path: Option<String>,
    pub file_names: Option<String>,
}

impl PartFields {
    /// Trim optional text and turn blanks into `None`
    pub fn normalized(self) -> Self {
        Self {
            description: non_blank(self.description),
            where_used: non_blank(self.where_used),
            status: self.status,
            folder_path: non_blank(self.folder_path),
            file_names: non_blank(self.file_names),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A part record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub part_number: String,
    pub revision: String,
    pub description: Option<String>,
    pub where_used: Option<String>,
    pub status: PartStatus,
    pub folder_path: Option<String>,
    pub file_names: Option<String>,
    pub last_updated: String,
}

impl Part {
    pub fn new(key: PartKey, fields: PartFields, last_updated: impl Into<String>) -> Self {
        Self {
            part_number: key.part_number,
            revision: key.revision,
            description: fields.description,
            where_used: fields.where_used,
            status: fields.status,
            folder_path: fields.folder_path,
            file_names: fields.file_names,
            last_updated: last_updated.into(),
        }
    }

    pub fn key(&self) -> PartKey {
        PartKey::new(&self.part_number, &self.revision)
    }

    pub fn fields(&self) -> PartFields {
        PartFields {
            description: self.description.clone(),
            where_used: self.where_used.clone(),
            status: self.status,
            folder_path: self.folder_path.clone(),
            file_names: self.file_names.clone(),
        }
    }

    /// Typed accessor for a column's text value (`None` when absent)
    pub fn get(&self, field: PartField) -> Option<&str> {
        match field {
            PartField::PartNumber => Some(&self.part_number),
            PartField::Revision => Some(&self.revision),
            PartField::Description => self.description.as_deref(),
            PartField::WhereUsed => self.where_used.as_deref(),
            PartField::Status => Some(self.status.as_str()),
            PartField::FolderPath => self.folder_path.as_deref(),
            PartField::FileNames => self.file_names.as_deref(),
            PartField::LastUpdated => Some(&self.last_updated),
        }
    }

    /// All columns as display strings, absent values rendered empty
    pub fn to_row(&self) -> Vec<String> {
        PartField::ALL
            .iter()
            .map(|f| self.get(*f).unwrap_or_default().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_coerce_is_exact() {
        assert_eq!(PartStatus::coerce("New"), PartStatus::New);
        assert_eq!(PartStatus::coerce("Obsolete"), PartStatus::Obsolete);
        assert_eq!(PartStatus::coerce(""), PartStatus::Active);
        assert_eq!(PartStatus::coerce("obsolete"), PartStatus::Active);
        assert_eq!(PartStatus::coerce("Retired"), PartStatus::Active);
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("new".parse::<PartStatus>().unwrap(), PartStatus::New);
        assert_eq!("OBSOLETE".parse::<PartStatus>().unwrap(), PartStatus::Obsolete);
        assert!("retired".parse::<PartStatus>().is_err());
    }

    #[test]
    fn test_part_key_parse_splits_on_last_colon() {
        let key: PartKey = "PN:001:B".parse().unwrap();
        assert_eq!(key, PartKey::new("PN:001", "B"));
        assert_eq!(key.to_string(), "PN:001:B");

        assert!("PN001".parse::<PartKey>().is_err());
        assert!("PN001:".parse::<PartKey>().is_err());
        assert!(":A".parse::<PartKey>().is_err());
    }

    #[test]
    fn test_fields_normalized_drops_blanks() {
        let fields = PartFields {
            description: Some("  Bracket  ".to_string()),
            where_used: Some("   ".to_string()),
            status: PartStatus::New,
            folder_path: Some(String::new()),
            file_names: None,
        }
        .normalized();

        assert_eq!(fields.description.as_deref(), Some("Bracket"));
        assert_eq!(fields.where_used, None);
        assert_eq!(fields.folder_path, None);
        assert_eq!(fields.status, PartStatus::New);
    }

    #[test]
    fn test_to_row_follows_column_order() {
        let part = Part::new(
            PartKey::new("PN001", "A"),
            PartFields {
                description: Some("Widget".to_string()),
                ..Default::default()
            },
            "2024-01-02 03:04",
        );
        assert_eq!(
            part.to_row(),
            vec!["PN001", "A", "Widget", "", "Active", "", "", "2024-01-02 03:04"]
        );
    }
}

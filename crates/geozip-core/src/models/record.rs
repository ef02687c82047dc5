use serde::{Deserialize, Serialize};

/// Separator between fields of a record line
pub const FIELD_SEPARATOR: char = '\t';

/// Ordered record lines, line terminators stripped.
pub type Dataset = Vec<String>;

/// Columns of a GeoNames postal code record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    CountryCode,
    PostalCode,
    PlaceName,
    /// First-order subdivision name (state)
    #[default]
    AdminName1,
    /// First-order subdivision code (two-letter state code for US).
    /// Select it as `summary_column` to list codes (`AK, NY`) instead of
    /// names.
    AdminCode1,
    AdminName2,
    AdminCode2,
    AdminName3,
    AdminCode3,
    Latitude,
    Longitude,
    /// 1=estimated, 4=geonameid, 6=centroid of addresses or shape
    Accuracy,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::CountryCode,
        Column::PostalCode,
        Column::PlaceName,
        Column::AdminName1,
        Column::AdminCode1,
        Column::AdminName2,
        Column::AdminCode2,
        Column::AdminName3,
        Column::AdminCode3,
        Column::Latitude,
        Column::Longitude,
        Column::Accuracy,
    ];

    /// 0-based position of this column within a record line
    pub fn index(self) -> usize {
        self as usize
    }

    /// Extract this column from a raw record line.
    /// Returns None when the line has too few fields.
    pub fn get(self, line: &str) -> Option<&str> {
        line.split(FIELD_SEPARATOR).nth(self.index())
    }
}

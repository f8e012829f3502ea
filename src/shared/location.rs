//! Location Types
//!
//! The single persisted entity of the service and its write model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::{FieldViolation, SharedError, Validate};

/// Maximum length of a location code
pub const MAX_LOCATION_CODE_LEN: usize = 16;

/// Sort properties accepted for location listings, paired with their column
const SORTABLE_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("country", "country"),
    ("city", "city"),
    ("locationCode", "location_code"),
];

/// A stored location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub city: String,
    pub location_code: String,
    pub created_at: DateTime<Utc>,
}

impl Location {
    /// Resolve a client sort property to its column name
    ///
    /// Unknown properties are rejected so that only whitelisted identifiers
    /// ever reach an `ORDER BY` clause.
    pub fn sort_column(property: &str) -> Result<&'static str, SharedError> {
        SORTABLE_COLUMNS
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                SharedError::invalid_argument(format!(
                    "No property '{}' found for type 'Location'",
                    property
                ))
            })
    }
}

/// Request body for creating or replacing a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub location_code: String,
}

impl Validate for NewLocation {
    fn validate(&self) -> Result<(), SharedError> {
        let mut violations = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("country", &self.country),
            ("city", &self.city),
            ("locationCode", &self.location_code),
        ] {
            if value.trim().is_empty() {
                violations.push(FieldViolation::new(field, "must not be blank"));
            }
        }

        if self.location_code.chars().count() > MAX_LOCATION_CODE_LEN {
            violations.push(FieldViolation::new(
                "locationCode",
                format!("size must be between 1 and {}", MAX_LOCATION_CODE_LEN),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SharedError::validation(violations))
        }
    }
}

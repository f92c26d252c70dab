//! Semantic column roles assigned by the column classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The role a UI log column plays once classification completes.
///
/// Every column carries exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnRole {
    /// The interaction performed (`click`, `open`, ...).
    Activity,
    /// The UI object type the activity is performed on.
    MainObjectType,
    /// Any further UI object type mentioned by the row.
    ObjectType,
    /// Point in time of the interaction.
    Timestamp,
    /// Attribute whose values identify or describe an object.
    ContextAttribute,
    /// Attribute whose values are payload (typed text, amounts).
    ValueAttribute,
    /// Attribute describing the user rather than any UI object.
    UserAttribute,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 7] = [
        ColumnRole::Activity,
        ColumnRole::MainObjectType,
        ColumnRole::ObjectType,
        ColumnRole::Timestamp,
        ColumnRole::ContextAttribute,
        ColumnRole::ValueAttribute,
        ColumnRole::UserAttribute,
    ];

    /// Returns the label used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Activity => "activity",
            ColumnRole::MainObjectType => "main ui object type",
            ColumnRole::ObjectType => "ui object type",
            ColumnRole::Timestamp => "timestamp",
            ColumnRole::ContextAttribute => "context attribute",
            ColumnRole::ValueAttribute => "value attribute",
            ColumnRole::UserAttribute => "user attribute",
        }
    }

    /// Returns true for context and value attributes.
    pub fn is_object_attribute(&self) -> bool {
        matches!(
            self,
            ColumnRole::ContextAttribute | ColumnRole::ValueAttribute
        )
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnRole {
    type Err = ModelError;

    /// Accepts the display label as well as kebab/snake spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "activity" => Ok(ColumnRole::Activity),
            "main ui object type" | "main object type" => Ok(ColumnRole::MainObjectType),
            "ui object type" | "object type" => Ok(ColumnRole::ObjectType),
            "timestamp" => Ok(ColumnRole::Timestamp),
            "context attribute" => Ok(ColumnRole::ContextAttribute),
            "value attribute" => Ok(ColumnRole::ValueAttribute),
            "user attribute" => Ok(ColumnRole::UserAttribute),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_kebab_case() {
        assert_eq!(
            "context attribute".parse::<ColumnRole>().unwrap(),
            ColumnRole::ContextAttribute
        );
        assert_eq!(
            "value-attribute".parse::<ColumnRole>().unwrap(),
            ColumnRole::ValueAttribute
        );
        assert_eq!(
            "Main_UI_Object_Type".parse::<ColumnRole>().unwrap(),
            ColumnRole::MainObjectType
        );
        assert!("nonsense".parse::<ColumnRole>().is_err());
    }

    #[test]
    fn display_round_trips_every_role() {
        for role in ColumnRole::ALL {
            assert_eq!(role.to_string().parse::<ColumnRole>().unwrap(), role);
        }
    }
}

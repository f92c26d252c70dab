//! Classification thresholds.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Tunable ratios steering the column classifier.
///
/// All values are ratios in `[0, 1]`. The value-attribute threshold is
/// not stored; it is always `1 - context_attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Upper bound on the unique ratio of a UI-object-type column.
    pub ui_object: f64,
    /// Upper bound on the unique ratio of a candidate event column.
    pub activity: f64,
    /// Below this unique ratio an attribute is a context attribute.
    pub context_attribute: f64,
    /// Minimum unique ratio of a timestamp column.
    pub timestamp: f64,
    /// Minimum completeness of the main-object-type column.
    pub completeness: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ui_object: 0.15,
            activity: 0.2,
            context_attribute: 0.5,
            timestamp: 1.0,
            completeness: 0.95,
        }
    }
}

impl Thresholds {
    /// Above this unique ratio an attribute is a value attribute.
    pub fn value_attribute(&self) -> f64 {
        1.0 - self.context_attribute
    }

    pub fn with_ui_object(mut self, value: f64) -> Self {
        self.ui_object = value;
        self
    }

    pub fn with_activity(mut self, value: f64) -> Self {
        self.activity = value;
        self
    }

    pub fn with_context_attribute(mut self, value: f64) -> Self {
        self.context_attribute = value;
        self
    }

    pub fn with_timestamp(mut self, value: f64) -> Self {
        self.timestamp = value;
        self
    }

    pub fn with_completeness(mut self, value: f64) -> Self {
        self.completeness = value;
        self
    }

    /// Rejects any ratio outside `[0, 1]` (NaN included).
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("ui_object", self.ui_object),
            ("activity", self.activity),
            ("context_attribute", self.context_attribute),
            ("timestamp", self.timestamp),
            ("completeness", self.completeness),
        ];
        for (name, value) in entries {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_attribute_is_derived() {
        let thresholds = Thresholds::default().with_context_attribute(0.3);
        assert!((thresholds.value_attribute() - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(Thresholds::default().validate().is_ok());
        let err = Thresholds::default().with_timestamp(1.5).validate().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidThreshold {
                name: "timestamp",
                ..
            }
        ));
        assert!(Thresholds::default().with_activity(f64::NAN).validate().is_err());
    }
}

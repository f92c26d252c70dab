//! Threshold configuration: defaults, then a TOML file, then CLI flags.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use uilog_model::Thresholds;

/// Contents of a `--config` file.
///
/// ```toml
/// [thresholds]
/// ui_object = 0.2
/// context_attribute = 0.4
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Individual threshold values given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdOverrides {
    pub ui_object: Option<f64>,
    pub activity: Option<f64>,
    pub context_attribute: Option<f64>,
    pub timestamp: Option<f64>,
    pub completeness: Option<f64>,
}

impl ThresholdOverrides {
    pub fn apply(&self, mut thresholds: Thresholds) -> Thresholds {
        if let Some(value) = self.ui_object {
            thresholds = thresholds.with_ui_object(value);
        }
        if let Some(value) = self.activity {
            thresholds = thresholds.with_activity(value);
        }
        if let Some(value) = self.context_attribute {
            thresholds = thresholds.with_context_attribute(value);
        }
        if let Some(value) = self.timestamp {
            thresholds = thresholds.with_timestamp(value);
        }
        if let Some(value) = self.completeness {
            thresholds = thresholds.with_completeness(value);
        }
        thresholds
    }
}

pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Layers the config file and the overrides over the defaults and validates
/// the result.
pub fn resolve_thresholds(
    config: Option<&Path>,
    overrides: &ThresholdOverrides,
) -> Result<Thresholds> {
    let base = match config {
        Some(path) => load_config(path)?.thresholds,
        None => Thresholds::default(),
    };
    let thresholds = overrides.apply(base);
    thresholds.validate().context("invalid thresholds")?;
    Ok(thresholds)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn flags_win_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nui_object = 0.3\nactivity = 0.4").unwrap();
        let overrides = ThresholdOverrides {
            activity: Some(0.1),
            ..ThresholdOverrides::default()
        };
        let thresholds = resolve_thresholds(Some(file.path()), &overrides).unwrap();
        assert_eq!(thresholds.ui_object, 0.3);
        assert_eq!(thresholds.activity, 0.1);
        assert_eq!(thresholds.completeness, Thresholds::default().completeness);
    }

    #[test]
    fn out_of_range_override_fails() {
        let overrides = ThresholdOverrides {
            timestamp: Some(2.0),
            ..ThresholdOverrides::default()
        };
        let err = resolve_thresholds(None, &overrides).unwrap_err();
        assert!(format!("{err:#}").contains("timestamp"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nx = 1").unwrap();
        assert!(resolve_thresholds(Some(file.path()), &ThresholdOverrides::default()).is_err());
    }
}

//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the toolkit works out of the box.

use serde::{Deserialize, Serialize};

/// Root toolkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Used as the default dialog title.
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            dialog: DialogConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Default button labels for service-level dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogConfig {
    #[serde(default = "default_ok_label")]
    pub ok_label: String,
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            ok_label: default_ok_label(),
            cancel_label: default_cancel_label(),
        }
    }
}

/// Log output for the demo binary; the terminal owns stdout, so logs go to a
/// file when enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_file: default_log_file(),
        }
    }
}

fn default_project_name() -> String {
    "tidepool".to_string()
}
fn default_ok_label() -> String {
    "OK".to_string()
}
fn default_cancel_label() -> String {
    "Cancel".to_string()
}
fn default_log_file() -> String {
    "tidepool-gallery.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: UiConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.project_name, "tidepool");
        assert_eq!(cfg.dialog.ok_label, "OK");
        assert_eq!(cfg.dialog.cancel_label, "Cancel");
        assert!(!cfg.logging.enabled);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg: UiConfig =
            toml::from_str("project_name = \"demo\"\n[dialog]\nok_label = \"Yes\"").unwrap();
        assert_eq!(cfg.project_name, "demo");
        assert_eq!(cfg.dialog.ok_label, "Yes");
        assert_eq!(cfg.dialog.cancel_label, "Cancel");
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = UiConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: UiConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.project_name, cfg.project_name);
        assert_eq!(back.logging.log_file, cfg.logging.log_file);
    }
}

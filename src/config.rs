//! Runtime configuration read from `BPSENSE_*` environment variables.

use std::path::PathBuf;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_dir: PathBuf,
    pub systolic_model: String,
    pub diastolic_model: String,
    /// Fail model loading when `manifest.json` is absent
    pub require_manifest: bool,
    /// Chart output path; `None` disables export
    pub chart_path: Option<PathBuf>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            systolic_model: "systolic_model.json".to_string(),
            diastolic_model: "diastolic_model.json".to_string(),
            require_manifest: false,
            chart_path: Some(PathBuf::from("bp_prediction.svg")),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("bpsense.log"),
        }
    }
}

pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}

impl AppConfig {
    /// Build configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chart_path = match lookup("BPSENSE_CHART_PATH") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => defaults.chart_path,
        };

        Self {
            model_dir: lookup("BPSENSE_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            systolic_model: lookup("BPSENSE_SYSTOLIC_MODEL").unwrap_or(defaults.systolic_model),
            diastolic_model: lookup("BPSENSE_DIASTOLIC_MODEL")
                .unwrap_or(defaults.diastolic_model),
            require_manifest: lookup("BPSENSE_REQUIRE_MANIFEST")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_manifest),
            chart_path,
            log_mode: lookup("BPSENSE_LOG_MODE")
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup("BPSENSE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }

    #[must_use]
    pub fn systolic_path(&self) -> PathBuf {
        self.model_dir.join(&self.systolic_model)
    }

    #[must_use]
    pub fn diastolic_path(&self) -> PathBuf {
        self.model_dir.join(&self.diastolic_model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.model_dir, PathBuf::from("models"));
        assert_eq!(config.systolic_path(), PathBuf::from("models/systolic_model.json"));
        assert_eq!(config.chart_path, Some(PathBuf::from("bp_prediction.svg")));
        assert_eq!(config.log_mode, LogMode::Auto);
        assert!(!config.require_manifest);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BPSENSE_MODEL_DIR", "/opt/models"),
            ("BPSENSE_DIASTOLIC_MODEL", "dia.json"),
            ("BPSENSE_REQUIRE_MANIFEST", "yes"),
            ("BPSENSE_CHART_PATH", ""),
            ("BPSENSE_LOG_MODE", "stdout"),
        ]));
        assert_eq!(config.diastolic_path(), PathBuf::from("/opt/models/dia.json"));
        assert!(config.require_manifest);
        assert_eq!(config.chart_path, None);
        assert_eq!(config.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" 1 "));
        assert!(!parse_bool("off"));
    }
}

//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::scoring::evaluator::{DEFAULT_PASS_THRESHOLD, DEFAULT_STABLE_DELTA};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub stop: StopConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub pass_threshold: f64,
    pub stable_delta: f64,
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            stable_delta: DEFAULT_STABLE_DELTA,
            seed: None,
        }
    }
}

pub const DEFAULT_STOP_KEYWORDS: &[&str] = &[
    "manufacturing",
    "plant",
    "factory",
    "warehouse",
    "warehousing",
    "industrial",
    "supply chain operations",
    "logistics",
];

/// Stop-condition engine settings. Keys are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopConfig {
    pub min_final_score: f64,
    pub stop_keywords: Vec<String>,
    pub checks: StopChecks,
    pub thresholds: StopThresholds,
}

impl Default for StopConfig {
    fn default() -> Self {
        Self {
            min_final_score: DEFAULT_PASS_THRESHOLD,
            stop_keywords: DEFAULT_STOP_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            checks: StopChecks::default(),
            thresholds: StopThresholds::default(),
        }
    }
}

impl StopConfig {
    /// Configured keywords, or the defaults when the list is empty.
    pub fn effective_stop_keywords(&self) -> Vec<String> {
        if self.stop_keywords.is_empty() {
            DEFAULT_STOP_KEYWORDS.iter().map(|s| s.to_string()).collect()
        } else {
            self.stop_keywords.clone()
        }
    }
}

/// Per-rule toggles. A disabled rule still reports its details.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopChecks {
    pub jd_keywords: bool,
    pub min_score: bool,
    pub yrs8: bool,
    pub mgmt5: bool,
    #[serde(rename = "architectNoIC")]
    pub architect_no_ic: bool,
    pub legacy: bool,
    pub location_no_remote: bool,
    pub devops_only: bool,
    pub qa_only: bool,
    pub pm_only: bool,
    pub clearance: bool,
    pub physical_only: bool,
    pub compliance_only: bool,
    pub grc_only: bool,
}

impl Default for StopChecks {
    fn default() -> Self {
        Self {
            jd_keywords: true,
            min_score: true,
            yrs8: true,
            mgmt5: true,
            architect_no_ic: true,
            legacy: true,
            location_no_remote: true,
            devops_only: true,
            qa_only: true,
            pm_only: true,
            clearance: true,
            physical_only: true,
            compliance_only: true,
            grc_only: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopThresholds {
    pub years_min_required_stop: u32,
    pub management_required_stop: u32,
    pub onsite_days_stop: u32,
}

impl Default for StopThresholds {
    fn default() -> Self {
        Self {
            years_min_required_stop: 8,
            management_required_stop: 5,
            onsite_days_stop: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Config {
    /// Load from the user config directory, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            info!("Wrote default configuration to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    /// Override the pass threshold; the stop engine's score floor follows it.
    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.scoring.pass_threshold = threshold;
        self.stop.min_final_score = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scoring.pass_threshold, 8.0);
        assert_eq!(config.scoring.stable_delta, 0.5);
        assert_eq!(config.stop.min_final_score, 8.0);
        assert_eq!(config.stop.stop_keywords.len(), 8);
        assert!(config.stop.checks.grc_only);
        assert_eq!(config.stop.thresholds.onsite_days_stop, 5);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default().with_pass_threshold(7.5);
        config.scoring.seed = Some(42);
        config.stop.checks.legacy = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml_text = r#"
            [stop]
            minFinalScore = 6.5
            stopKeywords = []

            [stop.checks]
            architectNoIC = false
            qaOnly = false

            [stop.thresholds]
            yearsMinRequiredStop = 10
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();

        assert_eq!(config.scoring.pass_threshold, 8.0);
        assert_eq!(config.stop.min_final_score, 6.5);
        assert!(!config.stop.checks.architect_no_ic);
        assert!(!config.stop.checks.qa_only);
        assert!(config.stop.checks.pm_only);
        assert_eq!(config.stop.thresholds.years_min_required_stop, 10);
        assert_eq!(config.stop.thresholds.management_required_stop, 5);
        assert_eq!(config.stop.effective_stop_keywords().len(), 8);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scoring = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ScreenerError::Configuration(_))
        ));
    }
}

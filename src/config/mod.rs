use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::savings::SavingsPolicy;

/// Optional colour overrides, as `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trees: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Seconds between automatic testimonial slides (0 turns it off)
    #[serde(default = "default_auto_advance_secs")]
    pub auto_advance_secs: u64,

    /// Pricing constants; any field left out keeps its default
    #[serde(default)]
    pub policy: SavingsPolicy,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_auto_advance_secs() -> u64 {
    crate::testimonials::AUTO_ADVANCE.as_secs()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_advance_secs: default_auto_advance_secs(),
            policy: SavingsPolicy::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the default config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("purrify").join("config.toml"))
    }

    /// Load config from `path`, or from the user config directory.
    ///
    /// An explicit path must exist. The default location may be absent, and a
    /// file that fails to parse or holds an unusable policy falls back to
    /// defaults with a warning. The file is only read, never written.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("Config file not found: {}", p.display());
                }
                p.to_path_buf()
            }
            None => match Self::config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(AppConfig::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = match Self::parse(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {:#}", path.display(), e);
                AppConfig::default()
            }
        };
        Ok(config)
    }

    /// Parse TOML and replace an invalid policy with the defaults
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;

        if let Err(e) = config.policy.validate() {
            tracing::warn!("Ignoring configured policy: {}", e);
            config.policy = SavingsPolicy::default();
        }

        Ok(config)
    }

    /// None when auto-advance is switched off
    pub fn auto_advance(&self) -> Option<Duration> {
        match self.auto_advance_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::CostTable;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            auto_advance_secs: 8,
            policy: SavingsPolicy {
                additive_cost_per_month: 12.5,
                premium: CostTable::new([45.0, 75.0, 105.0, 135.0, 165.0]),
                ..SavingsPolicy::default()
            },
            theme: ThemeConfig {
                accent: Some("#9333ea".to_string()),
                money: None,
                trees: None,
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = AppConfig::parse(
            r#"
            auto_advance_secs = 0

            [policy]
            cat_food_cost_per_month = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(config.auto_advance(), None);
        assert_eq!(config.policy.cat_food_cost_per_month, 25.0);
        assert_eq!(config.policy.additive_cost_per_month, 10.0);
        assert_eq!(config.policy.regular, CostTable::REGULAR);
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auto_advance(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_policy_replaced() {
        let config = AppConfig::parse(
            r#"
            [policy]
            cat_food_cost_per_month = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.policy, SavingsPolicy::default());
    }

    #[test]
    fn test_table_with_wrong_length_fails_to_parse() {
        let result = AppConfig::parse(
            r#"
            [policy]
            regular = [20.0, 35.0]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = std::env::temp_dir().join("purrify-test-does-not-exist.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let path = std::env::temp_dir().join(format!("purrify-config-{}.toml", std::process::id()));
        std::fs::write(&path, "auto_advance_secs = 3\n").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(config.auto_advance_secs, 3);
    }
}

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheme
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::FamilyPreset;

use super::types::{BenefitConfig, BenefitsFile, DaysFile, SchemeMetadata};

/// Loads and provides access to scheme configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and holds the resulting [`BenefitConfig`] plus any family presets.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/sweden/
/// ├── scheme.yaml      # Scheme metadata
/// ├── benefits.yaml    # Rates, employer supplement, child allowance
/// ├── days.yaml        # Day balances and allocation settings
/// └── families/        # Optional household presets
///     └── two_earners.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use parental_leave_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sweden").unwrap();
/// println!("Scheme: {}", loader.scheme().name);
/// println!("Presets: {}", loader.families().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BenefitConfig,
    families: Vec<FamilyPreset>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/sweden")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// A missing `families/` directory is not an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use parental_leave_planner::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/sweden")?;
    /// # Ok::<(), parental_leave_planner::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsFile>(&path.join("benefits.yaml"))?;
        let days = Self::load_yaml::<DaysFile>(&path.join("days.yaml"))?;
        let families = Self::load_families(&path.join("families"))?;

        Ok(Self {
            config: BenefitConfig::new(metadata, benefits, days),
            families,
        })
    }

    /// Wraps an already-built configuration without presets.
    ///
    /// # Example
    ///
    /// ```
    /// use parental_leave_planner::config::{BenefitConfig, ConfigLoader};
    ///
    /// let loader = ConfigLoader::from_config(BenefitConfig::default());
    /// assert!(loader.families().is_empty());
    /// ```
    pub fn from_config(config: BenefitConfig) -> Self {
        Self {
            config,
            families: Vec::new(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all presets from the families directory, ordered by file name.
    fn load_families(families_dir: &Path) -> EngineResult<Vec<FamilyPreset>> {
        let families_dir_str = families_dir.display().to_string();

        if !families_dir.exists() {
            warn!(path = %families_dir_str, "No family presets directory, serving no presets");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(families_dir).map_err(|_| EngineError::ConfigNotFound {
            path: families_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: families_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| Self::load_yaml::<FamilyPreset>(path))
            .collect()
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &BenefitConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.config.metadata
    }

    /// Returns all family presets.
    pub fn families(&self) -> &[FamilyPreset] {
        &self.families
    }

    /// Gets a family preset by name.
    pub fn family(&self, name: &str) -> Option<&FamilyPreset> {
        self.families.iter().find(|preset| preset.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExhaustionPolicy, SupplementPolicy};
    use crate::models::CustodyType;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/sweden"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.scheme().code, "se-fp");
        assert_eq!(loader.scheme().version, "2025");
    }

    #[test]
    fn test_loaded_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let defaults = BenefitConfig::default();

        assert_eq!(loader.config().rates, defaults.rates);
        assert_eq!(loader.config().supplement, defaults.supplement);
        assert_eq!(loader.config().child_allowance, defaults.child_allowance);
        assert_eq!(loader.config().days, defaults.days);
        assert_eq!(loader.config().allocation, defaults.allocation);
    }

    #[test]
    fn test_loaded_policies() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config().supplement.policy, SupplementPolicy::Tiered);
        assert_eq!(
            loader.config().allocation.exhaustion,
            ExhaustionPolicy::Truncate
        );
        assert_eq!(
            loader.config().rates.replacement_rate,
            Decimal::new(80, 2)
        );
    }

    #[test]
    fn test_family_presets_loaded_in_name_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let names: Vec<&str> = loader.families().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["High earner with agreement", "Single parent", "Two earners"]
        );
        let single = loader.family("Single parent").unwrap();
        assert_eq!(single.household.custody, CustodyType::Sole);
        assert!(loader.family("Unknown").is_none());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("scheme.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_families_directory_yields_no_presets() {
        let families = ConfigLoader::load_families(Path::new("/nonexistent/families")).unwrap();
        assert!(families.is_empty());
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!(
            "parental-leave-planner-bad-{}",
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("scheme.yaml");
        fs::write(&file, "code: [unclosed").unwrap();

        let result = ConfigLoader::load_yaml::<SchemeMetadata>(&file);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("scheme.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}

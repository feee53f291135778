//! Tuning configuration loader.

use std::path::Path;

use creature_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`AiConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<AiConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AiConfig> {
        let config: AiConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.heal_cooldown_min > config.heal_cooldown_max {
            anyhow::bail!(
                "heal_cooldown_min ({}) exceeds heal_cooldown_max ({})",
                config.heal_cooldown_min,
                config.heal_cooldown_max
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hearing_threshold = 5.5\nally_alert_radius = 20.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.hearing_threshold, 5.5);
        assert_eq!(config.ally_alert_radius, 20.0);
        assert_eq!(config.area_radius, AiConfig::DEFAULT_AREA_RADIUS);
    }

    #[test]
    fn inverted_cooldown_is_rejected() {
        let err = ConfigLoader::parse("heal_cooldown_min = 6.0\nheal_cooldown_max = 2.0").unwrap_err();
        assert!(err.to_string().contains("heal_cooldown_min"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}

//! Content factory for loading everything the arena needs from one directory.

use std::path::{Path, PathBuf};

use creature_core::{AiConfig, SensorRegistry, SpellCatalog};
use tracing::debug;

use crate::loaders::{ConfigLoader, LoadResult, SensorLoader, Skirmish, SkirmishLoader, SpellLoader};

/// Content factory that loads creature content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── sensors.ron
/// ├── spells.ron
/// └── skirmishes/
///     └── crossroads.ron
/// ```
///
/// `config.toml`, `sensors.ron` and `spells.ron` are optional; a missing
/// file means the built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tuning configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<AiConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AiConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the species sensor table from `sensors.ron`.
    pub fn load_sensors(&self) -> LoadResult<SensorRegistry> {
        let path = self.data_dir.join("sensors.ron");
        if !path.exists() {
            debug!(path = %path.display(), "no sensor table, using built-in");
            return Ok(SensorRegistry::builtin());
        }
        SensorLoader::load(&path)
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        let path = self.data_dir.join("spells.ron");
        if !path.exists() {
            debug!(path = %path.display(), "no spell pack, using built-in");
            return Ok(SpellCatalog::builtin());
        }
        SpellLoader::load(&path)
    }

    /// Load a skirmish from `skirmishes/{name}.ron`.
    pub fn load_skirmish(&self, name: &str) -> LoadResult<Skirmish> {
        let path = self.data_dir.join("skirmishes").join(format!("{}.ron", name));
        SkirmishLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), AiConfig::default());
        assert_eq!(factory.load_sensors().unwrap(), SensorRegistry::builtin());
        assert_eq!(factory.load_spells().unwrap(), SpellCatalog::builtin());
        assert!(factory.load_skirmish("missing").is_err());
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}

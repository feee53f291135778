//! Species sensor table loader.

use std::collections::BTreeMap;
use std::path::Path;

use creature_core::{SensorProfile, SensorRegistry, SpeciesId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Sensor table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorTable {
    /// Profile for species the table does not list.
    #[serde(default)]
    pub fallback: Option<SensorProfile>,
    /// `(species id, profile)` pairs, replacing or extending the built-in rows.
    pub species: Vec<(u16, SensorProfile)>,
}

/// Loader for species sensor tables from RON files.
pub struct SensorLoader;

impl SensorLoader {
    /// Load a sensor table, layer it over the built-in rows and validate
    /// the result. One bad row fails the whole table.
    pub fn load(path: &Path) -> LoadResult<SensorRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SensorRegistry> {
        let table: SensorTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse sensor table RON: {}", e))?;

        let mut rows: BTreeMap<SpeciesId, SensorProfile> = SensorRegistry::builtin()
            .iter()
            .map(|(species, profile)| (species, *profile))
            .collect();
        rows.extend(
            table
                .species
                .into_iter()
                .map(|(id, profile)| (SpeciesId(id), profile)),
        );

        let fallback = table.fallback.unwrap_or_default();
        SensorRegistry::from_entries(rows, fallback)
            .map_err(|e| anyhow::anyhow!("Invalid sensor table: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_core::SightAcuity;

    const TABLE: &str = r#"
        (
            species: [
                (23, (acuity: Finite(1.2), fov_standard: 180.0, fov_wary: 220.0, hearing_radius: 20.0, sight_radius: 80.0)),
                (300, (acuity: Infinite, fov_standard: 190.0, fov_wary: 240.0, hearing_radius: 16.0, sight_radius: 100.0)),
            ],
        )
    "#;

    #[test]
    fn rows_layer_over_builtins() {
        let builtin = SensorRegistry::builtin();
        let registry = SensorLoader::parse(TABLE).unwrap();

        assert_eq!(registry.len(), builtin.len() + 1);
        assert_eq!(registry.lookup(SpeciesId::WRAITH).acuity, SightAcuity::Finite(1.2));
        assert_eq!(registry.lookup(SpeciesId(300)).acuity, SightAcuity::Infinite);
        assert_eq!(registry.lookup(SpeciesId::RAT), builtin.lookup(SpeciesId::RAT));
        assert_eq!(registry.lookup(SpeciesId(999)), SensorProfile::DEFAULT);
    }

    #[test]
    fn narrow_wary_cone_fails_the_table() {
        let bad = TABLE.replace("fov_wary: 220.0", "fov_wary: 120.0");
        assert!(SensorLoader::parse(&bad).is_err());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sensors.ron");
        std::fs::write(&path, TABLE).unwrap();
        let registry = SensorLoader::load(&path).unwrap();
        assert!(registry.contains(SpeciesId::WRAITH));
    }
}

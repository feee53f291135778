//! Arena run configuration and its environment overrides.
use std::env;
use std::path::PathBuf;

/// Content shipped with the workspace.
const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../creature/content/data");

/// Everything needed to pick, load and run one skirmish.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub data_dir: PathBuf,
    pub skirmish: String,
    pub frames: u64,
    /// Seconds per frame.
    pub delta: f32,
    /// Replaces the skirmish's own world seed when set.
    pub seed: Option<u64>,
    pub player_level: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            skirmish: "crossroads".to_string(),
            frames: 120,
            delta: 1.0 / 10.0,
            seed: None,
            player_level: 1,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `ARENA_DATA_DIR`
    /// - `ARENA_SKIRMISH`
    /// - `ARENA_FRAMES`
    /// - `ARENA_DELTA`
    /// - `ARENA_SEED`
    /// - `ARENA_PLAYER_LEVEL`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("ARENA_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(name) = read_env::<String>("ARENA_SKIRMISH").filter(|n| !n.is_empty()) {
            config.skirmish = name;
        }

        if let Some(frames) = read_env::<u64>("ARENA_FRAMES") {
            config.frames = frames.max(1);
        }

        if let Some(delta) = read_env::<f32>("ARENA_DELTA").filter(|d| d.is_finite() && *d > 0.0) {
            config.delta = delta;
        }

        config.seed = read_env::<u64>("ARENA_SEED").or(config.seed);

        if let Some(level) = read_env::<u32>("ARENA_PLAYER_LEVEL") {
            config.player_level = level.max(1);
        }

        config
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_shipped_content() {
        let config = ArenaConfig::default();
        assert!(config.data_dir.join("skirmishes").join("crossroads.ron").exists());
        assert_eq!(config.skirmish, "crossroads");
        assert!(config.seed.is_none());
    }
}

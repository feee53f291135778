use std::sync::atomic::{AtomicBool, Ordering};

use creature_core::WorldOracle;

/// World flags. Darkness and loading change while the runtime runs, so
/// they sit behind atomics and can be flipped through a shared handle.
#[derive(Debug, Default)]
pub struct WorldFlags {
    in_dungeon: bool,
    player_in_darkness: AtomicBool,
    load_in_progress: AtomicBool,
}

impl WorldFlags {
    pub fn new(in_dungeon: bool) -> Self {
        Self {
            in_dungeon,
            ..Self::default()
        }
    }

    pub fn outdoors() -> Self {
        Self::new(false)
    }

    pub fn dungeon() -> Self {
        Self::new(true)
    }

    pub fn set_player_in_darkness(&self, dark: bool) {
        self.player_in_darkness.store(dark, Ordering::Relaxed);
    }

    pub fn set_load_in_progress(&self, loading: bool) {
        self.load_in_progress.store(loading, Ordering::Relaxed);
    }
}

impl WorldOracle for WorldFlags {
    fn in_dungeon(&self) -> bool {
        self.in_dungeon
    }

    fn player_in_darkness(&self) -> bool {
        self.player_in_darkness.load(Ordering::Relaxed)
    }

    fn load_in_progress(&self) -> bool {
        self.load_in_progress.load(Ordering::Relaxed)
    }
}

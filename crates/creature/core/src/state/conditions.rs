//! Status flags and timed magical effects on an agent.
//!
//! Effects store `expires_at` in game seconds. Flags derived from effects are
//! raised when the effect is added and dropped when it expires; flags set by
//! the host (poison from a weapon hit, say) are left alone.

use crate::magic::EffectKey;

bitflags::bitflags! {
    /// Status flags consulted by perception and the cast gate.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Conditions: u16 {
        const PARALYZED    = 1 << 0;
        const SILENCED     = 1 << 1;
        const INVISIBLE    = 1 << 2;
        const BLENDING     = 1 << 3;
        const SHADE        = 1 << 4;
        const SLOW_FALLING = 1 << 5;
        const LEVITATING   = 1 << 6;
        const POISONED     = 1 << 7;
        const DISEASED     = 1 << 8;
    }
}

impl Conditions {
    /// Any of the magical concealment variants.
    pub const CONCEALED: Self = Self::INVISIBLE.union(Self::BLENDING).union(Self::SHADE);

    #[inline]
    pub fn is_concealed(self) -> bool {
        self.intersects(Self::CONCEALED)
    }

    /// Something a cure spell could fix.
    #[inline]
    pub fn is_afflicted(self) -> bool {
        self.intersects(Self::POISONED | Self::DISEASED)
    }
}

/// A single timed effect with expiration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveEffect {
    pub key: EffectKey,
    pub expires_at: f64,
}

/// Timed effects currently running on an agent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if an effect is running.
    pub fn has(&self, key: EffectKey) -> bool {
        self.effects.iter().any(|e| e.key == key)
    }

    /// Adds an effect, extending to the later expiration when already present.
    pub fn add(&mut self, key: EffectKey, expires_at: f64) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.key == key) {
            existing.expires_at = existing.expires_at.max(expires_at);
            return;
        }
        self.effects.push(ActiveEffect { key, expires_at });
    }

    /// Removes effects whose time has run out and returns their keys.
    pub fn expire(&mut self, now: f64) -> Vec<EffectKey> {
        let mut expired = Vec::new();
        self.effects.retain(|e| {
            if e.expires_at <= now {
                expired.push(e.key);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

//! Per-agent mutable AI state: awareness, timers, the classified spellbook
//! and the random stream.

use glam::Vec3;

use super::EntityId;
use crate::env::AgentRng;
use crate::magic::{ClassifiedSpellbook, Spell};

/// How much an agent knows about its current target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Awareness {
    /// No target detected.
    Unaware,
    /// Target detected earlier but not in sight now.
    Wary,
    /// Target detected and in sight.
    Aware,
}

/// Detection state relative to the current target.
#[derive(Clone, Debug, PartialEq)]
pub struct PerceptionState {
    /// Observation link to the current target. Re-validated every tick.
    pub target: Option<EntityId>,
    pub detected: bool,
    pub in_sight: bool,
    /// Detected but not in sight. Kept in step with `field_of_view`.
    pub is_wary: bool,
    pub field_of_view: f32,
    pub last_known: Option<Vec3>,
    pub old_last_known: Option<Vec3>,
    pub predicted: Option<Vec3>,
    /// Game time of the last sighting or sound.
    pub last_sensed_at: f64,
}

impl PerceptionState {
    pub fn new(field_of_view: f32) -> Self {
        Self {
            target: None,
            detected: false,
            in_sight: false,
            is_wary: false,
            field_of_view,
            last_known: None,
            old_last_known: None,
            predicted: None,
            last_sensed_at: 0.0,
        }
    }

    pub fn awareness(&self) -> Awareness {
        match (self.detected, self.in_sight) {
            (false, _) => Awareness::Unaware,
            (true, false) => Awareness::Wary,
            (true, true) => Awareness::Aware,
        }
    }

    /// Drops the target link and everything learned about it.
    pub fn forget(&mut self) {
        self.target = None;
        self.detected = false;
        self.in_sight = false;
        self.last_known = None;
        self.old_last_known = None;
        self.predicted = None;
    }

    /// Records a fresh fix on the target's position.
    pub fn mark_position(&mut self, position: Vec3) {
        self.old_last_known = self.last_known;
        self.last_known = Some(position);
        self.predicted = Some(position);
    }
}

impl Default for PerceptionState {
    fn default() -> Self {
        Self::new(190.0)
    }
}

/// Everything the decision engine remembers between ticks.
#[derive(Clone, Debug, Default)]
pub struct Mind {
    pub perception: PerceptionState,
    pub spellbook: ClassifiedSpellbook,
    /// Earliest game time at which the heal step looks again.
    pub next_heal_check: f64,
    /// Target the combat-prep buff was already cast against.
    pub prepared_against: Option<EntityId>,
    /// Output of the ranged/touch spell callbacks, consumed by the host.
    pub selected_spell: Option<Spell>,
    pub rng: AgentRng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awareness_follows_flags() {
        let mut p = PerceptionState::default();
        assert_eq!(p.awareness(), Awareness::Unaware);
        p.detected = true;
        assert_eq!(p.awareness(), Awareness::Wary);
        p.in_sight = true;
        assert_eq!(p.awareness(), Awareness::Aware);
        p.forget();
        assert_eq!(p.awareness(), Awareness::Unaware);
    }

    #[test]
    fn mark_position_keeps_previous_fix() {
        let mut p = PerceptionState::default();
        p.mark_position(Vec3::X);
        p.mark_position(Vec3::Z);
        assert_eq!(p.old_last_known, Some(Vec3::X));
        assert_eq!(p.predicted, Some(Vec3::Z));
    }
}

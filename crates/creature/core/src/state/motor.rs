use glam::Vec3;

/// Movement controller state owned by the host's locomotion system.
///
/// An agent without a motor cannot act, makes no noise beyond the floor
/// value, and cannot be seen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Motor {
    pub velocity: Vec3,
    pub grounded: bool,
    /// Player only: crouched or sneaking.
    pub crouching: bool,
    /// Capsule height.
    pub height: f32,
    /// Host allows the creature to act this frame.
    pub can_act: bool,
    /// An uninterruptible animation (attack swing, spell release) is playing.
    pub playing_one_shot: bool,
    /// The creature is subject to gravity.
    pub falls: bool,
    /// Height of the last ground contact.
    pub last_grounded_y: f32,
    pub levitating: bool,
    /// Locomotion reported an obstacle on the way to the target.
    pub obstacle_detected: bool,
    /// A spellcasting animation is playing.
    pub casting: bool,
}

impl Motor {
    pub const DEFAULT_HEIGHT: f32 = 1.8;
}

impl Default for Motor {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
            crouching: false,
            height: Self::DEFAULT_HEIGHT,
            can_act: true,
            playing_one_shot: false,
            falls: true,
            last_grounded_y: 0.0,
            levitating: false,
            obstacle_detected: false,
            casting: false,
        }
    }
}

/// A carried light (torch, lantern, candle).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightSource {
    /// Illumination radius.
    pub range: f32,
    /// Holy candles ward off undead sight.
    pub holy: bool,
}

impl LightSource {
    pub fn torch() -> Self {
        Self {
            range: 10.0,
            holy: false,
        }
    }

    pub fn holy_candle() -> Self {
        Self {
            range: 6.0,
            holy: true,
        }
    }
}

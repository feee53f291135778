//! Spell descriptors.

use crate::state::Conditions;

/// Identifies what a spell effect does. Only the first effect of a spell
/// decides how the spell is classified.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EffectKey {
    DamageHealth,
    ContinuousDamageHealth,
    Paralyze,
    Silence,
    HealHealth,
    HealHealthArea,
    CurePoison,
    CureDisease,
    ChameleonNormal,
    ChameleonTrue,
    ShadowNormal,
    ShadowTrue,
    InvisibilityNormal,
    InvisibilityTrue,
    MageLight,
    Light,
    Slowfall,
    Levitate,
    FreeAction,
    SpellAbsorption,
    SpellReflection,
    SpellResistance,
    SpellShield,
}

impl EffectKey {
    /// Status flag an active effect of this kind raises on its bearer.
    pub fn condition(self) -> Conditions {
        match self {
            EffectKey::Paralyze => Conditions::PARALYZED,
            EffectKey::Silence => Conditions::SILENCED,
            EffectKey::ChameleonNormal | EffectKey::ChameleonTrue => Conditions::BLENDING,
            EffectKey::ShadowNormal | EffectKey::ShadowTrue => Conditions::SHADE,
            EffectKey::InvisibilityNormal | EffectKey::InvisibilityTrue => Conditions::INVISIBLE,
            EffectKey::Slowfall => Conditions::SLOW_FALLING,
            EffectKey::Levitate => Conditions::LEVITATING,
            _ => Conditions::empty(),
        }
    }

    /// Shadow magic only works in the dark.
    pub fn is_shadow(self) -> bool {
        matches!(self, EffectKey::ShadowNormal | EffectKey::ShadowTrue)
    }

    pub fn is_concealment(self) -> bool {
        self.condition().is_concealed()
    }

    /// Light sources, whether cast or carried.
    pub fn is_light(self) -> bool {
        matches!(self, EffectKey::Light | EffectKey::MageLight)
    }
}

/// How a spell picks what it lands on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetType {
    #[default]
    CasterOnly,
    ByTouch,
    SingleTargetAtRange,
    AreaAroundCaster,
    AreaAtRange,
}

impl TargetType {
    /// Released on the caster's own position, with no aimed target.
    pub fn is_caster_centered(self) -> bool {
        matches!(self, TargetType::CasterOnly | TargetType::AreaAroundCaster)
    }
}

/// Damage element; decides which tolerance a target resists with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Fire,
    Frost,
    Shock,
    #[default]
    Magic,
    Poison,
}

/// A castable spell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Spell {
    pub name: String,
    pub target: TargetType,
    pub element: Element,
    pub effects: Vec<EffectKey>,
    /// Magicka deducted when the spell is released.
    pub cost: u32,
    /// Seconds a timed effect lasts; zero for instant effects.
    pub duration: f32,
    /// Health restored or removed by instant effects.
    pub magnitude: u32,
}

impl Spell {
    pub fn new(
        name: impl Into<String>,
        target: TargetType,
        element: Element,
        effect: EffectKey,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            element,
            effects: vec![effect],
            cost: 0,
            duration: 0.0,
            magnitude: 0,
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_magnitude(mut self, magnitude: u32) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Empty descriptor substituted for spells that failed to resolve.
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn is_inert(&self) -> bool {
        self.effects.is_empty()
    }

    /// Key of the first effect, which identifies the spell.
    pub fn key(&self) -> Option<EffectKey> {
        self.effects.first().copied()
    }

    pub fn is_area(&self) -> bool {
        matches!(
            self.target,
            TargetType::AreaAroundCaster | TargetType::AreaAtRange
        )
    }
}

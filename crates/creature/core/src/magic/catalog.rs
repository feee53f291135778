//! Registry of classic spell ids and the custom spells creatures learn.

use std::collections::BTreeMap;

use tracing::warn;

use super::{EffectKey, Element, Spell, TargetType};
use crate::error::{AiError, ErrorSeverity};

/// Spell lookups that found nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpellLookupError {
    #[error("unknown classic spell id {0}")]
    UnknownClassicSpell(u16),
}

impl AiError for SpellLookupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Degraded
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownClassicSpell(_) => "SPELL_UNKNOWN_CLASSIC",
        }
    }
}

/// Spells that are not part of the classic table.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CustomSpell {
    TrueChameleon,
    TrueShadow,
    TrueInvisibility,
    HealingAura,
    MageLight,
    CurePoison,
}

impl CustomSpell {
    pub const ALL: [CustomSpell; 6] = [
        CustomSpell::TrueChameleon,
        CustomSpell::TrueShadow,
        CustomSpell::TrueInvisibility,
        CustomSpell::HealingAura,
        CustomSpell::MageLight,
        CustomSpell::CurePoison,
    ];

    /// Built-in descriptor.
    pub fn descriptor(self) -> Spell {
        use TargetType::*;
        match self {
            CustomSpell::TrueChameleon => {
                Spell::new("True Chameleon", CasterOnly, Element::Magic, EffectKey::ChameleonTrue)
                    .with_cost(30)
                    .with_duration(20.0)
            }
            CustomSpell::TrueShadow => {
                Spell::new("True Shadow", CasterOnly, Element::Magic, EffectKey::ShadowTrue)
                    .with_cost(30)
                    .with_duration(20.0)
            }
            CustomSpell::TrueInvisibility => Spell::new(
                "True Invisibility",
                CasterOnly,
                Element::Magic,
                EffectKey::InvisibilityTrue,
            )
            .with_cost(45)
            .with_duration(20.0),
            CustomSpell::HealingAura => Spell::new(
                "Healing Aura",
                AreaAroundCaster,
                Element::Magic,
                EffectKey::HealHealthArea,
            )
            .with_cost(28)
            .with_magnitude(12),
            CustomSpell::MageLight => {
                Spell::new("Mage Light", CasterOnly, Element::Magic, EffectKey::MageLight)
                    .with_cost(8)
                    .with_duration(60.0)
            }
            CustomSpell::CurePoison => {
                Spell::new("Cure Poison", CasterOnly, Element::Magic, EffectKey::CurePoison)
                    .with_cost(10)
            }
        }
    }
}

/// Classic ids in the order the table is built.
const CLASSIC_IDS: [u16; 24] = [
    3, 4, 6, 7, 8, 10, 14, 16, 20, 22, 23, 25, 29, 31, 34, 37, 39, 44, 45, 46, 47, 50, 53, 97,
];

fn classic_descriptor(id: u16) -> Option<Spell> {
    use EffectKey::*;
    use Element::*;
    use TargetType::*;

    let spell = match id {
        3 => Spell::new("Frostbite", ByTouch, Frost, DamageHealth).with_cost(10).with_magnitude(12),
        4 => Spell::new("Levitate", CasterOnly, Magic, Levitate).with_cost(25).with_duration(30.0),
        6 => Spell::new("Invisibility", CasterOnly, Magic, InvisibilityNormal)
            .with_cost(35)
            .with_duration(20.0),
        7 => Spell::new("Wizard's Fire", SingleTargetAtRange, Fire, DamageHealth)
            .with_cost(15)
            .with_magnitude(14),
        8 => Spell::new("Shock", ByTouch, Shock, DamageHealth).with_cost(10).with_magnitude(14),
        10 => Spell::new("Free Action", CasterOnly, Magic, FreeAction).with_cost(15),
        14 => Spell::new("Fireball", AreaAtRange, Fire, DamageHealth).with_cost(30).with_magnitude(18),
        16 => Spell::new("Ice Bolt", SingleTargetAtRange, Frost, DamageHealth)
            .with_cost(25)
            .with_magnitude(20),
        20 => Spell::new("Ice Storm", AreaAtRange, Frost, DamageHealth).with_cost(40).with_magnitude(22),
        22 => Spell::new("Spell Shield", CasterOnly, Magic, SpellShield)
            .with_cost(40)
            .with_duration(25.0),
        23 => Spell::new("Silence", SingleTargetAtRange, Magic, Silence)
            .with_cost(25)
            .with_duration(15.0),
        25 => Spell::new("Fire Storm", AreaAroundCaster, Fire, DamageHealth)
            .with_cost(35)
            .with_magnitude(18),
        29 => Spell::new("Toxic Cloud", AreaAtRange, Poison, ContinuousDamageHealth)
            .with_cost(30)
            .with_magnitude(10)
            .with_duration(6.0),
        31 => Spell::new("Lightning", SingleTargetAtRange, Shock, DamageHealth)
            .with_cost(20)
            .with_magnitude(18),
        34 => Spell::new("Wizard Rend", SingleTargetAtRange, Magic, DamageHealth)
            .with_cost(45)
            .with_magnitude(30),
        37 => Spell::new("Slowfall", CasterOnly, Magic, Slowfall).with_cost(10).with_duration(20.0),
        39 => Spell::new("Spell Resistance", CasterOnly, Magic, SpellResistance)
            .with_cost(30)
            .with_duration(25.0),
        44 => Spell::new("Chameleon", CasterOnly, Magic, ChameleonNormal)
            .with_cost(20)
            .with_duration(20.0),
        45 => Spell::new("Shadow", CasterOnly, Magic, ShadowNormal).with_cost(20).with_duration(20.0),
        46 => Spell::new("Spell Reflection", CasterOnly, Magic, SpellReflection)
            .with_cost(45)
            .with_duration(25.0),
        47 => Spell::new("Spell Absorption", CasterOnly, Magic, SpellAbsorption)
            .with_cost(45)
            .with_duration(25.0),
        50 => Spell::new("Paralysis", SingleTargetAtRange, Magic, Paralyze)
            .with_cost(35)
            .with_duration(6.0),
        53 => Spell::new("Hand of Sleep", ByTouch, Magic, Paralyze).with_cost(25).with_duration(5.0),
        97 => Spell::new("Heal Self", CasterOnly, Magic, HealHealth).with_cost(15).with_magnitude(20),
        _ => return None,
    };
    Some(spell)
}

/// Lookup table for classic spell ids plus the custom descriptors.
///
/// Content packs may replace individual entries; missing custom entries fall
/// back to the built-in descriptors.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpellCatalog {
    pub classic: BTreeMap<u16, Spell>,
    pub custom: BTreeMap<CustomSpell, Spell>,
}

impl SpellCatalog {
    /// Catalog holding every built-in classic and custom spell.
    pub fn builtin() -> Self {
        let classic = CLASSIC_IDS
            .iter()
            .filter_map(|&id| classic_descriptor(id).map(|spell| (id, spell)))
            .collect();
        let custom = CustomSpell::ALL
            .iter()
            .map(|&which| (which, which.descriptor()))
            .collect();
        Self { classic, custom }
    }

    /// Looks up a classic spell.
    ///
    /// # Errors
    ///
    /// Returns [`SpellLookupError::UnknownClassicSpell`] when the id is not registered.
    pub fn classic(&self, id: u16) -> Result<&Spell, SpellLookupError> {
        self.classic
            .get(&id)
            .ok_or(SpellLookupError::UnknownClassicSpell(id))
    }

    /// Classic spell by id, or an inert spell after logging a warning.
    pub fn resolve_classic(&self, id: u16) -> Spell {
        match self.classic(id) {
            Ok(spell) => spell.clone(),
            Err(err) => {
                warn!(code = err.error_code(), %err, "substituting inert spell");
                Spell::inert()
            }
        }
    }

    pub fn custom(&self, which: CustomSpell) -> Spell {
        self.custom
            .get(&which)
            .cloned()
            .unwrap_or_else(|| which.descriptor())
    }

    pub fn len(&self) -> usize {
        self.classic.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classic.is_empty() && self.custom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_classic_id() {
        let catalog = SpellCatalog::builtin();
        for id in CLASSIC_IDS {
            assert!(catalog.classic(id).is_ok(), "missing classic spell {id}");
        }
        assert_eq!(catalog.classic(97).map(|s| s.key()), Ok(Some(EffectKey::HealHealth)));
    }

    #[test]
    fn unknown_classic_resolves_to_inert() {
        let catalog = SpellCatalog::builtin();
        assert_eq!(
            catalog.classic(999).err(),
            Some(SpellLookupError::UnknownClassicSpell(999))
        );
        assert!(catalog.resolve_classic(999).is_inert());
    }

    #[test]
    fn missing_custom_entry_falls_back_to_descriptor() {
        let catalog = SpellCatalog::default();
        assert_eq!(catalog.custom(CustomSpell::HealingAura).name, "Healing Aura");
    }
}

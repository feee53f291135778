//! Skills, attributes and career restrictions.

use std::collections::BTreeMap;

use crate::magic::Element;

/// Skills consulted by perception, spellbook building and equipment choice.
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
pub enum Skill {
    Stealth,

    // magic schools
    Alteration,
    Destruction,
    Illusion,
    Mysticism,
    Restoration,
    Thaumaturgy,

    // weapons
    Axe,
    BluntWeapon,
    HandToHand,
    LongBlade,
    ShortBlade,
    Archery,
}

impl Skill {
    /// Magic schools in spellbook-building order.
    pub const MAGIC_SCHOOLS: [Skill; 6] = [
        Skill::Alteration,
        Skill::Destruction,
        Skill::Illusion,
        Skill::Mysticism,
        Skill::Restoration,
        Skill::Thaumaturgy,
    ];

    /// Melee skills in the order the best one is searched.
    pub const MELEE: [Skill; 5] = [
        Skill::Axe,
        Skill::BluntWeapon,
        Skill::HandToHand,
        Skill::LongBlade,
        Skill::ShortBlade,
    ];

    /// Proficiency bit used by career restrictions, if this is a weapon skill.
    pub fn proficiency(self) -> Proficiencies {
        match self {
            Skill::ShortBlade => Proficiencies::SHORT_BLADE,
            Skill::LongBlade => Proficiencies::LONG_BLADE,
            Skill::HandToHand => Proficiencies::HAND_TO_HAND,
            Skill::Axe => Proficiencies::AXE,
            Skill::BluntWeapon => Proficiencies::BLUNT_WEAPON,
            Skill::Archery => Proficiencies::MISSILE,
            _ => Proficiencies::empty(),
        }
    }
}

/// Live skill values. Unlisted skills read as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Skills(BTreeMap<Skill, u32>);

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> u32 {
        self.0.get(&skill).copied().unwrap_or(0)
    }

    pub fn set(&mut self, skill: Skill, value: u32) {
        self.0.insert(skill, value);
    }

    pub fn with(mut self, skill: Skill, value: u32) -> Self {
        self.set(skill, value);
        self
    }
}

/// Live attribute values used by the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub intelligence: u32,
    pub luck: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            intelligence: 50,
            luck: 50,
        }
    }
}

/// How strongly an agent resists an element or affliction.
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
pub enum Tolerance {
    #[default]
    Normal,
    Immune,
    Resistant,
    LowTolerance,
    CriticalWeakness,
}

/// Per-element and per-affliction tolerances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerances {
    pub fire: Tolerance,
    pub frost: Tolerance,
    pub shock: Tolerance,
    pub magic: Tolerance,
    pub poison: Tolerance,
    pub paralysis: Tolerance,
    pub disease: Tolerance,
}

impl Tolerances {
    pub fn for_element(&self, element: Element) -> Tolerance {
        match element {
            Element::Fire => self.fire,
            Element::Frost => self.frost,
            Element::Shock => self.shock,
            Element::Magic => self.magic,
            Element::Poison => self.poison,
        }
    }
}

bitflags::bitflags! {
    /// Weapon proficiencies a career may forbid.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Proficiencies: u8 {
        const SHORT_BLADE  = 1 << 0;
        const LONG_BLADE   = 1 << 1;
        const HAND_TO_HAND = 1 << 2;
        const AXE          = 1 << 3;
        const BLUNT_WEAPON = 1 << 4;
        const MISSILE      = 1 << 5;
    }
}

bitflags::bitflags! {
    /// Materials a career may forbid.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Materials: u16 {
        const IRON       = 1 << 0;
        const STEEL      = 1 << 1;
        const SILVER     = 1 << 2;
        const ELVEN      = 1 << 3;
        const DWARVEN    = 1 << 4;
        const MITHRIL    = 1 << 5;
        const ADAMANTIUM = 1 << 6;
        const EBONY      = 1 << 7;
        const ORCISH     = 1 << 8;
        const DAEDRIC    = 1 << 9;
    }
}

bitflags::bitflags! {
    /// Armor classes a career may forbid.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ArmorClasses: u8 {
        const LEATHER = 1 << 0;
        const CHAIN   = 1 << 1;
        const PLATE   = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Shield shapes a career may forbid.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Shields: u8 {
        const BUCKLER = 1 << 0;
        const ROUND   = 1 << 1;
        const KITE    = 1 << 2;
        const TOWER   = 1 << 3;
    }
}

/// Career traits: tolerances, senses, and equipment restrictions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Career {
    /// Max magicka per point of intelligence.
    pub spell_point_multiplier: f32,
    pub acute_hearing: bool,
    pub improved_acute_hearing: bool,
    /// Career already absorbs spells, so a spell absorption buff is pointless.
    pub spell_absorption: bool,
    pub damage_from_holy_places: bool,
    pub tolerances: Tolerances,
    pub forbidden_proficiencies: Proficiencies,
    pub forbidden_materials: Materials,
    pub forbidden_armors: ArmorClasses,
    pub forbidden_shields: Shields,
}

impl Default for Career {
    fn default() -> Self {
        Self {
            spell_point_multiplier: 1.0,
            acute_hearing: false,
            improved_acute_hearing: false,
            spell_absorption: false,
            damage_from_holy_places: false,
            tolerances: Tolerances::default(),
            forbidden_proficiencies: Proficiencies::empty(),
            forbidden_materials: Materials::empty(),
            forbidden_armors: ArmorClasses::empty(),
            forbidden_shields: Shields::empty(),
        }
    }
}

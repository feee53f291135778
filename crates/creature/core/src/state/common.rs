use std::fmt;

/// Unique identifier for any entity tracked in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player avatar.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Creature species or enemy class identifier.
///
/// Numbering follows the classic mobile table: monsters below 128, human
/// classes from 128, content-pack creatures from 256.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesId(pub u16);

impl SpeciesId {
    pub const RAT: Self = Self(0);
    pub const IMP: Self = Self(1);
    pub const SPRIGGAN: Self = Self(2);
    pub const GIANT_BAT: Self = Self(3);
    pub const GRIZZLY_BEAR: Self = Self(4);
    pub const SABERTOOTH_TIGER: Self = Self(5);
    pub const SPIDER: Self = Self(6);
    pub const ORC: Self = Self(7);
    pub const CENTAUR: Self = Self(8);
    pub const WEREWOLF: Self = Self(9);
    pub const NYMPH: Self = Self(10);
    pub const SLAUGHTERFISH: Self = Self(11);
    pub const ORC_SERGEANT: Self = Self(12);
    pub const HARPY: Self = Self(13);
    pub const WEREBOAR: Self = Self(14);
    pub const SKELETAL_WARRIOR: Self = Self(15);
    pub const GIANT: Self = Self(16);
    pub const ZOMBIE: Self = Self(17);
    pub const GHOST: Self = Self(18);
    pub const MUMMY: Self = Self(19);
    pub const GIANT_SCORPION: Self = Self(20);
    pub const ORC_SHAMAN: Self = Self(21);
    pub const GARGOYLE: Self = Self(22);
    pub const WRAITH: Self = Self(23);
    pub const ORC_WARLORD: Self = Self(24);
    pub const FROST_DAEDRA: Self = Self(25);
    pub const FIRE_DAEDRA: Self = Self(26);
    pub const DAEDROTH: Self = Self(27);
    pub const VAMPIRE: Self = Self(28);
    pub const DAEDRA_SEDUCER: Self = Self(29);
    pub const VAMPIRE_ANCIENT: Self = Self(30);
    pub const DAEDRA_LORD: Self = Self(31);
    pub const LICH: Self = Self(32);
    pub const ANCIENT_LICH: Self = Self(33);
    pub const DRAGONLING: Self = Self(34);
    pub const FIRE_ATRONACH: Self = Self(35);
    pub const IRON_ATRONACH: Self = Self(36);
    pub const FLESH_ATRONACH: Self = Self(37);
    pub const ICE_ATRONACH: Self = Self(38);
    pub const DRAGONLING_ALTERNATE: Self = Self(40);
    pub const DREUGH: Self = Self(41);
    pub const LAMIA: Self = Self(42);

    pub const MAGE: Self = Self(128);
    pub const SPELLSWORD: Self = Self(129);
    pub const BATTLEMAGE: Self = Self(130);
    pub const SORCERER: Self = Self(131);
    pub const HEALER: Self = Self(132);
    pub const NIGHTBLADE: Self = Self(133);
    pub const BARD: Self = Self(134);
    pub const BURGLAR: Self = Self(135);
    pub const ROGUE: Self = Self(136);
    pub const ACROBAT: Self = Self(137);
    pub const THIEF: Self = Self(138);
    pub const ASSASSIN: Self = Self(139);
    pub const MONK: Self = Self(140);
    pub const ARCHER: Self = Self(141);
    pub const RANGER: Self = Self(142);
    pub const BARBARIAN: Self = Self(143);
    pub const WARRIOR: Self = Self(144);
    pub const KNIGHT: Self = Self(145);
    pub const CITY_WATCH: Self = Self(146);

    /// First identifier used by content-pack creatures.
    pub const FIRST_CUSTOM: u16 = 256;

    /// Content-pack creatures keep their authored stats and spellbooks.
    #[inline]
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::FIRST_CUSTOM
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "species:{}", self.0)
    }
}

/// What kind of body an agent is.
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
pub enum AgentKind {
    /// The player avatar. Observed, never driven by this model.
    Player,
    /// A creature from the monster table.
    #[default]
    Monster,
    /// A human enemy class (mage, knight, ...).
    Class,
}

/// Team allegiance. Agents on the same team never count as enemies.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Team {
    /// The player's own team.
    Player,
    /// Summoned or hired companions fighting for the player.
    PlayerAlly,
    #[default]
    Monsters,
    Undead,
    Daedra,
    Orcs,
    KnightsAndMages,
    Criminals,
    Beasts,
}

/// Current/maximum pair for health and magicka.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// True when `current <= maximum * fraction`.
    #[inline]
    pub fn at_or_below(&self, fraction: f32) -> bool {
        self.current as f32 <= self.maximum as f32 * fraction
    }

    /// True when `current < maximum * fraction`.
    #[inline]
    pub fn below(&self, fraction: f32) -> bool {
        (self.current as f32) < self.maximum as f32 * fraction
    }

    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    pub fn spend(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

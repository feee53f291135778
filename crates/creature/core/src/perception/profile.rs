//! Per-species sensory parameters.

use std::collections::BTreeMap;

use crate::error::{AiError, ErrorSeverity};
use crate::state::SpeciesId;

/// How sharp a species' eyes are.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SightAcuity {
    /// Multiplies the visibility a target needs to show.
    Finite(f32),
    /// Sees everything in line of sight, whatever the light.
    Infinite,
}

impl SightAcuity {
    pub fn is_infinite(self) -> bool {
        matches!(self, SightAcuity::Infinite)
    }

    pub fn value(self) -> f32 {
        match self {
            SightAcuity::Finite(v) => v,
            SightAcuity::Infinite => f32::INFINITY,
        }
    }
}

/// Read-only sensory record shared by every member of a species.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorProfile {
    pub acuity: SightAcuity,
    /// Field of view in degrees while unaware or aware.
    pub fov_standard: f32,
    /// Field of view in degrees while wary.
    pub fov_wary: f32,
    pub hearing_radius: f32,
    pub sight_radius: f32,
}

impl SensorProfile {
    /// Human-class values used for unlisted species.
    pub const DEFAULT: Self = Self {
        acuity: SightAcuity::Finite(1.0),
        fov_standard: 190.0,
        fov_wary: 220.0,
        hearing_radius: 16.0,
        sight_radius: 100.0,
    };

    pub const fn new(
        acuity: SightAcuity,
        fov_standard: f32,
        fov_wary: f32,
        hearing_radius: f32,
        sight_radius: f32,
    ) -> Self {
        Self {
            acuity,
            fov_standard,
            fov_wary,
            hearing_radius,
            sight_radius,
        }
    }

    /// Field of view for the given wariness.
    pub fn field_of_view(&self, wary: bool) -> f32 {
        if wary { self.fov_wary } else { self.fov_standard }
    }
}

impl Default for SensorProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors raised while assembling a sensor table.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{species}: wary field of view {wary} is narrower than standard {standard}")]
    NarrowWaryFieldOfView {
        species: SpeciesId,
        standard: f32,
        wary: f32,
    },

    #[error("{species}: {field} must be positive, got {value}")]
    NonPositive {
        species: SpeciesId,
        field: &'static str,
        value: f32,
    },
}

impl AiError for ProfileError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NarrowWaryFieldOfView { .. } => "PROFILE_NARROW_WARY_FOV",
            Self::NonPositive { .. } => "PROFILE_NON_POSITIVE",
        }
    }
}

fn validate(species: SpeciesId, p: &SensorProfile) -> Result<(), ProfileError> {
    if p.fov_wary < p.fov_standard {
        return Err(ProfileError::NarrowWaryFieldOfView {
            species,
            standard: p.fov_standard,
            wary: p.fov_wary,
        });
    }
    let checks = [
        ("hearing_radius", p.hearing_radius),
        ("sight_radius", p.sight_radius),
        ("fov_standard", p.fov_standard),
        ("acuity", p.acuity.value()),
    ];
    for (field, value) in checks {
        if value <= 0.0 || value.is_nan() {
            return Err(ProfileError::NonPositive {
                species,
                field,
                value,
            });
        }
    }
    Ok(())
}

/// Species to profile lookup, built once and shared read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorRegistry {
    profiles: BTreeMap<SpeciesId, SensorProfile>,
    fallback: SensorProfile,
}

impl SensorRegistry {
    /// Builds a registry, rejecting any profile that breaks the table rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] found.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (SpeciesId, SensorProfile)>,
        fallback: SensorProfile,
    ) -> Result<Self, ProfileError> {
        let mut profiles = BTreeMap::new();
        for (species, profile) in entries {
            validate(species, &profile)?;
            profiles.insert(species, profile);
        }
        Ok(Self { profiles, fallback })
    }

    /// The table shipped with the game, including content-pack creatures.
    pub fn builtin() -> Self {
        let profiles = BUILTIN
            .iter()
            .map(|&(id, acuity, std, wary, hear, sight)| {
                let acuity = if acuity.is_finite() {
                    SightAcuity::Finite(acuity)
                } else {
                    SightAcuity::Infinite
                };
                (SpeciesId(id), SensorProfile::new(acuity, std, wary, hear, sight))
            })
            .collect();
        Self {
            profiles,
            fallback: SensorProfile::DEFAULT,
        }
    }

    /// Profile for `species`, or the human default.
    pub fn lookup(&self, species: SpeciesId) -> SensorProfile {
        self.profiles.get(&species).copied().unwrap_or(self.fallback)
    }

    pub fn contains(&self, species: SpeciesId) -> bool {
        self.profiles.contains_key(&species)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &SensorProfile)> {
        self.profiles.iter().map(|(id, p)| (*id, p))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for SensorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

const INF: f32 = f32::INFINITY;

#[rustfmt::skip]
const BUILTIN: &[(u16, f32, f32, f32, f32, f32)] = &[
    // species     acuity  std fov  wary fov  hearing  sight
    (0,   0.80, 270.0, 270.0, 24.0, 20.0), // rat
    (1,   2.70, 190.0, 220.0, 20.0, 30.0), // imp
    (2,   0.65, 160.0, 160.0, 30.0, 25.0), // spriggan
    (3,   INF,  100.0, 100.0, 19.0, 16.0), // giant bat
    (4,   1.10, 190.0, 190.0, 26.0, 50.0), // grizzly bear
    (5,   1.45, 180.0, 180.0, 23.0, 75.0), // sabertooth tiger
    (6,   0.80, 210.0, 210.0, 26.0, 24.0), // spider
    (7,   1.10, 190.0, 220.0, 17.0, 50.0), // orc
    (8,   1.10, 190.0, 220.0, 16.0, 60.0), // centaur
    (9,   1.20, 190.0, 220.0, 25.0, 80.0), // werewolf
    (10,  1.00, 190.0, 220.0, 16.0, 18.0), // nymph
    (11,  0.60, 220.0, 220.0, 34.0, 40.0), // slaughterfish
    (12,  1.10, 190.0, 230.0, 17.0, 70.0), // orc sergeant
    (13,  1.00, 190.0, 220.0, 16.0, 50.0), // harpy
    (14,  0.85, 260.0, 300.0, 27.0, 60.0), // wereboar
    (15,  INF,  360.0, 360.0, 12.0, 12.0), // skeletal warrior
    (16,  0.90, 190.0, 220.0, 14.0, 75.0), // giant
    (17,  0.65, 160.0, 260.0, 12.0, 25.0), // zombie
    (18,  INF,  190.0, 190.0, 15.0, 28.0), // ghost
    (19,  INF,  360.0, 360.0, 12.0, 14.0), // mummy
    (20,  0.80, 220.0, 220.0, 27.0, 35.0), // giant scorpion
    (21,  1.10, 190.0, 220.0, 19.0, 45.0), // orc shaman
    (22,  1.80, 190.0, 240.0, 25.0, 45.0), // gargoyle
    (23,  INF,  170.0, 170.0, 18.0, 33.0), // wraith
    (24,  1.20, 190.0, 230.0, 20.0, 70.0), // orc warlord
    (25,  3.80, 200.0, 210.0, 34.0, 75.0), // frost daedra
    (26,  4.10, 200.0, 225.0, 32.0, 80.0), // fire daedra
    (27,  2.80, 220.0, 240.0, 26.0, 60.0), // daedroth
    (28,  1.95, 190.0, 220.0, 27.0, 70.0), // vampire
    (29,  4.80, 190.0, 220.0, 40.0, 70.0), // daedra seducer
    (30,  3.30, 190.0, 220.0, 38.0, 80.0), // ancient vampire
    (31,  6.20, 190.0, 220.0, 49.0, 90.0), // daedra lord
    (32,  INF,  360.0, 360.0, 15.0, 19.0), // lich
    (33,  INF,  360.0, 360.0, 23.0, 26.0), // ancient lich
    (34,  2.85, 200.0, 240.0, 32.0, 80.0), // dragonling
    (35,  0.85, 180.0, 200.0, 14.0, 35.0), // fire atronach
    (36,  0.85, 180.0, 200.0, 14.0, 35.0), // iron atronach
    (37,  0.85, 180.0, 200.0, 15.0, 35.0), // flesh atronach
    (38,  0.85, 180.0, 200.0, 14.0, 35.0), // ice atronach
    (40,  3.15, 200.0, 240.0, 36.0, 90.0), // dragonling, large
    (41,  0.75, 190.0, 220.0, 28.0, 45.0), // dreugh
    (42,  0.80, 190.0, 220.0, 29.0, 40.0), // lamia
    // content-pack creatures
    (256, 1.20, 190.0, 240.0, 18.0, 30.0), // goblin
    (257, 1.70, 190.0, 220.0, 20.0, 25.0), // homunculus
    (258, 0.90, 220.0, 260.0, 17.0, 40.0), // lizardman
    (259, 0.95, 220.0, 260.0, 19.0, 55.0), // lizardman warrior
    (260, INF,  100.0, 120.0, 20.0, 12.0), // bat
    (261, 1.20, 190.0, 220.0, 24.0, 70.0), // medusa
    (262, 1.40, 190.0, 190.0, 29.0, 70.0), // wolf
    (263, 1.35, 190.0, 210.0, 28.0, 70.0), // snow wolf
    (264, 1.65, 180.0, 220.0, 28.0, 80.0), // hellhound
    (265, 1.65, 190.0, 220.0, 25.0, 40.0), // grotesque
    (266, INF,  360.0, 360.0, 11.0, 13.0), // skeletal soldier
    (267, 1.20, 190.0, 190.0, 25.0, 45.0), // dog
    (268, 1.00, 190.0, 220.0, 16.0, 18.0), // nymph
    (269, 0.90, 250.0, 280.0, 24.0, 50.0), // minotaur
    (270, 0.70, 180.0, 180.0, 14.0, 25.0), // iron golem
    (271, 1.30, 240.0, 240.0, 27.0, 35.0), // blood spider
    (272, 1.15, 180.0, 220.0, 23.0, 70.0), // troll
    (273, INF,  180.0, 180.0, 16.0, 25.0), // gloom wraith
    (274, INF,  140.0, 160.0, 13.0, 16.0), // faded ghost
    (275, INF,  190.0, 210.0, 16.0, 60.0), // vengeful king
    (276, 2.25, 180.0, 220.0, 30.0, 80.0), // fire daemon
    (277, 1.50, 190.0, 220.0, 22.0, 65.0), // ghoul
    (278, 0.85, 260.0, 260.0, 26.0, 25.0), // boar
    (279, 0.90, 180.0, 210.0, 25.0, 55.0), // land dreugh
    (280, 1.35, 190.0, 190.0, 27.0, 70.0), // mountain lion
    (281, 0.50, 300.0, 300.0, 13.0, 11.0), // mudcrab
    (282, 1.15, 180.0, 210.0, 18.0, 65.0), // ogre
    (283, 2.80, 360.0, 360.0, 12.0, 28.0), // wisp
    (284, 0.75, 170.0, 170.0, 14.0, 23.0), // ice golem
    (285, 1.50, 190.0, 230.0, 21.0, 50.0), // dremora churl
    (286, 0.65, 170.0, 170.0, 17.0, 25.0), // stone golem
    (287, 1.70, 190.0, 230.0, 27.0, 70.0), // dire ghoul
    (288, 1.55, 190.0, 240.0, 23.0, 14.0), // scamp
    (289, 0.95, 180.0, 180.0, 14.0, 15.0), // dwarven sphere
    (290, 0.95, 180.0, 180.0, 14.0, 35.0), // dwarven steam
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_wary_never_narrower() {
        let registry = SensorRegistry::builtin();
        for (species, p) in registry.iter() {
            assert!(validate(species, p).is_ok(), "{species}");
        }
        assert!(registry.lookup(SpeciesId::SKELETAL_WARRIOR).acuity.is_infinite());
    }

    #[test]
    fn unlisted_species_get_human_defaults() {
        let registry = SensorRegistry::builtin();
        assert_eq!(registry.lookup(SpeciesId::MAGE), SensorProfile::DEFAULT);
        assert_eq!(registry.lookup(SpeciesId(999)).hearing_radius, 16.0);
    }

    #[test]
    fn narrow_wary_fov_is_rejected() {
        let bad = SensorProfile::new(SightAcuity::Finite(1.0), 200.0, 180.0, 10.0, 10.0);
        let err = SensorRegistry::from_entries([(SpeciesId::IMP, bad)], SensorProfile::DEFAULT)
            .expect_err("must reject");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "PROFILE_NARROW_WARY_FOV");
    }
}

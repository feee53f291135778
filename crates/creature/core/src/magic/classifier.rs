//! Sorting a raw spell list into the roles the decision engine asks for.

use std::collections::BTreeMap;

use super::{EffectKey, Spell, TargetType};
use crate::env::AgentRng;

/// Functional bucket of the classified spellbook.
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
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SpellRole {
    RangedSingle,
    RangedArea,
    TouchSingle,
    TouchArea,
    Escape,
    CombatPrep,
    HealSelf,
    HealArea,
    Slowfall,
    Levitate,
    FreeAction,
    Light,
    Cure,
}

/// Where the matching rules would put a spell. `CombatPrep` here only marks
/// a candidate; the book keeps one of them.
fn role_of(spell: &Spell, in_dungeon: bool) -> Option<SpellRole> {
    use EffectKey::*;

    let key = spell.key()?;
    let role = match key {
        HealHealth => SpellRole::HealSelf,
        HealHealthArea => SpellRole::HealArea,
        ChameleonNormal | InvisibilityNormal => SpellRole::Escape,
        ShadowNormal if in_dungeon => SpellRole::Escape,
        MageLight if in_dungeon => SpellRole::Light,
        Light => SpellRole::Light,
        ChameleonTrue | InvisibilityTrue => SpellRole::CombatPrep,
        ShadowTrue if in_dungeon => SpellRole::CombatPrep,
        SpellAbsorption | SpellReflection | SpellResistance | SpellShield => SpellRole::CombatPrep,
        Slowfall => SpellRole::Slowfall,
        Levitate => SpellRole::Levitate,
        FreeAction => SpellRole::FreeAction,
        CurePoison | CureDisease => SpellRole::Cure,
        _ => match spell.target {
            TargetType::SingleTargetAtRange => SpellRole::RangedSingle,
            TargetType::AreaAtRange => SpellRole::RangedArea,
            TargetType::ByTouch => SpellRole::TouchSingle,
            TargetType::AreaAroundCaster => SpellRole::TouchArea,
            TargetType::CasterOnly => return None,
        },
    };
    Some(role)
}

/// An agent's spells partitioned by role.
///
/// Built once at spawn and never reshuffled. Every bucket except
/// [`SpellRole::CombatPrep`] keeps all of its matches and is sampled
/// uniformly at cast time; the combat-prep bucket holds the single buff
/// chosen at build time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifiedSpellbook {
    buckets: BTreeMap<SpellRole, Vec<Spell>>,
}

impl ClassifiedSpellbook {
    /// Classifies `spells` in a single pass.
    ///
    /// Shadow magic and mage light only make sense underground, so they are
    /// skipped outdoors. Spells no rule claims are dropped.
    pub fn classify(spells: &[Spell], in_dungeon: bool, rng: &mut AgentRng) -> Self {
        let mut buckets: BTreeMap<SpellRole, Vec<Spell>> = BTreeMap::new();
        let mut prep_candidates = Vec::new();

        for spell in spells {
            match role_of(spell, in_dungeon) {
                Some(SpellRole::CombatPrep) => prep_candidates.push(spell.clone()),
                Some(role) => buckets.entry(role).or_default().push(spell.clone()),
                None => {}
            }
        }

        if !prep_candidates.is_empty() {
            let pick = prep_candidates.swap_remove(rng.index(prep_candidates.len()));
            buckets.insert(SpellRole::CombatPrep, vec![pick]);
        }

        Self { buckets }
    }

    pub fn get(&self, role: SpellRole) -> &[Spell] {
        self.buckets.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, role: SpellRole) -> bool {
        !self.get(role).is_empty()
    }

    /// Uniform pick among the spells in `role`.
    pub fn pick(&self, role: SpellRole, rng: &mut AgentRng) -> Option<&Spell> {
        let bucket = self.get(role);
        if bucket.is_empty() {
            return None;
        }
        bucket.get(rng.index(bucket.len()))
    }

    /// The standing combat-prep buff.
    pub fn combat_prep(&self) -> Option<&Spell> {
        self.get(SpellRole::CombatPrep).first()
    }

    /// Buckets in role order, for logging and tests.
    pub fn iter(&self) -> impl Iterator<Item = (SpellRole, &[Spell])> {
        self.buckets
            .iter()
            .map(|(role, spells)| (*role, spells.as_slice()))
    }

    /// Number of spells across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::{CustomSpell, SpellCatalog};

    fn book(ids: &[u16], custom: &[CustomSpell], in_dungeon: bool) -> ClassifiedSpellbook {
        let catalog = SpellCatalog::builtin();
        let mut spells: Vec<Spell> = ids.iter().map(|&id| catalog.resolve_classic(id)).collect();
        spells.extend(custom.iter().map(|&c| catalog.custom(c)));
        ClassifiedSpellbook::classify(&spells, in_dungeon, &mut AgentRng::seeded(5))
    }

    #[test]
    fn target_types_fall_through_to_attack_buckets() {
        let b = book(&[7, 14, 3, 25], &[], false);
        assert_eq!(b.get(SpellRole::RangedSingle)[0].name, "Wizard's Fire");
        assert_eq!(b.get(SpellRole::RangedArea)[0].name, "Fireball");
        assert_eq!(b.get(SpellRole::TouchSingle)[0].name, "Frostbite");
        assert_eq!(b.get(SpellRole::TouchArea)[0].name, "Fire Storm");
    }

    #[test]
    fn shadow_and_mage_light_need_a_dungeon() {
        let outdoors = book(&[45], &[CustomSpell::TrueShadow, CustomSpell::MageLight], false);
        assert!(outdoors.is_empty());

        let indoors = book(&[45], &[CustomSpell::TrueShadow, CustomSpell::MageLight], true);
        assert!(indoors.has(SpellRole::Escape));
        assert!(indoors.has(SpellRole::CombatPrep));
        assert!(indoors.has(SpellRole::Light));
    }

    #[test]
    fn single_combat_prep_is_kept() {
        let b = book(&[39, 46, 47], &[CustomSpell::TrueInvisibility], false);
        assert_eq!(b.get(SpellRole::CombatPrep).len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn inert_and_caster_only_leftovers_are_dropped() {
        let spells = vec![Spell::inert(), Spell::inert()];
        let b = ClassifiedSpellbook::classify(&spells, true, &mut AgentRng::seeded(1));
        assert!(b.is_empty());
        assert!(b.pick(SpellRole::HealSelf, &mut AgentRng::seeded(1)).is_none());
    }
}

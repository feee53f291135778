//! Spells: descriptors, the catalog, spawn-time spellbook building,
//! classification into tactical roles and target-effect estimation.
mod analyzer;
mod catalog;
mod classifier;
mod spell;
mod spellbook;

pub use analyzer::{Relation, Standing, TargetEffect, TargetEffectAnalyzer, relation};
pub use catalog::{CustomSpell, SpellCatalog, SpellLookupError};
pub use classifier::{ClassifiedSpellbook, SpellRole};
pub use spell::{EffectKey, Element, Spell, TargetType};
pub use spellbook::{SpellbookBuilder, adjust_spells};

//! Hooks that carry out the actions a decision tick emits.
//!
//! The core only decides; it never deducts magicka, moves a creature or
//! lands a spell. After each tick the runtime hands every emitted
//! [`Action`](creature_core::Action) to the [`HookRegistry`], which runs the
//! matching hooks against the roster.
//!
//! # Hook Chaining
//!
//! Hooks can name follow-up hooks to run after they apply:
//! - DamageHook → DeathCheckHook
//! - Chains terminate when `should_trigger()` returns false
//! - A maximum depth stops runaway cycles
mod context;
mod damage;
mod effects;
mod motion;
mod registry;
mod spell_cost;

pub use context::{HookContext, HookError};
pub use damage::{DamageHook, DeathCheckHook};
pub use effects::{RestorationHook, TimedEffectHook};
pub use motion::{MovementHook, SurrenderHook};
pub use registry::HookRegistry;
pub use spell_cost::SpellCostHook;

use creature_core::Roster;

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the rest of the action is dropped
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure drops the action.
    ///
    /// Use for hooks that pay for the action (e.g., SpellCostHook). Nothing
    /// after a failed critical hook runs for that action.
    Critical,

    /// Hook failure should be logged as error but allow continuation.
    Important,

    /// Hook failure is expected and can be silently ignored.
    Optional,
}

/// Applies one kind of action to the roster.
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: paying for the action
/// - Zero: the action's main effect
/// - Positive priorities: lingering effects and bookkeeping
pub trait ActionHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and chaining).
    fn name(&self) -> &'static str;

    /// Execution priority for root-level ordering. Chained hooks run in the
    /// order given by `next_hook_names()`.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Whether this hook has anything to do for the action in `ctx`.
    fn should_trigger(&self, ctx: &HookContext<'_>, roster: &Roster) -> bool;

    /// Mutates the roster. The acting agent is in the roster.
    fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError>;

    /// Names of hooks to run after this one applied.
    fn next_hook_names(&self) -> &[&'static str] {
        &[]
    }
}

//! Hook registry for managing and executing action hooks.

use std::collections::HashMap;
use std::sync::Arc;

use creature_core::Roster;
use tracing::{debug, error, warn};

use super::{ActionHook, HookContext, HookCriticality, HookError};

/// Chains deeper than this are cut off.
const MAX_CHAIN_DEPTH: usize = 8;

/// Registry that manages and executes action hooks.
///
/// The registry separates hooks into two categories:
/// - **Root hooks**: run for every action, checked via `should_trigger()`
/// - **Lookup hooks**: only run when chained from another hook
pub struct HookRegistry {
    root_hooks: Arc<[Arc<dyn ActionHook>]>,
    lookup_table: HashMap<&'static str, Arc<dyn ActionHook>>,
}

impl HookRegistry {
    /// Creates a registry from root hooks and the full hook set.
    ///
    /// Root hooks are sorted by priority (lower values first).
    pub fn new(mut root_hooks: Vec<Arc<dyn ActionHook>>, all_hooks: Vec<Arc<dyn ActionHook>>) -> Self {
        root_hooks.sort_by_key(|h| h.priority());

        let lookup_table = all_hooks
            .iter()
            .chain(root_hooks.iter())
            .map(|h| (h.name(), Arc::clone(h)))
            .collect();

        Self {
            root_hooks: root_hooks.into(),
            lookup_table,
        }
    }

    /// The standard set: spell cost, restoration, damage, movement, timed
    /// effects and surrender as roots, death check as lookup-only.
    pub fn default_hooks() -> Self {
        use super::{
            DamageHook, DeathCheckHook, MovementHook, RestorationHook, SpellCostHook, SurrenderHook,
            TimedEffectHook,
        };

        let root_hooks: Vec<Arc<dyn ActionHook>> = vec![
            Arc::new(SpellCostHook),
            Arc::new(RestorationHook),
            Arc::new(DamageHook::default()),
            Arc::new(MovementHook::default()),
            Arc::new(TimedEffectHook),
            Arc::new(SurrenderHook),
        ];
        let lookup_hooks: Vec<Arc<dyn ActionHook>> = vec![Arc::new(DeathCheckHook)];

        Self::new(root_hooks, lookup_hooks)
    }

    /// Runs every root hook for the action in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first critical hook that failed; hooks after
    /// it are skipped. Failures of other hooks are logged and swallowed.
    pub fn apply(&self, ctx: &HookContext<'_>, roster: &mut Roster) -> Result<(), HookError> {
        for hook in self.root_hooks.iter() {
            self.run(hook.as_ref(), ctx, roster, 0)?;
        }
        Ok(())
    }

    fn run(
        &self,
        hook: &dyn ActionHook,
        ctx: &HookContext<'_>,
        roster: &mut Roster,
        depth: usize,
    ) -> Result<(), HookError> {
        if depth > MAX_CHAIN_DEPTH {
            warn!(target: "runtime::hooks", hook = hook.name(), depth, "hook chain too deep, stopping");
            return Ok(());
        }
        if !hook.should_trigger(ctx, roster) {
            return Ok(());
        }
        if let Err(e) = hook.apply(ctx, roster) {
            return self.handle_hook_error(hook, e);
        }

        for name in hook.next_hook_names() {
            match self.find(name) {
                Some(next) => self.run(next.as_ref(), ctx, roster, depth + 1)?,
                None => warn!(target: "runtime::hooks", hook = hook.name(), next = name, "chained hook not registered"),
            }
        }
        Ok(())
    }

    /// Finds a hook by name from the lookup table.
    pub fn find(&self, name: &str) -> Option<&Arc<dyn ActionHook>> {
        self.lookup_table.get(name)
    }

    /// Returns the number of root hooks.
    pub fn len(&self) -> usize {
        self.root_hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root_hooks.is_empty()
    }

    /// Returns the total number of hooks in the lookup table.
    pub fn total_hooks(&self) -> usize {
        self.lookup_table.len()
    }

    /// Root hook names and priorities, in execution order.
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.root_hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Returns Ok(()) for Important/Optional hooks, Err for Critical hooks.
    fn handle_hook_error(&self, hook: &dyn ActionHook, error: HookError) -> Result<(), HookError> {
        match hook.criticality() {
            HookCriticality::Critical => {
                warn!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    %error,
                    "Critical hook failed, dropping action"
                );
                Err(error)
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

use std::sync::Arc;

use behavior_tree::{AlwaysFail, Behavior, Selector, Sequence};
use tracing::trace;

use super::steps::{
    CastOnSelf, DelayGate, Heal, Mark, Node, PrepareForCombat, RunBaseline, Surrender, gate,
    in_freefall, may_surrender, needs_levitation, needs_light, paralyzed_with_remedy,
    ready_for_combat_prep,
};
use super::{DecisionContext, Step};
use crate::magic::SpellRole;
use crate::policy::BaselineBehavior;

/// Priority pipeline run once per decision tick.
///
/// Steps, in order: surrender, falling spell, free action, the baseline
/// behavior (which always falls through), combat prep, light, heal and
/// levitation. The first step that fires ends the tick.
pub struct DecisionEngine {
    root: Selector<Node>,
}

impl DecisionEngine {
    pub fn new(baseline: Arc<dyn BaselineBehavior>) -> Self {
        let surrender: Node = Box::new(Sequence::new(vec![
            gate(may_surrender),
            Box::new(DelayGate(|c| c.surrender_delay)) as Node,
            Box::new(Surrender),
            Box::new(Mark(Step::Surrender)),
        ]));

        let falling: Node = Box::new(Sequence::new(vec![
            gate(in_freefall),
            Box::new(Selector::new(vec![
                Box::new(CastOnSelf(SpellRole::Levitate)) as Node,
                Box::new(CastOnSelf(SpellRole::Slowfall)),
            ])),
            Box::new(Mark(Step::FallingSpell)),
        ]));

        let free_action: Node = Box::new(Sequence::new(vec![
            gate(paralyzed_with_remedy),
            Box::new(DelayGate(|c| c.free_action_delay)) as Node,
            Box::new(CastOnSelf(SpellRole::FreeAction)),
            Box::new(Mark(Step::FreeAction)),
        ]));

        let baseline: Node = Box::new(AlwaysFail::new(RunBaseline(baseline)));

        let combat_prep: Node = Box::new(Sequence::new(vec![
            gate(ready_for_combat_prep),
            Box::new(DelayGate(|c| c.combat_prep_delay)) as Node,
            Box::new(PrepareForCombat),
            Box::new(Mark(Step::CombatPrep)),
        ]));

        let light: Node = Box::new(Sequence::new(vec![
            gate(needs_light),
            Box::new(CastOnSelf(SpellRole::Light)) as Node,
            Box::new(Mark(Step::Light)),
        ]));

        let heal: Node = Box::new(Sequence::new(vec![
            Box::new(Heal) as Node,
            Box::new(Mark(Step::Heal)),
        ]));

        let levitate: Node = Box::new(Sequence::new(vec![
            gate(needs_levitation),
            Box::new(CastOnSelf(SpellRole::Levitate)) as Node,
            Box::new(Mark(Step::Levitate)),
        ]));

        Self {
            root: Selector::new(vec![
                surrender,
                falling,
                free_action,
                baseline,
                combat_prep,
                light,
                heal,
                levitate,
            ]),
        }
    }

    /// Runs the pipeline and reports the step that fired, if any.
    pub fn run(&self, ctx: &mut DecisionContext<'_>) -> Option<Step> {
        ctx.outcome = None;
        let status = self.root.tick(ctx);
        trace!(agent = %ctx.agent.id, ?status, outcome = ?ctx.outcome, "decision tick");
        ctx.outcome
    }

    /// Number of top-level steps.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

//! Leaf and decorator nodes.
//!
//! [`Condition`] lifts a predicate into a node. [`AlwaysFail`] runs a child
//! for its side effects and then lets the parent selector carry on.

use crate::{Behavior, Status};

/// A leaf node backed by a predicate over the context.
///
/// Plain `fn` items work best as predicates: `fn ready(ctx: &Ctx<'_>) -> bool`
/// is higher-ranked over the context lifetime, so the resulting node can be
/// boxed as `dyn for<'a> Behavior<Ctx<'a>>`.
pub struct Condition<F> {
    predicate: F,
}

impl<F> Condition<F> {
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<C, F> Behavior<C> for Condition<F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.predicate)(ctx))
    }
}

/// Runs the child, then reports `Failure` whatever the child returned.
///
/// Inside a [`Selector`](crate::Selector) this marks a step that always
/// executes but never ends the pipeline.
pub struct AlwaysFail<B> {
    child: B,
}

impl<B> AlwaysFail<B> {
    pub fn new(child: B) -> Self {
        Self { child }
    }
}

impl<C, B> Behavior<C> for AlwaysFail<B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Failure
    }
}

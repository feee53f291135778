//! Core behavior trait.
//!
//! [`Behavior`] is generic over a context type `C`. Contexts in creature AI
//! usually borrow the agent and the world for the duration of one tick, so
//! trees are commonly stored as `Box<dyn for<'a> Behavior<Ctx<'a>>>`; the
//! blanket impl for `Box<T>` below keeps such boxes usable as children.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node against the given context.
    ///
    /// Nodes may read the context and record intermediate results in it
    /// (for example the action chosen for this tick).
    fn tick(&self, ctx: &mut C) -> Status;
}

impl<C, T> Behavior<C> for Box<T>
where
    T: Behavior<C> + ?Sized,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

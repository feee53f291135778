//! Composite behavior nodes.
//!
//! [`Sequence`] (AND) and [`Selector`] (OR, first match wins). Both are
//! generic over the child type `B` rather than fixed to `Box<dyn Behavior<C>>`
//! so that children can be higher-ranked over a borrowing context.

use crate::{Behavior, Status};

/// Executes children in order until one fails.
///
/// - A failing child stops the sequence, which then fails
/// - If every child succeeds, the sequence succeeds
pub struct Sequence<B> {
    children: Vec<B>,
}

impl<B> Sequence<B> {
    /// Creates a new sequence with the given children.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<B>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C, B> Behavior<C> for Sequence<B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Executes children in priority order until one succeeds.
///
/// - A succeeding child stops the selector, which then succeeds
/// - If every child fails, the selector fails
///
/// This is the shape of a strict priority pipeline: earlier children
/// short-circuit everything after them.
pub struct Selector<B> {
    children: Vec<B>,
}

impl<B> Selector<B> {
    /// Creates a new selector with the given children.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<B>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; selectors cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C, B> Behavior<C> for Selector<B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

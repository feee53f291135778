//! What an agent does with its tick.
//!
//! [`DecisionEngine`] runs the priority pipeline over a [`DecisionContext`].
//! The context also carries the cast gate and the ranged/touch selection
//! callbacks the baseline behavior consults.
mod callbacks;
mod cast;
mod context;
mod engine;
mod steps;

pub use cast::{CastError, check as check_cast};
pub use context::{Action, DecisionContext, Step};
pub use engine::DecisionEngine;
pub use steps::walkable;

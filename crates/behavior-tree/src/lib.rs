//! Lightweight behavior tree library for tick-driven creature AI.
//!
//! Every node is evaluated synchronously within a single simulation tick and
//! reports either success or failure; nothing blocks and nothing is resumed on
//! a later tick. Long-running work (cooldowns, delays) is modelled by the
//! context as "next eligible" timestamps rather than by node state.
//!
//! - **No Running state**: a node decides immediately
//! - **Generic children**: composites are generic over their child type, so
//!   trees can be built over contexts that borrow the world for one tick
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes
//! - [`Status`]: success or failure
//! - Composite nodes: [`Sequence`], [`Selector`]
//! - Leaf/decorator nodes: [`Condition`], [`AlwaysFail`]

pub mod behavior;
pub mod composite;
pub mod decorator;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Selector, Sequence};
pub use decorator::{AlwaysFail, Condition};
pub use status::Status;

//! Types callers of the runtime interact with.
mod errors;
mod report;

pub use errors::{Result, RuntimeError};
pub use report::{AgentTick, FrameReport};

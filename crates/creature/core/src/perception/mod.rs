//! Sight, hearing and awareness.
//!
//! The models here are pure functions of agent state plus whatever the
//! environment oracles report. [`PerceptionController`] strings them together
//! into the per-tick awareness update.
mod controller;
mod hearing;
mod noise;
mod profile;
mod visibility;

pub use controller::{PerceptionController, PerceptionReport, alert_allies};
pub use hearing::{can_hear, perceived_loudness, stealth_chance};
pub use noise::{MAX_NOISE, MIN_NOISE, compute_noise};
pub use profile::{ProfileError, SensorProfile, SensorRegistry, SightAcuity};
pub use visibility::{
    Exposure, apparent_color, background_light, can_see, detection_threshold, direct_visibility,
    holy_ward_blocks, silhouette_visibility,
};

use crate::config::AiConfig;
use crate::env::AiEnv;
use crate::state::Agent;

/// Everything a sensory predicate may consult besides the two agents.
#[derive(Clone, Copy, Debug)]
pub struct SenseContext<'a> {
    pub env: AiEnv<'a>,
    pub config: &'a AiConfig,
    /// The player, when present and not the agent being ticked.
    pub player: Option<&'a Agent>,
}

impl<'a> SenseContext<'a> {
    pub fn new(env: AiEnv<'a>, config: &'a AiConfig, player: Option<&'a Agent>) -> Self {
        Self {
            env,
            config,
            player,
        }
    }
}

//! Reference host for the creature model.
//!
//! The runtime owns a [`Roster`](creature_core::Roster), ticks every creature
//! once per frame (perception, ally alerts, then the decision pipeline) and
//! applies the emitted actions through a registry of hooks. It exists so the
//! core can be exercised end to end; a real engine brings its own versions
//! of everything here.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the frame scheduler and its builder
//! - [`api`] exposes the error and report types callers see
//! - [`hooks`] applies emitted actions to the roster
//! - [`oracle`] provides in-memory lighting, physics and world flags
//! - [`baseline`] is the default chase-and-strike creature behavior
pub mod api;
pub mod baseline;
pub mod hooks;
pub mod oracle;
pub mod runtime;

pub use api::{AgentTick, FrameReport, Result, RuntimeError};
pub use baseline::ChaseAndStrike;
pub use hooks::{
    ActionHook, DamageHook, DeathCheckHook, HookContext, HookCriticality, HookError, HookRegistry,
    MovementHook, RestorationHook, SpellCostHook, SurrenderHook, TimedEffectHook,
};
pub use oracle::{ArenaPhysics, LightField, OracleManager, PointLight, WallBox, WorldFlags};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

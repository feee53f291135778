//! Frame scheduler and its builder.
//!
//! Every frame the runtime ticks each living creature in id order. A tick
//! takes the creature out of the roster, runs perception against everyone
//! else, broadcasts an ally alert when the creature just became aware, runs
//! the decision pipeline, puts the creature back and applies the emitted
//! actions through the hook registry. Ticks are strictly serial, so each
//! creature sees the effects of the ticks before it.

use std::collections::BTreeSet;
use std::sync::Arc;

use creature_core::magic::EffectKey;
use creature_core::{
    Agent, AiConfig, AiEnv, BaselineBehavior, CreaturePolicy, DecisionContext, EntityId, GameTime,
    MonsterPolicy, PerceptionController, PhysicsOracle, Roster, SenseContext, SensorRegistry,
    SpawnAdjuster, SpellCatalog, alert_allies,
};
use glam::Vec3;
use tracing::{debug, info};

use crate::api::{AgentTick, FrameReport, Result, RuntimeError};
use crate::baseline::ChaseAndStrike;
use crate::hooks::{ActionHook, HookContext, HookRegistry};
use crate::oracle::OracleManager;

/// Runtime configuration shared across the scheduler and hooks.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub ai: AiConfig,
    /// Mixed into every creature's random seed.
    pub world_seed: u64,
    /// Scales spawn-time equipment quality.
    pub player_level: u32,
    /// Run spawn adjustment on creatures as they are added. Turn off for
    /// creatures that arrive fully prepared.
    pub prepare_on_spawn: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            world_seed: 0,
            player_level: 1,
            prepare_on_spawn: true,
        }
    }
}

/// Owns the roster and drives it frame by frame.
pub struct Runtime {
    config: RuntimeConfig,
    oracles: OracleManager,
    roster: Roster,
    policy: Arc<dyn CreaturePolicy>,
    hooks: HookRegistry,
    time: GameTime,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn time(&self) -> GameTime {
        self.time
    }

    /// Advances the world by `delta` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidDelta`] for a non-positive or
    /// non-finite delta; nothing is simulated in that case.
    pub fn step(&mut self, delta: f32) -> Result<FrameReport> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(RuntimeError::InvalidDelta(delta));
        }
        self.time = GameTime::new(self.time.now + f64::from(delta), self.time.frame + 1, delta);
        let time = self.time;

        self.move_player(delta);
        self.update_darkness();

        let alive_before: BTreeSet<EntityId> = self
            .roster
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| a.id)
            .collect();

        let mut report = FrameReport {
            time,
            ..FrameReport::default()
        };
        for id in self.roster.ids() {
            if id == EntityId::PLAYER {
                continue;
            }
            if let Some(tick) = self.tick_agent(id, time) {
                report.ticks.push(tick);
            }
        }

        self.end_frame(time);
        report.deaths = alive_before
            .into_iter()
            .filter(|&id| self.roster.get(id).is_some_and(|a| !a.is_alive()))
            .collect();
        Ok(report)
    }

    /// Runs `frames` steps of `delta` seconds each.
    pub fn run(&mut self, frames: u64, delta: f32) -> Result<Vec<FrameReport>> {
        (0..frames).map(|_| self.step(delta)).collect()
    }

    fn tick_agent(&mut self, id: EntityId, time: GameTime) -> Option<AgentTick> {
        if self.roster.living(id).is_none() {
            return None;
        }
        let mut agent = self.roster.take(id)?;
        let mut tick = AgentTick::new(id);
        let env = self.oracles.as_ai_env();

        {
            let senses = SenseContext::new(env, &self.config.ai, self.roster.player());
            tick.perception =
                PerceptionController::update(&mut agent, &self.roster, &senses, self.policy.as_ref(), time);

            let mut ctx = DecisionContext::new(&mut agent, &self.roster, senses, time);
            tick.step = self.policy.take_action(&mut ctx);
            tick.actions = ctx.actions;
        }

        if tick.perception.became_aware {
            let senses = SenseContext::new(env, &self.config.ai, None);
            tick.alerted = alert_allies(&agent, &mut self.roster, &senses);
        }
        self.roster.restore(agent);

        for action in &tick.actions {
            let ctx = HookContext::new(id, action, time, &self.config.ai, &self.oracles);
            if self.hooks.apply(&ctx, &mut self.roster).is_err() {
                tick.rejected += 1;
            }
        }

        if let Some(step) = tick.step {
            debug!(agent = %id, %step, actions = tick.actions.len(), "step fired");
        }
        Some(tick)
    }

    /// The player walks in a straight line at its motor velocity.
    fn move_player(&mut self, delta: f32) {
        let physics = self.oracles.physics();
        let Some(player) = self.roster.get_mut(EntityId::PLAYER) else {
            return;
        };
        let Some(motor) = player.motor.filter(|_| player.is_alive()) else {
            return;
        };
        if motor.velocity == Vec3::ZERO {
            return;
        }
        let mut next = player.position + motor.velocity * delta;
        next.y = physics
            .ground_height(next + Vec3::Y * self.config.ai.max_step_height)
            .unwrap_or(player.position.y);
        player.position = next;
    }

    fn update_darkness(&self) {
        let Some(player) = self.roster.player() else {
            return;
        };
        let level = self.oracles.lighting().level_at(player.torso());
        self.oracles
            .world()
            .set_player_in_darkness(level < self.config.ai.light_threshold);
    }

    /// Expires timed effects and releases animations.
    fn end_frame(&mut self, time: GameTime) {
        for agent in self.roster.iter_mut() {
            for key in agent.effects.expire(time.now) {
                drop_condition(agent, key);
            }
            if let Some(motor) = agent.motor.as_mut() {
                motor.casting = false;
                motor.playing_one_shot = false;
            }
        }
    }
}

/// Clears the flag an expired effect raised, unless another running effect
/// still holds it.
fn drop_condition(agent: &mut Agent, key: EffectKey) {
    let flag = key.condition();
    let held = agent.effects.iter().any(|e| e.key.condition().intersects(flag));
    if !held {
        agent.conditions.remove(flag);
    }
    if key == EffectKey::Levitate {
        if let Some(motor) = agent.motor.as_mut() {
            motor.levitating = false;
        }
    }
    info!(agent = %agent.id, effect = %key, "effect expired");
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    catalog: SpellCatalog,
    sensors: SensorRegistry,
    baseline: Arc<dyn BaselineBehavior>,
    policy: Option<Arc<dyn CreaturePolicy>>,
    player: Option<Agent>,
    creatures: Vec<Agent>,
    hooks: Option<HookRegistry>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            catalog: SpellCatalog::builtin(),
            sensors: SensorRegistry::builtin(),
            baseline: Arc::new(ChaseAndStrike::default()),
            policy: None,
            player: None,
            creatures: Vec::new(),
            hooks: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Spell catalog used to rebuild spellbooks at spawn.
    pub fn catalog(mut self, catalog: SpellCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Species sensor table used at spawn.
    pub fn sensors(mut self, sensors: SensorRegistry) -> Self {
        self.sensors = sensors;
        self
    }

    /// Behavior the decision pipeline falls through to. Ignored when a
    /// whole policy is supplied with [`RuntimeBuilder::policy`].
    pub fn baseline(mut self, baseline: Arc<dyn BaselineBehavior>) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn policy(mut self, policy: Arc<dyn CreaturePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn player(mut self, player: Agent) -> Self {
        self.player = Some(player);
        self
    }

    pub fn spawn(mut self, creature: Agent) -> Self {
        self.creatures.push(creature);
        self
    }

    pub fn spawn_all(mut self, creatures: impl IntoIterator<Item = Agent>) -> Self {
        self.creatures.extend(creatures);
        self
    }

    /// Set custom action hooks, replacing the default set.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Adds hooks on top of the default set.
    ///
    /// Note: calling this after `with_hooks()` discards those hooks and
    /// rebuilds from the defaults plus the new ones.
    pub fn add_hooks(
        mut self,
        additional_root_hooks: Vec<Arc<dyn ActionHook>>,
        additional_lookup_hooks: Vec<Arc<dyn ActionHook>>,
    ) -> Self {
        use crate::hooks::{
            DamageHook, DeathCheckHook, MovementHook, RestorationHook, SpellCostHook, SurrenderHook,
            TimedEffectHook,
        };

        let mut root_hooks: Vec<Arc<dyn ActionHook>> = vec![
            Arc::new(SpellCostHook),
            Arc::new(RestorationHook),
            Arc::new(DamageHook::default()),
            Arc::new(MovementHook::default()),
            Arc::new(TimedEffectHook),
            Arc::new(SurrenderHook),
        ];
        root_hooks.extend(additional_root_hooks);

        let mut lookup_hooks: Vec<Arc<dyn ActionHook>> = vec![Arc::new(DeathCheckHook)];
        lookup_hooks.extend(additional_lookup_hooks);

        self.hooks = Some(HookRegistry::new(root_hooks, lookup_hooks));
        self
    }

    /// Build the runtime, preparing every creature for its first tick.
    pub fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        if self.creatures.is_empty() {
            return Err(RuntimeError::EmptyRoster);
        }

        let mut roster = Roster::new();
        if let Some(player) = self.player {
            roster.insert(player);
        }

        let adjuster = SpawnAdjuster::new(&self.catalog, &self.sensors, self.config.world_seed)
            .with_player_level(self.config.player_level);
        let env: AiEnv<'_> = oracles.as_ai_env();
        for mut creature in self.creatures {
            if roster.get(creature.id).is_some() {
                return Err(RuntimeError::DuplicateAgent(creature.id));
            }
            if self.config.prepare_on_spawn {
                adjuster.prepare(&mut creature, env);
            }
            roster.insert(creature);
        }

        let policy = self
            .policy
            .unwrap_or_else(|| Arc::new(MonsterPolicy::new(self.baseline)));
        let hooks = self.hooks.unwrap_or_default();

        info!(
            creatures = roster.len(),
            hooks = hooks.len(),
            seed = self.config.world_seed,
            "runtime ready"
        );

        Ok(Runtime {
            config: self.config,
            oracles,
            roster,
            policy,
            hooks,
            time: GameTime::default(),
        })
    }
}

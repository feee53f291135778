use creature_core::state::Conditions;
use creature_core::{
    Action, Agent, AgentKind, AgentRng, ClassifiedSpellbook, EffectKey, EntityId, PerceptionState,
    ResourceMeter, SpeciesId, Spell, SpellCatalog, Step, Team, WorldOracle,
};
use glam::Vec3;
use runtime::{
    ArenaPhysics, LightField, OracleManager, Runtime, RuntimeConfig, RuntimeError, WallBox,
    WorldFlags,
};
use std::sync::Arc;

fn orc(id: u32, position: Vec3) -> Agent {
    let mut orc = Agent::new(EntityId(id), AgentKind::Monster, SpeciesId::ORC, Team::Orcs);
    orc.position = position;
    orc.mind.perception = PerceptionState::new(orc.senses.fov_standard);
    orc
}

fn with_book(mut agent: Agent, spells: Vec<Spell>) -> Agent {
    let mut rng = AgentRng::seeded(5);
    agent.mind.spellbook = ClassifiedSpellbook::classify(&spells, false, &mut rng);
    agent.spells = spells;
    agent.mind.rng = rng;
    agent
}

fn unprepared() -> RuntimeConfig {
    RuntimeConfig {
        prepare_on_spawn: false,
        ..RuntimeConfig::default()
    }
}

fn hunt(orc: &mut Agent) {
    let perception = &mut orc.mind.perception;
    perception.target = Some(EntityId::PLAYER);
    perception.detected = true;
    perception.mark_position(Vec3::new(0.0, 0.0, -40.0));
}

#[test]
fn builder_rejects_incomplete_setups() {
    let missing = Runtime::builder().spawn(orc(1, Vec3::ZERO)).build();
    assert!(matches!(missing, Err(RuntimeError::MissingOracles)));

    let empty = Runtime::builder().oracles(OracleManager::open_field()).build();
    assert!(matches!(empty, Err(RuntimeError::EmptyRoster)));

    let twice = Runtime::builder()
        .oracles(OracleManager::open_field())
        .spawn(orc(1, Vec3::ZERO))
        .spawn(orc(1, Vec3::X))
        .build();
    assert!(matches!(twice, Err(RuntimeError::DuplicateAgent(EntityId(1)))));
}

#[test]
fn bad_delta_is_refused() {
    let mut runtime = Runtime::builder()
        .oracles(OracleManager::open_field())
        .spawn(orc(1, Vec3::ZERO))
        .build()
        .unwrap();
    assert!(matches!(runtime.step(0.0), Err(RuntimeError::InvalidDelta(_))));
    assert!(runtime.step(f32::NAN).is_err());
    assert_eq!(runtime.time().frame, 0);
}

#[test]
fn close_player_is_struck() {
    let mut runtime = Runtime::builder()
        .oracles(OracleManager::open_field())
        .player(Agent::player(Vec3::new(0.0, 0.0, 2.0)))
        .spawn(orc(1, Vec3::ZERO))
        .build()
        .unwrap();

    let report = runtime.step(0.1).unwrap();
    let tick = report.tick(EntityId(1)).unwrap();
    assert_eq!(tick.perception.acquired, Some(EntityId::PLAYER));
    assert_eq!(tick.step, None);
    assert_eq!(tick.actions, vec![Action::Melee { target: EntityId::PLAYER }]);

    let player = runtime.roster().player().unwrap();
    assert_eq!(player.health.current, 92);
}

#[test]
fn killing_blow_is_reported() {
    let mut player = Agent::player(Vec3::new(0.0, 0.0, 2.0));
    player.health = ResourceMeter::new(5, 100);
    let mut runtime = Runtime::builder()
        .oracles(OracleManager::open_field())
        .player(player)
        .spawn(orc(1, Vec3::ZERO))
        .build()
        .unwrap();

    let report = runtime.step(0.1).unwrap();
    assert_eq!(report.deaths, vec![EntityId::PLAYER]);
    let corpse = runtime.roster().player().unwrap();
    assert!(corpse.motor.is_some_and(|m| !m.can_act));
}

#[test]
fn wary_orc_walks_toward_the_last_known_position() {
    let mut hunter = orc(1, Vec3::ZERO);
    hunt(&mut hunter);
    let mut runtime = Runtime::builder()
        .config(unprepared())
        .oracles(OracleManager::open_field())
        .player(Agent::player(Vec3::new(0.0, 0.0, -40.0)))
        .spawn(hunter)
        .build()
        .unwrap();

    let report = runtime.step(0.5).unwrap();
    let tick = report.tick(EntityId(1)).unwrap();
    assert_eq!(
        tick.actions,
        vec![Action::MoveToward {
            destination: Vec3::new(0.0, 0.0, -40.0)
        }]
    );

    let walker = runtime.roster().get(EntityId(1)).unwrap();
    assert!((walker.position.z + 2.0).abs() < 1e-4);
    assert_eq!(walker.facing, Vec3::NEG_Z);
}

#[test]
fn wall_stops_the_walk() {
    let physics = ArenaPhysics::flat().with_wall(WallBox::new(Vec3::new(-3.0, 0.0, -1.0), Vec3::new(3.0, 3.0, -0.5)));
    let oracles = OracleManager::new(
        Arc::new(LightField::new(1.0)),
        Arc::new(physics),
        Arc::new(WorldFlags::outdoors()),
    );
    let mut hunter = orc(1, Vec3::ZERO);
    hunt(&mut hunter);
    let mut runtime = Runtime::builder()
        .config(unprepared())
        .oracles(oracles)
        .player(Agent::player(Vec3::new(0.0, 0.0, -40.0)))
        .spawn(hunter)
        .build()
        .unwrap();

    runtime.step(0.5).unwrap();
    let walker = runtime.roster().get(EntityId(1)).unwrap();
    assert_eq!(walker.position, Vec3::ZERO);
    assert!(walker.motor.is_some_and(|m| m.obstacle_detected));
}

#[test]
fn last_stand_heal_is_paid_for_and_lands() {
    let heal = SpellCatalog::builtin().resolve_classic(97);
    let mut caster = with_book(orc(3, Vec3::ZERO), vec![heal]);
    caster.health = ResourceMeter::new(15, 100);
    caster.magicka = ResourceMeter::full(50);

    let mut runtime = Runtime::builder()
        .config(unprepared())
        .oracles(OracleManager::open_field())
        .spawn(caster)
        .build()
        .unwrap();

    let report = runtime.step(0.5).unwrap();
    assert_eq!(report.tick(EntityId(3)).and_then(|t| t.step), Some(Step::Heal));

    let healed = runtime.roster().get(EntityId(3)).unwrap();
    assert_eq!(healed.health.current, 35);
    assert_eq!(healed.magicka.current, 35);
    assert!(healed.hostile);
}

#[test]
fn unaffordable_free_action_fizzles() {
    let free_action = SpellCatalog::builtin().resolve_classic(10);
    let mut stuck = with_book(orc(8, Vec3::ZERO), vec![free_action]);
    stuck.magicka = ResourceMeter::new(5, 30);
    stuck.conditions.insert(Conditions::PARALYZED);

    let mut runtime = Runtime::builder()
        .config(unprepared())
        .oracles(OracleManager::open_field())
        .spawn(stuck)
        .build()
        .unwrap();

    let report = runtime.step(2.0).unwrap();
    let tick = report.tick(EntityId(8)).unwrap();
    assert_eq!(tick.step, Some(Step::FreeAction));
    assert_eq!(tick.rejected, 1);

    let still_stuck = runtime.roster().get(EntityId(8)).unwrap();
    assert!(still_stuck.conditions.contains(Conditions::PARALYZED));
    assert_eq!(still_stuck.magicka.current, 5);
}

#[test]
fn timed_effects_wear_off() {
    let mut floater = orc(2, Vec3::ZERO);
    floater.effects.add(EffectKey::Levitate, 0.4);
    floater.conditions.insert(Conditions::LEVITATING);
    if let Some(motor) = floater.motor.as_mut() {
        motor.levitating = true;
    }

    let mut runtime = Runtime::builder()
        .config(unprepared())
        .oracles(OracleManager::open_field())
        .spawn(floater)
        .build()
        .unwrap();

    runtime.step(0.5).unwrap();
    let landed = runtime.roster().get(EntityId(2)).unwrap();
    assert!(!landed.effects.has(EffectKey::Levitate));
    assert!(!landed.conditions.contains(Conditions::LEVITATING));
    assert!(landed.motor.is_some_and(|m| !m.levitating));
}

#[test]
fn darkness_follows_the_player() {
    let oracles = OracleManager::new(
        Arc::new(LightField::new(0.0)),
        Arc::new(ArenaPhysics::flat()),
        Arc::new(WorldFlags::dungeon()),
    );
    let mut runtime = Runtime::builder()
        .oracles(oracles)
        .player(Agent::player(Vec3::new(0.0, 0.0, -50.0)))
        .spawn(orc(1, Vec3::ZERO))
        .build()
        .unwrap();

    runtime.step(0.1).unwrap();
    assert!(runtime.oracles().world().player_in_darkness());
}

#[test]
fn frames_advance_the_clock() {
    let mut runtime = Runtime::builder()
        .oracles(OracleManager::open_field())
        .spawn(orc(1, Vec3::ZERO))
        .build()
        .unwrap();

    let reports = runtime.run(10, 0.25).unwrap();
    assert_eq!(reports.len(), 10);
    assert_eq!(runtime.time().frame, 10);
    assert!((runtime.time().now - 2.5).abs() < 1e-9);
}

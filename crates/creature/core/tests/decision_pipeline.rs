use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use creature_core::magic::CustomSpell;
use creature_core::{
    Action, Agent, AgentKind, AgentRng, AiConfig, AiEnv, BaselineBehavior, CastError,
    ClassifiedSpellbook, CreaturePolicy, DecisionContext, EntityId, GameTime, MonsterPolicy,
    ResourceMeter, Roster, SenseContext, SpeciesId, Spell, SpellCatalog, Step, Team, check_cast,
};
use glam::Vec3;

/// Counts how often the host behavior ran.
#[derive(Default)]
struct Counting(AtomicUsize);

impl BaselineBehavior for Counting {
    fn take_action(&self, _ctx: &mut DecisionContext<'_>) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn with_book(mut agent: Agent, spells: Vec<Spell>) -> Agent {
    let mut rng = AgentRng::seeded(9);
    agent.mind.spellbook = ClassifiedSpellbook::classify(&spells, false, &mut rng);
    agent.spells = spells;
    agent.mind.rng = rng;
    agent
}

fn orc(id: u32) -> Agent {
    Agent::new(EntityId(id), AgentKind::Monster, SpeciesId::ORC, Team::Orcs)
}

fn heal_self() -> Spell {
    SpellCatalog::builtin().resolve_classic(97)
}

fn run(policy: &MonsterPolicy, agent: &mut Agent, others: &Roster, time: GameTime) -> (Option<Step>, Vec<Action>) {
    let config = AiConfig::default();
    let senses = SenseContext::new(AiEnv::open_ground(), &config, None);
    let mut ctx = DecisionContext::new(agent, others, senses, time);
    let step = policy.take_action(&mut ctx);
    (step, ctx.actions)
}

#[test]
fn empty_magicka_fails_the_cast_gate() {
    let mut caster = orc(1);
    caster.magicka = ResourceMeter::new(0, 50);
    assert_eq!(check_cast(&caster, Some(&heal_self())), Err(CastError::NoMagicka));

    caster.magicka.current = 20;
    assert_eq!(check_cast(&caster, Some(&heal_self())), Ok(()));
}

#[test]
fn wounded_orc_surrenders_before_anything_else() {
    let baseline = Arc::new(Counting::default());
    let policy = MonsterPolicy::new(baseline.clone());

    let mut agent = orc(3);
    agent.health = ResourceMeter::new(10, 100);
    let others = Roster::new();

    let (step, actions) = run(&policy, &mut agent, &others, GameTime::new(1.0, 1, 2.0));
    assert_eq!(step, Some(Step::Surrender));
    assert_eq!(actions, vec![Action::Surrender]);
    assert!(!agent.hostile);
    assert_eq!(baseline.0.load(Ordering::Relaxed), 0);
}

#[test]
fn even_load_ids_fight_on() {
    let baseline = Arc::new(Counting::default());
    let policy = MonsterPolicy::new(baseline.clone());

    let mut agent = orc(4);
    agent.health = ResourceMeter::new(10, 100);
    let (step, _) = run(&policy, &mut agent, &Roster::new(), GameTime::new(1.0, 1, 2.0));

    assert_ne!(step, Some(Step::Surrender));
    assert!(agent.hostile);
    assert_eq!(baseline.0.load(Ordering::Relaxed), 1);
}

#[test]
fn known_heal_is_a_last_stand() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));

    let mut agent = with_book(orc(3), vec![heal_self()]);
    agent.health = ResourceMeter::new(15, 100);
    agent.magicka = ResourceMeter::full(50);

    let (step, actions) = run(&policy, &mut agent, &Roster::new(), GameTime::new(1.0, 1, 2.0));
    assert_eq!(step, Some(Step::Heal));
    assert_eq!(
        actions,
        vec![Action::Cast {
            spell: heal_self(),
            target: None
        }]
    );
    assert!(agent.hostile);
}

#[test]
fn heal_checks_are_rate_limited() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));
    let config = AiConfig::default();

    let mut agent = with_book(orc(6), vec![heal_self()]);
    agent.health = ResourceMeter::new(20, 100);
    agent.magicka = ResourceMeter::full(80);
    let others = Roster::new();

    let (first, _) = run(&policy, &mut agent, &others, GameTime::new(0.0, 1, 0.016));
    assert_eq!(first, Some(Step::Heal));
    let next = agent.mind.next_heal_check;
    assert!(next >= f64::from(config.heal_cooldown_min));
    assert!(next <= f64::from(config.heal_cooldown_max));

    if let Some(motor) = agent.motor.as_mut() {
        motor.playing_one_shot = false;
        motor.casting = false;
    }
    let (early, _) = run(&policy, &mut agent, &others, GameTime::new(1.0, 60, 0.016));
    assert_eq!(early, None);

    let (later, _) = run(&policy, &mut agent, &others, GameTime::new(next, 300, 0.016));
    assert_eq!(later, Some(Step::Heal));
}

fn healer_with_allies() -> (Agent, Roster) {
    let aura = CustomSpell::HealingAura.descriptor();
    let mut healer = Agent::new(EntityId(10), AgentKind::Class, SpeciesId::HEALER, Team::KnightsAndMages);
    healer = with_book(healer, vec![aura]);
    healer.magicka = ResourceMeter::full(100);

    let mut others = Roster::new();
    for (id, x) in [(11, 2.0), (12, -2.0)] {
        let mut ally = Agent::new(EntityId(id), AgentKind::Class, SpeciesId::KNIGHT, Team::KnightsAndMages);
        ally.position = Vec3::new(x, 0.0, 0.0);
        ally.health = ResourceMeter::new(30, 100);
        others.insert(ally);
    }
    (healer, others)
}

#[test]
fn area_heal_for_wounded_allies() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));
    let (mut healer, others) = healer_with_allies();

    let (step, actions) = run(&policy, &mut healer, &others, GameTime::new(5.0, 1, 0.016));
    assert_eq!(step, Some(Step::Heal));
    assert!(matches!(
        actions.as_slice(),
        [Action::Cast { spell, target: None }] if spell.name == "Healing Aura"
    ));
}

#[test]
fn nearby_enemy_suppresses_area_heal() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));
    let (mut healer, mut others) = healer_with_allies();
    let mut enemy = orc(20);
    enemy.position = Vec3::new(0.0, 0.0, 3.0);
    others.insert(enemy);

    let (step, actions) = run(&policy, &mut healer, &others, GameTime::new(5.0, 1, 0.016));
    assert_eq!(step, None);
    assert!(actions.is_empty());
}

#[test]
fn paralysis_is_answered_with_free_action() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));
    let free_action = SpellCatalog::builtin().resolve_classic(10);

    let mut agent = with_book(orc(8), vec![free_action.clone()]);
    agent.magicka = ResourceMeter::full(30);
    agent.conditions.insert(creature_core::state::Conditions::PARALYZED);

    let (step, actions) = run(&policy, &mut agent, &Roster::new(), GameTime::new(1.0, 1, 2.0));
    assert_eq!(step, Some(Step::FreeAction));
    assert_eq!(
        actions,
        vec![Action::Cast {
            spell: free_action,
            target: None
        }]
    );
}

#[test]
fn pipeline_has_every_step() {
    let policy = MonsterPolicy::new(Arc::new(Counting::default()));
    assert_eq!(policy.engine().len(), 8);
}

use duelist::kernel::action::RANGED_ATTACK_ANIMATION;
use duelist::kernel::event::Event;
use duelist::kernel::state::BotState;
use duelist::kernel::world::{MotorCommand, Opponent, WorldSnapshot};
use duelist::{Config, Reactor, Scheduler};

fn arena(opponents: Vec<Opponent>) -> WorldSnapshot {
    let mut world = WorldSnapshot::new("Me");
    world.food_count = 10;
    world.opponents = opponents;
    world
}

fn attack(name: &str) -> Option<MotorCommand> {
    Some(MotorCommand::Attack { target: name.to_string() })
}

#[test]
fn test_default_task_order() {
    let scheduler = Scheduler::default();
    assert_eq!(
        scheduler.task_names(),
        vec![
            "eat",
            "retreat",
            "return_to_combat",
            "loot",
            "bank",
            "reequip_ranged",
            "drink_boost",
            "melee_switch",
            "ranged_attack",
            "acquire_target"
        ]
    );
}

#[test]
fn test_full_engagement_cycle() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);

    // Open on the candidate
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));
    assert_eq!(reactor.targets.pending(), Some("Bob"));
    assert_eq!(reactor.state.current(), BotState::Idle);

    // Our bow animation confirms, and the arbiter now allows a melee follow-up
    let command = reactor.tick_step(vec![Event::Animation(RANGED_ATTACK_ANIMATION)], &mut scheduler, &world);
    assert_eq!(reactor.targets.confirmed(), Some("Bob"));
    assert_eq!(command, Some(MotorCommand::EquipMelee));
    assert_eq!(reactor.state.current(), BotState::PreparingMelee);

    world.melee_equipped = true;
    world.ranged_equipped = false;
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));
    assert_eq!(reactor.state.current(), BotState::ExecutingMelee);
    assert!(!reactor.weapons.can_use_melee(), "One swing per landed ranged hit");

    // Melee never lands; the time box sends us back to the bow
    for _ in 0..4 {
        assert_eq!(reactor.tick_step(vec![Event::Tick], &mut scheduler, &world), None);
    }
    let command = reactor.tick_step(vec![Event::Tick], &mut scheduler, &world);
    assert_eq!(command, Some(MotorCommand::EquipRanged));
    assert_eq!(reactor.state.current(), BotState::Ranging);
    assert!(!reactor.state.need_to_equip_ranged());

    world.melee_equipped = false;
    world.ranged_equipped = true;
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));
    assert!(!reactor.state.need_to_attack());
}

#[test]
fn test_at_most_one_command_per_poll() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);
    world.health_percent = 20;

    // Eating outranks acquiring a target
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Eat));
    assert_eq!(reactor.state.current(), BotState::Eating);
    assert_eq!(reactor.targets.pending(), None);

    // Still eating: no second bite and no new fight
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), None);
}

#[test]
fn test_eat_respects_cooldown_and_resumes() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(Vec::new());
    world.health_percent = 25;

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Eat));
    for _ in 0..3 {
        reactor.dispatch(Event::Tick);
    }
    assert_eq!(reactor.state.current(), BotState::Idle, "No target, so eating resumes into Idle");

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Eat));
}

#[test]
fn test_no_food_skips_eating() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(Vec::new());
    world.food_count = 0;
    world.health_percent = 40;

    assert_ne!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Eat));
    assert_ne!(reactor.state.current(), BotState::Eating);
}

#[test]
fn test_retreat_and_return_after_cooldown() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);
    reactor.targets.set_confirmed("Bob");
    reactor.state.set_state(BotState::Ranging);
    world.food_count = 0;
    world.health_percent = 20;

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::WalkToSafeRegion));
    assert_eq!(reactor.state.current(), BotState::Retreating);
    assert_eq!(reactor.targets.confirmed(), None, "Retreat drops the fight");
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::WalkToSafeRegion));

    world.in_safe_region = true;
    world.health_percent = 100;
    for _ in 0..15 {
        assert_eq!(reactor.tick_step(vec![Event::Tick], &mut scheduler, &world), None);
    }

    let command = reactor.tick_step(vec![Event::Tick], &mut scheduler, &world);
    assert_eq!(command, Some(MotorCommand::WalkToCombatArea));
    assert_eq!(reactor.state.current(), BotState::Idle);
    assert!(!reactor.state.is_retreating());
}

#[test]
fn test_retaliation_confirms_attacker() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut attacker = Opponent::new("Pker", 90);
    attacker.target = Some("Me".to_string());
    attacker.animation = RANGED_ATTACK_ANIMATION;
    let world = arena(vec![Opponent::new("Bob", 80), attacker]);

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Pker"));
    assert_eq!(reactor.targets.confirmed(), Some("Pker"));
    assert_eq!(reactor.state.current(), BotState::Ranging);
}

#[test]
fn test_invalid_target_is_dropped() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut bob = Opponent::new("Bob", 80);
    bob.target = Some("Carol".to_string());
    let world = arena(vec![bob]);

    reactor.targets.set_confirmed("Bob");
    reactor.state.set_state(BotState::Ranging);

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), None);
    assert_eq!(reactor.targets.confirmed(), None);
    assert_eq!(reactor.state.current(), BotState::Idle);
}

#[test]
fn test_out_of_view_target_kept_while_fighting() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let world = arena(Vec::new());

    reactor.targets.set_confirmed("Bob");
    reactor.state.set_state(BotState::Ranging);
    reactor.dispatch(Event::DamageSplat { source: "Bob".to_string() });

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), None);
    assert_eq!(reactor.targets.confirmed(), Some("Bob"), "Recent combat keeps the target");
}

#[test]
fn test_special_attack_disabled_stays_ranged() {
    let config = Config::builder().use_special_attack(false).build().unwrap();
    let mut reactor = Reactor::new(config);
    let mut scheduler = Scheduler::default();
    let world = arena(vec![Opponent::new("Bob", 80)]);

    reactor.targets.set_pending("Bob");
    let command = reactor.tick_step(vec![Event::Animation(RANGED_ATTACK_ANIMATION)], &mut scheduler, &world);
    assert_ne!(command, Some(MotorCommand::EquipMelee));
    assert_eq!(reactor.state.current(), BotState::Ranging);
}

#[test]
fn test_target_lost_while_preparing_melee() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);

    reactor.targets.set_pending("Bob");
    let command = reactor.tick_step(vec![Event::Animation(RANGED_ATTACK_ANIMATION)], &mut scheduler, &world);
    assert_eq!(command, Some(MotorCommand::EquipMelee));
    assert_eq!(reactor.state.current(), BotState::PreparingMelee);

    // Bob steps into the safe region before the swing
    world.opponents[0].in_safe_region = true;
    reactor.tick_step(vec![Event::Tick], &mut scheduler, &world);

    assert_eq!(reactor.state.current(), BotState::Idle, "Must not stay in PreparingMelee");
    assert_eq!(reactor.targets.confirmed(), None);
    assert!(!reactor.weapons.ranged_attack_registered());

    for _ in 0..20 {
        reactor.tick_step(vec![Event::Tick], &mut scheduler, &world);
    }
    assert_eq!(reactor.state.current(), BotState::Idle);
}

#[test]
fn test_drink_boost_while_ranging() {
    let config = Config::builder().use_special_attack(false).build().unwrap();
    let mut reactor = Reactor::new(config);
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);
    world.boost_potions = 2;

    reactor.targets.set_confirmed("Bob");
    reactor.state.set_state(BotState::Ranging);
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::DrinkBoost));

    // Cooldown holds the next sip, the bow takes over
    reactor.state.set_need_to_attack(true);
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));

    world.strength_boosted = true;
    for _ in 0..3 {
        reactor.dispatch(Event::Tick);
    }
    assert_ne!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::DrinkBoost));
}

#[test]
fn test_bank_when_food_low() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);
    world.food_count = 5;

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Bank));
    assert_eq!(reactor.state.current(), BotState::Banking);
    assert!(reactor.state.needs_banking());
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::Bank));

    // Restocked: back to Idle and straight into hunting in the same poll
    world.food_count = 20;
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));
    assert!(!reactor.state.needs_banking());
    assert_eq!(reactor.state.current(), BotState::Idle);
}

#[test]
fn test_loot_key_claimed_between_fights() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(Vec::new());
    world.has_loot_key = true;

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), Some(MotorCommand::ClaimLoot));
    assert_eq!(reactor.state.current(), BotState::Looting);

    world.has_loot_key = false;
    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), None);
    assert_eq!(reactor.state.current(), BotState::Idle);
    assert!(!reactor.state.is_looting());
}

#[test]
fn test_errands_wait_for_fight_to_end() {
    let mut reactor = Reactor::new(Config::default());
    let mut scheduler = Scheduler::default();
    let mut world = arena(vec![Opponent::new("Bob", 80)]);
    world.food_count = 1;
    world.has_loot_key = true;

    reactor.targets.set_confirmed("Bob");
    reactor.state.set_state(BotState::Ranging);
    reactor.state.set_need_to_attack(true);

    assert_eq!(reactor.poll_tasks(&mut scheduler, &world), attack("Bob"));
    assert_eq!(reactor.state.current(), BotState::Ranging);
}

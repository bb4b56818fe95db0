use duelist::kernel::action::{MELEE_ATTACK_ANIMATION, RANGED_ATTACK_ANIMATION, SCIMITAR_ATTACK_ANIMATION};
use duelist::kernel::event::{ChatCategory, ChatMessage, Event, Skill};
use duelist::kernel::state::BotState;
use duelist::kernel::target::predict_damage;
use duelist::{Config, Reactor};

fn engaged_with(name: &str) -> Reactor {
    let mut reactor = Reactor::new(Config::default());
    reactor.targets.set_pending(name);
    reactor.on_animation(RANGED_ATTACK_ANIMATION);
    reactor
}

#[test]
fn test_attack_animation_confirms_pending() {
    let mut reactor = Reactor::new(Config::default());
    assert_eq!(reactor.now().frame, 0);
    assert_eq!(reactor.state.current(), BotState::Idle);

    reactor.targets.set_pending("Bob");
    reactor.dispatch(Event::Animation(SCIMITAR_ATTACK_ANIMATION));

    assert_eq!(reactor.targets.pending(), None);
    assert_eq!(reactor.targets.confirmed(), Some("Bob"));
    assert_eq!(reactor.state.current(), BotState::Ranging);
    assert!(!reactor.weapons.ranged_attack_registered(), "Scimitar swing is not a ranged attempt");
}

#[test]
fn test_ranged_animation_registers_attempt() {
    let mut reactor = Reactor::new(Config::default());
    reactor.dispatch(Event::Tick);
    reactor.dispatch(Event::Tick);
    reactor.dispatch(Event::Animation(RANGED_ATTACK_ANIMATION));

    assert!(reactor.weapons.ranged_attack_registered());
    assert_eq!(reactor.weapons.last_ranged_attack().frame, 2);
    assert_eq!(reactor.timers.last_animation_tick().frame, 2);
    assert_eq!(reactor.state.last_animation(), RANGED_ATTACK_ANIMATION);
    // No pending target, so nothing to confirm
    assert_eq!(reactor.state.current(), BotState::Idle);
}

#[test]
fn test_non_attack_animation_leaves_pending() {
    let mut reactor = Reactor::new(Config::default());
    reactor.targets.set_pending("Bob");
    reactor.dispatch(Event::Animation(829));
    assert_eq!(reactor.targets.pending(), Some("Bob"));
    assert_eq!(reactor.targets.confirmed(), None);
}

#[test]
fn test_ranged_xp_then_splat() {
    let mut reactor = engaged_with("Bob");
    reactor.dispatch(Event::Tick);

    reactor.dispatch(Event::SkillExperience { skill: Skill::Ranged, delta: 8 });
    assert_eq!(predict_damage(8), 2);
    assert!(reactor.targets.is_prediction_valid());
    assert_eq!(reactor.targets.predicted_damage(), Some(2));
    assert!(reactor.weapons.ranged_hit_registered());
    assert_eq!(reactor.weapons.last_ranged_hit().frame, 1);

    reactor.dispatch(Event::DamageSplat { source: "Bob".to_string() });
    assert_eq!(reactor.timers.last_opponent_combat("Bob"), Some(reactor.now()));
}

#[test]
fn test_splat_from_stranger_ignored() {
    let mut reactor = engaged_with("Bob");
    reactor.dispatch(Event::DamageSplat { source: "Carol".to_string() });
    assert_eq!(reactor.timers.last_opponent_combat("Carol"), None);
}

#[test]
fn test_xp_without_target_is_not_a_hit() {
    let mut reactor = Reactor::new(Config::default());
    reactor.dispatch(Event::SkillExperience { skill: Skill::Ranged, delta: 8 });
    assert!(reactor.targets.is_prediction_valid());
    assert!(!reactor.weapons.ranged_hit_registered(), "No confirmed target, no hit");

    let mut engaged = engaged_with("Bob");
    engaged.dispatch(Event::SkillExperience { skill: Skill::Strength, delta: 8 });
    assert!(!engaged.weapons.ranged_hit_registered(), "Only ranged experience counts");
}

#[test]
fn test_tick_drives_eating_exit() {
    let mut reactor = engaged_with("Bob");
    reactor.state.set_state(BotState::ExecutingMelee);
    reactor.state.set_state(BotState::Eating);

    for _ in 0..3 {
        reactor.dispatch(Event::Tick);
    }
    assert_eq!(reactor.state.current(), BotState::Ranging);
    assert!(reactor.state.need_to_equip_ranged());
    assert!(reactor.state.need_to_attack());
}

#[test]
fn test_disconnect_resets_session() {
    let mut reactor = engaged_with("Bob");
    reactor.targets.set_pending("Carol");
    reactor.on_animation(MELEE_ATTACK_ANIMATION);
    reactor.weapons.register_melee_attack();
    reactor.timers.record_opponent_combat("Bob");
    for _ in 0..4 {
        reactor.dispatch(Event::Tick);
    }
    reactor.targets.set_pending("Dave");

    reactor.dispatch(Event::Chat(ChatMessage::game("You have been disconnected.")));

    assert_eq!(reactor.state.current(), BotState::Idle);
    assert_eq!(reactor.targets.confirmed(), None);
    assert_eq!(reactor.targets.pending(), None);
    assert!(!reactor.weapons.melee_used_since_ranged_hit());
    assert!(!reactor.weapons.ranged_hit_registered());
    assert!(!reactor.weapons.ranged_attack_registered());

    // Clock and ledger survive the reset
    assert_eq!(reactor.now().frame, 4);
    assert!(reactor.timers.last_opponent_combat("Bob").is_some());
}

#[test]
fn test_fighting_elsewhere_clears_pending_first() {
    let mut reactor = engaged_with("Bob");
    reactor.targets.set_pending("Carol");

    let message = ChatMessage::game("That player is fighting another player.");
    reactor.dispatch(Event::Chat(message.clone()));
    assert_eq!(reactor.targets.pending(), None);
    assert_eq!(reactor.targets.confirmed(), Some("Bob"), "Confirmed target survives the first message");
    assert_eq!(reactor.state.current(), BotState::Ranging);

    reactor.dispatch(Event::Chat(message));
    assert_eq!(reactor.targets.confirmed(), None);
    assert_eq!(reactor.state.current(), BotState::Idle);
}

#[test]
fn test_player_chat_is_ignored() {
    let mut reactor = engaged_with("Bob");
    reactor.dispatch(Event::Chat(ChatMessage {
        text: "You have been disconnected".to_string(),
        category: ChatCategory::Public,
    }));
    assert_eq!(reactor.targets.confirmed(), Some("Bob"));
    assert_eq!(reactor.state.current(), BotState::Ranging);
}

#[test]
fn test_healing_chat_zeroes_animation_tick() {
    let mut reactor = Reactor::new(Config::default());
    for _ in 0..6 {
        reactor.dispatch(Event::Tick);
    }
    reactor.dispatch(Event::Animation(829));
    assert!(!reactor.timers.is_idle_for(3));

    reactor.dispatch(Event::Chat(ChatMessage {
        text: "You eat the Swordfish. It heals some health.".to_string(),
        category: ChatCategory::Filtered,
    }));
    assert!(reactor.timers.is_idle_for(3));
}

//! Attacks and damage through the engine.

mod common;

use common::*;
use duel_engine::cards::Position;
use duel_engine::core::{ActionKind, GameState, Seat};
use duel_engine::error::DuelError;
use duel_engine::lingering::{CapabilityGate, EffectSource, Expiry};
use duel_engine::triggers::EventKind;
use duel_engine::turn::Phase;

/// Turn 3, alice's battle phase.
fn battle() -> GameState {
    let mut state = duel();
    state.turn_number = 3;
    state.phase = Phase::Battle;
    state
}

// =============================================================================
// Declaration checks
// =============================================================================

#[test]
fn test_no_attack_on_first_turn() {
    let mut state = battle();
    state.turn_number = 1;
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 1);
    let mut engine = engine(&state);

    let err = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap_err();
    assert!(err.reason().unwrap().contains("first turn"));
}

#[test]
fn test_direct_attack_needs_empty_board() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    place_monster(&mut state, Seat::Opponent, GIANT, Position::Attack, 2);
    let mut engine = engine(&state);

    let err = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap_err();
    assert!(matches!(err, DuelError::InvalidMove { .. }));
}

#[test]
fn test_attack_once_per_turn() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    let mut engine = engine(&state);

    engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap();
    let err = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap_err();
    assert!(err.reason().unwrap().contains("already attacked"));
}

/// A second copy of the same card still gets its own attack.
#[test]
fn test_each_copy_attacks_once() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    let mut engine = engine(&state);

    engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap();
    engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap();
    let err = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap_err();
    assert!(err.reason().unwrap().contains("already attacked"));

    let state = load(&engine);
    assert_eq!(state.seats[Seat::Opponent].life_points, 5200);
    assert!(state.seats[Seat::Host].board.iter().all(|m| m.has_attacked));
}

/// The copy that attacked is the one destroyed.
#[test]
fn test_destroyed_attacker_is_the_attacking_copy() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Defense, 2);
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    place_monster(&mut state, Seat::Opponent, RAIDER, Position::Attack, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), SCOUT, Some(RAIDER)).unwrap();
    assert!(outcome.battle.unwrap().attacker_destroyed);

    let state = load(&engine);
    let board = &state.seats[Seat::Host].board;
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].position, Position::Defense);
    assert_eq!(state.seats[Seat::Host].life_points, 7600);
}

#[test]
fn test_attack_restricted_by_lingering_effect() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    let source = EffectSource {
        seat: Seat::Opponent,
        card: WARD,
    };
    CapabilityGate::add(&mut state, ActionKind::DeclareAttack, Seat::Host, source, Expiry::EndOfTurn(3), "frozen");
    let mut engine = engine(&state);

    let err = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap_err();
    assert_eq!(err.reason(), Some("frozen"));
}

// =============================================================================
// Damage
// =============================================================================

#[test]
fn test_direct_attack_damage() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap();

    assert_eq!(outcome.battle.unwrap().damage, Some((Seat::Opponent, 1400)));
    assert_eq!(load(&engine).seats[Seat::Opponent].life_points, 6600);
    assert_eq!(
        engine.recorder().kinds(),
        vec![EventKind::AttackDeclared, EventKind::BattleDamage]
    );
}

#[test]
fn test_stronger_attacker_destroys_defender() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, RAIDER, Position::Attack, 2);
    place_monster(&mut state, Seat::Opponent, SCOUT, Position::Attack, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), RAIDER, Some(SCOUT)).unwrap();
    assert!(outcome.battle.unwrap().defender_destroyed);

    let state = load(&engine);
    assert_eq!(state.seats[Seat::Opponent].life_points, 7600);
    assert!(state.seats[Seat::Opponent].board.is_empty());
    assert!(state.seats[Seat::Opponent].graveyard.contains(&SCOUT));

    let destroyed = engine.recorder().of_kind(EventKind::MonsterDestroyed).next().unwrap();
    assert_eq!(destroyed.seat, Seat::Opponent);
    assert_eq!(destroyed.card, Some(SCOUT));
}

/// A face-down defender is revealed; a stronger defense hurts the attacker.
#[test]
fn test_face_down_defender_revealed() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    place_face_down(&mut state, Seat::Opponent, SENTINEL, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), SCOUT, Some(SENTINEL)).unwrap();
    let battle = outcome.battle.unwrap();
    assert!(!battle.defender_destroyed);
    assert_eq!(battle.damage, Some((Seat::Host, 600)));

    let state = load(&engine);
    let defender = &state.seats[Seat::Opponent].board[0];
    assert!(!defender.is_face_down);
    assert_eq!(defender.position, Position::Defense);
    assert_eq!(state.seats[Seat::Host].life_points, 7400);
}

#[test]
fn test_battle_protection() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, DRAGON, Position::Attack, 2);
    place_monster(&mut state, Seat::Opponent, SENTINEL, Position::Defense, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), DRAGON, Some(SENTINEL)).unwrap();

    assert!(!outcome.battle.unwrap().defender_destroyed);
    assert_eq!(load(&engine).seats[Seat::Opponent].board.len(), 1);
}

/// Life points never go below zero.
#[test]
fn test_life_points_floor() {
    let mut state = battle();
    state.seats[Seat::Opponent].life_points = 500;
    place_monster(&mut state, Seat::Host, DRAGON, Position::Attack, 2);
    let mut engine = engine(&state);

    engine.declare_attack(&alice(), &lobby(), DRAGON, None).unwrap();
    assert_eq!(load(&engine).seats[Seat::Opponent].life_points, 0);
}

// =============================================================================
// Attack triggers
// =============================================================================

#[test]
fn test_defender_trap_fires_before_damage() {
    let mut state = battle();
    place_monster(&mut state, Seat::Host, SCOUT, Position::Attack, 2);
    face_up_spell_trap(&mut state, Seat::Opponent, SPIKES, 2);
    let mut engine = engine(&state);

    let outcome = engine.declare_attack(&alice(), &lobby(), SCOUT, None).unwrap();

    assert_eq!(outcome.triggered.len(), 1);
    assert_eq!(outcome.triggered[0].controller, Seat::Opponent);
    let state = load(&engine);
    assert_eq!(state.seats[Seat::Host].life_points, 7700);
    assert_eq!(state.seats[Seat::Opponent].life_points, 6600);
    assert_eq!(
        engine.recorder().kinds(),
        vec![EventKind::AttackDeclared, EventKind::EffectActivated, EventKind::BattleDamage]
    );
}

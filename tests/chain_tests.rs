//! Activations, chain building and resolution.

mod common;

use common::*;
use duel_engine::cards::CardId;
use duel_engine::core::{DuelConfig, GameState, Seat};
use duel_engine::effects::{SpellSpeed, Targets};
use duel_engine::error::DuelError;
use duel_engine::stack::Chain;
use duel_engine::triggers::EventKind;
use duel_engine::zones::Zone;

/// Turn 3, alice to move, bob has a trap set on turn 2.
fn duel_with_set_trap(trap: CardId) -> GameState {
    let mut state = duel();
    state.turn_number = 3;
    set_spell_trap(&mut state, Seat::Opponent, trap, 2);
    state
}

// =============================================================================
// Chain limits
// =============================================================================

#[test]
fn test_thirteenth_link_rejected() {
    let mut chain = Chain::new();
    for i in 0..12u32 {
        let seat = if i % 2 == 0 { Seat::Host } else { Seat::Opponent };
        chain
            .push(seat, CardId::new(i + 1), 0, SpellSpeed::Two, Targets::new(), 12)
            .unwrap();
    }

    let err = chain
        .push(Seat::Host, CardId::new(13), 0, SpellSpeed::Two, Targets::new(), 12)
        .unwrap_err();

    assert_eq!(err, DuelError::ChainLimitExceeded { max: 12 });
    assert_eq!(chain.len(), 12);
}

#[test]
fn test_chain_limit_from_config() {
    let mut state = duel_with_set_trap(MIRROR);
    give(&mut state, Seat::Host, &[EMBER]);
    let mut engine = engine_with_config(&state, DuelConfig::new().with_max_chain_links(1));

    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    let err = engine.chain_response(&bob(), &lobby(), MIRROR, None, &[]).unwrap_err();

    assert_eq!(err, DuelError::ChainLimitExceeded { max: 1 });
    let state = load(&engine);
    assert_eq!(state.chain.len(), 1);
    assert!(state.seats[Seat::Opponent].spell_trap_zone[0].is_face_down);
}

// =============================================================================
// Building and resolving
// =============================================================================

/// Links resolve last in first out once both seats pass in a row.
#[test]
fn test_chain_resolves_last_in_first_out() {
    let mut state = duel_with_set_trap(MIRROR);
    give(&mut state, Seat::Host, &[EMBER, BLAZE]);
    let mut engine = engine(&state);

    let first = engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    assert!(first.link.is_some());
    assert_eq!(first.chain_length, 1);
    assert_eq!(first.priority, Some(Seat::Opponent));

    let second = engine.chain_response(&bob(), &lobby(), MIRROR, None, &[]).unwrap();
    assert_eq!(second.chain_length, 2);
    assert_eq!(second.priority, Some(Seat::Host));

    let third = engine.chain_response(&alice(), &lobby(), BLAZE, None, &[]).unwrap();
    assert_eq!(third.chain_length, 3);

    let pass = engine.pass_priority(&bob(), &lobby()).unwrap();
    assert!(!pass.resolved);
    assert_eq!(pass.priority, Some(Seat::Host));

    let pass = engine.pass_priority(&alice(), &lobby()).unwrap();
    assert!(pass.resolved);
    let order: Vec<CardId> = pass.links.iter().map(|l| l.card).collect();
    assert_eq!(order, vec![BLAZE, MIRROR, EMBER]);

    let state = load(&engine);
    assert!(state.chain.is_empty());
    assert_eq!(state.seats[Seat::Opponent].life_points, 8000 - 500 + 1000 - 1000);
    assert_eq!(state.seats[Seat::Host].graveyard.iter().copied().collect::<Vec<_>>(), vec![BLAZE, EMBER]);
    assert_eq!(state.seats[Seat::Opponent].graveyard.iter().copied().collect::<Vec<_>>(), vec![MIRROR]);
    assert!(state.seats[Seat::Host].spell_trap_zone.is_empty());

    assert_eq!(engine.recorder().of_kind(EventKind::ChainLinkResolved).count(), 3);
    assert_eq!(engine.recorder().of_kind(EventKind::ChainResolved).count(), 1);
}

#[test]
fn test_speed_one_cannot_respond() {
    let mut state = duel_with_set_trap(MIRROR);
    give(&mut state, Seat::Host, &[EMBER, CHAINS]);
    let mut engine = engine(&state);

    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    engine.chain_response(&bob(), &lobby(), MIRROR, None, &[]).unwrap();
    let err = engine.chain_response(&alice(), &lobby(), CHAINS, None, &[]).unwrap_err();

    assert!(matches!(err, DuelError::InvalidChainState { .. }));
}

/// Only an equal or higher speed may respond to the top link.
#[test]
fn test_lower_speed_cannot_respond_to_counter() {
    let mut state = duel_with_set_trap(SEAL);
    give(&mut state, Seat::Host, &[EMBER, BLAZE]);
    let mut engine = engine(&state);

    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    engine.chain_response(&bob(), &lobby(), SEAL, None, &[]).unwrap();
    let err = engine.chain_response(&alice(), &lobby(), BLAZE, None, &[]).unwrap_err();

    assert!(matches!(err, DuelError::InvalidChainState { .. }));
    assert!(err.reason().unwrap().contains("cannot respond"));
}

#[test]
fn test_counter_trap_negates_link_below() {
    let mut state = duel_with_set_trap(SEAL);
    give(&mut state, Seat::Host, &[EMBER]);
    let mut engine = engine(&state);

    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    engine.chain_response(&bob(), &lobby(), SEAL, None, &[]).unwrap();
    engine.pass_priority(&alice(), &lobby()).unwrap();
    let pass = engine.pass_priority(&bob(), &lobby()).unwrap();

    assert!(pass.resolved);
    assert_eq!(pass.links[0].card, SEAL);
    assert!(pass.links[0].outcome.as_ref().unwrap().success);
    assert!(pass.links[1].was_negated());

    let state = load(&engine);
    assert_eq!(state.seats[Seat::Opponent].life_points, 8000);
    assert!(state.seats[Seat::Host].graveyard.contains(&EMBER));
    assert!(state.seats[Seat::Opponent].graveyard.contains(&SEAL));
    assert_eq!(engine.recorder().of_kind(EventKind::ChainLinkNegated).count(), 1);
}

// =============================================================================
// Chain state checks
// =============================================================================

#[test]
fn test_response_needs_open_chain() {
    let mut state = duel_with_set_trap(MIRROR);
    let mut engine = engine(&state);
    let err = engine.chain_response(&bob(), &lobby(), MIRROR, None, &[]).unwrap_err();
    assert!(matches!(err, DuelError::InvalidChainState { .. }));

    give(&mut state, Seat::Host, &[EMBER]);
    let mut engine = common::engine(&state);
    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();
    let err = engine.pass_priority(&alice(), &lobby()).unwrap_err();
    assert_eq!(err.reason(), Some("you do not hold priority"));
}

#[test]
fn test_phase_locked_while_chain_open() {
    let mut state = duel();
    give(&mut state, Seat::Host, &[EMBER]);
    let mut engine = engine(&state);

    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();

    assert!(matches!(
        engine.advance_phase(&alice(), &lobby()),
        Err(DuelError::InvalidMove { .. })
    ));
    assert!(matches!(engine.end_turn(&alice(), &lobby()), Err(DuelError::InvalidMove { .. })));
}

#[test]
fn test_trap_set_this_turn_cannot_activate() {
    let mut state = duel();
    give(&mut state, Seat::Host, &[MIRROR]);
    let mut engine = engine(&state);

    let set = engine.set_spell_trap(&alice(), &lobby(), MIRROR).unwrap();
    assert_eq!(set.zone, Zone::SpellTrap);

    let err = engine.activate_trap(&alice(), &lobby(), MIRROR, &[]).unwrap_err();
    assert!(err.reason().unwrap().contains("the turn it was set"));

    let event = engine.recorder().of_kind(EventKind::SpellTrapSet).next().unwrap();
    assert_eq!(event.card, None);
}

/// A set normal spell can be activated the same turn.
#[test]
fn test_activate_set_spell() {
    let mut state = duel();
    give(&mut state, Seat::Host, &[EMBER]);
    let mut engine = engine(&state);

    engine.set_spell_trap(&alice(), &lobby(), EMBER).unwrap();
    engine.activate_spell(&alice(), &lobby(), EMBER, &[]).unwrap();

    let state = load(&engine);
    assert_eq!(state.seats[Seat::Host].spell_trap_zone.len(), 1);
    assert!(state.seats[Seat::Host].spell_trap_zone[0].is_activated);
    assert_eq!(state.chain.len(), 1);
}

/// A continuous spell with nothing to resolve goes face-up without a link.
#[test]
fn test_continuous_spell_without_activation_effect() {
    let mut state = duel();
    give(&mut state, Seat::Host, &[LANTERN]);
    let mut engine = engine(&state);

    let outcome = engine.activate_spell(&alice(), &lobby(), LANTERN, &[]).unwrap();

    assert_eq!(outcome.link, None);
    assert_eq!(outcome.chain_length, 0);
    let state = load(&engine);
    assert!(state.chain.is_empty());
    assert!(state.seats[Seat::Host].spell_trap_zone[0].is_face_up());
    assert_eq!(engine.recorder().kinds(), vec![EventKind::CardActivated]);
}

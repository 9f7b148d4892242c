//! Random play through the engine keeps the board invariants.
//!
//! Each step asks the seat to move (priority holder, else turn player)
//! for its available actions and performs one of them. Every listed action
//! must be accepted.

mod common;

use common::*;
use duel_engine::cards::CardId;
use duel_engine::core::{DuelSetup, Seat};
use duel_engine::rules::duel_outcome;
use proptest::prelude::*;
use proptest::sample::Index;

fn deck() -> Vec<CardId> {
    vec![
        SCOUT, DRAGON, RAIDER, WARD, EMBER, BLAZE, SEAL, MIRROR, CHAINS, SENTINEL, SPIKES, LANTERN, SPRING, SPRITE,
        GIANT, SCOUT, GIANT, RAIDER, EMBER, MIRROR,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_random_play_keeps_invariants(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<Index>(), 1..120),
    ) {
        let state = DuelSetup::new(LOBBY, "alice", "bob")
            .with_decks(deck(), deck())
            .with_seed(seed)
            .build();
        let mut engine = engine(&state);

        for choice in choices {
            let current = load(&engine);
            let seat = current.chain.priority().unwrap_or(current.current_turn);
            let caller = current.players[seat].clone();

            let actions = engine.available_actions(&caller, &lobby()).unwrap();
            if actions.is_empty() {
                break;
            }
            let action = choice.get(&actions);
            let result = perform(&mut engine, &caller, action);
            prop_assert!(result.is_ok(), "{:?} was listed but rejected: {:?}", action, result);

            let after = load(&engine);
            for seat in Seat::ALL {
                let zones = &after.seats[seat];
                prop_assert!(zones.life_points >= 0);
                prop_assert!(zones.board.len() <= 5);
                prop_assert!(zones.spell_trap_zone.len() <= 5);
            }
            prop_assert!(after.chain.len() <= 12);
        }
    }

    #[test]
    fn test_outcome_decided_by_zero_life(host_life in 0i64..3, opponent_life in 0i64..3) {
        let mut state = duel();
        state.seats[Seat::Host].life_points = host_life;
        state.seats[Seat::Opponent].life_points = opponent_life;

        let outcome = duel_outcome(&state);
        match (host_life, opponent_life) {
            (0, 0) => prop_assert!(outcome.is_some_and(|o| o.is_draw())),
            (0, _) => prop_assert_eq!(outcome.and_then(|o| o.winner), Some(Seat::Opponent)),
            (_, 0) => prop_assert_eq!(outcome.and_then(|o| o.winner), Some(Seat::Host)),
            _ => prop_assert!(outcome.is_none()),
        }
    }
}

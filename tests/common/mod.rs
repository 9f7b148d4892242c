//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use duel_engine::actions::DuelEngine;
use duel_engine::cards::{BoardCard, CardCatalog, CardId, Position, SpellTrapCard};
use duel_engine::core::{DuelConfig, DuelSetup, GameState, LobbyId, PlayerId, Seat};
use duel_engine::error::DuelError;
use duel_engine::rules::AvailableAction;
use duel_engine::store::{DuelStore, MemoryEventLog, MemoryStore};

pub type Engine = DuelEngine<MemoryStore, MemoryEventLog>;

pub const LOBBY: &str = "lobby-1";

// =============================================================================
// Cards
// =============================================================================

/// Level 4, 1400/1200, no effects.
pub const SCOUT: CardId = CardId::new(1);
/// Level 7, 2500/2000, needs two tributes.
pub const DRAGON: CardId = CardId::new(2);
/// Level 4, 1800/800, burns 300 on summon.
pub const RAIDER: CardId = CardId::new(3);
/// Continuous trap, burns 500 when the opponent summons.
pub const WARD: CardId = CardId::new(4);
/// Normal spell, burns 1000.
pub const EMBER: CardId = CardId::new(5);
/// Quick-play spell, burns 500.
pub const BLAZE: CardId = CardId::new(6);
/// Counter trap, negates the link below.
pub const SEAL: CardId = CardId::new(7);
/// Normal trap, gains 1000.
pub const MIRROR: CardId = CardId::new(8);
/// Normal spell, opponent cannot normal summon through their next turn.
pub const CHAINS: CardId = CardId::new(9);
/// Level 4, 0/2000, cannot be destroyed by battle.
pub const SENTINEL: CardId = CardId::new(10);
/// Continuous trap, burns 300 when the opponent attacks.
pub const SPIKES: CardId = CardId::new(11);
/// Continuous spell, gains 500 in its controller's end phase.
pub const LANTERN: CardId = CardId::new(12);
/// Continuous spell, gains 300 in its controller's standby phase.
pub const SPRING: CardId = CardId::new(13);
/// Level 3, 800/900, draws a card when flip summoned.
pub const SPRITE: CardId = CardId::new(14);
/// Level 4, 1000/1000, no effects.
pub const GIANT: CardId = CardId::new(15);
/// Normal spell, stops the opponent's normal summons for as long as a
/// turn counter can count.
pub const ETERNAL: CardId = CardId::new(16);

const CATALOG_JSON: &str = r#"[
    {"id": 1, "name": "Field Scout",
     "kind": {"type": "monster", "level": 4, "attack": 1400, "defense": 1200}},
    {"id": 2, "name": "Azure Dragon",
     "kind": {"type": "monster", "level": 7, "attack": 2500, "defense": 2000}},
    {"id": 3, "name": "Goblin Raider",
     "kind": {"type": "monster", "level": 4, "attack": 1800, "defense": 800},
     "effects": [{"trigger": "on_summon", "action": {"type": "inflict_damage", "amount": 300}}]},
    {"id": 4, "name": "Watchful Ward",
     "kind": {"type": "trap", "trap_type": "continuous"},
     "effects": [{"trigger": "on_opponent_summon", "action": {"type": "inflict_damage", "amount": 500}}]},
    {"id": 5, "name": "Ember Bolt",
     "kind": {"type": "spell", "spell_type": "normal"},
     "effects": [{"trigger": "on_activate", "action": {"type": "inflict_damage", "amount": 1000}}]},
    {"id": 6, "name": "Quick Blaze",
     "kind": {"type": "spell", "spell_type": "quick_play"},
     "effects": [{"trigger": "on_activate", "action": {"type": "inflict_damage", "amount": 500}}]},
    {"id": 7, "name": "Seal of Denial",
     "kind": {"type": "trap", "trap_type": "counter"},
     "effects": [{"trigger": "on_activate", "action": {"type": "negate"}}]},
    {"id": 8, "name": "Mirror Guard",
     "kind": {"type": "trap", "trap_type": "normal"},
     "effects": [{"trigger": "on_activate",
                  "action": {"type": "gain_life_points", "amount": 1000, "who": "controller"}}]},
    {"id": 9, "name": "Binding Chains",
     "kind": {"type": "spell", "spell_type": "normal"},
     "effects": [{"trigger": "on_activate",
                  "action": {"type": "restrict", "restricted": "normal_summon", "who": "opponent",
                             "duration": {"turns": 1}}}]},
    {"id": 10, "name": "Stone Sentinel",
     "kind": {"type": "monster", "level": 4, "attack": 0, "defense": 2000},
     "effects": [{"trigger": "passive", "protection": {"cannot_be_destroyed_by_battle": true}}]},
    {"id": 11, "name": "Spiked Floor",
     "kind": {"type": "trap", "trap_type": "continuous"},
     "effects": [{"trigger": "on_opponent_attack", "action": {"type": "inflict_damage", "amount": 300}}]},
    {"id": 12, "name": "Lantern Shrine",
     "kind": {"type": "spell", "spell_type": "continuous"},
     "effects": [{"trigger": "on_end_phase",
                  "action": {"type": "gain_life_points", "amount": 500}}]},
    {"id": 13, "name": "Healing Spring",
     "kind": {"type": "spell", "spell_type": "continuous"},
     "effects": [{"trigger": "on_standby",
                  "action": {"type": "gain_life_points", "amount": 300}}]},
    {"id": 14, "name": "Mystic Sprite",
     "kind": {"type": "monster", "level": 3, "attack": 800, "defense": 900},
     "effects": [{"trigger": "on_flip", "action": {"type": "draw_cards", "count": 1}}]},
    {"id": 15, "name": "Hill Giant",
     "kind": {"type": "monster", "level": 4, "attack": 1000, "defense": 1000}},
    {"id": 16, "name": "Eternal Seal",
     "kind": {"type": "spell", "spell_type": "normal"},
     "effects": [{"trigger": "on_activate",
                  "action": {"type": "restrict", "restricted": "normal_summon", "who": "opponent",
                             "duration": {"turns": 4294967295}}}]}
]"#;

pub fn catalog() -> CardCatalog {
    CardCatalog::from_json(CATALOG_JSON).unwrap()
}

// =============================================================================
// Duel fixtures
// =============================================================================

pub fn alice() -> PlayerId {
    PlayerId::new("alice")
}

pub fn bob() -> PlayerId {
    PlayerId::new("bob")
}

pub fn lobby() -> LobbyId {
    LobbyId::new(LOBBY)
}

/// Alice (host) to move on turn 1, main phase 1, empty decks and hands.
pub fn duel() -> GameState {
    DuelSetup::new(LOBBY, "alice", "bob").build()
}

/// Like [`duel`] but both seats start from a deck of `deck`.
pub fn duel_with_decks(deck: Vec<CardId>) -> GameState {
    DuelSetup::new(LOBBY, "alice", "bob")
        .with_decks(deck.clone(), deck)
        .with_seed(3)
        .build()
}

pub fn engine(state: &GameState) -> Engine {
    engine_with_config(state, DuelConfig::default())
}

pub fn engine_with_config(state: &GameState, config: DuelConfig) -> Engine {
    let store = MemoryStore::new().with_duel(state).unwrap();
    DuelEngine::new(store, MemoryEventLog::new(), catalog(), config).with_clock(|| 42_000)
}

pub fn give(state: &mut GameState, seat: Seat, cards: &[CardId]) {
    for &card in cards {
        state.seats[seat].hand.push_back(card);
    }
}

/// A face-up monster with its catalog stats, summoned on `turn`.
pub fn place_monster(state: &mut GameState, seat: Seat, card: CardId, position: Position, turn: u32) {
    let def = catalog().get(card).cloned().unwrap();
    let (attack, defense) = def.base_stats().unwrap();
    state.seats[seat]
        .board
        .push_back(BoardCard::new(card, attack, defense, position, turn).with_protection(def.protection()));
}

/// A face-down defense position monster set on `turn`.
pub fn place_face_down(state: &mut GameState, seat: Seat, card: CardId, turn: u32) {
    place_monster(state, seat, card, Position::Defense, turn);
    if let Some(monster) = state.seats[seat].board.back_mut() {
        monster.is_face_down = true;
    }
}

pub fn set_spell_trap(state: &mut GameState, seat: Seat, card: CardId, turn: u32) {
    state.seats[seat].spell_trap_zone.push_back(SpellTrapCard::set(card, turn));
}

pub fn face_up_spell_trap(state: &mut GameState, seat: Seat, card: CardId, turn: u32) {
    state.seats[seat]
        .spell_trap_zone
        .push_back(SpellTrapCard::activated(card, turn));
}

pub fn load(engine: &Engine) -> GameState {
    engine.store().load(&lobby()).unwrap()
}

/// Perform a listed action the way an automated caller would.
pub fn perform(engine: &mut Engine, caller: &PlayerId, action: &AvailableAction) -> Result<(), DuelError> {
    let lobby = lobby();
    match action {
        AvailableAction::NormalSummon {
            card,
            position,
            tributes,
        } => engine.normal_summon(caller, &lobby, *card, *position, tributes).map(drop),
        AvailableAction::SetMonster { card, tributes } => engine.set_monster(caller, &lobby, *card, tributes).map(drop),
        AvailableAction::FlipSummon { card } => engine.flip_summon(caller, &lobby, *card).map(drop),
        AvailableAction::ChangePosition { card } => engine.change_position(caller, &lobby, *card).map(drop),
        AvailableAction::SetSpellTrap { card } => engine.set_spell_trap(caller, &lobby, *card).map(drop),
        AvailableAction::ActivateSpell { card, targets } => {
            engine.activate_spell(caller, &lobby, *card, targets).map(drop)
        }
        AvailableAction::ActivateTrap { card, targets } => {
            engine.activate_trap(caller, &lobby, *card, targets).map(drop)
        }
        AvailableAction::ActivateMonsterEffect {
            card,
            effect_index,
            targets,
        } => engine
            .activate_monster_effect(caller, &lobby, *card, Some(*effect_index), targets)
            .map(drop),
        AvailableAction::DeclareAttack { attacker, target } => {
            engine.declare_attack(caller, &lobby, *attacker, *target).map(drop)
        }
        AvailableAction::PassPriority => engine.pass_priority(caller, &lobby).map(drop),
        AvailableAction::AdvancePhase { .. } => engine.advance_phase(caller, &lobby).map(drop),
        AvailableAction::EndTurn => engine.end_turn(caller, &lobby).map(drop),
    }
}

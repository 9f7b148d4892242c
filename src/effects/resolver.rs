//! Effect resolution - executing ability entries on game state.
//!
//! `EffectResolver::execute` applies one entry's action to the state and
//! reports `{success, message}`. It never returns an error: an effect that
//! cannot do anything (empty deck, protected target, unmet condition) is a
//! failed outcome, reported and logged like any other.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::effect::{EffectAction, EffectDef, RestrictDuration, Who};
use super::targeting::TargetSpec;
use crate::cards::{CardCatalog, CardId};
use crate::core::{GameRng, GameState, LinkId, Seat};
use crate::lingering::{CapabilityGate, EffectSource, Expiry};
use crate::triggers::ConditionContext;
use crate::zones::Zone;

/// Who is executing an entry, and from where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectContext {
    /// Seat controlling the effect.
    pub controller: Seat,
    /// Card the entry belongs to.
    pub source: CardId,
    pub effect_index: usize,
    /// Chain link being resolved, if the entry resolves from the chain.
    pub link: Option<LinkId>,
}

impl EffectContext {
    #[must_use]
    pub fn new(controller: Seat, source: CardId, effect_index: usize) -> Self {
        Self {
            controller,
            source,
            effect_index,
            link: None,
        }
    }

    /// Resolve as part of a chain link (builder pattern).
    #[must_use]
    pub fn in_chain(mut self, link: LinkId) -> Self {
        self.link = Some(link);
        self
    }
}

/// Result of executing an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    pub success: bool,
    pub message: String,
}

impl EffectOutcome {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

fn seats_for(who: Who, controller: Seat) -> SmallVec<[Seat; 2]> {
    match who {
        Who::Controller => SmallVec::from_slice(&[controller]),
        Who::Opponent => SmallVec::from_slice(&[controller.other()]),
        Who::Both => SmallVec::from_slice(&[controller, controller.other()]),
    }
}

fn describe(seats: &[Seat]) -> String {
    match seats {
        [seat] => seat.to_string(),
        _ => "both players".to_string(),
    }
}

/// Find which seat's field holds a target, searching in the spec's side
/// order.
fn locate_target(state: &GameState, spec: &TargetSpec, controller: Seat, card: CardId) -> Option<(Seat, Zone)> {
    spec.side
        .seats(controller)
        .into_iter()
        .find_map(|seat| match state.seats[seat].locate(card) {
            Some(zone) if zone.is_field() => Some((seat, zone)),
            _ => None,
        })
}

/// Executes ability entries.
pub struct EffectResolver;

impl EffectResolver {
    /// Execute `effect` for `ctx` against `targets`, mutating `state`.
    pub fn execute(
        state: &mut GameState,
        catalog: &CardCatalog,
        ctx: &EffectContext,
        effect: &EffectDef,
        targets: &[CardId],
    ) -> EffectOutcome {
        if let Some(condition) = &effect.condition {
            let met = condition.evaluate(&ConditionContext::new(state, catalog, ctx.controller));
            if !met {
                return EffectOutcome::failed("condition not met");
            }
        }

        let Some(action) = &effect.action else {
            return EffectOutcome::ok("no action to perform");
        };

        let outcome = match action {
            EffectAction::DrawCards { count, who } => Self::draw(state, *count, seats_for(*who, ctx.controller)),

            EffectAction::InflictDamage { amount, who } => {
                let seats = seats_for(*who, ctx.controller);
                for &seat in &seats {
                    state.seats[seat].lose_life(*amount);
                }
                EffectOutcome::ok(format!("Inflicted {} damage to {}", amount, describe(&seats)))
            }

            EffectAction::GainLifePoints { amount, who } => {
                let seats = seats_for(*who, ctx.controller);
                for &seat in &seats {
                    state.seats[seat].gain_life(*amount);
                }
                EffectOutcome::ok(format!("{} gained {} life points", describe(&seats), amount))
            }

            EffectAction::ModifyStats { attack, defense } => {
                Self::modify_stats(state, &effect.target, ctx, targets, *attack, *defense)
            }

            EffectAction::Destroy => {
                let mut destroyed = 0;
                let mut protected = 0;
                for &card in targets {
                    let Some((seat, _)) = locate_target(state, &effect.target, ctx.controller, card) else {
                        continue;
                    };
                    if Self::destroy(state, seat, card) {
                        destroyed += 1;
                    } else {
                        protected += 1;
                    }
                }
                match (destroyed, protected) {
                    (0, 0) => EffectOutcome::failed("no targets remain on the field"),
                    (0, _) => EffectOutcome::failed("target cannot be destroyed by card effects"),
                    (n, _) => EffectOutcome::ok(format!("Destroyed {} card(s)", n)),
                }
            }

            EffectAction::DestroyAll { side } => {
                let mut destroyed = 0;
                for seat in side.seats(ctx.controller) {
                    let monsters: Vec<CardId> = state.seats[seat].board.iter().map(|m| m.card_id).collect();
                    for card in monsters {
                        if Self::destroy(state, seat, card) {
                            destroyed += 1;
                        }
                    }
                }
                EffectOutcome::ok(format!("Destroyed {} monster(s)", destroyed))
            }

            EffectAction::Banish => Self::relocate(state, &effect.target, ctx, targets, Zone::Banished),

            EffectAction::ReturnToHand => Self::relocate(state, &effect.target, ctx, targets, Zone::Hand),

            EffectAction::SearchDeck { archetype, card } => {
                let zones = &state.seats[ctx.controller];
                let found = zones.deck.iter().copied().find(|&candidate| {
                    card.map_or(false, |wanted| wanted == candidate)
                        || archetype.as_deref().map_or(false, |arch| {
                            catalog
                                .get(candidate)
                                .and_then(|def| def.archetype.as_deref())
                                == Some(arch)
                        })
                });
                match found {
                    Some(found) => {
                        let zones = &mut state.seats[ctx.controller];
                        zones.remove_from_deck(found);
                        zones.add_to_hand(found);
                        EffectOutcome::ok(format!("Added {} to hand", catalog.name_of(found)))
                    }
                    None => EffectOutcome::failed("no matching card in deck"),
                }
            }

            EffectAction::DiscardRandom { count, who } => {
                let seats = seats_for(*who, ctx.controller);
                let mut rng = GameRng::from_state(&state.rng);
                let mut discarded = 0;
                for &seat in &seats {
                    for _ in 0..*count {
                        let zones = &mut state.seats[seat];
                        let Some(idx) = rng.pick_index(zones.hand.len()) else {
                            break;
                        };
                        let card = zones.hand.remove(idx);
                        zones.send_to_graveyard(card);
                        discarded += 1;
                    }
                }
                state.rng = rng.state();
                if discarded == 0 {
                    EffectOutcome::failed("no cards to discard")
                } else {
                    EffectOutcome::ok(format!("Discarded {} card(s) from {}", discarded, describe(&seats)))
                }
            }

            EffectAction::Restrict {
                restricted,
                who,
                duration,
            } => {
                let expiry = match duration {
                    RestrictDuration::EndOfTurn => Expiry::EndOfTurn(state.turn_number),
                    RestrictDuration::Turns(n) => {
                        Expiry::UntilTurn(state.turn_number.saturating_add(*n).saturating_add(1))
                    }
                    RestrictDuration::WhileFaceUp => Expiry::WhileSourceFaceUp,
                    RestrictDuration::Permanent => Expiry::UntilRemoved,
                };
                let source = EffectSource {
                    seat: ctx.controller,
                    card: ctx.source,
                };
                let seats = seats_for(*who, ctx.controller);
                let description = format!("{} prevents {}", catalog.name_of(ctx.source), restricted);
                for &seat in &seats {
                    CapabilityGate::add(state, *restricted, seat, source, expiry, description.clone());
                }
                EffectOutcome::ok(format!("{} cannot {} ({:?})", describe(&seats), restricted, expiry))
            }

            EffectAction::Negate => {
                let below = ctx
                    .link
                    .and_then(|link| state.chain.link_below(link))
                    .map(|l| (l.id, l.card_id));
                match below {
                    Some((id, card)) if state.chain.negate(id) => {
                        EffectOutcome::ok(format!("Negated {}", catalog.name_of(card)))
                    }
                    _ => EffectOutcome::failed("nothing to negate"),
                }
            }
        };

        debug!(
            source = %ctx.source,
            controller = %ctx.controller,
            action = action.name(),
            success = outcome.success,
            "effect executed"
        );
        outcome
    }

    fn draw(state: &mut GameState, count: u32, seats: SmallVec<[Seat; 2]>) -> EffectOutcome {
        let mut drawn = 0;
        for &seat in &seats {
            for _ in 0..count {
                if state.seats[seat].draw().is_some() {
                    drawn += 1;
                }
            }
        }
        if drawn == 0 {
            EffectOutcome::failed("deck is empty")
        } else {
            EffectOutcome::ok(format!("{} drew {} card(s)", describe(&seats), drawn))
        }
    }

    fn modify_stats(
        state: &mut GameState,
        spec: &TargetSpec,
        ctx: &EffectContext,
        targets: &[CardId],
        attack: i64,
        defense: i64,
    ) -> EffectOutcome {
        let affected: Vec<(Seat, CardId)> = if spec.is_targeted() {
            targets
                .iter()
                .filter_map(|&card| locate_target(state, spec, ctx.controller, card).map(|(seat, _)| (seat, card)))
                .collect()
        } else {
            vec![(ctx.controller, ctx.source)]
        };

        let mut changed = 0;
        for (seat, card) in affected {
            if let Some(monster) = state.seats[seat].board_card_mut(card) {
                monster.attack = monster.attack.saturating_add(attack).max(0);
                monster.defense = monster.defense.saturating_add(defense).max(0);
                changed += 1;
            }
        }

        if changed == 0 {
            EffectOutcome::failed("no monster to modify")
        } else {
            EffectOutcome::ok(format!(
                "Modified {} monster(s) by {:+} ATK / {:+} DEF",
                changed, attack, defense
            ))
        }
    }

    /// Destroy a field card, honouring effect-destruction protection.
    /// Returns whether the card left the field.
    fn destroy(state: &mut GameState, seat: Seat, card: CardId) -> bool {
        let zones = &mut state.seats[seat];
        if zones
            .board_card(card)
            .is_some_and(|m| m.protection.cannot_be_destroyed_by_effects)
        {
            return false;
        }
        if zones.take_from_field(card).is_some() {
            zones.send_to_graveyard(card);
            return true;
        }
        false
    }

    fn relocate(
        state: &mut GameState,
        spec: &TargetSpec,
        ctx: &EffectContext,
        targets: &[CardId],
        destination: Zone,
    ) -> EffectOutcome {
        let mut moved = 0;
        for &card in targets {
            let Some((seat, _)) = locate_target(state, spec, ctx.controller, card) else {
                continue;
            };
            let zones = &mut state.seats[seat];
            if zones.take_from_field(card).is_none() {
                continue;
            }
            match destination {
                Zone::Hand => zones.add_to_hand(card),
                Zone::Banished => zones.banish(card),
                _ => zones.send_to_graveyard(card),
            }
            moved += 1;
        }

        if moved == 0 {
            EffectOutcome::failed("no targets remain on the field")
        } else {
            EffectOutcome::ok(format!("Moved {} card(s) to the {}", moved, destination))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardCard, CardDefinition, Position, SpellTrapCard};
    use crate::core::ActionKind;
    use crate::effects::{EffectTrigger, Protection, SpellSpeed, TargetSide, Targets};
    use crate::test_support::blank_state;
    use crate::triggers::Condition;

    fn catalog() -> CardCatalog {
        CardCatalog::from_definitions([
            CardDefinition::monster(CardId::new(1), "Shadow Scout", 3, 1200, 800).with_archetype("shadow"),
            CardDefinition::monster(CardId::new(2), "Plain Guard", 4, 1000, 1800),
        ])
        .unwrap()
    }

    fn ctx() -> EffectContext {
        EffectContext::new(Seat::Host, CardId::new(100), 0)
    }

    fn run(state: &mut GameState, effect: EffectDef, targets: &[CardId]) -> EffectOutcome {
        EffectResolver::execute(state, &catalog(), &ctx(), &effect, targets)
    }

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut state = blank_state();
        state.seats[Seat::Opponent].life_points = 300;

        let outcome = run(
            &mut state,
            EffectDef::new(EffectTrigger::OnSummon, EffectAction::damage(1000, Who::Opponent)),
            &[],
        );

        assert!(outcome.success);
        assert_eq!(state.seats[Seat::Opponent].life_points, 0);
        assert_eq!(state.seats[Seat::Host].life_points, 8000);
    }

    #[test]
    fn test_draw_from_empty_deck_fails() {
        let mut state = blank_state();
        let outcome = run(
            &mut state,
            EffectDef::new(EffectTrigger::OnActivate, EffectAction::draw(2, Who::Controller)),
            &[],
        );

        assert!(!outcome.success);
        assert!(state.seats[Seat::Host].decked_out);
    }

    #[test]
    fn test_destroy_honours_protection() {
        let mut state = blank_state();
        state.seats[Seat::Opponent].board.push_back(
            BoardCard::new(CardId::new(2), 1000, 1800, Position::Attack, 1).with_protection(Protection {
                cannot_be_destroyed_by_effects: true,
                ..Protection::default()
            }),
        );

        let effect = EffectDef::new(EffectTrigger::OnActivate, EffectAction::Destroy)
            .with_target(TargetSpec::monster(TargetSide::Opponent, 1));
        let outcome = run(&mut state, effect, &[CardId::new(2)]);

        assert!(!outcome.success);
        assert_eq!(state.seats[Seat::Opponent].board.len(), 1);
    }

    #[test]
    fn test_destroy_all_skips_protected() {
        let mut state = blank_state();
        let opp = &mut state.seats[Seat::Opponent];
        opp.board.push_back(BoardCard::new(CardId::new(1), 1200, 800, Position::Attack, 1));
        opp.board.push_back(
            BoardCard::new(CardId::new(2), 1000, 1800, Position::Attack, 1).with_protection(Protection {
                cannot_be_destroyed_by_effects: true,
                ..Protection::default()
            }),
        );

        let outcome = run(
            &mut state,
            EffectDef::new(EffectTrigger::OnActivate, EffectAction::DestroyAll { side: TargetSide::Opponent }),
            &[],
        );

        assert!(outcome.success);
        let opp = &state.seats[Seat::Opponent];
        assert_eq!(opp.board.len(), 1);
        assert_eq!(opp.graveyard.iter().copied().collect::<Vec<_>>(), vec![CardId::new(1)]);
    }

    #[test]
    fn test_modify_stats_on_source_floors_at_zero() {
        let mut state = blank_state();
        state.seats[Seat::Host]
            .board
            .push_back(BoardCard::new(CardId::new(100), 500, 500, Position::Attack, 1));

        let outcome = run(
            &mut state,
            EffectDef::new(EffectTrigger::OnSummon, EffectAction::ModifyStats { attack: -800, defense: 300 }),
            &[],
        );

        assert!(outcome.success);
        let monster = state.seats[Seat::Host].board_card(CardId::new(100)).unwrap();
        assert_eq!((monster.attack, monster.defense), (0, 800));
    }

    #[test]
    fn test_modify_stats_saturates() {
        let mut state = blank_state();
        state.seats[Seat::Host]
            .board
            .push_back(BoardCard::new(CardId::new(100), 500, 500, Position::Attack, 1));

        let effect = EffectDef::new(
            EffectTrigger::OnSummon,
            EffectAction::ModifyStats {
                attack: i64::MAX,
                defense: i64::MIN,
            },
        );
        assert!(run(&mut state, effect, &[]).success);

        let monster = state.seats[Seat::Host].board_card(CardId::new(100)).unwrap();
        assert_eq!((monster.attack, monster.defense), (i64::MAX, 0));
    }

    #[test]
    fn test_return_to_hand_goes_to_owner() {
        let mut state = blank_state();
        state.seats[Seat::Opponent]
            .board
            .push_back(BoardCard::new(CardId::new(2), 1000, 1800, Position::Attack, 1));

        let effect = EffectDef::new(EffectTrigger::OnActivate, EffectAction::ReturnToHand)
            .with_target(TargetSpec::monster(TargetSide::Opponent, 1));
        assert!(run(&mut state, effect, &[CardId::new(2)]).success);

        assert!(state.seats[Seat::Opponent].hand_contains(CardId::new(2)));
        assert!(state.seats[Seat::Opponent].board.is_empty());
    }

    #[test]
    fn test_search_by_archetype() {
        let mut state = blank_state();
        state.seats[Seat::Host].deck = [CardId::new(2), CardId::new(1)].into_iter().collect();

        let effect = EffectDef::new(
            EffectTrigger::OnSummon,
            EffectAction::SearchDeck {
                archetype: Some("shadow".to_string()),
                card: None,
            },
        );
        assert!(run(&mut state, effect, &[]).success);

        let host = &state.seats[Seat::Host];
        assert!(host.hand_contains(CardId::new(1)));
        assert_eq!(host.deck.len(), 1);
    }

    #[test]
    fn test_discard_random_is_deterministic() {
        let setup = || {
            let mut state = blank_state();
            state.seats[Seat::Opponent].hand = (1..=5).map(CardId::new).collect();
            state
        };
        let effect = EffectDef::new(
            EffectTrigger::OnSummon,
            EffectAction::DiscardRandom { count: 2, who: Who::Opponent },
        );

        let mut a = setup();
        let mut b = setup();
        run(&mut a, effect.clone(), &[]);
        run(&mut b, effect, &[]);

        assert_eq!(a.seats[Seat::Opponent].graveyard, b.seats[Seat::Opponent].graveyard);
        assert_eq!(a.seats[Seat::Opponent].hand.len(), 3);
        assert_ne!(a.rng, blank_state().rng);
    }

    #[test]
    fn test_restrict_creates_lingering_effect() {
        let mut state = blank_state();
        state.turn_number = 4;

        let effect = EffectDef::new(
            EffectTrigger::OnActivate,
            EffectAction::restrict(ActionKind::NormalSummon, Who::Opponent, RestrictDuration::Turns(1)),
        );
        assert!(run(&mut state, effect, &[]).success);

        assert!(CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Opponent).prevented);
        state.turn_number = 5;
        assert!(CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Opponent).prevented);
        state.turn_number = 6;
        assert!(!CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Opponent).prevented);
    }

    #[test]
    fn test_restrict_far_future_saturates() {
        let mut state = blank_state();
        state.turn_number = 4;

        let effect = EffectDef::new(
            EffectTrigger::OnActivate,
            EffectAction::restrict(ActionKind::NormalSummon, Who::Opponent, RestrictDuration::Turns(u32::MAX)),
        );
        assert!(run(&mut state, effect, &[]).success);

        state.turn_number = u32::MAX - 1;
        assert!(CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Opponent).prevented);
    }

    #[test]
    fn test_negate_marks_link_below() {
        let mut state = blank_state();
        let first = state
            .chain
            .push(Seat::Opponent, CardId::new(1), 0, SpellSpeed::One, Targets::new(), 12)
            .unwrap();
        let second = state
            .chain
            .push(Seat::Host, CardId::new(100), 0, SpellSpeed::Three, Targets::new(), 12)
            .unwrap();

        let effect = EffectDef::new(EffectTrigger::OnActivate, EffectAction::Negate);
        let outcome = EffectResolver::execute(&mut state, &catalog(), &ctx().in_chain(second), &effect, &[]);

        assert!(outcome.success);
        assert_eq!(state.chain.get(first).map(|l| l.state), Some(crate::stack::LinkState::Negated));
    }

    #[test]
    fn test_negate_outside_chain_fails() {
        let mut state = blank_state();
        let effect = EffectDef::new(EffectTrigger::OnActivate, EffectAction::Negate);
        assert!(!run(&mut state, effect, &[]).success);
    }

    #[test]
    fn test_condition_blocks_execution() {
        let mut state = blank_state();
        let effect = EffectDef::new(EffectTrigger::OnSummon, EffectAction::damage(500, Who::Opponent))
            .with_condition(Condition::LifePointsAtMost { amount: 1000 });

        let outcome = run(&mut state, effect, &[]);

        assert!(!outcome.success);
        assert_eq!(state.seats[Seat::Opponent].life_points, 8000);
    }

    #[test]
    fn test_destroy_spell_trap_target() {
        let mut state = blank_state();
        state.seats[Seat::Opponent]
            .spell_trap_zone
            .push_back(SpellTrapCard::set(CardId::new(9), 1));

        let effect = EffectDef::new(EffectTrigger::OnActivate, EffectAction::Destroy)
            .with_target(TargetSpec::spell_trap(TargetSide::Opponent, 1));
        assert!(run(&mut state, effect, &[CardId::new(9)]).success);
        assert!(state.seats[Seat::Opponent].graveyard.contains(&CardId::new(9)));
    }
}

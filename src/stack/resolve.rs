//! Chain resolution.
//!
//! Resolution runs inside one state transition: links are taken from the
//! top, each marked resolving, executed, marked resolved and removed, so a
//! link can never resolve twice even if a later step fails.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::chain::LinkState;
use crate::cards::{CardCatalog, CardId};
use crate::core::{GameState, LinkId, Seat};
use crate::effects::{EffectContext, EffectOutcome, EffectResolver};

/// What happened to one link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub link: LinkId,
    pub seat: Seat,
    pub card: CardId,
    /// `None` when the link was negated and skipped.
    pub outcome: Option<EffectOutcome>,
}

impl ResolvedLink {
    #[must_use]
    pub fn was_negated(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Resolves the chain of a game state.
pub struct ChainResolver;

impl ChainResolver {
    /// Resolve every link, last in first out, and clear the chain.
    ///
    /// Spent spells and traps leave the field afterwards; continuous,
    /// field and equip cards stay. A negated spell or trap always goes to
    /// the graveyard.
    pub fn resolve_all(state: &mut GameState, catalog: &CardCatalog) -> Vec<ResolvedLink> {
        let mut resolved = Vec::with_capacity(state.chain.len());

        while let Some(link) = state.chain.top().cloned() {
            let def = catalog.get(link.card_id);

            let outcome = if link.state == LinkState::Negated {
                debug!(link = %link.id, card = %link.card_id, "negated link skipped");
                None
            } else {
                state.chain.set_state(link.id, LinkState::Resolving);
                let outcome = match def.and_then(|d| d.effect(link.effect_index)) {
                    Some(effect) => {
                        let ctx = EffectContext::new(link.seat, link.card_id, link.effect_index).in_chain(link.id);
                        EffectResolver::execute(state, catalog, &ctx, effect, &link.targets)
                    }
                    None => EffectOutcome::failed("card has no such effect"),
                };
                state.chain.set_state(link.id, LinkState::Resolved);
                Some(outcome)
            };
            state.chain.remove(link.id);

            let is_spell_or_trap = def.is_some_and(|d| d.is_spell() || d.is_trap());
            let spent = outcome.is_none() || !def.is_some_and(|d| d.stays_on_field());
            if is_spell_or_trap && spent && state.seats[link.seat].take_spell_trap(link.card_id).is_some() {
                state.seats[link.seat].send_to_graveyard(link.card_id);
            }

            resolved.push(ResolvedLink {
                link: link.id,
                seat: link.seat,
                card: link.card_id,
                outcome,
            });
        }

        state.chain.clear();
        info!(lobby = %state.lobby_id, links = resolved.len(), "chain resolved");
        resolved
    }
}

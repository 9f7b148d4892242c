//! Passing priority and resolving the chain.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::DuelEngine;
use crate::core::{LobbyId, PlayerId, Seat};
use crate::error::DuelError;
use crate::stack::{ChainResolver, ResolvedLink};
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind};

/// Result of passing priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    /// Whether this pass resolved the chain.
    pub resolved: bool,
    /// Links in resolution order, top first. Empty unless `resolved`.
    pub links: Vec<ResolvedLink>,
    /// Seat holding priority afterwards. `None` once the chain is gone.
    pub priority: Option<Seat>,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Pass priority on the open chain.
    ///
    /// The second consecutive pass resolves every link, top first, in one
    /// commit.
    pub fn pass_priority(&mut self, caller: &PlayerId, lobby: &LobbyId) -> Result<PassOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        crate::rules::ensure_active(&state)?;

        if !state.chain.pass(seat)? {
            self.commit(&mut state)?;
            self.record(DuelEvent::new(&state, EventKind::PriorityPassed, seat, "passed priority"))?;
            debug!(lobby = %lobby, %seat, "priority passed");
            return Ok(PassOutcome {
                resolved: false,
                links: Vec::new(),
                priority: state.chain.priority(),
            });
        }

        let links = ChainResolver::resolve_all(&mut state, &self.catalog);
        self.commit(&mut state)?;

        for link in &links {
            let name = self.catalog.name_of(link.card);
            let event = match &link.outcome {
                Some(outcome) => DuelEvent::new(
                    &state,
                    EventKind::ChainLinkResolved,
                    link.seat,
                    format!("{}: {}", name, outcome.message),
                ),
                None => DuelEvent::new(&state, EventKind::ChainLinkNegated, link.seat, format!("{} was negated", name)),
            };
            self.record(event.with_card(link.card))?;
        }
        let description = format!("chain of {} resolved", links.len());
        self.record(DuelEvent::new(&state, EventKind::ChainResolved, seat, description))?;
        info!(lobby = %lobby, links = links.len(), "chain closed");

        Ok(PassOutcome {
            resolved: true,
            links,
            priority: None,
        })
    }
}

//! Effect conditions.
//!
//! An ability entry may carry a `condition` that must hold when it is
//! executed. Conditions are evaluated from the point of view of the
//! entry's controller.

use serde::{Deserialize, Serialize};

use crate::cards::CardCatalog;
use crate::core::{GameState, Seat};

/// A condition checked before an entry executes.
///
/// ```
/// use duel_engine::triggers::Condition;
///
/// let json = r#"{"type": "all", "conditions": [
///     {"type": "life_points_at_most", "amount": 2000},
///     {"type": "opponent_controls_monster"}
/// ]}"#;
/// let condition: Condition = serde_json::from_str(json).unwrap();
/// assert!(matches!(condition, Condition::All { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Controller's life points are at most `amount`.
    LifePointsAtMost { amount: i64 },

    /// Opponent controls at least one monster.
    OpponentControlsMonster,

    /// Controller controls no monsters.
    ControlsNoMonsters,

    /// Controller holds at least `count` cards in hand.
    HandSizeAtLeast { count: usize },

    /// Controller's graveyard holds at least `count` cards.
    GraveyardAtLeast { count: usize },

    /// Controller has a face-up monster of the archetype.
    ControlsArchetype { archetype: String },

    All { conditions: Vec<Condition> },

    Any { conditions: Vec<Condition> },

    Not { condition: Box<Condition> },
}

/// What a condition is evaluated against.
pub struct ConditionContext<'a> {
    pub state: &'a GameState,
    pub catalog: &'a CardCatalog,
    pub controller: Seat,
}

impl<'a> ConditionContext<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, catalog: &'a CardCatalog, controller: Seat) -> Self {
        Self {
            state,
            catalog,
            controller,
        }
    }
}

impl Condition {
    /// Whether the condition holds.
    #[must_use]
    pub fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let own = &ctx.state.seats[ctx.controller];
        let theirs = &ctx.state.seats[ctx.controller.other()];

        match self {
            Condition::LifePointsAtMost { amount } => own.life_points <= *amount,
            Condition::OpponentControlsMonster => !theirs.board.is_empty(),
            Condition::ControlsNoMonsters => own.board.is_empty(),
            Condition::HandSizeAtLeast { count } => own.hand.len() >= *count,
            Condition::GraveyardAtLeast { count } => own.graveyard.len() >= *count,
            Condition::ControlsArchetype { archetype } => own.face_up_monsters().any(|m| {
                ctx.catalog
                    .get(m.card_id)
                    .and_then(|def| def.archetype.as_deref())
                    == Some(archetype.as_str())
            }),
            Condition::All { conditions } => conditions.iter().all(|c| c.evaluate(ctx)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.evaluate(ctx)),
            Condition::Not { condition } => !condition.evaluate(ctx),
        }
    }
}

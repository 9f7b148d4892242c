//! Action kinds.
//!
//! Every player-facing duel action has a kind. The kind is what lingering
//! effects restrict ("cannot normal summon"), what available-action queries
//! report, and what card definitions name in `restrict` effects. The engine
//! itself dispatches on concrete entry points, not on kinds.

use serde::{Deserialize, Serialize};

/// The kind of a player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    NormalSummon,
    SetMonster,
    FlipSummon,
    ChangePosition,
    SetSpellTrap,
    ActivateSpell,
    ActivateTrap,
    ActivateMonsterEffect,
    DeclareAttack,
    AdvancePhase,
    EndTurn,
    PassPriority,
}

impl ActionKind {
    /// Kinds a lingering effect can restrict.
    ///
    /// Turn flow (advance, end turn, pass) is never restricted so a duel
    /// can always make progress.
    pub const GATEABLE: [ActionKind; 9] = [
        ActionKind::NormalSummon,
        ActionKind::SetMonster,
        ActionKind::FlipSummon,
        ActionKind::ChangePosition,
        ActionKind::SetSpellTrap,
        ActionKind::ActivateSpell,
        ActionKind::ActivateTrap,
        ActionKind::ActivateMonsterEffect,
        ActionKind::DeclareAttack,
    ];

    /// Whether lingering effects may restrict this kind.
    #[must_use]
    pub fn is_gateable(self) -> bool {
        Self::GATEABLE.contains(&self)
    }

    /// Human-readable label used in rejection reasons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::NormalSummon => "normal summon",
            ActionKind::SetMonster => "set monster",
            ActionKind::FlipSummon => "flip summon",
            ActionKind::ChangePosition => "change position",
            ActionKind::SetSpellTrap => "set spell/trap",
            ActionKind::ActivateSpell => "activate spell",
            ActionKind::ActivateTrap => "activate trap",
            ActionKind::ActivateMonsterEffect => "activate monster effect",
            ActionKind::DeclareAttack => "declare attack",
            ActionKind::AdvancePhase => "advance phase",
            ActionKind::EndTurn => "end turn",
            ActionKind::PassPriority => "pass priority",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_flow_not_gateable() {
        assert!(!ActionKind::AdvancePhase.is_gateable());
        assert!(!ActionKind::EndTurn.is_gateable());
        assert!(!ActionKind::PassPriority.is_gateable());
        assert!(ActionKind::NormalSummon.is_gateable());
        assert!(ActionKind::DeclareAttack.is_gateable());
    }

    #[test]
    fn test_json_names() {
        let json = serde_json::to_string(&ActionKind::ActivateMonsterEffect).unwrap();
        assert_eq!(json, "\"activate_monster_effect\"");

        let kind: ActionKind = serde_json::from_str("\"normal_summon\"").unwrap();
        assert_eq!(kind, ActionKind::NormalSummon);
    }

    #[test]
    fn test_display() {
        assert_eq!(ActionKind::FlipSummon.to_string(), "flip summon");
    }
}

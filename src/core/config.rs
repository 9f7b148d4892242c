//! Duel configuration.
//!
//! The numbers that shape a duel (starting life, zone sizes, chain cap)
//! live here rather than being scattered as literals through the rules.
//! Build one with the builder methods or deserialize it from JSON; any
//! field missing from the JSON keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Configuration for a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Life points each seat starts with.
    pub starting_life_points: i64,

    /// Cards drawn into each hand when the duel is set up.
    pub opening_hand_size: usize,

    /// Maximum monsters on a seat's board.
    pub max_monster_zones: usize,

    /// Maximum cards in a seat's spell/trap zone (field slot excluded).
    pub max_spell_trap_zones: usize,

    /// Maximum links in a chain.
    pub max_chain_links: usize,

    /// Level at which a monster starts needing tributes.
    pub tribute_level_threshold: u8,

    /// Tributes needed when a card at or above the threshold does not state
    /// its own requirement.
    pub default_tributes_required: u8,

    /// Whether the player going first skips the draw on turn 1.
    pub skip_first_turn_draw: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            starting_life_points: 8000,
            opening_hand_size: 5,
            max_monster_zones: 5,
            max_spell_trap_zones: 5,
            max_chain_links: 12,
            tribute_level_threshold: 7,
            default_tributes_required: 2,
            skip_first_turn_draw: true,
        }
    }
}

impl DuelConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: DuelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the rules cannot run with.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.starting_life_points <= 0 {
            return Err(LoadError::InvalidConfig(
                "starting_life_points must be positive".to_string(),
            ));
        }
        if self.max_monster_zones == 0 || self.max_spell_trap_zones == 0 {
            return Err(LoadError::InvalidConfig("zone limits must be at least 1".to_string()));
        }
        if self.max_chain_links == 0 {
            return Err(LoadError::InvalidConfig("max_chain_links must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Set starting life points.
    #[must_use]
    pub fn with_starting_life_points(mut self, life: i64) -> Self {
        self.starting_life_points = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the chain cap.
    #[must_use]
    pub fn with_max_chain_links(mut self, max: usize) -> Self {
        self.max_chain_links = max;
        self
    }

    /// Set whether the first player skips their first draw.
    #[must_use]
    pub fn with_skip_first_turn_draw(mut self, skip: bool) -> Self {
        self.skip_first_turn_draw = skip;
        self
    }
}

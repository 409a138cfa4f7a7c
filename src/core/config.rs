//! Rule constants.
//!
//! `RulesConfig` holds the tunable numbers of the rules. `Default` is the
//! published game; hosts may load a variant from any serde format and
//! check it with `validate()`.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::error::SetupError;

/// Tunable rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Total starting cash, split evenly (rounded up) between the players.
    pub starting_cash_pool: i64,

    /// Smallest supported table.
    pub min_players: usize,

    /// Largest supported table.
    pub max_players: usize,

    /// Track segments a single build action may place.
    pub builds_per_action: u8,

    /// Price a company pays per resource cube taken.
    pub resource_cube_cost: i64,

    /// Revenue gained per cube when the company has no port connection.
    pub resource_revenue: i64,

    /// Revenue gained per cube once the company reaches a port.
    pub port_resource_revenue: i64,

    /// Revenue of any narrow gauge segment, regardless of terrain.
    pub narrow_gauge_revenue: i64,

    /// The bond condition is active at or below this many unissued bonds.
    pub bonds_end_threshold: usize,

    /// The resource condition is active at or below this many cubes.
    pub resources_end_threshold: usize,

    /// The track condition is active when at least this many charters
    /// have run out of equipment.
    pub charters_end_threshold: usize,

    /// Number of simultaneously active conditions that ends the game.
    pub conditions_to_end: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_cash_pool: 24,
            min_players: 2,
            max_players: 6,
            builds_per_action: 3,
            resource_cube_cost: 3,
            resource_revenue: 1,
            port_resource_revenue: 3,
            narrow_gauge_revenue: 3,
            bonds_end_threshold: 2,
            resources_end_threshold: 3,
            charters_end_threshold: 3,
            conditions_to_end: 2,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_starting_cash_pool(mut self, pool: i64) -> Self {
        self.starting_cash_pool = pool;
        self
    }

    #[must_use]
    pub fn with_builds_per_action(mut self, builds: u8) -> Self {
        self.builds_per_action = builds;
        self
    }

    #[must_use]
    pub fn with_player_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.min_players = *range.start();
        self.max_players = *range.end();
        self
    }

    /// Cash each player starts with.
    #[must_use]
    pub fn starting_cash(&self, player_count: usize) -> i64 {
        let players = player_count as i64;
        (self.starting_cash_pool + players - 1) / players
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.min_players < 2 || self.min_players > self.max_players || self.max_players > 255 {
            return Err(SetupError::InvalidConfig(format!(
                "player range {}..={} is not playable",
                self.min_players, self.max_players
            )));
        }
        if self.builds_per_action == 0 {
            return Err(SetupError::InvalidConfig(
                "builds_per_action must be at least 1".to_string(),
            ));
        }
        if self.starting_cash_pool < 0 || self.resource_cube_cost < 0 {
            return Err(SetupError::InvalidConfig(
                "cash amounts must not be negative".to_string(),
            ));
        }
        if self.conditions_to_end == 0 {
            return Err(SetupError::InvalidConfig(
                "conditions_to_end must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Check a table size against the supported range.
    pub fn check_player_count(&self, player_count: usize) -> Result<(), SetupError> {
        if (self.min_players..=self.max_players).contains(&player_count) {
            Ok(())
        } else {
            Err(SetupError::PlayerCount {
                requested: player_count,
                min: self.min_players,
                max: self.max_players,
            })
        }
    }
}

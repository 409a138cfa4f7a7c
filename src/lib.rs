//! # emu-bay
//!
//! Rules engine for the Emu Bay Railway Company board game.
//!
//! ## Design Principles
//!
//! 1. **Atomic Moves**: `RulesEngine::apply_move` either applies a move in
//!    full or rejects it and leaves the state untouched.
//!
//! 2. **N-Player First**: Every API takes the seat count from the state.
//!    Nothing assumes a particular table size within 2..=6.
//!
//! 3. **Deterministic**: All randomness happens at setup from a seed, so a
//!    seed plus the move history replays a match exactly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, which makes
//!   clone-apply-commit cheap.
//!
//! - **Tagged Phases**: The turn is a `Phase` enum; each stage carries only
//!   the data it needs.
//!
//! ## Modules
//!
//! - `core`: players, companies, moves, log, state, RNG, configuration
//! - `board`: map data, placed track, reachability
//! - `actions`: the action cube slots
//! - `economy`: building, resources, bonds, dividends
//! - `auction`: the bidding protocol
//! - `rules`: turn flow, mergers, end of game, the rules engine
//! - `setup`: seeded match setup

pub mod actions;
pub mod auction;
pub mod board;
pub mod core;
pub mod economy;
pub mod rules;
pub mod setup;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use crate::core::{
    Bond, Company, CompanyId, CompanyKind,
    PlayerId, PlayerMap,
    GameRng, RulesConfig,
    Move, MoveRecord, LogEvent,
    GameState, Phase, Stage, TurnContext, AuctionState,
    EndGameReason, GameOutcome, Score,
    MoveRejected, ReplayError, SetupError,
};

pub use crate::board::{Board, BuildMode, Coord, Track};

pub use crate::actions::{ActionCubes, ActionKind};

pub use crate::rules::{replay, EmuBay, EmuBayBuilder, RulesEngine};

pub use crate::setup::{setup, setup_with_rules};

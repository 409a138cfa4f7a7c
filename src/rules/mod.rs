//! Turn structure and the rules engine.
//!
//! `engine` is the entry point: `RulesEngine` lists legal moves and
//! applies them atomically. The other modules hold the rules it
//! dispatches to:
//! - `turn`: phase and seat transitions
//! - `merger`: folding an independent into a major
//! - `stalemate`: whether the game can be called off
//! - `endgame`: trigger conditions and scoring
//! - `replay`: rebuilding a match from its history

pub mod endgame;
pub mod engine;
pub mod merger;
pub mod replay;
pub mod stalemate;
pub mod turn;

pub use endgame::{active_end_game_conditions, check_after_dividends, end_game, outcome};
pub use engine::{EmuBay, EmuBayBuilder, RulesEngine};
pub use merger::{merge, mergeable_companies, Mergeable};
pub use replay::replay;
pub use stalemate::{action_available, stalemate_available};

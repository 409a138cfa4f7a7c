//! Core types: identifiers, players, companies, state, moves, log, RNG,
//! configuration and errors.
//!
//! Everything the rules operate on lives here. The rules themselves are in
//! `rules`, `auction` and `economy`.

pub mod player;
pub mod company;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod log;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use company::{initial_bond_pool, major_starting_bonds, Bond, Company, CompanyId, CompanyKind};
pub use rng::GameRng;
pub use config::RulesConfig;
pub use error::{MoveRejected, ReplayError, SetupError};
pub use action::{Move, MoveRecord};
pub use log::LogEvent;
pub use state::{
    AuctionState, EndGameReason, GameOutcome, GameState, Phase, Player, Score, Stage, TurnContext,
};

//! Rejection and setup errors.

use thiserror::Error;

use crate::actions::ActionKind;
use crate::board::{BuildMode, Coord};

use super::company::CompanyId;
use super::player::PlayerId;

/// Why a move was refused. The state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("the game is over")]
    GameOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: PlayerId, actual: PlayerId },

    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("move not allowed in the {0} phase")]
    WrongPhase(&'static str),

    #[error("move not allowed in the {0} stage")]
    WrongStage(&'static str),

    #[error("no cube to remove from {0:?}")]
    NoCubeToRemove(ActionKind),

    #[error("must take a different action to the one the cube came from ({0:?})")]
    SameActionAsRemoved(ActionKind),

    #[error("no free action space for {0:?}")]
    NoFreeSlot(ActionKind),

    #[error("no action could follow removing a cube from {0:?}")]
    NoFollowUp(ActionKind),

    #[error("insufficient cash: need {needed}, have {available}")]
    InsufficientCash { needed: i64, available: i64 },

    #[error("{0} has no shares remaining")]
    NoSharesRemaining(CompanyId),

    #[error("{0} is not the next independent available")]
    IndependentNotAvailable(CompanyId),

    #[error("bid of {amount} is below the minimum of {minimum}")]
    BidTooLow { amount: i64, minimum: i64 },

    #[error("the player who started the auction must bid first")]
    InitiatorMustBid,

    #[error("{0} is not a legal {1:?} build space")]
    IllegalBuildSpace(Coord, BuildMode),

    #[error("{0} has no {1:?} equipment remaining")]
    NoEquipment(CompanyId, BuildMode),

    #[error("no builds remaining this action")]
    NoBuildsRemaining,

    #[error("nothing done yet, cannot finish")]
    NothingDoneYet,

    #[error("cannot take resources at {0}")]
    IllegalResourceSpace(Coord),

    #[error("{minor} cannot merge into {major}")]
    InvalidMerge { major: CompanyId, minor: CompanyId },

    #[error("no company with index {0}")]
    UnknownCompany(usize),

    #[error("no bond with index {0} in the pool")]
    UnknownBond(usize),

    #[error("{player} holds no share in {company}")]
    NotShareholder { player: PlayerId, company: CompanyId },

    #[error("{0} cannot take this action")]
    CompanyNotEligible(CompanyId),

    #[error("{0} has no legal target for this action")]
    NoLegalTarget(CompanyId),

    #[error("stalemate cannot be declared while moves remain")]
    StalemateUnavailable,

    #[error("unknown move {0:?}")]
    UnknownMove(String),

    #[error("bad arguments for {name}: {reason}")]
    BadArguments { name: String, reason: String },
}

/// Why a match could not be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{requested} players requested, supported range is {min}..={max}")]
    PlayerCount {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),
}

/// Why a recorded match could not be rebuilt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("recorded move {sequence} ({name}) was rejected: {source}")]
    Move {
        sequence: u32,
        name: &'static str,
        source: MoveRejected,
    },
}

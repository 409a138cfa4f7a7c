//! Moves: the only inputs that change a `GameState`.
//!
//! A host receives `(moveName, moveArgs)` from a client; `Move::parse`
//! turns that into a typed `Move`. Arguments are plain integers: company
//! and bond indices, coordinates as `x, y`, build mode as 0 (normal) or
//! 1 (narrow), action kinds by `ActionKind::index`.

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::board::{BuildMode, Coord};

use super::company::CompanyId;
use super::error::MoveRejected;
use super::player::PlayerId;

/// A player move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Pick a cube up from a slot of `action`.
    RemoveCube { action: ActionKind },
    /// End the game when nothing useful can be done.
    DeclareStalemate,
    /// Take BuildTrack for `company`.
    BuildTrackAction { company: CompanyId },
    /// Take TakeResources for `company`.
    TakeResourcesAction { company: CompanyId },
    /// Take AuctionShare and open an auction for `company`.
    AuctionShare { company: CompanyId },
    /// Take IssueBond: `company` issues the pool bond at `bond`.
    IssueBond { company: CompanyId, bond: usize },
    /// Take Merge: `minor` joins `major`.
    Merge { major: CompanyId, minor: CompanyId },
    /// Take PayDividend.
    PayDividends,
    /// Place one segment while building.
    BuildTrack { at: Coord, mode: BuildMode },
    DoneBuilding,
    /// Take one cube while taking resources.
    TakeResource { at: Coord },
    DoneTaking,
    Bid { amount: i64 },
    Pass,
}

impl Move {
    /// Wire name of the move.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Move::RemoveCube { .. } => "removeCube",
            Move::DeclareStalemate => "declareStalemate",
            Move::BuildTrackAction { .. } => "buildTrackAction",
            Move::TakeResourcesAction { .. } => "mineResource",
            Move::AuctionShare { .. } => "auctionShare",
            Move::IssueBond { .. } => "issueBond",
            Move::Merge { .. } => "merge",
            Move::PayDividends => "payDividends",
            Move::BuildTrack { .. } => "buildTrack",
            Move::DoneBuilding => "doneBuilding",
            Move::TakeResource { .. } => "takeResource",
            Move::DoneTaking => "doneTaking",
            Move::Bid { .. } => "makeBid",
            Move::Pass => "pass",
        }
    }

    /// The action kind a TakeAction-stage move places its cube on.
    #[must_use]
    pub fn action_kind(&self) -> Option<ActionKind> {
        match self {
            Move::BuildTrackAction { .. } => Some(ActionKind::BuildTrack),
            Move::TakeResourcesAction { .. } => Some(ActionKind::TakeResources),
            Move::AuctionShare { .. } => Some(ActionKind::AuctionShare),
            Move::IssueBond { .. } => Some(ActionKind::IssueBond),
            Move::Merge { .. } => Some(ActionKind::Merge),
            Move::PayDividends => Some(ActionKind::PayDividend),
            _ => None,
        }
    }

    /// Every company id the move names is in range.
    pub fn check_companies(&self) -> Result<(), MoveRejected> {
        match *self {
            Move::BuildTrackAction { company }
            | Move::TakeResourcesAction { company }
            | Move::AuctionShare { company }
            | Move::IssueBond { company, .. } => check_id(company),
            Move::Merge { major, minor } => {
                check_id(major)?;
                check_id(minor)
            }
            _ => Ok(()),
        }
    }

    /// Build a move from its wire name and integer arguments.
    ///
    /// ```
    /// use emu_bay::core::{CompanyId, Move};
    ///
    /// let mv = Move::parse("merge", &[0, 3]).unwrap();
    /// assert_eq!(mv, Move::Merge { major: CompanyId::EB, minor: CompanyId::GT });
    /// assert!(Move::parse("merge", &[0]).is_err());
    /// ```
    pub fn parse(name: &str, args: &[i64]) -> Result<Move, MoveRejected> {
        let arity = |n: usize| -> Result<(), MoveRejected> {
            if args.len() == n {
                Ok(())
            } else {
                Err(bad(name, format!("expected {n} arguments, got {}", args.len())))
            }
        };
        let index = |i: usize| -> Result<usize, MoveRejected> {
            usize::try_from(args[i]).map_err(|_| bad(name, format!("argument {i} is negative")))
        };
        let company = |i: usize| -> Result<CompanyId, MoveRejected> { CompanyId::from_index(index(i)?) };
        let coord = |i: usize| -> Result<Coord, MoveRejected> {
            let x = i32::try_from(args[i]).map_err(|_| bad(name, "x out of range".to_string()))?;
            let y = i32::try_from(args[i + 1]).map_err(|_| bad(name, "y out of range".to_string()))?;
            Ok(Coord::new(x, y))
        };

        let mv = match name {
            "removeCube" => {
                arity(1)?;
                let action = ActionKind::from_index(index(0)?)
                    .ok_or_else(|| bad(name, format!("no action kind {}", args[0])))?;
                Move::RemoveCube { action }
            }
            "declareStalemate" => {
                arity(0)?;
                Move::DeclareStalemate
            }
            "buildTrackAction" => {
                arity(1)?;
                Move::BuildTrackAction { company: company(0)? }
            }
            "mineResource" => {
                arity(1)?;
                Move::TakeResourcesAction { company: company(0)? }
            }
            "auctionShare" => {
                arity(1)?;
                Move::AuctionShare { company: company(0)? }
            }
            "issueBond" => {
                arity(2)?;
                Move::IssueBond {
                    company: company(0)?,
                    bond: index(1)?,
                }
            }
            "merge" => {
                arity(2)?;
                Move::Merge {
                    major: company(0)?,
                    minor: company(1)?,
                }
            }
            "payDividends" => {
                arity(0)?;
                Move::PayDividends
            }
            "buildTrack" => {
                arity(3)?;
                let mode = match args[2] {
                    0 => BuildMode::Normal,
                    1 => BuildMode::Narrow,
                    other => return Err(bad(name, format!("no build mode {other}"))),
                };
                Move::BuildTrack { at: coord(0)?, mode }
            }
            "doneBuilding" => {
                arity(0)?;
                Move::DoneBuilding
            }
            "takeResource" => {
                arity(2)?;
                Move::TakeResource { at: coord(0)? }
            }
            "doneTaking" => {
                arity(0)?;
                Move::DoneTaking
            }
            "makeBid" => {
                arity(1)?;
                Move::Bid { amount: args[0] }
            }
            "pass" => {
                arity(0)?;
                Move::Pass
            }
            other => return Err(MoveRejected::UnknownMove(other.to_string())),
        };
        Ok(mv)
    }
}

fn bad(name: &str, reason: String) -> MoveRejected {
    MoveRejected::BadArguments {
        name: name.to_string(),
        reason,
    }
}

/// An accepted move, as kept in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub mv: Move,
    /// Position in the history, starting at 0.
    pub sequence: u32,
}

fn check_id(id: CompanyId) -> Result<(), MoveRejected> {
    CompanyId::from_index(id.index()).map(|_| ())
}

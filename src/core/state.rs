//! Game state: the single aggregate a match mutates.
//!
//! ## Phases
//!
//! `Phase` is a tagged union: each variant carries exactly the data valid
//! while it is active. Auction bookkeeping lives only inside the auction
//! phases; the acting company and remaining builds live only inside the
//! `BuildingTrack` stage.
//!
//! ## Cloning
//!
//! Growing collections (track, cubes, companies, log, history) are `im`
//! persistent vectors, so taking a working copy before applying a move is
//! cheap. Move application commits the copy only on success.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionCubes, ActionKind};
use crate::board::{Board, Coord};

use super::action::MoveRecord;
use super::company::{Bond, Company, CompanyId};
use super::config::RulesConfig;
use super::log::LogEvent;
use super::player::{PlayerId, PlayerMap};

/// A seat's private holdings. Shares are recorded on the companies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub cash: i64,
}

/// Live bidding on one company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    pub company: CompanyId,
    /// 0 until the first bid.
    pub current_bid: i64,
    pub high_bidder: Option<PlayerId>,
    pub passed: PlayerMap<bool>,
    /// Opened the auction (share auction) or opened bidding on this
    /// company (initial auction).
    pub initiator: PlayerId,
    /// Takes the share for nothing if everyone passes without a bid.
    pub default_winner: PlayerId,
}

impl AuctionState {
    #[must_use]
    pub fn new(company: CompanyId, initiator: PlayerId, player_count: usize) -> Self {
        Self {
            company,
            current_bid: 0,
            high_bidder: None,
            passed: PlayerMap::with_value(player_count, false),
            initiator,
            default_winner: initiator,
        }
    }

    /// Players still in the bidding.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.passed.count(|p| !*p)
    }

    /// First non-passed seat after `from` in play order.
    #[must_use]
    pub fn next_bidder(&self, from: PlayerId) -> Option<PlayerId> {
        let n = self.passed.player_count();
        let mut seat = from;
        for _ in 0..n {
            seat = seat.next(n);
            if !self.passed[seat] {
                return Some(seat);
            }
        }
        None
    }
}

/// Sub-stage of normal play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Pick a cube up.
    RemoveCube,
    /// Put it down; `vacated` is off limits.
    TakeAction { vacated: ActionKind },
    BuildingTrack {
        company: CompanyId,
        builds_remaining: u8,
        any_built: bool,
    },
    /// Once the first cube is taken, later takes must come from
    /// `mine_location`.
    TakeResources {
        company: CompanyId,
        mine_location: Option<Coord>,
        any_taken: bool,
    },
}

impl Stage {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::RemoveCube => "RemoveCube",
            Stage::TakeAction { .. } => "TakeAction",
            Stage::BuildingTrack { .. } => "BuildingTrack",
            Stage::TakeResources { .. } => "TakeResources",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Opening auction of LW, TMLC, EB and GT in turn.
    InitialAuction(AuctionState),
    NormalPlay(Stage),
    /// Share auction started by an AuctionShare action.
    Auction(AuctionState),
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::InitialAuction(_) => "InitialAuction",
            Phase::NormalPlay(_) => "NormalPlay",
            Phase::Auction(_) => "Auction",
        }
    }

    #[must_use]
    pub fn auction(&self) -> Option<&AuctionState> {
        match self {
            Phase::InitialAuction(a) | Phase::Auction(a) => Some(a),
            Phase::NormalPlay(_) => None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Option<&Stage> {
        match self {
            Phase::NormalPlay(stage) => Some(stage),
            _ => None,
        }
    }
}

/// Whose turn it is and where in the turn structure play stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    pub phase: Phase,
    pub current_player: PlayerId,
    pub first_player_of_phase: PlayerId,
    /// Where normal play resumes once the current multi-step action or
    /// share auction finishes.
    pub player_after_phase: Option<PlayerId>,
}

/// A trigger that ended the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EndGameReason {
    Stalemate,
    Bankruptcy,
    /// Every company sold out.
    Shares,
    /// Bond pool nearly exhausted.
    Bonds,
    /// Enough charters out of track.
    Track,
    /// Resource cubes nearly exhausted.
    Resource,
}

impl EndGameReason {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EndGameReason::Stalemate => "stalemate",
            EndGameReason::Bankruptcy => "bankruptcy",
            EndGameReason::Shares => "shares",
            EndGameReason::Bonds => "bonds",
            EndGameReason::Track => "track",
            EndGameReason::Resource => "resources",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: PlayerId,
    pub cash: i64,
}

/// Final result, present once the game has ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub reasons: Vec<EndGameReason>,
    /// Highest cash first; ties keep seat order.
    pub scores: Vec<Score>,
    /// Empty when everyone finished in debt.
    pub winners: Vec<PlayerId>,
}

impl GameOutcome {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }
}

/// Complete, authoritative match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub rules: RulesConfig,
    pub players: PlayerMap<Player>,
    /// Indexed by `CompanyId`.
    pub companies: Vector<Company>,
    pub action_cubes: ActionCubes,
    pub board: Board,
    /// Unissued bonds.
    pub bonds: Vec<Bond>,
    /// Independents not yet opened; only the head may be auctioned.
    pub independent_order: Vec<CompanyId>,
    pub turn: TurnContext,
    pub log: Vector<LogEvent>,
    pub history: Vector<MoveRecord>,
    pub outcome: Option<GameOutcome>,
}

impl GameState {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn company(&self, id: CompanyId) -> &Company {
        &self.companies[id.index()]
    }

    pub fn company_mut(&mut self, id: CompanyId) -> &mut Company {
        &mut self.companies[id.index()]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Companies in which `player` holds at least one share.
    pub fn companies_held_by(&self, player: PlayerId) -> impl Iterator<Item = CompanyId> + '_ {
        self.companies
            .iter()
            .filter(move |c| c.is_shareholder(player))
            .map(|c| c.id)
    }

    /// Next in line for an in-game share auction, if any independent is
    /// still unopened.
    #[must_use]
    pub fn next_independent(&self) -> Option<CompanyId> {
        self.independent_order.first().copied()
    }

    pub fn push_log(&mut self, event: LogEvent) {
        self.log.push_back(event);
    }

    /// Lossless binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_state;

    #[test]
    fn test_next_bidder_skips_passed() {
        let mut auction = AuctionState::new(CompanyId::LW, PlayerId::new(0), 4);
        auction.passed[PlayerId::new(1)] = true;
        auction.passed[PlayerId::new(2)] = true;

        assert_eq!(auction.remaining(), 2);
        assert_eq!(auction.next_bidder(PlayerId::new(0)), Some(PlayerId::new(3)));
        assert_eq!(auction.next_bidder(PlayerId::new(3)), Some(PlayerId::new(0)));

        auction.passed[PlayerId::new(0)] = true;
        auction.passed[PlayerId::new(3)] = true;
        assert_eq!(auction.next_bidder(PlayerId::new(0)), None);
    }

    #[test]
    fn test_phase_accessors() {
        let phase = Phase::NormalPlay(Stage::RemoveCube);
        assert_eq!(phase.name(), "NormalPlay");
        assert!(phase.auction().is_none());
        assert_eq!(phase.stage(), Some(&Stage::RemoveCube));
    }

    #[test]
    fn test_companies_held_by() {
        let state = fixed_state(4);
        let held: Vec<_> = state.companies_held_by(PlayerId::new(0)).collect();
        assert!(!held.is_empty());
        for company in held {
            assert!(state.company(company).is_shareholder(PlayerId::new(0)));
        }
    }

    #[test]
    fn test_bytes_round_trip() {
        let state = fixed_state(3);
        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_clone_is_independent() {
        let state = fixed_state(4);
        let mut copy = state.clone();
        copy.company_mut(CompanyId::EB).cash += 100;
        copy.players[PlayerId::new(0)].cash = -1;

        assert_ne!(state.company(CompanyId::EB).cash, copy.company(CompanyId::EB).cash);
        assert_ne!(state.players[PlayerId::new(0)].cash, -1);
    }
}

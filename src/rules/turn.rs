//! Phase transitions and turn order.
//!
//! ```text
//! InitialAuction ──► NormalPlay ◄──► Auction
//!
//! NormalPlay: RemoveCube ─► TakeAction ─► BuildingTrack ─┐
//!                  ▲                  ├─► TakeResources ─┤
//!                  │                  └─► (immediate) ───┤
//!                  └─────────────────────────────────────┘
//! ```
//!
//! The first turn of a phase goes to a phase-chosen player: a random seat
//! for the initial auction, the designated player for normal play, the
//! initiator for a share auction. After that the generic rules apply:
//! multi-step actions keep the same player, auctions skip players who have
//! passed, and everything else moves one seat to the left.

use tracing::info;

use crate::auction::{settle, AuctionStep, INITIAL_AUCTION_ORDER};
use crate::core::{AuctionState, CompanyId, GameState, LogEvent, Phase, PlayerId, Stage, TurnContext};

fn start_phase(state: &mut GameState, phase: Phase, first: PlayerId) {
    info!(phase = phase.name(), first = %first, "phase starting");
    state.turn = TurnContext {
        phase,
        current_player: first,
        first_player_of_phase: first,
        player_after_phase: state.turn.player_after_phase,
    };
}

/// Open the initial auction with LW, `first` to bid. Seat 0 takes LW if
/// nobody bids.
pub fn start_initial_auction(state: &mut GameState, first: PlayerId) {
    let company = INITIAL_AUCTION_ORDER[0];
    let auction = AuctionState {
        default_winner: PlayerId::new(0),
        ..AuctionState::new(company, first, state.player_count())
    };
    start_phase(state, Phase::InitialAuction(auction), first);

    state.push_log(LogEvent::InitialAuctionStarting);
    state.push_log(LogEvent::FirstPlayer { player: first });
    state.push_log(LogEvent::CompanyForAuction { company });
}

/// Begin (or resume) normal play at the RemoveCube stage.
pub fn start_normal_play(state: &mut GameState, first: PlayerId) {
    start_phase(state, Phase::NormalPlay(Stage::RemoveCube), first);
}

/// Open a share auction for `company`; `initiator` bids first and play
/// resumes with the seat after them.
pub fn start_share_auction(state: &mut GameState, initiator: PlayerId, company: CompanyId) {
    let n = state.player_count();
    state.turn.player_after_phase = Some(initiator.next(n));
    start_phase(state, Phase::Auction(AuctionState::new(company, initiator, n)), initiator);
}

/// Start a multi-step action. The same player keeps acting until done.
pub fn start_multi_step(state: &mut GameState, stage: Stage) {
    let n = state.player_count();
    state.turn.player_after_phase = Some(state.turn.current_player.next(n));
    state.turn.phase = Phase::NormalPlay(stage);
}

/// Move to the RemoveCube stage of the next seat.
pub fn end_turn(state: &mut GameState) {
    let n = state.player_count();
    state.turn.phase = Phase::NormalPlay(Stage::RemoveCube);
    state.turn.current_player = state.turn.current_player.next(n);
}

/// Close a multi-step action and hand play on.
pub fn finish_multi_step(state: &mut GameState) {
    let n = state.player_count();
    let next = state
        .turn
        .player_after_phase
        .unwrap_or_else(|| state.turn.current_player.next(n));
    start_normal_play(state, next);
}

/// Apply the result of a bid or pass.
pub fn advance_auction(state: &mut GameState, step: AuctionStep) {
    let (winner, price) = match step {
        AuctionStep::Next(player) => {
            state.turn.current_player = player;
            return;
        }
        AuctionStep::Won { winner, price } => (winner, price),
    };

    let (company, initial) = match &state.turn.phase {
        Phase::InitialAuction(a) => (a.company, true),
        Phase::Auction(a) => (a.company, false),
        Phase::NormalPlay(stage) => unreachable!("auction step during normal play ({})", stage.name()),
    };
    settle(state, company, winner, price);

    if initial {
        let position = INITIAL_AUCTION_ORDER.iter().position(|&c| c == company);
        match position.and_then(|p| INITIAL_AUCTION_ORDER.get(p + 1)) {
            Some(&next) => {
                // The winner opens bidding on the next company, and keeps
                // it if nobody bids.
                let auction = AuctionState::new(next, winner, state.player_count());
                state.turn.phase = Phase::InitialAuction(auction);
                state.turn.current_player = winner;
                state.push_log(LogEvent::CompanyForAuction { company: next });
            }
            None => {
                let first = state.company(CompanyId::GT).shares_held.first().copied().unwrap_or(winner);
                state.turn.player_after_phase = Some(first);
                start_normal_play(state, first);
            }
        }
        return;
    }

    let co = state.company_mut(company);
    co.open = true;
    if !co.is_major() {
        state.independent_order.retain(|&c| c != company);
    }
    let n = state.player_count();
    let next = state.turn.player_after_phase.unwrap_or_else(|| winner.next(n));
    start_normal_play(state, next);
}

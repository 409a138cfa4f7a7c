//! Bidding state machine.

use tracing::{debug, info};

use crate::core::{AuctionState, CompanyId, GameState, LogEvent, MoveRejected, Phase, PlayerId};

/// Companies sold by the initial auction, in order.
pub const INITIAL_AUCTION_ORDER: [CompanyId; 4] = [CompanyId::LW, CompanyId::TMLC, CompanyId::EB, CompanyId::GT];

/// What happens after a bid or pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStep {
    /// Bidding continues with this player.
    Next(PlayerId),
    /// The share is sold.
    Won { winner: PlayerId, price: i64 },
}

/// Lowest opening bid for a share of `company`: its revenue split across
/// one more share than it has sold, rounded up, and never below 1.
#[must_use]
pub fn minimum_bid(state: &GameState, company: CompanyId) -> i64 {
    let co = state.company(company);
    let shares = co.shares_held.len() as i64 + 1;
    let split = -(-co.current_revenue).div_euclid(shares);
    split.max(1)
}

/// Whether `player` may open a share auction for `company`.
pub fn check_auctionable(state: &GameState, player: PlayerId, company: CompanyId) -> Result<(), MoveRejected> {
    let co = state.company(company);
    if co.shares_remaining == 0 {
        return Err(MoveRejected::NoSharesRemaining(company));
    }
    if !co.is_major() && state.next_independent() != Some(company) {
        return Err(MoveRejected::IndependentNotAvailable(company));
    }
    let needed = minimum_bid(state, company);
    let available = state.players[player].cash;
    if needed > available {
        return Err(MoveRejected::InsufficientCash { needed, available });
    }
    Ok(())
}

/// Companies `player` could open a share auction for.
#[must_use]
pub fn auctionable_companies(state: &GameState, player: PlayerId) -> Vec<CompanyId> {
    CompanyId::all()
        .filter(|&c| check_auctionable(state, player, c).is_ok())
        .collect()
}

fn auction_mut(state: &mut GameState) -> Result<&mut AuctionState, MoveRejected> {
    match &mut state.turn.phase {
        Phase::InitialAuction(auction) | Phase::Auction(auction) => Ok(auction),
        Phase::NormalPlay(_) => Err(MoveRejected::WrongPhase("NormalPlay")),
    }
}

/// `player` raises to `amount`.
///
/// The bid must reach the minimum bid, beat the current bid and be
/// affordable. If everyone else has already passed it wins outright.
pub fn bid(state: &mut GameState, player: PlayerId, amount: i64) -> Result<AuctionStep, MoveRejected> {
    let cash = state.players[player].cash;
    let company = state
        .turn
        .phase
        .auction()
        .map(|a| a.company)
        .ok_or(MoveRejected::WrongPhase(state.turn.phase.name()))?;
    let floor = minimum_bid(state, company);

    let auction = auction_mut(state)?;
    let minimum = floor.max(auction.current_bid + 1);
    if amount < minimum {
        return Err(MoveRejected::BidTooLow { amount, minimum });
    }
    if amount > cash {
        return Err(MoveRejected::InsufficientCash {
            needed: amount,
            available: cash,
        });
    }

    auction.current_bid = amount;
    auction.high_bidder = Some(player);
    let step = if auction.remaining() == 1 {
        AuctionStep::Won {
            winner: player,
            price: amount,
        }
    } else {
        // Someone other than the bidder is still in.
        AuctionStep::Next(auction.next_bidder(player).unwrap_or(player))
    };

    debug!(%player, company = %company, amount, "bid");
    state.push_log(LogEvent::BidMade { player, company, amount });
    Ok(step)
}

/// `player` drops out of this auction.
///
/// The player who opened a share auction must make the first bid. The
/// auction is decided once at most one bidder remains and either a bid
/// stands or nobody is left; with nobody left and no bid, the auction's
/// `default_winner` takes the share for nothing.
pub fn pass(state: &mut GameState, player: PlayerId) -> Result<AuctionStep, MoveRejected> {
    let share_auction = matches!(state.turn.phase, Phase::Auction(_));
    let auction = auction_mut(state)?;
    if share_auction && auction.current_bid == 0 && auction.initiator == player {
        return Err(MoveRejected::InitiatorMustBid);
    }

    auction.passed[player] = true;
    let company = auction.company;
    let remaining = auction.remaining();
    let decided = remaining <= 1 && (auction.current_bid != 0 || remaining == 0);

    let step = match (decided, auction.next_bidder(player)) {
        (true, _) | (false, None) => AuctionStep::Won {
            winner: auction.high_bidder.unwrap_or(auction.default_winner),
            price: auction.current_bid,
        },
        (false, Some(next)) => AuctionStep::Next(next),
    };

    debug!(%player, company = %company, "pass");
    state.push_log(LogEvent::Passed { player, company });
    Ok(step)
}

/// Hand the share to `winner` for `price`. The money goes to the company.
pub fn settle(state: &mut GameState, company: CompanyId, winner: PlayerId, price: i64) {
    state.players[winner].cash -= price;
    let co = state.company_mut(company);
    co.cash += price;
    co.shares_held.push(winner);
    co.shares_remaining -= 1;

    info!(company = %company, %winner, price, "auction won");
    state.push_log(LogEvent::AuctionWon {
        company,
        player: winner,
        price,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Stage;
    use crate::test_support::fixed_state;

    fn share_auction(state: &mut GameState, company: CompanyId, initiator: PlayerId) {
        state.turn.phase = Phase::Auction(AuctionState::new(company, initiator, state.player_count()));
        state.turn.current_player = initiator;
    }

    #[test]
    fn test_minimum_bid() {
        let mut state = fixed_state(4);
        let tmlc = state.company_mut(CompanyId::TMLC);
        tmlc.shares_held.truncate(1);
        tmlc.current_revenue = 5;
        // ceil(5 / 2)
        assert_eq!(minimum_bid(&state, CompanyId::TMLC), 3);

        state.company_mut(CompanyId::TMLC).current_revenue = -4;
        assert_eq!(minimum_bid(&state, CompanyId::TMLC), 1);
    }

    #[test]
    fn test_bid_must_beat_current() {
        let mut state = fixed_state(4);
        share_auction(&mut state, CompanyId::TMLC, PlayerId::new(0));
        let floor = minimum_bid(&state, CompanyId::TMLC);

        assert_eq!(
            bid(&mut state, PlayerId::new(0), floor),
            Ok(AuctionStep::Next(PlayerId::new(1)))
        );
        assert_eq!(
            bid(&mut state, PlayerId::new(1), floor),
            Err(MoveRejected::BidTooLow {
                amount: floor,
                minimum: floor + 1
            })
        );
    }

    #[test]
    fn test_bid_over_cash_rejected() {
        let mut state = fixed_state(4);
        share_auction(&mut state, CompanyId::TMLC, PlayerId::new(0));
        let cash = state.players[PlayerId::new(0)].cash;
        assert_eq!(
            bid(&mut state, PlayerId::new(0), cash + 1),
            Err(MoveRejected::InsufficientCash {
                needed: cash + 1,
                available: cash
            })
        );
    }

    #[test]
    fn test_initiator_must_bid_first() {
        let mut state = fixed_state(4);
        share_auction(&mut state, CompanyId::TMLC, PlayerId::new(2));
        assert_eq!(pass(&mut state, PlayerId::new(2)), Err(MoveRejected::InitiatorMustBid));
    }

    #[test]
    fn test_last_bidder_standing_wins() {
        let mut state = fixed_state(4);
        share_auction(&mut state, CompanyId::TMLC, PlayerId::new(0));
        let floor = minimum_bid(&state, CompanyId::TMLC);

        bid(&mut state, PlayerId::new(0), floor).unwrap();
        assert_eq!(pass(&mut state, PlayerId::new(1)), Ok(AuctionStep::Next(PlayerId::new(2))));
        assert_eq!(pass(&mut state, PlayerId::new(2)), Ok(AuctionStep::Next(PlayerId::new(3))));
        assert_eq!(
            pass(&mut state, PlayerId::new(3)),
            Ok(AuctionStep::Won {
                winner: PlayerId::new(0),
                price: floor
            })
        );
    }

    #[test]
    fn test_everyone_passes_without_bid() {
        let mut state = fixed_state(3);
        state.turn.phase = Phase::InitialAuction(AuctionState::new(CompanyId::LW, PlayerId::new(1), 3));

        pass(&mut state, PlayerId::new(1)).unwrap();
        pass(&mut state, PlayerId::new(2)).unwrap();
        // The default winner, not the last to pass.
        assert_eq!(
            pass(&mut state, PlayerId::new(0)),
            Ok(AuctionStep::Won {
                winner: PlayerId::new(1),
                price: 0
            })
        );
    }

    #[test]
    fn test_everyone_passes_gives_share_to_default_winner() {
        let mut state = fixed_state(3);
        state.turn.phase = Phase::InitialAuction(AuctionState {
            default_winner: PlayerId::new(2),
            ..AuctionState::new(CompanyId::LW, PlayerId::new(0), 3)
        });

        pass(&mut state, PlayerId::new(0)).unwrap();
        pass(&mut state, PlayerId::new(1)).unwrap();
        assert_eq!(
            pass(&mut state, PlayerId::new(2)),
            Ok(AuctionStep::Won {
                winner: PlayerId::new(2),
                price: 0
            })
        );
    }

    #[test]
    fn test_bid_outside_auction_rejected() {
        let mut state = fixed_state(4);
        state.turn.phase = Phase::NormalPlay(Stage::RemoveCube);
        assert_eq!(
            bid(&mut state, PlayerId::new(0), 5),
            Err(MoveRejected::WrongPhase("NormalPlay"))
        );
    }

    #[test]
    fn test_settle_moves_cash_and_share() {
        let mut state = fixed_state(4);
        let p = PlayerId::new(3);
        let cash = state.players[p].cash;
        let co_before = state.company(CompanyId::TMLC).clone();

        settle(&mut state, CompanyId::TMLC, p, 4);

        let co = state.company(CompanyId::TMLC);
        assert_eq!(state.players[p].cash, cash - 4);
        assert_eq!(co.cash, co_before.cash + 4);
        assert_eq!(co.shares_remaining, co_before.shares_remaining - 1);
        assert_eq!(co.shares_of(p), co_before.shares_of(p) + 1);
    }

    #[test]
    fn test_independent_must_be_next_in_order() {
        let state = fixed_state(4);
        let p = PlayerId::new(0);
        assert_eq!(state.next_independent(), Some(CompanyId::MLM));
        assert_eq!(
            check_auctionable(&state, p, CompanyId::NED),
            Err(MoveRejected::IndependentNotAvailable(CompanyId::NED))
        );
        assert_eq!(
            check_auctionable(&state, p, CompanyId::GT),
            Err(MoveRejected::NoSharesRemaining(CompanyId::GT))
        );
    }
}

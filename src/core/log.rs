//! In-game event log.
//!
//! Each accepted move appends one or more `LogEvent`s to `GameState::log`.
//! Events are data: the engine never formats names. `encode` produces the
//! template a presentation layer resolves, with `%P<i>` for players, `%C<i>`
//! for companies and `%A<i>` for action kinds. System entries (not made by
//! a player) carry a leading `!`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::actions::ActionKind;
use crate::board::Coord;

use super::company::{Bond, CompanyId};
use super::player::PlayerId;
use super::state::EndGameReason;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    InitialAuctionStarting,
    FirstPlayer { player: PlayerId },
    CompanyForAuction { company: CompanyId },
    AuctionWon { company: CompanyId, player: PlayerId, price: i64 },
    CubeRemoved { player: PlayerId, action: ActionKind },
    StalemateDeclared { player: PlayerId },
    BuildStarted { player: PlayerId, company: CompanyId },
    TakeResourcesStarted { player: PlayerId, company: CompanyId },
    AuctionStarted { player: PlayerId, company: CompanyId },
    BondIssued { player: PlayerId, company: CompanyId, bond: Bond },
    Merged { player: PlayerId, major: CompanyId, minor: CompanyId },
    DividendsPaid { player: PlayerId },
    /// Per-share payout and the total each shareholder received.
    DividendPerShare {
        company: CompanyId,
        per_share: i64,
        payouts: SmallVec<[(PlayerId, i64); 6]>,
    },
    RevenueReduced { company: CompanyId, amount: i64 },
    TrackBuilt { player: PlayerId, company: CompanyId, at: Coord, cost: i64, revenue: i64 },
    ResourceTaken { player: PlayerId, company: CompanyId, at: Coord, cost: i64, revenue: i64 },
    BidMade { player: PlayerId, company: CompanyId, amount: i64 },
    Passed { player: PlayerId, company: CompanyId },
    GameEnded { reasons: Vec<EndGameReason> },
}

impl LogEvent {
    /// Entries produced by the rules rather than a player's choice.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(
            self,
            LogEvent::InitialAuctionStarting
                | LogEvent::FirstPlayer { .. }
                | LogEvent::CompanyForAuction { .. }
                | LogEvent::AuctionWon { .. }
                | LogEvent::DividendPerShare { .. }
                | LogEvent::RevenueReduced { .. }
                | LogEvent::GameEnded { .. }
        )
    }

    /// Template string with placeholders.
    ///
    /// ```
    /// use emu_bay::core::{CompanyId, LogEvent, PlayerId};
    ///
    /// let event = LogEvent::AuctionWon { company: CompanyId::LW, player: PlayerId::new(1), price: 4 };
    /// assert_eq!(event.encode(), "!%C2 won by %P1 for ₤4");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        let body = match self {
            LogEvent::InitialAuctionStarting => "Initial auction starting".to_string(),
            LogEvent::FirstPlayer { player } => format!("First player: %P{}", player.index()),
            LogEvent::CompanyForAuction { company } => format!("%C{} for auction", company.index()),
            LogEvent::AuctionWon { company, player, price } => {
                format!("%C{} won by %P{} for ₤{price}", company.index(), player.index())
            }
            LogEvent::CubeRemoved { player, action } => {
                format!("%P{} removes cube from %A{}", player.index(), action.index())
            }
            LogEvent::StalemateDeclared { player } => format!("%P{} declares stalemate", player.index()),
            LogEvent::BuildStarted { player, company } => {
                format!("%P{} starts building track for %C{}", player.index(), company.index())
            }
            LogEvent::TakeResourcesStarted { player, company } => {
                format!("%P{} starts taking resources for %C{}", player.index(), company.index())
            }
            LogEvent::AuctionStarted { player, company } => {
                format!("%P{} starts an auction for %C{}", player.index(), company.index())
            }
            LogEvent::BondIssued { player, company, bond } => format!(
                "%P{} issues a bond for %C{} for ₤{} (₤{}/₤{})",
                player.index(),
                company.index(),
                bond.amount,
                bond.base_interest,
                bond.interest_delta
            ),
            LogEvent::Merged { player, major, minor } => {
                format!("%P{} merges %C{} and %C{}", player.index(), major.index(), minor.index())
            }
            LogEvent::DividendsPaid { player } => format!("%P{} pays dividends", player.index()),
            LogEvent::DividendPerShare {
                company,
                per_share,
                payouts,
            } => {
                let paid: Vec<String> = payouts
                    .iter()
                    .map(|(p, amount)| format!("%P{}: ₤{amount}", p.index()))
                    .collect();
                format!("%C{} pays ₤{per_share} per share ({})", company.index(), paid.join(", "))
            }
            LogEvent::RevenueReduced { company, amount } => {
                format!("%C{} revenue reduced by ₤{amount}", company.index())
            }
            LogEvent::TrackBuilt {
                player,
                company,
                at,
                cost,
                revenue,
            } => format!(
                "%P{} builds track for %C{} at {at} costing ₤{cost} increasing revenue by ₤{revenue}",
                player.index(),
                company.index()
            ),
            LogEvent::ResourceTaken {
                player,
                company,
                at,
                cost,
                revenue,
            } => format!(
                "%P{} takes resources for %C{} at {at} costing ₤{cost} increasing revenue by ₤{revenue}",
                player.index(),
                company.index()
            ),
            LogEvent::BidMade { player, company, amount } => {
                format!("%P{} bids ₤{amount} for %C{}", player.index(), company.index())
            }
            LogEvent::Passed { player, company } => {
                format!("%P{} passes on %C{}", player.index(), company.index())
            }
            LogEvent::GameEnded { reasons } => {
                let names: Vec<&str> = reasons.iter().map(|r| r.name()).collect();
                format!("Game over: {}", names.join(", "))
            }
        };

        if self.is_system() {
            format!("!{body}")
        } else {
            body
        }
    }
}

//! Dividends and bond interest.
//!
//! Each open company splits its revenue across its sold shares. A positive
//! split rounds up and a negative one rounds down, so a company in debt
//! costs its shareholders at least as much as the exact share. Interest is
//! charged after the payout on every company, open or not: matured bonds
//! take `interest_delta`, and a bond still deferred takes its
//! `base_interest` once and matures. An independent nobody has bought yet
//! therefore starts life with its revenue already cut.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{CompanyId, GameState, LogEvent, PlayerId};

/// Payout per share for `revenue` split across `shares`.
///
/// ```
/// use emu_bay::economy::per_share_payout;
///
/// assert_eq!(per_share_payout(5, 2), 3);
/// assert_eq!(per_share_payout(-5, 2), -3);
/// assert_eq!(per_share_payout(4, 2), 2);
/// ```
#[must_use]
pub fn per_share_payout(revenue: i64, shares: usize) -> i64 {
    let shares = shares as i64;
    if revenue >= 0 {
        (revenue + shares - 1).div_euclid(shares)
    } else {
        revenue.div_euclid(shares)
    }
}

/// Pay every open company's dividend, then charge every company interest.
pub fn pay_dividends(state: &mut GameState) {
    for index in 0..state.companies.len() {
        let id = state.companies[index].id;
        pay_shareholders(state, id);
        charge_interest(state, id);
    }
}

fn pay_shareholders(state: &mut GameState, id: CompanyId) {
    let co = state.company(id);
    if !co.open || co.shares_held.is_empty() {
        return;
    }
    let per_share = per_share_payout(co.current_revenue, co.shares_held.len());

    let mut payouts: SmallVec<[(PlayerId, i64); 6]> = SmallVec::new();
    for player in state.players.player_ids() {
        let shares = co.shares_of(player) as i64;
        if shares > 0 {
            payouts.push((player, per_share * shares));
        }
    }
    for &(player, amount) in &payouts {
        state.players[player].cash += amount;
    }
    debug!(company = %id, per_share, "dividend paid");
    state.push_log(LogEvent::DividendPerShare {
        company: id,
        per_share,
        payouts,
    });
}

fn charge_interest(state: &mut GameState, id: CompanyId) {
    let co = state.company_mut(id);
    let mut reduction = 0;
    for bond in co.bonds.iter_mut() {
        if bond.deferred {
            reduction += bond.base_interest;
            bond.deferred = false;
        } else {
            reduction += bond.interest_delta;
        }
    }
    co.current_revenue -= reduction;
    if reduction > 0 {
        state.push_log(LogEvent::RevenueReduced {
            company: id,
            amount: reduction,
        });
    }
}

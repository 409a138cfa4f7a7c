//! Folding an independent into a major.
//!
//! The independent's share is exchanged for a share of the major, and its
//! books (bonds, cash, revenue, resources, narrow gauge) move across. The
//! independent closes for good; the major remembers it in
//! `independents_owned` and from then on runs over its narrow network.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::merge_connected;
use crate::core::{CompanyId, GameState, MoveRejected, PlayerId};

/// A legal major/minor pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mergeable {
    pub major: CompanyId,
    pub minor: CompanyId,
}

fn can_merge(state: &GameState, player: PlayerId, major: CompanyId, minor: CompanyId) -> bool {
    let (j, m) = (state.company(major), state.company(minor));
    j.is_major()
        && !m.is_major()
        && m.open
        && (j.is_shareholder(player) || m.is_shareholder(player))
        && (j.shares_remaining > 0 || j.reserved_shares_remaining > 0)
        && merge_connected(state, major, minor)
}

/// Every merger `player` could make now.
#[must_use]
pub fn mergeable_companies(state: &GameState, player: PlayerId) -> Vec<Mergeable> {
    CompanyId::majors()
        .flat_map(|major| CompanyId::minors().map(move |minor| Mergeable { major, minor }))
        .filter(|m| can_merge(state, player, m.major, m.minor))
        .collect()
}

/// Merge `minor` into `major` on `player`'s behalf.
pub fn merge(state: &mut GameState, player: PlayerId, major: CompanyId, minor: CompanyId) -> Result<(), MoveRejected> {
    if !can_merge(state, player, major, minor) {
        return Err(MoveRejected::InvalidMerge { major, minor });
    }

    let absorbed = {
        let m = state.company_mut(minor);
        let absorbed = m.clone();
        m.shares_held.clear();
        m.bonds.clear();
        m.cash = 0;
        m.current_revenue = 0;
        m.resources_held = 0;
        m.narrow_gauge_remaining = 0;
        m.open = false;
        absorbed
    };

    let j = state.company_mut(major);
    j.shares_held.extend(absorbed.shares_held.iter().copied());
    let used_ordinary = if j.reserved_shares_remaining > 0 {
        j.reserved_shares_remaining -= 1;
        false
    } else {
        j.shares_remaining -= 1;
        true
    };
    j.bonds.extend(absorbed.bonds.iter().copied());
    j.cash += absorbed.cash;
    j.current_revenue += absorbed.current_revenue;
    j.resources_held += absorbed.resources_held;
    j.narrow_gauge_remaining += absorbed.narrow_gauge_remaining;
    j.independents_owned.push(minor);

    // House rule: whenever an ordinary share goes, one of Emu Bay's
    // reserved shares becomes ordinary.
    if used_ordinary {
        let eb = state.company_mut(CompanyId::EB);
        if eb.reserved_shares_remaining > 0 {
            eb.reserved_shares_remaining -= 1;
            eb.shares_remaining += 1;
        }
    }

    info!(%player, major = %major, minor = %minor, "merged");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Track};
    use crate::test_support::fixed_state;

    /// GT home (4, 6) reaches EB broad gauge at (2, 5) over narrow (3, 6).
    fn connect_gt_to_eb(state: &mut GameState) {
        state.board.place(Track::narrow(Coord::new(3, 6)));
        state.board.place(Track::normal(Coord::new(2, 5), CompanyId::EB));
    }

    #[test]
    fn test_unconnected_merge_rejected() {
        let mut state = fixed_state(4);
        let player = state.company(CompanyId::GT).shares_held[0];
        assert!(mergeable_companies(&state, player).is_empty());
        assert_eq!(
            merge(&mut state, player, CompanyId::EB, CompanyId::GT),
            Err(MoveRejected::InvalidMerge {
                major: CompanyId::EB,
                minor: CompanyId::GT
            })
        );
    }

    #[test]
    fn test_merge_transfers_everything() {
        let mut state = fixed_state(4);
        connect_gt_to_eb(&mut state);
        let player = state.company(CompanyId::GT).shares_held[0];
        let gt = state.company(CompanyId::GT).clone();
        let eb = state.company(CompanyId::EB).clone();

        assert_eq!(
            mergeable_companies(&state, player),
            vec![Mergeable {
                major: CompanyId::EB,
                minor: CompanyId::GT
            }]
        );
        merge(&mut state, player, CompanyId::EB, CompanyId::GT).unwrap();

        let gt_after = state.company(CompanyId::GT);
        assert!(!gt_after.open);
        assert!(gt_after.shares_held.is_empty());
        assert!(gt_after.bonds.is_empty());

        let eb_after = state.company(CompanyId::EB);
        assert!(eb_after.independents_owned.contains(&CompanyId::GT));
        assert_eq!(eb_after.shares_held.len(), eb.shares_held.len() + 1);
        assert_eq!(eb_after.reserved_shares_remaining, eb.reserved_shares_remaining - 1);
        assert_eq!(eb_after.shares_remaining, eb.shares_remaining);
        assert_eq!(eb_after.cash, eb.cash + gt.cash);
        assert_eq!(eb_after.current_revenue, eb.current_revenue + gt.current_revenue);
        assert_eq!(eb_after.narrow_gauge_remaining, gt.narrow_gauge_remaining);
        assert_eq!(eb_after.bonds.len(), eb.bonds.len() + gt.bonds.len());
    }

    #[test]
    fn test_ordinary_share_converts_eb_reserve() {
        let mut state = fixed_state(4);
        state.board.place(Track::narrow(Coord::new(3, 6)));
        state.board.place(Track::normal(Coord::new(2, 5), CompanyId::LW));
        let player = state.company(CompanyId::GT).shares_held[0];
        let lw = state.company(CompanyId::LW).clone();
        let eb = state.company(CompanyId::EB).clone();

        merge(&mut state, player, CompanyId::LW, CompanyId::GT).unwrap();

        assert_eq!(state.company(CompanyId::LW).shares_remaining, lw.shares_remaining - 1);
        let eb_after = state.company(CompanyId::EB);
        assert_eq!(eb_after.reserved_shares_remaining, eb.reserved_shares_remaining - 1);
        assert_eq!(eb_after.shares_remaining, eb.shares_remaining + 1);
    }

    #[test]
    fn test_exhausted_eb_reserve_left_alone() {
        let mut state = fixed_state(4);
        state.board.place(Track::narrow(Coord::new(3, 6)));
        state.board.place(Track::normal(Coord::new(2, 5), CompanyId::LW));
        {
            let eb = state.company_mut(CompanyId::EB);
            eb.shares_remaining += eb.reserved_shares_remaining;
            eb.reserved_shares_remaining = 0;
        }
        let player = state.company(CompanyId::GT).shares_held[0];
        let lw = state.company(CompanyId::LW).clone();
        let eb = state.company(CompanyId::EB).clone();

        merge(&mut state, player, CompanyId::LW, CompanyId::GT).unwrap();

        assert_eq!(state.company(CompanyId::LW).shares_remaining, lw.shares_remaining - 1);
        let eb_after = state.company(CompanyId::EB);
        assert_eq!(eb_after.reserved_shares_remaining, 0);
        assert_eq!(eb_after.shares_remaining, eb.shares_remaining);
    }

    #[test]
    fn test_needs_a_share_in_either() {
        let mut state = fixed_state(4);
        connect_gt_to_eb(&mut state);
        let outsider = PlayerId::all(4).find(|&p| {
            !state.company(CompanyId::GT).is_shareholder(p) && !state.company(CompanyId::EB).is_shareholder(p)
        });
        if let Some(outsider) = outsider {
            assert!(mergeable_companies(&state, outsider).is_empty());
        }
    }

    #[test]
    fn test_major_without_shares_cannot_merge() {
        let mut state = fixed_state(4);
        connect_gt_to_eb(&mut state);
        let player = state.company(CompanyId::GT).shares_held[0];
        let eb = state.company_mut(CompanyId::EB);
        eb.shares_remaining = 0;
        eb.reserved_shares_remaining = 0;
        assert!(mergeable_companies(&state, player).is_empty());
    }
}

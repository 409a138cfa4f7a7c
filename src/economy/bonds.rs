//! Issuing bonds from the pool.

use crate::core::{Bond, CompanyId, GameState, MoveRejected, PlayerId};

/// Majors `player` may issue a bond for: open and held by the player.
#[must_use]
pub fn bond_companies(state: &GameState, player: PlayerId) -> Vec<CompanyId> {
    state
        .companies
        .iter()
        .filter(|c| c.is_major() && c.open && c.is_shareholder(player))
        .map(|c| c.id)
        .collect()
}

/// Move pool bond `index` onto `company`, crediting its amount.
pub fn issue_bond(
    state: &mut GameState,
    player: PlayerId,
    company: CompanyId,
    index: usize,
) -> Result<Bond, MoveRejected> {
    let co = state.company(company);
    if !co.is_shareholder(player) {
        return Err(MoveRejected::NotShareholder { player, company });
    }
    if !co.is_major() || !co.open {
        return Err(MoveRejected::CompanyNotEligible(company));
    }
    if index >= state.bonds.len() {
        return Err(MoveRejected::UnknownBond(index));
    }

    let bond = state.bonds.remove(index);
    let co = state.company_mut(company);
    co.cash += bond.amount;
    co.bonds.push(bond);
    Ok(bond)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_state;

    fn holder_of(state: &GameState, company: CompanyId) -> PlayerId {
        state.company(company).shares_held[0]
    }

    #[test]
    fn test_issue_bond_moves_it_from_pool() {
        let mut state = fixed_state(4);
        let player = holder_of(&state, CompanyId::TMLC);
        let pool_before = state.bonds.len();
        let cash_before = state.company(CompanyId::TMLC).cash;
        let expected = state.bonds[1];

        let bond = issue_bond(&mut state, player, CompanyId::TMLC, 1).unwrap();
        assert_eq!(bond, expected);
        assert!(bond.deferred);
        assert_eq!(state.bonds.len(), pool_before - 1);
        assert_eq!(state.company(CompanyId::TMLC).cash, cash_before + bond.amount);
        assert_eq!(state.company(CompanyId::TMLC).bonds.last(), Some(&expected));
    }

    #[test]
    fn test_issue_bond_requires_share() {
        let mut state = fixed_state(4);
        let outsider = PlayerId::all(4)
            .find(|&p| !state.company(CompanyId::EB).is_shareholder(p))
            .unwrap();
        assert_eq!(
            issue_bond(&mut state, outsider, CompanyId::EB, 0),
            Err(MoveRejected::NotShareholder {
                player: outsider,
                company: CompanyId::EB
            })
        );
    }

    #[test]
    fn test_issue_bond_rejects_minor_and_bad_index() {
        let mut state = fixed_state(4);
        let gt_holder = holder_of(&state, CompanyId::GT);
        assert_eq!(
            issue_bond(&mut state, gt_holder, CompanyId::GT, 0),
            Err(MoveRejected::CompanyNotEligible(CompanyId::GT))
        );

        let eb_holder = holder_of(&state, CompanyId::EB);
        assert_eq!(
            issue_bond(&mut state, eb_holder, CompanyId::EB, 99),
            Err(MoveRejected::UnknownBond(99))
        );
    }

    #[test]
    fn test_bond_companies() {
        let state = fixed_state(4);
        let player = holder_of(&state, CompanyId::LW);
        assert!(bond_companies(&state, player).contains(&CompanyId::LW));
        assert!(bond_companies(&state, player).iter().all(|c| c.is_major()));
    }
}

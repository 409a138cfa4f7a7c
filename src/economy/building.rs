//! Paying for track.

use tracing::trace;

use crate::board::{allowed_build_spaces, BuildMode, BuildableSpace, Coord, Track};
use crate::core::{CompanyId, GameState, MoveRejected};

/// Place one segment for `company`: pay the cost, add the revenue, use up
/// one piece of equipment.
pub fn build_track(
    state: &mut GameState,
    company: CompanyId,
    at: Coord,
    mode: BuildMode,
) -> Result<BuildableSpace, MoveRejected> {
    let co = state.company(company);
    let equipment = match mode {
        BuildMode::Normal => co.trains_remaining,
        BuildMode::Narrow => co.narrow_gauge_remaining,
    };
    if equipment == 0 {
        return Err(MoveRejected::NoEquipment(company, mode));
    }

    let space = allowed_build_spaces(state, mode, company)
        .into_iter()
        .find(|s| s.at == at)
        .ok_or(MoveRejected::IllegalBuildSpace(at, mode))?;

    let co = state.company_mut(company);
    co.cash -= space.cost;
    co.current_revenue += space.revenue;
    match mode {
        BuildMode::Normal => co.trains_remaining -= 1,
        BuildMode::Narrow => co.narrow_gauge_remaining -= 1,
    }

    let track = match mode {
        BuildMode::Normal => Track::normal(at, company),
        BuildMode::Narrow => Track::narrow(at),
    };
    state.board.place(track);

    trace!(company = %company, %at, ?mode, cost = space.cost, revenue = space.revenue, "track built");
    Ok(space)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixed_state;

    #[test]
    fn test_build_normal_track() {
        let mut state = fixed_state(4);
        let before = state.company(CompanyId::EB).clone();
        let target = allowed_build_spaces(&state, BuildMode::Normal, CompanyId::EB)[0];

        let built = build_track(&mut state, CompanyId::EB, target.at, BuildMode::Normal).unwrap();
        assert_eq!(built, target);

        let after = state.company(CompanyId::EB);
        assert_eq!(after.cash, before.cash - target.cost);
        assert_eq!(after.current_revenue, before.current_revenue + target.revenue);
        assert_eq!(after.trains_remaining, before.trains_remaining - 1);
        assert!(state.board.has_company_track_at(target.at, CompanyId::EB));
    }

    #[test]
    fn test_build_narrow_track_is_unowned() {
        let mut state = fixed_state(4);
        let target = allowed_build_spaces(&state, BuildMode::Narrow, CompanyId::GT)[0];

        build_track(&mut state, CompanyId::GT, target.at, BuildMode::Narrow).unwrap();
        assert!(state.board.has_narrow_at(target.at));
        assert!(state
            .board
            .track_at(target.at)
            .filter(|t| t.narrow)
            .all(|t| t.owner.is_none()));
        assert_eq!(state.company(CompanyId::GT).narrow_gauge_remaining, 1);
    }

    #[test]
    fn test_build_off_network_rejected() {
        let mut state = fixed_state(4);
        let far = Coord::new(7, 7);
        assert_eq!(
            build_track(&mut state, CompanyId::EB, far, BuildMode::Normal),
            Err(MoveRejected::IllegalBuildSpace(far, BuildMode::Normal))
        );
    }

    #[test]
    fn test_build_without_equipment_rejected() {
        let mut state = fixed_state(4);
        assert_eq!(
            build_track(&mut state, CompanyId::EB, Coord::new(3, 3), BuildMode::Narrow),
            Err(MoveRejected::NoEquipment(CompanyId::EB, BuildMode::Narrow))
        );
    }
}

//! Stalemate detection.
//!
//! The game can be called off when none of the action kinds a cube could
//! be placed on would give the current player anything to do.

use crate::actions::ActionKind;
use crate::auction::auctionable_companies;
use crate::board::{allowed_build_spaces, BuildMode};
use crate::core::{GameState, PlayerId};
use crate::economy::{bond_companies, take_resource_spaces};

use super::merger::mergeable_companies;

/// Whether `kind` has a legal follow-up for `player`.
#[must_use]
pub fn action_available(state: &GameState, player: PlayerId, kind: ActionKind) -> bool {
    match kind {
        ActionKind::AuctionShare => !auctionable_companies(state, player).is_empty(),
        ActionKind::BuildTrack => state.companies_held_by(player).any(|c| {
            state.company(c).equipment_remaining() > 0
                && [BuildMode::Normal, BuildMode::Narrow]
                    .into_iter()
                    .any(|mode| !allowed_build_spaces(state, mode, c).is_empty())
        }),
        ActionKind::IssueBond => !state.bonds.is_empty() && !bond_companies(state, player).is_empty(),
        ActionKind::Merge => !mergeable_companies(state, player).is_empty(),
        ActionKind::PayDividend => true,
        ActionKind::TakeResources => state
            .companies_held_by(player)
            .any(|c| !take_resource_spaces(state, c).is_empty()),
    }
}

/// True when no placeable action kind has a legal follow-up for the
/// current player.
#[must_use]
pub fn stalemate_available(state: &GameState) -> bool {
    let player = state.current_player();
    !state
        .action_cubes
        .placeable()
        .any(|kind| action_available(state, player, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionCubes, SLOT_ACTIONS};
    use crate::core::CompanyId;
    use crate::test_support::fixed_state;

    /// Only BuildTrack slots are empty; everything else is full.
    fn only_build_open() -> ActionCubes {
        let mut filled = [true; 11];
        for (slot, kind) in SLOT_ACTIONS.iter().enumerate() {
            if *kind == ActionKind::BuildTrack {
                filled[slot] = false;
            }
        }
        ActionCubes::from_slots(filled)
    }

    #[test]
    fn test_dividend_space_prevents_stalemate() {
        let state = fixed_state(4);
        assert!(state.action_cubes.has_space(ActionKind::BuildTrack));
        assert!(!stalemate_available(&state));
    }

    #[test]
    fn test_stalemate_flips_with_build_space() {
        let mut state = fixed_state(4);
        state.action_cubes = only_build_open();
        let player = state.current_player();
        for id in CompanyId::all() {
            state.company_mut(id).cash = 0;
        }
        assert!(stalemate_available(&state));

        let held = state.companies_held_by(player).next().unwrap();
        state.company_mut(held).cash = 20;
        assert!(state.company(held).equipment_remaining() > 0);
        assert!(!stalemate_available(&state));
    }

    #[test]
    fn test_every_slot_full_is_stalemate() {
        let mut state = fixed_state(4);
        state.action_cubes = ActionCubes::from_slots([true; 11]);
        assert!(stalemate_available(&state));
    }
}

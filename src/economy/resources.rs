//! Taking resource cubes off the board.

use tracing::trace;

use crate::board::{company_accessible_track, connected_to_port, Coord};
use crate::core::{CompanyId, GameState, MoveRejected, Phase, Stage};

/// Price of one cube.
#[must_use]
pub fn resource_cube_cost(state: &GameState) -> i64 {
    state.rules.resource_cube_cost
}

/// Revenue one more cube adds for `company`.
#[must_use]
pub fn resource_cube_revenue(state: &GameState, company: CompanyId) -> i64 {
    if connected_to_port(state, company) {
        state.rules.port_resource_revenue
    } else {
        state.rules.resource_revenue
    }
}

/// The mine already chosen for `company` this action, if any.
fn mine_location(state: &GameState, company: CompanyId) -> Option<Coord> {
    match &state.turn.phase {
        Phase::NormalPlay(Stage::TakeResources {
            company: acting,
            mine_location,
            ..
        }) if *acting == company => *mine_location,
        _ => None,
    }
}

/// Cells `company` may take a cube from right now.
///
/// Empty if the company cannot afford a cube. Within one TakeResources
/// action every cube must come from the first cell mined.
#[must_use]
pub fn take_resource_spaces(state: &GameState, company: CompanyId) -> Vec<Coord> {
    if state.company(company).cash < resource_cube_cost(state) {
        return Vec::new();
    }

    let candidates = match mine_location(state, company) {
        Some(at) => vec![at],
        None => company_accessible_track(state, company),
    };

    candidates
        .into_iter()
        .filter(|&at| state.board.cubes_at(at) > 0)
        .collect()
}

/// Take one cube at `at` for `company`. Returns `(cost, revenue)`.
pub fn take_resource(state: &mut GameState, company: CompanyId, at: Coord) -> Result<(i64, i64), MoveRejected> {
    if !take_resource_spaces(state, company).contains(&at) {
        return Err(MoveRejected::IllegalResourceSpace(at));
    }

    let cost = resource_cube_cost(state);
    let revenue = resource_cube_revenue(state, company);
    if !state.board.take_cube(at) {
        return Err(MoveRejected::IllegalResourceSpace(at));
    }

    let co = state.company_mut(company);
    co.cash -= cost;
    co.current_revenue += revenue;
    co.resources_held += 1;

    trace!(company = %company, %at, cost, revenue, "resource taken");
    Ok((cost, revenue))
}

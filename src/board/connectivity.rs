//! Reachability over placed track.
//!
//! Broad gauge belongs to one company. Narrow gauge is unowned: an
//! independent reaches whatever narrow network touches its home station,
//! and a major that absorbed independents reaches the networks of all of
//! their homes. These sets drive port revenue, resource taking, build
//! legality and merger legality.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{CompanyId, GameState};

use super::map::{cells, terrain, Coord, Terrain, TerrainKind};
use super::track::BuildMode;

/// A legal build target with its price and revenue gain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildableSpace {
    pub at: Coord,
    pub cost: i64,
    pub revenue: i64,
}

/// Home stations whose narrow network `company` may use.
///
/// An independent uses its own home; a major uses the homes of the
/// independents merged into it.
#[must_use]
pub fn narrow_gauge_homes(state: &GameState, company: CompanyId) -> Vec<Coord> {
    let co = state.company(company);
    if co.is_major() {
        co.independents_owned
            .iter()
            .filter_map(|&minor| state.company(minor).home)
            .collect()
    } else {
        co.home.into_iter().collect()
    }
}

/// Flood outward from `seeds` through cells carrying narrow gauge.
///
/// Seeds are always part of the result. A neighbour joins only if it has
/// narrow track, and only joined cells are expanded further.
fn narrow_network(state: &GameState, seeds: &[Coord]) -> Vec<Coord> {
    let mut visited: FxHashSet<Coord> = seeds.iter().copied().collect();
    let mut network: Vec<Coord> = seeds.to_vec();
    let mut frontier: Vec<Coord> = seeds.iter().flat_map(|s| s.adjacent()).collect();

    while let Some(at) = frontier.pop() {
        if !visited.insert(at) {
            continue;
        }
        if state.board.has_narrow_at(at) {
            network.push(at);
            frontier.extend(at.adjacent());
        }
    }

    network
}

/// Every cell `company` can run trains over: its own broad gauge plus the
/// narrow networks attached to its relevant home stations.
#[must_use]
pub fn company_accessible_track(state: &GameState, company: CompanyId) -> Vec<Coord> {
    let mut seen = FxHashSet::default();
    let own = state.board.company_track(company).map(|t| t.at);
    let narrow = narrow_network(state, &narrow_gauge_homes(state, company));

    let accessible: Vec<Coord> = own.chain(narrow).filter(|at| seen.insert(*at)).collect();
    trace!(company = %company, cells = accessible.len(), "accessible track");
    accessible
}

/// True once any accessible cell is a port.
#[must_use]
pub fn connected_to_port(state: &GameState, company: CompanyId) -> bool {
    let ports = terrain(TerrainKind::Port);
    company_accessible_track(state, company)
        .iter()
        .any(|at| ports.locations.iter().any(|l| l.at == *at))
}

/// One-off bonus for reaching a port for the first time: every cube the
/// company already holds is worth 2 more.
#[must_use]
pub fn first_port_connection_revenue(state: &GameState, company: CompanyId) -> i64 {
    i64::from(state.company(company).resources_held) * 2
}

/// Marginal revenue `company` gains by building on `terrain` in `mode`.
#[must_use]
pub fn build_revenue(state: &GameState, terrain: &Terrain, mode: BuildMode, company: CompanyId) -> i64 {
    let narrow = state.rules.narrow_gauge_revenue;

    match (terrain.kind, mode) {
        (TerrainKind::Port, BuildMode::Normal) => {
            if connected_to_port(state, company) {
                0
            } else {
                first_port_connection_revenue(state, company)
            }
        }
        (TerrainKind::Port, BuildMode::Narrow) => {
            if connected_to_port(state, company) {
                narrow
            } else {
                first_port_connection_revenue(state, company) + narrow
            }
        }
        (_, BuildMode::Narrow) => narrow,
        (TerrainKind::Farmland, BuildMode::Normal) => {
            if owned_of_kind(state, company, TerrainKind::Town) > 0 {
                2
            } else {
                0
            }
        }
        (TerrainKind::Forest, BuildMode::Normal) => 1,
        (TerrainKind::Mountain, BuildMode::Normal) => 2,
        (TerrainKind::Town, BuildMode::Normal) => {
            const TOWN_REVENUE: [i64; 3] = [2, 4, 6];
            let towns = owned_of_kind(state, company, TerrainKind::Town);
            let town_revenue = TOWN_REVENUE[towns.min(TOWN_REVENUE.len() - 1)];

            // The first town also lifts every farm already on the line.
            let farm_bonus = if towns == 0 {
                owned_of_kind(state, company, TerrainKind::Farmland) as i64 * 2
            } else {
                0
            };
            town_revenue + farm_bonus
        }
    }
}

fn owned_of_kind(state: &GameState, company: CompanyId, kind: TerrainKind) -> usize {
    let cells = terrain(kind).locations;
    state
        .board
        .track
        .iter()
        .filter(|t| t.owner == Some(company))
        .filter(|t| cells.iter().any(|l| l.at == t.at))
        .count()
}

/// Track segments plus home stations on a cell.
#[must_use]
pub fn occupants(state: &GameState, at: Coord) -> usize {
    let tracks = state.board.track_at(at).count();
    let homes = state.companies.iter().filter(|c| c.home == Some(at)).count();
    tracks + homes
}

fn is_company_presence(state: &GameState, at: Coord, company: CompanyId) -> bool {
    state.company(company).home == Some(at) || state.board.has_company_track_at(at, company)
}

/// Whether a narrow segment at `at` would join one of `homes`' networks.
fn joins_narrow_network(state: &GameState, at: Coord, homes: &[Coord]) -> bool {
    let mut visited = FxHashSet::default();
    let mut frontier: Vec<Coord> = at.adjacent().to_vec();

    while let Some(checking) = frontier.pop() {
        if !visited.insert(checking) {
            continue;
        }
        if homes.contains(&checking) {
            return true;
        }
        if state.board.has_narrow_at(checking) {
            frontier.extend(checking.adjacent());
        }
    }
    false
}

/// Every cell where `company` may build in `mode` right now.
#[must_use]
pub fn allowed_build_spaces(state: &GameState, mode: BuildMode, company: CompanyId) -> Vec<BuildableSpace> {
    let co = state.company(company);

    let equipment = match mode {
        BuildMode::Normal => co.trains_remaining,
        BuildMode::Narrow => co.narrow_gauge_remaining,
    };
    if equipment == 0 {
        return Vec::new();
    }

    let homes = match mode {
        BuildMode::Normal => Vec::new(),
        BuildMode::Narrow => narrow_gauge_homes(state, company),
    };

    let mut spaces = Vec::new();
    for (at, terrain) in cells() {
        let already_there = match mode {
            BuildMode::Normal => is_company_presence(state, at, company),
            BuildMode::Narrow => state.board.has_narrow_at(at),
        };
        if already_there {
            continue;
        }

        let count = occupants(state, at);
        if count >= terrain.capacity() {
            continue;
        }
        let Some(cost) = terrain.cost(count) else {
            continue;
        };
        if cost > co.cash {
            continue;
        }

        let connected = match mode {
            BuildMode::Normal => at
                .adjacent()
                .iter()
                .any(|&n| is_company_presence(state, n, company)),
            BuildMode::Narrow => joins_narrow_network(state, at, &homes),
        };
        if !connected {
            continue;
        }

        spaces.push(BuildableSpace {
            at,
            cost,
            revenue: build_revenue(state, terrain, mode, company),
        });
    }

    trace!(company = %company, ?mode, spaces = spaces.len(), "allowed build spaces");
    spaces
}

/// Whether `minor`'s home reaches `major`'s broad gauge through narrow
/// track.
#[must_use]
pub fn merge_connected(state: &GameState, major: CompanyId, minor: CompanyId) -> bool {
    let Some(home) = state.company(minor).home else {
        return false;
    };

    let mut visited = FxHashSet::default();
    let mut frontier = vec![home];

    while let Some(at) = frontier.pop() {
        if !visited.insert(at) {
            continue;
        }
        if state.board.has_company_track_at(at, major) {
            return true;
        }
        if state.board.has_narrow_at(at) {
            frontier.extend(at.adjacent());
        }
    }
    false
}

//! Match setup.
//!
//! All randomness of a match happens here: which major gets which starting
//! bond, which setup card lands on which setup point (and so where the
//! independents' homes and the resource cubes go), and who bids first in
//! the initial auction.

use im::Vector;
use tracing::debug;

use crate::actions::ActionCubes;
use crate::board::{cells, Board, Coord, Track, SETUP_CARDS, SETUP_POINTS};
use crate::core::{
    initial_bond_pool, major_starting_bonds, Company, CompanyId, GameRng, GameState, Phase, Player, PlayerId,
    PlayerMap, RulesConfig, SetupError, Stage, TurnContext,
};
use crate::rules::turn::start_initial_auction;

/// Set up a match with the published rules.
pub fn setup(player_count: usize, rng: &mut GameRng) -> Result<GameState, SetupError> {
    setup_with_rules(RulesConfig::default(), player_count, rng)
}

/// Set up a match with `rules`.
pub fn setup_with_rules(rules: RulesConfig, player_count: usize, rng: &mut GameRng) -> Result<GameState, SetupError> {
    rules.validate()?;
    rules.check_player_count(player_count)?;

    let mut companies: Vector<Company> = CompanyId::all().map(Company::charter).collect();

    let mut bonds = major_starting_bonds();
    rng.shuffle(&mut bonds);
    for (major, bond) in CompanyId::majors().zip(bonds) {
        let co = &mut companies[major.index()];
        co.cash = bond.amount;
        co.bonds.push(bond);
    }

    let mut home_order = vec![CompanyId::GT, CompanyId::MLM, CompanyId::NED, CompanyId::NMF];
    rng.shuffle(&mut home_order);
    let mut cards = SETUP_CARDS;
    rng.shuffle(&mut cards);

    let mut cube_targets: Vec<Coord> = Vec::new();
    for (card, origin) in cards.iter().zip(SETUP_POINTS) {
        let adjacent = origin.adjacent();
        let positions = std::iter::once(origin).chain(adjacent);
        for (i, at) in positions.enumerate() {
            for _ in 0..card.cubes[i] {
                cube_targets.push(at);
            }
            if card.stations[i] {
                if let Some(minor) = home_order.pop() {
                    companies[minor.index()].home = Some(at);
                }
            }
        }
    }

    let mut board = Board::default();
    for co in companies.iter() {
        let Some(home) = co.home else {
            continue;
        };
        let track = if co.is_major() {
            Track::normal(home, co.id)
        } else {
            Track::narrow(home)
        };
        board.place(track);
    }

    // Cubes only stay on terrain that can hold them, in map order.
    for (at, terrain) in cells() {
        if !terrain.can_place_resource {
            continue;
        }
        for _ in cube_targets.iter().filter(|&&t| t == at) {
            board.resource_cubes.push_back(at);
        }
    }

    let start_cash = rules.starting_cash(player_count);
    let first = PlayerId::new(rng.gen_range_usize(0..player_count) as u8);

    let mut state = GameState {
        rules,
        players: PlayerMap::new(player_count, |_| Player { cash: start_cash }),
        companies,
        action_cubes: ActionCubes::default(),
        board,
        bonds: initial_bond_pool(),
        independent_order: vec![CompanyId::MLM, CompanyId::NED, CompanyId::NMF],
        turn: TurnContext {
            phase: Phase::NormalPlay(Stage::RemoveCube),
            current_player: first,
            first_player_of_phase: first,
            player_after_phase: None,
        },
        log: Vector::new(),
        history: Vector::new(),
        outcome: None,
    };
    start_initial_auction(&mut state, first);

    debug!(
        players = player_count,
        seed = rng.seed(),
        cubes = state.board.resource_cubes.len(),
        "match set up"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::INITIAL_AUCTION_ORDER;
    use crate::board::terrain_at;

    #[test]
    fn test_setup_is_deterministic() {
        let a = setup(4, &mut GameRng::new(99)).unwrap();
        let b = setup(4, &mut GameRng::new(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn test_every_company_has_a_home_with_track() {
        for seed in 0..20 {
            let state = setup(3, &mut GameRng::new(seed)).unwrap();
            for co in state.companies.iter() {
                let home = co.home.unwrap_or_else(|| panic!("{} has no home (seed {seed})", co.id));
                let track: Vec<_> = state.board.track_at(home).collect();
                if co.is_major() {
                    assert!(track.iter().any(|t| t.owner == Some(co.id)));
                } else {
                    assert!(track.iter().any(|t| t.narrow));
                }
            }
        }
    }

    #[test]
    fn test_cubes_only_on_resource_terrain() {
        for seed in 0..20 {
            let state = setup(4, &mut GameRng::new(seed)).unwrap();
            assert!(!state.board.resource_cubes.is_empty());
            for at in state.board.resource_cubes.iter() {
                let terrain = terrain_at(*at).unwrap();
                assert!(terrain.can_place_resource, "cube on {at} (seed {seed})");
            }
        }
    }

    #[test]
    fn test_majors_get_each_starting_bond() {
        let state = setup(4, &mut GameRng::new(5)).unwrap();
        let mut amounts: Vec<i64> = CompanyId::majors().map(|c| state.company(c).cash).collect();
        amounts.sort_unstable();
        assert_eq!(amounts, vec![0, 10, 15]);
        for major in CompanyId::majors() {
            let co = state.company(major);
            assert_eq!(co.bonds.len(), 1);
            assert_eq!(co.bonds[0].amount, co.cash);
        }
    }

    #[test]
    fn test_starts_in_initial_auction() {
        let state = setup(5, &mut GameRng::new(1)).unwrap();
        assert!(state.players.values().all(|p| p.cash == 5));
        match &state.turn.phase {
            Phase::InitialAuction(a) => {
                assert_eq!(a.company, INITIAL_AUCTION_ORDER[0]);
                assert_eq!(a.initiator, state.current_player());
            }
            other => panic!("unexpected phase {other:?}"),
        }
        assert!(state.current_player().index() < 5);
        assert_eq!(state.log.len(), 3);
    }

    #[test]
    fn test_rejects_unsupported_player_count() {
        assert_eq!(
            setup(1, &mut GameRng::new(0)),
            Err(SetupError::PlayerCount {
                requested: 1,
                min: 2,
                max: 6
            })
        );
        assert!(setup(7, &mut GameRng::new(0)).is_err());
    }
}

//! Deterministic states for unit tests.

use im::Vector;

use crate::actions::ActionCubes;
use crate::board::{Board, Coord, Track};
use crate::core::{
    initial_bond_pool, Bond, Company, CompanyId, GameState, Phase, Player, PlayerId, PlayerMap, RulesConfig, Stage,
    TurnContext,
};

/// A game just after the initial auction, without any randomness.
///
/// Homes: EB (2, 3), TMLC and LW (7, 3), GT (4, 6), MLM (5, 8), NED (9, 3),
/// NMF (9, 1). Seat `i % n` holds one share of EB, TMLC, LW and GT
/// respectively. EB has 15 cash, TMLC 10, LW 0. Seat 0 is to play, in the
/// RemoveCube stage, with the starting cubes.
pub(crate) fn fixed_state(player_count: usize) -> GameState {
    let rules = RulesConfig::default();
    let start_cash = rules.starting_cash(player_count);

    let minor_homes = [
        (CompanyId::GT, Coord::new(4, 6)),
        (CompanyId::MLM, Coord::new(5, 8)),
        (CompanyId::NED, Coord::new(9, 3)),
        (CompanyId::NMF, Coord::new(9, 1)),
    ];
    let major_bonds = [
        (CompanyId::EB, Bond::new(15, 5, 2)),
        (CompanyId::TMLC, Bond::new(10, 5, 1)),
        (CompanyId::LW, Bond::new(0, 0, 0)),
    ];

    let mut companies: Vector<Company> = CompanyId::all().map(Company::charter).collect();
    let mut board = Board::default();

    for (id, bond) in major_bonds {
        let co = &mut companies[id.index()];
        co.cash = bond.amount;
        co.bonds.push(bond);
        if let Some(home) = co.home {
            board.place(Track::normal(home, id));
        }
    }
    for (id, home) in minor_homes {
        companies[id.index()].home = Some(home);
        board.place(Track::narrow(home));
    }
    for (seat, id) in [CompanyId::EB, CompanyId::TMLC, CompanyId::LW, CompanyId::GT]
        .into_iter()
        .enumerate()
    {
        let co = &mut companies[id.index()];
        co.shares_held.push(PlayerId::new((seat % player_count) as u8));
        co.shares_remaining -= 1;
    }

    for at in [
        Coord::new(1, 2),
        Coord::new(1, 3),
        Coord::new(2, 1),
        Coord::new(4, 3),
        Coord::new(5, 4),
        Coord::new(9, 2),
    ] {
        board.resource_cubes.push_back(at);
    }

    GameState {
        rules,
        players: PlayerMap::new(player_count, |_| Player { cash: start_cash }),
        companies,
        action_cubes: ActionCubes::default(),
        board,
        bonds: initial_bond_pool(),
        independent_order: vec![CompanyId::MLM, CompanyId::NED, CompanyId::NMF],
        turn: TurnContext {
            phase: Phase::NormalPlay(Stage::RemoveCube),
            current_player: PlayerId::new(0),
            first_player_of_phase: PlayerId::new(0),
            player_after_phase: None,
        },
        log: Vector::new(),
        history: Vector::new(),
        outcome: None,
    }
}

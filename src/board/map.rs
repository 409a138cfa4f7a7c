//! The fixed map of Tasmania.
//!
//! Cells are addressed by column `x` and row `y`. Columns are offset
//! vertically by parity, so the six neighbours of a cell differ for even
//! and odd columns (see `adjacent`).

use serde::{Deserialize, Serialize};

/// A map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbours in the order N, NE, SE, S, SW, NW.
    ///
    /// ```
    /// use emu_bay::board::Coord;
    ///
    /// let even = Coord::new(2, 2).adjacent();
    /// assert_eq!(even[1], Coord::new(3, 2));
    /// let odd = Coord::new(3, 2).adjacent();
    /// assert_eq!(odd[1], Coord::new(4, 1));
    /// ```
    #[must_use]
    pub fn adjacent(self) -> [Coord; 6] {
        let Coord { x, y } = self;
        if x % 2 == 0 {
            [
                Coord::new(x, y - 1),
                Coord::new(x + 1, y),
                Coord::new(x + 1, y + 1),
                Coord::new(x, y + 1),
                Coord::new(x - 1, y + 1),
                Coord::new(x - 1, y),
            ]
        } else {
            [
                Coord::new(x, y - 1),
                Coord::new(x + 1, y - 1),
                Coord::new(x + 1, y),
                Coord::new(x, y + 1),
                Coord::new(x - 1, y),
                Coord::new(x - 1, y - 1),
            ]
        }
    }

    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.adjacent().contains(&other)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Farmland,
    Port,
    Forest,
    Mountain,
    Town,
}

/// A named place on the map.
#[derive(Clone, Copy, Debug)]
pub struct Location {
    pub at: Coord,
    pub label: Option<&'static str>,
}

const fn cell(x: i32, y: i32) -> Location {
    Location {
        at: Coord::new(x, y),
        label: None,
    }
}

const fn place(x: i32, y: i32, label: &'static str) -> Location {
    Location {
        at: Coord::new(x, y),
        label: Some(label),
    }
}

/// One terrain class and the cells it covers.
#[derive(Clone, Copy, Debug)]
pub struct Terrain {
    pub kind: TerrainKind,
    pub can_place_resource: bool,
    pub first_cost: i64,
    /// `None` when the cell can only ever hold one occupant.
    pub second_cost: Option<i64>,
    pub locations: &'static [Location],
}

impl Terrain {
    /// Occupants (track segments and home stations) the cell can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        if self.second_cost.is_some() {
            2
        } else {
            1
        }
    }

    /// Cost to build with `occupants` already present.
    #[must_use]
    pub fn cost(&self, occupants: usize) -> Option<i64> {
        match occupants {
            0 => Some(self.first_cost),
            1 => self.second_cost,
            _ => None,
        }
    }
}

pub static MAP: [Terrain; 5] = [
    Terrain {
        kind: TerrainKind::Farmland,
        can_place_resource: false,
        first_cost: 4,
        second_cost: Some(8),
        locations: &[
            cell(1, 1),
            cell(3, 2),
            cell(3, 3),
            cell(4, 2),
            cell(5, 3),
            cell(6, 1),
            cell(6, 2),
            cell(6, 3),
            cell(6, 4),
            cell(6, 5),
            cell(7, 2),
            cell(7, 4),
            cell(7, 5),
            cell(7, 6),
            cell(8, 3),
            cell(8, 4),
            cell(8, 5),
            cell(8, 6),
        ],
    },
    Terrain {
        kind: TerrainKind::Port,
        can_place_resource: false,
        first_cost: 6,
        second_cost: Some(10),
        locations: &[
            place(1, 4, "Port of Strahan"),
            place(4, 1, "Port of Burnie"),
            place(5, 1, "Port of Devenport"),
            place(7, 8, "Port of Hobart"),
        ],
    },
    Terrain {
        kind: TerrainKind::Forest,
        can_place_resource: true,
        first_cost: 4,
        second_cost: None,
        locations: &[
            cell(1, 2),
            cell(1, 3),
            cell(2, 1),
            cell(2, 3),
            cell(2, 4),
            cell(2, 5),
            cell(3, 7),
            cell(4, 3),
            cell(4, 8),
            cell(5, 4),
            cell(5, 5),
            cell(6, 6),
            cell(6, 7),
            cell(6, 8),
            cell(8, 1),
            cell(8, 2),
            cell(9, 1),
            cell(9, 2),
            cell(9, 3),
            cell(9, 4),
        ],
    },
    Terrain {
        kind: TerrainKind::Mountain,
        can_place_resource: true,
        first_cost: 10,
        second_cost: None,
        locations: &[
            cell(2, 2),
            cell(3, 4),
            cell(3, 5),
            cell(3, 6),
            cell(4, 4),
            cell(4, 5),
            cell(4, 6),
            cell(4, 7),
            cell(5, 6),
            cell(5, 7),
            cell(5, 8),
        ],
    },
    Terrain {
        kind: TerrainKind::Town,
        can_place_resource: false,
        first_cost: 6,
        second_cost: Some(10),
        locations: &[
            place(5, 2, "Devenport"),
            place(7, 3, "Launceston"),
            place(7, 7, "Hobart"),
        ],
    },
];

/// Terrain of a cell, `None` off the map.
#[must_use]
pub fn terrain_at(at: Coord) -> Option<&'static Terrain> {
    MAP.iter().find(|t| t.locations.iter().any(|l| l.at == at))
}

#[must_use]
pub fn terrain(kind: TerrainKind) -> &'static Terrain {
    MAP.iter()
        .find(|t| t.kind == kind)
        .unwrap_or_else(|| unreachable!("terrain {kind:?} missing from the map"))
}

/// Display label of a named cell.
#[must_use]
pub fn label_at(at: Coord) -> Option<&'static str> {
    MAP.iter()
        .flat_map(|t| t.locations.iter())
        .find(|l| l.at == at)
        .and_then(|l| l.label)
}

/// Every cell on the map, in table order.
pub fn cells() -> impl Iterator<Item = (Coord, &'static Terrain)> {
    MAP.iter().flat_map(|t| t.locations.iter().map(move |l| (l.at, t)))
}

/// Cubes and stations on one setup card, per position: centre, then the
/// neighbours in `Coord::adjacent` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupCard {
    pub cubes: [u8; 7],
    pub stations: [bool; 7],
}

const fn setup_card(cubes: [u8; 7], stations: [bool; 7]) -> SetupCard {
    SetupCard { cubes, stations }
}

const NO_STATION: [bool; 7] = [false; 7];
const CENTRE_STATION: [bool; 7] = [true, false, false, false, false, false, false];

pub static SETUP_CARDS: [SetupCard; 8] = [
    setup_card([1, 2, 0, 1, 0, 0, 0], CENTRE_STATION),
    setup_card([0, 1, 1, 0, 0, 0, 0], CENTRE_STATION),
    setup_card([0, 0, 2, 0, 0, 1, 0], CENTRE_STATION),
    setup_card([3, 0, 0, 0, 0, 0, 0], CENTRE_STATION),
    setup_card([1, 0, 0, 0, 0, 1, 0], NO_STATION),
    setup_card([1, 1, 0, 0, 0, 0, 1], NO_STATION),
    setup_card([1, 1, 0, 0, 0, 0, 0], NO_STATION),
    setup_card([0, 0, 1, 0, 1, 0, 0], NO_STATION),
];

/// Centres the shuffled setup cards are dealt onto, in order.
pub static SETUP_POINTS: [Coord; 8] = [
    Coord::new(2, 2),
    Coord::new(3, 4),
    Coord::new(3, 5),
    Coord::new(4, 4),
    Coord::new(4, 6),
    Coord::new(5, 8),
    Coord::new(9, 1),
    Coord::new(9, 3),
];

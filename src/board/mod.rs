//! The map, placed track and reachability.
//!
//! `map` is static data: terrain classes, costs, labels, adjacency and the
//! setup cards. `track` holds what has been placed. `connectivity` answers
//! the graph questions the rules ask.

pub mod map;
pub mod track;
pub mod connectivity;

pub use map::{cells, label_at, terrain, terrain_at, Coord, Location, SetupCard, Terrain, TerrainKind, SETUP_CARDS, SETUP_POINTS};
pub use track::{Board, BuildMode, Track};
pub use connectivity::{
    allowed_build_spaces, company_accessible_track, connected_to_port, merge_connected, narrow_gauge_homes,
    BuildableSpace,
};

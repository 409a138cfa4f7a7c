//! Placed track and resource cubes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::CompanyId;

use super::map::Coord;

/// Gauge of a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildMode {
    /// Broad gauge, owned by the company that built it.
    Normal,
    /// Narrow gauge, unowned, shared by every independent it connects.
    Narrow,
}

/// One placed track segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub at: Coord,
    /// Set for broad gauge only.
    pub owner: Option<CompanyId>,
    pub narrow: bool,
}

impl Track {
    #[must_use]
    pub fn normal(at: Coord, owner: CompanyId) -> Self {
        Self {
            at,
            owner: Some(owner),
            narrow: false,
        }
    }

    #[must_use]
    pub fn narrow(at: Coord) -> Self {
        Self {
            at,
            owner: None,
            narrow: true,
        }
    }

    #[must_use]
    pub fn mode(&self) -> BuildMode {
        if self.narrow {
            BuildMode::Narrow
        } else {
            BuildMode::Normal
        }
    }
}

/// Dynamic board contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub track: Vector<Track>,
    /// One entry per cube; a cell may hold several.
    pub resource_cubes: Vector<Coord>,
}

impl Board {
    pub fn track_at(&self, at: Coord) -> impl Iterator<Item = &Track> {
        self.track.iter().filter(move |t| t.at == at)
    }

    #[must_use]
    pub fn has_narrow_at(&self, at: Coord) -> bool {
        self.track_at(at).any(|t| t.narrow)
    }

    #[must_use]
    pub fn has_company_track_at(&self, at: Coord, company: CompanyId) -> bool {
        self.track_at(at).any(|t| t.owner == Some(company))
    }

    /// Broad gauge segments owned by `company`.
    pub fn company_track(&self, company: CompanyId) -> impl Iterator<Item = &Track> {
        self.track
            .iter()
            .filter(move |t| !t.narrow && t.owner == Some(company))
    }

    #[must_use]
    pub fn cubes_at(&self, at: Coord) -> usize {
        self.resource_cubes.iter().filter(|&&c| c == at).count()
    }

    /// Remove a single cube from `at`. Returns false if none was there.
    pub fn take_cube(&mut self, at: Coord) -> bool {
        match self.resource_cubes.iter().position(|&c| c == at) {
            Some(idx) => {
                self.resource_cubes.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn place(&mut self, track: Track) {
        self.track.push_back(track);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_cube_removes_one() {
        let mut board = Board::default();
        let at = Coord::new(3, 4);
        board.resource_cubes.push_back(at);
        board.resource_cubes.push_back(at);

        assert!(board.take_cube(at));
        assert_eq!(board.cubes_at(at), 1);
        assert!(board.take_cube(at));
        assert!(!board.take_cube(at));
    }

    #[test]
    fn test_track_queries() {
        let mut board = Board::default();
        board.place(Track::normal(Coord::new(2, 3), CompanyId::EB));
        board.place(Track::narrow(Coord::new(4, 4)));

        assert!(board.has_company_track_at(Coord::new(2, 3), CompanyId::EB));
        assert!(!board.has_company_track_at(Coord::new(2, 3), CompanyId::LW));
        assert!(board.has_narrow_at(Coord::new(4, 4)));
        assert_eq!(board.company_track(CompanyId::EB).count(), 1);
        assert_eq!(Track::narrow(Coord::new(0, 0)).mode(), BuildMode::Narrow);
    }
}

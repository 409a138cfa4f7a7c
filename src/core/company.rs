//! Companies and bonds.
//!
//! Seven companies, addressed by a stable `CompanyId` index: three major
//! railway companies (EB, TMLC, LW) and four independents (GT, MLM, NED,
//! NMF). Independents can later be merged into a major; the major then
//! remembers them by index in `independents_owned`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Coord;

use super::error::MoveRejected;
use super::player::PlayerId;

/// Stable index into `GameState::companies`.
///
/// Deserializing goes through `from_index`, so an out-of-range id never
/// leaves the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompanyId(pub u8);

impl TryFrom<u8> for CompanyId {
    type Error = MoveRejected;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        CompanyId::from_index(index as usize)
    }
}

impl From<CompanyId> for u8 {
    fn from(id: CompanyId) -> u8 {
        id.0
    }
}

impl CompanyId {
    pub const EB: CompanyId = CompanyId(0);
    pub const TMLC: CompanyId = CompanyId(1);
    pub const LW: CompanyId = CompanyId(2);
    pub const GT: CompanyId = CompanyId(3);
    pub const MLM: CompanyId = CompanyId(4);
    pub const NED: CompanyId = CompanyId(5);
    pub const NMF: CompanyId = CompanyId(6);

    pub const COUNT: usize = 7;

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checked conversion from a caller-supplied index.
    pub fn from_index(index: usize) -> Result<CompanyId, MoveRejected> {
        if index < Self::COUNT {
            Ok(CompanyId(index as u8))
        } else {
            Err(MoveRejected::UnknownCompany(index))
        }
    }

    pub fn all() -> impl Iterator<Item = CompanyId> {
        (0..Self::COUNT as u8).map(CompanyId)
    }

    pub fn majors() -> impl Iterator<Item = CompanyId> {
        Self::all().filter(|c| c.is_major())
    }

    pub fn minors() -> impl Iterator<Item = CompanyId> {
        Self::all().filter(|c| !c.is_major())
    }

    #[must_use]
    pub const fn is_major(self) -> bool {
        self.0 < 3
    }

    #[must_use]
    pub fn kind(self) -> CompanyKind {
        if self.is_major() {
            CompanyKind::Major
        } else {
            CompanyKind::Minor
        }
    }

    /// Short name used on the board and in logs.
    #[must_use]
    pub fn abbrev(self) -> &'static str {
        ["EB", "TMLC", "LW", "GT", "MLM", "NED", "NMF"][self.index()]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        [
            "Emu Bay Railway Company",
            "Tasmanian Main Line Railway Company",
            "Launceston & Western Railway",
            "Grubb's Tramway",
            "Mount Lyell Mining and Railway Company",
            "North East Dundas Tramway",
            "North Mount Farrell",
        ][self.index()]
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbrev())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyKind {
    Major,
    Minor,
}

/// A bond: cash now, revenue drag later.
///
/// While `deferred`, the bond costs nothing. The first dividend after
/// issue matures it (`baseInterest` off revenue once); every later
/// dividend takes `interestDelta`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bond {
    pub deferred: bool,
    pub base_interest: i64,
    pub interest_delta: i64,
    pub amount: i64,
}

impl Bond {
    #[must_use]
    pub const fn new(amount: i64, base_interest: i64, interest_delta: i64) -> Self {
        Self {
            deferred: true,
            base_interest,
            interest_delta,
            amount,
        }
    }
}

/// A company's books and equipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub kind: CompanyKind,
    pub cash: i64,
    pub trains_remaining: u32,
    pub narrow_gauge_remaining: u32,
    pub resources_held: u32,
    /// Can go negative once bond interest outgrows income.
    pub current_revenue: i64,
    pub bonds: Vec<Bond>,
    /// One entry per share sold, naming its holder.
    pub shares_held: SmallVec<[PlayerId; 8]>,
    pub shares_remaining: u32,
    pub reserved_shares_remaining: u32,
    pub home: Option<Coord>,
    pub independents_owned: SmallVec<[CompanyId; 4]>,
    pub open: bool,
}

impl Company {
    /// The company as printed on its charter, before setup deals homes
    /// and starting bonds.
    #[must_use]
    pub fn charter(id: CompanyId) -> Self {
        const INDEPENDENT_REVENUE: i64 = 3;

        let blank = Self {
            id,
            kind: id.kind(),
            cash: 0,
            trains_remaining: 0,
            narrow_gauge_remaining: 0,
            resources_held: 0,
            current_revenue: 0,
            bonds: Vec::new(),
            shares_held: SmallVec::new(),
            shares_remaining: 1,
            reserved_shares_remaining: 0,
            home: None,
            independents_owned: SmallVec::new(),
            open: true,
        };

        match id {
            CompanyId::EB => Self {
                trains_remaining: 4,
                current_revenue: 1,
                shares_remaining: 2,
                reserved_shares_remaining: 4,
                home: Some(Coord::new(2, 3)),
                ..blank
            },
            CompanyId::TMLC => Self {
                trains_remaining: 8,
                current_revenue: 2,
                shares_remaining: 4,
                home: Some(Coord::new(7, 3)),
                ..blank
            },
            CompanyId::LW => Self {
                trains_remaining: 7,
                current_revenue: 2,
                shares_remaining: 3,
                home: Some(Coord::new(7, 3)),
                ..blank
            },
            CompanyId::GT => Self {
                cash: 10,
                narrow_gauge_remaining: 2,
                current_revenue: INDEPENDENT_REVENUE,
                bonds: vec![Bond::new(10, 3, 1)],
                ..blank
            },
            CompanyId::MLM => Self {
                cash: 15,
                narrow_gauge_remaining: 3,
                current_revenue: INDEPENDENT_REVENUE,
                bonds: vec![Bond::new(15, 4, 1)],
                open: false,
                ..blank
            },
            CompanyId::NED => Self {
                cash: 15,
                narrow_gauge_remaining: 3,
                current_revenue: INDEPENDENT_REVENUE,
                bonds: vec![Bond::new(15, 6, 1)],
                open: false,
                ..blank
            },
            CompanyId::NMF => Self {
                cash: 15,
                narrow_gauge_remaining: 4,
                current_revenue: INDEPENDENT_REVENUE,
                bonds: vec![Bond::new(15, 7, 1)],
                open: false,
                ..blank
            },
            other => unreachable!("no charter for company index {}", other.0),
        }
    }

    #[must_use]
    pub fn is_major(&self) -> bool {
        self.kind == CompanyKind::Major
    }

    /// Shares held by `player`.
    #[must_use]
    pub fn shares_of(&self, player: PlayerId) -> usize {
        self.shares_held.iter().filter(|&&p| p == player).count()
    }

    #[must_use]
    pub fn is_shareholder(&self, player: PlayerId) -> bool {
        self.shares_held.contains(&player)
    }

    /// Sold + unsold + reserved shares.
    #[must_use]
    pub fn total_shares(&self) -> usize {
        self.shares_held.len() + self.shares_remaining as usize + self.reserved_shares_remaining as usize
    }

    /// Combined track equipment of both gauges.
    #[must_use]
    pub fn equipment_remaining(&self) -> u32 {
        self.trains_remaining + self.narrow_gauge_remaining
    }
}

/// Bonds randomly dealt to the three majors at setup. The receiving
/// company's starting cash is the bond amount.
#[must_use]
pub fn major_starting_bonds() -> Vec<Bond> {
    vec![Bond::new(0, 0, 0), Bond::new(10, 5, 1), Bond::new(15, 5, 2)]
}

/// The unissued bond pool at setup.
#[must_use]
pub fn initial_bond_pool() -> Vec<Bond> {
    vec![
        Bond::new(10, 6, 1),
        Bond::new(20, 7, 2),
        Bond::new(20, 8, 2),
        Bond::new(30, 9, 2),
        Bond::new(30, 10, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_kinds() {
        assert_eq!(CompanyId::majors().count(), 3);
        assert_eq!(CompanyId::minors().count(), 4);
        assert!(CompanyId::LW.is_major());
        assert!(!CompanyId::GT.is_major());
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(CompanyId::from_index(6), Ok(CompanyId::NMF));
        assert_eq!(CompanyId::from_index(7), Err(MoveRejected::UnknownCompany(7)));
    }

    #[test]
    fn test_out_of_range_id_does_not_deserialize() {
        let id: CompanyId = serde_json::from_str("6").unwrap();
        assert_eq!(id, CompanyId::NMF);
        assert_eq!(serde_json::to_string(&CompanyId::GT).unwrap(), "3");
        assert!(serde_json::from_str::<CompanyId>("7").is_err());
        assert!(bincode::deserialize::<CompanyId>(&[9]).is_err());
    }

    #[test]
    fn test_charters() {
        let eb = Company::charter(CompanyId::EB);
        assert_eq!(eb.total_shares(), 6);
        assert_eq!(eb.home, Some(Coord::new(2, 3)));

        let gt = Company::charter(CompanyId::GT);
        assert!(gt.open);
        assert_eq!(gt.bonds, vec![Bond::new(10, 3, 1)]);
        assert_eq!(gt.home, None);

        let nmf = Company::charter(CompanyId::NMF);
        assert!(!nmf.open);
        assert_eq!(nmf.narrow_gauge_remaining, 4);
    }

    #[test]
    fn test_shares_of() {
        let mut co = Company::charter(CompanyId::TMLC);
        co.shares_held.push(PlayerId::new(1));
        co.shares_held.push(PlayerId::new(1));
        co.shares_held.push(PlayerId::new(2));

        assert_eq!(co.shares_of(PlayerId::new(1)), 2);
        assert!(co.is_shareholder(PlayerId::new(2)));
        assert!(!co.is_shareholder(PlayerId::new(0)));
    }

    #[test]
    fn test_abbrev_display() {
        assert_eq!(CompanyId::NED.to_string(), "NED");
    }
}

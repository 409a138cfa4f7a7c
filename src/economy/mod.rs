//! Money: track costs, resource cubes, bonds, dividends.

pub mod building;
pub mod resources;
pub mod bonds;
pub mod dividends;

pub use building::build_track;
pub use resources::{resource_cube_cost, resource_cube_revenue, take_resource, take_resource_spaces};
pub use bonds::{bond_companies, issue_bond};
pub use dividends::{pay_dividends, per_share_payout};

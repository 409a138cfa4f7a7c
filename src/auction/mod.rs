//! Share auctions.
//!
//! Two flavours share one bidding protocol:
//!
//! - the **initial auction** sells one share each of LW, TMLC, EB and GT,
//!   in that order, before normal play begins;
//! - a **share auction** is opened mid-game by the AuctionShare action and
//!   sells one share of a single company.
//!
//! Bidding goes round the table skipping players who have passed. The
//! protocol only decides who bids next or who has won; `rules::turn`
//! moves the game on from there.

pub mod protocol;

pub use protocol::{
    auctionable_companies, bid, check_auctionable, minimum_bid, pass, settle, AuctionStep, INITIAL_AUCTION_ORDER,
};

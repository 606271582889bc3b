//! Typed views of API responses
//!
//! Every entity is mapped field by field with an explicit type. Identifying
//! fields (ids, symbols, usernames) are required so that a renamed upstream
//! field fails to decode instead of producing an empty value; counters and
//! optional details carry explicit defaults.

mod account;
mod flight;
mod loan;
mod location;
mod refs;
mod ship;
mod structure;

pub use account::{GameStatus, LeaderboardEntry, User};
pub use flight::FlightPlan;
pub use loan::Loan;
pub use location::{DockedShip, Location, MarketplaceGood};
pub use refs::{LocationRef, ShipRef, StructureRef};
pub use ship::{CargoItem, Jettison, Order, Ship, Trade, Transfer};
pub use structure::{Structure, StructureExchange, StructureGood, StructureOwner};

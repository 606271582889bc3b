//! API resource endpoints
//!
//! One resource per area of the game API. Each method builds exactly one
//! [`Route`](crate::Route), hands it to the client's dispatcher and maps the
//! response envelope onto the typed models in [`crate::types`].

pub mod account;
pub mod flight_plans;
pub mod game;
pub mod loans;
pub mod locations;
pub mod ships;
pub mod structures;

pub use account::Account;
pub use flight_plans::FlightPlans;
pub use game::Game;
pub use loans::{LoanPayment, Loans, TakenLoan};
pub use locations::Locations;
pub use ships::{PurchasedShip, Ships};
pub use structures::Structures;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

use serde::{Deserialize, Serialize};

/// A ship owned by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    /// Ship id
    pub id: String,
    /// Current location symbol; absent while in transit
    #[serde(default)]
    pub location: Option<String>,
    /// X coordinate
    #[serde(default)]
    pub x: i32,
    /// Y coordinate
    #[serde(default)]
    pub y: i32,
    /// Cargo hold contents
    #[serde(default)]
    pub cargo: Vec<CargoItem>,
    /// Free cargo volume
    #[serde(default)]
    pub space_available: u32,
    /// Ship type, e.g. `JW-MK-I`
    #[serde(default, rename = "type")]
    pub ship_type: Option<String>,
    /// Ship class, e.g. `MK-I`
    #[serde(default)]
    pub class: Option<String>,
    /// Total cargo volume
    #[serde(default)]
    pub max_cargo: u32,
    /// Speed rating
    #[serde(default)]
    pub speed: u32,
    /// Manufacturer name
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Plating rating
    #[serde(default)]
    pub plating: u32,
    /// Weapons rating
    #[serde(default)]
    pub weapons: u32,
    /// Active flight plan, if travelling
    #[serde(default)]
    pub flight_plan_id: Option<String>,
}

impl Ship {
    /// Units of `good` in the hold.
    pub fn cargo_quantity(&self, good: &str) -> u32 {
        self.cargo
            .iter()
            .filter(|item| item.good == good)
            .map(|item| item.quantity)
            .sum()
    }
}

/// One stack of goods in a cargo hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoItem {
    /// Good symbol
    pub good: String,
    /// Units carried
    #[serde(default)]
    pub quantity: u32,
    /// Volume occupied
    #[serde(default)]
    pub total_volume: u32,
}

/// A completed purchase or sell order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Good symbol
    pub good: String,
    /// Units traded
    #[serde(default)]
    pub quantity: u32,
    /// Price per unit
    #[serde(default)]
    pub price_per_unit: i64,
    /// Total price
    #[serde(default)]
    pub total: i64,
}

/// Outcome of a purchase or sell order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Credit balance after the trade
    pub credits: i64,
    /// The executed order
    pub order: Order,
    /// The ship after the trade
    pub ship: Ship,
}

/// Outcome of jettisoning cargo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jettison {
    /// Ship that dropped the cargo
    pub ship_id: String,
    /// Good symbol
    pub good: String,
    /// Units still on board
    #[serde(default)]
    pub quantity_remaining: u32,
}

/// Outcome of moving cargo between two ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// The sending ship after the transfer
    pub from_ship: Ship,
    /// The receiving ship after the transfer
    pub to_ship: Ship,
}

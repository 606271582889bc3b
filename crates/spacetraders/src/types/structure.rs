use serde::{Deserialize, Serialize};

use super::Ship;

/// A structure built at a location, either public or player-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Structure id
    pub id: String,
    /// Structure type, e.g. `REFINERY`
    #[serde(default, rename = "type")]
    pub structure_type: Option<String>,
    /// Location symbol the structure is built at
    #[serde(default)]
    pub location: Option<String>,
    /// Whether the structure is producing
    #[serde(default)]
    pub active: bool,
    /// Status line reported by the server
    #[serde(default)]
    pub status: Option<String>,
    /// Owner, absent for public structures
    #[serde(default)]
    pub owned_by: Option<StructureOwner>,
    /// Goods stored in the structure
    #[serde(default)]
    pub inventory: Vec<StructureGood>,
    /// Goods the structure consumes
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Goods the structure produces
    #[serde(default)]
    pub produces: Vec<String>,
}

impl Structure {
    /// Units of `good` stored.
    pub fn stock(&self, good: &str) -> u32 {
        self.inventory
            .iter()
            .filter(|item| item.good == good)
            .map(|item| item.quantity)
            .sum()
    }
}

/// The player owning a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureOwner {
    /// Account name
    pub username: String,
}

/// One stack of goods stored in a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureGood {
    /// Good symbol
    pub good: String,
    /// Units stored
    #[serde(default)]
    pub quantity: u32,
}

/// Outcome of moving goods between a ship and a structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureExchange {
    /// The ship after the exchange
    pub ship: Ship,
    /// The structure after the exchange
    pub structure: Structure,
}

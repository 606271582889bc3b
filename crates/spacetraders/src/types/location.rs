use serde::{Deserialize, Serialize};

/// A place in the system a ship can travel to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique symbol, e.g. `OE-PM-TR`
    pub symbol: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Location type, e.g. `PLANET`
    #[serde(default, rename = "type")]
    pub location_type: Option<String>,
    /// X coordinate
    #[serde(default)]
    pub x: i32,
    /// Y coordinate
    #[serde(default)]
    pub y: i32,
    /// Whether structures can be built here
    #[serde(default)]
    pub allows_construction: bool,
    /// Number of ships currently docked
    #[serde(default)]
    pub docked_ships: Option<u32>,
}

/// A good on sale at a location's marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceGood {
    /// Good symbol, e.g. `FUEL`
    pub symbol: String,
    /// Cargo volume per unit
    #[serde(default)]
    pub volume_per_unit: u32,
    /// Reference price
    #[serde(default)]
    pub price_per_unit: i64,
    /// Spread between purchase and sell price
    #[serde(default)]
    pub spread: i64,
    /// Price paid when buying
    #[serde(default)]
    pub purchase_price_per_unit: i64,
    /// Price received when selling
    #[serde(default)]
    pub sell_price_per_unit: i64,
    /// Units on offer
    #[serde(default)]
    pub quantity_available: u64,
}

/// A ship docked at a location, as listed by `/locations/{symbol}/ships`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockedShip {
    /// Ship id
    pub ship_id: String,
    /// Owner's username
    #[serde(default)]
    pub username: Option<String>,
    /// Ship type
    #[serde(default)]
    pub ship_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_mapping() {
        let location: Location = serde_json::from_value(json!({
            "symbol": "OE-PM",
            "type": "PLANET",
            "name": "Prime",
            "x": 13,
            "y": 16,
            "allowsConstruction": false
        }))
        .unwrap();

        assert_eq!(location.location_type.as_deref(), Some("PLANET"));
        assert_eq!(location.docked_ships, None);
        assert_eq!((location.x, location.y), (13, 16));
    }

    #[test]
    fn test_marketplace_good_defaults() {
        let good: MarketplaceGood =
            serde_json::from_value(json!({"symbol": "FUEL", "pricePerUnit": 4})).unwrap();
        assert_eq!(good.price_per_unit, 4);
        assert_eq!(good.quantity_available, 0);
    }
}

use serde::{Deserialize, Serialize};

/// A ship's journey between two locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPlan {
    /// Flight plan id
    pub id: String,
    /// Ship travelling on this plan
    pub ship_id: String,
    /// Departure location symbol
    #[serde(default)]
    pub departure: Option<String>,
    /// Destination location symbol
    pub destination: String,
    /// Distance travelled
    #[serde(default)]
    pub distance: u32,
    /// Fuel burned by the trip
    #[serde(default)]
    pub fuel_consumed: u32,
    /// Fuel left in the hold after the trip
    #[serde(default)]
    pub fuel_remaining: u32,
    /// Seconds until arrival
    #[serde(default)]
    pub time_remaining_in_seconds: u32,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// RFC 3339 arrival timestamp
    #[serde(default)]
    pub arrives_at: Option<String>,
    /// RFC 3339 timestamp set once the plan has ended
    #[serde(default)]
    pub terminated_at: Option<String>,
}

impl FlightPlan {
    /// Whether the plan has ended.
    pub fn is_terminated(&self) -> bool {
        self.terminated_at.is_some()
    }
}

use serde::{Deserialize, Serialize};

/// The authenticated player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account name
    pub username: String,
    /// Current credit balance
    #[serde(default)]
    pub credits: i64,
    /// Number of ships owned
    #[serde(default)]
    pub ship_count: u32,
    /// Number of structures owned
    #[serde(default)]
    pub structure_count: u32,
    /// RFC 3339 timestamp of registration
    #[serde(default)]
    pub joined_at: Option<String>,
}

/// One row of the net-worth leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Player name
    pub username: String,
    /// Net worth in credits
    #[serde(default)]
    pub net_worth: i64,
    /// Position on the board, starting at 1
    #[serde(default)]
    pub rank: u32,
}

/// Server health as reported by `/game/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Human-readable status line
    pub status: String,
}

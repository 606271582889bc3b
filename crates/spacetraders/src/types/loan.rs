use serde::{Deserialize, Serialize};

/// A loan taken by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Loan id
    pub id: String,
    /// Loan type, e.g. `STARTUP`
    #[serde(rename = "type")]
    pub loan_type: String,
    /// Repayment status, e.g. `CURRENT`
    #[serde(default)]
    pub status: Option<String>,
    /// Amount owed
    #[serde(default)]
    pub repayment_amount: i64,
    /// RFC 3339 due date
    #[serde(default)]
    pub due: Option<String>,
}

//! Loan endpoints

use super::Resource;
use crate::{client::Client, error::Result, route::Method, types::Loan};
use serde::Deserialize;

/// Loans API resource.
#[derive(Clone)]
pub struct Loans {
    client: Client,
}

/// Outcome of taking out a loan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TakenLoan {
    /// Credit balance including the loan
    pub credits: i64,
    /// The new loan
    pub loan: Loan,
}

/// Outcome of repaying a loan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanPayment {
    /// Credit balance after repayment
    pub credits: i64,
    /// Loans still on the account
    pub loans: Vec<Loan>,
}

impl Loans {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Loans held by the account.
    pub async fn list(&self) -> Result<Vec<Loan>> {
        #[derive(Deserialize)]
        struct LoansResponse {
            loans: Vec<Loan>,
        }

        let route = self.client.route(Method::Get, &["my", "loans"])?;
        let response: LoansResponse = self.client.dispatch_as(&route).await?;
        Ok(response.loans)
    }

    /// Take out a loan of the given type, e.g. `STARTUP`.
    pub async fn take(&self, loan_type: &str) -> Result<TakenLoan> {
        let route = self
            .client
            .route(Method::Post, &["my", "loans"])?
            .query("type", loan_type);
        self.client.dispatch_as(&route).await
    }

    /// Repay a loan in full.
    pub async fn pay(&self, loan_id: &str) -> Result<LoanPayment> {
        let route = self.client.route(Method::Put, &["my", "loans", loan_id])?;
        self.client.dispatch_as(&route).await
    }
}

impl Resource for Loans {
    fn client(&self) -> &Client {
        &self.client
    }
}

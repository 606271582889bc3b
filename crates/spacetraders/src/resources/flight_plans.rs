//! Flight plan endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    route::Method,
    types::{FlightPlan, LocationRef, ShipRef},
};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightPlanResponse {
    flight_plan: FlightPlan,
}

/// Flight plans API resource.
#[derive(Clone)]
pub struct FlightPlans {
    client: Client,
}

impl FlightPlans {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a flight plan by id.
    pub async fn get(&self, flight_plan_id: &str) -> Result<FlightPlan> {
        let route = self
            .client
            .route(Method::Get, &["my", "flight-plans", flight_plan_id])?;
        let response: FlightPlanResponse = self.client.dispatch_as(&route).await?;
        Ok(response.flight_plan)
    }

    /// Send a ship towards a destination.
    pub async fn create<'a>(
        &self,
        ship: impl Into<ShipRef<'a>>,
        destination: impl Into<LocationRef<'a>>,
    ) -> Result<FlightPlan> {
        let route = self
            .client
            .route(Method::Post, &["my", "flight-plans"])?
            .query("shipId", ship.into().id())
            .query("destination", destination.into().symbol());
        let response: FlightPlanResponse = self.client.dispatch_as(&route).await?;
        Ok(response.flight_plan)
    }
}

impl Resource for FlightPlans {
    fn client(&self) -> &Client {
        &self.client
    }
}

//! Ship, cargo and order endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    route::Method,
    types::{Jettison, LocationRef, Ship, ShipRef, Trade, Transfer},
};
use serde::Deserialize;

#[derive(Deserialize)]
struct ShipResponse {
    ship: Ship,
}

/// Outcome of buying a ship.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchasedShip {
    /// Credit balance after the purchase
    pub credits: i64,
    /// The new ship
    pub ship: Ship,
}

/// Ships API resource.
#[derive(Clone)]
pub struct Ships {
    client: Client,
}

impl Ships {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every ship owned by the account.
    pub async fn list(&self) -> Result<Vec<Ship>> {
        #[derive(Deserialize)]
        struct ShipsResponse {
            ships: Vec<Ship>,
        }

        let route = self.client.route(Method::Get, &["my", "ships"])?;
        let response: ShipsResponse = self.client.dispatch_as(&route).await?;
        Ok(response.ships)
    }

    /// Fetch the current state of a ship.
    pub async fn get<'a>(&self, ship: impl Into<ShipRef<'a>>) -> Result<Ship> {
        let route = self
            .client
            .route(Method::Get, &["my", "ships", ship.into().id()])?;
        let response: ShipResponse = self.client.dispatch_as(&route).await?;
        Ok(response.ship)
    }

    /// Buy a ship of the given type at a shipyard.
    pub async fn buy<'a>(
        &self,
        location: impl Into<LocationRef<'a>>,
        ship_type: &str,
    ) -> Result<PurchasedShip> {
        let route = self
            .client
            .route(Method::Post, &["my", "ships"])?
            .query("location", location.into().symbol())
            .query("type", ship_type);
        self.client.dispatch_as(&route).await
    }

    /// Scrap a ship for credits. Returns the server's confirmation message.
    pub async fn scrap<'a>(&self, ship: impl Into<ShipRef<'a>>) -> Result<String> {
        #[derive(Deserialize)]
        struct ScrapResponse {
            success: String,
        }

        let route = self
            .client
            .route_with_trailing_slash(Method::Delete, &["my", "ships", ship.into().id()])?;
        let response: ScrapResponse = self.client.dispatch_as(&route).await?;
        Ok(response.success)
    }

    /// Drop cargo into space.
    pub async fn jettison<'a>(
        &self,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<Jettison> {
        let ship_id = ship.into().id();
        let route = self
            .client
            .route(Method::Post, &["my", "ships", ship_id, "jettison"])?
            .query("shipId", ship_id)
            .query("good", good)
            .query("quantity", quantity);
        self.client.dispatch_as(&route).await
    }

    /// Move cargo from one ship to another at the same location.
    pub async fn transfer<'a>(
        &self,
        from: impl Into<ShipRef<'a>>,
        to: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<Transfer> {
        let route = self
            .client
            .route(Method::Post, &["my", "ships", from.into().id(), "transfer"])?
            .query("toShipId", to.into().id())
            .query("good", good)
            .query("quantity", quantity);
        self.client.dispatch_as(&route).await
    }

    /// Buy goods at the ship's current marketplace.
    pub async fn purchase<'a>(
        &self,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<Trade> {
        self.order("purchase-orders", ship.into(), good, quantity)
            .await
    }

    /// Sell goods at the ship's current marketplace.
    pub async fn sell<'a>(
        &self,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<Trade> {
        self.order("sell-orders", ship.into(), good, quantity)
            .await
    }

    async fn order(&self, kind: &str, ship: ShipRef<'_>, good: &str, quantity: u32) -> Result<Trade> {
        let route = self
            .client
            .route(Method::Post, &["my", kind])?
            .query("shipId", ship.id())
            .query("good", good)
            .query("quantity", quantity);
        self.client.dispatch_as(&route).await
    }
}

impl Resource for Ships {
    fn client(&self) -> &Client {
        &self.client
    }
}

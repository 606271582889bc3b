//! Location endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    route::Method,
    types::{DockedShip, Location, LocationRef, MarketplaceGood},
};
use serde::Deserialize;

/// Locations API resource.
#[derive(Clone)]
pub struct Locations {
    client: Client,
}

impl Locations {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a location by symbol.
    pub async fn get<'a>(&self, location: impl Into<LocationRef<'a>>) -> Result<Location> {
        #[derive(Deserialize)]
        struct LocationResponse {
            location: Location,
        }

        let route = self
            .client
            .route(Method::Get, &["locations", location.into().symbol()])?;
        let response: LocationResponse = self.client.dispatch_as(&route).await?;
        Ok(response.location)
    }

    /// Goods traded at a location.
    pub async fn marketplace<'a>(
        &self,
        location: impl Into<LocationRef<'a>>,
    ) -> Result<Vec<MarketplaceGood>> {
        #[derive(Deserialize)]
        struct MarketplaceResponse {
            marketplace: Vec<MarketplaceGood>,
        }

        let symbol = location.into().symbol();
        let route = self
            .client
            .route(Method::Get, &["locations", symbol, "marketplace"])?;
        let response: MarketplaceResponse = self.client.dispatch_as(&route).await?;
        Ok(response.marketplace)
    }

    /// Ships currently docked at a location.
    pub async fn ships<'a>(&self, location: impl Into<LocationRef<'a>>) -> Result<Vec<DockedShip>> {
        #[derive(Deserialize)]
        struct DockedShipsResponse {
            ships: Vec<DockedShip>,
        }

        let symbol = location.into().symbol();
        let route = self
            .client
            .route(Method::Get, &["locations", symbol, "ships"])?;
        let response: DockedShipsResponse = self.client.dispatch_as(&route).await?;
        Ok(response.ships)
    }
}

impl Resource for Locations {
    fn client(&self) -> &Client {
        &self.client
    }
}

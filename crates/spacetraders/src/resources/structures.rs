//! Structure deposit and transfer endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    route::{Method, Route},
    types::{ShipRef, StructureExchange, StructureRef},
};

/// Structures API resource.
///
/// Owned structures live under `/my/structures`; deposits into a structure
/// another player owns go through the public `/structures` path.
#[derive(Clone)]
pub struct Structures {
    client: Client,
}

impl Structures {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Move goods from a ship into a structure the account owns.
    pub async fn deposit_owned<'a>(
        &self,
        structure: impl Into<StructureRef<'a>>,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<StructureExchange> {
        let route = self
            .client
            .route(Method::Post, &["my", "structures", structure.into().id(), "deposit"])?;
        self.exchange(route, ship.into(), good, quantity).await
    }

    /// Move goods from a ship into a public or foreign structure.
    pub async fn deposit<'a>(
        &self,
        structure: impl Into<StructureRef<'a>>,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<StructureExchange> {
        let route = self
            .client
            .route(Method::Post, &["structures", structure.into().id(), "deposit"])?;
        self.exchange(route, ship.into(), good, quantity).await
    }

    /// Move goods from an owned structure onto a ship.
    pub async fn transfer_to_ship<'a>(
        &self,
        structure: impl Into<StructureRef<'a>>,
        ship: impl Into<ShipRef<'a>>,
        good: &str,
        quantity: u32,
    ) -> Result<StructureExchange> {
        let route = self
            .client
            .route(Method::Post, &["my", "structures", structure.into().id(), "transfer"])?;
        self.exchange(route, ship.into(), good, quantity).await
    }

    async fn exchange(
        &self,
        route: Route,
        ship: ShipRef<'_>,
        good: &str,
        quantity: u32,
    ) -> Result<StructureExchange> {
        let route = route
            .query("shipId", ship.id())
            .query("good", good)
            .query("quantity", quantity);
        self.client.dispatch_as(&route).await
    }
}

impl Resource for Structures {
    fn client(&self) -> &Client {
        &self.client
    }
}

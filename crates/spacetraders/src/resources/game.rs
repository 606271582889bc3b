//! Game status and leaderboard endpoints

use super::Resource;
use crate::{
    client::Client,
    error::Result,
    route::Method,
    types::{GameStatus, LeaderboardEntry},
};
use serde::Deserialize;

/// Game API resource.
#[derive(Clone)]
pub struct Game {
    client: Client,
}

impl Game {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Current server status message.
    pub async fn status(&self) -> Result<GameStatus> {
        let route = self.client.route(Method::Get, &["game", "status"])?;
        self.client.dispatch_as(&route).await
    }

    /// Net-worth leaderboard, best first.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct LeaderboardResponse {
            net_worth: Vec<LeaderboardEntry>,
        }

        let route = self
            .client
            .route(Method::Get, &["game", "leaderboard", "net-worth"])?;
        let response: LeaderboardResponse = self.client.dispatch_as(&route).await?;
        Ok(response.net_worth)
    }
}

impl Resource for Game {
    fn client(&self) -> &Client {
        &self.client
    }
}

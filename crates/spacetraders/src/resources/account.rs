//! Account endpoint

use super::Resource;
use crate::{client::Client, error::Result, route::Method, types::User};
use serde::Deserialize;

/// Account API resource.
#[derive(Clone)]
pub struct Account {
    client: Client,
}

impl Account {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the profile of the authenticated user.
    ///
    /// Doubles as a token check: an invalid token fails with a 401
    /// [`Error::Http`](crate::Error::Http).
    pub async fn get(&self) -> Result<User> {
        #[derive(Deserialize)]
        struct AccountResponse {
            user: User,
        }

        let route = self.client.route(Method::Get, &["my", "account"])?;
        let response: AccountResponse = self.client.dispatch_as(&route).await?;
        Ok(response.user)
    }
}

impl Resource for Account {
    fn client(&self) -> &Client {
        &self.client
    }
}

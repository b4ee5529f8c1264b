// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use futures::Future;

use crate::inv;
use crate::inv::api::client::Inventory;
use crate::inv::model::{AccessToken, InventoryRecord};
use crate::inv::util::futures::into_future_trait;

/// The network operations the dashboard depends on. Implemented by the
/// `Inventory` HTTP client, and by in-memory fakes in tests.
pub trait Backend: Send + Sync {
    /// Exchange credentials for an access token. A response without a
    /// token resolves to `ErrorKind::MissingAccessToken`.
    fn authenticate(&self, username: &str, password: &str) -> inv::Future<AccessToken>;

    /// Retrieve every inventory record visible to the bearer of `token`.
    fn fetch_inventory(&self, token: &AccessToken) -> inv::Future<Vec<InventoryRecord>>;
}

impl Backend for Inventory {
    fn authenticate(&self, username: &str, password: &str) -> inv::Future<AccessToken> {
        into_future_trait(self.login(username, password).and_then(|login| {
            login
                .access_token
                .ok_or_else(|| inv::ErrorKind::MissingAccessToken.into())
        }))
    }

    fn fetch_inventory(&self, token: &AccessToken) -> inv::Future<Vec<InventoryRecord>> {
        self.set_access_token(Some(token.clone()));
        self.get_inventory()
    }
}

// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use crate::inv::model::AccessToken;

/// A type representing the result of a login call. The backend answers
/// `{"access_token": ...}` on success and `{"error": ...}` otherwise.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize)]
pub struct Login {
    #[serde(default)]
    pub access_token: Option<AccessToken>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Login {
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }
}

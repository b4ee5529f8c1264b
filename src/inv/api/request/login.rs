// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

/// A type representing a login request
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

impl Login {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

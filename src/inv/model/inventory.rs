// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

use std::fmt;

use serde::de::{Deserialize, Deserializer};

// The backend emits identifiers as JSON numbers, but nothing stops a
// deployment from using text keys. Accept either:
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(Into::into)
}

// NULL database columns come through as JSON `null`:
fn nullable_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(Into::into).unwrap_or_default())
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An identifier for an inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryId(#[serde(deserialize_with = "lenient_id")] String);

impl InventoryId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        InventoryId(id.into())
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InventoryId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<InventoryId> for String {
    fn from(id: InventoryId) -> Self {
        id.0
    }
}

impl From<String> for InventoryId {
    fn from(id: String) -> Self {
        InventoryId::new(id)
    }
}

impl<'a> From<&'a str> for InventoryId {
    fn from(id: &'a str) -> Self {
        InventoryId::new(id)
    }
}

/// An identifier for the application a server belongs to. Empty when the
/// backend has none on record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(#[serde(deserialize_with = "nullable_id")] String);

impl ApplicationId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ApplicationId(id.into())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// One row of backend-reported asset data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryRecord {
    id: InventoryId,
    #[serde(default, deserialize_with = "nullable_string")]
    servername: String,
    #[serde(default, deserialize_with = "nullable_string")]
    os: String,
    #[serde(default, deserialize_with = "nullable_string")]
    environment: String,
    #[serde(default, alias = "applicationId")]
    application_id: ApplicationId,
}

impl InventoryRecord {
    pub fn new<S, O, E>(
        id: InventoryId,
        servername: S,
        os: O,
        environment: E,
        application_id: ApplicationId,
    ) -> Self
    where
        S: Into<String>,
        O: Into<String>,
        E: Into<String>,
    {
        Self {
            id,
            servername: servername.into(),
            os: os.into(),
            environment: environment.into(),
            application_id,
        }
    }

    pub fn id(&self) -> &InventoryId {
        &self.id
    }

    pub fn servername(&self) -> &String {
        &self.servername
    }

    pub fn os(&self) -> &String {
        &self.os
    }

    pub fn environment(&self) -> &String {
        &self.environment
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }
}

// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Inventory dashboard top-level definitions go in this module.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod server;
pub mod session;
pub mod types;
pub mod util;

// Re-export
pub use crate::inv::api::Inventory;
pub use crate::inv::config::{BackendConfig, Config, ServerConfig};
pub use crate::inv::error::{Error, ErrorKind};
pub use crate::inv::types::{Future, Result};

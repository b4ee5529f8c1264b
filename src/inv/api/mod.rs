// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! The inventory backend API.

mod backend;
mod client;
pub mod request;
pub mod response;

// Re-export:
pub use self::backend::Backend;
pub use self::client::{fetch_backend_config, Inventory};

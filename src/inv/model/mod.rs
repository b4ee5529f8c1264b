// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

/// Top-level model definitions and re-exports go here.

pub mod account;
pub mod inventory;

// Re-export
pub use self::account::AccessToken;
pub use self::inventory::{ApplicationId, InventoryId, InventoryRecord};

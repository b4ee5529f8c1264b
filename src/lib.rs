// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

extern crate chrono;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate hyper;
extern crate hyper_tls;
#[macro_use]
extern crate lazy_static;
extern crate rust_xlsxwriter;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate tokio;
#[macro_use]
extern crate tracing;
extern crate url;

mod inv;

// Publicly re-export:
pub use crate::inv::api::Inventory;
pub use crate::inv::config::{BackendConfig, Config, ServerConfig};
pub use crate::inv::types::{Future, Result};
pub use crate::inv::{api, dashboard, error, model, server, session};

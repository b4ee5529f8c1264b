// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Serves the dashboard frontend and its backend configuration.

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate tracing;

use futures::Future;
use tracing_subscriber::EnvFilter;

use inventory::{server, ServerConfig};

fn run() -> inventory::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inventory=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        "serving {} with backend {}://{}:{}",
        config.public_dir().display(),
        config.backend().protocol(),
        config.backend().host(),
        config.backend().port()
    );

    let (_, server) = server::serve(config)?;
    tokio::run(server.map_err(|e| error!("server error: {}", e)));
    Ok(())
}

quick_main!(run);

// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! REST backend to track cycling users, their rides and the events they can join.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use ciclismo_core::clocks::SystemClock;
use ciclismo_core::db::Db;
use ciclismo_core::env::get_optional_var;
use log::{error, info};
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

mod db;
mod driver;
use driver::Driver;
mod model;
mod rest;
use rest::app;

/// Default port to listen on when none is configured.
const DEFAULT_PORT: u16 = 8000;

/// Configuration options for the service.
#[derive(Debug, PartialEq)]
pub struct ServiceOptions {
    /// TCP port to listen on, on all interfaces.
    pub port: u16,

    /// Whether to populate empty collections with sample documents at startup.
    pub seed_samples: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, seed_samples: false }
    }
}

impl ServiceOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT` and `<prefix>_SEED_SAMPLES`.
    pub fn from_env(prefix: &str) -> Result<ServiceOptions, String> {
        Ok(ServiceOptions {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            seed_samples: get_optional_var::<bool>(prefix, "SEED_SAMPLES")?.unwrap_or(false),
        })
    }
}

/// Waits until the process is asked to terminate.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown request"),
        Err(e) => {
            error!("Cannot listen for the shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Instantiates all resources to serve the application backed by `db` as configured in `opts`.
///
/// Returns once the server has shut down gracefully.  The caller retains ownership of `db` and
/// is responsible for closing it afterwards.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    opts: ServiceOptions,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    db::init_schema(&mut db.ex().await?).await?;

    let driver = Driver::new(db, Arc::new(SystemClock::default()));
    if opts.seed_samples {
        driver.clone().seed_samples().await?;
    }
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, opts.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

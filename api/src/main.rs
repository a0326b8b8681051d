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

//! Entry point to the cycling service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use ciclismo_api::{ServiceOptions, serve};
use ciclismo_core::db::Db;
use ciclismo_core::db::mongo::{MongoDb, MongoOptions};
use std::sync::Arc;

/// Name of the database to use when the configuration does not provide one.
const DEFAULT_DATABASE: &str = "ciclismo";

#[tokio::main]
async fn main() {
    env_logger::init();

    let service_opts = ServiceOptions::from_env("CICLISMO").expect("Invalid service configuration");

    let mut db_opts = MongoOptions::from_env("MONGODB").expect("Invalid MongoDB configuration");
    db_opts.app_name = Some("ciclismo".to_owned());
    let db: Arc<dyn Db + Send + Sync> = Arc::new(
        MongoDb::connect(db_opts, DEFAULT_DATABASE).await.expect("Cannot connect to MongoDB"),
    );

    let result = serve(service_opts, db.clone()).await;
    db.close().await;
    result.expect("Server failed")
}

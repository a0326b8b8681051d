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

//! Common utilities to interact with a MongoDB database.

use crate::db::{Db, DbError, DbResult, Executor};
use crate::env::{get_optional_var, get_required_var};
use async_trait::async_trait;
use bson::doc;
use derivative::Derivative;
use log::{info, warn};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::sync::atomic::{AtomicBool, Ordering};

/// Server error code reported when a write violates a unique index.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Takes a raw MongoDB error `e` and converts it to our generic error type.
pub fn map_mongo_error(e: mongodb::error::Error) -> DbError {
    match e.kind.as_ref() {
        ErrorKind::ServerSelection { .. } => DbError::Unavailable,
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE => {
            DbError::AlreadyExists
        }
        ErrorKind::BsonDeserialization(e) => DbError::DataIntegrityError(e.to_string()),
        _ => DbError::BackendError(e.to_string()),
    }
}

/// Options to establish a connection to a MongoDB database.
#[derive(Derivative)]
#[derivative(Debug, Default)]
#[cfg_attr(test, derivative(PartialEq))]
pub struct MongoOptions {
    /// Connection string, which may carry credentials.
    #[derivative(Debug = "ignore")]
    pub url: String,

    /// Name of the logical database to use, overriding the one in `url`.
    pub database: Option<String>,

    /// Name to report to the server when connecting.
    pub app_name: Option<String>,
}

impl MongoOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_URL` and `<prefix>_DATABASE`.
    pub fn from_env(prefix: &str) -> Result<MongoOptions, String> {
        Ok(MongoOptions {
            url: get_required_var::<String>(prefix, "URL")?,
            database: get_optional_var::<String>(prefix, "DATABASE")?,
            app_name: None,
        })
    }
}

/// A database executor implementation for MongoDB bound to the service's logical database.
#[derive(Clone, Debug)]
pub struct MongoExecutor(Database);

impl MongoExecutor {
    /// Returns a handle to the collection `name` holding raw documents.
    pub fn collection(&self, name: &str) -> Collection<bson::Document> {
        self.0.collection(name)
    }
}

/// A database instance backed by a MongoDB server.
pub struct MongoDb {
    /// Client holding the connection pool to the server.
    client: Client,

    /// Logical database that all executors operate on.
    database: Database,

    /// Whether `close` has been called.
    closed: AtomicBool,
}

impl MongoDb {
    /// Creates a new connection based on environment variables and verifies that the server is
    /// reachable.
    ///
    /// The logical database is the one in `opts.database`, or the one named in the connection
    /// string, or `default_database` in this order.
    pub async fn connect(opts: MongoOptions, default_database: &str) -> DbResult<Self> {
        let mut client_options = ClientOptions::parse(&opts.url).await.map_err(map_mongo_error)?;
        client_options.app_name = opts.app_name;
        let client = Client::with_options(client_options).map_err(map_mongo_error)?;

        let database = match opts.database {
            Some(name) => client.database(&name),
            None => match client.default_database() {
                Some(database) => database,
                None => client.database(default_database),
            },
        };

        database.run_command(doc! {"ping": 1}).await.map_err(map_mongo_error)?;
        info!("Connected to MongoDB database {}", database.name());

        Ok(Self { client, database, closed: AtomicBool::new(false) })
    }

    /// Returns an executor of the specific type used by this database.
    pub fn typed_ex(&self) -> MongoExecutor {
        MongoExecutor(self.database.clone())
    }
}

impl Drop for MongoDb {
    fn drop(&mut self) {
        if !self.closed.load(Ordering::SeqCst) {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for MongoDb {
    async fn ex(&self) -> DbResult<Executor> {
        Ok(Executor::Mongo(self.typed_ex()))
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Test utilities for the MongoDB connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes a test database on the server pointed at by `MONGODB_TEST_URL`.
    ///
    /// Every call uses a logical database with a unique name so that tests can run concurrently.
    /// These databases are not dropped afterwards.
    pub async fn setup() -> MongoDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        let opts = MongoOptions {
            url: get_required_var::<String>("MONGODB_TEST", "URL").unwrap(),
            database: Some(format!("ciclismo_test_{}", bson::oid::ObjectId::new().to_hex())),
            app_name: Some("ciclismo-tests".to_owned()),
        };
        MongoDb::connect(opts, "unused").await.unwrap()
    }
}

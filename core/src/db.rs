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

//! Generic abstraction to access different database systems.
//!
//! The facilities in this module provide an abstraction over different document stores.  The
//! MongoDB backend is for production use and the SQLite backend, which keeps BSON-encoded
//! documents in a single table, is primarily intended to support unit tests.

use crate::model::ModelError;
use async_trait::async_trait;

pub mod document;
#[cfg(feature = "mongodb")]
pub mod mongo;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because the server cannot be
    /// reached).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

impl From<bson::ser::Error> for DbError {
    fn from(e: bson::ser::Error) -> Self {
        DbError::BackendError(format!("Cannot encode document: {}", e))
    }
}

impl From<bson::de::Error> for DbError {
    fn from(e: bson::de::Error) -> Self {
        DbError::DataIntegrityError(format!("Cannot decode document: {}", e))
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// A database executor that can talk to multiple database implementations.
///
/// Users of this type are forced to destructure it and issue different calls for each database.
pub enum Executor {
    /// A MongoDB executor bound to the service's logical database.
    #[cfg(feature = "mongodb")]
    Mongo(mongo::MongoExecutor),

    /// A SQLite executor that can be used in `sqlx` operations.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the database.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Closes the connection to the database.  Must be called before dropping the object.
    async fn close(&self);
}

/// Macros to help instantiate tests for multiple database systems.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database system.
    ///
    /// The database implementation to run the tests against is determined by the `setup`
    /// expression, which needs to return a database object that has already been initialized
    /// with the desired schema.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}

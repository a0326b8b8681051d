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

//! Common utilities to interact with an SQLite database.
//!
//! SQLite does not know about documents, so services that use this backend keep their documents
//! BSON-encoded in regular tables.  This backend exists to run unit tests without a MongoDB
//! server.

use crate::db::{Db, DbError, DbResult, Executor};
use async_trait::async_trait;
use log::warn;
use sqlx::SqliteConnection;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::PoolTimedOut => DbError::Unavailable,
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Creates a new connection to the database at `conn_str`.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let pool = SqlitePool::connect(conn_str).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A database executor implementation for SQLite backed by a pooled connection.
#[derive(Debug)]
pub struct SqliteExecutor(PoolConnection<Sqlite>);

impl SqliteExecutor {
    /// Returns the connection to pass to `sqlx` operations.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.0
    }
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// operations can use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<SqliteExecutor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(SqliteExecutor(conn))
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        Ok(Executor::Sqlite(self.typed_ex().await?))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
///
/// The `schema` may contain more than one statement.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

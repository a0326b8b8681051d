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

//! Test utilities for the business layer.

use crate::db::init_schema;
use crate::driver::Driver;
use ciclismo_core::clocks::testutils::SettableClock;
use ciclismo_core::db::{Db, Executor};
use ciclismo_core::model::Timestamp;
use std::sync::Arc;
use time::macros::datetime;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver, which never advances on its own.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a fixed clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(ciclismo_core::db::sqlite::testutils::setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2024-03-01 10:00:00.500 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Returns the time the driver currently sees.
    pub(crate) fn now(&self) -> Timestamp {
        use ciclismo_core::clocks::Clock;
        Timestamp::new(self.clock.now_utc())
    }
}

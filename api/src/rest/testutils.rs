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

//! Test utilities for the REST API.

use crate::db::{self, DocumentMapping};
use crate::driver::Driver;
use crate::model::Record;
use crate::rest::app;
use axum::Router;
use ciclismo_core::clocks::Clock;
use ciclismo_core::clocks::testutils::SettableClock;
use ciclismo_core::db::{Db, DbError};
use ciclismo_core::model::{DocumentId, Timestamp};
use std::sync::Arc;
use time::macros::datetime;

pub(crate) struct TestContext {
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<SettableClock>,
    app: Router,
}

impl TestContext {
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(ciclismo_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2024-03-01 10:00:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        let app = app(driver);
        Self { db, clock, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_utc())
    }

    pub(crate) async fn insert<R: DocumentMapping>(&self, fields: &R) -> DocumentId {
        db::insert_document(&mut self.db.ex().await.unwrap(), fields).await.unwrap()
    }

    pub(crate) async fn get<R: DocumentMapping>(&self, id: DocumentId) -> Record<R> {
        db::get_document(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    pub(crate) async fn has<R: DocumentMapping>(&self, id: DocumentId) -> bool {
        match db::get_document::<R>(&mut self.db.ex().await.unwrap(), id).await {
            Ok(_) => true,
            Err(DbError::NotFound) => false,
            Err(e) => panic!("{:?}", e),
        }
    }

    pub(crate) async fn count<R: DocumentMapping>(&self) -> u64 {
        db::count_documents::<R>(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}

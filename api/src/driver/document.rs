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

//! Operations on a single document identified by its id.

use crate::db::{self, DocumentMapping};
use crate::driver::{Driver, map_db_error};
use crate::model::Record;
use ciclismo_core::driver::DriverResult;
use ciclismo_core::model::DocumentId;
use log::info;

impl Driver {
    /// Gets the instance of resource `R` identified by `id`.
    pub(crate) async fn get_document<R: DocumentMapping>(
        self,
        id: DocumentId,
    ) -> DriverResult<Record<R>> {
        let mut ex = self.db.ex().await?;
        db::get_document::<R>(&mut ex, id).await.map_err(map_db_error::<R>)
    }

    /// Overwrites the fields of the instance of resource `R` identified by `id` with the ones
    /// set in `fields`.  Optional fields left unset keep their stored values.
    pub(crate) async fn update_document<R: DocumentMapping>(
        self,
        id: DocumentId,
        fields: R,
    ) -> DriverResult<Record<R>> {
        let mut ex = self.db.ex().await?;
        db::update_document(&mut ex, id, &fields).await.map_err(map_db_error::<R>)?;
        let record = db::get_document::<R>(&mut ex, id).await.map_err(map_db_error::<R>)?;
        info!("Updated document {} in {}", id, R::COLLECTION);
        Ok(record)
    }

    /// Deletes the instance of resource `R` identified by `id`.
    pub(crate) async fn delete_document<R: DocumentMapping>(
        self,
        id: DocumentId,
    ) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        db::delete_document::<R>(&mut ex, id).await.map_err(map_db_error::<R>)?;
        info!("Deleted document {} from {}", id, R::COLLECTION);
        Ok(())
    }
}

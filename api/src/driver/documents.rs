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

//! Operations on a whole collection.

use crate::db::{self, DocumentMapping};
use crate::driver::{Driver, map_db_error};
use crate::model::Record;
use ciclismo_core::db::DbError;
use ciclismo_core::driver::{DriverError, DriverResult};
use log::info;

impl Driver {
    /// Gets all stored instances of resource `R`.
    pub(crate) async fn get_documents<R: DocumentMapping>(self) -> DriverResult<Vec<Record<R>>> {
        let mut ex = self.db.ex().await?;
        let records = db::get_documents::<R>(&mut ex).await?;
        info!("Retrieved {} documents from {}", records.len(), R::COLLECTION);
        Ok(records)
    }

    /// Creates a new instance of resource `R` from the client-supplied `fields`.
    ///
    /// Fields left unset by the client take their default values, and the stored record is
    /// returned as read back from the database.
    pub(crate) async fn create_document<R: DocumentMapping>(
        self,
        fields: R,
    ) -> DriverResult<Record<R>> {
        let fields = fields.with_defaults(self.now());

        let mut ex = self.db.ex().await?;
        let id = db::insert_document(&mut ex, &fields).await?;
        match db::get_document::<R>(&mut ex, id).await {
            Ok(record) => {
                info!("Created document {} in {}", id, R::COLLECTION);
                Ok(record)
            }
            Err(DbError::NotFound) => Err(DriverError::BackendError(format!(
                "Creation of document {} in {} failed",
                id,
                R::COLLECTION
            ))),
            Err(e) => Err(map_db_error::<R>(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::driver::testutils::*;
    use crate::model::testutils::*;
    use crate::model::*;

    #[tokio::test]
    async fn test_get_documents_empty() {
        let context = TestContext::setup().await;

        assert!(context.driver().get_documents::<Usuario>().await.unwrap().is_empty());
        assert!(context.driver().get_documents::<Ruta>().await.unwrap().is_empty());
        assert!(context.driver().get_documents::<Evento>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_documents_some() {
        let context = TestContext::setup().await;

        let id1 = db::insert_document(&mut context.ex().await, &ruta("uno")).await.unwrap();
        let id2 = db::insert_document(&mut context.ex().await, &ruta("dos")).await.unwrap();
        db::insert_document(&mut context.ex().await, &usuario("Ana")).await.unwrap();

        let records = context.driver().get_documents::<Ruta>().await.unwrap();
        assert_eq!(vec![Record::new(id1, ruta("uno")), Record::new(id2, ruta("dos"))], records);
    }

    #[tokio::test]
    async fn test_create_document_applies_defaults() {
        let context = TestContext::setup().await;

        let record = context.driver().create_document(usuario("Ana")).await.unwrap();

        let mut exp_fields = usuario("Ana");
        exp_fields.fecha_registro = Some(context.now());
        assert_eq!(exp_fields, record.fields);

        let stored = db::get_document::<Usuario>(&mut context.ex().await, record.id).await.unwrap();
        assert_eq!(record, stored);
    }

    #[tokio::test]
    async fn test_create_document_keeps_provided_values() {
        let context = TestContext::setup().await;

        let fields = ruta("Ruta del Lago");
        let record = context.driver().create_document(fields.clone()).await.unwrap();
        assert_eq!(fields, record.fields);
    }

    #[tokio::test]
    async fn test_create_document_assigns_distinct_ids() {
        let context = TestContext::setup().await;

        let record1 = context.driver().create_document(evento("Clásica")).await.unwrap();
        let record2 = context.driver().create_document(evento("Clásica")).await.unwrap();
        assert_ne!(record1.id, record2.id);
        assert_eq!(record1.fields, record2.fields);
        assert_eq!(Some(true), record1.fields.inscripcion_abierta);
        assert_eq!(Some(vec![]), record1.fields.participantes);
    }
}

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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::model::testutils::*;
use crate::model::*;
use ciclismo_core::db::{Db, DbError};
use ciclismo_core::model::DocumentId;
use std::sync::Arc;

pub(crate) async fn test_documents_empty(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_documents::<Usuario>(&mut ex).await.unwrap().is_empty());
    assert!(get_documents::<Ruta>(&mut ex).await.unwrap().is_empty());
    assert!(get_documents::<Evento>(&mut ex).await.unwrap().is_empty());
    assert_eq!(0, count_documents::<Usuario>(&mut ex).await.unwrap());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_insert_and_get(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let fields = ruta("Ruta del Lago");
    let id = insert_document(&mut ex, &fields).await.unwrap();

    let record = get_document::<Ruta>(&mut ex, id).await.unwrap();
    assert_eq!(Record::new(id, fields), record);

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_get_documents_in_insertion_order(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let mut exp_records = vec![];
    for nombre in ["Zoe", "Ana", "Marta"] {
        let fields = usuario(nombre);
        let id = insert_document(&mut ex, &fields).await.unwrap();
        exp_records.push(Record::new(id, fields));
    }

    assert_eq!(exp_records, get_documents::<Usuario>(&mut ex).await.unwrap());
    assert_eq!(3, count_documents::<Usuario>(&mut ex).await.unwrap());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_get_documents_sorted_by_id(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let mut exp_ids = vec![];
    for i in 0..50 {
        exp_ids.push(insert_document(&mut ex, &evento(&format!("Etapa {}", i))).await.unwrap());
    }

    let ids: Vec<DocumentId> =
        get_documents::<Evento>(&mut ex).await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(exp_ids, ids);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_collections_are_independent(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let usuario_id = insert_document(&mut ex, &usuario("Ana")).await.unwrap();
    insert_document(&mut ex, &evento("Clásica")).await.unwrap();

    assert!(get_documents::<Ruta>(&mut ex).await.unwrap().is_empty());
    assert_eq!(1, count_documents::<Evento>(&mut ex).await.unwrap());
    assert_eq!(
        DbError::NotFound,
        get_document::<Evento>(&mut ex, usuario_id).await.unwrap_err()
    );

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_get_document_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    insert_document(&mut ex, &usuario("Ana")).await.unwrap();
    assert_eq!(
        DbError::NotFound,
        get_document::<Usuario>(&mut ex, DocumentId::generate()).await.unwrap_err()
    );

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_update_document_keeps_unset_fields(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let original = ruta("Ruta del Lago");
    let id = insert_document(&mut ex, &original).await.unwrap();

    let mut update = original.clone();
    update.nombre = "Ruta del Lago (vuelta larga)".to_owned();
    update.distancia_km = 60.0;
    update.fecha = None;
    update.equipo_usado = None;
    update.notas = None;
    update_document(&mut ex, id, &update).await.unwrap();

    let mut exp_fields = original;
    exp_fields.nombre = "Ruta del Lago (vuelta larga)".to_owned();
    exp_fields.distancia_km = 60.0;
    assert_eq!(Record::new(id, exp_fields), get_document::<Ruta>(&mut ex, id).await.unwrap());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_update_document_without_changes(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let fields = evento("Clásica");
    let id = insert_document(&mut ex, &fields).await.unwrap();
    update_document(&mut ex, id, &fields).await.unwrap();
    assert_eq!(Record::new(id, fields), get_document::<Evento>(&mut ex, id).await.unwrap());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_update_document_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let id = DocumentId::generate();
    assert_eq!(
        DbError::NotFound,
        update_document(&mut ex, id, &usuario("Ana")).await.unwrap_err()
    );
    assert_eq!(0, count_documents::<Usuario>(&mut ex).await.unwrap());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_delete_document(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let id1 = insert_document(&mut ex, &usuario("Ana")).await.unwrap();
    let fields2 = usuario("Marta");
    let id2 = insert_document(&mut ex, &fields2).await.unwrap();

    delete_document::<Usuario>(&mut ex, id1).await.unwrap();
    assert_eq!(DbError::NotFound, get_document::<Usuario>(&mut ex, id1).await.unwrap_err());
    assert_eq!(vec![Record::new(id2, fields2)], get_documents::<Usuario>(&mut ex).await.unwrap());

    assert_eq!(DbError::NotFound, delete_document::<Usuario>(&mut ex, id1).await.unwrap_err());

    drop(ex);
    db.close().await;
}

pub(crate) async fn test_delete_document_wrong_collection(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let id = insert_document(&mut ex, &evento("Clásica")).await.unwrap();
    assert_eq!(DbError::NotFound, delete_document::<Ruta>(&mut ex, id).await.unwrap_err());
    assert_eq!(1, count_documents::<Evento>(&mut ex).await.unwrap());

    drop(ex);
    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        ciclismo_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_documents_empty,
            test_insert_and_get,
            test_get_documents_in_insertion_order,
            test_get_documents_sorted_by_id,
            test_collections_are_independent,
            test_get_document_not_found,
            test_update_document_keeps_unset_fields,
            test_update_document_without_changes,
            test_update_document_not_found,
            test_delete_document,
            test_delete_document_wrong_collection
        );
    }
];

#[cfg(feature = "mongodb")]
mod mongo {
    use super::*;
    use crate::db::init_schema;

    async fn setup() -> Arc<dyn Db + Send + Sync> {
        let db = ciclismo_core::db::mongo::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Arc::new(db)
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires a MongoDB server; set MONGODB_TEST_URL"]
    );
}

mod sqlite {
    use super::*;
    use crate::db::init_schema;

    async fn setup() -> Arc<dyn Db + Send + Sync> {
        let db = ciclismo_core::db::sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Arc::new(db)
    }

    generate_db_tests!(setup().await);
}

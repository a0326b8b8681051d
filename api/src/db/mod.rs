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

//! Database abstraction to store the service's resources as documents.
//!
//! Every resource lives in its own collection, named after `Resource::COLLECTION`.  The
//! operations in this module are generic over the resource type and issue exactly one database
//! call each (except for the SQLite backend, which emulates partial updates with a read and a
//! write).

use crate::model::{Record, Resource};
use bson::{Document, doc};
use ciclismo_core::db::document::get_id;
#[cfg(feature = "mongodb")]
use ciclismo_core::db::mongo::map_mongo_error;
#[cfg(any(feature = "sqlite", test))]
use ciclismo_core::db::sqlite::{self, map_sqlx_error};
use ciclismo_core::db::{DbError, DbResult, Executor};
use ciclismo_core::model::DocumentId;
#[cfg(feature = "mongodb")]
use futures::TryStreamExt;
#[cfg(any(feature = "sqlite", test))]
use sqlx::Row;

mod evento;
mod ruta;
#[cfg(test)]
mod tests;
mod usuario;

/// Conversions between a resource and its stored representation.
pub(crate) trait DocumentMapping: Resource {
    /// Converts the resource into a document, omitting any unset optional fields.
    fn to_document(&self) -> Document;

    /// Builds the resource from a stored document, ignoring the `_id` field.
    fn from_document(doc: &Document) -> DbResult<Self>;
}

/// Builds a record of type `R` from a stored document, including its identifier.
fn record_from_document<R: DocumentMapping>(doc: &Document) -> DbResult<Record<R>> {
    Ok(Record::new(get_id(doc)?, R::from_document(doc)?))
}

/// Serializes `doc` for storage in an SQLite blob.
#[cfg(any(feature = "sqlite", test))]
fn encode(doc: &Document) -> DbResult<Vec<u8>> {
    let mut bytes = vec![];
    doc.to_writer(&mut bytes)?;
    Ok(bytes)
}

/// Deserializes a document stored in an SQLite blob.
#[cfg(any(feature = "sqlite", test))]
fn decode(bytes: &[u8]) -> DbResult<Document> {
    Ok(Document::from_reader(bytes)?)
}

/// Fetches the raw document with identifier `id` from the SQLite backend, if any.
#[cfg(any(feature = "sqlite", test))]
async fn sqlite_get(
    ex: &mut sqlite::SqliteExecutor,
    collection: &str,
    id: DocumentId,
) -> DbResult<Option<Document>> {
    let query_str = "SELECT document FROM documents WHERE collection = ? AND id = ?";
    let row = sqlx::query(query_str)
        .bind(collection)
        .bind(id.to_string())
        .fetch_optional(ex.conn())
        .await
        .map_err(map_sqlx_error)?;
    match row {
        Some(row) => {
            let bytes: Vec<u8> = row.try_get("document").map_err(map_sqlx_error)?;
            Ok(Some(decode(&bytes)?))
        }
        None => Ok(None),
    }
}

/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        // Collections are created on first use.
        #[cfg(feature = "mongodb")]
        Executor::Mongo(_) => Ok(()),

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all stored instances of resource `R` in insertion order.
pub(crate) async fn get_documents<R: DocumentMapping>(
    ex: &mut Executor,
) -> DbResult<Vec<Record<R>>> {
    let docs: Vec<Document> = match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => {
            // Identifiers are generated in increasing order, so they reflect insertion order.
            let cursor = ex
                .collection(R::COLLECTION)
                .find(doc! {})
                .sort(doc! {"_id": 1})
                .await
                .map_err(map_mongo_error)?;
            cursor.try_collect().await.map_err(map_mongo_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT document FROM documents WHERE collection = ? ORDER BY rowid";
            let rows = sqlx::query(query_str)
                .bind(R::COLLECTION)
                .fetch_all(ex.conn())
                .await
                .map_err(map_sqlx_error)?;
            let mut docs = Vec::with_capacity(rows.len());
            for row in rows {
                let bytes: Vec<u8> = row.try_get("document").map_err(map_sqlx_error)?;
                docs.push(decode(&bytes)?);
            }
            docs
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    docs.iter().map(record_from_document::<R>).collect()
}

/// Gets the instance of resource `R` with identifier `id`.
pub(crate) async fn get_document<R: DocumentMapping>(
    ex: &mut Executor,
    id: DocumentId,
) -> DbResult<Record<R>> {
    let doc = match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => ex
            .collection(R::COLLECTION)
            .find_one(doc! {"_id": id.as_object_id()})
            .await
            .map_err(map_mongo_error)?,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite_get(ex, R::COLLECTION, id).await?,

        #[allow(unused)]
        _ => unreachable!(),
    };

    match doc {
        Some(doc) => record_from_document(&doc),
        None => Err(DbError::NotFound),
    }
}

/// Stores a new instance of resource `R` with the given `fields` and returns its identifier.
pub(crate) async fn insert_document<R: DocumentMapping>(
    ex: &mut Executor,
    fields: &R,
) -> DbResult<DocumentId> {
    let id = DocumentId::generate();
    let mut doc = doc! {"_id": id.as_object_id()};
    for (key, value) in fields.to_document() {
        doc.insert(key, value);
    }

    match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => {
            ex.collection(R::COLLECTION).insert_one(doc).await.map_err(map_mongo_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO documents (collection, id, document) VALUES (?, ?, ?)";
            sqlx::query(query_str)
                .bind(R::COLLECTION)
                .bind(id.to_string())
                .bind(encode(&doc)?)
                .execute(ex.conn())
                .await
                .map_err(map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }

    Ok(id)
}

/// Overwrites the fields set in `fields` on the instance of resource `R` with identifier `id`.
///
/// Fields that are unset in `fields` are left untouched.  Updating a document without changing
/// any of its values is not an error.
pub(crate) async fn update_document<R: DocumentMapping>(
    ex: &mut Executor,
    id: DocumentId,
    fields: &R,
) -> DbResult<()> {
    let set = fields.to_document();

    match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => {
            let collection = ex.collection(R::COLLECTION);
            let filter = doc! {"_id": id.as_object_id()};
            if set.is_empty() {
                let count = collection.count_documents(filter).await.map_err(map_mongo_error)?;
                if count == 0 {
                    return Err(DbError::NotFound);
                }
            } else {
                let result = collection
                    .update_one(filter, doc! {"$set": set})
                    .await
                    .map_err(map_mongo_error)?;
                if result.matched_count == 0 {
                    return Err(DbError::NotFound);
                }
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let mut doc = match sqlite_get(ex, R::COLLECTION, id).await? {
                Some(doc) => doc,
                None => return Err(DbError::NotFound),
            };
            for (key, value) in set {
                doc.insert(key, value);
            }

            let query_str = "UPDATE documents SET document = ? WHERE collection = ? AND id = ?";
            let done = sqlx::query(query_str)
                .bind(encode(&doc)?)
                .bind(R::COLLECTION)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(map_sqlx_error)?;
            if done.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }

    Ok(())
}

/// Deletes the instance of resource `R` with identifier `id`.
pub(crate) async fn delete_document<R: DocumentMapping>(
    ex: &mut Executor,
    id: DocumentId,
) -> DbResult<()> {
    let deleted = match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => {
            ex.collection(R::COLLECTION)
                .delete_one(doc! {"_id": id.as_object_id()})
                .await
                .map_err(map_mongo_error)?
                .deleted_count
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM documents WHERE collection = ? AND id = ?";
            let done = sqlx::query(query_str)
                .bind(R::COLLECTION)
                .bind(id.to_string())
                .execute(ex.conn())
                .await
                .map_err(map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if deleted == 0 { Err(DbError::NotFound) } else { Ok(()) }
}

/// Counts the stored instances of resource `R`.
pub(crate) async fn count_documents<R: DocumentMapping>(ex: &mut Executor) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "mongodb")]
        Executor::Mongo(ex) => {
            ex.collection(R::COLLECTION).count_documents(doc! {}).await.map_err(map_mongo_error)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS count FROM documents WHERE collection = ?";
            let row = sqlx::query(query_str)
                .bind(R::COLLECTION)
                .fetch_one(ex.conn())
                .await
                .map_err(map_sqlx_error)?;
            let count: i64 = row.try_get("count").map_err(map_sqlx_error)?;
            u64::try_from(count)
                .map_err(|e| DbError::DataIntegrityError(format!("Invalid count {}: {}", count, e)))
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

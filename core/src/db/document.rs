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

//! Helpers to extract typed fields from BSON documents.
//!
//! Documents written by older versions of a service, or by other clients, do not always carry
//! the exact BSON types that the current code writes.  These helpers are lenient where the data
//! is unambiguous: numeric fields accept any BSON numeric type and timestamp fields accept either
//! a native date-time or an ISO 8601 string.  Fields holding `null` are treated as absent.

use crate::db::{DbError, DbResult};
use crate::model::{DocumentId, Timestamp};
use bson::{Array, Bson, Document};

/// Builds the error for a `key` that is missing from a document.
fn missing(key: &str) -> DbError {
    DbError::DataIntegrityError(format!("Missing field '{}'", key))
}

/// Builds the error for a `key` that holds a `value` of an unexpected type.
fn bad_type(key: &str, value: &Bson) -> DbError {
    DbError::DataIntegrityError(format!(
        "Field '{}' has unexpected type {:?}",
        key,
        value.element_type()
    ))
}

/// Gets the value of `key` in `doc`, treating `null` as absent.
fn get_opt<'a>(doc: &'a Document, key: &str) -> Option<&'a Bson> {
    match doc.get(key) {
        None | Some(Bson::Null) => None,
        Some(value) => Some(value),
    }
}

/// Gets the value of `key` in `doc`, failing if absent.
fn get<'a>(doc: &'a Document, key: &str) -> DbResult<&'a Bson> {
    get_opt(doc, key).ok_or_else(|| missing(key))
}

/// Converts a numeric `value` to an integer if it can be represented exactly.
pub fn bson_to_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        Bson::Double(d) if d.fract() == 0.0 && d.abs() < (i64::MAX as f64) => Some(*d as i64),
        _ => None,
    }
}

/// Converts a numeric `value` to a floating point number.
pub fn bson_to_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(i) => Some(f64::from(*i)),
        Bson::Int64(i) => Some(*i as f64),
        Bson::Double(d) => Some(*d),
        _ => None,
    }
}

/// Gets the document identifier stored in `_id`.
pub fn get_id(doc: &Document) -> DbResult<DocumentId> {
    match get(doc, "_id")? {
        Bson::ObjectId(oid) => Ok(DocumentId::from(*oid)),
        value => Err(bad_type("_id", value)),
    }
}

/// Gets the required string field `key`.
pub fn get_string(doc: &Document, key: &str) -> DbResult<String> {
    match get(doc, key)? {
        Bson::String(s) => Ok(s.clone()),
        value => Err(bad_type(key, value)),
    }
}

/// Gets the optional string field `key`.
pub fn get_opt_string(doc: &Document, key: &str) -> DbResult<Option<String>> {
    match get_opt(doc, key) {
        None => Ok(None),
        Some(Bson::String(s)) => Ok(Some(s.clone())),
        Some(value) => Err(bad_type(key, value)),
    }
}

/// Gets the required integer field `key`.
pub fn get_i64(doc: &Document, key: &str) -> DbResult<i64> {
    let value = get(doc, key)?;
    bson_to_i64(value).ok_or_else(|| bad_type(key, value))
}

/// Gets the required floating point field `key`.
pub fn get_f64(doc: &Document, key: &str) -> DbResult<f64> {
    let value = get(doc, key)?;
    bson_to_f64(value).ok_or_else(|| bad_type(key, value))
}

/// Gets the optional boolean field `key`.
pub fn get_opt_bool(doc: &Document, key: &str) -> DbResult<Option<bool>> {
    match get_opt(doc, key) {
        None => Ok(None),
        Some(Bson::Boolean(b)) => Ok(Some(*b)),
        Some(value) => Err(bad_type(key, value)),
    }
}

/// Gets the optional timestamp field `key`, which may be stored as a date-time or as a string.
pub fn get_opt_timestamp(doc: &Document, key: &str) -> DbResult<Option<Timestamp>> {
    match get_opt(doc, key) {
        None => Ok(None),
        Some(Bson::DateTime(dt)) => Ok(Some(Timestamp::try_from(*dt)?)),
        Some(Bson::String(s)) => Ok(Some(Timestamp::parse(s)?)),
        Some(value) => Err(bad_type(key, value)),
    }
}

/// Gets the required embedded document `key`.
pub fn get_document<'a>(doc: &'a Document, key: &str) -> DbResult<&'a Document> {
    match get(doc, key)? {
        Bson::Document(d) => Ok(d),
        value => Err(bad_type(key, value)),
    }
}

/// Gets the optional array field `key`.
pub fn get_opt_array<'a>(doc: &'a Document, key: &str) -> DbResult<Option<&'a Array>> {
    match get_opt(doc, key) {
        None => Ok(None),
        Some(Bson::Array(a)) => Ok(Some(a)),
        Some(value) => Err(bad_type(key, value)),
    }
}

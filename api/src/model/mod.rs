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

//! Data types for the cycling service.
//!
//! Every resource exposed by the service is a plain struct that describes the fields a client
//! may submit.  Fields that the server can fill in on creation are optional so that the same
//! type can represent partial updates.  The identifier of a stored resource travels separately,
//! in a `Record`.

use ciclismo_core::model::{DocumentId, ModelError, ModelResult, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

mod evento;
pub(crate) use evento::Evento;
#[cfg(test)]
pub(crate) mod testutils;
mod ruta;
pub(crate) use ruta::{Condiciones, Ruta, UsuarioRef};
mod usuario;
pub(crate) use usuario::Usuario;

/// Properties shared by all resources exposed by the service.
pub(crate) trait Resource:
    Clone + Debug + DeserializeOwned + PartialEq + Serialize + Send + Sync + 'static
{
    /// Name of the collection that holds this resource, which is also its REST path component.
    const COLLECTION: &'static str;

    /// Message to return when a requested instance of this resource does not exist.
    const NOT_FOUND: &'static str;

    /// Message to return after deleting an instance of this resource.
    const DELETED: &'static str;

    /// Fills in the fields that were not provided on creation.  `now` is the creation time.
    fn with_defaults(self, now: Timestamp) -> Self;
}

/// A stored instance of a resource `R` along with its identifier.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Record<R> {
    /// Identifier assigned by the database.
    #[serde(rename = "_id")]
    pub(crate) id: DocumentId,

    /// Contents of the resource.
    #[serde(flatten)]
    pub(crate) fields: R,
}

impl<R> Record<R> {
    /// Creates a new record from its parts.
    pub(crate) fn new(id: DocumentId, fields: R) -> Self {
        Self { id, fields }
    }
}

/// Validates a JSON `body` submitted by a client and converts it into a resource of type `R`.
///
/// Any identifier in the body is ignored because identifiers are assigned by the database and
/// travel in the request path on updates.
pub(crate) fn parse_body<R: DeserializeOwned>(body: serde_json::Value) -> ModelResult<R> {
    let mut fields = match body {
        serde_json::Value::Object(fields) => fields,
        _ => return Err(ModelError("El cuerpo de la petición debe ser un objeto JSON".to_owned())),
    };
    fields.remove("_id");
    fields.remove("id");

    serde_json::from_value(serde_json::Value::Object(fields))
        .map_err(|e| ModelError(format!("Datos inválidos: {}", e)))
}

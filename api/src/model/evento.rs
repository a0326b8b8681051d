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

//! The `Evento` resource.

use crate::model::Resource;
use ciclismo_core::model::Timestamp;
use serde::{Deserialize, Serialize};

/// A cycling event that users can sign up for.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Evento {
    /// Name of the event.
    pub(crate) nombre: String,

    /// When the event takes place.  Defaults to the creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fecha_evento: Option<Timestamp>,

    /// Where the event takes place.
    pub(crate) ubicacion: String,

    /// Free-form kind of event, such as "competencia".
    pub(crate) tipo: String,

    /// Numeric identifiers of the participants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) participantes: Option<Vec<i64>>,

    /// Length of the event, in kilometers.
    pub(crate) distancia_km: f64,

    /// Who organizes the event.
    pub(crate) organizador: String,

    /// Whether registration is still open.  Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) inscripcion_abierta: Option<bool>,

    /// Registration fee.
    pub(crate) costo: f64,
}

impl Resource for Evento {
    const COLLECTION: &'static str = "eventos";
    const NOT_FOUND: &'static str = "Evento no encontrado";
    const DELETED: &'static str = "Evento eliminado";

    fn with_defaults(mut self, now: Timestamp) -> Self {
        self.fecha_evento.get_or_insert(now);
        self.participantes.get_or_insert_with(Vec::new);
        self.inscripcion_abierta.get_or_insert(true);
        self
    }
}

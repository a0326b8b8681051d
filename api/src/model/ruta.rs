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

//! The `Ruta` resource.

use crate::model::Resource;
use ciclismo_core::model::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Reference to the cyclist that completed a ride.
///
/// Clients have historically sent both numeric and textual identifiers.  References are never
/// checked against the stored users.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum UsuarioRef {
    /// A numeric identifier.
    Numero(i64),

    /// A textual identifier, such as the hexadecimal rendering of a document identifier.
    Texto(String),
}

/// Weather conditions during a ride.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Condiciones {
    /// Free-form description of the weather.
    pub(crate) clima: String,

    /// Temperature in degrees Celsius.
    pub(crate) temperatura_c: f64,

    /// Wind speed in km/h.
    pub(crate) viento_kmh: f64,
}

/// A ride logged by a cyclist.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Ruta {
    /// The cyclist that logged the ride.
    pub(crate) usuario_id: UsuarioRef,

    /// Name of the ride.
    pub(crate) nombre: String,

    /// Distance covered, in kilometers.
    pub(crate) distancia_km: f64,

    /// Duration of the ride, in minutes.
    pub(crate) tiempo_minutos: i64,

    /// When the ride happened.  Defaults to the creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fecha: Option<Timestamp>,

    /// Accumulated elevation gain, in meters.
    pub(crate) elevacion_m: f64,

    /// Gear used during the ride.  A single string is taken as a one-element list.
    #[serde(
        default,
        deserialize_with = "deserialize_equipo",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) equipo_usado: Option<Vec<String>>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) notas: Option<String>,

    /// Weather conditions.
    pub(crate) condiciones: Condiciones,
}

/// Accepted shapes for the `equipo_usado` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum Equipo {
    /// A single piece of gear.
    Uno(String),

    /// Any number of pieces of gear.
    Varios(Vec<String>),
}

/// Deserializes `equipo_usado`, normalizing a single string into a one-element list.
fn deserialize_equipo<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Equipo>::deserialize(deserializer)?.map(|equipo| match equipo {
        Equipo::Uno(item) => vec![item],
        Equipo::Varios(items) => items,
    }))
}

impl Resource for Ruta {
    const COLLECTION: &'static str = "rutas";
    const NOT_FOUND: &'static str = "Ruta no encontrada";
    const DELETED: &'static str = "Ruta eliminada";

    fn with_defaults(mut self, now: Timestamp) -> Self {
        self.fecha.get_or_insert(now);
        self.equipo_usado.get_or_insert_with(Vec::new);
        self.notas.get_or_insert_with(String::new);
        self
    }
}

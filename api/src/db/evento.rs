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

//! Storage representation of `Evento`.

use crate::db::DocumentMapping;
use crate::model::Evento;
use bson::{Document, doc};
use ciclismo_core::db::document::{
    bson_to_i64, get_f64, get_opt_array, get_opt_bool, get_opt_timestamp, get_string,
};
use ciclismo_core::db::{DbError, DbResult};

impl DocumentMapping for Evento {
    fn to_document(&self) -> Document {
        let mut doc = doc! {
            "nombre": self.nombre.as_str(),
            "ubicacion": self.ubicacion.as_str(),
            "tipo": self.tipo.as_str(),
            "distancia_km": self.distancia_km,
            "organizador": self.organizador.as_str(),
            "costo": self.costo,
        };
        if let Some(fecha_evento) = self.fecha_evento {
            doc.insert("fecha_evento", bson::DateTime::from(fecha_evento));
        }
        if let Some(participantes) = &self.participantes {
            doc.insert("participantes", participantes.clone());
        }
        if let Some(inscripcion_abierta) = self.inscripcion_abierta {
            doc.insert("inscripcion_abierta", inscripcion_abierta);
        }
        doc
    }

    fn from_document(doc: &Document) -> DbResult<Self> {
        let participantes = match get_opt_array(doc, "participantes")? {
            Some(items) => {
                let mut participantes = Vec::with_capacity(items.len());
                for item in items {
                    match bson_to_i64(item) {
                        Some(id) => participantes.push(id),
                        None => {
                            return Err(DbError::DataIntegrityError(format!(
                                "Invalid item in 'participantes': {}",
                                item
                            )));
                        }
                    }
                }
                Some(participantes)
            }
            None => None,
        };

        Ok(Evento {
            nombre: get_string(doc, "nombre")?,
            fecha_evento: get_opt_timestamp(doc, "fecha_evento")?,
            ubicacion: get_string(doc, "ubicacion")?,
            tipo: get_string(doc, "tipo")?,
            participantes,
            distancia_km: get_f64(doc, "distancia_km")?,
            organizador: get_string(doc, "organizador")?,
            inscripcion_abierta: get_opt_bool(doc, "inscripcion_abierta")?,
            costo: get_f64(doc, "costo")?,
        })
    }
}

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

//! Storage representation of `Ruta`.

use crate::db::DocumentMapping;
use crate::model::{Condiciones, Ruta, UsuarioRef};
use bson::{Bson, Document, doc};
use ciclismo_core::db::document::{
    get_document, get_f64, get_i64, get_opt_string, get_opt_timestamp, get_string,
};
use ciclismo_core::db::{DbError, DbResult};

impl DocumentMapping for Ruta {
    fn to_document(&self) -> Document {
        let usuario_id = match &self.usuario_id {
            UsuarioRef::Numero(n) => Bson::Int64(*n),
            UsuarioRef::Texto(s) => Bson::String(s.clone()),
        };
        let mut doc = doc! {
            "usuario_id": usuario_id,
            "nombre": self.nombre.as_str(),
            "distancia_km": self.distancia_km,
            "tiempo_minutos": self.tiempo_minutos,
            "elevacion_m": self.elevacion_m,
            "condiciones": {
                "clima": self.condiciones.clima.as_str(),
                "temperatura_c": self.condiciones.temperatura_c,
                "viento_kmh": self.condiciones.viento_kmh,
            },
        };
        if let Some(fecha) = self.fecha {
            doc.insert("fecha", bson::DateTime::from(fecha));
        }
        if let Some(equipo_usado) = &self.equipo_usado {
            doc.insert("equipo_usado", equipo_usado.clone());
        }
        if let Some(notas) = &self.notas {
            doc.insert("notas", notas.as_str());
        }
        doc
    }

    fn from_document(doc: &Document) -> DbResult<Self> {
        let usuario_id = match doc.get("usuario_id") {
            Some(Bson::String(s)) => UsuarioRef::Texto(s.clone()),
            _ => UsuarioRef::Numero(get_i64(doc, "usuario_id")?),
        };

        let equipo_usado = match doc.get("equipo_usado") {
            None | Some(Bson::Null) => None,
            Some(Bson::String(item)) => Some(vec![item.clone()]),
            Some(Bson::Array(items)) => {
                let mut equipo = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Bson::String(s) => equipo.push(s.clone()),
                        _ => {
                            return Err(DbError::DataIntegrityError(format!(
                                "Invalid item in 'equipo_usado': {}",
                                item
                            )));
                        }
                    }
                }
                Some(equipo)
            }
            Some(value) => {
                return Err(DbError::DataIntegrityError(format!(
                    "Invalid value for 'equipo_usado': {}",
                    value
                )));
            }
        };

        let condiciones = get_document(doc, "condiciones")?;
        let condiciones = Condiciones {
            clima: get_string(condiciones, "clima")?,
            temperatura_c: get_f64(condiciones, "temperatura_c")?,
            viento_kmh: get_f64(condiciones, "viento_kmh")?,
        };

        Ok(Ruta {
            usuario_id,
            nombre: get_string(doc, "nombre")?,
            distancia_km: get_f64(doc, "distancia_km")?,
            tiempo_minutos: get_i64(doc, "tiempo_minutos")?,
            fecha: get_opt_timestamp(doc, "fecha")?,
            elevacion_m: get_f64(doc, "elevacion_m")?,
            equipo_usado,
            notas: get_opt_string(doc, "notas")?,
            condiciones,
        })
    }
}

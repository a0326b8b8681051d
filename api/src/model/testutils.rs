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

//! Test utilities for the data model.

use crate::model::*;
use ciclismo_core::model::Timestamp;

/// Creates a user named `nombre` without any of the optional fields.
pub(crate) fn usuario(nombre: &str) -> Usuario {
    Usuario {
        nombre: nombre.to_owned(),
        email: format!("{}@example.com", nombre.to_lowercase()),
        nivel: "principiante".to_owned(),
        bicicleta: "ruta".to_owned(),
        fecha_registro: None,
    }
}

/// Creates a ride named `nombre` with all of the optional fields set.
pub(crate) fn ruta(nombre: &str) -> Ruta {
    Ruta {
        usuario_id: UsuarioRef::Numero(100),
        nombre: nombre.to_owned(),
        distancia_km: 42.5,
        tiempo_minutos: 125,
        fecha: Some(Timestamp::parse("2023-05-10T00:00:00Z").unwrap()),
        elevacion_m: 350.0,
        equipo_usado: Some(vec!["casco".to_owned(), "guantes".to_owned()]),
        notas: Some("Paré a tomar agua".to_owned()),
        condiciones: Condiciones {
            clima: "soleado".to_owned(),
            temperatura_c: 22.0,
            viento_kmh: 15.0,
        },
    }
}

/// Creates an event named `nombre` without any of the optional fields.
pub(crate) fn evento(nombre: &str) -> Evento {
    Evento {
        nombre: nombre.to_owned(),
        fecha_evento: None,
        ubicacion: "Parque Central".to_owned(),
        tipo: "competencia".to_owned(),
        participantes: None,
        distancia_km: 50.0,
        organizador: "Club Ciclista Local".to_owned(),
        inscripcion_abierta: None,
        costo: 200.0,
    }
}

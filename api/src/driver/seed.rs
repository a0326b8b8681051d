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

//! Population of empty collections with sample documents.

use crate::db::{self, DocumentMapping};
use crate::driver::Driver;
use crate::model::{Condiciones, Evento, Ruta, Usuario, UsuarioRef};
use ciclismo_core::db::Executor;
use ciclismo_core::driver::DriverResult;
use ciclismo_core::model::Timestamp;
use log::info;
use time::macros::datetime;

/// Returns the sample user.
fn sample_usuario() -> Usuario {
    Usuario {
        nombre: "Carlos Méndez".to_owned(),
        email: "carlos@gmail.com".to_owned(),
        nivel: "intermedio".to_owned(),
        bicicleta: "Montaña".to_owned(),
        fecha_registro: Some(Timestamp::new(datetime!(2023-01-15 00:00:00 UTC))),
    }
}

/// Returns the sample ride.
fn sample_ruta() -> Ruta {
    Ruta {
        usuario_id: UsuarioRef::Numero(100),
        nombre: "Ruta del Lago".to_owned(),
        distancia_km: 42.5,
        tiempo_minutos: 125,
        fecha: Some(Timestamp::new(datetime!(2023-05-10 00:00:00 UTC))),
        elevacion_m: 350.0,
        equipo_usado: Some(vec!["casco".to_owned(), "guantes".to_owned()]),
        notas: Some("Excelente recorrido, paré a mitad para tomar agua".to_owned()),
        condiciones: Condiciones {
            clima: "soleado".to_owned(),
            temperatura_c: 22.0,
            viento_kmh: 15.0,
        },
    }
}

/// Returns the sample event.
fn sample_evento() -> Evento {
    Evento {
        nombre: "Gran Fondo de Primavera".to_owned(),
        fecha_evento: Some(Timestamp::new(datetime!(2023-06-15 00:00:00 UTC))),
        ubicacion: "Parque Central".to_owned(),
        tipo: "competencia".to_owned(),
        participantes: Some(vec![]),
        distancia_km: 50.0,
        organizador: "Club Ciclista Local".to_owned(),
        inscripcion_abierta: Some(true),
        costo: 200.0,
    }
}

/// Inserts `sample` into the collection of `R` if, and only if, the collection is empty.
async fn seed_one<R: DocumentMapping>(ex: &mut Executor, sample: R) -> DriverResult<()> {
    if db::count_documents::<R>(ex).await? > 0 {
        return Ok(());
    }
    let id = db::insert_document(ex, &sample).await?;
    info!("Inserted sample document {} into {}", id, R::COLLECTION);
    Ok(())
}

impl Driver {
    /// Stores one sample document in each of the collections that are empty.
    pub(crate) async fn seed_samples(self) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        seed_one(&mut ex, sample_usuario()).await?;
        seed_one(&mut ex, sample_ruta()).await?;
        seed_one(&mut ex, sample_evento()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::Record;
    use crate::model::testutils::*;

    #[tokio::test]
    async fn test_seed_samples_empty_collections() {
        let context = TestContext::setup().await;

        context.driver().seed_samples().await.unwrap();

        let usuarios = db::get_documents::<Usuario>(&mut context.ex().await).await.unwrap();
        assert_eq!(1, usuarios.len());
        assert_eq!(sample_usuario(), usuarios[0].fields);
        assert_eq!(
            "2023-01-15T00:00:00",
            usuarios[0].fields.fecha_registro.as_ref().unwrap().to_string()
        );

        let rutas = db::get_documents::<Ruta>(&mut context.ex().await).await.unwrap();
        assert_eq!(1, rutas.len());
        assert_eq!(sample_ruta(), rutas[0].fields);

        let eventos = db::get_documents::<Evento>(&mut context.ex().await).await.unwrap();
        assert_eq!(1, eventos.len());
        assert_eq!(sample_evento(), eventos[0].fields);
    }

    #[tokio::test]
    async fn test_seed_samples_keeps_existing_documents() {
        let context = TestContext::setup().await;

        let id = db::insert_document(&mut context.ex().await, &usuario("Ana")).await.unwrap();

        context.driver().seed_samples().await.unwrap();

        let usuarios = db::get_documents::<Usuario>(&mut context.ex().await).await.unwrap();
        assert_eq!(vec![Record::new(id, usuario("Ana"))], usuarios);
        assert_eq!(1, db::count_documents::<Ruta>(&mut context.ex().await).await.unwrap());
        assert_eq!(1, db::count_documents::<Evento>(&mut context.ex().await).await.unwrap());
    }

    #[tokio::test]
    async fn test_seed_samples_twice() {
        let context = TestContext::setup().await;

        context.driver().seed_samples().await.unwrap();
        context.driver().seed_samples().await.unwrap();

        assert_eq!(1, db::count_documents::<Usuario>(&mut context.ex().await).await.unwrap());
        assert_eq!(1, db::count_documents::<Ruta>(&mut context.ex().await).await.unwrap());
        assert_eq!(1, db::count_documents::<Evento>(&mut context.ex().await).await.unwrap());
    }
}

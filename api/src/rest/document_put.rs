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

//! API to update an existing document.

use crate::db::DocumentMapping;
use crate::driver::Driver;
use crate::model::parse_body;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use ciclismo_core::model::DocumentId;
use ciclismo_core::rest::{JsonBody, RestError};

/// API handler.
pub(crate) async fn handler<R: DocumentMapping>(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<serde_json::Value>,
) -> Result<impl IntoResponse, RestError> {
    let id = DocumentId::parse(id)?;
    let fields = parse_body::<R>(body)?;
    let record = driver.update_document(id, fields).await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use crate::model::testutils::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use ciclismo_core::model::DocumentId;
    use ciclismo_core::rest::testutils::*;
    use serde_json::json;

    fn route(collection: &str, id: &str) -> (http::Method, String) {
        (http::Method::PUT, format!("/api/{}/{}", collection, id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let id = context.insert(&usuario("Ana")).await;

        let mut fields = usuario("Ana");
        fields.nivel = "avanzado".to_owned();
        let response = OneShotBuilder::new(
            context.app(),
            route(Usuario::COLLECTION, &id.to_string()),
        )
        .send_json(&fields)
        .await
        .expect_json::<Record<Usuario>>()
        .await;
        assert_eq!(Record::new(id, fields), response);
        assert_eq!(response, context.get::<Usuario>(id).await);
    }

    #[tokio::test]
    async fn test_omitted_optional_fields_are_kept() {
        let context = TestContext::setup().await;

        let id = context.insert(&ruta("Ruta del Lago")).await;

        let mut request = serde_json::to_value(ruta("Ruta del Lago")).unwrap();
        let fields = request.as_object_mut().unwrap();
        fields.remove("fecha");
        fields.remove("equipo_usado");
        fields.insert("notas".to_owned(), json!(null));
        fields.insert("tiempo_minutos".to_owned(), json!(140));
        let response = OneShotBuilder::new(context.app(), route(Ruta::COLLECTION, &id.to_string()))
            .send_json(request)
            .await
            .expect_json::<Record<Ruta>>()
            .await;

        let mut exp_fields = ruta("Ruta del Lago");
        exp_fields.tiempo_minutos = 140;
        assert_eq!(Record::new(id, exp_fields), response);
        assert_eq!(response, context.get::<Ruta>(id).await);
    }

    #[tokio::test]
    async fn test_without_changes() {
        let context = TestContext::setup().await;

        let id = context.insert(&evento("Clásica")).await;

        let response = OneShotBuilder::new(
            context.app(),
            route(Evento::COLLECTION, &id.to_string()),
        )
        .send_json(evento("Clásica"))
        .await
        .expect_json::<Record<Evento>>()
        .await;
        assert_eq!(Record::new(id, evento("Clásica")), response);
    }

    #[tokio::test]
    async fn test_id_in_body_is_ignored() {
        let context = TestContext::setup().await;

        let id = context.insert(&usuario("Ana")).await;
        let other_id = context.insert(&usuario("Luis")).await;

        let mut request = serde_json::to_value(usuario("Ana María")).unwrap();
        request["_id"] = json!(other_id.to_string());
        let response = OneShotBuilder::new(
            context.app(),
            route(Usuario::COLLECTION, &id.to_string()),
        )
        .send_json(request)
        .await
        .expect_json::<Record<Usuario>>()
        .await;
        assert_eq!(Record::new(id, usuario("Ana María")), response);
        assert_eq!(Record::new(other_id, usuario("Luis")), context.get::<Usuario>(other_id).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let id = DocumentId::generate().to_string();
        OneShotBuilder::new(context.app(), route(Usuario::COLLECTION, &id))
            .send_json(usuario("Ana"))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("^Usuario no encontrado$")
            .await;
        assert_eq!(0, context.count::<Usuario>().await);
    }

    #[tokio::test]
    async fn test_bad_id() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(Ruta::COLLECTION, "not-an-id"))
            .send_json(ruta("Ruta del Lago"))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Identificador inválido")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let context = TestContext::setup().await;

        let id = context.insert(&usuario("Ana")).await;

        OneShotBuilder::new(context.app(), route(Usuario::COLLECTION, &id.to_string()))
            .send_json(json!({"nombre": "Ana"}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Datos inválidos")
            .await;
        assert_eq!(Record::new(id, usuario("Ana")), context.get::<Usuario>(id).await);
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route("usuarios", "64b7f1a2c3d4e5f60718293a")
    );
}

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

//! Entry point to the REST server.

use crate::db::DocumentMapping;
use crate::driver::Driver;
use crate::model::{Evento, Ruta, Usuario};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

mod document_delete;
mod document_get;
mod document_put;
mod documents_get;
mod documents_post;
#[cfg(test)]
mod testutils;

/// Registers the collection and document APIs for resource `R` in `router`.
fn resource_routes<R: DocumentMapping>(router: Router<Driver>) -> Router<Driver> {
    use axum::routing::get;
    router
        .route(
            &format!("/api/{}", R::COLLECTION),
            get(documents_get::handler::<R>).post(documents_post::handler::<R>),
        )
        .route(
            &format!("/api/{}/:id", R::COLLECTION),
            get(document_get::handler::<R>)
                .put(document_put::handler::<R>)
                .delete(document_delete::handler::<R>),
        )
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let router = Router::new();
    let router = resource_routes::<Usuario>(router);
    let router = resource_routes::<Ruta>(router);
    let router = resource_routes::<Evento>(router);
    router.with_state(driver).layer(cors)
}

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

//! The `Usuario` resource.

use crate::model::Resource;
use ciclismo_core::model::Timestamp;
use serde::{Deserialize, Serialize};

/// A registered cyclist.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct Usuario {
    /// Full name of the cyclist.
    pub(crate) nombre: String,

    /// Contact email address.  Not validated.
    pub(crate) email: String,

    /// Free-form experience level, such as "principiante".
    pub(crate) nivel: String,

    /// Kind of bicycle the cyclist rides.
    pub(crate) bicicleta: String,

    /// When the cyclist registered.  Defaults to the creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fecha_registro: Option<Timestamp>,
}

impl Resource for Usuario {
    const COLLECTION: &'static str = "usuarios";
    const NOT_FOUND: &'static str = "Usuario no encontrado";
    const DELETED: &'static str = "Usuario eliminado";

    fn with_defaults(mut self, now: Timestamp) -> Self {
        self.fecha_registro.get_or_insert(now);
        self
    }
}

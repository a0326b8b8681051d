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

//! Storage representation of `Usuario`.

use crate::db::DocumentMapping;
use crate::model::Usuario;
use bson::{Document, doc};
use ciclismo_core::db::DbResult;
use ciclismo_core::db::document::{get_opt_timestamp, get_string};

impl DocumentMapping for Usuario {
    fn to_document(&self) -> Document {
        let mut doc = doc! {
            "nombre": self.nombre.as_str(),
            "email": self.email.as_str(),
            "nivel": self.nivel.as_str(),
            "bicicleta": self.bicicleta.as_str(),
        };
        if let Some(fecha_registro) = self.fecha_registro {
            doc.insert("fecha_registro", bson::DateTime::from(fecha_registro));
        }
        doc
    }

    fn from_document(doc: &Document) -> DbResult<Self> {
        Ok(Usuario {
            nombre: get_string(doc, "nombre")?,
            email: get_string(doc, "email")?,
            nivel: get_string(doc, "nivel")?,
            bicicleta: get_string(doc, "bicicleta")?,
            fecha_registro: get_opt_timestamp(doc, "fecha_registro")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::Bson;
    use ciclismo_core::db::DbError;
    use ciclismo_core::model::Timestamp;

    #[test]
    fn test_usuario_to_document_uses_native_dates() {
        let usuario = Usuario {
            nombre: "Carlos Méndez".to_owned(),
            email: "carlos@gmail.com".to_owned(),
            nivel: "intermedio".to_owned(),
            bicicleta: "Montaña".to_owned(),
            fecha_registro: Some(Timestamp::parse("2023-01-15T00:00:00Z").unwrap()),
        };
        let doc = usuario.to_document();
        match doc.get("fecha_registro") {
            Some(Bson::DateTime(dt)) => assert_eq!(1673740800000, dt.timestamp_millis()),
            other => panic!("Unexpected value {:?}", other),
        }
        assert_eq!(usuario, Usuario::from_document(&doc).unwrap());
    }

    #[test]
    fn test_usuario_to_document_omits_unset_fields() {
        let usuario = Usuario {
            nombre: "Ana".to_owned(),
            email: "ana@x.com".to_owned(),
            nivel: "principiante".to_owned(),
            bicicleta: "ruta".to_owned(),
            fecha_registro: None,
        };
        let doc = usuario.to_document();
        assert!(!doc.contains_key("fecha_registro"));
        assert_eq!(usuario, Usuario::from_document(&doc).unwrap());
    }

    #[test]
    fn test_usuario_from_legacy_document() {
        let doc = doc! {
            "_id": 100,
            "nombre": "Carlos Méndez",
            "email": "carlos@gmail.com",
            "nivel": "intermedio",
            "bicicleta": "Montaña",
            "fecha_registro": "2023-01-15T00:00:00",
        };
        let usuario = Usuario::from_document(&doc).unwrap();
        assert_eq!(
            Some(Timestamp::parse("2023-01-15T00:00:00Z").unwrap()),
            usuario.fecha_registro
        );
    }

    #[test]
    fn test_usuario_from_document_missing_field() {
        let doc = doc! {"nombre": "Ana", "email": "ana@x.com", "nivel": "principiante"};
        assert_eq!(
            DbError::DataIntegrityError("Missing field 'bicicleta'".to_owned()),
            Usuario::from_document(&doc).unwrap_err()
        );
    }
}

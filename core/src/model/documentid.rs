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

//! The `DocumentId` data type.

use crate::model::{ModelError, ModelResult};
use bson::oid::ObjectId;
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document within a collection.
///
/// On the wire, identifiers are always rendered as the 24-hex-digit string form of the database's
/// native `ObjectId`.  Any string that does not follow that format is rejected at construction
/// time so that malformed identifiers never reach the database.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generates a new unique identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Creates a new identifier from an untrusted string `s`, making sure it is valid.
    pub fn parse<S: AsRef<str>>(s: S) -> ModelResult<Self> {
        let s = s.as_ref();
        match ObjectId::parse_str(s) {
            Ok(oid) => Ok(Self(oid)),
            Err(_) => Err(ModelError(format!(
                "Identificador inválido '{}': debe ser un ObjectId de 24 dígitos hexadecimales",
                s
            ))),
        }
    }

    /// Returns the identifier in the database's native representation.
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_hex())
    }
}

/// Visitor to deserialize a `DocumentId` from a string.
struct DocumentIdVisitor;

impl Visitor<'_> for DocumentIdVisitor {
    type Value = DocumentId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(r#"a 24-hex-digit document identifier"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        DocumentId::parse(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(DocumentIdVisitor)
    }
}

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

//! Generic data types shared by all services.
//!
//! The types in here are the bridge between the wire format and the database's native format.
//! They all validate their input at construction time, so that a value of one of these types is
//! always correct once created.

mod documentid;
pub use documentid::DocumentId;
mod timestamp;
pub use timestamp::Timestamp;

/// Model errors.  These errors indicate problems with the contents of the data supplied by the
/// caller and are meant to be surfaced to the user as is.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

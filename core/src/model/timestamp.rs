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

//! The `Timestamp` data type.

use crate::model::{ModelError, ModelResult};
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Range of years that timestamps can hold, which is what four-digit ISO 8601 years can express.
const VALID_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A point in time as stored in documents.
///
/// Timestamps are kept in UTC with millisecond precision, which is what BSON date-times can
/// represent.  On the wire they are rendered as naive ISO 8601 date-times without an offset,
/// such as `2023-05-10T08:30:00` or `2023-05-10T08:30:00.250`, and are always in UTC.  Parsing
/// accepts that same form plus RFC 3339 and plain dates (midnight UTC), so rendering a parsed
/// naive string yields the same string back.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Creates a new timestamp from a trusted `dt`, dropping any sub-millisecond precision.
    ///
    /// `dt` must fall within years 0 to 9999 once converted to UTC.  Use `parse` or the
    /// `TryFrom` conversions for untrusted values.
    pub fn new(dt: OffsetDateTime) -> Self {
        let dt = dt.to_offset(UtcOffset::UTC);
        match dt.replace_millisecond(dt.millisecond()) {
            Ok(dt) => Self(dt),
            Err(_) => unreachable!("Milliseconds come from a valid timestamp"),
        }
    }

    /// Creates a new timestamp from an untrusted `dt`, making sure its year can be rendered.
    fn checked(dt: OffsetDateTime) -> ModelResult<Self> {
        let ts = Self::new(dt);
        if !VALID_YEARS.contains(&ts.0.year()) {
            return Err(ModelError(format!(
                "Fecha fuera de rango: el año {} no está entre {} y {}",
                ts.0.year(),
                VALID_YEARS.start(),
                VALID_YEARS.end()
            )));
        }
        Ok(ts)
    }

    /// Creates a new timestamp from an untrusted string `s`, making sure it is valid.
    pub fn parse<S: AsRef<str>>(s: S) -> ModelResult<Self> {
        let s = s.as_ref();

        if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
            return Self::checked(dt);
        }

        let naive = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        if let Ok(dt) = PrimitiveDateTime::parse(s, naive) {
            return Self::checked(dt.assume_utc());
        }

        if let Ok(date) = Date::parse(s, format_description!("[year]-[month]-[day]")) {
            return Self::checked(date.midnight().assume_utc());
        }

        Err(ModelError(format!("Fecha inválida '{}': se esperaba una fecha ISO 8601", s)))
    }

    /// Returns the timestamp as an `OffsetDateTime` in UTC.
    pub fn as_offset_datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Renders the timestamp in its wire form, omitting the fraction when it is zero.
    fn format(&self) -> Result<String, time::error::Format> {
        if self.0.millisecond() == 0 {
            self.0.format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        } else {
            self.0.format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
            ))
        }
    }
}

impl TryFrom<bson::DateTime> for Timestamp {
    type Error = ModelError;

    fn try_from(dt: bson::DateTime) -> ModelResult<Self> {
        Self::checked(dt.to_time_0_3())
    }
}

impl From<Timestamp> for bson::DateTime {
    fn from(ts: Timestamp) -> Self {
        bson::DateTime::from_time_0_3(ts.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.format().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.format() {
            Ok(s) => serializer.serialize_str(&s),
            Err(e) => Err(serde::ser::Error::custom(format!("Cannot format timestamp: {}", e))),
        }
    }
}

/// Visitor to deserialize a `Timestamp` from a string.
struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(r#"an ISO 8601 date or date-time"#)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Timestamp::parse(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }
}

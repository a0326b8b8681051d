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

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

        // Truncate the timestamp to millisecond resolution as this is the resolution supported by
        // BSON date-times.  Otherwise, a freshly-created timestamp would not compare equal to the
        // same timestamp after a round trip through the database.
        let nanos = nanos / 1_000_000 * 1_000_000;

        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .expect("nanos must be in range because they come from the current timestamp")
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// A clock that returns a preconfigured instant and that can be modified at will.
    ///
    /// Only supports millisecond-level precision.
    pub struct SettableClock {
        /// Current fake time in milliseconds.
        now_ms: AtomicU64,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured with `set`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now_ms: AtomicU64::new(to_millis(now)) }
        }

        /// Sets the new value of `now` that the clock returns.
        pub fn set(&self, now: OffsetDateTime) {
            self.now_ms.store(to_millis(now), Ordering::SeqCst);
        }

        /// Advances the current time by `delta`.
        pub fn advance(&self, delta: Duration) {
            let delta_ns = delta.as_nanos();
            assert!(delta_ns % 1_000_000 == 0, "Sub-millisecond precision not supported");
            let delta_ms = u64::try_from(delta_ns / 1_000_000).unwrap();
            self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
        }
    }

    /// Converts `now` to milliseconds since the epoch, panicking if precision would be lost.
    fn to_millis(now: OffsetDateTime) -> u64 {
        let now_ns = now.unix_timestamp_nanos();
        assert!(now_ns % 1_000_000 == 0, "Sub-millisecond precision not supported");
        u64::try_from(now_ns / 1_000_000).unwrap()
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now_ms = self.now_ms.load(Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp_nanos(now_ms as i128 * 1_000_000).unwrap()
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_systemclock_trivial() {
        let clock = SystemClock::default();
        let now1 = clock.now_utc();
        assert!(now1.unix_timestamp_nanos() > 0);
        let now2 = clock.now_utc();
        assert!(now2 >= now1);
    }

    #[test]
    fn test_systemclock_millisecond_resolution() {
        let clock = SystemClock::default();
        let now = clock.now_utc();
        assert!(now.unix_timestamp_nanos() > 0);
        assert_eq!(0, now.nanosecond() % 1_000_000);
    }
}

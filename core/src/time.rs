// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::TimeZone;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Build a datetime from whole unix seconds.
///
/// Returns `None` if the value is out of range.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime> {
    Utc.timestamp_opt(secs, 0).single()
}

/// Format time into unix seconds: `1000000000`.
///
/// Sub-second precision is dropped.
pub fn format_unix_seconds(t: DateTime) -> String {
    t.timestamp().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unix_seconds() {
        let t = from_unix_seconds(1_000_000_000).expect("in range");
        assert_eq!(format_unix_seconds(t), "1000000000");

        let t = t + chrono::TimeDelta::milliseconds(999);
        assert_eq!(format_unix_seconds(t), "1000000000");
    }
}

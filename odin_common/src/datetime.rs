/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fmt;
use std::sync::atomic::{AtomicI64,Ordering};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Serialize,Deserialize};

/// milliseconds since 1970-01-01T00:00:00Z. This is what we put on the wire for all timestamps
#[derive(Serialize,Deserialize,Debug,Default,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new(millis:i64)->Self { EpochMillis(millis) }

    pub fn from_secs(secs: i64)->Self { EpochMillis(secs*1000) }

    pub fn millis(&self)->i64 { self.0 }

    /// note this truncates towards zero
    pub fn secs(&self)->i64 { self.0 / 1000 }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0)
        }
    }
}

impl From<DateTime<Utc>> for EpochMillis {
    fn from (date: DateTime<Utc>)->Self { EpochMillis(date.timestamp_millis()) }
}

/* #region clocks ***********************************************************************************************/

/// abstraction for the source of "now". Everything that computes ages or staleness should go
/// through a Clock so that we can run with simulated or fixed time
pub trait Clock: Send + Sync {
    fn now (&self)->DateTime<Utc>;

    fn now_millis (&self)->EpochMillis { EpochMillis::from( self.now()) }
}

/// the wall clock
#[derive(Debug,Default,Clone,Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline] fn now (&self)->DateTime<Utc> { Utc::now() }
}

/// a clock that only moves if told so. Mostly used for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64
}

impl FixedClock {
    pub fn new (now: DateTime<Utc>)->Self {
        FixedClock { millis: AtomicI64::new( now.timestamp_millis()) }
    }

    pub fn set (&self, now: DateTime<Utc>) {
        self.millis.store( now.timestamp_millis(), Ordering::Relaxed);
    }

    pub fn advance (&self, delta: TimeDelta) {
        self.millis.fetch_add( delta.num_milliseconds(), Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now (&self)->DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis( self.millis.load(Ordering::Relaxed)).unwrap_or_default()
    }
}

/* #endregion clocks */

//--- culture invariant parsing

/// parse an ISO-8601 calendar date ("2025-03-14"). This never depends on locale settings
pub fn parse_iso_date (s: &str)->Option<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), "%Y-%m-%d").ok()
}

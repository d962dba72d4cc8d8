/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
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
#![allow(unused)]

//! fixtures shared by the aircraft list tests

use std::sync::Arc;
use chrono::{DateTime, TimeDelta, Utc};
use odin_common::datetime::{EpochMillis, FixedClock};
use odin_aclist::{
    AcListConfig, AircraftListBuilder, AircraftSnapshot, Candidate, FeedSnapshot, SharedConfig, TrailPoint, Versioned,
    aircraft::AltitudeType
};

/// 2025-10-17T11:20:00Z
pub const T0: i64 = 1_760_700_000_000;

pub fn millis (secs_after_t0: i64)->EpochMillis { EpochMillis::new( T0 + secs_after_t0 * 1000) }

pub fn v<T> (value: T, changed: i64)->Versioned<T> { Versioned::new( value, changed) }

/// an aircraft with a handful of fields set, all changed at or before version 6
pub fn sample_aircraft (id: i32)->AircraftSnapshot {
    let mut ac = AircraftSnapshot::new( id, millis(0));
    ac.icao24 = v( "ABC123".to_string(), 1);
    ac.registration = v( "G-ABCD".to_string(), 1);
    ac.callsign = v( "BAW123".to_string(), 2);
    ac.squawk = v( 1234, 2);
    ac.altitude = v( 9770, 5);
    ac.geometric_altitude = v( 9900, 1);
    ac.altitude_type = v( AltitudeType::Barometric, 1);
    ac.latitude = v( 51.5, 5);
    ac.longitude = v( -0.1, 5);
    ac.position_is_mlat = v( false, 3);
    ac.position_time = v( millis(10), 5);
    ac.track = v( 90.0, 4);
    ac.ground_speed = v( 250.0, 4);
    ac.signal_level = v( 100, 6);
    ac.type_code = v( "A320".to_string(), 1);
    ac.picture_file_name = v( "abc123.jpg".to_string(), 1);
    ac
}

pub fn point (changed: i64, secs: i64, lat: f64, lon: f64, track: f64, altitude: i32, speed: f64)->TrailPoint {
    TrailPoint {
        changed,
        time: millis(secs),
        lat,
        lon,
        track: Some(track),
        altitude: Some(altitude),
        ground_speed: Some(speed)
    }
}

pub fn candidate (ac: &AircraftSnapshot)->Candidate<'_> {
    Candidate { aircraft: ac, distance_km: None }
}

pub fn utc (secs_after_t0: i64)->DateTime<Utc> {
    DateTime::from_timestamp_millis( T0 + secs_after_t0 * 1000).unwrap()
}

pub struct TestEnv {
    pub config: Arc<SharedConfig>,
    pub clock: Arc<FixedClock>,
    pub builder: AircraftListBuilder,
}

/// a builder with a shared (updatable) config and a fixed clock that is set to T0 + 60sec
pub fn test_env (config: AcListConfig)->TestEnv {
    let config = Arc::new( SharedConfig::new( config));
    let clock = Arc::new( FixedClock::new( utc(60)));
    let builder = AircraftListBuilder::new( config.clone(), clock.clone());
    TestEnv { config, clock, builder }
}

pub fn feed (id: i32, aircraft: Vec<AircraftSnapshot>)->FeedSnapshot {
    FeedSnapshot::new( id, format!("feed {id}"), aircraft)
}

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

//! flat numeric trail arrays as expected by browser clients.
//!
//! Full trails without flavor are `[lat,lon,track, ...]` triples with intermediate points of
//! straight legs merged away. Altitude and speed flavored full trails are `[lat,lon,track,value, ...]`
//! quadruples with rounded track/value, ending in the live state of the aircraft. Short trails are
//! `[lat,lon,epochMillis,value, ...]` quadruples without rounding or merging.

use serde::Serialize;
use odin_common::geo::round_to;

use crate::aircraft::{AircraftSnapshot, TrailPoint};
use crate::fields::FieldGroup;
use crate::request::{TrailFlavor, TrailRequest, TrailType};

pub const TRACK_ROUNDING: f64 = 10.0;
pub const ALTITUDE_ROUNDING: f64 = 1000.0;
pub const SPEED_ROUNDING: f64 = 10.0;

/// a single number of a trail array. Unknown track/altitude/speed values are sent as null
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
#[serde(untagged)]
pub enum TrailValue {
    Int(i64),
    Float(f64),
    Null,
}

impl TrailValue {
    fn float (v: Option<f64>)->Self { v.map_or( TrailValue::Null, TrailValue::Float) }
    fn int (v: Option<i64>)->Self { v.map_or( TrailValue::Null, TrailValue::Int) }
    fn rounded (v: Option<f64>, step: f64)->Self { TrailValue::int( v.map( |v| round_to( v, step) as i64)) }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Trail {
    pub kind: TrailType,
    pub flavor: TrailFlavor,
    pub values: Vec<TrailValue>,
    /// the client has to drop what it has and replace it with `values`
    pub reset: bool,
}

impl Trail {
    pub fn is_empty (&self)->bool { self.values.is_empty() }

    /// number of trail points (not numbers) in this trail
    pub fn len (&self)->usize {
        let stride = if self.kind == TrailType::Full && self.flavor == TrailFlavor::Plain { 3 } else { 4 };
        self.values.len() / stride
    }
}

/// build the trail for `ac` that has to be sent to a client which has seen everything up to
/// `previous_version`. If `reset` is set (or there is no previous version) the complete trail is sent.
/// Returns None if no trail was requested
pub fn build_trail (ac: &AircraftSnapshot, request: TrailRequest, previous_version: Option<i64>, reset: bool)->Option<Trail> {
    let since = if reset { None } else { previous_version };
    let is_new = |p: &TrailPoint| since.is_none_or( |v| p.changed > v);

    let values = match (request.kind, request.flavor) {
        (TrailType::None, _) => return None,
        (TrailType::Short, flavor) => short_trail( &ac.short_coordinates, flavor, is_new),
        (TrailType::Full, TrailFlavor::Plain) => merged_full_trail( &ac.full_coordinates, is_new),
        (TrailType::Full, flavor) => flavored_full_trail( ac, flavor, since, is_new),
    };

    Some( Trail { kind: request.kind, flavor: request.flavor, values, reset } )
}

fn short_trail (points: &[TrailPoint], flavor: TrailFlavor, is_new: impl Fn(&TrailPoint)->bool)->Vec<TrailValue> {
    let mut values = Vec::new();

    for p in points.iter().filter( |p| is_new(*p)) {
        values.push( TrailValue::Float( p.lat));
        values.push( TrailValue::Float( p.lon));
        values.push( TrailValue::Int( p.time.millis()));
        values.push( match flavor {
            TrailFlavor::Plain => TrailValue::float( p.track),
            TrailFlavor::Altitude => TrailValue::int( p.altitude.map(i64::from)),
            TrailFlavor::Speed => TrailValue::float( p.ground_speed),
        });
    }
    values
}

/// a point is only needed if it starts or ends a leg. Points in between only record altitude or speed changes
fn merged_full_trail (points: &[TrailPoint], is_new: impl Fn(&TrailPoint)->bool)->Vec<TrailValue> {
    let mut values = Vec::new();
    let last = points.len().saturating_sub(1);

    for (i,p) in points.iter().enumerate() {
        let is_leg_end = i == 0 || i == last
            || p.track != points[i-1].track
            || p.track != points[i+1].track;

        if is_leg_end && is_new(p) {
            values.push( TrailValue::Float( p.lat));
            values.push( TrailValue::Float( p.lon));
            values.push( TrailValue::float( p.track));
        }
    }
    values
}

/// lat, lon, track and value of a flavored full trail point
type RoundedPoint = (f64, f64, TrailValue, TrailValue);

fn rounded_point (lat: f64, lon: f64, track: Option<f64>, altitude: Option<i32>, speed: Option<f64>, flavor: TrailFlavor)->RoundedPoint {
    let value = match flavor {
        TrailFlavor::Speed => TrailValue::rounded( speed, SPEED_ROUNDING),
        _ => TrailValue::rounded( altitude.map(f64::from), ALTITUDE_ROUNDING),
    };
    (lat, lon, TrailValue::rounded( track, TRACK_ROUNDING), value)
}

fn flavored_full_trail (ac: &AircraftSnapshot, flavor: TrailFlavor, since: Option<i64>, is_new: impl Fn(&TrailPoint)->bool)->Vec<TrailValue> {
    let mut values = Vec::new();
    let mut push = |(lat,lon,track,value): RoundedPoint| {
        values.extend_from_slice( &[TrailValue::Float(lat), TrailValue::Float(lon), track, value]);
    };

    let points = &ac.full_coordinates;
    for p in points.iter().filter( |p| is_new(*p)) {
        push( rounded_point( p.lat, p.lon, p.track, p.altitude, p.ground_speed, flavor));
    }

    if let Some(live) = live_point( ac, flavor, since) {
        let last_recorded = points.last().map( |p| rounded_point( p.lat, p.lon, p.track, p.altitude, p.ground_speed, flavor));
        if last_recorded.is_none_or( |last| last != live) {
            push( live);
        }
    }

    values
}

/// the current state of the aircraft as a rounded trail point, provided it has a position and
/// changed after `since`
fn live_point (ac: &AircraftSnapshot, flavor: TrailFlavor, since: Option<i64>)->Option<RoundedPoint> {
    let pos = ac.position()?;

    let is_changed_since = |v: i64| {
        let value_changed = match flavor {
            TrailFlavor::Speed => ac.ground_speed.is_changed_since(v),
            _ => ac.altitude.is_changed_since(v),
        };
        FieldGroup::Position.changed(ac) > v || ac.track.is_changed_since(v) || value_changed
    };

    if since.is_none_or( is_changed_since) {
        Some( rounded_point( pos.lat, pos.lon, ac.track.copied(), ac.altitude.copied(), ac.ground_speed.copied(), flavor))
    } else {
        None
    }
}

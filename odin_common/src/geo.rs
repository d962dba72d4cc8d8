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

//! distance and bearing between positions given as geodetic degrees. The computations are delegated
//! to the haversine metric space of the [geo](https://docs.rs/geo/latest/geo/index.html) crate, we only
//! add [uom](https://docs.rs/uom/latest/uom/) lengths and the rounding needed for serialized values.
//! The spherical model is accurate to about 0.5% which is well below what we need for distance/bearing
//! annotations of tracked objects.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Bearing, Distance, Point};
use geo::algorithm::line_measures::metric_spaces::Haversine;
use uom::si::{f64::Length, length::{meter,kilometer}};

use crate::angle::normalize_360;

/// a plain latitude/longitude pair in degrees. We keep this as two f64 since positions
/// come in as such from the trackers and we do not want to normalize values we echo back
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    pub lat: f64,
    pub lon: f64
}

impl GeoPos {
    pub fn new (lat: f64, lon: f64)->Self { GeoPos{ lat, lon } }

    pub fn from_options (lat: Option<f64>, lon: Option<f64>)->Option<Self> {
        match (lat,lon) {
            (Some(lat),Some(lon)) => Some( GeoPos{lat,lon}),
            _ => None
        }
    }

    /// note that geo points are (x,y), i.e. longitude comes first
    #[inline] pub fn point (&self)->Point { Point::new( self.lon, self.lat) }

    #[inline] pub fn distance_to (&self, other: &GeoPos)->Length { great_circle_distance( self, other) }
    #[inline] pub fn bearing_to (&self, other: &GeoPos)->f64 { initial_bearing( self, other) }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.lat, self.lon)
    }
}

/// haversine distance between two positions
pub fn great_circle_distance (from: &GeoPos, to: &GeoPos)->Length {
    let dist = Haversine.distance( from.point(), to.point());
    Length::new::<meter>(dist)
}

#[inline]
pub fn distance_km (from: &GeoPos, to: &GeoPos)->f64 {
    great_circle_distance( from, to).get::<kilometer>()
}

/// initial (forward azimuth) bearing in degrees [0..360) when travelling from `from` to `to` on a great circle.
/// Coincident positions yield 0
pub fn initial_bearing (from: &GeoPos, to: &GeoPos)->f64 {
    normalize_360( Haversine.bearing( from.point(), to.point()))
}

/// round to the nearest multiple of `step`. Halfway values round away from zero, i.e. a track of 85
/// becomes 90 and an altitude of -1500 becomes -2000. Trail values on the wire depend on this
#[inline]
pub fn round_to (value: f64, step: f64)->f64 {
    (value / step).round() * step
}

/// round to given number of decimals. Used to keep serialized floats short
#[inline]
pub fn round_decimals (value: f64, decimals: i32)->f64 {
    let f = 10f64.powi(decimals);
    (value * f).round() / f
}

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

//! typed value predicates for aircraft list requests.
//!
//! Each predicate decides on a single (optional) value. An unknown value never passes a positive
//! predicate and always passes a reversed one. Predicates without a test value (empty strings,
//! ranges without bounds) are inactive and pass everything. All active predicates of an
//! [`AircraftListFilter`] are combined with a logical AND.

use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize,Deserialize};
use odin_common::{BoundingBox, datetime::{EpochMillis, parse_iso_date}, geo::GeoPos};

use crate::aircraft::{AircraftSnapshot, Candidate, EngineType, Species, WakeTurbulenceCategory};
use crate::errors::{OdinAcListError, Result, invalid_argument};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FilterCondition { Equals, Contains, StartsWith, EndsWith }

impl FilterCondition {
    /// the single letter condition codes used in query strings: Q(equals), C(ontains), S(tarts with), E(nds with)
    pub fn from_code (code: &str)->Result<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "Q" => Ok(FilterCondition::Equals),
            "C" => Ok(FilterCondition::Contains),
            "S" => Ok(FilterCondition::StartsWith),
            "E" => Ok(FilterCondition::EndsWith),
            _ => Err( invalid_argument!("unknown filter condition '{}'", code))
        }
    }
}

/// ordinal, case insensitive string test
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct StringFilter {
    pub value: String,
    pub condition: FilterCondition,
    pub reversed: bool,
}

impl StringFilter {
    pub fn new (value: impl ToString, condition: FilterCondition, reversed: bool)->Self {
        StringFilter { value: value.to_string(), condition, reversed }
    }

    pub fn is_active (&self)->bool { !self.value.is_empty() }

    fn matches (&self, candidate: &str)->bool {
        let candidate = candidate.to_uppercase();
        let value = self.value.to_uppercase();

        match self.condition {
            FilterCondition::Equals => candidate == value,
            FilterCondition::Contains => candidate.contains( value.as_str()),
            FilterCondition::StartsWith => candidate.starts_with( value.as_str()),
            FilterCondition::EndsWith => candidate.ends_with( value.as_str()),
        }
    }

    pub fn passes (&self, value: Option<&str>)->bool {
        if !self.is_active() { return true }
        value.is_some_and( |v| self.matches(v)) != self.reversed
    }

    /// passes if any of the provided values matches (subject to reversal of the overall outcome)
    pub fn passes_any<'a> (&self, mut values: impl Iterator<Item=&'a str>)->bool {
        if !self.is_active() { return true }
        values.any( |v| self.matches(v)) != self.reversed
    }
}

/// inclusive range test. Missing bounds are unbounded on that side
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct NumericRangeFilter<T> {
    pub lower: Option<T>,
    pub upper: Option<T>,
    pub reversed: bool,
}

impl<T> NumericRangeFilter<T> where T: PartialOrd + Copy {
    pub fn new (lower: Option<T>, upper: Option<T>, reversed: bool)->Self {
        NumericRangeFilter { lower, upper, reversed }
    }

    pub fn is_active (&self)->bool { self.lower.is_some() || self.upper.is_some() }

    fn in_range (&self, v: T)->bool {
        self.lower.is_none_or( |lo| v >= lo) && self.upper.is_none_or( |hi| v <= hi)
    }

    pub fn passes (&self, value: Option<T>)->bool {
        if !self.is_active() { return true }
        value.is_some_and( |v| self.in_range(v)) != self.reversed
    }
}

impl<T> NumericRangeFilter<T> where T: PartialOrd + Copy + FromStr {
    /// parse bounds from their textual representation. Rust number parsing does not depend on any
    /// locale settings, i.e. "1.5" is always one and a half. Empty strings are treated as missing bounds
    pub fn parse (lower: Option<&str>, upper: Option<&str>, reversed: bool)->Result<Self> {
        Ok( NumericRangeFilter { lower: parse_bound(lower)?, upper: parse_bound(upper)?, reversed } )
    }
}

fn parse_bound<T: FromStr> (s: Option<&str>)->Result<Option<T>> {
    match s.map(str::trim) {
        Some(s) if !s.is_empty() => s.parse::<T>().map(Some).map_err( |_| invalid_argument!("not a number: '{}'", s)),
        _ => Ok(None)
    }
}

/// inclusive date range test with day granularity (dates are compared in UTC)
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct DateRangeFilter {
    pub lower: Option<NaiveDate>,
    pub upper: Option<NaiveDate>,
    pub reversed: bool,
}

impl DateRangeFilter {
    pub fn new (lower: Option<NaiveDate>, upper: Option<NaiveDate>, reversed: bool)->Self {
        DateRangeFilter { lower, upper, reversed }
    }

    /// bounds have to be ISO-8601 dates ("2025-03-14")
    pub fn parse (lower: Option<&str>, upper: Option<&str>, reversed: bool)->Result<Self> {
        let parse_date = |s: Option<&str>| -> Result<Option<NaiveDate>> {
            match s.map(str::trim) {
                Some(s) if !s.is_empty() => parse_iso_date(s).map(Some).ok_or_else( || invalid_argument!("not a date: '{}'", s)),
                _ => Ok(None)
            }
        };
        Ok( DateRangeFilter { lower: parse_date(lower)?, upper: parse_date(upper)?, reversed } )
    }

    pub fn is_active (&self)->bool { self.lower.is_some() || self.upper.is_some() }

    pub fn passes (&self, value: Option<EpochMillis>)->bool {
        if !self.is_active() { return true }

        let date = value.and_then( |t| DateTime::<Utc>::from_timestamp_millis( t.millis())).map( |dt| dt.date_naive());
        let in_range = date.is_some_and( |d| {
            self.lower.is_none_or( |lo| d >= lo) && self.upper.is_none_or( |hi| d <= hi)
        });
        in_range != self.reversed
    }
}

/// value equality test, used for booleans and enumerations
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct BoolFilter<T> {
    pub value: T,
    pub reversed: bool,
}

impl<T> BoolFilter<T> where T: PartialEq + Copy {
    pub fn new (value: T, reversed: bool)->Self { BoolFilter { value, reversed } }

    pub fn passes (&self, value: Option<T>)->bool {
        value.is_some_and( |v| v == self.value) != self.reversed
    }
}

/// rectangular containment test for positions. Boxes with west > east cross the antimeridian
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct BoundingBoxFilter {
    pub bounds: BoundingBox<f64>,
}

impl BoundingBoxFilter {
    pub fn new (north: f64, west: f64, south: f64, east: f64)->Self {
        BoundingBoxFilter { bounds: BoundingBox::new( west, south, east, north) }
    }

    pub fn passes (&self, pos: Option<GeoPos>)->bool {
        pos.is_some_and( |p| self.bounds.contains( p.lon, p.lat))
    }
}

/// the set of predicates a client can request. Unset predicates do not constrain the result
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct AircraftListFilter {
    pub altitude: Option<NumericRangeFilter<i32>>,
    pub callsign: Option<StringFilter>,
    pub icao24: Option<StringFilter>,
    pub registration: Option<StringFilter>,
    pub type_code: Option<StringFilter>,
    pub operator: Option<StringFilter>,
    pub country: Option<StringFilter>,
    pub user_tag: Option<StringFilter>,
    pub airport: Option<StringFilter>,
    pub squawk: Option<NumericRangeFilter<i32>>,
    pub distance: Option<NumericRangeFilter<f64>>,
    pub ground_speed: Option<NumericRangeFilter<f64>>,
    pub species: Option<BoolFilter<Species>>,
    pub wake_turbulence_category: Option<BoolFilter<WakeTurbulenceCategory>>,
    pub engine_type: Option<BoolFilter<EngineType>>,
    pub is_military: Option<BoolFilter<bool>>,
    pub is_interesting: Option<BoolFilter<bool>>,
    pub first_seen: Option<DateRangeFilter>,
    pub position_within: Option<BoundingBoxFilter>,
    pub must_transmit_position: bool,
}

#[inline]
fn check<F> (filter: &Option<F>, pred: impl FnOnce(&F)->bool)->bool {
    filter.as_ref().is_none_or( pred)
}

impl AircraftListFilter {
    pub fn is_empty (&self)->bool { *self == AircraftListFilter::default() }

    pub fn passes (&self, candidate: &Candidate)->bool {
        let ac: &AircraftSnapshot = candidate.aircraft;

        (!self.must_transmit_position || ac.is_transmitting_position())
            && check( &self.altitude, |f| f.passes( ac.altitude.copied()))
            && check( &self.callsign, |f| f.passes( ac.callsign.as_str()))
            && check( &self.icao24, |f| f.passes( ac.icao24.as_str()))
            && check( &self.registration, |f| f.passes( ac.registration.as_str()))
            && check( &self.type_code, |f| f.passes( ac.type_code.as_str()))
            && check( &self.operator, |f| f.passes( ac.operator.as_str()))
            && check( &self.country, |f| f.passes( ac.icao24_country.as_str()))
            && check( &self.user_tag, |f| f.passes( ac.user_tag.as_str()))
            && check( &self.airport, |f| f.passes_any( ac.airports()))
            && check( &self.squawk, |f| f.passes( ac.squawk.copied()))
            && check( &self.distance, |f| f.passes( candidate.distance_km))
            && check( &self.ground_speed, |f| f.passes( ac.ground_speed.copied()))
            && check( &self.species, |f| f.passes( ac.species.copied()))
            && check( &self.wake_turbulence_category, |f| f.passes( ac.wake_turbulence_category.copied()))
            && check( &self.engine_type, |f| f.passes( ac.engine_type.copied()))
            && check( &self.is_military, |f| f.passes( ac.is_military.copied()))
            && check( &self.is_interesting, |f| f.passes( ac.user_interested.copied()))
            && check( &self.first_seen, |f| f.passes( Some(ac.first_seen)))
            && check( &self.position_within, |f| f.passes( ac.position()))
    }
}

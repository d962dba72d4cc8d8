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

use std::fmt;
use serde::{Serialize,Deserialize};
use serde_repr::{Serialize_repr,Deserialize_repr};
use odin_common::{datetime::EpochMillis, geo::GeoPos};

use crate::fields::AircraftField;

/// a value together with the data version at which it was last changed by the tracker.
/// `value` is None if it was never observed (or got cleared)
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct Versioned<T> {
    pub value: Option<T>,
    pub changed: i64,
}

impl<T> Default for Versioned<T> {
    fn default()->Self { Versioned { value: None, changed: 0 } }
}

impl<T> Versioned<T> {
    pub fn new (value: T, changed: i64)->Self { Versioned { value: Some(value), changed } }

    #[inline] pub fn get (&self)->Option<&T> { self.value.as_ref() }
    #[inline] pub fn is_set (&self)->bool { self.value.is_some() }
    #[inline] pub fn is_changed_since (&self, version: i64)->bool { self.changed > version }

    /// tracker side mutation - we only use this to build snapshots in tools and tests
    pub fn set (&mut self, value: T, version: i64) {
        self.value = Some(value);
        self.changed = version;
    }
}

impl<T: Copy> Versioned<T> {
    #[inline] pub fn copied (&self)->Option<T> { self.value }
}

impl Versioned<String> {
    #[inline] pub fn as_str (&self)->Option<&str> { self.value.as_deref() }
}

/// one recorded point of an aircraft trail. The tracker appends a new point each time the track changes,
/// i.e. consecutive points normally represent distinct legs
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct TrailPoint {
    pub changed: i64,
    pub time: EpochMillis,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)] pub track: Option<f64>,
    #[serde(default)] pub altitude: Option<i32>,
    #[serde(default)] pub ground_speed: Option<f64>,
}

/* #region enumerations ******************************************************************************************/

// note these are serialized as their numeric values, which is what the browser clients expect

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum AltitudeType { Barometric = 0, Geometric = 1 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum SpeedType { GroundSpeed = 0, GroundSpeedReversing = 1, IndicatedAirSpeed = 2, TrueAirSpeed = 3 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum VerticalRateType { Barometric = 0, Geometric = 1 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum TransponderType { Unknown = 0, ModeS = 1, Adsb = 2, Adsb0 = 3, Adsb1 = 4, Adsb2 = 5 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum WakeTurbulenceCategory { None = 0, Light = 1, Medium = 2, Heavy = 3 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum EngineType { None = 0, Piston = 1, Turbo = 2, Jet = 3, Electric = 4, Rocket = 5 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum EnginePlacement { Unknown = 0, AftMounted = 1, WingBuried = 2, FuselageBuried = 3, NoseMounted = 4, WingMounted = 5 }

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize_repr,Deserialize_repr)]
#[repr(u8)]
pub enum Species {
    None = 0, LandPlane = 1, SeaPlane = 2, Amphibian = 3, Helicopter = 4, Gyrocopter = 5, Tiltwing = 6, GroundVehicle = 7, Tower = 8
}

/* #endregion enumerations */

/// point-in-time, read-only view of one tracked aircraft as handed out by the tracker.
/// Each field carries the data version at which it was last changed. Projections never mutate this
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(default)]
pub struct AircraftSnapshot {
    pub id: i32,
    pub first_seen: EpochMillis,
    pub never_stale: bool, // externally supplied override, e.g. for fixed ground stations

    pub receiver_id: Versioned<i32>,
    pub icao24: Versioned<String>,
    pub icao24_invalid: Versioned<bool>,
    pub registration: Versioned<String>,

    pub altitude: Versioned<i32>,
    pub geometric_altitude: Versioned<i32>,
    pub altitude_type: Versioned<AltitudeType>,
    pub air_pressure_in_hg: Versioned<f64>,
    pub target_altitude: Versioned<i32>,

    pub callsign: Versioned<String>,
    pub callsign_is_suspect: Versioned<bool>,

    pub latitude: Versioned<f64>,
    pub longitude: Versioned<f64>,
    pub position_is_mlat: Versioned<bool>,
    pub position_time: Versioned<EpochMillis>,
    pub is_tisb: Versioned<bool>,

    pub ground_speed: Versioned<f64>,
    pub speed_type: Versioned<SpeedType>,
    pub vertical_rate: Versioned<i32>,
    pub vertical_rate_type: Versioned<VerticalRateType>,
    pub track: Versioned<f64>,
    pub track_is_heading: Versioned<bool>,
    pub target_track: Versioned<f64>,

    pub squawk: Versioned<i32>,
    pub emergency: Versioned<bool>,
    pub on_ground: Versioned<bool>,
    pub signal_level: Versioned<i32>,
    pub transponder_type: Versioned<TransponderType>,
    pub count_messages_received: Versioned<i64>,

    pub type_code: Versioned<String>,
    pub model: Versioned<String>,
    pub manufacturer: Versioned<String>,
    pub serial_number: Versioned<String>,
    pub year_built: Versioned<String>,
    pub origin: Versioned<String>,
    pub destination: Versioned<String>,
    pub stopovers: Versioned<Vec<String>>,
    pub operator: Versioned<String>,
    pub operator_icao: Versioned<String>,
    pub wake_turbulence_category: Versioned<WakeTurbulenceCategory>,
    pub number_of_engines: Versioned<String>,
    pub engine_type: Versioned<EngineType>,
    pub engine_placement: Versioned<EnginePlacement>,
    pub species: Versioned<Species>,
    pub is_military: Versioned<bool>,
    pub icao24_country: Versioned<String>,
    pub picture_file_name: Versioned<String>,
    pub picture_width: Versioned<i32>,
    pub picture_height: Versioned<i32>,
    pub flights_count: Versioned<i32>,
    pub user_tag: Versioned<String>,
    pub user_interested: Versioned<bool>,

    pub full_coordinates: Vec<TrailPoint>,
    pub short_coordinates: Vec<TrailPoint>,
}

impl AircraftSnapshot {
    pub fn new (id: i32, first_seen: EpochMillis)->Self {
        AircraftSnapshot { id, first_seen, ..Default::default() }
    }

    pub fn position (&self)->Option<GeoPos> {
        GeoPos::from_options( self.latitude.copied(), self.longitude.copied())
    }

    /// true if both latitude and longitude are known
    pub fn is_transmitting_position (&self)->bool {
        self.latitude.is_set() && self.longitude.is_set()
    }

    /// the latest data version of anything we could send for this aircraft (fields and trail points)
    pub fn data_version (&self)->i64 {
        let fields = AircraftField::all().map( |f| f.changed(self));
        let trails = self.full_coordinates.last().into_iter()
            .chain( self.short_coordinates.last())
            .map( |p| p.changed);

        fields.chain(trails).max().unwrap_or(0)
    }

    /// convenience accessor for the airport filter
    pub fn airports (&self)->impl Iterator<Item=&str> {
        self.origin.as_str().into_iter()
            .chain( self.destination.as_str())
            .chain( self.stopovers.get().into_iter().flatten().map( |s| s.as_str()))
    }
}

/// an aircraft that is considered for a list response, together with its per-request distance from the browser
#[derive(Debug,Clone,Copy)]
pub struct Candidate<'a> {
    pub aircraft: &'a AircraftSnapshot,
    pub distance_km: Option<f64>,
}

impl fmt::Display for AircraftSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Aircraft( id: {}", self.id)?;
        if let Some(icao) = self.icao24.get() { write!( f, ", icao24: {icao}")?; }
        if let Some(cs) = self.callsign.get() { write!( f, ", cs: \"{cs}\"")?; }
        if let Some(p) = self.position() { write!( f, ", pos: {p}")?; }
        if let Some(alt) = self.altitude.get() { write!( f, ", alt: {alt}")?; }
        if let Some(trk) = self.track.get() { write!( f, ", trk: {trk:.0}")?; }
        if !self.full_coordinates.is_empty() { write!( f, ", n_trail: {}", self.full_coordinates.len())?; }
        write!( f, ", dv: {})", self.data_version())
    }
}

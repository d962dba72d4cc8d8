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

use serde::Serialize;
use odin_common::{datetime::EpochMillis, geo::{GeoPos, distance_km, initial_bearing, round_decimals}};

use crate::aircraft::{
    AircraftSnapshot, AltitudeType, Candidate, EngineType, EnginePlacement, Species, SpeedType, TransponderType,
    Versioned, VerticalRateType, WakeTurbulenceCategory
};
use crate::config::AcListConfig;
use crate::fields::AircraftField;
use crate::request::{RequestContext, TrailRequest, TrailType};
use crate::trail::{build_trail, TrailValue};

/// the sparse per-aircraft record we send to clients. Only what the client does not have yet is set
#[derive(Debug,Clone,Default,PartialEq,Serialize)]
pub struct AircraftJson {
    #[serde(rename="Id")] pub id: i32,

    #[serde(rename="TSecs", skip_serializing_if="Option::is_none")] pub seconds_tracked: Option<i64>,
    #[serde(rename="FSeen", skip_serializing_if="Option::is_none")] pub first_seen: Option<EpochMillis>,

    #[serde(rename="Rcvr", skip_serializing_if="Option::is_none")] pub receiver_id: Option<i32>,
    #[serde(rename="Icao", skip_serializing_if="Option::is_none")] pub icao24: Option<String>,
    #[serde(rename="Bad", skip_serializing_if="Option::is_none")] pub icao24_invalid: Option<bool>,
    #[serde(rename="Reg", skip_serializing_if="Option::is_none")] pub registration: Option<String>,

    #[serde(rename="Alt", skip_serializing_if="Option::is_none")] pub altitude: Option<i32>,
    #[serde(rename="GAlt", skip_serializing_if="Option::is_none")] pub geometric_altitude: Option<i32>,
    #[serde(rename="AltT", skip_serializing_if="Option::is_none")] pub altitude_type: Option<AltitudeType>,
    #[serde(rename="InHg", skip_serializing_if="Option::is_none")] pub air_pressure_in_hg: Option<f64>,
    #[serde(rename="TAlt", skip_serializing_if="Option::is_none")] pub target_altitude: Option<i32>,

    #[serde(rename="Call", skip_serializing_if="Option::is_none")] pub callsign: Option<String>,
    #[serde(rename="CallSus", skip_serializing_if="Option::is_none")] pub callsign_is_suspect: Option<bool>,

    #[serde(rename="Lat", skip_serializing_if="Option::is_none")] pub latitude: Option<f64>,
    #[serde(rename="Long", skip_serializing_if="Option::is_none")] pub longitude: Option<f64>,
    #[serde(rename="Mlat", skip_serializing_if="Option::is_none")] pub position_is_mlat: Option<bool>,
    #[serde(rename="PosTime", skip_serializing_if="Option::is_none")] pub position_time: Option<EpochMillis>,
    #[serde(rename="PosStale", skip_serializing_if="Option::is_none")] pub position_is_stale: Option<bool>,
    #[serde(rename="Tisb", skip_serializing_if="Option::is_none")] pub is_tisb: Option<bool>,

    #[serde(rename="Spd", skip_serializing_if="Option::is_none")] pub ground_speed: Option<f64>,
    #[serde(rename="SpdTyp", skip_serializing_if="Option::is_none")] pub speed_type: Option<SpeedType>,
    #[serde(rename="Vsi", skip_serializing_if="Option::is_none")] pub vertical_rate: Option<i32>,
    #[serde(rename="VsiT", skip_serializing_if="Option::is_none")] pub vertical_rate_type: Option<VerticalRateType>,
    #[serde(rename="Trak", skip_serializing_if="Option::is_none")] pub track: Option<f64>,
    #[serde(rename="TrkH", skip_serializing_if="Option::is_none")] pub track_is_heading: Option<bool>,
    #[serde(rename="TTrk", skip_serializing_if="Option::is_none")] pub target_track: Option<f64>,

    #[serde(rename="Sqk", skip_serializing_if="Option::is_none")] pub squawk: Option<i32>,
    #[serde(rename="Help", skip_serializing_if="Option::is_none")] pub emergency: Option<bool>,
    #[serde(rename="Gnd", skip_serializing_if="Option::is_none")] pub on_ground: Option<bool>,
    #[serde(rename="Sig", skip_serializing_if="Option::is_none")] pub signal_level: Option<i32>,
    #[serde(rename="HasSig", skip_serializing_if="Option::is_none")] pub has_signal_level: Option<bool>,
    #[serde(rename="Trt", skip_serializing_if="Option::is_none")] pub transponder_type: Option<TransponderType>,
    #[serde(rename="CMsgs", skip_serializing_if="Option::is_none")] pub count_messages_received: Option<i64>,

    #[serde(rename="Type", skip_serializing_if="Option::is_none")] pub type_code: Option<String>,
    #[serde(rename="Mdl", skip_serializing_if="Option::is_none")] pub model: Option<String>,
    #[serde(rename="Man", skip_serializing_if="Option::is_none")] pub manufacturer: Option<String>,
    #[serde(rename="CNum", skip_serializing_if="Option::is_none")] pub serial_number: Option<String>,
    #[serde(rename="Year", skip_serializing_if="Option::is_none")] pub year_built: Option<String>,
    #[serde(rename="From", skip_serializing_if="Option::is_none")] pub origin: Option<String>,
    #[serde(rename="To", skip_serializing_if="Option::is_none")] pub destination: Option<String>,
    #[serde(rename="Stops", skip_serializing_if="Option::is_none")] pub stopovers: Option<Vec<String>>,
    #[serde(rename="Op", skip_serializing_if="Option::is_none")] pub operator: Option<String>,
    #[serde(rename="OpIcao", skip_serializing_if="Option::is_none")] pub operator_icao: Option<String>,
    #[serde(rename="WTC", skip_serializing_if="Option::is_none")] pub wake_turbulence_category: Option<WakeTurbulenceCategory>,
    #[serde(rename="Engines", skip_serializing_if="Option::is_none")] pub number_of_engines: Option<String>,
    #[serde(rename="EngType", skip_serializing_if="Option::is_none")] pub engine_type: Option<EngineType>,
    #[serde(rename="EngMount", skip_serializing_if="Option::is_none")] pub engine_placement: Option<EnginePlacement>,
    #[serde(rename="Species", skip_serializing_if="Option::is_none")] pub species: Option<Species>,
    #[serde(rename="Mil", skip_serializing_if="Option::is_none")] pub is_military: Option<bool>,
    #[serde(rename="Cou", skip_serializing_if="Option::is_none")] pub icao24_country: Option<String>,
    #[serde(rename="HasPic", skip_serializing_if="Option::is_none")] pub has_picture: Option<bool>,
    #[serde(rename="PicX", skip_serializing_if="Option::is_none")] pub picture_width: Option<i32>,
    #[serde(rename="PicY", skip_serializing_if="Option::is_none")] pub picture_height: Option<i32>,
    #[serde(rename="FCnt", skip_serializing_if="Option::is_none")] pub flights_count: Option<i32>,
    #[serde(rename="Tag", skip_serializing_if="Option::is_none")] pub user_tag: Option<String>,
    #[serde(rename="Interested", skip_serializing_if="Option::is_none")] pub user_interested: Option<bool>,

    #[serde(rename="Dst", skip_serializing_if="Option::is_none")] pub distance_km: Option<f64>,
    #[serde(rename="Brng", skip_serializing_if="Option::is_none")] pub bearing: Option<f64>,

    #[serde(rename="Cot", skip_serializing_if="Option::is_none")] pub full_trail: Option<Vec<TrailValue>>,
    #[serde(rename="Cos", skip_serializing_if="Option::is_none")] pub short_trail: Option<Vec<TrailValue>>,
    #[serde(rename="TT", skip_serializing_if="Option::is_none")] pub trail_type: Option<&'static str>,
    #[serde(rename="ResetTrail", skip_serializing_if="Option::is_none")] pub reset_trail: Option<bool>,
}

/// the per-request constants needed to project aircraft. This is computed once per request
#[derive(Debug,Clone,Default)]
pub struct ProjectionContext {
    pub now: EpochMillis,
    pub previous_version: Option<i64>,
    pub stale_position_millis: i64,
    pub browser_position: Option<GeoPos>,
    pub trail: TrailRequest,
    pub resend_trails: bool,
    /// the short trail length changed since the client got its last trails
    pub trail_config_changed: bool,
    pub only_message_fields: bool,
    pub always_show_icao: bool,
    pub ignore_unchanged: bool,
    pub is_flight_simulator_list: bool,
}

impl ProjectionContext {
    pub fn new (request: &RequestContext, config: &AcListConfig, now: EpochMillis)->Self {
        let trail_config_changed = request.trail.kind == TrailType::Short
            && request.client_short_trail_secs.is_some_and( |secs| secs != config.short_trail_length_secs);

        ProjectionContext {
            now,
            previous_version: request.last_version(),
            stale_position_millis: config.stale_position_millis(),
            browser_position: request.browser_position,
            trail: if request.is_flight_simulator_list { TrailRequest::NONE } else { request.trail },
            resend_trails: request.resend_trails,
            trail_config_changed,
            only_message_fields: request.only_message_fields,
            always_show_icao: request.always_show_icao,
            ignore_unchanged: request.ignore_unchanged,
            is_flight_simulator_list: request.is_flight_simulator_list,
        }
    }

    fn is_position_stale (&self, ac: &AircraftSnapshot)->bool {
        !ac.never_stale
            && ac.is_transmitting_position()
            && ac.position_time.copied().is_some_and( |t| self.now.millis() - t.millis() > self.stale_position_millis)
    }
}

#[inline]
fn set<T: Clone> (target: &mut Option<T>, source: &Versioned<T>) {
    *target = source.value.clone();
}

fn copy_field (json: &mut AircraftJson, field: AircraftField, ac: &AircraftSnapshot) {
    use AircraftField::*;
    match field {
        ReceiverId => set( &mut json.receiver_id, &ac.receiver_id),
        Icao24 => set( &mut json.icao24, &ac.icao24),
        Icao24Invalid => set( &mut json.icao24_invalid, &ac.icao24_invalid),
        Registration => set( &mut json.registration, &ac.registration),
        Altitude => set( &mut json.altitude, &ac.altitude),
        GeometricAltitude => set( &mut json.geometric_altitude, &ac.geometric_altitude),
        AltitudeType => set( &mut json.altitude_type, &ac.altitude_type),
        AirPressureInHg => set( &mut json.air_pressure_in_hg, &ac.air_pressure_in_hg),
        TargetAltitude => set( &mut json.target_altitude, &ac.target_altitude),
        Callsign => set( &mut json.callsign, &ac.callsign),
        CallsignIsSuspect => set( &mut json.callsign_is_suspect, &ac.callsign_is_suspect),
        Latitude => set( &mut json.latitude, &ac.latitude),
        Longitude => set( &mut json.longitude, &ac.longitude),
        PositionIsMlat => set( &mut json.position_is_mlat, &ac.position_is_mlat),
        PositionTime => set( &mut json.position_time, &ac.position_time),
        IsTisb => set( &mut json.is_tisb, &ac.is_tisb),
        GroundSpeed => set( &mut json.ground_speed, &ac.ground_speed),
        SpeedType => set( &mut json.speed_type, &ac.speed_type),
        VerticalRate => set( &mut json.vertical_rate, &ac.vertical_rate),
        VerticalRateType => set( &mut json.vertical_rate_type, &ac.vertical_rate_type),
        Track => set( &mut json.track, &ac.track),
        TrackIsHeading => set( &mut json.track_is_heading, &ac.track_is_heading),
        TargetTrack => set( &mut json.target_track, &ac.target_track),
        Squawk => set( &mut json.squawk, &ac.squawk),
        Emergency => set( &mut json.emergency, &ac.emergency),
        OnGround => set( &mut json.on_ground, &ac.on_ground),
        SignalLevel => {
            set( &mut json.signal_level, &ac.signal_level);
            json.has_signal_level = ac.signal_level.is_set().then_some(true);
        }
        TransponderType => set( &mut json.transponder_type, &ac.transponder_type),
        CountMessagesReceived => set( &mut json.count_messages_received, &ac.count_messages_received),
        TypeCode => set( &mut json.type_code, &ac.type_code),
        Model => set( &mut json.model, &ac.model),
        Manufacturer => set( &mut json.manufacturer, &ac.manufacturer),
        SerialNumber => set( &mut json.serial_number, &ac.serial_number),
        YearBuilt => set( &mut json.year_built, &ac.year_built),
        Origin => set( &mut json.origin, &ac.origin),
        Destination => set( &mut json.destination, &ac.destination),
        Stopovers => set( &mut json.stopovers, &ac.stopovers),
        Operator => set( &mut json.operator, &ac.operator),
        OperatorIcao => set( &mut json.operator_icao, &ac.operator_icao),
        WakeTurbulenceCategory => set( &mut json.wake_turbulence_category, &ac.wake_turbulence_category),
        NumberOfEngines => set( &mut json.number_of_engines, &ac.number_of_engines),
        EngineType => set( &mut json.engine_type, &ac.engine_type),
        EnginePlacement => set( &mut json.engine_placement, &ac.engine_placement),
        Species => set( &mut json.species, &ac.species),
        IsMilitary => set( &mut json.is_military, &ac.is_military),
        Icao24Country => set( &mut json.icao24_country, &ac.icao24_country),
        PictureFileName => json.has_picture = ac.picture_file_name.as_str().is_some_and( |s| !s.is_empty()).then_some(true),
        PictureWidth => set( &mut json.picture_width, &ac.picture_width),
        PictureHeight => set( &mut json.picture_height, &ac.picture_height),
        FlightsCount => set( &mut json.flights_count, &ac.flights_count),
        UserTag => set( &mut json.user_tag, &ac.user_tag),
        UserInterested => set( &mut json.user_interested, &ac.user_interested),
    }
}

/// project one aircraft for a client. `known` tells us if the client already has this aircraft.
/// Returns None only if unchanged aircraft should be skipped and this one has nothing new
pub fn project (candidate: &Candidate, ctx: &ProjectionContext, known: bool)->Option<AircraftJson> {
    let ac = candidate.aircraft;
    let first_contact = !known || ctx.previous_version.is_none();
    let prev = ctx.previous_version.unwrap_or(-1);

    let mut json = AircraftJson { id: ac.id, ..Default::default() };
    let mut has_changes = first_contact;

    for field in AircraftField::all() {
        if ctx.only_message_fields && !field.is_message_field() { continue }

        let is_changed = field.is_changed_since( ac, prev);
        has_changes |= is_changed;

        if first_contact || is_changed || (ctx.always_show_icao && field == AircraftField::Icao24) {
            copy_field( &mut json, field, ac);
        }
    }

    if !ctx.only_message_fields {
        json.seconds_tracked = Some( (ctx.now.millis() - ac.first_seen.millis()).div_euclid(1000));
        if first_contact {
            json.first_seen = Some( ac.first_seen);
        }

        if !ctx.is_flight_simulator_list {
            if let (Some(browser), Some(pos)) = (ctx.browser_position, ac.position()) {
                let dist = candidate.distance_km.unwrap_or_else( || distance_km( &browser, &pos));
                json.distance_km = Some( round_decimals( dist, 2));
                json.bearing = Some( round_decimals( initial_bearing( &browser, &pos), 1));
            }
        }

        if ctx.is_position_stale(ac) {
            json.position_is_stale = Some(true);
        }

        let reset = first_contact || ctx.resend_trails || ctx.trail_config_changed;
        if let Some(trail) = build_trail( ac, ctx.trail, ctx.previous_version, reset) {
            has_changes |= !trail.is_empty();

            if !trail.is_empty() || trail.reset {
                json.trail_type = trail.flavor.code();
                json.reset_trail = trail.reset.then_some(true);
                match trail.kind {
                    TrailType::Full => json.full_trail = Some( trail.values),
                    TrailType::Short => json.short_trail = Some( trail.values),
                    TrailType::None => {}
                }
            }
        }
    }

    if ctx.ignore_unchanged && !has_changes {
        None
    } else {
        Some(json)
    }
}

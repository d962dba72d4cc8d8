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

//! the static field table: every versioned aircraft field with its wire key, its group
//! and whether it is a transponder message field. All mappings are exhaustive matches so
//! adding a field to [`AircraftField`] does not compile until it is fully wired up.

use strum::{EnumIter,IntoEnumIterator};

use crate::aircraft::AircraftSnapshot;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,EnumIter)]
pub enum AircraftField {
    ReceiverId,
    Icao24,
    Icao24Invalid,
    Registration,
    Altitude,
    GeometricAltitude,
    AltitudeType,
    AirPressureInHg,
    TargetAltitude,
    Callsign,
    CallsignIsSuspect,
    Latitude,
    Longitude,
    PositionIsMlat,
    PositionTime,
    IsTisb,
    GroundSpeed,
    SpeedType,
    VerticalRate,
    VerticalRateType,
    Track,
    TrackIsHeading,
    TargetTrack,
    Squawk,
    Emergency,
    OnGround,
    SignalLevel,
    TransponderType,
    CountMessagesReceived,
    TypeCode,
    Model,
    Manufacturer,
    SerialNumber,
    YearBuilt,
    Origin,
    Destination,
    Stopovers,
    Operator,
    OperatorIcao,
    WakeTurbulenceCategory,
    NumberOfEngines,
    EngineType,
    EnginePlacement,
    Species,
    IsMilitary,
    Icao24Country,
    PictureFileName,
    PictureWidth,
    PictureHeight,
    FlightsCount,
    UserTag,
    UserInterested,
}

/// fields that are only meaningful together and hence always travel as a complete set
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum FieldGroup {
    Altitude,
    Position,
}

impl FieldGroup {
    pub fn members (self)->&'static [AircraftField] {
        use AircraftField::*;
        match self {
            FieldGroup::Altitude => &[Altitude, GeometricAltitude, AltitudeType],
            FieldGroup::Position => &[Latitude, Longitude, PositionIsMlat],
        }
    }

    /// the group changes whenever any of its members changes
    pub fn changed (self, ac: &AircraftSnapshot)->i64 {
        self.members().iter().map( |f| f.changed(ac)).max().unwrap_or(0)
    }
}

impl AircraftField {
    pub fn all ()->impl Iterator<Item=AircraftField> { AircraftField::iter() }

    /// the property name used in the JSON we send to clients
    pub fn key (self)->&'static str {
        use AircraftField::*;
        match self {
            ReceiverId => "Rcvr",
            Icao24 => "Icao",
            Icao24Invalid => "Bad",
            Registration => "Reg",
            Altitude => "Alt",
            GeometricAltitude => "GAlt",
            AltitudeType => "AltT",
            AirPressureInHg => "InHg",
            TargetAltitude => "TAlt",
            Callsign => "Call",
            CallsignIsSuspect => "CallSus",
            Latitude => "Lat",
            Longitude => "Long",
            PositionIsMlat => "Mlat",
            PositionTime => "PosTime",
            IsTisb => "Tisb",
            GroundSpeed => "Spd",
            SpeedType => "SpdTyp",
            VerticalRate => "Vsi",
            VerticalRateType => "VsiT",
            Track => "Trak",
            TrackIsHeading => "TrkH",
            TargetTrack => "TTrk",
            Squawk => "Sqk",
            Emergency => "Help",
            OnGround => "Gnd",
            SignalLevel => "Sig",
            TransponderType => "Trt",
            CountMessagesReceived => "CMsgs",
            TypeCode => "Type",
            Model => "Mdl",
            Manufacturer => "Man",
            SerialNumber => "CNum",
            YearBuilt => "Year",
            Origin => "From",
            Destination => "To",
            Stopovers => "Stops",
            Operator => "Op",
            OperatorIcao => "OpIcao",
            WakeTurbulenceCategory => "WTC",
            NumberOfEngines => "Engines",
            EngineType => "EngType",
            EnginePlacement => "EngMount",
            Species => "Species",
            IsMilitary => "Mil",
            Icao24Country => "Cou",
            PictureFileName => "HasPic",
            PictureWidth => "PicX",
            PictureHeight => "PicY",
            FlightsCount => "FCnt",
            UserTag => "Tag",
            UserInterested => "Interested",
        }
    }

    pub fn group (self)->Option<FieldGroup> {
        use AircraftField::*;
        match self {
            Altitude | GeometricAltitude | AltitudeType => Some(FieldGroup::Altitude),
            Latitude | Longitude | PositionIsMlat => Some(FieldGroup::Position),
            _ => None
        }
    }

    /// fields that are decoded from transponder messages, as opposed to database lookups or
    /// user annotations. These are the only ones sent if a client asks for message fields only
    pub fn is_message_field (self)->bool {
        use AircraftField::*;
        match self {
            ReceiverId | Icao24 | Icao24Invalid |
            Altitude | GeometricAltitude | AltitudeType | AirPressureInHg | TargetAltitude |
            Callsign | CallsignIsSuspect |
            Latitude | Longitude | PositionIsMlat | PositionTime | IsTisb |
            GroundSpeed | SpeedType | VerticalRate | VerticalRateType | Track | TrackIsHeading | TargetTrack |
            Squawk | Emergency | OnGround | SignalLevel | TransponderType | CountMessagesReceived => true,

            Registration | TypeCode | Model | Manufacturer | SerialNumber | YearBuilt |
            Origin | Destination | Stopovers | Operator | OperatorIcao |
            WakeTurbulenceCategory | NumberOfEngines | EngineType | EnginePlacement | Species | IsMilitary |
            Icao24Country | PictureFileName | PictureWidth | PictureHeight | FlightsCount |
            UserTag | UserInterested => false,
        }
    }

    /// data version at which the value of this field was last changed for the given aircraft
    pub fn changed (self, ac: &AircraftSnapshot)->i64 {
        use AircraftField::*;
        match self {
            ReceiverId => ac.receiver_id.changed,
            Icao24 => ac.icao24.changed,
            Icao24Invalid => ac.icao24_invalid.changed,
            Registration => ac.registration.changed,
            Altitude => ac.altitude.changed,
            GeometricAltitude => ac.geometric_altitude.changed,
            AltitudeType => ac.altitude_type.changed,
            AirPressureInHg => ac.air_pressure_in_hg.changed,
            TargetAltitude => ac.target_altitude.changed,
            Callsign => ac.callsign.changed,
            CallsignIsSuspect => ac.callsign_is_suspect.changed,
            Latitude => ac.latitude.changed,
            Longitude => ac.longitude.changed,
            PositionIsMlat => ac.position_is_mlat.changed,
            PositionTime => ac.position_time.changed,
            IsTisb => ac.is_tisb.changed,
            GroundSpeed => ac.ground_speed.changed,
            SpeedType => ac.speed_type.changed,
            VerticalRate => ac.vertical_rate.changed,
            VerticalRateType => ac.vertical_rate_type.changed,
            Track => ac.track.changed,
            TrackIsHeading => ac.track_is_heading.changed,
            TargetTrack => ac.target_track.changed,
            Squawk => ac.squawk.changed,
            Emergency => ac.emergency.changed,
            OnGround => ac.on_ground.changed,
            SignalLevel => ac.signal_level.changed,
            TransponderType => ac.transponder_type.changed,
            CountMessagesReceived => ac.count_messages_received.changed,
            TypeCode => ac.type_code.changed,
            Model => ac.model.changed,
            Manufacturer => ac.manufacturer.changed,
            SerialNumber => ac.serial_number.changed,
            YearBuilt => ac.year_built.changed,
            Origin => ac.origin.changed,
            Destination => ac.destination.changed,
            Stopovers => ac.stopovers.changed,
            Operator => ac.operator.changed,
            OperatorIcao => ac.operator_icao.changed,
            WakeTurbulenceCategory => ac.wake_turbulence_category.changed,
            NumberOfEngines => ac.number_of_engines.changed,
            EngineType => ac.engine_type.changed,
            EnginePlacement => ac.engine_placement.changed,
            Species => ac.species.changed,
            IsMilitary => ac.is_military.changed,
            Icao24Country => ac.icao24_country.changed,
            PictureFileName => ac.picture_file_name.changed,
            PictureWidth => ac.picture_width.changed,
            PictureHeight => ac.picture_height.changed,
            FlightsCount => ac.flights_count.changed,
            UserTag => ac.user_tag.changed,
            UserInterested => ac.user_interested.changed,
        }
    }

    /// the version that decides emission: grouped fields use the version of the whole group
    pub fn emission_version (self, ac: &AircraftSnapshot)->i64 {
        match self.group() {
            Some(group) => group.changed(ac),
            None => self.changed(ac)
        }
    }

    /// does a client that has seen everything up to `version` need this field again
    #[inline]
    pub fn is_changed_since (self, ac: &AircraftSnapshot, version: i64)->bool {
        self.emission_version(ac) > version
    }
}

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

use std::cmp::Ordering;
use strum::{EnumString,IntoStaticStr};

use crate::aircraft::Candidate;

/// the columns clients can sort by. Names are matched case-insensitively
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,EnumString,IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum SortColumn {
    #[strum(serialize="ALT")] Altitude,
    #[strum(serialize="CALL")] Callsign,
    #[strum(serialize="CNUM")] SerialNumber,
    #[strum(serialize="COU")] Country,
    #[strum(serialize="DST")] Distance,
    #[strum(serialize="ENGINES")] NumberOfEngines,
    #[strum(serialize="ENGTYPE")] EngineType,
    #[strum(serialize="FROM")] Origin,
    #[strum(serialize="FSEEN")] FirstSeen,
    #[strum(serialize="GALT")] GeometricAltitude,
    #[strum(serialize="ICAO")] Icao24,
    #[strum(serialize="MAN")] Manufacturer,
    #[strum(serialize="MDL")] Model,
    #[strum(serialize="MIL")] IsMilitary,
    #[strum(serialize="MSGS")] CountMessages,
    #[strum(serialize="OP")] Operator,
    #[strum(serialize="OPICAO")] OperatorIcao,
    #[strum(serialize="REG")] Registration,
    #[strum(serialize="SPC")] Species,
    #[strum(serialize="SPD")] GroundSpeed,
    #[strum(serialize="SQK")] Squawk,
    #[strum(serialize="TO")] Destination,
    #[strum(serialize="TRAK")] Track,
    #[strum(serialize="TSECS")] SecondsTracked,
    #[strum(serialize="TYPE")] TypeCode,
    #[strum(serialize="VSI")] VerticalRate,
    #[strum(serialize="WTC")] WakeTurbulenceCategory,
    #[strum(serialize="YEAR")] YearBuilt,
}

impl SortColumn {
    pub fn from_name (name: &str)->Option<Self> { name.trim().parse().ok() }

    pub fn name (self)->&'static str { self.into() }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct SortKey {
    pub column: SortColumn,
    pub ascending: bool,
}

impl SortKey {
    pub fn new (column: SortColumn, ascending: bool)->Self { SortKey { column, ascending } }

    /// None if the column name is not known
    pub fn parse (name: &str, ascending: bool)->Option<Self> {
        SortColumn::from_name(name).map( |column| SortKey { column, ascending })
    }
}

/// newest aircraft first
pub const DEFAULT_SORT_KEY: SortKey = SortKey { column: SortColumn::FirstSeen, ascending: false };

pub const MAX_SORT_KEYS: usize = 2;

/// the comparable value of a sort column. Missing values are the minimum of their kind so that the
/// sort direction applies to them like to any other value
enum SortValue<'a> {
    Int(Option<i64>),
    Float(Option<f64>),
    Str(Option<&'a str>),
}

fn sort_value<'a> (column: SortColumn, c: &Candidate<'a>)->SortValue<'a> {
    use SortValue::*;
    let ac = c.aircraft;

    match column {
        SortColumn::Altitude => Int( ac.altitude.copied().map(i64::from)),
        SortColumn::Callsign => Str( ac.callsign.as_str()),
        SortColumn::SerialNumber => Str( ac.serial_number.as_str()),
        SortColumn::Country => Str( ac.icao24_country.as_str()),
        SortColumn::Distance => Float( c.distance_km),
        SortColumn::NumberOfEngines => Str( ac.number_of_engines.as_str()),
        SortColumn::EngineType => Int( ac.engine_type.copied().map( |v| v as i64)),
        SortColumn::Origin => Str( ac.origin.as_str()),
        SortColumn::FirstSeen => Int( Some( ac.first_seen.millis())),
        SortColumn::GeometricAltitude => Int( ac.geometric_altitude.copied().map(i64::from)),
        SortColumn::Icao24 => Str( ac.icao24.as_str()),
        SortColumn::Manufacturer => Str( ac.manufacturer.as_str()),
        SortColumn::Model => Str( ac.model.as_str()),
        SortColumn::IsMilitary => Int( ac.is_military.copied().map(i64::from)),
        SortColumn::CountMessages => Int( ac.count_messages_received.copied()),
        SortColumn::Operator => Str( ac.operator.as_str()),
        SortColumn::OperatorIcao => Str( ac.operator_icao.as_str()),
        SortColumn::Registration => Str( ac.registration.as_str()),
        SortColumn::Species => Int( ac.species.copied().map( |v| v as i64)),
        SortColumn::GroundSpeed => Float( ac.ground_speed.copied()),
        SortColumn::Squawk => Int( ac.squawk.copied().map(i64::from)),
        SortColumn::Destination => Str( ac.destination.as_str()),
        SortColumn::Track => Float( ac.track.copied()),
        SortColumn::SecondsTracked => Int( Some( -ac.first_seen.millis())), // tracked longer means seen earlier
        SortColumn::TypeCode => Str( ac.type_code.as_str()),
        SortColumn::VerticalRate => Int( ac.vertical_rate.copied().map(i64::from)),
        SortColumn::WakeTurbulenceCategory => Int( ac.wake_turbulence_category.copied().map( |v| v as i64)),
        SortColumn::YearBuilt => Str( ac.year_built.as_str()),
    }
}

/// ordinal case insensitive, with missing < ""
fn compare_str (a: Option<&str>, b: Option<&str>)->Ordering {
    match (a,b) {
        (Some(a),Some(b)) => {
            a.chars().flat_map( char::to_uppercase).cmp( b.chars().flat_map( char::to_uppercase))
        }
        _ => a.is_some().cmp( &b.is_some())
    }
}

fn compare_values (a: &SortValue, b: &SortValue)->Ordering {
    match (a,b) {
        (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
        (SortValue::Float(a), SortValue::Float(b)) => match (a,b) {
            (Some(a),Some(b)) => a.total_cmp(b),
            _ => a.is_some().cmp( &b.is_some())
        }
        (SortValue::Str(a), SortValue::Str(b)) => compare_str( *a, *b),
        _ => Ordering::Equal // values of the same column are always of the same kind
    }
}

pub fn compare_candidates (a: &Candidate, b: &Candidate, keys: &[SortKey])->Ordering {
    for key in keys {
        let ord = compare_values( &sort_value( key.column, a), &sort_value( key.column, b));
        let ord = if key.ascending { ord } else { ord.reverse() };
        if ord != Ordering::Equal { return ord }
    }
    Ordering::Equal
}

/// stable sort of list candidates by up to [`MAX_SORT_KEYS`] keys. Without keys we sort by [`DEFAULT_SORT_KEY`]
pub fn sort_candidates (candidates: &mut [Candidate], keys: &[SortKey]) {
    let keys: &[SortKey] = if keys.is_empty() {
        &[DEFAULT_SORT_KEY]
    } else {
        &keys[..keys.len().min(MAX_SORT_KEYS)]
    };

    candidates.sort_by( |a,b| compare_candidates( a, b, keys));
}

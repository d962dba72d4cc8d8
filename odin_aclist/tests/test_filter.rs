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

mod common;
use common::*;

use chrono::{DateTime, NaiveDate};
use odin_common::{datetime::EpochMillis, geo::GeoPos};
use odin_aclist::{
    AircraftListFilter, AircraftSnapshot, Candidate,
    aircraft::{Species, WakeTurbulenceCategory},
    filter::*,
};

#[test]
fn test_string_conditions() {
    let eq = StringFilter::new( "baw123", FilterCondition::Equals, false);
    assert!( eq.passes( Some("BAW123")));
    assert!( !eq.passes( Some("BAW1234")));

    let contains = StringFilter::new( "W12", FilterCondition::Contains, false);
    assert!( contains.passes( Some("baw123")));
    assert!( !contains.passes( Some("EZY12")));

    let starts = StringFilter::new( "BA", FilterCondition::StartsWith, false);
    assert!( starts.passes( Some("BAW123")));
    assert!( !starts.passes( Some("ABA1")));

    let ends = StringFilter::new( "23", FilterCondition::EndsWith, false);
    assert!( ends.passes( Some("BAW123")));
    assert!( !ends.passes( Some("BAW132")));
}

#[test]
fn test_reversed_and_missing_values() {
    let f = StringFilter::new( "BAW", FilterCondition::StartsWith, false);
    let r = StringFilter::new( "BAW", FilterCondition::StartsWith, true);

    assert!( f.passes( Some("BAW1")) && !r.passes( Some("BAW1")));
    assert!( !f.passes( Some("EZY1")) && r.passes( Some("EZY1")));
    assert!( !f.passes( None) && r.passes( None));

    // no test value - no constraint
    let inactive = StringFilter::new( "", FilterCondition::Equals, true);
    assert!( inactive.passes( None) && inactive.passes( Some("X")));

    let alt = NumericRangeFilter::new( Some(1000), Some(2000), false);
    assert!( alt.passes( Some(1000)) && alt.passes( Some(2000)));
    assert!( !alt.passes( Some(2001)) && !alt.passes( None));

    let alt = NumericRangeFilter::new( Some(1000), Some(2000), true);
    assert!( !alt.passes( Some(1500)));
    assert!( alt.passes( Some(999)) && alt.passes( None));

    let unbounded: NumericRangeFilter<i32> = NumericRangeFilter::new( None, None, true);
    assert!( unbounded.passes( None));
}

#[test]
fn test_parse() {
    assert_eq!( FilterCondition::from_code("q").unwrap(), FilterCondition::Equals);
    assert_eq!( FilterCondition::from_code("C").unwrap(), FilterCondition::Contains);
    assert_eq!( FilterCondition::from_code("S").unwrap(), FilterCondition::StartsWith);
    assert_eq!( FilterCondition::from_code("E").unwrap(), FilterCondition::EndsWith);
    assert!( FilterCondition::from_code("N").is_err());

    let f = NumericRangeFilter::<f64>::parse( Some("1.5"), Some(""), false).unwrap();
    assert_eq!( f.lower, Some(1.5));
    assert!( f.upper.is_none());
    assert!( NumericRangeFilter::<f64>::parse( Some("1,5"), None, false).is_err());
    assert!( NumericRangeFilter::<i32>::parse( None, Some("abc"), false).is_err());

    let d = DateRangeFilter::parse( Some("2025-10-17"), None, false).unwrap();
    assert_eq!( d.lower, NaiveDate::from_ymd_opt( 2025, 10, 17));
    assert!( DateRangeFilter::parse( Some("17/10/2025"), None, false).is_err());
}

#[test]
fn test_date_range() {
    let at = |s: &str| Some( EpochMillis::new( DateTime::parse_from_rfc3339(s).unwrap().timestamp_millis()));
    let f = DateRangeFilter::parse( Some("2025-10-17"), Some("2025-10-18"), false).unwrap();

    assert!( f.passes( at("2025-10-17T00:00:00Z")));
    assert!( f.passes( at("2025-10-18T23:59:59Z")));
    assert!( !f.passes( at("2025-10-16T23:59:59Z")));
    assert!( !f.passes( at("2025-10-19T00:00:00Z")));
    assert!( !f.passes( None));
}

#[test]
fn test_enum_and_bool_values() {
    let f = BoolFilter::new( Species::Helicopter, false);
    assert!( f.passes( Some(Species::Helicopter)));
    assert!( !f.passes( Some(Species::LandPlane)) && !f.passes( None));

    let f = BoolFilter::new( true, true);
    assert!( !f.passes( Some(true)));
    assert!( f.passes( Some(false)) && f.passes( None));
}

#[test]
fn test_bounding_box() {
    let f = BoundingBoxFilter::new( 52.0, -1.0, 51.0, 1.0);
    assert!( f.passes( Some( GeoPos::new( 51.5, 0.0))));
    assert!( f.passes( Some( GeoPos::new( 52.0, 1.0)))); // inclusive
    assert!( !f.passes( Some( GeoPos::new( 51.5, 1.5))));
    assert!( !f.passes( None));

    // crossing the antimeridian
    let f = BoundingBoxFilter::new( 10.0, 170.0, -10.0, -170.0);
    assert!( f.passes( Some( GeoPos::new( 0.0, 175.0))));
    assert!( f.passes( Some( GeoPos::new( 0.0, -175.0))));
    assert!( !f.passes( Some( GeoPos::new( 0.0, 0.0))));
    assert!( !f.passes( Some( GeoPos::new( 11.0, 180.0))));
}

#[test]
fn test_conjunction() {
    let filter = AircraftListFilter {
        callsign: Some( StringFilter::new( "BAW", FilterCondition::StartsWith, false)),
        altitude: Some( NumericRangeFilter::new( Some(5000), None, false)),
        ..Default::default()
    };
    assert!( !filter.is_empty());

    let with = |callsign: &str, altitude: i32| {
        let mut ac = sample_aircraft(1);
        ac.callsign = v( callsign.to_string(), 1);
        ac.altitude = v( altitude, 1);
        ac
    };

    for (callsign, altitude, expected) in [("BAW1", 9000, true), ("BAW1", 1000, false), ("EZY1", 9000, false), ("EZY1", 1000, false)] {
        let ac = with( callsign, altitude);
        assert_eq!( filter.passes( &candidate(&ac)), expected, "{callsign} at {altitude}");
    }

    let ac = sample_aircraft(1);
    assert!( AircraftListFilter::default().is_empty());
    assert!( AircraftListFilter::default().passes( &candidate(&ac)));
}

#[test]
fn test_airport() {
    let mut ac = sample_aircraft(1);
    ac.origin = v( "EGLL London Heathrow".to_string(), 1);
    ac.destination = v( "KJFK New York".to_string(), 1);
    ac.stopovers = v( vec!["EINN Shannon".to_string()], 1);

    let passes = |code: &str, reversed: bool| {
        let filter = AircraftListFilter {
            airport: Some( StringFilter::new( code, FilterCondition::StartsWith, reversed)),
            ..Default::default()
        };
        filter.passes( &candidate(&ac))
    };

    assert!( passes( "egll", false));
    assert!( passes( "KJFK", false));
    assert!( passes( "EINN", false));
    assert!( !passes( "LFPG", false));
    assert!( !passes( "EINN", true));
    assert!( passes( "LFPG", true));
}

#[test]
fn test_position_and_distance() {
    let ac = sample_aircraft(1);
    let mut no_pos = sample_aircraft(2);
    no_pos.latitude = Default::default();

    let filter = AircraftListFilter { must_transmit_position: true, ..Default::default() };
    assert!( filter.passes( &candidate(&ac)));
    assert!( !filter.passes( &candidate(&no_pos)));

    let filter = AircraftListFilter { distance: Some( NumericRangeFilter::new( None, Some(10.0), false)), ..Default::default() };
    assert!( filter.passes( &Candidate { aircraft: &ac, distance_km: Some(6.9) }));
    assert!( !filter.passes( &Candidate { aircraft: &ac, distance_km: Some(10.1) }));
    assert!( !filter.passes( &Candidate { aircraft: &ac, distance_km: None }));

    let filter = AircraftListFilter {
        wake_turbulence_category: Some( BoolFilter::new( WakeTurbulenceCategory::Heavy, false)),
        ..Default::default()
    };
    assert!( !filter.passes( &candidate(&ac)));
}

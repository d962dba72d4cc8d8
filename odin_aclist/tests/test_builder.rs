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

use chrono::TimeDelta;
use serde_json::{json, Value};
use odin_aclist::{
    AcListConfig, AircraftListFilter, AircraftSnapshot, FeedSelector, FeedSnapshot, ListSource, RequestContext,
    SortKey, TrailRequest,
    filter::{FilterCondition, StringFilter},
};

// run with "cargo test --test test_builder -- --nocapture"

fn feeds ()->Vec<FeedSnapshot> {
    let mut a2 = sample_aircraft(2);
    a2.first_seen = millis(5);
    a2.callsign.set( "EZY42".to_string(), 9);

    vec![
        feed( 1, vec![ sample_aircraft(1), a2]),
        feed( 2, vec![ sample_aircraft(3)]),
    ]
}

#[test]
fn test_feed_selection() {
    let env = test_env( AcListConfig { default_feed_id: 2, ..Default::default() });
    let feeds = feeds();

    let list = env.builder.build( &RequestContext::new(), &feeds, None);
    assert_eq!( list.source_feed_id, 2);
    assert_eq!( list.aircraft.len(), 1);
    assert_eq!( list.aircraft[0].id, 3);

    let list = env.builder.build( &RequestContext::new().with_feed( FeedSelector::Id(1)), &feeds, None);
    assert_eq!( list.source_feed_id, 1);
    assert_eq!( list.total_aircraft, 2);

    // an unknown feed is not an error, the requested id is echoed back
    let list = env.builder.build( &RequestContext::new().with_feed( FeedSelector::Id(7)), &feeds, None);
    assert_eq!( list.source_feed_id, 7);
    assert_eq!( list.total_aircraft, 0);
    assert!( list.aircraft.is_empty());

    // default id does not exist: first feed
    env.config.update( |c| c.default_feed_id = 99);
    let list = env.builder.build( &RequestContext::new(), &feeds, None);
    assert_eq!( list.source_feed_id, 1);

    let list = env.builder.build( &RequestContext::new(), &[], None);
    assert_eq!( list.source_feed_id, -1);
    assert_eq!( list.last_data_version, "-1");
    assert_eq!( list.feeds, Some( vec![]));
}

#[test]
fn test_config_changes_apply_to_next_request() {
    let env = test_env( AcListConfig { default_feed_id: 1, ..Default::default() });
    let feeds = feeds();

    assert_eq!( env.builder.build( &RequestContext::new(), &feeds, None).source_feed_id, 1);
    env.config.update( |c| c.default_feed_id = 2);
    assert_eq!( env.builder.build( &RequestContext::new(), &feeds, None).source_feed_id, 2);

    env.config.update( |c| c.short_trail_length_secs = 120);
    assert_eq!( env.builder.build( &RequestContext::new(), &feeds, None).short_trail_length_secs, 120);
}

#[test]
fn test_last_data_version() {
    let env = test_env( AcListConfig::default());
    let feeds = feeds();
    let request = RequestContext::new().with_feed( FeedSelector::Id(1));

    let list = env.builder.build( &request, &feeds, None);
    assert_eq!( list.last_data_version, "9");
    assert_eq!( list.last_version(), 9);

    // never below what the client already has
    let list = env.builder.build( &request.clone().with_previous_version(12), &feeds, None);
    assert_eq!( list.last_data_version, "12");

    // only aircraft that pass the filter count
    let filter = AircraftListFilter {
        callsign: Some( StringFilter::new( "BAW", FilterCondition::StartsWith, false)),
        ..Default::default()
    };
    let list = env.builder.build( &request.clone().with_filter( filter), &feeds, None);
    assert_eq!( list.total_aircraft, 1);
    assert_eq!( list.last_data_version, "6");
}

#[test]
fn test_incremental_poll() {
    let env = test_env( AcListConfig::default());
    let feeds = feeds();

    let request = RequestContext::new()
        .with_feed( FeedSelector::Id(1))
        .with_previous_version(6)
        .with_known_ids([1, 2]);
    let list = env.builder.build( &request, &feeds, None);
    assert_eq!( list.aircraft.len(), 2);

    // default order is newest first
    let ac2 = &list.aircraft[0];
    assert_eq!( ac2.id, 2);
    assert_eq!( ac2.callsign.as_deref(), Some("EZY42"));
    assert!( ac2.icao24.is_none());

    let mut request = request;
    request.ignore_unchanged = true;
    let list = env.builder.build( &request, &feeds, None);
    assert_eq!( list.total_aircraft, 2);
    assert_eq!( list.aircraft.len(), 1);
    assert_eq!( list.aircraft[0].id, 2);
}

#[test]
fn test_sorting() {
    let env = test_env( AcListConfig::default());
    let feeds = feeds();

    let request = RequestContext::new()
        .with_feed( FeedSelector::Id(1))
        .with_sort_keys( [SortKey::parse( "call", false).unwrap()]);
    let list = env.builder.build( &request, &feeds, None);
    let ids: Vec<i32> = list.aircraft.iter().map( |a| a.id).collect();
    assert_eq!( ids, vec![2, 1]);
}

#[test]
fn test_flight_simulator_list() {
    let env = test_env( AcListConfig {
        flags_folder_present: true,
        pictures_folder_present: true,
        silhouettes_folder_present: true,
        ..Default::default()
    });
    let feeds = feeds();

    let mut sim_ac = sample_aircraft(100);
    sim_ac.full_coordinates.push( point( 1, 0, 51.0, -0.1, 90.0, 5000, 200.0));
    let simulated = vec![ sim_ac];

    let mut request = RequestContext::new()
        .with_browser_position( 51.5, -0.2)
        .with_trail( TrailRequest::from_code("F").unwrap());
    request.is_flight_simulator_list = true;

    let list = env.builder.build( &request, &feeds, Some( simulated.as_slice()));
    assert_eq!( list.source, ListSource::FlightSimulator);
    assert_eq!( list.source_feed_id, -1);
    assert_eq!( list.aircraft.len(), 1);
    assert!( list.aircraft[0].distance_km.is_none());
    assert!( list.aircraft[0].full_trail.is_none());
    assert!( !list.show_flags && !list.show_pictures && !list.show_silhouettes);
    assert_eq!( list.short_trail_length_secs, 0);

    let value: Value = serde_json::from_str( &list.to_json().unwrap()).unwrap();
    assert_eq!( value["src"], json!(3));

    // no simulator attached
    let list = env.builder.build( &request, &feeds, None);
    assert!( list.aircraft.is_empty());
}

#[test]
fn test_picture_visibility() {
    let env = test_env( AcListConfig { pictures_folder_present: true, ..Default::default() });
    let feeds = feeds();

    let mut request = RequestContext::new();
    assert!( env.builder.build( &request, &feeds, None).show_pictures);

    request.is_internet_client = true;
    assert!( !env.builder.build( &request, &feeds, None).show_pictures);

    env.config.update( |c| c.internet_clients_can_see_pictures = true);
    assert!( env.builder.build( &request, &feeds, None).show_pictures);

    env.config.update( |c| c.pictures_folder_present = false);
    assert!( !env.builder.build( &request, &feeds, None).show_pictures);
}

#[test]
fn test_envelope_json() {
    let env = test_env( AcListConfig { default_feed_id: 1, flags_folder_present: true, ..Default::default() });
    let mut feeds = feeds();
    feeds[0].has_polar_plot = true;

    let request = RequestContext::new().with_browser_position( 51.5, -0.2);
    let list = env.builder.build( &request, &feeds, None);
    let json = list.to_json().unwrap();
    println!("{json}");

    let value: Value = serde_json::from_str( &json).unwrap();
    assert_eq!( value["totalAc"], json!(2));
    assert_eq!( value["src"], json!(1));
    assert_eq!( value["srcFeed"], json!(1));
    assert_eq!( value["lastDv"], json!("9"));
    assert_eq!( value["stm"], json!(T0 + 60_000));
    assert_eq!( value["showFlg"], json!(true));
    assert_eq!( value["showPic"], json!(false));
    assert_eq!( value["showSil"], json!(false));
    assert_eq!( value["flgW"], json!(85));
    assert_eq!( value["flgH"], json!(20));
    assert_eq!( value["shtTrlSec"], json!(30));
    assert_eq!( value["feeds"], json!([
        {"id": 1, "name": "feed 1", "polarPlot": true},
        {"id": 2, "name": "feed 2", "polarPlot": false}
    ]));

    let ac = &value["acList"][0];
    assert_eq!( ac["Id"], json!(2));
    assert!( ac["Dst"].is_number());
    assert!( ac["Brng"].is_number());

    // clients can ask us to skip the roster
    let mut request = request;
    request.feeds_not_required = true;
    let value: Value = serde_json::from_str( &env.builder.build( &request, &feeds, None).to_json().unwrap()).unwrap();
    assert!( value.get("feeds").is_none());
}

#[test]
fn test_server_time_follows_clock() {
    let env = test_env( AcListConfig::default());
    let feeds = feeds();

    let list = env.builder.build( &RequestContext::new(), &feeds, None);
    assert_eq!( list.server_time, millis(60));

    env.clock.advance( TimeDelta::seconds(5));
    let list = env.builder.build( &RequestContext::new(), &feeds, None);
    assert_eq!( list.server_time, millis(65));
    assert_eq!( list.aircraft[1].seconds_tracked, Some(65)); // aircraft 1, first seen at T0
}

#[test]
fn test_config_files() {
    let config = AcListConfig::from_ron_str( "AcListConfig( default_feed_id: 3, flags_folder_present: true )").unwrap();
    assert_eq!( config.default_feed_id, 3);
    assert!( config.flags_folder_present);
    assert_eq!( config.display_timeout_secs, 30);
    assert_eq!( config.stale_position_millis(), 90_000);

    assert!( AcListConfig::from_ron_str( "AcListConfig( default_feed_id: \"x\" )").is_err());

    // the files that come with the crate
    let config = AcListConfig::from_path( "configs/aclist.ron").unwrap();
    assert_eq!( config.default_feed_id, 1);

    let feeds = odin_aclist::feeds::load_feeds( "resources/feeds.ron").unwrap();
    assert_eq!( feeds.len(), 2);
    assert_eq!( feeds[0].aircraft.len(), 2);
    assert_eq!( feeds[0].aircraft[0].altitude.copied(), Some(9770));
    assert_eq!( feeds[0].aircraft[0].full_coordinates.len(), 3);
}

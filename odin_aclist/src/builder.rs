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

use std::sync::Arc;
use serde::Serialize;
use serde_repr::Serialize_repr;
use tracing::{debug,trace};
use odin_common::{datetime::{Clock, EpochMillis}, geo::distance_km};

use crate::aircraft::{AircraftSnapshot, Candidate};
use crate::config::ConfigProvider;
use crate::feeds::{FeedJson, FeedSnapshot, select_feed};
use crate::projector::{AircraftJson, ProjectionContext, project};
use crate::request::RequestContext;
use crate::sort::sort_candidates;
use crate::errors::Result;

/// where the aircraft of a list come from
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize_repr)]
#[repr(u8)]
pub enum ListSource {
    Feed = 1,
    FlightSimulator = 3,
}

/// the response envelope of an aircraft list poll
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct AircraftListJson {
    #[serde(rename="acList")] pub aircraft: Vec<AircraftJson>,
    #[serde(rename="totalAc")] pub total_aircraft: usize,
    #[serde(rename="src")] pub source: ListSource,
    #[serde(rename="srcFeed")] pub source_feed_id: i32,
    #[serde(rename="feeds", skip_serializing_if="Option::is_none")] pub feeds: Option<Vec<FeedJson>>,
    #[serde(rename="lastDv")] pub last_data_version: String,
    #[serde(rename="stm")] pub server_time: EpochMillis,
    #[serde(rename="showFlg")] pub show_flags: bool,
    #[serde(rename="showPic")] pub show_pictures: bool,
    #[serde(rename="showSil")] pub show_silhouettes: bool,
    #[serde(rename="flgW")] pub flag_width: u32,
    #[serde(rename="flgH")] pub flag_height: u32,
    #[serde(rename="shtTrlSec")] pub short_trail_length_secs: u64,
}

impl AircraftListJson {
    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string( self)? )
    }

    pub fn to_json_pretty (&self)->Result<String> {
        Ok( serde_json::to_string_pretty( self)? )
    }

    pub fn last_version (&self)->i64 {
        self.last_data_version.parse().unwrap_or(-1)
    }
}

/// turns tracker snapshots into aircraft list responses for polling clients.
///
/// The builder does not keep any per-client state. Configuration and time are obtained anew for
/// each call, i.e. the same builder can be shared between concurrent request handlers
pub struct AircraftListBuilder {
    config: Arc<dyn ConfigProvider>,
    clock: Arc<dyn Clock>,
}

impl AircraftListBuilder {
    pub fn new (config: Arc<dyn ConfigProvider>, clock: Arc<dyn Clock>)->Self {
        AircraftListBuilder { config, clock }
    }

    pub fn build (&self, request: &RequestContext, feeds: &[FeedSnapshot], simulator: Option<&[AircraftSnapshot]>)->AircraftListJson {
        let config = self.config.config();
        let now = self.clock.now_millis();

        let (aircraft, source, source_feed_id): (&[AircraftSnapshot], ListSource, i32) = if request.is_flight_simulator_list {
            (simulator.unwrap_or(&[]), ListSource::FlightSimulator, -1)
        } else {
            let (feed, id) = select_feed( feeds, request.feed, config.default_feed_id);
            (feed.map_or( &[][..], |f| f.aircraft.as_slice()), ListSource::Feed, id)
        };

        let browser_position = if request.is_flight_simulator_list { None } else { request.browser_position };
        let mut candidates: Vec<Candidate> = aircraft.iter()
            .map( |ac| {
                let distance = browser_position.zip( ac.position()).map( |(from,to)| distance_km( &from, &to));
                Candidate { aircraft: ac, distance_km: distance }
            })
            .filter( |c| {
                let passes = request.filter.passes(c);
                if !passes { trace!("filtered out {}", c.aircraft) }
                passes
            })
            .collect();

        sort_candidates( &mut candidates, &request.sort_keys);

        let ctx = ProjectionContext::new( request, &config, now);
        let projected: Vec<AircraftJson> = candidates.iter()
            .filter_map( |c| project( c, &ctx, request.is_known( c.aircraft.id)))
            .collect();

        let last_data_version = candidates.iter()
            .map( |c| c.aircraft.data_version())
            .chain( request.last_version())
            .max()
            .unwrap_or(-1);

        let feeds = if request.feeds_not_required {
            None
        } else {
            Some( feeds.iter().map( FeedSnapshot::roster_entry).collect())
        };

        let is_live = !request.is_flight_simulator_list;
        let show_pictures = is_live && config.pictures_folder_present
            && (!request.is_internet_client || config.internet_clients_can_see_pictures);

        debug!("aircraft list for feed {}: {} of {} aircraft pass filter, {} sent, lastDv {}",
               source_feed_id, candidates.len(), aircraft.len(), projected.len(), last_data_version);

        AircraftListJson {
            total_aircraft: candidates.len(),
            aircraft: projected,
            source,
            source_feed_id,
            feeds,
            last_data_version: last_data_version.to_string(),
            server_time: now,
            show_flags: is_live && config.flags_folder_present,
            show_pictures,
            show_silhouettes: is_live && config.silhouettes_folder_present,
            flag_width: config.flag_width,
            flag_height: config.flag_height,
            short_trail_length_secs: if is_live { config.short_trail_length_secs } else { 0 },
        }
    }
}

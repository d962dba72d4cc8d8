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

use std::collections::HashSet;
use odin_common::geo::GeoPos;

use crate::filter::AircraftListFilter;
use crate::sort::SortKey;
use crate::errors::{OdinAcListError, Result, invalid_argument};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum TrailType {
    #[default] None,
    Short,
    Full
}

/// what the per-point value of a trail represents
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum TrailFlavor {
    #[default] Plain, // track
    Altitude,
    Speed
}

impl TrailFlavor {
    /// the "TT" indicator sent along with trails
    pub fn code (self)->Option<&'static str> {
        match self {
            TrailFlavor::Plain => None,
            TrailFlavor::Altitude => Some("a"),
            TrailFlavor::Speed => Some("s"),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct TrailRequest {
    pub kind: TrailType,
    pub flavor: TrailFlavor,
}

impl TrailRequest {
    pub const NONE: TrailRequest = TrailRequest { kind: TrailType::None, flavor: TrailFlavor::Plain };

    pub fn new (kind: TrailType, flavor: TrailFlavor)->Self { TrailRequest { kind, flavor } }

    /// parse the trail format codes used by browser clients: "" (none), "S", "SA", "SS", "F", "FA", "FS"
    pub fn from_code (code: &str)->Result<Self> {
        let code = code.trim().to_ascii_uppercase();
        let mut chars = code.chars();

        let kind = match chars.next() {
            None => return Ok( TrailRequest::NONE),
            Some('S') => TrailType::Short,
            Some('F') => TrailType::Full,
            _ => return Err( invalid_argument!("unknown trail type '{}'", code))
        };
        let flavor = match chars.next() {
            None => TrailFlavor::Plain,
            Some('A') => TrailFlavor::Altitude,
            Some('S') => TrailFlavor::Speed,
            _ => return Err( invalid_argument!("unknown trail flavor '{}'", code))
        };
        if chars.next().is_some() {
            return Err( invalid_argument!("invalid trail format '{}'", code))
        }

        Ok( TrailRequest { kind, flavor } )
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum FeedSelector {
    #[default] Default,
    Id(i32)
}

impl From<i32> for FeedSelector {
    /// negative ids mean "whatever the server considers the default feed"
    fn from (id: i32)->Self {
        if id < 0 { FeedSelector::Default } else { FeedSelector::Id(id) }
    }
}

/// the (already parsed) arguments of one aircraft list poll
#[derive(Debug,Clone,Default)]
pub struct RequestContext {
    /// last data version the client has fully seen. None or negative values mean the client never polled
    pub previous_version: Option<i64>,
    pub known_ids: HashSet<i32>,
    pub feed: FeedSelector,
    pub browser_position: Option<GeoPos>,
    pub trail: TrailRequest,
    pub resend_trails: bool,
    /// the short trail length the client got with its last response, if it reports it
    pub client_short_trail_secs: Option<u64>,
    pub filter: AircraftListFilter,
    pub sort_keys: Vec<SortKey>,
    pub only_message_fields: bool,
    pub always_show_icao: bool,
    pub ignore_unchanged: bool,
    pub is_flight_simulator_list: bool,
    pub feeds_not_required: bool,
    pub is_internet_client: bool,
}

impl RequestContext {
    pub fn new ()->Self { RequestContext::default() }

    pub fn last_version (&self)->Option<i64> {
        self.previous_version.filter( |v| *v >= 0)
    }

    pub fn is_known (&self, id: i32)->bool {
        self.known_ids.contains( &id)
    }

    //--- builder style setters, mostly for tools and tests

    pub fn with_previous_version (mut self, version: i64)->Self { self.previous_version = Some(version); self }

    pub fn with_known_ids (mut self, ids: impl IntoIterator<Item=i32>)->Self { self.known_ids.extend( ids); self }

    pub fn with_feed (mut self, feed: FeedSelector)->Self { self.feed = feed; self }

    pub fn with_browser_position (mut self, lat: f64, lon: f64)->Self { self.browser_position = Some( GeoPos::new(lat,lon)); self }

    pub fn with_trail (mut self, trail: TrailRequest)->Self { self.trail = trail; self }

    pub fn with_filter (mut self, filter: AircraftListFilter)->Self { self.filter = filter; self }

    pub fn with_sort_keys (mut self, keys: impl IntoIterator<Item=SortKey>)->Self { self.sort_keys = keys.into_iter().collect(); self }
}

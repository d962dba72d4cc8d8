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

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};

use crate::aircraft::AircraftSnapshot;
use crate::request::FeedSelector;
use crate::errors::Result;

/// the aircraft of one receiver (or merged receiver set) as captured by the tracker for one request
#[derive(Debug,Clone,Default,Serialize,Deserialize)]
#[serde(default)]
pub struct FeedSnapshot {
    pub id: i32,
    pub name: String,
    pub has_polar_plot: bool,
    pub aircraft: Vec<AircraftSnapshot>,
}

impl FeedSnapshot {
    pub fn new (id: i32, name: impl ToString, aircraft: Vec<AircraftSnapshot>)->Self {
        FeedSnapshot { id, name: name.to_string(), has_polar_plot: false, aircraft }
    }

    pub fn roster_entry (&self)->FeedJson {
        FeedJson { id: self.id, name: self.name.clone(), has_polar_plot: self.has_polar_plot }
    }
}

/// read a list of feed snapshots from a RON file (mostly used to replay captured tracker state)
pub fn load_feeds<P: AsRef<Path>> (path: P)->Result<Vec<FeedSnapshot>> {
    let s = fs::read_to_string( path)?;
    Ok( ron::de::from_str( &s)? )
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct FeedJson {
    pub id: i32,
    pub name: String,
    #[serde(rename="polarPlot")] pub has_polar_plot: bool,
}

/// pick the feed to report on. Explicitly requested feeds that don't exist yield None, with the
/// requested id echoed back. Otherwise we fall back to the configured default feed and then to the first one
pub fn select_feed (feeds: &[FeedSnapshot], selector: FeedSelector, default_feed_id: i32)->(Option<&FeedSnapshot>, i32) {
    let find = |id: i32| feeds.iter().find( |f| f.id == id);

    match selector {
        FeedSelector::Id(id) => (find(id), id),
        FeedSelector::Default => {
            match find( default_feed_id).or_else( || feeds.first()) {
                Some(feed) => (Some(feed), feed.id),
                None => (None, -1)
            }
        }
    }
}

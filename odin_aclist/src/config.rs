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

use std::{fs, path::Path, sync::{Arc,RwLock}};
use serde::{Serialize,Deserialize};

use crate::errors::Result;

/// the server side settings that affect aircraft list content. Configs are RON files, e.g.
/// ```ron
/// AcListConfig(
///     default_feed_id: 2,
///     display_timeout_secs: 30,
///     short_trail_length_secs: 30,
///     flags_folder_present: true,
/// )
/// ```
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct AcListConfig {
    pub default_feed_id: i32,
    pub display_timeout_secs: u64, // aircraft not heard from within this time are removed by the tracker
    pub short_trail_length_secs: u64,
    pub flags_folder_present: bool,
    pub pictures_folder_present: bool,
    pub silhouettes_folder_present: bool,
    pub internet_clients_can_see_pictures: bool,
    pub flag_width: u32,
    pub flag_height: u32,
}

impl Default for AcListConfig {
    fn default()->Self {
        AcListConfig {
            default_feed_id: -1,
            display_timeout_secs: 30,
            short_trail_length_secs: 30,
            flags_folder_present: false,
            pictures_folder_present: false,
            silhouettes_folder_present: false,
            internet_clients_can_see_pictures: false,
            flag_width: 85,
            flag_height: 20,
        }
    }
}

/// positions older than the display timeout plus this grace period are flagged as stale
pub const STALE_POSITION_GRACE_SECS: i64 = 60;

impl AcListConfig {
    pub fn from_ron_str (s: &str)->Result<Self> {
        Ok( ron::de::from_str(s)? )
    }

    pub fn from_path<P: AsRef<Path>> (path: P)->Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_ron_str( &s)
    }

    /// threshold (in millis) beyond which a last position report counts as stale
    pub fn stale_position_millis (&self)->i64 {
        (self.display_timeout_secs as i64 + STALE_POSITION_GRACE_SECS) * 1000
    }
}

/// where the list builder gets its settings from. This is asked once per request so that
/// config changes take effect with the next poll
pub trait ConfigProvider: Send + Sync {
    fn config (&self)->Arc<AcListConfig>;
}

/// a ConfigProvider that can be updated at runtime (e.g. by a config file watcher)
#[derive(Debug,Default)]
pub struct SharedConfig {
    current: RwLock<Arc<AcListConfig>>
}

impl SharedConfig {
    pub fn new (config: AcListConfig)->Self {
        SharedConfig { current: RwLock::new( Arc::new(config)) }
    }

    pub fn replace (&self, config: AcListConfig) {
        // poisoning cannot leave a partially written Arc behind
        let mut current = self.current.write().unwrap_or_else( |e| e.into_inner());
        *current = Arc::new(config);
    }

    pub fn update (&self, f: impl FnOnce(&mut AcListConfig)) {
        let mut config = (*self.config()).clone();
        f( &mut config);
        self.replace( config);
    }
}

impl ConfigProvider for SharedConfig {
    fn config (&self)->Arc<AcListConfig> {
        self.current.read().unwrap_or_else( |e| e.into_inner()).clone()
    }
}

impl ConfigProvider for AcListConfig {
    fn config (&self)->Arc<AcListConfig> { Arc::new( self.clone()) }
}

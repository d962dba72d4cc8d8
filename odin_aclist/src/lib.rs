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

//! incremental aircraft list projection for polling clients.
//!
//! Clients periodically ask for the aircraft of a feed, telling us the last data version they have seen
//! and which aircraft they already know. [`AircraftListBuilder`] filters and sorts the tracker snapshot
//! and then projects each aircraft into a sparse record that only contains what changed since then,
//! optionally together with an (incremental) position trail.

pub mod errors;
pub mod fields;
pub mod aircraft;
pub mod config;
pub mod request;
pub mod filter;
pub mod sort;
pub mod trail;
pub mod projector;
pub mod feeds;
pub mod builder;

pub use aircraft::{AircraftSnapshot, Candidate, TrailPoint, Versioned};
pub use builder::{AircraftListBuilder, AircraftListJson, ListSource};
pub use config::{AcListConfig, ConfigProvider, SharedConfig};
pub use feeds::{FeedSnapshot, FeedJson};
pub use filter::AircraftListFilter;
pub use projector::{AircraftJson, ProjectionContext};
pub use request::{FeedSelector, RequestContext, TrailFlavor, TrailRequest, TrailType};
pub use sort::{SortColumn, SortKey};

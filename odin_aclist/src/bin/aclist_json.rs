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
use anyhow::{anyhow, Result};
use chrono::DateTime;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use odin_common::datetime::{Clock, FixedClock, SystemClock};
use odin_aclist::{
    AcListConfig, AircraftListBuilder, FeedSelector, RequestContext, SortKey, TrailRequest,
    feeds::load_feeds
};

/// run with "cargo run --bin aclist_json -- --config odin_aclist/configs/aclist.ron --trail FA odin_aclist/resources/feeds.ron"
#[derive(Parser, Debug)]
#[command(version, about, long_about = "print the aircraft list JSON a polling client would get for a captured tracker snapshot")]
pub struct Args {
    /// RON file with aircraft list settings (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<String>,

    /// id of the requested feed (negative: server default)
    #[arg(short,long, default_value_t = -1, allow_negative_numbers = true)]
    pub feed: i32,

    /// last data version the client has seen
    #[arg(long)]
    pub ldv: Option<i64>,

    /// comma separated ids of aircraft the client already knows
    #[arg(long, value_delimiter = ',')]
    pub known: Vec<i32>,

    /// trail format: S, SA, SS, F, FA or FS
    #[arg(short,long, default_value = "")]
    pub trail: String,

    /// sort column with optional direction, e.g. "alt" or "call:desc" (max two)
    #[arg(short,long)]
    pub sort: Vec<String>,

    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// make the client drop and rebuild its trails
    #[arg(long)]
    pub resend_trails: bool,

    /// pretend "now" is the given epoch millis (default is the wall clock)
    #[arg(long)]
    pub now: Option<i64>,

    /// pretty print the JSON output
    #[arg(short,long)]
    pub pretty: bool,

    /// RON file with the captured feed snapshots
    pub feeds: String,
}

fn parse_sort_key (arg: &str)->Result<SortKey> {
    let (name, dir) = arg.split_once(':').unwrap_or( (arg, "asc"));
    let ascending = match dir.to_ascii_lowercase().as_str() {
        "asc" | "a" => true,
        "desc" | "d" => false,
        _ => return Err( anyhow!("unknown sort direction '{dir}'"))
    };
    SortKey::parse( name, ascending).ok_or_else( || anyhow!("unknown sort column '{name}'"))
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .with_writer( std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AcListConfig::from_path( path)?,
        None => AcListConfig::default()
    };
    let clock: Arc<dyn Clock> = match args.now {
        Some(millis) => {
            let now = DateTime::from_timestamp_millis( millis).ok_or_else( || anyhow!("invalid time {millis}"))?;
            Arc::new( FixedClock::new( now))
        }
        None => Arc::new( SystemClock)
    };

    let feeds = load_feeds( &args.feeds)?;
    info!("loaded {} feeds with {} aircraft from {}", feeds.len(), feeds.iter().map(|f| f.aircraft.len()).sum::<usize>(), args.feeds);

    let mut request = RequestContext::new()
        .with_feed( FeedSelector::from( args.feed))
        .with_known_ids( args.known.iter().copied())
        .with_trail( TrailRequest::from_code( &args.trail)?)
        .with_sort_keys( args.sort.iter().map( |s| parse_sort_key(s)).collect::<Result<Vec<_>>>()?);
    request.previous_version = args.ldv;
    request.resend_trails = args.resend_trails;
    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        request = request.with_browser_position( lat, lng);
    }

    let builder = AircraftListBuilder::new( Arc::new( config), clock);
    let list = builder.build( &request, &feeds, None);

    if args.pretty {
        println!("{}", list.to_json_pretty()?);
    } else {
        println!("{}", list.to_json()?);
    }

    Ok(())
}

//! Main entrypoint for the bridge simulator.

#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
use cli::{init_tracing_subscriber, SimCli};

mod scenario;
use scenario::Scenario;

mod world;
use world::World;

fn main() -> Result<()> {
    let cli = SimCli::parse();
    init_tracing_subscriber(cli.v)?;

    let scenario = match cli.scenario.as_deref() {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::round_trip(),
    };
    info!(target: "sim", "Running scenario with {} steps", scenario.steps.len());

    let mut world = World::deploy()?;
    world.run(&scenario)?;

    let report = world.report();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

//! # Nautical Calc Entry Point
//!
//! Small command-line front end for the calculation library: reports how an
//! observation point relates to the configured station and watch area.
//!
//! ```text
//! nautical-calc [--config PATH] [--json] <lon,lat[,alt]> [wave_height_m]
//! ```


use anyhow::{bail, Context};
use nautical_lib::config::{Config, CONFIG_FILE};
use nautical_lib::location::GeoPoint;
use nautical_lib::sea_state;
use nautical_lib::units::{convert_distance, DistanceUnit, Unit};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Args {
    config_path: String,
    json: bool,
    location: String,
    wave_height_m: Option<f64>,
}

/// Result of relating one observation to the configured station and area
#[derive(Debug, Serialize)]
struct Report {
    station: String,
    point: GeoPoint,
    distance: f64,
    distance_unit: DistanceUnit,
    in_range: bool,
    in_area: bool,
    sea_state: Option<u8>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut config_path = CONFIG_FILE.to_string();
    let mut json = false;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = args.next().context("--config needs a path")?;
            }
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(location) = positional.next() else {
        bail!("usage: nautical-calc [--config PATH] [--json] <lon,lat[,alt]> [wave_height_m]");
    };
    let wave_height_m = positional
        .next()
        .map(|text| {
            text.parse::<f64>()
                .with_context(|| format!("invalid wave height: {text}"))
        })
        .transpose()?;

    Ok(Args {
        config_path,
        json,
        location,
        wave_height_m,
    })
}

fn build_report(config: &Config, args: &Args) -> anyhow::Result<Report> {
    let point = GeoPoint::parse(&args.location)
        .with_context(|| format!("observation location {:?}", args.location))?;
    let home = config
        .home_point()
        .context("station location in configuration")?;
    let in_area = config
        .in_watch_area(&point)
        .context("watch area in configuration")?;

    let meters = home.distance_meters(&point);
    Ok(Report {
        station: config.station.name.clone(),
        point,
        distance: convert_distance(meters, DistanceUnit::Meters, config.units.distance),
        distance_unit: config.units.distance,
        in_range: home.in_range(&point, config.station.range_meters),
        in_area,
        sea_state: args.wave_height_m.map(sea_state::classify),
    })
}

fn print_report(report: &Report) {
    println!("Station:   {}", report.station);
    println!("Point:     {}", report.point);
    println!(
        "Distance:  {:.2} {}",
        report.distance,
        report.distance_unit.name()
    );
    println!("In range:  {}", report.in_range);
    println!("In area:   {}", report.in_area);
    if let Some(state) = report.sea_state {
        println!("Sea state: {state}");
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr, filtered by RUST_LOG (default: warnings only)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(env::args().skip(1))?;
    let config = Config::load_from_path(&args.config_path);
    let report = build_report(&config, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use launch_dash::data::loader::DEFAULT_DATA_PATH;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// `(category, first flight number of the era, success rate in tenths)`
const BOOSTER_ERAS: [(&str, u32, u32); 5] = [
    ("v1.0", 1, 3),
    ("v1.1", 6, 5),
    ("FT", 21, 8),
    ("B4", 45, 9),
    ("B5", 52, 10),
];

const FLIGHTS: u32 = 56;

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    site: &'a str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster: &'a str,
}

fn booster_era(flight: u32) -> (&'static str, u32) {
    BOOSTER_ERAS
        .iter()
        .rev()
        .find(|(_, first, _)| flight >= *first)
        .map(|(name, _, rate)| (*name, *rate))
        .unwrap_or(("v1.0", 3))
}

/// Deterministic pseudo-random mixing; the same flight always yields the
/// same row.
fn mix(flight: u32, salt: u32) -> u32 {
    let mut x = flight.wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^ (x >> 12)
}

fn row(flight: u32) -> Row<'static> {
    let (booster, rate) = booster_era(flight);
    // Heavier payloads become common in later eras.
    let ceiling = 2_000 + flight * 170;
    Row {
        flight_number: flight,
        site: SITES[(mix(flight, 1) % SITES.len() as u32) as usize],
        class: u8::from(mix(flight, 2) % 10 < rate),
        payload_mass_kg: f64::from(mix(flight, 3) % ceiling) + 350.0,
        booster,
    }
}

/// Write a deterministic synthetic launch records CSV.
#[derive(Parser)]
#[command(name = "generate_sample", about, long_about = None)]
struct Args {
    /// Output CSV path
    #[arg(default_value = DEFAULT_DATA_PATH)]
    output: PathBuf,
}

fn write_sample(output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    for flight in 1..=FLIGHTS {
        writer
            .serialize(row(flight))
            .with_context(|| format!("writing flight {flight}"))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    write_sample(&args.output)?;

    log::info!("Wrote {FLIGHTS} launches to {}", args.output.display());
    println!("Wrote {FLIGHTS} launches to {}", args.output.display());
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::DEFAULT_DATA_PATH;
use crate::data::query::ZeroGroups;

// ---------------------------------------------------------------------------
// Command-line configuration
// ---------------------------------------------------------------------------

/// Launch records dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash", version, about, long_about = None)]
pub struct DashConfig {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Show sites/outcomes with zero launches as empty pie slices
    #[arg(long)]
    pub include_empty_groups: bool,

    /// Upper bound of the payload sliders in kg
    #[arg(long, default_value_t = 10_000.0, value_parser = positive_kg)]
    pub slider_max: f64,

    /// Step of the payload sliders in kg
    #[arg(long, default_value_t = 1_000.0, value_parser = positive_kg)]
    pub slider_step: f64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            include_empty_groups: false,
            slider_max: 10_000.0,
            slider_step: 1_000.0,
        }
    }
}

impl DashConfig {
    pub fn zero_groups(&self) -> ZeroGroups {
        if self.include_empty_groups {
            ZeroGroups::Include
        } else {
            ZeroGroups::Omit
        }
    }
}

fn positive_kg(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("'{s}' must be a positive mass in kg"))
    }
}

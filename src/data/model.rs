use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::filter::SiteFilter;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Binary launch outcome, stored as `1` (success) / `0` (failure) in the
/// source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Interpret a `class` cell. Accepts `1`/`0` in integer or float
    /// spelling, and `true`/`false` as written by boolean Parquet columns.
    pub fn parse_class(raw: &str) -> Result<Self, RowError> {
        let s = raw.trim();
        match s {
            "true" => return Ok(Outcome::Success),
            "false" => return Ok(Outcome::Failure),
            _ => {}
        }
        match s.parse::<f64>() {
            Ok(v) if v == 1.0 => Ok(Outcome::Success),
            Ok(v) if v == 0.0 => Ok(Outcome::Failure),
            _ => Err(RowError::InvalidOutcome(s.to_string())),
        }
    }

    /// The `class` value: 1 for success, 0 for failure.
    pub fn as_class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// RowError – why a single source row was rejected
// ---------------------------------------------------------------------------

/// A data-integrity problem with one row of the input table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing value for column '{0}'")]
    MissingField(&'static str),

    #[error("launch site is empty")]
    EmptySite,

    #[error("payload mass '{0}' is not a non-negative number")]
    InvalidPayload(String),

    #[error("class '{0}' is not 0 or 1")]
    InvalidOutcome(String),

    #[error("malformed row: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Launch Site`
    pub site: String,
    /// `Payload Mass (kg)` – finite and non-negative.
    pub payload_mass_kg: f64,
    /// `class`
    pub outcome: Outcome,
    /// `Booster Version Category` – free-form tag used for colouring.
    pub booster_category: String,
}

impl LaunchRecord {
    /// Build a record, rejecting values that would break the dataset
    /// invariants (empty site, negative or non-finite payload).
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Result<Self, RowError> {
        let site = site.into();
        if site.trim().is_empty() {
            return Err(RowError::EmptySite);
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(RowError::InvalidPayload(payload_mass_kg.to_string()));
        }
        Ok(LaunchRecord {
            site,
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// SiteOption – one entry of the site selector
// ---------------------------------------------------------------------------

/// Label/value pair for the site selector. The first option is always the
/// "All Sites" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: SiteFilter,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable table of launch records with values derived once at load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in first-appearance order.
    site_names: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl Dataset {
    /// Build the derived indices from already-validated records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut site_names = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            if seen.insert(rec.site.as_str()) {
                site_names.push(rec.site.clone());
            }
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        if records.is_empty() {
            min_payload = 0.0;
            max_payload = 0.0;
        }

        Dataset {
            records,
            site_names,
            min_payload,
            max_payload,
        }
    }

    /// All records in source order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites, in the order they first appear.
    pub fn site_names(&self) -> &[String] {
        &self.site_names
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.site_names.iter().any(|s| s == site)
    }

    /// Selector options: "All Sites" first, then one per distinct site.
    pub fn site_options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption {
            label: "All Sites".to_string(),
            value: SiteFilter::All,
        })
        .chain(self.site_names.iter().map(|site| SiteOption {
            label: site.clone(),
            value: SiteFilter::Site(site.clone()),
        }))
        .collect()
    }

    /// Smallest observed payload mass (0 for an empty dataset).
    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    /// Largest observed payload mass (0 for an empty dataset).
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Sorted set of booster categories, used to build the colour legend.
    pub fn booster_categories(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| r.booster_category.clone())
            .collect()
    }
}

use std::fmt;

use super::model::{Dataset, LaunchRecord};

/// Selector value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// Either every site, or exactly one named site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Parse a selector value; `"ALL"` is the sentinel, anything else a site.
    ///
    /// A dataset site literally named `ALL` cannot be reached through this
    /// parse; build `SiteFilter::Site` directly (as [`Dataset::site_options`]
    /// does) when the value comes from the data rather than the selector.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    /// The selector value this filter round-trips to.
    pub fn value(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(s) => s,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(s) => s == site,
        }
    }
}

/// Selector round-trip; same sentinel rule as [`SiteFilter::from_value`].
impl From<&str> for SiteFilter {
    fn from(value: &str) -> Self {
        SiteFilter::from_value(value)
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive `[low, high]` bound on payload mass in kg.
///
/// `low > high` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The observed `[min, max]` payload of a dataset.
    pub fn observed(dataset: &Dataset) -> Self {
        PayloadRange::new(dataset.min_payload(), dataset.max_payload())
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// True when no payload value can fall inside the range.
    pub fn is_empty(&self) -> bool {
        !(self.low <= self.high)
    }
}

// ---------------------------------------------------------------------------
// FilterParams – the complete query input
// ---------------------------------------------------------------------------

/// Current filter state as driven by the selector and sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub site: SiteFilter,
    pub payload_range: PayloadRange,
}

impl FilterParams {
    /// Default filter for a freshly loaded dataset: all sites, full observed
    /// payload range.
    pub fn defaults_for(dataset: &Dataset) -> Self {
        FilterParams {
            site: SiteFilter::All,
            payload_range: PayloadRange::observed(dataset),
        }
    }

    /// A record passes when it lies in the payload range and at the site.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.payload_range.contains(record.payload_mass_kg) && self.site.matches(&record.site)
    }
}

/// Return indices of records passing `params`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, params: &FilterParams) -> Vec<usize> {
    if params.payload_range.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| params.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Records at the given site (no payload constraint), in dataset order.
pub fn records_at_site<'a>(
    dataset: &'a Dataset,
    site: &'a SiteFilter,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |rec| site.matches(&rec.site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success, "v1.0").unwrap(),
            LaunchRecord::new("VAFB", 600.0, Outcome::Failure, "v1.1").unwrap(),
            LaunchRecord::new("CCAFS", 800.0, Outcome::Failure, "v1.0").unwrap(),
        ])
    }

    #[test]
    fn site_filter_round_trips_selector_values() {
        assert_eq!(SiteFilter::from_value("ALL"), SiteFilter::All);
        assert_eq!(SiteFilter::from("KSC"), SiteFilter::Site("KSC".into()));
        assert_eq!(SiteFilter::Site("KSC".into()).value(), "KSC");
        assert_eq!(SiteFilter::All.to_string(), "ALL");
        // Case matters: only the exact sentinel means all sites.
        assert_eq!(SiteFilter::from_value("all"), SiteFilter::Site("all".into()));
    }

    #[test]
    fn site_named_like_the_sentinel_is_still_selectable() {
        let ds = Dataset::from_records(vec![
            LaunchRecord::new("ALL", 100.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("KSC", 200.0, Outcome::Failure, "FT").unwrap(),
        ]);
        let option = &ds.site_options()[1];
        assert_eq!(option.label, "ALL");
        assert_eq!(option.value, SiteFilter::Site("ALL".into()));

        let params = FilterParams {
            site: option.value.clone(),
            payload_range: PayloadRange::new(0.0, 1_000.0),
        };
        assert_eq!(filtered_indices(&ds, &params), vec![0]);
        // Parsing the selector string collapses it into the sentinel.
        assert_eq!(SiteFilter::from("ALL"), SiteFilter::All);
    }

    #[test]
    fn payload_range_is_inclusive_on_both_ends() {
        let range = PayloadRange::new(500.0, 600.0);
        assert!(range.contains(500.0));
        assert!(range.contains(600.0));
        assert!(!range.contains(600.5));
        assert!(PayloadRange::new(1.0, 0.0).is_empty());
        assert!(!PayloadRange::new(3.0, 3.0).is_empty());
    }

    #[test]
    fn filtered_indices_keep_dataset_order() {
        let ds = dataset();
        let params = FilterParams {
            site: SiteFilter::Site("CCAFS".into()),
            payload_range: PayloadRange::new(0.0, 10_000.0),
        };
        assert_eq!(filtered_indices(&ds, &params), vec![0, 2]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = dataset();
        let params = FilterParams {
            site: SiteFilter::All,
            payload_range: PayloadRange::new(900.0, 100.0),
        };
        assert!(filtered_indices(&ds, &params).is_empty());
    }

    #[test]
    fn defaults_cover_the_whole_dataset() {
        let ds = dataset();
        let params = FilterParams::defaults_for(&ds);
        assert_eq!(params.site, SiteFilter::All);
        assert_eq!(filtered_indices(&ds, &params).len(), ds.len());
    }

    #[test]
    fn records_at_site_ignores_payload() {
        let ds = dataset();
        let site = SiteFilter::Site("VAFB".into());
        let hits: Vec<_> = records_at_site(&ds, &site).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload_mass_kg, 600.0);
    }
}

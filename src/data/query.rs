//! Success distribution (pie) and payload scatter queries.
//!
//! Both queries are pure: they borrow the dataset, never mutate it, and
//! map every input (unknown site, inverted or out-of-bounds range) to a
//! well-defined, possibly empty, result.

use std::collections::BTreeMap;

use super::filter::{filtered_indices, records_at_site, FilterParams, PayloadRange, SiteFilter};
use super::model::{Dataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Zero-count groups
// ---------------------------------------------------------------------------

/// Whether groups with no matching records appear in a [`PieResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroGroups {
    /// Group-by semantics: only non-empty groups are present.
    #[default]
    Omit,
    /// Every known site (or both outcomes) is present, with 0 where empty.
    Include,
}

// ---------------------------------------------------------------------------
// PieResult
// ---------------------------------------------------------------------------

/// Success distribution for the pie chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PieResult {
    /// All sites selected: number of successful launches per site.
    SuccessesBySite(BTreeMap<String, usize>),
    /// One site selected: number of launches per outcome at that site.
    OutcomesAtSite {
        site: String,
        counts: BTreeMap<Outcome, usize>,
    },
}

impl PieResult {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        match self {
            PieResult::SuccessesBySite(m) => m.values().sum(),
            PieResult::OutcomesAtSite { counts, .. } => counts.values().sum(),
        }
    }

    /// Number of groups (slices) present.
    pub fn len(&self) -> usize {
        match self {
            PieResult::SuccessesBySite(m) => m.len(),
            PieResult::OutcomesAtSite { counts, .. } => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successes at `site`; absent means zero.
    pub fn successes_at(&self, site: &str) -> usize {
        match self {
            PieResult::SuccessesBySite(m) => m.get(site).copied().unwrap_or(0),
            PieResult::OutcomesAtSite { site: s, counts } if s == site => {
                counts.get(&Outcome::Success).copied().unwrap_or(0)
            }
            PieResult::OutcomesAtSite { .. } => 0,
        }
    }

    /// Launches with `outcome` at the selected site; absent means zero.
    /// Always 0 for the all-sites variant.
    pub fn outcome_count(&self, outcome: Outcome) -> usize {
        match self {
            PieResult::SuccessesBySite(_) => 0,
            PieResult::OutcomesAtSite { counts, .. } => counts.get(&outcome).copied().unwrap_or(0),
        }
    }

    /// `(label, count)` pairs for rendering.
    pub fn slices(&self) -> Vec<(String, usize)> {
        match self {
            PieResult::SuccessesBySite(m) => m.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            PieResult::OutcomesAtSite { counts, .. } => {
                counts.iter().map(|(k, v)| (k.to_string(), *v)).collect()
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            PieResult::SuccessesBySite(_) => "Total Successful Launches by Site".to_string(),
            PieResult::OutcomesAtSite { site, .. } => {
                format!("Launch Success vs Failure Rate for site {site}")
            }
        }
    }
}

/// Success distribution with [`ZeroGroups::Omit`].
pub fn compute_success_distribution(dataset: &Dataset, selected_site: &SiteFilter) -> PieResult {
    compute_success_distribution_with(dataset, selected_site, ZeroGroups::Omit)
}

/// Success distribution for the pie chart.
///
/// * `All` – successful launches grouped by site.
/// * `Site(s)` – launches at `s` grouped by outcome. A site that is not in
///   the dataset yields an empty mapping regardless of `zero_groups`.
pub fn compute_success_distribution_with(
    dataset: &Dataset,
    selected_site: &SiteFilter,
    zero_groups: ZeroGroups,
) -> PieResult {
    match selected_site {
        SiteFilter::All => {
            let mut by_site: BTreeMap<String, usize> = BTreeMap::new();
            if zero_groups == ZeroGroups::Include {
                for site in dataset.site_names() {
                    by_site.insert(site.clone(), 0);
                }
            }
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *by_site.entry(rec.site.clone()).or_default() += 1;
            }
            PieResult::SuccessesBySite(by_site)
        }
        SiteFilter::Site(site) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            if zero_groups == ZeroGroups::Include && dataset.has_site(site) {
                counts.insert(Outcome::Success, 0);
                counts.insert(Outcome::Failure, 0);
            }
            for rec in records_at_site(dataset, selected_site) {
                *counts.entry(rec.outcome).or_default() += 1;
            }
            PieResult::OutcomesAtSite {
                site: site.clone(),
                counts,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ScatterResult
// ---------------------------------------------------------------------------

/// Records matching a site filter and payload range, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterResult<'a> {
    pub site: SiteFilter,
    pub payload_range: PayloadRange,
    records: Vec<&'a LaunchRecord>,
}

impl<'a> ScatterResult<'a> {
    /// Assemble a result from indices produced by
    /// [`filtered_indices`](super::filter::filtered_indices).
    pub fn from_indices(dataset: &'a Dataset, params: &FilterParams, indices: &[usize]) -> Self {
        let all = dataset.records();
        ScatterResult {
            site: params.site.clone(),
            payload_range: params.payload_range,
            records: indices.iter().filter_map(|&i| all.get(i)).collect(),
        }
    }

    pub fn records(&self) -> &[&'a LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `[payload, class]` points grouped by booster category for colouring.
    pub fn by_booster(&self) -> BTreeMap<&'a str, Vec<[f64; 2]>> {
        let mut groups: BTreeMap<&'a str, Vec<[f64; 2]>> = BTreeMap::new();
        for rec in &self.records {
            groups
                .entry(rec.booster_category.as_str())
                .or_default()
                .push([rec.payload_mass_kg, f64::from(rec.outcome.as_class())]);
        }
        groups
    }

    pub fn title(&self) -> String {
        match &self.site {
            SiteFilter::All => {
                "Payload vs. Launch Outcome for All Sites (Colored by Booster Version)".to_string()
            }
            SiteFilter::Site(site) => {
                format!("Payload vs. Launch Outcome for site {site} (Colored by Booster Version)")
            }
        }
    }
}

/// Records with `low <= payload <= high`, further restricted to
/// `selected_site` unless it is `All`. Dataset order is preserved.
pub fn compute_filtered_records<'a>(
    dataset: &'a Dataset,
    selected_site: &SiteFilter,
    payload_range: PayloadRange,
) -> ScatterResult<'a> {
    let params = FilterParams {
        site: selected_site.clone(),
        payload_range,
    };
    let indices = filtered_indices(dataset, &params);
    ScatterResult::from_indices(dataset, &params, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success, "v1.0").unwrap(),
            LaunchRecord::new("VAFB", 600.0, Outcome::Failure, "v1.1").unwrap(),
            LaunchRecord::new("KSC", 700.0, Outcome::Success, "FT").unwrap(),
            LaunchRecord::new("CCAFS", 800.0, Outcome::Failure, "v1.0").unwrap(),
        ])
    }

    #[test]
    fn all_sites_omits_sites_without_successes() {
        let pie = compute_success_distribution(&dataset(), &SiteFilter::All);
        let expected: BTreeMap<String, usize> =
            [("CCAFS".to_string(), 1), ("KSC".to_string(), 1)].into_iter().collect();
        assert_eq!(pie, PieResult::SuccessesBySite(expected));
        assert_eq!(pie.successes_at("VAFB"), 0);
        assert_eq!(pie.title(), "Total Successful Launches by Site");
    }

    #[test]
    fn all_sites_include_lists_every_site() {
        let pie =
            compute_success_distribution_with(&dataset(), &SiteFilter::All, ZeroGroups::Include);
        assert_eq!(
            pie.slices(),
            vec![
                ("CCAFS".to_string(), 1),
                ("KSC".to_string(), 1),
                ("VAFB".to_string(), 0),
            ]
        );
        assert_eq!(pie.total(), 2);
    }

    #[test]
    fn single_site_counts_both_outcomes() {
        let pie = compute_success_distribution(&dataset(), &SiteFilter::from("CCAFS"));
        assert_eq!(pie.outcome_count(Outcome::Success), 1);
        assert_eq!(pie.outcome_count(Outcome::Failure), 1);
        assert_eq!(pie.title(), "Launch Success vs Failure Rate for site CCAFS");
    }

    #[test]
    fn single_site_omit_drops_missing_outcome() {
        let ds = dataset();
        let pie = compute_success_distribution(&ds, &SiteFilter::from("KSC"));
        assert_eq!(pie.len(), 1);
        assert_eq!(pie.outcome_count(Outcome::Failure), 0);

        let pie =
            compute_success_distribution_with(&ds, &SiteFilter::from("KSC"), ZeroGroups::Include);
        assert_eq!(pie.len(), 2);
        assert_eq!(pie.slices()[1], ("Failure".to_string(), 0));
    }

    #[test]
    fn unknown_site_yields_empty_mapping() {
        let ds = dataset();
        for policy in [ZeroGroups::Omit, ZeroGroups::Include] {
            let pie =
                compute_success_distribution_with(&ds, &SiteFilter::from("Boca Chica"), policy);
            assert!(pie.is_empty());
            assert_eq!(pie.total(), 0);
        }
    }

    #[test]
    fn scatter_filters_by_range_then_site() {
        let ds = dataset();
        let all = compute_filtered_records(&ds, &SiteFilter::All, PayloadRange::new(0.0, 600.0));
        let payloads: Vec<f64> = all.records().iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![500.0, 600.0]);

        let ccafs = compute_filtered_records(
            &ds,
            &SiteFilter::from("CCAFS"),
            PayloadRange::new(0.0, 10_000.0),
        );
        let payloads: Vec<f64> = ccafs.records().iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![500.0, 800.0]);
    }

    #[test]
    fn scatter_groups_points_by_booster() {
        let ds = dataset();
        let scatter =
            compute_filtered_records(&ds, &SiteFilter::All, PayloadRange::new(0.0, 10_000.0));
        let groups = scatter.by_booster();
        assert_eq!(groups["v1.0"], vec![[500.0, 1.0], [800.0, 0.0]]);
        assert_eq!(groups["FT"], vec![[700.0, 1.0]]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn scatter_degenerate_ranges_are_empty() {
        let ds = dataset();
        let inverted = PayloadRange::new(800.0, 500.0);
        assert!(compute_filtered_records(&ds, &SiteFilter::All, inverted).is_empty());
        let beyond = PayloadRange::new(20_000.0, 30_000.0);
        assert!(compute_filtered_records(&ds, &SiteFilter::All, beyond).is_empty());
    }

    #[test]
    fn scatter_titles_name_the_site() {
        let ds = dataset();
        let scatter =
            compute_filtered_records(&ds, &SiteFilter::from("KSC"), PayloadRange::new(0.0, 1.0));
        assert_eq!(
            scatter.title(),
            "Payload vs. Launch Outcome for site KSC (Colored by Booster Version)"
        );
    }
}

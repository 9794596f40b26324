use crate::color::ColorMap;
use crate::config::DashConfig;
use crate::data::filter::{filtered_indices, FilterParams, PayloadRange, SiteFilter};
use crate::data::loader::Loaded;
use crate::data::model::Dataset;
use crate::data::query::{compute_success_distribution_with, PieResult, ScatterResult, ZeroGroups};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dashboard state, independent of rendering.
///
/// Query results are recomputed synchronously whenever a filter changes, so
/// the cached results always belong to the latest filter.
pub struct AppState {
    /// Loaded data (None until the first load completes).
    pub loaded: Option<Loaded>,

    /// Current site selection and payload range.
    pub params: FilterParams,

    /// Whether zero-count groups are shown in the pie.
    pub zero_groups: ZeroGroups,

    /// Cached success distribution for `params.site`.
    pub pie: Option<PieResult>,

    /// Indices of records passing `params` (cached).
    pub visible_indices: Vec<usize>,

    /// Colours per booster category.
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    slider_max: f64,
    slider_step: f64,
}

impl AppState {
    pub fn new(config: &DashConfig) -> Self {
        Self {
            loaded: None,
            params: FilterParams {
                site: SiteFilter::All,
                payload_range: PayloadRange::new(0.0, config.slider_max),
            },
            zero_groups: config.zero_groups(),
            pie: None,
            visible_indices: Vec::new(),
            booster_colors: None,
            status_message: None,
            slider_max: config.slider_max,
            slider_step: config.slider_step,
        }
    }

    /// Ingest a newly loaded dataset: reset filters to the observed payload
    /// bounds, rebuild colours, recompute both queries.
    pub fn set_loaded(&mut self, loaded: Loaded) {
        self.params = FilterParams::defaults_for(&loaded.dataset);
        self.booster_colors = Some(ColorMap::new(&loaded.dataset.booster_categories()));
        self.status_message = loaded.diagnostic();
        self.loaded = Some(loaded);
        self.recompute();
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    pub fn set_site(&mut self, site: SiteFilter) {
        if self.params.site != site {
            self.params.site = site;
            self.recompute();
        }
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.params.payload_range != range {
            self.params.payload_range = range;
            self.recompute();
        }
    }

    pub fn set_zero_groups(&mut self, zero_groups: ZeroGroups) {
        if self.zero_groups != zero_groups {
            self.zero_groups = zero_groups;
            self.recompute();
        }
    }

    /// Re-run both queries for the current filter.
    pub fn recompute(&mut self) {
        let Some(ds) = self.loaded.as_ref().map(|l| &l.dataset) else {
            self.pie = None;
            self.visible_indices.clear();
            return;
        };
        self.pie = Some(compute_success_distribution_with(
            ds,
            &self.params.site,
            self.zero_groups,
        ));
        self.visible_indices = filtered_indices(ds, &self.params);
        log::debug!(
            "Filter site={} payload={:?}: {} records visible",
            self.params.site,
            self.params.payload_range,
            self.visible_indices.len()
        );
    }

    /// Records for the scatter plot, borrowed from the loaded dataset.
    pub fn scatter(&self) -> Option<ScatterResult<'_>> {
        self.dataset()
            .map(|ds| ScatterResult::from_indices(ds, &self.params, &self.visible_indices))
    }

    /// Slider upper bound: the configured maximum, widened when the data
    /// holds heavier payloads.
    pub fn slider_upper(&self) -> f64 {
        let observed = self.dataset().map_or(0.0, |ds| ds.max_payload());
        self.slider_max.max(observed)
    }

    pub fn slider_step(&self) -> f64 {
        self.slider_step
    }
}

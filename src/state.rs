use std::collections::BTreeSet;
use std::sync::Arc;

use penguin_dash::config::{ChartKind, DashboardConfig};
use penguin_dash::data::filter::{FilterSelection, FilteredView};
use penguin_dash::data::grid::GridFilters;
use penguin_dash::data::histogram::Variable;
use penguin_dash::data::memo::FilterMemo;
use penguin_dash::data::model::{Dataset, Species};
use penguin_dash::data::stats::{format_range, Summary};

use crate::color::SpeciesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Where the data came from, shown in the top bar.
    pub source: String,

    /// Current sidebar selection. Always has both fields set.
    selection: FilterSelection,

    /// Memoized filtered view over the injected dataset.
    memo: FilterMemo,

    pub chart: ChartKind,
    pub histogram_variable: Variable,

    /// Per-column text filters of the data table.
    pub grid_filters: GridFilters,

    pub colors: SpeciesColors,
}

impl AppState {
    /// Take ownership of the once-loaded dataset and start with the
    /// configured defaults (all species, slider at its default).
    pub fn new(dataset: Dataset, config: DashboardConfig, source: String) -> Self {
        let selection = FilterSelection::new(
            config.species.iter().copied(),
            config.mass_slider.default,
        );
        Self {
            source,
            selection,
            memo: FilterMemo::new(dataset),
            chart: config.chart,
            histogram_variable: config.histogram_variable,
            grid_filters: GridFilters::default(),
            colors: SpeciesColors::new(&config.species),
            config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.memo.dataset()
    }

    /// The filtered view for the current selection, recomputed only when the
    /// selection changed since the last call.
    pub fn view(&mut self) -> Arc<FilteredView> {
        self.memo.view(&self.selection)
    }

    pub fn summary(&mut self) -> Summary {
        Summary::of(&self.view())
    }

    /// Body mass span of the whole loaded table, for the top bar.
    pub fn observed_mass_text(&self) -> String {
        format_range(self.dataset().mass_range(), "g")
    }

    #[cfg(test)]
    pub fn recomputations(&self) -> usize {
        self.memo.recomputations()
    }

    pub fn mass_bound(&self) -> f64 {
        self.selection
            .mass_bound
            .unwrap_or(self.config.mass_slider.default)
    }

    /// Move the mass slider, clamped to its configured range.
    pub fn set_mass_bound(&mut self, value: f64) {
        let clamped = self.config.mass_slider.clamp(value);
        if clamped != value {
            log::warn!("mass bound {value} clamped to {clamped}");
        }
        self.selection.mass_bound = Some(clamped);
    }

    pub fn is_selected(&self, species: Species) -> bool {
        self.selection
            .species
            .as_ref()
            .is_some_and(|set| set.contains(&species))
    }

    /// Toggle a single species checkbox.
    pub fn toggle_species(&mut self, species: Species) {
        let selected = self.selection.species.get_or_insert_with(BTreeSet::new);
        if !selected.remove(&species) {
            selected.insert(species);
        }
    }

    /// Select every configured species.
    pub fn select_all(&mut self) {
        self.selection.species = Some(self.config.species.iter().copied().collect());
    }

    /// Deselect every species.
    pub fn select_none(&mut self) {
        self.selection.species = Some(BTreeSet::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use penguin_dash::data::model::Record;

    fn state() -> AppState {
        let ds = Dataset::new(vec![
            Record::new(Species::Adelie, "Torgersen", 3000.0).with_bill(39.0, 18.0),
            Record::new(Species::Gentoo, "Biscoe", 5000.0).with_bill(47.0, 15.0),
            Record::new(Species::Adelie, "Dream", 4000.0).with_bill(41.0, 19.0),
        ]);
        AppState::new(ds, DashboardConfig::default(), "test".into())
    }

    #[test]
    fn starts_with_everything_selected() {
        let mut st = state();
        assert!(Species::ALL.iter().all(|&s| st.is_selected(s)));
        assert_eq!(st.mass_bound(), 6000.0);
        assert_eq!(st.view().len(), 3);
    }

    #[test]
    fn sidebar_changes_flow_into_the_view() {
        let mut st = state();
        st.toggle_species(Species::Gentoo);
        st.set_mass_bound(3500.0);
        let view = st.view();
        assert_eq!(view.indices(), &[0]);

        let summary = st.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.bill_length_text(), "39.0 mm");
    }

    #[test]
    fn repeated_reads_do_not_recompute() {
        let mut st = state();
        st.view();
        st.summary();
        st.view();
        assert_eq!(st.recomputations(), 1);

        st.set_mass_bound(4500.0);
        st.view();
        assert_eq!(st.recomputations(), 2);
    }

    #[test]
    fn select_none_gives_an_empty_but_valid_dashboard() {
        let mut st = state();
        st.select_none();
        let summary = st.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.bill_depth_text(), penguin_dash::data::stats::PLACEHOLDER);

        st.select_all();
        assert_eq!(st.view().len(), 3);
    }

    #[test]
    fn observed_mass_ignores_the_selection() {
        let mut st = state();
        st.select_none();
        assert_eq!(st.observed_mass_text(), "3000–5000 g");
    }

    #[test]
    fn mass_bound_is_clamped() {
        let mut st = state();
        st.set_mass_bound(100.0);
        assert_eq!(st.mass_bound(), 2000.0);
        assert!(st.view().is_empty());
    }
}

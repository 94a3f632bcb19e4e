use std::collections::BTreeSet;

use super::model::{Dataset, Record, Species};
use crate::error::{DashError, Result};

// ---------------------------------------------------------------------------
// Filter predicate: which species and which masses are selected
// ---------------------------------------------------------------------------

/// The user's current filter intent.
///
/// A `None` field means "no filter on that dimension". A present but empty
/// species set selects nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub species: Option<BTreeSet<Species>>,
    /// Exclusive upper bound on `body_mass_g`.
    pub mass_bound: Option<f64>,
}

impl FilterSelection {
    pub fn new(species: impl IntoIterator<Item = Species>, mass_bound: f64) -> Self {
        FilterSelection {
            species: Some(species.into_iter().collect()),
            mass_bound: Some(mass_bound),
        }
    }

    /// Every species, no mass bound.
    pub fn all() -> Self {
        FilterSelection {
            species: Some(Species::all_set()),
            mass_bound: None,
        }
    }

    /// No species selected: always yields an empty view.
    pub fn none() -> Self {
        FilterSelection {
            species: Some(BTreeSet::new()),
            mass_bound: None,
        }
    }

    /// A record passes when:
    /// * its species is in the selected set (or no species filter is set), and
    /// * its body mass is strictly below the bound (or no bound is set).
    ///
    /// A record without a body mass never passes a present bound.
    pub fn matches(&self, record: &Record) -> bool {
        let species_ok = self
            .species
            .as_ref()
            .map_or(true, |set| set.contains(&record.species));
        if !species_ok {
            return false;
        }
        match self.mass_bound {
            None => true,
            Some(bound) => record.body_mass_g.is_some_and(|mass| mass < bound),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the derived subsequence
// ---------------------------------------------------------------------------

/// The records of a [`Dataset`] matching a selection, in original order.
///
/// Holds indices into the shared dataset rather than copies of the rows.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Dataset,
    indices: Vec<usize>,
}

impl FilteredView {
    /// Positions of the surviving records in the source dataset, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// An empty view is a valid dashboard state, not an error.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.indices
            .get(position)
            .and_then(|&i| self.dataset.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.indices
            .iter()
            .filter_map(move |&i| self.dataset.get(i))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }
}

impl PartialEq for FilteredView {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// ---------------------------------------------------------------------------
// FilterEngine
// ---------------------------------------------------------------------------

/// Apply `selection` to `dataset`. Pure: same inputs, same view.
pub fn compute(dataset: &Dataset, selection: &FilterSelection) -> FilteredView {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect();

    FilteredView {
        dataset: dataset.clone(),
        indices,
    }
}

/// Like [`compute`], but for callers whose dataset may not have been provided.
pub fn compute_checked(
    dataset: Option<&Dataset>,
    selection: &FilterSelection,
) -> Result<FilteredView> {
    let dataset =
        dataset.ok_or_else(|| DashError::InvalidInput("no dataset has been loaded".into()))?;
    Ok(compute(dataset, selection))
}

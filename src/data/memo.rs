use std::collections::BTreeSet;
use std::sync::Arc;

use super::filter::{compute, FilterSelection, FilteredView};
use super::model::{Dataset, Species};

/// Hashable identity of a [`FilterSelection`].
///
/// The mass bound is keyed by bit pattern so a `NaN` bound equals itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    species: Option<BTreeSet<Species>>,
    mass_bits: Option<u64>,
}

impl From<&FilterSelection> for SelectionKey {
    fn from(sel: &FilterSelection) -> Self {
        SelectionKey {
            species: sel.species.clone(),
            mass_bits: sel.mass_bound.map(f64::to_bits),
        }
    }
}

/// Recompute-on-change cache in front of [`compute`].
///
/// The dataset is fixed for the lifetime of the memo; only a change of
/// selection triggers a new filtering pass.
#[derive(Debug)]
pub struct FilterMemo {
    dataset: Dataset,
    cached: Option<(SelectionKey, Arc<FilteredView>)>,
    recomputations: usize,
}

impl FilterMemo {
    pub fn new(dataset: Dataset) -> Self {
        FilterMemo {
            dataset,
            cached: None,
            recomputations: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current view for `selection`, shared with every other caller that
    /// asked for the same selection since the last change.
    pub fn view(&mut self, selection: &FilterSelection) -> Arc<FilteredView> {
        let key = SelectionKey::from(selection);
        if let Some((cached_key, view)) = &self.cached {
            if *cached_key == key {
                return Arc::clone(view);
            }
        }

        let view = Arc::new(compute(&self.dataset, selection));
        self.recomputations += 1;
        log::debug!(
            "recomputed view: {} of {} records (pass #{})",
            view.len(),
            self.dataset.len(),
            self.recomputations
        );
        self.cached = Some((key, Arc::clone(&view)));
        view
    }

    /// Number of filtering passes performed so far.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn memo() -> FilterMemo {
        FilterMemo::new(Dataset::new(vec![
            Record::new(Species::Adelie, "Torgersen", 3000.0),
            Record::new(Species::Gentoo, "Biscoe", 5000.0),
            Record::new(Species::Chinstrap, "Dream", 3700.0),
        ]))
    }

    #[test]
    fn unchanged_selection_reuses_the_view() {
        let mut memo = memo();
        let sel = FilterSelection::new(Species::ALL, 6000.0);

        let first = memo.view(&sel);
        let second = memo.view(&sel.clone());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn changed_selection_recomputes() {
        let mut memo = memo();
        let mut sel = FilterSelection::new(Species::ALL, 6000.0);
        assert_eq!(memo.view(&sel).len(), 3);

        sel.mass_bound = Some(3500.0);
        assert_eq!(memo.view(&sel).len(), 1);

        sel.species.as_mut().unwrap().remove(&Species::Adelie);
        assert!(memo.view(&sel).is_empty());
        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn returning_to_an_old_selection_recomputes_once() {
        let mut memo = memo();
        let a = FilterSelection::new(Species::ALL, 6000.0);
        let b = FilterSelection::new([Species::Gentoo], 6000.0);

        let first = memo.view(&a);
        memo.view(&b);
        let again = memo.view(&a);
        assert_eq!(*first, *again);
        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn nan_bound_is_cached_like_any_other() {
        let mut memo = memo();
        let sel = FilterSelection::new(Species::ALL, f64::NAN);
        memo.view(&sel);
        memo.view(&sel);
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn invalidate_forces_a_new_pass() {
        let mut memo = memo();
        let sel = FilterSelection::all();
        memo.view(&sel);
        memo.invalidate();
        memo.view(&sel);
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn views_share_the_injected_dataset() {
        let mut memo = memo();
        let view = memo.view(&FilterSelection::all());
        assert!(view.dataset().same_as(memo.dataset()));
    }
}

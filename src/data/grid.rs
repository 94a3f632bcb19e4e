use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::Record;

/// Columns shown in the data table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GridColumn {
    Species,
    Island,
    BillLength,
    BillDepth,
    BodyMass,
}

impl GridColumn {
    pub const ALL: [GridColumn; 5] = [
        GridColumn::Species,
        GridColumn::Island,
        GridColumn::BillLength,
        GridColumn::BillDepth,
        GridColumn::BodyMass,
    ];

    pub fn header(self) -> &'static str {
        match self {
            GridColumn::Species => "species",
            GridColumn::Island => "island",
            GridColumn::BillLength => "bill_length_mm",
            GridColumn::BillDepth => "bill_depth_mm",
            GridColumn::BodyMass => "body_mass_g",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, GridColumn::Species | GridColumn::Island)
    }

    /// Cell text; missing measurements render as `NA` like the source data.
    pub fn cell(self, record: &Record) -> String {
        fn num(v: Option<f64>, decimals: usize) -> String {
            v.map_or_else(|| "NA".to_string(), |v| format!("{v:.decimals$}"))
        }
        match self {
            GridColumn::Species => record.species.to_string(),
            GridColumn::Island => record.island.clone(),
            GridColumn::BillLength => num(record.bill_length_mm, 1),
            GridColumn::BillDepth => num(record.bill_depth_mm, 1),
            GridColumn::BodyMass => num(record.body_mass_g, 0),
        }
    }
}

/// Per-column text filters typed into the table header.
///
/// A row is visible when, for every non-blank filter, the cell text contains
/// the filter text (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFilters {
    text: BTreeMap<GridColumn, String>,
}

impl GridFilters {
    pub fn get_mut(&mut self, column: GridColumn) -> &mut String {
        self.text.entry(column).or_default()
    }

    pub fn set(&mut self, column: GridColumn, text: impl Into<String>) {
        self.text.insert(column, text.into());
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_active(&self) -> bool {
        self.text.values().any(|t| !t.trim().is_empty())
    }

    pub fn accepts(&self, record: &Record) -> bool {
        self.text.iter().all(|(col, needle)| {
            let needle = needle.trim();
            needle.is_empty()
                || col
                    .cell(record)
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
        })
    }

    /// Positions within `view` of the rows that pass the grid filters.
    pub fn visible_rows(&self, view: &FilteredView) -> Vec<usize> {
        view.iter()
            .enumerate()
            .filter(|(_, r)| self.accepts(r))
            .map(|(i, _)| i)
            .collect()
    }
}

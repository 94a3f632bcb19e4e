use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Species – the categorical filter column
// ---------------------------------------------------------------------------

/// Penguin species. The set is fixed; `Ord` follows declaration order so
/// that `BTreeSet<Species>` iterates the way the sidebar lists them.
///
/// Every loader parses labels through [`FromStr`], so matching is
/// case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }

    /// Every species, as a selection set.
    pub fn all_set() -> BTreeSet<Species> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown species '{s}'"))
    }
}

impl TryFrom<String> for Species {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the penguin table
// ---------------------------------------------------------------------------

/// One measured penguin. Measurements are optional because the source data
/// marks unmeasured values as `NA`; a value that fails to parse is treated
/// the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub species: Species,
    pub island: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bill_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub bill_depth_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub flipper_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub body_mass_g: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sex: Option<Sex>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
}

impl Record {
    /// Minimal record with only the filter-relevant fields populated.
    pub fn new(species: Species, island: impl Into<String>, body_mass_g: f64) -> Self {
        Record {
            species,
            island: island.into(),
            bill_length_mm: None,
            bill_depth_mm: None,
            flipper_length_mm: None,
            body_mass_g: Some(body_mass_g),
            sex: None,
            year: None,
        }
    }

    pub fn with_bill(mut self, length_mm: f64, depth_mm: f64) -> Self {
        self.bill_length_mm = Some(length_mm);
        self.bill_depth_mm = Some(depth_mm);
        self
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable, shared penguin table.
///
/// Cloning is cheap (one `Arc` bump); every consumer sees the same rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether two handles point at the same loaded table.
    pub fn same_as(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Observed `(min, max)` body mass, ignoring missing values.
    pub fn mass_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.body_mass_g)
            .fold(None, |acc, m| match acc {
                None => Some((m, m)),
                Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
            })
    }
}

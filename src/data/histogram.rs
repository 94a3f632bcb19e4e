use serde::{Deserialize, Serialize};

use super::filter::FilteredView;
use super::model::Record;

/// Numeric columns that can be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl Variable {
    pub const ALL: [Variable; 4] = [
        Variable::BillLength,
        Variable::BillDepth,
        Variable::FlipperLength,
        Variable::BodyMass,
    ];

    /// Column name as it appears in the source data.
    pub fn column(self) -> &'static str {
        match self {
            Variable::BillLength => "bill_length_mm",
            Variable::BillDepth => "bill_depth_mm",
            Variable::FlipperLength => "flipper_length_mm",
            Variable::BodyMass => "body_mass_g",
        }
    }

    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Variable::BillLength => record.bill_length_mm,
            Variable::BillDepth => record.bill_depth_mm,
            Variable::FlipperLength => record.flipper_length_mm,
            Variable::BodyMass => record.body_mass_g,
        }
    }
}

/// One histogram bar covering `[left, right)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Equal-width bins over the finite values. Empty input gives no bins; a
/// single distinct value gets one unit-wide bin centred on it.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![Bin {
            left: min - 0.5,
            right: min + 0.5,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            left: min + i as f64 * width,
            right: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Bin `variable` over the records of `view`, skipping missing values.
pub fn histogram_of(view: &FilteredView, variable: Variable, bins: usize) -> Vec<Bin> {
    let values: Vec<f64> = view.iter().filter_map(|r| variable.value(r)).collect();
    histogram(&values, bins)
}

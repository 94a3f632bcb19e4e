use super::filter::FilteredView;

/// Shown in place of a statistic that has no value (e.g. mean of nothing).
pub const PLACEHOLDER: &str = "—";

/// Headline numbers for the value cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_bill_length_mm: Option<f64>,
    pub mean_bill_depth_mm: Option<f64>,
}

impl Summary {
    pub fn of(view: &FilteredView) -> Self {
        Summary {
            count: view.len(),
            mean_bill_length_mm: mean(view.iter().filter_map(|r| r.bill_length_mm)),
            mean_bill_depth_mm: mean(view.iter().filter_map(|r| r.bill_depth_mm)),
        }
    }

    pub fn bill_length_text(&self) -> String {
        format_measure(self.mean_bill_length_mm, "mm")
    }

    pub fn bill_depth_text(&self) -> String {
        format_measure(self.mean_bill_depth_mm, "mm")
    }
}

/// Arithmetic mean; `None` for an empty input instead of `NaN`.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// One decimal plus unit, or [`PLACEHOLDER`].
pub fn format_measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1} {unit}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// `min–max unit` with no decimals, or [`PLACEHOLDER`] when nothing was
/// observed.
pub fn format_range(range: Option<(f64, f64)>, unit: &str) -> String {
    match range {
        Some((lo, hi)) => format!("{lo:.0}–{hi:.0} {unit}"),
        None => PLACEHOLDER.to_string(),
    }
}

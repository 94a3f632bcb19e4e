use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

/// The three value boxes: count and mean bill measurements.
pub fn value_cards(ui: &mut Ui, state: &mut AppState) {
    let summary = state.summary();
    let cards = [
        ("Number of penguins", summary.count.to_string()),
        ("Average bill length", summary.bill_length_text()),
        ("Average bill depth", summary.bill_depth_text()),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            egui::Frame::group(col.style()).show(col, |ui: &mut Ui| {
                ui.set_width(ui.available_width());
                ui.label(label);
                ui.label(RichText::new(value).size(28.0).strong());
            });
        }
    });
}

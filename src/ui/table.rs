use eframe::egui::{self, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use penguin_dash::data::grid::GridColumn;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Data table (right half of the central panel)
// ---------------------------------------------------------------------------

/// Fixed column subset of the filtered view, with a text filter under each
/// header.
pub fn data_table(ui: &mut Ui, state: &mut AppState) {
    let view = state.view();

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong("Penguin data");
            if state.grid_filters.is_active() && ui.small_button("Clear filters").clicked() {
                state.grid_filters.clear();
            }
        });

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(70.0), GridColumn::ALL.len())
            .header(44.0, |mut header| {
                for col in GridColumn::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.vertical(|ui: &mut Ui| {
                            ui.strong(col.header());
                            ui.add(
                                egui::TextEdit::singleline(state.grid_filters.get_mut(col))
                                    .hint_text("filter")
                                    .desired_width(70.0),
                            );
                        });
                    });
                }
            })
            .body(|body| {
                let rows = state.grid_filters.visible_rows(&view);
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let Some(record) = view.get(rows[row.index()]) else {
                        return;
                    };
                    for col in GridColumn::ALL {
                        row.col(|ui: &mut Ui| {
                            if col.is_numeric() {
                                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                                    ui.label(col.cell(record));
                                });
                            } else {
                                ui.label(col.cell(record));
                            }
                        });
                    }
                });
            });
    });
}

use eframe::egui;

use crate::state::AppState;
use crate::ui::{cards, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashApp {
    pub state: AppState,
}

impl PenguinDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: value cards, chart and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::value_cards(ui, &mut self.state);
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                plot::chart_card(&mut cols[0], &mut self.state);
                table::data_table(&mut cols[1], &mut self.state);
            });
        });
    }
}

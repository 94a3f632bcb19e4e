use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the sidebar: mass slider, species checkboxes and links.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Body mass bound ----
            let slider = state.config.mass_slider;
            let mut bound = state.mass_bound();
            ui.strong("Mass");
            let response = ui.add(
                egui::Slider::new(&mut bound, slider.min..=slider.max)
                    .step_by(1.0)
                    .suffix(" g"),
            );
            if response.changed() {
                state.set_mass_bound(bound);
            }
            ui.add_space(8.0);

            // ---- Species multi-select ----
            let species = state.config.species.clone();
            let n_selected = species.iter().filter(|&&s| state.is_selected(s)).count();
            ui.strong(format!("Species  ({n_selected}/{})", species.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            for sp in species {
                let mut checked = state.is_selected(sp);
                let text = RichText::new(sp.as_str()).color(state.colors.color_for(sp));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_species(sp);
                }
            }

            ui.separator();
            ui.heading("Links");
            for link in &state.config.links {
                ui.hyperlink_to(link.label.as_str(), &link.url);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the dataset origin and visible count.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let total = state.dataset().len();
    let visible = state.view().len();

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(state.config.title.as_str());
        ui.separator();
        ui.label(format!("{total} penguins loaded, {visible} visible"));
        ui.separator();
        ui.label(format!("observed mass {}", state.observed_mass_text()));
        ui.separator();
        ui.label(RichText::new(&state.source).weak());
    });
}

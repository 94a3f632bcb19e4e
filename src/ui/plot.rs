use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use penguin_dash::config::ChartKind;
use penguin_dash::data::filter::FilteredView;
use penguin_dash::data::histogram::{histogram_of, Variable};

use crate::color::SpeciesColors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart card (left half of the central panel)
// ---------------------------------------------------------------------------

/// Chart selector plus the chart itself, drawn over the filtered view.
pub fn chart_card(ui: &mut Ui, state: &mut AppState) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            egui::ComboBox::from_id_salt("chart_kind")
                .selected_text(state.chart.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut state.chart, kind, kind.label());
                    }
                });

            if state.chart == ChartKind::Histogram {
                egui::ComboBox::from_id_salt("histogram_variable")
                    .selected_text(state.histogram_variable.column())
                    .show_ui(ui, |ui: &mut Ui| {
                        for var in Variable::ALL {
                            ui.selectable_value(&mut state.histogram_variable, var, var.column());
                        }
                    });
            }
        });

        let view = state.view();
        match state.chart {
            ChartKind::Histogram => histogram_plot(
                ui,
                &view,
                state.histogram_variable,
                state.config.histogram_bins,
            ),
            ChartKind::Scatter => bill_scatter(ui, &view, &state.colors),
        }
    });
}

fn histogram_plot(ui: &mut Ui, view: &FilteredView, variable: Variable, bins: usize) {
    let bars: Vec<Bar> = histogram_of(view, variable, bins)
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect();

    Plot::new("histogram_plot")
        .x_axis_label(variable.column())
        .y_axis_label("count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(variable.column())
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

fn bill_scatter(ui: &mut Ui, view: &FilteredView, colors: &SpeciesColors) {
    Plot::new("bill_scatter")
        .legend(Legend::default())
        .x_axis_label(Variable::BillLength.column())
        .y_axis_label(Variable::BillDepth.column())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One series per species so the legend doubles as a key.
            for species in colors.species() {
                let points: PlotPoints = view
                    .iter()
                    .filter(|r| r.species == species)
                    .filter_map(|r| Some([r.bill_length_mm?, r.bill_depth_mm?]))
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(species.as_str())
                        .color(colors.color_for(species))
                        .radius(3.0),
                );
            }
        });
}

use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use penguin_dash::data::model::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// One colour per species, shared by the sidebar, legend and charts.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, Color32>,
    default_color: Color32,
}

impl SpeciesColors {
    pub fn new(species: &[Species]) -> Self {
        let mapping = species
            .iter()
            .copied()
            .zip(generate_palette(species.len()))
            .collect();
        SpeciesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Species with an assigned colour, in sidebar order.
    pub fn species(&self) -> impl Iterator<Item = Species> + '_ {
        self.mapping.keys().copied()
    }

    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_species_falls_back_to_gray() {
        let colors = SpeciesColors::new(&[Species::Adelie, Species::Gentoo]);
        assert_ne!(colors.color_for(Species::Adelie), Color32::GRAY);
        assert_eq!(colors.color_for(Species::Chinstrap), Color32::GRAY);
    }
}

use std::sync::Arc;

use penguin_dash::config::DashboardConfig;
use penguin_dash::data::filter::{compute, compute_checked, FilterSelection};
use penguin_dash::data::grid::{GridColumn, GridFilters};
use penguin_dash::data::histogram::{histogram_of, Variable};
use penguin_dash::data::loader::parse_csv;
use penguin_dash::data::memo::FilterMemo;
use penguin_dash::data::model::{Dataset, Record, Species};
use penguin_dash::data::stats::{Summary, PLACEHOLDER};
use penguin_dash::DashError;

fn three_penguins() -> Dataset {
    Dataset::new(vec![
        Record::new(Species::Adelie, "Torgersen", 3000.0),
        Record::new(Species::Gentoo, "Biscoe", 5000.0),
        Record::new(Species::Adelie, "Dream", 4000.0),
    ])
}

#[test]
fn adelie_under_3500_keeps_only_the_light_adelie() {
    let ds = three_penguins();
    let view = compute(&ds, &FilterSelection::new([Species::Adelie], 3500.0));
    assert_eq!(view.to_records(), vec![Record::new(Species::Adelie, "Torgersen", 3000.0)]);
}

#[test]
fn adelie_and_gentoo_under_6000_keeps_all_three_in_order() {
    let ds = three_penguins();
    let view = compute(
        &ds,
        &FilterSelection::new([Species::Adelie, Species::Gentoo], 6000.0),
    );
    assert_eq!(view.to_records(), ds.records().to_vec());
}

#[test]
fn default_dashboard_over_synthetic_data() {
    let config = DashboardConfig::default();
    let ds = config.dataset_source().load().unwrap();
    let mut memo = FilterMemo::new(ds.clone());

    let selection = FilterSelection::new(config.species.iter().copied(), config.mass_slider.default);
    let view = memo.view(&selection);

    // Only records weighing 6000 g or more (or unweighed) are filtered out.
    let expected = ds
        .records()
        .iter()
        .filter(|r| r.body_mass_g.is_some_and(|m| m < 6000.0))
        .count();
    assert_eq!(view.len(), expected);
    assert!(Arc::ptr_eq(&view, &memo.view(&selection)));

    let summary = Summary::of(&view);
    assert_ne!(summary.bill_length_text(), PLACEHOLDER);
    assert!(summary.bill_length_text().ends_with(" mm"));
}

#[test]
fn empty_dashboard_state_renders_without_errors() {
    let ds = three_penguins();
    let view = compute(&ds, &FilterSelection::new(Species::ALL, 2000.0));

    let summary = Summary::of(&view);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.bill_length_text(), PLACEHOLDER);
    assert!(histogram_of(&view, Variable::BodyMass, 20).is_empty());
    assert!(GridFilters::default().visible_rows(&view).is_empty());
}

#[test]
fn missing_dataset_is_reported_not_panicked() {
    assert!(matches!(
        compute_checked(None, &FilterSelection::all()),
        Err(DashError::InvalidInput(_))
    ));
}

#[test]
fn csv_to_table_pipeline() {
    let csv = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Torgersen,39.1,18.7,181,3750,male,2007
Chinstrap,Dream,46.5,17.9,192,3500,female,2007
Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
Adelie,Dream,NA,NA,NA,NA,NA,2008
";
    let ds = parse_csv(csv.as_bytes()).unwrap();
    let view = compute(&ds, &FilterSelection::new([Species::Adelie, Species::Chinstrap], 4000.0));
    assert_eq!(view.indices(), &[0, 1]);

    let mut grid = GridFilters::default();
    grid.set(GridColumn::Island, "dream");
    let rows = grid.visible_rows(&view);
    assert_eq!(rows, vec![1]);
    assert_eq!(GridColumn::Species.cell(view.get(rows[0]).unwrap()), "Chinstrap");
}

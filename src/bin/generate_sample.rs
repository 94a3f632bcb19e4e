//! Write a synthetic penguin table as `penguins.parquet` and `penguins.csv`.
//!
//! Usage: `generate_sample [OUTPUT_DIR] [SEED]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use penguin_dash::data::loader::write_parquet;
use penguin_dash::data::model::Dataset;
use penguin_dash::data::sample::{generate, DEFAULT_COUNTS};

/// palmerpenguins layout, `NA` for missing values.
fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let na = |v: Option<f64>| v.map_or_else(|| "NA".to_string(), |v| v.to_string());
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "species",
        "island",
        "bill_length_mm",
        "bill_depth_mm",
        "flipper_length_mm",
        "body_mass_g",
        "sex",
        "year",
    ])?;
    for r in dataset.records() {
        writer.write_record([
            r.species.to_string(),
            r.island.clone(),
            na(r.bill_length_mm),
            na(r.bill_depth_mm),
            na(r.flipper_length_mm),
            na(r.body_mass_g),
            r.sex.map_or_else(|| "NA".to_string(), |s| s.to_string()),
            r.year.map_or_else(|| "NA".to_string(), |y| y.to_string()),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed '{s}'"))?,
        None => 42,
    };

    let dataset = generate(seed, &DEFAULT_COUNTS);

    let parquet_path = out_dir.join("penguins.parquet");
    write_parquet(&dataset, &parquet_path)?;
    let csv_path = out_dir.join("penguins.csv");
    write_csv(&dataset, &csv_path)?;

    println!(
        "Wrote {} penguins (seed {seed}) to {} and {}",
        dataset.len(),
        parquet_path.display(),
        csv_path.display()
    );
    Ok(())
}

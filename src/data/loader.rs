use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record, Sex, Species};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the penguin table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – palmerpenguins layout, `NA` for missing values
/// * `.json`    – `[{ "species": "Adelie", "island": "Dream", ... }, ...]`
/// * `.parquet` – one column per field, looked up by name
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} penguins from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, as written by
/// `palmerpenguins`:
///
/// ```text
/// species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
/// Adelie,Torgersen,39.1,18.7,181,3750,male,2007
/// Adelie,Torgersen,NA,NA,NA,NA,NA,2007
/// ```
///
/// Unknown columns (e.g. a leading `rowid`) are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

pub fn parse_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in ["species", "island", "body_mass_g"] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "body_mass_g": 3750, "sex": "male" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            if !row.is_object() {
                bail!("Row {i} is not a JSON object");
            }
            serde_json::from_value::<Record>(row.clone()).with_context(|| format!("Row {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by pandas, polars or `generate_sample`.
///
/// Required columns: `species`, `island` (strings) and `body_mass_g`.
/// Numeric columns may be any int or float width; nulls become missing
/// measurements. Other optional columns are read when present.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(records_from_batch(&batch)?);
    }
    Ok(Dataset::new(records))
}

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Convert one Arrow batch into records, matching columns by name.
pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<Record>> {
    let species_col = required_column(batch, "species")?;
    let island_col = required_column(batch, "island")?;
    let mass_col = required_column(batch, "body_mass_g")?;
    let bill_length_col = batch.column_by_name("bill_length_mm");
    let bill_depth_col = batch.column_by_name("bill_depth_mm");
    let flipper_col = batch.column_by_name("flipper_length_mm");
    let sex_col = batch.column_by_name("sex");
    let year_col = batch.column_by_name("year");

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let species_text = extract_string(species_col, row)?
            .with_context(|| format!("Row {row}: null species"))?;
        let species: Species = species_text
            .parse()
            .map_err(|e: String| anyhow::anyhow!("Row {row}: {e}"))?;
        let island = extract_string(island_col, row)?.unwrap_or_default();

        let optional_f64 = |col: Option<&ArrayRef>, name: &str| -> Result<Option<f64>> {
            match col {
                Some(col) => extract_f64(col, row)
                    .with_context(|| format!("Row {row}: failed to read '{name}'")),
                None => Ok(None),
            }
        };

        let sex = match sex_col {
            Some(col) => extract_string(col, row)?.and_then(|s| parse_sex(&s)),
            None => None,
        };
        let year = optional_f64(year_col, "year")?.map(|y| y as i32);

        out.push(Record {
            species,
            island,
            bill_length_mm: optional_f64(bill_length_col, "bill_length_mm")?,
            bill_depth_mm: optional_f64(bill_depth_col, "bill_depth_mm")?,
            flipper_length_mm: optional_f64(flipper_col, "flipper_length_mm")?,
            body_mass_g: extract_f64(mass_col, row)
                .with_context(|| format!("Row {row}: failed to read 'body_mass_g'"))?,
            sex,
            year,
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

/// Convert the table into one Arrow batch with the column layout that
/// [`records_from_batch`] reads back. `year` is stored as Int32.
pub fn records_to_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let rows = dataset.records();
    let strings = |f: &dyn Fn(&Record) -> Option<String>| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: &dyn Fn(&Record) -> Option<f64>| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int32, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        strings(&|r| Some(r.species.to_string())),
        strings(&|r| Some(r.island.clone())),
        floats(&|r| r.bill_length_mm),
        floats(&|r| r.bill_depth_mm),
        floats(&|r| r.flipper_length_mm),
        floats(&|r| r.body_mass_g),
        strings(&|r| r.sex.map(|s| s.to_string())),
        Arc::new(Int32Array::from(rows.iter().map(|r| r.year).collect::<Vec<_>>())),
    ];

    RecordBatch::try_new(schema, columns).context("building record batch")
}

pub fn write_parquet(dataset: &Dataset, path: &Path) -> Result<()> {
    let batch = records_to_batch(dataset)?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

// -- Parquet / Arrow helpers --

fn parse_sex(s: &str) -> Option<Sex> {
    match s.trim().to_ascii_lowercase().as_str() {
        "male" => Some(Sex::Male),
        "female" => Some(Sex::Female),
        _ => None,
    }
}

/// Read a nullable string cell from a Utf8 or LargeUtf8 column.
fn extract_string(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(Some(value.to_string()))
}

/// Read a nullable numeric cell as `f64`.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value.is_finite().then_some(value))
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("column is not a {}", std::any::type_name::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::generate;

    const CSV: &str = "\
rowid,species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
1,Adelie,Torgersen,39.1,18.7,181,3750,male,2007
2,Adelie,Torgersen,NA,NA,NA,NA,NA,2007
3,Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
";

    #[test]
    fn csv_reads_palmerpenguins_layout() {
        let ds = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.records()[0];
        assert_eq!(first.species, Species::Adelie);
        assert_eq!(first.island, "Torgersen");
        assert_eq!(first.bill_length_mm, Some(39.1));
        assert_eq!(first.flipper_length_mm, Some(181.0));
        assert_eq!(first.body_mass_g, Some(3750.0));
        assert_eq!(first.sex, Some(Sex::Male));
        assert_eq!(first.year, Some(2007));
    }

    #[test]
    fn csv_na_becomes_missing() {
        let ds = parse_csv(CSV.as_bytes()).unwrap();
        let second = &ds.records()[1];
        assert_eq!(second.bill_length_mm, None);
        assert_eq!(second.body_mass_g, None);
        assert_eq!(second.sex, None);
    }

    #[test]
    fn csv_without_optional_columns() {
        let ds = parse_csv("species,island,body_mass_g\nChinstrap,Dream,3500\n".as_bytes()).unwrap();
        assert_eq!(ds.records()[0], Record::new(Species::Chinstrap, "Dream", 3500.0));
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let err = parse_csv("species,island\nAdelie,Dream\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("body_mass_g"));
    }

    #[test]
    fn csv_unknown_species_fails_with_row() {
        let err = parse_csv("species,island,body_mass_g\nEmperor,Ross,30000\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn csv_species_labels_ignore_case_and_padding() {
        let ds = parse_csv(
            "species,island,body_mass_g\nadelie,Dream,3500\n\" Gentoo \",Biscoe,5000\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(ds.records()[0].species, Species::Adelie);
        assert_eq!(ds.records()[1].species, Species::Gentoo);
    }

    #[test]
    fn json_species_labels_ignore_case_and_padding() {
        let ds = parse_json(
            r#"[
                {"species": "adelie", "island": "Dream", "body_mass_g": 3500},
                {"species": " Gentoo ", "island": "Biscoe", "body_mass_g": 5000},
                {"species": "CHINSTRAP", "island": "Dream", "body_mass_g": 3700}
            ]"#,
        )
        .unwrap();
        let species: Vec<_> = ds.records().iter().map(|r| r.species).collect();
        assert_eq!(species, vec![Species::Adelie, Species::Gentoo, Species::Chinstrap]);
        assert!(parse_json(r#"[{"species": "Emperor", "island": "Ross", "body_mass_g": 30000}]"#).is_err());
    }

    #[test]
    fn json_reads_records() {
        let ds = parse_json(
            r#"[
                {"species": "Gentoo", "island": "Biscoe", "bill_length_mm": 46.1,
                 "bill_depth_mm": 13.2, "body_mass_g": 4500, "sex": "female"},
                {"species": "Adelie", "island": "Dream", "body_mass_g": null, "sex": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].body_mass_g, Some(4500.0));
        assert_eq!(ds.records()[0].sex, Some(Sex::Female));
        assert_eq!(ds.records()[1].body_mass_g, None);
        assert_eq!(ds.records()[1].bill_length_mm, None);
    }

    #[test]
    fn json_rejects_non_array_and_non_objects() {
        assert!(parse_json(r#"{"species": "Adelie"}"#).is_err());
        assert!(parse_json("[1, 2]").is_err());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("penguins.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }

    #[test]
    fn arrow_batch_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("species", DataType::Utf8, false),
            Field::new("island", DataType::Utf8, false),
            Field::new("body_mass_g", DataType::Int64, true),
            Field::new("bill_length_mm", DataType::Float32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["Adelie", "Gentoo"])),
                Arc::new(StringArray::from(vec!["Dream", "Biscoe"])),
                Arc::new(Int64Array::from(vec![Some(3400), None])),
                Arc::new(Float32Array::from(vec![Some(38.5), Some(47.0)])),
            ],
        )
        .unwrap();

        let rows = records_from_batch(&batch).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].body_mass_g, Some(3400.0));
        assert_eq!(rows[1].body_mass_g, None);
        assert_eq!(rows[1].species, Species::Gentoo);
        assert_eq!(rows[0].bill_length_mm, Some(38.5));
        assert_eq!(rows[0].flipper_length_mm, None);
    }

    #[test]
    fn arrow_batch_missing_species_column_fails() {
        let schema = Arc::new(Schema::new(vec![Field::new("island", DataType::Utf8, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(vec!["Dream"]))]).unwrap();
        assert!(records_from_batch(&batch).is_err());
    }

    #[test]
    fn parquet_file_round_trips_through_load_file() {
        let mut missing = Record::new(Species::Chinstrap, "Dream", 0.0);
        missing.body_mass_g = None;
        let mut rows = generate(7, &[(Species::Adelie, 5), (Species::Gentoo, 4)])
            .records()
            .to_vec();
        rows.push(missing);
        let dataset = Dataset::new(rows);

        let path = std::env::temp_dir()
            .join(format!("penguin-dash-roundtrip-{}.parquet", std::process::id()));
        write_parquet(&dataset, &path).unwrap();
        let loaded = load_file(&path);
        std::fs::remove_file(&path).ok();
        let loaded = loaded.unwrap();

        assert_eq!(loaded.records(), dataset.records());
        assert!(loaded.records().iter().any(|r| r.year.is_some()));
    }

    #[test]
    fn written_batch_stores_year_as_int32() {
        let dataset = Dataset::new(vec![Record::new(Species::Adelie, "Dream", 3500.0)]);
        let batch = records_to_batch(&dataset).unwrap();
        let year = batch.column_by_name("year").unwrap();
        assert_eq!(year.data_type(), &DataType::Int32);
        assert!(year.is_null(0));
    }
}

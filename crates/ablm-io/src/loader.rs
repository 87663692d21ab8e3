//! Result-file loading.
//!
//! One Parquet file per model/run, all sharing the ResultRow schema:
//! `sequence`, `separator`, `prediction`, `cdr_mask_heavy`,
//! `cdr_mask_light`, `model` as strings; `loss` as a list of f64;
//! the two `v_mutation_count_aa_*` columns as integers.
use ablm_core::{EvalError, ResultRow};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Read every `*.parquet` file in `dir` and vertically concatenate.
/// A directory with no matching files is an error, not an empty table.
pub fn load_results_dir(dir: &Path) -> Result<DataFrame> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading results directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "parquet").unwrap_or(false))
        .collect();
    paths.sort();

    let mut combined: Option<DataFrame> = None;
    for path in &paths {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening result file {}", path.display()))?;
        let df = ParquetReader::new(file)
            .finish()
            .with_context(|| format!("reading result file {}", path.display()))?;
        log::debug!("loaded {} rows from {}", df.height(), path.display());
        match combined {
            Some(ref mut acc) => {
                acc.vstack_mut(&df)
                    .with_context(|| format!("concatenating {}", path.display()))?;
            }
            None => combined = Some(df),
        }
    }
    combined.ok_or_else(|| EvalError::NoInputFiles(dir.display().to_string()).into())
}

/// Materialize a loaded DataFrame into owned rows. Missing columns, wrong
/// dtypes and null cells surface as errors naming the column.
pub fn materialize_rows(df: &DataFrame) -> Result<Vec<ResultRow>> {
    let sequence = str_column(df, "sequence")?;
    let separator = str_column(df, "separator")?;
    let prediction = str_column(df, "prediction")?;
    let cdr_mask_heavy = str_column(df, "cdr_mask_heavy")?;
    let cdr_mask_light = str_column(df, "cdr_mask_light")?;
    let model = str_column(df, "model")?;
    let mutation_heavy = int_column(df, "v_mutation_count_aa_heavy")?;
    let mutation_light = int_column(df, "v_mutation_count_aa_light")?;
    let loss = series(df, "loss")?
        .list()
        .with_context(|| "column loss is not a list column")?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let loss_values = loss
            .get_as_series(i)
            .with_context(|| format!("null loss cell in row {i}"))?;
        let loss_values: Vec<f64> = loss_values
            .f64()
            .with_context(|| "column loss does not hold f64 values")?
            .into_no_null_iter()
            .collect();
        rows.push(ResultRow {
            sequence: get_str(sequence, i, "sequence")?.to_string(),
            separator: get_str(separator, i, "separator")?.to_string(),
            loss: loss_values,
            prediction: get_str(prediction, i, "prediction")?.to_string(),
            cdr_mask_heavy: get_str(cdr_mask_heavy, i, "cdr_mask_heavy")?.to_string(),
            cdr_mask_light: get_str(cdr_mask_light, i, "cdr_mask_light")?.to_string(),
            v_mutation_count_aa_heavy: get_count(mutation_heavy, i, "v_mutation_count_aa_heavy")?,
            v_mutation_count_aa_light: get_count(mutation_light, i, "v_mutation_count_aa_light")?,
            model: get_str(model, i, "model")?.to_string(),
        });
    }
    Ok(rows)
}

fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    Ok(df
        .column(name)
        .with_context(|| format!("missing column {name}"))?
        .as_materialized_series())
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    series(df, name)?
        .str()
        .with_context(|| format!("column {name} is not a string column"))
}

fn int_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Int64Chunked> {
    series(df, name)?
        .i64()
        .with_context(|| format!("column {name} is not an integer column"))
}

fn get_str<'a>(column: &'a StringChunked, i: usize, name: &str) -> Result<&'a str> {
    column
        .get(i)
        .with_context(|| format!("null {name} cell in row {i}"))
}

fn get_count(column: &Int64Chunked, i: usize, name: &str) -> Result<u32> {
    let value = column
        .get(i)
        .with_context(|| format!("null {name} cell in row {i}"))?;
    u32::try_from(value).with_context(|| format!("negative {name} in row {i}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ablm_test_data::ResultFixture;

    #[test]
    fn test_load_and_materialize() {
        let fixture = ResultFixture::paired_run_01();
        let (dir, _handle) = fixture.create_temp_dir().unwrap();
        let df = load_results_dir(&dir).unwrap();
        let rows = materialize_rows(&df).unwrap();
        assert_eq!(rows.len(), fixture.rows().len());
        assert_eq!(rows[0].sequence, fixture.rows()[0].sequence);
        assert_eq!(rows[0].loss, fixture.rows()[0].loss);
        assert_eq!(rows[1].v_mutation_count_aa_heavy, 5);
    }

    #[test]
    fn test_concatenates_multiple_files() {
        let fixture = ResultFixture::paired_run_01();
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.parquet", "b.parquet"] {
            let mut df = fixture.to_dataframe().unwrap();
            let file = std::fs::File::create(dir.path().join(name)).unwrap();
            ParquetWriter::new(file).finish(&mut df).unwrap();
        }
        let df = load_results_dir(dir.path()).unwrap();
        assert_eq!(df.height(), fixture.rows().len() * 2);
    }

    #[test]
    fn test_empty_directory_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_results_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("no input files"));
    }

    #[test]
    fn test_non_parquet_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a result file").unwrap();
        assert!(load_results_dir(dir.path()).is_err());
    }
}

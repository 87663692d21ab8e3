//! ablm-test-data
//!
//! Synthetic antibody inference-result fixtures for use in testing.
//! Fixtures are built in memory as [`ResultRow`]s and written out as
//! temporary Parquet files for programs to operate on.
//!
//! Example usage:
//!
//! ```ignore
//! // returns (filepath, _tempfile_handle).
//! // _handle ensures the tempfile remains in scope
//! use ablm_test_data::ResultFixture;
//! let (parquet_file, _temp) = ResultFixture::paired_run_01().create_temp().unwrap();
//! let (results_dir, _dir) = ResultFixture::paired_run_01().create_temp_dir().unwrap();
//! ```
use ablm_core::ResultRow;
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::{Builder, NamedTempFile, TempDir};

const SEPARATOR: &str = "<cls>";
const HEAVY: &str = "EVQLVESGGGLVQPGGSL";
const LIGHT: &str = "DIQMTQSPSSLSASVG";
const MASK_HEAVY: &str = "000112223344455566";
const MASK_LIGHT: &str = "0001122233444556";

#[derive(Debug, Clone)]
pub struct ResultFixture {
    rows: Vec<ResultRow>,
}

impl ResultFixture {
    /// Two models, each with one mutated and one unmutated paired-chain
    /// row. All masks segment cleanly into the seven canonical regions.
    pub fn paired_run_01() -> Self {
        let rows = vec![
            synthetic_row("balm-base", 0, 0, 0.4, true),
            synthetic_row("balm-base", 5, 2, 0.9, false),
            synthetic_row("balm-shuffled", 0, 0, 1.3, true),
            synthetic_row("balm-shuffled", 3, 0, 1.8, false),
        ];
        Self { rows }
    }

    /// Adds one row whose heavy mask has too few runs, which the
    /// aggregation gate must drop.
    pub fn with_malformed_heavy(mut self) -> Self {
        let mut row = synthetic_row("balm-base", 0, 0, 0.7, true);
        row.cdr_mask_heavy = "0".repeat(HEAVY.len());
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut loss_builder = ListPrimitiveChunkedBuilder::<Float64Type>::new(
            "loss".into(),
            self.rows.len(),
            self.rows.len() * 40,
            DataType::Float64,
        );
        for row in &self.rows {
            loss_builder.append_slice(&row.loss);
        }
        let loss: Column = loss_builder.finish().into_series().into();

        DataFrame::new(vec![
            Column::new(
                "sequence".into(),
                self.rows.iter().map(|r| r.sequence.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "separator".into(),
                self.rows.iter().map(|r| r.separator.clone()).collect::<Vec<_>>(),
            ),
            loss,
            Column::new(
                "prediction".into(),
                self.rows.iter().map(|r| r.prediction.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "cdr_mask_heavy".into(),
                self.rows.iter().map(|r| r.cdr_mask_heavy.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "cdr_mask_light".into(),
                self.rows.iter().map(|r| r.cdr_mask_light.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "v_mutation_count_aa_heavy".into(),
                self.rows
                    .iter()
                    .map(|r| r.v_mutation_count_aa_heavy as i64)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "v_mutation_count_aa_light".into(),
                self.rows
                    .iter()
                    .map(|r| r.v_mutation_count_aa_light as i64)
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "model".into(),
                self.rows.iter().map(|r| r.model.clone()).collect::<Vec<_>>(),
            ),
        ])
    }

    /// Write the fixture to a single temporary `.parquet` file.
    pub fn create_temp(&self) -> anyhow::Result<(String, NamedTempFile)> {
        let temp = Builder::new().suffix(".parquet").tempfile()?;
        let mut df = self.to_dataframe()?;
        ParquetWriter::new(temp.as_file()).finish(&mut df)?;
        let path = temp.path().to_string_lossy().into_owned();
        Ok((path, temp))
    }

    /// Write the fixture into a temporary directory as `results.parquet`,
    /// for code that consumes a directory of result files.
    pub fn create_temp_dir(&self) -> anyhow::Result<(PathBuf, TempDir)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results.parquet");
        let mut df = self.to_dataframe()?;
        ParquetWriter::new(std::fs::File::create(&path)?).finish(&mut df)?;
        Ok((dir.path().to_path_buf(), dir))
    }
}

/// One paired-chain row with self-consistent sequence, mask, loss and
/// prediction lengths. `perfect` controls whether the prediction matches
/// the true sequence at every chain position.
fn synthetic_row(
    model: &str,
    mutations_heavy: u32,
    mutations_light: u32,
    base_loss: f64,
    perfect: bool,
) -> ResultRow {
    let n = HEAVY.len() + 1 + LIGHT.len();
    let heavy_pred: String = if perfect {
        HEAVY.to_string()
    } else {
        // miss the first two heavy positions
        format!("ZZ{}", &HEAVY[2..])
    };
    ResultRow {
        sequence: format!("{HEAVY}{SEPARATOR}{LIGHT}"),
        separator: SEPARATOR.to_string(),
        loss: (0..n).map(|i| base_loss + 0.01 * i as f64).collect(),
        prediction: format!("{heavy_pred}X{LIGHT}"),
        cdr_mask_heavy: MASK_HEAVY.to_string(),
        cdr_mask_light: MASK_LIGHT.to_string(),
        v_mutation_count_aa_heavy: mutations_heavy,
        v_mutation_count_aa_light: mutations_light,
        model: model.to_string(),
    }
}

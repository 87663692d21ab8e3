//! Summary-table output.
use ablm_core::SummaryRecord;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Write the CDRH3 summary as CSV, one row per (model, mutated) pair.
pub fn write_summary_csv(records: &[SummaryRecord], path: &Path) -> Result<()> {
    let mut df = summary_dataframe(records)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating summary file {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing summary file {}", path.display()))?;
    Ok(())
}

fn summary_dataframe(records: &[SummaryRecord]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Column::new(
            "model".into(),
            records.iter().map(|r| r.model.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "mutated".into(),
            records.iter().map(|r| r.mutated).collect::<Vec<_>>(),
        ),
        Column::new(
            "CDRH3_median_loss".into(),
            records
                .iter()
                .map(|r| r.cdrh3_median_loss.clone())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "CDRH3_accuracy".into(),
            records
                .iter()
                .map(|r| r.cdrh3_accuracy.clone())
                .collect::<Vec<_>>(),
        ),
    ])?;
    Ok(df)
}

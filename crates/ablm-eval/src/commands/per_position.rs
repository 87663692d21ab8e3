//! Per-position comparison: load result files, aggregate both chains by
//! region, render one figure per (mutation status, metric), and write the
//! CDRH3 summary table.
use ablm_core::{aggregate_rows, build_summary};
use ablm_models::TaskConfig;
use ablm_plot::{figure_path, figure_spec, render_figure, Metric};
use anyhow::{Context, Result};
use std::path::Path;

pub fn execute(results_dir: &Path, output_dir: &Path, task_str: &str) -> Result<()> {
    let config = TaskConfig::per_position_inference(output_dir.to_path_buf());
    log::info!("running {}", config.name());

    let df = ablm_io::load_results_dir(results_dir)?;
    let rows = ablm_io::materialize_rows(&df)?;
    log::info!("loaded {} rows from {}", rows.len(), results_dir.display());

    let aggregation = aggregate_rows(&rows)?;
    log::info!(
        "aggregated {} region records ({} chains rejected by the region gate)",
        aggregation.records.len(),
        aggregation.rejected_chains
    );

    let output_dir = config.data().output_dir.as_path();
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    for mutated in [true, false] {
        let subset: Vec<_> = aggregation
            .records
            .iter()
            .filter(|r| r.mutated == mutated)
            .cloned()
            .collect();
        for metric in [Metric::MedianLoss, Metric::Accuracy] {
            let spec = figure_spec(&subset, metric);
            let path = figure_path(output_dir, task_str, mutated, metric);
            render_figure(&path, &spec)?;
            log::info!("wrote {}", path.display());
        }
    }

    let summary = build_summary(&aggregation.records);
    let summary_path = output_dir.join(format!("results-summary_{task_str}.csv"));
    ablm_io::write_summary_csv(&summary, &summary_path)?;
    log::info!("wrote {}", summary_path.display());
    Ok(())
}

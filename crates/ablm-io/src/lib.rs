//! ablm-io
//!
//! Columnar I/O for the evaluation pipeline: reads directories of Parquet
//! inference-result files into [`ablm_core::ResultRow`]s and writes the
//! summary table out as CSV.
pub use loader::{load_results_dir, materialize_rows};
pub use writer::write_summary_csv;

pub mod loader;
pub mod writer;

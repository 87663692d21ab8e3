//! ablm-core
//!
//! Region segmentation and per-region metric aggregation for antibody
//! language model evaluation. Takes per-position masked-prediction results
//! (one loss and one predicted residue per token), splits them into heavy
//! and light chains, segments each chain by its CDR mask, and emits
//! per-region loss/accuracy records plus a CDRH3 summary table.
pub use error::EvalError;
pub use regions::{aggregate_rows, assign_regions, segment_runs, Aggregation};
pub use split::split_row;
pub use summary::{build_summary, format_stat};
pub use types::{Chain, DerivedRow, Region, RegionRecord, ResultRow, SummaryRecord};

pub mod error;
pub mod regions;
pub mod split;
pub mod stats;
pub mod summary;
pub mod types;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Antibody chain regions in fixed biological order.
///
/// A well-formed CDR mask partitions a chain into exactly these seven
/// contiguous segments, framework and CDR regions alternating.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Region {
    FR1, CDR1, FR2, CDR2, FR3, CDR3, FR4,
}

impl Region {
    pub const COUNT: usize = 7;
    pub const ALL: [Region; Region::COUNT] = [
        Region::FR1,
        Region::CDR1,
        Region::FR2,
        Region::CDR2,
        Region::FR3,
        Region::CDR3,
        Region::FR4,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Chain {
    Heavy,
    Light,
}

impl Chain {
    pub fn title(&self) -> &'static str {
        match self {
            Chain::Heavy => "Heavy",
            Chain::Light => "Light",
        }
    }
}

/// One evaluated sequence as produced by a masked-prediction inference run.
///
/// `sequence` holds the heavy and light chain residues joined by
/// `separator`; `loss` and `prediction` are aligned one-to-one with the
/// tokenized sequence, separator token(s) included. The heavy mask length
/// defines the heavy-chain boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub sequence: String,
    pub separator: String,
    pub loss: Vec<f64>,
    pub prediction: String,
    pub cdr_mask_heavy: String,
    pub cdr_mask_light: String,
    pub v_mutation_count_aa_heavy: u32,
    pub v_mutation_count_aa_light: u32,
    pub model: String,
}

impl ResultRow {
    /// A row is mutated when either chain differs from its germline.
    pub fn mutated(&self) -> bool {
        self.v_mutation_count_aa_heavy > 0 || self.v_mutation_count_aa_light > 0
    }

    /// Number of separator tokens between the chains, counted as `<`
    /// occurrences in the separator string (`"<cls>"` is one token).
    pub fn separator_token_count(&self) -> usize {
        self.separator.matches('<').count()
    }
}

/// Per-chain slices of a [`ResultRow`]. Computed once, consumed by the
/// region aggregator, then dropped.
#[derive(Debug, Clone)]
pub struct DerivedRow {
    pub heavy_loss: Vec<f64>,
    pub light_loss: Vec<f64>,
    pub heavy_pred: Vec<char>,
    pub light_pred: Vec<char>,
    pub heavy_sequence: String,
    pub light_sequence: String,
}

/// Aggregate metrics for one region of one chain of one row.
#[derive(Debug, Clone, Serialize)]
pub struct RegionRecord {
    pub region: Region,
    pub model: String,
    pub chain: Chain,
    pub mutated: bool,
    pub loss: Vec<f64>,
    pub mean_loss: f64,
    pub median_loss: f64,
    pub accuracy: f64,
}

/// One summary-table row per (model, mutated) pair, restricted to
/// heavy-chain CDR3 records. Values are preformatted `"median (± sem)"`
/// strings, the error term omitted for single-member groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub model: String,
    pub mutated: bool,
    pub cdrh3_median_loss: String,
    pub cdrh3_accuracy: String,
}

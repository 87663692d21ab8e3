//! CDR mask segmentation and per-region aggregation.
//!
//! A chain's CDR mask is one categorical label per residue. Segmentation
//! is purely positional: a single left-to-right scan closes a run whenever
//! the label changes, and the canonical region names are assigned to the
//! resulting runs by order, not by label content. Chains that do not
//! produce exactly seven runs are skipped and counted, never raised.
use crate::error::EvalError;
use crate::split::split_row;
use crate::stats;
use crate::types::{Chain, Region, RegionRecord, ResultRow};

/// Maximal runs of identical adjacent labels as half-open `(start, end)`
/// ranges. The final run is always closed, also for length-1 input.
pub fn segment_runs(mask: &str) -> Vec<(usize, usize)> {
    let labels: Vec<char> = mask.chars().collect();
    let mut runs = Vec::new();
    if labels.is_empty() {
        return runs;
    }
    let mut start = 0;
    let mut prev = labels[0];
    for (i, &label) in labels.iter().enumerate() {
        if label != prev {
            runs.push((start, i));
            start = i;
        }
        prev = label;
    }
    runs.push((start, labels.len()));
    runs
}

/// Zip the mask's runs against the canonical region order. `None` when the
/// run count is not exactly seven (the data-quality gate: no partial
/// output for malformed chains).
pub fn assign_regions(mask: &str) -> Option<Vec<(Region, usize, usize)>> {
    let runs = segment_runs(mask);
    if runs.len() != Region::COUNT {
        return None;
    }
    Some(
        Region::ALL
            .iter()
            .zip(runs)
            .map(|(&region, (start, end))| (region, start, end))
            .collect(),
    )
}

/// Output of [`aggregate_rows`]: the accepted records plus the number of
/// chains dropped by the exactly-seven-runs gate.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub records: Vec<RegionRecord>,
    pub rejected_chains: usize,
}

/// Split every row and aggregate both chains by region.
///
/// Malformed chain masks are filtered (and counted in
/// `rejected_chains`); malformed rows — bad separators or split points —
/// are hard errors.
pub fn aggregate_rows(rows: &[ResultRow]) -> Result<Aggregation, EvalError> {
    let mut agg = Aggregation::default();
    for (index, row) in rows.iter().enumerate() {
        let derived = split_row(row, index)?;
        let mutated = row.mutated();
        for chain in [Chain::Heavy, Chain::Light] {
            let (mask, loss, pred, seq) = match chain {
                Chain::Heavy => (
                    row.cdr_mask_heavy.as_str(),
                    &derived.heavy_loss,
                    &derived.heavy_pred,
                    derived.heavy_sequence.as_str(),
                ),
                Chain::Light => (
                    row.cdr_mask_light.as_str(),
                    &derived.light_loss,
                    &derived.light_pred,
                    derived.light_sequence.as_str(),
                ),
            };
            match aggregate_chain(index, chain, mask, loss, pred, seq, &row.model, mutated)? {
                Some(mut records) => agg.records.append(&mut records),
                None => agg.rejected_chains += 1,
            }
        }
    }
    Ok(agg)
}

#[allow(clippy::too_many_arguments)]
fn aggregate_chain(
    row: usize,
    chain: Chain,
    mask: &str,
    loss: &[f64],
    pred: &[char],
    seq: &str,
    model: &str,
    mutated: bool,
) -> Result<Option<Vec<RegionRecord>>, EvalError> {
    let seq_chars: Vec<char> = seq.chars().collect();
    let mask_len = mask.chars().count();
    if mask_len > loss.len() || mask_len > pred.len() || mask_len > seq_chars.len() {
        log::debug!("row {row}: {chain} chain mask ({mask_len}) longer than chain arrays, skipping chain");
        return Ok(None);
    }
    let Some(assigned) = assign_regions(mask) else {
        log::debug!(
            "row {row}: {chain} chain mask does not segment into {} regions, skipping chain",
            Region::COUNT
        );
        return Ok(None);
    };

    let mut records = Vec::with_capacity(Region::COUNT);
    for (region, start, end) in assigned {
        if start >= end {
            return Err(EvalError::Internal(format!(
                "empty {region} slice for row {row} {chain} chain"
            )));
        }
        let region_loss = &loss[start..end];
        let matches = pred[start..end]
            .iter()
            .zip(&seq_chars[start..end])
            .filter(|(p, t)| p == t)
            .count();
        let mean_loss = stats::mean(region_loss).ok_or_else(|| {
            EvalError::Internal(format!("mean of empty {region} slice, row {row}"))
        })?;
        let median_loss = stats::median(region_loss).ok_or_else(|| {
            EvalError::Internal(format!("median of empty {region} slice, row {row}"))
        })?;
        records.push(RegionRecord {
            region,
            model: model.to_string(),
            chain,
            mutated,
            loss: region_loss.to_vec(),
            mean_loss,
            median_loss,
            accuracy: matches as f64 / (end - start) as f64,
        });
    }
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(model: &str, mask_h: &str, mask_l: &str, mutations: u32) -> ResultRow {
        let hlen = mask_h.len();
        let llen = mask_l.len();
        let heavy: String = "QVKLEQSGAELVRSGASVKLSCTAS".chars().cycle().take(hlen).collect();
        let light: String = "DIQMTQSPASLSASVGETVTITCRA".chars().cycle().take(llen).collect();
        let n = hlen + 1 + llen;
        ResultRow {
            sequence: format!("{heavy}<cls>{light}"),
            separator: "<cls>".to_string(),
            loss: (0..n).map(|i| 0.1 * i as f64).collect(),
            prediction: format!("{heavy}X{light}"),
            cdr_mask_heavy: mask_h.to_string(),
            cdr_mask_light: mask_l.to_string(),
            v_mutation_count_aa_heavy: mutations,
            v_mutation_count_aa_light: 0,
            model: model.to_string(),
        }
    }

    #[test]
    fn test_segment_single_run() {
        assert_eq!(segment_runs("AAAA"), vec![(0, 4)]);
        assert_eq!(segment_runs("A"), vec![(0, 1)]);
        assert_eq!(segment_runs(""), Vec::<(usize, usize)>::new());
    }

    #[test]
    fn test_segment_covers_span_in_order() {
        let mask = "000112223344455566";
        let runs = segment_runs(mask);
        assert_eq!(runs.len(), 7);
        assert_eq!(runs[0].0, 0);
        assert_eq!(runs.last().unwrap().1, mask.len());
        for pair in runs.windows(2) {
            // pairwise non-overlapping, ascending, gap-free
            assert_eq!(pair[0].1, pair[1].0);
            assert!(pair[0].0 < pair[0].1);
        }
    }

    #[test]
    fn test_alternating_two_labels_accepted() {
        // seven runs by contiguity, only two distinct labels
        let assigned = assign_regions("FFFCCCFFFCCCFFFCCCFFF").unwrap();
        assert_eq!(assigned.len(), 7);
        assert_eq!(assigned[0], (Region::FR1, 0, 3));
        assert_eq!(assigned[5], (Region::CDR3, 15, 18));
        assert_eq!(assigned[6], (Region::FR4, 18, 21));
    }

    #[test]
    fn test_wrong_run_count_rejected() {
        assert!(assign_regions("000111222").is_none());
        assert!(assign_regions("").is_none());
        assert!(assign_regions("0011223344556677").is_none());
    }

    #[test]
    fn test_aggregate_emits_seven_records_per_chain() {
        let rows = vec![make_row("m1", "000112223344455566", "0001122233444556", 0)];
        let agg = aggregate_rows(&rows).unwrap();
        assert_eq!(agg.records.len(), 14);
        assert_eq!(agg.rejected_chains, 0);
        let heavy: Vec<_> = agg
            .records
            .iter()
            .filter(|r| r.chain == Chain::Heavy)
            .collect();
        assert_eq!(heavy.len(), 7);
        assert_eq!(heavy[0].region, Region::FR1);
        assert_eq!(heavy[6].region, Region::FR4);
        assert!(heavy.iter().all(|r| !r.mutated));
    }

    #[test]
    fn test_region_losses_reconstruct_chain() {
        let rows = vec![make_row("m1", "000112223344455566", "0001122233444556", 1)];
        let agg = aggregate_rows(&rows).unwrap();
        let concatenated: Vec<f64> = agg
            .records
            .iter()
            .filter(|r| r.chain == Chain::Heavy)
            .flat_map(|r| r.loss.clone())
            .collect();
        let expected: Vec<f64> = (0..18).map(|i| 0.1 * i as f64).collect();
        assert_eq!(concatenated, expected);
    }

    #[test]
    fn test_malformed_chain_emits_nothing() {
        // heavy mask has three runs: the whole chain is skipped, light kept
        let rows = vec![make_row("m1", "000011112222222222", "0001122233444556", 0)];
        let agg = aggregate_rows(&rows).unwrap();
        assert_eq!(agg.rejected_chains, 1);
        assert!(agg.records.iter().all(|r| r.chain == Chain::Light));
        assert_eq!(agg.records.len(), 7);
    }

    #[test]
    fn test_accuracy_bounds() {
        let mut row = make_row("m1", "000112223344455566", "0001122233444556", 0);
        let agg = aggregate_rows(&[row.clone()]).unwrap();
        // prediction equals sequence everywhere inside the chains
        assert!(agg.records.iter().all(|r| r.accuracy == 1.0));

        // break every heavy prediction
        let hlen = row.cdr_mask_heavy.len();
        let light_part: String = row.prediction.chars().skip(hlen).collect();
        row.prediction = format!("{}{}", "Z".repeat(hlen), light_part);
        let agg = aggregate_rows(&[row]).unwrap();
        for r in &agg.records {
            assert!((0.0..=1.0).contains(&r.accuracy));
            if r.chain == Chain::Heavy {
                assert_eq!(r.accuracy, 0.0);
            }
        }
    }

    #[test]
    fn test_mean_and_median_per_region() {
        let rows = vec![make_row("m1", "000112223344455566", "0001122233444556", 0)];
        let agg = aggregate_rows(&rows).unwrap();
        let fr1 = agg
            .records
            .iter()
            .find(|r| r.chain == Chain::Heavy && r.region == Region::FR1)
            .unwrap();
        // heavy FR1 covers loss values 0.0, 0.1, 0.2
        assert!((fr1.mean_loss - 0.1).abs() < 1e-12);
        assert!((fr1.median_loss - 0.1).abs() < 1e-12);
    }
}

//! CDRH3 summary table.
//!
//! Heavy-chain CDR3 is the most diagnostic region for antibody language
//! models, so the summary table reduces to it: one row per
//! (model, mutated) pair holding `"median (± sem)"` strings for the
//! per-record median loss and accuracy. Mean loss is dropped before
//! summarization.
use crate::stats;
use crate::types::{Chain, Region, RegionRecord, SummaryRecord};
use std::collections::BTreeMap;

/// Group heavy-chain CDR3 records by (model, mutated) and format the group
/// statistics. Output is sorted by (model, mutated) ascending.
pub fn build_summary(records: &[RegionRecord]) -> Vec<SummaryRecord> {
    let mut groups: BTreeMap<(String, bool), Vec<&RegionRecord>> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.region == Region::CDR3 && r.chain == Chain::Heavy)
    {
        groups
            .entry((record.model.clone(), record.mutated))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((model, mutated), group)| {
            let median_losses: Vec<f64> = group.iter().map(|r| r.median_loss).collect();
            let accuracies: Vec<f64> = group.iter().map(|r| r.accuracy).collect();
            SummaryRecord {
                model,
                mutated,
                cdrh3_median_loss: format_stat(&median_losses),
                cdrh3_accuracy: format_stat(&accuracies),
            }
        })
        .collect()
}

/// `"<median> (± <sem>)"` to four decimal places; bare median when the
/// error term is undefined (groups of one).
pub fn format_stat(values: &[f64]) -> String {
    let median = stats::median(values).unwrap_or(f64::NAN);
    match stats::sem(values) {
        Some(sem) => format!("{median:.4} (± {sem:.4})"),
        None => format!("{median:.4}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, region: Region, chain: Chain, mutated: bool, value: f64) -> RegionRecord {
        RegionRecord {
            region,
            model: model.to_string(),
            chain,
            mutated,
            loss: vec![value],
            mean_loss: value,
            median_loss: value,
            accuracy: 0.5,
        }
    }

    #[test]
    fn test_filters_to_heavy_cdr3() {
        let records = vec![
            record("m1", Region::CDR3, Chain::Heavy, false, 1.0),
            record("m1", Region::CDR3, Chain::Light, false, 9.0),
            record("m1", Region::FR2, Chain::Heavy, false, 9.0),
        ];
        let summary = build_summary(&records);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].model, "m1");
        assert_eq!(summary[0].cdrh3_median_loss, "1.0000");
    }

    #[test]
    fn test_single_record_has_no_error_term() {
        let records = vec![record("m1", Region::CDR3, Chain::Heavy, true, 0.25)];
        let summary = build_summary(&records);
        assert!(!summary[0].cdrh3_median_loss.contains('±'));
        assert_eq!(summary[0].cdrh3_median_loss, "0.2500");
    }

    #[test]
    fn test_identical_values_format_zero_sem() {
        let records = vec![
            record("m1", Region::CDR3, Chain::Heavy, false, 2.0),
            record("m1", Region::CDR3, Chain::Heavy, false, 2.0),
        ];
        let summary = build_summary(&records);
        assert_eq!(summary[0].cdrh3_median_loss, "2.0000 (± 0.0000)");
        assert_eq!(summary[0].cdrh3_accuracy, "0.5000 (± 0.0000)");
    }

    #[test]
    fn test_sorted_by_model_then_mutated() {
        let records = vec![
            record("zeta", Region::CDR3, Chain::Heavy, true, 1.0),
            record("alpha", Region::CDR3, Chain::Heavy, true, 1.0),
            record("alpha", Region::CDR3, Chain::Heavy, false, 1.0),
        ];
        let summary = build_summary(&records);
        let keys: Vec<(String, bool)> = summary
            .iter()
            .map(|s| (s.model.clone(), s.mutated))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("alpha".to_string(), false),
                ("alpha".to_string(), true),
                ("zeta".to_string(), true),
            ]
        );
    }
}

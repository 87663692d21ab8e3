//! Chain splitting.
//!
//! Heavy/light inference results arrive concatenated: the loss and
//! prediction arrays cover `heavy + separator token(s) + light`, and the
//! raw sequence string embeds the literal separator (e.g. `"<cls>"`).
//! The heavy mask length gives the heavy boundary; the separator token
//! count gives the gap before the light chain starts.
use crate::error::EvalError;
use crate::types::{DerivedRow, ResultRow};

/// Split a row's concatenated arrays into per-chain slices.
///
/// `row_index` is only used for error reporting. A separator occurring
/// zero or more than one time in the sequence string is rejected rather
/// than silently mis-split, as is a split point past the end of the
/// arrays.
pub fn split_row(row: &ResultRow, row_index: usize) -> Result<DerivedRow, EvalError> {
    let hlen = row.cdr_mask_heavy.chars().count();
    let seplen = row.separator_token_count();

    if row.prediction.chars().count() != row.loss.len() {
        return Err(EvalError::MalformedRow {
            row: row_index,
            reason: format!(
                "prediction length {} does not match loss length {}",
                row.prediction.chars().count(),
                row.loss.len()
            ),
        });
    }
    if hlen + seplen > row.loss.len() {
        return Err(EvalError::MalformedRow {
            row: row_index,
            reason: format!(
                "split point {} (heavy {} + separator {}) exceeds array length {}",
                hlen + seplen,
                hlen,
                seplen,
                row.loss.len()
            ),
        });
    }

    let occurrences = row.sequence.matches(&row.separator).count();
    if occurrences != 1 {
        if occurrences == 0 {
            return Err(EvalError::MalformedRow {
                row: row_index,
                reason: format!("separator {:?} not found in sequence", row.separator),
            });
        }
        return Err(EvalError::AmbiguousSeparator {
            row: row_index,
            separator: row.separator.clone(),
            count: occurrences,
        });
    }
    // occurrence count checked above, split_once cannot fail here
    let (heavy_sequence, light_sequence) = row
        .sequence
        .split_once(&row.separator)
        .ok_or_else(|| EvalError::Internal(format!("separator split failed for row {row_index}")))?;

    let pred: Vec<char> = row.prediction.chars().collect();
    Ok(DerivedRow {
        heavy_loss: row.loss[..hlen].to_vec(),
        light_loss: row.loss[hlen + seplen..].to_vec(),
        heavy_pred: pred[..hlen].to_vec(),
        light_pred: pred[hlen + seplen..].to_vec(),
        heavy_sequence: heavy_sequence.to_string(),
        light_sequence: light_sequence.to_string(),
    })
}

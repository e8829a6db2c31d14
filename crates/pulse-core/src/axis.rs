// File: crates/pulse-core/src/axis.rs
// Summary: Axis tick placement: which bucket indices get a date label along X.

use crate::grid::linspace;

/// Bucket indices that receive an X-axis label.
///
/// At most `max_labels` indices, evenly spread; the first and last bucket are
/// always labelled when both `len` and `max_labels` are at least two.
pub fn x_label_indices(len: usize, max_labels: usize) -> Vec<usize> {
    match (len, max_labels) {
        (0, _) | (_, 0) => Vec::new(),
        (1, _) | (_, 1) => vec![0],
        _ => {
            let count = max_labels.min(len);
            let mut out: Vec<usize> = linspace(0.0, (len - 1) as f64, count)
                .into_iter()
                .map(|v| v.round() as usize)
                .collect();
            out.dedup();
            out
        }
    }
}

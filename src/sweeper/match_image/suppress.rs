//! Greedy non-maximum suppression
//!
//! The pool is ranked, then the top candidate is repeatedly kept and every
//! remaining candidate covered by it beyond the threshold is discarded.
//! Coverage is measured against the remaining candidate's own area, so a
//! small box sitting inside a kept one is always dropped. O(n²) per call.

use super::bbox::{BoundingBox, Detection};
use super::config::SuppressionOrder;

/// Suppress plain boxes, ranking them by bottom edge (greatest `y2` wins).
pub fn suppress(boxes: &[BoundingBox], overlap_threshold: f32) -> Vec<BoundingBox> {
    if boxes.is_empty() {
        return Vec::new();
    }

    let mut pool = boxes.to_vec();
    pool.sort_by_key(|b| b.y2());
    greedy(pool, overlap_threshold, |b| b)
}

/// Suppress scored detections using the requested ranking.
pub fn suppress_detections(
    detections: &[Detection],
    overlap_threshold: f32,
    order: SuppressionOrder,
) -> Vec<Detection> {
    if detections.is_empty() {
        return Vec::new();
    }

    let mut pool = detections.to_vec();
    match order {
        SuppressionOrder::BottomEdge => pool.sort_by_key(|d| d.bbox.y2()),
        SuppressionOrder::Score => pool.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.bbox.y2().cmp(&b.bbox.y2()))
        }),
    }
    greedy(pool, overlap_threshold, |d| &d.bbox)
}

/// `pool` is sorted ascending; the best candidate sits at the end.
fn greedy<T>(mut pool: Vec<T>, overlap_threshold: f32, bbox: impl Fn(&T) -> &BoundingBox) -> Vec<T> {
    let mut kept = Vec::new();

    while let Some(best) = pool.pop() {
        let best_box = *bbox(&best);
        pool.retain(|other| bbox(other).overlap_ratio(&best_box) <= overlap_threshold);
        kept.push(best);
    }

    kept
}

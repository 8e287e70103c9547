//! Scan-line structure recognition.
//!
//! A coverage grid alternates long scan legs with short connecting turns.
//! Rather than requiring the caller to tag legs, the segmenter recovers the
//! structure from the distances themselves using an adaptive threshold.

use crate::models::{LabeledSegment, SegmentKind, Waypoint};
use crate::spatial::planar_distance;

/// Fraction of the median adjacent-pair distance used as the scan/turn cut.
const SCAN_THRESHOLD_FACTOR: f64 = 0.6;

/// Label every adjacent waypoint pair as a scan or turn segment.
///
/// The threshold is 0.6 times the median adjacent distance, where "median"
/// is the element at index `len / 2` of the sorted distances (upper median
/// for even counts). Pairs strictly longer than the threshold are scan
/// legs; everything else is a turn. Fewer than two waypoints yield an
/// empty list and the caller treats the input as a passthrough.
pub fn identify_segments(waypoints: &[Waypoint]) -> Vec<LabeledSegment> {
    if waypoints.len() < 2 {
        return Vec::new();
    }

    let distances: Vec<f64> = waypoints
        .windows(2)
        .map(|pair| planar_distance(pair[0], pair[1]))
        .collect();

    let mut sorted = distances.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[sorted.len() / 2];
    let threshold = median * SCAN_THRESHOLD_FACTOR;

    let segments: Vec<LabeledSegment> = distances
        .iter()
        .enumerate()
        .map(|(i, &dist)| LabeledSegment {
            kind: if dist > threshold {
                SegmentKind::Scan
            } else {
                SegmentKind::Turn
            },
            start: i,
            end: i + 1,
        })
        .collect();

    let scan_count = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Scan)
        .count();
    tracing::debug!(
        scan_count,
        turn_count = segments.len() - scan_count,
        threshold_m = threshold,
        "identified scan structure"
    );

    segments
}

//! # Interval matcher
//!
//! Reconciles the two catalogs by temporal containment. For every classification event
//! `c`, the candidates are the location events whose peak lies in `[c.start, c.end]`
//! (both ends included):
//!
//! * exactly one candidate gives a [`MatchedFlare`],
//! * no candidate or several candidates drop `c`, its index is kept in
//!   [`MatchOutcome::unmatched`] or [`MatchOutcome::ambiguous`].
//!
//! A location event may match several classification events; only the classification
//! side is one-to-one.
//!
//! The location peaks are sorted once, then each window is resolved with two binary
//! searches, `O((C + L) log L)` overall.
use hifitime::Epoch;
use log::info;

use crate::constants::ArcSec;
use crate::events::{ClassificationEvent, FlareClass, LocationEvent};

/// A flare known to both catalogs: HESSI timing and position, GOES class.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedFlare {
    pub peak_time: Epoch,
    pub x_pos: ArcSec,
    pub y_pos: ArcSec,
    pub class: FlareClass,
}

impl MatchedFlare {
    pub fn from_events(location: &LocationEvent, classification: &ClassificationEvent) -> Self {
        MatchedFlare {
            peak_time: location.peak,
            x_pos: location.x_pos,
            y_pos: location.y_pos,
            class: classification.class,
        }
    }
}

/// Result of [`match_flares`].
///
/// `unmatched` and `ambiguous` hold indices into the classification slice, in
/// increasing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub matched: Vec<MatchedFlare>,
    pub unmatched: Vec<usize>,
    pub ambiguous: Vec<usize>,
}

/// Location peaks sorted in time, with the index of their event.
struct PeakIndex {
    peaks: Vec<(Epoch, usize)>,
}

impl PeakIndex {
    fn new(location: &[LocationEvent]) -> Self {
        let mut peaks: Vec<(Epoch, usize)> = location
            .iter()
            .enumerate()
            .map(|(idx, event)| (event.peak, idx))
            .collect();
        peaks.sort_by_key(|&(peak, idx)| (peak, idx));
        PeakIndex { peaks }
    }

    /// Sorted entries whose peak is within `[start, end]`.
    fn window(&self, start: Epoch, end: Epoch) -> &[(Epoch, usize)] {
        let lo = self.peaks.partition_point(|&(peak, _)| peak < start);
        let hi = self.peaks.partition_point(|&(peak, _)| peak <= end);
        if lo < hi {
            &self.peaks[lo..hi]
        } else {
            &[]
        }
    }
}

/// Match every classification event with the location event peaking inside its window.
///
/// Arguments
/// -----------------
/// * `location`: the (filtered) location catalog
/// * `classification`: the classification catalog
///
/// Return
/// ----------
/// * A [`MatchOutcome`]; `matched` follows the order of `classification`.
pub fn match_flares(
    location: &[LocationEvent],
    classification: &[ClassificationEvent],
) -> MatchOutcome {
    let index = PeakIndex::new(location);
    let mut outcome = MatchOutcome::default();

    for (c_idx, event) in classification.iter().enumerate() {
        match index.window(event.start, event.end) {
            [] => outcome.unmatched.push(c_idx),
            [(_, l_idx)] => outcome
                .matched
                .push(MatchedFlare::from_events(&location[*l_idx], event)),
            _ => outcome.ambiguous.push(c_idx),
        }
    }

    info!(
        "Matched {} of {} classification events ({} unmatched, {} ambiguous)",
        outcome.matched.len(),
        classification.len(),
        outcome.unmatched.len(),
        outcome.ambiguous.len()
    );
    outcome
}

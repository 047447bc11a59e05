//! # Location catalog quality filter
//!
//! Keeps the HESSI events that can be trusted for the join. An event is kept when it
//! satisfies **all** of:
//!
//! 1. [`QualityFilter::carries_bad_flag`] is false: none of its flags is in the bad-flag set,
//! 2. [`QualityFilter::within_radial`]: `radial <= P(radial)`, with `P` the radial
//!    percentile computed once over the whole input by [`percentile_linear`],
//! 3. [`QualityFilter::has_known_region`]: `active_region > 0`.
//!
//! The input slice is never modified, a new `Vec` is returned.
//!
//! [`QualityFilter::calibrate`] fixes the radial cut on a catalog and returns a
//! [`CalibratedFilter`]. Applying a calibrated filter again to its own output keeps every
//! event, which is what the join uses. [`QualityFilter::apply`] calibrates on each call.
use std::collections::BTreeSet;
use std::fmt;

use log::{info, warn};

use crate::constants::{DEFAULT_BAD_FLAGS, DEFAULT_RADIAL_PERCENTILE};
use crate::events::flags::describe_flag;
use crate::events::LocationEvent;
use crate::flarecat_errors::FlareCatError;

/// Percentile of `values` with linear interpolation between closest ranks.
///
/// Same definition as the default method of `numpy.percentile`: with the values sorted,
/// the rank is `p / 100 * (n - 1)` and the result is interpolated between the two
/// surrounding values.
///
/// Arguments
/// -----------------
/// * `values`: the sample, in any order
/// * `p`: percentile in `[0, 100]`
///
/// Return
/// ----------
/// * `None` for an empty sample or a percentile outside `[0, 100]`.
pub fn percentile_linear(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let fraction = rank - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction)
}

fn any_flag_in(event: &LocationEvent, flags: &BTreeSet<String>) -> bool {
    event.flags.iter().any(|flag| flags.contains(flag))
}

/// Outcome of a filtering pass.
///
/// A rejected event is counted once, under the first failing test in the order
/// flags, radial distance, active region. So `kept + rejected_* == input`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    pub input: usize,
    pub kept: usize,
    pub rejected_flag: usize,
    pub rejected_radial: usize,
    pub rejected_region: usize,
    /// Radial threshold (arcsec); `None` for an empty input.
    pub radial_threshold: Option<f64>,
}

impl FilterReport {
    pub fn rejected(&self) -> usize {
        self.rejected_flag + self.rejected_radial + self.rejected_region
    }
}

impl fmt::Display for FilterReport {
    /// Compact by default; multi-line when using the alternate flag (`{:#}`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let threshold = self
            .radial_threshold
            .map(|t| format!("{t:.2}"))
            .unwrap_or_else(|| "n/a".to_string());

        if f.alternate() {
            writeln!(f, "Quality filter summary")?;
            writeln!(f, "----------------------")?;
            writeln!(f, "input            : {}", self.input)?;
            writeln!(f, "kept             : {}", self.kept)?;
            writeln!(f, "bad flag         : {}", self.rejected_flag)?;
            writeln!(f, "beyond radial    : {}", self.rejected_radial)?;
            writeln!(f, "unknown region   : {}", self.rejected_region)?;
            write!(f, "radial threshold : {threshold}")
        } else {
            write!(
                f,
                "input={}, kept={}, flag={}, radial={}, region={}, threshold={}",
                self.input,
                self.kept,
                self.rejected_flag,
                self.rejected_radial,
                self.rejected_region,
                threshold
            )
        }
    }
}

/// Filter on flags, radial distance and active region.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityFilter {
    bad_flags: BTreeSet<String>,
    radial_percentile: f64,
}

impl Default for QualityFilter {
    fn default() -> Self {
        QualityFilter {
            bad_flags: DEFAULT_BAD_FLAGS.iter().map(|f| f.to_string()).collect(),
            radial_percentile: DEFAULT_RADIAL_PERCENTILE,
        }
    }
}

impl QualityFilter {
    /// Arguments
    /// -----------------
    /// * `bad_flags`: flag codes that disqualify an event
    /// * `radial_percentile`: percentile of the radial distances used as the cut, in `[0, 100]`
    ///
    /// Return
    /// ----------
    /// * `Err(FlareCatError::InvalidParameter)` if the percentile is out of range.
    pub fn new<I, S>(bad_flags: I, radial_percentile: f64) -> Result<Self, FlareCatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !(0.0..=100.0).contains(&radial_percentile) {
            return Err(FlareCatError::InvalidParameter(format!(
                "radial_percentile must be in [0, 100], got {radial_percentile}"
            )));
        }
        let bad_flags: BTreeSet<String> = bad_flags.into_iter().map(Into::into).collect();
        for flag in bad_flags.iter().filter(|f| describe_flag(f).is_none()) {
            warn!("Bad flag {flag} is not a documented HESSI flag code");
        }
        Ok(QualityFilter {
            bad_flags,
            radial_percentile,
        })
    }

    pub fn bad_flags(&self) -> &BTreeSet<String> {
        &self.bad_flags
    }

    pub fn radial_percentile(&self) -> f64 {
        self.radial_percentile
    }

    pub fn carries_bad_flag(&self, event: &LocationEvent) -> bool {
        any_flag_in(event, &self.bad_flags)
    }

    pub fn within_radial(event: &LocationEvent, threshold: f64) -> bool {
        f64::from(event.radial) <= threshold
    }

    pub fn has_known_region(event: &LocationEvent) -> bool {
        event.active_region > 0
    }

    /// Radial cut for `events`, `None` if there are none.
    pub fn radial_threshold(&self, events: &[LocationEvent]) -> Option<f64> {
        let radials: Vec<f64> = events.iter().map(|e| f64::from(e.radial)).collect();
        percentile_linear(&radials, self.radial_percentile)
    }

    /// Fix the radial cut on `events`.
    pub fn calibrate(&self, events: &[LocationEvent]) -> CalibratedFilter {
        CalibratedFilter {
            bad_flags: self.bad_flags.clone(),
            radial_threshold: self.radial_threshold(events),
        }
    }

    /// Events that pass the three tests, in input order.
    pub fn apply(&self, events: &[LocationEvent]) -> Vec<LocationEvent> {
        self.apply_with_report(events).0
    }

    /// Same as [`apply`](Self::apply), with the [`FilterReport`].
    pub fn apply_with_report(
        &self,
        events: &[LocationEvent],
    ) -> (Vec<LocationEvent>, FilterReport) {
        self.calibrate(events).apply_with_report(events)
    }
}

/// [`QualityFilter`] with its radial cut fixed.
///
/// A calibrated filter with no threshold (calibrated on an empty catalog) keeps nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedFilter {
    bad_flags: BTreeSet<String>,
    radial_threshold: Option<f64>,
}

impl CalibratedFilter {
    pub fn radial_threshold(&self) -> Option<f64> {
        self.radial_threshold
    }

    pub fn apply(&self, events: &[LocationEvent]) -> Vec<LocationEvent> {
        self.apply_with_report(events).0
    }

    pub fn apply_with_report(
        &self,
        events: &[LocationEvent],
    ) -> (Vec<LocationEvent>, FilterReport) {
        let mut report = FilterReport {
            input: events.len(),
            radial_threshold: self.radial_threshold,
            ..FilterReport::default()
        };

        let Some(threshold) = self.radial_threshold else {
            return (Vec::new(), report);
        };

        let kept: Vec<LocationEvent> = events
            .iter()
            .filter(|event| {
                if any_flag_in(event, &self.bad_flags) {
                    report.rejected_flag += 1;
                    false
                } else if !QualityFilter::within_radial(event, threshold) {
                    report.rejected_radial += 1;
                    false
                } else if !QualityFilter::has_known_region(event) {
                    report.rejected_region += 1;
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect();
        report.kept = kept.len();

        info!("Quality filter: {report}");
        (kept, report)
    }
}

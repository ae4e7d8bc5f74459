//! Automatic axis ranges.
//!
//! Ranges are derived from the representative (first) element of a collection
//! when the caller did not set them. The heuristic is specific to binned
//! distributions: the Y range gets 20% headroom away from zero, the X range is
//! cut to the filled bins plus one bin on each side.

use serde::Serialize;

use crate::plottable::{Hist1D, Hist2D, PlotObject};

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl AxisRange {
    /// Range from `low` to `high`, kept as given.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Distance between the bounds, negative when inverted.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

/// Ranges derived for one pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRanges {
    /// X range.
    pub x: AxisRange,
    /// Y range.
    pub y: AxisRange,
    /// Color axis, only for two dimensional distributions.
    pub z: Option<AxisRange>,
}

/// Push the maximum away from zero by 20%.
pub fn headroom_high(max: f64) -> f64 {
    if max > 0.0 { 1.2 * max } else { 0.8 * max }
}

/// Push the minimum away from zero by 20%.
pub fn headroom_low(min: f64) -> f64 {
    if min > 0.0 { 0.8 * min } else { 1.2 * min }
}

/// First bin from the left with content > 0.
pub fn first_filled_bin(hist: &Hist1D) -> Option<usize> {
    hist.contents.iter().position(|&c| c > 0.0)
}

/// First bin from the right with content > 0.
pub fn last_filled_bin(hist: &Hist1D) -> Option<usize> {
    hist.contents.iter().rposition(|&c| c > 0.0)
}

/// Ranges for a one dimensional distribution.
pub fn hist1d_ranges(hist: &Hist1D) -> AutoRanges {
    let y = AxisRange::new(headroom_low(hist.minimum()), headroom_high(hist.maximum()));

    let x = match (first_filled_bin(hist), last_filled_bin(hist)) {
        (Some(first), Some(last)) => AxisRange::new(
            hist.axis.center(first as isize - 1),
            hist.axis.center(last as isize + 1),
        ),
        _ => AxisRange::new(hist.axis.low, hist.axis.high),
    };

    AutoRanges { x, y, z: None }
}

/// Ranges for a two dimensional distribution: full X and Y axes, color axis
/// from the content extrema with the same headroom as the Y heuristic.
pub fn hist2d_ranges(hist: &Hist2D) -> AutoRanges {
    AutoRanges {
        x: AxisRange::new(hist.x_axis.low, hist.x_axis.high),
        y: AxisRange::new(hist.y_axis.low, hist.y_axis.high),
        z: Some(AxisRange::new(
            headroom_low(hist.minimum()),
            headroom_high(hist.maximum()),
        )),
    }
}

/// Ranges derived from a representative element, `None` when the kind has
/// no automatic range.
// TODO: derive ranges for curves and point-sets from their sampled values
pub fn auto_range(first: &PlotObject) -> Option<AutoRanges> {
    match first {
        PlotObject::Hist1D(h) => Some(hist1d_ranges(&h.borrow())),
        PlotObject::Hist2D(h) => Some(hist2d_ranges(&h.borrow())),
        _ => None,
    }
}

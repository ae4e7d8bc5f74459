//! Ratio-only layout: one collection plus a reference line at one.

use crate::canvas::{Canvas, Margins, Pad};
use crate::color;
use crate::plot::{PlotBase, PlotLayout};
use crate::plottable::{PlotArray, RefLine, Shared, shared};
use crate::range::AxisRange;
use crate::style::{LineAttributes, LineStyle};

/// Appearance forced onto the unity line after style resolution.
pub const UNITY_LINE: LineAttributes = LineAttributes {
    color: color::BLACK,
    style: LineStyle::LongDashed,
    width: 3.0,
};

/// Append the unity line to `array` and point it across `x`.
///
/// The line is capped at `upper` when given. Returns the extended copy; the
/// caller's collection is never modified.
pub(crate) fn append_unity_line(
    array: &PlotArray,
    line: &Shared<RefLine>,
    x: AxisRange,
    upper: Option<f64>,
) -> PlotArray {
    *line.borrow_mut() = RefLine::horizontal(1.0, x.low, upper.unwrap_or(x.high));
    let mut extended = array.clone();
    extended.push(line);
    extended
}

/// One collection of ratios in a wide pad.
#[derive(Debug, Clone)]
pub struct RatioPlot {
    base: PlotBase,
    array: PlotArray,
    unity_line: Shared<RefLine>,
    draw_unity_line: bool,
    upper_one_limit: Option<f64>,
}

impl RatioPlot {
    /// Ratio layout of `array`; element 0 carries the axes.
    pub fn new(array: PlotArray, x_title: &str, y_title: &str) -> Self {
        let mut base = PlotBase::new(x_title, y_title, array.len());
        base.ensure_axes(array.first(), "Plot array");
        base.set_canvas_dimensions(1000, 600);
        base.set_canvas_margins(Margins::new(0.15, 0.07, 0.07, 0.25));
        base.set_canvas_offsets(1.0, 0.8);
        Self {
            base,
            array,
            unity_line: shared(RefLine::horizontal(1.0, 0.0, 1.0)),
            draw_unity_line: true,
            upper_one_limit: None,
        }
    }

    /// End the unity line at `x` instead of the upper X range.
    pub fn with_upper_one_limit(mut self, x: f64) -> Self {
        self.upper_one_limit = Some(x);
        self
    }

    /// Draw the reference line at one; on by default.
    pub fn with_unity_line(mut self, enabled: bool) -> Self {
        self.draw_unity_line = enabled;
        self
    }

    /// The collection being drawn.
    pub fn array(&self) -> &PlotArray {
        &self.array
    }

    /// The engine-owned reference line.
    pub fn unity_line(&self) -> &Shared<RefLine> {
        &self.unity_line
    }
}

impl PlotLayout for RatioPlot {
    fn base(&self) -> &PlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotBase {
        &mut self.base
    }

    fn layout_name(&self) -> &'static str {
        "Ratio"
    }

    fn compose(&mut self) -> Canvas {
        let ranges = self.base.resolve_ranges(self.array.first());
        let mut canvas = self.base.new_canvas("RATIO");

        let mut pad = Pad::full("pad");
        let (x_title, y_title) = (self.base.x_title.clone(), self.base.y_title.clone());
        let palette = self.base.palette_colors();
        self.base
            .set_up_pad(&mut pad, ranges, &x_title, &y_title, true, &palette);

        let offset = self.base.style_offset;
        if self.draw_unity_line {
            let array =
                append_unity_line(&self.array, &self.unity_line, ranges.x, self.upper_one_limit);
            self.base.options.ensure_len(array.len());
            self.base.draw_array(&mut pad, &array, offset, 0);
            self.unity_line.borrow_mut().line = UNITY_LINE;
        } else {
            self.base.draw_array(&mut pad, &self.array, offset, 0);
        }

        canvas.add_pad(pad);
        canvas
    }
}

//! Dual-pad layout: a main pad on top of a ratio pad sharing the X axis.

use crate::canvas::{Canvas, Margins, Pad};
use crate::plot::ratio::{UNITY_LINE, append_unity_line};
use crate::plot::{PlotBase, PlotLayout, ResolvedRanges};
use crate::plottable::{PlotArray, RefLine, Shared, shared};
use crate::range::{AxisRange, auto_range};

/// Ratio range used until one is set.
pub const DEFAULT_RATIO_RANGE: AxisRange = AxisRange::new(0.8, 1.2);

/// Default share of the canvas height taken by the ratio pad.
pub const DEFAULT_PAD_FRACTION: f64 = 0.3;

/// Distribution pad with a ratio pad below it.
///
/// The ratio collection continues the style table after the main
/// collection unless its offset is set explicitly, so a ratio can reuse the
/// color of the curve it was computed from.
#[derive(Debug, Clone)]
pub struct SingleRatioPlot {
    base: PlotBase,
    main: PlotArray,
    ratio: PlotArray,
    ratio_title: String,
    ratio_range: AxisRange,
    pad_fraction: f64,
    ratio_offset: Option<usize>,
    unity_line: Shared<RefLine>,
    upper_one_limit: Option<f64>,
}

impl SingleRatioPlot {
    /// Main collection `main` over ratio collection `ratio`. The ratio pad
    /// shares the X axis and carries `x_title`; `ratio_title` labels its Y axis.
    pub fn new(
        main: PlotArray,
        ratio: PlotArray,
        x_title: &str,
        y_title: &str,
        ratio_title: &str,
    ) -> Self {
        let mut base = PlotBase::new(x_title, y_title, main.len() + ratio.len());
        base.ensure_axes(main.first(), "Main Array");
        base.ensure_axes(ratio.first(), "Ratio Array");
        base.set_canvas_dimensions(1000, 1200);
        base.set_canvas_margins(Margins::new(0.15, 0.07, 0.07, 0.4));
        base.set_canvas_offsets(4.5, 1.7);
        Self {
            base,
            main,
            ratio,
            ratio_title: ratio_title.to_string(),
            ratio_range: DEFAULT_RATIO_RANGE,
            pad_fraction: DEFAULT_PAD_FRACTION,
            ratio_offset: None,
            unity_line: shared(RefLine::horizontal(1.0, 0.0, 1.0)),
            upper_one_limit: None,
        }
    }

    /// Share of the canvas height given to the ratio pad.
    pub fn with_pad_fraction(mut self, fraction: f64) -> Self {
        if fraction > 0.0 && fraction < 1.0 {
            self.pad_fraction = fraction;
        } else {
            self.base
                .diagnostics
                .warn(format!("Pad fraction {fraction} outside (0, 1), keeping {}", self.pad_fraction));
        }
        self
    }

    /// Style offsets of the main and the ratio collection.
    pub fn with_offsets(mut self, main: usize, ratio: usize) -> Self {
        self.base.set_offset(main);
        self.ratio_offset = Some(ratio);
        self
    }

    /// Fix X, main Y and ratio ranges.
    pub fn with_ratio_ranges(
        mut self,
        x_low: f64,
        x_high: f64,
        y_low: f64,
        y_high: f64,
        r_low: f64,
        r_high: f64,
    ) -> Self {
        self.base.set_ranges(x_low, x_high, y_low, y_high);
        self.ratio_range = AxisRange::new(r_low, r_high);
        self
    }

    /// End the unity line at `x` instead of the upper X range.
    pub fn with_upper_one_limit(mut self, x: f64) -> Self {
        self.upper_one_limit = Some(x);
        self
    }

    /// Set options of both collections at once.
    ///
    /// `options` and `positions` each hold a main part and a ratio part
    /// separated by `;`. Ratio positions count from the first ratio element.
    pub fn with_split_options(mut self, options: &str, positions: &str) -> Self {
        let (main_options, ratio_options) = options.split_once(';').unwrap_or((options, ""));
        let (main_positions, ratio_positions) =
            positions.split_once(';').unwrap_or((positions, ""));
        let ratio_start = self.main.len();
        self.base.set_options_at(main_options, main_positions, 0);
        self.base
            .set_options_at(ratio_options, ratio_positions, ratio_start);
        self
    }

    /// Style index of the first ratio element.
    pub fn ratio_offset(&self) -> usize {
        self.ratio_offset.unwrap_or(self.main.len())
    }

    /// Share of the canvas height given to the ratio pad.
    pub fn pad_fraction(&self) -> f64 {
        self.pad_fraction
    }

    /// The engine-owned reference line of the ratio pad.
    pub fn unity_line(&self) -> &Shared<RefLine> {
        &self.unity_line
    }

    fn ratio_ranges(&self, main: ResolvedRanges) -> ResolvedRanges {
        let y = if self.base.manual_ranges {
            self.ratio_range
        } else {
            self.ratio
                .first()
                .and_then(auto_range)
                .map_or(self.ratio_range, |auto| auto.y)
        };
        ResolvedRanges {
            x: main.x,
            y,
            z: None,
        }
    }
}

impl PlotLayout for SingleRatioPlot {
    fn base(&self) -> &PlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotBase {
        &mut self.base
    }

    fn layout_name(&self) -> &'static str {
        "Single Ratio"
    }

    fn compose(&mut self) -> Canvas {
        let main_ranges = self.base.resolve_ranges(self.main.first());
        let ratio_ranges = self.ratio_ranges(main_ranges);
        let mut canvas = self.base.new_canvas("SINGLE RATIO");
        let y_title = self.base.y_title.clone();
        let x_title = self.base.x_title.clone();

        let palette = self.base.palette_colors();

        let mut main_pad = Pad::new("mainPad", 0.0, self.pad_fraction, 1.0, 1.0);
        self.base
            .set_up_pad(&mut main_pad, main_ranges, "", &y_title, true, &palette);
        main_pad.margins.bottom = 0.0;
        if let Some(frame) = main_pad.frame_mut() {
            let background = canvas.background;
            frame.x_axis.hide_labels(background);
        }

        let mut ratio_pad = Pad::new("ratioPad", 0.0, 0.0, 1.0, self.pad_fraction);
        let ratio_title = self.ratio_title.clone();
        self.base.set_up_pad(
            &mut ratio_pad,
            ratio_ranges,
            &x_title,
            &ratio_title,
            false,
            &palette,
        );
        ratio_pad.margins.top = 0.0;

        let main_offset = self.base.style_offset;
        self.base.draw_array(&mut main_pad, &self.main, main_offset, 0);

        let ratio = append_unity_line(
            &self.ratio,
            &self.unity_line,
            ratio_ranges.x,
            self.upper_one_limit,
        );
        let option_offset = self.main.len();
        self.base.options.ensure_len(option_offset + ratio.len());
        let ratio_offset = self.ratio_offset();
        self.base
            .draw_array(&mut ratio_pad, &ratio, ratio_offset, option_offset);
        self.unity_line.borrow_mut().line = UNITY_LINE;

        canvas.add_pad(main_pad);
        canvas.add_pad(ratio_pad);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, GREEN, RED, YELLOW};
    use crate::plottable::{Hist1D, PointMarker};
    use crate::resolver::StyleOutcome;
    use crate::style::MarkerShape;
    use approx_eq::assert_approx_eq;

    fn arrays() -> (PlotArray, PlotArray) {
        let a = shared(Hist1D::from_contents("a", 0.0, 4.0, vec![0.0, 5.0, 10.0, 0.0]));
        let b = shared(Hist1D::from_contents("b", 0.0, 4.0, vec![0.0, 4.0, 11.0, 0.0]));
        let r = shared(Hist1D::from_contents("r", 0.0, 4.0, vec![0.0, 1.25, 0.9, 0.0]));
        let mut main = PlotArray::new();
        main.push(a).push(b);
        let mut ratio = PlotArray::new();
        ratio.push(r);
        (main, ratio)
    }

    fn styled(plot: SingleRatioPlot) -> SingleRatioPlot {
        plot.with_style(
            vec![RED, BLUE, GREEN, YELLOW],
            vec![MarkerShape::FullCircle; 4],
            vec![],
            vec![],
            vec![],
        )
    }

    #[test]
    fn test_defaults() {
        let (main, ratio) = arrays();
        let plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio");
        assert_eq!(plot.base().dimensions(), (1000, 1200));
        assert_eq!(plot.base().margins(), Margins::new(0.15, 0.07, 0.07, 0.4));
        assert_eq!(plot.base().offsets().x, 4.5);
        assert_eq!(plot.base().options().len(), 3);
        assert_eq!(plot.pad_fraction(), 0.3);
        assert_eq!(plot.ratio_offset(), 2);
    }

    #[test]
    fn test_ratio_indices_continue_main_collection() {
        let (main, ratio) = arrays();
        let mut plot = styled(SingleRatioPlot::new(main, ratio, "x", "y", "ratio"));
        let canvas = plot.render().unwrap();

        let ratio_pad = canvas.pad("ratioPad").unwrap();
        let indices: Vec<_> = ratio_pad
            .primitives
            .iter()
            .map(|p| p.style.first_index())
            .collect();
        assert_eq!(indices, vec![Some(2), Some(3)]);
        assert_eq!(plot.unity_line().borrow().line, UNITY_LINE);
    }

    #[test]
    fn test_explicit_ratio_offset_reuses_main_style() {
        let (main, ratio) = arrays();
        let mut plot = styled(SingleRatioPlot::new(main, ratio, "x", "y", "ratio")).with_offsets(0, 0);
        let canvas = plot.render().unwrap();
        let ratio_pad = canvas.pad("ratioPad").unwrap();
        assert_eq!(
            ratio_pad.primitives[0].style,
            StyleOutcome::Applied { first: 0, count: 1 }
        );
    }

    #[test]
    fn test_pads_merge_and_share_x() {
        let (main, ratio) = arrays();
        let mut plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio");
        let canvas = plot.render().unwrap();

        let main_pad = canvas.pad("mainPad").unwrap();
        let ratio_pad = canvas.pad("ratioPad").unwrap();
        assert_eq!(main_pad.margins.bottom, 0.0);
        assert_eq!(ratio_pad.margins.top, 0.0);
        assert_approx_eq!(main_pad.y1, 0.3, 1e-12);
        assert_approx_eq!(ratio_pad.y2, 0.3, 1e-12);

        let main_frame = main_pad.frame.as_ref().unwrap();
        let ratio_frame = ratio_pad.frame.as_ref().unwrap();
        assert_eq!(main_frame.x_range, ratio_frame.x_range);
        assert_eq!(main_frame.x_axis.label_size, 0.0);
        assert_eq!(ratio_frame.x_axis.title, "x");
        assert_eq!(ratio_frame.y_axis.title, "ratio");
        // ratio Y from the ratio element: 1.25 * 1.2
        assert_approx_eq!(ratio_frame.y_range.high, 1.5, 1e-9);
    }

    #[test]
    fn test_manual_ranges_use_ratio_range() {
        let (main, ratio) = arrays();
        let mut plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio")
            .with_ratio_ranges(0.0, 4.0, 0.0, 20.0, 0.5, 1.5);
        let canvas = plot.render().unwrap();
        let frame = canvas.pad("ratioPad").unwrap().frame.as_ref().unwrap();
        assert_eq!(frame.y_range, AxisRange::new(0.5, 1.5));
        assert_eq!(frame.x_range, AxisRange::new(0.0, 4.0));
    }

    #[test]
    fn test_split_options() {
        let (main, ratio) = arrays();
        let mut plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio")
            .with_split_options("SAME HIST\n;SAME P", "1;0");
        let canvas = plot.render().unwrap();
        assert_eq!(canvas.pad("mainPad").unwrap().primitives[1].option, "SAME HIST");
        assert_eq!(canvas.pad("ratioPad").unwrap().primitives[0].option, "SAME P");
    }

    #[test]
    fn test_broken_ratio_array() {
        let (main, _) = arrays();
        let mut ratio = PlotArray::new();
        ratio.push(shared(PointMarker::new(0.0, 1.0)));
        let mut plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio");
        assert!(plot.is_broken());
        assert!(plot.diagnostics().contains("Ratio Array"));
        assert!(plot.render().is_none());
    }

    #[test]
    fn test_pad_fraction_validation() {
        let (main, ratio) = arrays();
        let plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio")
            .with_pad_fraction(1.5)
            .with_pad_fraction(0.25);
        assert_eq!(plot.pad_fraction(), 0.25);
        assert_eq!(plot.diagnostics().len(), 1);
    }

    #[test]
    fn test_unknown_palette_reported_once_for_both_pads() {
        let (main, ratio) = arrays();
        let mut plot = SingleRatioPlot::new(main, ratio, "x", "y", "ratio").with_palette(4242);
        let canvas = plot.render().unwrap();

        let warnings = plot
            .diagnostics()
            .entries()
            .iter()
            .filter(|d| d.message.contains("Unknown palette 4242"))
            .count();
        assert_eq!(warnings, 1);
        let main_palette = &canvas.pad("mainPad").unwrap().palette;
        assert!(!main_palette.is_empty());
        assert_eq!(main_palette, &canvas.pad("ratioPad").unwrap().palette);
    }
}

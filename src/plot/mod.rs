//! Layout engine and draw orchestration shared by every layout.
//!
//! A layout goes through three states. It is *configured* through the
//! `with_*` builders of [`PlotLayout`], *rendered* into a retained
//! [`Canvas`] and finally *drawn*, i.e. saved to a file. Precondition
//! failures found at construction mark the layout broken; a broken layout
//! renders nothing and drawing it is a no-op that reports once.
//!
//! ```no_run
//! use padplot::{Hist1D, PlotArray, PlotLayout, SquarePlot, shared};
//!
//! let hist = shared(Hist1D::from_contents("data", 0.0, 4.0, vec![1.0, 4.0, 2.0, 0.0]));
//! let mut array = PlotArray::new();
//! array.push(&hist);
//!
//! let mut plot = SquarePlot::new(array, "x", "entries").with_options_all("SAME HIST");
//! plot.draw("plots/square.svg")?;
//! # Ok::<(), padplot::PlotError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::canvas::{AxisStyle, Canvas, Frame, Margins, Pad};
use crate::color::{self, Color, ColorGradient};
use crate::diagnostics::Diagnostics;
use crate::error::PlotResult;
use crate::options::{DEFAULT_OPTION, DrawOptions};
use crate::plottable::{Hist1D, PlotArray, PlotObject, Shared};
use crate::range::{AxisRange, auto_range};
use crate::resolver::resolve_style;
use crate::style::{LineStyle, MarkerShape, Mode, Palette, StyleContext};

pub mod dual;
pub mod heatmap;
pub mod ratio;
pub mod square;

pub use dual::SingleRatioPlot;
pub use heatmap::HeatmapPlot;
pub use ratio::RatioPlot;
pub use square::SquarePlot;

/// Range used for an axis until it is set or derived.
pub const DEFAULT_RANGE: AxisRange = AxisRange::new(0.0, 100.0);

/// Canvas axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
    /// Color axis
    Z,
}

/// Result of a draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The layout is broken and nothing was written.
    Skipped,
    /// The canvas was written.
    Drawn {
        /// Output file.
        path: PathBuf,
    },
}

/// Distance multipliers of the axis titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleOffsets {
    /// X title multiplier.
    pub x: f64,
    /// Y title multiplier.
    pub y: f64,
    /// Color axis title multiplier.
    pub z: f64,
}

impl Default for TitleOffsets {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

/// Ranges a pad ends up with after manual settings and auto-ranging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRanges {
    /// X range.
    pub x: AxisRange,
    /// Y range.
    pub y: AxisRange,
    /// Color axis range, derived only for two dimensional distributions.
    pub z: Option<AxisRange>,
}

/// Configuration and state shared by every layout.
#[derive(Debug, Clone)]
pub struct PlotBase {
    pub(crate) x_title: String,
    pub(crate) y_title: String,
    pub(crate) z_title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) margins: Margins,
    pub(crate) offsets: TitleOffsets,
    pub(crate) log_x: bool,
    pub(crate) log_y: bool,
    pub(crate) log_z: bool,
    pub(crate) x_range: AxisRange,
    pub(crate) y_range: AxisRange,
    pub(crate) z_range: Option<AxisRange>,
    /// Set once ranges were given explicitly; disables auto-ranging.
    pub(crate) manual_ranges: bool,
    pub(crate) options: DrawOptions,
    pub(crate) style: Arc<StyleContext>,
    /// Shift applied to every style table index of the main collection.
    pub(crate) style_offset: usize,
    pub(crate) diagnostics: Diagnostics,
    broken: bool,
}

impl PlotBase {
    /// Base state with `positions` draw options, all set to the default.
    pub fn new(x_title: &str, y_title: &str, positions: usize) -> Self {
        Self {
            x_title: x_title.to_string(),
            y_title: y_title.to_string(),
            z_title: String::new(),
            width: 1000,
            height: 1000,
            margins: Margins::default(),
            offsets: TitleOffsets::default(),
            log_x: false,
            log_y: false,
            log_z: false,
            x_range: DEFAULT_RANGE,
            y_range: DEFAULT_RANGE,
            z_range: None,
            manual_ranges: false,
            options: DrawOptions::filled(positions, DEFAULT_OPTION),
            style: StyleContext::shared(),
            style_offset: 0,
            diagnostics: Diagnostics::new(),
            broken: false,
        }
    }

    /// Whether a precondition failed; broken layouts draw nothing.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Mark the layout broken. There is no way back.
    pub fn mark_broken(&mut self, message: impl Into<String>) {
        self.diagnostics.fatal(message);
        self.broken = true;
    }

    /// Problems collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Style context in effect.
    pub fn style(&self) -> &StyleContext {
        &self.style
    }

    /// Draw option table.
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// X range as configured.
    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    /// Y range as configured.
    pub fn y_range(&self) -> AxisRange {
        self.y_range
    }

    /// Canvas size in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Frame margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Axis title offsets.
    pub fn offsets(&self) -> TitleOffsets {
        self.offsets
    }

    /// Check that a collection can carry the axes of a pad.
    ///
    /// Returns false and marks the layout broken when the representative
    /// element is missing or has no axes.
    pub fn ensure_axes(&mut self, first: Option<&PlotObject>, array_name: &str) -> bool {
        match first {
            None => {
                self.mark_broken(format!("{array_name}: first element does not exist"));
                false
            }
            Some(object) if !object.has_axes() => {
                self.mark_broken(format!(
                    "{array_name}: first element of class {} has no axes",
                    object.class_name()
                ));
                false
            }
            Some(_) => true,
        }
    }

    /// Canvas size in pixels.
    pub fn set_canvas_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Frame margins as fractions of the pad size.
    pub fn set_canvas_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    /// Title distance multipliers of the X and Y axes.
    pub fn set_canvas_offsets(&mut self, x: f64, y: f64) {
        self.offsets.x = x;
        self.offsets.y = y;
    }

    /// Request a log scale; applied at pad setup if the range allows it.
    pub fn set_log(&mut self, axis: Axis, enabled: bool) {
        match axis {
            Axis::X => self.log_x = enabled,
            Axis::Y => self.log_y = enabled,
            Axis::Z => self.log_z = enabled,
        }
    }

    /// Fix the X and Y ranges; auto-ranging is disabled from now on.
    pub fn set_ranges(&mut self, x_low: f64, x_high: f64, y_low: f64, y_high: f64) {
        self.x_range = AxisRange::new(x_low, x_high);
        self.y_range = AxisRange::new(y_low, y_high);
        self.manual_ranges = true;
    }

    /// Shift the style table index of every element of the main collection.
    pub fn set_offset(&mut self, offset: usize) {
        self.style_offset = offset;
    }

    /// Replace the style sequences of this layout's context.
    pub fn set_style(
        &mut self,
        colors: Vec<Color>,
        markers: Vec<MarkerShape>,
        sizes: Vec<f64>,
        line_styles: Vec<LineStyle>,
        line_widths: Vec<f64>,
    ) {
        Arc::make_mut(&mut self.style).set_style(colors, markers, sizes, line_styles, line_widths);
    }

    /// Apply the label size preset of `mode`.
    pub fn set_mode(&mut self, mode: Mode) {
        Arc::make_mut(&mut self.style).set_mode(mode);
    }

    /// Select a builtin palette by id.
    pub fn set_palette(&mut self, id: i32) {
        let style = Arc::make_mut(&mut self.style);
        let inverted = style.palette.inverted;
        style.palette.select(Palette::Builtin(id), inverted);
    }

    /// Use a custom gradient as palette.
    pub fn set_gradient(&mut self, gradient: ColorGradient, invert: bool) {
        Arc::make_mut(&mut self.style)
            .palette
            .select(Palette::Gradient(gradient), invert);
    }

    /// Replace the style context.
    pub fn set_context(&mut self, context: Arc<StyleContext>) {
        self.style = context;
    }

    /// Give every position `option`.
    pub fn set_options_all(&mut self, option: &str) {
        self.options.set_all(option);
    }

    /// Replace the option table.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options.set_options(options);
    }

    /// Set the option at `position`; out-of-range positions are reported.
    pub fn set_option(&mut self, option: &str, position: usize) {
        self.options.set_option(option, position, &mut self.diagnostics);
    }

    /// One option per line of `options` for the whitespace separated `positions`, each shifted by `offset`.
    pub fn set_options_at(&mut self, options: &str, positions: &str, offset: usize) {
        self.options
            .set_options_at(options, positions, offset, &mut self.diagnostics);
    }

    /// Zero the bins of `hist` whose error exceeds `factor` times their content.
    pub fn clean_up_histogram(&mut self, hist: &Shared<Hist1D>, factor: f64) -> usize {
        let mut hist = hist.borrow_mut();
        let cleared = hist.clean_up(factor);
        if cleared > 0 {
            self.diagnostics
                .info(format!("Cleaned {cleared} bins of {}", hist.name));
        }
        cleared
    }

    /// Ranges for a pad whose representative element is `first`.
    ///
    /// Manual ranges win. Otherwise the ranges are derived from `first`;
    /// kinds without a heuristic keep the configured values.
    pub fn resolve_ranges(&self, first: Option<&PlotObject>) -> ResolvedRanges {
        let manual = ResolvedRanges {
            x: self.x_range,
            y: self.y_range,
            z: self.z_range,
        };
        if self.manual_ranges {
            return manual;
        }
        match first.and_then(auto_range) {
            Some(auto) => {
                tracing::debug!(x = ?auto.x, y = ?auto.y, "auto ranges");
                ResolvedRanges {
                    x: auto.x,
                    y: auto.y,
                    z: self.z_range.or(auto.z),
                }
            }
            None => manual,
        }
    }

    /// Effective palette colors; unknown builtin ids fall back to the default.
    pub fn palette_colors(&mut self) -> Vec<Color> {
        if let Some(colors) = self.style.palette.colors() {
            return colors;
        }
        if let Palette::Builtin(id) = self.style.palette.palette {
            self.diagnostics.warn(format!(
                "Unknown palette {id}, using {}",
                color::DEFAULT_PALETTE_ID
            ));
        }
        color::builtin_palette(color::DEFAULT_PALETTE_ID)
            .map(|g| g.colors().to_vec())
            .unwrap_or_default()
    }

    fn log_guard(&mut self, axis: &str, requested: bool, range: AxisRange) -> bool {
        if !requested {
            return false;
        }
        if range.low > 0.0 {
            return true;
        }
        self.diagnostics.warn(format!(
            "Log scale on {axis} requested but the lower bound {} is not positive, keeping it linear",
            range.low
        ));
        false
    }

    fn axis_style(&self, title: &str, offset: f64) -> AxisStyle {
        AxisStyle::titled(title, offset, &self.style.font, self.style.label_size)
    }

    /// Prepare a pad: transparent fill, margins, ticks on all sides, frame
    /// with titles and the resolved ranges, log scales where allowed and
    /// `palette`, which the caller resolves once per canvas with
    /// [`PlotBase::palette_colors`].
    pub fn set_up_pad(
        &mut self,
        pad: &mut Pad,
        ranges: ResolvedRanges,
        x_title: &str,
        y_title: &str,
        log_y_allowed: bool,
        palette: &[Color],
    ) {
        pad.transparent = true;
        pad.margins = self.margins;
        pad.ticks_x = true;
        pad.ticks_y = true;

        let mut frame = Frame::new(ranges.x, ranges.y);
        frame.x_axis = self.axis_style(x_title, self.offsets.x);
        frame.y_axis = self.axis_style(y_title, self.offsets.y);
        frame.x_axis.log = self.log_guard("X", self.log_x, ranges.x);
        frame.y_axis.log = self.log_guard("Y", self.log_y && log_y_allowed, ranges.y);

        if let Some(z) = ranges.z {
            let mut z_axis = self.axis_style(&self.z_title, self.offsets.z);
            z_axis.log = self.log_guard("Z", self.log_z, z);
            frame.z_range = Some(z);
            frame.z_axis = Some(z_axis);
        }

        pad.frame = Some(frame);
        pad.palette = palette.to_vec();
    }

    /// Canvas sized for this layout.
    pub fn new_canvas(&self, title: &str) -> Canvas {
        Canvas::new("canvas", title, self.width, self.height)
    }

    /// Draw every element of `array` into `pad`.
    ///
    /// Position `p` uses draw option `p + option_offset` and style index
    /// `p + index_offset`. Empty slots are reported and skipped. Elements are
    /// drawn in order, later ones on top.
    pub fn draw_array(
        &mut self,
        pad: &mut Pad,
        array: &PlotArray,
        index_offset: usize,
        option_offset: usize,
    ) {
        for (position, entry) in array.iter().enumerate() {
            let Some(object) = entry else {
                self.diagnostics.error(format!(
                    "Plot object No {position} is broken! Will be skipped."
                ));
                continue;
            };

            let option =
                self.options
                    .resolve(position + option_offset, object.kind(), &mut self.diagnostics);
            let style = resolve_style(
                object,
                position + index_offset,
                &self.style,
                &mut self.diagnostics,
            );
            tracing::debug!(
                position,
                class = %object.class_name(),
                option = %option,
                ?style,
                "draw"
            );
            pad.draw(object.clone(), option, style);
        }
    }
}

/// Behaviour shared by the layout variants.
pub trait PlotLayout {
    /// Shared state.
    fn base(&self) -> &PlotBase;

    /// Mutable shared state.
    fn base_mut(&mut self) -> &mut PlotBase;

    /// Name printed in the draw banner.
    fn layout_name(&self) -> &'static str;

    /// Build the canvas of a layout that is known not to be broken.
    fn compose(&mut self) -> Canvas;

    /// Build the canvas, `None` if the layout is broken.
    fn render(&mut self) -> Option<Canvas> {
        let name = self.layout_name();
        tracing::info!("Plot {name} Canvas");
        if self.base().is_broken() {
            self.base_mut()
                .diagnostics
                .error(format!("{name}: due to one or more fatal errors the plot will not be drawn"));
            return None;
        }
        Some(self.compose())
    }

    /// Render and save to `path`; the extension picks the format.
    fn draw(&mut self, path: impl AsRef<Path>) -> PlotResult<DrawOutcome>
    where
        Self: Sized,
    {
        let Some(canvas) = self.render() else {
            return Ok(DrawOutcome::Skipped);
        };
        let path = path.as_ref();
        canvas.save(path)?;
        Ok(DrawOutcome::Drawn {
            path: path.to_path_buf(),
        })
    }

    /// Whether drawing is a no-op.
    fn is_broken(&self) -> bool {
        self.base().is_broken()
    }

    /// Problems collected so far.
    fn diagnostics(&self) -> &Diagnostics {
        self.base().diagnostics()
    }

    /// See [`PlotBase::set_canvas_dimensions`].
    fn with_canvas_dimensions(mut self, width: u32, height: u32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_canvas_dimensions(width, height);
        self
    }

    /// Frame margins.
    fn with_canvas_margins(mut self, margins: Margins) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_canvas_margins(margins);
        self
    }

    /// Title distance multipliers of the X and Y axes.
    fn with_canvas_offsets(mut self, x: f64, y: f64) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_canvas_offsets(x, y);
        self
    }

    /// See [`PlotBase::set_log`].
    fn with_log(mut self, axis: Axis, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_log(axis, enabled);
        self
    }

    /// See [`PlotBase::set_ranges`].
    fn with_ranges(mut self, x_low: f64, x_high: f64, y_low: f64, y_high: f64) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_ranges(x_low, x_high, y_low, y_high);
        self
    }

    /// Shift the style table index of every element.
    fn with_offset(mut self, offset: usize) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_offset(offset);
        self
    }

    /// Replace the style sequences. Empty sequences fall back to defaults.
    fn with_style(
        mut self,
        colors: Vec<Color>,
        markers: Vec<MarkerShape>,
        sizes: Vec<f64>,
        line_styles: Vec<LineStyle>,
        line_widths: Vec<f64>,
    ) -> Self
    where
        Self: Sized,
    {
        self.base_mut()
            .set_style(colors, markers, sizes, line_styles, line_widths);
        self
    }

    /// Label size preset.
    fn with_mode(mut self, mode: Mode) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_mode(mode);
        self
    }

    /// Select builtin palette `id`; unknown ids fall back to the default palette when drawn.
    fn with_palette(mut self, id: i32) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_palette(id);
        self
    }

    /// Use `gradient` as palette, optionally inverted.
    fn with_gradient(mut self, gradient: ColorGradient, invert: bool) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_gradient(gradient, invert);
        self
    }

    /// Use `context` instead of the shared default.
    fn with_context(mut self, context: Arc<StyleContext>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_context(context);
        self
    }

    /// Give every position `option`.
    fn with_options_all(mut self, option: &str) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_options_all(option);
        self
    }

    /// Replace the option table; legends and annotations occupy positions too.
    fn with_options(mut self, options: Vec<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_options(options);
        self
    }

    /// Set the option at `position`.
    fn with_option(mut self, option: &str, position: usize) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_option(option, position);
        self
    }

    /// One option per line of `options` for the positions listed in `positions`.
    fn with_options_at(mut self, options: &str, positions: &str) -> Self
    where
        Self: Sized,
    {
        self.base_mut().set_options_at(options, positions, 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::plottable::{Graph, PointMarker, shared};
    use crate::resolver::StyleOutcome;

    #[test]
    fn test_ensure_axes() {
        let mut base = PlotBase::new("x", "y", 1);
        let graph = PlotObject::from(shared(Graph::new("g", vec![1.0], vec![1.0])));
        assert!(base.ensure_axes(Some(&graph), "Plot array"));
        assert!(!base.is_broken());

        let marker = PlotObject::from(shared(PointMarker::new(0.0, 0.0)));
        assert!(!base.ensure_axes(Some(&marker), "Plot array"));
        assert!(base.is_broken());
        assert!(base.diagnostics().contains("class PointMarker has no axes"));

        // monotonic
        base.set_ranges(0.0, 1.0, 0.0, 1.0);
        assert!(base.ensure_axes(Some(&graph), "Plot array"));
        assert!(base.is_broken());
    }

    #[test]
    fn test_missing_first_element_breaks() {
        let mut base = PlotBase::new("x", "y", 0);
        assert!(!base.ensure_axes(None, "Ratio Array"));
        assert!(base.is_broken());
        assert!(base.diagnostics().contains("Ratio Array"));
    }

    #[test]
    fn test_manual_ranges_are_idempotent() {
        let hist = PlotObject::from(shared(Hist1D::from_contents("h", 0.0, 2.0, vec![5.0, 1.0])));
        let mut base = PlotBase::new("x", "y", 1);
        base.set_ranges(-1.0, 3.0, 0.0, 10.0);
        let first = base.resolve_ranges(Some(&hist));
        base.set_ranges(-1.0, 3.0, 0.0, 10.0);
        assert_eq!(base.resolve_ranges(Some(&hist)), first);
        assert_eq!(first.x, AxisRange::new(-1.0, 3.0));
    }

    #[test]
    fn test_auto_ranges_keep_defaults_for_point_sets() {
        let graph = PlotObject::from(shared(Graph::new("g", vec![1.0], vec![1.0])));
        let base = PlotBase::new("x", "y", 1);
        let ranges = base.resolve_ranges(Some(&graph));
        assert_eq!(ranges.x, DEFAULT_RANGE);
        assert_eq!(ranges.y, DEFAULT_RANGE);
    }

    #[test]
    fn test_log_scale_needs_positive_low_bound() {
        let mut base = PlotBase::new("x", "y", 1);
        base.set_log(Axis::X, true);
        base.set_log(Axis::Y, true);
        let ranges = ResolvedRanges {
            x: AxisRange::new(0.0, 10.0),
            y: AxisRange::new(1.0, 10.0),
            z: None,
        };

        let mut pad = Pad::full("p");
        base.set_up_pad(&mut pad, ranges, "x", "y", true, &[]);

        assert!(!pad.is_log_x());
        assert!(pad.is_log_y());
        assert!(pad.transparent && pad.ticks_x && pad.ticks_y);
        assert!(base.diagnostics().contains("Log scale on X"));
    }

    #[test]
    fn test_draw_array_skips_null_entries() {
        let h = shared(Hist1D::new("h", "", 2, 0.0, 1.0));
        let mut array = PlotArray::new();
        array.push_null().push(&h);

        let mut base = PlotBase::new("x", "y", array.len());
        let mut pad = Pad::full("p");
        base.draw_array(&mut pad, &array, 0, 0);

        assert_eq!(pad.primitives.len(), 1);
        assert!(base.diagnostics().contains("Plot object No 0 is broken! Will be skipped."));
    }

    #[test]
    fn test_draw_array_offsets() {
        let hists: Vec<_> = (0..2)
            .map(|i| shared(Hist1D::new(format!("h{i}"), "", 2, 0.0, 1.0)))
            .collect();
        let array: PlotArray = hists.iter().collect();

        let mut base = PlotBase::new("x", "y", 4);
        base.set_style(vec![RED, BLUE], vec![MarkerShape::Star], vec![], vec![], vec![]);
        base.set_option("SAME P", 3);
        let mut pad = Pad::full("p");
        base.draw_array(&mut pad, &array, 1, 2);

        assert_eq!(pad.primitives[0].style, StyleOutcome::Applied { first: 1, count: 1 });
        assert_eq!(pad.primitives[1].option, "SAME P");
        assert_eq!(hists[0].borrow().marker.color, BLUE);
        assert_eq!(hists[1].borrow().marker.color, crate::style::DEFAULT_COLOR);
    }

    #[test]
    fn test_style_changes_stay_local() {
        let shared_before = StyleContext::shared();
        let mut a = PlotBase::new("x", "y", 1);
        let b = PlotBase::new("x", "y", 1);
        a.set_mode(Mode::Presentation);

        assert_eq!(a.style().label_size, 40.0);
        assert_eq!(b.style().label_size, shared_before.label_size);
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        let mut base = PlotBase::new("x", "y", 1);
        base.set_palette(4242);
        let colors = base.palette_colors();
        assert!(!colors.is_empty());
        assert!(base.diagnostics().contains("Unknown palette 4242"));
    }

    #[test]
    fn test_clean_up_histogram() {
        let hist = shared(Hist1D::from_contents("h", 0.0, 2.0, vec![4.0, 1.0]));
        hist.borrow_mut().set_bin_error(1, 3.0);
        let mut base = PlotBase::new("x", "y", 1);
        assert_eq!(base.clean_up_histogram(&hist, 2.0), 1);
        assert_eq!(hist.borrow().contents, vec![4.0, 0.0]);
    }
}

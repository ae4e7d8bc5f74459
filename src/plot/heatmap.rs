//! Color-map layout: a two dimensional distribution with a legend.

use crate::canvas::{Canvas, Margins, Pad};
use crate::legend::Legend;
use crate::options::{DEFAULT_OPTION, DrawFlags};
use crate::plot::{Axis, PlotBase, PlotLayout};
use crate::plottable::{Hist2D, PlotArray, PlotObject, Shared, shared};
use crate::range::{AxisRange, auto_range};

/// A 2-D distribution drawn as a color map, followed by a legend.
#[derive(Debug, Clone)]
pub struct HeatmapPlot {
    base: PlotBase,
    array: PlotArray,
    legend: Option<Shared<Legend>>,
}

impl HeatmapPlot {
    /// Heatmap of `hist` with a text legend built from `legend_text`, one
    /// line per row.
    pub fn new(
        hist: Shared<Hist2D>,
        legend_text: &str,
        x_title: &str,
        y_title: &str,
        z_title: &str,
    ) -> Self {
        let legend = shared(Legend::from_text(legend_text));
        legend.borrow_mut().set_position(0.5, 0.78, 0.8, 0.9);

        let mut array = PlotArray::new();
        array.push(hist).push(&legend);

        let mut plot = Self::from_array(array, x_title, y_title, z_title);
        plot.legend = Some(legend);
        plot
    }

    /// Heatmap of a caller-built collection whose element 0 is the 2-D
    /// distribution.
    pub fn from_array(array: PlotArray, x_title: &str, y_title: &str, z_title: &str) -> Self {
        let mut base = PlotBase::new(x_title, y_title, array.len());
        if base.ensure_axes(array.first(), "Plot array")
            && let Some(first) = array.first()
            && !matches!(first, PlotObject::Hist2D(_))
        {
            base.mark_broken(format!(
                "Plot array: first element of class {} is not a two dimensional distribution",
                first.class_name()
            ));
        }
        base.z_title = z_title.to_string();
        base.set_canvas_dimensions(1000, 1000);
        base.set_canvas_margins(Margins::new(0.15, 0.2, 0.07, 0.15));
        base.set_canvas_offsets(1.3, 1.5);
        base.offsets.z = 1.4;
        Self {
            base,
            array,
            legend: None,
        }
    }

    /// Fix the color axis range; X and Y stay automatic unless set.
    pub fn with_z_range(mut self, low: f64, high: f64) -> Self {
        self.base.z_range = Some(AxisRange::new(low, high));
        self
    }

    /// Logarithmic color axis, kept linear when the color range starts at or below zero.
    pub fn with_log_z(self, enabled: bool) -> Self {
        self.with_log(Axis::Z, enabled)
    }

    /// Title distance multiplier of the color axis.
    pub fn with_z_offset(mut self, offset: f64) -> Self {
        self.base.offsets.z = offset;
        self
    }

    /// The legend built at construction, if any.
    pub fn legend(&self) -> Option<&Shared<Legend>> {
        self.legend.as_ref()
    }

    /// Distribution and legend, in draw order.
    pub fn array(&self) -> &PlotArray {
        &self.array
    }

    fn force_color_map(&mut self) {
        self.base.options.ensure_len(1);
        let current = self
            .base
            .options
            .get(0)
            .unwrap_or(DEFAULT_OPTION)
            .to_string();
        if !DrawFlags::parse(&current).colz {
            self.base.set_option(&format!("{current} COLZ"), 0);
        }
    }
}

impl PlotLayout for HeatmapPlot {
    fn base(&self) -> &PlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotBase {
        &mut self.base
    }

    fn layout_name(&self) -> &'static str {
        "Heatmap"
    }

    fn compose(&mut self) -> Canvas {
        let first = self.array.first();
        let mut ranges = self.base.resolve_ranges(first);
        if ranges.z.is_none() {
            ranges.z = first.and_then(auto_range).and_then(|auto| auto.z);
        }
        let mut canvas = self.base.new_canvas("HEATMAP");

        let mut pad = Pad::full("pad");
        let (x_title, y_title) = (self.base.x_title.clone(), self.base.y_title.clone());
        let palette = self.base.palette_colors();
        self.base
            .set_up_pad(&mut pad, ranges, &x_title, &y_title, true, &palette);

        self.force_color_map();
        let offset = self.base.style_offset;
        self.base.draw_array(&mut pad, &self.array, offset, 0);

        canvas.add_pad(pad);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::{BinAxis, Hist1D};
    use crate::resolver::StyleOutcome;
    use approx_eq::assert_approx_eq;

    fn filled_hist() -> Shared<Hist2D> {
        let mut hist = Hist2D::new("h2", "", BinAxis::new(4, 0.0, 4.0), BinAxis::new(2, -1.0, 1.0));
        hist.fill(0.5, -0.5, 10.0);
        hist.fill(3.5, 0.5, 2.0);
        shared(hist)
    }

    #[test]
    fn test_defaults() {
        let plot = HeatmapPlot::new(filled_hist(), "pp\n#sqrt{s} = 13 TeV", "x", "y", "z");
        assert_eq!(plot.base().dimensions(), (1000, 1000));
        assert_eq!(plot.base().margins(), Margins::new(0.15, 0.2, 0.07, 0.15));
        assert_eq!(plot.base().offsets().z, 1.4);
        assert_eq!(plot.array().len(), 2);
        assert_eq!(plot.legend().unwrap().borrow().len(), 2);
    }

    #[test]
    fn test_color_map_option_is_forced() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "z");
        let canvas = plot.render().unwrap();
        let primitives = &canvas.pads[0].primitives;
        assert_eq!(primitives[0].option, "SAME COLZ");
        assert_eq!(primitives[1].option, "SAME");
        assert_eq!(primitives[1].style, StyleOutcome::LegendFormatted);
    }

    #[test]
    fn test_color_map_forced_with_empty_option_table() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "z").with_options(vec![]);
        let canvas = plot.render().unwrap();
        assert_eq!(canvas.pads[0].primitives[0].option, "SAME COLZ");
        assert!(!plot.diagnostics().contains("out of range"));
    }

    #[test]
    fn test_existing_color_map_option_kept() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "z").with_option("COLZ", 0);
        let canvas = plot.render().unwrap();
        assert_eq!(canvas.pads[0].primitives[0].option, "COLZ");
    }

    #[test]
    fn test_z_axis_from_contents() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "counts");
        let canvas = plot.render().unwrap();
        let frame = canvas.pads[0].frame.as_ref().unwrap();
        assert_eq!(frame.x_range, AxisRange::new(0.0, 4.0));
        assert_eq!(frame.y_range, AxisRange::new(-1.0, 1.0));
        let z = frame.z_range.unwrap();
        assert_approx_eq!(z.high, 12.0, 1e-9);
        assert_eq!(z.low, 0.0);
        let z_axis = frame.z_axis.as_ref().unwrap();
        assert_eq!(z_axis.title, "counts");
        assert_eq!(z_axis.title_offset, 1.4);
        assert!(!z_axis.log);
    }

    #[test]
    fn test_manual_z_range_with_log() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "z")
            .with_ranges(0.0, 4.0, -1.0, 1.0)
            .with_z_range(1.0, 100.0)
            .with_log_z(true);
        let canvas = plot.render().unwrap();
        let frame = canvas.pads[0].frame.as_ref().unwrap();
        assert_eq!(frame.z_range, Some(AxisRange::new(1.0, 100.0)));
        assert!(frame.z_axis.as_ref().unwrap().log);
        assert!(plot.diagnostics().is_empty());
    }

    #[test]
    fn test_log_z_rejected_for_zero_minimum() {
        let mut plot = HeatmapPlot::new(filled_hist(), "text", "x", "y", "z").with_log_z(true);
        let canvas = plot.render().unwrap();
        assert!(!canvas.pads[0].frame.as_ref().unwrap().z_axis.as_ref().unwrap().log);
        assert!(plot.diagnostics().contains("Log scale on Z"));
    }

    #[test]
    fn test_one_dimensional_first_element_breaks() {
        let mut array = PlotArray::new();
        array.push(shared(Hist1D::new("h", "", 2, 0.0, 1.0)));
        let mut plot = HeatmapPlot::from_array(array, "x", "y", "z");
        assert!(plot.is_broken());
        assert!(plot.diagnostics().contains("class Hist1D is not a two dimensional"));
        assert!(plot.render().is_none());
        assert!(plot.legend().is_none());
    }
}

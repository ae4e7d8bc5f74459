//! Single pad filling the whole canvas.

use crate::canvas::{Canvas, Margins, Pad};
use crate::plottable::PlotArray;
use crate::plot::{PlotBase, PlotLayout};

/// One collection drawn into one square pad.
#[derive(Debug, Clone)]
pub struct SquarePlot {
    base: PlotBase,
    array: PlotArray,
}

impl SquarePlot {
    /// Layout for `array`; its first element provides axes and ranges.
    pub fn new(array: PlotArray, x_title: &str, y_title: &str) -> Self {
        let mut base = PlotBase::new(x_title, y_title, array.len());
        base.ensure_axes(array.first(), "Plot array");
        base.set_canvas_dimensions(1000, 1000);
        base.set_canvas_margins(Margins::new(0.15, 0.07, 0.07, 0.15));
        base.set_canvas_offsets(1.3, 1.5);
        Self { base, array }
    }

    /// The collection being drawn.
    pub fn array(&self) -> &PlotArray {
        &self.array
    }
}

impl PlotLayout for SquarePlot {
    fn base(&self) -> &PlotBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PlotBase {
        &mut self.base
    }

    fn layout_name(&self) -> &'static str {
        "Square"
    }

    fn compose(&mut self) -> Canvas {
        let ranges = self.base.resolve_ranges(self.array.first());
        let mut canvas = self.base.new_canvas("SQUARE");

        let mut pad = Pad::full("pad");
        let (x_title, y_title) = (self.base.x_title.clone(), self.base.y_title.clone());
        let palette = self.base.palette_colors();
        self.base
            .set_up_pad(&mut pad, ranges, &x_title, &y_title, true, &palette);

        let offset = self.base.style_offset;
        self.base.draw_array(&mut pad, &self.array, offset, 0);

        canvas.add_pad(pad);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::plot::DrawOutcome;
    use crate::legend::Legend;
    use crate::plottable::{Hist1D, PointMarker, shared};
    use crate::range::AxisRange;
    use crate::resolver::StyleOutcome;
    use crate::style::MarkerShape;
    use approx_eq::assert_approx_eq;

    fn one_hist() -> PlotArray {
        let hist = shared(Hist1D::from_contents(
            "data",
            0.0,
            5.0,
            vec![0.0, 10.0, 100.0, 10.0, 0.0],
        ));
        let mut array = PlotArray::new();
        array.push(hist);
        array
    }

    #[test]
    fn test_defaults() {
        let plot = SquarePlot::new(one_hist(), "x", "y");
        assert_eq!(plot.base().dimensions(), (1000, 1000));
        assert_eq!(plot.base().margins(), Margins::new(0.15, 0.07, 0.07, 0.15));
        assert_eq!(plot.base().offsets().x, 1.3);
        assert_eq!(plot.base().offsets().y, 1.5);
        assert_eq!(plot.base().options().as_slice(), &["SAME".to_string()]);
    }

    #[test]
    fn test_single_distribution_end_to_end() {
        let mut plot = SquarePlot::new(one_hist(), "x", "y")
            .with_style(vec![RED], vec![MarkerShape::FullSquare], vec![], vec![], vec![]);
        let canvas = plot.render().unwrap();

        assert_eq!(canvas.pads.len(), 1);
        let pad = &canvas.pads[0];
        assert_eq!(pad.primitives.len(), 1);
        assert_eq!(pad.primitives[0].option, "SAME");
        assert_eq!(pad.primitives[0].style, StyleOutcome::Applied { first: 0, count: 1 });

        let frame = pad.frame.as_ref().unwrap();
        assert_approx_eq!(frame.x_range.low, 0.5, 1e-9);
        assert_approx_eq!(frame.x_range.high, 4.5, 1e-9);
        assert_approx_eq!(frame.y_range.high, 120.0, 1e-9);
        assert_eq!(frame.x_axis.title, "x");
        assert!(plot.diagnostics().is_empty());
    }

    #[test]
    fn test_manual_ranges_skip_auto_range() {
        let mut plot = SquarePlot::new(one_hist(), "x", "y").with_ranges(-1.0, 6.0, 0.0, 50.0);
        let canvas = plot.render().unwrap();
        let frame = canvas.pads[0].frame.as_ref().unwrap();
        assert_eq!(frame.x_range, AxisRange::new(-1.0, 6.0));
        assert_eq!(frame.y_range, AxisRange::new(0.0, 50.0));
    }

    #[test]
    fn test_broken_plot_draws_nothing() {
        let mut array = PlotArray::new();
        array.push(shared(PointMarker::new(1.0, 1.0)));
        array.push(shared(Legend::from_text("text")));

        let mut plot = SquarePlot::new(array, "x", "y").with_style(
            vec![BLUE],
            vec![MarkerShape::Star],
            vec![],
            vec![],
            vec![],
        );
        assert!(plot.is_broken());
        assert!(plot.render().is_none());

        let outcome = plot.draw(std::env::temp_dir().join("padplot-never-written.svg")).unwrap();
        assert_eq!(outcome, DrawOutcome::Skipped);
        assert!(plot.is_broken());
        assert!(plot.diagnostics().contains("will not be drawn"));
    }

    #[test]
    fn test_style_offset_shifts_indices() {
        let mut plot = SquarePlot::new(one_hist(), "x", "y")
            .with_style(vec![RED, BLUE], vec![], vec![], vec![], vec![])
            .with_offset(1);
        let canvas = plot.render().unwrap();
        assert_eq!(
            canvas.pads[0].primitives[0].style,
            StyleOutcome::Applied { first: 1, count: 1 }
        );
        let first = plot.array().first().unwrap().clone();
        match first {
            crate::plottable::PlotObject::Hist1D(h) => assert_eq!(h.borrow().marker.color, BLUE),
            other => panic!("unexpected {other:?}"),
        }
    }
}

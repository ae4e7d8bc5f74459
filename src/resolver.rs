//! Style resolution: apply the style table entry at an index to a plottable.
//!
//! Which attributes are set depends on the kind of the object:
//! distributions, curves and point-sets get marker and line attributes,
//! reference lines only line attributes, standalone markers only marker
//! attributes. Legends are formatted with the context font and never take
//! table styles. A multi-curve overlay consumes one index per contained curve.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::legend::Legend;
use crate::plottable::PlotObject;
use crate::style::{LineAttributes, MarkerAttributes, ResolvedStyle, StyleContext};

/// What the resolver did with an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StyleOutcome {
    /// Legend text font, size and border were set.
    LegendFormatted,
    /// Table styling is disabled; the object was left untouched.
    Disabled,
    /// Table entries `first..first + count` were applied.
    Applied {
        /// First table index.
        first: usize,
        /// Number of consecutive indices consumed.
        count: usize,
    },
    /// The kind is not known to the resolver; nothing was applied.
    Unknown,
}

impl StyleOutcome {
    /// First table index used, if any.
    pub const fn first_index(&self) -> Option<usize> {
        match self {
            StyleOutcome::Applied { first, .. } => Some(*first),
            _ => None,
        }
    }
}

fn apply_marker(marker: &mut MarkerAttributes, style: &ResolvedStyle) {
    *marker = style.marker_attributes();
}

fn apply_line(line: &mut LineAttributes, style: &ResolvedStyle) {
    *line = style.line_attributes();
}

fn format_legend(legend: &mut Legend, ctx: &StyleContext) {
    legend.text_font = ctx.font.clone();
    legend.text_size = ctx.label_size;
    legend.border_size = 0;
}

/// Resolve and apply the style at `index` to `object`.
pub fn resolve_style(
    object: &PlotObject,
    index: usize,
    ctx: &StyleContext,
    diag: &mut Diagnostics,
) -> StyleOutcome {
    if let PlotObject::Legend(legend) = object {
        format_legend(&mut legend.borrow_mut(), ctx);
        return StyleOutcome::LegendFormatted;
    }

    if !ctx.styles_enabled {
        return StyleOutcome::Disabled;
    }

    let style = ctx.table.lookup(index);
    let single = StyleOutcome::Applied {
        first: index,
        count: 1,
    };

    match object {
        PlotObject::Hist1D(h) => {
            let mut h = h.borrow_mut();
            apply_marker(&mut h.marker, &style);
            apply_line(&mut h.line, &style);
            h.show_stats = false;
            single
        }
        PlotObject::Hist2D(h) => {
            let mut h = h.borrow_mut();
            apply_marker(&mut h.marker, &style);
            apply_line(&mut h.line, &style);
            h.show_stats = false;
            single
        }
        PlotObject::Function(f) => {
            let mut f = f.borrow_mut();
            apply_marker(&mut f.marker, &style);
            apply_line(&mut f.line, &style);
            single
        }
        PlotObject::Graph(g) => {
            let mut g = g.borrow_mut();
            apply_marker(&mut g.marker, &style);
            apply_line(&mut g.line, &style);
            single
        }
        PlotObject::MultiGraph(m) => {
            let mut count = 0;
            for graph in m.borrow().graphs.iter() {
                let current = index + count;
                if current >= ctx.table.marker_len() {
                    break;
                }
                let style = ctx.table.lookup(current);
                let mut graph = graph.borrow_mut();
                apply_marker(&mut graph.marker, &style);
                apply_line(&mut graph.line, &style);
                count += 1;
            }
            StyleOutcome::Applied {
                first: index,
                count,
            }
        }
        PlotObject::Line(l) => {
            apply_line(&mut l.borrow_mut().line, &style);
            single
        }
        PlotObject::Marker(m) => {
            apply_marker(&mut m.borrow_mut().marker, &style);
            single
        }
        PlotObject::Other(_) | PlotObject::Legend(_) => {
            diag.info(format!("Missing class {}", object.class_name()));
            StyleOutcome::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::plottable::{
        CustomPlottable, Graph, Hist1D, MultiGraph, PointMarker, RefLine, shared,
    };
    use crate::style::{LineStyle, MarkerShape, StyleTable};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_entry_context() -> StyleContext {
        let mut ctx = StyleContext::default();
        ctx.set_style(
            vec![RED, BLUE],
            vec![MarkerShape::FullSquare, MarkerShape::OpenCircle],
            vec![],
            vec![],
            vec![],
        );
        ctx
    }

    #[test]
    fn test_table_entries_and_default_fallback() {
        let ctx = two_entry_context();
        let mut diag = Diagnostics::new();
        let hists: Vec<_> = (0..3)
            .map(|i| shared(Hist1D::new(format!("h{i}"), "", 5, 0.0, 1.0)))
            .collect();

        for (i, h) in hists.iter().enumerate() {
            let outcome = resolve_style(&PlotObject::from(h), i, &ctx, &mut diag);
            assert_eq!(outcome, StyleOutcome::Applied { first: i, count: 1 });
        }

        assert_eq!(hists[0].borrow().marker.color, RED);
        assert_eq!(hists[0].borrow().marker.shape, MarkerShape::FullSquare);
        assert_eq!(hists[1].borrow().marker.color, BLUE);
        assert_eq!(hists[1].borrow().marker.shape, MarkerShape::OpenCircle);
        assert_eq!(hists[2].borrow().marker.color, crate::style::DEFAULT_COLOR);
        assert_eq!(hists[2].borrow().marker.shape, crate::style::DEFAULT_MARKER);
        assert!(!hists[2].borrow().show_stats);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_offset_past_table_uses_defaults() {
        let ctx = two_entry_context();
        let mut diag = Diagnostics::new();
        let h = shared(Hist1D::new("h", "", 5, 0.0, 1.0));
        let offset = 2;

        resolve_style(&PlotObject::from(&h), offset, &ctx, &mut diag);
        assert_eq!(h.borrow().marker.color, crate::style::DEFAULT_COLOR);
        assert_eq!(h.borrow().line.width, crate::style::DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_multigraph_stops_at_marker_table_end() {
        let ctx = two_entry_context();
        let mut diag = Diagnostics::new();
        let graphs: Vec<_> = (0..3)
            .map(|i| shared(Graph::new(format!("g{i}"), vec![0.0], vec![1.0])))
            .collect();
        let mut multi = MultiGraph::new("overlay");
        for g in &graphs {
            multi.add(Rc::clone(g));
        }

        let outcome = resolve_style(&PlotObject::from(shared(multi)), 0, &ctx, &mut diag);
        assert_eq!(outcome, StyleOutcome::Applied { first: 0, count: 2 });
        assert_eq!(graphs[0].borrow().marker.color, RED);
        assert_eq!(graphs[1].borrow().marker.color, BLUE);
        // untouched: still the plottable's own default size
        assert_eq!(graphs[2].borrow().marker.size, 1.0);
    }

    #[test]
    fn test_line_and_marker_only_get_their_attributes() {
        let mut ctx = two_entry_context();
        ctx.table.line_styles = vec![LineStyle::Dashed];
        ctx.table.sizes = vec![4.0];
        let mut diag = Diagnostics::new();

        let line = shared(RefLine::horizontal(1.0, 0.0, 1.0));
        let marker = shared(PointMarker::new(0.5, 0.5));
        resolve_style(&PlotObject::from(&line), 0, &ctx, &mut diag);
        resolve_style(&PlotObject::from(&marker), 0, &ctx, &mut diag);

        assert_eq!(line.borrow().line.color, RED);
        assert_eq!(line.borrow().line.style, LineStyle::Dashed);
        assert_eq!(marker.borrow().marker.size, 4.0);
        assert_eq!(marker.borrow().marker.shape, MarkerShape::FullSquare);
    }

    #[test]
    fn test_legend_is_formatted_not_styled() {
        let ctx = two_entry_context();
        let mut diag = Diagnostics::new();
        let legend = shared(Legend::from_text("Example"));

        let outcome = resolve_style(&PlotObject::from(&legend), 0, &ctx, &mut diag);
        assert_eq!(outcome, StyleOutcome::LegendFormatted);
        assert_eq!(legend.borrow().border_size, 0);
        assert_eq!(legend.borrow().text_size, ctx.label_size);
    }

    #[test]
    fn test_disabled_styles_leave_objects_untouched() {
        let ctx = StyleContext {
            table: StyleTable::new(vec![RED], vec![MarkerShape::Star]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let h = shared(Hist1D::new("h", "", 5, 0.0, 1.0));

        let outcome = resolve_style(&PlotObject::from(&h), 0, &ctx, &mut diag);
        assert_eq!(outcome, StyleOutcome::Disabled);
        assert_eq!(h.borrow().marker, MarkerAttributes::default());
    }

    #[derive(Debug)]
    struct Band;

    impl CustomPlottable for Band {
        fn class_name(&self) -> &str {
            "Band"
        }

        fn name(&self) -> &str {
            "band"
        }
    }

    #[test]
    fn test_unknown_kind_reports_missing_class() {
        let ctx = two_entry_context();
        let mut diag = Diagnostics::new();
        let band: Rc<RefCell<dyn CustomPlottable>> = Rc::new(RefCell::new(Band));

        let outcome = resolve_style(&PlotObject::Other(band), 0, &ctx, &mut diag);
        assert_eq!(outcome, StyleOutcome::Unknown);
        assert!(diag.contains("Missing class Band"));
    }
}

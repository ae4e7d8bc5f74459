// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)] // Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![cfg_attr(not(test), warn(clippy::unwrap_used))] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![allow(clippy::too_many_arguments)] // Range and style setters take one value per axis or sequence
#![deny(missing_docs)] // Documentation is a must for release

//! # padplot
//!
//! Composition of plots from ordered collections of plottable objects.
//!
//! A caller builds histograms, curves, point-sets, reference lines, markers
//! and legends, puts them into a [`PlotArray`] in draw order and hands the
//! array to one of four layouts:
//!
//! - [`SquarePlot`]: one pad filling the canvas.
//! - [`RatioPlot`]: one wide pad with a dashed reference line at one.
//! - [`SingleRatioPlot`]: a distribution pad stacked on a ratio pad that shares its X axis.
//! - [`HeatmapPlot`]: a two dimensional distribution drawn as a color map with a legend.
//!
//! Every element is styled from a [`StyleTable`] by its position plus a
//! configurable offset, so the ratio of a curve can continue (or reuse) the
//! colors of the main pad. Axis ranges are derived from the first element of
//! each collection unless they are set explicitly.
//!
//! Malformed input never panics. Precondition failures found when a layout is
//! constructed mark it broken and drawing it becomes a no-op; everything else
//! is collected in a [`Diagnostics`] sink and logged through `tracing`.
//!
//! ## Example
//!
//! ```no_run
//! use padplot::{Hist1D, PlotArray, PlotLayout, SingleRatioPlot, shared};
//! use padplot::{BLUE, MarkerShape, RED};
//!
//! let data = shared(Hist1D::from_contents("data", 0.0, 4.0, vec![2.0, 8.0, 6.0, 1.0]));
//! let model = shared(Hist1D::from_contents("model", 0.0, 4.0, vec![2.5, 7.0, 6.5, 1.0]));
//! let ratio = shared(Hist1D::from_contents("ratio", 0.0, 4.0, vec![0.8, 1.14, 0.92, 1.0]));
//!
//! let main: PlotArray = [&data, &model].into_iter().collect();
//! let mut ratios = PlotArray::new();
//! ratios.push(&ratio);
//!
//! let mut plot = SingleRatioPlot::new(main, ratios, "p_{T}", "entries", "data / model")
//!     .with_style(vec![RED, BLUE], vec![MarkerShape::FullCircle, MarkerShape::OpenSquare], vec![], vec![], vec![])
//!     .with_offsets(0, 0);
//! plot.draw("plots/ratio.svg")?;
//!
//! if !plot.diagnostics().is_empty() {
//!     eprintln!("{}", plot.diagnostics().summary());
//! }
//! # Ok::<(), padplot::PlotError>(())
//! ```
//!
//! ## Output
//!
//! [`PlotLayout::draw`] picks the format from the file extension: `svg`
//! for vector output, `png`, `jpg`, `jpeg` or `bmp` for raster output and
//! `json` for a snapshot of the composed canvas. Raster text needs a font:
//! a common system font is picked up on first use, any other one can be
//! supplied with [`register_raster_font`].

pub mod canvas;
pub mod color;
pub mod diagnostics;
mod error;
pub mod legend;
pub mod options;
pub mod plot;
pub mod plottable;
pub mod range;
pub mod render;
pub mod resolver;
pub mod style;

pub use crate::canvas::{AxisStyle, Canvas, Frame, Margins, Pad, Primitive};
pub use crate::color::{
    BLACK, BLUE, Color, ColorGradient, GREEN, MAGENTA, RED, WHITE, YELLOW, builtin_palette,
};
pub use crate::diagnostics::{Diagnostic, Diagnostics, Severity};
pub use crate::error::{PlotError, PlotResult};
pub use crate::legend::{Legend, LegendEntry, LegendSwatch};
pub use crate::options::{DrawFlags, DrawOptions};
pub use crate::plot::{
    Axis, DrawOutcome, HeatmapPlot, PlotBase, PlotLayout, RatioPlot, ResolvedRanges,
    SingleRatioPlot, SquarePlot, TitleOffsets,
};
pub use crate::plottable::{
    BinAxis, CustomPlottable, Function1D, Graph, Hist1D, Hist2D, MultiGraph, PlotArray,
    PlotKind, PlotObject, PointMarker, RefLine, Shared, shared,
};
pub use crate::range::{AxisRange, auto_range};
pub use crate::render::{
    OutputFormat, RASTER_FONT_FAMILY, raster_font_available, register_raster_font,
};
pub use crate::resolver::{StyleOutcome, resolve_style};
pub use crate::style::{
    LineAttributes, LineStyle, MarkerAttributes, MarkerShape, Mode, Palette, StyleContext,
    StyleTable,
};

//! Plottable objects and ordered plottable collections.
//!
//! Every object placed into a drawing collection is one variant of
//! [`PlotObject`]. The known kinds form a closed enum; anything else goes
//! through [`PlotObject::Other`] and is drawn without table styling.
//!
//! Plottables are owned by the caller and handed to the engine as shared
//! handles ([`Shared`]). The engine restyles them in place and keeps handle
//! clones only for the duration of a draw.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ndarray::Array2;
use serde::{Serialize, Serializer};

use crate::legend::Legend;
use crate::style::{LineAttributes, MarkerAttributes};

/// Shared, interior-mutable handle to a caller-owned plottable.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a plottable into a [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Tag identifying the kind of a [`PlotObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlotKind {
    /// One dimensional distribution.
    Hist1D,
    /// Two dimensional distribution.
    Hist2D,
    /// Analytic curve.
    Function,
    /// Point set.
    Graph,
    /// Overlay of point sets.
    MultiGraph,
    /// Reference line.
    Line,
    /// Single marker.
    Marker,
    /// Legend or text box.
    Legend,
    /// Caller-defined kind.
    Other,
}

impl PlotKind {
    /// Whether objects of this kind expose X and Y axes.
    pub const fn has_axes(&self) -> bool {
        matches!(
            self,
            PlotKind::Hist1D
                | PlotKind::Hist2D
                | PlotKind::Function
                | PlotKind::Graph
                | PlotKind::MultiGraph
        )
    }

    /// Point-set kinds, which do not compose additively with an overlay option.
    pub const fn is_graph_like(&self) -> bool {
        matches!(self, PlotKind::Graph | PlotKind::MultiGraph)
    }

    /// Class name used in log messages.
    pub const fn class_name(&self) -> &'static str {
        match self {
            PlotKind::Hist1D => "Hist1D",
            PlotKind::Hist2D => "Hist2D",
            PlotKind::Function => "Function1D",
            PlotKind::Graph => "Graph",
            PlotKind::MultiGraph => "MultiGraph",
            PlotKind::Line => "RefLine",
            PlotKind::Marker => "PointMarker",
            PlotKind::Legend => "Legend",
            PlotKind::Other => "Other",
        }
    }
}

/// Uniform binning of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinAxis {
    /// Number of bins.
    pub bins: usize,
    /// Lower edge of the first bin.
    pub low: f64,
    /// Upper edge of the last bin.
    pub high: f64,
}

impl BinAxis {
    /// Axis of `bins` bins between `low` and `high`.
    pub const fn new(bins: usize, low: f64, high: f64) -> Self {
        Self { bins, low, high }
    }

    /// Width of a single bin.
    pub fn width(&self) -> f64 {
        if self.bins == 0 {
            return self.high - self.low;
        }
        (self.high - self.low) / self.bins as f64
    }

    /// Center of bin `bin` (zero based). Bins outside the axis are
    /// extrapolated with the regular bin width.
    pub fn center(&self, bin: isize) -> f64 {
        self.low + (bin as f64 + 0.5) * self.width()
    }

    /// Lower edge of bin `bin` (zero based).
    pub fn low_edge(&self, bin: usize) -> f64 {
        self.low + bin as f64 * self.width()
    }

    /// Bin containing `x`, `None` for under- and overflow.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if !(x >= self.low && x < self.high) || self.bins == 0 {
            return None;
        }
        let bin = ((x - self.low) / self.width()) as usize;
        Some(bin.min(self.bins - 1))
    }
}

/// One dimensional binned distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hist1D {
    /// Object name, used in messages and legends.
    pub name: String,
    /// Title.
    pub title: String,
    /// Binning.
    pub axis: BinAxis,
    /// Bin contents.
    pub contents: Vec<f64>,
    /// Bin errors, parallel to `contents`.
    pub errors: Vec<f64>,
    /// Outline attributes.
    pub line: LineAttributes,
    /// Marker attributes.
    pub marker: MarkerAttributes,
    /// Whether the statistics box is shown.
    pub show_stats: bool,
}

impl Hist1D {
    /// Empty histogram with `bins` uniform bins between `low` and `high`.
    pub fn new(name: impl Into<String>, title: impl Into<String>, bins: usize, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            axis: BinAxis::new(bins, low, high),
            contents: vec![0.0; bins],
            errors: vec![0.0; bins],
            line: LineAttributes::default(),
            marker: MarkerAttributes::default(),
            show_stats: true,
        }
    }

    /// Histogram with given bin contents and Poisson errors.
    pub fn from_contents(name: impl Into<String>, low: f64, high: f64, contents: Vec<f64>) -> Self {
        let errors = contents.iter().map(|c| c.abs().sqrt()).collect();
        Self {
            axis: BinAxis::new(contents.len(), low, high),
            contents,
            errors,
            ..Self::new(name, "", 0, low, high)
        }
    }

    /// Add `weight` to the bin containing `x`. Under- and overflow are dropped.
    pub fn fill(&mut self, x: f64, weight: f64) {
        if let Some(bin) = self.axis.find_bin(x) {
            self.contents[bin] += weight;
            let err = self.errors[bin];
            self.errors[bin] = (err * err + weight * weight).sqrt();
        }
    }

    /// Overwrite the content of `bin`; out-of-range bins are ignored.
    pub fn set_bin_content(&mut self, bin: usize, value: f64) {
        if let Some(c) = self.contents.get_mut(bin) {
            *c = value;
        }
    }

    /// Overwrite the error of `bin`; out-of-range bins are ignored.
    pub fn set_bin_error(&mut self, bin: usize, value: f64) {
        if let Some(e) = self.errors.get_mut(bin) {
            *e = value;
        }
    }

    /// Largest bin content, 0 for an empty histogram.
    pub fn maximum(&self) -> f64 {
        self.contents
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Smallest bin content, 0 for an empty histogram.
    pub fn minimum(&self) -> f64 {
        self.contents
            .iter()
            .copied()
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Set to zero every bin whose error exceeds `factor` times its content.
    /// Returns how many bins were cleared.
    pub fn clean_up(&mut self, factor: f64) -> usize {
        let mut cleared = 0;
        for (content, error) in self.contents.iter_mut().zip(self.errors.iter_mut()) {
            if *content != 0.0 && *error > factor * content.abs() {
                *content = 0.0;
                *error = 0.0;
                cleared += 1;
            }
        }
        cleared
    }
}

/// Two dimensional binned distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hist2D {
    /// Object name.
    pub name: String,
    /// Title.
    pub title: String,
    /// X binning.
    pub x_axis: BinAxis,
    /// Y binning.
    pub y_axis: BinAxis,
    /// Contents indexed as `[x_bin, y_bin]`.
    pub contents: Array2<f64>,
    /// Outline attributes.
    pub line: LineAttributes,
    /// Marker attributes.
    pub marker: MarkerAttributes,
    /// Whether the statistics box is shown.
    pub show_stats: bool,
}

impl Hist2D {
    /// Empty distribution over the given binnings.
    pub fn new(name: impl Into<String>, title: impl Into<String>, x_axis: BinAxis, y_axis: BinAxis) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            contents: Array2::zeros((x_axis.bins, y_axis.bins)),
            x_axis,
            y_axis,
            line: LineAttributes::default(),
            marker: MarkerAttributes::default(),
            show_stats: true,
        }
    }

    /// Add `weight` to the cell containing `(x, y)`.
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) {
        if let (Some(ix), Some(iy)) = (self.x_axis.find_bin(x), self.y_axis.find_bin(y)) {
            self.contents[[ix, iy]] += weight;
        }
    }

    /// Largest cell content, 0 when there are no cells.
    pub fn maximum(&self) -> f64 {
        self.contents.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Smallest cell content, 0 when there are no cells.
    pub fn minimum(&self) -> f64 {
        self.contents.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }
}

/// Analytic curve evaluated on a fixed number of points.
#[derive(Clone, Serialize)]
pub struct Function1D {
    /// Object name.
    pub name: String,
    /// Title.
    pub title: String,
    #[serde(skip)]
    expression: Rc<dyn Fn(f64) -> f64>,
    /// Start of the sampled interval.
    pub x_low: f64,
    /// End of the sampled interval.
    pub x_high: f64,
    /// Number of sample points, at least two are used.
    pub n_points: usize,
    /// Curve attributes.
    pub line: LineAttributes,
    /// Marker attributes.
    pub marker: MarkerAttributes,
}

impl fmt::Debug for Function1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function1D")
            .field("name", &self.name)
            .field("x_low", &self.x_low)
            .field("x_high", &self.x_high)
            .field("n_points", &self.n_points)
            .finish_non_exhaustive()
    }
}

impl Function1D {
    /// Curve of `expression` over `[x_low, x_high]`, sampled on 100 points.
    pub fn new(
        name: impl Into<String>,
        expression: impl Fn(f64) -> f64 + 'static,
        x_low: f64,
        x_high: f64,
    ) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            expression: Rc::new(expression),
            x_low,
            x_high,
            n_points: 100,
            line: LineAttributes::default(),
            marker: MarkerAttributes::default(),
        }
    }

    /// Value at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        (self.expression)(x)
    }

    /// `(x, f(x))` on `n_points` evenly spaced points, non-finite values dropped.
    pub fn sample(&self) -> Vec<(f64, f64)> {
        let n = self.n_points.max(2);
        let step = (self.x_high - self.x_low) / (n - 1) as f64;
        (0..n)
            .map(|i| {
                let x = self.x_low + i as f64 * step;
                (x, self.eval(x))
            })
            .filter(|(_, y)| y.is_finite())
            .collect()
    }
}

/// Point set with optional asymmetric errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    /// Object name.
    pub name: String,
    /// Title.
    pub title: String,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates, as many as `x`.
    pub y: Vec<f64>,
    /// X errors below the points. Error sequences are empty when the
    /// graph has no errors.
    pub ex_low: Vec<f64>,
    /// X errors above the points.
    pub ex_high: Vec<f64>,
    /// Y errors below the points.
    pub ey_low: Vec<f64>,
    /// Y errors above the points.
    pub ey_high: Vec<f64>,
    /// Line attributes.
    pub line: LineAttributes,
    /// Marker attributes.
    pub marker: MarkerAttributes,
}

impl Graph {
    /// Graph from point coordinates; extra coordinates of the longer slice are ignored.
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        let n = x.len().min(y.len());
        let (mut x, mut y) = (x, y);
        x.truncate(n);
        y.truncate(n);
        Self {
            name: name.into(),
            x,
            y,
            ..Default::default()
        }
    }

    /// Symmetric errors in x and y.
    pub fn with_errors(self, ex: Vec<f64>, ey: Vec<f64>) -> Self {
        self.with_asymmetric_errors(ex.clone(), ex, ey.clone(), ey)
    }

    /// Errors given separately below and above each point.
    pub fn with_asymmetric_errors(
        mut self,
        ex_low: Vec<f64>,
        ex_high: Vec<f64>,
        ey_low: Vec<f64>,
        ey_high: Vec<f64>,
    ) -> Self {
        self.ex_low = ex_low;
        self.ex_high = ex_high;
        self.ey_low = ey_low;
        self.ey_high = ey_high;
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the graph has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Whether any error sequence is set.
    pub fn has_errors(&self) -> bool {
        !(self.ex_low.is_empty()
            && self.ex_high.is_empty()
            && self.ey_low.is_empty()
            && self.ey_high.is_empty())
    }

    /// Errors of point `i` as `(ex_low, ex_high, ey_low, ey_high)`, missing values are 0.
    pub fn errors_at(&self, i: usize) -> (f64, f64, f64, f64) {
        let get = |v: &[f64]| v.get(i).copied().unwrap_or(0.0);
        (
            get(&self.ex_low),
            get(&self.ex_high),
            get(&self.ey_low),
            get(&self.ey_high),
        )
    }
}

/// Overlay of several point sets sharing axes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MultiGraph {
    /// Object name.
    pub name: String,
    /// Title.
    pub title: String,
    /// Member graphs, drawn in order.
    pub graphs: Vec<Shared<Graph>>,
}

impl MultiGraph {
    /// Empty overlay.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a member graph.
    pub fn add(&mut self, graph: Shared<Graph>) {
        self.graphs.push(graph);
    }
}

/// Straight reference line in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefLine {
    /// Start X.
    pub x1: f64,
    /// Start Y.
    pub y1: f64,
    /// End X.
    pub x2: f64,
    /// End Y.
    pub y2: f64,
    /// Line attributes.
    pub line: LineAttributes,
}

impl RefLine {
    /// Line from `(x1, y1)` to `(x2, y2)` with default attributes.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            line: LineAttributes::default(),
        }
    }

    /// Horizontal line at height `y` from `x1` to `x2`.
    pub fn horizontal(y: f64, x1: f64, x2: f64) -> Self {
        Self::new(x1, y, x2, y)
    }
}

/// Single marker at a data position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMarker {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Marker attributes.
    pub marker: MarkerAttributes,
}

impl PointMarker {
    /// Default marker at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            marker: MarkerAttributes::default(),
        }
    }
}

/// Capability set for plottable kinds the engine does not know about.
///
/// Such objects are drawn as a polyline in data coordinates and are never
/// styled from the style table.
pub trait CustomPlottable: fmt::Debug {
    /// Class name used in log messages.
    fn class_name(&self) -> &str;

    /// Object name.
    fn name(&self) -> &str;

    /// Polyline in data coordinates.
    fn outline(&self) -> Vec<(f64, f64)> {
        Vec::new()
    }

    /// Line attributes of the outline.
    fn line(&self) -> LineAttributes {
        LineAttributes::default()
    }
}

/// Handle to one plottable of any kind.
#[derive(Debug, Clone)]
pub enum PlotObject {
    /// One dimensional distribution.
    Hist1D(Shared<Hist1D>),
    /// Two dimensional distribution.
    Hist2D(Shared<Hist2D>),
    /// Analytic curve.
    Function(Shared<Function1D>),
    /// Point set.
    Graph(Shared<Graph>),
    /// Overlay of point sets.
    MultiGraph(Shared<MultiGraph>),
    /// Reference line.
    Line(Shared<RefLine>),
    /// Single marker.
    Marker(Shared<PointMarker>),
    /// Legend or text box.
    Legend(Shared<Legend>),
    /// Object the engine only knows through [`CustomPlottable`].
    Other(Rc<RefCell<dyn CustomPlottable>>),
}

impl PlotObject {
    /// Kind tag of the object.
    pub fn kind(&self) -> PlotKind {
        match self {
            PlotObject::Hist1D(_) => PlotKind::Hist1D,
            PlotObject::Hist2D(_) => PlotKind::Hist2D,
            PlotObject::Function(_) => PlotKind::Function,
            PlotObject::Graph(_) => PlotKind::Graph,
            PlotObject::MultiGraph(_) => PlotKind::MultiGraph,
            PlotObject::Line(_) => PlotKind::Line,
            PlotObject::Marker(_) => PlotKind::Marker,
            PlotObject::Legend(_) => PlotKind::Legend,
            PlotObject::Other(_) => PlotKind::Other,
        }
    }

    /// Class name; custom kinds report their own.
    pub fn class_name(&self) -> String {
        match self {
            PlotObject::Other(obj) => obj.borrow().class_name().to_string(),
            other => other.kind().class_name().to_string(),
        }
    }

    /// Name of the object; lines and markers have fixed names.
    pub fn name(&self) -> String {
        match self {
            PlotObject::Hist1D(h) => h.borrow().name.clone(),
            PlotObject::Hist2D(h) => h.borrow().name.clone(),
            PlotObject::Function(f) => f.borrow().name.clone(),
            PlotObject::Graph(g) => g.borrow().name.clone(),
            PlotObject::MultiGraph(m) => m.borrow().name.clone(),
            PlotObject::Line(_) => "line".to_string(),
            PlotObject::Marker(_) => "marker".to_string(),
            PlotObject::Legend(l) => l.borrow().name.clone(),
            PlotObject::Other(obj) => obj.borrow().name().to_string(),
        }
    }

    /// Whether the object exposes X and Y axes.
    pub fn has_axes(&self) -> bool {
        self.kind().has_axes()
    }

    /// Whether both handles point at the same object.
    pub fn same_object(&self, other: &PlotObject) -> bool {
        match (self, other) {
            (PlotObject::Hist1D(a), PlotObject::Hist1D(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Hist2D(a), PlotObject::Hist2D(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Function(a), PlotObject::Function(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Graph(a), PlotObject::Graph(b)) => Rc::ptr_eq(a, b),
            (PlotObject::MultiGraph(a), PlotObject::MultiGraph(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Line(a), PlotObject::Line(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Marker(a), PlotObject::Marker(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Legend(a), PlotObject::Legend(b)) => Rc::ptr_eq(a, b),
            (PlotObject::Other(a), PlotObject::Other(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_shared {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Shared<$ty>> for PlotObject {
                fn from(value: Shared<$ty>) -> Self {
                    PlotObject::$variant(value)
                }
            }

            impl From<&Shared<$ty>> for PlotObject {
                fn from(value: &Shared<$ty>) -> Self {
                    PlotObject::$variant(Rc::clone(value))
                }
            }
        )*
    };
}

impl_from_shared!(
    Hist1D => Hist1D,
    Hist2D => Hist2D,
    Function1D => Function,
    Graph => Graph,
    MultiGraph => MultiGraph,
    RefLine => Line,
    PointMarker => Marker,
    Legend => Legend,
);

#[derive(Serialize)]
#[serde(tag = "kind")]
enum Snapshot<'a> {
    Hist1D(&'a Hist1D),
    Hist2D(&'a Hist2D),
    Function(&'a Function1D),
    Graph(&'a Graph),
    MultiGraph(&'a MultiGraph),
    Line(&'a RefLine),
    Marker(&'a PointMarker),
    Legend(&'a Legend),
    Other { class: &'a str, name: &'a str },
}

impl Serialize for PlotObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PlotObject::Hist1D(h) => Snapshot::Hist1D(&h.borrow()).serialize(serializer),
            PlotObject::Hist2D(h) => Snapshot::Hist2D(&h.borrow()).serialize(serializer),
            PlotObject::Function(f) => Snapshot::Function(&f.borrow()).serialize(serializer),
            PlotObject::Graph(g) => Snapshot::Graph(&g.borrow()).serialize(serializer),
            PlotObject::MultiGraph(m) => Snapshot::MultiGraph(&m.borrow()).serialize(serializer),
            PlotObject::Line(l) => Snapshot::Line(&l.borrow()).serialize(serializer),
            PlotObject::Marker(m) => Snapshot::Marker(&m.borrow()).serialize(serializer),
            PlotObject::Legend(l) => Snapshot::Legend(&l.borrow()).serialize(serializer),
            PlotObject::Other(obj) => {
                let obj = obj.borrow();
                Snapshot::Other {
                    class: obj.class_name(),
                    name: obj.name(),
                }
                .serialize(serializer)
            }
        }
    }
}

/// Insertion-ordered collection of plottables. Position is significant: it
/// addresses the style table and the draw option table.
///
/// Cloning the array copies handles, never the plottables themselves.
#[derive(Debug, Clone, Default)]
pub struct PlotArray {
    entries: Vec<Option<PlotObject>>,
}

impl PlotArray {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plottable.
    pub fn push(&mut self, object: impl Into<PlotObject>) -> &mut Self {
        self.entries.push(Some(object.into()));
        self
    }

    /// Append an empty slot, skipped when drawing.
    pub fn push_null(&mut self) -> &mut Self {
        self.entries.push(None);
        self
    }

    /// Insert a plottable before position `index` (appends past the end).
    pub fn insert(&mut self, index: usize, object: impl Into<PlotObject>) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, Some(object.into()));
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<PlotObject> {
        if index < self.entries.len() {
            self.entries.remove(index)
        } else {
            None
        }
    }

    /// Plottable at `index`; `None` for empty slots and out-of-range positions.
    pub fn get(&self, index: usize) -> Option<&PlotObject> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    /// The representative element used for axes and automatic ranges.
    pub fn first(&self) -> Option<&PlotObject> {
        self.get(0)
    }

    /// Number of entries, empty slots included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in position order, `None` for empty slots.
    pub fn iter(&self) -> impl Iterator<Item = Option<&PlotObject>> {
        self.entries.iter().map(Option::as_ref)
    }
}

impl<T: Into<PlotObject>> FromIterator<T> for PlotArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|o| Some(o.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_bin_axis_geometry() {
        let axis = BinAxis::new(10, 0.0, 10.0);
        assert_approx_eq!(axis.width(), 1.0, 1e-12);
        assert_approx_eq!(axis.center(0), 0.5, 1e-12);
        assert_approx_eq!(axis.center(-1), -0.5, 1e-12);
        assert_approx_eq!(axis.center(10), 10.5, 1e-12);
        assert_eq!(axis.find_bin(3.2), Some(3));
        assert_eq!(axis.find_bin(10.0), None);
        assert_eq!(axis.find_bin(-0.1), None);
    }

    #[test]
    fn test_hist_fill_and_extrema() {
        let mut hist = Hist1D::new("h", "", 4, 0.0, 4.0);
        hist.fill(0.5, 1.0);
        hist.fill(2.5, 3.0);
        hist.fill(2.5, 4.0);
        hist.fill(9.0, 100.0);

        assert_eq!(hist.contents, vec![1.0, 0.0, 7.0, 0.0]);
        assert_approx_eq!(hist.errors[2], 5.0, 1e-12);
        assert_eq!(hist.maximum(), 7.0);
        assert_eq!(hist.minimum(), 0.0);
    }

    #[test]
    fn test_clean_up_zeroes_uncertain_bins() {
        let mut hist = Hist1D::from_contents("h", 0.0, 3.0, vec![100.0, 1.0, 0.0]);
        hist.set_bin_error(1, 5.0);

        let cleared = hist.clean_up(2.0);
        assert_eq!(cleared, 1);
        assert_eq!(hist.contents, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_graph_errors() {
        let graph = Graph::new("g", vec![1.0, 2.0, 3.0], vec![1.0, 4.0])
            .with_asymmetric_errors(vec![0.1], vec![0.2], vec![0.3, 0.3], vec![]);
        assert_eq!(graph.len(), 2);
        assert!(graph.has_errors());
        assert_eq!(graph.errors_at(0), (0.1, 0.2, 0.3, 0.0));
        assert_eq!(graph.errors_at(1), (0.0, 0.0, 0.3, 0.0));
    }

    #[test]
    fn test_function_sampling_skips_poles() {
        let mut f = Function1D::new("inv", |x| 1.0 / x, -1.0, 1.0);
        f.n_points = 3;
        let points = f.sample();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], (-1.0, -1.0));
    }

    #[test]
    fn test_plot_array_positions_and_nulls() {
        let h = shared(Hist1D::new("h", "", 1, 0.0, 1.0));
        let line = shared(RefLine::horizontal(1.0, 0.0, 1.0));

        let mut array = PlotArray::new();
        array.push(&h).push_null().push(line);

        assert_eq!(array.len(), 3);
        assert_eq!(array.first().map(PlotObject::kind), Some(PlotKind::Hist1D));
        assert!(array.get(1).is_none());
        assert_eq!(array.get(2).map(PlotObject::kind), Some(PlotKind::Line));
        assert!(array.first().unwrap().same_object(&PlotObject::from(&h)));
    }

    #[test]
    fn test_kind_capabilities() {
        assert!(PlotKind::Hist2D.has_axes());
        assert!(PlotKind::Graph.has_axes());
        assert!(!PlotKind::Legend.has_axes());
        assert!(!PlotKind::Line.has_axes());
        assert!(PlotKind::MultiGraph.is_graph_like());
        assert!(!PlotKind::Hist1D.is_graph_like());
    }

    #[test]
    fn test_snapshot_serialization_is_tagged() {
        let h = shared(Hist1D::from_contents("data", 0.0, 2.0, vec![1.0, 2.0]));
        let json = serde_json::to_value(PlotObject::from(h)).unwrap();
        assert_eq!(json["kind"], "Hist1D");
        assert_eq!(json["name"], "data");
    }
}

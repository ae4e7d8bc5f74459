//! Persisting a [`Canvas`].
//!
//! The output format follows the file extension: `svg` goes through the
//! plotters SVG backend, `png`/`jpg`/`jpeg`/`bmp` through the bitmap backend,
//! `json` writes the display list itself. Painting uses plain drawing-area
//! primitives; the data to pixel mapping (including log axes), ticks, dash
//! patterns, markers, color maps and legends are computed here.
//!
//! SVG text names its font and leaves glyphs to the viewer. Bitmaps rasterize
//! glyphs from the font registered under [`RASTER_FONT_FAMILY`], either by
//! [`register_raster_font`] or found among the usual system fonts on first
//! use; without one, bitmaps are painted without text.

use std::fs;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, Circle, DrawingArea, DrawingBackend, FontDesc, FontFamily, FontStyle,
    FontTransform, IntoDrawingArea, PathElement, Polygon, RGBAColor, Rectangle, SVGBackend,
    ShapeStyle, Text, TextStyle,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::canvas::{Canvas, Frame, Margins, Pad, Primitive};
use crate::color::{self, Color};
use crate::error::{PlotError, PlotResult};
use crate::legend::{Legend, LegendSwatch};
use crate::options::DrawFlags;
use crate::plottable::{Function1D, Graph, Hist1D, Hist2D, PlotObject};
use crate::range::AxisRange;
use crate::style::{LineAttributes, MarkerAttributes, MarkerShape};

/// Output formats selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Scalable vector graphics
    Svg,
    /// PNG, JPEG or BMP raster image
    Bitmap,
    /// Canvas snapshot as pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Format for a (case-insensitive) extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "png" | "jpg" | "jpeg" | "bmp" => Some(OutputFormat::Bitmap),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Family name the raster font is registered under.
pub const RASTER_FONT_FAMILY: &str = "padplot-raster";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static RASTER_FONT_READY: AtomicBool = AtomicBool::new(false);
static SYSTEM_FONT_SEARCH: Once = Once::new();

/// Use `bytes`, the complete contents of a TrueType or OpenType file, for
/// text in bitmap output.
///
/// ```no_run
/// let bytes = std::fs::read("fonts/FiraSans-Regular.ttf")?;
/// padplot::register_raster_font(Box::leak(bytes.into_boxed_slice()))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn register_raster_font(bytes: &'static [u8]) -> PlotResult<()> {
    plotters::style::register_font(RASTER_FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| PlotError::invalid_parameter("font", "not a TrueType or OpenType font"))?;
    RASTER_FONT_READY.store(true, Ordering::Release);
    Ok(())
}

/// Whether a raster font is registered. The system font locations are
/// searched once if none was registered before.
pub fn raster_font_available() -> bool {
    SYSTEM_FONT_SEARCH.call_once(|| {
        if RASTER_FONT_READY.load(Ordering::Acquire) {
            return;
        }
        for path in SYSTEM_FONTS {
            let Ok(bytes) = fs::read(path) else {
                continue;
            };
            // registered fonts live for the rest of the process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_raster_font(bytes) {
                Ok(()) => {
                    tracing::debug!(path, "raster font registered");
                    return;
                }
                Err(e) => tracing::debug!(path, error = %e, "skipping system font"),
            }
        }
    });
    RASTER_FONT_READY.load(Ordering::Acquire)
}

/// Where the painter takes glyphs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextFont {
    /// The font named by each text element.
    Named,
    /// One registered family for every text element.
    Family(&'static str),
    /// No text.
    Off,
}

/// Write `canvas` to `path`, creating missing parent directories.
pub fn save(canvas: &Canvas, path: &Path) -> PlotResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let format =
        OutputFormat::from_extension(&extension).ok_or_else(|| PlotError::UnsupportedFormat {
            extension: extension.clone(),
            path: path.to_path_buf(),
        })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PlotError::io(parent, e))?;
    }

    let size = (canvas.width, canvas.height);
    match format {
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            paint(&root, canvas, TextFont::Named)?;
            root.present().map_err(PlotError::render)?;
        }
        OutputFormat::Bitmap => {
            let font = if raster_font_available() {
                TextFont::Family(RASTER_FONT_FAMILY)
            } else {
                tracing::warn!(path = %path.display(), "no raster font available, bitmap drawn without text");
                TextFont::Off
            };
            let root = BitMapBackend::new(path, size).into_drawing_area();
            paint(&root, canvas, font)?;
            root.present().map_err(PlotError::render)?;
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(canvas)?;
            fs::write(path, text).map_err(|e| PlotError::io(path, e))?;
        }
    }

    tracing::info!(path = %path.display(), ?format, "canvas saved");
    Ok(())
}

fn paint<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    font: TextFont,
) -> PlotResult<()> {
    root.fill(&backend_color(canvas.background))
        .map_err(PlotError::render)?;
    let painter = Painter { area: root, font };
    for pad in &canvas.pads {
        painter.pad(canvas, pad)?;
    }
    Ok(())
}

fn backend_color(color: Color) -> RGBAColor {
    let (r, g, b) = color.to_rgb8();
    RGBAColor(r, g, b, f64::from(color.alpha))
}

fn to_pixel(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

/// Pixel rectangle, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Rect {
    fn of_pad(canvas: &Canvas, pad: &Pad) -> Self {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        Self {
            x0: pad.x1 * w,
            x1: pad.x2 * w,
            y0: (1.0 - pad.y2) * h,
            y1: (1.0 - pad.y1) * h,
        }
    }

    fn inset(&self, margins: &Margins) -> Self {
        let (w, h) = (self.width(), self.height());
        Self {
            x0: self.x0 + margins.left * w,
            x1: self.x1 - margins.right * w,
            y0: self.y0 + margins.top * h,
            y1: self.y1 - margins.bottom * h,
        }
    }

    fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Position of `value` along `range` as a fraction, `None` when it cannot
/// be placed (degenerate range, non-positive value on a log axis).
pub(crate) fn axis_fraction(value: f64, range: AxisRange, log: bool) -> Option<f64> {
    let fraction = if log {
        if value <= 0.0 || range.low <= 0.0 || range.high <= 0.0 {
            return None;
        }
        (value.ln() - range.low.ln()) / (range.high.ln() - range.low.ln())
    } else {
        (value - range.low) / range.span()
    };
    fraction.is_finite().then_some(fraction)
}

fn clamp_to(value: f64, range: AxisRange, log: bool) -> f64 {
    let (lo, hi) = (range.low.min(range.high), range.low.max(range.high));
    let value = if log && value <= 0.0 { lo } else { value };
    value.clamp(lo, hi)
}

struct Mapper {
    rect: Rect,
    x: AxisRange,
    y: AxisRange,
    log_x: bool,
    log_y: bool,
}

impl Mapper {
    fn new(rect: Rect, frame: &Frame) -> Self {
        Self {
            rect,
            x: frame.x_range,
            y: frame.y_range,
            log_x: frame.x_axis.log,
            log_y: frame.y_axis.log,
        }
    }

    fn to_px(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let fx = axis_fraction(x, self.x, self.log_x)?;
        let fy = axis_fraction(y, self.y, self.log_y)?;
        Some((
            self.rect.x0 + fx * self.rect.width(),
            self.rect.y1 - fy * self.rect.height(),
        ))
    }

    /// Like [`Mapper::to_px`] with the point pulled onto the frame first.
    fn to_px_clamped(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.to_px(
            clamp_to(x, self.x, self.log_x),
            clamp_to(y, self.y, self.log_y),
        )
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let inside = |f: Option<f64>| f.is_some_and(|f| (0.0..=1.0).contains(&f));
        inside(axis_fraction(x, self.x, self.log_x)) && inside(axis_fraction(y, self.y, self.log_y))
    }
}

/// Split a polyline into the "on" pieces of a dash pattern.
pub(crate) fn dash_path(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 || pattern.iter().all(|&d| d <= 0.0) {
        return vec![points.to_vec()];
    }

    let mut dashes = Vec::new();
    let mut current = vec![points[0]];
    let mut index = 0;
    let mut remaining = pattern[0];
    let mut on = true;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        if length == 0.0 {
            continue;
        }
        let mut travelled = 0.0;
        while travelled < length {
            let step = remaining.min(length - travelled);
            travelled += step;
            remaining -= step;
            let t = travelled / length;
            let end = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            if on {
                current.push(end);
            }
            if remaining <= 1e-9 {
                if on {
                    dashes.push(std::mem::take(&mut current));
                } else {
                    current = vec![end];
                }
                on = !on;
                index = (index + 1) % pattern.len();
                remaining = pattern[index];
            }
        }
    }
    if on && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

/// Round `raw` up to 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(raw: f64) -> f64 {
    let base = 10f64.powf(raw.log10().floor());
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Upper bound on the ticks of one axis.
const MAX_TICKS: usize = 100;

/// Major tick positions: decades on log axes, about five nice steps otherwise.
pub(crate) fn axis_ticks(range: AxisRange, log: bool) -> Vec<f64> {
    if !(range.high > range.low) || !range.low.is_finite() || !range.high.is_finite() {
        return Vec::new();
    }

    if log && range.low > 0.0 {
        let first = range.low.log10().ceil() as i32;
        let last = range.high.log10().floor() as i32;
        if last > first {
            return (first..=last).map(|e| 10f64.powi(e)).collect();
        }
    }

    let step = nice_step(range.span() / 5.0);
    let first = (range.low / step).ceil() * step;
    // steps below the resolution of the range cannot be placed
    if !step.is_finite() || step <= 0.0 || first + step == first {
        return Vec::new();
    }
    let steps = ((range.high - first) / step + 1e-9).floor();
    if !(steps >= 0.0) {
        return Vec::new();
    }
    let steps = (steps as usize).min(MAX_TICKS - 1);
    (0..=steps)
        .map(|i| {
            let value = first + i as f64 * step;
            if value.abs() < step * 1e-9 { 0.0 } else { value }
        })
        .collect()
}

/// Tick label with as many decimals as the tick spacing needs.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => b - a,
        _ => 1.0,
    }
}

/// Label for one tick; decades are labelled on their own.
fn tick_label(tick: f64, step: f64, log: bool) -> String {
    if log {
        format_tick(tick, tick)
    } else {
        format_tick(tick, step)
    }
}

/// Marker and line attributes a legend swatch borrows from an object.
fn swatch_attributes(object: &PlotObject) -> Option<(MarkerAttributes, LineAttributes)> {
    match object {
        PlotObject::Hist1D(h) => {
            let h = h.borrow();
            Some((h.marker, h.line))
        }
        PlotObject::Hist2D(h) => {
            let h = h.borrow();
            Some((h.marker, h.line))
        }
        PlotObject::Function(f) => {
            let f = f.borrow();
            Some((f.marker, f.line))
        }
        PlotObject::Graph(g) => {
            let g = g.borrow();
            Some((g.marker, g.line))
        }
        PlotObject::MultiGraph(m) => m.borrow().graphs.first().map(|g| {
            let g = g.borrow();
            (g.marker, g.line)
        }),
        PlotObject::Line(l) => Some((MarkerAttributes::default(), l.borrow().line)),
        PlotObject::Marker(m) => Some((m.borrow().marker, LineAttributes::default())),
        PlotObject::Other(o) => Some((MarkerAttributes::default(), o.borrow().line())),
        PlotObject::Legend(_) => None,
    }
}

struct TextSpec<'s> {
    font: &'s str,
    size: f64,
    color: Color,
    pos: Pos,
    rotate: bool,
}

struct Painter<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    font: TextFont,
}

impl<DB: DrawingBackend> Painter<'_, DB> {
    fn pad(&self, canvas: &Canvas, pad: &Pad) -> PlotResult<()> {
        let pad_rect = Rect::of_pad(canvas, pad);
        if !pad.transparent {
            self.fill_rect(pad_rect, canvas.background)?;
        }

        let Some(frame) = &pad.frame else {
            for primitive in &pad.primitives {
                if let PlotObject::Legend(legend) = &primitive.object {
                    self.legend(pad_rect, &legend.borrow())?;
                }
            }
            return Ok(());
        };

        let frame_rect = pad_rect.inset(&pad.margins);
        let map = Mapper::new(frame_rect, frame);
        for primitive in &pad.primitives {
            self.primitive(pad, pad_rect, &map, frame, primitive)?;
        }
        self.frame(pad, pad_rect, frame_rect, frame)
    }

    fn primitive(
        &self,
        pad: &Pad,
        pad_rect: Rect,
        map: &Mapper,
        frame: &Frame,
        primitive: &Primitive,
    ) -> PlotResult<()> {
        let flags = DrawFlags::parse(&primitive.option);
        match &primitive.object {
            PlotObject::Hist1D(h) => self.hist1d(map, &h.borrow(), flags),
            PlotObject::Hist2D(h) => self.hist2d(map, pad, pad_rect, frame, &h.borrow(), flags),
            PlotObject::Function(f) => self.function(map, &f.borrow(), flags),
            PlotObject::Graph(g) => self.graph(map, &g.borrow(), flags),
            PlotObject::MultiGraph(m) => {
                for graph in &m.borrow().graphs {
                    self.graph(map, &graph.borrow(), flags)?;
                }
                Ok(())
            }
            PlotObject::Line(l) => {
                let l = l.borrow();
                self.polyline(map, &[(l.x1, l.y1), (l.x2, l.y2)], &l.line)
            }
            PlotObject::Marker(m) => {
                let m = m.borrow();
                match map.contains(m.x, m.y).then(|| map.to_px(m.x, m.y)).flatten() {
                    Some(p) => self.marker(p, &m.marker),
                    None => Ok(()),
                }
            }
            PlotObject::Legend(l) => self.legend(pad_rect, &l.borrow()),
            PlotObject::Other(o) => {
                let o = o.borrow();
                self.polyline(map, &o.outline(), &o.line())
            }
        }
    }

    fn fill_rect(&self, rect: Rect, color: Color) -> PlotResult<()> {
        let style = ShapeStyle {
            color: backend_color(color),
            filled: true,
            stroke_width: 0,
        };
        self.area
            .draw(&Rectangle::new(
                [to_pixel((rect.x0, rect.y0)), to_pixel((rect.x1, rect.y1))],
                style,
            ))
            .map_err(PlotError::render)
    }

    fn outline_rect(&self, rect: Rect, color: Color, width: u32) -> PlotResult<()> {
        let style = ShapeStyle {
            color: backend_color(color),
            filled: false,
            stroke_width: width,
        };
        self.area
            .draw(&Rectangle::new(
                [to_pixel((rect.x0, rect.y0)), to_pixel((rect.x1, rect.y1))],
                style,
            ))
            .map_err(PlotError::render)
    }

    /// Stroke a pixel-space path with the line attributes.
    fn stroke(&self, points: &[(f64, f64)], line: &LineAttributes) -> PlotResult<()> {
        if line.width <= 0.0 || points.len() < 2 {
            return Ok(());
        }
        let style = ShapeStyle {
            color: backend_color(line.color),
            filled: false,
            stroke_width: line.width.round().max(1.0) as u32,
        };
        let pieces = match line.style.dash_pattern() {
            Some(pattern) => dash_path(points, pattern),
            None => vec![points.to_vec()],
        };
        for piece in pieces.iter().filter(|p| p.len() >= 2) {
            let pixels: Vec<(i32, i32)> = piece.iter().copied().map(to_pixel).collect();
            self.area
                .draw(&PathElement::new(pixels, style))
                .map_err(PlotError::render)?;
        }
        Ok(())
    }

    /// Stroke a data-space path, pulling points onto the frame.
    fn polyline(&self, map: &Mapper, points: &[(f64, f64)], line: &LineAttributes) -> PlotResult<()> {
        let pixels: Vec<(f64, f64)> = points
            .iter()
            .filter_map(|&(x, y)| map.to_px_clamped(x, y))
            .collect();
        self.stroke(&pixels, line)
    }

    fn marker(&self, (x, y): (f64, f64), marker: &MarkerAttributes) -> PlotResult<()> {
        let r = (marker.size * 4.0).max(1.0);
        let filled = marker.shape.is_filled();
        let style = ShapeStyle {
            color: backend_color(marker.color),
            filled,
            stroke_width: 1,
        };

        let outline: Vec<(f64, f64)> = match marker.shape {
            MarkerShape::Dot => {
                return self.fill_rect(
                    Rect {
                        x0: x,
                        y0: y,
                        x1: x + 1.0,
                        y1: y + 1.0,
                    },
                    marker.color,
                );
            }
            MarkerShape::FullCircle | MarkerShape::OpenCircle => {
                return self
                    .area
                    .draw(&Circle::new(to_pixel((x, y)), r.round() as i32, style))
                    .map_err(PlotError::render);
            }
            MarkerShape::FullSquare | MarkerShape::OpenSquare => {
                let rect = Rect {
                    x0: x - r,
                    y0: y - r,
                    x1: x + r,
                    y1: y + r,
                };
                return if filled {
                    self.fill_rect(rect, marker.color)
                } else {
                    self.outline_rect(rect, marker.color, 1)
                };
            }
            MarkerShape::Cross => {
                let line = LineAttributes {
                    color: marker.color,
                    width: 1.0,
                    ..Default::default()
                };
                self.stroke(&[(x - r, y), (x + r, y)], &line)?;
                return self.stroke(&[(x, y - r), (x, y + r)], &line);
            }
            MarkerShape::FullTriangleUp | MarkerShape::OpenTriangleUp => {
                vec![(x, y - r), (x + r, y + 0.8 * r), (x - r, y + 0.8 * r)]
            }
            MarkerShape::FullDiamond | MarkerShape::OpenDiamond => {
                vec![(x, y - r), (x + 0.7 * r, y), (x, y + r), (x - 0.7 * r, y)]
            }
            MarkerShape::Star => (0..10)
                .map(|i| {
                    let angle = std::f64::consts::PI * (i as f64) / 5.0 - std::f64::consts::FRAC_PI_2;
                    let radius = if i % 2 == 0 { r } else { 0.45 * r };
                    (x + radius * angle.cos(), y + radius * angle.sin())
                })
                .collect(),
        };

        let mut pixels: Vec<(i32, i32)> = outline.iter().copied().map(to_pixel).collect();
        if filled {
            self.area
                .draw(&Polygon::new(pixels, style))
                .map_err(PlotError::render)
        } else {
            pixels.push(pixels[0]);
            self.area
                .draw(&PathElement::new(pixels, style))
                .map_err(PlotError::render)
        }
    }

    fn text(&self, text: &str, at: (f64, f64), spec: &TextSpec<'_>) -> PlotResult<()> {
        let family = match self.font {
            TextFont::Named => spec.font,
            TextFont::Family(family) => family,
            TextFont::Off => return Ok(()),
        };
        if spec.size <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let mut font = FontDesc::new(FontFamily::from(family), spec.size, FontStyle::Normal);
        if spec.rotate {
            font = font.transform(FontTransform::Rotate270);
        }
        let color = backend_color(spec.color);
        let style = TextStyle::from(font).color(&color).pos(spec.pos);
        self.area
            .draw(&Text::new(text.to_string(), to_pixel(at), style))
            .map_err(PlotError::render)
    }

    fn error_bars(&self, map: &Mapper, x: f64, y: f64, errors: (f64, f64, f64, f64), line: &LineAttributes) -> PlotResult<()> {
        let (exl, exh, eyl, eyh) = errors;
        if eyl > 0.0 || eyh > 0.0 {
            self.polyline(map, &[(x, y - eyl), (x, y + eyh)], line)?;
        }
        if exl > 0.0 || exh > 0.0 {
            self.polyline(map, &[(x - exl, y), (x + exh, y)], line)?;
        }
        Ok(())
    }

    fn hist1d(&self, map: &Mapper, hist: &Hist1D, flags: DrawFlags) -> PlotResult<()> {
        let steps = flags.hist || (!flags.markers && !flags.errors);
        let axis = hist.axis;

        if steps {
            let base = map.y.low;
            let mut outline = vec![(axis.low_edge(0), base)];
            for (bin, &content) in hist.contents.iter().enumerate() {
                outline.push((axis.low_edge(bin), content));
                outline.push((axis.low_edge(bin + 1), content));
            }
            outline.push((axis.high, base));
            self.polyline(map, &outline, &hist.line)?;
        }

        for (bin, &content) in hist.contents.iter().enumerate() {
            let center = axis.center(bin as isize);
            if flags.errors {
                let error = hist.errors.get(bin).copied().unwrap_or(0.0);
                let half = axis.width() / 2.0;
                self.error_bars(map, center, content, (half, half, error, error), &hist.line)?;
            }
            if flags.markers && map.contains(center, content) {
                if let Some(p) = map.to_px(center, content) {
                    self.marker(p, &hist.marker)?;
                }
            }
        }
        Ok(())
    }

    fn hist2d(
        &self,
        map: &Mapper,
        pad: &Pad,
        pad_rect: Rect,
        frame: &Frame,
        hist: &Hist2D,
        flags: DrawFlags,
    ) -> PlotResult<()> {
        let palette = if pad.palette.is_empty() {
            color::builtin_palette(color::DEFAULT_PALETTE_ID)
                .map(|g| g.colors().to_vec())
                .unwrap_or_default()
        } else {
            pad.palette.clone()
        };
        if palette.is_empty() {
            return Ok(());
        }

        let z = frame
            .z_range
            .unwrap_or_else(|| AxisRange::new(hist.minimum(), hist.maximum()));
        let log_z = frame.z_axis.as_ref().is_some_and(|a| a.log);
        let pick = |fraction: f64| {
            let i = (fraction.clamp(0.0, 1.0) * (palette.len() - 1) as f64).round() as usize;
            palette[i]
        };

        for ((ix, iy), &content) in hist.contents.indexed_iter() {
            if content == 0.0 || content < z.low {
                continue;
            }
            let Some(fraction) = axis_fraction(content.min(z.high), z, log_z) else {
                continue;
            };
            let corners = (
                map.to_px_clamped(hist.x_axis.low_edge(ix), hist.y_axis.low_edge(iy + 1)),
                map.to_px_clamped(hist.x_axis.low_edge(ix + 1), hist.y_axis.low_edge(iy)),
            );
            if let (Some((x0, y0)), Some((x1, y1))) = corners {
                self.fill_rect(Rect { x0, y0, x1, y1 }, pick(fraction))?;
            }
        }

        if flags.colz {
            self.color_bar(map.rect, pad_rect, frame, z, log_z, &palette)?;
        }
        Ok(())
    }

    fn color_bar(
        &self,
        frame_rect: Rect,
        pad_rect: Rect,
        frame: &Frame,
        z: AxisRange,
        log_z: bool,
        palette: &[Color],
    ) -> PlotResult<()> {
        let margin = pad_rect.x1 - frame_rect.x1;
        let bar = Rect {
            x0: frame_rect.x1 + 0.1 * margin,
            x1: frame_rect.x1 + 0.3 * margin,
            y0: frame_rect.y0,
            y1: frame_rect.y1,
        };
        let slice = bar.height() / palette.len() as f64;
        for (i, &c) in palette.iter().enumerate() {
            let y1 = bar.y1 - i as f64 * slice;
            self.fill_rect(
                Rect {
                    x0: bar.x0,
                    x1: bar.x1,
                    y0: y1 - slice,
                    y1,
                },
                c,
            )?;
        }
        self.outline_rect(bar, color::BLACK, 1)?;

        let Some(axis) = &frame.z_axis else {
            return Ok(());
        };
        let ticks = axis_ticks(z, log_z);
        let step = tick_step(&ticks);
        let labels = TextSpec {
            font: &axis.font,
            size: axis.label_size,
            color: axis.label_color,
            pos: Pos::new(HPos::Left, VPos::Center),
            rotate: false,
        };
        for tick in ticks {
            if let Some(f) = axis_fraction(tick, z, log_z) {
                let y = bar.y1 - f * bar.height();
                self.stroke(
                    &[(bar.x1 - 0.3 * bar.width(), y), (bar.x1, y)],
                    &LineAttributes::default(),
                )?;
                if axis.labels_visible {
                    self.text(&tick_label(tick, step, log_z), (bar.x1 + 4.0, y), &labels)?;
                }
            }
        }

        let title_x = (bar.x1 + axis.label_size * 2.0 + axis.title_offset * axis.title_size)
            .min(pad_rect.x1 - axis.title_size / 2.0);
        self.text(
            &axis.title,
            (title_x, (bar.y0 + bar.y1) / 2.0),
            &TextSpec {
                font: &axis.font,
                size: axis.title_size,
                color: color::BLACK,
                pos: Pos::new(HPos::Center, VPos::Center),
                rotate: true,
            },
        )
    }

    fn function(&self, map: &Mapper, function: &Function1D, flags: DrawFlags) -> PlotResult<()> {
        let points = function.sample();
        self.polyline(map, &points, &function.line)?;
        if flags.markers {
            for (x, y) in points {
                if let Some(p) = map.contains(x, y).then(|| map.to_px(x, y)).flatten() {
                    self.marker(p, &function.marker)?;
                }
            }
        }
        Ok(())
    }

    fn graph(&self, map: &Mapper, graph: &Graph, flags: DrawFlags) -> PlotResult<()> {
        let points: Vec<(f64, f64)> = graph.x.iter().copied().zip(graph.y.iter().copied()).collect();
        let connect = flags.line || flags.smooth;

        if connect {
            self.polyline(map, &points, &graph.line)?;
        }
        if graph.has_errors() {
            for (i, &(x, y)) in points.iter().enumerate() {
                self.error_bars(map, x, y, graph.errors_at(i), &graph.line)?;
            }
        }
        if flags.markers || !connect {
            for &(x, y) in &points {
                if let Some(p) = map.contains(x, y).then(|| map.to_px(x, y)).flatten() {
                    self.marker(p, &graph.marker)?;
                }
            }
        }
        Ok(())
    }

    fn legend(&self, pad_rect: Rect, legend: &Legend) -> PlotResult<()> {
        let (pw, ph) = (pad_rect.width(), pad_rect.height());
        let rect = Rect {
            x0: pad_rect.x0 + legend.x1 * pw,
            x1: pad_rect.x0 + legend.x2 * pw,
            y0: pad_rect.y1 - legend.y2 * ph,
            y1: pad_rect.y1 - legend.y1 * ph,
        };
        if legend.border_size > 0 {
            self.outline_rect(rect, color::BLACK, legend.border_size)?;
        }
        if legend.entries.is_empty() {
            return Ok(());
        }

        let row = rect.height() / legend.entries.len() as f64;
        let spec = TextSpec {
            font: &legend.text_font,
            size: legend.text_size.min(row * 0.8),
            color: legend.text_color,
            pos: Pos::new(HPos::Left, VPos::Center),
            rotate: false,
        };

        for (i, entry) in legend.entries.iter().enumerate() {
            let y = rect.y0 + (i as f64 + 0.5) * row;
            let attributes = match &entry.swatch {
                LegendSwatch::None => None,
                LegendSwatch::Object(object) => swatch_attributes(object),
                LegendSwatch::Style { marker, line } => Some((*marker, *line)),
            };

            let text_x = match attributes {
                Some((marker, line)) => {
                    let option = entry.option.to_lowercase();
                    let center = rect.x0 + 0.15 * rect.width();
                    let half = 0.1 * rect.width();
                    if option.contains('f') {
                        self.fill_rect(
                            Rect {
                                x0: center - half,
                                x1: center + half,
                                y0: y - row * 0.3,
                                y1: y + row * 0.3,
                            },
                            line.color,
                        )?;
                    }
                    if option.contains('l') {
                        self.stroke(&[(center - half, y), (center + half, y)], &line)?;
                    }
                    if option.contains('e') {
                        self.stroke(&[(center, y - row * 0.3), (center, y + row * 0.3)], &line)?;
                    }
                    if option.contains('p') {
                        self.marker((center, y), &marker)?;
                    }
                    rect.x0 + 0.3 * rect.width()
                }
                None => rect.x0 + 0.05 * rect.width(),
            };
            self.text(&entry.label, (text_x, y), &spec)?;
        }
        Ok(())
    }

    fn frame(&self, pad: &Pad, pad_rect: Rect, rect: Rect, frame: &Frame) -> PlotResult<()> {
        let axis_line = LineAttributes::default();
        self.outline_rect(rect, color::BLACK, 1)?;

        // X axis along the bottom, mirrored on top
        let x_log = frame.x_axis.log;
        let x_ticks = axis_ticks(frame.x_range, x_log);
        let x_step = tick_step(&x_ticks);
        let x_len = frame.x_axis.tick_length * rect.height();
        let x_labels = TextSpec {
            font: &frame.x_axis.font,
            size: frame.x_axis.label_size,
            color: frame.x_axis.label_color,
            pos: Pos::new(HPos::Center, VPos::Top),
            rotate: false,
        };
        for &tick in &x_ticks {
            let Some(f) = axis_fraction(tick, frame.x_range, x_log) else {
                continue;
            };
            let x = rect.x0 + f * rect.width();
            self.stroke(&[(x, rect.y1), (x, rect.y1 - x_len)], &axis_line)?;
            if pad.ticks_x {
                self.stroke(&[(x, rect.y0), (x, rect.y0 + x_len)], &axis_line)?;
            }
            if frame.x_axis.labels_visible {
                let at = (x, rect.y1 + 0.3 * frame.x_axis.label_size);
                self.text(&tick_label(tick, x_step, x_log), at, &x_labels)?;
            }
        }
        let title_y = rect.y1 + 0.5 * frame.x_axis.label_size
            + frame.x_axis.title_offset * frame.x_axis.title_size;
        self.text(
            &frame.x_axis.title,
            (rect.x1, title_y.min(pad_rect.y1)),
            &TextSpec {
                font: &frame.x_axis.font,
                size: frame.x_axis.title_size,
                color: color::BLACK,
                pos: Pos::new(HPos::Right, VPos::Bottom),
                rotate: false,
            },
        )?;

        // Y axis on the left, mirrored on the right
        let y_log = frame.y_axis.log;
        let y_ticks = axis_ticks(frame.y_range, y_log);
        let y_step = tick_step(&y_ticks);
        let y_len = frame.y_axis.tick_length * rect.width();
        let y_labels = TextSpec {
            font: &frame.y_axis.font,
            size: frame.y_axis.label_size,
            color: frame.y_axis.label_color,
            pos: Pos::new(HPos::Right, VPos::Center),
            rotate: false,
        };
        for &tick in &y_ticks {
            let Some(f) = axis_fraction(tick, frame.y_range, y_log) else {
                continue;
            };
            let y = rect.y1 - f * rect.height();
            self.stroke(&[(rect.x0, y), (rect.x0 + y_len, y)], &axis_line)?;
            if pad.ticks_y {
                self.stroke(&[(rect.x1, y), (rect.x1 - y_len, y)], &axis_line)?;
            }
            if frame.y_axis.labels_visible {
                let at = (rect.x0 - 0.3 * frame.y_axis.label_size, y);
                self.text(&tick_label(tick, y_step, y_log), at, &y_labels)?;
            }
        }
        let title_x = rect.x0
            - (2.0 * frame.y_axis.label_size + frame.y_axis.title_offset * frame.y_axis.title_size);
        self.text(
            &frame.y_axis.title,
            (title_x.max(pad_rect.x0 + frame.y_axis.title_size / 2.0), (rect.y0 + rect.y1) / 2.0),
            &TextSpec {
                font: &frame.y_axis.font,
                size: frame.y_axis.title_size,
                color: color::BLACK,
                pos: Pos::new(HPos::Center, VPos::Center),
                rotate: true,
            },
        )
    }
}

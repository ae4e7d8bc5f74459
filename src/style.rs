//! Style tables and the style context shared by layouts.
//!
//! The [`StyleTable`] holds five independent, index-aligned sequences (color,
//! marker shape, marker size, line style, line width). A lookup beyond the end
//! of any sequence silently falls back to that attribute's default: the tables
//! do not have to be the same length, and running past them is not an error.
//!
//! The [`StyleContext`] bundles the table with the font, label size and palette
//! used by every layout. A process-wide default context is available through
//! [`StyleContext::shared`]; each layout snapshots it at construction and
//! modifies its own copy afterwards.

use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

use serde::{Deserialize, Serialize};

use crate::color::{self, Color, ColorGradient};
use crate::error::{PlotError, PlotResult};

/// Marker shapes understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerShape {
    /// Single pixel dot
    Dot,
    /// Filled circle
    #[default]
    FullCircle,
    /// Hollow circle
    OpenCircle,
    /// Filled square
    FullSquare,
    /// Hollow square
    OpenSquare,
    /// Filled upward triangle
    FullTriangleUp,
    /// Hollow upward triangle
    OpenTriangleUp,
    /// Filled diamond
    FullDiamond,
    /// Hollow diamond
    OpenDiamond,
    /// Diagonal cross
    Cross,
    /// Five pointed star
    Star,
}

impl MarkerShape {
    /// Whether the marker is drawn filled.
    pub const fn is_filled(&self) -> bool {
        matches!(
            self,
            MarkerShape::Dot
                | MarkerShape::FullCircle
                | MarkerShape::FullSquare
                | MarkerShape::FullTriangleUp
                | MarkerShape::FullDiamond
                | MarkerShape::Star
        )
    }
}

/// Line dash patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Regular dashes
    Dashed,
    /// Dots
    Dotted,
    /// Alternating dashes and dots
    DashDotted,
    /// Long dashes
    LongDashed,
}

impl LineStyle {
    /// Dash pattern as alternating (on, off) lengths in pixels, `None` for solid.
    pub const fn dash_pattern(&self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(&[12.0, 8.0]),
            LineStyle::Dotted => Some(&[2.0, 5.0]),
            LineStyle::DashDotted => Some(&[12.0, 5.0, 2.0, 5.0]),
            LineStyle::LongDashed => Some(&[24.0, 10.0]),
        }
    }
}

/// Default color when an index runs past the color table.
pub const DEFAULT_COLOR: Color = color::BLACK;
/// Default marker when an index runs past the marker table.
pub const DEFAULT_MARKER: MarkerShape = MarkerShape::FullCircle;
/// Default marker size.
pub const DEFAULT_MARKER_SIZE: f64 = 2.0;
/// Default line style.
pub const DEFAULT_LINE_STYLE: LineStyle = LineStyle::Solid;
/// Default line width.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

/// Line attributes of a plottable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineAttributes {
    /// Line color.
    pub color: Color,
    /// Dash pattern.
    pub style: LineStyle,
    /// Width in pixels.
    pub width: f64,
}

impl Default for LineAttributes {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            style: DEFAULT_LINE_STYLE,
            width: 1.0,
        }
    }
}

/// Marker attributes of a plottable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerAttributes {
    /// Marker color.
    pub color: Color,
    /// Marker shape.
    pub shape: MarkerShape,
    /// Scale factor on the base marker size.
    pub size: f64,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            shape: DEFAULT_MARKER,
            size: 1.0,
        }
    }
}

/// Style looked up from a [`StyleTable`] for one index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    /// Color for line, marker and fill.
    pub color: Color,
    /// Marker shape.
    pub marker: MarkerShape,
    /// Marker size.
    pub marker_size: f64,
    /// Line style.
    pub line_style: LineStyle,
    /// Line width.
    pub line_width: f64,
}

impl ResolvedStyle {
    /// Marker part of the style.
    pub const fn marker_attributes(&self) -> MarkerAttributes {
        MarkerAttributes {
            color: self.color,
            shape: self.marker,
            size: self.marker_size,
        }
    }

    /// Line part of the style.
    pub const fn line_attributes(&self) -> LineAttributes {
        LineAttributes {
            color: self.color,
            style: self.line_style,
            width: self.line_width,
        }
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            marker: DEFAULT_MARKER,
            marker_size: DEFAULT_MARKER_SIZE,
            line_style: DEFAULT_LINE_STYLE,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Index-addressed style sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    /// Colors by index.
    pub colors: Vec<Color>,
    /// Marker shapes by index.
    pub markers: Vec<MarkerShape>,
    /// Marker sizes by index.
    pub sizes: Vec<f64>,
    /// Line styles by index.
    pub line_styles: Vec<LineStyle>,
    /// Line widths by index.
    pub line_widths: Vec<f64>,
}

impl StyleTable {
    /// Table with colors and markers only; the other sequences use defaults.
    pub fn new(colors: Vec<Color>, markers: Vec<MarkerShape>) -> Self {
        Self {
            colors,
            markers,
            ..Default::default()
        }
    }

    /// Look up every attribute at `index`, each falling back independently.
    pub fn lookup(&self, index: usize) -> ResolvedStyle {
        ResolvedStyle {
            color: self.colors.get(index).copied().unwrap_or(DEFAULT_COLOR),
            marker: self.markers.get(index).copied().unwrap_or(DEFAULT_MARKER),
            marker_size: self.sizes.get(index).copied().unwrap_or(DEFAULT_MARKER_SIZE),
            line_style: self
                .line_styles
                .get(index)
                .copied()
                .unwrap_or(DEFAULT_LINE_STYLE),
            line_width: self
                .line_widths
                .get(index)
                .copied()
                .unwrap_or(DEFAULT_LINE_WIDTH),
        }
    }

    /// Number of marker entries; bounds multi-curve styling.
    pub fn marker_len(&self) -> usize {
        self.markers.len()
    }
}

/// Presets for font sizes depending on where the plots end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Large labels for slides
    Presentation,
    /// Smaller labels for printed documents
    Thesis,
    /// Keep whatever is configured
    Auto,
}

impl Mode {
    /// Label size in pixels, `None` for [`Mode::Auto`].
    pub const fn label_size(&self) -> Option<f64> {
        match self {
            Mode::Presentation => Some(40.0),
            Mode::Thesis => Some(30.0),
            Mode::Auto => None,
        }
    }
}

/// Palette used for color maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Palette {
    /// Numeric id of a builtin palette
    Builtin(i32),
    /// Custom gradient
    Gradient(ColorGradient),
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Builtin(color::DEFAULT_PALETTE_ID)
    }
}

/// Palette selection plus its inversion state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteState {
    /// Selected palette.
    pub palette: Palette,
    /// Whether the colors run high to low.
    pub inverted: bool,
}

impl PaletteState {
    /// Select `palette`, inverted or not. Requesting the current inversion
    /// again leaves it unchanged.
    pub fn select(&mut self, palette: Palette, invert: bool) {
        self.palette = palette;
        self.inverted = invert;
    }

    /// Effective colors of the palette. Unknown builtin ids yield `None`.
    pub fn colors(&self) -> Option<Vec<Color>> {
        let gradient = match &self.palette {
            Palette::Builtin(id) => color::builtin_palette(*id)?,
            Palette::Gradient(gradient) => gradient.clone(),
        };
        let gradient = if self.inverted {
            gradient.reversed()
        } else {
            gradient
        };
        Some(gradient.colors().to_vec())
    }
}

/// Style configuration consumed by every layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleContext {
    /// Style sequences.
    pub table: StyleTable,
    /// When false, plottables keep the style the caller gave them.
    pub styles_enabled: bool,
    /// Font family for titles, labels and legends.
    pub font: String,
    /// Size of axis titles, labels and legend text in pixels.
    pub label_size: f64,
    /// Color map palette.
    pub palette: PaletteState,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            table: StyleTable::default(),
            styles_enabled: false,
            font: "sans-serif".to_string(),
            label_size: 28.0,
            palette: PaletteState::default(),
        }
    }
}

static SHARED_CONTEXT: OnceLock<RwLock<Arc<StyleContext>>> = OnceLock::new();

fn shared_slot() -> &'static RwLock<Arc<StyleContext>> {
    SHARED_CONTEXT.get_or_init(|| RwLock::new(Arc::new(StyleContext::default())))
}

impl StyleContext {
    /// The process-wide default context.
    pub fn shared() -> Arc<StyleContext> {
        match shared_slot().read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the process-wide default context. Layouts constructed
    /// afterwards pick it up; existing layouts keep their snapshot.
    pub fn set_shared(context: StyleContext) {
        let mut guard = match shared_slot().write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(context);
    }

    /// Replace the style sequences and enable table styling.
    ///
    /// Colors and markers always replace the current sequences; the optional
    /// sequences replace theirs, or clear them when empty.
    pub fn set_style(
        &mut self,
        colors: Vec<Color>,
        markers: Vec<MarkerShape>,
        sizes: Vec<f64>,
        line_styles: Vec<LineStyle>,
        line_widths: Vec<f64>,
    ) {
        self.table = StyleTable {
            colors,
            markers,
            sizes,
            line_styles,
            line_widths,
        };
        self.styles_enabled = true;
    }

    /// Apply a [`Mode`] preset.
    pub fn set_mode(&mut self, mode: Mode) {
        if let Some(size) = mode.label_size() {
            self.label_size = size;
        }
    }

    /// Load a context from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PlotResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PlotError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save the context as pretty-printed JSON.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| PlotError::io(path, e))
    }
}

//! Retained-mode output surface.
//!
//! A layout does not paint directly. It builds a [`Canvas`] holding one or
//! more [`Pad`]s, each with a [`Frame`] (axis ranges and axis styling) and an
//! ordered list of [`Primitive`]s. The canvas is then persisted by
//! [`Canvas::save`], which hands it to the renderer chosen by the file
//! extension. Keeping the display list around makes layouts testable without
//! touching the filesystem.

use std::path::Path;

use serde::Serialize;

use crate::color::Color;
use crate::error::PlotResult;
use crate::plottable::PlotObject;
use crate::range::AxisRange;
use crate::resolver::StyleOutcome;

/// Pad margins as fractions of the pad size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    /// Left margin.
    pub left: f64,
    /// Right margin.
    pub right: f64,
    /// Top margin.
    pub top: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl Margins {
    /// Margins in left, right, top, bottom order.
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.1, 0.1)
    }
}

/// Styling of one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    /// Axis title, empty for none.
    pub title: String,
    /// Multiplier on the default title distance from the axis.
    pub title_offset: f64,
    /// Title text size in pixels.
    pub title_size: f64,
    /// Tick label size in pixels, zero hides the labels.
    pub label_size: f64,
    /// Font family of title and labels.
    pub font: String,
    /// Tick length as a fraction of the frame size.
    pub tick_length: f64,
    /// Whether tick labels are drawn.
    pub labels_visible: bool,
    /// Tick label color.
    pub label_color: Color,
    /// Logarithmic scale.
    pub log: bool,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_offset: 1.0,
            title_size: 28.0,
            label_size: 28.0,
            font: "sans-serif".to_string(),
            tick_length: 0.03,
            labels_visible: true,
            label_color: Color::default(),
            log: false,
        }
    }
}

impl AxisStyle {
    /// Axis with `title`, using `font` and `size` for both title and labels.
    pub fn titled(title: &str, offset: f64, font: &str, size: f64) -> Self {
        Self {
            title: title.to_string(),
            title_offset: offset,
            title_size: size,
            label_size: size,
            font: font.to_string(),
            ..Default::default()
        }
    }

    /// Hide the tick labels: zero size, background colored.
    pub fn hide_labels(&mut self, background: Color) {
        self.label_size = 0.0;
        self.label_color = background;
        self.labels_visible = false;
    }
}

/// Axis frame of a pad: the data ranges and how the axes look.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// X data range.
    pub x_range: AxisRange,
    /// Y data range.
    pub y_range: AxisRange,
    /// Color axis range, present for color-map pads.
    pub z_range: Option<AxisRange>,
    /// X axis styling.
    pub x_axis: AxisStyle,
    /// Y axis styling.
    pub y_axis: AxisStyle,
    /// Color axis styling, present with `z_range`.
    pub z_axis: Option<AxisStyle>,
}

impl Frame {
    /// Frame over the given ranges with default axis styles and no color axis.
    pub fn new(x_range: AxisRange, y_range: AxisRange) -> Self {
        Self {
            x_range,
            y_range,
            z_range: None,
            x_axis: AxisStyle::default(),
            y_axis: AxisStyle::default(),
            z_axis: None,
        }
    }
}

/// One drawn object with its resolved option and style.
#[derive(Debug, Clone, Serialize)]
pub struct Primitive {
    /// The object, shared with the caller's collection.
    pub object: PlotObject,
    /// Draw option after normalization.
    pub option: String,
    /// What the style resolver did to the object.
    pub style: StyleOutcome,
}

/// Rectangular sub-region of the canvas with its own axes.
#[derive(Debug, Clone, Serialize)]
pub struct Pad {
    /// Pad name, unique within a canvas.
    pub name: String,
    /// Lower left and upper right corners in canvas-relative coordinates,
    /// with y growing upwards.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Top edge.
    pub y2: f64,
    /// Frame margins as fractions of the pad size.
    pub margins: Margins,
    /// No fill when set.
    pub transparent: bool,
    /// Tick marks on the top side as well.
    pub ticks_x: bool,
    /// Tick marks on the right side as well.
    pub ticks_y: bool,
    /// Axes of the pad, `None` for pads without a frame.
    pub frame: Option<Frame>,
    /// Colors of the color map, low to high.
    pub palette: Vec<Color>,
    /// Objects in draw order.
    pub primitives: Vec<Primitive>,
}

impl Pad {
    /// Unframed pad spanning `(x1, y1)` to `(x2, y2)` with default margins.
    pub fn new(name: impl Into<String>, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            name: name.into(),
            x1,
            y1,
            x2,
            y2,
            margins: Margins::default(),
            transparent: false,
            ticks_x: false,
            ticks_y: false,
            frame: None,
            palette: Vec::new(),
            primitives: Vec::new(),
        }
    }

    /// Pad covering the whole canvas.
    pub fn full(name: impl Into<String>) -> Self {
        Self::new(name, 0.0, 0.0, 1.0, 1.0)
    }

    /// Append an object to the display list.
    pub fn draw(&mut self, object: PlotObject, option: impl Into<String>, style: StyleOutcome) {
        self.primitives.push(Primitive {
            object,
            option: option.into(),
            style,
        });
    }

    /// Mutable access to the frame.
    pub fn frame_mut(&mut self) -> Option<&mut Frame> {
        self.frame.as_mut()
    }

    /// Whether the X axis is logarithmic.
    pub fn is_log_x(&self) -> bool {
        self.frame.as_ref().is_some_and(|f| f.x_axis.log)
    }

    /// Whether the Y axis is logarithmic.
    pub fn is_log_y(&self) -> bool {
        self.frame.as_ref().is_some_and(|f| f.y_axis.log)
    }

    /// Pad height as a fraction of the canvas height.
    pub fn height_fraction(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Top level output surface.
#[derive(Debug, Clone, Serialize)]
pub struct Canvas {
    /// Canvas name.
    pub name: String,
    /// Canvas title.
    pub title: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Fill color behind all pads.
    pub background: Color,
    /// Pads in paint order.
    pub pads: Vec<Pad>,
}

impl Canvas {
    /// Empty canvas with a white background.
    pub fn new(name: impl Into<String>, title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            width,
            height,
            background: crate::color::WHITE,
            pads: Vec::new(),
        }
    }

    /// Add a pad and return it for configuration.
    pub fn add_pad(&mut self, pad: Pad) -> &mut Pad {
        self.pads.push(pad);
        let last = self.pads.len() - 1;
        &mut self.pads[last]
    }

    /// Pad named `name`, if any.
    pub fn pad(&self, name: &str) -> Option<&Pad> {
        self.pads.iter().find(|p| p.name == name)
    }

    /// Total number of primitives over all pads.
    pub fn primitive_count(&self) -> usize {
        self.pads.iter().map(|p| p.primitives.len()).sum()
    }

    /// Persist the canvas; the format follows the extension of `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        crate::render::save(self, path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plottable::{Hist1D, shared};

    #[test]
    fn test_pad_display_list_keeps_order() {
        let a = shared(Hist1D::new("a", "", 2, 0.0, 1.0));
        let b = shared(Hist1D::new("b", "", 2, 0.0, 1.0));

        let mut canvas = Canvas::new("c", "", 100, 100);
        let pad = canvas.add_pad(Pad::full("p"));
        pad.draw(PlotObject::from(&a), "SAME", StyleOutcome::Disabled);
        pad.draw(PlotObject::from(&b), "SAME HIST", StyleOutcome::Disabled);

        let pad = canvas.pad("p").unwrap();
        assert_eq!(pad.primitives[0].object.name(), "a");
        assert_eq!(pad.primitives[1].option, "SAME HIST");
        assert_eq!(canvas.primitive_count(), 2);
    }

    #[test]
    fn test_hidden_labels() {
        let mut axis = AxisStyle::titled("x", 1.3, "sans-serif", 28.0);
        axis.hide_labels(crate::color::WHITE);
        assert_eq!(axis.label_size, 0.0);
        assert!(!axis.labels_visible);
        assert_eq!(axis.title_size, 28.0);
    }

    #[test]
    fn test_log_flags_follow_frame() {
        let mut pad = Pad::full("p");
        assert!(!pad.is_log_y());
        let mut frame = Frame::new(AxisRange::new(0.0, 1.0), AxisRange::new(1.0, 10.0));
        frame.y_axis.log = true;
        pad.frame = Some(frame);
        assert!(pad.is_log_y());
        assert!(!pad.is_log_x());
    }
}

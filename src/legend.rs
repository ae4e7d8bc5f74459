//! Legend objects and the helpers that build them from delimited text.
//!
//! Labels are read line by line and draw options token by token, so a legend
//! for three objects can be written as `"Data\nFit\nBackground"` with options
//! `"lp l f"`.

use serde::{Serialize, Serializer};

use crate::color::Color;
use crate::plottable::{PlotArray, PlotKind, PlotObject};
use crate::style::{LineAttributes, MarkerAttributes, MarkerShape};

/// What is drawn next to a legend label.
#[derive(Debug, Clone)]
pub enum LegendSwatch {
    /// Text only
    None,
    /// Uses the current style of a plottable
    Object(PlotObject),
    /// Explicit marker and line style
    Style {
        /// Marker of the swatch.
        marker: MarkerAttributes,
        /// Line of the swatch.
        line: LineAttributes,
    },
}

impl Serialize for LegendSwatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LegendSwatch::None => serializer.serialize_none(),
            LegendSwatch::Object(obj) => serializer.serialize_str(&obj.name()),
            LegendSwatch::Style { marker, .. } => marker.serialize(serializer),
        }
    }
}

/// One legend row.
#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    /// Row text.
    pub label: String,
    /// Swatch option letters: `l` line, `p` marker, `f` fill, `e` error.
    pub option: String,
    /// What the row shows next to its text.
    pub swatch: LegendSwatch,
}

/// Legend or free-text annotation box positioned in pad-relative coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    /// Legend name.
    pub name: String,
    /// Left edge.
    pub x1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y1: f64,
    /// Top edge.
    pub y2: f64,
    /// Rows, top to bottom.
    pub entries: Vec<LegendEntry>,
    /// Font family of the rows.
    pub text_font: String,
    /// Row text size in pixels; rows shrink it to fit the box.
    pub text_size: f64,
    /// Row text color.
    pub text_color: Color,
    /// Border width in pixels, zero for none.
    pub border_size: u32,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            name: "legend".to_string(),
            x1: 0.1,
            x2: 0.3,
            y1: 0.7,
            y2: 0.9,
            entries: Vec::new(),
            text_font: "sans-serif".to_string(),
            text_size: 20.0,
            text_color: Color::default(),
            border_size: 1,
        }
    }
}

impl Legend {
    /// Empty legend in the default box.
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per non-legend element of `array`.
    ///
    /// `entries` holds one label per line, `options` one whitespace separated
    /// token per element. A non-empty `title` adds a header row.
    pub fn from_array(array: &PlotArray, entries: &str, options: &str, title: &str) -> Self {
        let mut legend = Self::new();
        if !title.is_empty() {
            legend.add_text(title);
        }

        let mut labels = entries.lines().map(str::trim);
        let mut tokens = options.split_whitespace();

        for obj in array.iter().flatten() {
            if obj.kind() == PlotKind::Legend {
                continue;
            }
            let label = labels.next().unwrap_or_default();
            let option = tokens.next().unwrap_or_default();
            legend.entries.push(LegendEntry {
                label: label.to_string(),
                option: option.to_string(),
                swatch: LegendSwatch::Object(obj.clone()),
            });
        }
        legend
    }

    /// Text-only legend, one row per line of `lines`.
    pub fn from_text(lines: &str) -> Self {
        let mut legend = Self::new();
        for line in lines.lines() {
            legend.add_text(line.trim());
        }
        legend
    }

    /// Legend whose swatches are described in text.
    ///
    /// Each line of `styles` reads `"<color> <marker> <size>"` where color and
    /// marker are indices into `colors` and `markers`; unknown indices fall
    /// back to the style defaults.
    pub fn from_styles(
        styles: &str,
        entries: &str,
        options: &str,
        colors: &[Color],
        markers: &[MarkerShape],
    ) -> Self {
        let mut legend = Self::new();
        let mut labels = entries.lines().map(str::trim);
        let mut tokens = options.split_whitespace();

        for style in styles.lines() {
            let mut fields = style.split_whitespace();
            let color = fields
                .next()
                .and_then(|f| f.parse::<usize>().ok())
                .and_then(|i| colors.get(i).copied())
                .unwrap_or_default();
            let shape = fields
                .next()
                .and_then(|f| f.parse::<usize>().ok())
                .and_then(|i| markers.get(i).copied())
                .unwrap_or_default();
            let size = fields
                .next()
                .and_then(|f| f.parse::<f64>().ok())
                .unwrap_or(crate::style::DEFAULT_MARKER_SIZE);

            legend.entries.push(LegendEntry {
                label: labels.next().unwrap_or_default().to_string(),
                option: tokens.next().unwrap_or_default().to_string(),
                swatch: LegendSwatch::Style {
                    marker: MarkerAttributes { color, shape, size },
                    line: LineAttributes {
                        color,
                        ..Default::default()
                    },
                },
            });
        }
        legend
    }

    /// Append a text-only row.
    pub fn add_text(&mut self, text: &str) {
        self.entries.push(LegendEntry {
            label: text.to_string(),
            option: String::new(),
            swatch: LegendSwatch::None,
        });
    }

    /// Set the box in pad-relative coordinates.
    pub fn set_position(&mut self, x1: f64, x2: f64, y1: f64, y2: f64) {
        self.x1 = x1;
        self.x2 = x2;
        self.y1 = y1;
        self.y2 = y2;
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the legend has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLUE, RED};
    use crate::plottable::{Hist1D, shared};

    #[test]
    fn test_from_array_skips_legends_and_adds_title() {
        let black = shared(Hist1D::new("black", "", 10, -3.0, 3.0));
        let white = shared(Hist1D::new("white", "", 10, -3.0, 3.0));
        let info = shared(Legend::from_text("Info"));

        let mut array = PlotArray::new();
        array.push(&black).push(info).push(&white);

        let legend = Legend::from_array(&array, "Black Histo\n White Histo\n", "lp p", "Sample");
        assert_eq!(legend.len(), 3);
        assert_eq!(legend.entries[0].label, "Sample");
        assert_eq!(legend.entries[1].label, "Black Histo");
        assert_eq!(legend.entries[1].option, "lp");
        assert_eq!(legend.entries[2].label, "White Histo");
        assert_eq!(legend.entries[2].option, "p");
        assert!(matches!(
            &legend.entries[2].swatch,
            LegendSwatch::Object(obj) if obj.name() == "white"
        ));
    }

    #[test]
    fn test_from_text_rows() {
        let legend = Legend::from_text("Black and White Histogram\nExample\n");
        assert_eq!(legend.len(), 2);
        assert!(matches!(legend.entries[1].swatch, LegendSwatch::None));
    }

    #[test]
    fn test_from_styles_resolves_indices() {
        let legend = Legend::from_styles(
            "1 0 3\n7 9 x",
            "first\nsecond",
            "p p",
            &[RED, BLUE],
            &[MarkerShape::OpenSquare],
        );
        match &legend.entries[0].swatch {
            LegendSwatch::Style { marker, .. } => {
                assert_eq!(marker.color, BLUE);
                assert_eq!(marker.shape, MarkerShape::OpenSquare);
                assert_eq!(marker.size, 3.0);
            }
            other => panic!("unexpected swatch {other:?}"),
        }
        match &legend.entries[1].swatch {
            LegendSwatch::Style { marker, .. } => {
                assert_eq!(marker.shape, MarkerShape::FullCircle);
                assert_eq!(marker.size, crate::style::DEFAULT_MARKER_SIZE);
            }
            other => panic!("unexpected swatch {other:?}"),
        }
    }

    #[test]
    fn test_set_position() {
        let mut legend = Legend::new();
        legend.set_position(0.43, 0.6, 0.2, 0.32);
        assert_eq!((legend.x1, legend.x2, legend.y1, legend.y2), (0.43, 0.6, 0.2, 0.32));
    }
}

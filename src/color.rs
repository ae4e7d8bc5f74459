//! Colors and color gradients.
//!
//! A [`ColorGradient`] turns a handful of RGB endpoints (and optional,
//! non-uniform stops) into an ordered sequence of colors. Gradients are
//! generated once at configuration time and are immutable afterwards; the
//! layout engine only ever consumes them as an ordered list of colors.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Opacity, 1 is opaque
    pub alpha: f32,
}

impl Color {
    /// Opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Color from RGB components plus opacity.
    pub const fn rgba(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    /// Gray level, `0` is black and `1` is white.
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    /// 8-bit RGB channels, clamped.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            alpha: mix(self.alpha, other.alpha),
        }
    }

    /// Hex string such as `#ff8000`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

/// Black, also the default color.
pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
/// White, the canvas background.
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
/// Light gray.
pub const GRAY: Color = Color::rgb(0.6, 0.6, 0.6);
/// Dark gray.
pub const DARK_GRAY: Color = Color::rgb(0.2, 0.2, 0.2);
/// Pure red.
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
/// Pure green.
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
/// Pure blue.
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
/// Cyan.
pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
/// Yellow.
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
/// Magenta.
pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
/// Purple.
pub const PURPLE: Color = Color::rgb(0.4, 0.0, 0.6);

/// Red of the ALICE figure style.
pub const ALICE_RED: Color = Color::rgb(0.851, 0.027, 0.094);
/// Blue of the ALICE figure style.
pub const ALICE_BLUE: Color = Color::rgb(0.012, 0.039, 0.549);
/// Grey of the ALICE figure style.
pub const ALICE_GREY: Color = Color::rgb(0.169, 0.220, 0.251);
/// Orange of the ALICE figure style.
pub const ALICE_ORANGE: Color = Color::rgb(0.949, 0.475, 0.059);
/// Rose red of the ALICE figure style.
pub const ALICE_ROSERED: Color = Color::rgb(0.749, 0.255, 0.255);

/// Ordered sequence of colors interpolated from RGB endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    colors: Vec<Color>,
}

impl ColorGradient {
    /// Generate a gradient with `n_points` colors from `endpoints`.
    ///
    /// # Arguments
    /// * `n_points` - Number of colors generated from the endpoints
    /// * `endpoints` - Color endpoints, at least two
    /// * `stops` - Relative position of each endpoint in `[0, 1]`; evenly spaced when empty
    /// * `alpha` - Opacity applied to every generated color
    ///
    /// # Errors
    /// Returns [`PlotError::GradientStops`] if `stops` is non-empty and its length
    /// differs from the number of endpoints, and [`PlotError::InvalidParameter`]
    /// for zero points, fewer than two endpoints or decreasing stops.
    pub fn new(
        n_points: usize,
        endpoints: &[Color],
        stops: &[f64],
        alpha: f32,
    ) -> PlotResult<Self> {
        if n_points == 0 {
            return Err(PlotError::invalid_parameter("n_points", "must be > 0"));
        }
        if endpoints.len() < 2 {
            return Err(PlotError::invalid_parameter(
                "endpoints",
                format!("need at least two colors, got {}", endpoints.len()),
            ));
        }
        if !stops.is_empty() && stops.len() != endpoints.len() {
            return Err(PlotError::GradientStops {
                stops: stops.len(),
                colors: endpoints.len(),
            });
        }
        if stops.windows(2).any(|w| w[1] < w[0]) {
            return Err(PlotError::invalid_parameter(
                "stops",
                "must be non-decreasing",
            ));
        }

        let stops = if stops.is_empty() {
            even_stops(endpoints.len())
        } else {
            stops.to_vec()
        };

        Ok(Self {
            colors: interpolate(n_points, endpoints, &stops, alpha),
        })
    }

    /// Wrap an explicit list of colors.
    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The generated colors, in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors in the gradient.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the gradient holds no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if present.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// The same gradient in reverse order.
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        Self { colors }
    }

    /// Color for a fraction in `[0, 1]` of the gradient.
    pub fn at_fraction(&self, fraction: f64) -> Option<Color> {
        if self.colors.is_empty() {
            return None;
        }
        let last = self.colors.len() - 1;
        let idx = (fraction.clamp(0.0, 1.0) * last as f64).round() as usize;
        self.colors.get(idx.min(last)).copied()
    }
}

fn even_stops(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / (n - 1) as f64).collect()
}

// endpoints.len() == stops.len() >= 2, stops non-decreasing
fn interpolate(n_points: usize, endpoints: &[Color], stops: &[f64], alpha: f32) -> Vec<Color> {
    (0..n_points)
        .map(|k| {
            let t = if n_points == 1 {
                0.0
            } else {
                k as f64 / (n_points - 1) as f64
            };
            let segment = stops
                .windows(2)
                .position(|w| t <= w[1])
                .unwrap_or(stops.len() - 2);
            let (s0, s1) = (stops[segment], stops[segment + 1]);
            let local = if s1 > s0 {
                ((t - s0) / (s1 - s0)).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let mut color = endpoints[segment].lerp(&endpoints[segment + 1], local as f32);
            color.alpha = alpha;
            color
        })
        .collect()
}

/// Rainbow gradient with 20 colors (blue, cyan, green, yellow, red, magenta).
pub fn rainbow() -> ColorGradient {
    let endpoints = [BLUE, CYAN, GREEN, YELLOW, RED, MAGENTA];
    ColorGradient::from_colors(interpolate(20, &endpoints, &even_stops(endpoints.len()), 1.0))
}

/// Gradient through the ALICE logo colors with 100 colors.
pub fn alice_logo() -> ColorGradient {
    let endpoints = [ALICE_GREY, ALICE_BLUE, ALICE_RED, ALICE_ROSERED, ALICE_ORANGE];
    ColorGradient::from_colors(interpolate(100, &endpoints, &even_stops(endpoints.len()), 1.0))
}

/// Purple to yellow gradient with 100 colors.
pub fn purple_to_yellow() -> ColorGradient {
    let endpoints = [PURPLE, YELLOW];
    ColorGradient::from_colors(interpolate(100, &endpoints, &even_stops(2), 1.0))
}

/// Default palette id used for color maps.
pub const DEFAULT_PALETTE_ID: i32 = 57;

/// Gradient for a numeric builtin palette id, if the id is known.
///
/// Known ids: 51 (deep sea), 53 (dark body radiator), 55 (rainbow),
/// 57 (bird) and 112 (viridis).
pub fn builtin_palette(id: i32) -> Option<ColorGradient> {
    let (endpoints, stops): (Vec<Color>, Vec<f64>) = match id {
        51 => (
            vec![
                Color::rgb(0.0, 0.0, 0.0),
                Color::rgb(0.035, 0.09, 0.333),
                Color::rgb(0.098, 0.333, 0.667),
                Color::rgb(0.392, 0.706, 0.875),
                Color::rgb(0.784, 0.949, 1.0),
            ],
            vec![0.0, 0.34, 0.61, 0.84, 1.0],
        ),
        53 => (
            vec![
                Color::rgb(0.0, 0.0, 0.0),
                Color::rgb(0.5, 0.0, 0.0),
                Color::rgb(1.0, 0.35, 0.0),
                Color::rgb(1.0, 0.85, 0.2),
                Color::rgb(1.0, 1.0, 1.0),
            ],
            vec![0.0, 0.25, 0.5, 0.75, 1.0],
        ),
        55 => (
            vec![
                Color::rgb(0.0, 0.0, 0.5),
                Color::rgb(0.0, 0.0, 1.0),
                Color::rgb(0.0, 1.0, 1.0),
                Color::rgb(1.0, 1.0, 0.0),
                Color::rgb(1.0, 0.0, 0.0),
            ],
            vec![0.0, 0.25, 0.5, 0.75, 1.0],
        ),
        57 => (
            vec![
                Color::rgb(0.208, 0.165, 0.529),
                Color::rgb(0.059, 0.361, 0.867),
                Color::rgb(0.078, 0.506, 0.839),
                Color::rgb(0.024, 0.643, 0.792),
                Color::rgb(0.180, 0.718, 0.643),
                Color::rgb(0.529, 0.749, 0.467),
                Color::rgb(0.820, 0.733, 0.349),
                Color::rgb(0.996, 0.784, 0.196),
                Color::rgb(0.976, 0.984, 0.055),
            ],
            vec![0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0],
        ),
        112 => (
            vec![
                Color::rgb(0.267, 0.005, 0.329),
                Color::rgb(0.231, 0.322, 0.545),
                Color::rgb(0.129, 0.569, 0.549),
                Color::rgb(0.369, 0.788, 0.384),
                Color::rgb(0.992, 0.906, 0.145),
            ],
            vec![0.0, 0.25, 0.5, 0.75, 1.0],
        ),
        _ => return None,
    };
    Some(ColorGradient::from_colors(interpolate(
        255, &endpoints, &stops, 1.0,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_gradient_endpoints_are_exact() {
        let gradient = ColorGradient::new(11, &[BLACK, WHITE], &[], 1.0).unwrap();
        assert_eq!(gradient.len(), 11);
        assert_eq!(gradient.get(0), Some(BLACK));
        assert_eq!(gradient.get(10), Some(WHITE));

        let mid = gradient.get(5).unwrap();
        assert_approx_eq!(mid.r as f64, 0.5, 1e-6);
        assert_approx_eq!(mid.g as f64, 0.5, 1e-6);
    }

    #[test]
    fn test_gradient_non_uniform_stops() {
        // Red occupies the first 80% of the range
        let gradient = ColorGradient::new(6, &[RED, RED, BLUE], &[0.0, 0.8, 1.0], 1.0).unwrap();
        assert_eq!(gradient.get(4), Some(RED));
        assert_eq!(gradient.get(5), Some(BLUE));
    }

    #[test]
    fn test_gradient_stop_mismatch_is_rejected() {
        let err = ColorGradient::new(10, &[RED, GREEN, BLUE], &[0.0, 1.0], 1.0).unwrap_err();
        assert!(matches!(
            err,
            PlotError::GradientStops {
                stops: 2,
                colors: 3
            }
        ));
    }

    #[test]
    fn test_gradient_invalid_parameters() {
        assert!(ColorGradient::new(0, &[RED, BLUE], &[], 1.0).is_err());
        assert!(ColorGradient::new(5, &[RED], &[], 1.0).is_err());
        assert!(ColorGradient::new(5, &[RED, BLUE], &[1.0, 0.0], 1.0).is_err());
    }

    #[test]
    fn test_gradient_alpha_and_reverse() {
        let gradient = ColorGradient::new(3, &[RED, BLUE], &[], 0.5).unwrap();
        assert!(gradient.colors().iter().all(|c| c.alpha == 0.5));

        let reversed = gradient.reversed();
        assert_eq!(reversed.get(0).map(|c| c.b), Some(1.0));
        assert_eq!(reversed.reversed(), gradient);
    }

    #[test]
    fn test_predefined_palettes() {
        assert_eq!(rainbow().len(), 20);
        assert_eq!(alice_logo().len(), 100);
        assert_eq!(purple_to_yellow().get(0), Some(PURPLE));
        assert!(builtin_palette(DEFAULT_PALETTE_ID).is_some());
        assert!(builtin_palette(-3).is_none());
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(RED.to_hex(), "#ff0000");
        assert_eq!(Color::gray(0.0).to_hex(), "#000000");
    }
}

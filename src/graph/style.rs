//! src/graph/style.rs
//!
//! Colours, gradients and stroke descriptions handed to a drawing surface.
//!
//! Kept independent of any UI toolkit; front-ends convert `Rgb` into their own
//! colour type.

use std::fmt;
use std::str::FromStr;

use crate::error::{GraphError, Result};

/// 24-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const LIGHT_GREY: Rgb = Rgb(0xd3, 0xd3, 0xd3);
    pub const SERIES_BLUE: Rgb = Rgb(0x2f, 0x7e, 0xd8);
    pub const ALERT_RED: Rgb = Rgb(0xd8, 0x43, 0x2f);
    pub const AMBER: Rgb = Rgb(0xf0, 0xb4, 0x29);

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GraphError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GraphError::InvalidColor(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear blend; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl FromStr for Rgb {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Vertical gradient with 2 to 4 stops. Offset 0 is the top of the surface,
/// offset 1 the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<(f64, Rgb)>,
}

impl Gradient {
    pub const MIN_STOPS: usize = 2;
    pub const MAX_STOPS: usize = 4;

    /// Build a gradient; offsets must lie in `[0, 1]` and be non-decreasing.
    pub fn new(stops: Vec<(f64, Rgb)>) -> Result<Self> {
        if !(Self::MIN_STOPS..=Self::MAX_STOPS).contains(&stops.len()) {
            return Err(GraphError::InvalidGradient(format!(
                "expected {}..={} stops, got {}",
                Self::MIN_STOPS,
                Self::MAX_STOPS,
                stops.len()
            )));
        }
        if let Some((off, _)) = stops
            .iter()
            .find(|(off, _)| !off.is_finite() || !(0.0..=1.0).contains(off))
        {
            return Err(GraphError::InvalidGradient(format!(
                "stop offset {off} outside [0, 1]"
            )));
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(GraphError::InvalidGradient(
                "stop offsets must be non-decreasing".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    /// Colour at offset `t` (clamped to `[0, 1]`).
    pub fn color_at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let first = self.stops[0];
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.0 {
                let span = b.0 - a.0;
                if span <= f64::EPSILON {
                    return b.1;
                }
                return a.1.lerp(b.1, (t - a.0) / span);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

impl Default for Gradient {
    /// Red at the extremes, blue on the centerline.
    fn default() -> Self {
        Self {
            stops: vec![
                (0.0, Rgb::ALERT_RED),
                (0.3, Rgb::AMBER),
                (0.5, Rgb::SERIES_BLUE),
                (1.0, Rgb::ALERT_RED),
            ],
        }
    }
}

/// How the series line is painted.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderStyle {
    Solid(Rgb),
    Gradient(Gradient),
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle::Solid(Rgb::SERIES_BLUE)
    }
}

/// Paint plus line width for one stroke call.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub style: RenderStyle,
    pub width: f64,
}

impl Stroke {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            style: RenderStyle::Solid(color),
            width,
        }
    }

    /// Colour of the stroke at a vertical position, given the surface height.
    pub fn color_at(&self, y: f64, height: f64) -> Rgb {
        match &self.style {
            RenderStyle::Solid(c) => *c,
            RenderStyle::Gradient(g) => g.color_at(if height > 0.0 { y / height } else { 0.5 }),
        }
    }
}

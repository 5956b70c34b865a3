use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::Point;

/// Unit-clamped scalar used for every progress value and for opacities.
///
/// Construction never fails: values outside `[0, 1]` clamp silently and `NaN` maps to `0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct AlphaValue(f64);

impl AlphaValue {
    /// Progress `0`.
    pub const ZERO: Self = Self(0.0);
    /// Progress `1`.
    pub const ONE: Self = Self(1.0);

    /// Create a clamped alpha value.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// The clamped number.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether this is exactly `0`.
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Whether this is exactly `1`.
    pub fn is_one(self) -> bool {
        self.0 == 1.0
    }
}

impl From<f64> for AlphaValue {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<AlphaValue> for f64 {
    fn from(v: AlphaValue) -> Self {
        v.0
    }
}

impl fmt::Display for AlphaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype numbers that interpolate through their raw `f64`.
pub trait WrappedNumber: Copy {
    /// Raw number.
    fn number(self) -> f64;
    /// Rebuild from a raw number, applying the type's own normalization.
    fn from_number(v: f64) -> Self;
}

/// Unbounded coordinate in user space.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Coordinate(pub f64);

/// Non-negative length (radius, width, stroke width, …). Negative input clamps to `0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Length(f64);

/// Signed scalar without a unit (e.g. a miter limit).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Delta(pub f64);

impl Length {
    /// Clamp `v` to a non-negative length; `NaN` becomes `0`.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self(0.0);
        }
        Self(v.max(0.0))
    }

    /// The length as a number.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Length {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Length> for f64 {
    fn from(v: Length) -> Self {
        v.0
    }
}

impl From<f64> for Coordinate {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl From<f64> for Delta {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl WrappedNumber for Coordinate {
    fn number(self) -> f64 {
        self.0
    }

    fn from_number(v: f64) -> Self {
        Self(v)
    }
}

impl WrappedNumber for Length {
    fn number(self) -> f64 {
        self.0
    }

    fn from_number(v: f64) -> Self {
        Self::new(v)
    }
}

impl WrappedNumber for Delta {
    fn number(self) -> f64 {
        self.0
    }

    fn from_number(v: f64) -> Self {
        Self(v)
    }
}

impl WrappedNumber for AlphaValue {
    fn number(self) -> f64 {
        self.0
    }

    fn from_number(v: f64) -> Self {
        Self::new(v)
    }
}

/// A point made of two coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: Coordinate,
    /// Vertical coordinate.
    pub y: Coordinate,
}

impl Position {
    /// Position from raw coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Coordinate(x),
            y: Coordinate(y),
        }
    }

    /// Convert to a `kurbo` point.
    pub fn to_point(self) -> Point {
        Point::new(self.x.0, self.y.0)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $css:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $(
                #[doc = concat!("`", $css, "`")]
                $variant,
            )+
        }

        impl $name {
            /// CSS keyword for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $css,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MotionError;

            fn from_str(s: &str) -> MotionResult<Self> {
                match s.trim() {
                    $($css => Ok(Self::$variant),)+
                    other => Err(MotionError::validation(format!(
                        "unknown {} \"{other}\"",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

keyword_enum! {
    /// Pointer cursor shown over an element.
    Cursor {
        Auto => "auto",
        Default => "default",
        None => "none",
        Pointer => "pointer",
        Crosshair => "crosshair",
        Move => "move",
        Text => "text",
        Wait => "wait",
        Help => "help",
        Progress => "progress",
        NotAllowed => "not-allowed",
        Grab => "grab",
        Grabbing => "grabbing",
    }
}

keyword_enum! {
    /// Shape drawn at the ends of open strokes.
    StrokeLinecap {
        Butt => "butt",
        Round => "round",
        Square => "square",
    }
}

keyword_enum! {
    /// Shape drawn at stroke corners.
    StrokeLinejoin {
        Miter => "miter",
        MiterClip => "miter-clip",
        Round => "round",
        Bevel => "bevel",
        Arcs => "arcs",
    }
}

keyword_enum! {
    /// Whether an element is painted.
    Visibility {
        Visible => "visible",
        Hidden => "hidden",
        Collapse => "collapse",
    }
}

/// Dash pattern lengths, alternating dash and gap.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StrokeDasharray(pub Vec<f64>);

impl StrokeDasharray {
    /// Pattern from dash and gap lengths.
    pub fn new(dashes: impl Into<Vec<f64>>) -> Self {
        Self(dashes.into())
    }
}

impl fmt::Display for StrokeDasharray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for StrokeDasharray {
    type Err = MotionError;

    fn from_str(s: &str) -> MotionResult<Self> {
        let s = s.trim();
        if s == "none" {
            return Ok(Self::default());
        }
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .ok_or_else(|| {
                        MotionError::validation(format!("invalid dash length \"{part}\""))
                    })
            })
            .collect::<MotionResult<Vec<_>>>()
            .map(Self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

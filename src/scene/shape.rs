use kurbo::{ParamCurve, ParamCurveArclen, Shape as _};

use crate::animation::interpolate::Lerp;
use crate::foundation::core::{Coordinate, Length, Position};
use crate::scene::element::Element;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// Circle given by its center and radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Circle {
    /// Horizontal center.
    pub center_x: Option<Coordinate>,
    /// Vertical center.
    pub center_y: Option<Coordinate>,
    /// Radius.
    pub radius: Option<Length>,
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Rectangle {
    /// Left edge.
    pub x: Option<Coordinate>,
    /// Top edge.
    pub y: Option<Coordinate>,
    /// Width.
    pub width: Option<Length>,
    /// Height.
    pub height: Option<Length>,
    /// Horizontal corner radius.
    pub corner_radius_x: Option<Length>,
    /// Vertical corner radius.
    pub corner_radius_y: Option<Length>,
}

/// Straight segment. `path_length` overrides the author's notion of the total length
/// used for dash computations.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Line {
    /// Start point, horizontal.
    pub start_x: Option<Coordinate>,
    /// Start point, vertical.
    pub start_y: Option<Coordinate>,
    /// End point, horizontal.
    pub end_x: Option<Coordinate>,
    /// End point, vertical.
    pub end_y: Option<Coordinate>,
    /// Author-declared total length.
    pub path_length: Option<Length>,
}

/// Cubic Bézier segment from `start` to `end`, shaped by two control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct CubicBezier {
    /// Start point, horizontal.
    pub start_x: Option<Coordinate>,
    /// Start point, vertical.
    pub start_y: Option<Coordinate>,
    /// First control point, horizontal.
    pub control1_x: Option<Coordinate>,
    /// First control point, vertical.
    pub control1_y: Option<Coordinate>,
    /// Second control point, horizontal.
    pub control2_x: Option<Coordinate>,
    /// Second control point, vertical.
    pub control2_y: Option<Coordinate>,
    /// End point, horizontal.
    pub end_x: Option<Coordinate>,
    /// End point, vertical.
    pub end_y: Option<Coordinate>,
}

/// Nested viewport drawing another element inside its own box.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Container {
    /// Left edge of the viewport.
    pub x: Option<Coordinate>,
    /// Top edge of the viewport.
    pub y: Option<Coordinate>,
    /// Viewport width.
    pub width: Option<Length>,
    /// Viewport height.
    pub height: Option<Length>,
    /// Element drawn inside.
    pub child: Option<Element>,
}

/// Geometry of an element.
///
/// Shapes are immutable snapshots; a transition produces a new value. Accessors that do
/// not apply to a variant return `None`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// No geometry; draws nothing.
    #[default]
    Empty,
    /// A circle.
    Circle(Circle),
    /// A rectangle.
    Rectangle(Rectangle),
    /// A line.
    Line(Line),
    /// A cubic Bézier curve.
    CubicBezier(CubicBezier),
    /// A nested viewport.
    Container(Container),
}

/// Variant tag of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// [`Shape::Empty`].
    Empty,
    /// [`Shape::Circle`].
    Circle,
    /// [`Shape::Rectangle`].
    Rectangle,
    /// [`Shape::Line`].
    Line,
    /// [`Shape::CubicBezier`].
    CubicBezier,
    /// [`Shape::Container`].
    Container,
}

fn c(v: f64) -> Option<Coordinate> {
    Some(Coordinate(v))
}

fn l(v: f64) -> Option<Length> {
    Some(Length::new(v))
}

fn num<T: crate::foundation::core::WrappedNumber>(v: Option<T>) -> Option<f64> {
    v.map(T::number)
}

fn point(x: Option<Coordinate>, y: Option<Coordinate>) -> Option<kurbo::Point> {
    Some(kurbo::Point::new(x?.0, y?.0))
}

impl Shape {
    /// Circle with every field set.
    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self::Circle(Circle {
            center_x: c(center_x),
            center_y: c(center_y),
            radius: l(radius),
        })
    }

    /// Rectangle with square corners.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rectangle(Rectangle {
            x: c(x),
            y: c(y),
            width: l(width),
            height: l(height),
            ..Rectangle::default()
        })
    }

    /// Line between two points.
    pub fn line(start: impl Into<Position>, end: impl Into<Position>) -> Self {
        let (start, end) = (start.into(), end.into());
        Self::Line(Line {
            start_x: Some(start.x),
            start_y: Some(start.y),
            end_x: Some(end.x),
            end_y: Some(end.y),
            path_length: None,
        })
    }

    /// Bézier curve with every point set.
    pub fn cubic_bezier(
        start: impl Into<Position>,
        control1: impl Into<Position>,
        control2: impl Into<Position>,
        end: impl Into<Position>,
    ) -> Self {
        let [s, c1, c2, e] = [start.into(), control1.into(), control2.into(), end.into()];
        Self::CubicBezier(CubicBezier {
            start_x: Some(s.x),
            start_y: Some(s.y),
            control1_x: Some(c1.x),
            control1_y: Some(c1.y),
            control2_x: Some(c2.x),
            control2_y: Some(c2.y),
            end_x: Some(e.x),
            end_y: Some(e.y),
        })
    }

    /// Container viewport.
    pub fn container(x: f64, y: f64, width: f64, height: f64, child: Option<Element>) -> Self {
        Self::Container(Container {
            x: c(x),
            y: c(y),
            width: l(width),
            height: l(height),
            child,
        })
    }

    /// Variant tag.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Empty => ShapeKind::Empty,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Line(_) => ShapeKind::Line,
            Self::CubicBezier(_) => ShapeKind::CubicBezier,
            Self::Container(_) => ShapeKind::Container,
        }
    }

    /// Horizontal center. Derived from the bounds or end points for variants without one.
    pub fn center_x(&self) -> Option<Coordinate> {
        match self {
            Self::Circle(s) => s.center_x,
            Self::Rectangle(s) => c(s.x?.0 + num(s.width).unwrap_or(0.0) / 2.0),
            Self::Line(s) => c((s.start_x?.0 + s.end_x?.0) / 2.0),
            Self::CubicBezier(s) => self.bezier_mid(s).map(|p| Coordinate(p.x)),
            _ => None,
        }
    }

    /// Vertical center, see [`Shape::center_x`].
    pub fn center_y(&self) -> Option<Coordinate> {
        match self {
            Self::Circle(s) => s.center_y,
            Self::Rectangle(s) => c(s.y?.0 + num(s.height).unwrap_or(0.0) / 2.0),
            Self::Line(s) => c((s.start_y?.0 + s.end_y?.0) / 2.0),
            Self::CubicBezier(s) => self.bezier_mid(s).map(|p| Coordinate(p.y)),
            _ => None,
        }
    }

    /// Both center coordinates, when both are known.
    pub fn center(&self) -> Option<Position> {
        Some(Position {
            x: self.center_x()?,
            y: self.center_y()?,
        })
    }

    // B(1/2) = (P0 + 3 P1 + 3 P2 + P3) / 8
    fn bezier_mid(&self, s: &CubicBezier) -> Option<kurbo::Point> {
        Some(bezier(s)?.eval(0.5))
    }

    /// Circle radius; for rectangles, a quarter of width plus height.
    pub fn radius(&self) -> Option<Length> {
        match self {
            Self::Circle(s) => s.radius,
            Self::Rectangle(s) if s.width.is_some() || s.height.is_some() => {
                l((num(s.width).unwrap_or(0.0) + num(s.height).unwrap_or(0.0)) / 4.0)
            }
            _ => None,
        }
    }

    /// Circle radius or horizontal corner radius.
    pub fn radius_x(&self) -> Option<Length> {
        match self {
            Self::Circle(s) => s.radius,
            Self::Rectangle(s) => s.corner_radius_x,
            _ => None,
        }
    }

    /// Circle radius or vertical corner radius.
    pub fn radius_y(&self) -> Option<Length> {
        match self {
            Self::Circle(s) => s.radius,
            Self::Rectangle(s) => s.corner_radius_y,
            _ => None,
        }
    }

    /// Left edge of the bounding box, for circles and boxed shapes.
    pub fn top_left_x(&self) -> Option<Coordinate> {
        match self {
            Self::Circle(s) => c(s.center_x?.0 - num(s.radius).unwrap_or(0.0)),
            Self::Rectangle(s) => s.x,
            Self::Container(s) => s.x,
            _ => None,
        }
    }

    /// Top edge, see [`Shape::top_left_x`].
    pub fn top_left_y(&self) -> Option<Coordinate> {
        match self {
            Self::Circle(s) => c(s.center_y?.0 - num(s.radius).unwrap_or(0.0)),
            Self::Rectangle(s) => s.y,
            Self::Container(s) => s.y,
            _ => None,
        }
    }

    /// Both top-left coordinates.
    pub fn top_left(&self) -> Option<Position> {
        Some(Position {
            x: self.top_left_x()?,
            y: self.top_left_y()?,
        })
    }

    /// Box width; a circle's diameter.
    pub fn width(&self) -> Option<Length> {
        match self {
            Self::Circle(s) => l(s.radius?.get() * 2.0),
            Self::Rectangle(s) => s.width,
            Self::Container(s) => s.width,
            _ => None,
        }
    }

    /// Box height; a circle's diameter.
    pub fn height(&self) -> Option<Length> {
        match self {
            Self::Circle(s) => l(s.radius?.get() * 2.0),
            Self::Rectangle(s) => s.height,
            Self::Container(s) => s.height,
            _ => None,
        }
    }

    /// Start point of lines and curves, horizontal.
    pub fn start_x(&self) -> Option<Coordinate> {
        match self {
            Self::Line(s) => s.start_x,
            Self::CubicBezier(s) => s.start_x,
            _ => None,
        }
    }

    /// Start point, vertical.
    pub fn start_y(&self) -> Option<Coordinate> {
        match self {
            Self::Line(s) => s.start_y,
            Self::CubicBezier(s) => s.start_y,
            _ => None,
        }
    }

    /// End point, horizontal.
    pub fn end_x(&self) -> Option<Coordinate> {
        match self {
            Self::Line(s) => s.end_x,
            Self::CubicBezier(s) => s.end_x,
            _ => None,
        }
    }

    /// End point, vertical.
    pub fn end_y(&self) -> Option<Coordinate> {
        match self {
            Self::Line(s) => s.end_y,
            Self::CubicBezier(s) => s.end_y,
            _ => None,
        }
    }

    /// Start point.
    pub fn start(&self) -> Option<Position> {
        Some(Position {
            x: self.start_x()?,
            y: self.start_y()?,
        })
    }

    /// End point.
    pub fn end(&self) -> Option<Position> {
        Some(Position {
            x: self.end_x()?,
            y: self.end_y()?,
        })
    }

    /// First Bézier control point, horizontal.
    pub fn control1_x(&self) -> Option<Coordinate> {
        match self {
            Self::CubicBezier(s) => s.control1_x,
            _ => None,
        }
    }

    /// First Bézier control point, vertical.
    pub fn control1_y(&self) -> Option<Coordinate> {
        match self {
            Self::CubicBezier(s) => s.control1_y,
            _ => None,
        }
    }

    /// Second Bézier control point, horizontal.
    pub fn control2_x(&self) -> Option<Coordinate> {
        match self {
            Self::CubicBezier(s) => s.control2_x,
            _ => None,
        }
    }

    /// Second Bézier control point, vertical.
    pub fn control2_y(&self) -> Option<Coordinate> {
        match self {
            Self::CubicBezier(s) => s.control2_y,
            _ => None,
        }
    }

    /// Declared path length of a line.
    pub fn path_length(&self) -> Option<Length> {
        match self {
            Self::Line(s) => s.path_length,
            _ => None,
        }
    }

    /// Element inside a container.
    pub fn child(&self) -> Option<Element> {
        match self {
            Self::Container(s) => s.child,
            _ => None,
        }
    }

    /// Geometric length of the outline, when the shape is fully specified.
    pub fn outline_length(&self) -> Option<Length> {
        let len = match self {
            Self::Circle(s) => {
                kurbo::Circle::new((0.0, 0.0), s.radius?.get()).perimeter(ARCLEN_ACCURACY)
            }
            Self::Rectangle(s) => {
                let (w, h) = (s.width?.get(), s.height?.get());
                let corner = num(s.corner_radius_x)
                    .into_iter()
                    .chain(num(s.corner_radius_y))
                    .fold(f64::INFINITY, f64::min);
                if corner.is_finite() && corner > 0.0 {
                    kurbo::RoundedRect::new(0.0, 0.0, w, h, corner.min(w.min(h) / 2.0))
                        .perimeter(ARCLEN_ACCURACY)
                } else {
                    kurbo::Rect::new(0.0, 0.0, w, h).perimeter(ARCLEN_ACCURACY)
                }
            }
            Self::Line(s) => {
                let start = point(s.start_x, s.start_y)?;
                let end = point(s.end_x, s.end_y)?;
                (end - start).hypot()
            }
            Self::CubicBezier(s) => bezier(s)?.arclen(ARCLEN_ACCURACY),
            _ => return None,
        };
        l(len)
    }
}

fn bezier(s: &CubicBezier) -> Option<kurbo::CubicBez> {
    Some(kurbo::CubicBez::new(
        point(s.start_x, s.start_y)?,
        point(s.control1_x, s.control1_y)?,
        point(s.control2_x, s.control2_y)?,
        point(s.end_x, s.end_y)?,
    ))
}

fn lerp_opt<T: Lerp + Copy>(a: Option<T>, b: Option<T>, t: f64) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(T::lerp(&a, &b, t)),
        _ => b,
    }
}

impl Lerp for Shape {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Circle(a), Self::Circle(b)) => Self::Circle(Circle {
                center_x: lerp_opt(a.center_x, b.center_x, t),
                center_y: lerp_opt(a.center_y, b.center_y, t),
                radius: lerp_opt(a.radius, b.radius, t),
            }),
            (Self::Rectangle(a), Self::Rectangle(b)) => Self::Rectangle(Rectangle {
                x: lerp_opt(a.x, b.x, t),
                y: lerp_opt(a.y, b.y, t),
                width: lerp_opt(a.width, b.width, t),
                height: lerp_opt(a.height, b.height, t),
                corner_radius_x: lerp_opt(a.corner_radius_x, b.corner_radius_x, t),
                corner_radius_y: lerp_opt(a.corner_radius_y, b.corner_radius_y, t),
            }),
            (Self::Line(a), Self::Line(b)) => Self::Line(Line {
                start_x: lerp_opt(a.start_x, b.start_x, t),
                start_y: lerp_opt(a.start_y, b.start_y, t),
                end_x: lerp_opt(a.end_x, b.end_x, t),
                end_y: lerp_opt(a.end_y, b.end_y, t),
                path_length: lerp_opt(a.path_length, b.path_length, t),
            }),
            (Self::CubicBezier(a), Self::CubicBezier(b)) => Self::CubicBezier(CubicBezier {
                start_x: lerp_opt(a.start_x, b.start_x, t),
                start_y: lerp_opt(a.start_y, b.start_y, t),
                control1_x: lerp_opt(a.control1_x, b.control1_x, t),
                control1_y: lerp_opt(a.control1_y, b.control1_y, t),
                control2_x: lerp_opt(a.control2_x, b.control2_x, t),
                control2_y: lerp_opt(a.control2_y, b.control2_y, t),
                end_x: lerp_opt(a.end_x, b.end_x, t),
                end_y: lerp_opt(a.end_y, b.end_y, t),
            }),
            (Self::Container(a), Self::Container(b)) => Self::Container(Container {
                x: lerp_opt(a.x, b.x, t),
                y: lerp_opt(a.y, b.y, t),
                width: lerp_opt(a.width, b.width, t),
                height: lerp_opt(a.height, b.height, t),
                child: if t <= 0.5 { a.child } else { b.child },
            }),
            _ => b.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/shape.rs"]
mod tests;

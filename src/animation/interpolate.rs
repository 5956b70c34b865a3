//! Interpolation cells.
//!
//! Every interpolation is a computed cell over `(from, to, progress)` and returns `from`
//! exactly at progress `0` and `to` exactly at progress `1`. For optional values an absent
//! endpoint strictly between the two makes the result snap to `to`.

use crate::foundation::color::Color;
use crate::foundation::core::{AlphaValue, Coordinate, Delta, Length, Position, WrappedNumber};
use crate::reactive::graph::{Cell, CellGraph, CellValue};
use crate::scene::shape::Shape;

/// Builds the cell interpolating between two cells under a progress cell.
pub type Interpolation<T> = fn(&mut CellGraph, Cell<T>, Cell<T>, Cell<AlphaValue>) -> Cell<T>;

/// Values with a notion of linear blend.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (`t = 0`) and `b` (`t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

macro_rules! lerp_wrapped {
    ($($t:ty),+) => {
        $(
            impl Lerp for $t {
                fn lerp(a: &Self, b: &Self, t: f64) -> Self {
                    <$t>::from_number(f64::lerp(&a.number(), &b.number(), t))
                }
            }
        )+
    };
}

lerp_wrapped!(Coordinate, Length, Delta, AlphaValue);

impl Lerp for Position {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: Coordinate::lerp(&a.x, &b.x, t),
            y: Coordinate::lerp(&a.y, &b.y, t),
        }
    }
}

impl Lerp for Color {
    // Straight-alpha sRGB, channel by channel.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::rgba(
            f64::lerp(&a.r, &b.r, t),
            f64::lerp(&a.g, &b.g, t),
            f64::lerp(&a.b, &b.b, t),
            f64::lerp(&a.a, &b.a, t),
        )
    }
}

/// Interpolate values that are always present.
pub fn interpolate_value<T: Lerp + CellValue>(
    graph: &mut CellGraph,
    from: Cell<T>,
    to: Cell<T>,
    progress: Cell<AlphaValue>,
) -> Cell<T> {
    graph.computed(&[from.id(), to.id(), progress.id()], move |g| {
        let p = g.get(progress);
        if p.is_zero() {
            return g.get(from);
        }
        if p.is_one() {
            return g.get(to);
        }
        g.with(from, |a| g.with(to, |b| T::lerp(a, b, p.get())))
    })
}

/// Interpolate optional values; an absent endpoint mid-transition yields `to`.
pub fn interpolate_optional<T: Lerp + CellValue>(
    graph: &mut CellGraph,
    from: Cell<Option<T>>,
    to: Cell<Option<T>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<T>> {
    graph.computed(&[from.id(), to.id(), progress.id()], move |g| {
        let p = g.get(progress);
        if p.is_zero() {
            return g.get(from);
        }
        if p.is_one() {
            return g.get(to);
        }
        g.with(from, |a| {
            g.with(to, |b| match (a, b) {
                (Some(a), Some(b)) => Some(T::lerp(a, b, p.get())),
                _ => b.clone(),
            })
        })
    })
}

/// `from` while progress is at most `0.5`, `to` afterwards.
pub fn interpolate_discrete<T: CellValue>(
    graph: &mut CellGraph,
    from: Cell<T>,
    to: Cell<T>,
    progress: Cell<AlphaValue>,
) -> Cell<T> {
    graph.computed(&[from.id(), to.id(), progress.id()], move |g| {
        if g.get(progress).get() <= 0.5 {
            g.get(from)
        } else {
            g.get(to)
        }
    })
}

/// Blend plain numbers.
pub fn interpolate_number(
    graph: &mut CellGraph,
    from: Cell<f64>,
    to: Cell<f64>,
    progress: Cell<AlphaValue>,
) -> Cell<f64> {
    interpolate_value(graph, from, to, progress)
}

/// Blend optional numbers, such as a stroke width that may be unset.
pub fn interpolate_optional_number(
    graph: &mut CellGraph,
    from: Cell<Option<f64>>,
    to: Cell<Option<f64>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<f64>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional coordinates.
pub fn interpolate_coordinate(
    graph: &mut CellGraph,
    from: Cell<Option<Coordinate>>,
    to: Cell<Option<Coordinate>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<Coordinate>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional lengths.
pub fn interpolate_length(
    graph: &mut CellGraph,
    from: Cell<Option<Length>>,
    to: Cell<Option<Length>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<Length>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional deltas.
pub fn interpolate_delta(
    graph: &mut CellGraph,
    from: Cell<Option<Delta>>,
    to: Cell<Option<Delta>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<Delta>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional alpha values.
pub fn interpolate_alpha(
    graph: &mut CellGraph,
    from: Cell<Option<AlphaValue>>,
    to: Cell<Option<AlphaValue>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<AlphaValue>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional positions along the straight line between them.
pub fn interpolate_position(
    graph: &mut CellGraph,
    from: Cell<Option<Position>>,
    to: Cell<Option<Position>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<Position>> {
    interpolate_optional(graph, from, to, progress)
}

/// Blend optional colors channel by channel.
pub fn interpolate_color(
    graph: &mut CellGraph,
    from: Cell<Option<Color>>,
    to: Cell<Option<Color>>,
    progress: Cell<AlphaValue>,
) -> Cell<Option<Color>> {
    interpolate_optional(graph, from, to, progress)
}

/// Field-wise blend between shapes of one variant; a variant change jump-cuts to `to`.
pub fn interpolate_shape(
    graph: &mut CellGraph,
    from: Cell<Shape>,
    to: Cell<Shape>,
    progress: Cell<AlphaValue>,
) -> Cell<Shape> {
    interpolate_value(graph, from, to, progress)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;

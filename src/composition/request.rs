//! Transition targets.
//!
//! A setter accepts a literal value, any cell handle, or a [`Request`]: a deferred
//! reference to another element's property that is resolved when the setter runs, i.e.
//! against the live cells as left by every step compiled before it.

use std::fmt;
use std::rc::Rc;

use crate::foundation::color::Color;
use crate::foundation::core::{
    AlphaValue, Coordinate, Cursor, Delta, Length, Position, StrokeDasharray, StrokeLinecap,
    StrokeLinejoin, Visibility,
};
use crate::foundation::error::{MotionError, MotionResult};
use crate::reactive::graph::{AsCell, Cell, CellGraph, CellValue, Source, Wrapper};
use crate::scene::element::Element;
use crate::scene::registry::Selector;
use crate::scene::shape::Shape;
use crate::scene::store::Scene;

type Resolve<T> = Rc<dyn Fn(&mut Scene) -> Cell<T>>;

/// Deferred reference to a cell, resolved against the scene when a setter uses it.
pub struct Request<T>(Resolve<T>);

impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Request(..)")
    }
}

impl<T: CellValue> Request<T> {
    /// Request resolved by `resolve` each time a transition needs its cell.
    pub fn new(resolve: impl Fn(&mut Scene) -> Cell<T> + 'static) -> Self {
        Self(Rc::new(resolve))
    }

    /// Resolve against `scene`, creating referenced elements as needed.
    pub fn resolve(&self, scene: &mut Scene) -> Cell<T> {
        (self.0)(scene)
    }

    /// Transform the resolved value.
    pub fn map<U: CellValue>(self, f: impl Fn(&T) -> U + 'static) -> Request<U> {
        let f = Rc::new(f);
        Request::new(move |scene| {
            let cell = self.resolve(scene);
            let f = Rc::clone(&f);
            scene.graph.map(cell, move |v| f(v))
        })
    }
}

/// A normalized setter argument.
pub enum Target<T> {
    /// A constant.
    Value(T),
    /// An existing cell, read live.
    Cell(Cell<T>),
    /// A deferred read resolved at compile time.
    Request(Request<T>),
    /// An argument that failed to convert; reported when the step compiles.
    Invalid(MotionError),
}

impl<T: CellValue> Target<T> {
    pub(crate) fn resolve(self, scene: &mut Scene) -> MotionResult<Cell<T>> {
        match self {
            Self::Value(v) => Ok(scene.graph.constant(v)),
            Self::Cell(c) => Ok(c),
            Self::Request(r) => Ok(r.resolve(scene)),
            Self::Invalid(err) => Err(err),
        }
    }
}

/// Conversion of setter arguments into a [`Target`].
pub trait IntoTarget<T> {
    /// Perform the conversion.
    fn into_target(self) -> Target<T>;
}

impl<T: CellValue> IntoTarget<T> for T {
    fn into_target(self) -> Target<T> {
        Target::Value(self)
    }
}

impl<T: CellValue> IntoTarget<Option<T>> for T {
    fn into_target(self) -> Target<Option<T>> {
        Target::Value(Some(self))
    }
}

impl<T: CellValue> IntoTarget<T> for Target<T> {
    fn into_target(self) -> Target<T> {
        self
    }
}

impl<T: CellValue> IntoTarget<T> for Cell<T> {
    fn into_target(self) -> Target<T> {
        Target::Cell(self)
    }
}

impl<T: CellValue> IntoTarget<T> for Source<T> {
    fn into_target(self) -> Target<T> {
        Target::Cell(self.as_cell())
    }
}

impl<T: CellValue> IntoTarget<T> for Wrapper<T> {
    fn into_target(self) -> Target<T> {
        Target::Cell(self.as_cell())
    }
}

impl<T: CellValue> IntoTarget<T> for Request<T> {
    fn into_target(self) -> Target<T> {
        Target::Request(self)
    }
}

macro_rules! numeric_target {
    ($($t:ty),+) => {
        $(
            impl IntoTarget<Option<$t>> for f64 {
                fn into_target(self) -> Target<Option<$t>> {
                    Target::Value(Some(<$t>::from(self)))
                }
            }

            impl IntoTarget<Option<$t>> for i32 {
                fn into_target(self) -> Target<Option<$t>> {
                    Target::Value(Some(<$t>::from(f64::from(self))))
                }
            }
        )+
    };
}

numeric_target!(Coordinate, Length, Delta, AlphaValue);

impl IntoTarget<f64> for i32 {
    fn into_target(self) -> Target<f64> {
        Target::Value(f64::from(self))
    }
}

impl IntoTarget<Option<Position>> for (f64, f64) {
    fn into_target(self) -> Target<Option<Position>> {
        Target::Value(Some(Position::from(self)))
    }
}

macro_rules! parsed_target {
    ($($t:ty),+) => {
        $(
            impl IntoTarget<Option<$t>> for &str {
                fn into_target(self) -> Target<Option<$t>> {
                    match self.parse::<$t>() {
                        Ok(v) => Target::Value(Some(v)),
                        Err(err) => Target::Invalid(err),
                    }
                }
            }
        )+
    };
}

parsed_target!(
    Color,
    Cursor,
    StrokeLinecap,
    StrokeLinejoin,
    StrokeDasharray,
    Visibility
);

fn property<T: CellValue>(
    selector: impl Into<Selector>,
    prop: fn(&Element) -> Wrapper<T>,
    fallback: T,
) -> Request<T> {
    let selector = selector.into();
    Request::new(move |scene| match scene.element(selector.clone()) {
        Some(e) => prop(&e).as_cell(),
        None => scene.graph.constant(fallback.clone()),
    })
}

fn derived<T: CellValue>(
    selector: impl Into<Selector>,
    accessor: fn(&Element, &mut CellGraph) -> Cell<Option<T>>,
) -> Request<Option<T>> {
    let selector = selector.into();
    Request::new(move |scene| match scene.element(selector.clone()) {
        Some(e) => accessor(&e, &mut scene.graph),
        None => scene.graph.constant(None),
    })
}

/// Live fill of the first addressed element.
pub fn fill(selector: impl Into<Selector>) -> Request<Option<Color>> {
    property(selector, |e| e.fill, None)
}

/// Live stroke of the first addressed element.
pub fn stroke(selector: impl Into<Selector>) -> Request<Option<Color>> {
    property(selector, |e| e.stroke, None)
}

/// Live opacity of the first addressed element.
pub fn opacity(selector: impl Into<Selector>) -> Request<Option<AlphaValue>> {
    property(selector, |e| e.opacity, None)
}

/// Live fill opacity of the first addressed element.
pub fn fill_opacity(selector: impl Into<Selector>) -> Request<Option<AlphaValue>> {
    property(selector, |e| e.fill_opacity, None)
}

/// Live stroke opacity of the first addressed element.
pub fn stroke_opacity(selector: impl Into<Selector>) -> Request<Option<AlphaValue>> {
    property(selector, |e| e.stroke_opacity, None)
}

/// Live stroke width of the first addressed element.
pub fn stroke_width(selector: impl Into<Selector>) -> Request<Option<Length>> {
    property(selector, |e| e.stroke_width, None)
}

/// Live stroke linecap of the first addressed element.
pub fn stroke_linecap(selector: impl Into<Selector>) -> Request<Option<StrokeLinecap>> {
    property(selector, |e| e.stroke_linecap, None)
}

/// Live stroke linejoin of the first addressed element.
pub fn stroke_linejoin(selector: impl Into<Selector>) -> Request<Option<StrokeLinejoin>> {
    property(selector, |e| e.stroke_linejoin, None)
}

/// Live dash pattern of the first addressed element.
pub fn stroke_dasharray(selector: impl Into<Selector>) -> Request<Option<StrokeDasharray>> {
    property(selector, |e| e.stroke_dasharray, None)
}

/// Live dash offset of the first addressed element.
pub fn stroke_dashoffset(selector: impl Into<Selector>) -> Request<Option<Length>> {
    property(selector, |e| e.stroke_dashoffset, None)
}

/// Live miter limit of the first addressed element.
pub fn stroke_miterlimit(selector: impl Into<Selector>) -> Request<Option<Delta>> {
    property(selector, |e| e.stroke_miterlimit, None)
}

/// Live cursor of the first addressed element.
pub fn cursor(selector: impl Into<Selector>) -> Request<Option<Cursor>> {
    property(selector, |e| e.cursor, None)
}

/// Live visibility of the first addressed element.
pub fn visibility(selector: impl Into<Selector>) -> Request<Option<Visibility>> {
    property(selector, |e| e.visibility, None)
}

/// Live z-index of the first addressed element.
pub fn z_index(selector: impl Into<Selector>) -> Request<f64> {
    property(selector, |e| e.z_index, 0.0)
}

/// Live shape of the first addressed element.
pub fn shape(selector: impl Into<Selector>) -> Request<Shape> {
    property(selector, |e| e.shape, Shape::Empty)
}

/// Live center of the first addressed element's shape.
pub fn center(selector: impl Into<Selector>) -> Request<Option<Position>> {
    derived(selector, Element::center)
}

/// Horizontal center of the first addressed element's shape, if it has one.
pub fn center_x(selector: impl Into<Selector>) -> Request<Option<Coordinate>> {
    derived(selector, Element::center_x)
}

/// Vertical center of the first addressed element's shape, if it has one.
pub fn center_y(selector: impl Into<Selector>) -> Request<Option<Coordinate>> {
    derived(selector, Element::center_y)
}

/// Radius of the first addressed element's shape, if it has one.
pub fn radius(selector: impl Into<Selector>) -> Request<Option<Length>> {
    derived(selector, Element::radius)
}

/// Top-left corner of the first addressed element's shape, if it has one.
pub fn top_left(selector: impl Into<Selector>) -> Request<Option<Position>> {
    derived(selector, Element::top_left)
}

/// Width of the first addressed element's shape, if it has one.
pub fn width(selector: impl Into<Selector>) -> Request<Option<Length>> {
    derived(selector, Element::width)
}

/// Height of the first addressed element's shape, if it has one.
pub fn height(selector: impl Into<Selector>) -> Request<Option<Length>> {
    derived(selector, Element::height)
}

/// Start point of the first addressed element's shape, if it has one.
pub fn start(selector: impl Into<Selector>) -> Request<Option<Position>> {
    derived(selector, Element::start)
}

/// End point of the first addressed element's shape, if it has one.
pub fn end(selector: impl Into<Selector>) -> Request<Option<Position>> {
    derived(selector, Element::end)
}

/// Drawn path length of the first addressed element's shape, if it has one.
pub fn path_length(selector: impl Into<Selector>) -> Request<Option<Length>> {
    derived(selector, Element::path_length)
}

/// Geometric outline length of the first addressed element's shape.
pub fn outline_length(selector: impl Into<Selector>) -> Request<Option<Length>> {
    derived(selector, Element::outline_length)
}

#[cfg(test)]
#[path = "../../tests/unit/composition/request.rs"]
mod tests;

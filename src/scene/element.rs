use std::hash::{Hash, Hasher};

use crate::foundation::color::Color;
use crate::foundation::core::{
    AlphaValue, Coordinate, Cursor, Delta, Length, Position, StrokeDasharray, StrokeLinecap,
    StrokeLinejoin, Visibility,
};
use crate::foundation::ids::Identifier;
use crate::reactive::graph::{Cell, CellGraph, CellValue, Wrapper};
use crate::scene::shape::Shape;

/// Stable identity of an element within one scene.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementKey(pub u64);

/// A drawable entity: a fixed set of live property cells plus its shape.
///
/// Every property is a wrapper cell. Compiling a timeline re-points these wrappers at the
/// transitions recorded for them; the handles themselves never change, so anything
/// subscribed to an element keeps observing it. Equality is identity.
#[derive(Clone, Copy, Debug)]
pub struct Element {
    key: ElementKey,
    /// Paint order; higher draws later.
    pub z_index: Wrapper<f64>,
    /// Whether the element is hidden from drawing.
    pub deleted: Wrapper<bool>,
    /// Interior paint.
    pub fill: Wrapper<Option<Color>>,
    /// Pointer cursor.
    pub cursor: Wrapper<Option<Cursor>>,
    /// Opacity of the fill alone.
    pub fill_opacity: Wrapper<Option<AlphaValue>>,
    /// Opacity of the whole element.
    pub opacity: Wrapper<Option<AlphaValue>>,
    /// Outline paint.
    pub stroke: Wrapper<Option<Color>>,
    /// Opacity of the stroke alone.
    pub stroke_opacity: Wrapper<Option<AlphaValue>>,
    /// Outline width.
    pub stroke_width: Wrapper<Option<Length>>,
    /// Cap style of open ends.
    pub stroke_linecap: Wrapper<Option<StrokeLinecap>>,
    /// Join style of corners.
    pub stroke_linejoin: Wrapper<Option<StrokeLinejoin>>,
    /// Miter limit.
    pub stroke_miterlimit: Wrapper<Option<Delta>>,
    /// Dash pattern.
    pub stroke_dasharray: Wrapper<Option<StrokeDasharray>>,
    /// Offset into the dash pattern.
    pub stroke_dashoffset: Wrapper<Option<Length>>,
    /// Visibility keyword.
    pub visibility: Wrapper<Option<Visibility>>,
    /// Geometry.
    pub shape: Wrapper<Shape>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl serde::Serialize for Element {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.key.serialize(serializer)
    }
}

fn live<T: CellValue>(graph: &mut CellGraph, value: T) -> Wrapper<T> {
    let initial = graph.primitive(value);
    graph.wrapper(initial)
}

macro_rules! derived {
    ($($(#[$meta:meta])* $name:ident -> $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("[`Shape::", stringify!($name), "`] of the current shape, as a cell following shape changes.")]
            $(#[$meta])*
            pub fn $name(&self, graph: &mut CellGraph) -> Cell<$t> {
                graph.map(self.shape, Shape::$name)
            }
        )+
    };
}

impl Element {
    /// Allocate a fresh element with default property values in `graph`.
    pub(crate) fn new(graph: &mut CellGraph) -> Self {
        Self {
            key: ElementKey(graph.mint_token()),
            z_index: live(graph, 0.0),
            deleted: live(graph, false),
            fill: live(graph, None),
            cursor: live(graph, None),
            fill_opacity: live(graph, None),
            opacity: live(graph, None),
            stroke: live(graph, None),
            stroke_opacity: live(graph, None),
            stroke_width: live(graph, None),
            stroke_linecap: live(graph, None),
            stroke_linejoin: live(graph, None),
            stroke_miterlimit: live(graph, None),
            stroke_dasharray: live(graph, None),
            stroke_dashoffset: live(graph, None),
            visibility: live(graph, None),
            shape: live(graph, Shape::Empty),
        }
    }

    /// Stable identity of this element.
    pub fn key(&self) -> ElementKey {
        self.key
    }

    derived! {
        center_x -> Option<Coordinate>,
        center_y -> Option<Coordinate>,
        center -> Option<Position>,
        radius -> Option<Length>,
        radius_x -> Option<Length>,
        radius_y -> Option<Length>,
        top_left_x -> Option<Coordinate>,
        top_left_y -> Option<Coordinate>,
        top_left -> Option<Position>,
        width -> Option<Length>,
        height -> Option<Length>,
        start_x -> Option<Coordinate>,
        start_y -> Option<Coordinate>,
        start -> Option<Position>,
        end_x -> Option<Coordinate>,
        end_y -> Option<Coordinate>,
        end -> Option<Position>,
        control1_x -> Option<Coordinate>,
        control1_y -> Option<Coordinate>,
        control2_x -> Option<Coordinate>,
        control2_y -> Option<Coordinate>,
        path_length -> Option<Length>,
        child -> Option<Element>,
        outline_length -> Option<Length>,
    }

    /// Current values of every property.
    pub fn snapshot(&self, graph: &CellGraph) -> ElementSnapshot {
        ElementSnapshot {
            key: self.key,
            id: None,
            z_index: graph.get(self.z_index),
            deleted: graph.get(self.deleted),
            fill: graph.get(self.fill),
            cursor: graph.get(self.cursor),
            fill_opacity: graph.get(self.fill_opacity),
            opacity: graph.get(self.opacity),
            stroke: graph.get(self.stroke),
            stroke_opacity: graph.get(self.stroke_opacity),
            stroke_width: graph.get(self.stroke_width),
            stroke_linecap: graph.get(self.stroke_linecap),
            stroke_linejoin: graph.get(self.stroke_linejoin),
            stroke_miterlimit: graph.get(self.stroke_miterlimit),
            stroke_dasharray: graph.get(self.stroke_dasharray),
            stroke_dashoffset: graph.get(self.stroke_dashoffset),
            visibility: graph.get(self.visibility),
            shape: graph.get(self.shape),
        }
    }
}

/// Materialized element state, as handed to hosts and renderers.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementSnapshot {
    /// See [`Element::key`].
    pub key: ElementKey,
    /// Identifier the element is registered under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    /// See [`Element::z_index`].
    pub z_index: f64,
    /// See [`Element::deleted`].
    pub deleted: bool,
    /// See [`Element::fill`].
    pub fill: Option<Color>,
    /// See [`Element::cursor`].
    pub cursor: Option<Cursor>,
    /// See [`Element::fill_opacity`].
    pub fill_opacity: Option<AlphaValue>,
    /// See [`Element::opacity`].
    pub opacity: Option<AlphaValue>,
    /// See [`Element::stroke`].
    pub stroke: Option<Color>,
    /// See [`Element::stroke_opacity`].
    pub stroke_opacity: Option<AlphaValue>,
    /// See [`Element::stroke_width`].
    pub stroke_width: Option<Length>,
    /// See [`Element::stroke_linecap`].
    pub stroke_linecap: Option<StrokeLinecap>,
    /// See [`Element::stroke_linejoin`].
    pub stroke_linejoin: Option<StrokeLinejoin>,
    /// See [`Element::stroke_miterlimit`].
    pub stroke_miterlimit: Option<Delta>,
    /// See [`Element::stroke_dasharray`].
    pub stroke_dasharray: Option<StrokeDasharray>,
    /// See [`Element::stroke_dashoffset`].
    pub stroke_dashoffset: Option<Length>,
    /// See [`Element::visibility`].
    pub visibility: Option<Visibility>,
    /// See [`Element::shape`].
    pub shape: Shape,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;

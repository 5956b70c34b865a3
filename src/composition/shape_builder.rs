//! Field-level shape transitions.
//!
//! A shape builder drafts one new shape per selected element. Each field of the draft
//! starts at the corresponding accessor of the element's previous shape and may be given a
//! target of its own. Field progress is the shape-level eased progress passed through the
//! field's own easing, which defaults to [`Ease::JumpToEnd`].
//!
//! When the previous shape is of the same variant the draft's fields are interpolated;
//! otherwise the shape jump-cuts to the drafted target as soon as progress leaves `0`.

use crate::animation::ease::Ease;
use crate::animation::interpolate::{
    Interpolation, interpolate_coordinate, interpolate_discrete, interpolate_length,
};
use crate::composition::builder::StepState;
use crate::composition::request::{IntoTarget, Target};
use crate::composition::transition::TransitionOpts;
use crate::foundation::core::{AlphaValue, Coordinate, Length, Position};
use crate::reactive::graph::{Cell, CellGraph, CellId, CellValue};
use crate::scene::element::Element;
use crate::scene::shape::{Circle, Container, CubicBezier, Line, Rectangle, Shape, ShapeKind};
use crate::scene::store::Scene;

/// One shape variant's set of drafted fields.
pub trait Draft: Copy + 'static {
    /// Variant this draft builds.
    const KIND: ShapeKind;

    /// Seed every field from the previous shape's accessors.
    #[doc(hidden)]
    fn seed(graph: &mut CellGraph, prev: Cell<Shape>) -> Self;

    /// Cells the assembled shape reads.
    #[doc(hidden)]
    fn deps(&self, out: &mut Vec<CellId>);

    /// Build the shape from interpolated fields, or from their targets when `interpolated`
    /// is false.
    #[doc(hidden)]
    fn assemble(&self, graph: &CellGraph, interpolated: bool) -> Shape;
}

#[derive(Debug)]
struct FieldSlot<T> {
    from: Cell<T>,
    to: Cell<T>,
    current: Cell<T>,
}

impl<T> Clone for FieldSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSlot<T> {}

impl<T: CellValue> FieldSlot<T> {
    fn seed(graph: &mut CellGraph, prev: Cell<Shape>, accessor: fn(&Shape) -> T) -> Self {
        let from = graph.map(prev, accessor);
        Self {
            from,
            to: from,
            current: from,
        }
    }

    fn retarget(
        &mut self,
        graph: &mut CellGraph,
        to: Cell<T>,
        progress: Cell<AlphaValue>,
        interpolation: Interpolation<T>,
    ) {
        self.to = to;
        self.current = interpolation(graph, self.from, to, progress);
    }

    fn ids(&self) -> [CellId; 2] {
        [self.to.id(), self.current.id()]
    }

    fn value(&self, graph: &CellGraph, interpolated: bool) -> T {
        graph.get(if interpolated { self.current } else { self.to })
    }
}

struct Drafted<D> {
    element: Element,
    prev: Cell<Shape>,
    draft: D,
}

/// Builder handed to `TransitionBuilder::circle` and its siblings.
pub struct ShapeBuilder<'s, D: Draft> {
    scene: &'s mut Scene,
    step: &'s mut StepState,
    progress: Cell<AlphaValue>,
    drafts: Vec<Drafted<D>>,
}

impl<'s, D: Draft> ShapeBuilder<'s, D> {
    pub(crate) fn new(
        scene: &'s mut Scene,
        step: &'s mut StepState,
        elements: &[Element],
        ease: Ease,
    ) -> Self {
        if elements.is_empty() {
            tracing::warn!(kind = ?D::KIND, "shape transition addresses no elements");
        }

        let graph = &mut scene.graph;
        let progress = ease.cell(graph, step.progress);
        let drafts = elements
            .iter()
            .map(|&element| {
                let prev = match step.pending.get(&element.shape.id()) {
                    Some(&id) => Cell::from_id(id),
                    None => graph.unwrap(element.shape),
                };
                Drafted {
                    element,
                    prev,
                    draft: D::seed(graph, prev),
                }
            })
            .collect();

        Self {
            scene,
            step,
            progress,
            drafts,
        }
    }

    fn set<T: CellValue>(
        &mut self,
        slot: fn(&mut D) -> &mut FieldSlot<T>,
        target: Target<T>,
        opts: TransitionOpts<T>,
        default_interpolation: Interpolation<T>,
    ) -> &mut Self {
        let to = match target.resolve(self.scene) {
            Ok(cell) => cell,
            Err(err) => {
                self.step.fail(err);
                return self;
            }
        };

        let graph = &mut self.scene.graph;
        let progress = opts
            .ease
            .unwrap_or(Ease::JumpToEnd)
            .cell(graph, self.progress);
        let interpolation = opts.interpolation.unwrap_or(default_interpolation);
        for drafted in &mut self.drafts {
            slot(&mut drafted.draft).retarget(graph, to, progress, interpolation);
        }
        self
    }

    fn split(
        &mut self,
        target: Target<Option<Position>>,
    ) -> Option<(Cell<Option<Coordinate>>, Cell<Option<Coordinate>>)> {
        match target.resolve(self.scene) {
            Ok(position) => {
                let graph = &mut self.scene.graph;
                let x = graph.map(position, |p: &Option<Position>| p.map(|p| p.x));
                let y = graph.map(position, |p: &Option<Position>| p.map(|p| p.y));
                Some((x, y))
            }
            Err(err) => {
                self.step.fail(err);
                None
            }
        }
    }

    /// Record the drafted shapes as the step's shape transitions.
    pub(crate) fn finish(self) {
        let progress = self.progress;
        let graph = &mut self.scene.graph;
        for Drafted {
            element,
            prev,
            draft,
        } in self.drafts
        {
            let mut deps = vec![progress.id(), prev.id()];
            draft.deps(&mut deps);
            let next = graph.computed(&deps, move |g| {
                if g.get(progress).is_zero() {
                    return g.get(prev);
                }
                let same_kind = g.with(prev, |shape| shape.kind() == D::KIND);
                draft.assemble(g, same_kind)
            });
            self.step.pending.insert(element.shape.id(), next.id());
        }
    }
}

macro_rules! drafts {
    ($(
        $(#[$meta:meta])*
        $draft:ident as $alias:ident => $variant:ident($shape:ident) {
            $($field:ident / $with:ident : $t:ty = $accessor:ident, $interp:expr;)+
        }
    )+) => {
        $(
            #[doc = concat!("Drafted fields of a [`Shape::", stringify!($variant), "`].")]
            #[derive(Clone, Copy, Debug)]
            pub struct $draft {
                $($field: FieldSlot<$t>,)+
            }

            $(#[$meta])*
            pub type $alias<'s> = ShapeBuilder<'s, $draft>;

            impl Draft for $draft {
                const KIND: ShapeKind = ShapeKind::$variant;

                fn seed(graph: &mut CellGraph, prev: Cell<Shape>) -> Self {
                    Self {
                        $($field: FieldSlot::seed(graph, prev, Shape::$accessor),)+
                    }
                }

                fn deps(&self, out: &mut Vec<CellId>) {
                    $(out.extend(self.$field.ids());)+
                }

                fn assemble(&self, graph: &CellGraph, interpolated: bool) -> Shape {
                    Shape::$variant($shape {
                        $($field: self.$field.value(graph, interpolated),)+
                    })
                }
            }

            impl ShapeBuilder<'_, $draft> {
                $(
                    #[doc = concat!("Transition `", stringify!($field), "` toward `target`.")]
                    pub fn $field(&mut self, target: impl IntoTarget<$t>) -> &mut Self {
                        self.$with(target, TransitionOpts::default())
                    }

                    #[doc = concat!("[`Self::", stringify!($field), "`] with explicit options.")]
                    pub fn $with(
                        &mut self,
                        target: impl IntoTarget<$t>,
                        opts: TransitionOpts<$t>,
                    ) -> &mut Self {
                        self.set(|d| &mut d.$field, target.into_target(), opts, $interp)
                    }
                )+
            }
        )+
    };
}

macro_rules! position_setters {
    ($draft:ident { $($name:ident / $with:ident => $x:ident, $y:ident;)+ }) => {
        impl ShapeBuilder<'_, $draft> {
            $(
                #[doc = concat!("Transition both coordinates of `", stringify!($name), "` toward `target`.")]
                pub fn $name(&mut self, target: impl IntoTarget<Option<Position>>) -> &mut Self {
                    self.$with(target, TransitionOpts::default())
                }

                /// Transition both coordinates of a point with shared options.
                pub fn $with(
                    &mut self,
                    target: impl IntoTarget<Option<Position>>,
                    opts: TransitionOpts<Option<Coordinate>>,
                ) -> &mut Self {
                    let Some((x, y)) = self.split(target.into_target()) else {
                        return self;
                    };
                    self.set(|d| &mut d.$x, Target::Cell(x), opts, interpolate_coordinate);
                    self.set(|d| &mut d.$y, Target::Cell(y), opts, interpolate_coordinate)
                }
            )+
        }
    };
}

drafts! {
    /// Circle fields.
    CircleDraft as CircleBuilder => Circle(Circle) {
        center_x / center_x_with: Option<Coordinate> = center_x, interpolate_coordinate;
        center_y / center_y_with: Option<Coordinate> = center_y, interpolate_coordinate;
        radius / radius_with: Option<Length> = radius, interpolate_length;
    }

    /// Rectangle fields; `x`/`y` address the top-left corner.
    RectangleDraft as RectangleBuilder => Rectangle(Rectangle) {
        x / x_with: Option<Coordinate> = top_left_x, interpolate_coordinate;
        y / y_with: Option<Coordinate> = top_left_y, interpolate_coordinate;
        width / width_with: Option<Length> = width, interpolate_length;
        height / height_with: Option<Length> = height, interpolate_length;
        corner_radius_x / corner_radius_x_with: Option<Length> = radius_x, interpolate_length;
        corner_radius_y / corner_radius_y_with: Option<Length> = radius_y, interpolate_length;
    }

    /// Line fields, including the declared path length.
    LineDraft as LineBuilder => Line(Line) {
        start_x / start_x_with: Option<Coordinate> = start_x, interpolate_coordinate;
        start_y / start_y_with: Option<Coordinate> = start_y, interpolate_coordinate;
        end_x / end_x_with: Option<Coordinate> = end_x, interpolate_coordinate;
        end_y / end_y_with: Option<Coordinate> = end_y, interpolate_coordinate;
        path_length / path_length_with: Option<Length> = path_length, interpolate_length;
    }

    /// Bézier fields: end points and both control points.
    CubicBezierDraft as CubicBezierBuilder => CubicBezier(CubicBezier) {
        start_x / start_x_with: Option<Coordinate> = start_x, interpolate_coordinate;
        start_y / start_y_with: Option<Coordinate> = start_y, interpolate_coordinate;
        control1_x / control1_x_with: Option<Coordinate> = control1_x, interpolate_coordinate;
        control1_y / control1_y_with: Option<Coordinate> = control1_y, interpolate_coordinate;
        control2_x / control2_x_with: Option<Coordinate> = control2_x, interpolate_coordinate;
        control2_y / control2_y_with: Option<Coordinate> = control2_y, interpolate_coordinate;
        end_x / end_x_with: Option<Coordinate> = end_x, interpolate_coordinate;
        end_y / end_y_with: Option<Coordinate> = end_y, interpolate_coordinate;
    }

    /// Container box plus the element drawn inside it. The child switches discretely.
    ContainerDraft as ContainerBuilder => Container(Container) {
        x / x_with: Option<Coordinate> = top_left_x, interpolate_coordinate;
        y / y_with: Option<Coordinate> = top_left_y, interpolate_coordinate;
        width / width_with: Option<Length> = width, interpolate_length;
        height / height_with: Option<Length> = height, interpolate_length;
        child / child_with: Option<Element> = child, interpolate_discrete::<Option<Element>>;
    }
}

position_setters!(CircleDraft {
    center / center_with => center_x, center_y;
});

position_setters!(RectangleDraft {
    top_left / top_left_with => x, y;
});

position_setters!(LineDraft {
    start / start_with => start_x, start_y;
    end / end_with => end_x, end_y;
});

position_setters!(CubicBezierDraft {
    start / start_with => start_x, start_y;
    control1 / control1_with => control1_x, control1_y;
    control2 / control2_with => control2_x, control2_y;
    end / end_with => end_x, end_y;
});

position_setters!(ContainerDraft {
    top_left / top_left_with => x, y;
});

#[cfg(test)]
#[path = "../../tests/unit/composition/shape_builder.rs"]
mod tests;

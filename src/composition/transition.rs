use std::fmt;

use crate::animation::ease::Ease;
use crate::animation::interpolate::{
    Interpolation, interpolate_alpha, interpolate_color, interpolate_delta, interpolate_discrete,
    interpolate_length, interpolate_number, interpolate_shape,
};
use crate::composition::builder::StepState;
use crate::composition::request::{IntoTarget, Target};
use crate::composition::shape_builder::{
    CircleBuilder, CircleDraft, ContainerBuilder, ContainerDraft, CubicBezierBuilder,
    CubicBezierDraft, LineBuilder, LineDraft, RectangleBuilder, RectangleDraft, ShapeBuilder,
};
use crate::foundation::color::Color;
use crate::foundation::core::{
    AlphaValue, Cursor, Delta, Length, StrokeDasharray, StrokeLinecap, StrokeLinejoin, Visibility,
};
use crate::reactive::graph::{Cell, CellValue, Wrapper};
use crate::scene::element::Element;
use crate::scene::shape::Shape;
use crate::scene::store::Scene;

/// Per-setter options. Unset fields fall back to the setter's defaults.
pub struct TransitionOpts<T> {
    /// Easing applied to the step progress. Defaults to the setter's own curve.
    pub ease: Option<Ease>,
    /// Replaces the setter's interpolation.
    pub interpolation: Option<Interpolation<T>>,
}

impl<T> TransitionOpts<T> {
    /// Set the easing.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Set the interpolation.
    pub fn interpolation(mut self, interpolation: Interpolation<T>) -> Self {
        self.interpolation = Some(interpolation);
        self
    }
}

impl<T> Default for TransitionOpts<T> {
    fn default() -> Self {
        Self {
            ease: None,
            interpolation: None,
        }
    }
}

impl<T> Clone for TransitionOpts<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TransitionOpts<T> {}

impl<T> fmt::Debug for TransitionOpts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOpts")
            .field("ease", &self.ease)
            .field("interpolation", &self.interpolation.is_some())
            .finish()
    }
}

impl<T> From<Ease> for TransitionOpts<T> {
    fn from(ease: Ease) -> Self {
        Self::default().ease(ease)
    }
}

/// Options of a whole-shape transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeOpts {
    /// Easing applied to fields that were set without their own.
    pub ease: Option<Ease>,
}

impl From<Ease> for ShapeOpts {
    fn from(ease: Ease) -> Self {
        Self { ease: Some(ease) }
    }
}

/// Records property transitions for a set of elements within one step.
pub struct TransitionBuilder<'s> {
    scene: &'s mut Scene,
    step: &'s mut StepState,
    elements: Vec<Element>,
}

macro_rules! property_setters {
    ($(
        $(#[$meta:meta])*
        $name:ident / $with:ident : $t:ty => $interp:expr;
    )+) => {
        $(
            $(#[$meta])*
            pub fn $name(self, target: impl IntoTarget<$t>) -> Self {
                self.$with(target, TransitionOpts::default())
            }

            #[doc = concat!("[`Self::", stringify!($name), "`] with explicit options.")]
            pub fn $with(self, target: impl IntoTarget<$t>, opts: TransitionOpts<$t>) -> Self {
                let interpolation: Interpolation<$t> = opts.interpolation.unwrap_or($interp);
                self.transition(
                    |e| e.$name,
                    target.into_target(),
                    opts.ease.unwrap_or(Ease::InOutCubic),
                    interpolation,
                )
            }
        )+
    };
}

macro_rules! shape_setters {
    ($(
        $(#[$meta:meta])*
        $name:ident / $with:ident : $builder:ident<$draft:ty> = $ease:expr;
    )+) => {
        $(
            $(#[$meta])*
            pub fn $name(self, build: impl FnOnce(&mut $builder<'_>)) -> Self {
                self.$with(build, ShapeOpts::default())
            }

            #[doc = concat!("[`Self::", stringify!($name), "`] with explicit options.")]
            pub fn $with(self, build: impl FnOnce(&mut $builder<'_>), opts: ShapeOpts) -> Self {
                let ease = opts.ease.unwrap_or($ease);
                let mut shapes = ShapeBuilder::<$draft>::new(
                    self.scene,
                    self.step,
                    &self.elements,
                    ease,
                );
                build(&mut shapes);
                shapes.finish();
                self
            }
        )+
    };
}

impl<'s> TransitionBuilder<'s> {
    pub(crate) fn new(scene: &'s mut Scene, step: &'s mut StepState, elements: Vec<Element>) -> Self {
        Self {
            scene,
            step,
            elements,
        }
    }

    /// Elements this builder applies to.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn transition<T: CellValue>(
        self,
        prop: fn(&Element) -> Wrapper<T>,
        target: Target<T>,
        ease: Ease,
        interpolation: Interpolation<T>,
    ) -> Self {
        let to = match target.resolve(self.scene) {
            Ok(cell) => cell,
            Err(err) => {
                self.step.fail(err);
                return self;
            }
        };

        let graph = &mut self.scene.graph;
        let progress = ease.cell(graph, self.step.progress);
        for element in &self.elements {
            let live = prop(element);
            // A second setter on the same property within a step continues from the first.
            let from = match self.step.pending.get(&live.id()) {
                Some(&pending) => Cell::from_id(pending),
                None => graph.unwrap(live),
            };
            let next = interpolation(graph, from, to, progress);
            self.step.pending.insert(live.id(), next.id());
        }
        self
    }

    property_setters! {
        /// Stacking order; higher values draw later.
        z_index / z_index_with: f64 => interpolate_number;
        /// Flag the element as removed from drawing. Switches at the midpoint by default.
        deleted / deleted_with: bool => interpolate_discrete::<bool>;
        /// Interior paint.
        fill / fill_with: Option<Color> => interpolate_color;
        /// Pointer cursor. Switches at the midpoint.
        cursor / cursor_with: Option<Cursor> => interpolate_discrete::<Option<Cursor>>;
        /// Opacity of the fill alone.
        fill_opacity / fill_opacity_with: Option<AlphaValue> => interpolate_alpha;
        /// Opacity of the whole element.
        opacity / opacity_with: Option<AlphaValue> => interpolate_alpha;
        /// Outline paint.
        stroke / stroke_with: Option<Color> => interpolate_color;
        /// Opacity of the stroke alone.
        stroke_opacity / stroke_opacity_with: Option<AlphaValue> => interpolate_alpha;
        /// Outline width.
        stroke_width / stroke_width_with: Option<Length> => interpolate_length;
        /// Cap style of open ends.
        stroke_linecap / stroke_linecap_with: Option<StrokeLinecap>
            => interpolate_discrete::<Option<StrokeLinecap>>;
        /// Join style of corners.
        stroke_linejoin / stroke_linejoin_with: Option<StrokeLinejoin>
            => interpolate_discrete::<Option<StrokeLinejoin>>;
        /// Miter limit.
        stroke_miterlimit / stroke_miterlimit_with: Option<Delta> => interpolate_delta;
        /// Dash pattern. Switches at the midpoint.
        stroke_dasharray / stroke_dasharray_with: Option<StrokeDasharray>
            => interpolate_discrete::<Option<StrokeDasharray>>;
        /// Offset into the dash pattern; animate it to draw a stroke on.
        stroke_dashoffset / stroke_dashoffset_with: Option<Length> => interpolate_length;
        /// Visibility keyword.
        visibility / visibility_with: Option<Visibility>
            => interpolate_discrete::<Option<Visibility>>;
        /// Replace the whole shape. Same-variant shapes blend field by field.
        shape / shape_with: Shape => interpolate_shape;
    }

    shape_setters! {
        /// Turn the elements into circles, or transition the circles they already are.
        circle / circle_with: CircleBuilder<CircleDraft> = Ease::InOutCubic;
        /// Turn the elements into rectangles.
        rectangle / rectangle_with: RectangleBuilder<RectangleDraft> = Ease::Linear;
        /// Turn the elements into lines.
        line / line_with: LineBuilder<LineDraft> = Ease::Linear;
        /// Turn the elements into cubic Bézier curves.
        cubic_bezier / cubic_bezier_with: CubicBezierBuilder<CubicBezierDraft> = Ease::Linear;
        /// Nested viewport holding one child element.
        container / container_with: ContainerBuilder<ContainerDraft> = Ease::Linear;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/transition.rs"]
mod tests;

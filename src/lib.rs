//! Declarative, time-scrubbable animation of vector graphics scenes.
//!
//! A scene is a set of [`Element`]s whose properties are cells in a reactive
//! [`CellGraph`]. An animation is a tree of [`Animatable`] steps; compiling it re-points
//! every animated property at an interpolation cell driven by one root progress value, so
//! seeking anywhere on the timeline is a single assignment followed by push propagation.
//!
//! ```no_run
//! use vecmotion::{Animatable, SvgDrawing, create_animation};
//!
//! let mut player = create_animation(
//!     [Animatable::step(|b| {
//!         b.duration(1.0);
//!         b.select("dot").fill("red").circle(|c| {
//!             c.center((50.0, 50.0)).radius(40.0);
//!         });
//!     })],
//!     SvgDrawing::default(),
//! )?;
//! player.seek(0.5);
//! println!("{}", player.drawing().last_frame());
//! # Ok::<(), vecmotion::MotionError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod compile;
mod composition;
mod foundation;
mod reactive;
mod render;
mod scene;
mod session;

/// Deferred references to live element properties, for use as transition targets.
pub mod request {
    pub use crate::composition::request::*;
}

/// Interpolation cell builders, for [`TransitionOpts::interpolation`].
pub mod interpolate {
    pub use crate::animation::interpolate::*;
}

pub use animation::ease::Ease;
pub use compile::compiler::{Timeline, compile};
pub use composition::animatable::{Animatable, par, seq, step};
pub use composition::builder::AnimationBuilder;
pub use composition::request::{IntoTarget, Request, Target};
pub use composition::shape_builder::{
    CircleBuilder, CircleDraft, ContainerBuilder, ContainerDraft, CubicBezierBuilder,
    CubicBezierDraft, Draft, LineBuilder, LineDraft, RectangleBuilder, RectangleDraft,
    ShapeBuilder,
};
pub use composition::transition::{ShapeOpts, TransitionBuilder, TransitionOpts};
pub use foundation::color::Color;
pub use foundation::core::{
    AlphaValue, Coordinate, Cursor, Delta, Length, Point, Position, StrokeDasharray,
    StrokeLinecap, StrokeLinejoin, Visibility, WrappedNumber,
};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::ids::Identifier;
pub use reactive::graph::{AsCell, Cell, CellGraph, CellId, CellKind, CellValue, Source, SubscriptionId, Wrapper};
pub use render::drawing::{Drawing, NoDrawing, paint_order};
pub use render::svg::{SvgDrawing, SvgDrawingOpts, render_svg};
pub use scene::element::{Element, ElementKey, ElementSnapshot};
pub use scene::query::QueryBuilder;
pub use scene::registry::{ElementRegistry, Selector};
pub use scene::shape::{Circle, Container, CubicBezier, Line, Rectangle, Shape, ShapeKind};
pub use scene::store::{Scene, SceneSnapshot};
pub use session::animation::create_animation;
pub use session::player::{FrameRequest, FrameStatus, PlayOpts, PlaybackDirection, Player};

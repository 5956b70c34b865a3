use indexmap::IndexMap;

use crate::composition::transition::TransitionBuilder;
use crate::foundation::core::AlphaValue;
use crate::foundation::error::MotionError;
use crate::foundation::ids::Identifier;
use crate::reactive::graph::{CellGraph, CellId, Wrapper};
use crate::scene::element::Element;
use crate::scene::query::QueryBuilder;
use crate::scene::registry::Selector;
use crate::scene::store::Scene;

/// Everything one step records while its closure runs.
///
/// `pending` maps a live property wrapper to the cell it will forward once the step is
/// committed. Later setters on the same property in the same step overwrite earlier ones.
#[derive(Debug)]
pub(crate) struct StepState {
    pub(crate) progress: Wrapper<AlphaValue>,
    pub(crate) duration: f64,
    pub(crate) marks: IndexMap<Identifier, AlphaValue>,
    pub(crate) pending: IndexMap<CellId, CellId>,
    pub(crate) error: Option<MotionError>,
}

impl StepState {
    pub(crate) fn new(progress: Wrapper<AlphaValue>) -> Self {
        Self {
            progress,
            duration: 0.0,
            marks: IndexMap::new(),
            pending: IndexMap::new(),
            error: None,
        }
    }

    /// Record a deferred error. Only the first one is kept.
    pub(crate) fn fail(&mut self, err: MotionError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

/// Handle passed to a step closure.
///
/// Setters never fail eagerly: invalid input is recorded and reported when the timeline
/// is compiled.
pub struct AnimationBuilder<'a> {
    scene: &'a mut Scene,
    step: &'a mut StepState,
}

impl<'a> AnimationBuilder<'a> {
    pub(crate) fn new(scene: &'a mut Scene, step: &'a mut StepState) -> Self {
        Self { scene, step }
    }

    /// Set the step's duration in seconds. Negative or non-finite values are rejected.
    pub fn duration(&mut self, secs: f64) -> &mut Self {
        if secs.is_finite() && secs >= 0.0 {
            self.step.duration = secs;
        } else {
            self.step.fail(MotionError::validation(format!(
                "duration must be a finite, non-negative number of seconds (got {secs})"
            )));
        }
        self
    }

    /// Name the start of this step.
    pub fn mark_start(&mut self, id: impl Into<Identifier>) -> &mut Self {
        self.mark_at(AlphaValue::ZERO, id)
    }

    /// Name the end of this step.
    pub fn mark_end(&mut self, id: impl Into<Identifier>) -> &mut Self {
        self.mark_at(AlphaValue::ONE, id)
    }

    /// Name a point of this step's local progress.
    pub fn mark_at(&mut self, progress: impl Into<AlphaValue>, id: impl Into<Identifier>) -> &mut Self {
        self.step.marks.insert(id.into(), progress.into());
        self
    }

    /// First element addressed by `selector`, created on first reference.
    pub fn element(&mut self, selector: impl Into<Selector>) -> Option<Element> {
        self.scene.element(selector)
    }

    /// Start a transition on the elements addressed by `selector`.
    pub fn select(&mut self, selector: impl Into<Selector>) -> TransitionBuilder<'_> {
        let elements = self.scene.elements(selector);
        TransitionBuilder::new(self.scene, self.step, elements)
    }

    /// Start a transition on the elements a query produces.
    pub fn query(&mut self, build: impl FnOnce(&mut QueryBuilder<'_>)) -> TransitionBuilder<'_> {
        let mut query = QueryBuilder::new(self.scene);
        build(&mut query);
        let elements = query.build();
        TransitionBuilder::new(self.scene, self.step, elements)
    }

    /// The scene's cell graph, for building custom target cells.
    pub fn graph(&mut self) -> &mut CellGraph {
        &mut self.scene.graph
    }

    /// This step's local progress, before any easing.
    pub fn progress(&self) -> Wrapper<AlphaValue> {
        self.step.progress
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/builder.rs"]
mod tests;

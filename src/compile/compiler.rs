//! Timeline compilation.
//!
//! Compiling walks the animation tree once. Every node gets a progress wrapper; a parent
//! later points each child's wrapper at a cell remapping the parent's progress onto the
//! child's window. Steps commit their recorded transitions by re-pointing the live property
//! wrappers, so a later step always starts from whatever the earlier ones left behind.
//!
//! Parallel branches must not see each other's transitions. Each branch runs inside a
//! journal scope that remembers the first upstream of every wrapper it touched; after the
//! branch the touched wrappers are rolled back and the branch results are re-applied
//! together once all branches have compiled.

use indexmap::IndexMap;

use crate::composition::animatable::Animatable;
use crate::composition::builder::{AnimationBuilder, StepState};
use crate::foundation::core::AlphaValue;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::ids::Identifier;
use crate::reactive::graph::{CellId, Wrapper};
use crate::scene::store::Scene;

/// Result of compiling an animation tree.
#[derive(Clone, Debug)]
pub struct Timeline {
    /// Root progress. Point it at a clock to drive the whole scene.
    pub progress: Wrapper<AlphaValue>,
    /// Total duration in seconds.
    pub duration: f64,
    /// Named points of root progress.
    pub marks: IndexMap<Identifier, AlphaValue>,
}

type Journal = IndexMap<CellId, CellId>;

pub(crate) struct Compiler<'a> {
    scene: &'a mut Scene,
    scopes: Vec<Journal>,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            scopes: Vec::new(),
        }
    }

    fn root_progress(&mut self) -> Wrapper<AlphaValue> {
        let idle = self.scene.graph.primitive(AlphaValue::ONE);
        self.scene.graph.wrapper(idle)
    }

    /// Re-point `live` at `next`, journaling its previous upstream in every open scope.
    fn commit(&mut self, live: CellId, next: CellId) -> MotionResult<()> {
        if self.scene.graph.depends_on(next, live) {
            return Err(MotionError::animation(
                "a transition refers to the property it animates, which would create a dependency cycle",
            ));
        }
        if let Some(before) = self.scene.graph.upstream_raw(live) {
            for scope in &mut self.scopes {
                scope.entry(live).or_insert(before);
            }
        }
        self.scene.graph.rewrap_raw(live, next);
        tracing::trace!(?live, ?next, "hand-off");
        Ok(())
    }

    /// Compile `node` as a whole. On error every live wrapper re-pointed so far is restored,
    /// leaving the scene's properties as they were before the call.
    pub(crate) fn compile_root(&mut self, node: Animatable) -> MotionResult<Timeline> {
        self.scopes.push(Journal::new());
        let compiled = self.compile(node);
        let journal = self.scopes.pop().unwrap_or_default();
        if compiled.is_err() {
            tracing::debug!(restored = journal.len(), "compilation failed; rolling back hand-offs");
            for (live, before) in journal {
                self.scene.graph.rewrap_raw(live, before);
            }
        }
        compiled
    }

    pub(crate) fn compile(&mut self, node: Animatable) -> MotionResult<Timeline> {
        match node {
            Animatable::Step(f) => self.compile_step(f),
            Animatable::Sequence(items) => self.compile_sequential(items),
            Animatable::Parallel(items) => self.compile_parallel(items),
        }
    }

    fn compile_step(
        &mut self,
        f: Box<dyn FnOnce(&mut AnimationBuilder<'_>)>,
    ) -> MotionResult<Timeline> {
        let progress = self.root_progress();
        let mut step = StepState::new(progress);
        f(&mut AnimationBuilder::new(self.scene, &mut step));

        if let Some(err) = step.error {
            return Err(err);
        }
        for (&live, &next) in &step.pending {
            self.commit(live, next)?;
        }

        tracing::debug!(
            duration = step.duration,
            transitions = step.pending.len(),
            marks = step.marks.len(),
            "compiled step"
        );
        Ok(Timeline {
            progress,
            duration: step.duration,
            marks: step.marks,
        })
    }

    fn compile_sequential(&mut self, items: Vec<Animatable>) -> MotionResult<Timeline> {
        let children = items
            .into_iter()
            .map(|item| self.compile(item))
            .collect::<MotionResult<Vec<_>>>()?;

        let total: f64 = children.iter().map(|c| c.duration).sum();
        let progress = self.root_progress();
        let mut marks = IndexMap::new();

        let mut start = 0.0;
        for child in children {
            let d = child.duration;
            let window = self.scene.graph.map(progress, move |p: &AlphaValue| {
                let t = p.get() * total;
                if d == 0.0 {
                    if t < start {
                        AlphaValue::ZERO
                    } else {
                        AlphaValue::ONE
                    }
                } else {
                    AlphaValue::new((t - start) / d)
                }
            });
            self.scene.graph.wrap(child.progress, window);

            for (id, m) in child.marks {
                let at = if total == 0.0 {
                    m
                } else {
                    AlphaValue::new((start + m.get() * d) / total)
                };
                marks.insert(id, at);
            }
            start += d;
        }

        Ok(Timeline {
            progress,
            duration: total,
            marks,
        })
    }

    fn compile_parallel(&mut self, items: Vec<Animatable>) -> MotionResult<Timeline> {
        let mut branches = Vec::with_capacity(items.len());
        let mut merged = Journal::new();

        for item in items {
            let branch = match item {
                Animatable::Sequence(seq) => seq,
                other => vec![other],
            };

            self.scopes.push(Journal::new());
            let compiled = self.compile_sequential(branch);
            let journal = self.scopes.pop().unwrap_or_default();
            let timeline = compiled?;

            for (live, before) in journal {
                if let Some(result) = self.scene.graph.upstream_raw(live) {
                    merged.insert(live, result);
                }
                self.scene.graph.rewrap_raw(live, before);
            }
            branches.push(timeline);
        }

        for (live, next) in merged {
            self.commit(live, next)?;
        }

        let max = branches.iter().map(|b| b.duration).fold(0.0, f64::max);
        let progress = self.root_progress();
        let mut marks: IndexMap<Identifier, AlphaValue> = IndexMap::new();

        for branch in branches {
            let d = branch.duration;
            if d == 0.0 {
                let done = self.scene.graph.constant(AlphaValue::ONE);
                self.scene.graph.wrap(branch.progress, done);
            } else {
                let window = self
                    .scene
                    .graph
                    .map(progress, move |p: &AlphaValue| AlphaValue::new(p.get() * max / d));
                self.scene.graph.wrap(branch.progress, window);
            }

            for (id, m) in branch.marks {
                let at = if max == 0.0 {
                    m
                } else {
                    AlphaValue::new(m.get() * d / max)
                };
                if let Some(previous) = marks.insert(id.clone(), at) {
                    tracing::warn!(
                        mark = %id,
                        %previous,
                        replaced_by = %at,
                        "mark defined by more than one parallel branch; the later branch wins"
                    );
                }
            }
        }

        Ok(Timeline {
            progress,
            duration: max,
            marks,
        })
    }
}

/// Compile a list of animatables, played in sequence.
#[tracing::instrument(skip_all, fields(items = items.len()))]
pub fn compile(scene: &mut Scene, items: Vec<Animatable>) -> MotionResult<Timeline> {
    let timeline = Compiler::new(scene).compile_root(Animatable::Sequence(items))?;
    tracing::debug!(
        duration = timeline.duration,
        marks = timeline.marks.len(),
        cells = scene.graph().len(),
        "compiled timeline"
    );
    Ok(timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;

use indexmap::IndexMap;

use crate::compile::compiler::{Timeline, compile};
use crate::composition::animatable::Animatable;
use crate::foundation::core::AlphaValue;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::ids::Identifier;
use crate::reactive::graph::{AsCell, Cell, CellGraph, Source};
use crate::render::drawing::Drawing;
use crate::scene::element::Element;
use crate::scene::store::{Scene, SceneSnapshot};

/// Direction of travel along the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    /// Toward progress `1`.
    Forward,
    /// Toward progress `0`.
    Backward,
}

impl PlaybackDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Arguments of [`Player::play`]. At most one of `to`, `progress` and `mark` may be set.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayOpts {
    /// Target time in seconds.
    pub to: Option<f64>,
    /// Target root progress.
    pub progress: Option<AlphaValue>,
    /// Target mark.
    pub mark: Option<Identifier>,
    /// Defaults to the direction of the target.
    pub direction: Option<PlaybackDirection>,
    /// Speed multiplier, must be finite and positive.
    pub playback_rate: f64,
}

impl Default for PlayOpts {
    fn default() -> Self {
        Self {
            to: None,
            progress: None,
            mark: None,
            direction: None,
            playback_rate: 1.0,
        }
    }
}

impl PlayOpts {
    /// Parse options from a JSON object with snake_case keys.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Target a time in seconds.
    pub fn to(mut self, secs: f64) -> Self {
        self.to = Some(secs);
        self
    }

    /// Target a root progress.
    pub fn progress(mut self, progress: impl Into<AlphaValue>) -> Self {
        self.progress = Some(progress.into());
        self
    }

    /// Target a mark.
    pub fn mark(mut self, id: impl Into<Identifier>) -> Self {
        self.mark = Some(id.into());
        self
    }

    /// Force the direction of travel.
    pub fn direction(mut self, direction: PlaybackDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the speed multiplier.
    pub fn playback_rate(mut self, rate: f64) -> Self {
        self.playback_rate = rate;
        self
    }
}

/// Outcome of one [`Player::on_frame`] tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame.
    Running,
    /// The target was reached; playback stopped.
    Finished,
    /// A newer `play`, `stop` or seek superseded this request.
    Cancelled,
}

/// One playback run, ticked by the host's frame callback.
#[derive(Clone, Debug)]
pub struct FrameRequest {
    token: u64,
    target: AlphaValue,
    direction: PlaybackDirection,
    rate: f64,
    last_timestamp: Option<f64>,
}

impl FrameRequest {
    /// Root progress this run stops at.
    pub fn target(&self) -> AlphaValue {
        self.target
    }

    /// Direction of travel.
    pub fn direction(&self) -> PlaybackDirection {
        self.direction
    }

    /// Speed multiplier.
    pub fn playback_rate(&self) -> f64 {
        self.rate
    }
}

/// Owns a compiled scene and drives its root progress from a clock cell.
///
/// Every progress change redraws through the attached [`Drawing`]. Playback is cooperative:
/// `play` returns a [`FrameRequest`] the host ticks with monotonically increasing
/// timestamps until it stops being [`FrameStatus::Running`].
pub struct Player<D: Drawing> {
    scene: Scene,
    timeline: Timeline,
    clock: Source<AlphaValue>,
    running: Source<bool>,
    drawing: D,
    token: Option<u64>,
    next_token: u64,
}

impl<D: Drawing> Player<D> {
    /// Compile `animatables` against `scene` and seek to the start.
    pub fn new(mut scene: Scene, animatables: Vec<Animatable>, drawing: D) -> MotionResult<Self> {
        let timeline = compile(&mut scene, animatables)?;
        let clock = scene.graph.primitive(AlphaValue::ZERO);
        scene.graph.wrap(timeline.progress, clock);
        let running = scene.graph.primitive(false);

        let mut player = Self {
            scene,
            timeline,
            clock,
            running,
            drawing,
            token: None,
            next_token: 0,
        };
        player.draw();
        tracing::debug!(
            duration = player.timeline.duration,
            marks = player.timeline.marks.len(),
            elements = player.scene.registry().len(),
            "player ready"
        );
        Ok(player)
    }

    fn draw(&mut self) {
        let elements = self.scene.all_elements();
        self.drawing.draw(&self.scene.graph, &elements);
    }

    fn set_token(&mut self, token: Option<u64>) {
        self.token = token;
        self.scene.graph.set(self.running, token.is_some());
    }

    fn set_progress(&mut self, progress: AlphaValue) {
        self.scene.graph.set(self.clock, progress);
        self.draw();
    }

    fn mark_progress(&self, id: &Identifier) -> MotionResult<AlphaValue> {
        self.timeline
            .marks
            .get(id)
            .copied()
            .ok_or_else(|| MotionError::unknown_mark(id))
    }

    fn normalized(&self, secs: f64) -> AlphaValue {
        if self.timeline.duration > 0.0 {
            AlphaValue::new(secs / self.timeline.duration)
        } else if secs > 0.0 {
            AlphaValue::ONE
        } else {
            AlphaValue::ZERO
        }
    }

    /// Jump to `secs` seconds. Stops playback.
    pub fn seek(&mut self, secs: f64) {
        let progress = self.normalized(secs);
        self.seek_progress(progress);
    }

    /// Jump to root progress `progress`. Stops playback.
    pub fn seek_progress(&mut self, progress: impl Into<AlphaValue>) {
        let progress = progress.into();
        tracing::trace!(%progress, "seek");
        self.set_token(None);
        self.set_progress(progress);
    }

    /// Jump to a mark. Unknown marks leave the player untouched.
    pub fn seek_mark(&mut self, id: impl Into<Identifier>) -> MotionResult<()> {
        let progress = self.mark_progress(&id.into())?;
        self.seek_progress(progress);
        Ok(())
    }

    /// Stop the current run, if any. Progress stays where it is.
    pub fn stop(&mut self) {
        if self.token.is_some() {
            tracing::debug!("playback stopped");
        }
        self.set_token(None);
    }

    /// Start playing toward a target, superseding any run in flight.
    ///
    /// Arguments are validated before anything changes: on error the current run, if any,
    /// keeps going.
    #[tracing::instrument(skip_all, fields(rate = opts.playback_rate))]
    pub fn play(&mut self, opts: PlayOpts) -> MotionResult<FrameRequest> {
        let targets = [
            opts.to.is_some(),
            opts.progress.is_some(),
            opts.mark.is_some(),
        ];
        if targets.into_iter().filter(|&set| set).count() > 1 {
            return Err(MotionError::playback(
                "at most one of `to`, `progress` and `mark` may be given",
            ));
        }
        if !opts.playback_rate.is_finite() || opts.playback_rate <= 0.0 {
            return Err(MotionError::playback(format!(
                "playback rate must be a finite, positive number (got {})",
                opts.playback_rate
            )));
        }
        if opts.to.is_some_and(|to| !to.is_finite()) {
            return Err(MotionError::playback("`to` must be a finite number of seconds"));
        }

        let target = if let Some(to) = opts.to {
            self.normalized(to)
        } else if let Some(progress) = opts.progress {
            progress
        } else if let Some(mark) = &opts.mark {
            self.mark_progress(mark)?
        } else if opts.direction == Some(PlaybackDirection::Backward) {
            AlphaValue::ZERO
        } else {
            AlphaValue::ONE
        };
        let direction = opts.direction.unwrap_or(if target >= self.progress() {
            PlaybackDirection::Forward
        } else {
            PlaybackDirection::Backward
        });

        self.next_token += 1;
        let token = self.next_token;
        self.set_token(Some(token));
        tracing::debug!(token, %target, ?direction, rate = opts.playback_rate, "playback started");

        Ok(FrameRequest {
            token,
            target,
            direction,
            rate: opts.playback_rate,
            last_timestamp: None,
        })
    }

    /// Advance a run to the host timestamp `timestamp_ms`.
    pub fn on_frame(&mut self, request: &mut FrameRequest, timestamp_ms: f64) -> FrameStatus {
        if self.token != Some(request.token) {
            tracing::debug!(token = request.token, "playback cancelled");
            return FrameStatus::Cancelled;
        }
        let Some(last) = request.last_timestamp.replace(timestamp_ms) else {
            return FrameStatus::Running;
        };

        let elapsed = ((timestamp_ms - last) / 1000.0).max(0.0);
        let current = self.progress().get();
        let target = request.target.get();
        let forward = request.direction == PlaybackDirection::Forward;

        let next = if self.timeline.duration > 0.0 {
            current + request.direction.sign() * request.rate * elapsed / self.timeline.duration
        } else {
            target
        };
        let reached = if forward { next >= target } else { next <= target };
        // Only snap onto the target when travelling toward it.
        let toward = if forward { target >= current } else { target <= current };
        let next = if reached && toward { target } else { next };

        self.set_progress(AlphaValue::new(next));
        if reached {
            self.set_token(None);
            tracing::debug!(token = request.token, "playback finished");
            FrameStatus::Finished
        } else {
            FrameStatus::Running
        }
    }

    /// Current root progress.
    pub fn progress(&self) -> AlphaValue {
        self.scene.graph.get(self.timeline.progress)
    }

    /// Root progress as a cell, for subscriptions.
    pub fn progress_cell(&self) -> Cell<AlphaValue> {
        self.timeline.progress.as_cell()
    }

    /// Timeline length in seconds.
    pub fn duration(&self) -> f64 {
        self.timeline.duration
    }

    /// Marks as root progress, in declaration order.
    pub fn marks(&self) -> &IndexMap<Identifier, AlphaValue> {
        &self.timeline.marks
    }

    /// The compiled timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.token.is_some()
    }

    /// Whether a run is in flight, as a cell.
    pub fn running(&self) -> Cell<bool> {
        self.running.as_cell()
    }

    /// The scene's cell graph.
    pub fn graph(&self) -> &CellGraph {
        &self.scene.graph
    }

    /// Subscribe and unsubscribe through this.
    pub fn graph_mut(&mut self) -> &mut CellGraph {
        &mut self.scene.graph
    }

    /// The compiled scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Every registered element.
    pub fn elements(&self) -> Vec<Element> {
        self.scene.all_elements()
    }

    /// Element registered under `id`. Unlike selection while building, this never creates
    /// elements.
    pub fn element(&self, id: impl Into<Identifier>) -> Option<Element> {
        self.scene.registry().get(&id.into())
    }

    /// Current state of every element.
    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot()
    }

    /// The drawing collaborator.
    pub fn drawing(&self) -> &D {
        &self.drawing
    }

    /// The drawing collaborator, mutably.
    pub fn drawing_mut(&mut self) -> &mut D {
        &mut self.drawing
    }

    /// Redraw without changing progress.
    pub fn redraw(&mut self) {
        self.draw();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;

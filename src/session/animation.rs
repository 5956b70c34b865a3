use crate::composition::animatable::Animatable;
use crate::foundation::error::MotionResult;
use crate::render::drawing::Drawing;
use crate::scene::store::Scene;
use crate::session::player::Player;

/// Build a fresh scene from `animatables` and return a player positioned at the start.
///
/// The animatables play in sequence; wrap them in [`Animatable::par`] for concurrency.
#[tracing::instrument(skip_all)]
pub fn create_animation<D: Drawing>(
    animatables: impl IntoIterator<Item = Animatable>,
    drawing: D,
) -> MotionResult<Player<D>> {
    Player::new(Scene::new(), animatables.into_iter().collect(), drawing)
}

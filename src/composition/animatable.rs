use std::fmt;

use crate::composition::builder::AnimationBuilder;

type StepFn = Box<dyn FnOnce(&mut AnimationBuilder<'_>)>;

/// A node of the animation tree handed to the compiler.
pub enum Animatable {
    /// A leaf: one closure recording transitions against its own progress.
    Step(StepFn),
    /// Children play one after another.
    Sequence(Vec<Animatable>),
    /// Children start together; the node lasts as long as its longest child.
    Parallel(Vec<Animatable>),
}

impl Animatable {
    /// Leaf node running `f` once at compile time.
    pub fn step(f: impl FnOnce(&mut AnimationBuilder<'_>) + 'static) -> Self {
        Self::Step(Box::new(f))
    }

    /// Play `items` one after another.
    pub fn seq(items: impl IntoIterator<Item = Animatable>) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Start `items` together.
    pub fn par(items: impl IntoIterator<Item = Animatable>) -> Self {
        Self::Parallel(items.into_iter().collect())
    }
}

impl From<Vec<Animatable>> for Animatable {
    fn from(items: Vec<Animatable>) -> Self {
        Self::Sequence(items)
    }
}

impl fmt::Debug for Animatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(_) => f.write_str("Step(..)"),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Parallel(items) => f.debug_tuple("Parallel").field(items).finish(),
        }
    }
}

/// Shorthand for [`Animatable::step`].
pub fn step(f: impl FnOnce(&mut AnimationBuilder<'_>) + 'static) -> Animatable {
    Animatable::step(f)
}

/// Shorthand for [`Animatable::seq`].
pub fn seq(items: impl IntoIterator<Item = Animatable>) -> Animatable {
    Animatable::seq(items)
}

/// Shorthand for [`Animatable::par`].
pub fn par(items: impl IntoIterator<Item = Animatable>) -> Animatable {
    Animatable::par(items)
}

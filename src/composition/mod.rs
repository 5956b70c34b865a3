pub(crate) mod animatable;
pub(crate) mod builder;
pub(crate) mod request;
pub(crate) mod shape_builder;
pub(crate) mod transition;

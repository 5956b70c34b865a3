pub(crate) mod element;
pub(crate) mod query;
pub(crate) mod registry;
pub(crate) mod shape;
pub(crate) mod store;

pub(crate) mod drawing;
pub(crate) mod svg;

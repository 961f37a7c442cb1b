pub(crate) mod convert;
pub(crate) mod model;
pub(crate) mod normalize;
pub(crate) mod validate;

pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod normalize;

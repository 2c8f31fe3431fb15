pub(crate) mod batcher;
pub(crate) mod shared;
pub(crate) mod target;

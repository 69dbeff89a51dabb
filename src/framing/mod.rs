pub(crate) mod bounds;
pub(crate) mod look_at;
pub(crate) mod views;

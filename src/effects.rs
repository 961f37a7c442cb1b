pub(crate) mod audio;
pub(crate) mod particle;
pub(crate) mod property;
pub(crate) mod registry;
pub(crate) mod skeletal;
pub(crate) mod text;
pub(crate) mod unit;
pub(crate) mod visibility;

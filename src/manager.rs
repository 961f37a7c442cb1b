pub(crate) mod animation_manager;

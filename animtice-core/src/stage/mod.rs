pub(crate) mod builder;
pub(crate) mod settings;
pub(crate) mod timeline;

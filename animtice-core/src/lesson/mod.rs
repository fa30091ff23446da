pub(crate) mod config;
pub(crate) mod locale;
pub(crate) mod orchestrator;

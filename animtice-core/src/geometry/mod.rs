pub(crate) mod bar_model;
pub(crate) mod lines;
pub(crate) mod partition;
pub(crate) mod polygon;

pub(crate) mod service;
pub(crate) mod ui;

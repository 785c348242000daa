pub(crate) mod advice;
pub(crate) mod events;
pub(crate) mod logging;

pub(crate) use advice::AdviceService;
pub(crate) use events::ServiceEvent;
pub(crate) use logging::init_tracing;

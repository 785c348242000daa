use advice_client::AdviceError;

pub(crate) enum ServiceEvent {
    AdviceReady {
        request_id: u64,
        outcome: Result<String, AdviceError>,
    },
}

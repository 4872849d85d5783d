pub enum AppAsyncEvent {
    StatusFetched {
        status: Option<printlink_client::types::PartialStatus>,
        error: Option<String>,
    },
    ActionFinished {
        context: String,
        error: Option<String>,
    },
}

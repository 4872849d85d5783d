use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    /// The one locally held copy of remote status. Only ever replaced by
    /// push envelopes and pull responses, in delivery order.
    pub snapshot: StatusSnapshot,
    pub last_update: Option<DateTime<Utc>>,
    pub fetching: bool,
    pub show_help: bool,
    pub show_navbar: bool,
    pub input: InputState,
    pub keybinds: Keybinds,
    pub api: PluginApi,
    pub feed_tx: Option<mpsc::UnboundedSender<FeedEvent>>,
    pub feed_rx: Option<mpsc::UnboundedReceiver<FeedEvent>>,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
    pub feed_task: Option<tokio::task::JoinHandle<()>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let (feed_tx, feed_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();
        let api = PluginApi::new(
            &config.server.base_url,
            &config.server.plugin_id,
            Some(config.server.api_key.clone()),
        );
        let show_navbar = config.ui.navbar;

        Self {
            should_quit: false,
            config,
            snapshot: StatusSnapshot::default(),
            last_update: None,
            fetching: false,
            show_help: false,
            show_navbar,
            input: InputState::new(),
            keybinds: Keybinds,
            api,
            feed_tx: Some(feed_tx),
            feed_rx: Some(feed_rx),
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
            feed_task: None,
        }
    }
}

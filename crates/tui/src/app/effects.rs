use super::*;

impl App {
    /// Starts the push feed listener and issues the initial status pull.
    pub fn init(&mut self) {
        if let Some(ref feed_tx) = self.feed_tx {
            match PushFeedClient::new(&self.config.server.base_url, feed_tx.clone()) {
                Ok(client) => {
                    self.feed_task = Some(tokio::spawn(async move {
                        client.run().await;
                    }));
                }
                Err(e) => self.log_failure("Push feed unavailable", e),
            }
        }
        self.request_initial_state();
    }

    /// Pulls the current status once. A transport failure leaves the prior
    /// snapshot untouched; the push feed eventually corrects any staleness.
    pub fn request_initial_state(&mut self) {
        self.fetching = true;
        let api = self.api.clone();
        self.spawn_app_task(async move {
            match api.fetch_status().await {
                Ok(status) => AppAsyncEvent::StatusFetched {
                    status: Some(status),
                    error: None,
                },
                Err(e) => AppAsyncEvent::StatusFetched {
                    status: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    /// Applies one push envelope. The host socket carries every plugin's
    /// messages; envelopes tagged with another plugin's identifier are
    /// ignored. A matching payload replaces the snapshot wholesale.
    pub fn on_push(&mut self, envelope: PushEnvelope) {
        if envelope.plugin != self.config.server.plugin_id {
            return;
        }
        let partial: PartialStatus = match serde_json::from_value(envelope.data) {
            Ok(partial) => partial,
            Err(e) => {
                self.log_failure("Discarding malformed push payload", e);
                return;
            }
        };
        self.snapshot = StatusSnapshot::from_push(partial);
        self.last_update = Some(Utc::now());
        if self.snapshot.config_cancelled {
            self.cancel_configuration();
        }
    }

    /// Drains both event channels without blocking. Called every tick of
    /// the main loop; events apply in delivery order, last write wins.
    pub fn process_events(&mut self) {
        let mut feed_events = Vec::new();
        if let Some(ref mut rx) = self.feed_rx {
            while let Ok(event) = rx.try_recv() {
                feed_events.push(event);
            }
        }
        for event in feed_events {
            match event {
                FeedEvent::Connected => {
                    tracing::info!("Push feed connected, refreshing status");
                    self.request_initial_state();
                }
                FeedEvent::Disconnected => {
                    tracing::info!("Push feed disconnected");
                }
                FeedEvent::Push(envelope) => self.on_push(envelope),
            }
        }

        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }
        for event in async_events {
            match event {
                AppAsyncEvent::StatusFetched { status, error } => {
                    self.fetching = false;
                    if let Some(err) = error {
                        self.log_failure("Status fetch failed", err);
                    } else if let Some(partial) = status {
                        self.snapshot = self.snapshot.updated_with(partial);
                        self.last_update = Some(Utc::now());
                    }
                }
                AppAsyncEvent::ActionFinished { context, error } => match error {
                    Some(err) => self.log_failure(&context, err),
                    None => tracing::debug!("{context} accepted"),
                },
            }
        }
    }
}

use crate::config::Config;
use crate::input::{InputMode, InputState};
use crate::keybinds::Keybinds;
use anyhow::Result;
use chrono::{DateTime, Utc};
use printlink_client::api::PluginApi;
use printlink_client::feed::{FeedEvent, PushEnvelope, PushFeedClient};
use printlink_client::types::{PartialStatus, StatusIndicator, StatusSnapshot};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::future::Future;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::AppAsyncEvent;

impl App {
    /// Transport failures stay in the log; the UI only surfaces what the
    /// backend or local validation put in the snapshot's error field.
    pub(super) fn log_failure(&self, context: &str, error: impl std::fmt::Display) {
        tracing::warn!("{context}: {error}");
    }

    pub(super) fn surface_error(&mut self, message: impl Into<String>) {
        self.snapshot.error = message.into();
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            tokio::spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppAsyncEvent};
    use crate::config::Config;
    use printlink_client::feed::PushEnvelope;
    use printlink_client::types::ConnectionStep;
    use serde_json::json;

    // These run without a tokio runtime on purpose: any code path that
    // tried to issue a network call would hit tokio::spawn and panic the
    // test.

    fn push(app: &mut App, plugin: &str, data: serde_json::Value) {
        app.on_push(PushEnvelope {
            plugin: plugin.to_string(),
            data,
        });
    }

    #[test]
    fn ignores_pushes_from_other_plugins() {
        let mut app = App::new(Config::default());
        push(
            &mut app,
            "printlink",
            json!({ "step": "connected", "socket_connected": true }),
        );
        let before = app.snapshot.clone();

        push(
            &mut app,
            "some_other_plugin",
            json!({ "step": "error", "error": "boom" }),
        );
        assert_eq!(app.snapshot, before);
    }

    #[test]
    fn last_push_wins() {
        let mut app = App::new(Config::default());
        push(&mut app, "printlink", json!({ "step": "connected", "error": "" }));
        assert_eq!(app.snapshot.step, ConnectionStep::Connected);
        assert!(!app.snapshot.has_error());

        push(
            &mut app,
            "printlink",
            json!({ "step": "error", "error": "disk full" }),
        );
        assert_eq!(app.snapshot.step, ConnectionStep::Error);
        assert_eq!(app.snapshot.error, "disk full");
    }

    #[test]
    fn push_with_config_cancelled_clears_pending_token() {
        let mut app = App::new(Config::default());
        push(
            &mut app,
            "printlink",
            json!({ "step": "awaiting_authorization", "auth_token": "abc123" }),
        );
        assert_eq!(app.snapshot.auth_token.as_deref(), Some("abc123"));

        push(
            &mut app,
            "printlink",
            json!({ "step": "not_configured", "config_cancelled": true, "auth_token": "abc123" }),
        );
        assert_eq!(app.snapshot.auth_token, None);
    }

    #[test]
    fn cancel_configuration_is_local() {
        let mut app = App::new(Config::default());
        push(
            &mut app,
            "printlink",
            json!({ "step": "awaiting_authorization", "auth_token": "abc123" }),
        );

        app.cancel_configuration();
        assert_eq!(app.snapshot.auth_token, None);
        assert_eq!(app.snapshot.step, ConnectionStep::AwaitingAuthorization);
    }

    #[test]
    fn empty_credential_is_rejected_locally() {
        let mut app = App::new(Config::default());
        app.input.start_credential_entry();

        app.install_with_credential();
        assert!(app.snapshot.has_error());
    }

    #[test]
    fn failed_pull_keeps_previous_snapshot() {
        let mut app = App::new(Config::default());
        push(
            &mut app,
            "printlink",
            json!({ "step": "connected", "socket_connected": true, "configured": true }),
        );
        let before = app.snapshot.clone();

        let tx = app.app_async_tx.as_ref().expect("async tx").clone();
        tx.send(AppAsyncEvent::StatusFetched {
            status: None,
            error: Some("connection refused".to_string()),
        })
        .expect("send fetch failure");
        app.process_events();

        assert_eq!(app.snapshot, before);
        assert!(!app.fetching);
    }

    #[test]
    fn successful_pull_retains_absent_fields() {
        let mut app = App::new(Config::default());
        push(
            &mut app,
            "printlink",
            json!({ "step": "connected", "socket_connected": true }),
        );

        let partial = serde_json::from_value(json!({ "install_progress": 30 })).expect("parse");
        let tx = app.app_async_tx.as_ref().expect("async tx").clone();
        tx.send(AppAsyncEvent::StatusFetched {
            status: Some(partial),
            error: None,
        })
        .expect("send fetch result");
        app.process_events();

        assert_eq!(app.snapshot.step, ConnectionStep::Connected);
        assert!(app.snapshot.socket_connected);
        assert_eq!(app.snapshot.install_progress, 30);
    }

    #[test]
    fn malformed_push_payload_is_discarded() {
        let mut app = App::new(Config::default());
        push(&mut app, "printlink", json!({ "step": "connected" }));
        let before = app.snapshot.clone();

        push(&mut app, "printlink", json!({ "install_progress": "lots" }));
        assert_eq!(app.snapshot, before);
    }
}

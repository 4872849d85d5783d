use anyhow::{anyhow, Result};
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};
use tracing::{debug, error, info, warn};
use url::Url;

/// Plugin message as broadcast on the host's push socket. The host
/// multiplexes every plugin over one socket, so each payload is tagged
/// with the plugin it came from.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    pub plugin: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum FeedEvent {
    Connected,
    Push(PushEnvelope),
    Disconnected,
}

/// Listens on the host's push socket and forwards plugin envelopes.
///
/// Envelopes are forwarded unfiltered; deciding which plugin's messages
/// matter is the consumer's contract. The connection loop reconnects with
/// exponential backoff, so a dropped socket only ever means a stale
/// snapshot until the next session.
pub struct PushFeedClient {
    url: String,
    event_tx: mpsc::UnboundedSender<FeedEvent>,
}

impl PushFeedClient {
    pub fn new(base_url: &str, event_tx: mpsc::UnboundedSender<FeedEvent>) -> Result<Self> {
        Ok(Self {
            url: push_url(base_url)?,
            event_tx,
        })
    }

    pub async fn run(self) {
        let mut backoff = Duration::from_secs(1);
        let max_backoff = Duration::from_secs(30);

        loop {
            match self.connect_and_listen().await {
                Ok(()) => {
                    info!("Push feed closed gracefully");
                    backoff = Duration::from_secs(1);
                }
                Err(e) => {
                    error!("Push feed error: {}. Reconnecting in {:?}", e, backoff);
                    sleep(backoff).await;
                    backoff = std::cmp::min(backoff * 2, max_backoff);
                }
            }
        }
    }

    async fn connect_and_listen(&self) -> Result<()> {
        info!("Connecting to push feed: {}", self.url);
        let (ws_stream, _) = connect_async(&self.url).await?;
        info!("Push feed connected");

        let _ = self.event_tx.send(FeedEvent::Connected);

        let (_write, mut read) = ws_stream.split();

        loop {
            match timeout(Duration::from_secs(60), read.next()).await {
                Ok(Some(Ok(WsMessage::Text(text)))) => {
                    debug!("Received: {}", text);
                    self.handle_frame(&text);
                }
                Ok(Some(Ok(WsMessage::Close(_)))) => {
                    info!("Push feed closed by server");
                    break;
                }
                Ok(Some(Err(e))) => {
                    let _ = self.event_tx.send(FeedEvent::Disconnected);
                    return Err(anyhow!("Push feed error: {}", e));
                }
                Ok(None) => {
                    info!("Push feed stream ended");
                    break;
                }
                Err(_) => {
                    debug!("No push within 60s, still listening");
                }
                _ => {}
            }
        }

        let _ = self.event_tx.send(FeedEvent::Disconnected);
        Ok(())
    }

    fn handle_frame(&self, text: &str) {
        match serde_json::from_str::<PushEnvelope>(text) {
            Ok(envelope) => {
                let _ = self.event_tx.send(FeedEvent::Push(envelope));
            }
            Err(e) => {
                warn!("Discarding malformed push frame: {}", e);
            }
        }
    }
}

/// Push socket address for a host base URL: same host, `/push` path,
/// `ws`/`wss` scheme.
fn push_url(base_url: &str) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(anyhow!("unsupported scheme: {other}")),
    };
    url.set_scheme(scheme)
        .map_err(|()| anyhow!("could not derive a websocket url from {base_url}"))?;
    url.set_path("/push");
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derives_push_url_from_host_base() {
        assert_eq!(
            push_url("http://octopi.local:5000").expect("push url"),
            "ws://octopi.local:5000/push"
        );
        assert_eq!(
            push_url("https://printer.example/").expect("push url"),
            "wss://printer.example/push"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(push_url("ftp://printer.example").is_err());
    }

    #[test]
    fn parses_plugin_envelopes() {
        let envelope: PushEnvelope = serde_json::from_value(json!({
            "plugin": "printlink",
            "data": { "step": "connected", "socket_connected": true },
        }))
        .expect("parse");
        assert_eq!(envelope.plugin, "printlink");
        assert_eq!(envelope.data["step"], "connected");
    }
}

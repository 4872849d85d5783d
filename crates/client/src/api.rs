use crate::error::{ApiError, ApiResult};
use crate::types::PartialStatus;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one plugin backend.
///
/// Every method maps to a single backend endpoint and reports whatever the
/// transport reports. There is no retry and no request cancellation; a
/// failed action is simply abandoned and the push feed carries the real
/// outcome later.
#[derive(Clone)]
pub struct PluginApi {
    http: Client,
    base_url: String,
    plugin_id: String,
    api_key: Option<String>,
}

impl PluginApi {
    pub fn new(base_url: &str, plugin_id: &str, api_key: Option<String>) -> Self {
        let http = Client::builder()
            .user_agent("printlink/0.1")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            plugin_id: plugin_id.to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/plugin/{}/{}", self.base_url, self.plugin_id, path)
    }

    async fn get(&self, path: &str) -> ApiResult<reqwest::Response> {
        let mut request = self.http.get(self.endpoint(path));
        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }
        let response = request.send().await?;
        debug!(endpoint = path, status = %response.status(), "GET");
        if !response.status().is_success() {
            return Err(ApiError::Http {
                status: response.status().as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(response)
    }

    async fn post(&self, path: &str, payload: serde_json::Value) -> ApiResult<reqwest::Response> {
        let mut request = self.http.post(self.endpoint(path)).json(&payload);
        if let Some(ref key) = self.api_key {
            request = request.header("X-Api-Key", key);
        }
        let response = request.send().await?;
        debug!(endpoint = path, status = %response.status(), "POST");
        if !response.status().is_success() {
            return Err(ApiError::Http {
                status: response.status().as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(response)
    }

    /// Fetches the current status payload. Used at startup and whenever the
    /// push feed reconnects.
    pub async fn fetch_status(&self) -> ApiResult<PartialStatus> {
        let response = self.get("data").await?;
        Ok(response.json::<PartialStatus>().await?)
    }

    /// Asks the backend to start its pairing flow. The pairing token
    /// arrives over the push feed, not in this response.
    pub async fn begin_authorization(&self) -> ApiResult<()> {
        self.get("authorize").await.map(drop)
    }

    pub async fn disable(&self) -> ApiResult<()> {
        self.get("disable").await.map(drop)
    }

    pub async fn reconnect(&self) -> ApiResult<()> {
        self.get("reconnect").await.map(drop)
    }

    pub async fn run_install(&self) -> ApiResult<()> {
        self.get("run_docker").await.map(drop)
    }

    pub async fn install_with_credential(&self, credential: &str) -> ApiResult<()> {
        if credential.trim().is_empty() {
            return Err(ApiError::Validation(
                "a credential is required for the privileged install".to_string(),
            ));
        }
        self.post("install_docker", json!({ "credential": credential }))
            .await
            .map(drop)
    }

    pub async fn cancel_install(&self) -> ApiResult<()> {
        self.get("install_docker_cancel").await.map(drop)
    }

    pub async fn reboot(&self) -> ApiResult<()> {
        self.get("reboot").await.map(drop)
    }

    pub async fn toggle_navbar(&self) -> ApiResult<()> {
        self.post("navbar/switch", json!({})).await.map(drop)
    }
}

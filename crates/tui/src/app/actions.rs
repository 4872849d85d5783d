use super::*;

impl App {
    pub(super) fn login(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.begin_authorization().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to begin authorization".to_string(),
                error,
            }
        });
    }

    pub(super) fn disable(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.disable().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to disable the integration".to_string(),
                error,
            }
        });
    }

    pub(super) fn reconnect(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.reconnect().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to reconnect".to_string(),
                error,
            }
        });
    }

    pub(super) fn run_install(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.run_install().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to start the install".to_string(),
                error,
            }
        });
    }

    /// Privileged install. An empty credential fails locally and sends
    /// nothing; the message lands in the visible error field until the
    /// next update overwrites it.
    pub(super) fn install_with_credential(&mut self) {
        let credential = self.input.buffer.trim().to_string();
        self.input.clear();
        if credential.is_empty() {
            self.surface_error("A credential is required for the privileged install");
            return;
        }
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api
                .install_with_credential(&credential)
                .await
                .err()
                .map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to start the privileged install".to_string(),
                error,
            }
        });
    }

    pub(super) fn cancel_install(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.cancel_install().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to cancel the install".to_string(),
                error,
            }
        });
    }

    pub(super) fn reboot(&self) {
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.reboot().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to schedule the reboot".to_string(),
                error,
            }
        });
    }

    /// Flips the local indicator and tells the backend so the preference
    /// survives restarts.
    pub(super) fn toggle_navbar(&mut self) {
        self.show_navbar = !self.show_navbar;
        let api = self.api.clone();
        self.spawn_app_task(async move {
            let error = api.toggle_navbar().await.err().map(|e| e.to_string());
            AppAsyncEvent::ActionFinished {
                context: "Failed to persist the navbar preference".to_string(),
                error,
            }
        });
    }

    /// Local only: drops the pending pairing token. No request goes out;
    /// the backend either signalled the cancellation or the user dismissed
    /// the token.
    pub fn cancel_configuration(&mut self) {
        self.snapshot.auth_token = None;
    }
}

pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Connection:
  a             Begin authorization (pairing)
  r             Reconnect to the remote service
  d             Disable the integration
  Esc           Dismiss a pending pairing token

Install:
  i             Run the dependency install
  I             Privileged install (asks for a credential)
  c             Cancel a running install

Host:
  b             Reboot the host
  g             Refresh status now

General:
  n             Toggle the navbar indicator
  ?             Toggle this help
  Ctrl + Q      Quit
"#
        .to_string()
    }
}

use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        if let Event::Key(key) = event {
            return self.handle_key(key);
        }
        Ok(false)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.input.mode == InputMode::Credential {
            match key.code {
                KeyCode::Esc => self.input.clear(),
                KeyCode::Enter => self.install_with_credential(),
                KeyCode::Backspace => self.input.handle_backspace(),
                KeyCode::Char(c) => self.input.handle_char(c),
                _ => {}
            }
            return Ok(false);
        }

        if self.show_help {
            self.show_help = false;
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Ok(true);
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('a') => self.login(),
            KeyCode::Char('r') => self.reconnect(),
            KeyCode::Char('d') => self.disable(),
            KeyCode::Char('i') => self.run_install(),
            KeyCode::Char('I') => self.input.start_credential_entry(),
            KeyCode::Char('c') => self.cancel_install(),
            KeyCode::Char('b') => self.reboot(),
            KeyCode::Char('g') => self.request_initial_state(),
            KeyCode::Char('n') => self.toggle_navbar(),
            KeyCode::Esc => {
                if self.snapshot.auth_token.is_some() {
                    self.cancel_configuration();
                }
            }
            _ => {}
        }
        Ok(false)
    }
}

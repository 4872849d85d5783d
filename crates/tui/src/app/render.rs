use super::*;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        use ratatui::layout::{Constraint, Direction, Layout};

        let area = frame.area();

        if self.show_help {
            self.render_help(frame, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if self.show_navbar { 1 } else { 0 }),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        if self.show_navbar {
            self.render_navbar(frame, chunks[0]);
        }
        self.render_panel(frame, chunks[1]);
        if self.input.mode == InputMode::Credential {
            self.render_credential_prompt(frame, chunks[2]);
        } else {
            self.render_footer(frame, chunks[2]);
        }
    }

    /// One canonical mapping for both the navbar indicator and the panel.
    fn indicator_color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self.snapshot.step.indicator() {
            StatusIndicator::Healthy => Color::Rgb(0x00, 0xa6, 0x9a),
            StatusIndicator::Intermediate => Color::Rgb(0xff, 0x8f, 0x00),
            StatusIndicator::Attention => Color::Rgb(0xf5, 0x00, 0x57),
        }
    }

    fn render_navbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::style::{Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let mut spans = vec![
            Span::styled(" printlink ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("● ", Style::default().fg(self.indicator_color())),
            Span::raw(self.snapshot.status_label().to_string()),
        ];
        if let Some(updated) = self.last_update {
            spans.push(Span::raw(format!(
                "  (updated {})",
                updated.format("%H:%M:%S")
            )));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        use ratatui::layout::{Constraint, Direction, Layout};
        use ratatui::style::{Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

        let (text_area, gauge_area) = if self.snapshot.installing {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let snapshot = &self.snapshot;
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Step: "),
                Span::styled(
                    snapshot.step.label(),
                    Style::default()
                        .fg(self.indicator_color())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!(
                "Remote service: {}",
                if snapshot.socket_connected {
                    "connected"
                } else {
                    "not connected"
                }
            )),
            Line::from(format!(
                "Configured: {}",
                if snapshot.configured { "yes" } else { "no" }
            )),
            Line::from(format!(
                "Docker: {}",
                if snapshot.docker_running {
                    "running"
                } else if snapshot.docker_available {
                    "available"
                } else {
                    "not installed"
                }
            )),
        ];
        if !snapshot.os.is_empty() {
            lines.push(Line::from(format!(
                "Host: {} ({})",
                snapshot.os, snapshot.machine
            )));
        }
        if snapshot.reboot_required {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Reboot required to finish the install (press b)",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        if let Some(ref token) = snapshot.auth_token {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Pairing token: {token}")));
            lines.push(Line::from(
                "Enter this token in the mobile app to finish pairing. Esc dismisses it.",
            ));
        }
        if snapshot.has_error() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                snapshot.error.clone(),
                Style::default().fg(self.indicator_color()),
            )));
        }
        if self.fetching {
            lines.push(Line::from(""));
            lines.push(Line::from("Refreshing status..."));
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" status "));
        frame.render_widget(paragraph, text_area);

        if let Some(gauge_area) = gauge_area {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" installing "),
                )
                .percent(u16::from(snapshot.install_progress))
                .label(format!("{}%", snapshot.install_progress));
            frame.render_widget(gauge, gauge_area);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let hints =
            "a authorize | r reconnect | d disable | i install | I privileged install | b reboot | ? help | Ctrl+Q quit";
        let paragraph = Paragraph::new(hints).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_credential_prompt(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let masked = "*".repeat(self.input.buffer.chars().count());
        let paragraph = Paragraph::new(format!("{masked}▌")).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" credential (Enter to install, Esc to cancel) "),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let paragraph = Paragraph::new(self.keybinds.help_text())
            .block(Block::default().borders(Borders::ALL).title(" printlink "));
        frame.render_widget(paragraph, area);
    }
}

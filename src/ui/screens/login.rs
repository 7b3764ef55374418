use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{prelude::*, widgets::*};
use reqwest::Client;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::{spawn_login, validate_credentials, LoginResult};
use crate::ui::{components::utils::centered_rect, TerminalGuard};

/// How the login screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Mobile,
    Password,
}

pub async fn run_login(client: &Client, config: &AppConfig) -> Result<LoginOutcome> {
    // Ensure raw mode and the alternate screen are always restored regardless of how we exit.
    let mut guard = TerminalGuard::new()?;

    let mut mobile_number = String::new();
    let mut password = String::new();
    let mut focus = Field::Mobile;
    let mut banner: Option<String> = None;
    let mut in_flight = false;

    let (tx, mut rx) = mpsc::unbounded_channel::<LoginResult>();

    loop {
        while let Ok(result) = rx.try_recv() {
            in_flight = false;
            match result {
                Ok(()) => {
                    guard.restore()?;
                    return Ok(LoginOutcome::Authenticated);
                }
                // Failed attempts leave the form populated for correction.
                Err(err) => banner = Some(err.to_string()),
            }
        }

        guard.terminal_mut().draw(|f| {
            draw_login(
                f,
                &mobile_number,
                &password,
                focus,
                banner.as_deref(),
                in_flight,
            )
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(k) = event::read()? {
                match k.code {
                    KeyCode::Esc => {
                        guard.restore()?;
                        return Ok(LoginOutcome::Exit);
                    }
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        guard.restore()?;
                        return Ok(LoginOutcome::Exit);
                    }
                    KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                        focus = match focus {
                            Field::Mobile => Field::Password,
                            Field::Password => Field::Mobile,
                        };
                    }
                    KeyCode::Enter if !in_flight => {
                        match validate_credentials(&mobile_number, &password) {
                            Ok(credentials) => {
                                banner = None;
                                in_flight = true;
                                spawn_login(
                                    client.clone(),
                                    config.clone(),
                                    credentials,
                                    tx.clone(),
                                );
                            }
                            // Validation fails fast; no request leaves the machine.
                            Err(err) => banner = Some(err.to_string()),
                        }
                    }
                    KeyCode::Backspace if !in_flight => {
                        let field = match focus {
                            Field::Mobile => &mut mobile_number,
                            Field::Password => &mut password,
                        };
                        field.pop();
                    }
                    KeyCode::Char(c) if !in_flight => {
                        let field = match focus {
                            Field::Mobile => &mut mobile_number,
                            Field::Password => &mut password,
                        };
                        field.push(c);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn draw_login(
    f: &mut Frame,
    mobile_number: &str,
    password: &str,
    focus: Field,
    banner: Option<&str>,
    in_flight: bool,
) {
    let size = f.size();
    let area = centered_rect(60, 60, size);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Bullion Prices — Login");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new("Sign in with your registered mobile number")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[0],
    );

    render_input(
        f,
        chunks[1],
        "Mobile number",
        mobile_number,
        focus == Field::Mobile,
    );
    let masked = "•".repeat(password.chars().count());
    render_input(f, chunks[2], "Password", &masked, focus == Field::Password);

    let status = if in_flight {
        Span::styled("Verifying...", Style::default().fg(Color::Yellow))
    } else if let Some(message) = banner {
        Span::styled(message.to_string(), Style::default().fg(Color::Red))
    } else {
        Span::styled(
            "Enter submit • Tab switch field • Esc quit",
            Style::default().fg(Color::Gray),
        )
    };
    f.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        chunks[3],
    );
}

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let input = Paragraph::new(value.to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border_style),
    );
    f.render_widget(input, area);
}

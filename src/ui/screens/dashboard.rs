use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{prelude::*, widgets::*};
use reqwest::Client;
use tokio::sync::mpsc;

use crate::app::state::{DashboardState, FetchStatus};
use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::{spawn_price_fetch, FetchKind, FetchOutcome, PriceSnapshot};
use crate::ui::{components::utils::centered_rect, TerminalGuard};
use crate::utils::format_clock;

/// How the dashboard screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardOutcome {
    Logout,
    Exit,
}

pub async fn run_dashboard(client: &Client, config: &AppConfig) -> Result<DashboardOutcome> {
    let mut guard = TerminalGuard::new()?;
    let mut state = DashboardState::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    // The first fetch fires immediately; the deadline then re-arms every poll
    // interval for as long as this screen is mounted.
    let mut next_poll = Instant::now();

    loop {
        if Instant::now() >= next_poll {
            state.begin(FetchKind::Auto);
            spawn_price_fetch(client.clone(), config.clone(), FetchKind::Auto, tx.clone());
            next_poll = Instant::now() + config.poll_interval;
        }

        // Apply completions in arrival order. There is no in-flight guard, so
        // with overlapping fetches the last response to land stays on screen.
        while let Ok(outcome) = rx.try_recv() {
            log::debug!("{:?} price fetch resolved", outcome.kind);
            state.apply(outcome.result, Local::now());
        }

        guard.terminal_mut().draw(|f| draw_dashboard(f, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(k) = event::read()? {
                match k.code {
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        state.begin(FetchKind::Manual);
                        spawn_price_fetch(
                            client.clone(),
                            config.clone(),
                            FetchKind::Manual,
                            tx.clone(),
                        );
                    }
                    KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Esc => {
                        // Dropping the receiver discards any fetch still in
                        // flight, and the poll deadline dies with this loop.
                        guard.restore()?;
                        return Ok(DashboardOutcome::Logout);
                    }
                    KeyCode::Char('q') => {
                        guard.restore()?;
                        return Ok(DashboardOutcome::Exit);
                    }
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        guard.restore()?;
                        return Ok(DashboardOutcome::Exit);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn draw_dashboard(f: &mut Frame, state: &DashboardState) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);

    let updated = match state.last_updated() {
        Some(at) => format!("Last updated: {}", format_clock(at)),
        None => "Last updated: never".to_string(),
    };
    let header = Paragraph::new(format!("Today's Bullion Prices\n{updated}"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, chunks[0]);

    // The banner row carries the refresh indicator or the error plus retry
    // hint; the stale table below stays visible in both cases.
    let status_line = match state.status() {
        FetchStatus::Refreshing => Line::from(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::Yellow),
        )),
        FetchStatus::Error(message) => Line::from(Span::styled(
            format!("{message}  (press r to retry)"),
            Style::default().fg(Color::Red),
        )),
        _ => Line::default(),
    };
    f.render_widget(Paragraph::new(status_line), chunks[1]);

    if *state.status() == FetchStatus::Loading {
        let area = centered_rect(40, 20, chunks[2]);
        f.render_widget(
            Paragraph::new("Loading prices...").alignment(Alignment::Center),
            area,
        );
    } else if let Some(snapshot) = state.snapshot() {
        render_price_table(f, chunks[2], snapshot);
    } else {
        let area = centered_rect(40, 20, chunks[2]);
        f.render_widget(
            Paragraph::new("No prices available.").alignment(Alignment::Center),
            area,
        );
    }

    let help = Paragraph::new("r refresh • l logout • q quit • Ctrl+C exit")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[3]);
}

fn render_price_table(f: &mut Frame, area: Rect, snapshot: &PriceSnapshot) {
    let rows = vec![
        Row::new(vec!["Gold (1g)".to_string(), snapshot.gold_price_1g.clone()]),
        Row::new(vec!["Gold (8g)".to_string(), snapshot.gold_price_8g.clone()]),
        Row::new(vec![
            "Silver (1g)".to_string(),
            snapshot.silver_price_1g.clone(),
        ]),
    ];

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)])
        .header(Row::new(vec!["Metal", "Price"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title("Daily Rates"));
    f.render_widget(table, area);
}

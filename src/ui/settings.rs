use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use uuid::Uuid;

use crate::session::ZonesSession;

use super::app::{PendingAction, SettingsApp};
use super::widgets;

/// Interactive zone settings view; owns the terminal and the session
pub struct SettingsView {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    session: ZonesSession,
    athlete_id: Uuid,
    app: SettingsApp,
}

impl SettingsView {
    /// Create the view from an already-fetched session
    pub fn new(session: ZonesSession, athlete_id: Uuid) -> Result<Self> {
        let data = session
            .data()
            .context("Zones must be fetched before opening the settings view")?
            .clone();

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let app = SettingsApp::from_data(&data);

        Ok(Self {
            terminal,
            session,
            athlete_id,
            app,
        })
    }

    /// Run the settings event loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code);
                    }
                }
            }

            match self.app.pending {
                PendingAction::Save => {
                    self.app.pending = PendingAction::None;
                    self.save().await;
                }
                PendingAction::Reload => {
                    self.app.pending = PendingAction::None;
                    self.reload().await;
                }
                PendingAction::None => {}
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Save on explicit request, then refresh from the server
    async fn save(&mut self) {
        self.app.status = String::from("Saving...");
        let changes = self.app.changes();

        match self.session.save_changes(self.athlete_id, &changes).await {
            Ok(()) => self.reload_after_save().await,
            Err(e) => {
                // Keep local edits so the user can retry
                self.app.status = format!("✗ Save failed: {}; press s to retry", e);
            }
        }
    }

    async fn reload_after_save(&mut self) {
        match self.session.fetch_zones(self.athlete_id).await {
            Ok(data) => {
                let data = data.clone();
                self.app.reload(&data);
                self.app.status = String::from("✓ Saved");
            }
            Err(e) => {
                self.app.status = format!("✓ Saved, but refresh failed: {}", e);
            }
        }
    }

    async fn reload(&mut self) {
        match self.session.fetch_zones(self.athlete_id).await {
            Ok(data) => {
                let data = data.clone();
                self.app.reload(&data);
            }
            Err(e) => {
                self.app.status = format!("✗ Reload failed: {}; previous data kept", e);
            }
        }
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for SettingsView {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &SettingsApp) {
    let size = f.area();

    // Main layout: top area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    // Fields on the left, calculated tables on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[0]);

    let tables = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    widgets::render_fields(columns[0], f.buffer_mut(), app);

    widgets::render_zone_table(
        tables[0],
        f.buffer_mut(),
        &format!("Power zones ({})", app.power_system),
        "W",
        &app.preview.power_table,
    );

    widgets::render_zone_table(
        tables[1],
        f.buffer_mut(),
        &format!("Heart rate zones ({})", app.hr_system),
        "bpm",
        &app.preview.hr_table,
    );

    widgets::render_status_bar(main_chunks[1], f.buffer_mut(), app);

    // Render help overlay if active
    if app.show_help {
        let help_area = centered_rect(50, 60, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

//! TUI module - Terminal dashboard with ratatui

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{Stdout, stdout};

use crate::models::{UserProfile, WorkoutLog};
use crate::stats::Analytics;
use crate::store::Store;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// App state for TUI
pub struct App {
    store: Store,
    profile: UserProfile,
    history: Vec<WorkoutLog>,
    should_quit: bool,
}

impl App {
    pub fn new(store: Store) -> Result<Self> {
        let profile = store.profile()?;
        let history = store.history()?;
        Ok(Self {
            store,
            profile,
            history,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        restore_terminal()?;
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(area);

        // Header with profile summary
        let analytics = Analytics::new(self.history.clone());
        let header_text = format!(
            "entrena - Bienvenido, {}\nPeso: {} kg | Objetivo: {} | Entrenamientos: {}",
            self.profile.name,
            self.profile.weight_kg,
            self.profile.goal.label(),
            analytics.total_workouts(),
        );
        let header = Paragraph::new(header_text)
            .style(Style::default().fg(Color::Cyan).bold())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        // Workout history table, newest first
        let rows: Vec<Row> = self
            .history
            .iter()
            .rev()
            .map(|log| {
                let total_sets: usize = log.exercises.iter().map(|e| e.sets.len()).sum();
                Row::new(vec![
                    Cell::from(log.date.format("%Y-%m-%d").to_string()),
                    Cell::from(log.name.clone()),
                    Cell::from(log.exercises.len().to_string()),
                    Cell::from(total_sets.to_string()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(8),
            ],
        )
        .header(
            Row::new(vec!["Fecha", "Entrenamiento", "Ejercicios", "Series"])
                .style(Style::default().bold()),
        )
        .block(Block::default().borders(Borders::ALL).title("Historial"));

        frame.render_widget(table, chunks[1]);

        // Footer
        let footer = Paragraph::new("q: salir | r: refrescar")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[2]);
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('r') => {
                            self.profile = self.store.profile()?;
                            self.history = self.store.history()?;
                        }
                        _ => {}
                    }
                }
        Ok(())
    }
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

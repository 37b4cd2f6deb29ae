use blockfall_engine::PieceEngine;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{SessionDisplay, SessionState},
};

#[derive(Debug)]
pub struct PlayApp {
    engine: PieceEngine,
    show_ghost: bool,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(engine: PieceEngine, show_ghost: bool) -> Self {
        Self {
            engine,
            show_ghost,
            paused: false,
            is_exiting: false,
        }
    }

    pub fn engine(&self) -> &PieceEngine {
        &self.engine
    }

    fn session_state(&self) -> SessionState {
        if self.engine.is_game_over() {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    /// Follows the engine's fall delay, which shrinks as the level rises.
    fn sync_tick_interval(&self, tui: &mut Tui) {
        let interval = self
            .session_state()
            .is_playing()
            .then(|| self.engine.fall_delay());
        if tui.tick_interval() != interval {
            tui.set_tick_interval(interval);
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        let state = self.session_state();
        let is_playing = state.is_playing();
        let can_toggle_pause = !state.is_game_over();

        if let Some(event) = event.as_key_press_event() {
            match event.code {
                KeyCode::Left if is_playing => self.engine.move_left(),
                KeyCode::Right if is_playing => self.engine.move_right(),
                KeyCode::Down if is_playing => self.engine.soft_drop(),
                KeyCode::Up | KeyCode::Char('x') if is_playing => self.engine.rotate(),
                KeyCode::Char(' ') if is_playing => self.engine.hard_drop(),
                KeyCode::Char('p') if can_toggle_pause => self.paused = !self.paused,
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
        self.sync_tick_interval(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        let state = self.session_state();
        let session_display = SessionDisplay::new(&self.engine, state, self.show_ghost);
        let help_text = match state {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ X (Rotate) | Space (Hard Drop) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
            SessionState::GameOver => "Controls: Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if self.session_state().is_playing() {
            self.engine.tick();
        }
        self.sync_tick_interval(tui);
    }
}

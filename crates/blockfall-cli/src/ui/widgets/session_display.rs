use blockfall_engine::PieceEngine;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{GridDisplay, PieceDisplay, StatsDisplay, color, style};

/// Whether the session accepts input and gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    engine: &'a PieceEngine,
    state: SessionState,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(engine: &'a PieceEngine, state: SessionState, show_ghost: bool) -> Self {
        Self {
            engine,
            state,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::DEFAULT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.state {
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };

        let game_grid = {
            let widget = GridDisplay::new(self.engine.grid())
                .falling_piece(self.engine.current_piece())
                .block(Block::bordered().border_style(border_style).style(style));
            if self.show_ghost {
                widget.ghost(self.engine.ghost_piece())
            } else {
                widget
            }
        };
        let next_panel = PieceDisplay::new().piece(self.engine.next_kind()).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );
        let stats_panel = StatsDisplay::new(self.engine.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );

        let [center_column, right_column] = Layout::horizontal([
            Constraint::Length(game_grid.width()),
            Constraint::Length(u16::max(next_panel.width(), stats_panel.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [grid_area] =
            Layout::vertical([Constraint::Length(game_grid.height())]).areas(center_column);

        let [next_area, stats_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(stats_panel.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(&Layout::horizontal([Constraint::Length(
            next_panel.width(),
        )]))[0];
        let stats_area = stats_area.layout::<1>(&Layout::horizontal([Constraint::Length(
            stats_panel.width(),
        )]))[0];

        let game_grid_width = game_grid.width();
        game_grid.render(grid_area, buf);
        next_panel.render(next_area, buf);
        stats_panel.render(stats_area, buf);

        let popup = match self.state {
            SessionState::Playing => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                grid_area.centered(Constraint::Length(game_grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GridSize, PieceSeed};

    use super::*;

    fn render(state: SessionState) -> Buffer {
        let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
        let engine = PieceEngine::with_seed(GridSize::new(10, 10).unwrap(), seed);
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(&engine, state, true).render(area, &mut buf);
        buf
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        let area = buf.area;
        (area.top()..area.bottom()).any(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.contains(needle)
        })
    }

    #[test]
    fn test_panels_are_drawn() {
        let buf = render(SessionState::Playing);
        assert!(contains(&buf, "NEXT"));
        assert!(contains(&buf, "STATS"));
        assert!(contains(&buf, "SCORE:"));
        assert!(!contains(&buf, "PAUSED"));
    }

    #[test]
    fn test_popup_follows_state() {
        assert!(contains(&render(SessionState::Paused), "PAUSED"));
        assert!(contains(&render(SessionState::GameOver), "GAME OVER!!"));
    }
}

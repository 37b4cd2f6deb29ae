use blockfall_engine::{MAX_SHAPE_SIZE, PieceKind, PieceRotation};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, Tile};

/// Shows a single piece kind in its spawn rotation.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(MAX_SHAPE_SIZE, CellDisplay::width())
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape(PieceRotation::default());
        let piece_area = area.centered(
            Constraint::Length(super::cells_to_u16(shape.width(), CellDisplay::width())),
            Constraint::Length(super::cells_to_u16(shape.height(), CellDisplay::height())),
        );

        let col_constraints = (0..shape.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..shape.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_cell = CellDisplay::from_tile(Tile::Empty, false);
        let occupied_cell = CellDisplay::from_tile(Tile::Piece(piece), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_filled(x, y) {
                    Widget::render(&occupied_cell, grid_cell, buf);
                } else {
                    Widget::render(&empty_cell, grid_cell, buf);
                }
            }
        }
    }
}

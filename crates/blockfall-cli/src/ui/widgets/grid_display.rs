use std::iter;

use blockfall_engine::{Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, Tile};

#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
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
        super::cells_to_u16(self.grid.width(), CellDisplay::width())
            .saturating_add(super::block_horizontal_margin(self.block.as_ref()))
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.grid.height(), CellDisplay::height())
            .saturating_add(super::block_vertical_margin(self.block.as_ref()))
    }

    /// Returns the grid's tiles row by row, with the ghost and the falling
    /// piece painted over the locked cells.
    fn tiles(&self) -> Vec<Vec<Tile>> {
        let mut tiles = self
            .grid
            .rows()
            .map(|row| row.iter().copied().map(Tile::from).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let overlays = self
            .ghost
            .map(|ghost| (ghost, Tile::Ghost))
            .into_iter()
            .chain(
                self.falling_piece
                    .map(|piece| (piece, Tile::Piece(piece.kind()))),
            );
        for (piece, tile) in overlays {
            for (x, y) in piece.occupied_cells() {
                // Rows above the top edge are not drawn
                let (Ok(col), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if let Some(slot) = tiles.get_mut(row).and_then(|r| r.get_mut(col)) {
                    *slot = tile;
                }
            }
        }
        tiles
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..self.grid.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                CellDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GridSize, PieceKind, PiecePosition, PieceRotation};

    use super::*;

    #[test]
    fn test_falling_piece_covers_ghost() {
        let mut grid = Grid::new(GridSize::new(4, 4).unwrap());
        grid.lock([(0, 3, PieceKind::S)]);
        let piece = Piece::new(PieceKind::O, PieceRotation::default(), PiecePosition::new(1, -1));
        let ghost = Piece::new(PieceKind::O, PieceRotation::default(), PiecePosition::new(1, 0));

        let tiles = GridDisplay::new(&grid)
            .ghost(ghost)
            .falling_piece(piece)
            .tiles();

        // Row -1 is clipped; row 0 shows the falling piece over the ghost
        assert_eq!(tiles[0][1], Tile::Piece(PieceKind::O));
        assert_eq!(tiles[0][2], Tile::Piece(PieceKind::O));
        assert_eq!(tiles[1][1], Tile::Ghost);
        assert_eq!(tiles[1][2], Tile::Ghost);
        assert_eq!(tiles[3][0], Tile::Piece(PieceKind::S));
        assert_eq!(tiles[2][0], Tile::Empty);
    }

    #[test]
    fn test_size_includes_block() {
        let grid = Grid::new(GridSize::new(10, 20).unwrap());
        let display = GridDisplay::new(&grid);
        assert_eq!((display.width(), display.height()), (20, 20));

        let display = display.block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (22, 22));
    }
}

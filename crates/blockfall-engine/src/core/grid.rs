use crate::GridSizeError;

use super::piece::{Piece, PieceKind};

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked cell, tagged with the kind of the piece that placed it.
    Piece(PieceKind),
}

/// Dimensions of a [`Grid`], validated on construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::GridSize;
///
/// let size = GridSize::new(10, 20).unwrap();
/// assert_eq!((size.width(), size.height()), (10, 20));
///
/// assert!(GridSize::new(3, 20).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    width: usize,
    height: usize,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GridSize {
    /// Smallest width on which every piece kind spawns in every rotation.
    pub const MIN_WIDTH: usize = 4;
    /// Smallest height on which every piece kind fits in every rotation.
    pub const MIN_HEIGHT: usize = 4;
    /// Largest accepted width or height.
    pub const MAX_DIMENSION: usize = 1024;

    /// 20 columns × 20 rows.
    pub const DEFAULT: Self = Self {
        width: 20,
        height: 20,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, GridSizeError> {
        if !(Self::MIN_WIDTH..=Self::MAX_DIMENSION).contains(&width) {
            return Err(GridSizeError::Width { width });
        }
        if !(Self::MIN_HEIGHT..=Self::MAX_DIMENSION).contains(&height) {
            return Err(GridSizeError::Height { height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(self) -> usize {
        self.height
    }
}

/// The board of locked cells.
///
/// Cells are stored row-major in one contiguous buffer, row 0 at the top.
/// The only mutations are [`lock`](Self::lock) and
/// [`clear_full_rows`](Self::clear_full_rows).
///
/// Every coordinate passed to a `Grid` method must be in bounds; an
/// out-of-range access is a caller bug and panics.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, GridSize, PieceKind};
///
/// let mut grid = Grid::new(GridSize::new(4, 4).unwrap());
/// grid.lock((0..4).map(|col| (col, 3, PieceKind::I)));
/// grid.lock([(0, 2, PieceKind::O)]);
///
/// assert_eq!(grid.clear_full_rows(), 1);
/// assert!(grid.is_occupied(0, 3));
/// assert!(!grid.is_occupied(1, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.width * size.height],
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.size.height
    }

    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width() && row < self.height(),
            "cell ({col}, {row}) is outside the {}x{} grid",
            self.width(),
            self.height(),
        );
        row * self.width() + col
    }

    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[self.index(col, row)]
    }

    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.cell(col, row).is_piece()
    }

    /// Returns one row as a slice of `width` cells.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = self.index(0, row);
        &self.cells[start..][..self.width()]
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width())
    }

    /// Writes the given `(column, row, kind)` cells into the grid.
    ///
    /// # Panics
    ///
    /// Panics if a cell is out of bounds or already occupied.
    pub fn lock<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (usize, usize, PieceKind)>,
    {
        for (col, row, kind) in cells {
            let index = self.index(col, row);
            assert!(
                self.cells[index].is_empty(),
                "cell ({col}, {row}) is already occupied"
            );
            self.cells[index] = Cell::Piece(kind);
        }
    }

    /// Writes every cell of `piece` into the grid, tagged with its kind.
    ///
    /// # Panics
    ///
    /// Panics if a cell of the piece is out of bounds or already occupied.
    pub fn lock_piece(&mut self, piece: &Piece) {
        let kind = piece.kind();
        self.lock(piece.occupied_cells().map(|(x, y)| {
            // Negative coordinates map past the edge, where the bounds check rejects them
            let col = usize::try_from(x).unwrap_or(usize::MAX);
            let row = usize::try_from(y).unwrap_or(usize::MAX);
            (col, row, kind)
        }));
    }

    fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_piece())
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows above a removed row shift down, keeping their relative order, and
    /// the same number of empty rows appear at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width();
        let mut count = 0;
        for row in (0..self.height()).rev() {
            if self.is_row_full(row) {
                count += 1;
                continue;
            }
            if count > 0 {
                let src = row * width;
                self.cells
                    .copy_within(src..src + width, (row + count) * width);
            }
        }
        self.cells[..count * width].fill(Cell::Empty);
        count
    }
}

#[cfg(test)]
mod tests {
    use crate::core::piece::{PiecePosition, PieceRotation};

    use super::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(GridSize::new(width, height).unwrap())
    }

    fn fill_row(grid: &mut Grid, row: usize, kind: PieceKind) {
        let width = grid.width();
        grid.lock((0..width).map(|col| (col, row, kind)));
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = grid(5, 7);
        assert_eq!(grid.rows().len(), 7);
        for row in grid.rows() {
            assert_eq!(row.len(), 5);
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_grid_size_limits() {
        assert_eq!(GridSize::new(3, 20), Err(GridSizeError::Width { width: 3 }));
        assert_eq!(GridSize::new(20, 0), Err(GridSizeError::Height { height: 0 }));
        assert_eq!(
            GridSize::new(GridSize::MAX_DIMENSION + 1, 20),
            Err(GridSizeError::Width {
                width: GridSize::MAX_DIMENSION + 1
            })
        );
        assert!(GridSize::new(4, 4).is_ok());
        assert_eq!(GridSize::default(), GridSize::new(20, 20).unwrap());
    }

    #[test]
    fn test_lock_writes_identity() {
        let mut grid = grid(4, 4);
        grid.lock([(1, 2, PieceKind::T), (3, 3, PieceKind::S)]);

        assert_eq!(grid.cell(1, 2), Cell::Piece(PieceKind::T));
        assert_eq!(grid.cell(3, 3), Cell::Piece(PieceKind::S));
        assert!(grid.is_occupied(1, 2));
        assert!(!grid.is_occupied(2, 2));
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_lock_on_occupied_cell_panics() {
        let mut grid = grid(4, 4);
        grid.lock([(0, 0, PieceKind::I)]);
        grid.lock([(0, 0, PieceKind::O)]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_query_panics() {
        let grid = grid(4, 4);
        let _ = grid.is_occupied(4, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_lock_panics() {
        let mut grid = grid(4, 4);
        grid.lock([(0, 4, PieceKind::I)]);
    }

    #[test]
    fn test_lock_piece() {
        let mut grid = grid(4, 4);
        let piece = Piece::new(
            PieceKind::O,
            PieceRotation::default(),
            PiecePosition::new(2, 2),
        );
        grid.lock_piece(&piece);

        for (col, row) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(grid.cell(col, row), Cell::Piece(PieceKind::O));
        }
        assert_eq!(grid.cells.iter().filter(|c| c.is_piece()).count(), 4);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_lock_piece_above_grid_panics() {
        let mut grid = grid(4, 4);
        let piece = Piece::new(
            PieceKind::O,
            PieceRotation::default(),
            PiecePosition::new(0, -1),
        );
        grid.lock_piece(&piece);
    }

    #[test]
    fn test_clear_nothing() {
        let mut grid = grid(4, 4);
        grid.lock([(0, 3, PieceKind::I), (1, 3, PieceKind::I), (2, 3, PieceKind::I)]);
        let before = grid.clone();

        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut grid = grid(4, 5);
        fill_row(&mut grid, 4, PieceKind::I);
        grid.lock([(2, 3, PieceKind::T)]);

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.cell(2, 4), Cell::Piece(PieceKind::T));
        assert_eq!(grid.cells.iter().filter(|c| c.is_piece()).count(), 1);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = grid(4, 6);
        // Mark each partial row with a distinct column so order can be checked
        grid.lock([
            (0, 0, PieceKind::J),
            (1, 1, PieceKind::O),
            (2, 3, PieceKind::L),
            (3, 5, PieceKind::Z),
        ]);
        fill_row(&mut grid, 2, PieceKind::I);
        fill_row(&mut grid, 4, PieceKind::T);

        assert_eq!(grid.clear_full_rows(), 2);

        assert!(grid.row(0).iter().all(|c| c.is_empty()));
        assert!(grid.row(1).iter().all(|c| c.is_empty()));
        assert_eq!(grid.cell(0, 2), Cell::Piece(PieceKind::J));
        assert_eq!(grid.cell(1, 3), Cell::Piece(PieceKind::O));
        assert_eq!(grid.cell(2, 4), Cell::Piece(PieceKind::L));
        assert_eq!(grid.cell(3, 5), Cell::Piece(PieceKind::Z));
        assert_eq!(grid.cells.iter().filter(|c| c.is_piece()).count(), 4);
    }

    #[test]
    fn test_clear_consecutive_rows() {
        let mut grid = grid(4, 6);
        grid.lock([(1, 1, PieceKind::S)]);
        for row in 2..6 {
            fill_row(&mut grid, row, PieceKind::I);
        }

        assert_eq!(grid.clear_full_rows(), 4);
        assert_eq!(grid.cell(1, 5), Cell::Piece(PieceKind::S));
        assert_eq!(grid.cells.iter().filter(|c| c.is_piece()).count(), 1);
    }

    #[test]
    fn test_clear_all_rows() {
        let mut grid = grid(4, 4);
        for row in 0..4 {
            fill_row(&mut grid, row, PieceKind::O);
        }

        assert_eq!(grid.clear_full_rows(), 4);
        assert_eq!(grid, self::grid(4, 4));
    }
}

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Side length of the square box every shape matrix fits in.
pub const MAX_SHAPE_SIZE: usize = 4;

/// A rectangular cell matrix describing which cells of a piece are occupied.
///
/// `width` is the number of columns and `height` the number of rows. Cells
/// outside `width × height` are always unoccupied, so two shapes compare equal
/// exactly when their matrices match bit-for-bit.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceRotation};
///
/// let t = PieceKind::T.shape(PieceRotation::default());
/// assert_eq!((t.width(), t.height()), (3, 2));
///
/// let rotated = t.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < H {
            let mut col = 0;
            while col < W {
                cells[row][col] = rows[row][col] != 0;
                col += 1;
            }
            row += 1;
        }
        Self {
            width: W,
            height: H,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the cell at column `col`, row `row` of the matrix is occupied.
    #[must_use]
    pub const fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row][col]
    }

    /// Returns the `(column, row)` offsets of every occupied cell, row by row.
    pub fn occupied_offsets(self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col, row))
        })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// An `R×C` matrix becomes a `C×R` matrix with `new[j][R-1-i] = old[i][j]`.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < self.height {
            let mut j = 0;
            while j < self.width {
                cells[j][self.height - 1 - i] = self.cells[i][j];
                j += 1;
            }
            i += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// A falling piece: kind, rotation state and anchor position.
///
/// The anchor is the top-left corner of the piece's shape matrix. Pieces are
/// immutable values; movement and rotation return new `Piece` instances and
/// leave collision checking to the caller.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 20);
/// assert_eq!((piece.position().x(), piece.position().y()), (9, 0));
///
/// let moved = piece.left().rotated_clockwise();
/// assert_eq!(moved.position().x(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, position: PiecePosition) -> Self {
        Self {
            position,
            rotation,
            kind,
        }
    }

    /// Creates a piece in its canonical orientation, horizontally centred on a
    /// grid `grid_width` columns wide, at row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let rotation = PieceRotation::default();
        let shape_width = kind.shape(rotation).width();
        let x = to_coord(grid_width / 2) - to_coord(shape_width / 2);
        Self::new(kind, rotation, PiecePosition::new(x, 0))
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the shape matrix in the piece's current rotation.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the absolute `(column, row)` of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { x, y } = self.position;
        self.shape()
            .occupied_offsets()
            .map(move |(dx, dy)| (x + to_coord(dx), y + to_coord(dy)))
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.shifted(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    /// Returns the piece rotated 90° clockwise around the same anchor.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_clockwise(),
            ..*self
        }
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn to_coord(n: usize) -> i32 {
    // Grid dimensions are capped well below `i32::MAX` by `GridSize::new`.
    n as i32
}

/// Anchor position of a piece: the grid cell under the top-left corner of its
/// shape matrix.
///
/// Coordinates are signed. Columns grow rightward and rows grow downward from
/// the top-left of the grid; a shape whose leftmost matrix column is empty may
/// legally rest at `x = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Number of clockwise quarter turns applied since spawn, modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_clockwise(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// The seven piece kinds.
///
/// The kind is also the identity tag written into the grid when a piece
/// locks; it only matters for display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// O-piece.
    O = 2,
    /// L-piece.
    L = 3,
    /// T-piece.
    T = 4,
    /// Z-piece.
    Z = 5,
    /// S-piece.
    S = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::O,
        PieceKind::L,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Returns the shape matrix of this kind in the given rotation.
    #[must_use]
    pub const fn shape(self, rotation: PieceRotation) -> Shape {
        PIECE_SHAPES[self as usize][rotation.as_usize()]
    }
}

/// Generates all 4 rotation states of a shape by repeated 90° clockwise rotation.
const fn shape_rotations(shape: Shape) -> [Shape; 4] {
    let mut rotations = [shape; 4];
    let mut i = 1;
    while i < 4 {
        rotations[i] = rotations[i - 1].rotated_clockwise();
        i += 1;
    }
    rotations
}

const PIECE_SHAPES: [[Shape; 4]; PieceKind::LEN] = [
    // I-piece
    shape_rotations(Shape::from_rows([[1, 1, 1, 1]])),
    // J-piece
    shape_rotations(Shape::from_rows([[0, 0, 1], [0, 0, 1], [0, 1, 1]])),
    // O-piece
    shape_rotations(Shape::from_rows([[1, 1], [1, 1]])),
    // L-piece
    shape_rotations(Shape::from_rows([[1, 0, 0], [1, 0, 0], [1, 1, 0]])),
    // T-piece
    shape_rotations(Shape::from_rows([[1, 1, 1], [0, 1, 0]])),
    // Z-piece
    shape_rotations(Shape::from_rows([[1, 1, 0], [0, 1, 1]])),
    // S-piece
    shape_rotations(Shape::from_rows([[0, 1, 1], [1, 1, 0]])),
];

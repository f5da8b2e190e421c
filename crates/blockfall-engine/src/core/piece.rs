use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// A falling piece: four unit cells sharing one shape template.
///
/// The first cell is the pivot used as the rotation center. Cells are stored in
/// grid coordinates (column, row), with row 0 at the top of the grid.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::default();
/// let mut piece = Piece::spawn(PieceKind::T, &grid);
/// assert!(piece.move_by(0, 1, &grid));
/// assert!(piece.rotate(&grid));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    cells: [CellPosition; 4],
}

impl Piece {
    /// Places a piece of `kind` at the spawn column of `grid`, in the top rows.
    ///
    /// The spawn position is not validated; a blocked spawn is detected by the
    /// next attempt to move the piece.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid: &Grid) -> Self {
        Self::at(kind, CellPosition::new(grid.spawn_column(), 0))
    }

    /// Places a piece of `kind` with its template origin at `origin`.
    #[must_use]
    pub fn at(kind: PieceKind, origin: CellPosition) -> Self {
        let cells = kind
            .offsets()
            .map(|(dx, dy)| CellPosition::new(origin.x + dx, origin.y + dy));
        Self { kind, cells }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    #[must_use]
    pub fn cells(&self) -> &[CellPosition; 4] {
        &self.cells
    }

    #[must_use]
    pub fn pivot(&self) -> CellPosition {
        self.cells[0]
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(|cell| cell.offset(dx, dy)),
        }
    }

    /// Returns this piece rotated 90° clockwise around its pivot.
    ///
    /// Each cell at `(Δx, Δy)` from the pivot moves to `(-Δy, Δx)`. The `O`
    /// piece is symmetric and is returned unchanged.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        let pivot = self.pivot();
        Self {
            kind: self.kind,
            cells: self.cells.map(|cell| {
                let dx = cell.x - pivot.x;
                let dy = cell.y - pivot.y;
                CellPosition::new(pivot.x - dy, pivot.y + dx)
            }),
        }
    }

    /// Returns `true` if every cell translated by `(dx, dy)` lands on an empty
    /// cell inside the grid.
    #[must_use]
    pub fn can_move(&self, dx: i32, dy: i32, grid: &Grid) -> bool {
        grid.can_place(&self.translated(dx, dy))
    }

    /// Translates the piece if [`Self::can_move`] allows it.
    ///
    /// Returns `false` and leaves the piece untouched otherwise.
    pub fn move_by(&mut self, dx: i32, dy: i32, grid: &Grid) -> bool {
        let moved = self.translated(dx, dy);
        if !grid.can_place(&moved) {
            return false;
        }
        *self = moved;
        true
    }

    /// Rotates the piece clockwise if every rotated cell is valid.
    ///
    /// There are no wall kicks: a rotation blocked by a wall, the floor, or a
    /// settled cell is rejected as a whole.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let rotated = self.rotated_clockwise();
        if !grid.can_place(&rotated) {
            return false;
        }
        *self = rotated;
        true
    }
}

/// A cell coordinate on the grid: `x` is the column, `y` the row.
///
/// Coordinates are signed so that candidate positions left of or above the
/// grid can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CellPosition {
    pub x: i32,
    pub y: i32,
}

impl CellPosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Color tag of a piece, kept with settled cells for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Yellow,
    LightBlue,
    Orange,
    Blue,
    Green,
    Red,
    Purple,
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// O-piece.
    O = 0,
    /// I-piece.
    I = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// S-piece.
    S = 4,
    /// Z-piece.
    Z = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::O,
        Self::I,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
        Self::T,
    ];

    /// Template offsets of the four cells, pivot first.
    #[must_use]
    pub const fn offsets(self) -> [(i32, i32); 4] {
        PIECE_TEMPLATES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::O => PieceColor::Yellow,
            PieceKind::I => PieceColor::LightBlue,
            PieceKind::L => PieceColor::Orange,
            PieceKind::J => PieceColor::Blue,
            PieceKind::S => PieceColor::Green,
            PieceKind::Z => PieceColor::Red,
            PieceKind::T => PieceColor::Purple,
        }
    }
}

// Indexed by `PieceKind as usize`; the first offset of each template is the pivot.
const PIECE_TEMPLATES: [[(i32, i32); 4]; PieceKind::LEN] = [
    // O-piece
    [(1, 1), (1, 0), (0, 1), (0, 0)],
    // I-piece
    [(1, 1), (0, 1), (2, 1), (3, 1)],
    // L-piece
    [(1, 1), (0, 1), (2, 0), (2, 1)],
    // J-piece
    [(1, 1), (0, 1), (0, 0), (2, 1)],
    // S-piece
    [(1, 1), (0, 1), (1, 0), (2, 0)],
    // Z-piece
    [(1, 1), (1, 0), (0, 0), (2, 1)],
    // T-piece
    [(1, 1), (0, 1), (1, 0), (2, 1)],
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::core::grid::Block;

    fn cell_set(piece: &Piece) -> HashSet<CellPosition> {
        piece.cells().iter().copied().collect()
    }

    fn pos(x: i32, y: i32) -> CellPosition {
        CellPosition::new(x, y)
    }

    #[test]
    fn test_spawn_centers_template() {
        let grid = Grid::default();
        let piece = Piece::spawn(PieceKind::T, &grid);

        assert_eq!(grid.spawn_column(), 7);
        assert_eq!(
            piece.cells(),
            &[pos(8, 1), pos(7, 1), pos(8, 0), pos(9, 1)]
        );
        assert_eq!(piece.pivot(), pos(8, 1));
        assert_eq!(piece.color(), PieceColor::Purple);
    }

    #[test]
    fn test_every_template_has_four_distinct_cells() {
        for kind in PieceKind::ALL {
            let piece = Piece::at(kind, pos(0, 0));
            assert_eq!(cell_set(&piece).len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_move_by_translates_all_cells() {
        let grid = Grid::default();
        let mut piece = Piece::spawn(PieceKind::L, &grid);
        let before = piece;

        assert!(piece.move_by(-1, 2, &grid));
        for (moved, original) in piece.cells().iter().zip(before.cells()) {
            assert_eq!(*moved, original.offset(-1, 2));
        }
    }

    #[test]
    fn test_can_move_rejects_walls_and_floor() {
        let grid = Grid::new(6, 4);
        let piece = Piece::at(PieceKind::O, pos(0, 0));

        assert!(!piece.can_move(-1, 0, &grid));
        assert!(piece.can_move(4, 0, &grid));
        assert!(!piece.can_move(5, 0, &grid));
        assert!(piece.can_move(0, 2, &grid));
        assert!(!piece.can_move(0, 3, &grid));
        assert!(!piece.can_move(0, -1, &grid));
    }

    #[test]
    fn test_can_move_rejects_occupied_cell() {
        let mut grid = Grid::new(6, 4);
        grid.fill(pos(1, 3), PieceColor::Red);
        let piece = Piece::at(PieceKind::O, pos(0, 0));

        assert!(piece.can_move(0, 1, &grid));
        assert!(!piece.can_move(0, 2, &grid));
        assert!(piece.can_move(2, 2, &grid));
    }

    #[test]
    fn test_failed_move_leaves_piece_unchanged() {
        let grid = Grid::new(6, 4);
        let mut piece = Piece::at(PieceKind::I, pos(2, 0));
        let before = piece;

        assert!(!piece.move_by(1, 0, &grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_can_move_implies_in_bounds_and_empty() {
        let mut grid = Grid::new(8, 10);
        for (x, y) in [(0, 9), (3, 9), (4, 8), (7, 5), (2, 6), (5, 3)] {
            grid.fill(pos(x, y), PieceColor::Blue);
        }

        for kind in PieceKind::ALL {
            for ox in -2..8 {
                for oy in -2..10 {
                    let piece = Piece::at(kind, pos(ox, oy));
                    for (dx, dy) in [(-1, 0), (1, 0), (0, 1), (0, 0), (2, 3)] {
                        if !piece.can_move(dx, dy, &grid) {
                            continue;
                        }
                        for cell in piece.translated(dx, dy).cells() {
                            assert!((0..8).contains(&cell.x), "{kind:?} {cell:?}");
                            assert!((0..10).contains(&cell.y), "{kind:?} {cell:?}");
                            assert!(grid.block(*cell).is_some_and(Block::is_empty));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotate_o_is_noop() {
        let grid = Grid::default();
        let mut piece = Piece::spawn(PieceKind::O, &grid);
        let before = cell_set(&piece);

        for _ in 0..4 {
            assert!(piece.rotate(&grid));
            assert_eq!(cell_set(&piece), before);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let grid = Grid::default();
        let mut piece = Piece::at(PieceKind::T, pos(4, 4));
        // Pointing up: pivot (5,5), left (4,5), up (5,4), right (6,5).
        assert!(piece.rotate(&grid));
        // Pointing right: left -> up, up -> right, right -> down.
        assert_eq!(
            piece.cells(),
            &[pos(5, 5), pos(5, 4), pos(6, 5), pos(5, 6)]
        );
    }

    #[test]
    fn test_four_rotations_restore_cells() {
        let grid = Grid::default();
        for kind in PieceKind::ALL {
            let mut piece = Piece::at(kind, pos(5, 8));
            let original = cell_set(&piece);
            for _ in 0..4 {
                assert!(piece.rotate(&grid), "{kind:?}");
            }
            assert_eq!(cell_set(&piece), original, "{kind:?}");
            assert_eq!(piece.pivot(), pos(6, 9));
        }
    }

    #[test]
    fn test_rotation_is_all_or_nothing() {
        let mut grid = Grid::new(10, 10);
        let mut piece = Piece::at(PieceKind::I, pos(3, 3));
        // Vertical I would occupy (4,3)..(4,6); block only the last cell.
        grid.fill(pos(4, 6), PieceColor::Green);
        let before = piece;

        assert!(!piece.rotate(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotation_against_wall_has_no_kick() {
        let grid = Grid::new(10, 10);
        // Vertical I hugging the left wall; turning it would reach column -1.
        let vertical = Piece::at(PieceKind::I, pos(0, 3)).rotated_clockwise();
        let mut piece = vertical.translated(-vertical.pivot().x, 0);
        assert_eq!(piece.pivot().x, 0);
        let before = piece;

        assert!(!piece.rotate(&grid));
        assert_eq!(piece, before);
        assert!(piece.move_by(2, 0, &grid));
        assert!(piece.rotate(&grid));
    }

    #[test]
    fn test_piece_kind_distribution_covers_all_kinds() {
        use rand::SeedableRng as _;

        let mut rng = rand_pcg::Pcg32::seed_from_u64(7);
        let seen: HashSet<PieceKind> = (0..500).map(|_| rng.random()).collect();
        assert_eq!(seen.len(), PieceKind::LEN);
    }

    #[test]
    fn test_piece_color_serialization() {
        let json = serde_json::to_string(&PieceColor::LightBlue).unwrap();
        assert_eq!(json, "\"lightblue\"");
        let color: PieceColor = serde_json::from_str("\"purple\"").unwrap();
        assert_eq!(color, PieceColor::Purple);
    }
}

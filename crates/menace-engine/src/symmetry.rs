use std::fmt;

use crate::{Board, Square};

/// The 8 symmetries of the 3×3 board as cell permutations.
///
/// Each permutation `p` transforms a board `b` into the image `t` with
/// `t[i] = b[p[i]]`: entry `i` names the source cell whose contents end up
/// at position `i`.
const PERMS: [[u8; 9]; Transform::LEN] = [
    // identity
    [0, 1, 2, 3, 4, 5, 6, 7, 8],
    // rotate 90° clockwise
    [6, 3, 0, 7, 4, 1, 8, 5, 2],
    // rotate 180°
    [8, 7, 6, 5, 4, 3, 2, 1, 0],
    // rotate 270° clockwise
    [2, 5, 8, 1, 4, 7, 0, 3, 6],
    // reflect across the vertical axis
    [2, 1, 0, 5, 4, 3, 8, 7, 6],
    // reflect across the horizontal axis
    [6, 7, 8, 3, 4, 5, 0, 1, 2],
    // reflect across the main diagonal
    [0, 3, 6, 1, 4, 7, 2, 5, 8],
    // reflect across the anti-diagonal
    [8, 5, 2, 7, 4, 1, 6, 3, 0],
];

/// Index of each permutation's inverse. Only the two 90° rotations are not
/// their own inverse.
const INVERSES: [u8; Transform::LEN] = [0, 3, 2, 1, 4, 5, 6, 7];

/// One of the 8 dihedral-group symmetries of the board.
///
/// A `Transform` maps original-board coordinates to the coordinates of its
/// symmetry image and back. [`canonicalize`] returns the transform that
/// carried a board to its canonical image, so a move chosen in canonical
/// coordinates can be mapped back with [`Transform::original_square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform(u8);

impl Transform {
    /// Number of board symmetries (identity, 3 rotations, 4 reflections).
    pub const LEN: usize = 8;

    /// The identity transform.
    pub const IDENTITY: Self = Transform(0);

    /// All 8 transforms, identity first.
    pub const ALL: [Transform; Transform::LEN] = {
        let mut all = [Transform(0); Transform::LEN];
        let mut i = 0;
        while i < Transform::LEN {
            all[i] = Transform(i as u8);
            i += 1;
        }
        all
    };

    const fn perm(self) -> &'static [u8; 9] {
        &PERMS[self.0 as usize]
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        Transform(INVERSES[self.0 as usize])
    }

    /// Applies this transform to a board, producing its symmetry image.
    #[must_use]
    pub fn apply_board(self, board: &Board) -> Board {
        let cells = self.perm().map(|src| board.cells()[src as usize]);
        Board::from_cells(cells)
    }

    /// Maps a square from original-board coordinates to the coordinates of
    /// the transformed image.
    #[must_use]
    pub fn image_square(self, square: Square) -> Square {
        // image[i] = original[perm[i]], so original cell `square` lands at
        // the image position whose perm entry names it.
        let perm = self.perm();
        let index = perm
            .iter()
            .position(|&src| usize::from(src) == square.index())
            .expect("permutation covers all 9 squares");
        Square::new(u8::try_from(index).expect("index fits in u8")).expect("index is 0-8")
    }

    /// Maps a square chosen in the transformed image back to
    /// original-board coordinates.
    #[must_use]
    pub fn original_square(self, square: Square) -> Square {
        Square::new(self.perm()[square.index()]).expect("permutation entries are 0-8")
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "identity",
            1 => "rot90",
            2 => "rot180",
            3 => "rot270",
            4 => "flip-vertical",
            5 => "flip-horizontal",
            6 => "flip-main-diag",
            7 => "flip-anti-diag",
            _ => unreachable!(),
        };
        f.write_str(name)
    }
}

/// Reduces a board to its canonical symmetry image.
///
/// All 8 symmetry images are generated and the minimal one under the
/// board's total order (cell-wise, `Empty < X < O`) is returned together
/// with the transform that produced it. Boards that are rotations or
/// reflections of each other share the same canonical image, so learned
/// state keyed by it is shared across all 8 orientations.
#[must_use]
pub fn canonicalize(board: &Board) -> (Board, Transform) {
    let mut best = *board;
    let mut best_transform = Transform::IDENTITY;
    for transform in Transform::ALL {
        let image = transform.apply_board(board);
        if image < best {
            best = image;
            best_transform = transform;
        }
    }
    (best, best_transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    fn board(s: &str) -> Board {
        Board::decode(s).unwrap()
    }

    fn sample_boards() -> Vec<Board> {
        vec![
            Board::EMPTY,
            board("X........"),
            board("....X...."),
            board("X...O...."),
            board("XO.X....."),
            board("XOX.O..X."),
            board("XOXOXOX.."),
            board("XXX.OO.O."),
        ]
    }

    #[test]
    fn identity_transform_is_a_noop() {
        for b in sample_boards() {
            assert_eq!(Transform::IDENTITY.apply_board(&b), b);
        }
        for sq in Square::ALL {
            assert_eq!(Transform::IDENTITY.image_square(sq), sq);
            assert_eq!(Transform::IDENTITY.original_square(sq), sq);
        }
    }

    #[test]
    fn square_mapping_round_trips_for_all_transforms() {
        for transform in Transform::ALL {
            for sq in Square::ALL {
                assert_eq!(
                    transform.original_square(transform.image_square(sq)),
                    sq,
                    "{transform} image->original"
                );
                assert_eq!(
                    transform.image_square(transform.original_square(sq)),
                    sq,
                    "{transform} original->image"
                );
            }
        }
    }

    #[test]
    fn inverse_transform_undoes_board_image() {
        for transform in Transform::ALL {
            for b in sample_boards() {
                let image = transform.apply_board(&b);
                assert_eq!(
                    transform.inverse().apply_board(&image),
                    b,
                    "{transform} inverse"
                );
            }
        }
    }

    #[test]
    fn square_mapping_tracks_cell_contents() {
        for transform in Transform::ALL {
            for b in sample_boards() {
                let image = transform.apply_board(&b);
                for sq in Square::ALL {
                    assert_eq!(
                        image.get(transform.image_square(sq)),
                        b.get(sq),
                        "{transform} square {sq}"
                    );
                }
            }
        }
    }

    #[test]
    fn canonical_image_is_shared_by_all_orientations() {
        for b in sample_boards() {
            let (canonical, _) = canonicalize(&b);
            for transform in Transform::ALL {
                let rotated = transform.apply_board(&b);
                let (canonical_of_rotated, _) = canonicalize(&rotated);
                assert_eq!(canonical_of_rotated, canonical, "{transform}");
            }
        }
    }

    #[test]
    fn canonicalize_returns_the_producing_transform() {
        for b in sample_boards() {
            for t in Transform::ALL {
                let rotated = t.apply_board(&b);
                let (canonical, used) = canonicalize(&rotated);
                assert_eq!(used.apply_board(&rotated), canonical);
            }
        }
    }

    #[test]
    fn canonical_move_maps_back_to_a_legal_square() {
        for b in sample_boards() {
            let (canonical, transform) = canonicalize(&b);
            for canonical_sq in canonical.legal_moves() {
                let original_sq = transform.original_square(canonical_sq);
                assert_eq!(
                    b.get(original_sq),
                    Cell::Empty,
                    "canonical move {canonical_sq} must land on an empty square"
                );
            }
        }
    }

    #[test]
    fn corner_openings_share_one_matchbox() {
        let corners = ["X........", "..X......", "......X..", "........X"];
        let canonicals: Vec<Board> = corners
            .iter()
            .map(|s| canonicalize(&board(s)).0)
            .collect();
        assert!(canonicals.windows(2).all(|w| w[0] == w[1]));
    }
}

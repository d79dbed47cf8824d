//! Primitives shared by the whole rules engine: side identity, piece kinds,
//! board coordinates and the edge-of-board lookup tables.

use std::fmt::{self, Write};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Index of a square on the board, in `0..64`. 0 is the top-left corner
/// (Dark's home corner, a8 in algebraic notation), increasing left-to-right
/// and then top-to-bottom, so 63 is h1.
pub type Coordinate = u8;

/// Checks that a candidate destination produced by offset arithmetic still
/// addresses a square on the board. Offsets are signed, so the candidate is
/// taken as a signed value.
#[must_use]
pub const fn is_valid_coordinate(coordinate: i16) -> bool {
    coordinate >= 0 && coordinate < BOARD_SIZE as i16
}

/// Renders a coordinate in algebraic notation ("e4").
#[must_use]
pub fn algebraic(coordinate: Coordinate) -> String {
    let file = (b'a' + coordinate % BOARD_WIDTH) as char;
    let rank = BOARD_WIDTH - coordinate / BOARD_WIDTH;
    format!("{file}{rank}")
}

const fn file_table(file: u8) -> [bool; BOARD_SIZE as usize] {
    let mut table = [false; BOARD_SIZE as usize];
    let mut coordinate = file;
    while coordinate < BOARD_SIZE {
        table[coordinate as usize] = true;
        coordinate += BOARD_WIDTH;
    }
    table
}

const fn rank_table(first_coordinate: u8) -> [bool; BOARD_SIZE as usize] {
    let mut table = [false; BOARD_SIZE as usize];
    let mut coordinate = first_coordinate;
    while coordinate < first_coordinate + BOARD_WIDTH {
        table[coordinate as usize] = true;
        coordinate += 1;
    }
    table
}

const FILE_A: [bool; 64] = file_table(0);
const FILE_B: [bool; 64] = file_table(1);
const FILE_C: [bool; 64] = file_table(2);
const FILE_D: [bool; 64] = file_table(3);
const FILE_E: [bool; 64] = file_table(4);
const FILE_F: [bool; 64] = file_table(5);
const FILE_G: [bool; 64] = file_table(6);
const FILE_H: [bool; 64] = file_table(7);

// Rank 8 is the top row of the coordinate space, rank 1 the bottom one.
const RANK_8: [bool; 64] = rank_table(0);
const RANK_7: [bool; 64] = rank_table(8);
const RANK_6: [bool; 64] = rank_table(16);
const RANK_5: [bool; 64] = rank_table(24);
const RANK_4: [bool; 64] = rank_table(32);
const RANK_3: [bool; 64] = rank_table(40);
const RANK_2: [bool; 64] = rank_table(48);
const RANK_1: [bool; 64] = rank_table(56);

/// File membership checks. Move generators consult these to suppress
/// candidate offsets that would wrap around the board edge (e.g. a knight
/// jumping "left" from the a-file must not reappear on the h-file of a
/// neighboring rank).
#[must_use]
pub const fn is_file_a(coordinate: Coordinate) -> bool {
    FILE_A[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_b(coordinate: Coordinate) -> bool {
    FILE_B[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_c(coordinate: Coordinate) -> bool {
    FILE_C[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_d(coordinate: Coordinate) -> bool {
    FILE_D[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_e(coordinate: Coordinate) -> bool {
    FILE_E[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_f(coordinate: Coordinate) -> bool {
    FILE_F[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_g(coordinate: Coordinate) -> bool {
    FILE_G[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_file_h(coordinate: Coordinate) -> bool {
    FILE_H[coordinate as usize]
}

/// Rank membership checks, numbered as in algebraic notation: rank 1 is
/// Light's home rank at the bottom of the coordinate space, rank 8 Dark's.
#[must_use]
pub const fn is_rank_1(coordinate: Coordinate) -> bool {
    RANK_1[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_2(coordinate: Coordinate) -> bool {
    RANK_2[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_3(coordinate: Coordinate) -> bool {
    RANK_3[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_4(coordinate: Coordinate) -> bool {
    RANK_4[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_5(coordinate: Coordinate) -> bool {
    RANK_5[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_6(coordinate: Coordinate) -> bool {
    RANK_6[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_7(coordinate: Coordinate) -> bool {
    RANK_7[coordinate as usize]
}

#[allow(missing_docs)]
#[must_use]
pub const fn is_rank_8(coordinate: Coordinate) -> bool {
    RANK_8[coordinate as usize]
}

/// The two sides of a chess game. Light owns the uppercase pieces at the
/// bottom of the coordinate space and moves first in the standard setup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alliance {
    #[allow(missing_docs)]
    Light,
    #[allow(missing_docs)]
    Dark,
}

impl Alliance {
    /// Direction of pawn advancement as a rank step: Dark pawns move towards
    /// higher coordinates, Light pawns towards lower ones.
    #[must_use]
    pub const fn direction(self) -> i16 {
        match self {
            Self::Light => -1,
            Self::Dark => 1,
        }
    }

    /// "Flips" the side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// True iff a pawn of this side standing on `coordinate` has never moved:
    /// rank 2 for Light, rank 7 for Dark. Gates the double-step advance.
    #[must_use]
    pub const fn is_pawn_starting_rank(self, coordinate: Coordinate) -> bool {
        match self {
            Self::Light => is_rank_2(coordinate),
            Self::Dark => is_rank_7(coordinate),
        }
    }

    /// True iff `coordinate` lies on the rank where this side's pawns would
    /// promote (the opponent's home rank).
    #[must_use]
    pub const fn is_promotion_rank(self, coordinate: Coordinate) -> bool {
        match self {
            Self::Light => is_rank_8(coordinate),
            Self::Dark => is_rank_1(coordinate),
        }
    }

    /// Leftmost coordinate of this side's back rank, the rank its king and
    /// rooks start on. Castling geometry is laid out relative to it.
    #[must_use]
    pub const fn back_rank_start(self) -> Coordinate {
        match self {
            Self::Light => 56,
            Self::Dark => 0,
        }
    }

    /// Picks the value belonging to this side.
    pub fn choose<T>(self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// One-letter code used by the diagnostic board rendering; Dark pieces
    /// are rendered with the lowercase form.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self, Self::King)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_rook(self) -> bool {
        matches!(self, Self::Rook)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn coordinate_bounds() {
        assert!(is_valid_coordinate(0));
        assert!(is_valid_coordinate(63));
        assert!(!is_valid_coordinate(64));
        assert!(!is_valid_coordinate(-1));
        assert!(!is_valid_coordinate(-9));
    }

    #[test]
    fn file_membership() {
        // The a-file runs down the left edge of the coordinate space.
        for coordinate in [0, 8, 16, 24, 32, 40, 48, 56] {
            assert!(is_file_a(coordinate));
            assert!(!is_file_b(coordinate));
            assert!(!is_file_h(coordinate));
        }
        assert!(is_file_h(7));
        assert!(is_file_h(63));
        assert_eq!((0..64).filter(|&c| is_file_d(c)).count(), 8);
    }

    #[test]
    fn rank_membership() {
        // Rank 8 is the top row, rank 1 the bottom one.
        assert!(is_rank_8(0));
        assert!(is_rank_8(7));
        assert!(is_rank_1(56));
        assert!(is_rank_1(63));
        assert!(is_rank_7(8));
        assert!(is_rank_2(48));
        assert_eq!((0..64).filter(|&c| is_rank_5(c)).count(), 8);
    }

    #[test]
    fn every_square_has_one_file_and_rank() {
        for coordinate in 0..BOARD_SIZE {
            let files = [
                is_file_a(coordinate),
                is_file_b(coordinate),
                is_file_c(coordinate),
                is_file_d(coordinate),
                is_file_e(coordinate),
                is_file_f(coordinate),
                is_file_g(coordinate),
                is_file_h(coordinate),
            ];
            let ranks = [
                is_rank_1(coordinate),
                is_rank_2(coordinate),
                is_rank_3(coordinate),
                is_rank_4(coordinate),
                is_rank_5(coordinate),
                is_rank_6(coordinate),
                is_rank_7(coordinate),
                is_rank_8(coordinate),
            ];
            assert_eq!(files.iter().filter(|&&hit| hit).count(), 1);
            assert_eq!(ranks.iter().filter(|&&hit| hit).count(), 1);
        }
    }

    #[test]
    fn alliance_directions_oppose() {
        assert_eq!(Alliance::Light.direction(), -Alliance::Dark.direction());
        assert_eq!(Alliance::Light.opponent(), Alliance::Dark);
        assert_eq!(Alliance::Dark.opponent(), Alliance::Light);
    }

    #[test]
    fn pawn_starting_ranks() {
        assert!(Alliance::Light.is_pawn_starting_rank(52));
        assert!(!Alliance::Light.is_pawn_starting_rank(44));
        assert!(Alliance::Dark.is_pawn_starting_rank(12));
        assert!(!Alliance::Dark.is_pawn_starting_rank(20));
    }

    #[test]
    fn algebraic_rendering() {
        assert_eq!(algebraic(0), "a8");
        assert_eq!(algebraic(7), "h8");
        assert_eq!(algebraic(56), "a1");
        assert_eq!(algebraic(63), "h1");
        assert_eq!(algebraic(36), "e4");
    }
}

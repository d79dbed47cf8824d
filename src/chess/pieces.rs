//! Piece values and their pseudo-legal move generation.
//!
//! Every piece kind owns a fixed set of candidate offset vectors relative to
//! its coordinate. Generation walks those vectors against a [`Board`],
//! suppressing candidates that would wrap around a board edge or land on a
//! friendly piece. The output is [pseudo-legal]: king safety is the
//! [`crate::chess::player::Player`]'s concern, not the piece's.
//!
//! [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move

use crate::chess::board::Board;
use crate::chess::core::{
    is_file_a,
    is_file_b,
    is_file_g,
    is_file_h,
    is_valid_coordinate,
    Alliance,
    Coordinate,
    PieceKind,
};
use crate::chess::moves::Move;

const KNIGHT_JUMPS: [i16; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_STEPS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_DIRECTIONS: [i16; 4] = [-9, -7, 7, 9];
const ROOK_DIRECTIONS: [i16; 4] = [-8, -1, 1, 8];
const QUEEN_DIRECTIONS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// A piece on the board: its kind, its side, where it stands and whether it
/// has ever moved. Pieces are immutable values; "moving" one produces a new
/// piece at the destination through [`Piece::moved_to`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    position: Coordinate,
    first_move: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet. This is the constructor used
    /// when placing a starting configuration through the board builder.
    #[must_use]
    pub const fn new(kind: PieceKind, alliance: Alliance, position: Coordinate) -> Self {
        Self {
            kind,
            alliance,
            position,
            first_move: true,
        }
    }

    /// The post-move successor of this piece: relocated to `destination` with
    /// the first-move flag cleared. The original piece is left behind on the
    /// old board and simply not copied forward.
    #[must_use]
    pub const fn moved_to(self, destination: Coordinate) -> Self {
        Self {
            kind: self.kind,
            alliance: self.alliance,
            position: destination,
            first_move: false,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Whether the piece has never moved. Gates pawn double-steps and
    /// castling eligibility.
    #[must_use]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Calculates this piece's pseudo-legal moves against `board`.
    ///
    /// The result never contains a move off the board or onto a square held
    /// by a friendly piece. Sliding pieces stop scanning a direction at the
    /// first occupied square: a capture is generated there iff the blocker
    /// belongs to the opponent.
    #[must_use]
    pub fn pseudo_legal_moves(&self, board: &Board) -> Vec<Move> {
        match self.kind {
            PieceKind::Knight => self.stepping_moves(board, &KNIGHT_JUMPS, knight_wraps),
            PieceKind::King => self.stepping_moves(board, &KING_STEPS, king_wraps),
            PieceKind::Bishop => self.sliding_moves(board, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.sliding_moves(board, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.sliding_moves(board, &QUEEN_DIRECTIONS),
            PieceKind::Pawn => self.pawn_moves(board),
        }
    }

    // Knights and kings probe each candidate offset exactly once.
    fn stepping_moves(
        &self,
        board: &Board,
        offsets: &[i16],
        wraps: fn(Coordinate, i16) -> bool,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            let candidate = i16::from(self.position) + offset;
            if !is_valid_coordinate(candidate) || wraps(self.position, offset) {
                continue;
            }
            let destination = candidate as Coordinate;
            match board.square(destination).piece() {
                None => moves.push(Move::Major {
                    piece: *self,
                    to: destination,
                }),
                Some(occupant) => {
                    if occupant.alliance != self.alliance {
                        moves.push(Move::Attack {
                            piece: *self,
                            to: destination,
                            captured: occupant,
                        });
                    }
                },
            }
        }
        moves
    }

    // Bishops, rooks and queens walk each direction outward one step at a
    // time until the board edge or the first occupied square.
    fn sliding_moves(&self, board: &Board, directions: &[i16]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &direction in directions {
            let mut current = self.position;
            loop {
                if sliding_wraps(current, direction) {
                    break;
                }
                let candidate = i16::from(current) + direction;
                if !is_valid_coordinate(candidate) {
                    break;
                }
                current = candidate as Coordinate;
                match board.square(current).piece() {
                    None => moves.push(Move::Major {
                        piece: *self,
                        to: current,
                    }),
                    Some(occupant) => {
                        if occupant.alliance != self.alliance {
                            moves.push(Move::Attack {
                                piece: *self,
                                to: current,
                                captured: occupant,
                            });
                        }
                        break;
                    },
                }
            }
        }
        moves
    }

    // Pawns special-case all four of their offsets: the single advance, the
    // double-step from the starting rank and the two diagonal captures.
    fn pawn_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        let direction = self.alliance.direction();

        let advance = i16::from(self.position) + direction * 8;
        if is_valid_coordinate(advance) && board.square(advance as Coordinate).is_empty() {
            moves.push(Move::PawnPush {
                piece: *self,
                to: advance as Coordinate,
            });

            // The double-step is offered only while the single advance is
            // open too, so `advance` is known to be on the board here.
            if self.first_move && self.alliance.is_pawn_starting_rank(self.position) {
                let jump = i16::from(self.position) + direction * 16;
                if is_valid_coordinate(jump) && board.square(jump as Coordinate).is_empty() {
                    moves.push(Move::PawnJump {
                        piece: *self,
                        to: jump as Coordinate,
                    });
                }
            }
        }

        for offset in [7, 9] {
            if pawn_capture_wraps(self.position, self.alliance, offset) {
                continue;
            }
            let candidate = i16::from(self.position) + direction * offset;
            if !is_valid_coordinate(candidate) {
                continue;
            }
            let destination = candidate as Coordinate;
            match board.square(destination).piece() {
                Some(occupant) => {
                    if occupant.alliance != self.alliance {
                        moves.push(Move::PawnAttack {
                            piece: *self,
                            to: destination,
                            captured: occupant,
                        });
                    }
                },
                None => {
                    // The diagonal is empty: the only capture possible there
                    // is en passant, onto the square the marked pawn skipped
                    // over with its double-step last ply.
                    if let Some(en_passant_pawn) = board.en_passant_pawn() {
                        if en_passant_pawn.alliance != self.alliance
                            && i16::from(en_passant_pawn.position)
                                == i16::from(destination) - direction * 8
                        {
                            moves.push(Move::EnPassant {
                                piece: *self,
                                to: destination,
                                captured: en_passant_pawn,
                            });
                        }
                    }
                },
            }
        }
        moves
    }
}

fn knight_wraps(position: Coordinate, offset: i16) -> bool {
    (is_file_a(position) && matches!(offset, -17 | -10 | 6 | 15))
        || (is_file_b(position) && matches!(offset, -10 | 6))
        || (is_file_g(position) && matches!(offset, 10 | -6))
        || (is_file_h(position) && matches!(offset, 17 | 10 | -6 | -15))
}

fn king_wraps(position: Coordinate, offset: i16) -> bool {
    (is_file_a(position) && matches!(offset, -9 | -1 | 7))
        || (is_file_h(position) && matches!(offset, -7 | 1 | 9))
}

// Shared by all three sliding kinds: each only ever receives its own
// direction set, so the extra arms are inert for rooks and bishops.
fn sliding_wraps(position: Coordinate, direction: i16) -> bool {
    (is_file_a(position) && matches!(direction, -9 | -1 | 7))
        || (is_file_h(position) && matches!(direction, -7 | 1 | 9))
}

// The capture offsets are multiplied by the side's direction, so which file
// is "behind" the diagonal depends on the alliance.
fn pawn_capture_wraps(position: Coordinate, alliance: Alliance, offset: i16) -> bool {
    match offset {
        7 => {
            (is_file_h(position) && alliance.is_light())
                || (is_file_a(position) && alliance.is_dark())
        },
        9 => {
            (is_file_a(position) && alliance.is_light())
                || (is_file_h(position) && alliance.is_dark())
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::board::Builder;

    fn kings_and(pieces: &[Piece], move_maker: Alliance) -> Board {
        let mut builder = Builder::new()
            .place(Piece::new(PieceKind::King, Alliance::Light, 60))
            .place(Piece::new(PieceKind::King, Alliance::Dark, 4))
            .move_maker(move_maker);
        for &piece in pieces {
            builder = builder.place(piece);
        }
        builder.build().expect("both kings are on the board")
    }

    fn destinations(piece: &Piece, board: &Board) -> Vec<Coordinate> {
        let mut targets: Vec<Coordinate> = piece
            .pseudo_legal_moves(board)
            .iter()
            .filter_map(Move::destination)
            .collect();
        targets.sort_unstable();
        targets
    }

    #[test]
    fn knight_in_the_corner_has_two_moves() {
        let knight = Piece::new(PieceKind::Knight, Alliance::Dark, 0);
        let board = kings_and(&[knight], Alliance::Dark);
        assert_eq!(destinations(&knight, &board), vec![10, 17]);
    }

    #[test]
    fn knight_in_the_center_has_eight_moves() {
        // d4 is far enough from every edge.
        let knight = Piece::new(PieceKind::Knight, Alliance::Light, 35);
        let board = kings_and(&[knight], Alliance::Light);
        assert_eq!(destinations(&knight, &board).len(), 8);
    }

    #[test]
    fn bishop_stops_at_the_first_blocker() {
        let bishop = Piece::new(PieceKind::Bishop, Alliance::Light, 56); // a1
        let friendly = Piece::new(PieceKind::Pawn, Alliance::Light, 35); // d4
        let board = kings_and(&[bishop, friendly], Alliance::Light);
        // a1-b2-c3 are open, d4 is friendly: no capture, scan stops.
        assert_eq!(destinations(&bishop, &board), vec![42, 49]);
    }

    #[test]
    fn bishop_captures_the_first_enemy_blocker_and_stops() {
        let bishop = Piece::new(PieceKind::Bishop, Alliance::Light, 56);
        let enemy = Piece::new(PieceKind::Knight, Alliance::Dark, 35);
        let board = kings_and(&[bishop, enemy], Alliance::Light);
        let moves = bishop.pseudo_legal_moves(&board);
        assert_eq!(destinations(&bishop, &board), vec![35, 42, 49]);
        let capture = moves
            .iter()
            .find(|m| m.destination() == Some(35))
            .expect("d4 capture is generated");
        assert!(capture.is_attack());
        assert_eq!(capture.attacked_piece(), Some(enemy));
    }

    #[test]
    fn rook_on_an_empty_board_sees_fourteen_squares() {
        let rook = Piece::new(PieceKind::Rook, Alliance::Dark, 27); // d5
        let board = kings_and(&[rook], Alliance::Dark);
        assert_eq!(destinations(&rook, &board).len(), 14);
    }

    #[test]
    fn queen_is_the_union_of_rook_and_bishop() {
        let queen = Piece::new(PieceKind::Queen, Alliance::Light, 35);
        let rook = Piece::new(PieceKind::Rook, Alliance::Light, 35);
        let bishop = Piece::new(PieceKind::Bishop, Alliance::Light, 35);
        let board = kings_and(&[queen], Alliance::Light);
        let mut expected = destinations(&rook, &board);
        expected.extend(destinations(&bishop, &board));
        expected.sort_unstable();
        assert_eq!(destinations(&queen, &board), expected);
    }

    #[test]
    fn king_on_the_east_edge_does_not_wrap() {
        let king = Piece::new(PieceKind::King, Alliance::Light, 39); // h4
        let board = Builder::new()
            .place(king)
            .place(Piece::new(PieceKind::King, Alliance::Dark, 4))
            .move_maker(Alliance::Light)
            .build()
            .expect("both kings are on the board");
        assert_eq!(destinations(&king, &board), vec![30, 31, 38, 46, 47]);
    }

    #[test]
    fn pawn_advances_once_or_twice_from_its_starting_rank() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Light, 52); // e2
        let board = kings_and(&[pawn], Alliance::Light);
        assert_eq!(destinations(&pawn, &board), vec![36, 44]);
    }

    #[test]
    fn pawn_double_step_requires_both_squares_empty() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Light, 52);
        let in_the_way = Piece::new(PieceKind::Knight, Alliance::Light, 44); // e3
        let board = kings_and(&[pawn, in_the_way], Alliance::Light);
        // Blocked on e3: neither the advance nor the jump is offered.
        assert_eq!(destinations(&pawn, &board), vec![]);

        let far_block = Piece::new(PieceKind::Knight, Alliance::Dark, 36); // e4
        let board = kings_and(&[pawn, far_block], Alliance::Light);
        assert_eq!(destinations(&pawn, &board), vec![44]);
    }

    #[test]
    fn pawn_double_step_is_gone_after_the_first_move() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Light, 52).moved_to(52);
        assert!(!pawn.is_first_move());
        let board = kings_and(&[pawn], Alliance::Light);
        assert_eq!(destinations(&pawn, &board), vec![44]);
    }

    #[test]
    fn pawn_captures_diagonally_only_with_an_enemy_present() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Light, 52); // e2
        let enemy = Piece::new(PieceKind::Knight, Alliance::Dark, 43); // d3
        let friendly = Piece::new(PieceKind::Knight, Alliance::Light, 45); // f3
        let board = kings_and(&[pawn, enemy, friendly], Alliance::Light);
        let moves = pawn.pseudo_legal_moves(&board);
        assert_eq!(destinations(&pawn, &board), vec![36, 43, 44]);
        assert!(moves
            .iter()
            .any(|m| m.destination() == Some(43) && m.is_attack()));
    }

    #[test]
    fn pawn_capture_does_not_wrap_around_the_edge() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Light, 48); // a2
        let bait = Piece::new(PieceKind::Knight, Alliance::Dark, 39); // h4!
        let board = kings_and(&[pawn, bait], Alliance::Light);
        // Only the advances remain; the "left" diagonal is off the board and
        // the b3 diagonal holds no enemy.
        assert_eq!(destinations(&pawn, &board), vec![32, 40]);
    }

    #[test]
    fn moved_successor_clears_the_first_move_flag() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Dark, 12);
        let moved = pawn.moved_to(28);
        assert_eq!(moved.position(), 28);
        assert_eq!(moved.kind(), PieceKind::Pawn);
        assert_eq!(moved.alliance(), Alliance::Dark);
        assert!(!moved.is_first_move());
        // The original is untouched.
        assert!(pawn.is_first_move());
    }
}

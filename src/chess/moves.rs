//! State transitions between boards.
//!
//! A [`Move`] is a closed set of variants rather than a hierarchy: one
//! dispatch in [`Move::execute`] covers every way a board can change.
//! Executing a move never mutates the originating [`Board`]; it rebuilds a
//! fresh one through the [`Builder`], copying every surviving piece and
//! placing the mover's post-move successor at its destination.

use std::fmt;

use anyhow::bail;

use crate::chess::board::{Board, Builder};
use crate::chess::core::{algebraic, Coordinate};
use crate::chess::pieces::Piece;

/// A pseudo-legal state transition, produced by move generation and consumed
/// by [`crate::chess::player::Player::make_move`].
///
/// The original design let every move close over the board it was generated
/// against; here the board is an explicit argument to [`Move::execute`], so
/// moves stay small `Copy` values that never outlive their generation cycle.
#[derive(Copy, Clone, Debug)]
pub enum Move {
    /// A quiet relocation of any piece.
    Major {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
    },
    /// A capture by any non-pawn piece.
    Attack {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
        #[allow(missing_docs)]
        captured: Piece,
    },
    /// A pawn advancing one square.
    PawnPush {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
    },
    /// A pawn capturing diagonally.
    PawnAttack {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
        #[allow(missing_docs)]
        captured: Piece,
    },
    /// A pawn capturing [en passant]: the victim sits beside the capturer,
    /// not on the destination square.
    ///
    /// [en passant]: https://en.wikipedia.org/wiki/En_passant
    EnPassant {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
        #[allow(missing_docs)]
        captured: Piece,
    },
    /// A pawn double-step from its starting rank. Executing it marks the
    /// moved pawn as capturable en passant for exactly one ply.
    PawnJump {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
    },
    /// Short castle (o-o). The rook jumps to the other side of the king
    /// rather than travelling through its own move generator.
    CastleKingSide {
        #[allow(missing_docs)]
        king: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
        #[allow(missing_docs)]
        rook: Piece,
        #[allow(missing_docs)]
        rook_from: Coordinate,
        #[allow(missing_docs)]
        rook_to: Coordinate,
    },
    /// Long castle (o-o-o).
    CastleQueenSide {
        #[allow(missing_docs)]
        king: Piece,
        #[allow(missing_docs)]
        to: Coordinate,
        #[allow(missing_docs)]
        rook: Piece,
        #[allow(missing_docs)]
        rook_from: Coordinate,
        #[allow(missing_docs)]
        rook_to: Coordinate,
    },
    /// The "no such move" sentinel returned by [`Board::find_move`] when no
    /// legal move matches. Inert: it refuses to execute.
    Null,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the move captures an opposing piece.
    #[must_use]
    pub const fn is_attack(&self) -> bool {
        matches!(
            self,
            Self::Attack { .. } | Self::PawnAttack { .. } | Self::EnPassant { .. }
        )
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Self::CastleKingSide { .. } | Self::CastleQueenSide { .. })
    }

    /// The piece being relocated, as it stood before the move. For castles
    /// this is the king.
    #[must_use]
    pub const fn moved_piece(&self) -> Option<Piece> {
        match *self {
            Self::Major { piece, .. }
            | Self::Attack { piece, .. }
            | Self::PawnPush { piece, .. }
            | Self::PawnAttack { piece, .. }
            | Self::EnPassant { piece, .. }
            | Self::PawnJump { piece, .. } => Some(piece),
            Self::CastleKingSide { king, .. } | Self::CastleQueenSide { king, .. } => Some(king),
            Self::Null => None,
        }
    }

    /// Coordinate the moved piece departs from.
    #[must_use]
    pub fn source(&self) -> Option<Coordinate> {
        self.moved_piece().map(|piece| piece.position())
    }

    /// Coordinate the moved piece lands on.
    #[must_use]
    pub const fn destination(&self) -> Option<Coordinate> {
        match *self {
            Self::Major { to, .. }
            | Self::Attack { to, .. }
            | Self::PawnPush { to, .. }
            | Self::PawnAttack { to, .. }
            | Self::EnPassant { to, .. }
            | Self::PawnJump { to, .. }
            | Self::CastleKingSide { to, .. }
            | Self::CastleQueenSide { to, .. } => Some(to),
            Self::Null => None,
        }
    }

    /// The captured piece, for the attack variants.
    #[must_use]
    pub const fn attacked_piece(&self) -> Option<Piece> {
        match *self {
            Self::Attack { captured, .. }
            | Self::PawnAttack { captured, .. }
            | Self::EnPassant { captured, .. } => Some(captured),
            _ => None,
        }
    }

    /// Builds the board that results from this move: every surviving piece
    /// is carried over, the mover's successor is placed at the destination
    /// and the side to move flips.
    ///
    /// # Errors
    ///
    /// The null move always refuses. Other variants only fail if executing
    /// them produces a malformed board (e.g. a hand-built position where the
    /// move captures a king), which surfaces the builder's error.
    pub fn execute(&self, board: &Board) -> anyhow::Result<Board> {
        match *self {
            Self::Null => bail!("the null move cannot be executed"),
            Self::Major { piece, to }
            | Self::Attack { piece, to, .. }
            | Self::PawnPush { piece, to }
            | Self::PawnAttack { piece, to, .. } => {
                // A capture victim standing on `to` is simply overwritten
                // when the successor is placed.
                carry_over(board, piece, None)
                    .place(piece.moved_to(to))
                    .move_maker(piece.alliance().opponent())
                    .build()
            },
            Self::EnPassant { piece, to, captured } => {
                // The victim is not on the destination square, so it has to
                // be skipped explicitly.
                carry_over(board, piece, Some(captured))
                    .place(piece.moved_to(to))
                    .move_maker(piece.alliance().opponent())
                    .build()
            },
            Self::PawnJump { piece, to } => {
                let moved_pawn = piece.moved_to(to);
                carry_over(board, piece, None)
                    .place(moved_pawn)
                    .en_passant_pawn(moved_pawn)
                    .move_maker(piece.alliance().opponent())
                    .build()
            },
            Self::CastleKingSide {
                king,
                to,
                rook,
                rook_to,
                ..
            }
            | Self::CastleQueenSide {
                king,
                to,
                rook,
                rook_to,
                ..
            } => {
                let mut builder = Builder::new();
                for &active in board.pieces(king.alliance()) {
                    if active != king && active != rook {
                        builder = builder.place(active);
                    }
                }
                for &active in board.pieces(king.alliance().opponent()) {
                    builder = builder.place(active);
                }
                builder
                    .place(king.moved_to(to))
                    .place(rook.moved_to(rook_to))
                    .move_maker(king.alliance().opponent())
                    .build()
            },
        }
    }
}

// Copies every active piece from both sides into a fresh builder, leaving
// out the mover and (for en passant) the capture victim.
fn carry_over(board: &Board, mover: Piece, skipped: Option<Piece>) -> Builder {
    let mut builder = Builder::new();
    for &active in board.pieces(mover.alliance()) {
        if active != mover {
            builder = builder.place(active);
        }
    }
    for &active in board.pieces(mover.alliance().opponent()) {
        if Some(active) != skipped {
            builder = builder.place(active);
        }
    }
    builder
}

/// A move's identity is the moved piece and the destination; the attack
/// variants additionally require an equal capture victim. The concrete
/// variant does not take part in the comparison.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            _ => {
                self.moved_piece() == other.moved_piece()
                    && self.destination() == other.destination()
                    && self.attacked_piece() == other.attacked_piece()
            },
        }
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CastleKingSide { .. } => f.write_str("o-o"),
            Self::CastleQueenSide { .. } => f.write_str("o-o-o"),
            Self::Null => f.write_str("null"),
            _ => {
                // Source and destination are present on every non-null move.
                let from = self.source().unwrap_or_default();
                let to = self.destination().unwrap_or_default();
                write!(f, "{}{}", algebraic(from), algebraic(to))
            },
        }
    }
}

//! The immutable board snapshot and its single-use builder.
//!
//! A [`Board`] is never mutated after construction: every change of state
//! goes through [`crate::chess::moves::Move::execute`], which assembles a
//! fresh board via the [`Builder`]. Besides the 64 squares the board caches
//! the derived per-side piece lists and the two player views, and remembers
//! which side moves next.

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

use crate::chess::core::{Alliance, Coordinate, BOARD_SIZE, BOARD_WIDTH};
use crate::chess::moves::Move;
use crate::chess::pieces::Piece;
use crate::chess::player::{Player, PlayerState};

/// One position of the board: empty, or holding a single piece. Exactly one
/// square exists per coordinate on every board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Square {
    #[allow(missing_docs)]
    Empty(Coordinate),
    #[allow(missing_docs)]
    Occupied(Coordinate, Piece),
}

impl Square {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        match *self {
            Self::Empty(coordinate) | Self::Occupied(coordinate, _) => coordinate,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(..))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// The piece standing on this square, if any.
    #[must_use]
    pub const fn piece(&self) -> Option<Piece> {
        match *self {
            Self::Empty(_) => None,
            Self::Occupied(_, piece) => Some(piece),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(_) => f.write_char('-'),
            Self::Occupied(_, piece) => {
                let code = piece.kind().code();
                f.write_char(if piece.alliance().is_dark() {
                    code.to_ascii_lowercase()
                } else {
                    code
                })
            },
        }
    }
}

/// An immutable snapshot of the game: the 64 squares, the derived active
/// piece lists, both player views and the side to move.
#[derive(Clone, Debug)]
pub struct Board {
    squares: [Square; BOARD_SIZE as usize],
    light_pieces: Vec<Piece>,
    dark_pieces: Vec<Piece>,
    light: PlayerState,
    dark: PlayerState,
    side_to_move: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl Board {
    /// The standard starting position, Light to move.
    #[must_use]
    pub fn standard() -> Self {
        use crate::chess::core::PieceKind::{Bishop, King, Knight, Pawn, Queen, Rook};
        const BACK_RANK: [crate::chess::core::PieceKind; 8] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut builder = Builder::new();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as Coordinate;
            builder = builder
                .place(Piece::new(kind, Alliance::Dark, file))
                .place(Piece::new(Pawn, Alliance::Dark, file + BOARD_WIDTH))
                .place(Piece::new(kind, Alliance::Light, 56 + file))
                .place(Piece::new(Pawn, Alliance::Light, 48 + file));
        }
        builder
            .move_maker(Alliance::Light)
            .build()
            .expect("the standard configuration has both kings")
    }

    fn from_builder(builder: Builder) -> anyhow::Result<Self> {
        let Some(side_to_move) = builder.move_maker else {
            bail!("board builder has no side to move designated");
        };
        let squares: [Square; BOARD_SIZE as usize] = std::array::from_fn(|index| {
            match builder.config[index] {
                Some(piece) => Square::Occupied(index as Coordinate, piece),
                None => Square::Empty(index as Coordinate),
            }
        });
        let light_pieces = active_pieces(&squares, Alliance::Light);
        let dark_pieces = active_pieces(&squares, Alliance::Dark);

        let mut board = Self {
            squares,
            light_pieces,
            dark_pieces,
            light: PlayerState::detached(Alliance::Light),
            dark: PlayerState::detached(Alliance::Dark),
            side_to_move,
            en_passant_pawn: builder.en_passant_pawn,
        };
        // The grid is complete at this point; the player views are attached
        // last so that they can be computed against the finished board.
        let light_moves = board.alliance_moves(Alliance::Light);
        let dark_moves = board.alliance_moves(Alliance::Dark);
        board.light = PlayerState::compute(&board, Alliance::Light, &light_moves, &dark_moves)?;
        board.dark = PlayerState::compute(&board, Alliance::Dark, &dark_moves, &light_moves)?;
        Ok(board)
    }

    // Pseudo-legal moves of every active piece of one side.
    fn alliance_moves(&self, alliance: Alliance) -> Vec<Move> {
        self.pieces(alliance)
            .iter()
            .flat_map(|piece| piece.pseudo_legal_moves(self))
            .collect()
    }

    /// The square at `coordinate`.
    ///
    /// # Panics
    ///
    /// Panics if `coordinate` is out of `0..64`; generators only produce
    /// validated coordinates.
    #[must_use]
    pub const fn square(&self, coordinate: Coordinate) -> &Square {
        &self.squares[coordinate as usize]
    }

    /// Active pieces of one side, in board order.
    #[must_use]
    pub fn pieces(&self, alliance: Alliance) -> &[Piece] {
        alliance.choose(&self.light_pieces, &self.dark_pieces)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Alliance {
        self.side_to_move
    }

    /// The pawn that double-stepped on the previous ply and may be captured
    /// en passant on this one.
    #[must_use]
    pub const fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn light_player(&self) -> Player<'_> {
        Player::new(self, &self.light)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn dark_player(&self) -> Player<'_> {
        Player::new(self, &self.dark)
    }

    /// The player whose legal moves are currently offered for selection.
    #[must_use]
    pub fn current_player(&self) -> Player<'_> {
        self.side_to_move
            .choose(self.light_player(), self.dark_player())
    }

    /// Resolves a (source, destination) pair against the current player's
    /// legal move set: the first match wins. With no match the inert
    /// [`Move::Null`] sentinel is returned, whose application fails rather
    /// than producing a board.
    #[must_use]
    pub fn find_move(&self, from: Coordinate, to: Coordinate) -> Move {
        self.current_player()
            .legal_moves()
            .iter()
            .find(|candidate| {
                candidate.source() == Some(from) && candidate.destination() == Some(to)
            })
            .copied()
            .unwrap_or(Move::Null)
    }
}

/// Renders the 8×8 diagnostic grid: uppercase for Light, lowercase for Dark,
/// `-` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares.iter().chunks(BOARD_WIDTH as usize) {
            writeln!(f, "{}", row.format(" "))?;
        }
        Ok(())
    }
}

fn active_pieces(squares: &[Square; BOARD_SIZE as usize], alliance: Alliance) -> Vec<Piece> {
    squares
        .iter()
        .filter_map(Square::piece)
        .filter(|piece| piece.alliance() == alliance)
        .collect()
}

/// Transient, single-use assembly of a [`Board`]: place pieces one by one,
/// designate the side to move, then consume the builder with
/// [`Builder::build`].
#[derive(Clone, Debug)]
pub struct Builder {
    config: [Option<Piece>; BOARD_SIZE as usize],
    move_maker: Option<Alliance>,
    en_passant_pawn: Option<Piece>,
}

impl Builder {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: [None; BOARD_SIZE as usize],
            move_maker: None,
            en_passant_pawn: None,
        }
    }

    /// Puts `piece` on the square its position names, replacing whatever was
    /// configured there before.
    #[must_use]
    pub fn place(mut self, piece: Piece) -> Self {
        self.config[piece.position() as usize] = Some(piece);
        self
    }

    /// Designates the side to move on the built board.
    #[must_use]
    pub const fn move_maker(mut self, alliance: Alliance) -> Self {
        self.move_maker = Some(alliance);
        self
    }

    /// Marks `pawn` as capturable en passant. Only
    /// [`crate::chess::moves::Move::PawnJump`] execution sets this; the
    /// marker lives for exactly one ply because every other execution starts
    /// from a fresh builder.
    #[must_use]
    pub const fn en_passant_pawn(mut self, pawn: Piece) -> Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    /// Consumes the builder and produces the immutable board.
    ///
    /// # Errors
    ///
    /// A configuration without exactly one king per side (or without a
    /// designated side to move) is unrecoverable: no playable position can
    /// exist without both kings, so construction fails loudly instead of
    /// producing a board that cannot answer queries.
    pub fn build(self) -> anyhow::Result<Board> {
        Board::from_builder(self)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::PieceKind;

    #[test]
    fn standard_board_layout() {
        let board = Board::standard();
        assert_eq!(board.side_to_move(), Alliance::Light);
        assert_eq!(board.pieces(Alliance::Light).len(), 16);
        assert_eq!(board.pieces(Alliance::Dark).len(), 16);
        assert!(board.en_passant_pawn().is_none());
        assert_eq!(
            board.to_string(),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             - - - - - - - -\n\
             - - - - - - - -\n\
             - - - - - - - -\n\
             - - - - - - - -\n\
             P P P P P P P P\n\
             R N B Q K B N R\n"
        );
    }

    #[test]
    fn squares_cover_the_board_without_gaps() {
        let board = Board::standard();
        for coordinate in 0..BOARD_SIZE {
            assert_eq!(board.square(coordinate).coordinate(), coordinate);
        }
    }

    #[test]
    fn occupied_squares_equal_the_union_of_active_pieces() {
        let board = Board::standard();
        let mut occupied: Vec<Coordinate> = (0..BOARD_SIZE)
            .filter(|&coordinate| board.square(coordinate).is_occupied())
            .collect();
        let mut active: Vec<Coordinate> = board
            .pieces(Alliance::Light)
            .iter()
            .chain(board.pieces(Alliance::Dark))
            .map(Piece::position)
            .collect();
        occupied.sort_unstable();
        active.sort_unstable();
        assert_eq!(occupied, active);
        // No duplicates either.
        let deduplicated: std::collections::BTreeSet<Coordinate> =
            active.iter().copied().collect();
        assert_eq!(deduplicated.len(), active.len());
    }

    #[test]
    fn building_without_a_king_fails() {
        let result = Builder::new()
            .place(Piece::new(PieceKind::King, Alliance::Light, 60))
            .place(Piece::new(PieceKind::Queen, Alliance::Dark, 3))
            .move_maker(Alliance::Light)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn building_without_a_side_to_move_fails() {
        let result = Builder::new()
            .place(Piece::new(PieceKind::King, Alliance::Light, 60))
            .place(Piece::new(PieceKind::King, Alliance::Dark, 4))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn placing_twice_keeps_the_later_piece() {
        let board = Builder::new()
            .place(Piece::new(PieceKind::King, Alliance::Light, 60))
            .place(Piece::new(PieceKind::King, Alliance::Dark, 4))
            .place(Piece::new(PieceKind::Knight, Alliance::Light, 35))
            .place(Piece::new(PieceKind::Bishop, Alliance::Light, 35))
            .move_maker(Alliance::Light)
            .build()
            .expect("both kings are on the board");
        assert_eq!(
            board.square(35).piece().map(|piece| piece.kind()),
            Some(PieceKind::Bishop)
        );
    }

    #[test]
    fn find_move_falls_back_to_the_null_sentinel() {
        let board = Board::standard();
        let pawn_push = board.find_move(52, 36);
        assert!(!pawn_push.is_null());
        assert_eq!(pawn_push.destination(), Some(36));

        // h1 to a8 matches nothing on the starting board.
        assert!(board.find_move(63, 0).is_null());
    }
}

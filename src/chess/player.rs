//! One side's view over a board: its legal move set, its king's safety and
//! the move-application protocol.
//!
//! Legality is checked in two phases. Generation produces pseudo-legal moves
//! (plus castling candidates); [`Player::make_move`] then simulates the move
//! and rejects it if the resulting board leaves the mover's own king
//! attacked. Checkmate and stalemate both fall out of the same protocol: a
//! side with no move whose transition comes back [`MoveStatus::Done`] has no
//! escape.

use std::fmt;

use anyhow::bail;

use crate::chess::board::Board;
use crate::chess::core::{Alliance, Coordinate};
use crate::chess::moves::Move;
use crate::chess::pieces::Piece;

/// Outcome of attempting a move through [`Player::make_move`]. Expected
/// rejections are statuses, not errors: callers branch on the status before
/// trusting the transition's board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move was legal and the transition board is the new position.
    Done,
    /// The move is not a member of the player's legal set (the null
    /// sentinel always lands here). The board is unchanged.
    IllegalMove,
    /// The move is pseudo-legal but would expose the mover's own king. The
    /// board is unchanged.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    /// True only for [`MoveStatus::Done`]: a rejected move never counts as
    /// an escape when probing for checkmate or stalemate.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// The result of attempting one move: the attempted move, the outcome, and
/// the board to continue from. On rejection that board is the original,
/// untouched position.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    attempted: Move,
    status: MoveStatus,
    board: Board,
}

impl MoveTransition {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn status(&self) -> MoveStatus {
        self.status
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn attempted_move(&self) -> &Move {
        &self.attempted
    }

    /// The board after the transition. Only a [`MoveStatus::Done`] outcome
    /// carries a new position.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the transition, yielding the board to continue from.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }
}

/// Per-side data computed once at board construction: the legal move set
/// (pseudo-legal moves plus castling candidates, not yet filtered for
/// self-check), the side's king and whether it is currently attacked.
#[derive(Clone, Debug)]
pub(crate) struct PlayerState {
    alliance: Alliance,
    legal_moves: Vec<Move>,
    king: Piece,
    in_check: bool,
}

impl PlayerState {
    // A blank state used only while the owning board finishes construction;
    // it is overwritten before the board becomes observable.
    pub(crate) fn detached(alliance: Alliance) -> Self {
        Self {
            alliance,
            legal_moves: Vec::new(),
            king: Piece::new(
                crate::chess::core::PieceKind::King,
                alliance,
                alliance.back_rank_start() + 4,
            ),
            in_check: false,
        }
    }

    pub(crate) fn compute(
        board: &Board,
        alliance: Alliance,
        own_moves: &[Move],
        opponent_moves: &[Move],
    ) -> anyhow::Result<Self> {
        let kings: Vec<Piece> = board
            .pieces(alliance)
            .iter()
            .copied()
            .filter(|piece| piece.kind().is_king())
            .collect();
        let [king] = kings.as_slice() else {
            bail!("expected exactly one {alliance} king, got {}", kings.len());
        };
        let in_check = is_attacked(king.position(), opponent_moves);
        let mut legal_moves = own_moves.to_vec();
        legal_moves.extend(king_castles(board, king, in_check, opponent_moves));
        Ok(Self {
            alliance,
            legal_moves,
            king: *king,
            in_check,
        })
    }
}

/// One side's view of a [`Board`]. Obtained from
/// [`Board::current_player`] and friends; borrows the board it was derived
/// from, so it is as immutable as the board itself.
#[derive(Copy, Clone)]
pub struct Player<'a> {
    board: &'a Board,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) const fn new(board: &'a Board, state: &'a PlayerState) -> Self {
        Self { board, state }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn alliance(&self) -> Alliance {
        self.state.alliance
    }

    /// The side's legal move set: pseudo-legal moves plus castling
    /// candidates. Self-check filtering happens in [`Player::make_move`].
    #[must_use]
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn king(&self) -> Piece {
        self.state.king
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.pieces(self.state.alliance)
    }

    /// The other side's view of the same board.
    #[must_use]
    pub fn opponent(&self) -> Self {
        self.state
            .alliance
            .opponent()
            .choose(self.board.light_player(), self.board.dark_player())
    }

    /// Whether this side's king is attacked right now.
    #[must_use]
    pub const fn is_in_check(&self) -> bool {
        self.state.in_check
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_move_legal(&self, candidate: &Move) -> bool {
        self.state.legal_moves.contains(candidate)
    }

    /// In check with no escaping transition.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.state.in_check && !self.has_escape_moves()
    }

    /// Not in check, but every move would expose the king.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.state.in_check && !self.has_escape_moves()
    }

    // Probes every legal move through the full transition protocol. Move
    // counts are small, so the re-verification stays cheap.
    fn has_escape_moves(&self) -> bool {
        self.state
            .legal_moves
            .iter()
            .any(|candidate| self.make_move(candidate).status().is_done())
    }

    /// Attempts `candidate` and reports the outcome.
    ///
    /// A move outside this player's legal set comes back as
    /// [`MoveStatus::IllegalMove`] with the original board. A legal-looking
    /// move is executed; if any opposing reply on the resulting board could
    /// land on the mover's king, the candidate board is discarded and the
    /// outcome is [`MoveStatus::LeavesPlayerInCheck`]. Otherwise the
    /// transition carries the new position.
    #[must_use]
    pub fn make_move(&self, candidate: &Move) -> MoveTransition {
        if !self.is_move_legal(candidate) {
            return MoveTransition {
                attempted: *candidate,
                status: MoveStatus::IllegalMove,
                board: self.board.clone(),
            };
        }
        let Ok(transition_board) = candidate.execute(self.board) else {
            return MoveTransition {
                attempted: *candidate,
                status: MoveStatus::IllegalMove,
                board: self.board.clone(),
            };
        };
        // The opponent moves next on the candidate board: none of their
        // replies may land on the mover's king.
        let mover_king = transition_board.current_player().opponent().king().position();
        let exposed = transition_board
            .current_player()
            .legal_moves()
            .iter()
            .any(|reply| reply.destination() == Some(mover_king));
        if exposed {
            return MoveTransition {
                attempted: *candidate,
                status: MoveStatus::LeavesPlayerInCheck,
                board: self.board.clone(),
            };
        }
        MoveTransition {
            attempted: *candidate,
            status: MoveStatus::Done,
            board: transition_board,
        }
    }
}

impl fmt::Debug for Player<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("alliance", &self.state.alliance)
            .field("in_check", &self.state.in_check)
            .field("legal_moves", &self.state.legal_moves.len())
            .finish()
    }
}

fn is_attacked(coordinate: Coordinate, moves: &[Move]) -> bool {
    moves
        .iter()
        .any(|attack| attack.destination() == Some(coordinate))
}

// Castling candidates for one side. Every clause is checked independently;
// a violated clause omits that castle from the legal set, it is never an
// error. The attack checks cover only the squares the king crosses or lands
// on, not the ones only the rook passes through.
fn king_castles(
    board: &Board,
    king: &Piece,
    in_check: bool,
    opponent_moves: &[Move],
) -> Vec<Move> {
    let mut castles = Vec::new();
    if !king.is_first_move() || in_check {
        return castles;
    }
    let back = king.alliance().back_rank_start();

    // Kingside: f- and g-file squares open, rook untouched on the h-file.
    if board.square(back + 5).is_empty() && board.square(back + 6).is_empty() {
        if let Some(rook) = board.square(back + 7).piece() {
            if rook.is_first_move()
                && rook.kind().is_rook()
                && rook.alliance() == king.alliance()
                && !is_attacked(back + 5, opponent_moves)
                && !is_attacked(back + 6, opponent_moves)
            {
                castles.push(Move::CastleKingSide {
                    king: *king,
                    to: back + 6,
                    rook,
                    rook_from: back + 7,
                    rook_to: back + 5,
                });
            }
        }
    }

    // Queenside: three open squares towards the a-file rook, of which the
    // king only crosses two.
    if board.square(back + 1).is_empty()
        && board.square(back + 2).is_empty()
        && board.square(back + 3).is_empty()
    {
        if let Some(rook) = board.square(back).piece() {
            if rook.is_first_move()
                && rook.kind().is_rook()
                && rook.alliance() == king.alliance()
                && !is_attacked(back + 2, opponent_moves)
                && !is_attacked(back + 3, opponent_moves)
            {
                castles.push(Move::CastleQueenSide {
                    king: *king,
                    to: back + 2,
                    rook,
                    rook_from: back,
                    rook_to: back + 3,
                });
            }
        }
    }
    castles
}

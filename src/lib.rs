//! Rules engine for standard chess.
//!
//! Given a board position, the crate enumerates every legal move for the
//! side to move, applies a chosen move to produce the next immutable
//! position and determines the terminal conditions (check, checkmate,
//! stalemate). It deliberately does not pick moves or evaluate positions:
//! the whole surface is [`Board::current_player`] for enumeration and
//! [`chess::player::Player::make_move`] for application.
//!
//! ```
//! use arbiter::{Board, MoveStatus};
//!
//! let board = Board::standard();
//! assert_eq!(board.current_player().legal_moves().len(), 20);
//!
//! // Push the king's pawn two squares.
//! let opening = board.find_move(52, 36);
//! let transition = board.current_player().make_move(&opening);
//! assert_eq!(transition.status(), MoveStatus::Done);
//! ```

// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]
// Rustdoc lints.
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery
)]

pub mod chess;

pub use chess::board::{Board, Builder, Square};
pub use chess::core::{Alliance, Coordinate, PieceKind};
pub use chess::moves::Move;
pub use chess::pieces::Piece;
pub use chess::player::{MoveStatus, MoveTransition, Player};

use super::Board;
use crate::core::*;
use thiserror::Error;

/******************************************\
|==========================================|
|               Undo State                 |
|==========================================|
\******************************************/

/// # Undo state representation
///
/// - The irreversible state captured by `make_move`, owned by the caller and
///   handed back to `undo_move`. Records must be replayed in LIFO order;
///   undoing with a stale record corrupts the position.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    captured: Option<Piece>,

    castle: Castling,

    enpassant: Option<Square>,

    fifty_move: u8,
}

/******************************************\
|==========================================|
|             Illegal Moves                |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Move {mv} is not legal in the current position")]
pub struct IllegalMoveError {
    pub mv: Move,
}

/******************************************\
|==========================================|
|             Castling Rights              |
|==========================================|
\******************************************/

/// Returns the castling rights that survive a move touching `sq`.
///
/// Moving from or to a king or rook home square strips the rights tied to
/// it; every other square leaves the rights alone.
const fn rights_mask(sq: Square) -> Castling {
    match sq {
        Square::E1 => Castling(Castling::ALL.0 & !Castling::WHITE.0),
        Square::A1 => Castling(Castling::ALL.0 & !Castling::WQ.0),
        Square::H1 => Castling(Castling::ALL.0 & !Castling::WK.0),
        Square::E8 => Castling(Castling::ALL.0 & !Castling::BLACK.0),
        Square::A8 => Castling(Castling::ALL.0 & !Castling::BQ.0),
        Square::H8 => Castling(Castling::ALL.0 & !Castling::BK.0),
        _ => Castling::ALL,
    }
}

/******************************************\
|==========================================|
|             Making Moves                 |
|==========================================|
\******************************************/

impl Board {
    /// Applies `mv` after validating it against the legal move list.
    ///
    /// On success the returned [`UndoState`] lets `undo_move` restore the
    /// position exactly. An illegal move leaves the board untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<UndoState, IllegalMoveError> {
        if !self.legal_moves().contains(mv) {
            return Err(IllegalMoveError { mv });
        }
        Ok(self.apply(mv))
    }

    /// Reverses a move previously applied with `make_move`.
    ///
    /// `mv` must be the exact move that produced `undo`, and records must be
    /// undone newest first.
    pub fn undo_move(&mut self, mv: Move, undo: UndoState) {
        self.revert(mv, undo);
    }

    /// Applies `mv` without legality checking. The move must be legal.
    pub(crate) fn apply(&mut self, mv: Move) -> UndoState {
        let from = mv.from();
        let to = mv.to();
        let flag = mv.flag();
        let us = self.stm();
        let them = !us;

        debug_assert!(self.on(from).is_some(), "apply: 'from' square is empty");
        let piece = unsafe { self.clear_piece(from).unwrap_unchecked() };

        let mut undo = UndoState {
            captured: None,
            castle: self.castling(),
            enpassant: self.ep(),
            fifty_move: self.fifty_move(),
        };

        let mut fifty_move = if piece.pt() == PieceType::Pawn {
            0
        } else {
            self.fifty_move().saturating_add(1)
        };

        match flag {
            // Handle Enpassant
            MoveFlag::EnPassant => {
                debug_assert!(
                    to.add(-us.forward()).is_some(),
                    "apply: invalid en passant target calculation"
                );
                let cap_sq = unsafe { to.add_unchecked(-us.forward()) };
                debug_assert!(
                    self.on(cap_sq) == Some(Piece::from_parts(them, PieceType::Pawn)),
                    "apply: no pawn to capture en passant"
                );
                undo.captured = self.clear_piece(cap_sq);
                self.set_piece(to, piece);
            }

            // Handle Castling
            MoveFlag::CastleKingSide | MoveFlag::CastleQueenSide => {
                let king_side = flag == MoveFlag::CastleKingSide;
                let rook_from = match king_side {
                    true => Square::H1.relative(us),
                    false => Square::A1.relative(us),
                };
                let rook_to = match king_side {
                    true => Square::F1.relative(us),
                    false => Square::D1.relative(us),
                };
                debug_assert!(self.on(rook_from).is_some(), "apply: castling rook missing");
                let rook = unsafe { self.clear_piece(rook_from).unwrap_unchecked() };
                self.set_piece(rook_to, rook);
                self.set_piece(to, piece);
            }

            // Quiet moves, captures, double pushes and promotions
            _ => {
                undo.captured = self.clear_piece(to);
                if undo.captured.is_some() {
                    fifty_move = 0;
                }
                let placed = match flag.promotion() {
                    Some(pt) => Piece::from_parts(us, pt),
                    None => piece,
                };
                self.set_piece(to, placed);
            }
        }

        let mut castle = self.castling();
        castle.mask(rights_mask(from) & rights_mask(to));
        self.set_castling(castle);

        self.set_clocks(fifty_move, self.half_moves() + 1);
        self.set_stm(them);

        // Record the en passant square only when the reply can actually use it
        self.set_ep(None);
        if flag == MoveFlag::DoublePawnPush {
            debug_assert!(
                from.add(us.forward()).is_some(),
                "apply: invalid double push origin"
            );
            let ep = unsafe { from.add_unchecked(us.forward()) };
            if self.ep_capturable(ep) {
                self.set_ep(Some(ep));
            }
        }

        undo
    }

    /// Reverses `mv` using the state captured when it was applied.
    pub(crate) fn revert(&mut self, mv: Move, undo: UndoState) {
        self.set_stm(!self.stm());
        let us = self.stm();

        let from = mv.from();
        let to = mv.to();
        let flag = mv.flag();

        debug_assert!(self.on(to).is_some(), "revert: 'to' square is empty");
        let piece = unsafe { self.clear_piece(to).unwrap_unchecked() };

        match flag {
            // Handle Enpassant
            MoveFlag::EnPassant => {
                self.set_piece(from, piece);
                debug_assert!(
                    to.add(-us.forward()).is_some(),
                    "revert: invalid en passant target calculation"
                );
                let cap_sq = unsafe { to.add_unchecked(-us.forward()) };
                debug_assert!(
                    undo.captured.is_some(),
                    "revert: en passant undo has no captured pawn"
                );
                if let Some(captured) = undo.captured {
                    self.set_piece(cap_sq, captured);
                }
            }

            // Handle Castling
            MoveFlag::CastleKingSide | MoveFlag::CastleQueenSide => {
                self.set_piece(from, piece);
                let king_side = flag == MoveFlag::CastleKingSide;
                let rook_from = match king_side {
                    true => Square::H1.relative(us),
                    false => Square::A1.relative(us),
                };
                let rook_to = match king_side {
                    true => Square::F1.relative(us),
                    false => Square::D1.relative(us),
                };
                debug_assert!(self.on(rook_to).is_some(), "revert: castling rook missing");
                let rook = unsafe { self.clear_piece(rook_to).unwrap_unchecked() };
                self.set_piece(rook_from, rook);
            }

            // Quiet moves, captures, double pushes and promotions
            _ => {
                let original = match mv.is_promotion() {
                    true => Piece::from_parts(us, PieceType::Pawn),
                    false => piece,
                };
                self.set_piece(from, original);
                if let Some(captured) = undo.captured {
                    self.set_piece(to, captured);
                }
            }
        }

        self.set_castling(undo.castle);
        self.set_ep(undo.enpassant);
        self.set_clocks(undo.fifty_move, self.half_moves() - 1);
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::START_FEN;

    /// Applies `mv`, checks the resulting FEN, undoes it and checks the
    /// board is restored field for field
    fn test_make_undo(fen_before: &str, mv: Move, fen_after: &str) {
        let mut board = Board::from_fen(fen_before).expect("test FEN should be valid");
        let original = board.clone();

        let undo = board
            .make_move(mv)
            .unwrap_or_else(|e| panic!("move should be legal: {e}"));
        assert_eq!(board.fen(), fen_after, "FEN mismatch after '{mv}'");

        board.undo_move(mv, undo);
        assert_eq!(board.fen(), fen_before, "FEN mismatch after undoing '{mv}'");
        assert_eq!(board, original, "board mismatch after undoing '{mv}'");
    }

    #[test]
    fn test_double_pawn_push() {
        // No black pawn can take e3, so no ep square is recorded
        test_make_undo(
            START_FEN,
            Move::new(Square::E2, Square::E4, MoveFlag::DoublePawnPush),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        );
    }

    #[test]
    fn test_double_pawn_push_sets_live_ep() {
        test_make_undo(
            "4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1",
            Move::new(Square::D2, Square::D4, MoveFlag::DoublePawnPush),
            "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1",
        );
    }

    #[test]
    fn test_quiet_knight_move() {
        test_make_undo(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            Move::new(Square::G8, Square::F6, MoveFlag::Quiet),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2",
        );
    }

    #[test]
    fn test_capture() {
        test_make_undo(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            Move::new(Square::E4, Square::D5, MoveFlag::Quiet),
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2",
        );
    }

    #[test]
    fn test_white_en_passant_capture() {
        test_make_undo(
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            Move::new(Square::E5, Square::D6, MoveFlag::EnPassant),
            "rnbqkbnr/ppp1pppp/3P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3",
        );
    }

    #[test]
    fn test_black_en_passant_capture() {
        test_make_undo(
            "4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1",
            Move::new(Square::E4, Square::D3, MoveFlag::EnPassant),
            "4k3/8/8/8/8/3p4/8/4K3 w - - 0 2",
        );
    }

    #[test]
    fn test_white_kingside_castle() {
        test_make_undo(
            "rnbq1bnr/pppppkpp/8/8/8/8/PPPPPPPP/RNBQK2R w KQ - 0 5",
            Move::new(Square::E1, Square::G1, MoveFlag::CastleKingSide),
            "rnbq1bnr/pppppkpp/8/8/8/8/PPPPPPPP/RNBQ1RK1 b - - 1 5",
        );
    }

    #[test]
    fn test_white_queenside_castle() {
        test_make_undo(
            "rnbq1bnr/pppppkpp/8/8/8/8/PPPPPPPP/R3KBNR w KQ - 0 5",
            Move::new(Square::E1, Square::C1, MoveFlag::CastleQueenSide),
            "rnbq1bnr/pppppkpp/8/8/8/8/PPPPPPPP/2KR1BNR b - - 1 5",
        );
    }

    #[test]
    fn test_black_kingside_castle() {
        test_make_undo(
            "rnbqk2r/pppp1ppp/5n2/2b1p3/8/5NP1/PPPPPPBP/RNBQK2R b KQkq - 0 4",
            Move::new(Square::E8, Square::G8, MoveFlag::CastleKingSide),
            "rnbq1rk1/pppp1ppp/5n2/2b1p3/8/5NP1/PPPPPPBP/RNBQK2R w KQ - 1 5",
        );
    }

    #[test]
    fn test_black_queenside_castle() {
        test_make_undo(
            "r3kbnr/p1pp1ppp/bpn1p3/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 7",
            Move::new(Square::E8, Square::C8, MoveFlag::CastleQueenSide),
            "2kr1bnr/p1pp1ppp/bpn1p3/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 1 8",
        );
    }

    #[test]
    fn test_promotion_quiet() {
        test_make_undo(
            "r1bqkbnr/pPpppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 6",
            Move::new(Square::B7, Square::B8, MoveFlag::PromoQueen),
            "rQbqkbnr/p1pppppp/8/8/8/8/1PPPPPPP/RNBQKBNR b KQkq - 0 6",
        );
    }

    #[test]
    fn test_promotion_capture() {
        test_make_undo(
            "r1bqkbnr/pPpppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 6",
            Move::new(Square::B7, Square::A8, MoveFlag::PromoKnight),
            "N1bqkbnr/p1pppppp/8/8/8/8/1PPPPPPP/RNBQKBNR b KQk - 0 6",
        );
    }

    #[test]
    fn test_underpromotion_restores_pawn() {
        test_make_undo(
            "4k3/6P1/8/8/8/8/8/4K3 w - - 3 40",
            Move::new(Square::G7, Square::G8, MoveFlag::PromoRook),
            "4k1R1/8/8/8/8/8/8/4K3 b - - 0 40",
        );
    }

    #[test]
    fn test_castling_rights_king_move() {
        test_make_undo(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1",
            Move::new(Square::E1, Square::E2, MoveFlag::Quiet),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPKPPP/RNBQ1BNR b kq - 1 1",
        );
    }

    #[test]
    fn test_castling_rights_rook_move() {
        test_make_undo(
            "rnbqkbnr/pppppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 1",
            Move::new(Square::A1, Square::A2, MoveFlag::Quiet),
            "rnbqkbnr/pppppppp/8/8/8/8/RPPPPPPP/1NBQKBNR b Kkq - 1 1",
        );
        test_make_undo(
            "rnbqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
            Move::new(Square::H8, Square::H6, MoveFlag::Quiet),
            "rnbqkbn1/ppppppp1/7r/8/8/8/PPPPPPPP/RNBQKBNR w KQq - 1 2",
        );
    }

    #[test]
    fn test_castling_rights_rook_capture() {
        test_make_undo(
            "rnbqkbnr/pppppppp/1N6/8/8/8/PPPPPPPP/R1BQKBNR w KQkq - 0 1",
            Move::new(Square::B6, Square::A8, MoveFlag::Quiet),
            "Nnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/R1BQKBNR b KQk - 0 1",
        );
    }

    #[test]
    fn test_fifty_move_counter() {
        let mut board = Board::default();
        assert_eq!(board.fifty_move(), 0);

        // Pawn move resets
        let e4 = Move::new(Square::E2, Square::E4, MoveFlag::DoublePawnPush);
        let undo = board.make_move(e4).unwrap();
        assert_eq!(board.fifty_move(), 0);
        board.undo_move(e4, undo);

        // Quiet knight move increments
        let nf3 = Move::new(Square::G1, Square::F3, MoveFlag::Quiet);
        let undo = board.make_move(nf3).unwrap();
        assert_eq!(board.fifty_move(), 1);
        board.undo_move(nf3, undo);

        // Capture resets
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 5 4")
                .unwrap();
        board
            .make_move(Move::new(Square::E4, Square::D5, MoveFlag::Quiet))
            .unwrap();
        assert_eq!(board.fifty_move(), 0);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut board = Board::default();
        let before = board.clone();

        // A pawn cannot jump three squares
        let mv = Move::new(Square::E2, Square::E5, MoveFlag::Quiet);
        assert_eq!(board.make_move(mv), Err(IllegalMoveError { mv }));

        // Cannot move an enemy piece
        let mv = Move::new(Square::E7, Square::E5, MoveFlag::DoublePawnPush);
        assert!(board.make_move(mv).is_err());

        // The board is untouched after rejections
        assert_eq!(board, before);
    }

    #[test]
    fn test_illegal_move_into_check_rejected() {
        // The e-file rook pins the knight
        let mut board =
            Board::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let mv = Move::new(Square::E2, Square::C3, MoveFlag::Quiet);
        assert!(board.make_move(mv).is_err());
    }

    #[test]
    fn test_undo_sequence_restores_start() {
        let mut board = Board::default();
        let original = board.clone();

        let moves = [
            Move::new(Square::E2, Square::E4, MoveFlag::DoublePawnPush),
            Move::new(Square::E7, Square::E5, MoveFlag::DoublePawnPush),
            Move::new(Square::G1, Square::F3, MoveFlag::Quiet),
            Move::new(Square::B8, Square::C6, MoveFlag::Quiet),
        ];

        let mut undos = Vec::new();
        for mv in moves {
            undos.push(board.make_move(mv).unwrap());
        }

        for (mv, undo) in moves.into_iter().zip(undos).rev() {
            board.undo_move(mv, undo);
        }

        assert_eq!(board, original);
        assert_eq!(board.fen(), START_FEN);
    }
}

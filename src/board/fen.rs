use super::Board;

use crate::core::types::ParseCastlingError;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const TRICKY_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

pub const KILLER_FEN: &str = "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Board {
    pub const FEN_SECTIONS: usize = 6;

    /// Replaces the position with the one described by `fen`.
    ///
    /// Parsing is atomic: the board is only overwritten once the whole
    /// string has been validated.
    pub fn set(&mut self, fen: &str) -> Result<(), FenParseError> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let mut board = Board::new();

        let mut parts = fen.split_whitespace();

        let piece_placement = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_piece_placement(piece_placement)?;

        let side_to_move = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_side_to_move(side_to_move)?;

        let castling = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_castling(castling)?;

        let enpassant = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        board.parse_enpassant(enpassant)?;

        let fifty_move_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let fifty_move = Self::parse_fifty_move(fifty_move_token)?;

        let full_move_token = parts.next().ok_or(FenParseError::InvalidNumberOfFields)?;
        let half_moves = board.parse_full_move(full_move_token)?;

        board.set_clocks(fifty_move, half_moves);

        if parts.next().is_some() {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        Ok(board)
    }

    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                match self.on(square) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push_str(&piece.to_string());
                    }
                    None => {
                        empty_count += 1;
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        fen.push_str(&format!(" {}", self.stm()));

        fen.push_str(&format!(" {}", self.castling()));

        fen.push(' ');
        match self.ep() {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {}", self.fifty_move()));

        fen.push_str(&format!(" {}", self.full_moves()));

        fen
    }

    fn parse_separator(
        rank_iter: &mut impl DoubleEndedIterator<Item = Rank>,
        rank: Rank,
        file: u8,
    ) -> Result<(Rank, u8), FenParseError> {
        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Rank {:?} ended prematurely at file index {} (expected 8) before '/'",
                rank, file
            )));
        }

        let next_rank = rank_iter.next().ok_or_else(|| {
            FenParseError::InvalidRankFormat(format!(
                "Too many rank separators ('/') found after completing rank {:?}",
                rank
            ))
        })?;

        Ok((next_rank, 0))
    }

    fn parse_skip(
        skip: char,
        idx: usize,
        current_rank: Rank,
        current_file_index: u8,
    ) -> Result<u8, FenParseError> {
        let skip_val = skip.to_digit(10).unwrap();

        if !(1..=8).contains(&skip_val) {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Invalid skip digit '{}' (must be 1-8) at char index {}",
                skip, idx
            )));
        }

        let skip_u8 = skip_val as u8;

        if current_file_index + skip_u8 > 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Skip value {} exceeds rank length at file index {} on rank {:?}",
                skip_u8, current_file_index, current_rank
            )));
        }

        Ok(skip_u8)
    }

    fn parse_piece(&mut self, piece: char, rank: Rank, file: u8) -> Result<(), FenParseError> {
        if file >= 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Piece placement '{}' attempted beyond file H (index >= 8) on rank {:?}",
                piece, rank
            )));
        }

        let piece_enum =
            Piece::try_from(piece).map_err(|_| FenParseError::InvalidPiecePlacementChar(piece))?;

        let current_file = unsafe { File::from_unchecked(file) };

        let sq = Square::from_parts(current_file, rank);

        self.set_piece(sq, piece_enum);

        Ok(())
    }

    fn parse_piece_placement(&mut self, piece_placement: &str) -> Result<(), FenParseError> {
        let mut rank_iter = Rank::iter().rev();

        let mut rank = rank_iter
            .next()
            .ok_or_else(|| FenParseError::InvalidRankFormat("Board has no ranks?".to_string()))?;

        let mut file: u8 = 0;

        for (i, char) in piece_placement.chars().enumerate() {
            match char {
                '/' => {
                    (rank, file) = Self::parse_separator(&mut rank_iter, rank, file)?;
                }

                skip if skip.is_ascii_digit() => {
                    file += Self::parse_skip(skip, i, rank, file)?;
                }

                piece_char => {
                    self.parse_piece(piece_char, rank, file)?;
                    file += 1;
                }
            }
        }

        if file != 8 {
            return Err(FenParseError::InvalidRankFormat(format!(
                "Final rank {:?} ended prematurely at file index {} (expected 8)",
                rank, file
            )));
        }

        if rank_iter.next().is_some() {
            return Err(FenParseError::InvalidRankFormat(
                "Not enough ranks specified in FEN string (expected 8)".to_string(),
            ));
        }

        self.validate_kings()
    }

    /// Requires exactly one king per side, so the king square cache and the
    /// legality filter are always well defined
    fn validate_kings(&self) -> Result<(), FenParseError> {
        for col in Colour::iter() {
            let king = Piece::from_parts(col, PieceType::King);
            let count = Square::iter().filter(|&sq| self.on(sq) == Some(king)).count();
            if count != 1 {
                return Err(FenParseError::InvalidKingCount(format!(
                    "Expected exactly one {:?} king, found {}",
                    col, count
                )));
            }
        }
        Ok(())
    }

    fn parse_side_to_move(&mut self, side_to_move: &str) -> Result<(), FenParseError> {
        match side_to_move {
            "w" => self.set_stm(Colour::White),
            "b" => self.set_stm(Colour::Black),
            _ => return Err(FenParseError::InvalidSideToMove(side_to_move.to_string())),
        };
        Ok(())
    }

    fn parse_castling(&mut self, castling: &str) -> Result<(), FenParseError> {
        let rights = castling.parse::<Castling>().map_err(|e| match e {
            ParseCastlingError::InvalidChar(c) | ParseCastlingError::DuplicateChar(c) => {
                FenParseError::InvalidCastlingChar(c)
            }
            ParseCastlingError::Empty => FenParseError::InvalidNumberOfFields,
        })?;

        // Each right must be backed by a king and rook on their home squares
        let placements = [
            (Castling::WK, 'K', Piece::WhiteKing, Square::E1, Piece::WhiteRook, Square::H1),
            (Castling::WQ, 'Q', Piece::WhiteKing, Square::E1, Piece::WhiteRook, Square::A1),
            (Castling::BK, 'k', Piece::BlackKing, Square::E8, Piece::BlackRook, Square::H8),
            (Castling::BQ, 'q', Piece::BlackKing, Square::E8, Piece::BlackRook, Square::A8),
        ];

        for (right, c, king, ksq, rook, rsq) in placements {
            if rights.has(right) && (self.on(ksq) != Some(king) || self.on(rsq) != Some(rook)) {
                return Err(FenParseError::InvalidCastlingRights(c));
            }
        }

        self.set_castling(rights);
        Ok(())
    }

    fn parse_enpassant(&mut self, enpassant: &str) -> Result<(), FenParseError> {
        let square = match enpassant {
            "-" => {
                self.set_ep(None);
                return Ok(());
            }
            _ => enpassant
                .parse::<Square>()
                .map_err(|_| FenParseError::InvalidEnPassantSquare(enpassant.to_string()))?,
        };

        let expected_rank = Rank::Rank6.relative(self.stm());
        if square.rank() != expected_rank {
            return Err(FenParseError::InvalidEnPassantSquare(format!(
                "{square} is not a valid enpassant square for {:?} to move",
                self.stm()
            )));
        }

        // Keep the square only when the capture is actually available: the
        // pushed pawn stands behind it and a capturing pawn is adjacent
        if self.ep_capturable(square) {
            self.set_ep(Some(square));
        } else {
            self.set_ep(None);
        }

        Ok(())
    }

    fn parse_fifty_move(fifty_move_token: &str) -> Result<u8, FenParseError> {
        fifty_move_token
            .parse::<u8>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(fifty_move_token.to_string()))
    }

    fn parse_full_move(&mut self, full_move_token: &str) -> Result<u16, FenParseError> {
        let full_move_number = full_move_token
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(full_move_token.to_string()))?;

        if full_move_number == 0 {
            return Err(FenParseError::InvalidFullmoveNumber(format!(
                "Fullmove number cannot be 0, found: {}",
                full_move_token
            )));
        }

        // Widen before the multiply: large fullmove numbers must surface as
        // parse errors, not ply overflow
        let ply = (full_move_number as u32 - 1) * 2 + (self.stm() as u32);
        if ply > u16::MAX as u32 {
            return Err(FenParseError::InvalidFullmoveNumber(format!(
                "Fullmove number {} is out of range",
                full_move_token
            )));
        }

        Ok(ply as u16)
    }
}

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    InvalidNumberOfFields,

    InvalidPiecePlacementChar(char),

    InvalidRankFormat(String),

    InvalidKingCount(String),

    InvalidSideToMove(String),

    InvalidCastlingChar(char),

    InvalidCastlingRights(char),

    InvalidEnPassantSquare(String),

    InvalidHalfmoveClock(String),

    InvalidFullmoveNumber(String),
}

impl std::fmt::Display for FenParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FenParseError::InvalidNumberOfFields => {
                write!(f, "FEN string must have 6 fields separated by spaces")
            }
            FenParseError::InvalidPiecePlacementChar(c) => {
                write!(f, "Invalid character in FEN piece placement: '{}'", c)
            }
            FenParseError::InvalidRankFormat(reason) => {
                write!(f, "Invalid rank format in FEN piece placement: {}", reason)
            }
            FenParseError::InvalidKingCount(reason) => {
                write!(f, "Invalid king count in FEN piece placement: {}", reason)
            }
            FenParseError::InvalidSideToMove(s) => {
                write!(
                    f,
                    "Invalid side to move in FEN: '{}', expected 'w' or 'b'",
                    s
                )
            }
            FenParseError::InvalidCastlingChar(c) => {
                write!(f, "Invalid character in FEN castling availability: '{}'", c)
            }
            FenParseError::InvalidCastlingRights(c) => {
                write!(
                    f,
                    "Castling right '{}' has no matching king and rook on their home squares",
                    c
                )
            }
            FenParseError::InvalidEnPassantSquare(s) => {
                write!(f, "Invalid en passant target square in FEN: '{}'", s)
            }
            FenParseError::InvalidHalfmoveClock(s) => {
                write!(f, "Invalid halfmove clock value in FEN: '{}'", s)
            }
            FenParseError::InvalidFullmoveNumber(s) => {
                write!(f, "Invalid fullmove number value in FEN: '{}'", s)
            }
        }
    }
}

impl std::error::Error for FenParseError {}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_parse_start_fen() {
        let mut board = Board::new();
        assert!(board.set(START_FEN).is_ok());

        assert_eq!(board.on(Square::A1), Some(Piece::WhiteRook));
        assert_eq!(board.on(Square::E1), Some(Piece::WhiteKing));
        assert_eq!(board.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::D8), Some(Piece::BlackQueen));
        assert_eq!(board.on(Square::E4), None);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.ep(), None);
        assert_eq!(board.fifty_move(), 0);
        assert_eq!(board.half_moves(), 0);
        assert_eq!(board.fen(), START_FEN.trim());
    }

    #[test]
    fn test_parse_tricky_fen() {
        let mut board = Board::new();

        assert!(board.set(TRICKY_FEN).is_ok());

        assert_eq!(board.on(Square::A8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::E8), Some(Piece::BlackKing));
        assert_eq!(board.on(Square::H8), Some(Piece::BlackRook));
        assert_eq!(board.on(Square::F3), Some(Piece::WhiteQueen));
        assert_eq!(board.on(Square::C3), Some(Piece::WhiteKnight));
        assert_eq!(board.on(Square::H3), Some(Piece::BlackPawn));
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.castling(), Castling::ALL);
        assert_eq!(board.ep(), None);
        assert_eq!(board.fen(), TRICKY_FEN.trim());
    }

    #[test]
    fn test_parse_killer_fen_keeps_live_ep() {
        // The f5 pawn can capture e6 en passant, so the square survives import
        let board = Board::from_fen(KILLER_FEN).unwrap();
        assert_eq!(board.ep(), Some(Square::E6));
        assert_eq!(board.ep_target(), Some(Square::E5));
        assert_eq!(board.fen(), KILLER_FEN.trim());
    }

    #[test]
    fn test_parse_drops_dead_ep_square() {
        // After 1. e4 there is an ep square but no black pawn can take it
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.ep(), None);
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_fen_invalid_piece() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidPiecePlacementChar('x'))
        ));
    }

    #[test]
    fn test_fen_set_is_atomic() {
        let mut board = Board::default();
        let before = board.clone();
        let fen = "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert!(board.set(fen).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_fen_invalid_rank_length_short() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_short_at_end() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Final rank Rank1 ended prematurely at file index 7")
        );
    }

    #[test]
    fn test_fen_invalid_rank_length_long_piece() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("attempted beyond file H")
        );
    }

    #[test]
    fn test_fen_invalid_skip_digits() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppp0ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid skip digit '0'")
        );

        let fen = "rnbqkbnr/pppp9ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
    }

    #[test]
    fn test_fen_wrong_rank_count() {
        let mut board = Board::new();
        let fen = "8/8/8/4k3/8/8/8/8/4K3 w - - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Too many rank separators")
        );

        let fen = "8/8/4k3/8/8/8/4K3 w - - 0 1";
        let result = board.set(fen);
        assert!(matches!(result, Err(FenParseError::InvalidRankFormat(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Not enough ranks specified")
        );
    }

    #[test]
    fn test_fen_king_count() {
        let mut board = Board::new();

        // No white king
        let fen = "4k3/8/8/8/8/8/8/8 w - - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidKingCount(_))
        ));

        // Two black kings
        let fen = "3kk3/8/8/8/8/8/8/4K3 w - - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidKingCount(_))
        ));
    }

    #[test]
    fn test_fen_missing_fields() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidNumberOfFields)
        ));
    }

    #[test]
    fn test_fen_extra_fields() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidNumberOfFields)
        ));
    }

    #[test]
    fn test_fen_invalid_side() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1";
        assert!(matches!(board.set(fen), Err(FenParseError::InvalidSideToMove(s)) if s == "x"));
    }

    #[test]
    fn test_fen_invalid_castling() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQXkq - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidCastlingChar('X'))
        ));
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w K-q - 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidCastlingChar('-'))
        ));
    }

    #[test]
    fn test_fen_castling_requires_home_squares() {
        // The white king side rook is missing, so 'K' is inconsistent
        let fen = "r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidCastlingRights('K'))
        ));

        // The black king has moved off e8
        let fen = "r2k3r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert!(matches!(
            Board::from_fen(fen),
            Err(FenParseError::InvalidCastlingRights('k'))
        ));

        // Dropping the unsupported rights makes it parse
        let fen = "r2k3r/8/8/8/8/8/8/R3K2R w KQ - 0 1";
        assert!(Board::from_fen(fen).is_ok());
    }

    #[test]
    fn test_fen_invalid_enpassant() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "e9")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq zz 0 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidEnPassantSquare(s)) if s == "zz")
        );
        // White to move cannot have an ep square on rank 3
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn test_fen_invalid_halfmove() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - fifty 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "fifty")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1";
        assert!(matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "-1"));
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 256 1";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidHalfmoveClock(s)) if s == "256")
        );
    }

    #[test]
    fn test_fen_invalid_fullmove() {
        let mut board = Board::new();
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 zero";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "zero")
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s.contains("cannot be 0"))
        );
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -5";
        assert!(
            matches!(board.set(fen), Err(FenParseError::InvalidFullmoveNumber(s)) if s == "-5")
        );
    }

    #[test]
    fn test_fen_fullmove_out_of_range() {
        // A fullmove number whose ply does not fit the counter is rejected,
        // never wrapped
        let mut board = Board::new();
        let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 40000";
        assert!(matches!(
            board.set(fen),
            Err(FenParseError::InvalidFullmoveNumber(s)) if s.contains("out of range")
        ));

        // The largest representable ply still parses
        let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 32768";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.half_moves(), u16::MAX);
        assert_eq!(board.full_moves(), 32768);
    }

    #[test]
    fn test_fen_ply_calculation() {
        let mut board = Board::new();

        let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 2);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.fen(), fen.trim());

        let fen = "r1bqkbnr/pp1ppppp/2n5/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 1 10";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 18);
        assert_eq!(board.stm(), Colour::White);
        assert_eq!(board.fen(), fen.trim());

        let fen = "r1bqkbnr/pp1ppppp/2n5/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 10";
        assert!(board.set(fen).is_ok());
        assert_eq!(board.half_moves(), 19);
        assert_eq!(board.stm(), Colour::Black);
        assert_eq!(board.full_moves(), 10);
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            START_FEN,
            TRICKY_FEN,
            KILLER_FEN,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 99 70",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.fen(), fen, "round trip failed for {fen}");
        }
    }
}

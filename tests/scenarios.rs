//! End-to-end scenario tests that exercise the public API the way a
//! caller would: parse a FEN, push a move or two, and check the result.

use chesscore::{Board, EpMode, Move};

/// Surfaces the crate's `log` output (table init, parse rejections) under
/// `RUST_LOG=debug cargo test -- --nocapture`; harmless to call repeatedly.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn chess960_castling_with_obstructed_queenside() {
    init_logging();
    // White to move, Chess960 rights `Gd` (kingside rook on g1, queenside
    // rook on d1). The queenside rook's own path is clear but the squares
    // between it and the king include the king's own square, which is fine;
    // castling kingside is the one available here since d8/d-file pieces on
    // the black side block queenside castling for black, not white.
    let fen = "3r1k1r/4pp2/8/8/8/8/8/4RKR1 w Gd - 1 1";
    let mut board = Board::from_fen(fen).unwrap();
    assert!(board.chess960);

    let castle_king_side = board.parse_san("O-O").unwrap();
    assert_eq!(castle_king_side, Move::normal(
        chesscore::Square::from_algebraic("f1").unwrap(),
        chesscore::Square::from_algebraic("g1").unwrap(),
    ));
    assert_eq!(board.san(castle_king_side), "O-O");

    board.push(castle_king_side);
    assert_eq!(
        board.to_shredder_fen(EpMode::Fen),
        "3r1k1r/4pp2/8/8/8/8/8/4RRK1 b d - 2 1"
    );
}

#[test]
fn promotion_delivers_check_and_updates_fen() {
    let fen = "8/6P1/2p5/1Pqk4/6P1/2P1RKP1/4P1P1/8 w - - 0 1";
    let mut board = Board::from_fen(fen).unwrap();

    let promote = Move::from_uci("g7g8q").unwrap();
    assert!(board.legal_moves().contains(&promote));
    assert_eq!(board.san(promote), "g8=Q+");

    board.push(promote);
    assert!(board.is_check());
    assert_eq!(
        board.to_fen(EpMode::Fen),
        "6Q1/8/2p5/1Pqk4/6P1/2P1RKP1/4P1P1/8 b - - 0 1"
    );
}

#[test]
fn scholars_mate_reaches_checkmate() {
    let mut board = Board::start_pos();
    for uci in ["e2e4", "e7e5", "d1f3", "b8c6", "f1c4", "a8b8", "f3f7"] {
        let mv = Move::from_uci(uci).unwrap();
        assert!(board.legal_moves().contains(&mv), "{} should be legal", uci);
        board.push(mv);
    }
    assert!(board.is_checkmate());
    assert_eq!(board.result(), Some("1-0"));
}

#[test]
fn en_passant_pin_is_dropped_from_legal_fen_but_kept_when_unpinned() {
    let pinned = Board::from_fen("1r6/8/8/pP6/8/8/8/1K6 w - a6 0 1").unwrap();
    assert!(!pinned.legal_moves().contains(&Move::from_uci("b5a6").unwrap()));
    assert_eq!(pinned.to_fen(EpMode::Legal), "1r6/8/8/pP6/8/8/8/1K6 w - - 0 1");

    let unpinned = Board::from_fen("8/8/8/pP6/8/8/8/8 w - a6 0 1").unwrap();
    assert!(unpinned.legal_moves().contains(&Move::from_uci("b5a6").unwrap()));
    assert_eq!(unpinned.to_fen(EpMode::Legal), "8/8/8/pP6/8/8/8/8 w - a6 0 1");
}

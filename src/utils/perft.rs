use crate::board::Board;

/******************************************\
|==========================================|
|                  Perft                   |
|==========================================|
\******************************************/

/// Counts the leaf nodes of the legal move tree to `depth`.
///
/// Standard correctness oracle for the generator and the applier: the counts
/// for well-known positions are published and any mismatch pinpoints a rules
/// bug.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves.iter() {
        let undo = board.apply(mv);
        nodes += perft(board, depth - 1);
        board.revert(mv, undo);
    }

    nodes
}

/// Per-move node breakdown at the root, matching the output format most
/// engines use for debugging generator mismatches.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();

    for mv in board.legal_moves().iter() {
        let undo = board.apply(mv);
        let nodes = match depth {
            0 | 1 => 1,
            _ => perft(board, depth - 1),
        };
        board.revert(mv, undo);
        results.push((mv.to_string(), nodes));
    }

    results
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

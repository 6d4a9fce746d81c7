// Connect4EngineRust, a strong solver for the connect-4 board game.
// Copyright (C) 2023 Derick Tseng
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use log::trace;

use crate::cache::{CacheEntry, CacheKey, TranspositionTable};
use crate::moves;
use crate::position::{Outcome, Position};

/// Bounded-depth alpha-beta (negamax-style, P-player generalized) search
/// with an LRU-bounded transposition cache. Emits a triple
/// `(magnitude, expected_winner, chosen_column)` for the position's mover.
///
/// `magnitude` is a non-negative distance-to-terminal in plies, except for
/// the hard-cutoff branch of the upper-bound pruning step, which returns
/// the (possibly not meaningfully signed) pruning bound verbatim — the
/// caller only ever uses that branch's result for pruning, never as a
/// decided outcome.
#[derive(Debug)]
pub struct Evaluator {
    cache: TranspositionTable,
}

impl Evaluator {
    pub fn new(cache_capacity: usize) -> Self {
        Self { cache: TranspositionTable::new(cache_capacity) }
    }

    /// Required whenever `Configuration` changes (board size, K, P).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Runs the search from `position` and returns the chosen column. Makes
    /// and unmakes moves on `position` directly; `position` is bitwise
    /// identical on return. Panics if `position` is already terminal — the
    /// caller should not have invoked the evaluator on a finished game.
    pub fn choose_move(
        &mut self,
        position: &mut Position,
        depth: i32,
        alpha0: i64,
        beta0: i64,
    ) -> (i64, u32, u32) {
        assert!(alpha0 < beta0, "evaluator requires alpha0 < beta0 on entry");
        assert!(
            !position.has_winner() && !position.is_full(),
            "choose_move called on an already-terminal position"
        );

        // depth 0 means the search budget is exhausted before the node can
        // even recurse; search_node's own budget check would hand back no
        // column at all, so the root still runs the immediate-terminal scan
        // and otherwise falls back to the first center-out legal column.
        if depth == 0 {
            if let Some(result) = Self::immediate_terminal_scan(position) {
                return result;
            }
            let col = moves::center_out_order(position.cfg().cols)
                .into_iter()
                .find(|&c| position.heights()[c as usize] < position.cfg().rows)
                .expect("search must select a legal column for a non-terminal position");
            return (0, 0, col);
        }

        let (magnitude, winner, column) = self.explore(position, depth, alpha0, beta0);
        let column = column.expect("search must select a legal column for a non-terminal position");
        (magnitude, winner, column)
    }

    /// Step 2 of the search procedure: take any immediately available win
    /// outright, or report a draw if the only legal replies fill the board
    /// without one. `None` means no column here is immediately terminal.
    fn immediate_terminal_scan(position: &mut Position) -> Option<(i64, u32, u32)> {
        let cells = position.cfg().cells() as i64;
        for col in moves::left_to_right_order(position.cfg().cols) {
            match position.place(col) {
                Ok(Outcome::Win(winner)) => {
                    let moves_at_win = position.total_moves() as i64;
                    position.undo(col);
                    return Some((cells - moves_at_win, winner, col));
                }
                Ok(Outcome::Draw) => {
                    position.undo(col);
                    return Some((0, 0, col));
                }
                Ok(Outcome::Ok) => {
                    position.undo(col);
                }
                Err(_) => {}
            }
        }
        None
    }

    /// The memoized `explore(key, remaining_depth, alpha, beta) -> (magnitude,
    /// winner, column)` wrapper.
    fn explore(
        &mut self,
        position: &mut Position,
        remaining_depth: i32,
        alpha: i64,
        beta: i64,
    ) -> (i64, u32, Option<u32>) {
        assert!(alpha < beta, "alpha must stay below beta through recursion");

        let cache_key = CacheKey { position_key: position.key(), remaining_depth, alpha, beta };
        if let Some(hit) = self.cache.get(&cache_key) {
            return (hit.magnitude, hit.winner, hit.column);
        }

        let result = self.search_node(position, remaining_depth, alpha, beta);
        self.cache.insert(
            cache_key,
            CacheEntry { magnitude: result.0, winner: result.1, column: result.2 },
        );
        result
    }

    fn search_node(
        &mut self,
        position: &mut Position,
        remaining_depth: i32,
        mut alpha: i64,
        mut beta: i64,
    ) -> (i64, u32, Option<u32>) {
        trace!("visit key={} depth={remaining_depth} alpha={alpha} beta={beta}", position.key());

        // 1. Budget.
        if remaining_depth == 0 {
            return (0, 0, None);
        }

        let cfg = *position.cfg();
        let cells = cfg.cells() as i64;
        let mover = position.turn();

        // 2. Immediate-terminal scan, left to right: take any win outright,
        // and a draw must be the only legal move if it arises here.
        if let Some((magnitude, winner, col)) = Self::immediate_terminal_scan(position) {
            return (magnitude, winner, Some(col));
        }

        // 3. Upper-bound pruning: the fastest further win needs at least
        // `players` more placements after this turn round-trips.
        let bound = (cells - position.total_moves() as i64) - cfg.players as i64;
        beta = beta.min(bound);
        if alpha >= beta {
            return (beta, 0, None);
        }

        // 4. Recursive expansion, center-out.
        let child_depth = if remaining_depth == -1 { -1 } else { remaining_depth - 1 };

        let mut best_score = i64::MIN / 2;
        let mut best_winner = 0u32;
        let mut best_col = None;

        for col in moves::center_out_order(cfg.cols) {
            let outcome = match position.place(col) {
                Ok(outcome) => outcome,
                Err(_) => continue,
            };
            debug_assert_eq!(
                outcome,
                Outcome::Ok,
                "step 2 already resolved any immediate win/draw for this node"
            );

            let (child_mag, child_winner, _) = self.explore(position, child_depth, -beta, -alpha);
            position.undo(col);

            let s = if child_winner == mover {
                child_mag
            } else if child_winner == 0 {
                0
            } else {
                -child_mag
            };

            if s > best_score {
                best_score = s;
                best_winner = child_winner;
                best_col = Some(col);
            }
            alpha = alpha.max(s);
            if s >= beta {
                return (s.abs(), child_winner, Some(col));
            }
        }

        // 5.
        (best_score.abs(), best_winner, best_col)
    }
}

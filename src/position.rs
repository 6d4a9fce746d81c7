use crate::bitset::Bitset;
use crate::config::Configuration;
use crate::error::EngineError;
use crate::win;

/// Result of a completed `place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Win(u32),
    Draw,
}

/// The mutable game state: board contents, per-column fill heights, whose
/// turn it is, move count, per-player occupancy bitsets, and a compact
/// mixed-radix position key. Mutation is confined to `place` and `undo`; a
/// `Position` is never shared across threads.
#[derive(Debug, Clone)]
pub struct Position {
    cfg: Configuration,
    heights: Vec<u32>,
    turn: u32,
    total_moves: u32,
    /// `occupancy[0]` is unused (0 means "empty"); players are 1..=P.
    occupancy: Vec<Bitset>,
    key: u128,
    /// `weights[idx]` is `(P+1)^idx`, precomputed once per configuration.
    weights: Vec<u128>,
}

impl Position {
    /// Constructs an empty position: key = 0, all heights 0, turn = 0
    /// ("uninitialized / pre-first-turn"). Callers that start a fresh game
    /// advance `turn` to 1 via [`Position::begin`].
    pub fn new(cfg: Configuration) -> Self {
        let cells = cfg.cells() as usize;
        let radix = cfg.players as u128 + 1;
        let mut weights = Vec::with_capacity(cells);
        let mut acc: u128 = 1;
        for _ in 0..cells {
            weights.push(acc);
            acc *= radix;
        }

        Self {
            cfg,
            heights: vec![0; cfg.cols as usize],
            turn: 0,
            total_moves: 0,
            occupancy: (0..=cfg.players).map(|_| Bitset::new(cells)).collect(),
            key: 0,
            weights,
        }
    }

    /// Moves a freshly constructed position out of the "pre-first-turn"
    /// state into player 1 to move. No-op if already past turn 0.
    pub fn begin(&mut self) {
        if self.turn == 0 {
            self.turn = 1;
        }
    }

    /// Reconstructs a position from a resumable `(key, heights, turn)`
    /// triple by walking the board and rebuilding occupancies and
    /// `total_moves` from the key's mixed-radix digits.
    pub fn from_state(cfg: Configuration, key: u128, heights: Vec<u32>, turn: u32) -> Result<Self, EngineError> {
        if heights.len() != cfg.cols as usize {
            return Err(EngineError::ConfigInvalid {
                reason: "heights length must equal the configured column count".into(),
            });
        }
        if turn == 0 || turn > cfg.players {
            return Err(EngineError::ConfigInvalid { reason: "turn must be in 1..=players".into() });
        }

        let mut pos = Position::new(cfg);
        pos.heights = heights;
        pos.turn = turn;
        pos.key = key;
        pos.total_moves = pos.heights.iter().sum();

        for row in 0..cfg.rows {
            for col in 0..cfg.cols {
                let idx = (row * cfg.cols + col) as usize;
                let digit = ((key / pos.weights[idx]) % (cfg.players as u128 + 1)) as u32;
                if digit != 0 {
                    pos.occupancy[digit as usize].set(idx);
                }
            }
        }

        Ok(pos)
    }

    /// Drops a piece into `col`. Returns `Err(InvalidMove)` without mutation
    /// if the column is out of range or full.
    pub fn place(&mut self, col: u32) -> Result<Outcome, EngineError> {
        if col >= self.cfg.cols || self.heights[col as usize] == self.cfg.rows {
            return Err(EngineError::InvalidMove { col: col as u8 });
        }

        let mover = self.turn;
        let row = self.cfg.rows - self.heights[col as usize] - 1;
        let idx = (row * self.cfg.cols + col) as usize;

        self.occupancy[mover as usize].set(idx);
        self.key += mover as u128 * self.weights[idx];
        self.heights[col as usize] += 1;
        self.total_moves += 1;

        if win::has_connect_through(
            &self.occupancy[mover as usize],
            row as i32,
            col as i32,
            self.cfg.rows as i32,
            self.cfg.cols as i32,
            self.cfg.connect,
        ) {
            return Ok(Outcome::Win(mover));
        }
        if self.total_moves == self.cfg.cells() {
            return Ok(Outcome::Draw);
        }

        self.turn = (self.turn % self.cfg.players) + 1;
        Ok(Outcome::Ok)
    }

    /// Reverses the last `place` in `col`. Preconditions: `heights[col] > 0`
    /// and the last move placed in `col`. Valid to call even after a `place`
    /// that returned `Win`/`Draw` — `turn` afterwards points at the player
    /// who had just moved, matching make/unmake discipline used by search.
    pub fn undo(&mut self, col: u32) {
        debug_assert!(self.heights[col as usize] > 0, "undo called on an empty column");

        // the vacated cell is the top of the current stack in this column.
        let row = self.cfg.rows - self.heights[col as usize];
        let idx = (row * self.cfg.cols + col) as usize;

        let prior = if self.turn == 1 { self.cfg.players } else { self.turn - 1 };

        self.occupancy[prior as usize].clear(idx);
        self.key -= prior as u128 * self.weights[idx];
        self.heights[col as usize] -= 1;
        self.total_moves -= 1;
        self.turn = prior;
    }

    pub fn tile(&self, row: u32, col: u32) -> u32 {
        let idx = (row * self.cfg.cols + col) as usize;
        ((self.key / self.weights[idx]) % (self.cfg.players as u128 + 1)) as u32
    }

    /// Materialized row-major snapshot, `board[row][col]`, for front-ends.
    pub fn board(&self) -> Vec<Vec<u32>> {
        (0..self.cfg.rows)
            .map(|r| (0..self.cfg.cols).map(|c| self.tile(r, c)).collect())
            .collect()
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn occupancy(&self, player: u32) -> &Bitset {
        &self.occupancy[player as usize]
    }

    pub fn key(&self) -> u128 {
        self.key
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn cfg(&self) -> &Configuration {
        &self.cfg
    }

    pub fn is_full(&self) -> bool {
        self.total_moves == self.cfg.cells()
    }

    /// `true` if any player currently has a completed connect-`K` run
    /// anywhere on the board. Used to sanity-check reconstructed positions;
    /// the hot path in `place` checks only the cell just placed.
    pub fn has_winner(&self) -> bool {
        for p in 1..=self.cfg.players {
            for row in 0..self.cfg.rows {
                for col in 0..self.cfg.cols {
                    if self.occupancy[p as usize].get((row * self.cfg.cols + col) as usize)
                        && win::has_connect_through(
                            &self.occupancy[p as usize],
                            row as i32,
                            col as i32,
                            self.cfg.rows as i32,
                            self.cfg.cols as i32,
                            self.cfg.connect,
                        )
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}

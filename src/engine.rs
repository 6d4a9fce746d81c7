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

use std::collections::HashMap;

use log::{debug, info};

use crate::bot::{BotHandle, ChooseMove};
use crate::config::Configuration;
use crate::error::EngineError;
use crate::position::{Outcome, Position};

/// Who the `Engine` is waiting on next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitHuman,
    AwaitBot,
    GameOver,
}

/// The decided result once `state()` reaches `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(u32),
    Draw,
}

/// Notifications a front-end implements to drive a UI off engine events.
/// The core never performs async work itself; a host loop owns scheduling,
/// including the "call `choose_and_apply` again" step after a bot moves.
pub trait EngineCallbacks {
    fn on_turn_changed(&mut self, _player: u32, _is_bot: bool) {}
    fn on_tile_placed(&mut self, _row: u32, _col: u32, _player: u32) {}
    fn on_game_over(&mut self, _outcome: GameOutcome) {}
}

/// No-op callbacks for headless use: batch evaluation, tests, `bench`.
#[derive(Debug, Default)]
pub struct NullCallbacks;
impl EngineCallbacks for NullCallbacks {}

/// The cooperative single-threaded state machine wrapping a `Position` and
/// a registry of bots bound to player numbers. Generalizes the teacher's
/// inline `play_position` loop — hardcoded to two players, one of them
/// always a search bot — into an explicit `AwaitHuman` / `AwaitBot` /
/// `GameOver` machine over an arbitrary player count and bot assignment.
pub struct Engine {
    cfg: Configuration,
    position: Position,
    bots: HashMap<u32, BotHandle>,
    state: GameState,
    last_outcome: Option<GameOutcome>,
    callbacks: Box<dyn EngineCallbacks>,
    in_choose_and_apply: bool,
}

impl Engine {
    /// `initial_state`, when given, resumes a position via
    /// [`Position::from_state`] instead of starting a fresh game.
    pub fn new(
        cfg: Configuration,
        bots: HashMap<u32, BotHandle>,
        initial_state: Option<(u128, Vec<u32>, u32)>,
        callbacks: Box<dyn EngineCallbacks>,
    ) -> Result<Self, EngineError> {
        let position = match initial_state {
            Some((key, heights, turn)) => Position::from_state(cfg, key, heights, turn)?,
            None => {
                let mut p = Position::new(cfg);
                p.begin();
                p
            }
        };

        let state = Self::state_for(&position, &bots);
        info!("engine starting: {} players, turn {}", cfg.players, position.turn());

        Ok(Self {
            cfg,
            position,
            bots,
            state,
            last_outcome: None,
            callbacks,
            in_choose_and_apply: false,
        })
    }

    fn state_for(position: &Position, bots: &HashMap<u32, BotHandle>) -> GameState {
        if position.has_winner() || position.is_full() {
            GameState::GameOver
        } else if bots.contains_key(&position.turn()) {
            GameState::AwaitBot
        } else {
            GameState::AwaitHuman
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_turn(&self) -> u32 {
        self.position.turn()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.last_outcome
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn cfg(&self) -> &Configuration {
        &self.cfg
    }

    fn row_of_last_drop(&self, col: u32) -> u32 {
        self.cfg.rows - self.position.heights()[col as usize]
    }

    /// Applies a human (or externally supplied) move. Returns
    /// `Err(GameOver)` without mutation if the game has already ended, and
    /// `Err(InvalidMove)` without mutation if `col` is out of range or full.
    pub fn apply(&mut self, col: u32) -> Result<Outcome, EngineError> {
        if self.state == GameState::GameOver {
            return Err(EngineError::GameOver);
        }

        let mover = self.position.turn();
        let outcome = self.position.place(col)?;
        let row = self.row_of_last_drop(col);
        debug!("player {mover} placed in column {col} (row {row})");
        self.callbacks.on_tile_placed(row, col, mover);

        match outcome {
            Outcome::Win(winner) => {
                self.last_outcome = Some(GameOutcome::Win(winner));
                self.state = GameState::GameOver;
                info!("player {winner} wins");
                self.callbacks.on_game_over(GameOutcome::Win(winner));
            }
            Outcome::Draw => {
                self.last_outcome = Some(GameOutcome::Draw);
                self.state = GameState::GameOver;
                info!("game drawn");
                self.callbacks.on_game_over(GameOutcome::Draw);
            }
            Outcome::Ok => {
                let next = self.position.turn();
                let next_is_bot = self.bots.contains_key(&next);
                self.state = if next_is_bot { GameState::AwaitBot } else { GameState::AwaitHuman };
                self.callbacks.on_turn_changed(next, next_is_bot);
            }
        }

        Ok(outcome)
    }

    /// Invokes the bot bound to the current mover on a read-only snapshot
    /// of the position, then applies its chosen column. Not reentrant: a
    /// callback that calls back into `choose_and_apply` is a programming
    /// error and panics immediately rather than corrupting search state.
    ///
    /// A bot returning an illegal column is `BotContractViolated`, a fatal
    /// bug surfaced by panic rather than a recoverable `Result` — distinct
    /// from `InvalidMove`, which reports a caller's own bad input.
    pub fn choose_and_apply(&mut self) -> Outcome {
        assert!(!self.in_choose_and_apply, "choose_and_apply must not be entered reentrantly");
        assert_eq!(self.state, GameState::AwaitBot, "choose_and_apply called while not awaiting a bot");
        self.in_choose_and_apply = true;

        let mover = self.position.turn();
        let snapshot = self.position.clone();
        let col = {
            let bot = self
                .bots
                .get_mut(&mover)
                .expect("AwaitBot state implies a bot is bound to the current mover");
            bot.choose_move(&snapshot)
        };

        let result = self.apply(col);
        self.in_choose_and_apply = false;

        match result {
            Ok(outcome) => outcome,
            Err(_) => panic!("{}", EngineError::BotContractViolated { col: col as u8 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotPreset;

    fn cfg() -> Configuration {
        Configuration::new(7, 6, 4, 2, 4, i64::MIN, i64::MAX, 1 << 12).unwrap()
    }

    #[test]
    fn fresh_game_with_no_bots_awaits_human() {
        let engine = Engine::new(cfg(), HashMap::new(), None, Box::new(NullCallbacks)).unwrap();
        assert_eq!(engine.state(), GameState::AwaitHuman);
        assert_eq!(engine.current_turn(), 1);
    }

    #[test]
    fn bot_bound_to_first_mover_awaits_bot() {
        let mut bots = HashMap::new();
        bots.insert(1, BotHandle::from_preset(BotPreset::Random, 0));
        let engine = Engine::new(cfg(), bots, None, Box::new(NullCallbacks)).unwrap();
        assert_eq!(engine.state(), GameState::AwaitBot);
    }

    #[test]
    fn choose_and_apply_advances_turn() {
        let mut bots = HashMap::new();
        bots.insert(1, BotHandle::from_preset(BotPreset::Random, 0));
        let mut engine = Engine::new(cfg(), bots, None, Box::new(NullCallbacks)).unwrap();
        engine.choose_and_apply();
        assert_eq!(engine.state(), GameState::AwaitHuman);
        assert_eq!(engine.current_turn(), 2);
    }

    #[test]
    fn apply_rejects_moves_after_game_over() {
        let mut engine = Engine::new(cfg(), HashMap::new(), None, Box::new(NullCallbacks)).unwrap();
        for c in [0, 0, 1, 1, 2, 2] {
            engine.apply(c).unwrap();
        }
        assert_eq!(engine.state(), GameState::GameOver);
        assert_eq!(engine.outcome(), Some(GameOutcome::Win(1)));
        assert_eq!(engine.apply(3), Err(EngineError::GameOver));
    }

    #[test]
    fn apply_rejects_out_of_range_column() {
        let mut engine = Engine::new(cfg(), HashMap::new(), None, Box::new(NullCallbacks)).unwrap();
        assert_eq!(engine.apply(99), Err(EngineError::InvalidMove { col: 99 }));
    }
}

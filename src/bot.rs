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

use rand::seq::SliceRandom;

use crate::config::BotPreset;
use crate::evaluator::Evaluator;
use crate::position::Position;

/// The bot-side contract: pick a column from a read-only snapshot of the
/// current position. Dynamic dispatch over bot kinds is modeled as a
/// tagged variant (`BotHandle`) rather than a trait-object hierarchy, since
/// the only state a bot carries beyond its parameters is a PRNG (random) or
/// a transposition cache (search).
pub trait ChooseMove {
    fn choose_move(&mut self, position: &Position) -> u32;
}

/// Plays a uniformly random legal column. Carries no state beyond the
/// thread-local PRNG it draws from at call time.
#[derive(Debug, Default)]
pub struct RandomBot;

impl ChooseMove for RandomBot {
    fn choose_move(&mut self, position: &Position) -> u32 {
        let cols = position.cfg().cols;
        let rows = position.cfg().rows;
        let legal: Vec<u32> =
            (0..cols).filter(|&c| position.heights()[c as usize] < rows).collect();
        *legal
            .choose(&mut rand::thread_rng())
            .expect("choose_move called on a position with no legal column")
    }
}

/// `"strong d"` / `"strong unlimited"` / `"weak d"` / `"weak unlimited"`:
/// depth-limited or unbounded alpha-beta, full window or the (-1, 1) window
/// that resolves win/draw/loss without score magnitude.
#[derive(Debug)]
pub struct SearchBot {
    evaluator: Evaluator,
    depth: i32,
    alpha0: i64,
    beta0: i64,
}

impl SearchBot {
    pub fn new(cache_capacity: usize, depth: i32, alpha0: i64, beta0: i64) -> Self {
        Self { evaluator: Evaluator::new(cache_capacity), depth, alpha0, beta0 }
    }
}

impl ChooseMove for SearchBot {
    fn choose_move(&mut self, position: &Position) -> u32 {
        let mut working = position.clone();
        let (_, _, col) = self.evaluator.choose_move(&mut working, self.depth, self.alpha0, self.beta0);
        col
    }
}

/// A bound bot instance. Each `Engine` instantiates its own, so caches are
/// never shared across games of different shapes.
#[derive(Debug)]
pub enum BotHandle {
    Random(RandomBot),
    Search(SearchBot),
}

impl BotHandle {
    pub fn from_preset(preset: BotPreset, cache_capacity: usize) -> Self {
        match preset {
            BotPreset::Random => BotHandle::Random(RandomBot),
            BotPreset::Strong { depth } => {
                BotHandle::Search(SearchBot::new(cache_capacity, depth, i64::MIN, i64::MAX))
            }
            BotPreset::Weak { depth } => {
                BotHandle::Search(SearchBot::new(cache_capacity, depth, -1, 1))
            }
        }
    }
}

impl ChooseMove for BotHandle {
    fn choose_move(&mut self, position: &Position) -> u32 {
        match self {
            BotHandle::Random(b) => b.choose_move(position),
            BotHandle::Search(b) => b.choose_move(position),
        }
    }
}

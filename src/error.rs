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

use thiserror::Error;

/// User-facing failures surfaced by the engine. Internal consistency
/// failures (cache corruption, unmake mismatch) are programmer errors and
/// are raised via `panic!`/`debug_assert!` instead, per the engine's
/// failure semantics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("column {col} is full or out of range")]
    InvalidMove { col: u8 },

    #[error("move attempted after the game is already over")]
    GameOver,

    #[error("invalid configuration: {reason}")]
    ConfigInvalid { reason: String },

    #[error("bot returned column {col}, which is not legal in the current position")]
    BotContractViolated { col: u8 },
}

pub type Result<T> = std::result::Result<T, EngineError>;

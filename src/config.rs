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

use std::str::FromStr;

use crate::error::EngineError;

/// Unbounded search depth: recurse to terminal positions (or cache hits).
pub const UNBOUNDED_DEPTH: i32 = -1;

/// Immutable search/board parameters. Any change requires rebuilding the
/// `Engine` (and clearing the `Evaluator`'s transposition cache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub cols: u32,
    pub rows: u32,
    pub connect: u32,
    pub players: u32,
    pub depth: i32,
    pub alpha0: i64,
    pub beta0: i64,
    pub cache_capacity: usize,
}

impl Configuration {
    /// `alpha0`/`beta0` of `(i64::MIN, i64::MAX)` mean the strong solver's
    /// unbounded window; `(-1, 1)` is the weak solver's win/draw/loss-only
    /// window.
    pub fn new(
        cols: u32,
        rows: u32,
        connect: u32,
        players: u32,
        depth: i32,
        alpha0: i64,
        beta0: i64,
        cache_capacity: usize,
    ) -> Result<Self, EngineError> {
        if cols < 2 {
            return Err(EngineError::ConfigInvalid { reason: "cols must be >= 2".into() });
        }
        if rows < 2 {
            return Err(EngineError::ConfigInvalid { reason: "rows must be >= 2".into() });
        }
        if players < 2 {
            return Err(EngineError::ConfigInvalid { reason: "players must be >= 2".into() });
        }
        if connect < 2 || connect as u64 > cols.max(rows) as u64 {
            return Err(EngineError::ConfigInvalid {
                reason: "connect must satisfy 2 <= connect <= max(cols, rows)".into(),
            });
        }
        if depth < UNBOUNDED_DEPTH {
            return Err(EngineError::ConfigInvalid { reason: "depth must be -1 or >= 0".into() });
        }
        if alpha0 >= beta0 {
            return Err(EngineError::ConfigInvalid { reason: "alpha0 must be < beta0".into() });
        }
        // the position key is a base-(players+1) mixed-radix integer with
        // (cols*rows) digits; reject configurations whose key would not fit
        // in a u128 rather than silently wrapping.
        let cells = cols as u64 * rows as u64;
        let radix = players as u128 + 1;
        let mut max_key: u128 = 0;
        for _ in 0..cells {
            max_key = match max_key.checked_mul(radix).and_then(|v| v.checked_add(radix - 1)) {
                Some(v) => v,
                None => {
                    return Err(EngineError::ConfigInvalid {
                        reason: "board is too large for the position key to fit in a u128".into(),
                    })
                }
            };
        }

        Ok(Self { cols, rows, connect, players, depth, alpha0, beta0, cache_capacity })
    }

    pub fn cells(&self) -> u32 {
        self.cols * self.rows
    }
}

/// A named bot parameterization from the registry of §6: `"random"`,
/// `"strong d"`, `"strong unlimited"`, `"weak d"`, `"weak unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotPreset {
    Random,
    Strong { depth: i32 },
    Weak { depth: i32 },
}

impl BotPreset {
    pub fn is_weak(&self) -> bool {
        matches!(self, BotPreset::Weak { .. })
    }

    pub fn depth(&self) -> i32 {
        match self {
            BotPreset::Random => 0,
            BotPreset::Strong { depth } | BotPreset::Weak { depth } => *depth,
        }
    }
}

impl FromStr for BotPreset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let kind = parts.next().unwrap_or("");
        let rest = parts.next();

        let parse_depth = |rest: Option<&str>| -> Result<i32, EngineError> {
            match rest {
                Some("unlimited") => Ok(UNBOUNDED_DEPTH),
                Some(n) => n.parse::<i32>().map_err(|_| EngineError::ConfigInvalid {
                    reason: format!("invalid depth '{n}' in bot preset"),
                }),
                None => Err(EngineError::ConfigInvalid {
                    reason: "missing depth in bot preset".into(),
                }),
            }
        };

        match kind {
            "random" => Ok(BotPreset::Random),
            "strong" => Ok(BotPreset::Strong { depth: parse_depth(rest)? }),
            "weak" => Ok(BotPreset::Weak { depth: parse_depth(rest)? }),
            _ => Err(EngineError::ConfigInvalid { reason: format!("unknown bot preset '{s}'") }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_boards() {
        assert!(Configuration::new(1, 6, 4, 2, -1, i64::MIN, i64::MAX, 0).is_err());
        assert!(Configuration::new(7, 6, 1, 2, -1, i64::MIN, i64::MAX, 0).is_err());
        assert!(Configuration::new(7, 6, 4, 1, -1, i64::MIN, i64::MAX, 0).is_err());
        assert!(Configuration::new(7, 6, 4, 2, -2, i64::MIN, i64::MAX, 0).is_err());
        assert!(Configuration::new(7, 6, 4, 2, -1, 1, -1, 0).is_err());
    }

    #[test]
    fn accepts_classic_connect_four() {
        let cfg = Configuration::new(7, 6, 4, 2, -1, i64::MIN, i64::MAX, 1 << 20).unwrap();
        assert_eq!(cfg.cells(), 42);
    }

    #[test]
    fn parses_bot_presets() {
        assert_eq!("random".parse::<BotPreset>().unwrap(), BotPreset::Random);
        assert_eq!("strong 11".parse::<BotPreset>().unwrap(), BotPreset::Strong { depth: 11 });
        assert_eq!(
            "strong unlimited".parse::<BotPreset>().unwrap(),
            BotPreset::Strong { depth: UNBOUNDED_DEPTH }
        );
        assert_eq!("weak 13".parse::<BotPreset>().unwrap(), BotPreset::Weak { depth: 13 });
        assert!("bogus".parse::<BotPreset>().is_err());
    }
}

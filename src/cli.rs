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
use std::fs;
use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::bot::{BotHandle, ChooseMove};
use crate::config::{BotPreset, Configuration};
use crate::engine::{Engine, EngineCallbacks, GameOutcome, GameState};
use crate::position::{Outcome, Position};

#[derive(Parser, Debug)]
#[command(name = "connectn", about = "A generalized Connect-N engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively against a bot over stdin/stdout.
    Play(PlayArgs),
    /// Evaluate a single position and print the chosen column and score.
    Eval(EvalArgs),
    /// Self-play two configured bots from the empty board and report the log.
    Bench(BenchArgs),
    /// Batch-evaluate a file of recorded positions.
    Test {
        file: String,
        #[command(flatten)]
        board: BoardArgs,
    },
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[arg(long, default_value_t = 7)]
    pub cols: u32,
    #[arg(long, default_value_t = 6)]
    pub rows: u32,
    #[arg(long, default_value_t = 4)]
    pub connect: u32,
    #[arg(long, default_value_t = 2)]
    pub players: u32,
    #[arg(long, default_value_t = 1 << 20)]
    pub cache_capacity: usize,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,
    /// `player=preset` pairs, e.g. `2=strong 12`. Players without an entry
    /// are human-driven over stdin.
    #[arg(long = "bot")]
    pub bots: Vec<String>,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub board: BoardArgs,
    /// Moves played so far, as a space-separated column sequence.
    #[arg(long, value_delimiter = ' ')]
    pub moves: Vec<u32>,
    #[arg(long, default_value = "strong unlimited")]
    pub preset: String,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[command(flatten)]
    pub board: BoardArgs,
    #[arg(long, default_value = "strong 10")]
    pub first: String,
    #[arg(long, default_value = "strong 10")]
    pub second: String,
}

fn parse_bot_binding(s: &str) -> Result<(u32, String)> {
    let (player, preset) = s.split_once('=').with_context(|| format!("expected player=preset, got '{s}'"))?;
    let player: u32 = player.parse().with_context(|| format!("invalid player number '{player}'"))?;
    Ok((player, preset.to_string()))
}

fn board_configuration(board: &BoardArgs, depth: i32, alpha0: i64, beta0: i64) -> Result<Configuration> {
    Configuration::new(board.cols, board.rows, board.connect, board.players, depth, alpha0, beta0, board.cache_capacity)
        .context("invalid board configuration")
}

struct StdoutCallbacks;

impl EngineCallbacks for StdoutCallbacks {
    fn on_tile_placed(&mut self, row: u32, col: u32, player: u32) {
        println!("player {player} -> column {col} (row {row})");
    }

    fn on_turn_changed(&mut self, player: u32, is_bot: bool) {
        info!("turn now with player {player} (bot = {is_bot})");
    }

    fn on_game_over(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(p) => println!("player {p} wins"),
            GameOutcome::Draw => println!("draw"),
        }
    }
}

fn bot_registry(players: u32, bindings: &[String], cache_capacity: usize) -> Result<HashMap<u32, BotHandle>> {
    let mut bots = HashMap::new();
    for binding in bindings {
        let (player, preset_str) = parse_bot_binding(binding)?;
        if player == 0 || player > players {
            bail!("bot binding for player {player} is out of range 1..={players}");
        }
        let preset = BotPreset::from_str(&preset_str).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        bots.insert(player, BotHandle::from_preset(preset, cache_capacity));
    }
    Ok(bots)
}

pub fn run_play(args: PlayArgs) -> Result<()> {
    let cfg = board_configuration(&args.board, -1, i64::MIN, i64::MAX)?;
    let bots = bot_registry(cfg.players, &args.bots, cfg.cache_capacity)?;
    let mut engine = Engine::new(cfg, bots, None, Box::new(StdoutCallbacks))?;

    loop {
        match engine.state() {
            GameState::GameOver => break,
            GameState::AwaitBot => {
                engine.choose_and_apply();
            }
            GameState::AwaitHuman => {
                print!("player {} > ", engine.current_turn());
                io::stdout().flush().ok();
                let mut line = String::new();
                if io::stdin().read_line(&mut line)? == 0 {
                    bail!("unexpected end of input while awaiting a human move");
                }
                let col: u32 = line.trim().parse().context("column must be a non-negative integer")?;
                match engine.apply(col) {
                    Ok(_) => {}
                    Err(e) => println!("rejected: {e}"),
                }
            }
        }
    }

    Ok(())
}

pub fn run_eval(args: EvalArgs) -> Result<()> {
    let preset = BotPreset::from_str(&args.preset).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let (alpha0, beta0) = preset_window(&preset);
    let cfg = board_configuration(&args.board, preset.depth(), alpha0, beta0)?;

    let mut position = Position::new(cfg);
    position.begin();
    for col in &args.moves {
        match position.place(*col)? {
            Outcome::Ok => {}
            other => bail!("move sequence already decided the game: {other:?}"),
        }
    }

    match preset {
        BotPreset::Random => {
            let mut bot = BotHandle::from_preset(preset, cfg.cache_capacity);
            let col = bot.choose_move(&position);
            println!("chosen column: {col}");
        }
        BotPreset::Strong { .. } | BotPreset::Weak { .. } => {
            let mut evaluator = crate::evaluator::Evaluator::new(cfg.cache_capacity);
            let (magnitude, winner, col) = evaluator.choose_move(&mut position, cfg.depth, cfg.alpha0, cfg.beta0);
            println!("chosen column: {col}, score: {magnitude}, expected winner: {winner}");
        }
    }
    Ok(())
}

fn preset_window(preset: &BotPreset) -> (i64, i64) {
    if preset.is_weak() {
        (-1, 1)
    } else {
        (i64::MIN, i64::MAX)
    }
}

pub fn run_bench(args: BenchArgs) -> Result<()> {
    let first = BotPreset::from_str(&args.first).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let second = BotPreset::from_str(&args.second).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let cfg = board_configuration(&args.board, -1, i64::MIN, i64::MAX)?;

    let mut bots = HashMap::new();
    bots.insert(1, BotHandle::from_preset(first, cfg.cache_capacity));
    bots.insert(2, BotHandle::from_preset(second, cfg.cache_capacity));

    let mut engine = Engine::new(cfg, bots, None, Box::new(StdoutCallbacks))?;
    while engine.state() != GameState::GameOver {
        engine.choose_and_apply();
    }

    match engine.outcome() {
        Some(GameOutcome::Win(p)) => println!("result: player {p} wins"),
        Some(GameOutcome::Draw) => println!("result: draw"),
        None => unreachable!("engine reached GameOver with no recorded outcome"),
    }
    Ok(())
}

/// Each non-blank, non-`#`-prefixed line of `file` is a recorded position:
/// a space-separated move sequence from the empty board, then `|`, then
/// the expected evaluator outcome as `win <player>` or `draw`.
pub fn run_test(file: &str, board: &BoardArgs) -> Result<()> {
    let cfg = board_configuration(board, -1, i64::MIN, i64::MAX)?;
    let contents = fs::read_to_string(file).with_context(|| format!("reading test file '{file}'"))?;

    let mut total = 0;
    let mut passed = 0;

    for (lineno, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        total += 1;

        let (moves_str, expected_str) = line
            .split_once('|')
            .with_context(|| format!("line {}: expected 'moves | expected'", lineno + 1))?;

        let mut position = Position::new(cfg);
        position.begin();
        for tok in moves_str.split_whitespace() {
            let col: u32 = tok.parse().with_context(|| format!("line {}: bad column '{tok}'", lineno + 1))?;
            position.place(col)?;
        }

        let mut eval = crate::evaluator::Evaluator::new(cfg.cache_capacity);
        let (_, winner, _) = eval.choose_move(&mut position, cfg.depth, cfg.alpha0, cfg.beta0);

        let expected = expected_str.trim();
        let matches = if expected == "draw" {
            winner == 0
        } else if let Some(p) = expected.strip_prefix("win ") {
            p.trim().parse::<u32>().map(|p| p == winner).unwrap_or(false)
        } else {
            false
        };

        if matches {
            passed += 1;
        } else {
            println!("line {}: FAIL (expected {expected}, got winner {winner})", lineno + 1);
        }
    }

    println!("{passed}/{total} passed");
    if passed != total {
        bail!("{} of {} test positions failed", total - passed, total);
    }
    Ok(())
}

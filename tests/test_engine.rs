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

use connectn::bot::BotHandle;
use connectn::config::{BotPreset, Configuration};
use connectn::engine::{Engine, GameOutcome, GameState, NullCallbacks};
use connectn::error::EngineError;

fn classic_cfg() -> Configuration {
    Configuration::new(7, 6, 4, 2, 6, i64::MIN, i64::MAX, 1 << 14).unwrap()
}

#[test]
fn two_random_bots_always_finish_the_game() {
    for _ in 0..10 {
        let mut bots = HashMap::new();
        bots.insert(1, BotHandle::from_preset(BotPreset::Random, 0));
        bots.insert(2, BotHandle::from_preset(BotPreset::Random, 0));
        let mut engine = Engine::new(classic_cfg(), bots, None, Box::new(NullCallbacks)).unwrap();

        let mut plies = 0;
        while engine.state() != GameState::GameOver {
            engine.choose_and_apply();
            plies += 1;
            assert!(plies <= 42, "game exceeded the board's cell count without terminating");
        }

        assert!(engine.outcome().is_some());
    }
}

#[test]
fn human_driven_game_rejects_out_of_turn_illegal_columns() {
    let mut engine = Engine::new(classic_cfg(), HashMap::new(), None, Box::new(NullCallbacks)).unwrap();
    assert_eq!(engine.state(), GameState::AwaitHuman);

    assert_eq!(engine.apply(100), Err(EngineError::InvalidMove { col: 100 }));
    assert_eq!(engine.current_turn(), 1);

    for _ in 0..6 {
        engine.apply(0).unwrap();
    }
    assert_eq!(engine.apply(0), Err(EngineError::InvalidMove { col: 0 }));
}

#[test]
fn resuming_from_state_skips_to_the_recorded_turn() {
    let cfg = classic_cfg();
    // player 1 dropped into column 0 (bottom row, idx = 5*7 + 0 = 35);
    // radix is players + 1 = 3, so the key's digit at that index is 1.
    let heights = vec![1, 0, 0, 0, 0, 0, 0];
    let key = 1u128 * 3u128.pow(35);
    let engine = Engine::new(cfg, HashMap::new(), Some((key, heights, 2)), Box::new(NullCallbacks)).unwrap();
    assert_eq!(engine.current_turn(), 2);
    assert_eq!(engine.state(), GameState::AwaitHuman);
    assert_eq!(engine.position().tile(5, 0), 1);
}

#[test]
fn full_board_with_no_line_reports_a_draw() {
    // 3x2, connect-3: only a full row can complete a line (the board is
    // too short for a vertical or diagonal run of 3). Filling both rows
    // without ever completing one therefore forces a draw on the last ply.
    let cfg = Configuration::new(3, 2, 3, 2, 4, i64::MIN, i64::MAX, 1 << 10).unwrap();
    let mut engine = Engine::new(cfg, HashMap::new(), None, Box::new(NullCallbacks)).unwrap();

    for c in [0, 1, 2, 0, 1] {
        assert_eq!(engine.apply(c).unwrap(), connectn::position::Outcome::Ok);
    }
    assert_eq!(engine.apply(2).unwrap(), connectn::position::Outcome::Draw);
    assert_eq!(engine.state(), GameState::GameOver);
    assert_eq!(engine.outcome(), Some(GameOutcome::Draw));
}

#[test]
fn a_decided_game_reports_the_winner_through_outcome() {
    let mut engine = Engine::new(classic_cfg(), HashMap::new(), None, Box::new(NullCallbacks)).unwrap();
    for c in [0, 1, 0, 1, 0, 1, 0] {
        engine.apply(c).unwrap();
    }
    assert_eq!(engine.state(), GameState::GameOver);
    assert_eq!(engine.outcome(), Some(GameOutcome::Win(1)));
}

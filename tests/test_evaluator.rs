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

use connectn::config::Configuration;
use connectn::evaluator::Evaluator;
use connectn::position::{Outcome, Position};

#[test]
fn evaluator_takes_an_immediately_available_win() {
    // player 1 has three in a row on columns 0..=2, bottom row; column 3
    // completes it and must be preferred over every other legal move.
    let cfg = Configuration::new(7, 6, 4, 2, 4, i64::MIN, i64::MAX, 1 << 14).unwrap();
    let mut pos = Position::new(cfg);
    pos.begin();
    for c in [0, 4, 1, 4, 2, 5] {
        assert_eq!(pos.place(c).unwrap(), Outcome::Ok);
    }
    assert_eq!(pos.turn(), 1);

    let mut eval = Evaluator::new(cfg.cache_capacity);
    let (magnitude, winner, col) = eval.choose_move(&mut pos, cfg.depth, cfg.alpha0, cfg.beta0);
    assert_eq!(col, 3);
    assert_eq!(winner, 1);
    assert!(magnitude > 0);
}

#[test]
fn evaluator_prefers_the_move_that_both_wins_and_blocks() {
    // player 1 holds columns 4..=6 on the bottom row and player 2 holds
    // 0..=2; column 3 completes player 1's own run of four, which the
    // immediate-terminal scan must find regardless of player 2's threat.
    let cfg = Configuration::new(7, 6, 4, 2, 4, i64::MIN, i64::MAX, 1 << 14).unwrap();
    let mut pos = Position::new(cfg);
    pos.begin();
    for c in [6, 0, 5, 1, 4, 2] {
        assert_eq!(pos.place(c).unwrap(), Outcome::Ok);
    }
    assert_eq!(pos.turn(), 1);

    let mut eval = Evaluator::new(cfg.cache_capacity);
    let (_, winner, col) = eval.choose_move(&mut pos, cfg.depth, cfg.alpha0, cfg.beta0);
    assert_eq!(col, 3);
    assert_eq!(winner, 1);
}

#[test]
fn weak_window_still_finds_the_winning_column() {
    let cfg = Configuration::new(7, 6, 4, 2, 4, -1, 1, 1 << 14).unwrap();
    let mut pos = Position::new(cfg);
    pos.begin();
    for c in [0, 4, 1, 4, 2, 5] {
        pos.place(c).unwrap();
    }

    let mut eval = Evaluator::new(cfg.cache_capacity);
    let (_, winner, col) = eval.choose_move(&mut pos, cfg.depth, cfg.alpha0, cfg.beta0);
    assert_eq!(col, 3);
    assert_eq!(winner, 1);
}

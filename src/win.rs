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

use crate::bitset::Bitset;

/// (dr, dc) direction vectors for the four connect-line axes: vertical,
/// horizontal, and the two diagonals.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Returns true iff placing at `(row, col)` gives `occupancy` a run of at
/// least `connect` contiguous cells along any of the four axes through that
/// cell. Pure function of `occupancy` and `(row, col)`; does not mutate or
/// read anything else.
pub fn has_connect_through(
    occupancy: &Bitset,
    row: i32,
    col: i32,
    rows: i32,
    cols: i32,
    connect: u32,
) -> bool {
    let idx = |r: i32, c: i32| -> usize { (r * cols + c) as usize };
    for (dr, dc) in AXES {
        let mut count = 1u32;

        let mut r = row + dr;
        let mut c = col + dc;
        while r >= 0 && r < rows && c >= 0 && c < cols && occupancy.get(idx(r, c)) {
            count += 1;
            r += dr;
            c += dc;
        }

        let mut r = row - dr;
        let mut c = col - dc;
        while r >= 0 && r < rows && c >= 0 && c < cols && occupancy.get(idx(r, c)) {
            count += 1;
            r -= dr;
            c -= dc;
        }

        if count >= connect {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(i32, i32)], rows: i32, cols: i32) -> Bitset {
        let mut b = Bitset::new((rows * cols) as usize);
        for &(r, c) in cells {
            b.set((r * cols + c) as usize);
        }
        b
    }

    #[test]
    fn detects_horizontal_run() {
        let cells = [(0, 0), (0, 1), (0, 2), (0, 3)];
        let b = board_with(&cells, 6, 7);
        assert!(has_connect_through(&b, 0, 3, 6, 7, 4));
        assert!(has_connect_through(&b, 0, 0, 6, 7, 4));
    }

    #[test]
    fn no_false_positive_short_of_connect(){
        let cells = [(0, 0), (0, 1), (0, 2)];
        let b = board_with(&cells, 6, 7);
        assert!(!has_connect_through(&b, 0, 2, 6, 7, 4));
    }

    #[test]
    fn detects_diagonal_run() {
        let cells = [(0, 0), (1, 1), (2, 2), (3, 3)];
        let b = board_with(&cells, 6, 7);
        assert!(has_connect_through(&b, 2, 2, 6, 7, 4));
    }

    #[test]
    fn respects_board_edges() {
        let cells = [(0, 5), (0, 6)];
        let b = board_with(&cells, 6, 7);
        assert!(!has_connect_through(&b, 0, 6, 6, 7, 4));
    }
}

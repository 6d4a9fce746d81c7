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

/// Column visitation order for the immediate-terminal scan: plain
/// left-to-right, as the search step that looks for an immediate win or
/// draw doesn't benefit from move ordering.
pub fn left_to_right_order(cols: u32) -> Vec<u32> {
    (0..cols).collect()
}

/// Column visitation order for recursive expansion: starting at the
/// board's center and alternating outward. For odd `cols` the exact center
/// column comes first; for even `cols`, `cols/2 - 1` then `cols/2`, then the
/// pair widens by one on each side per step. This generalizes the
/// 7-column `[3, 2, 4, 1, 5, 0, 6]` table to arbitrary board widths.
pub fn center_out_order(cols: u32) -> Vec<u32> {
    let mut order = Vec::with_capacity(cols as usize);
    let c = cols as i64;

    let (left0, right0) = if cols % 2 == 1 {
        let center = (c - 1) / 2;
        order.push(center as u32);
        (center, center)
    } else {
        let left0 = c / 2 - 1;
        let right0 = c / 2;
        order.push(left0 as u32);
        order.push(right0 as u32);
        (left0, right0)
    };

    let mut d = 1;
    loop {
        let l = left0 - d;
        let r = right0 + d;
        let mut pushed = false;
        if l >= 0 {
            order.push(l as u32);
            pushed = true;
        }
        if r < c {
            order.push(r as u32);
            pushed = true;
        }
        if !pushed {
            break;
        }
        d += 1;
    }

    order
}

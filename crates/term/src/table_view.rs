//! Table view - renders a round snapshot into a text frame.
//!
//! Cards draw at the positions reported by the physics substrate, so free
//! cards visibly drift with the tilt while revealed cards sit on their home
//! grid. The view is pure: snapshot + positions in, one frame string out.

use tui_pairs_core::RoundSnapshot;
use tui_pairs_types::Vec2;

use crate::substrate::{Bounds, FieldSubstrate};

/// Card footprint in terminal cells.
pub const CARD_W: usize = 5;
pub const CARD_H: usize = 3;

/// Grid spacing between card homes.
const SPACING_X: f32 = 7.0;
const SPACING_Y: f32 = 4.0;

/// Rows reserved for the HUD above the table.
const HUD_ROWS: usize = 2;

/// Terminal area available for drawing.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Home grid positions for `slot_count` cards, roughly square.
pub fn home_positions(slot_count: usize) -> Vec<Vec2> {
    let cols = (slot_count as f32).sqrt().ceil().max(1.0) as usize;
    (0..slot_count)
        .map(|id| {
            let col = id % cols;
            let row = id / cols;
            Vec2::new(1.0 + col as f32 * SPACING_X, 1.0 + row as f32 * SPACING_Y)
        })
        .collect()
}

/// Table bounds matching the home grid, with drift headroom.
pub fn table_bounds(slot_count: usize) -> Bounds {
    let cols = (slot_count as f32).sqrt().ceil().max(1.0) as usize;
    let rows = slot_count.div_ceil(cols);
    Bounds {
        width: cols as f32 * SPACING_X + 6.0,
        height: rows as f32 * SPACING_Y + 4.0,
    }
}

/// Keyboard hint for a slot, if one is mapped.
fn slot_key(id: usize) -> Option<char> {
    match id {
        0..=8 => Some((b'1' + id as u8) as char),
        9 => Some('0'),
        10..=15 => Some(b"asdfgh"[id - 10] as char),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct TableView;

impl TableView {
    /// Render one frame.
    pub fn render(
        &self,
        snapshot: &RoundSnapshot,
        substrate: &FieldSubstrate,
        viewport: Viewport,
    ) -> String {
        let width = viewport.width as usize;
        let height = viewport.height as usize;
        let mut grid = vec![vec![' '; width]; height];

        // Free cards first; revealed cards draw on top of any drifters.
        for pass in 0..2 {
            for (id, slot) in snapshot.slots.iter().enumerate() {
                if slot.removed {
                    continue;
                }
                let revealed_pass = usize::from(slot.face_up);
                if revealed_pass != pass {
                    continue;
                }

                let pos = substrate.position(id).unwrap_or(Vec2::ZERO);
                let x = pos.x.round().max(0.0) as usize;
                let y = pos.y.round().max(0.0) as usize + HUD_ROWS;

                if slot.face_up {
                    let label =
                        format!("{}{}", slot.card.rank.symbol(), slot.card.suit.symbol());
                    draw_card(&mut grid, x, y, &label, true, None);
                } else {
                    draw_card(&mut grid, x, y, "", false, slot_key(id));
                }
            }
        }

        let mut lines = Vec::with_capacity(height);
        lines.push(hud_line(snapshot, width));
        lines.push(controls_line(snapshot, width));
        for row in grid.into_iter().skip(HUD_ROWS) {
            lines.push(row.into_iter().collect::<String>());
        }
        lines.join("\n")
    }
}

fn hud_line(snapshot: &RoundSnapshot, width: usize) -> String {
    let total_pairs = snapshot.slots.len() / 2;
    let mut line = format!(
        "pairs {}/{}   tilt ({:+.2}, {:+.2})   gravity {}",
        snapshot.matched_pairs,
        total_pairs,
        snapshot.gravity.x,
        snapshot.gravity.y,
        if snapshot.magnitude > 0.0 { "on" } else { "off" },
    );
    if snapshot.over {
        line.push_str("   *** all pairs matched ***");
    }
    line.truncate(width);
    line
}

fn controls_line(_snapshot: &RoundSnapshot, width: usize) -> String {
    let mut line =
        "[1-0 a-h] flip   [arrows] tilt   [r] new deal   [q] quit".to_string();
    line.truncate(width);
    line
}

fn draw_card(grid: &mut [Vec<char>], x: usize, y: usize, label: &str, face_up: bool, key: Option<char>) {
    let height = grid.len();
    if height == 0 {
        return;
    }
    let width = grid[0].len();

    for row in 0..CARD_H {
        for col in 0..CARD_W {
            let gy = y + row;
            let gx = x + col;
            if gy >= height || gx >= width {
                continue;
            }

            let edge_row = row == 0 || row == CARD_H - 1;
            let edge_col = col == 0 || col == CARD_W - 1;
            grid[gy][gx] = match (edge_row, edge_col) {
                (true, true) => '+',
                (true, false) => '-',
                (false, true) => '|',
                (false, false) => {
                    if face_up {
                        ' '
                    } else {
                        '░'
                    }
                }
            };
        }
    }

    // Card face or key hint in the middle row.
    let mid = y + CARD_H / 2;
    if mid >= height {
        return;
    }
    if face_up {
        for (i, ch) in label.chars().take(CARD_W - 2).enumerate() {
            let gx = x + 1 + i;
            if gx < width {
                grid[mid][gx] = ch;
            }
        }
    } else if let Some(key) = key {
        let gx = x + CARD_W / 2;
        if gx < width {
            grid[mid][gx] = key;
        }
    }
}

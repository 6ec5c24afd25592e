use netscramble_core::*;

/// Connectors drawn with light lines, heavy once connected to the root.
fn glyph(mask: Mask, connected: bool) -> char {
    const LIGHT: [char; 16] = [
        '·', '╵', '╷', '│', '╴', '┘', '┐', '┤', '╶', '└', '┌', '├', '─', '┴', '┬', '┼',
    ];
    const HEAVY: [char; 16] = [
        '·', '╹', '╻', '┃', '╸', '┛', '┓', '┫', '╺', '┗', '┏', '┣', '━', '┻', '┳', '╋',
    ];

    match mask {
        Mask::Blocked => ' ',
        Mask::Free => '·',
        Mask::Wired(links) => {
            let index = usize::from(links.bits());
            if connected { HEAVY[index] } else { LIGHT[index] }
        }
    }
}

fn grid(geometry: &BoardGeometry, cell: impl Fn(Coord2) -> char) -> String {
    let (start_x, start_y) = geometry.start();
    let (end_x, end_y) = geometry.end();
    let mut out = String::new();
    for y in start_y..end_y {
        for x in start_x..end_x {
            out.push(cell((x, y)));
        }
        out.push('\n');
    }
    out
}

pub fn board(board: &Board) -> String {
    let mut out = grid(board.geometry(), |coords| {
        let cell = &board[coords];
        glyph(cell.effective_mask(), cell.is_connected())
    });
    if let Some((x, y)) = board.root() {
        out.push_str(&format!("root at ({x}, {y})\n"));
    }
    out
}

pub fn snapshot(solved: &SolvedSnapshot) -> String {
    grid(solved.geometry(), |coords| {
        glyph(solved.mask_at(coords).unwrap_or(Mask::Blocked), true)
    })
}

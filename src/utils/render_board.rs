//! Plain-text board rendering for logs and match output.

use crate::game_state::board::Board;
use crate::game_state::reversi_types::{Color, BOARD_SIZE};

/// Render the position as an ASCII grid, rank 8 on top. Black discs are
/// `X`, white discs `O`, empty squares `·`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for y in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} ", y + 1));
        for x in 0..BOARD_SIZE {
            let glyph = match board.get_color(x, y) {
                Ok(Some(Color::Black)) => 'X',
                Ok(Some(Color::White)) => 'O',
                _ => '·',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out.push_str(&format!(
        "{:?} to move, X {} O {}\n",
        board.side_to_move(),
        board.disc_count(Color::Black),
        board.disc_count(Color::White)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;

    #[test]
    fn start_position_renders_the_cross() {
        let rendered = render_board(&Board::new());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        // Rank 5 (second board row from the top is rank 7; rank 5 is index 3).
        assert_eq!(lines[3], "5 · · · X O · · · ");
        assert_eq!(lines[4], "4 · · · O X · · · ");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert!(lines[9].contains("Black to move"));
        assert!(lines[9].contains("X 2 O 2"));
    }
}

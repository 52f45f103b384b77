//! Algebraic coordinate conversions.
//!
//! Squares are written file-then-rank, `a1` through `h8`, with `a1` at
//! grid index 0 and files running along the x axis. Passes are spelled
//! `pass`.

use crate::game_state::reversi_types::{Color, Move, MovePos, Square, BOARD_SIZE};

/// Parse a square like `"c4"` into its grid index.
pub fn algebraic_to_square(text: &str) -> Result<Square, String> {
    let mut chars = text.chars();
    let file = chars
        .next()
        .ok_or_else(|| format!("empty square string: '{}'", text))?;
    let rank = chars
        .next()
        .ok_or_else(|| format!("missing rank in square string: '{}'", text))?;
    if chars.next().is_some() {
        return Err(format!("square string too long: '{}'", text));
    }
    let x = (file.to_ascii_lowercase() as i32) - ('a' as i32);
    let y = (rank as i32) - ('1' as i32);
    if !(0..BOARD_SIZE as i32).contains(&x) || !(0..BOARD_SIZE as i32).contains(&y) {
        return Err(format!("square out of range: '{}'", text));
    }
    Ok((x + y * BOARD_SIZE as i32) as Square)
}

pub fn square_to_algebraic(square: Square) -> String {
    let file = (b'a' + square % BOARD_SIZE) as char;
    let rank = (b'1' + square / BOARD_SIZE) as char;
    format!("{}{}", file, rank)
}

pub fn move_to_string(mv: &Move) -> String {
    match mv.pos {
        MovePos::Place(square) => square_to_algebraic(square),
        MovePos::Pass => "pass".to_string(),
    }
}

/// Parse a move string for `color`: a square or the literal `pass`.
pub fn parse_move(color: Color, text: &str) -> Result<Move, String> {
    if text.eq_ignore_ascii_case("pass") {
        return Ok(Move::pass(color));
    }
    Ok(Move::place(color, algebraic_to_square(text)?))
}

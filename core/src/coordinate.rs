// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of user-typed coordinates.
//!
//! Each axis is 1-indexed and may be written as a decimal `1..=15` or as a
//! single letter `a..=f` standing for 10..=15.

use crate::{GameError, Move, BOARD_SIZE};

/// Parse one axis into a 0-based index
pub fn parse_axis(token: &str) -> Result<u8, GameError> {
    let token = token.trim();
    let bad = || GameError::UnparsableCoordinate(token.to_string());

    let one_based = if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        token.parse::<usize>().map_err(|_| bad())?
    } else {
        let mut chars = token.chars();
        match (chars.next().map(|c| c.to_ascii_lowercase()), chars.next()) {
            (Some(c @ 'a'..='f'), None) => 10 + (c as usize - 'a' as usize),
            _ => return Err(bad()),
        }
    };

    if (1..=BOARD_SIZE).contains(&one_based) {
        Ok((one_based - 1) as u8)
    } else {
        Err(bad())
    }
}

/// Parse `"<row> <col>"` (space or comma separated) into a move
pub fn parse_move(input: &str) -> Result<Move, GameError> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    match parts.as_slice() {
        [row, col] => Move::new(parse_axis(row)?, parse_axis(col)?),
        _ => Err(GameError::UnparsableCoordinate(input.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_and_letter_axes() {
        assert_eq!(parse_axis("1"), Ok(0));
        assert_eq!(parse_axis("15"), Ok(14));
        assert_eq!(parse_axis("a"), Ok(9));
        assert_eq!(parse_axis("F"), Ok(14));
        assert!(parse_axis("0").is_err());
        assert!(parse_axis("16").is_err());
        assert!(parse_axis("g").is_err());
        assert!(parse_axis("").is_err());
    }

    #[test]
    fn parses_moves() {
        assert_eq!(parse_move("8 8"), Ok(Move::new(7, 7).unwrap()));
        assert_eq!(parse_move("a, f"), Ok(Move::new(9, 14).unwrap()));
        assert_eq!(parse_move("  10   c "), Ok(Move::new(9, 11).unwrap()));
        assert!(parse_move("8").is_err());
        assert!(parse_move("1 2 3").is_err());
        assert!(parse_move("x y").is_err());
    }
}

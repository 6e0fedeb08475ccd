use std::str::FromStr;

use thiserror::Error;

use crate::Vec2;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::UP,
            Direction::Down => Vec2::DOWN,
            Direction::Left => Vec2::LEFT,
            Direction::Right => Vec2::RIGHT,
        }
    }

    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    // Quarter turns in the y-up plane.
    #[inline]
    pub fn rotate_ccw(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    #[inline]
    pub fn rotate_cw(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized direction '{0}'")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[test]
    fn quarter_turns_cycle() {
        for direction in ALL {
            assert_eq!(direction.rotate_cw().rotate_ccw(), direction);
            assert_eq!(
                direction.rotate_cw().rotate_cw().rotate_cw().rotate_cw(),
                direction
            );
        }
        assert_eq!(Direction::Up.rotate_cw(), Direction::Right);
        assert_eq!(Direction::Up.rotate_ccw(), Direction::Left);
    }

    #[test]
    fn reverse_cancels_displacement() {
        for direction in ALL {
            assert_eq!(direction.reverse().reverse(), direction);
            assert_eq!(
                direction.to_vec2() + direction.reverse().to_vec2(),
                Vec2::new(0, 0)
            );
        }
    }

    #[test]
    fn parses_lowercase_tokens() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert!("north".parse::<Direction>().is_err());
    }
}

use std::{fmt, num::ParseIntError, str::FromStr};

use arrayvec::ArrayVec;
use grid_common::{Direction, ParseDirectionError, Vec2};
use thiserror::Error;

pub const MAX_SAUSAGES: usize = 8;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tile {
    Water,
    Land,
    Grill,
}

pub struct Board {
    size: Vec2,
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new(size: Vec2, tiles: Vec<Tile>) -> Result<Board, SetupError> {
        if size.x < 0 || size.y < 0 || tiles.len() != (size.x * size.y) as usize {
            return Err(SetupError::TileCountMismatch {
                size,
                tile_count: tiles.len(),
            });
        }
        Ok(Board { size, tiles })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    // Out-of-bounds cells read as water.
    #[inline]
    pub fn tile(&self, position: Vec2) -> Tile {
        if position.x < 0
            || position.x >= self.size.x
            || position.y < 0
            || position.y >= self.size.y
        {
            Tile::Water
        } else {
            let index = position.x + position.y * self.size.x;
            self.tiles[index as usize]
        }
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub facing: Direction,
}

#[derive(Debug, Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SausageOrientation {
    Horizontal,
    Vertical,
}

impl SausageOrientation {
    #[inline]
    fn axis(self) -> Direction {
        match self {
            SausageOrientation::Horizontal => Direction::Right,
            SausageOrientation::Vertical => Direction::Up,
        }
    }
}

#[derive(Debug, Error)]
#[error("unrecognized sausage orientation '{0}'")]
pub struct ParseSausageOrientationError(String);

impl FromStr for SausageOrientation {
    type Err = ParseSausageOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(SausageOrientation::Horizontal),
            "vertical" => Ok(SausageOrientation::Vertical),
            _ => Err(ParseSausageOrientationError(s.to_string())),
        }
    }
}

// Face layout: the bottom pair rests on the ground, _1 at the anchor cell,
// _2 at the far cell. Rolling swaps bottom and top per end.
const BOTTOM_1: usize = 0;
const BOTTOM_2: usize = 1;
const TOP_1: usize = 2;
const TOP_2: usize = 3;

#[derive(Debug, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Sausage {
    position: Vec2,
    orientation: SausageOrientation,
    grilled: [bool; 4],
}

impl Sausage {
    #[inline]
    pub fn new(position: Vec2, orientation: SausageOrientation) -> Sausage {
        Sausage {
            position,
            orientation,
            grilled: [false; 4],
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> SausageOrientation {
        self.orientation
    }

    #[inline]
    pub fn end_position(&self) -> Vec2 {
        self.position + self.orientation.axis().to_vec2()
    }

    #[inline]
    pub fn overlap(&self, position: Vec2) -> bool {
        position == self.position || position == self.end_position()
    }

    #[inline]
    fn overlap_sausage(&self, other: &Sausage) -> bool {
        self.overlap(other.position) || self.overlap(other.end_position())
    }

    #[inline]
    pub fn grilled_count(&self) -> usize {
        self.grilled.iter().filter(|&&face| face).count()
    }

    #[inline]
    pub fn fully_grilled(&self) -> bool {
        self.grilled.iter().all(|&face| face)
    }

    #[inline]
    fn roll(&mut self) {
        self.grilled.swap(BOTTOM_1, TOP_1);
        self.grilled.swap(BOTTOM_2, TOP_2);
    }

    // Translates one cell, rolling when pushed across the long axis.
    #[inline]
    fn push(&mut self, direction: Direction) -> bool {
        self.position += direction.to_vec2();
        let rolled = match self.orientation {
            SausageOrientation::Horizontal => {
                direction == Direction::Up || direction == Direction::Down
            }
            SausageOrientation::Vertical => {
                direction == Direction::Left || direction == Direction::Right
            }
        };
        if rolled {
            self.roll();
        }
        rolled
    }

    // Ground effects for the cells the sausage now occupies. `None` means
    // the whole action is discarded: a cell over water, or a face grilled
    // a second time.
    fn settle(&mut self, board: &Board) -> Option<()> {
        for (cell, face) in [(self.position, BOTTOM_1), (self.end_position(), BOTTOM_2)] {
            match board.tile(cell) {
                Tile::Water => return None,
                Tile::Land => (),
                Tile::Grill => {
                    if self.grilled[face] {
                        return None;
                    }
                    self.grilled[face] = true;
                }
            }
        }
        Some(())
    }
}

#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
}

const ACTIONS: [Action; 4] = [
    Action::Forward,
    Action::Backward,
    Action::TurnLeft,
    Action::TurnRight,
];

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Forward => "forward",
            Action::Backward => "backward",
            Action::TurnLeft => "turn-left",
            Action::TurnRight => "turn-right",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("board size {size} does not match {tile_count} tiles")]
    TileCountMismatch { size: Vec2, tile_count: usize },
    #[error("player at {position} is not on land or a grill")]
    PlayerOffLand { position: Vec2 },
    #[error("sausage {index} occupies {position}, which is not land or a grill")]
    SausageOffLand { index: usize, position: Vec2 },
    #[error("sausage {index} overlaps the player")]
    SausageOverlapsPlayer { index: usize },
    #[error("sausages {first} and {second} overlap")]
    OverlappingSausages { first: usize, second: usize },
    #[error("too many sausages ({count})")]
    TooManySausages { count: usize },
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct State {
    player: Player,
    sausages: ArrayVec<Sausage, MAX_SAUSAGES>,
}

impl State {
    pub fn new(board: &Board, player: Player, sausages: &[Sausage]) -> Result<State, SetupError> {
        if sausages.len() > MAX_SAUSAGES {
            return Err(SetupError::TooManySausages {
                count: sausages.len(),
            });
        }
        if board.tile(player.position) == Tile::Water {
            return Err(SetupError::PlayerOffLand {
                position: player.position,
            });
        }
        for (index, sausage) in sausages.iter().enumerate() {
            for cell in [sausage.position(), sausage.end_position()] {
                if board.tile(cell) == Tile::Water {
                    return Err(SetupError::SausageOffLand {
                        index,
                        position: cell,
                    });
                }
            }
            if sausage.overlap(player.position) {
                return Err(SetupError::SausageOverlapsPlayer { index });
            }
        }
        for first in 0..sausages.len() {
            for second in first + 1..sausages.len() {
                if sausages[first].overlap_sausage(&sausages[second]) {
                    return Err(SetupError::OverlappingSausages { first, second });
                }
            }
        }

        let mut sausages: ArrayVec<Sausage, MAX_SAUSAGES> = sausages.iter().cloned().collect();
        // The ordering is fixed here once; transitions never re-sort, so a
        // sausage keeps its index and its own burn history.
        sausages.sort_unstable();
        Ok(State { player, sausages })
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn sausages(&self) -> &[Sausage] {
        &self.sausages
    }

    #[inline]
    fn sausage_at(&self, position: Vec2) -> Option<usize> {
        self.sausages.iter().position(|s| s.overlap(position))
    }

    // Drains a worklist of (cell, direction) pushes, chaining into whatever
    // the displaced sausages run into. Each sausage moves at most once per
    // action. `None` discards the action.
    fn resolve_pushes(&mut self, board: &Board, seeds: &[(Vec2, Direction)]) -> Option<()> {
        let mut pending: Vec<(Vec2, Direction)> = seeds.to_vec();
        let mut pushed = [false; MAX_SAUSAGES];
        let mut head = 0;

        while head < pending.len() {
            let (cell, direction) = pending[head];
            head += 1;

            let index = match self
                .sausages
                .iter()
                .enumerate()
                .find(|(index, sausage)| !pushed[*index] && sausage.overlap(cell))
            {
                Some((index, _)) => index,
                None => continue,
            };
            pushed[index] = true;

            let sausage = &mut self.sausages[index];
            let anchor = sausage.position();
            let end = sausage.end_position();
            let rolled = sausage.push(direction);
            sausage.settle(board)?;

            if rolled {
                // A roll displaces both cells sideways; either may collide.
                pending.push((anchor + direction.to_vec2(), direction));
                pending.push((end + direction.to_vec2(), direction));
            } else {
                let front = if direction == sausage.orientation.axis() {
                    end
                } else {
                    anchor
                };
                pending.push((front + direction.to_vec2(), direction));
            }
        }

        Some(())
    }

    // One candidate successor per action. `None` when the action would burn
    // a face or force a sausage into the water.
    fn transition(&self, board: &Board, action: Action) -> Option<State> {
        match action {
            Action::Forward => self.shift(board, self.player.facing),
            Action::Backward => self.shift(board, self.player.facing.reverse()),
            Action::TurnLeft => self.turn(board, Direction::rotate_ccw),
            Action::TurnRight => self.turn(board, Direction::rotate_cw),
        }
    }

    fn shift(&self, board: &Board, direction: Direction) -> Option<State> {
        let target = self.player.position + direction.to_vec2();

        match board.tile(target) {
            // Blocked; the attempt still spends an action.
            Tile::Water => Some(self.clone()),
            Tile::Land => {
                let mut next = self.clone();
                if next.sausage_at(target).is_some() {
                    next.resolve_pushes(board, &[(target, direction)])?;
                }
                next.player.position = target;
                Some(next)
            }
            // The grill stops the player; anything on it gets poked one
            // cell along.
            Tile::Grill => {
                if self.sausage_at(target).is_some() {
                    let mut next = self.clone();
                    next.resolve_pushes(board, &[(target, direction)])?;
                    Some(next)
                } else {
                    Some(self.clone())
                }
            }
        }
    }

    fn turn(&self, board: &Board, rotate: fn(Direction) -> Direction) -> Option<State> {
        let from = self.player.facing;
        let to = rotate(from);
        let outer = self.player.position + to.to_vec2() + from.to_vec2();
        let inner = self.player.position + to.to_vec2();

        let mut next = self.clone();
        next.player.facing = to;
        // Outer seed first: a sausage spanning both swept cells takes the
        // outer push only.
        next.resolve_pushes(board, &[(outer, to), (inner, rotate(to))])?;
        Some(next)
    }
}

impl searchlight::State for State {
    type Data = Board;
    type Action = Action;
    type Successors = ArrayVec<(Action, State), 4>;

    fn successors(&self, board: &Board) -> Self::Successors {
        ACTIONS
            .iter()
            .filter_map(|&action| {
                self.transition(board, action)
                    .map(|state| (action, state))
            })
            .collect()
    }

    fn is_goal(&self, _board: &Board) -> bool {
        self.sausages.iter().all(Sausage::fully_grilled)
    }

    fn heuristic(&self, _board: &Board) -> usize {
        let grilled: usize = self.sausages.iter().map(Sausage::grilled_count).sum();
        100 * (4 * self.sausages.len() - grilled)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_number}: missing command")]
    MissingCommand { line_number: usize },
    #[error("line {line_number}: invalid command '{command}'")]
    InvalidCommand { line_number: usize, command: String },
    #[error("line {line_number}: puzzle already defined")]
    PuzzleAlreadyDefined { line_number: usize },
    #[error("line {line_number}: missing puzzle width")]
    MissingPuzzleSizeX { line_number: usize },
    #[error("line {line_number}: invalid puzzle width: {parse_error}")]
    InvalidPuzzleSizeX {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing puzzle height")]
    MissingPuzzleSizeY { line_number: usize },
    #[error("line {line_number}: invalid puzzle height: {parse_error}")]
    InvalidPuzzleSizeY {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("expected {expected_lines} puzzle rows, found {found_lines}")]
    UnexpectedEndOfPuzzle {
        expected_lines: usize,
        found_lines: usize,
    },
    #[error("line {line_number}: row is {line_width} columns wide, expected {data_width}")]
    UnevenRows {
        line_number: usize,
        data_width: usize,
        line_width: usize,
    },
    #[error("line {line_number}, column {column_number}: unexpected character '{character}'")]
    UnexpectedCharacter {
        line_number: usize,
        column_number: usize,
        character: char,
    },
    #[error("line {line_number}: start already defined")]
    StartAlreadyDefined { line_number: usize },
    #[error("line {line_number}: missing start x")]
    MissingStartX { line_number: usize },
    #[error("line {line_number}: invalid start x: {parse_error}")]
    InvalidStartX {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing start y")]
    MissingStartY { line_number: usize },
    #[error("line {line_number}: invalid start y: {parse_error}")]
    InvalidStartY {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing start facing")]
    MissingStartFacing { line_number: usize },
    #[error("line {line_number}: invalid start facing: {parse_error}")]
    InvalidStartFacing {
        line_number: usize,
        parse_error: ParseDirectionError,
    },
    #[error("line {line_number}: sausages already defined")]
    SausagesAlreadyDefined { line_number: usize },
    #[error("line {line_number}: missing sausage count")]
    MissingSausagesCount { line_number: usize },
    #[error("line {line_number}: invalid sausage count: {parse_error}")]
    InvalidSausagesCount {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing sausage x")]
    MissingSausageX { line_number: usize },
    #[error("line {line_number}: invalid sausage x: {parse_error}")]
    InvalidSausageX {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing sausage y")]
    MissingSausageY { line_number: usize },
    #[error("line {line_number}: invalid sausage y: {parse_error}")]
    InvalidSausageY {
        line_number: usize,
        parse_error: ParseIntError,
    },
    #[error("line {line_number}: missing sausage orientation")]
    MissingSausageOrientation { line_number: usize },
    #[error("line {line_number}: invalid sausage orientation: {parse_error}")]
    InvalidSausageOrientation {
        line_number: usize,
        parse_error: ParseSausageOrientationError,
    },
    #[error("expected {expected_lines} sausage lines, found {found_lines}")]
    UnexpectedEndOfSausages {
        expected_lines: usize,
        found_lines: usize,
    },
    #[error("missing puzzle definition")]
    MissingPuzzle,
    #[error("missing start definition")]
    MissingStart,
    #[error("missing sausages definition")]
    MissingSausages,
    #[error("invalid setup: {0}")]
    Setup(#[from] SetupError),
}

impl searchlight_cli::State for State {
    type ParseError = ParseError;

    fn parse(s: &str) -> Result<(State, Board), ParseError> {
        let mut puzzle = None;
        let mut start = None;
        let mut sausages = None;

        let mut lines = s.lines().enumerate();
        while let Some((line_number, line)) = lines.next() {
            let mut pieces = line.split(' ');
            let command = pieces
                .next()
                .ok_or(ParseError::MissingCommand { line_number })?;
            match command {
                "puzzle" => {
                    if puzzle.is_some() {
                        return Err(ParseError::PuzzleAlreadyDefined { line_number });
                    }

                    let size_x: usize = pieces
                        .next()
                        .ok_or(ParseError::MissingPuzzleSizeX { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidPuzzleSizeX {
                            line_number,
                            parse_error,
                        })?;
                    let size_y: usize = pieces
                        .next()
                        .ok_or(ParseError::MissingPuzzleSizeY { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidPuzzleSizeY {
                            line_number,
                            parse_error,
                        })?;
                    let mut tiles = vec![Tile::Water; size_x * size_y];

                    // The first text row is the top of the board.
                    for row in 0..size_y {
                        let y = size_y - 1 - row;
                        let (line_number, line) =
                            lines.next().ok_or(ParseError::UnexpectedEndOfPuzzle {
                                expected_lines: size_y,
                                found_lines: row,
                            })?;

                        if line.len() != size_x {
                            return Err(ParseError::UnevenRows {
                                line_number,
                                data_width: size_x,
                                line_width: line.len(),
                            });
                        }

                        for (x, c) in line.chars().enumerate() {
                            let tile = match c {
                                ' ' => Ok(Tile::Water),
                                '.' => Ok(Tile::Land),
                                '#' => Ok(Tile::Grill),
                                _ => Err(ParseError::UnexpectedCharacter {
                                    line_number,
                                    column_number: x,
                                    character: c,
                                }),
                            }?;
                            tiles[x + y * size_x] = tile;
                        }
                    }

                    puzzle = Some((Vec2::new(size_x as i32, size_y as i32), tiles));
                }
                "start" => {
                    if start.is_some() {
                        return Err(ParseError::StartAlreadyDefined { line_number });
                    }

                    let start_x = pieces
                        .next()
                        .ok_or(ParseError::MissingStartX { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidStartX {
                            line_number,
                            parse_error,
                        })?;
                    let start_y = pieces
                        .next()
                        .ok_or(ParseError::MissingStartY { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidStartY {
                            line_number,
                            parse_error,
                        })?;
                    let facing = pieces
                        .next()
                        .ok_or(ParseError::MissingStartFacing { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidStartFacing {
                            line_number,
                            parse_error,
                        })?;

                    start = Some((Vec2::new(start_x, start_y), facing));
                }
                "sausages" => {
                    if sausages.is_some() {
                        return Err(ParseError::SausagesAlreadyDefined { line_number });
                    }

                    let count: usize = pieces
                        .next()
                        .ok_or(ParseError::MissingSausagesCount { line_number })?
                        .parse()
                        .map_err(|parse_error| ParseError::InvalidSausagesCount {
                            line_number,
                            parse_error,
                        })?;

                    let mut read_sausages = Vec::with_capacity(count);
                    for i in 0..count {
                        let (line_number, line) =
                            lines.next().ok_or(ParseError::UnexpectedEndOfSausages {
                                expected_lines: count,
                                found_lines: i,
                            })?;

                        let mut pieces = line.split(' ');
                        let x = pieces
                            .next()
                            .ok_or(ParseError::MissingSausageX { line_number })?
                            .parse()
                            .map_err(|parse_error| ParseError::InvalidSausageX {
                                line_number,
                                parse_error,
                            })?;
                        let y = pieces
                            .next()
                            .ok_or(ParseError::MissingSausageY { line_number })?
                            .parse()
                            .map_err(|parse_error| ParseError::InvalidSausageY {
                                line_number,
                                parse_error,
                            })?;
                        let orientation = pieces
                            .next()
                            .ok_or(ParseError::MissingSausageOrientation { line_number })?
                            .parse()
                            .map_err(|parse_error| ParseError::InvalidSausageOrientation {
                                line_number,
                                parse_error,
                            })?;

                        read_sausages.push(Sausage::new(Vec2::new(x, y), orientation));
                    }

                    sausages = Some(read_sausages);
                }
                command => {
                    return Err(ParseError::InvalidCommand {
                        line_number,
                        command: command.to_string(),
                    })
                }
            }
        }

        let (size, tiles) = puzzle.ok_or(ParseError::MissingPuzzle)?;
        let (position, facing) = start.ok_or(ParseError::MissingStart)?;
        let sausages = sausages.ok_or(ParseError::MissingSausages)?;

        let board = Board::new(size, tiles)?;
        let state = State::new(&board, Player { position, facing }, &sausages)?;

        Ok((state, board))
    }

    fn display(&self, board: &Board, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = board.size().x + 2;
        let height = board.size().y + 2;
        let mut cells = vec![' '; (width * height) as usize];

        for y in 0..height {
            for x in 0..width {
                let index = x + y * width;
                cells[index as usize] = match board.tile(Vec2::new(x - 1, y - 1)) {
                    Tile::Water => ' ',
                    Tile::Land => '.',
                    Tile::Grill => '#',
                };
            }
        }

        for sausage in self.sausages.iter() {
            let anchor = sausage.position();
            cells[((anchor.x + 1) + (anchor.y + 1) * width) as usize] = 'S';
            let end = sausage.end_position();
            cells[((end.x + 1) + (end.y + 1) * width) as usize] = 's';
        }

        let arrow = match self.player.facing {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        };
        let index = (self.player.position.x + 1) + (self.player.position.y + 1) * width;
        cells[index as usize] = arrow;

        for y in (0..height).rev() {
            let begin = (y * width) as usize;
            let end = begin + width as usize;
            for c in &cells[begin..end] {
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use searchlight::State as _;
    use searchlight_cli::State as _;

    // A strip of land leading onto two grill rows: rolling the sausage
    // forward twice grills all four faces.
    const DOUBLE_ROLL: &str = "puzzle 4 4\n \
        .  \n \
        .. \n \
        ## \n \
        ## \n\
        start 1 3 down\n\
        sausages 1\n\
        1 2 horizontal";

    // A 6x6 bay: one vertical sausage, grills on columns of both parities.
    const BAY: &str = "puzzle 6 6\n      \n \
        .... \n \
        .... \n \
        .##. \n \
        .... \n      \n\
        start 4 2 left\n\
        sausages 1\n\
        1 1 vertical";

    // The same bay with the grills flooded: nothing can ever be grilled.
    const BAY_FLOODED: &str = "puzzle 6 6\n      \n \
        .... \n \
        .... \n \
        .  . \n \
        .... \n      \n\
        start 4 2 left\n\
        sausages 1\n\
        1 1 vertical";

    // Both grills on even columns: a vertical sausage starting on an odd
    // column only ever rests one face pair on them, so one pair can never
    // be grilled.
    const BAY_ONE_PARITY: &str = "puzzle 6 6\n      \n \
        .... \n \
        ...# \n \
        .#.. \n \
        .... \n      \n\
        start 4 2 left\n\
        sausages 1\n\
        1 1 vertical";

    fn parse(level: &str) -> (State, Board) {
        <State as searchlight_cli::State>::parse(level).unwrap()
    }

    // Replays the solver's answer through the transition engine: every step
    // must be a legal transition and the final state a goal.
    fn assert_solves(initial: State, board: &Board, length: Option<usize>) {
        let solution = searchlight::solve(initial.clone(), board).expect("expected a solution");
        if let Some(length) = length {
            assert_eq!(solution.len(), length);
        }

        let mut state = initial;
        for (action, next) in &solution {
            let replayed = state
                .transition(board, *action)
                .expect("solution step must be legal");
            assert_eq!(&replayed, next);
            state = replayed;
        }
        assert!(state.is_goal(board));
    }

    #[test]
    fn solve_double_roll() {
        let (initial, board) = parse(DOUBLE_ROLL);
        // Each roll grills at most two faces, so two actions are minimal.
        assert_solves(initial, &board, Some(2));
    }

    #[test]
    fn solve_bay() {
        let (initial, board) = parse(BAY);
        assert_solves(initial, &board, None);
    }

    #[test]
    fn flooded_bay_fails() {
        let (initial, board) = parse(BAY_FLOODED);
        assert_eq!(searchlight::solve(initial, &board), None);
    }

    #[test]
    fn one_parity_grills_fail() {
        let (initial, board) = parse(BAY_ONE_PARITY);
        assert_eq!(searchlight::solve(initial, &board), None);
    }

    #[test]
    fn water_move_is_a_noop() {
        let (initial, board) = parse(DOUBLE_ROLL);
        // Backward from (1, 3) facing down leads off the board.
        let next = initial.transition(&board, Action::Backward).unwrap();
        assert_eq!(next, initial);
    }

    #[test]
    fn turn_without_neighbors_only_rotates() {
        let (initial, board) = parse(BAY);
        let next = initial.transition(&board, Action::TurnRight).unwrap();
        assert_eq!(next.player.position, initial.player.position);
        assert_eq!(next.player.facing, Direction::Up);
        assert_eq!(next.sausages, initial.sausages);
    }

    #[test]
    fn turn_sweep_rolls_the_pivot_sausage() {
        let (initial, board) = parse(BAY);
        let state = State {
            player: Player {
                position: Vec2::new(1, 3),
                facing: Direction::Left,
            },
            sausages: initial.sausages.clone(),
        };

        // Turning left sweeps the sausage at (1, 2) and rolls it right,
        // resting its far end on the grill at (2, 2).
        let next = state.transition(&board, Action::TurnLeft).unwrap();
        assert_eq!(next.player.facing, Direction::Down);
        assert_eq!(next.player.position, Vec2::new(1, 3));
        let sausage = &next.sausages[0];
        assert_eq!(sausage.position(), Vec2::new(2, 1));
        assert_eq!(sausage.orientation(), SausageOrientation::Vertical);
        assert_eq!(sausage.grilled, [false, true, false, false]);
    }

    #[test]
    fn second_grilling_discards_the_action() {
        let (_, board) = parse(DOUBLE_ROLL);
        let mut sausage = Sausage::new(Vec2::new(1, 2), SausageOrientation::Horizontal);
        // Pre-grill the faces that the next roll will put on the grills.
        sausage.grilled = [false, false, true, true];
        let state = State {
            player: Player {
                position: Vec2::new(1, 3),
                facing: Direction::Down,
            },
            sausages: [sausage].into_iter().collect(),
        };

        assert!(state.transition(&board, Action::Forward).is_none());
        // Forward burns and turn-left shoves the sausage into the water;
        // only the no-op backward and the clean turn-right remain.
        let successors = state.successors(&board);
        assert_eq!(successors.len(), 2);
        assert!(successors
            .iter()
            .all(|(action, _)| *action != Action::Forward && *action != Action::TurnLeft));
    }

    #[test]
    fn heuristic_counts_ungrilled_faces() {
        let (initial, board) = parse(BAY);
        assert_eq!(initial.heuristic(&board), 400);
        assert!(!initial.is_goal(&board));

        let mut done = initial.clone();
        done.sausages[0].grilled = [true; 4];
        assert_eq!(done.heuristic(&board), 0);
        assert!(done.is_goal(&board));
    }

    #[test]
    fn rejects_malformed_setups() {
        let on_water = "puzzle 3 3\n   \n . \n   \nstart 1 1 up\nsausages 1\n0 0 vertical";
        assert!(matches!(
            <State as searchlight_cli::State>::parse(on_water),
            Err(ParseError::Setup(SetupError::SausageOffLand { index: 0, .. }))
        ));

        let adrift = "puzzle 3 3\n   \n . \n   \nstart 0 0 up\nsausages 0";
        assert!(matches!(
            <State as searchlight_cli::State>::parse(adrift),
            Err(ParseError::Setup(SetupError::PlayerOffLand { .. }))
        ));
    }

    proptest! {
        // Whatever the player does, occupied cells stay on land or grill
        // and grilled faces never revert.
        #[test]
        fn invariants_hold_under_any_actions(choices in proptest::collection::vec(0usize..4, 0..48)) {
            let (initial, board) = parse(BAY);
            let mut state = initial;
            for choice in choices {
                let Some(next) = state.transition(&board, ACTIONS[choice]) else {
                    continue;
                };

                prop_assert!(board.tile(next.player.position) != Tile::Water);
                for (before, after) in state.sausages.iter().zip(next.sausages.iter()) {
                    prop_assert!(board.tile(after.position()) != Tile::Water);
                    prop_assert!(board.tile(after.end_position()) != Tile::Water);
                    for face in 0..4 {
                        prop_assert!(!before.grilled[face] || after.grilled[face]);
                    }
                }
                for (index, sausage) in next.sausages.iter().enumerate() {
                    prop_assert!(!sausage.overlap(next.player.position));
                    for other in next.sausages.iter().skip(index + 1) {
                        prop_assert!(!sausage.overlap_sausage(other));
                    }
                }

                state = next;
            }
        }
    }
}

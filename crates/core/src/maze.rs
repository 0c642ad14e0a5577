//! Mental map: memorise a list of relative turns, then walk them on a grid.
//!
//! Rows grow southward and columns grow eastward. A move first turns
//! (or not) relative to the current facing, then steps one cell.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

/// Grid coordinate `(row, col)`.
pub type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::South, Facing::East, Facing::West];

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::East => "east",
            Facing::West => "west",
        }
    }

    /// Unit step `(d_row, d_col)`.
    pub fn delta(self) -> Cell {
        match self {
            Facing::North => (-1, 0),
            Facing::South => (1, 0),
            Facing::East => (0, 1),
            Facing::West => (0, -1),
        }
    }

    /// Facing after turning by `direction`.
    pub fn turn(self, direction: RelativeDirection) -> Facing {
        use Facing::*;
        use RelativeDirection::*;
        match (self, direction) {
            (f, Forward) => f,
            (North, Left) | (South, Right) => West,
            (North, Right) | (South, Left) => East,
            (East, Left) | (West, Right) => North,
            (East, Right) | (West, Left) => South,
            (North, Back) => South,
            (South, Back) => North,
            (East, Back) => West,
            (West, Back) => East,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Facing::North => "↑",
            Facing::South => "↓",
            Facing::East => "→",
            Facing::West => "←",
        }
    }
}

/// A move as the player sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeDirection {
    Forward,
    Left,
    Right,
    /// Interactive only; never part of a generated walk.
    Back,
}

impl RelativeDirection {
    /// Candidates considered when generating a walk.
    pub const GENERATED: [RelativeDirection; 3] = [
        RelativeDirection::Forward,
        RelativeDirection::Left,
        RelativeDirection::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelativeDirection::Forward => "forward",
            RelativeDirection::Left => "left",
            RelativeDirection::Right => "right",
            RelativeDirection::Back => "back",
        }
    }

    /// Keyboard binding: arrow keys or WASD.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" => Some(RelativeDirection::Forward),
            "ArrowDown" | "s" => Some(RelativeDirection::Back),
            "ArrowLeft" | "a" => Some(RelativeDirection::Left),
            "ArrowRight" | "d" => Some(RelativeDirection::Right),
            _ => None,
        }
    }
}

impl fmt::Display for RelativeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativeDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "f" => Ok(RelativeDirection::Forward),
            "left" | "l" => Ok(RelativeDirection::Left),
            "right" | "r" => Ok(RelativeDirection::Right),
            "back" | "b" => Ok(RelativeDirection::Back),
            _ => Err(ParseError::RelativeDirection(s.to_string())),
        }
    }
}

/// A generated walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionSet {
    pub directions: Vec<RelativeDirection>,
    pub start: Cell,
    pub start_facing: Facing,
    pub end: Cell,
}

impl DirectionSet {
    pub fn to_text(&self) -> String {
        directions_to_text(&self.directions)
    }
}

/// Cursor position plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub cell: Cell,
    pub facing: Facing,
}

fn in_bounds(cell: Cell, grid_size: i32) -> bool {
    (0..grid_size).contains(&cell.0) && (0..grid_size).contains(&cell.1)
}

/// One step from `cell`. `None` if the step would leave the grid.
pub fn apply_relative_direction(
    cell: Cell,
    facing: Facing,
    direction: RelativeDirection,
    grid_size: i32,
) -> Option<Position> {
    let facing = facing.turn(direction);
    let (dr, dc) = facing.delta();
    let next = (cell.0 + dr, cell.1 + dc);
    in_bounds(next, grid_size).then_some(Position { cell: next, facing })
}

pub fn cells_match(a: Cell, b: Cell) -> bool {
    a == b
}

/// Generate a random in-bounds walk of up to `step_count` moves.
///
/// The start cell keeps a margin from the edges so most walks have room.
/// If a step has no in-bounds option the walk ends early. A grid smaller
/// than 2x2 has no moves at all: the walk is empty and starts at `(0, 0)`.
pub fn generate_directions<R: Rng + ?Sized>(
    grid_size: i32,
    step_count: usize,
    rng: &mut R,
) -> DirectionSet {
    let half_steps = i32::try_from(step_count.div_ceil(2)).unwrap_or(i32::MAX);
    let margin = half_steps.min(grid_size / 2 - 1).max(1);
    let span = (grid_size - 2 * margin).max(1);
    let last = (grid_size - 1).max(0);
    let start = (
        (rng.gen_range(0..span) + margin).min(last),
        (rng.gen_range(0..span) + margin).min(last),
    );
    let start_facing = Facing::ALL[rng.gen_range(0..Facing::ALL.len())];

    let mut directions = Vec::new();
    let mut current = Position {
        cell: start,
        facing: start_facing,
    };

    for _ in 0..step_count {
        let options: Vec<(RelativeDirection, Position)> = RelativeDirection::GENERATED
            .iter()
            .filter_map(|&dir| {
                apply_relative_direction(current.cell, current.facing, dir, grid_size)
                    .map(|next| (dir, next))
            })
            .collect();

        let Some(&(dir, next)) = options.choose(rng) else {
            debug!(steps = directions.len(), "walk boxed in, ending early");
            break;
        };
        directions.push(dir);
        current = next;
    }

    DirectionSet {
        directions,
        start,
        start_facing,
        end: current.cell,
    }
}

/// Human-readable instructions, e.g. `Go forward 2, turn left, then forward 1`.
pub fn directions_to_text(directions: &[RelativeDirection]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut i = 0;

    while i < directions.len() {
        match directions[i] {
            RelativeDirection::Forward => {
                let run = directions[i..]
                    .iter()
                    .take_while(|d| **d == RelativeDirection::Forward)
                    .count();
                if parts.is_empty() {
                    parts.push(format!("Go forward {}", run));
                } else {
                    parts.push(format!("forward {}", run));
                }
                i += run;
            }
            turn => {
                parts.push(format!("turn {}", turn));
                i += 1;
            }
        }
    }

    match parts.split_last() {
        None => String::new(),
        Some((only, [])) => only.clone(),
        Some((last, rest)) => format!("{}, then {}", rest.join(", "), last),
    }
}

/// Interactive cursor with an undo stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    grid_size: i32,
    position: Position,
    history: Vec<Position>,
}

impl Navigator {
    pub fn new(start: Cell, facing: Facing, grid_size: i32) -> Self {
        Self {
            grid_size,
            position: Position {
                cell: start,
                facing,
            },
            history: Vec::new(),
        }
    }

    /// Navigator placed at a walk's start.
    pub fn for_walk(walk: &DirectionSet, grid_size: i32) -> Self {
        Self::new(walk.start, walk.start_facing, grid_size)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Apply a move. Returns false and leaves the cursor unchanged if the
    /// move would leave the grid.
    pub fn step(&mut self, direction: RelativeDirection) -> bool {
        match apply_relative_direction(
            self.position.cell,
            self.position.facing,
            direction,
            self.grid_size,
        ) {
            Some(next) => {
                self.history.push(self.position);
                self.position = next;
                true
            }
            None => false,
        }
    }

    /// Revert the last successful move. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.position = previous;
                true
            }
            None => false,
        }
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    /// Whether the cursor sits on the walk's end cell.
    pub fn reached(&self, walk: &DirectionSet) -> bool {
        cells_match(self.position.cell, walk.end)
    }
}

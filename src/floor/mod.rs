//! # Floor Module
//!
//! Data model for a generated dungeon floor.
//!
//! This module contains the value types every generation pass works on:
//! - Grid coordinates and walk directions
//! - The room grid with its doors and crop bounds
//! - Encounters, from pending registration to resolved enemy roster
//! - The finished [`FloorResult`] handed to renderers

pub mod encounter;
pub mod grid;

pub use encounter::*;
pub use grid::*;

use serde::{Deserialize, Serialize};

/// Represents a cell coordinate on the floor grid.
///
/// Coordinates are signed so that walk arithmetic can step off the grid
/// and be rejected by bounds checks instead of wrapping.
///
/// # Examples
///
/// ```
/// use dungen::{Direction, Position};
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.step(Direction::Up, 2), Position::new(10, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center cell of a square grid with the given side length.
    pub fn center(size: usize) -> Self {
        let half = (size / 2) as i32;
        Self::new(half, half)
    }

    /// Moves `distance` cells in `direction`.
    pub fn step(self, direction: Direction, distance: usize) -> Self {
        let delta = direction.to_delta();
        let distance = distance as i32;
        self + Position::new(delta.x * distance, delta.y * distance)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions the walk can build a hallway in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// All directions in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Converts a direction to a position delta. `y` grows downwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungen::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Right => Position::new(1, 0),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Up => Position::new(0, -1),
        }
    }

    /// Gets the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
        }
    }

    pub fn is_horizontal(self) -> bool {
        match self {
            Direction::Right | Direction::Left => true,
            Direction::Down | Direction::Up => false,
        }
    }

    /// The two directions a hallway running this way can branch into.
    pub fn perpendicular(self) -> [Direction; 2] {
        if self.is_horizontal() {
            [Direction::Up, Direction::Down]
        } else {
            [Direction::Right, Direction::Left]
        }
    }
}

/// One finished floor: the room grid plus its resolved encounters.
///
/// This is the read-only value handed to renderers. Nothing in it refers
/// back to the deck or random source that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorResult {
    /// Room layout, doors and crop bounds
    pub grid: Grid,
    /// Arcana available to this floor's encounters
    pub arcana: Vec<Arcana>,
    /// Resolved encounters in room-write order
    pub encounters: Vec<Encounter>,
    /// Cards drawn from the deck while walking
    pub cards_drawn: usize,
    /// Seed of the attempt that produced this floor, when seeded internally
    pub seed: Option<u64>,
    /// Attempts made, including the successful one
    pub attempts: u32,
}

impl FloorResult {
    /// Looks up an encounter by id.
    pub fn encounter(&self, id: EncounterId) -> Option<&Encounter> {
        self.encounters.iter().find(|encounter| encounter.id == id)
    }

    /// Looks up the encounter held by the room at `pos`.
    pub fn encounter_at(&self, pos: Position) -> Option<&Encounter> {
        let id = self.grid.room(pos).ok()?.encounter?;
        self.encounter(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_step() {
        let pos = Position::new(15, 15);
        assert_eq!(pos.step(Direction::Right, 3), Position::new(18, 15));
        assert_eq!(pos.step(Direction::Left, 1), Position::new(14, 15));
        assert_eq!(pos.step(Direction::Down, 4), Position::new(15, 19));
        assert_eq!(pos.step(Direction::Up, 0), pos);
    }

    #[test]
    fn test_position_center() {
        assert_eq!(Position::center(30), Position::new(15, 15));
        assert_eq!(Position::center(9), Position::new(4, 4));
    }

    #[test]
    fn test_direction_opposites() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(
                direction.to_delta() + direction.opposite().to_delta(),
                Position::new(0, 0)
            );
        }
    }

    #[test]
    fn test_perpendicular_directions() {
        assert_eq!(
            Direction::Right.perpendicular(),
            [Direction::Up, Direction::Down]
        );
        assert_eq!(
            Direction::Up.perpendicular(),
            [Direction::Right, Direction::Left]
        );
        for direction in Direction::ALL {
            for branch in direction.perpendicular() {
                assert_ne!(branch.is_horizontal(), direction.is_horizontal());
            }
        }
    }
}

//! # Dungen
//!
//! Procedural generator for a single floor of a tarot-driven tabletop RPG dungeon.
//!
//! ## Architecture Overview
//!
//! A floor is produced in two passes over a square grid of rooms:
//!
//! - **Deck**: a weighted bag of room types drawn without replacement
//! - **Walk Builder**: a random walk that lays rooms out in straight hallways,
//!   branching perpendicular every few rooms without ever crossing itself
//! - **Encounter Engine**: once the walk ends, every combat room gets a
//!   difficulty and an enemy roster drawn from the floor's arcana pool
//! - **Rendering**: plain-text and HTML views of a finished floor
//!
//! All randomness flows through [`RandomSource`], so tests can drive the
//! generator with deterministic sources.
//!
//! ```
//! let floor = dungen::generate_seeded(30, 7).unwrap();
//! assert_eq!(floor.grid.count_rooms(dungen::RoomType::Start), 1);
//! ```

pub mod floor;
pub mod generation;
pub mod rendering;
pub mod utils;

pub use floor::*;
pub use generation::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the dungeon generator.
#[derive(thiserror::Error, Debug)]
pub enum DungenError {
    /// Coordinate access outside the grid
    #[error("position ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    /// Attempted overwrite of a room that already has a type
    #[error("room at ({x}, {y}) is already written as {existing:?}")]
    RoomAlreadyWritten {
        x: i32,
        y: i32,
        existing: RoomType,
    },

    /// Attempted to write the NONE room type
    #[error("room at ({x}, {y}) cannot be written as NONE")]
    UnwrittenRoomType { x: i32, y: i32 },

    /// Attempted duplicate door registration
    #[error("{door:?} door already exists at ({x}, {y})")]
    DoorAlreadyExists { door: Door, x: i32, y: i32 },

    /// Draw requested on an empty deck
    #[error("deck has no cards left to draw")]
    DeckExhausted,

    /// The walk reached a position with no room for a full hallway
    #[error("no valid direction to build from ({x}, {y})")]
    NoValidDirection { x: i32, y: i32 },

    /// Every generation attempt ran into a dead end
    #[error("generation failed after {attempts} attempts: {last}")]
    GenerationFailed {
        attempts: u32,
        last: Box<DungenError>,
    },

    /// More encounters than the difficulty tables cover
    #[error("{0} encounters exceed the difficulty tables")]
    TooManyEncounters(usize),

    /// Enemy rosters need at least one arcana to draw from
    #[error("arcana pool is empty")]
    EmptyArcanaPool,

    /// Grid side length is zero or above `config::MAX_GRID_SIZE`
    #[error("invalid grid size: {0}")]
    InvalidGridSize(usize),

    /// Generation configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A finished floor broke one of its structural laws
    #[error("invalid floor: {0}")]
    InvalidFloor(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DungenError {
    /// Returns true for the randomness-driven dead end that a fresh attempt can avoid.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, DungenError::NoValidDirection { .. })
    }
}

/// Result type used throughout the generator.
pub type DungenResult<T> = Result<T, DungenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation constants.
pub mod config {
    /// Rooms in a straight hallway including the one it branches from
    pub const MAX_HALLWAY_LENGTH: usize = 5;

    /// Cards that must be drawn before the walk may stop
    pub const MIN_CARDS_DRAWN: usize = 7;

    /// Default side length of the square grid
    pub const DEFAULT_GRID_SIZE: usize = 30;

    /// Largest side length a grid may be created with
    pub const MAX_GRID_SIZE: usize = 1024;

    /// Attempts made before a dead-ended generation is reported
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

    /// Furthest a branch may start back from the end of its hallway
    pub const MAX_BACKTRACK: usize = 3;

    /// Smallest arcana pool a floor can select
    pub const MIN_ARCANA_POOL: usize = 4;

    /// Largest arcana pool a floor can select
    pub const MAX_ARCANA_POOL: usize = 6;

    /// Most encounters the difficulty tables cover
    pub const MAX_ENCOUNTERS: usize = 9;
}

//! # Room Grid
//!
//! The square grid of rooms a floor is laid out on. Every mutator checks
//! its invariants and reports a breach as an error carrying the offending
//! coordinates, leaving it to the caller to decide how to surface it.

use crate::config::{MAX_GRID_SIZE, MAX_HALLWAY_LENGTH};
use crate::floor::{Direction, EncounterId, PendingEncounter, Position};
use crate::{DungenError, DungenResult};
use serde::{Deserialize, Serialize};

/// Content of a single room.
///
/// `None` marks an unwritten cell. Every other type is final once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    None,
    Start,
    Staircase,
    Treasure,
    Empty,
    Safe,
    GuardedTreasure,
    Hazard,
    Death,
    Enemy,
}

impl RoomType {
    /// Every room type a cell can be written with.
    pub const WRITTEN: [RoomType; 9] = [
        RoomType::Start,
        RoomType::Staircase,
        RoomType::Treasure,
        RoomType::Empty,
        RoomType::Safe,
        RoomType::GuardedTreasure,
        RoomType::Hazard,
        RoomType::Death,
        RoomType::Enemy,
    ];

    pub fn is_written(self) -> bool {
        self != RoomType::None
    }

    /// Whether rooms of this type hold a combat encounter.
    pub fn has_encounter(self) -> bool {
        match self {
            RoomType::Enemy | RoomType::GuardedTreasure => true,
            RoomType::None
            | RoomType::Start
            | RoomType::Staircase
            | RoomType::Treasure
            | RoomType::Empty
            | RoomType::Safe
            | RoomType::Hazard
            | RoomType::Death => false,
        }
    }

    /// Human-readable name used in legends.
    pub fn name(self) -> &'static str {
        match self {
            RoomType::None => "Nothing",
            RoomType::Start => "Entrance",
            RoomType::Staircase => "Stairs",
            RoomType::Treasure => "Treasure",
            RoomType::Empty => "Empty",
            RoomType::Safe => "Safe",
            RoomType::GuardedTreasure => "Guarded Treasure",
            RoomType::Hazard => "Hazard",
            RoomType::Death => "Death",
            RoomType::Enemy => "Enemy Encounter",
        }
    }
}

/// Door sides that are recorded on a room.
///
/// A connection is always stored on the room with the lower index, so a
/// passage to the left is the right door of the room being entered and a
/// passage upwards is the down door of the room being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Door {
    Right,
    Down,
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Room {
    pub room_type: RoomType,
    pub right_door: bool,
    pub down_door: bool,
    /// Encounter held by this room, for enemy and guarded treasure rooms
    pub encounter: Option<EncounterId>,
}

impl Room {
    pub fn is_written(&self) -> bool {
        self.room_type.is_written()
    }

    pub fn has_door(&self, door: Door) -> bool {
        match door {
            Door::Right => self.right_door,
            Door::Down => self.down_door,
        }
    }
}

/// Square grid of rooms, indexed `rooms[y][x]`.
///
/// Room types and door flags only ever move from unset to set. The grid also
/// tracks the horizontal extent of written rooms for cropped rendering and
/// the encounters registered by combat rooms, numbered from its own counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    rooms: Vec<Vec<Room>>,
    leftmost: usize,
    rightmost: usize,
    pending: Vec<PendingEncounter>,
    next_encounter_id: u32,
}

impl Grid {
    /// Creates an empty grid with side length `size`.
    ///
    /// Sizes of zero or above [`MAX_GRID_SIZE`] are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungen::{Grid, Position};
    ///
    /// let grid = Grid::new(30).unwrap();
    /// assert!(!grid.is_written(Position::new(15, 15)).unwrap());
    /// assert!(Grid::new(0).is_err());
    /// assert!(Grid::new(usize::MAX).is_err());
    /// ```
    pub fn new(size: usize) -> DungenResult<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(DungenError::InvalidGridSize(size));
        }

        Ok(Self {
            size,
            rooms: vec![vec![Room::default(); size]; size],
            leftmost: size,
            rightmost: 0,
            pending: Vec::new(),
            next_encounter_id: 1,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Leftmost written column, or `size` while nothing is written.
    pub fn leftmost(&self) -> usize {
        self.leftmost
    }

    /// Rightmost written column, or `0` while nothing is written.
    pub fn rightmost(&self) -> usize {
        self.rightmost
    }

    /// Inclusive column range covering every written room.
    pub fn column_bounds(&self) -> Option<(usize, usize)> {
        (self.leftmost <= self.rightmost).then_some((self.leftmost, self.rightmost))
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    fn index(&self, pos: Position) -> DungenResult<(usize, usize)> {
        if !self.contains(pos) {
            return Err(DungenError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                size: self.size,
            });
        }
        Ok((pos.x as usize, pos.y as usize))
    }

    pub fn room(&self, pos: Position) -> DungenResult<&Room> {
        let (x, y) = self.index(pos)?;
        Ok(&self.rooms[y][x])
    }

    pub fn room_type(&self, pos: Position) -> DungenResult<RoomType> {
        Ok(self.room(pos)?.room_type)
    }

    pub fn is_written(&self, pos: Position) -> DungenResult<bool> {
        Ok(self.room(pos)?.is_written())
    }

    /// Writes a room type into an unwritten cell.
    ///
    /// Enemy and guarded treasure rooms register a pending encounter, whose
    /// id is returned.
    pub fn set_room_type(
        &mut self,
        pos: Position,
        room_type: RoomType,
    ) -> DungenResult<Option<EncounterId>> {
        let (x, y) = self.index(pos)?;

        let existing = self.rooms[y][x].room_type;
        if existing.is_written() {
            return Err(DungenError::RoomAlreadyWritten {
                x: pos.x,
                y: pos.y,
                existing,
            });
        }
        if !room_type.is_written() {
            return Err(DungenError::UnwrittenRoomType { x: pos.x, y: pos.y });
        }

        let encounter = if room_type.has_encounter() {
            let id = EncounterId(self.next_encounter_id);
            self.next_encounter_id += 1;
            self.pending.push(PendingEncounter::new(id, pos));
            Some(id)
        } else {
            None
        };

        let room = &mut self.rooms[y][x];
        room.room_type = room_type;
        room.encounter = encounter;

        self.leftmost = self.leftmost.min(x);
        self.rightmost = self.rightmost.max(x);

        Ok(encounter)
    }

    /// Records a door on the room at `pos`.
    pub fn add_door(&mut self, door: Door, pos: Position) -> DungenResult<()> {
        let (x, y) = self.index(pos)?;
        let room = &mut self.rooms[y][x];

        let flag = match door {
            Door::Right => &mut room.right_door,
            Door::Down => &mut room.down_door,
        };
        if *flag {
            return Err(DungenError::DoorAlreadyExists {
                door,
                x: pos.x,
                y: pos.y,
            });
        }
        *flag = true;

        Ok(())
    }

    /// Connects `from` to its neighbour in `direction` and returns the neighbour.
    ///
    /// The door lands on whichever of the two rooms has the lower index.
    pub fn open_passage(&mut self, from: Position, direction: Direction) -> DungenResult<Position> {
        self.index(from)?;
        let to = from.step(direction, 1);
        self.index(to)?;

        match direction {
            Direction::Right => self.add_door(Door::Right, from)?,
            Direction::Down => self.add_door(Door::Down, from)?,
            Direction::Left => self.add_door(Door::Right, to)?,
            Direction::Up => self.add_door(Door::Down, to)?,
        }

        Ok(to)
    }

    /// Checks whether a full hallway fits from `pos` in `direction`.
    ///
    /// Every one of the next `MAX_HALLWAY_LENGTH - 1` cells must be on the
    /// grid and unwritten. `pos` itself must be on the grid.
    pub fn can_extend(&self, direction: Direction, pos: Position) -> DungenResult<bool> {
        self.index(pos)?;

        for offset in 1..MAX_HALLWAY_LENGTH {
            let next = pos.step(direction, offset);
            if !self.contains(next) || self.is_written(next)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Encounters registered by combat rooms and not yet resolved.
    pub fn pending_encounters(&self) -> &[PendingEncounter] {
        &self.pending
    }

    /// Hands the pending encounters over for resolution.
    pub fn take_pending_encounters(&mut self) -> Vec<PendingEncounter> {
        std::mem::take(&mut self.pending)
    }

    /// Rows of the grid from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Room]> + '_ {
        self.rooms.iter().map(Vec::as_slice)
    }

    pub fn count_rooms(&self, room_type: RoomType) -> usize {
        self.rooms
            .iter()
            .flat_map(|row| row.iter())
            .filter(|room| room.room_type == room_type)
            .count()
    }

    /// Positions of every written room in row-major order.
    pub fn written_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.rooms.iter().enumerate() {
            for (x, room) in row.iter().enumerate() {
                if room.is_written() {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }
}

//! # Walk Builder
//!
//! Lays a floor out with a random walk over the grid.
//!
//! The walk starts at the grid center and builds straight hallways. Each
//! step opens a door, moves one cell and writes the next card from the deck
//! there. After `MAX_HALLWAY_LENGTH - 1` new rooms the walk backs up 1 to
//! `MAX_BACKTRACK` rooms along the hallway and branches off perpendicular.
//! A direction is only taken when a full hallway fits in it, so the walk
//! never runs into a room it has already written.

use crate::config::{MAX_BACKTRACK, MAX_HALLWAY_LENGTH, MIN_CARDS_DRAWN};
use crate::floor::{Arcana, Direction, Grid, Position, RoomType};
use crate::generation::encounters::pick_arcana_pool;
use crate::generation::Deck;
use crate::utils::RandomSource;
use crate::{DungenError, DungenResult};
use log::{debug, trace};

/// Candidates for the first hallway, in the order choices index them.
const INITIAL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Finished walk, before encounters are resolved.
#[derive(Debug, Clone)]
pub struct Walk {
    /// Grid with every room written and encounters still pending
    pub grid: Grid,
    /// Arcana pool selected for the floor
    pub arcana: Vec<Arcana>,
    /// Deck as it was left when the walk stopped
    pub deck: Deck,
    /// Rooms in the order they were written, starting with the entrance
    pub path: Vec<Position>,
}

/// Configures and runs one random walk.
#[derive(Debug, Clone)]
pub struct WalkBuilder {
    grid_size: usize,
    deck: Deck,
}

impl WalkBuilder {
    /// Creates a builder for a square grid with a fresh standard deck.
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            deck: Deck::new(),
        }
    }

    /// Replaces the deck the walk is dealt from.
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    /// Runs the walk until the floor is complete.
    ///
    /// Fails with [`DungenError::NoValidDirection`] when the walk reaches a
    /// position with no room left for a hallway. Any other error means an
    /// invariant broke.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungen::{FirstChoiceRng, RoomType, WalkBuilder};
    ///
    /// let walk = WalkBuilder::new(30).build(&mut FirstChoiceRng).unwrap();
    /// assert_eq!(walk.grid.count_rooms(RoomType::Start), 1);
    /// assert!(walk.deck.cards_drawn() >= 7);
    /// ```
    pub fn build<R: RandomSource>(self, rng: &mut R) -> DungenResult<Walk> {
        let arcana = pick_arcana_pool(rng);

        let grid = Grid::new(self.grid_size)?;
        let start = Position::center(self.grid_size);

        let mut state = WalkState {
            grid,
            deck: self.deck,
            rng,
            position: start,
            direction: Direction::Right,
            hall_length: 1,
            stairs_drawn: false,
            path: Vec::new(),
        };

        state.direction = state.choose_direction(&INITIAL_DIRECTIONS)?;
        state.grid.set_room_type(start, RoomType::Start)?;
        state.path.push(start);

        while !state.is_complete() {
            state.step()?;
            if state.hall_length >= MAX_HALLWAY_LENGTH {
                state.branch()?;
            }
        }

        debug!(
            "Walk finished after {} cards with {} pending encounters",
            state.deck.cards_drawn(),
            state.grid.pending_encounters().len()
        );

        Ok(Walk {
            grid: state.grid,
            arcana,
            deck: state.deck,
            path: state.path,
        })
    }
}

struct WalkState<'r, R> {
    grid: Grid,
    deck: Deck,
    rng: &'r mut R,
    position: Position,
    direction: Direction,
    /// Rooms in the current hallway, counting the one it started from
    hall_length: usize,
    stairs_drawn: bool,
    path: Vec<Position>,
}

impl<R: RandomSource> WalkState<'_, R> {
    fn is_complete(&self) -> bool {
        self.deck.cards_drawn() >= MIN_CARDS_DRAWN && self.stairs_drawn
    }

    /// Opens a door onwards, moves through it and writes the next card.
    fn step(&mut self) -> DungenResult<()> {
        self.position = self.grid.open_passage(self.position, self.direction)?;

        let mut room_type = self.deck.draw(&mut *self.rng)?;
        if room_type == RoomType::Staircase {
            if self.stairs_drawn {
                room_type = RoomType::Safe;
            } else {
                self.stairs_drawn = true;
            }
        }

        self.grid.set_room_type(self.position, room_type)?;
        self.path.push(self.position);
        self.hall_length += 1;

        trace!("Wrote {:?} at {}", room_type, self.position);
        Ok(())
    }

    /// Backs up along the finished hallway and turns perpendicular.
    fn branch(&mut self) -> DungenResult<()> {
        let backtrack = self.rng.gen_index(1, MAX_BACKTRACK + 1);
        self.position = self.position.step(self.direction.opposite(), backtrack);
        let candidates = self.direction.perpendicular();
        self.direction = self.choose_direction(&candidates)?;
        self.hall_length = 1;

        debug!(
            "Branching {:?} from {} after backing up {} rooms",
            self.direction, self.position, backtrack
        );
        Ok(())
    }

    /// Picks uniformly among the candidates with room for a full hallway.
    fn choose_direction(&mut self, candidates: &[Direction]) -> DungenResult<Direction> {
        let mut valid = Vec::with_capacity(candidates.len());
        for &direction in candidates {
            if self.grid.can_extend(direction, self.position)? {
                valid.push(direction);
            }
        }

        self.rng
            .choose(&valid)
            .copied()
            .ok_or(DungenError::NoValidDirection {
                x: self.position.x,
                y: self.position.y,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{FirstChoiceRng, ScriptedRng};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_first_choice_walk_shape() {
        let walk = WalkBuilder::new(30).build(&mut FirstChoiceRng).unwrap();

        // Up from the center, back up one room, then right.
        let expected = vec![
            Position::new(15, 15),
            Position::new(15, 14),
            Position::new(15, 13),
            Position::new(15, 12),
            Position::new(15, 11),
            Position::new(16, 12),
            Position::new(17, 12),
            Position::new(18, 12),
        ];
        assert_eq!(walk.path, expected);
        assert_eq!(walk.deck.cards_drawn(), 7);

        let grid = &walk.grid;
        assert_eq!(grid.room_type(Position::new(15, 14)).unwrap(), RoomType::Staircase);
        assert_eq!(grid.room_type(Position::new(15, 13)).unwrap(), RoomType::Safe);
        // Upward moves put the door on the room entered.
        assert!(grid.room(Position::new(15, 14)).unwrap().down_door);
        assert!(!grid.room(Position::new(15, 15)).unwrap().down_door);
        assert!(grid.room(Position::new(15, 11)).unwrap().down_door);
        assert!(grid.room(Position::new(15, 12)).unwrap().right_door);
        assert!(!grid.room(Position::new(18, 12)).unwrap().right_door);
    }

    #[test]
    fn test_second_staircase_becomes_safe_room() {
        let deck = Deck::from_cards(vec![
            RoomType::Staircase,
            RoomType::Staircase,
            RoomType::Empty,
            RoomType::Empty,
            RoomType::Empty,
            RoomType::Empty,
            RoomType::Empty,
        ]);
        let walk = WalkBuilder::new(30)
            .with_deck(deck)
            .build(&mut FirstChoiceRng)
            .unwrap();

        let written: Vec<RoomType> = walk.path[1..3]
            .iter()
            .map(|&pos| walk.grid.room_type(pos).unwrap())
            .collect();
        assert_eq!(written, vec![RoomType::Staircase, RoomType::Safe]);
        assert_eq!(walk.grid.count_rooms(RoomType::Staircase), 1);
    }

    #[test]
    fn test_walk_continues_until_staircase() {
        let mut cards = vec![RoomType::Treasure; 11];
        cards.push(RoomType::Staircase);
        let walk = WalkBuilder::new(30)
            .with_deck(Deck::from_cards(cards))
            .build(&mut FirstChoiceRng)
            .unwrap();

        assert_eq!(walk.deck.cards_drawn(), 12);
        assert_eq!(walk.grid.count_rooms(RoomType::Staircase), 1);
    }

    #[test]
    fn test_deck_without_staircase_exhausts() {
        let walk = WalkBuilder::new(30)
            .with_deck(Deck::from_cards(vec![RoomType::Empty; 8]))
            .build(&mut FirstChoiceRng);
        assert!(matches!(walk, Err(DungenError::DeckExhausted)));
    }

    #[test]
    fn test_small_grid_has_no_valid_direction() {
        let err = WalkBuilder::new(7).build(&mut FirstChoiceRng).unwrap_err();
        assert!(err.is_dead_end());
        assert!(matches!(err, DungenError::NoValidDirection { x: 3, y: 3 }));
    }

    #[test]
    fn test_branch_with_no_perpendicular_room_dead_ends() {
        // Up to (4, 0), right along row 1 to (8, 1), down column 7 to (7, 5).
        // Backing up to (7, 4) leaves the edge on the right and the
        // entrance hallway on the left.
        let mut cards = vec![RoomType::Empty; 12];
        cards.push(RoomType::Staircase);
        let err = WalkBuilder::new(9)
            .with_deck(Deck::from_cards(cards))
            .build(&mut FirstChoiceRng)
            .unwrap_err();

        assert!(err.is_dead_end());
        assert!(matches!(err, DungenError::NoValidDirection { x: 7, y: 4 }));
    }

    #[test]
    fn test_branch_uses_scripted_backtrack() {
        // Pool size and four arcana, initial direction Down, four card
        // draws, then a backtrack of three rooms.
        let mut script = vec![0, 0, 0, 0, 0, 1];
        script.extend([0, 0, 0, 0]);
        script.push(2);
        let walk = WalkBuilder::new(30).build(&mut ScriptedRng::new(script)).unwrap();

        assert_eq!(walk.path[4], Position::new(15, 19));
        // Backed up three rooms to (15, 16) and turned right.
        assert_eq!(walk.path[5], Position::new(16, 16));
    }

    #[test]
    fn test_seeded_walks_never_overlap() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let Ok(walk) = WalkBuilder::new(30).build(&mut rng) else {
                continue;
            };

            let unique: HashSet<_> = walk.path.iter().collect();
            assert_eq!(unique.len(), walk.path.len(), "seed {seed} revisited a room");
            assert_eq!(walk.path.len(), walk.deck.cards_drawn() + 1);
            assert!(walk.deck.cards_drawn() >= MIN_CARDS_DRAWN);
            assert_eq!(walk.grid.count_rooms(RoomType::Start), 1);
            assert_eq!(walk.grid.count_rooms(RoomType::Staircase), 1);
            assert!((4..=6).contains(&walk.arcana.len()));
        }
    }
}

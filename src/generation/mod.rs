//! # Generation Module
//!
//! Procedural generation of a single dungeon floor.
//!
//! A floor is built in two passes. The [`WalkBuilder`] lays rooms out with a
//! random walk, dealing room types from a [`Deck`], and registers every combat
//! room as a pending encounter. The [`EncounterEngine`] then assigns each of
//! those a difficulty and an enemy roster. [`FloorGenerator`] wraps both passes
//! and retries walks that run into a dead end.

pub mod deck;
pub mod encounters;
pub mod walk;

pub use deck::*;
pub use encounters::*;
pub use walk::*;

use crate::config::{DEFAULT_GRID_SIZE, DEFAULT_MAX_ATTEMPTS, MAX_GRID_SIZE, MIN_CARDS_DRAWN};
use crate::floor::{FloorResult, RoomType};
use crate::utils::RandomSource;
use crate::{DungenError, DungenResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for floor generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Seed for the source that hands out per-attempt seeds
    pub seed: u64,
    /// Side length of the square grid
    pub grid_size: usize,
    /// Walks tried before giving up on dead ends
    pub max_attempts: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the default grid size and retry bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungen::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.grid_size, 30);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            grid_size: DEFAULT_GRID_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Creates a configuration for tests with a generous retry bound.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            grid_size: DEFAULT_GRID_SIZE,
            max_attempts: 32,
        }
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> DungenResult<()> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(DungenError::InvalidGridSize(self.grid_size));
        }
        if self.max_attempts == 0 {
            return Err(DungenError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate<R: RandomSource>(&self, config: &GenerationConfig, rng: &mut R) -> DungenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DungenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Builds complete floors: walk, encounters and retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorGenerator;

impl FloorGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Runs exactly one walk and encounter pass on the given source.
    ///
    /// No retry is made. A dead end comes back as
    /// [`DungenError::NoValidDirection`].
    pub fn generate_with_rng<R: RandomSource>(
        &self,
        grid_size: usize,
        rng: &mut R,
    ) -> DungenResult<FloorResult> {
        let mut walk = WalkBuilder::new(grid_size).build(rng)?;

        let pending = walk.grid.take_pending_encounters();
        let engine = EncounterEngine::new(walk.arcana);
        let encounters = engine.resolve(pending, rng)?;

        Ok(FloorResult {
            grid: walk.grid,
            arcana: engine.arcana().to_vec(),
            encounters,
            cards_drawn: walk.deck.cards_drawn(),
            seed: None,
            attempts: 1,
        })
    }

    /// Runs one attempt on a fresh [`StdRng`] seeded with `seed`.
    pub fn generate_attempt(&self, grid_size: usize, seed: u64) -> DungenResult<FloorResult> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut floor = self.generate_with_rng(grid_size, &mut rng)?;
        floor.seed = Some(seed);
        Ok(floor)
    }
}

impl Generator<FloorResult> for FloorGenerator {
    /// Tries up to `max_attempts` walks, each on its own freshly seeded source.
    ///
    /// Dead ends are retried. Any other error is returned as is, since it
    /// means an invariant broke rather than the walk being unlucky.
    fn generate<R: RandomSource>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> DungenResult<FloorResult> {
        config.validate()?;

        let mut last = None;
        for attempt in 1..=config.max_attempts {
            let seed = rng.gen_seed();
            debug!("Attempt {} of {} with seed {}", attempt, config.max_attempts, seed);

            match self.generate_attempt(config.grid_size, seed) {
                Ok(mut floor) => {
                    floor.attempts = attempt;
                    info!(
                        "Generated floor with {} rooms and {} encounters (seed {}, attempt {})",
                        floor.cards_drawn + 1,
                        floor.encounters.len(),
                        seed,
                        attempt
                    );
                    return Ok(floor);
                }
                Err(err) if err.is_dead_end() => last = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(DungenError::GenerationFailed {
            attempts: config.max_attempts,
            last: Box::new(last.unwrap_or(DungenError::InvalidConfig(
                "no attempts were made".to_string(),
            ))),
        })
    }

    fn validate(&self, floor: &FloorResult, config: &GenerationConfig) -> DungenResult<()> {
        if floor.grid.size() != config.grid_size {
            return Err(DungenError::InvalidFloor(format!(
                "grid size {} does not match configured {}",
                floor.grid.size(),
                config.grid_size
            )));
        }
        utils::validate_floor(floor)
    }

    fn generator_type(&self) -> &'static str {
        "FloorGenerator"
    }
}

/// Generates a floor on a grid of `grid_size`, seeded from OS entropy.
///
/// Dead-ended walks are retried with fresh seeds up to
/// [`DEFAULT_MAX_ATTEMPTS`] times.
pub fn generate(grid_size: usize) -> DungenResult<FloorResult> {
    generate_seeded(grid_size, rand::thread_rng().gen())
}

/// Generates a floor reproducibly from `seed`.
///
/// # Examples
///
/// ```
/// let a = dungen::generate_seeded(30, 99).unwrap();
/// let b = dungen::generate_seeded(30, 99).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_seeded(grid_size: usize, seed: u64) -> DungenResult<FloorResult> {
    let config = GenerationConfig::new(seed).with_grid_size(grid_size);
    let mut rng = StdRng::seed_from_u64(config.seed);
    FloorGenerator::new().generate(&config, &mut rng)
}

/// Utility functions for checking generated floors.
pub mod utils {
    use super::*;

    /// Checks the structural laws every finished floor obeys.
    ///
    /// - exactly one entrance and at most one staircase
    /// - one written room per drawn card besides the entrance, and at least
    ///   `MIN_CARDS_DRAWN` of them
    /// - every combat room points at a resolved encounter that points back
    /// - every roster matches a template for its difficulty
    pub fn validate_floor(floor: &FloorResult) -> DungenResult<()> {
        let grid = &floor.grid;

        let starts = grid.count_rooms(RoomType::Start);
        if starts != 1 {
            return Err(DungenError::InvalidFloor(format!(
                "expected one entrance, found {starts}"
            )));
        }

        let stairs = grid.count_rooms(RoomType::Staircase);
        if stairs > 1 {
            return Err(DungenError::InvalidFloor(format!(
                "expected at most one staircase, found {stairs}"
            )));
        }

        let rooms = grid.written_positions();
        if rooms.len() != floor.cards_drawn + 1 {
            return Err(DungenError::InvalidFloor(format!(
                "{} rooms written for {} cards drawn",
                rooms.len(),
                floor.cards_drawn
            )));
        }
        if floor.cards_drawn < MIN_CARDS_DRAWN {
            return Err(DungenError::InvalidFloor(format!(
                "only {} cards drawn",
                floor.cards_drawn
            )));
        }

        for pos in rooms {
            let room = grid.room(pos)?;
            match (room.room_type.has_encounter(), room.encounter) {
                (true, Some(id)) => {
                    let encounter = floor.encounter(id).ok_or_else(|| {
                        DungenError::InvalidFloor(format!("room {pos} lost encounter {id}"))
                    })?;
                    if encounter.position != pos {
                        return Err(DungenError::InvalidFloor(format!(
                            "encounter {id} belongs to {} but room {pos} holds it",
                            encounter.position
                        )));
                    }
                }
                (true, None) => {
                    return Err(DungenError::InvalidFloor(format!(
                        "combat room {pos} has no encounter"
                    )));
                }
                (false, Some(id)) => {
                    return Err(DungenError::InvalidFloor(format!(
                        "room {pos} holds encounter {id} but is {:?}",
                        room.room_type
                    )));
                }
                (false, None) => {}
            }
        }

        for encounter in &floor.encounters {
            if !matches_template(encounter.difficulty, &encounter.enemies) {
                return Err(DungenError::InvalidFloor(format!(
                    "encounter {} roster does not fit {}",
                    encounter.id, encounter.difficulty
                )));
            }
            if let Some(enemy) = encounter
                .enemies
                .iter()
                .find(|enemy| !floor.arcana.contains(&enemy.arcana))
            {
                return Err(DungenError::InvalidFloor(format!(
                    "encounter {} uses {} from outside the floor's arcana",
                    encounter.id, enemy.arcana
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::Position;
    use crate::utils::{FirstChoiceRng, ScriptedRng};

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(GenerationConfig::default().seed, 42);
    }

    #[test]
    fn test_generation_config_validation() {
        assert!(GenerationConfig::new(1).with_grid_size(0).validate().is_err());
        assert!(GenerationConfig::new(1).with_max_attempts(0).validate().is_err());
        assert!(GenerationConfig::new(1)
            .with_grid_size(MAX_GRID_SIZE)
            .validate()
            .is_ok());
        assert!(matches!(
            GenerationConfig::new(1)
                .with_grid_size(MAX_GRID_SIZE + 1)
                .validate(),
            Err(DungenError::InvalidGridSize(_))
        ));
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_generation_config_serializes() {
        let config = GenerationConfig::for_testing(77).with_grid_size(40);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_single_attempt_with_first_choice() {
        let floor = FloorGenerator::new()
            .generate_with_rng(30, &mut FirstChoiceRng)
            .unwrap();

        assert_eq!(floor.attempts, 1);
        assert_eq!(floor.seed, None);
        assert_eq!(floor.cards_drawn, 7);
        // Staircase, safe, treasure x4, empty: no combat rooms.
        assert!(floor.encounters.is_empty());
        assert!(utils::validate_floor(&floor).is_ok());
    }

    #[test]
    fn test_generate_retries_dead_ends() {
        // A 7x7 grid can never fit a hallway from its center.
        let config = GenerationConfig::new(5).with_grid_size(7).with_max_attempts(3);
        let result = FloorGenerator::new().generate(&config, &mut ScriptedRng::default());

        match result {
            Err(DungenError::GenerationFailed { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(last.is_dead_end());
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    /// Script that makes `gen_seed` hand out `seeds` in order.
    fn seed_script(seeds: &[u64]) -> Vec<usize> {
        seeds
            .iter()
            .flat_map(|&seed| {
                (0..4)
                    .rev()
                    .map(move |chunk| ((seed >> (chunk * 16)) & 0xffff) as usize)
            })
            .collect()
    }

    #[test]
    fn test_generate_retries_dead_end_at_branch() {
        let generator = FloorGenerator::new();
        let center = Position::center(12);

        // Every direction fits from the center of a 12x12 grid, so any dead
        // end there happens at a branch.
        let (dead_seed, err) = (0..2000)
            .find_map(|seed| match generator.generate_attempt(12, seed) {
                Err(err) => Some((seed, err)),
                Ok(_) => None,
            })
            .expect("no dead end among 2000 seeds");
        match err {
            DungenError::NoValidDirection { x, y } => assert_ne!(Position::new(x, y), center),
            other => panic!("seed {dead_seed} failed with {other}"),
        }

        let good_seed = (0..2000)
            .find(|&seed| generator.generate_attempt(12, seed).is_ok())
            .expect("no successful seed among 2000");

        let config = GenerationConfig::new(0).with_grid_size(12).with_max_attempts(2);
        let mut rng = ScriptedRng::new(seed_script(&[dead_seed, good_seed]));
        let floor = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(floor.attempts, 2);
        assert_eq!(floor.seed, Some(good_seed));

        let config = config.with_max_attempts(1);
        let mut rng = ScriptedRng::new(seed_script(&[dead_seed]));
        match generator.generate(&config, &mut rng) {
            Err(DungenError::GenerationFailed { attempts, last }) => {
                assert_eq!(attempts, 1);
                assert!(matches!(*last, DungenError::NoValidDirection { .. }));
            }
            other => panic!("expected GenerationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let config = GenerationConfig::new(5).with_grid_size(0);
        let result = FloorGenerator::new().generate(&config, &mut FirstChoiceRng);
        assert!(matches!(result, Err(DungenError::InvalidGridSize(0))));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = generate_seeded(30, 31337).unwrap();
        let second = generate_seeded(30, 31337).unwrap();
        assert_eq!(first, second);

        let seed = first.seed.unwrap();
        let replayed = FloorGenerator::new().generate_attempt(30, seed).unwrap();
        assert_eq!(replayed.grid, first.grid);
        assert_eq!(replayed.encounters, first.encounters);
    }

    #[test]
    fn test_generated_floors_validate() {
        let generator = FloorGenerator::new();
        for seed in 0..50 {
            let config = GenerationConfig::for_testing(seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let floor = generator.generate(&config, &mut rng).unwrap();
            assert!(generator.validate(&floor, &config).is_ok(), "seed {seed}");
            assert!(floor.attempts <= config.max_attempts);
        }
        assert_eq!(generator.generator_type(), "FloorGenerator");
    }

    #[test]
    fn test_validation_catches_broken_floor() {
        let mut floor = FloorGenerator::new()
            .generate_with_rng(30, &mut FirstChoiceRng)
            .unwrap();
        floor.cards_drawn += 1;
        assert!(matches!(
            utils::validate_floor(&floor),
            Err(DungenError::InvalidFloor(_))
        ));
    }
}

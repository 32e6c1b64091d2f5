//! # Encounter Generation
//!
//! Resolves the encounters a walk registered. Difficulties are dealt from a
//! table keyed on how many encounters the floor has, then each encounter
//! gets one of three fixed enemy templates for its difficulty, with arcana
//! drawn from the floor's pool.

use crate::config::{MAX_ARCANA_POOL, MAX_ENCOUNTERS, MIN_ARCANA_POOL};
use crate::floor::{Arcana, Difficulty, Encounter, Enemy, PendingEncounter, RelativeLevel};
use crate::utils::RandomSource;
use crate::{DungenError, DungenResult};
use log::debug;

use Difficulty::{Difficult, Easy, Intermediate};
use RelativeLevel::{Above, At, Below};

/// Enemy level templates per difficulty, three options each.
pub const ROSTER_TEMPLATES: [(Difficulty, [&[RelativeLevel]; 3]); 3] = [
    (Easy, [&[Above], &[At, Below], &[Below, Below]]),
    (
        Intermediate,
        [&[Above, Above], &[At, At, Below], &[Below, Below, Below]],
    ),
    (
        Difficult,
        [
            &[Above, At, At],
            &[At, At, Below, Below],
            &[Below, Below, Below, Below],
        ],
    ),
];

/// The three roster templates for a difficulty.
pub fn roster_templates(difficulty: Difficulty) -> [&'static [RelativeLevel]; 3] {
    match difficulty {
        Easy => ROSTER_TEMPLATES[0].1,
        Intermediate => ROSTER_TEMPLATES[1].1,
        Difficult => ROSTER_TEMPLATES[2].1,
    }
}

/// Selects 4 to 6 distinct arcana for a floor.
pub fn pick_arcana_pool<R: RandomSource>(rng: &mut R) -> Vec<Arcana> {
    let size = rng.gen_index(MIN_ARCANA_POOL, MAX_ARCANA_POOL + 1);
    rng.sample_distinct(&Arcana::ALL, size)
}

/// Builds the multiset of difficulties for a floor with `count` encounters.
///
/// | count | difficulties |
/// |-------|--------------|
/// | 0-3   | all difficult |
/// | 4-6   | 1 difficult, 1 intermediate, 2 easy, rest drawn from {intermediate, easy} |
/// | 7-9   | 3 easy, 2 intermediate, rest drawn from {easy x2, intermediate x2} |
pub fn difficulty_distribution<R: RandomSource>(
    count: usize,
    rng: &mut R,
) -> DungenResult<Vec<Difficulty>> {
    let difficulties = match count {
        0..=3 => vec![Difficult; count],
        4..=6 => {
            let mut base = vec![Difficult, Intermediate, Easy, Easy];
            base.extend(rng.sample_distinct(&[Intermediate, Easy], count - 4));
            base
        }
        7..=MAX_ENCOUNTERS => {
            let mut base = vec![Easy, Easy, Easy, Intermediate, Intermediate];
            base.extend(rng.sample_distinct(&[Easy, Easy, Intermediate, Intermediate], count - 5));
            base
        }
        _ => return Err(DungenError::TooManyEncounters(count)),
    };

    Ok(difficulties)
}

/// Resolves pending encounters against a floor's arcana pool.
#[derive(Debug, Clone)]
pub struct EncounterEngine {
    arcana: Vec<Arcana>,
}

impl EncounterEngine {
    pub fn new(arcana: Vec<Arcana>) -> Self {
        Self { arcana }
    }

    pub fn arcana(&self) -> &[Arcana] {
        &self.arcana
    }

    /// Deals a difficulty to every pending encounter and fills its roster.
    ///
    /// Difficulties are removed from the distribution at random, so which
    /// encounter gets which tier does not depend on write order.
    pub fn resolve<R: RandomSource>(
        &self,
        pending: Vec<PendingEncounter>,
        rng: &mut R,
    ) -> DungenResult<Vec<Encounter>> {
        if pending.is_empty() {
            return Ok(Vec::new());
        }
        if self.arcana.is_empty() {
            return Err(DungenError::EmptyArcanaPool);
        }

        let mut difficulties = difficulty_distribution(pending.len(), rng)?;
        let mut encounters = Vec::with_capacity(pending.len());

        for encounter in pending {
            let idx = rng.gen_index(0, difficulties.len());
            let difficulty = difficulties.remove(idx);
            let enemies = self.roll_roster(difficulty, rng)?;

            debug!(
                "Encounter {} at {} is {} with {} enemies",
                encounter.id,
                encounter.position,
                difficulty,
                enemies.len()
            );
            encounters.push(encounter.resolve(difficulty, enemies));
        }

        Ok(encounters)
    }

    /// Picks a template for `difficulty` and draws an arcana for each enemy.
    pub fn roll_roster<R: RandomSource>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> DungenResult<Vec<Enemy>> {
        let templates = roster_templates(difficulty);
        let template = templates[rng.gen_index(0, templates.len())];

        let mut enemies = Vec::with_capacity(template.len());
        for &level in template {
            let arcana = *rng.choose(&self.arcana).ok_or(DungenError::EmptyArcanaPool)?;
            enemies.push(Enemy::new(arcana, level));
        }
        rng.shuffle(&mut enemies);

        Ok(enemies)
    }
}

/// Whether a roster's levels match one of the templates for `difficulty`.
pub fn matches_template(difficulty: Difficulty, enemies: &[Enemy]) -> bool {
    let mut levels: Vec<RelativeLevel> = enemies.iter().map(|enemy| enemy.level).collect();
    levels.sort_unstable();

    roster_templates(difficulty).iter().any(|template| {
        let mut expected = template.to_vec();
        expected.sort_unstable();
        expected == levels
    })
}

//! # Encounters
//!
//! Combat content of enemy and guarded treasure rooms. An encounter is
//! registered as a [`PendingEncounter`] when its room is written and becomes
//! an [`Encounter`] once the floor's difficulties have been dealt out.

use crate::floor::Position;
use serde::{Deserialize, Serialize};

/// The 22 Major Arcana. Each names a family of enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Arcana {
    Fool,
    Magician,
    HighPriestess,
    Empress,
    Emperor,
    Hierophant,
    Lovers,
    Chariot,
    Strength,
    Hermit,
    WheelOfFortune,
    Justice,
    HangedMan,
    Death,
    Temperance,
    Devil,
    Tower,
    Star,
    Moon,
    Sun,
    Judgement,
    World,
}

impl Arcana {
    /// All arcana in card order.
    pub const ALL: [Arcana; 22] = [
        Arcana::Fool,
        Arcana::Magician,
        Arcana::HighPriestess,
        Arcana::Empress,
        Arcana::Emperor,
        Arcana::Hierophant,
        Arcana::Lovers,
        Arcana::Chariot,
        Arcana::Strength,
        Arcana::Hermit,
        Arcana::WheelOfFortune,
        Arcana::Justice,
        Arcana::HangedMan,
        Arcana::Death,
        Arcana::Temperance,
        Arcana::Devil,
        Arcana::Tower,
        Arcana::Star,
        Arcana::Moon,
        Arcana::Sun,
        Arcana::Judgement,
        Arcana::World,
    ];

    /// Card number, from 0 for the Fool to 21 for the World.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Arcana::Fool => "The Fool",
            Arcana::Magician => "The Magician",
            Arcana::HighPriestess => "The High Priestess",
            Arcana::Empress => "The Empress",
            Arcana::Emperor => "The Emperor",
            Arcana::Hierophant => "The Hierophant",
            Arcana::Lovers => "The Lovers",
            Arcana::Chariot => "The Chariot",
            Arcana::Strength => "Strength",
            Arcana::Hermit => "The Hermit",
            Arcana::WheelOfFortune => "Wheel of Fortune",
            Arcana::Justice => "Justice",
            Arcana::HangedMan => "The Hanged Man",
            Arcana::Death => "Death",
            Arcana::Temperance => "Temperance",
            Arcana::Devil => "The Devil",
            Arcana::Tower => "The Tower",
            Arcana::Star => "The Star",
            Arcana::Moon => "The Moon",
            Arcana::Sun => "The Sun",
            Arcana::Judgement => "Judgement",
            Arcana::World => "The World",
        }
    }
}

impl std::fmt::Display for Arcana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encounter difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Intermediate,
    Difficult,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Difficult,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Difficult => "Difficult",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Enemy level relative to the dungeon's world level (WL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelativeLevel {
    /// One level below WL
    Below,
    /// At WL
    At,
    /// One level above WL
    Above,
}

impl RelativeLevel {
    /// Offset from the world level: -1, 0 or +1.
    pub fn offset(self) -> i8 {
        match self {
            RelativeLevel::Below => -1,
            RelativeLevel::At => 0,
            RelativeLevel::Above => 1,
        }
    }

    /// Level for a concrete world level, floored at zero.
    pub fn apply(self, world_level: u32) -> u32 {
        world_level.saturating_add_signed(self.offset() as i32)
    }
}

impl std::fmt::Display for RelativeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelativeLevel::Below => f.write_str("WL-1"),
            RelativeLevel::At => f.write_str("WL"),
            RelativeLevel::Above => f.write_str("WL+1"),
        }
    }
}

/// One enemy in an encounter roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enemy {
    pub arcana: Arcana,
    pub level: RelativeLevel,
}

impl Enemy {
    pub fn new(arcana: Arcana, level: RelativeLevel) -> Self {
        Self { arcana, level }
    }
}

impl std::fmt::Display for Enemy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.arcana, self.level)
    }
}

/// Identifier of an encounter, unique within one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncounterId(pub u32);

impl std::fmt::Display for EncounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encounter registered during the walk, waiting for a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEncounter {
    pub id: EncounterId,
    /// Room holding the encounter
    pub position: Position,
}

impl PendingEncounter {
    pub fn new(id: EncounterId, position: Position) -> Self {
        Self { id, position }
    }

    /// Fixes the difficulty and roster, producing the final encounter.
    pub fn resolve(self, difficulty: Difficulty, enemies: Vec<Enemy>) -> Encounter {
        Encounter {
            id: self.id,
            position: self.position,
            difficulty,
            enemies,
        }
    }
}

/// Resolved encounter with its difficulty and enemy roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: EncounterId,
    pub position: Position,
    pub difficulty: Difficulty,
    pub enemies: Vec<Enemy>,
}

impl Encounter {
    /// Counts enemies at each relative level as `(above, at, below)`.
    pub fn level_counts(&self) -> (usize, usize, usize) {
        self.enemies
            .iter()
            .fold((0, 0, 0), |(above, at, below), enemy| match enemy.level {
                RelativeLevel::Above => (above + 1, at, below),
                RelativeLevel::At => (above, at + 1, below),
                RelativeLevel::Below => (above, at, below + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcana_are_numbered_in_card_order() {
        for (i, arcana) in Arcana::ALL.iter().enumerate() {
            assert_eq!(arcana.number() as usize, i);
        }
        assert_eq!(Arcana::World.name(), "The World");
        assert_eq!(Arcana::WheelOfFortune.to_string(), "Wheel of Fortune");
    }

    #[test]
    fn test_relative_levels() {
        assert_eq!(RelativeLevel::Above.offset(), 1);
        assert_eq!(RelativeLevel::Below.apply(5), 4);
        assert_eq!(RelativeLevel::Below.apply(0), 0);
        assert_eq!(RelativeLevel::At.apply(3), 3);
        assert_eq!(RelativeLevel::Above.to_string(), "WL+1");
    }

    #[test]
    fn test_resolve_keeps_identity() {
        let pending = PendingEncounter::new(EncounterId(4), Position::new(3, 9));
        let enemies = vec![
            Enemy::new(Arcana::Tower, RelativeLevel::At),
            Enemy::new(Arcana::Moon, RelativeLevel::Below),
        ];

        let encounter = pending.resolve(Difficulty::Easy, enemies.clone());
        assert_eq!(encounter.id, EncounterId(4));
        assert_eq!(encounter.position, Position::new(3, 9));
        assert_eq!(encounter.enemies, enemies);
        assert_eq!(encounter.level_counts(), (0, 1, 1));
        assert_eq!(encounter.enemies[0].to_string(), "The Tower WL");
    }
}

//! # Room Deck
//!
//! The weighted bag of room types a floor is dealt from. Specific arcana
//! are not represented, only how many cards map to each room type.

use crate::floor::RoomType;
use crate::utils::RandomSource;
use crate::{DungenError, DungenResult};

/// Card counts of a fresh deck, 22 cards in total.
pub const STANDARD_COMPOSITION: [(RoomType, usize); 8] = [
    (RoomType::Staircase, 2),
    (RoomType::Treasure, 4),
    (RoomType::Empty, 3),
    (RoomType::Safe, 2),
    (RoomType::GuardedTreasure, 1),
    (RoomType::Hazard, 2),
    (RoomType::Death, 1),
    (RoomType::Enemy, 7),
];

/// Room-type cards drawn uniformly at random without replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<RoomType>,
    initial_count: usize,
}

impl Deck {
    /// Creates a full deck with cards in declaration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungen::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.remaining(), 22);
    /// assert_eq!(deck.cards_drawn(), 0);
    /// ```
    pub fn new() -> Self {
        let cards = STANDARD_COMPOSITION
            .iter()
            .flat_map(|&(room_type, count)| std::iter::repeat(room_type).take(count))
            .collect();
        Self::from_cards(cards)
    }

    /// Creates a deck holding exactly the given cards.
    pub fn from_cards(cards: Vec<RoomType>) -> Self {
        let initial_count = cards.len();
        Self {
            cards,
            initial_count,
        }
    }

    /// Removes and returns one remaining card chosen uniformly at random.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> DungenResult<RoomType> {
        if self.cards.is_empty() {
            return Err(DungenError::DeckExhausted);
        }
        let idx = rng.gen_index(0, self.cards.len());
        Ok(self.cards.remove(idx))
    }

    pub fn cards_drawn(&self) -> usize {
        self.initial_count - self.cards.len()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards of the given type.
    pub fn count(&self, room_type: RoomType) -> usize {
        self.cards.iter().filter(|&&card| card == room_type).count()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

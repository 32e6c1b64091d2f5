//! # Utilities Module
//!
//! Random sources shared by the generation passes.

pub mod random;

pub use random::*;

//! League business logic: rating, bracket drawing, round progression and
//! the tournament phase transitions.

pub mod advance;
pub mod bracket;
pub mod elo;
pub mod export;
pub mod league;
pub mod rankings;
pub mod tournament;

pub use advance::{advance, NextRoundResult};
pub use bracket::generate;
pub use elo::rate;
pub use league::{BracketSlotView, LeagueView, MatchSummary};
pub use tournament::RoundOutcome;

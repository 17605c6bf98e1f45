//! Доменная модель стола: места, кольцо обхода, фишки, карты борда.

pub mod card;
pub mod chips;
pub mod ring;
pub mod seat;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Seat и т.п.
pub use card::*;
pub use chips::*;
pub use ring::*;
pub use seat::*;

use crate::domain::{CardParseError, RingError, SeatIndex};

use thiserror::Error;

/// Ошибки движка состояния стола.
///
/// Все они восстановимые: процесс из-за них не падает.
/// Разрыв кольца сюда не входит – это баг, ловится debug-ассертами.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// За столом нет мест – вызывающему стоит считать, что стола нет.
    #[error("за столом нет мест")]
    EmptyRing,

    /// Нет активных мест (или осталось одно) – играть некому, ждём возвращения игроков.
    #[error("стол застрял: некому ходить")]
    Stalled,

    #[error("игрок `{0}` не найден за столом")]
    UnknownSeat(String),

    #[error("игрок `{0}` уже сидит за столом")]
    DuplicateSeat(String),

    #[error("места с индексом {0} нет за столом")]
    InvalidSeat(SeatIndex),

    #[error("некорректная карта: {0}")]
    Card(#[from] CardParseError),
}

impl From<RingError> for TableError {
    fn from(e: RingError) -> Self {
        match e {
            RingError::Empty => TableError::EmptyRing,
            RingError::InvalidSeat(idx) => TableError::InvalidSeat(idx),
            RingError::DuplicateIdentity(identity) => TableError::DuplicateSeat(identity),
        }
    }
}

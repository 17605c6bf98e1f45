use crate::domain::{Move, Seat};

/// Обработчик хода: что происходит с игроком, когда до него дошла очередь.
///
/// Реальная логика ставок сюда подключается снаружи; движок только
/// вызывает обработчик для текущего игрока и двигает очередь дальше.
pub trait TurnProcessor {
    /// Обработать ход игрока и вернуть его действие.
    /// Движок сам запишет результат в `last_move`.
    fn process_turn(&mut self, seat: &mut Seat) -> Move;
}

/// Заглушка по умолчанию: каждый ход – check.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckingProcessor;

impl TurnProcessor for CheckingProcessor {
    fn process_turn(&mut self, seat: &mut Seat) -> Move {
        tracing::info!("processing turn for {}", seat.identity());
        Move::Check
    }
}

/// Любое замыкание `FnMut(&mut Seat) -> Move` тоже годится как обработчик.
impl<F> TurnProcessor for F
where
    F: FnMut(&mut Seat) -> Move,
{
    fn process_turn(&mut self, seat: &mut Seat) -> Move {
        self(seat)
    }
}

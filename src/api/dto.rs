use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::Move;
use crate::engine::TableEvent;

/// DTO места за столом. Это копия, а не ссылка: топологию через неё не сломать.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatDto {
    pub seat_index: usize,
    pub identity: String,
    pub chip_amount: Chips,
    pub current_bet: Chips,
    pub last_move: Option<Move>,
    pub active: bool,
    pub is_dealer: bool,
    pub is_current_actor: bool,
}

/// Блайнды в виде identity игроков.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindsDto {
    pub small_blind: Option<String>,
    pub big_blind: Option<String>,
}

/// Состояние очереди хода для фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnStateDto {
    Idle,
    Awaiting(String),
    Stalled(String),
}

/// Полный снимок стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub seats: Vec<SeatDto>,
    /// Карты борда строками, как их прислал детектор.
    pub community_cards: Vec<String>,
    pub dealer: Option<String>,
    pub current_actor: Option<String>,
    pub blinds: BlindsDto,
    pub turn_state: TurnStateDto,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Игрок сверен: место и было ли оно новым.
    Reconciled { seat: SeatDto, added: bool },

    /// Новая кнопка (и она же текущий игрок).
    Dealer(Option<SeatDto>),

    /// Ход обработан, вот следующий игрок (None – за столом никого).
    NextActor(Option<SeatDto>),

    /// Вернуть обновлённое состояние стола.
    TableState(TableSnapshot),
}

/// События стола, накопленные с прошлого запроса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventsDto {
    pub events: Vec<TableEvent>,
}

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::{Move, SeatIndex};

/// Тип события на столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableEventKind {
    /// Места заменены целиком, кольцо построено заново.
    SeatsRebuilt { seat_count: usize },

    /// Новый игрок добавлен в конец кольца.
    SeatAdded { seat: SeatIndex, identity: String },

    /// Данные существующего игрока перезаписаны.
    SeatUpdated { seat: SeatIndex, identity: String },

    /// Кнопка выставлена впервые (после построения кольца).
    DealerAssigned { seat: SeatIndex },

    /// Кнопка передвинута между раздачами.
    DealerRotated { from: SeatIndex, to: SeatIndex },

    /// Игрок сходил, очередь перешла дальше.
    TurnProcessed {
        seat: SeatIndex,
        identity: String,
        action: Move,
        next: SeatIndex,
    },

    /// Очередь упёрлась в стол без активных соперников.
    Stalled { seat: SeatIndex },

    /// Открыты общие карты (идентификаторы как пришли от детектора).
    BoardSet { cards: Vec<String> },

    /// Борд очищен между раздачами.
    BoardCleared,
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableEvent {
    pub index: u64,
    pub kind: TableEventKind,
}

/// Сколько событий журнал держит по умолчанию.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1_024;

/// Журнал событий стола для слоя отображения.
///
/// Ограничен по размеру: при переполнении выбрасываются самые старые события.
/// Номера сквозные: ни вытеснение, ни `take_events` счётчик не сбрасывают,
/// так что потребитель видит пропуск по номерам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableHistory {
    events: VecDeque<TableEvent>,
    capacity: usize,
    next_index: u64,
}

impl Default for TableHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl TableHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Журнал на `capacity` событий (минимум одно).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            next_index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Поменять лимит; лишние старые события сразу вытесняются.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    pub fn push(&mut self, kind: TableEventKind) {
        let index = self.next_index;
        self.next_index += 1;
        self.events.push_back(TableEvent { index, kind });
        self.evict();
    }

    pub fn events(&self) -> impl Iterator<Item = &TableEvent> + '_ {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&TableEvent> {
        self.events.back()
    }

    /// Номер, который получит следующее событие.
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    pub fn take_events(&mut self) -> Vec<TableEvent> {
        self.events.drain(..).collect()
    }

    fn evict(&mut self) {
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }
}

//! Движок состояния стола поверх кольца мест.
//!
//! Высокоуровневый объект: `TableController`
//! Основные операции:
//!   - `reconcile` – сверить факт об игроке от детектора
//!   - `assign_initial_dealer` / `rotate_dealer` / `assign_blinds` – кнопка и блайнды
//!   - `advance_turn` – обработать ход текущего игрока и передать очередь

pub mod controller;
pub mod errors;
pub mod history;
pub mod turn;

pub use controller::{Reconciled, TableController, TurnState};
pub use errors::TableError;
pub use history::{TableEvent, TableEventKind, TableHistory, DEFAULT_HISTORY_CAPACITY};
pub use turn::{CheckingProcessor, TurnProcessor};

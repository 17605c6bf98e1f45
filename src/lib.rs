//! Трекер состояния покерного стола.
//!
//! Кто сидит, кто ходит, где кнопка и блайнды, как двигается очередь,
//! когда игроки уходят в sit out и возвращаются. Факты о столе приходят
//! снаружи (детектор по кадрам экрана), движок только сверяет их и ведёт очередь.
//!
//! Здесь же описываем ABI (Operation / Query / Response) для Linera.

pub mod api;
pub mod detection;
pub mod domain;
pub mod engine;
pub mod infra;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, CommandResponse, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TableOperation {
    Command(Command),
}

/// Запросы к сервису (read-only).
pub type TableQuery = Query;

/// Ответы на запросы.
pub type TableQueryResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct TableTrackerAbi;

impl ContractAbi for TableTrackerAbi {
    type Operation = TableOperation;
    type Response = CommandResponse;
}

impl ServiceAbi for TableTrackerAbi {
    type Query = TableQuery;
    type QueryResponse = TableQueryResponse;
}

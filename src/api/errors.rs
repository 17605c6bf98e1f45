use serde::{Deserialize, Serialize};

use crate::engine::TableError;

/// Ошибки внешнего API (то, что отдаём фронту / продюсеру).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON или карта `Zz`).
    BadRequest(String),

    /// Игрок не найден за столом.
    UnknownSeat(String),

    /// За столом нет мест.
    EmptyTable,

    /// Играть некому – ждём, пока кто-то вернётся в игру.
    Stalled,

    /// Прочие ошибки движка.
    EngineError(String),
}

impl From<TableError> for ApiError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::UnknownSeat(identity) => ApiError::UnknownSeat(identity),
            TableError::EmptyRing => ApiError::EmptyTable,
            TableError::Stalled => ApiError::Stalled,
            TableError::Card(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::EngineError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

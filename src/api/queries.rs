use serde::{Deserialize, Serialize};

use crate::api::dto::{BlindsDto, EventsDto, SeatDto, TableSnapshot, TurnStateDto};
use crate::api::errors::ApiError;
use crate::engine::{TableController, TurnProcessor};
use crate::infra::mapping::{blinds_to_dto, seat_to_dto, table_to_snapshot, turn_state_to_dto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Полный снимок стола.
    GetTable,

    /// Одно место по identity.
    GetSeat { identity: String },

    /// Текущие блайнды.
    GetBlinds,

    /// Чей ход / застрял ли стол.
    GetTurnState,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableSnapshot),
    Seat(SeatDto),
    Blinds(BlindsDto),
    TurnState(TurnStateDto),
    Events(EventsDto),
}

/// Ответить на запрос. Стол не меняется.
pub fn run_query<P: TurnProcessor>(
    table: &TableController<P>,
    query: &Query,
) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetTable => Ok(QueryResponse::Table(table_to_snapshot(table))),

        Query::GetSeat { identity } => {
            let idx = table.seat_index(identity)?;
            seat_to_dto(table, idx)
                .map(QueryResponse::Seat)
                .ok_or_else(|| ApiError::UnknownSeat(identity.clone()))
        }

        Query::GetBlinds => Ok(QueryResponse::Blinds(blinds_to_dto(table))),

        Query::GetTurnState => Ok(QueryResponse::TurnState(turn_state_to_dto(table))),
    }
}

/// Забрать накопленные события стола. Единственный «запрос», который
/// опустошает журнал, поэтому требует `&mut`.
pub fn drain_events<P: TurnProcessor>(table: &mut TableController<P>) -> QueryResponse {
    QueryResponse::Events(EventsDto {
        events: table.take_events(),
    })
}

use crate::api::dto::{BlindsDto, SeatDto, TableSnapshot, TurnStateDto};
use crate::domain::ring::SeatIndex;
use crate::engine::{TableController, TurnProcessor, TurnState};

/// Маппинг одного места в DTO (с пометками кнопки и текущего хода).
pub fn seat_to_dto<P: TurnProcessor>(table: &TableController<P>, index: SeatIndex) -> Option<SeatDto> {
    let seat = table.seat_at(index)?;
    Some(SeatDto {
        seat_index: index,
        identity: seat.identity().to_string(),
        chip_amount: seat.chip_amount(),
        current_bet: seat.current_bet(),
        last_move: seat.last_move(),
        active: seat.is_active(),
        is_dealer: table.dealer_index() == Some(index),
        is_current_actor: table.current_actor_index() == Some(index),
    })
}

pub fn identity_at<P: TurnProcessor>(table: &TableController<P>, index: Option<SeatIndex>) -> Option<String> {
    index
        .and_then(|idx| table.seat_at(idx))
        .map(|seat| seat.identity().to_string())
}

pub fn turn_state_to_dto<P: TurnProcessor>(table: &TableController<P>) -> TurnStateDto {
    match table.turn_state() {
        TurnState::Idle => TurnStateDto::Idle,
        TurnState::Awaiting(idx) => {
            TurnStateDto::Awaiting(identity_at(table, Some(idx)).unwrap_or_default())
        }
        TurnState::Stalled(idx) => {
            TurnStateDto::Stalled(identity_at(table, Some(idx)).unwrap_or_default())
        }
    }
}

pub fn blinds_to_dto<P: TurnProcessor>(table: &TableController<P>) -> BlindsDto {
    let (small_blind, big_blind) = table.assign_blinds();
    BlindsDto {
        small_blind: identity_at(table, small_blind),
        big_blind: identity_at(table, big_blind),
    }
}

/// Утилита: полный снимок стола (Table -> TableSnapshot).
pub fn table_to_snapshot<P: TurnProcessor>(table: &TableController<P>) -> TableSnapshot {
    let seats = (0..table.seat_count())
        .filter_map(|idx| seat_to_dto(table, idx))
        .collect();

    TableSnapshot {
        seats,
        community_cards: table.community_cards().to_vec(),
        dealer: identity_at(table, table.dealer_index()),
        current_actor: identity_at(table, table.current_actor_index()),
        blinds: blinds_to_dto(table),
        turn_state: turn_state_to_dto(table),
    }
}


use serde::{Deserialize, Serialize};

use crate::api::dto::CommandResponse;
use crate::api::errors::ApiError;
use crate::domain::seat::{PlayerFact, Seat};
use crate::engine::{Reconciled, TableController, TurnProcessor};
use crate::infra::mapping::{seat_to_dto, table_to_snapshot};

/// Команды, меняющие состояние стола.
///
/// Приходят от двух сторон: детектор шлёт `Reconcile`,
/// слой отображения/решений двигает очередь и кнопку.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Факт об игроке от детектора (создаёт место, если игрока ещё нет).
    Reconcile(PlayerFact),

    /// Заменить всех игроков разом.
    SetSeats(Vec<PlayerFact>),

    /// Посадить в игру / вывести в sit out.
    SetActive { identity: String, active: bool },

    /// Выставить первую кнопку.
    AssignInitialDealer,

    /// Передвинуть кнопку между раздачами.
    RotateDealer,

    /// Обработать ход текущего игрока.
    AdvanceTurn,

    /// Общие карты строками (`Ah`, `Td`, `10c`), сохраняются как есть.
    SetCommunityCards(Vec<String>),

    /// Очистить борд.
    ClearCommunityCards,
}

/// Разобрать команду из JSON (так её присылает продюсер).
pub fn decode_command(json: &str) -> Result<Command, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Выполнить команду над столом.
pub fn execute<P: TurnProcessor>(
    table: &mut TableController<P>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::Reconcile(fact) => {
            let outcome = table.reconcile(fact);
            let seat = seat_to_dto(table, outcome.seat())
                .ok_or_else(|| ApiError::EngineError("место пропало после сверки".into()))?;
            Ok(CommandResponse::Reconciled {
                seat,
                added: matches!(outcome, Reconciled::Added(_)),
            })
        }

        Command::SetSeats(facts) => {
            let seats = facts.into_iter().map(Seat::from).collect();
            table.set_seats(seats)?;
            Ok(CommandResponse::TableState(table_to_snapshot(table)))
        }

        Command::SetActive { identity, active } => {
            table.set_active(&identity, active)?;
            Ok(CommandResponse::TableState(table_to_snapshot(table)))
        }

        Command::AssignInitialDealer => {
            let dealer = table.assign_initial_dealer()?;
            Ok(CommandResponse::Dealer(seat_to_dto(table, dealer)))
        }

        Command::RotateDealer => {
            let dealer = table.rotate_dealer();
            Ok(CommandResponse::Dealer(
                dealer.and_then(|idx| seat_to_dto(table, idx)),
            ))
        }

        Command::AdvanceTurn => {
            let next = table.advance_turn();
            Ok(CommandResponse::NextActor(
                next.and_then(|idx| seat_to_dto(table, idx)),
            ))
        }

        Command::SetCommunityCards(ids) => {
            table.set_community_cards(ids);
            Ok(CommandResponse::Ok)
        }

        Command::ClearCommunityCards => {
            table.clear_community_cards();
            Ok(CommandResponse::Ok)
        }
    }
}

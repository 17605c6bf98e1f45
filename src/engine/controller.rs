// src/engine/controller.rs

use core::fmt;

use crate::domain::card::Card;
use crate::domain::ring::{SeatIndex, SeatRing};
use crate::domain::seat::{PlayerFact, Seat};
use crate::engine::errors::TableError;
use crate::engine::history::{TableEvent, TableEventKind, TableHistory};
use crate::engine::turn::{CheckingProcessor, TurnProcessor};

/// Итог `reconcile`: что произошло с местом игрока.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// Игрок уже сидел, поля перезаписаны.
    Updated(SeatIndex),
    /// Игрок уже сидел и факт ничего не поменял.
    Unchanged(SeatIndex),
    /// Новый игрок добавлен в конец кольца.
    Added(SeatIndex),
}

impl Reconciled {
    pub fn seat(self) -> SeatIndex {
        match self {
            Reconciled::Updated(s) | Reconciled::Unchanged(s) | Reconciled::Added(s) => s,
        }
    }
}

/// Состояние очереди хода.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    /// Мест нет или кнопка ещё не выставлена.
    Idle,
    /// Ждём действия от этого места.
    Awaiting(SeatIndex),
    /// Ходить некому: активных мест нет, либо текущее – единственное.
    Stalled(SeatIndex),
}

/// Контроллер стола: кнопка, блайнды, очередь хода и сверка фактов от детектора.
///
/// Кнопка и текущий игрок хранятся как индексы в кольце, а не ссылки.
/// Индексы стабильны: новое место всегда добавляется в конец.
///
/// Контроллер однопоточный по контракту: все мутации одного стола
/// должны идти последовательно (см. `infra::SharedTable`).
#[derive(Debug)]
pub struct TableController<P: TurnProcessor = CheckingProcessor> {
    ring: SeatRing,
    community_cards: Vec<String>,
    dealer: Option<SeatIndex>,
    current_actor: Option<SeatIndex>,
    processor: P,
    history: TableHistory,
}

impl TableController<CheckingProcessor> {
    /// Стол из начального списка мест с обработчиком-заглушкой.
    /// Если места есть, кнопка сразу выставляется (`assign_initial_dealer`).
    pub fn new(seats: Vec<Seat>) -> Result<Self, TableError> {
        Self::with_processor(seats, CheckingProcessor)
    }

    /// Пустой стол.
    pub fn empty() -> Self {
        Self::from_parts(SeatRing::new(), CheckingProcessor)
    }
}

impl Default for TableController<CheckingProcessor> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: TurnProcessor> TableController<P> {
    /// Стол с внешним обработчиком хода (логика ставок и т.п.).
    pub fn with_processor(seats: Vec<Seat>, processor: P) -> Result<Self, TableError> {
        let mut table = Self::from_parts(SeatRing::build(seats)?, processor);
        if !table.ring.is_empty() {
            table.assign_initial_dealer()?;
        }
        Ok(table)
    }

    /// Ограничить журнал событий `capacity` последними записями.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history.set_capacity(capacity);
        self
    }

    fn from_parts(ring: SeatRing, processor: P) -> Self {
        Self {
            ring,
            community_cards: Vec::new(),
            dealer: None,
            current_actor: None,
            processor,
            history: TableHistory::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Места
    // ---------------------------------------------------------------------

    /// Заменить все места и перестроить кольцо.
    ///
    /// Старые индексы после этого бессмысленны, поэтому кнопка выставляется
    /// заново (`assign_initial_dealer`), а при пустом списке сбрасывается.
    pub fn set_seats(&mut self, seats: Vec<Seat>) -> Result<(), TableError> {
        self.ring.rebuild(seats)?;
        self.history.push(TableEventKind::SeatsRebuilt {
            seat_count: self.ring.len(),
        });
        tracing::debug!(seat_count = self.ring.len(), "seats replaced, ring rebuilt");

        if self.ring.is_empty() {
            self.dealer = None;
            self.current_actor = None;
        } else {
            self.assign_initial_dealer()?;
        }
        Ok(())
    }

    /// Сверить факт об игроке со столом.
    ///
    /// Игрок найден – перезаписываем стек, ставку, ход и активность; кольцо не трогаем.
    /// Не найден – добавляем место в конец кольца. Кнопка и текущий игрок при этом
    /// остаются на своих местах: их индексы не меняются. Исключение – первое
    /// место за пустым столом: двигать нечего, кнопка выставляется на него.
    pub fn reconcile(&mut self, fact: PlayerFact) -> Reconciled {
        let existing = self
            .ring
            .position(&fact.identity)
            .and_then(|idx| self.ring.get_mut(idx).map(|seat| (idx, seat)));

        if let Some((idx, seat)) = existing {
            if seat.matches_fact(&fact) {
                return Reconciled::Unchanged(idx);
            }

            seat.apply_fact(&fact);
            tracing::debug!(seat = idx, identity = %fact.identity, "seat updated from fact");
            self.history.push(TableEventKind::SeatUpdated {
                seat: idx,
                identity: fact.identity,
            });
            return Reconciled::Updated(idx);
        }

        let identity = fact.identity.clone();
        let idx = self.ring.append(Seat::from(fact));
        tracing::debug!(seat = idx, identity = %identity, seat_count = self.ring.len(), "seat added");
        self.history.push(TableEventKind::SeatAdded { seat: idx, identity });

        if self.dealer.is_none() {
            self.seed_dealer();
        }
        Reconciled::Added(idx)
    }

    /// Посадить игрока в игру / вывести в sit out по identity.
    pub fn set_active(&mut self, identity: &str, active: bool) -> Result<SeatIndex, TableError> {
        let idx = self
            .ring
            .position(identity)
            .ok_or_else(|| TableError::UnknownSeat(identity.to_string()))?;

        if let Some(seat) = self.ring.get_mut(idx) {
            if seat.is_active() != active {
                seat.set_active(active);
                self.history.push(TableEventKind::SeatUpdated {
                    seat: idx,
                    identity: identity.to_string(),
                });
            }
        }
        Ok(idx)
    }

    // ---------------------------------------------------------------------
    // Кнопка и блайнды
    // ---------------------------------------------------------------------

    /// Первая кнопка: первое активное место, начиная с нулевого.
    /// Если активных нет – кнопка всё равно на нулевом месте, стол застрял.
    pub fn assign_initial_dealer(&mut self) -> Result<SeatIndex, TableError> {
        let dealer = self.ring.first_active_from(0)?;
        self.dealer = Some(dealer);
        self.current_actor = Some(dealer);

        self.history.push(TableEventKind::DealerAssigned { seat: dealer });
        tracing::info!(seat = dealer, identity = %self.identity_at(dealer), "dealer assigned");

        if self.ring.active_count() == 0 {
            tracing::warn!(seat = dealer, "no active seats, table is stalled");
            self.history.push(TableEventKind::Stalled { seat: dealer });
        }
        Ok(dealer)
    }

    fn seed_dealer(&mut self) {
        if let Err(e) = self.assign_initial_dealer() {
            tracing::warn!(error = %e, "could not seat the initial dealer");
        }
    }

    /// Передвинуть кнопку на следующее активное место (между раздачами).
    /// Ход переходит к новому дилеру. Без кнопки – ничего не делаем.
    pub fn rotate_dealer(&mut self) -> Option<SeatIndex> {
        let from = self.dealer?;
        let to = self.ring.next_active(from).ok()?;

        self.dealer = Some(to);
        self.current_actor = Some(to);

        self.history.push(TableEventKind::DealerRotated { from, to });
        tracing::info!(from, to, identity = %self.identity_at(to), "dealer rotated");
        Some(to)
    }

    /// Малый и большой блайнды: два последовательных активных места после кнопки.
    /// Состояние не меняется. Без кнопки – `(None, None)`.
    pub fn assign_blinds(&self) -> (Option<SeatIndex>, Option<SeatIndex>) {
        let Some(dealer) = self.dealer else {
            return (None, None);
        };
        let small_blind = self.ring.next_active(dealer).ok();
        let big_blind = small_blind.and_then(|sb| self.ring.next_active(sb).ok());
        (small_blind, big_blind)
    }

    // ---------------------------------------------------------------------
    // Очередь хода
    // ---------------------------------------------------------------------

    /// Один шаг очереди: обработать ход текущего игрока и передать ход
    /// следующему активному. Возвращает нового текущего игрока,
    /// `None` – если за столом никого нет (кнопка не выставлена).
    pub fn advance_turn(&mut self) -> Option<SeatIndex> {
        let current = self.current_actor?;

        let seat = self.ring.get_mut(current)?;
        let action = self.processor.process_turn(seat);
        seat.set_last_move(Some(action));
        let identity = seat.identity().to_string();

        let next = self.ring.next_active(current).ok()?;
        self.current_actor = Some(next);

        self.history.push(TableEventKind::TurnProcessed {
            seat: current,
            identity,
            action,
            next,
        });

        if next == current {
            tracing::warn!(seat = current, "nobody else to act, table is stalled");
            self.history.push(TableEventKind::Stalled { seat: current });
        }
        Some(next)
    }

    /// Текущее состояние очереди хода.
    pub fn turn_state(&self) -> TurnState {
        let Some(current) = self.current_actor else {
            return TurnState::Idle;
        };
        match self.ring.next_active(current) {
            Ok(next) if next != current => TurnState::Awaiting(current),
            Ok(_) => TurnState::Stalled(current),
            Err(_) => TurnState::Idle,
        }
    }

    pub fn is_stalled(&self) -> bool {
        matches!(self.turn_state(), TurnState::Stalled(_))
    }

    /// Место, от которого ждём хода, либо причина, почему играть нельзя.
    pub fn ensure_playable(&self) -> Result<SeatIndex, TableError> {
        match self.turn_state() {
            TurnState::Awaiting(seat) => Ok(seat),
            TurnState::Stalled(_) => Err(TableError::Stalled),
            TurnState::Idle => Err(TableError::EmptyRing),
        }
    }

    // ---------------------------------------------------------------------
    // Борд
    // ---------------------------------------------------------------------

    /// Выставить борд: идентификаторы хранятся ровно как пришли
    /// (`"10c"` остаётся `"10c"`), движок их не разбирает.
    pub fn set_community_cards<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards: Vec<String> = ids.into_iter().map(Into::into).collect();
        self.history.push(TableEventKind::BoardSet {
            cards: cards.clone(),
        });
        self.community_cards = cards;
    }

    /// Борд как разобранные карты. Ошибка, если детектор прислал
    /// что-то, кроме `Ah`/`Td`/`10c` (например, заглушку `??`).
    pub fn board_cards(&self) -> Result<Vec<Card>, TableError> {
        Ok(Card::parse_many(self.community_cards.as_slice())?)
    }

    pub fn clear_community_cards(&mut self) {
        self.community_cards.clear();
        self.history.push(TableEventKind::BoardCleared);
    }

    // ---------------------------------------------------------------------
    // Чтение
    // ---------------------------------------------------------------------

    pub fn ring(&self) -> &SeatRing {
        &self.ring
    }

    pub fn seats(&self) -> &[Seat] {
        self.ring.seats()
    }

    pub fn seat_count(&self) -> usize {
        self.ring.len()
    }

    pub fn seat_at(&self, index: SeatIndex) -> Option<&Seat> {
        self.ring.get(index)
    }

    pub fn seat_index(&self, identity: &str) -> Result<SeatIndex, TableError> {
        self.ring
            .position(identity)
            .ok_or_else(|| TableError::UnknownSeat(identity.to_string()))
    }

    pub fn seat(&self, identity: &str) -> Result<&Seat, TableError> {
        let idx = self.seat_index(identity)?;
        self.ring.get(idx).ok_or(TableError::InvalidSeat(idx))
    }

    /// Следующее активное место после `from` (см. `SeatRing::next_active`).
    pub fn next_active(&self, from: SeatIndex) -> Result<SeatIndex, TableError> {
        Ok(self.ring.next_active(from)?)
    }

    pub fn dealer_index(&self) -> Option<SeatIndex> {
        self.dealer
    }

    pub fn dealer(&self) -> Option<&Seat> {
        self.dealer.and_then(|idx| self.ring.get(idx))
    }

    pub fn current_actor_index(&self) -> Option<SeatIndex> {
        self.current_actor
    }

    pub fn current_actor(&self) -> Option<&Seat> {
        self.current_actor.and_then(|idx| self.ring.get(idx))
    }

    pub fn community_cards(&self) -> &[String] {
        &self.community_cards
    }

    pub fn history(&self) -> &TableHistory {
        &self.history
    }

    /// Забрать накопленные события (для UI / обратной связи детектору).
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        self.history.take_events()
    }

    fn identity_at(&self, index: SeatIndex) -> &str {
        self.ring.get(index).map(Seat::identity).unwrap_or("?")
    }
}

impl<P: TurnProcessor> fmt::Display for TableController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |seat: Option<&Seat>| seat.map(Seat::identity).unwrap_or("None").to_string();

        let seats: Vec<&str> = self.ring.seats().iter().map(Seat::identity).collect();

        write!(
            f,
            "Table(dealer={}, current_turn={}, seats=[{}], community_cards=[{}])",
            name(self.dealer()),
            name(self.current_actor()),
            seats.join(", "),
            self.community_cards.join(", ")
        )
    }
}

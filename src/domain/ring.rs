//! Кольцо мест: циклический порядок обхода стола.
//!
//! Вместо связного списка с указателями `next` храним места в векторе,
//! а преемника считаем как `(index + 1) % len`. Так кольцо всегда
//! является одним циклом по всем местам, и перестройка после добавления
//! места сводится к `push`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::seat::Seat;

/// Индекс места в кольце. Индексы стабильны, пока кольцо не заменено целиком.
pub type SeatIndex = usize;

/// Ошибки операций над кольцом.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("кольцо пустое: за столом нет мест")]
    Empty,

    #[error("места с индексом {0} нет в кольце")]
    InvalidSeat(SeatIndex),

    #[error("identity `{0}` уже есть в кольце")]
    DuplicateIdentity(String),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRing {
    seats: Vec<Seat>,
}

impl SeatRing {
    /// Пустое кольцо.
    pub fn new() -> Self {
        Self::default()
    }

    /// Построить кольцо: порядок вектора = порядок обхода, последний замыкается на первый.
    /// Пустой вход допустим – это просто «простаивающий» стол.
    /// identity должны быть уникальны.
    pub fn build(seats: Vec<Seat>) -> Result<Self, RingError> {
        ensure_unique(&seats)?;
        let ring = Self { seats };
        ring.debug_assert_topology();
        Ok(ring)
    }

    /// Заменить все места целиком. При дублях кольцо не меняется.
    pub fn rebuild(&mut self, seats: Vec<Seat>) -> Result<(), RingError> {
        ensure_unique(&seats)?;
        self.seats = seats;
        self.debug_assert_topology();
        Ok(())
    }

    /// Добавить место в конец обхода (между последним и первым).
    /// Индексы уже существующих мест не меняются.
    pub fn push(&mut self, seat: Seat) -> Result<SeatIndex, RingError> {
        if self.position(seat.identity()).is_some() {
            return Err(RingError::DuplicateIdentity(seat.identity().to_string()));
        }
        Ok(self.append(seat))
    }

    /// `push` без поиска дубля: вызывающий уже убедился, что игрока нет.
    pub(crate) fn append(&mut self, seat: Seat) -> SeatIndex {
        self.seats.push(seat);
        self.debug_assert_topology();
        self.seats.len() - 1
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn get(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index)
    }

    /// Мутабельный доступ только внутри крейта: снаружи топологию не трогают.
    pub(crate) fn get_mut(&mut self, index: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(index)
    }

    /// Найти место по identity.
    pub fn position(&self, identity: &str) -> Option<SeatIndex> {
        self.seats.iter().position(|s| s.identity() == identity)
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    /// Следующее место по кругу (без учёта активности).
    pub fn successor(&self, index: SeatIndex) -> Result<SeatIndex, RingError> {
        self.check(index)?;
        Ok((index + 1) % self.seats.len())
    }

    /// Первое активное место строго после `from`.
    ///
    /// Если обход вернулся к `from`, не найдя активных, возвращаем сам `from`:
    /// так полностью неактивный стол (или стол с единственным активным местом)
    /// сообщает себя же как «следующего», а вызывающий считает стол застрявшим.
    pub fn next_active(&self, from: SeatIndex) -> Result<SeatIndex, RingError> {
        let mut idx = self.successor(from)?;
        while idx != from {
            if self.seats[idx].is_active() {
                return Ok(idx);
            }
            idx = (idx + 1) % self.seats.len();
        }
        Ok(from)
    }

    /// Как `next_active`, но `start` возвращается сразу, если он активен.
    /// Если активных нет вовсе – возвращается `start`.
    pub fn first_active_from(&self, start: SeatIndex) -> Result<SeatIndex, RingError> {
        self.check(start)?;
        let len = self.seats.len();
        Ok((0..len)
            .map(|step| (start + step) % len)
            .find(|&idx| self.seats[idx].is_active())
            .unwrap_or(start))
    }

    /// Обход всех мест ровно один раз, начиная со `start`.
    pub fn walk(&self, start: SeatIndex) -> Result<impl Iterator<Item = SeatIndex> + '_, RingError> {
        self.check(start)?;
        let len = self.seats.len();
        Ok((0..len).map(move |step| (start + step) % len))
    }

    /// Активные места в порядке обхода, начиная со `start` (включительно).
    pub fn active_from(&self, start: SeatIndex) -> Result<Vec<SeatIndex>, RingError> {
        Ok(self
            .walk(start)?
            .filter(|&idx| self.seats[idx].is_active())
            .collect())
    }

    fn check(&self, index: SeatIndex) -> Result<(), RingError> {
        if self.seats.is_empty() {
            return Err(RingError::Empty);
        }
        if index >= self.seats.len() {
            return Err(RingError::InvalidSeat(index));
        }
        Ok(())
    }

    /// Обход по successor – один цикл по всем местам.
    /// Нарушение – баг в build/append, а не пользовательская ошибка.
    fn debug_assert_topology(&self) {
        if cfg!(debug_assertions) {
            let len = self.seats.len();
            let mut seen = vec![false; len];
            let mut idx = 0;
            for _ in 0..len {
                debug_assert!(!seen[idx], "кольцо мест разорвано на индексе {idx}");
                seen[idx] = true;
                idx = (idx + 1) % len;
            }
            debug_assert!(len == 0 || idx == 0, "обход не вернулся к началу кольца");
        }
    }
}

fn ensure_unique(seats: &[Seat]) -> Result<(), RingError> {
    let mut seen = HashSet::with_capacity(seats.len());
    for seat in seats {
        if !seen.insert(seat.identity()) {
            return Err(RingError::DuplicateIdentity(seat.identity().to_string()));
        }
    }
    Ok(())
}

//! Симуляция детектора: случайные факты об игроках для стресс-прогонов.
//!
//! Только для native: на wasm `rand` не тянем.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::chips::Chips;
use crate::domain::seat::{Move, PlayerFact};

/// Источник случайности для симулятора.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерно в `0..bound` (при `bound == 0` – всегда 0).
    fn next_u64_below(&mut self, bound: u64) -> u64;

    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        (self.next_u64_below(u64::from(denominator)) as u32) < numerator
    }
}

#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn next_u64_below(&mut self, bound: u64) -> u64 {
        rand::thread_rng().gen_range(0..bound.max(1))
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Один и тот же seed даёт одну и ту же последовательность фактов.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn next_u64_below(&mut self, bound: u64) -> u64 {
        self.inner.gen_range(0..bound.max(1))
    }
}

/// Генератор «шумных» фактов от детектора: игроки из фиксированного пула,
/// иногда уходят в sit out, иногда возвращаются.
#[derive(Clone, Debug)]
pub struct FactSimulator<R: RandomSource> {
    rng: R,
    pool: Vec<String>,
    max_stack: u64,
}

impl<R: RandomSource> FactSimulator<R> {
    pub fn new(rng: R, pool_size: usize, max_stack: u64) -> Self {
        let pool = (1..=pool_size).map(|i| format!("Player {i}")).collect();
        Self {
            rng,
            pool,
            max_stack,
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Следующий факт о случайном игроке пула. `None` только при пустом пуле.
    pub fn next_fact(&mut self) -> Option<PlayerFact> {
        if self.pool.is_empty() {
            return None;
        }
        let who = self.rng.next_u64_below(self.pool.len() as u64) as usize;
        let identity = self.pool[who].clone();
        Some(self.fact_for(identity))
    }

    /// «Кадр»: по факту на каждого игрока пула, в случайном порядке.
    pub fn full_frame(&mut self) -> Vec<PlayerFact> {
        let mut order = self.pool.clone();
        self.rng.shuffle(&mut order);
        order.into_iter().map(|identity| self.fact_for(identity)).collect()
    }

    fn fact_for(&mut self, identity: String) -> PlayerFact {
        let stack = self.rng.next_u64_below(self.max_stack + 1);
        let bet = self.rng.next_u64_below(stack + 1);
        let active = !self.rng.chance(1, 4);

        let last_move = match self.rng.next_u64_below(5) {
            0 => None,
            1 => Some(Move::Fold),
            2 => Some(Move::Call),
            3 => Some(Move::Raise),
            _ => Some(Move::Check),
        };

        PlayerFact {
            identity,
            chip_amount: Chips::new(stack),
            bet: Chips::new(bet),
            last_move,
            active,
        }
    }
}

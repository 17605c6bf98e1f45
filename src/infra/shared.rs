use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::{CheckingProcessor, TableController, TurnProcessor};

/// Общий стол для продюсера (детектор) и потребителя (очередь хода).
///
/// Движок сам ничего не синхронизирует: все мутации одного стола
/// должны идти строго по одной. Этот хэндл держит стол под одним
/// мьютексом, клон – это ещё одна ссылка на тот же стол.
#[derive(Debug)]
pub struct SharedTable<P: TurnProcessor = CheckingProcessor> {
    inner: Arc<Mutex<TableController<P>>>,
}

impl<P: TurnProcessor> Clone for SharedTable<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: TurnProcessor> SharedTable<P> {
    pub fn new(table: TableController<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Выполнить мутацию под замком.
    pub fn with_table<R>(&self, f: impl FnOnce(&mut TableController<P>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Чтение под тем же замком (производные значения чистые, но стол
    /// не должен меняться посреди чтения).
    pub fn read<R>(&self, f: impl FnOnce(&TableController<P>) -> R) -> R {
        f(&self.lock())
    }

    // Паника внутри замыкания не рвёт кольцо: каждая операция оставляет
    // его целым, поэтому отравленный мьютекс просто подбираем.
    fn lock(&self) -> MutexGuard<'_, TableController<P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

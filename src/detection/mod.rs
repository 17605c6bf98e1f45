//! Приём кадров от захвата экрана и сверка распознанных фактов со столом.
//!
//! Сам захват окна и бесконечный цикл опроса – забота бинарника;
//! здесь один проход: найти новые кадры, распознать, сверить.

pub mod config;
pub mod detector;
pub mod frames;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::seat::PlayerFact;
use crate::engine::{Reconciled, TableController, TurnProcessor};
use crate::infra::SharedTable;

pub use config::DetectionConfig;
pub use detector::{PlaceholderDetector, TableDetector};
pub use frames::FrameQueue;

/// Ошибки приёма кадров.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("некорректный JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error("некорректный конфиг: {0}")]
    Config(String),

    #[error("детектор не смог разобрать кадр {frame}: {reason}")]
    Detector { frame: PathBuf, reason: String },
}

/// Итог одного прохода по каталогу.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Сколько новых кадров нашли.
    pub frames: usize,
    /// Сколько кадров детектор не осилил.
    pub failed: usize,
    /// Сколько фактов сверили со столом.
    pub facts: usize,
    /// Сколько из них посадили новых игроков.
    pub seats_added: usize,
}

/// Один проход: новые кадры → детектор → `reconcile` каждого факта.
///
/// Ошибка детектора на отдельном кадре не прерывает проход: кадр
/// помечается обработанным и считается в `failed`.
pub fn process_new_frames<D, P>(
    queue: &mut FrameQueue,
    detector: &mut D,
    table: &mut TableController<P>,
) -> Result<FrameReport, DetectionError>
where
    D: TableDetector,
    P: TurnProcessor,
{
    let mut report = FrameReport::default();

    for frame in queue.poll_new_frames()? {
        report.frames += 1;
        match detector.detect(&frame) {
            Ok(facts) => apply_facts(table, facts, &mut report),
            Err(e) => {
                tracing::warn!(frame = %frame.display(), error = %e, "frame skipped");
                report.failed += 1;
            }
        }
        queue.mark_processed(frame);
    }

    Ok(report)
}

/// То же для общего стола: распознавание идёт без замка,
/// сверка кадра – одной критической секцией.
pub fn process_new_frames_shared<D, P>(
    queue: &mut FrameQueue,
    detector: &mut D,
    table: &SharedTable<P>,
) -> Result<FrameReport, DetectionError>
where
    D: TableDetector,
    P: TurnProcessor,
{
    let mut report = FrameReport::default();

    for frame in queue.poll_new_frames()? {
        report.frames += 1;
        match detector.detect(&frame) {
            Ok(facts) => table.with_table(|t| apply_facts(t, facts, &mut report)),
            Err(e) => {
                tracing::warn!(frame = %frame.display(), error = %e, "frame skipped");
                report.failed += 1;
            }
        }
        queue.mark_processed(frame);
    }

    Ok(report)
}

/// Сверить факты одного кадра. Кнопку за пустым столом выставляет
/// сам `reconcile` при первом добавленном игроке.
fn apply_facts<P: TurnProcessor>(
    table: &mut TableController<P>,
    facts: Vec<PlayerFact>,
    report: &mut FrameReport,
) {
    for fact in facts {
        report.facts += 1;
        if let Reconciled::Added(_) = table.reconcile(fact) {
            report.seats_added += 1;
        }
    }
}

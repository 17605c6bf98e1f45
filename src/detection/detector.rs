use std::path::Path;

use crate::detection::DetectionError;
use crate::domain::chips::Chips;
use crate::domain::seat::PlayerFact;

/// Распознавание состояния стола по кадру.
///
/// Движку всё равно, как получены факты: OpenCV, ручной ввод или тест.
pub trait TableDetector {
    fn detect(&mut self, frame: &Path) -> Result<Vec<PlayerFact>, DetectionError>;
}

/// Заглушка, пока настоящего распознавания нет:
/// на любом кадре видит двух игроков по 1500 фишек.
#[derive(Clone, Debug)]
pub struct PlaceholderDetector {
    pub starting_stack: Chips,
}

impl Default for PlaceholderDetector {
    fn default() -> Self {
        Self {
            starting_stack: Chips::new(1_500),
        }
    }
}

impl TableDetector for PlaceholderDetector {
    fn detect(&mut self, frame: &Path) -> Result<Vec<PlayerFact>, DetectionError> {
        tracing::debug!(frame = %frame.display(), "processing frame");
        Ok(vec![
            PlayerFact::new("Player 1", self.starting_stack),
            PlayerFact::new("Player 2", self.starting_stack),
        ])
    }
}

impl<F> TableDetector for F
where
    F: FnMut(&Path) -> Result<Vec<PlayerFact>, DetectionError>,
{
    fn detect(&mut self, frame: &Path) -> Result<Vec<PlayerFact>, DetectionError> {
        self(frame)
    }
}

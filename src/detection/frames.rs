use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::detection::config::DetectionConfig;
use crate::detection::DetectionError;

/// Очередь кадров: каждый кадр отдаётся ровно один раз, от старых к новым.
#[derive(Debug)]
pub struct FrameQueue {
    config: DetectionConfig,
    processed: HashSet<PathBuf>,
}

impl FrameQueue {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            processed: HashSet::new(),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Новые кадры, отсортированные по времени изменения (старые первыми).
    ///
    /// Каталога ещё нет – это не ошибка: захват его пока не создал,
    /// просто возвращаем пустой список и ждём следующего опроса.
    pub fn poll_new_frames(&mut self) -> Result<Vec<PathBuf>, DetectionError> {
        let entries = match fs::read_dir(&self.config.input_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut fresh: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if !self.config.is_frame(&path) || self.processed.contains(&path) {
                continue;
            }
            // Кадр мог исчезнуть между read_dir и stat – подберём на следующем опросе.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(frame = %path.display(), "frame vanished before stat");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            fresh.push((modified, path));
        }

        // При равном mtime порядок по имени: в имени кадра метка времени в мс.
        fresh.sort();
        Ok(fresh.into_iter().map(|(_, path)| path).collect())
    }

    /// Отметить кадр обработанным (даже если детектор на нём упал –
    /// повторять битый кадр бессмысленно).
    pub fn mark_processed(&mut self, frame: PathBuf) {
        self.processed.insert(frame);
    }
}

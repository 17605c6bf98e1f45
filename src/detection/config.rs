use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::detection::DetectionError;

/// Настройки приёма кадров от захвата экрана.
///
/// Все поля необязательны в JSON: отсутствующие берутся из `Default`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Каталог, куда захват складывает кадры.
    pub input_dir: PathBuf,
    /// Префикс имени кадра (`frame_1712345678901.png`).
    pub frame_prefix: String,
    /// Расширение кадра без точки.
    pub frame_extension: String,
    /// Пауза между опросами каталога, мс.
    pub processing_delay_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("vision").join("raw_frames"),
            frame_prefix: "frame_".to_string(),
            frame_extension: "png".to_string(),
            processing_delay_ms: 1_000,
        }
    }
}

impl DetectionConfig {
    /// Конфиг по умолчанию, но с другим каталогом.
    pub fn for_dir(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DetectionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.frame_extension.is_empty() || self.frame_extension.starts_with('.') {
            return Err(DetectionError::Config(format!(
                "frame_extension должен быть без точки и непустой, получено `{}`",
                self.frame_extension
            )));
        }
        if self.processing_delay_ms == 0 {
            return Err(DetectionError::Config("processing_delay_ms = 0".into()));
        }
        Ok(())
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Подходит ли файл под шаблон кадра: `<prefix>*.<extension>`.
    pub fn is_frame(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        name.starts_with(&self.frame_prefix) && ext == self.frame_extension
    }
}

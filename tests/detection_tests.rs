// tests/detection_tests.rs
//
// Приём кадров: какие файлы считаются кадрами, порядок по mtime,
// каждый кадр ровно один раз, отсутствие каталога, конфиг из JSON,
// сверка фактов детектора со столом.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use poker_table_tracker::detection::{
    process_new_frames, process_new_frames_shared, DetectionConfig, DetectionError, FrameQueue,
    FrameReport, PlaceholderDetector,
};
use poker_table_tracker::domain::{Chips, PlayerFact};
use poker_table_tracker::engine::TableController;
use poker_table_tracker::infra::SharedTable;

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ
// -----------------------------

/// Создать файл кадра с заданным «возрастом» (секунд назад).
fn touch(dir: &Path, name: &str, age_secs: u64) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let when = SystemTime::now() - Duration::from_secs(age_secs);
    file.set_modified(when).unwrap();
    path
}

/// Только `frame_*.png`, от старых к новым, повторно не отдаются.
#[test]
fn frame_queue_orders_by_mtime_and_dedups() {
    let dir = tempfile::tempdir().unwrap();
    let newest = touch(dir.path(), "frame_300.png", 10);
    let oldest = touch(dir.path(), "frame_900.png", 300);
    let middle = touch(dir.path(), "frame_500.png", 100);
    touch(dir.path(), "frame_1.jpg", 1_000);
    touch(dir.path(), "screenshot_1.png", 1_000);
    fs::create_dir(dir.path().join("frame_dir.png")).unwrap();

    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path()));
    let frames = queue.poll_new_frames().unwrap();
    assert_eq!(frames, vec![oldest.clone(), middle.clone(), newest.clone()]);

    for f in frames {
        queue.mark_processed(f);
    }
    assert!(queue.poll_new_frames().unwrap().is_empty());
    assert_eq!(queue.processed_count(), 3);

    let fresh = touch(dir.path(), "frame_1000.png", 0);
    assert_eq!(queue.poll_new_frames().unwrap(), vec![fresh]);
}

/// Каталога нет – пустой список, не ошибка.
#[test]
fn missing_directory_yields_no_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path().join("not_yet")));
    assert!(queue.poll_new_frames().unwrap().is_empty());
}

/// Кадр, исчезнувший между листингом и stat (висячая ссылка даёт тот же
/// NotFound), пропускается, а не роняет весь опрос.
#[cfg(unix)]
#[test]
fn vanished_frame_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let real = touch(dir.path(), "frame_1.png", 10);
    std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("frame_2.png")).unwrap();

    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path()));
    assert_eq!(queue.poll_new_frames().unwrap(), vec![real]);
}

/// Конфиг: значения по умолчанию, частичный JSON, валидация.
#[test]
fn detection_config_defaults_and_json() {
    let cfg = DetectionConfig::default();
    assert_eq!(cfg.input_dir, PathBuf::from("vision").join("raw_frames"));
    assert_eq!(cfg.frame_prefix, "frame_");
    assert_eq!(cfg.frame_extension, "png");
    assert_eq!(cfg.processing_delay(), Duration::from_secs(1));

    let cfg = DetectionConfig::from_json(r#"{"input_dir":"/tmp/frames","processing_delay_ms":250}"#)
        .unwrap();
    assert_eq!(cfg.input_dir, PathBuf::from("/tmp/frames"));
    assert_eq!(cfg.frame_prefix, "frame_");
    assert_eq!(cfg.processing_delay_ms, 250);

    assert!(matches!(
        DetectionConfig::from_json(r#"{"frame_extension":".png"}"#),
        Err(DetectionError::Config(_))
    ));
    assert!(matches!(
        DetectionConfig::from_json(r#"{"processing_delay_ms":0}"#),
        Err(DetectionError::Config(_))
    ));
    assert!(matches!(
        DetectionConfig::from_json("not json"),
        Err(DetectionError::Json(_))
    ));

    assert!(cfg.is_frame(Path::new("/x/frame_1.png")));
    assert!(!cfg.is_frame(Path::new("/x/frame_1.png.tmp")));
    assert!(!cfg.is_frame(Path::new("/x/other_1.png")));
}

/// Заглушка детектора: два игрока по 1500, стол получает кнопку.
#[test]
fn placeholder_detector_seats_two_players() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "frame_1.png", 20);
    touch(dir.path(), "frame_2.png", 10);

    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path()));
    let mut detector = PlaceholderDetector::default();
    let mut table = TableController::empty();

    let report = process_new_frames(&mut queue, &mut detector, &mut table).unwrap();
    assert_eq!(
        report,
        FrameReport {
            frames: 2,
            failed: 0,
            facts: 4,
            seats_added: 2,
        }
    );

    assert_eq!(table.seat_count(), 2);
    assert_eq!(table.seat("Player 1").unwrap().chip_amount(), Chips(1_500));
    assert_eq!(table.dealer().unwrap().identity(), "Player 1");

    // Второй проход – новых кадров нет.
    let report = process_new_frames(&mut queue, &mut detector, &mut table).unwrap();
    assert_eq!(report, FrameReport::default());
}

/// Ошибка детектора на кадре не останавливает проход.
#[test]
fn detector_failure_skips_frame() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "frame_bad.png", 20);
    touch(dir.path(), "frame_good.png", 10);

    let mut detector = |frame: &Path| -> Result<Vec<PlayerFact>, DetectionError> {
        if frame.to_string_lossy().contains("bad") {
            return Err(DetectionError::Detector {
                frame: frame.to_path_buf(),
                reason: "размытый кадр".into(),
            });
        }
        Ok(vec![PlayerFact::new("Hero", Chips(2_000)).with_active(false)])
    };

    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path()));
    let mut table = TableController::empty();
    let report = process_new_frames(&mut queue, &mut detector, &mut table).unwrap();

    assert_eq!(report.frames, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.seats_added, 1);
    assert_eq!(queue.processed_count(), 2);

    // Единственный игрок сидит вне игры: кнопка есть, стол застрял.
    assert!(table.is_stalled());
}

/// Вариант для общего стола.
#[test]
fn shared_table_receives_frames() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "frame_1.png", 5);

    let shared = SharedTable::new(TableController::empty());
    let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir.path()));
    let mut detector = PlaceholderDetector::default();

    let report = process_new_frames_shared(&mut queue, &mut detector, &shared).unwrap();
    assert_eq!(report.seats_added, 2);
    assert_eq!(shared.read(|t| t.seat_count()), 2);
}

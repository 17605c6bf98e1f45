// src/bin/table_dev_cli.rs
//
// Прогон сценария стола руками: три игрока, один в sit out,
// кнопка, блайнды, несколько ходов, доливка нового игрока.
// Если передан путь к каталогу кадров – один проход детектора-заглушки.

use std::env;

use poker_table_tracker::api::{execute, run_query, Command, Query, QueryResponse};
use poker_table_tracker::detection::{
    process_new_frames, DetectionConfig, FrameQueue, PlaceholderDetector,
};
use poker_table_tracker::domain::{Chips, PlayerFact, Seat, SeatIndex};
use poker_table_tracker::engine::{TableController, TableError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TableError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== TABLE DEV CLI ===\n");

    let mut table = TableController::new(vec![
        Seat::new("Alice", Chips::new(1_500)),
        Seat::sitting_out("Bob", Chips::new(1_500)),
        Seat::new("Carol", Chips::new(2_000)),
    ])?;

    // Кнопка выставлена конструктором.
    println!("{table}");

    let (sb, bb) = table.assign_blinds();
    println!("SB = {}, BB = {}\n", seat_name(&table, sb), seat_name(&table, bb));

    for _ in 0..3 {
        if let Some(next) = table.advance_turn() {
            println!("  ход переходит к {}", seat_name(&table, Some(next)));
        }
    }

    println!("\nБоб возвращается, за стол садится Dave:");
    table.reconcile(PlayerFact::new("Bob", Chips::new(1_500)));
    table.reconcile(PlayerFact::new("Dave", Chips::new(800)));
    println!("{table}");

    if let Err(e) = execute(
        &mut table,
        Command::SetCommunityCards(vec!["Ah".into(), "Td".into(), "7c".into()]),
    ) {
        eprintln!("  не удалось выставить борд: {e:?}");
    }
    match table.board_cards() {
        Ok(cards) => println!("  борд разобран: {} карт(ы)", cards.len()),
        Err(e) => eprintln!("  борд не разобрался: {e}"),
    }

    table.rotate_dealer();
    println!("\nПосле смены кнопки: {table}");

    match run_query(&table, &Query::GetTable) {
        Ok(QueryResponse::Table(snapshot)) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("\nSnapshot:\n{json}"),
            Err(e) => eprintln!("snapshot не сериализовался: {e}"),
        },
        other => eprintln!("неожиданный ответ: {other:?}"),
    }

    if let Some(dir) = env::args().nth(1) {
        println!("\nОдин проход по кадрам в {dir}:");
        let mut queue = FrameQueue::new(DetectionConfig::for_dir(dir));
        let mut detector = PlaceholderDetector::default();
        match process_new_frames(&mut queue, &mut detector, &mut table) {
            Ok(report) => println!("  {report:?}\n  {table}"),
            Err(e) => eprintln!("  ошибка детекции: {e}"),
        }
    }

    Ok(())
}

fn seat_name(table: &TableController, idx: Option<SeatIndex>) -> String {
    idx.and_then(|i| table.seat_at(i))
        .map(|s| s.identity().to_string())
        .unwrap_or_else(|| "-".into())
}

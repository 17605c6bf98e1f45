// tests/shared_table_tests.rs
//
// Продюсер (детектор) и потребитель (очередь хода) работают с одним столом
// через SharedTable. Мутации сериализованы замком, кольцо не рвётся.

use poker_table_tracker::domain::{Chips, PlayerFact, Seat};
use poker_table_tracker::engine::{TableController, TurnState};
use poker_table_tracker::infra::SharedTable;
use tokio::sync::mpsc;

fn make_shared() -> SharedTable {
    let table = TableController::new(vec![
        Seat::new("A", Chips(1_000)),
        Seat::new("B", Chips(1_000)),
    ])
    .unwrap();
    SharedTable::new(table)
}

/// Факты идут из отдельной задачи через канал, ходы – из основной.
#[tokio::test(flavor = "current_thread")]
async fn producer_and_consumer_share_one_table() {
    let shared = make_shared();
    let (tx, mut rx) = mpsc::channel::<PlayerFact>(16);

    let producer = tokio::spawn(async move {
        for i in 0..10u64 {
            let fact = PlayerFact::new(format!("P{i}"), Chips(100 * (i + 1))).with_active(i % 3 != 0);
            if tx.send(fact).await.is_err() {
                break;
            }
        }
    });

    let consumer_table = shared.clone();
    let consumer = tokio::spawn(async move {
        let mut turns = 0u32;
        while let Some(fact) = rx.recv().await {
            consumer_table.with_table(|t| {
                t.reconcile(fact);
                if t.advance_turn().is_some() {
                    turns += 1;
                }
            });
        }
        turns
    });

    producer.await.unwrap();
    let turns = consumer.await.unwrap();
    assert_eq!(turns, 10);

    shared.read(|t| {
        assert_eq!(t.seat_count(), 12);
        assert_eq!(t.dealer().unwrap().identity(), "A");
        assert!(matches!(t.turn_state(), TurnState::Awaiting(_)));

        // Кольцо цело: N шагов по successor возвращают к началу.
        let ring = t.ring();
        let mut idx = 0;
        for _ in 0..ring.len() {
            idx = ring.successor(idx).unwrap();
        }
        assert_eq!(idx, 0);
    });
}

/// Клоны хэндла смотрят на один и тот же стол.
#[test]
fn clones_share_state() {
    let a = make_shared();
    let b = a.clone();

    a.with_table(|t| {
        t.reconcile(PlayerFact::new("C", Chips(5)));
    });
    assert_eq!(b.read(|t| t.seat_count()), 3);

    b.with_table(|t| t.rotate_dealer());
    assert_eq!(a.read(|t| t.dealer().map(|s| s.identity().to_string())), Some("B".into()));
}

/// Паника внутри критической секции не ломает стол.
#[test]
fn poisoned_lock_is_recovered() {
    let shared = make_shared();
    let inner = shared.clone();

    let result = std::thread::spawn(move || {
        inner.with_table(|t| {
            t.advance_turn();
            panic!("сбой в обработчике");
        })
    })
    .join();
    assert!(result.is_err());

    assert_eq!(shared.read(|t| t.current_actor().map(|s| s.identity().to_string())), Some("B".into()));
    assert_eq!(shared.with_table(|t| t.advance_turn()), Some(0));
}

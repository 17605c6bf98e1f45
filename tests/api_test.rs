use poker_table_tracker::{
    api::{
        commands::{decode_command, execute, Command},
        dto::{BlindsDto, CommandResponse, TurnStateDto},
        errors::ApiError,
        queries::{drain_events, run_query, Query, QueryResponse},
    },
    domain::{Chips, Move, PlayerFact, Seat},
    engine::{TableController, TableError},
    TableOperation,
};

/// Утилита: стол A, B(out), C (кнопку выставляет конструктор).
fn make_table() -> TableController {
    TableController::new(vec![
        Seat::new("A", Chips::new(1_500)),
        Seat::sitting_out("B", Chips::new(1_500)),
        Seat::new("C", Chips::new(1_500)),
    ])
    .unwrap()
}

/// Reconcile через API: новый игрок помечается added.
#[test]
fn reconcile_command_reports_added_seat() {
    let mut table = make_table();

    let resp = execute(
        &mut table,
        Command::Reconcile(PlayerFact::new("D", Chips::new(800))),
    )
    .unwrap();

    match resp {
        CommandResponse::Reconciled { seat, added } => {
            assert!(added);
            assert_eq!(seat.identity, "D");
            assert_eq!(seat.seat_index, 3);
            assert_eq!(seat.chip_amount, Chips::new(800));
            assert!(!seat.is_dealer);
        }
        other => panic!("ожидали Reconciled, получили {other:?}"),
    }

    let resp = execute(
        &mut table,
        Command::Reconcile(PlayerFact::new("A", Chips::new(1_200))),
    )
    .unwrap();
    assert!(matches!(resp, CommandResponse::Reconciled { added: false, .. }));
}

/// AdvanceTurn возвращает следующего игрока как DTO.
#[test]
fn advance_turn_command_returns_next_actor() {
    let mut table = make_table();
    let resp = execute(&mut table, Command::AdvanceTurn).unwrap();

    let CommandResponse::NextActor(Some(next)) = resp else {
        panic!("ожидали NextActor(Some(_))");
    };
    assert_eq!(next.identity, "C");
    assert!(next.is_current_actor);

    let a = match run_query(&table, &Query::GetSeat { identity: "A".into() }).unwrap() {
        QueryResponse::Seat(seat) => seat,
        other => panic!("ожидали Seat, получили {other:?}"),
    };
    assert_eq!(a.last_move, Some(Move::Check));
    assert!(a.is_dealer);
}

/// Снимок стола: кнопка, ход, блайнды, борд строками.
#[test]
fn get_table_query_builds_snapshot() {
    let mut table = make_table();
    execute(
        &mut table,
        Command::SetCommunityCards(vec!["Ah".into(), "Kd".into(), "2c".into()]),
    )
    .unwrap();

    let QueryResponse::Table(snap) = run_query(&table, &Query::GetTable).unwrap() else {
        panic!("ожидали Table");
    };

    assert_eq!(snap.seats.len(), 3);
    assert_eq!(snap.dealer.as_deref(), Some("A"));
    assert_eq!(snap.current_actor.as_deref(), Some("A"));
    assert_eq!(
        snap.blinds,
        BlindsDto {
            small_blind: Some("C".into()),
            big_blind: Some("A".into()),
        }
    );
    assert_eq!(snap.community_cards, vec!["Ah", "Kd", "2c"]);
    assert_eq!(snap.turn_state, TurnStateDto::Awaiting("A".into()));
    assert!(!snap.seats[1].active);

    execute(&mut table, Command::ClearCommunityCards).unwrap();
    let QueryResponse::Table(snap) = run_query(&table, &Query::GetTable).unwrap() else {
        panic!("ожидали Table");
    };
    assert!(snap.community_cards.is_empty());
}

/// Ошибки маппятся в ApiError.
#[test]
fn errors_are_mapped_to_api_errors() {
    let mut table = make_table();

    assert_eq!(
        run_query(&table, &Query::GetSeat { identity: "Zed".into() }).unwrap_err(),
        ApiError::UnknownSeat("Zed".into())
    );
    assert_eq!(
        execute(
            &mut table,
            Command::SetActive {
                identity: "Zed".into(),
                active: true
            }
        )
        .unwrap_err(),
        ApiError::UnknownSeat("Zed".into())
    );
    let mut empty = TableController::empty();
    assert_eq!(
        execute(&mut empty, Command::AssignInitialDealer).unwrap_err(),
        ApiError::EmptyTable
    );
    assert_eq!(ApiError::from(TableError::Stalled), ApiError::Stalled);
}

/// Борд возвращается в снимке ровно так, как его прислали,
/// включая `10c`, строчные буквы и заглушки детектора.
#[test]
fn community_cards_are_echoed_verbatim() {
    let mut table = make_table();
    execute(
        &mut table,
        Command::SetCommunityCards(vec!["10c".into(), "ah".into(), "??".into()]),
    )
    .unwrap();

    let QueryResponse::Table(snap) = run_query(&table, &Query::GetTable).unwrap() else {
        panic!("ожидали Table");
    };
    assert_eq!(snap.community_cards, vec!["10c", "ah", "??"]);

    // Разобрать такой борд нельзя – это уже решает вызывающий.
    assert!(matches!(table.board_cards(), Err(TableError::Card(_))));
}

/// Продюсер шлёт только Reconcile: первый игрок за пустым столом
/// сразу получает кнопку, и AdvanceTurn работает без AssignInitialDealer.
#[test]
fn reconcile_only_producer_can_advance() {
    let mut table = TableController::empty();
    for name in ["P1", "P2"] {
        execute(&mut table, Command::Reconcile(PlayerFact::new(name, Chips::new(1_500)))).unwrap();
    }

    let CommandResponse::NextActor(Some(next)) = execute(&mut table, Command::AdvanceTurn).unwrap()
    else {
        panic!("ожидали NextActor(Some(_))");
    };
    assert_eq!(next.identity, "P2");

    assert_eq!(
        run_query(&table, &Query::GetBlinds).unwrap(),
        QueryResponse::Blinds(BlindsDto {
            small_blind: Some("P2".into()),
            big_blind: Some("P1".into()),
        })
    );
}

/// Пустой стол: RotateDealer / AdvanceTurn не падают, блайндов нет.
#[test]
fn empty_table_commands_are_noops() {
    let mut empty = TableController::empty();
    assert_eq!(
        execute(&mut empty, Command::RotateDealer).unwrap(),
        CommandResponse::Dealer(None)
    );
    assert_eq!(
        execute(&mut empty, Command::AdvanceTurn).unwrap(),
        CommandResponse::NextActor(None)
    );
    assert_eq!(
        run_query(&empty, &Query::GetBlinds).unwrap(),
        QueryResponse::Blinds(BlindsDto::default())
    );
    assert_eq!(
        run_query(&empty, &Query::GetTurnState).unwrap(),
        QueryResponse::TurnState(TurnStateDto::Idle)
    );
}

/// SetSeats заменяет стол и сразу выставляет кнопку.
#[test]
fn set_seats_command_replaces_table() {
    let mut table = make_table();
    let resp = execute(
        &mut table,
        Command::SetSeats(vec![
            PlayerFact::new("X", Chips::new(100)).with_active(false),
            PlayerFact::new("Y", Chips::new(200)),
        ]),
    )
    .unwrap();

    let CommandResponse::TableState(snap) = resp else {
        panic!("ожидали TableState");
    };
    assert_eq!(snap.seats.len(), 2);
    assert_eq!(snap.dealer.as_deref(), Some("Y"));
    assert_eq!(snap.turn_state, TurnStateDto::Stalled("Y".into()));
}

/// JSON от продюсера: факт без необязательных полей.
#[test]
fn decode_command_from_json() {
    let cmd = decode_command(r#"{"Reconcile":{"identity":"Player 1","chip_amount":1500}}"#).unwrap();
    assert_eq!(cmd, Command::Reconcile(PlayerFact::new("Player 1", Chips::new(1_500))));

    let cmd = decode_command(r#""AdvanceTurn""#).unwrap();
    assert_eq!(cmd, Command::AdvanceTurn);

    let cmd = decode_command(
        r#"{"Reconcile":{"identity":"B","chip_amount":10,"bet":5,"last_move":"Fold","active":false}}"#,
    )
    .unwrap();
    assert_eq!(
        cmd,
        Command::Reconcile(
            PlayerFact::new("B", Chips::new(10))
                .with_bet(Chips::new(5))
                .with_last_move(Move::Fold)
                .with_active(false)
        )
    );

    assert!(matches!(decode_command("{not json"), Err(ApiError::BadRequest(_))));
}

/// События забираются одним запросом и больше не повторяются.
#[test]
fn drain_events_empties_history() {
    let mut table = make_table();
    execute(&mut table, Command::AdvanceTurn).unwrap();

    let QueryResponse::Events(first) = drain_events(&mut table) else {
        panic!("ожидали Events");
    };
    assert_eq!(first.events.len(), 2);

    let QueryResponse::Events(second) = drain_events(&mut table) else {
        panic!("ожидали Events");
    };
    assert!(second.events.is_empty());
}

/// Операция Linera сериализуется как обёртка над командой.
#[test]
fn table_operation_roundtrips_through_json() {
    let op = TableOperation::Command(Command::RotateDealer);
    let json = serde_json::to_string(&op).unwrap();
    assert_eq!(json, r#"{"Command":"RotateDealer"}"#);
}

/// ABI Linera собран из типов api (обычная зависимость linera-sdk, без тестового стека).
#[test]
fn abi_uses_api_types() {
    use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
    use poker_table_tracker::TableTrackerAbi;

    fn check<A>()
    where
        A: ContractAbi<Operation = TableOperation, Response = CommandResponse>
            + ServiceAbi<Query = Query, QueryResponse = QueryResponse>,
    {
    }
    check::<TableTrackerAbi>();
}
